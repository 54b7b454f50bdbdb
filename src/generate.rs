//! Static site generation.
//!
//! Fetches every published document once, renders every route and writes the
//! result to the output directory. Rendering is a pure function of the
//! fetched content, so routes render in parallel and two builds of the same
//! snapshot write byte-identical files.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                     # Home (CMS `home` page or built-in)
//! ├── 404.html
//! ├── destinations/
//! │   ├── index.html
//! │   └── cancun/index.html
//! ├── articles/
//! │   ├── index.html
//! │   └── best-beaches/index.html
//! ├── about/index.html               # Free-form pages
//! ├── sitemap.xml
//! ├── robots.txt
//! └── static/placeholder.svg
//! ```
//!
//! CSS and JavaScript are inlined into every page; the placeholder image is
//! the only static file.

use crate::cms::{CmsError, Content, ContentSource, Perspective};
use crate::config::SiteConfig;
use crate::documents::{Article, Destination, GlobalSettings, Navigation, Page};
use crate::links::{is_page_slug, is_safe_slug};
use crate::render::{RenderContext, pages};
use crate::sitemap;
use log::{info, warn};
use maud::Markup;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Served at `/static/placeholder.svg` when a block's image is missing.
pub const PLACEHOLDER_SVG: &str = include_str!("../static/placeholder.svg");

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("content error: {0}")]
    Cms(#[from] CmsError),
}

// ============================================================================
// Content
// ============================================================================

/// Everything the site renders, fetched once per build.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub settings: Option<GlobalSettings>,
    pub navigation: Option<Navigation>,
    /// Full destination records in listing order.
    pub destinations: Vec<Destination>,
    /// Full article records, newest first.
    pub articles: Vec<Article>,
    /// Free-form pages, excluding the home page.
    pub pages: Vec<Page>,
    /// The page with slug `home`, if one exists.
    pub home: Option<Page>,
}

impl SiteContent {
    /// Fetch the listings, then each document's full record. Documents whose
    /// slug can't be written to disk, or that vanished between the listing and
    /// the detail read, are skipped with a warning.
    pub fn fetch(content: &Content<'_>) -> Result<Self, CmsError> {
        let mut destinations = Vec::new();
        for listed in content.destinations()? {
            let slug = listed.slug.current.as_str();
            if !is_safe_slug(slug) {
                warn!(target: "build", "skipping destination {:?}: unusable slug {slug:?}", listed.name);
                continue;
            }
            match content.destination(slug)? {
                Some(destination) => destinations.push(destination),
                None => warn!(target: "build", "destination {slug:?} disappeared while fetching"),
            }
        }

        let mut articles = Vec::new();
        for listed in content.articles()? {
            let slug = listed.slug.current.as_str();
            if !is_safe_slug(slug) {
                warn!(target: "build", "skipping article {:?}: unusable slug {slug:?}", listed.title);
                continue;
            }
            match content.article(slug)? {
                Some(article) => articles.push(article),
                None => warn!(target: "build", "article {slug:?} disappeared while fetching"),
            }
        }

        let mut pages = Vec::new();
        let mut home = None;
        for listed in content.pages()? {
            let slug = listed.slug.current.as_str();
            if !is_page_slug(slug) {
                warn!(target: "build", "skipping page {:?}: unusable slug {slug:?}", listed.title);
                continue;
            }
            let Some(page) = content.page(slug)? else {
                warn!(target: "build", "page {slug:?} disappeared while fetching");
                continue;
            };
            if slug == pages::HOME_SLUG {
                home = Some(page);
            } else {
                pages.push(page);
            }
        }
        pages.sort_by(|a, b| a.slug.current.cmp(&b.slug.current));

        Ok(Self {
            settings: content.settings(),
            navigation: content.navigation(),
            destinations: pages::order_destinations(destinations),
            articles: pages::order_articles(articles),
            pages,
            home,
        })
    }
}

// ============================================================================
// Routes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Home,
    Destinations,
    Destination,
    Articles,
    Article,
    Page,
    NotFound,
}

/// One written HTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub kind: RouteKind,
    pub title: String,
    /// URL path, e.g. `/destinations/cancun`.
    pub path: String,
    /// File relative to the output directory.
    pub file: PathBuf,
}

/// `index.html` under the route's directory; the 404 page is a flat file.
pub fn output_file(path: &str) -> PathBuf {
    match path.trim_matches('/') {
        "" => PathBuf::from("index.html"),
        "404" => PathBuf::from("404.html"),
        trimmed => Path::new(trimmed).join("index.html"),
    }
}

enum Job<'s> {
    Home,
    Destinations,
    Destination(&'s Destination),
    Articles,
    Article(&'s Article),
    Page(&'s Page),
    NotFound,
}

impl Job<'_> {
    fn describe(&self) -> (RouteKind, String, String) {
        match self {
            Job::Home => (RouteKind::Home, "Home".into(), "/".into()),
            Job::Destinations => (RouteKind::Destinations, "Destinations".into(), "/destinations".into()),
            Job::Destination(d) => (
                RouteKind::Destination,
                d.name.clone(),
                crate::links::document_path("destination", &d.slug.current),
            ),
            Job::Articles => (RouteKind::Articles, "Articles".into(), "/articles".into()),
            Job::Article(a) => (
                RouteKind::Article,
                a.title.clone(),
                crate::links::document_path("article", &a.slug.current),
            ),
            Job::Page(p) => (RouteKind::Page, p.title.clone(), pages::page_path(p)),
            Job::NotFound => (RouteKind::NotFound, "Page Not Found".into(), "/404".into()),
        }
    }

    fn render(&self, ctx: &RenderContext, site: &SiteContent) -> Markup {
        match self {
            Job::Home => pages::home(ctx, site.home.as_ref(), &site.destinations, &site.articles),
            Job::Destinations => pages::destinations_index(ctx, &site.destinations),
            Job::Destination(d) => pages::destination_detail(ctx, d),
            Job::Articles => pages::articles_index(ctx, &site.articles),
            Job::Article(a) => pages::article_detail(ctx, a),
            Job::Page(p) => pages::page(ctx, p),
            Job::NotFound => pages::not_found(ctx),
        }
    }
}

/// Render every route. Output order is the route order, independent of how
/// rayon schedules the work.
pub fn render_site(ctx: &RenderContext, site: &SiteContent) -> Vec<(GeneratedPage, String)> {
    let mut jobs = vec![Job::Home, Job::Destinations, Job::Articles];
    jobs.extend(site.destinations.iter().map(Job::Destination));
    jobs.extend(site.articles.iter().map(Job::Article));
    jobs.extend(site.pages.iter().map(Job::Page));
    jobs.push(Job::NotFound);

    jobs.par_iter()
        .map(|job| {
            let (kind, title, path) = job.describe();
            let html = job.render(ctx, site).into_string();
            let page = GeneratedPage {
                kind,
                title,
                file: output_file(&path),
                path,
            };
            (page, html)
        })
        .collect()
}

// ============================================================================
// Build
// ============================================================================

/// What a build wrote.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub source: String,
    pub output_dir: PathBuf,
    pub pages: Vec<GeneratedPage>,
    /// Sitemap file and its URL count, when the sitemap is enabled.
    pub sitemap: Option<(PathBuf, usize)>,
}

impl BuildReport {
    pub fn count(&self, kind: RouteKind) -> usize {
        self.pages.iter().filter(|p| p.kind == kind).count()
    }
}

pub fn generate(
    config: &SiteConfig,
    source: &dyn ContentSource,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    let content = Content::new(source, Perspective::Published);
    let site = SiteContent::fetch(&content)?;
    info!(
        target: "build",
        "fetched {} destinations, {} articles, {} pages from {}",
        site.destinations.len(),
        site.articles.len(),
        site.pages.len() + usize::from(site.home.is_some()),
        source.describe()
    );

    let ctx = RenderContext::new(config, site.settings.clone(), site.navigation.clone(), false);
    write_site(&ctx, &site, source.describe(), output_dir)
}

/// Render and write `site` under `output_dir`.
pub fn write_site(
    ctx: &RenderContext,
    site: &SiteContent,
    source: String,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let rendered = render_site(ctx, site);
    let mut generated = Vec::with_capacity(rendered.len());
    for (page, html) in rendered {
        let target = output_dir.join(&page.file);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, html)?;
        generated.push(page);
    }
    info!(target: "build", "wrote {} pages to {}", generated.len(), output_dir.display());

    let config = ctx.config;
    let sitemap = if config.sitemap.enabled {
        let all_pages: Vec<Page> = site.home.iter().chain(&site.pages).cloned().collect();
        let entries = sitemap::entries(config.base_url(), &site.destinations, &site.articles, &all_pages);
        let file = PathBuf::from(&config.sitemap.filename);
        fs::write(output_dir.join(&file), sitemap::render(&entries))?;
        info!(target: "sitemap", "wrote {} URLs to {}", entries.len(), file.display());
        Some((file, entries.len()))
    } else {
        None
    };
    let robots = sitemap::robots_txt(
        config.base_url(),
        sitemap.as_ref().map(|_| config.sitemap.filename.as_str()),
    );
    fs::write(output_dir.join("robots.txt"), robots)?;

    let static_dir = output_dir.join("static");
    fs::create_dir_all(&static_dir)?;
    fs::write(static_dir.join("placeholder.svg"), PLACEHOLDER_SVG)?;

    Ok(BuildReport {
        source,
        output_dir: output_dir.to_path_buf(),
        pages: generated,
        sitemap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn fixture_site() -> SiteContent {
        let source = fixture_source();
        SiteContent::fetch(&Content::new(&source, Perspective::Published)).unwrap()
    }

    // =========================================================================
    // Paths
    // =========================================================================

    #[test]
    fn output_files_follow_routes() {
        assert_eq!(output_file("/"), PathBuf::from("index.html"));
        assert_eq!(output_file("/404"), PathBuf::from("404.html"));
        assert_eq!(output_file("/destinations"), PathBuf::from("destinations/index.html"));
        assert_eq!(
            output_file("/articles/best-beaches"),
            PathBuf::from("articles/best-beaches/index.html")
        );
    }

    // =========================================================================
    // Fetch
    // =========================================================================

    #[test]
    fn fetch_reads_published_content() {
        let site = fixture_site();
        let slugs: Vec<&str> = site.destinations.iter().map(|d| d.slug.current.as_str()).collect();
        assert_eq!(slugs, vec!["cancun", "oaxaca", "tulum"]);
        let articles: Vec<&str> = site.articles.iter().map(|a| a.slug.current.as_str()).collect();
        assert_eq!(articles, vec!["best-beaches", "packing-list"]);
        assert!(site.home.is_some());
        let pages: Vec<&str> = site.pages.iter().map(|p| p.slug.current.as_str()).collect();
        assert_eq!(pages, vec!["about"]);
        assert!(site.settings.is_some());
    }

    #[test]
    fn detail_records_are_dereferenced() {
        let site = fixture_site();
        let article = &site.articles[0];
        assert_eq!(article.author_name(), Some("Ana López"));
        assert_eq!(article.categories[0].title, "Beaches");
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    #[test]
    fn every_route_is_rendered_once() {
        let config = test_config();
        let ctx = test_context(&config);
        let site = fixture_site();
        let rendered = render_site(&ctx, &site);
        // home, 2 listings, 3 destinations, 2 articles, 1 page, 404
        assert_eq!(rendered.len(), 10);
        let paths: Vec<&str> = rendered.iter().map(|(p, _)| p.path.as_str()).collect();
        assert_eq!(paths[0], "/");
        assert_eq!(paths[paths.len() - 1], "/404");
        assert!(paths.contains(&"/destinations/cancun"));
        assert!(paths.contains(&"/about"));
        assert!(rendered.iter().all(|(_, html)| html.starts_with("<!DOCTYPE html>")));
    }

    #[test]
    fn write_site_creates_files_and_sitemap() {
        let tmp = TempDir::new().unwrap();
        let config = test_config();
        let ctx = test_context(&config);
        let site = fixture_site();
        let report = write_site(&ctx, &site, "fixture".into(), tmp.path()).unwrap();

        assert_eq!(report.count(RouteKind::Destination), 3);
        assert_eq!(report.count(RouteKind::Article), 2);
        for file in [
            "index.html",
            "404.html",
            "destinations/tulum/index.html",
            "articles/packing-list/index.html",
            "about/index.html",
            "robots.txt",
            "sitemap.xml",
            "static/placeholder.svg",
        ] {
            assert!(tmp.path().join(file).is_file(), "missing {file}");
        }
        // 3 fixed routes, 3 destinations, 2 articles, 1 page
        assert_eq!(report.sitemap, Some((PathBuf::from("sitemap.xml"), 9)));
    }

    #[test]
    fn disabled_sitemap_is_not_written() {
        let tmp = TempDir::new().unwrap();
        let mut config = test_config();
        config.sitemap.enabled = false;
        let ctx = test_context(&config);
        let report = write_site(&ctx, &SiteContent::default(), "empty".into(), tmp.path()).unwrap();
        assert!(report.sitemap.is_none());
        assert!(!tmp.path().join("sitemap.xml").exists());
        let robots = fs::read_to_string(tmp.path().join("robots.txt")).unwrap();
        assert!(!robots.contains("Sitemap"));
    }

    #[test]
    fn drafts_are_not_built() {
        let tmp = TempDir::new().unwrap();
        let config = test_config();
        let ctx = test_context(&config);
        write_site(&ctx, &fixture_site(), "fixture".into(), tmp.path()).unwrap();
        assert!(!tmp.path().join("secret-sale").exists());
        let sitemap = fs::read_to_string(tmp.path().join("sitemap.xml")).unwrap();
        assert!(!sitemap.contains("secret-sale"));
    }
}
