//! `sitemap.xml` and `robots.txt`.
//!
//! The sitemap lists the fixed routes (home and the two listings) plus one
//! URL per published destination, article and free-form page. `lastmod` is
//! the document's `_updatedAt`; fixed routes take the newest `lastmod` of the
//! documents they list, so the output depends only on the content and two
//! builds of the same snapshot are byte-identical.

use crate::documents::{Article, Destination, DocumentMeta, Page};
use crate::links::{absolute, document_path, is_page_slug, is_safe_slug};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

/// Routes that exist regardless of content.
pub const FIXED_ROUTES: &[&str] = &["/", "/destinations", "/articles"];

/// Change frequency values for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        }
    }
}

/// A single URL entry in the sitemap.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl SitemapEntry {
    fn to_xml(&self) -> String {
        let mut xml = String::from("<url>");
        xml.push_str(&format!("<loc>{}</loc>", escape_xml(&self.loc)));
        if let Some(lastmod) = self.lastmod {
            xml.push_str(&format!(
                "<lastmod>{}</lastmod>",
                lastmod.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
        xml.push_str(&format!(
            "<changefreq>{}</changefreq>",
            self.changefreq.as_str()
        ));
        xml.push_str(&format!("<priority>{:.1}</priority>", self.priority));
        xml.push_str("</url>");
        xml
    }
}

/// Escapes XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn listed(meta: &DocumentMeta, slug: &str) -> bool {
    !meta.is_draft() && is_safe_slug(slug)
}

/// Sitemap entries for the fixed routes and every listed document, sorted by URL.
pub fn entries(
    base_url: &str,
    destinations: &[Destination],
    articles: &[Article],
    pages: &[Page],
) -> Vec<SitemapEntry> {
    let mut entries = Vec::new();
    let mut newest_destination = None;
    let mut newest_article = None;

    for d in destinations.iter().filter(|d| listed(&d.meta, &d.slug.current)) {
        let lastmod = d.meta.updated_at;
        newest_destination = newest_destination.max(lastmod);
        entries.push(SitemapEntry {
            loc: absolute(base_url, &document_path("destination", &d.slug.current)),
            lastmod,
            changefreq: ChangeFreq::Weekly,
            priority: 0.8,
        });
    }
    for a in articles.iter().filter(|a| listed(&a.meta, &a.slug.current)) {
        let lastmod = a.meta.updated_at;
        newest_article = newest_article.max(lastmod);
        entries.push(SitemapEntry {
            loc: absolute(base_url, &document_path("article", &a.slug.current)),
            lastmod,
            changefreq: ChangeFreq::Monthly,
            priority: 0.6,
        });
    }
    // The `home` page document is served at `/`, already a fixed route.
    let mut home_lastmod = None;
    for p in pages
        .iter()
        .filter(|p| listed(&p.meta, &p.slug.current) && is_page_slug(&p.slug.current))
    {
        let path = document_path("page", &p.slug.current);
        if path == "/" {
            home_lastmod = p.meta.updated_at;
            continue;
        }
        entries.push(SitemapEntry {
            loc: absolute(base_url, &path),
            lastmod: p.meta.updated_at,
            changefreq: ChangeFreq::Monthly,
            priority: 0.5,
        });
    }

    let home = home_lastmod
        .max(newest_destination)
        .max(newest_article);
    for (route, lastmod, priority) in [
        ("/", home, 1.0),
        ("/destinations", newest_destination, 0.9),
        ("/articles", newest_article, 0.9),
    ] {
        entries.push(SitemapEntry {
            loc: absolute(base_url, route),
            lastmod,
            changefreq: ChangeFreq::Daily,
            priority,
        });
    }

    entries.sort_by(|a, b| a.loc.cmp(&b.loc));
    entries
}

/// The `<urlset>` document.
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');
    for entry in entries {
        xml.push_str(&entry.to_xml());
        xml.push('\n');
    }
    xml.push_str("</urlset>\n");
    xml
}

/// `robots.txt` allowing everything except the draft endpoints.
pub fn robots_txt(base_url: &str, sitemap_filename: Option<&str>) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\nDisallow: /api/\n");
    if let Some(name) = sitemap_filename {
        let _ = write!(out, "\nSitemap: {}\n", absolute(base_url, name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    const BASE: &str = "https://resort.example";

    fn locs(entries: &[SitemapEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.loc.as_str()).collect()
    }

    // =========================================================================
    // Entries
    // =========================================================================

    #[test]
    fn counts_documents_plus_fixed_routes() {
        let destinations = vec![
            sample_destination("cancun", "Cancún"),
            sample_destination("tulum", "Tulum"),
        ];
        let articles = vec![sample_article("tips", "Tips")];
        let found = entries(BASE, &destinations, &articles, &[]);
        assert_eq!(found.len(), 2 + 1 + FIXED_ROUTES.len());
        assert!(locs(&found).contains(&"https://resort.example/destinations/tulum"));
        assert!(locs(&found).contains(&"https://resort.example/articles/tips"));
    }

    #[test]
    fn lastmod_is_document_revision_time() {
        let mut d = sample_destination("cancun", "Cancún");
        d.meta.updated_at = Some(date("2024-05-02T08:30:00Z"));
        let found = entries(BASE, &[d], &[], &[]);
        let entry = found
            .iter()
            .find(|e| e.loc.ends_with("/destinations/cancun"))
            .unwrap();
        assert_eq!(entry.lastmod, Some(date("2024-05-02T08:30:00Z")));
        let listing = found.iter().find(|e| e.loc.ends_with("/destinations")).unwrap();
        assert_eq!(listing.lastmod, entry.lastmod);
    }

    #[test]
    fn drafts_and_unslugged_documents_are_excluded() {
        let mut draft = sample_destination("secret", "Secret");
        draft.meta.id = "drafts.destination-secret".into();
        let unslugged = sample_article("", "No slug");
        let found = entries(BASE, &[draft], &[unslugged], &[]);
        assert_eq!(found.len(), FIXED_ROUTES.len());
    }

    #[test]
    fn pages_are_listed_except_home() {
        let pages = vec![sample_page("about", "About"), sample_page("home", "Home")];
        let found = entries(BASE, &[], &[], &pages);
        assert_eq!(found.len(), 1 + FIXED_ROUTES.len());
        assert!(locs(&found).contains(&"https://resort.example/about"));
    }

    #[test]
    fn pages_shadowing_built_in_routes_are_excluded() {
        let pages = vec![
            sample_page("destinations", "Where to go"),
            sample_page("a/b", "Nested"),
            sample_page("404", "Lost"),
        ];
        let found = entries(BASE, &[], &[], &pages);
        assert_eq!(found.len(), FIXED_ROUTES.len());
        let listings = locs(&found)
            .into_iter()
            .filter(|loc| *loc == "https://resort.example/destinations")
            .count();
        assert_eq!(listings, 1);
    }

    // =========================================================================
    // Output
    // =========================================================================

    #[test]
    fn xml_escapes_and_formats() {
        let entry = SitemapEntry {
            loc: "https://resort.example/a&b".into(),
            lastmod: Some(date("2024-01-15T12:00:00Z")),
            changefreq: ChangeFreq::Weekly,
            priority: 0.8,
        };
        let xml = render(&[entry]);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<loc>https://resort.example/a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2024-01-15T12:00:00Z</lastmod>"));
        assert!(xml.contains("<priority>0.8</priority>"));
    }

    #[test]
    fn output_is_stable() {
        let destinations = vec![
            sample_destination("tulum", "Tulum"),
            sample_destination("cancun", "Cancún"),
        ];
        let a = render(&entries(BASE, &destinations, &[], &[]));
        let b = render(&entries(BASE, &destinations, &[], &[]));
        assert_eq!(a, b);
    }

    #[test]
    fn robots_points_at_sitemap() {
        let robots = robots_txt(BASE, Some("sitemap.xml"));
        assert!(robots.contains("Sitemap: https://resort.example/sitemap.xml"));
        assert!(robots.contains("Disallow: /api/"));
        assert!(!robots_txt(BASE, None).contains("Sitemap"));
    }
}
