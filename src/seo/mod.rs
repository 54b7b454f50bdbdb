//! Search and social metadata: `<head>` tags per page and schema.org JSON-LD.
//!
//! Everything here is data. [`PageMeta`] says what a page's title,
//! description, canonical URL and share image are; the layout turns it into
//! tags. [`structured_data`] builds the JSON-LD documents.

pub mod structured_data;

use crate::config::SiteConfig;
use crate::documents::{Article, Destination, GlobalSettings, ImageRef, Page, Seo};
use crate::image::{ImageUrlBuilder, Transform};
use crate::links::absolute;
use chrono::{DateTime, Utc};

/// Share images are cropped to the Open Graph recommended size.
pub const OG_WIDTH: u32 = 1200;
pub const OG_HEIGHT: u32 = 630;

/// Site-wide identity: settings from the CMS layered over the config.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteInfo {
    pub name: String,
    pub description: String,
    /// Origin without trailing slash.
    pub base_url: String,
    pub locale: String,
    pub logo: Option<String>,
    /// Share image for pages that don't set their own.
    pub default_image: Option<String>,
    /// Social profile URLs.
    pub same_as: Vec<String>,
}

impl SiteInfo {
    pub fn new(
        config: &SiteConfig,
        settings: Option<&GlobalSettings>,
        images: &ImageUrlBuilder,
    ) -> Self {
        let text = |value: Option<&String>, fallback: &str| {
            value
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            name: text(settings.and_then(|s| s.title.as_ref()), &config.site_name),
            description: text(
                settings.and_then(|s| s.description.as_ref()),
                &config.site_description,
            ),
            base_url: config.base_url().to_string(),
            locale: config.locale.clone(),
            logo: settings
                .and_then(|s| s.logo.as_ref())
                .and_then(|logo| images.source_url(logo)),
            default_image: settings
                .and_then(|s| s.og_image.as_ref())
                .and_then(|img| share_image(images, img)),
            same_as: settings
                .and_then(|s| s.social_media.as_ref())
                .map(|social| social.links().into_iter().map(|(_, url)| url.to_string()).collect())
                .unwrap_or_default(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        absolute(&self.base_url, path)
    }
}

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
}

impl Crumb {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    pub fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    /// Full `<title>`, site name included.
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_type: OgType,
    pub image: Option<String>,
    pub image_alt: String,
    pub published: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub authors: Vec<String>,
    pub keywords: Vec<String>,
    pub noindex: bool,
}

/// `"{title} | {site}"`, or just the title when it already is the site name.
pub fn compose_title(title: &str, site_name: &str) -> String {
    if title == site_name || title.is_empty() {
        site_name.to_string()
    } else {
        format!("{title} | {site_name}")
    }
}

fn share_image(images: &ImageUrlBuilder, image: &ImageRef) -> Option<String> {
    images.source_url(image)?;
    Some(images.url(Some(image), Transform::size(OG_WIDTH, OG_HEIGHT)))
}

fn seo_text(seo: Option<&Seo>, pick: fn(&Seo) -> Option<&String>) -> Option<String> {
    seo.and_then(pick)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl PageMeta {
    /// Metadata for fixed routes (home, listings).
    pub fn basic(site: &SiteInfo, title: &str, description: &str, path: &str) -> Self {
        Self {
            title: compose_title(title, &site.name),
            description: description.to_string(),
            canonical: site.url(path),
            og_type: OgType::Website,
            image: site.default_image.clone(),
            image_alt: title.to_string(),
            published: None,
            modified: None,
            authors: Vec::new(),
            keywords: Vec::new(),
            noindex: false,
        }
    }

    pub fn for_destination(site: &SiteInfo, images: &ImageUrlBuilder, d: &Destination) -> Self {
        let seo = d.seo.as_ref();
        let description = seo_text(seo, |s| s.meta_description.as_ref())
            .or_else(|| d.short_description.clone().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| {
                format!(
                    "Discover {}, Mexico. Complete travel guide with attractions, weather, and planning tips.",
                    d.name
                )
            });
        Self {
            title: seo_text(seo, |s| s.meta_title.as_ref())
                .unwrap_or_else(|| format!("{} - Mexico Travel Guide", d.name)),
            description,
            canonical: site.url(&format!("/destinations/{}", d.slug.current)),
            og_type: OgType::Website,
            image: page_image(site, images, seo, d.hero_image.as_ref()),
            image_alt: d.name.clone(),
            published: d.published_at,
            modified: d.meta.updated_at,
            authors: Vec::new(),
            keywords: seo.map(|s| s.keywords.clone()).unwrap_or_default(),
            noindex: false,
        }
    }

    pub fn for_article(site: &SiteInfo, images: &ImageUrlBuilder, a: &Article) -> Self {
        let seo = a.seo.as_ref();
        let description = seo_text(seo, |s| s.meta_description.as_ref())
            .or_else(|| a.excerpt.clone().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "Discover Mexico travel tips, destination guides, and more.".into());
        Self {
            title: seo_text(seo, |s| s.meta_title.as_ref())
                .unwrap_or_else(|| compose_title(&a.title, &site.name)),
            description,
            canonical: site.url(&format!("/articles/{}", a.slug.current)),
            og_type: OgType::Article,
            image: page_image(site, images, seo, a.featured_image.as_ref()),
            image_alt: a.title.clone(),
            published: a.published_at,
            modified: a.modified_at(),
            authors: a.author_name().map(str::to_string).into_iter().collect(),
            keywords: seo.map(|s| s.keywords.clone()).unwrap_or_default(),
            noindex: false,
        }
    }

    pub fn for_page(site: &SiteInfo, images: &ImageUrlBuilder, p: &Page, path: &str) -> Self {
        let seo = p.seo.as_ref();
        Self {
            title: seo_text(seo, |s| s.meta_title.as_ref())
                .unwrap_or_else(|| compose_title(&p.title, &site.name)),
            description: seo_text(seo, |s| s.meta_description.as_ref())
                .unwrap_or_else(|| "Discover Mexico travel information and guides.".into()),
            canonical: site.url(path),
            og_type: OgType::Website,
            image: page_image(site, images, seo, None),
            image_alt: p.title.clone(),
            published: p.published_at,
            modified: p.meta.updated_at,
            authors: Vec::new(),
            keywords: seo.map(|s| s.keywords.clone()).unwrap_or_default(),
            noindex: false,
        }
    }

    /// Preview renders must never be indexed.
    pub fn noindex(mut self, noindex: bool) -> Self {
        self.noindex = self.noindex || noindex;
        self
    }
}

/// SEO image, then the page's own image, then the site default.
fn page_image(
    site: &SiteInfo,
    images: &ImageUrlBuilder,
    seo: Option<&Seo>,
    own: Option<&ImageRef>,
) -> Option<String> {
    seo.and_then(|s| s.og_image.as_ref())
        .and_then(|img| share_image(images, img))
        .or_else(|| own.and_then(|img| share_image(images, img)))
        .or_else(|| site.default_image.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn title_composition() {
        assert_eq!(compose_title("Beaches", "Resort of Mexico"), "Beaches | Resort of Mexico");
        assert_eq!(compose_title("Resort of Mexico", "Resort of Mexico"), "Resort of Mexico");
        assert_eq!(compose_title("", "Resort of Mexico"), "Resort of Mexico");
    }

    #[test]
    fn site_info_prefers_cms_settings() {
        let config = test_config();
        let mut settings = GlobalSettings {
            title: Some("Mexico Getaways".into()),
            ..Default::default()
        };
        let site = SiteInfo::new(&config, Some(&settings), &test_images());
        assert_eq!(site.name, "Mexico Getaways");
        assert_eq!(site.description, config.site_description);

        settings.title = Some("  ".into());
        let site = SiteInfo::new(&config, Some(&settings), &test_images());
        assert_eq!(site.name, config.site_name);
    }

    #[test]
    fn destination_description_fallbacks() {
        let site = test_site();
        let mut d = sample_destination("cancun", "Cancún");
        d.short_description = None;
        let meta = PageMeta::for_destination(&site, &test_images(), &d);
        assert!(meta.description.starts_with("Discover Cancún, Mexico."));
        assert_eq!(meta.title, "Cancún - Mexico Travel Guide");
        assert_eq!(meta.canonical, "https://resort.example/destinations/cancun");

        d.short_description = Some("Turquoise water".into());
        let meta = PageMeta::for_destination(&site, &test_images(), &d);
        assert_eq!(meta.description, "Turquoise water");
    }

    #[test]
    fn seo_overrides_win() {
        let site = test_site();
        let mut a = sample_article("tips", "Packing tips");
        a.seo = Some(Seo {
            meta_title: Some("Custom".into()),
            meta_description: Some("Custom description".into()),
            ..Default::default()
        });
        let meta = PageMeta::for_article(&site, &test_images(), &a);
        assert_eq!(meta.title, "Custom");
        assert_eq!(meta.description, "Custom description");
        assert_eq!(meta.og_type, OgType::Article);
    }

    #[test]
    fn article_share_image_is_cropped_for_og() {
        let site = test_site();
        let mut a = sample_article("tips", "Packing tips");
        a.featured_image = Some(image_ref("image-abc-2000x1000-jpg"));
        let meta = PageMeta::for_article(&site, &test_images(), &a);
        let url = meta.image.unwrap();
        assert!(url.contains("w=1200"), "{url}");
        assert!(url.contains("h=630"), "{url}");
    }

    #[test]
    fn missing_images_fall_back_to_site_default() {
        let mut site = test_site();
        site.default_image = Some("https://cdn.example/og.jpg".into());
        let meta = PageMeta::for_article(&site, &test_images(), &sample_article("a", "A"));
        assert_eq!(meta.image.as_deref(), Some("https://cdn.example/og.jpg"));
    }

    #[test]
    fn noindex_is_sticky() {
        let meta = PageMeta::basic(&test_site(), "Home", "d", "/").noindex(true).noindex(false);
        assert!(meta.noindex);
    }
}
