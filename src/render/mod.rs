//! HTML rendering.
//!
//! Every page is a pure function of a [`RenderContext`] and the documents it
//! shows, so the static build and the server share all of it and rendering
//! the same content twice yields identical bytes.
//!
//! | Module | Renders |
//! |--------|---------|
//! | [`dispatch`] | block arrays: discriminator lookup, skip and depth rules |
//! | [`blocks`] | one function per page-builder block |
//! | [`portable_text`] | rich-text fields |
//! | [`components`] | cards, buttons and breadcrumbs shared by blocks and pages |
//! | [`layout`] | `<head>`, header, footer, draft banner |
//! | [`pages`] | the routes: home, listings, details, pages, 404 |
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating, so
//! every interpolated value is escaped.

pub mod blocks;
pub mod components;
pub mod dispatch;
pub mod layout;
pub mod pages;
pub mod portable_text;

pub use dispatch::render_blocks;

use crate::cms::Content;
use crate::config::SiteConfig;
use crate::documents::{GlobalSettings, Navigation};
use crate::image::ImageUrlBuilder;
use crate::seo::SiteInfo;
use crate::theme::Theme;
use chrono::Datelike;

/// Everything a page needs besides its own documents.
///
/// Built once per build (or once per request in the server) and shared
/// read-only by every renderer.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub config: &'a SiteConfig,
    pub site: SiteInfo,
    pub theme: Theme,
    pub images: ImageUrlBuilder,
    pub settings: Option<GlobalSettings>,
    pub navigation: Option<Navigation>,
    /// Pages are rendered from draft content and must say so.
    pub draft: bool,
    /// Copyright year in the footer.
    pub year: i32,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        config: &'a SiteConfig,
        settings: Option<GlobalSettings>,
        navigation: Option<Navigation>,
        draft: bool,
    ) -> Self {
        let images = ImageUrlBuilder::new(
            &config.cms.project_id,
            &config.cms.dataset,
            &config.render.placeholder_image,
        );
        Self {
            site: SiteInfo::new(config, settings.as_ref(), &images),
            theme: Theme::from_settings(settings.as_ref(), &config.theme),
            images,
            settings,
            navigation,
            draft,
            year: chrono::Utc::now().year(),
            config,
        }
    }

    /// Fetch the site-wide documents and build a context. Fetch failures
    /// fall back to configured defaults inside [`Content`].
    pub fn load(config: &'a SiteConfig, content: &Content<'_>, draft: bool) -> Self {
        Self::new(config, content.settings(), content.navigation(), draft)
    }

    /// Pin the footer year, for reproducible output.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Stylesheet for every page: theme tokens followed by the base styles.
    pub fn stylesheet(&self) -> String {
        format!("{}\n\n{}", self.theme.to_css(), layout::CSS_STATIC)
    }
}
