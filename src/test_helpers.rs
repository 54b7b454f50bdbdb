//! Shared test utilities for the resort-site test suite.
//!
//! Provides a fixed site configuration, a render context with a pinned
//! footer year, and builders for minimal documents that tests then adjust.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let config = test_config();
//! let ctx = test_context(&config);
//!
//! let mut tulum = sample_destination("tulum", "Tulum");
//! tulum.featured = true;
//! let html = destination_card(&ctx, &tulum).into_string();
//! ```

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::cms::snapshot::SnapshotSource;
use crate::config::SiteConfig;
use crate::documents::{Article, Destination, DocumentMeta, ImageAsset, ImageRef, Page, Slug};
use crate::image::ImageUrlBuilder;
use crate::render::RenderContext;
use crate::seo::SiteInfo;

// =========================================================================
// Site
// =========================================================================

/// Stock config pointed at a fake project on a fixed origin.
pub fn test_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.site_url = "https://resort.example".to_string();
    config.cms.project_id = "proj123".to_string();
    config.cms.dataset = "production".to_string();
    config
}

pub fn test_images() -> ImageUrlBuilder {
    ImageUrlBuilder::new("proj123", "production", "/static/placeholder.svg")
}

pub fn test_site() -> SiteInfo {
    SiteInfo::new(&test_config(), None, &test_images())
}

/// Published-mode context with no CMS settings and the year pinned to 2024.
pub fn test_context(config: &SiteConfig) -> RenderContext<'_> {
    RenderContext::new(config, None, None, false).with_year(2024)
}

// =========================================================================
// Documents
// =========================================================================

fn meta(doc_type: &str, id: &str) -> DocumentMeta {
    DocumentMeta {
        id: id.to_string(),
        doc_type: doc_type.to_string(),
        updated_at: Some(date("2024-01-15T12:00:00Z")),
        ..DocumentMeta::default()
    }
}

pub fn sample_destination(slug: &str, name: &str) -> Destination {
    Destination {
        meta: meta("destination", &format!("destination-{slug}")),
        name: name.to_string(),
        slug: Slug::new(slug),
        short_description: Some(format!("{name} travel guide")),
        ..Destination::default()
    }
}

pub fn sample_article(slug: &str, title: &str) -> Article {
    Article {
        meta: meta("article", &format!("article-{slug}")),
        title: title.to_string(),
        slug: Slug::new(slug),
        excerpt: Some(format!("All about {title}")),
        published_at: Some(date("2024-01-10T09:00:00Z")),
        ..Article::default()
    }
}

pub fn sample_page(slug: &str, title: &str) -> Page {
    Page {
        meta: meta("page", &format!("page-{slug}")),
        title: title.to_string(),
        slug: Slug::new(slug),
        show_breadcrumbs: true,
        ..Page::default()
    }
}

/// Image field holding a raw asset reference.
pub fn image_ref(reference: &str) -> ImageRef {
    ImageRef {
        asset: Some(ImageAsset {
            reference: Some(reference.to_string()),
            ..ImageAsset::default()
        }),
        ..ImageRef::default()
    }
}

pub fn date(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

// =========================================================================
// Fixture snapshot
// =========================================================================

/// Path of the checked-in dataset export.
pub fn fixture_snapshot_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/snapshot.json")
}

pub fn fixture_source() -> SnapshotSource {
    SnapshotSource::load(&fixture_snapshot_path()).unwrap()
}
