//! Content records read from the CMS.
//!
//! Every record is a read-only snapshot: identity (`_id`), discriminator
//! (`_type`) and revision timestamp (`_updatedAt`) are owned by the CMS.
//! Field decoding is lenient: the CMS sends `null` for missing projections
//! and editors leave optional fields empty, so everything that can be absent
//! decodes to `None` or an empty default instead of failing the document.

use crate::blocks::BlockEntry;
use crate::choice::choice;
use crate::links::LinkType;
use crate::portable_text::PortableText;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn yes() -> bool {
    true
}

/// Identity fields present on every top-level document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentMeta {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_type", default)]
    pub doc_type: String,
    #[serde(rename = "_rev", default)]
    pub rev: Option<String>,
    #[serde(rename = "_createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DocumentMeta {
    /// Unpublished revisions live under the `drafts.` id prefix.
    pub fn is_draft(&self) -> bool {
        self.id.starts_with(DRAFTS_PREFIX)
    }
}

pub const DRAFTS_PREFIX: &str = "drafts.";

// ============================================================================
// Shared field types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Slug {
    #[serde(default, deserialize_with = "nullable")]
    pub current: String,
}

impl Slug {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

/// A color picked in the studio.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Color {
    #[serde(default, deserialize_with = "nullable")]
    pub hex: String,
    #[serde(default)]
    pub alpha: Option<f64>,
}

/// Image asset pointer. Either a raw reference (`image-<id>-<w>x<h>-<ext>`)
/// or an expanded asset carrying its CDN `url`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageAsset {
    #[serde(rename = "_ref", default)]
    pub reference: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Focal point chosen in the studio, in 0..1 image coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub asset: Option<ImageAsset>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub hotspot: Option<Hotspot>,
}

impl ImageRef {
    pub fn alt_text(&self) -> &str {
        self.alt.as_deref().unwrap_or("")
    }
}

/// The `_type` + `slug` of a dereferenced document, enough to build a route.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinkTarget {
    #[serde(rename = "_type", default)]
    pub doc_type: String,
    #[serde(default)]
    pub slug: Option<Slug>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub focus_keyword: Option<String>,
    #[serde(default)]
    pub og_image: Option<ImageRef>,
}

choice! {
    pub enum CtaStyle {
        Primary => "primary",
        Secondary => "secondary",
        Text => "text",
    }
    default Primary
}

choice! {
    pub enum CtaSize {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
    default Medium
}

choice! {
    pub enum CtaIcon {
        None => "none",
        ArrowRight => "arrow-right",
        External => "external",
        Download => "download",
        Heart => "heart",
        Star => "star",
    }
    default None
}

impl CtaIcon {
    pub fn glyph(self) -> Option<&'static str> {
        match self {
            CtaIcon::None => None,
            CtaIcon::ArrowRight => Some("→"),
            CtaIcon::External => Some("↗"),
            CtaIcon::Download => Some("⬇"),
            CtaIcon::Heart => Some("❤"),
            CtaIcon::Star => Some("★"),
        }
    }
}

/// Call-to-action button embedded in blocks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cta {
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default)]
    pub link_type: LinkType,
    pub internal_link: Option<LinkTarget>,
    pub custom_path: Option<String>,
    pub external_url: Option<String>,
    pub affiliate_url: Option<String>,
    #[serde(default)]
    pub style: CtaStyle,
    #[serde(default)]
    pub size: CtaSize,
    #[serde(default, deserialize_with = "nullable")]
    pub open_in_new_tab: bool,
    #[serde(default)]
    pub icon: CtaIcon,
}

// ============================================================================
// Singletons
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SocialMedia {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
    pub pinterest: Option<String>,
}

impl SocialMedia {
    /// `(platform, url)` pairs for the profiles that are set, in display order.
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("facebook", &self.facebook),
            ("instagram", &self.instagram),
            ("twitter", &self.twitter),
            ("youtube", &self.youtube),
            ("pinterest", &self.pinterest),
        ]
        .into_iter()
        .filter_map(|(name, url)| {
            url.as_deref()
                .filter(|u| !u.is_empty())
                .map(|u| (name, u))
        })
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub title: Option<String>,
    pub description: Option<String>,
    pub primary_color: Option<Color>,
    pub secondary_color: Option<Color>,
    pub logo: Option<ImageRef>,
    pub logo_dark: Option<ImageRef>,
    pub font_family: Option<String>,
    pub social_media: Option<SocialMedia>,
    pub default_affiliate_id: Option<String>,
    pub og_image: Option<ImageRef>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavLinkType {
    #[default]
    Internal,
    External,
    Dropdown,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub link_type: NavLinkType,
    pub internal_link: Option<LinkTarget>,
    pub custom_path: Option<String>,
    pub external_url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub dropdown_items: Vec<NavItem>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FooterColumn {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub links: Vec<NavItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FooterMenu {
    #[serde(default, deserialize_with = "nullable")]
    pub columns: Vec<FooterColumn>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub main_menu: Vec<NavItem>,
    pub footer_menu: Option<FooterMenu>,
}

// ============================================================================
// Destinations
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub coordinates: Option<GeoPoint>,
}

impl Location {
    /// "City, State" with whichever parts are present.
    pub fn label(&self) -> Option<String> {
        let parts: Vec<&str> = [self.city.as_deref(), self.state.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Highlight {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BestTimeToVisit {
    #[serde(default, deserialize_with = "nullable")]
    pub seasons: Vec<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub average_temp_high: Option<f64>,
    pub average_temp_low: Option<f64>,
    pub rainy_season_months: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub hurricane_season: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateLinks {
    pub booking_url: Option<String>,
    pub expedia_url: Option<String>,
    pub viator_url: Option<String>,
}

impl AffiliateLinks {
    /// `(partner label, url)` for each configured partner.
    pub fn partners(&self) -> Vec<(&'static str, &str)> {
        [
            ("Booking.com", &self.booking_url),
            ("Expedia", &self.expedia_url),
            ("Viator", &self.viator_url),
        ]
        .into_iter()
        .filter_map(|(name, url)| {
            url.as_deref()
                .filter(|u| !u.is_empty())
                .map(|u| (name, u))
        })
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub hero_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub gallery: Vec<ImageRef>,
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "nullable")]
    pub highlights: Vec<Highlight>,
    pub best_time_to_visit: Option<BestTimeToVisit>,
    pub weather: Option<WeatherSummary>,
    #[serde(default, deserialize_with = "nullable")]
    pub related_destinations: Vec<Destination>,
    pub seo: Option<Seo>,
    pub affiliate_links: Option<AffiliateLinks>,
    #[serde(default, deserialize_with = "nullable")]
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl Destination {
    /// Unresolved references decode with an empty slug; they can't be linked.
    pub fn is_resolved(&self) -> bool {
        !self.slug.is_empty()
    }

    pub fn summary(&self) -> Option<&str> {
        self.short_description
            .as_deref()
            .or(self.description.as_deref())
    }
}

// ============================================================================
// Editorial
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthorSocial {
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    pub profile_image: Option<ImageRef>,
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub expertise: Vec<String>,
    pub role: Option<String>,
    pub social_media: Option<AuthorSocial>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    pub description: Option<String>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Tag {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    pub excerpt: Option<String>,
    pub author: Option<Author>,
    pub featured_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "nullable")]
    pub categories: Vec<Category>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "nullable")]
    pub related_destinations: Vec<Destination>,
    #[serde(default, deserialize_with = "nullable")]
    pub body: PortableText,
    pub reading_time: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub related_articles: Vec<Article>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub seo: Option<Seo>,
    #[serde(default, deserialize_with = "nullable")]
    pub featured: bool,
}

impl Article {
    pub fn is_resolved(&self) -> bool {
        !self.slug.is_empty()
    }

    /// Editor-set update time, falling back to the CMS revision time.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.meta.updated_at)
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .filter(|n| !n.is_empty())
    }
}

// ============================================================================
// Page builder
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub slug: Slug,
    #[serde(default, deserialize_with = "nullable")]
    pub blocks: Vec<BlockEntry>,
    pub seo: Option<Seo>,
    #[serde(default = "yes")]
    pub show_breadcrumbs: bool,
    pub published_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nulls_decode_as_defaults() {
        let dest: Destination = serde_json::from_value(json!({
            "_id": "dest-1",
            "_type": "destination",
            "name": "Cancún",
            "slug": {"current": "cancun"},
            "gallery": null,
            "highlights": null,
            "featured": null,
        }))
        .unwrap();
        assert!(dest.gallery.is_empty());
        assert!(dest.highlights.is_empty());
        assert!(!dest.featured);
        assert!(dest.is_resolved());
    }

    #[test]
    fn unresolved_reference_is_not_linkable() {
        let dest: Destination = serde_json::from_value(json!({
            "_ref": "dest-missing",
            "_type": "reference",
        }))
        .unwrap();
        assert!(!dest.is_resolved());
    }

    #[test]
    fn draft_ids_are_detected() {
        let meta = DocumentMeta {
            id: "drafts.page-1".into(),
            ..DocumentMeta::default()
        };
        assert!(meta.is_draft());
    }

    #[test]
    fn updated_at_parses_rfc3339() {
        let article: Article = serde_json::from_value(json!({
            "_id": "a1",
            "_type": "article",
            "_updatedAt": "2024-05-01T10:00:00Z",
            "title": "Best Beaches",
            "slug": {"current": "best-beaches"},
        }))
        .unwrap();
        assert_eq!(
            article.modified_at().unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
    }

    #[test]
    fn page_shows_breadcrumbs_by_default() {
        let page: Page = serde_json::from_value(json!({
            "_id": "p1",
            "_type": "page",
            "title": "About",
            "slug": {"current": "about"},
        }))
        .unwrap();
        assert!(page.show_breadcrumbs);
        assert!(page.blocks.is_empty());
    }

    #[test]
    fn social_links_skip_empty() {
        let social = SocialMedia {
            facebook: Some("https://facebook.com/rom".into()),
            twitter: Some(String::new()),
            ..SocialMedia::default()
        };
        assert_eq!(social.links(), vec![("facebook", "https://facebook.com/rom")]);
    }

    #[test]
    fn location_label_joins_present_parts() {
        let loc = Location {
            city: Some("Tulum".into()),
            state: Some("Quintana Roo".into()),
            ..Location::default()
        };
        assert_eq!(loc.label().as_deref(), Some("Tulum, Quintana Roo"));
        assert_eq!(Location::default().label(), None);
    }
}
