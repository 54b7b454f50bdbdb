//! Link resolution.
//!
//! A link in the CMS is a tagged variant: an internal reference to another
//! document (optionally overridden by a hand-written custom path), a plain
//! external URL, or an affiliate URL. This module turns each variant into the
//! `href`, `target` and `rel` attributes the renderer writes. A link that can't
//! be resolved yields `None` and the caller omits the element.

use crate::choice::choice;
use crate::documents::{Cta, LinkTarget, NavItem, NavLinkType};
use crate::portable_text::MarkDef;

/// `rel` for paid partner links.
pub const AFFILIATE_REL: &str = "noopener noreferrer nofollow sponsored";
/// `rel` for any link opened in a new tab.
pub const NEW_TAB_REL: &str = "noopener noreferrer";

choice! {
    pub enum LinkType {
        Internal => "internal",
        External => "external",
        Affiliate => "affiliate",
    }
    default Internal
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub href: String,
    pub rel: Option<&'static str>,
    pub new_tab: bool,
}

impl ResolvedLink {
    fn same_tab(href: String) -> Self {
        Self {
            href,
            rel: None,
            new_tab: false,
        }
    }

    fn external(href: String, new_tab: bool) -> Self {
        Self {
            href,
            rel: new_tab.then_some(NEW_TAB_REL),
            new_tab,
        }
    }

    fn affiliate(href: String) -> Self {
        Self {
            href,
            rel: Some(AFFILIATE_REL),
            new_tab: true,
        }
    }

    /// `target` attribute value, if any.
    pub fn target(&self) -> Option<&'static str> {
        self.new_tab.then_some("_blank")
    }
}

/// First path segments owned by built-in routes; pages can't use them.
pub const RESERVED_SLUGS: &[&str] = &["destinations", "articles", "api", "static", "404"];

/// A slug that can be used as one URL path segment (and one directory name).
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\', '?', '#'])
}

/// A free-form page slug that doesn't shadow a built-in route.
pub fn is_page_slug(slug: &str) -> bool {
    is_safe_slug(slug) && !RESERVED_SLUGS.contains(&slug)
}

/// Route of a document on the public site.
///
/// `destination` → `/destinations/{slug}`, `article` → `/articles/{slug}`,
/// `page` → `/{slug}`; any other type, or a missing slug, lands on `/`.
pub fn document_path(doc_type: &str, slug: &str) -> String {
    if slug.is_empty() {
        return "/".to_string();
    }
    match doc_type {
        "destination" => format!("/destinations/{slug}"),
        "article" => format!("/articles/{slug}"),
        "page" if slug == "home" => "/".to_string(),
        "page" => format!("/{slug}"),
        _ => "/".to_string(),
    }
}

/// Route for a dereferenced reference. Unresolved references (no slug) have
/// no route.
pub fn reference_path(target: &LinkTarget) -> Option<String> {
    let slug = target.slug.as_ref().filter(|s| !s.is_empty())?;
    Some(document_path(&target.doc_type, &slug.current))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve an internal link: a custom path takes precedence over the reference.
fn internal(custom_path: Option<&str>, target: Option<&LinkTarget>) -> Option<String> {
    if let Some(path) = non_empty(custom_path) {
        return Some(path.to_string());
    }
    target.and_then(reference_path)
}

pub fn resolve_cta(cta: &Cta) -> Option<ResolvedLink> {
    match cta.link_type {
        LinkType::Internal => internal(cta.custom_path.as_deref(), cta.internal_link.as_ref())
            .map(|href| {
                if cta.open_in_new_tab {
                    ResolvedLink::external(href, true)
                } else {
                    ResolvedLink::same_tab(href)
                }
            }),
        LinkType::External => non_empty(cta.external_url.as_deref())
            .map(|url| ResolvedLink::external(url.to_string(), cta.open_in_new_tab)),
        LinkType::Affiliate => non_empty(cta.affiliate_url.as_deref())
            .map(|url| ResolvedLink::affiliate(url.to_string())),
    }
}

/// Navigation items have no affiliate variant; dropdowns link nowhere themselves.
pub fn resolve_nav_item(item: &NavItem) -> Option<ResolvedLink> {
    match item.link_type {
        NavLinkType::Internal => {
            internal(item.custom_path.as_deref(), item.internal_link.as_ref())
                .map(ResolvedLink::same_tab)
        }
        NavLinkType::External => non_empty(item.external_url.as_deref())
            .map(|url| ResolvedLink::external(url.to_string(), item.open_in_new_tab)),
        NavLinkType::Dropdown => None,
    }
}

/// Rich-text link annotations. `link` carries a URL; `internalLink` a
/// reference that falls back to the home page when it doesn't resolve.
/// Other annotation kinds are not links.
pub fn resolve_mark(mark: &MarkDef) -> Option<ResolvedLink> {
    match mark.kind.as_str() {
        "link" => {
            let href = non_empty(mark.href.as_deref())?.to_string();
            Some(if mark.is_affiliate {
                ResolvedLink::affiliate(href)
            } else {
                ResolvedLink::external(href, mark.open_in_new_tab)
            })
        }
        "internalLink" => Some(ResolvedLink::same_tab(
            mark.reference
                .as_ref()
                .and_then(reference_path)
                .unwrap_or_else(|| "/".to_string()),
        )),
        _ => None,
    }
}

/// Absolute URL for a site-relative path.
pub fn absolute(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Slug;

    fn target(doc_type: &str, slug: &str) -> LinkTarget {
        LinkTarget {
            doc_type: doc_type.into(),
            slug: Some(Slug::new(slug)),
        }
    }

    fn cta(link_type: LinkType) -> Cta {
        Cta {
            text: "Go".into(),
            link_type,
            ..Cta::default()
        }
    }

    // =========================================================================
    // Slugs
    // =========================================================================

    #[test]
    fn unsafe_slugs_are_rejected() {
        assert!(is_safe_slug("cancun"));
        assert!(is_safe_slug("playa-del-carmen"));
        for slug in ["", ".", "..", "a/b", "..\\x", "a?b"] {
            assert!(!is_safe_slug(slug), "{slug:?}");
        }
    }

    #[test]
    fn pages_cannot_take_built_in_routes() {
        assert!(is_page_slug("about"));
        assert!(is_page_slug("home"));
        for slug in ["destinations", "articles", "api", "static", "404", "a/b"] {
            assert!(!is_page_slug(slug), "{slug:?}");
        }
    }

    // =========================================================================
    // The four link variants
    // =========================================================================

    #[test]
    fn internal_reference_resolves_to_route() {
        let link = Cta {
            internal_link: Some(target("destination", "cancun")),
            ..cta(LinkType::Internal)
        };
        let resolved = resolve_cta(&link).unwrap();
        assert_eq!(resolved.href, "/destinations/cancun");
        assert_eq!(resolved.rel, None);
        assert!(!resolved.new_tab);
    }

    #[test]
    fn custom_path_wins_over_reference() {
        let link = Cta {
            internal_link: Some(target("destination", "cancun")),
            custom_path: Some("/deals/summer".into()),
            ..cta(LinkType::Internal)
        };
        assert_eq!(resolve_cta(&link).unwrap().href, "/deals/summer");
    }

    #[test]
    fn external_url_passes_through() {
        let link = Cta {
            external_url: Some("https://example.com/tours".into()),
            ..cta(LinkType::External)
        };
        let resolved = resolve_cta(&link).unwrap();
        assert_eq!(resolved.href, "https://example.com/tours");
        assert_eq!(resolved.target(), None);
    }

    #[test]
    fn external_url_in_new_tab_gets_rel() {
        let link = Cta {
            external_url: Some("https://example.com".into()),
            open_in_new_tab: true,
            ..cta(LinkType::External)
        };
        let resolved = resolve_cta(&link).unwrap();
        assert_eq!(resolved.target(), Some("_blank"));
        assert_eq!(resolved.rel, Some(NEW_TAB_REL));
    }

    #[test]
    fn affiliate_url_is_sponsored_and_new_tab() {
        let link = Cta {
            affiliate_url: Some("https://www.booking.com/?aid=123".into()),
            ..cta(LinkType::Affiliate)
        };
        let resolved = resolve_cta(&link).unwrap();
        assert_eq!(resolved.href, "https://www.booking.com/?aid=123");
        assert_eq!(resolved.rel, Some(AFFILIATE_REL));
        assert!(resolved.new_tab);
    }

    // =========================================================================
    // Unresolvable links
    // =========================================================================

    #[test]
    fn missing_target_resolves_to_none() {
        assert_eq!(resolve_cta(&cta(LinkType::Internal)), None);
        assert_eq!(resolve_cta(&cta(LinkType::External)), None);
        assert_eq!(resolve_cta(&cta(LinkType::Affiliate)), None);
    }

    #[test]
    fn unresolved_reference_has_no_route() {
        let dangling = LinkTarget {
            doc_type: "reference".into(),
            slug: None,
        };
        assert_eq!(reference_path(&dangling), None);
    }

    // =========================================================================
    // Routes
    // =========================================================================

    #[test]
    fn document_routes() {
        assert_eq!(document_path("article", "best-beaches"), "/articles/best-beaches");
        assert_eq!(document_path("page", "about"), "/about");
        assert_eq!(document_path("page", "home"), "/");
        assert_eq!(document_path("author", "jane"), "/");
    }

    #[test]
    fn nav_items_resolve_by_kind() {
        let internal = NavItem {
            title: "Tulum".into(),
            internal_link: Some(target("destination", "tulum")),
            ..NavItem::default()
        };
        assert_eq!(resolve_nav_item(&internal).unwrap().href, "/destinations/tulum");

        let dropdown = NavItem {
            link_type: NavLinkType::Dropdown,
            ..NavItem::default()
        };
        assert_eq!(resolve_nav_item(&dropdown), None);
    }

    // =========================================================================
    // Rich-text annotations
    // =========================================================================

    fn mark(kind: &str) -> MarkDef {
        MarkDef {
            key: "m1".into(),
            kind: kind.into(),
            ..MarkDef::default()
        }
    }

    #[test]
    fn link_mark_honors_new_tab_and_affiliate() {
        let plain = MarkDef {
            href: Some("https://example.com".into()),
            ..mark("link")
        };
        assert_eq!(resolve_mark(&plain).unwrap().target(), None);

        let affiliate = MarkDef {
            is_affiliate: true,
            ..plain.clone()
        };
        let resolved = resolve_mark(&affiliate).unwrap();
        assert_eq!(resolved.rel, Some(AFFILIATE_REL));
        assert!(resolved.new_tab);

        assert_eq!(resolve_mark(&mark("link")), None);
    }

    #[test]
    fn internal_link_mark_falls_back_to_home() {
        let linked = MarkDef {
            reference: Some(target("article", "packing-list")),
            ..mark("internalLink")
        };
        assert_eq!(resolve_mark(&linked).unwrap().href, "/articles/packing-list");
        assert_eq!(resolve_mark(&mark("internalLink")).unwrap().href, "/");
        assert_eq!(resolve_mark(&mark("highlight")), None);
    }

    #[test]
    fn absolute_joins_base_and_path() {
        assert_eq!(absolute("https://x.mx/", "/articles"), "https://x.mx/articles");
        assert_eq!(absolute("https://x.mx", "robots.txt"), "https://x.mx/robots.txt");
        assert_eq!(absolute("https://x.mx", "https://cdn/x.jpg"), "https://cdn/x.jpg");
    }
}
