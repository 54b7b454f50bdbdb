//! Page chrome: `<head>` metadata, header and menus, footer, draft banner.
//!
//! Styles and scripts are embedded at compile time and inlined into every
//! page, so a built site is self-contained apart from its images:
//! - `static/style.css`: base styles (theme tokens are prepended per site)
//! - `static/site.js`: tabs, accordions, carousels, lightbox, alert dismissal

use super::RenderContext;
use crate::documents::NavItem;
use crate::image::Transform;
use crate::links::{ResolvedLink, resolve_nav_item};
use crate::seo::{OG_HEIGHT, OG_WIDTH, PageMeta};
use crate::seo::structured_data::{organization, to_script, website};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::Value;
use url::form_urlencoded;

pub const CSS_STATIC: &str = include_str!("../../static/style.css");
pub const JS: &str = include_str!("../../static/site.js");

const LOGO_WIDTH: u32 = 240;

/// Where the draft banner's exit link goes.
pub fn disable_draft_href(current_path: &str) -> String {
    let redirect: String = form_urlencoded::byte_serialize(current_path.as_bytes()).collect();
    format!("/api/disable-draft?redirect={redirect}")
}

/// Renders a complete page around `content`.
///
/// Organization and WebSite JSON-LD are always emitted; `json_ld` adds the
/// page's own documents (Article, TouristDestination).
pub fn base_document(
    ctx: &RenderContext,
    meta: &PageMeta,
    current_path: &str,
    json_ld: &[Value],
    content: Markup,
) -> Markup {
    let noindex = meta.noindex || ctx.draft;
    html! {
        (DOCTYPE)
        html lang=(ctx.site.locale.split('_').next().unwrap_or("en")) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                @if !meta.keywords.is_empty() {
                    meta name="keywords" content=(meta.keywords.join(", "));
                }
                @if noindex {
                    meta name="robots" content="noindex, nofollow";
                }
                link rel="canonical" href=(meta.canonical);
                (open_graph(ctx, meta))
                style { (PreEscaped(ctx.stylesheet())) }
                script type="application/ld+json" { (PreEscaped(to_script(&organization(&ctx.site)))) }
                script type="application/ld+json" { (PreEscaped(to_script(&website(&ctx.site)))) }
                @for doc in json_ld {
                    script type="application/ld+json" { (PreEscaped(to_script(doc))) }
                }
            }
            body {
                @if ctx.draft {
                    (draft_banner(current_path))
                }
                (site_header(ctx, current_path))
                main.site-main {
                    (content)
                }
                (site_footer(ctx))
                script { (PreEscaped(JS)) }
            }
        }
    }
}

fn open_graph(ctx: &RenderContext, meta: &PageMeta) -> Markup {
    html! {
        meta property="og:type" content=(meta.og_type.as_str());
        meta property="og:title" content=(meta.title);
        meta property="og:description" content=(meta.description);
        meta property="og:url" content=(meta.canonical);
        meta property="og:site_name" content=(ctx.site.name);
        meta property="og:locale" content=(ctx.site.locale);
        @if let Some(image) = &meta.image {
            meta property="og:image" content=(image);
            meta property="og:image:width" content=(OG_WIDTH);
            meta property="og:image:height" content=(OG_HEIGHT);
            meta property="og:image:alt" content=(meta.image_alt);
        }
        @if let Some(published) = meta.published {
            meta property="article:published_time" content=(published.to_rfc3339());
        }
        @if let Some(modified) = meta.modified {
            meta property="article:modified_time" content=(modified.to_rfc3339());
        }
        @for author in &meta.authors {
            meta property="article:author" content=(author);
        }
        meta name="twitter:card" content="summary_large_image";
        meta name="twitter:title" content=(meta.title);
        meta name="twitter:description" content=(meta.description);
        @if let Some(image) = &meta.image {
            meta name="twitter:image" content=(image);
        }
    }
}

fn draft_banner(current_path: &str) -> Markup {
    html! {
        div.draft-banner role="status" {
            "Preview mode: you are viewing draft content. "
            a href=(disable_draft_href(current_path)) { "Exit preview" }
        }
    }
}

// ============================================================================
// Header and menus
// ============================================================================

/// Menu used when the CMS has no navigation document.
fn default_menu() -> Vec<(String, String)> {
    vec![
        ("Destinations".to_string(), "/destinations".to_string()),
        ("Articles".to_string(), "/articles".to_string()),
    ]
}

fn is_current(href: &str, current_path: &str) -> bool {
    href == current_path || (href != "/" && current_path.starts_with(&format!("{href}/")))
}

fn nav_link(resolved: &ResolvedLink, title: &str) -> Markup {
    super::components::link(resolved, None, html! { (title) })
}

fn site_header(ctx: &RenderContext, current_path: &str) -> Markup {
    let logo = ctx
        .settings
        .as_ref()
        .and_then(|s| s.logo.as_ref())
        .filter(|logo| ctx.images.source_url(logo).is_some());
    html! {
        header.site-header {
            div.container.header-inner {
                a.site-brand href="/" {
                    @if let Some(logo) = logo {
                        img src=(ctx.images.url(Some(logo), Transform::width(LOGO_WIDTH)))
                            alt=(ctx.site.name);
                    } @else {
                        span.site-title { (ctx.site.name) }
                    }
                }
                input.nav-toggle type="checkbox" id="nav-toggle";
                label.nav-hamburger for="nav-toggle" aria-label="Menu" {
                    span.hamburger-line {}
                    span.hamburger-line {}
                    span.hamburger-line {}
                }
                nav.site-nav aria-label="Main" {
                    ul {
                        @match &ctx.navigation {
                            Some(nav) if !nav.main_menu.is_empty() => {
                                @for item in &nav.main_menu {
                                    (render_nav_item(item, current_path))
                                }
                            }
                            _ => {
                                @for (title, href) in default_menu() {
                                    li class=[is_current(&href, current_path).then_some("current")] {
                                        a href=(href) { (title) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders one main-menu entry. Dropdowns open without script via
/// `<details>`; entries that don't resolve are left out.
pub fn render_nav_item(item: &NavItem, current_path: &str) -> Markup {
    if item.link_type == crate::documents::NavLinkType::Dropdown {
        let children: Vec<(ResolvedLink, &NavItem)> = item
            .dropdown_items
            .iter()
            .filter_map(|child| resolve_nav_item(child).map(|link| (link, child)))
            .collect();
        if children.is_empty() {
            return html! {};
        }
        let open = children.iter().any(|(link, _)| is_current(&link.href, current_path));
        return html! {
            li.nav-dropdown.current[open] {
                details {
                    summary { (item.title) }
                    ul.dropdown-menu {
                        @for (link, child) in &children {
                            li class=[is_current(&link.href, current_path).then_some("current")] {
                                (nav_link(link, &child.title))
                                @if let Some(description) = child.description.as_deref().filter(|d| !d.is_empty()) {
                                    span.nav-description { (description) }
                                }
                            }
                        }
                    }
                }
            }
        };
    }
    let Some(link) = resolve_nav_item(item) else {
        return html! {};
    };
    html! {
        li class=[is_current(&link.href, current_path).then_some("current")] {
            (nav_link(&link, &item.title))
        }
    }
}

// ============================================================================
// Footer
// ============================================================================

fn site_footer(ctx: &RenderContext) -> Markup {
    let columns = ctx
        .navigation
        .as_ref()
        .and_then(|nav| nav.footer_menu.as_ref())
        .map(|menu| menu.columns.as_slice())
        .unwrap_or_default();
    let social = ctx
        .settings
        .as_ref()
        .and_then(|s| s.social_media.as_ref())
        .map(|s| s.links())
        .unwrap_or_default();
    html! {
        footer.site-footer {
            div.container {
                div.footer-columns {
                    div.footer-about {
                        strong.footer-brand { (ctx.site.name) }
                        @if !ctx.site.description.is_empty() {
                            p { (ctx.site.description) }
                        }
                    }
                    @if columns.is_empty() {
                        div.footer-column {
                            h3 { "Explore" }
                            ul {
                                @for (title, href) in default_menu() {
                                    li { a href=(href) { (title) } }
                                }
                            }
                        }
                    }
                    @for column in columns {
                        div.footer-column {
                            @if !column.title.is_empty() {
                                h3 { (column.title) }
                            }
                            ul {
                                @for item in &column.links {
                                    @if let Some(link) = resolve_nav_item(item) {
                                        li { (nav_link(&link, &item.title)) }
                                    }
                                }
                            }
                        }
                    }
                }
                @if !social.is_empty() {
                    ul.social-links {
                        @for (platform, url) in &social {
                            li {
                                a class={ "social-" (platform) } href=(url) target="_blank"
                                    rel=(crate::links::NEW_TAB_REL) aria-label=(platform) {
                                    (platform)
                                }
                            }
                        }
                    }
                }
                p.copyright {
                    "© " (ctx.year) " " (ctx.site.name) ". All rights reserved."
                }
            }
        }
    }
}
