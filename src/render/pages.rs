//! Route renderers. Each returns a complete HTML document.
//!
//! | Route | Renderer |
//! |-------|----------|
//! | `/` | [`home`] |
//! | `/destinations` | [`destinations_index`] |
//! | `/destinations/{slug}` | [`destination_detail`] |
//! | `/articles` | [`articles_index`] |
//! | `/articles/{slug}` | [`article_detail`] |
//! | `/{slug}` | [`page`] |
//! | anything else | [`not_found`] |

use super::RenderContext;
use super::components::{article_byline, article_card, breadcrumbs, cdn_image, destination_card};
use super::dispatch::render_blocks;
use super::layout::base_document;
use super::portable_text;
use crate::documents::{Article, Destination, Page};
use crate::image::Transform;
use crate::links::AFFILIATE_REL;
use crate::seo::{Crumb, PageMeta, structured_data};
use maud::{Markup, html};
use std::cmp::Reverse;

/// Slug of the page document that replaces the built-in home page.
pub const HOME_SLUG: &str = "home";

const HERO_WIDTH: u32 = 1920;
const HERO_HEIGHT: u32 = 800;
const GALLERY_SIZE: u32 = 600;
const ARTICLE_IMAGE_WIDTH: u32 = 1200;
const ARTICLE_IMAGE_HEIGHT: u32 = 600;
const LATEST_ARTICLES: usize = 3;
const HOME_DESTINATIONS: usize = 6;

/// Featured destinations first, then alphabetical.
pub fn order_destinations(mut destinations: Vec<Destination>) -> Vec<Destination> {
    destinations.retain(Destination::is_resolved);
    destinations.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.slug.current.cmp(&b.slug.current))
    });
    destinations
}

/// Newest first; undated articles last.
pub fn order_articles(mut articles: Vec<Article>) -> Vec<Article> {
    articles.retain(Article::is_resolved);
    articles.sort_by(|a, b| {
        Reverse(a.published_at)
            .cmp(&Reverse(b.published_at))
            .then_with(|| a.slug.current.cmp(&b.slug.current))
    });
    articles
}

fn paragraphs(text: &str) -> Markup {
    html! {
        @for para in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            p { (para) }
        }
    }
}

fn page_header(title: &str, subtitle: Option<&str>) -> Markup {
    html! {
        header.page-header {
            div.container {
                h1 { (title) }
                @if let Some(subtitle) = subtitle.filter(|s| !s.is_empty()) {
                    p.page-subtitle { (subtitle) }
                }
            }
        }
    }
}

// ============================================================================
// Home
// ============================================================================

/// The CMS `home` page when one exists, otherwise a built-in landing page.
pub fn home(
    ctx: &RenderContext,
    home_page: Option<&Page>,
    destinations: &[Destination],
    articles: &[Article],
) -> Markup {
    if let Some(home_page) = home_page.filter(|p| !p.blocks.is_empty()) {
        return page(ctx, home_page);
    }
    let meta = PageMeta::basic(&ctx.site, &ctx.site.name, &ctx.site.description, "/");
    let featured: Vec<&Destination> = {
        let featured: Vec<&Destination> = destinations.iter().filter(|d| d.featured).collect();
        if featured.is_empty() {
            destinations.iter().take(HOME_DESTINATIONS).collect()
        } else {
            featured.into_iter().take(HOME_DESTINATIONS).collect()
        }
    };
    let content = html! {
        section.home-hero {
            div.container {
                h1 { (ctx.site.name) }
                @if !ctx.site.description.is_empty() {
                    p.hero-subtitle { (ctx.site.description) }
                }
                a.btn.btn-primary.btn-large href="/destinations" { "Explore Destinations" }
            }
        }
        @if !featured.is_empty() {
            section.container.home-section {
                h2.block-title { "Featured Destinations" }
                div.card-grid {
                    @for destination in &featured {
                        (destination_card(ctx, destination))
                    }
                }
            }
        }
        @if !articles.is_empty() {
            section.container.home-section {
                h2.block-title { "Latest Travel Guides" }
                div.card-grid {
                    @for article in articles.iter().take(LATEST_ARTICLES) {
                        (article_card(ctx, article))
                    }
                }
                a.btn.btn-secondary href="/articles" { "View All Articles" }
            }
        }
    };
    base_document(ctx, &meta, "/", &[], content)
}

// ============================================================================
// Destinations
// ============================================================================

/// Listing in the order given; see [`order_destinations`].
pub fn destinations_index(ctx: &RenderContext, destinations: &[Destination]) -> Markup {
    let meta = PageMeta::basic(
        &ctx.site,
        "Destinations",
        "Explore the best travel destinations in Mexico, from Caribbean beaches to colonial cities.",
        "/destinations",
    );
    let (featured, others): (Vec<&Destination>, Vec<&Destination>) =
        destinations.iter().partition(|d| d.featured);
    let content = html! {
        (page_header("Discover Mexico", Some("From pristine beaches to ancient ruins, find your perfect destination")))
        div.container {
            (breadcrumbs(ctx, &[Crumb::new("Home", "/"), Crumb::new("Destinations", "/destinations")]))
            @if destinations.is_empty() {
                p.empty-state { "No destinations published yet." }
            }
            @if !featured.is_empty() {
                section.listing-section {
                    h2.block-title { "Featured Destinations" }
                    div.card-grid {
                        @for destination in &featured { (destination_card(ctx, destination)) }
                    }
                }
            }
            @if !others.is_empty() {
                section.listing-section {
                    @if !featured.is_empty() {
                        h2.block-title { "More Destinations" }
                    }
                    div.card-grid {
                        @for destination in &others { (destination_card(ctx, destination)) }
                    }
                }
            }
        }
    };
    base_document(ctx, &meta, "/destinations", &[], content)
}

pub fn destination_detail(ctx: &RenderContext, destination: &Destination) -> Markup {
    let path = format!("/destinations/{}", destination.slug.current);
    let meta = PageMeta::for_destination(&ctx.site, &ctx.images, destination);
    let json_ld = [structured_data::destination(
        &ctx.site,
        destination,
        meta.image.as_deref(),
    )];
    let location = destination.location.as_ref().and_then(|loc| loc.label());
    let partners = destination
        .affiliate_links
        .as_ref()
        .map(|links| links.partners())
        .unwrap_or_default();
    let related: Vec<&Destination> = destination
        .related_destinations
        .iter()
        .filter(|d| d.is_resolved())
        .collect();
    let trail = [
        Crumb::new("Home", "/"),
        Crumb::new("Destinations", "/destinations"),
        Crumb::new(destination.name.clone(), path.clone()),
    ];
    let content = html! {
        section.detail-hero {
            (cdn_image(
                ctx,
                destination.hero_image.as_ref(),
                Transform::size(HERO_WIDTH, HERO_HEIGHT),
                &destination.name,
            ))
            div.detail-hero-text {
                h1 { (destination.name) }
                @if let Some(location) = &location {
                    p.detail-location { "📍 " (location) }
                }
            }
        }
        div.container.detail-layout {
            (breadcrumbs(ctx, &trail))
            div.detail-main {
                @if let Some(summary) = destination.short_description.as_deref().filter(|s| !s.is_empty()) {
                    p.lead { (summary) }
                }
                @if let Some(description) = destination.description.as_deref() {
                    div.prose { (paragraphs(description)) }
                }
                @if !destination.highlights.is_empty() {
                    section.destination-highlights {
                        h2 { "Highlights" }
                        div.card-grid {
                            @for highlight in &destination.highlights {
                                div.card.highlight {
                                    @if let Some(icon) = highlight.icon.as_deref().filter(|i| !i.is_empty()) {
                                        span.highlight-icon aria-hidden="true" { (icon) }
                                    }
                                    h3 { (highlight.title) }
                                    @if let Some(description) = highlight.description.as_deref() {
                                        p { (description) }
                                    }
                                }
                            }
                        }
                    }
                }
                @if !destination.gallery.is_empty() {
                    section.destination-gallery {
                        h2 { "Gallery" }
                        div.gallery.gallery-grid {
                            @for image in &destination.gallery {
                                a.lightbox-link
                                    href=(ctx.images.url(Some(image), Transform::width(HERO_WIDTH)))
                                    data-lightbox
                                    data-caption=[image.caption.as_deref()]
                                {
                                    (cdn_image(ctx, Some(image), Transform::size(GALLERY_SIZE, GALLERY_SIZE), &destination.name))
                                }
                            }
                        }
                    }
                }
            }
            aside.detail-sidebar {
                @if let Some(best) = &destination.best_time_to_visit {
                    div.sidebar-card {
                        h3 { "Best Time to Visit" }
                        @if !best.seasons.is_empty() {
                            div.chips {
                                @for season in &best.seasons { span.chip { (season) } }
                            }
                        }
                        @if let Some(description) = best.description.as_deref() {
                            p { (description) }
                        }
                    }
                }
                @if let Some(weather) = &destination.weather {
                    div.sidebar-card {
                        h3 { "Weather" }
                        ul.weather-summary {
                            @if let Some(high) = weather.average_temp_high {
                                li { "Average high: " (high.round() as i64) "°F" }
                            }
                            @if let Some(low) = weather.average_temp_low {
                                li { "Average low: " (low.round() as i64) "°F" }
                            }
                            @if let Some(rainy) = weather.rainy_season_months.as_deref().filter(|r| !r.is_empty()) {
                                li { "Rainy season: " (rainy) }
                            }
                        }
                        @if weather.hurricane_season {
                            p.weather-warning role="note" { "⚠ Hurricane season runs June through November." }
                        }
                    }
                }
                @if !partners.is_empty() {
                    div.sidebar-card.booking-card {
                        h3 { "Plan Your Trip" }
                        @for (partner, url) in &partners {
                            a.btn.btn-primary.btn-block href=(url) target="_blank" rel=(AFFILIATE_REL) {
                                "Book on " (partner)
                            }
                        }
                    }
                }
            }
        }
        @if !related.is_empty() {
            section.container.related {
                h2.block-title { "Related Destinations" }
                div.card-grid {
                    @for d in &related { (destination_card(ctx, d)) }
                }
            }
        }
    };
    base_document(ctx, &meta, &path, &json_ld, content)
}

// ============================================================================
// Articles
// ============================================================================

/// Listing in the order given; see [`order_articles`].
pub fn articles_index(ctx: &RenderContext, articles: &[Article]) -> Markup {
    let meta = PageMeta::basic(
        &ctx.site,
        "Travel Articles",
        "Travel guides, tips and stories to help you plan your trip to Mexico.",
        "/articles",
    );
    let content = html! {
        (page_header("Travel Guides & Articles", Some("Expert tips and inspiration for your Mexico adventure")))
        div.container {
            (breadcrumbs(ctx, &[Crumb::new("Home", "/"), Crumb::new("Articles", "/articles")]))
            @if articles.is_empty() {
                p.empty-state { "No articles published yet." }
            } @else {
                div.card-grid {
                    @for article in articles { (article_card(ctx, article)) }
                }
            }
        }
    };
    base_document(ctx, &meta, "/articles", &[], content)
}

pub fn article_detail(ctx: &RenderContext, article: &Article) -> Markup {
    let path = format!("/articles/{}", article.slug.current);
    let meta = PageMeta::for_article(&ctx.site, &ctx.images, article);
    let json_ld = [structured_data::article(&ctx.site, article, meta.image.as_deref())];
    let trail = [
        Crumb::new("Home", "/"),
        Crumb::new("Articles", "/articles"),
        Crumb::new(article.title.clone(), path.clone()),
    ];
    let related_destinations: Vec<&Destination> = article
        .related_destinations
        .iter()
        .filter(|d| d.is_resolved())
        .collect();
    let related_articles: Vec<&Article> = article
        .related_articles
        .iter()
        .filter(|a| a.is_resolved())
        .collect();
    let content = html! {
        article.container.article-detail {
            (breadcrumbs(ctx, &trail))
            header.article-header {
                @if !article.categories.is_empty() {
                    div.chips {
                        @for category in article.categories.iter().filter(|c| !c.title.is_empty()) {
                            span.chip { (category.title) }
                        }
                    }
                }
                h1 { (article.title) }
                @if let Some(excerpt) = article.excerpt.as_deref().filter(|e| !e.is_empty()) {
                    p.lead { (excerpt) }
                }
                (article_byline(article))
            }
            @if article.featured_image.is_some() {
                figure.article-image {
                    (cdn_image(ctx, article.featured_image.as_ref(), Transform::size(ARTICLE_IMAGE_WIDTH, ARTICLE_IMAGE_HEIGHT), &article.title))
                }
            }
            div.prose.article-body {
                (portable_text::render(ctx, &article.body))
            }
            @if !article.tags.is_empty() {
                div.chips.article-tags {
                    @for tag in article.tags.iter().filter(|t| !t.title.is_empty()) {
                        span.chip.chip-outlined { "#" (tag.title) }
                    }
                }
            }
        }
        @if !related_destinations.is_empty() {
            section.container.related {
                h2.block-title { "Destinations in This Article" }
                div.card-grid {
                    @for d in &related_destinations { (destination_card(ctx, d)) }
                }
            }
        }
        @if !related_articles.is_empty() {
            section.container.related {
                h2.block-title { "Related Articles" }
                div.card-grid {
                    @for a in &related_articles { (article_card(ctx, a)) }
                }
            }
        }
    };
    base_document(ctx, &meta, &path, &json_ld, content)
}

// ============================================================================
// Page builder, 404
// ============================================================================

/// Route of a free-form page.
pub fn page_path(page: &Page) -> String {
    crate::links::document_path("page", &page.slug.current)
}

pub fn page(ctx: &RenderContext, page: &Page) -> Markup {
    let path = page_path(page);
    let meta = PageMeta::for_page(&ctx.site, &ctx.images, page, &path);
    let show_trail = page.show_breadcrumbs && path != "/";
    let content = html! {
        @if show_trail {
            div.container {
                (breadcrumbs(ctx, &[Crumb::new("Home", "/"), Crumb::new(page.title.clone(), path.clone())]))
            }
        }
        @if page.blocks.is_empty() {
            (page_header(&page.title, None))
        }
        (render_blocks(ctx, &page.blocks))
    };
    base_document(ctx, &meta, &path, &[], content)
}

pub fn not_found(ctx: &RenderContext) -> Markup {
    let meta = PageMeta::basic(
        &ctx.site,
        "Page Not Found",
        "The page you are looking for does not exist.",
        "/404",
    )
    .noindex(true);
    let content = html! {
        section.container.not-found {
            h1 { "404" }
            h2 { "Page Not Found" }
            p { "The page you're looking for doesn't exist or has been moved." }
            a.btn.btn-primary href="/" { "Go Home" }
        }
    };
    base_document(ctx, &meta, "/404", &[], content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    // =========================================================================
    // Ordering
    // =========================================================================

    #[test]
    fn destinations_order_featured_then_name() {
        let mut tulum = sample_destination("tulum", "Tulum");
        tulum.featured = true;
        let unresolved = sample_destination("", "Nowhere");
        let ordered = order_destinations(vec![
            sample_destination("oaxaca", "Oaxaca"),
            unresolved,
            tulum,
            sample_destination("cancun", "Cancún"),
        ]);
        let names: Vec<&str> = ordered.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Tulum", "Cancún", "Oaxaca"]);
    }

    #[test]
    fn articles_order_newest_first() {
        let mut old = sample_article("old", "Old");
        old.published_at = Some(date("2023-01-01T00:00:00Z"));
        let mut new = sample_article("new", "New");
        new.published_at = Some(date("2024-06-01T00:00:00Z"));
        let mut undated = sample_article("undated", "Undated");
        undated.published_at = None;
        let ordered = order_articles(vec![old, undated, new]);
        let slugs: Vec<&str> = ordered.iter().map(|a| a.slug.current.as_str()).collect();
        assert_eq!(slugs, vec!["new", "old", "undated"]);
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn home_falls_back_to_featured_and_latest() {
        let config = test_config();
        let ctx = test_context(&config);
        let destinations = vec![sample_destination("tulum", "Tulum")];
        let articles = vec![sample_article("tips", "Packing tips")];
        let html = home(&ctx, None, &destinations, &articles).into_string();
        assert!(html.contains("Featured Destinations"));
        assert!(html.contains(r#"href="/destinations/tulum""#));
        assert!(html.contains(r#"href="/articles/tips""#));
    }

    #[test]
    fn home_prefers_cms_page() {
        let config = test_config();
        let ctx = test_context(&config);
        let mut home_page = sample_page("home", "Welcome");
        home_page.blocks = serde_json::from_value(serde_json::json!([
            {"_type": "heroBlock", "title": "Sun and sand"}
        ]))
        .unwrap();
        let html = home(&ctx, Some(&home_page), &[], &[]).into_string();
        assert!(html.contains("Sun and sand"));
        assert!(!html.contains("Featured Destinations"));
        assert!(html.contains(r#"<link rel="canonical" href="https://resort.example/">"#));
    }

    #[test]
    fn destination_detail_has_json_ld_and_booking() {
        let config = test_config();
        let ctx = test_context(&config);
        let mut d = sample_destination("cancun", "Cancún");
        d.affiliate_links = Some(crate::documents::AffiliateLinks {
            booking_url: Some("https://booking.example/cancun".into()),
            ..Default::default()
        });
        let html = destination_detail(&ctx, &d).into_string();
        assert!(html.contains("TouristDestination"));
        assert!(html.contains("BreadcrumbList"));
        assert!(html.contains("Book on Booking.com"));
        assert!(html.contains("nofollow sponsored"));
        assert!(html.contains("<title>Cancún - Mexico Travel Guide</title>"));
    }

    #[test]
    fn article_detail_renders_body() {
        let config = test_config();
        let ctx = test_context(&config);
        let mut a = sample_article("tips", "Packing tips");
        a.body = serde_json::from_value(serde_json::json!([
            {"_type": "block", "children": [{"text": "Bring sunscreen."}]}
        ]))
        .unwrap();
        let html = article_detail(&ctx, &a).into_string();
        assert!(html.contains("<p>Bring sunscreen.</p>"));
        assert!(html.contains(r#""@type":"Article""#));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
    }

    #[test]
    fn page_breadcrumbs_follow_flag() {
        let config = test_config();
        let ctx = test_context(&config);
        let mut p = sample_page("about", "About Us");
        let html = page(&ctx, &p).into_string();
        assert!(html.contains(r#"<li aria-current="page">About Us</li>"#));

        p.show_breadcrumbs = false;
        let html = page(&ctx, &p).into_string();
        assert!(!html.contains("aria-current"));
    }

    #[test]
    fn not_found_is_noindex() {
        let config = test_config();
        let ctx = test_context(&config);
        let html = not_found(&ctx).into_string();
        assert!(html.contains("Page Not Found"));
        assert!(html.contains("noindex"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = test_config();
        let ctx = test_context(&config);
        let d = sample_destination("tulum", "Tulum");
        assert_eq!(
            destination_detail(&ctx, &d).into_string(),
            destination_detail(&ctx, &d).into_string()
        );
    }
}
