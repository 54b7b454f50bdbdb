//! Pieces shared by blocks and pages: buttons, cards, breadcrumbs, images.

use super::RenderContext;
use crate::documents::{Article, Cta, Destination, ImageRef};
use crate::image::{Format, Transform};
use crate::links::{ResolvedLink, resolve_cta};
use crate::seo::{Crumb, structured_data};
use maud::{Markup, PreEscaped, html};

/// Card thumbnails are cropped to 3:2.
const CARD_WIDTH: u32 = 600;
const CARD_HEIGHT: u32 = 400;

/// `<a>` for a resolved link, with `target`/`rel` when it opens a new tab.
pub fn link(link: &ResolvedLink, class: Option<&str>, content: Markup) -> Markup {
    html! {
        a class=[class] href=(link.href) target=[link.target()] rel=[link.rel] {
            (content)
        }
    }
}

/// Call-to-action button. Renders nothing when the link doesn't resolve.
pub fn cta_button(cta: Option<&Cta>) -> Markup {
    let Some(cta) = cta else {
        return html! {};
    };
    let Some(resolved) = resolve_cta(cta) else {
        return html! {};
    };
    let class = format!("btn btn-{} btn-{}", cta.style, cta.size);
    let label = if cta.text.trim().is_empty() {
        "Learn More"
    } else {
        cta.text.as_str()
    };
    link(
        &resolved,
        Some(&class),
        html! {
            (label)
            @if let Some(glyph) = cta.icon.glyph() {
                " "
                span.btn-icon aria-hidden="true" { (glyph) }
            }
        },
    )
}

/// `<img>` through the image CDN, falling back to the placeholder.
pub fn cdn_image(
    ctx: &RenderContext,
    image: Option<&ImageRef>,
    transform: Transform,
    fallback_alt: &str,
) -> Markup {
    let src = ctx.images.url(image, transform.format(Format::Webp));
    let alt = image
        .map(ImageRef::alt_text)
        .filter(|alt| !alt.is_empty())
        .unwrap_or(fallback_alt);
    html! {
        img src=(src) alt=(alt) loading="lazy";
    }
}

/// Five-star rating, rounded to whole stars and clamped to 0..=5.
pub fn stars(rating: Option<f64>) -> Markup {
    let Some(rating) = rating.filter(|r| r.is_finite()) else {
        return html! {};
    };
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    let label = format!("{filled} out of 5 stars");
    html! {
        span.rating aria-label=(label) {
            @for _ in 0..filled { "★" }
            @for _ in filled..5 { "☆" }
        }
    }
}

/// Heading shown above a block when the editor gave it a title.
pub fn block_title(title: Option<&str>) -> Markup {
    html! {
        @if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            h2.block-title { (title) }
        }
    }
}

pub fn destination_card(ctx: &RenderContext, destination: &Destination) -> Markup {
    let href = format!("/destinations/{}", destination.slug.current);
    let state = destination
        .location
        .as_ref()
        .and_then(|loc| loc.state.as_deref())
        .filter(|s| !s.is_empty());
    html! {
        article.card.destination-card {
            div.card-media {
                (cdn_image(
                    ctx,
                    destination.hero_image.as_ref(),
                    Transform::size(CARD_WIDTH, CARD_HEIGHT),
                    &destination.name,
                ))
                @if destination.featured {
                    span.chip.chip-featured { "Featured" }
                }
            }
            div.card-body {
                h3.card-title { a href=(href) { (destination.name) } }
                @if let Some(state) = state {
                    p.card-location { "📍 " (state) ", Mexico" }
                }
                @if let Some(summary) = destination.short_description.as_deref() {
                    p.card-text { (summary) }
                }
            }
            div.card-actions {
                a.btn.btn-primary.btn-block href=(href) { "Explore Destination" }
            }
        }
    }
}

pub fn article_card(ctx: &RenderContext, article: &Article) -> Markup {
    let href = format!("/articles/{}", article.slug.current);
    html! {
        article.card.article-card {
            div.card-media {
                (cdn_image(
                    ctx,
                    article.featured_image.as_ref(),
                    Transform::size(CARD_WIDTH, CARD_HEIGHT),
                    &article.title,
                ))
                @if article.featured {
                    span.chip.chip-featured { "Featured" }
                }
            }
            div.card-body {
                @if !article.categories.is_empty() {
                    div.chips {
                        @for category in article.categories.iter().filter(|c| !c.title.is_empty()).take(2) {
                            span.chip { (category.title) }
                        }
                    }
                }
                h3.card-title { a href=(href) { (article.title) } }
                @if let Some(excerpt) = article.excerpt.as_deref() {
                    p.card-text { (excerpt) }
                }
                (article_byline(article))
            }
            div.card-actions {
                a.btn.btn-text href=(href) { "Read More →" }
            }
        }
    }
}

/// Author, date and reading time, whichever are known.
pub fn article_byline(article: &Article) -> Markup {
    let minutes = article
        .reading_time
        .filter(|m| m.is_finite() && *m > 0.0)
        .map(|m| m.round() as u32)
        .unwrap_or_else(|| crate::portable_text::reading_minutes(&article.body));
    html! {
        p.byline {
            @if let Some(name) = article.author_name() {
                span.byline-author { "By " (name) }
                " · "
            }
            @if let Some(published) = article.published_at {
                time datetime=(published.to_rfc3339()) { (published.format("%B %-d, %Y").to_string()) }
                " · "
            }
            span.byline-reading { (minutes) " min read" }
        }
    }
}

/// Breadcrumb trail with its BreadcrumbList JSON-LD. The last crumb is the
/// current page and is not linked.
pub fn breadcrumbs(ctx: &RenderContext, trail: &[Crumb]) -> Markup {
    if trail.is_empty() {
        return html! {};
    }
    let json_ld = structured_data::breadcrumbs(&ctx.site, trail);
    html! {
        script type="application/ld+json" { (PreEscaped(structured_data::to_script(&json_ld))) }
        nav.breadcrumbs aria-label="breadcrumb" {
            ol {
                @for (i, crumb) in trail.iter().enumerate() {
                    @if i + 1 == trail.len() {
                        li aria-current="page" { (crumb.label) }
                    } @else {
                        li { a href=(crumb.href) { (crumb.label) } }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{CtaIcon, LinkTarget, Slug};
    use crate::links::LinkType;
    use crate::test_helpers::*;

    #[test]
    fn cta_button_renders_resolved_link() {
        let cta = Cta {
            text: "Plan your trip".into(),
            link_type: LinkType::Internal,
            internal_link: Some(LinkTarget {
                doc_type: "destination".into(),
                slug: Some(Slug::new("cancun")),
            }),
            icon: CtaIcon::ArrowRight,
            ..Cta::default()
        };
        let html = cta_button(Some(&cta)).into_string();
        assert!(html.contains(r#"href="/destinations/cancun""#));
        assert!(html.contains("btn-primary btn-medium"));
        assert!(html.contains("→"));
        assert!(!html.contains("target="));
    }

    #[test]
    fn unresolvable_cta_is_omitted() {
        let cta = Cta {
            text: "Nowhere".into(),
            link_type: LinkType::External,
            ..Cta::default()
        };
        assert_eq!(cta_button(Some(&cta)).into_string(), "");
        assert_eq!(cta_button(None).into_string(), "");
    }

    #[test]
    fn affiliate_cta_is_sponsored() {
        let cta = Cta {
            text: "Book".into(),
            link_type: LinkType::Affiliate,
            affiliate_url: Some("https://www.booking.com/?aid=1".into()),
            ..Cta::default()
        };
        let html = cta_button(Some(&cta)).into_string();
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer nofollow sponsored""#));
    }

    #[test]
    fn stars_are_clamped() {
        assert_eq!(stars(Some(7.0)).into_string().matches('★').count(), 5);
        assert_eq!(stars(Some(3.4)).into_string().matches('☆').count(), 2);
        assert_eq!(stars(None).into_string(), "");
    }

    #[test]
    fn missing_card_image_uses_placeholder() {
        let config = test_config();
        let ctx = test_context(&config);
        let html = destination_card(&ctx, &sample_destination("tulum", "Tulum")).into_string();
        assert!(html.contains("/static/placeholder.svg"));
        assert!(html.contains(r#"href="/destinations/tulum""#));
        assert!(html.contains(r#"alt="Tulum""#));
    }

    #[test]
    fn breadcrumbs_link_all_but_last() {
        let config = test_config();
        let ctx = test_context(&config);
        let trail = [
            Crumb::new("Home", "/"),
            Crumb::new("Destinations", "/destinations"),
            Crumb::new("Tulum", "/destinations/tulum"),
        ];
        let html = breadcrumbs(&ctx, &trail).into_string();
        assert!(html.contains(r#"<a href="/destinations">Destinations</a>"#));
        assert!(html.contains(r#"<li aria-current="page">Tulum</li>"#));
        assert!(html.contains("BreadcrumbList"));
    }
}
