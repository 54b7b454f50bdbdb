//! One renderer per page-builder block.
//!
//! Every renderer emits a root element even when the record is nearly empty,
//! and falls back locally for missing sub-fields: the placeholder image for a
//! missing image, nothing for an unresolvable link or an absent optional
//! text. Interactive blocks (tabs, accordion, carousel, lightbox, alert
//! dismissal) only carry `data-*` hooks; `static/site.js` drives them.

use super::RenderContext;
use super::components::{block_title, cdn_image, cta_button, destination_card, stars};
use super::dispatch::render_at;
use super::portable_text;
use crate::blocks::*;
use crate::embed::{Provider, aspect_padding, embed_url};
use crate::image::{Format, Transform};
use crate::links::AFFILIATE_REL;
use maud::{Markup, html};

const HERO_WIDTH: u32 = 1920;
const CONTENT_WIDTH: u32 = 1200;
const THUMB_WIDTH: u32 = 800;
const ICON_SIZE: u32 = 96;
const AVATAR_SIZE: u32 = 120;

/// `grid-template-columns` for a column option.
fn grid_columns(columns: Columns) -> String {
    match columns.count() {
        Some(n) => format!("grid-template-columns: repeat({n}, minmax(0, 1fr))"),
        None => "grid-template-columns: repeat(auto-fill, minmax(240px, 1fr))".to_string(),
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

// ============================================================================
// Hero, text, image
// ============================================================================

pub fn hero(ctx: &RenderContext, block: &HeroBlock) -> Markup {
    let background = block.background_image.as_ref().and_then(|img| {
        ctx.images.source_url(img)?;
        Some(ctx.images.url(
            Some(img),
            Transform::width(HERO_WIDTH).format(Format::Webp).quality(80),
        ))
    });
    let mut style = format!("min-height: {}", block.height);
    if let Some(url) = &background {
        style.push_str(&format!("; background-image: url('{url}')"));
    }
    html! {
        section.block.block-hero.hero-plain[background.is_none()] style=(style)
        {
            @if block.overlay && background.is_some() {
                div.hero-overlay {}
            }
            div.hero-content.container {
                h1.hero-title { (block.title) }
                @if let Some(subtitle) = non_empty(block.subtitle.as_deref()) {
                    p.hero-subtitle { (subtitle) }
                }
                (cta_button(block.cta.as_ref()))
            }
        }
    }
}

pub fn text(ctx: &RenderContext, block: &TextBlock) -> Markup {
    html! {
        section.block.block-text {
            div.container.prose {
                (portable_text::render(ctx, &block.content))
            }
        }
    }
}

pub fn image(ctx: &RenderContext, block: &ImageBlock) -> Markup {
    let caption = block
        .image
        .as_ref()
        .and_then(|img| non_empty(img.caption.as_deref()));
    html! {
        figure.block.block-image style={ "max-width: " (block.size.css()) } {
            (cdn_image(ctx, block.image.as_ref(), Transform::width(CONTENT_WIDTH), ""))
            @if let Some(caption) = caption {
                figcaption { (caption) }
            }
        }
    }
}

// ============================================================================
// Destinations, CTA, heading, spacer, alert, quote
// ============================================================================

pub fn destination_grid(ctx: &RenderContext, block: &DestinationGridBlock) -> Markup {
    let style = format!(
        "grid-template-columns: repeat({}, minmax(0, 1fr))",
        block.column_count()
    );
    html! {
        section.block.block-destination-grid {
            (block_title(block.title.as_deref()))
            div.card-grid style=(style) {
                @for destination in block.visible() {
                    (destination_card(ctx, destination))
                }
            }
        }
    }
}

pub fn cta(ctx: &RenderContext, block: &CtaBlock) -> Markup {
    let background = match block.style {
        CtaBlockStyle::Background => block.background_image.as_ref().and_then(|img| {
            ctx.images.source_url(img)?;
            Some(ctx.images.url(Some(img), Transform::width(HERO_WIDTH).format(Format::Webp)))
        }),
        _ => None,
    };
    let style = background.map(|url| format!("background-image: url('{url}')"));
    html! {
        section class={ "block block-cta cta-" (block.style) } style=[style] {
            div.container {
                h2.cta-title { (block.title) }
                @if let Some(subtitle) = non_empty(block.subtitle.as_deref()) {
                    p.cta-subtitle { (subtitle) }
                }
                (cta_button(block.cta.as_ref()))
            }
        }
    }
}

pub fn heading(block: &HeadingBlock) -> Markup {
    let class = format!(
        "block block-heading heading-{} align-{} spacing-{}",
        block.style, block.alignment, block.spacing
    );
    let text = block.text.as_str();
    match block.level {
        HeadingLevel::H1 => html! { h1 class=(class) { (text) } },
        HeadingLevel::H2 => html! { h2 class=(class) { (text) } },
        HeadingLevel::H3 => html! { h3 class=(class) { (text) } },
        HeadingLevel::H4 => html! { h4 class=(class) { (text) } },
        HeadingLevel::H5 => html! { h5 class=(class) { (text) } },
        HeadingLevel::H6 => html! { h6 class=(class) { (text) } },
    }
}

pub fn spacer(block: &SpacerBlock) -> Markup {
    html! {
        div.block.block-spacer style={ "height: " (block.pixels()) "px" } aria-hidden="true" {
            @if block.divider_style != DividerStyle::None {
                hr class={ "divider divider-" (block.divider_width) }
                    style={ "border-top-style: " (block.divider_style) };
            }
        }
    }
}

fn alert_glyph(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Info => "ℹ",
        AlertKind::Success => "✓",
        AlertKind::Warning => "⚠",
        AlertKind::Error => "✕",
        AlertKind::Promotion => "★",
    }
}

pub fn banner_alert(block: &BannerAlertBlock) -> Markup {
    html! {
        div class={ "block block-alert alert-" (block.kind) } role="alert" data-dismissible[block.dismissible] {
            @if block.show_icon {
                span.alert-icon aria-hidden="true" { (alert_glyph(block.kind)) }
            }
            p.alert-message { (block.message) }
            (cta_button(block.cta.as_ref()))
            @if block.dismissible {
                button.alert-dismiss type="button" aria-label="Dismiss" { "×" }
            }
        }
    }
}

pub fn quote(ctx: &RenderContext, block: &QuoteBlock) -> Markup {
    html! {
        figure class={ "block block-quote quote-" (block.style) " align-" (block.alignment) } {
            blockquote {
                p { "\u{201C}" (block.quote) "\u{201D}" }
            }
            (stars(block.rating))
            @if !block.author.is_empty() {
                figcaption {
                    @if block.author_image.is_some() {
                        span.avatar {
                            (cdn_image(
                                ctx,
                                block.author_image.as_ref(),
                                Transform::size(AVATAR_SIZE, AVATAR_SIZE),
                                &block.author,
                            ))
                        }
                    }
                    cite { (block.author) }
                    @if let Some(title) = non_empty(block.author_title.as_deref()) {
                        span.quote-author-title { (title) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Layout blocks: columns, text + image, cards, accordion, tabs
// ============================================================================

pub fn two_column_text(ctx: &RenderContext, block: &TwoColumnTextBlock) -> Markup {
    let style = format!(
        "grid-template-columns: {}; align-items: {}; gap: {}px",
        block.column_ratio.tracks(),
        block.vertical_align,
        block.gap.pixels()
    );
    html! {
        section.block.block-two-column style=(style) {
            div.column.prose { (portable_text::render(ctx, &block.left_column)) }
            div.column.prose { (portable_text::render(ctx, &block.right_column)) }
        }
    }
}

pub fn text_image(ctx: &RenderContext, block: &TextImageBlock) -> Markup {
    let mut class = format!(
        "block block-text-image image-{} image-{}",
        block.image_position, block.image_style
    );
    if block.reverse_on_mobile {
        class.push_str(" reverse-mobile");
    }
    let style = format!(
        "--image-share: {}%; align-items: {}",
        block.image_size, block.vertical_align
    );
    html! {
        section class=(class) style=(style) {
            div.text-image-media {
                (cdn_image(ctx, block.image.as_ref(), Transform::width(THUMB_WIDTH), ""))
            }
            div.text-image-content.prose {
                (portable_text::render(ctx, &block.content))
            }
        }
    }
}

pub fn card_grid(ctx: &RenderContext, block: &CardGridBlock) -> Markup {
    let class = format!(
        "card-grid cards-{} icon-{} align-{}",
        block.card_style, block.icon_position, block.text_align
    );
    html! {
        section.block.block-card-grid {
            (block_title(block.title.as_deref()))
            div class=(class) style=(grid_columns(block.columns)) {
                @for card in &block.cards {
                    article.card {
                        @if card.icon.is_some() {
                            div.card-icon {
                                (cdn_image(ctx, card.icon.as_ref(), Transform::size(ICON_SIZE, ICON_SIZE), ""))
                            }
                        }
                        div.card-body {
                            h3.card-title { (card.title) }
                            @if let Some(description) = non_empty(card.description.as_deref()) {
                                p.card-text { (description) }
                            }
                            (cta_button(card.link.as_ref()))
                        }
                    }
                }
            }
        }
    }
}

pub fn accordion(ctx: &RenderContext, block: &AccordionBlock) -> Markup {
    html! {
        section class={ "block block-accordion accordion-" (block.style) }
            data-accordion
            data-single[!block.allow_multiple]
        {
            (block_title(block.title.as_deref()))
            @for (i, item) in block.items.iter().enumerate() {
                details.accordion-item open[i == 0 && block.first_open] {
                    summary { (item.title) }
                    div.accordion-content.prose {
                        (portable_text::render(ctx, &item.content))
                    }
                }
            }
        }
    }
}

pub fn tabs(ctx: &RenderContext, block: &TabBlock) -> Markup {
    html! {
        section class={ "block block-tabs tabs-" (block.tab_style) } data-tabs {
            (block_title(block.title.as_deref()))
            div.tab-list role="tablist" style={ "justify-content: " (block.tab_alignment) } {
                @for (i, tab) in block.tabs.iter().enumerate() {
                    button.tab type="button" role="tab" data-tab=(i)
                        aria-selected=(if i == 0 { "true" } else { "false" })
                    {
                        (tab.tab_title)
                    }
                }
            }
            @for (i, tab) in block.tabs.iter().enumerate() {
                div.tab-panel.prose role="tabpanel" data-panel=(i) hidden[i != 0] {
                    (portable_text::render(ctx, &tab.content))
                }
            }
        }
    }
}

// ============================================================================
// Media: gallery, video, map
// ============================================================================

pub fn image_gallery(ctx: &RenderContext, block: &ImageGalleryBlock) -> Markup {
    let mut style = grid_columns(block.columns);
    style.push_str(&format!("; gap: {}px", block.gap.pixels()));
    if block.aspect_ratio != GalleryAspect::Original {
        style.push_str(&format!("; --tile-aspect: {}", block.aspect_ratio));
    }
    html! {
        section.block.block-gallery {
            (block_title(block.title.as_deref()))
            div class={ "gallery gallery-" (block.layout) }
                style=(style)
                data-carousel[block.layout == GalleryLayout::Carousel]
            {
                @for image in &block.images {
                    @let caption = non_empty(image.caption.as_deref()).filter(|_| block.show_captions);
                    figure.gallery-item {
                        @if block.enable_lightbox {
                            a.lightbox-link
                                href=(ctx.images.url(Some(image), Transform::width(HERO_WIDTH)))
                                data-lightbox
                                data-caption=[caption]
                            {
                                (cdn_image(ctx, Some(image), Transform::width(THUMB_WIDTH), ""))
                            }
                        } @else {
                            (cdn_image(ctx, Some(image), Transform::width(THUMB_WIDTH), ""))
                        }
                        @if let Some(caption) = caption {
                            figcaption { (caption) }
                        }
                    }
                }
            }
        }
    }
}

pub fn video(ctx: &RenderContext, block: &VideoBlock) -> Markup {
    let provider = match block.video_source {
        VideoSource::Youtube => Provider::Youtube,
        VideoSource::Vimeo => Provider::Vimeo,
    };
    let player = embed_url(provider, &block.url);
    let title = non_empty(block.title.as_deref());
    let poster = block
        .thumbnail
        .as_ref()
        .and_then(|thumb| ctx.images.source_url(thumb).map(|_| thumb));
    html! {
        section.block.block-video style={ "max-width: " (block.max_width.css()) } {
            (block_title(title))
            @match player {
                Some(src) => {
                    div.video-frame style={ "padding-bottom: " (aspect_padding(block.aspect_ratio.as_str())) } {
                        @if let Some(thumb) = poster {
                            div.video-poster {
                                (cdn_image(ctx, Some(thumb), Transform::width(CONTENT_WIDTH), title.unwrap_or("Video")))
                            }
                        }
                        iframe
                            src=(src)
                            title=(title.unwrap_or("Video"))
                            loading="lazy"
                            allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                            allowfullscreen {}
                    }
                }
                None => {
                    p.video-invalid role="alert" { "Invalid video URL" }
                }
            }
            @if let Some(caption) = non_empty(block.caption.as_deref()) {
                p.video-caption { (caption) }
            }
        }
    }
}

pub fn map(ctx: &RenderContext, block: &MapBlock) -> Markup {
    let height = block.height.pixels();
    let embed = block
        .embed_url
        .as_deref()
        .filter(|url| url.starts_with("https://") || url.starts_with("http://"));
    let show_list = block.show_location_list && !block.locations.is_empty();
    let mut class = format!("block block-map list-{}", block.location_list_position);
    if block.border_radius {
        class.push_str(" rounded");
    }
    html! {
        section class=(class) {
            (block_title(block.title.as_deref()))
            @if let Some(description) = non_empty(block.description.as_deref()) {
                p.map-description { (description) }
            }
            div.map-layout {
                div.map-frame style={ "height: " (height) "px" } {
                    @match (block.map_type, embed, block.static_image.as_ref()) {
                        (MapType::Embed, Some(url), _) => {
                            iframe src=(url) title=(block.title.as_deref().unwrap_or("Map"))
                                loading="lazy" referrerpolicy="no-referrer-when-downgrade" {}
                        }
                        (MapType::Static, _, Some(image)) => {
                            (cdn_image(ctx, Some(image), Transform::size(CONTENT_WIDTH, height), "Map"))
                        }
                        _ => {
                            p.map-unavailable { "Map not available" }
                        }
                    }
                }
                @if show_list {
                    ul.map-locations {
                        @for location in &block.locations {
                            li {
                                span.map-icon aria-hidden="true" { (location.icon.glyph()) }
                                strong { (location.name) }
                                @if let Some(address) = non_empty(location.address.as_deref()) {
                                    br;
                                    span.map-address { (address) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Marketing: stats, amenities, pricing, packages, testimonials
// ============================================================================

pub fn stats(ctx: &RenderContext, block: &StatsBlock) -> Markup {
    html! {
        section class={ "block block-stats stats-" (block.style) " align-" (block.alignment) } {
            (block_title(block.title.as_deref()))
            div.stats-grid style=(grid_columns(block.columns)) {
                @for stat in &block.stats {
                    div.stat {
                        @if stat.icon.is_some() {
                            (cdn_image(ctx, stat.icon.as_ref(), Transform::size(ICON_SIZE, ICON_SIZE), ""))
                        }
                        strong.stat-number { (stat.number) }
                        span.stat-label { (stat.label) }
                    }
                }
            }
        }
    }
}

pub fn amenities(ctx: &RenderContext, block: &AmenitiesBlock) -> Markup {
    let style = match block.layout {
        AmenityLayout::List => None,
        _ => Some(grid_columns(block.columns)),
    };
    html! {
        section class={ "block block-amenities amenities-" (block.layout) } {
            (block_title(block.title.as_deref()))
            ul.amenity-list style=[style] {
                @for amenity in &block.amenities {
                    li.amenity {
                        @if block.show_icons {
                            @if amenity.icon.is_some() {
                                (cdn_image(ctx, amenity.icon.as_ref(), Transform::size(ICON_SIZE, ICON_SIZE), ""))
                            } @else {
                                span.amenity-check aria-hidden="true" { "✓" }
                            }
                        }
                        span.amenity-name { (amenity.name) }
                        @if block.show_descriptions {
                            @if let Some(description) = non_empty(amenity.description.as_deref()) {
                                p.amenity-description { (description) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn pricing_cards(block: &PricingCardBlock) -> Markup {
    html! {
        section.block.block-pricing {
            (block_title(block.title.as_deref()))
            @if let Some(subtitle) = non_empty(block.subtitle.as_deref()) {
                p.block-subtitle { (subtitle) }
            }
            div.pricing-grid style=(grid_columns(block.columns)) {
                @for card in &block.cards {
                    article.pricing-card.highlighted[card.highlighted] {
                        @if let Some(badge) = non_empty(card.badge.as_deref()) {
                            span.chip.pricing-badge { (badge) }
                        }
                        h3 { (card.title) }
                        p.price {
                            strong { (card.price) }
                            @if let Some(period) = non_empty(card.period.as_deref()) {
                                span.price-period { " " (period) }
                            }
                        }
                        @if !card.features.is_empty() {
                            ul.features {
                                @for feature in &card.features {
                                    li { span aria-hidden="true" { "✓ " } (feature) }
                                }
                            }
                        }
                        (cta_button(card.cta.as_ref()))
                    }
                }
            }
        }
    }
}

fn booking_link(package: &TravelPackage) -> Markup {
    html! {
        @if let Some(url) = non_empty(package.booking_url.as_deref()) {
            a.btn.btn-primary href=(url) target="_blank" rel=(AFFILIATE_REL) {
                (package.booking_text)
            }
        }
    }
}

fn package_details(package: &TravelPackage) -> Markup {
    html! {
        @if !package.itinerary.is_empty() {
            details.package-itinerary {
                summary { "View Itinerary" }
                ol {
                    @for (i, day) in package.itinerary.iter().enumerate() {
                        li {
                            strong { "Day " (day.day.unwrap_or(i as u32 + 1)) ": " (day.title) }
                            @if let Some(description) = non_empty(day.description.as_deref()) {
                                p { (description) }
                            }
                        }
                    }
                }
            }
        }
        @if !package.included.is_empty() {
            div.package-included {
                h4 { "What's Included" }
                ul { @for item in &package.included { li { "✓ " (item) } } }
            }
        }
        @if !package.not_included.is_empty() {
            div.package-excluded {
                h4 { "Not Included" }
                ul { @for item in &package.not_included { li { "✕ " (item) } } }
            }
        }
    }
}

fn package_card(ctx: &RenderContext, package: &TravelPackage) -> Markup {
    html! {
        article.package-card.featured[package.featured] {
            div.card-media {
                (cdn_image(ctx, package.image.as_ref(), Transform::size(THUMB_WIDTH, 500), &package.package_name))
                @if package.featured {
                    span.chip.chip-featured { "★ Featured" }
                }
            }
            div.card-body {
                h3 { (package.package_name) }
                @if let Some(tagline) = non_empty(package.tagline.as_deref()) {
                    p.package-tagline { (tagline) }
                }
                @if !package.duration.is_empty() {
                    p.package-duration { "📅 " (package.duration) }
                }
                @if !package.highlights.is_empty() {
                    ul.features {
                        @for highlight in &package.highlights { li { "✓ " (highlight) } }
                    }
                }
                (package_details(package))
            }
            div.card-actions {
                @if let Some(price) = package.display_price() {
                    p.price {
                        span.price-from { "From " }
                        strong { (price) }
                        span.price-note { " " (package.price_note) }
                    }
                }
                (booking_link(package))
            }
        }
    }
}

fn package_comparison(packages: &[TravelPackage]) -> Markup {
    html! {
        div.table-scroll {
            table.package-comparison {
                thead {
                    tr {
                        th scope="col" { "Package" }
                        th scope="col" { "Duration" }
                        th scope="col" { "Price" }
                        th scope="col" { "Highlights" }
                        th scope="col" {}
                    }
                }
                tbody {
                    @for package in packages {
                        tr class=[package.featured.then_some("featured")] {
                            th scope="row" { (package.package_name) }
                            td { (package.duration) }
                            td {
                                @if let Some(price) = package.display_price() {
                                    (price) " " (package.price_note)
                                }
                            }
                            td { (package.highlights.join(", ")) }
                            td { (booking_link(package)) }
                        }
                    }
                }
            }
        }
    }
}

pub fn packages(ctx: &RenderContext, block: &PackageBlock) -> Markup {
    html! {
        section class={ "block block-packages packages-" (block.layout) } {
            (block_title(block.title.as_deref()))
            @if let Some(subtitle) = non_empty(block.subtitle.as_deref()) {
                p.block-subtitle { (subtitle) }
            }
            @match block.layout {
                PackageLayout::Cards => {
                    div.package-grid style=(grid_columns(block.columns)) {
                        @for package in &block.packages { (package_card(ctx, package)) }
                    }
                }
                PackageLayout::List => {
                    div.package-list {
                        @for package in &block.packages { (package_card(ctx, package)) }
                    }
                }
                PackageLayout::Comparison => {
                    (package_comparison(&block.packages))
                }
            }
        }
    }
}

/// Carousel slide interval in milliseconds.
const AUTOPLAY_MS: u32 = 5000;

pub fn testimonial_carousel(ctx: &RenderContext, block: &TestimonialCarouselBlock) -> Markup {
    let per_view = match block.layout {
        CarouselLayout::Single => 1,
        CarouselLayout::Multi => 3,
    };
    let count = block.testimonials.len();
    let autoplay = (block.autoplay && count > 1).then_some(AUTOPLAY_MS);
    html! {
        section.block.block-testimonials
            data-carousel
            data-per-view=(per_view)
            data-autoplay=[autoplay]
        {
            (block_title(block.title.as_deref()))
            div.carousel-track {
                @for (i, testimonial) in block.testimonials.iter().enumerate() {
                    figure.carousel-slide.testimonial data-slide=(i) hidden[i >= per_view] {
                        (stars(testimonial.rating))
                        blockquote { p { "\u{201C}" (testimonial.quote) "\u{201D}" } }
                        figcaption {
                            @if testimonial.author_image.is_some() {
                                span.avatar {
                                    (cdn_image(
                                        ctx,
                                        testimonial.author_image.as_ref(),
                                        Transform::size(AVATAR_SIZE, AVATAR_SIZE),
                                        &testimonial.author,
                                    ))
                                }
                            }
                            cite { (testimonial.author) }
                            @if let Some(location) = non_empty(testimonial.author_location.as_deref()) {
                                span.testimonial-location { (location) }
                            }
                        }
                    }
                }
            }
            @if block.show_navigation && count > per_view {
                button.carousel-prev type="button" aria-label="Previous testimonial" { "‹" }
                button.carousel-next type="button" aria-label="Next testimonial" { "›" }
            }
            @if block.show_indicators && count > per_view {
                div.carousel-indicators {
                    @for i in 0..count {
                        button.carousel-dot type="button" data-go=(i)
                            aria-label={ "Go to testimonial " (i + 1) } {}
                    }
                }
            }
        }
    }
}

// ============================================================================
// Weather
// ============================================================================

fn degrees(value: f64) -> String {
    format!("{}°", value.round() as i64)
}

fn weather_chart(block: &WeatherBlock) -> Markup {
    let metrics = block.show_metrics;
    let has_rainfall = block.monthly_data.iter().any(|m| m.rainfall.is_some());
    html! {
        @if metrics.temperature {
            div.weather-chart {
                h3 { "☀ Temperature Range" }
                @for month in &block.monthly_data {
                    div.chart-row {
                        span.chart-label { (month.month.chars().take(3).collect::<String>()) }
                        div.chart-track {
                            div.chart-bar.bar-temperature style={ "width: " (format!("{:.1}", block.bar_width(month))) "%" } {
                                (degrees(month.high_temp)) " / " (degrees(month.low_temp))
                            }
                        }
                    }
                }
            }
        }
        @if metrics.rainfall && has_rainfall {
            div.weather-chart {
                h3 { "☂ Rainfall" }
                @for month in &block.monthly_data {
                    @if let (Some(rainfall), Some(width)) = (month.rainfall, block.rainfall_width(month)) {
                        div.chart-row {
                            span.chart-label { (month.month.chars().take(3).collect::<String>()) }
                            div.chart-track {
                                div.chart-bar.bar-rainfall style={ "width: " (format!("{width:.1}")) "%" } {
                                    (format!("{rainfall:.0}")) "mm"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn weather_table(block: &WeatherBlock) -> Markup {
    let metrics = block.show_metrics;
    html! {
        div.table-scroll {
            table.weather-table {
                thead {
                    tr {
                        th scope="col" { "Month" }
                        @if metrics.temperature {
                            th scope="col" { "High" }
                            th scope="col" { "Low" }
                        }
                        @if metrics.rainfall { th scope="col" { "Rainfall" } }
                        @if metrics.rainy_days { th scope="col" { "Rainy Days" } }
                        @if metrics.humidity { th scope="col" { "Humidity" } }
                    }
                }
                tbody {
                    @for month in &block.monthly_data {
                        tr {
                            th scope="row" { (month.month) }
                            @if metrics.temperature {
                                td { (degrees(month.high_temp)) "F" }
                                td { (degrees(month.low_temp)) "F" }
                            }
                            @if metrics.rainfall {
                                td { @if let Some(r) = month.rainfall { (format!("{r:.0}")) "mm" } @else { "–" } }
                            }
                            @if metrics.rainy_days {
                                td { @if let Some(d) = month.rainy_days { (format!("{d:.0}")) } @else { "–" } }
                            }
                            @if metrics.humidity {
                                td { @if let Some(h) = month.humidity { (format!("{h:.0}")) "%" } @else { "–" } }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn weather_cards(block: &WeatherBlock) -> Markup {
    let metrics = block.show_metrics;
    html! {
        div.weather-cards {
            @for month in &block.monthly_data {
                div.weather-card {
                    h4 { (month.month) }
                    @if metrics.temperature {
                        strong.weather-high { (degrees(month.high_temp)) }
                        span.weather-low { "Low: " (degrees(month.low_temp)) "F" }
                    }
                    @if metrics.rainfall {
                        @if let Some(r) = month.rainfall { span { "☂ " (format!("{r:.0}")) "mm" } }
                    }
                    @if metrics.rainy_days {
                        @if let Some(d) = month.rainy_days { span { (format!("{d:.0}")) " rainy days" } }
                    }
                    @if metrics.humidity {
                        @if let Some(h) = month.humidity { span { "💧 " (format!("{h:.0}")) "%" } }
                    }
                }
            }
        }
    }
}

pub fn weather(block: &WeatherBlock) -> Markup {
    let best = block.best_time_to_visit.as_ref();
    html! {
        section class={ "block block-weather weather-" (block.background_color) }
            style={ "background: " (block.background_color.css()) }
        {
            div.weather-header {
                h2.block-title { (block.title) }
                @if !block.location_name.is_empty() {
                    p.weather-location { (block.location_name) }
                }
            }
            @if !block.monthly_data.is_empty() {
                @match block.display_style {
                    WeatherDisplay::Chart => { (weather_chart(block)) }
                    WeatherDisplay::Table => { (weather_table(block)) }
                    WeatherDisplay::Cards => { (weather_cards(block)) }
                }
            }
            @if let Some(best) = best {
                div.weather-best-time {
                    h3 { "Best Time to Visit" }
                    @if let Some(months) = non_empty(best.months.as_deref()) {
                        p { strong { (months) } }
                    }
                    @if let Some(description) = non_empty(best.description.as_deref()) {
                        p { (description) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Section wrapper
// ============================================================================

pub fn section_wrapper(ctx: &RenderContext, block: &SectionWrapperBlock, depth: usize) -> Markup {
    let mut style = format!(
        "background: {}; padding-top: {}px; padding-bottom: {}px",
        block.background_color.css(),
        block.padding_top.pixels(),
        block.padding_bottom.pixels()
    );
    if block.add_top_border {
        style.push_str("; border-top: 1px solid #e0e0e0");
    }
    if block.add_bottom_border {
        style.push_str("; border-bottom: 1px solid #e0e0e0");
    }
    let container = block
        .container_width
        .max_width()
        .map(|w| format!("max-width: {w}"));
    html! {
        section.block.block-section.on-dark[block.background_color.is_dark()] style=(style) {
            div.section-container style=[container] {
                (block_title(block.title.as_deref()))
                (render_at(ctx, &block.content, depth + 1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use serde_json::{Value, json};

    fn render(value: Value) -> String {
        let config = test_config();
        let ctx = test_context(&config);
        let block: Block = serde_json::from_value(value).unwrap();
        super::super::dispatch::render_block(&ctx, &block, 1).into_string()
    }

    // =========================================================================
    // Hero, image, heading
    // =========================================================================

    #[test]
    fn hero_height_and_background() {
        let html = render(json!({
            "_type": "heroBlock",
            "title": "Welcome to Mexico",
            "height": "large",
            "backgroundImage": {"asset": {"_ref": "image-abc-2000x1000-jpg"}},
        }));
        assert!(html.contains("min-height: 80vh"));
        assert!(html.contains("cdn.sanity.io/images/proj123/production/abc-2000x1000.jpg"));
        assert!(html.contains("hero-overlay"));
        assert!(html.contains("<h1 class=\"hero-title\">Welcome to Mexico</h1>"));
    }

    #[test]
    fn hero_without_image_has_no_overlay() {
        let html = render(json!({"_type": "heroBlock", "title": "Plain"}));
        assert!(html.contains("hero-plain"));
        assert!(!html.contains("hero-overlay"));
        assert!(!html.contains("background-image"));
    }

    #[test]
    fn missing_image_uses_placeholder() {
        let html = render(json!({"_type": "imageBlock", "size": "small"}));
        assert!(html.contains("/static/placeholder.svg"));
        assert!(html.contains("max-width: 600px"));
    }

    #[test]
    fn heading_level_picks_element() {
        let html = render(json!({"_type": "headingBlock", "text": "Hi", "level": "h3"}));
        assert!(html.starts_with("<h3 class=\"block block-heading heading-default align-left"));
    }

    // =========================================================================
    // Video and map
    // =========================================================================

    #[test]
    fn video_embeds_youtube_player() {
        let html = render(json!({
            "_type": "videoBlock",
            "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "aspectRatio": "4/3",
        }));
        assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(html.contains("padding-bottom: 75%"));
    }

    #[test]
    fn invalid_video_url_shows_notice() {
        let html = render(json!({"_type": "videoBlock", "videoSource": "vimeo", "url": "https://vimeo.com/about"}));
        assert!(html.contains("Invalid video URL"));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn map_falls_back_when_nothing_to_show() {
        let html = render(json!({"_type": "mapBlock", "mapType": "embed", "embedUrl": "javascript:alert(1)"}));
        assert!(html.contains("Map not available"));
        assert!(html.contains("height: 450px"));
    }

    #[test]
    fn map_lists_locations_with_icons() {
        let html = render(json!({
            "_type": "mapBlock",
            "embedUrl": "https://www.google.com/maps/embed?pb=x",
            "locations": [{"name": "Airport", "icon": "airport"}],
        }));
        assert!(html.contains("<iframe src=\"https://www.google.com/maps/embed?pb=x\""));
        assert!(html.contains("✈️"));
    }

    // =========================================================================
    // Interactive blocks
    // =========================================================================

    #[test]
    fn accordion_opens_first_item_only() {
        let html = render(json!({
            "_type": "accordionBlock",
            "items": [{"title": "One"}, {"title": "Two"}],
        }));
        assert_eq!(html.matches(" open").count(), 1);
        assert!(html.contains("data-single"));
    }

    #[test]
    fn tabs_show_first_panel() {
        let html = render(json!({
            "_type": "tabBlock",
            "tabs": [{"tabTitle": "Eat"}, {"tabTitle": "Sleep"}],
        }));
        assert_eq!(html.matches("aria-selected=\"true\"").count(), 1);
        assert_eq!(html.matches(" hidden").count(), 1);
    }

    #[test]
    fn carousel_autoplays_only_with_several_slides() {
        let html = render(json!({
            "_type": "testimonialCarouselBlock",
            "testimonials": [{"quote": "Great", "author": "Ana"}, {"quote": "Lovely", "author": "Luis"}],
        }));
        assert!(html.contains("data-autoplay=\"5000\""));
        assert!(html.contains("carousel-next"));

        let single = render(json!({
            "_type": "testimonialCarouselBlock",
            "testimonials": [{"quote": "Great", "author": "Ana"}],
        }));
        assert!(!single.contains("data-autoplay"));
        assert!(!single.contains("carousel-next"));
    }

    // =========================================================================
    // Marketing blocks
    // =========================================================================

    #[test]
    fn package_booking_link_is_sponsored() {
        let html = render(json!({
            "_type": "packageBlock",
            "packages": [{
                "packageName": "Riviera Week",
                "duration": "7 days",
                "price": 1299,
                "bookingUrl": "https://partner.example/book",
            }],
        }));
        assert!(html.contains("$1,299"));
        assert!(html.contains("per person"));
        assert!(html.contains("Book Now"));
        assert!(html.contains("nofollow sponsored"));
        assert!(html.contains("Travel Packages"));
    }

    #[test]
    fn package_comparison_is_a_table() {
        let html = render(json!({
            "_type": "packageBlock",
            "layout": "comparison",
            "packages": [{"packageName": "A"}, {"packageName": "B"}],
        }));
        assert!(html.contains("<table class=\"package-comparison\">"));
        assert_eq!(html.matches("<th scope=\"row\">").count(), 2);
    }

    #[test]
    fn pricing_highlight_and_badge() {
        let html = render(json!({
            "_type": "pricingCardBlock",
            "cards": [{"title": "Pro", "price": "$99", "badge": "Popular", "highlighted": true}],
        }));
        assert!(html.contains("pricing-card highlighted"));
        assert!(html.contains("Popular"));
    }

    #[test]
    fn weather_chart_bars_scale() {
        let html = render(json!({
            "_type": "weatherBlock",
            "monthlyData": [
                {"month": "January", "highTemp": 90, "lowTemp": 70},
                {"month": "February", "highTemp": 80, "lowTemp": 50},
            ],
        }));
        assert!(html.contains("width: 50.0%"));
        assert!(html.contains("width: 75.0%"));
        assert!(html.contains(">Jan<"));
        assert!(html.contains("Climate &amp; Weather"));
    }

    #[test]
    fn weather_table_honors_metric_toggles() {
        let html = render(json!({
            "_type": "weatherBlock",
            "displayStyle": "table",
            "showMetrics": {"temperature": true, "rainfall": false, "humidity": true},
            "monthlyData": [{"month": "March", "highTemp": 85, "lowTemp": 68, "humidity": 70}],
        }));
        assert!(html.contains("Humidity"));
        assert!(!html.contains("Rainfall"));
        assert!(html.contains("70%"));
    }

    #[test]
    fn section_wrapper_styles() {
        let html = render(json!({
            "_type": "sectionWrapperBlock",
            "backgroundColor": "primary.main",
            "paddingTop": "12",
            "containerWidth": "md",
            "addTopBorder": true,
            "content": [{"_type": "headingBlock", "text": "Inside"}],
        }));
        assert!(html.contains("background: var(--color-primary)"));
        assert!(html.contains("padding-top: 96px"));
        assert!(html.contains("max-width: 900px"));
        assert!(html.contains("border-top: 1px solid"));
        assert!(html.contains("on-dark"));
        assert!(html.contains("Inside"));
    }
}
