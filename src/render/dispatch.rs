//! Block dispatch: one renderer per discriminator.
//!
//! Records are rendered in order with no coupling between them. Records the
//! renderer can't use (unknown discriminator, fields that don't decode) are
//! skipped with a warning. Section wrappers dispatch their own content one
//! level deeper; past `render.max_block_depth` the nested content is skipped.

use super::RenderContext;
use super::blocks;
use crate::blocks::{Block, BlockEntry};
use log::warn;
use maud::{Markup, html};

/// Render a page's top-level block array.
pub fn render_blocks(ctx: &RenderContext, entries: &[BlockEntry]) -> Markup {
    render_at(ctx, entries, 1)
}

/// Render a block array found at nesting `depth` (top level is 1).
pub(crate) fn render_at(ctx: &RenderContext, entries: &[BlockEntry], depth: usize) -> Markup {
    let max = ctx.config.render.max_block_depth;
    if depth > max {
        if !entries.is_empty() {
            warn!(
                target: "render",
                "skipping {} nested block(s) at depth {depth} (max_block_depth = {max})",
                entries.len()
            );
        }
        return html! {};
    }
    html! {
        @for entry in entries {
            (render_entry(ctx, entry, depth))
        }
    }
}

fn render_entry(ctx: &RenderContext, entry: &BlockEntry, depth: usize) -> Markup {
    match entry {
        BlockEntry::Known(block) => render_block(ctx, block, depth),
        BlockEntry::Unknown { kind } => {
            warn!(target: "render", "skipping block with unknown type {kind:?}");
            html! {}
        }
        BlockEntry::Malformed { kind, error } => {
            warn!(target: "render", "skipping malformed {kind}: {error}");
            html! {}
        }
    }
}

pub fn render_block(ctx: &RenderContext, block: &Block, depth: usize) -> Markup {
    match block {
        Block::HeroBlock(b) => blocks::hero(ctx, b),
        Block::TextBlock(b) => blocks::text(ctx, b),
        Block::ImageBlock(b) => blocks::image(ctx, b),
        Block::DestinationGridBlock(b) => blocks::destination_grid(ctx, b),
        Block::CtaBlock(b) => blocks::cta(ctx, b),
        Block::HeadingBlock(b) => blocks::heading(b),
        Block::SpacerBlock(b) => blocks::spacer(b),
        Block::BannerAlertBlock(b) => blocks::banner_alert(b),
        Block::QuoteBlock(b) => blocks::quote(ctx, b),
        Block::TwoColumnTextBlock(b) => blocks::two_column_text(ctx, b),
        Block::TextImageBlock(b) => blocks::text_image(ctx, b),
        Block::CardGridBlock(b) => blocks::card_grid(ctx, b),
        Block::AccordionBlock(b) => blocks::accordion(ctx, b),
        Block::TabBlock(b) => blocks::tabs(ctx, b),
        Block::ImageGalleryBlock(b) => blocks::image_gallery(ctx, b),
        Block::VideoBlock(b) => blocks::video(ctx, b),
        Block::MapBlock(b) => blocks::map(ctx, b),
        Block::StatsBlock(b) => blocks::stats(ctx, b),
        Block::AmenitiesBlock(b) => blocks::amenities(ctx, b),
        Block::PricingCardBlock(b) => blocks::pricing_cards(b),
        Block::PackageBlock(b) => blocks::packages(ctx, b),
        Block::TestimonialCarouselBlock(b) => blocks::testimonial_carousel(ctx, b),
        Block::WeatherBlock(b) => blocks::weather(b),
        Block::SectionWrapperBlock(b) => blocks::section_wrapper(ctx, b, depth),
    }
}
