//! Rich text to HTML.
//!
//! Text blocks map onto `p`, `h2`–`h4` and `blockquote`; consecutive list
//! items become one `ul`/`ol`. Span marks nest in the order the editor
//! applied them: decorators (`strong`, `em`, `code`) by name, annotations by
//! key into the block's `markDefs`. Unknown marks leave the text unwrapped;
//! unknown members are skipped with a warning.

use super::RenderContext;
use crate::embed::youtube_id;
use crate::image::Transform;
use crate::links::resolve_mark;
use crate::portable_text::{CalloutKind, Group, ListKind, Node, StyledBlock, group_lists};
use log::warn;
use maud::{Markup, html};

const INLINE_IMAGE_WIDTH: u32 = 800;

pub fn render(ctx: &RenderContext, nodes: &[Node]) -> Markup {
    html! {
        @for group in group_lists(nodes) {
            @match group {
                Group::List { kind: ListKind::Bullet, items } => {
                    ul { @for item in items { li { (spans(item)) } } }
                }
                Group::List { kind: ListKind::Number, items } => {
                    ol { @for item in items { li { (spans(item)) } } }
                }
                Group::Node(node) => (render_node(ctx, node)),
            }
        }
    }
}

fn render_node(ctx: &RenderContext, node: &Node) -> Markup {
    match node {
        Node::Text(block) => text_block(block),
        Node::Image(image) => {
            let src = ctx.images.url(Some(image), Transform::width(INLINE_IMAGE_WIDTH));
            html! {
                figure.pt-image {
                    img src=(src) alt=(image.alt_text()) loading="lazy";
                    @if let Some(caption) = image.caption.as_deref().filter(|c| !c.is_empty()) {
                        figcaption { (caption) }
                    }
                }
            }
        }
        Node::Callout(callout) => {
            let severity = match callout.kind {
                CalloutKind::Info => "info",
                CalloutKind::Tip | CalloutKind::Success => "success",
                CalloutKind::Warning => "warning",
            };
            html! {
                aside class={ "callout callout-" (severity) } role="note" {
                    @if let Some(title) = callout.title.as_deref().filter(|t| !t.is_empty()) {
                        strong.callout-title { (title) }
                    }
                    @if let Some(content) = callout.content.as_deref() {
                        p { (content) }
                    }
                }
            }
        }
        Node::Youtube(embed) => match youtube_id(&embed.url) {
            Some(id) => html! {
                figure.pt-video {
                    div.video-frame style="padding-bottom: 56.25%" {
                        iframe
                            src={ "https://www.youtube.com/embed/" (id) }
                            title="YouTube video"
                            loading="lazy"
                            allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                            allowfullscreen {}
                    }
                    @if let Some(caption) = embed.caption.as_deref().filter(|c| !c.is_empty()) {
                        figcaption { (caption) }
                    }
                }
            },
            None => {
                warn!(target: "render", "skipping YouTube embed without a video id: {:?}", embed.url);
                html! {}
            }
        },
        Node::Unknown { kind } => {
            warn!(target: "render", "skipping rich-text member with unknown type {kind:?}");
            html! {}
        }
        Node::Malformed { kind, error } => {
            warn!(target: "render", "skipping malformed rich-text {kind}: {error}");
            html! {}
        }
    }
}

fn text_block(block: &StyledBlock) -> Markup {
    let content = spans(block);
    match block.style.as_str() {
        "h2" => html! { h2 { (content) } },
        "h3" => html! { h3 { (content) } },
        "h4" => html! { h4 { (content) } },
        "blockquote" => html! { blockquote { (content) } },
        _ => html! { p { (content) } },
    }
}

fn spans(block: &StyledBlock) -> Markup {
    html! {
        @for span in &block.children {
            (marked(block, &span.text, &span.marks))
        }
    }
}

/// Wrap `text` in its marks, outermost first.
fn marked(block: &StyledBlock, text: &str, marks: &[String]) -> Markup {
    let Some((mark, inner_marks)) = marks.split_first() else {
        return html! { (text) };
    };
    let inner = marked(block, text, inner_marks);
    match mark.as_str() {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "code" => html! { code { (inner) } },
        "underline" => html! { u { (inner) } },
        "strike-through" => html! { s { (inner) } },
        key => match block.mark_def(key).and_then(resolve_mark) {
            Some(link) => super::components::link(&link, None, inner),
            None => inner,
        },
    }
}
