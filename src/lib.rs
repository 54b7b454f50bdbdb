//! # Resort Site
//!
//! A travel site for destinations across Mexico, rendered from content kept
//! in a headless CMS. Editors compose pages from typed blocks; this crate
//! fetches those documents, resolves their links and images, and renders
//! them to HTML either ahead of time (`build`) or per request (`serve`).
//!
//! # Architecture
//!
//! ```text
//! ContentSource (HTTP API | snapshot file)
//!        │ raw JSON, references dereferenced
//!        ▼
//! Content + documents    typed records, lenient decoding
//!        │
//!        ▼
//! render::pages          one pure function per route
//!        │
//!        ├──▶ generate   dist/ + sitemap.xml + robots.txt
//!        └──▶ server     per-request HTML, draft mode
//! ```
//!
//! Rendering never touches the network or the filesystem. Everything a page
//! needs arrives in a [`render::RenderContext`] and the page's own documents,
//! which is what lets the build render routes in parallel and makes its
//! output byte-identical for identical content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`cms`] | Content sources, GROQ queries, perspectives, typed reads |
//! | [`documents`] | Document records: destinations, articles, pages, settings, menus |
//! | [`blocks`] | The page-builder block catalog and its option lists |
//! | [`portable_text`] | Rich-text nodes, marks and list grouping |
//! | [`links`] | Internal / external / affiliate link resolution |
//! | [`image`] | CDN image URL builder |
//! | [`embed`] | Video and map embed URLs |
//! | [`theme`] | Theme tokens from settings, CSS custom properties |
//! | [`seo`] | Page metadata and JSON-LD |
//! | [`render`] | HTML for blocks, layout and routes |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` |
//! | [`generate`] | Static build into the output directory |
//! | [`preview`] | Draft-mode secret and cookie handling |
//! | [`server`] | axum server for request-time rendering |
//! | [`schema`] | Content type registry and document validation |
//! | [`config`] | `site.toml` loading, merging and validation |
//! | [`output`] | CLI inventory output |
//! | [`logging`] | `env_logger` setup |
//!
//! # Design Decisions
//!
//! ## Lenient Decoding
//!
//! Editors leave fields empty, the CMS sends `null` for missing projections,
//! and option lists change over time. Records decode with defaults rather
//! than failing, and a block that can't be decoded is skipped with a warning
//! instead of taking the page down with it.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Templates are
//! Rust code checked at compile time, and every interpolated value is
//! escaped, which matters when most of the text comes from a CMS.

pub(crate) mod choice;

pub mod blocks;
pub mod cms;
pub mod config;
pub mod documents;
pub mod embed;
pub mod generate;
pub mod image;
pub mod links;
pub mod logging;
pub mod output;
pub mod portable_text;
pub mod preview;
pub mod render;
pub mod schema;
pub mod seo;
pub mod server;
pub mod sitemap;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
