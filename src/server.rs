//! Request-time rendering server.
//!
//! Serves the same routes the static build writes, rendered per request from
//! the content source, plus the draft-mode endpoints. Each request builds its
//! own [`RenderContext`]; nothing is shared between requests except the
//! read-only config and source. Content reads block, so rendering runs on
//! tokio's blocking pool.
//!
//! | Route | Response |
//! |-------|----------|
//! | `/`, `/destinations`, `/articles` | listings |
//! | `/destinations/{slug}`, `/articles/{slug}`, `/{slug}` | detail pages, 404 when missing |
//! | `/sitemap.xml`, `/robots.txt` | generated from published content |
//! | `/api/draft?secret=…&redirect=…` | 401 on a bad secret or when the source can't read drafts, else sets the draft cookie and redirects |
//! | `/api/disable-draft?redirect=…` | clears the draft cookie and redirects |

use crate::cms::{CmsError, Content, ContentSource, Perspective};
use crate::config::SiteConfig;
use crate::generate::PLACEHOLDER_SVG;
use crate::links::{is_page_slug, is_safe_slug};
use crate::preview::{DraftMode, sanitize_redirect};
use crate::render::{RenderContext, pages};
use crate::sitemap;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use log::{error, info, warn};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::signal;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

struct Inner {
    config: SiteConfig,
    source: Arc<dyn ContentSource>,
    draft: DraftMode,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    /// Draft mode configured from the environment.
    pub fn new(config: SiteConfig, source: Arc<dyn ContentSource>) -> Self {
        let draft = DraftMode::from_config(&config);
        Self::with_draft_mode(config, source, draft)
    }

    pub fn with_draft_mode(config: SiteConfig, source: Arc<dyn ContentSource>, draft: DraftMode) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                source,
                draft,
            }),
        }
    }
}

#[derive(Debug, Clone)]
enum Route {
    Home,
    Destinations,
    Destination(String),
    Articles,
    Article(String),
    Page(String),
}

#[derive(Debug, Deserialize)]
struct DraftParams {
    secret: Option<String>,
    redirect: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RedirectParams {
    redirect: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let sitemap_route = format!("/{}", state.inner.config.sitemap.filename);
    Router::new()
        .route("/", get(home))
        .route("/destinations", get(destinations))
        .route("/destinations/{slug}", get(destination))
        .route("/articles", get(articles))
        .route("/articles/{slug}", get(article))
        .route("/{slug}", get(page))
        .route(&sitemap_route, get(sitemap_xml))
        .route("/robots.txt", get(robots))
        .route("/static/placeholder.svg", get(placeholder))
        .route("/api/draft", get(enable_draft))
        .route("/api/disable-draft", get(disable_draft))
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn serve(config: SiteConfig, source: Arc<dyn ContentSource>) -> Result<(), ServeError> {
    let addr = (config.server.host.clone(), config.server.port);
    let state = AppState::new(config, source);
    if !state.inner.draft.is_available() {
        info!(
            target: "server",
            "draft mode disabled: ${} is not set",
            state.inner.config.preview.secret_env
        );
    }
    if state.inner.draft.is_available()
        && let Err(e) = state.inner.source.draft_support()
    {
        warn!(target: "server", "draft mode unavailable: {e}");
    }
    let listener = tokio::net::TcpListener::bind((addr.0.as_str(), addr.1)).await?;
    info!(target: "server", "listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(target: "server", "shutting down");
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(req).await;
    info!(
        target: "server",
        "{method} {uri} {} {}ms",
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

// ============================================================================
// Pages
// ============================================================================

fn draft_enabled(state: &AppState, headers: &HeaderMap) -> bool {
    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    state.inner.draft.is_enabled(cookie)
}

/// Render `route`; `None` when the document doesn't exist.
fn render_route(inner: &Inner, route: &Route, draft: bool) -> Result<Option<String>, CmsError> {
    let perspective = if draft {
        Perspective::Drafts
    } else {
        Perspective::Published
    };
    let content = Content::new(inner.source.as_ref(), perspective);
    let ctx = RenderContext::load(&inner.config, &content, draft);
    let markup = match route {
        Route::Home => {
            let destinations = pages::order_destinations(content.destinations()?);
            let articles = pages::order_articles(content.articles()?);
            let home = content.page(pages::HOME_SLUG)?;
            pages::home(&ctx, home.as_ref(), &destinations, &articles)
        }
        Route::Destinations => {
            pages::destinations_index(&ctx, &pages::order_destinations(content.destinations()?))
        }
        Route::Articles => pages::articles_index(&ctx, &pages::order_articles(content.articles()?)),
        Route::Destination(slug) | Route::Article(slug) if !is_safe_slug(slug) => return Ok(None),
        Route::Destination(slug) => match content.destination(slug)? {
            Some(d) => pages::destination_detail(&ctx, &d),
            None => return Ok(None),
        },
        Route::Article(slug) => match content.article(slug)? {
            Some(a) => pages::article_detail(&ctx, &a),
            None => return Ok(None),
        },
        // The home page document is only served at `/`; reserved slugs are
        // never built, so they are never served either.
        Route::Page(slug) if slug == pages::HOME_SLUG || !is_page_slug(slug) => return Ok(None),
        Route::Page(slug) => match content.page(slug)? {
            Some(p) => pages::page(&ctx, &p),
            None => return Ok(None),
        },
    };
    Ok(Some(markup.into_string()))
}

fn render_not_found(inner: &Inner, draft: bool) -> String {
    let perspective = if draft {
        Perspective::Drafts
    } else {
        Perspective::Published
    };
    let content = Content::new(inner.source.as_ref(), perspective);
    let ctx = RenderContext::load(&inner.config, &content, draft);
    pages::not_found(&ctx).into_string()
}

fn html_response(status: StatusCode, body: String, draft: bool) -> Response {
    let mut response = (status, Html(body)).into_response();
    if draft {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    response
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

async fn respond(state: AppState, headers: HeaderMap, route: Route) -> Response {
    let draft = draft_enabled(&state, &headers);
    let inner = Arc::clone(&state.inner);
    let rendered = tokio::task::spawn_blocking(move || {
        render_route(&inner, &route, draft).map(|found| {
            found.map(|html| (StatusCode::OK, html)).unwrap_or_else(|| {
                (StatusCode::NOT_FOUND, render_not_found(&inner, draft))
            })
        })
    })
    .await;
    match rendered {
        Ok(Ok((status, html))) => html_response(status, html, draft),
        Ok(Err(e)) => {
            error!(target: "server", "content error: {e}");
            internal_error()
        }
        Err(e) => {
            error!(target: "server", "render task failed: {e}");
            internal_error()
        }
    }
}

async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    respond(state, headers, Route::Home).await
}

async fn destinations(State(state): State<AppState>, headers: HeaderMap) -> Response {
    respond(state, headers, Route::Destinations).await
}

async fn destination(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    respond(state, headers, Route::Destination(slug)).await
}

async fn articles(State(state): State<AppState>, headers: HeaderMap) -> Response {
    respond(state, headers, Route::Articles).await
}

async fn article(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    respond(state, headers, Route::Article(slug)).await
}

async fn page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    respond(state, headers, Route::Page(slug)).await
}

async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let draft = draft_enabled(&state, &headers);
    let inner = Arc::clone(&state.inner);
    match tokio::task::spawn_blocking(move || render_not_found(&inner, draft)).await {
        Ok(html) => html_response(StatusCode::NOT_FOUND, html, draft),
        Err(e) => {
            error!(target: "server", "render task failed: {e}");
            internal_error()
        }
    }
}

// ============================================================================
// Sitemap, robots, assets
// ============================================================================

fn build_sitemap(inner: &Inner) -> Result<String, CmsError> {
    let content = Content::new(inner.source.as_ref(), Perspective::Published);
    let entries = sitemap::entries(
        inner.config.base_url(),
        &content.destinations()?,
        &content.articles()?,
        &content.pages()?,
    );
    Ok(sitemap::render(&entries))
}

async fn sitemap_xml(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !state.inner.config.sitemap.enabled {
        return not_found(State(state), headers).await;
    }
    let inner = Arc::clone(&state.inner);
    match tokio::task::spawn_blocking(move || build_sitemap(&inner)).await {
        Ok(Ok(xml)) => ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response(),
        Ok(Err(e)) => {
            error!(target: "sitemap", "content error: {e}");
            internal_error()
        }
        Err(e) => {
            error!(target: "sitemap", "sitemap task failed: {e}");
            internal_error()
        }
    }
}

async fn robots(State(state): State<AppState>) -> Response {
    let config = &state.inner.config;
    let body = sitemap::robots_txt(
        config.base_url(),
        config.sitemap.enabled.then_some(config.sitemap.filename.as_str()),
    );
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

async fn placeholder() -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        PLACEHOLDER_SVG,
    )
        .into_response()
}

// ============================================================================
// Draft mode
// ============================================================================

async fn enable_draft(State(state): State<AppState>, Query(params): Query<DraftParams>) -> Response {
    let draft = &state.inner.draft;
    let secret = params.secret.unwrap_or_default();
    let cookie = match draft.enable_cookie() {
        Some(cookie) if draft.check_secret(&secret) => cookie,
        _ => return (StatusCode::UNAUTHORIZED, "Invalid secret").into_response(),
    };
    // A cookie the source can't honour would turn every page into a 500.
    if let Err(e) = state.inner.source.draft_support() {
        warn!(target: "server", "refusing draft mode: {e}");
        return (StatusCode::UNAUTHORIZED, "Draft mode unavailable").into_response();
    }
    let to = sanitize_redirect(params.redirect.as_deref());
    info!(target: "server", "draft mode enabled, redirecting to {to}");
    ([(header::SET_COOKIE, cookie)], Redirect::temporary(&to)).into_response()
}

async fn disable_draft(
    State(state): State<AppState>,
    Query(params): Query<RedirectParams>,
) -> Response {
    let to = sanitize_redirect(params.redirect.as_deref());
    (
        [(header::SET_COOKIE, state.inner.draft.clear_cookie())],
        Redirect::temporary(&to),
    )
        .into_response()
}
