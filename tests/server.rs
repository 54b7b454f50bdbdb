//! Drives the router in-process against the fixture dataset.

use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use resort_site::cms::snapshot::SnapshotSource;
use resort_site::cms::{CmsError, ContentQuery, ContentSource, Perspective};
use resort_site::config::SiteConfig;
use resort_site::preview::DraftMode;
use resort_site::server::{AppState, router};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "s3cret";

fn fixture_documents() -> Vec<Value> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/snapshot.json");
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Router over the fixture plus `extra` documents.
fn app_with(extra: Vec<Value>) -> axum::Router {
    let mut documents = fixture_documents();
    documents.extend(extra);
    let source = Arc::new(SnapshotSource::from_documents(documents));
    let config = SiteConfig {
        site_url: "https://resort.example".into(),
        ..SiteConfig::default()
    };
    let draft = DraftMode::new(Some(SECRET.into()), "draft_mode", false);
    router(AppState::with_draft_mode(config, source, draft))
}

async fn send(app: axum::Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
}

async fn get(uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app_with(Vec::new()), uri, cookie).await
}

fn page(slug: &str, text: &str) -> Value {
    json!({
        "_id": format!("page-{}", slug.replace('/', "-")),
        "_type": "page",
        "_updatedAt": "2024-06-01T00:00:00Z",
        "title": text,
        "slug": {"_type": "slug", "current": slug},
        "blocks": [{"_key": "h", "_type": "headingBlock", "text": text, "level": "h1"}]
    })
}

/// A source that serves published content only, like the HTTP API without a
/// read token.
struct PublishedOnly(SnapshotSource);

impl ContentSource for PublishedOnly {
    fn fetch(&self, query: &ContentQuery, perspective: Perspective) -> Result<Value, CmsError> {
        if perspective == Perspective::Drafts {
            self.draft_support()?;
        }
        self.0.fetch(query, perspective)
    }

    fn describe(&self) -> String {
        "published only".into()
    }

    fn draft_support(&self) -> Result<(), CmsError> {
        Err(CmsError::MissingToken("SANITY_API_TOKEN".into()))
    }
}

async fn body(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn header_value<'a>(response: &'a Response<Body>, name: header::HeaderName) -> &'a str {
    response.headers().get(name).unwrap().to_str().unwrap()
}

/// `name=value` part of the Set-Cookie header the draft endpoint returns.
async fn draft_cookie() -> String {
    let response = get(&format!("/api/draft?secret={SECRET}"), None).await;
    let set_cookie = header_value(&response, header::SET_COOKIE);
    set_cookie.split(';').next().unwrap().to_string()
}

// =========================================================================
// Public routes
// =========================================================================

#[tokio::test]
async fn renders_listing_and_detail_pages() {
    let home = get("/", None).await;
    assert_eq!(home.status(), StatusCode::OK);
    assert!(body(home).await.contains("Discover Mexico"));

    let cancun = get("/destinations/cancun", None).await;
    assert_eq!(cancun.status(), StatusCode::OK);
    assert!(header_value(&cancun, header::CONTENT_TYPE).starts_with("text/html"));
    assert!(body(cancun).await.contains("Cancún"));

    let about = get("/about", None).await;
    assert_eq!(about.status(), StatusCode::OK);
    assert!(body(about).await.contains("We have been exploring Mexico since 2015."));
}

#[tokio::test]
async fn missing_documents_are_404() {
    for uri in ["/destinations/atlantis", "/articles/nope", "/nope", "/home", "/a/b/c"] {
        let response = get(uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(body(response).await.contains("Page Not Found"), "{uri}");
    }
}

#[tokio::test]
async fn sitemap_and_robots() {
    let sitemap = get("/sitemap.xml", None).await;
    assert_eq!(sitemap.status(), StatusCode::OK);
    assert!(header_value(&sitemap, header::CONTENT_TYPE).starts_with("application/xml"));
    let xml = body(sitemap).await;
    assert_eq!(xml.matches("<url>").count(), 9);

    let robots = get("/robots.txt", None).await;
    assert!(body(robots).await.contains("Sitemap: https://resort.example/sitemap.xml"));
}

#[tokio::test]
async fn pages_on_built_in_routes_are_neither_listed_nor_served() {
    let extra = || {
        vec![
            page("destinations", "Shadow listing"),
            page("404", "Shadow missing"),
            page("a/b", "Nested"),
        ]
    };

    let sitemap = body(send(app_with(extra()), "/sitemap.xml", None).await).await;
    assert_eq!(sitemap.matches("<url>").count(), 9);
    assert_eq!(
        sitemap
            .matches("<loc>https://resort.example/destinations</loc>")
            .count(),
        1
    );
    assert!(!sitemap.contains("/a/b"));
    assert!(!sitemap.contains("/404"));

    let listing = body(send(app_with(extra()), "/destinations", None).await).await;
    assert!(!listing.contains("Shadow listing"));

    let missing = send(app_with(extra()), "/404", None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert!(!body(missing).await.contains("Shadow missing"));
}

#[tokio::test]
async fn placeholder_image_is_served() {
    let response = get("/static/placeholder.svg", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "image/svg+xml");
}

// =========================================================================
// Draft mode
// =========================================================================

#[tokio::test]
async fn wrong_secret_is_rejected() {
    for uri in ["/api/draft?secret=wrong", "/api/draft"] {
        let response = get(uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body(response).await, "Invalid secret");
    }
}

#[tokio::test]
async fn valid_secret_sets_cookie_and_redirects() {
    let response = get(&format!("/api/draft?secret={SECRET}&redirect=/about"), None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(header_value(&response, header::LOCATION), "/about");
    assert!(header_value(&response, header::SET_COOKIE).starts_with("draft_mode="));
}

#[tokio::test]
async fn foreign_redirects_go_home() {
    let response = get(&format!("/api/draft?secret={SECRET}&redirect=//evil.example"), None).await;
    assert_eq!(header_value(&response, header::LOCATION), "/");
}

#[tokio::test]
async fn drafts_need_the_cookie() {
    let hidden = get("/secret-sale", None).await;
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

    let cookie = draft_cookie().await;
    let shown = get("/secret-sale", Some(&cookie)).await;
    assert_eq!(shown.status(), StatusCode::OK);
    assert_eq!(header_value(&shown, header::CACHE_CONTROL), "no-store");
    let html = body(shown).await;
    assert!(html.contains("Coming soon"));
    assert!(html.contains("draft-banner"));
    assert!(html.contains("noindex, nofollow"));

    let forged = get("/secret-sale", Some("draft_mode=forged")).await;
    assert_eq!(forged.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn draft_mode_is_refused_when_drafts_cannot_be_read() {
    let source = Arc::new(PublishedOnly(SnapshotSource::from_documents(fixture_documents())));
    let draft = DraftMode::new(Some(SECRET.into()), "draft_mode", false);
    let app = router(AppState::with_draft_mode(SiteConfig::default(), source, draft));
    let response = send(app, &format!("/api/draft?secret={SECRET}"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body(response).await, "Draft mode unavailable");
}

#[tokio::test]
async fn disable_draft_clears_cookie() {
    let response = get("/api/disable-draft?redirect=/destinations", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(header_value(&response, header::LOCATION), "/destinations");
    assert!(header_value(&response, header::SET_COOKIE).contains("Max-Age=0"));
}
