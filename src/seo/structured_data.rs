//! schema.org JSON-LD documents.
//!
//! Organization and WebSite go on every page; BreadcrumbList, Article and
//! TouristDestination on the pages they describe. Absent optional values are
//! dropped rather than emitted as `null`.

use super::{Crumb, SiteInfo};
use crate::documents::{Article, Destination};
use serde_json::{Value, json};

const CONTEXT: &str = "https://schema.org";

pub fn organization(site: &SiteInfo) -> Value {
    compact(json!({
        "@context": CONTEXT,
        "@type": "Organization",
        "name": site.name,
        "description": site.description,
        "url": site.base_url,
        "logo": site.logo,
        "sameAs": site.same_as,
    }))
}

pub fn website(site: &SiteInfo) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "WebSite",
        "name": site.name,
        "description": site.description,
        "url": site.base_url,
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{}/search?q={{search_term_string}}", site.base_url),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

pub fn breadcrumbs(site: &SiteInfo, trail: &[Crumb]) -> Value {
    let items: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.label,
                "item": site.url(&crumb.href),
            })
        })
        .collect();
    json!({
        "@context": CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

pub fn article(site: &SiteInfo, article: &Article, image: Option<&str>) -> Value {
    let published = article.published_at.map(|t| t.to_rfc3339());
    let modified = article.modified_at().map(|t| t.to_rfc3339()).or(published.clone());
    compact(json!({
        "@context": CONTEXT,
        "@type": "Article",
        "headline": article.title,
        "description": article.excerpt,
        "author": article.author_name().map(|name| json!({"@type": "Person", "name": name})),
        "datePublished": published,
        "dateModified": modified,
        "image": image.map(str::to_string).or(site.default_image.clone()),
        "url": site.url(&format!("/articles/{}", article.slug.current)),
        "publisher": {
            "@type": "Organization",
            "name": site.name,
            "logo": site.logo.as_ref().map(|url| json!({"@type": "ImageObject", "url": url})),
        },
    }))
}

pub fn destination(site: &SiteInfo, destination: &Destination, image: Option<&str>) -> Value {
    let address = destination.location.as_ref().map(|loc| {
        json!({
            "@type": "PostalAddress",
            "addressLocality": loc.city,
            "addressRegion": loc.state,
            "addressCountry": "MX",
        })
    });
    let geo = destination
        .location
        .as_ref()
        .and_then(|loc| loc.coordinates.as_ref())
        .map(|point| {
            json!({
                "@type": "GeoCoordinates",
                "latitude": point.lat,
                "longitude": point.lng,
            })
        });
    compact(json!({
        "@context": CONTEXT,
        "@type": "TouristDestination",
        "name": destination.name,
        "description": destination.summary(),
        "image": image.map(str::to_string).or(site.default_image.clone()),
        "url": site.url(&format!("/destinations/{}", destination.slug.current)),
        "address": address,
        "geo": geo,
    }))
}

/// Drop `null` members and empty arrays, recursively.
fn compact(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null() && !v.as_array().is_some_and(Vec::is_empty))
                .map(|(k, v)| (k, compact(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(compact).collect()),
        other => other,
    }
}

/// Serialize for an inline `<script type="application/ld+json">`; `</` is
/// escaped so content can't close the script element.
pub fn to_script(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
