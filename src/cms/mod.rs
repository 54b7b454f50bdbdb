//! Content access: where documents come from and how they become typed records.
//!
//! A [`ContentSource`] answers [`ContentQuery`]s with raw JSON, already
//! projected and dereferenced the way the GROQ queries in [`queries`] do it.
//! Two sources exist:
//!
//! - [`HttpSource`](http::HttpSource) talks to the CMS query API.
//! - [`SnapshotSource`](snapshot::SnapshotSource) answers from an exported
//!   dataset file, for offline builds and tests.
//!
//! [`Content`] wraps a source with a [`Perspective`] and decodes answers into
//! the record types in [`documents`](crate::documents). Fetches are
//! sequential, read-only and never retried.

pub mod http;
pub mod queries;
pub mod snapshot;

use crate::documents::{Article, Destination, GlobalSettings, Navigation, Page, DRAFTS_PREFIX};
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("CMS project id is not configured (set cms.project_id or pass --snapshot)")]
    NotConfigured,
    #[error("draft content needs a read token in ${0}")]
    MissingToken(String),
    #[error("cannot read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot {path} (line {line}): {source}")]
    Snapshot {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Which revision of each document a read sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Perspective {
    /// Published documents only.
    #[default]
    Published,
    /// Drafts where they exist, published documents otherwise.
    Drafts,
}

impl Perspective {
    /// Value of the query API's `perspective` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Perspective::Published => "published",
            Perspective::Drafts => "previewDrafts",
        }
    }
}

/// The reads the site needs. Single-document queries answer `null` when
/// nothing matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentQuery {
    Settings,
    Navigation,
    Destinations,
    Destination { slug: String },
    Articles,
    Article { slug: String },
    Pages,
    Page { slug: String },
    /// Every content document, unprojected. Used by schema checks.
    AllDocuments,
}

impl ContentQuery {
    /// The `$slug` parameter, for queries that take one.
    pub fn slug(&self) -> Option<&str> {
        match self {
            ContentQuery::Destination { slug }
            | ContentQuery::Article { slug }
            | ContentQuery::Page { slug } => Some(slug),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentQuery::Settings => f.write_str("global settings"),
            ContentQuery::Navigation => f.write_str("navigation"),
            ContentQuery::Destinations => f.write_str("destinations"),
            ContentQuery::Destination { slug } => write!(f, "destination {slug:?}"),
            ContentQuery::Articles => f.write_str("articles"),
            ContentQuery::Article { slug } => write!(f, "article {slug:?}"),
            ContentQuery::Pages => f.write_str("pages"),
            ContentQuery::Page { slug } => write!(f, "page {slug:?}"),
            ContentQuery::AllDocuments => f.write_str("all documents"),
        }
    }
}

pub trait ContentSource: Send + Sync {
    /// Run `query` under `perspective` and return the projected JSON.
    fn fetch(&self, query: &ContentQuery, perspective: Perspective) -> Result<Value, CmsError>;

    /// Short human-readable origin, for logs and CLI output.
    fn describe(&self) -> String;

    /// `Ok` when [`Perspective::Drafts`] reads can succeed, otherwise the
    /// error every draft read would fail with.
    fn draft_support(&self) -> Result<(), CmsError> {
        Ok(())
    }
}

/// Typed reads over a [`ContentSource`].
#[derive(Clone, Copy)]
pub struct Content<'a> {
    source: &'a dyn ContentSource,
    perspective: Perspective,
}

impl<'a> Content<'a> {
    pub fn new(source: &'a dyn ContentSource, perspective: Perspective) -> Self {
        Self {
            source,
            perspective,
        }
    }

    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// Site settings. A failed or malformed fetch is logged and treated as
    /// "no settings" so pages still render with the configured defaults.
    pub fn settings(&self) -> Option<GlobalSettings> {
        self.optional(&ContentQuery::Settings)
    }

    /// Menus, with the same fallback as [`settings`](Self::settings).
    pub fn navigation(&self) -> Option<Navigation> {
        self.optional(&ContentQuery::Navigation)
    }

    pub fn destinations(&self) -> Result<Vec<Destination>, CmsError> {
        self.many(&ContentQuery::Destinations)
    }

    pub fn destination(&self, slug: &str) -> Result<Option<Destination>, CmsError> {
        self.one(&ContentQuery::Destination { slug: slug.into() })
    }

    pub fn articles(&self) -> Result<Vec<Article>, CmsError> {
        self.many(&ContentQuery::Articles)
    }

    pub fn article(&self, slug: &str) -> Result<Option<Article>, CmsError> {
        self.one(&ContentQuery::Article { slug: slug.into() })
    }

    pub fn pages(&self) -> Result<Vec<Page>, CmsError> {
        self.many(&ContentQuery::Pages)
    }

    pub fn page(&self, slug: &str) -> Result<Option<Page>, CmsError> {
        self.one(&ContentQuery::Page { slug: slug.into() })
    }

    /// Raw documents for schema validation.
    pub fn all_documents(&self) -> Result<Vec<Value>, CmsError> {
        let value = self.fetch(&ContentQuery::AllDocuments)?;
        Ok(self.visible(value))
    }

    fn fetch(&self, query: &ContentQuery) -> Result<Value, CmsError> {
        log::debug!(target: "cms", "fetching {query} ({})", self.perspective.as_str());
        self.source.fetch(query, self.perspective)
    }

    fn one<T: DeserializeOwned>(&self, query: &ContentQuery) -> Result<Option<T>, CmsError> {
        let value = self.fetch(query)?;
        if value.is_null() || (self.perspective == Perspective::Published && is_draft(&value)) {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| CmsError::Decode {
                what: query.to_string(),
                source,
            })
    }

    fn optional<T: DeserializeOwned>(&self, query: &ContentQuery) -> Option<T> {
        match self.one(query) {
            Ok(found) => found,
            Err(e) => {
                warn!(target: "cms", "{query} unavailable, using defaults: {e}");
                None
            }
        }
    }

    /// Decode a list item by item; items that don't decode are logged and
    /// dropped rather than failing the whole listing.
    fn many<T: DeserializeOwned>(&self, query: &ContentQuery) -> Result<Vec<T>, CmsError> {
        let value = self.fetch(query)?;
        Ok(self
            .visible(value)
            .into_iter()
            .filter_map(|item| {
                let id = document_id(&item).to_string();
                serde_json::from_value(item)
                    .map_err(|e| warn!(target: "cms", "skipping {id} in {query}: {e}"))
                    .ok()
            })
            .collect())
    }

    fn visible(&self, value: Value) -> Vec<Value> {
        let Value::Array(items) = value else {
            return Vec::new();
        };
        items
            .into_iter()
            .filter(|item| self.perspective == Perspective::Drafts || !is_draft(item))
            .collect()
    }
}

fn document_id(value: &Value) -> &str {
    value.get("_id").and_then(Value::as_str).unwrap_or("?")
}

fn is_draft(value: &Value) -> bool {
    document_id(value).starts_with(DRAFTS_PREFIX)
}
