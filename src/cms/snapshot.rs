//! Offline content source backed by a dataset export.
//!
//! Accepts either a JSON array of documents or NDJSON (one document per line,
//! the CMS export format). Queries are answered the way the GROQ projections
//! would: filtered by type and slug, ordered, and with `{_ref}` objects
//! replaced by the referenced document.
//!
//! Dereferencing is bounded to [`MAX_REF_DEPTH`] levels and never re-enters a
//! document already on the current path, so reference cycles
//! (`A.related -> B.related -> A`) leave the inner reference unresolved
//! instead of recursing forever.

use super::{CmsError, ContentQuery, ContentSource, Perspective};
use crate::documents::DRAFTS_PREFIX;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const MAX_REF_DEPTH: usize = 3;

pub struct SnapshotSource {
    origin: PathBuf,
    documents: Vec<Value>,
    by_id: HashMap<String, usize>,
}

impl SnapshotSource {
    pub fn load(path: &Path) -> Result<Self, CmsError> {
        let text = std::fs::read_to_string(path).map_err(|source| CmsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let documents = parse_documents(&text, path)?;
        let mut source = Self::from_documents(documents);
        source.origin = path.to_path_buf();
        Ok(source)
    }

    pub fn from_documents(documents: Vec<Value>) -> Self {
        let by_id = documents
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| Some((doc.get("_id")?.as_str()?.to_string(), i)))
            .collect();
        Self {
            origin: PathBuf::from("<memory>"),
            documents,
            by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The document `id` resolves to under `perspective`: its draft when
    /// reading drafts and one exists, otherwise the published revision.
    fn lookup(&self, id: &str, perspective: Perspective) -> Option<&Value> {
        let published = id.strip_prefix(DRAFTS_PREFIX).unwrap_or(id);
        if perspective == Perspective::Drafts
            && let Some(&i) = self.by_id.get(&format!("{DRAFTS_PREFIX}{published}"))
        {
            return Some(&self.documents[i]);
        }
        self.by_id.get(published).map(|&i| &self.documents[i])
    }

    /// One revision per document, as `perspective` sees it.
    fn visible(&self, perspective: Perspective) -> Vec<&Value> {
        self.documents
            .iter()
            .filter(|doc| {
                let id = doc.get("_id").and_then(Value::as_str).unwrap_or_default();
                match perspective {
                    Perspective::Published => !id.starts_with(DRAFTS_PREFIX),
                    // A published document is shadowed by its draft.
                    Perspective::Drafts => {
                        id.starts_with(DRAFTS_PREFIX)
                            || !self.by_id.contains_key(&format!("{DRAFTS_PREFIX}{id}"))
                    }
                }
            })
            .collect()
    }

    fn of_type(&self, doc_type: &str, perspective: Perspective) -> Vec<&Value> {
        self.visible(perspective)
            .into_iter()
            .filter(|doc| doc.get("_type").and_then(Value::as_str) == Some(doc_type))
            .collect()
    }

    fn with_slugs(&self, doc_type: &str, perspective: Perspective) -> Vec<&Value> {
        self.of_type(doc_type, perspective)
            .into_iter()
            .filter(|doc| !slug_of(doc).is_empty())
            .collect()
    }

    fn by_slug(&self, doc_type: &str, slug: &str, perspective: Perspective) -> Value {
        self.of_type(doc_type, perspective)
            .into_iter()
            .find(|doc| slug_of(doc) == slug)
            .map_or(Value::Null, |doc| self.resolve_document(doc, perspective))
    }

    fn first(&self, doc_type: &str, perspective: Perspective) -> Value {
        self.of_type(doc_type, perspective)
            .first()
            .map_or(Value::Null, |doc| self.resolve_document(doc, perspective))
    }

    fn list(&self, docs: Vec<&Value>, perspective: Perspective) -> Value {
        Value::Array(
            docs.into_iter()
                .map(|doc| self.resolve_document(doc, perspective))
                .collect(),
        )
    }

    fn resolve_document(&self, doc: &Value, perspective: Perspective) -> Value {
        let mut path = Vec::new();
        if let Some(id) = doc.get("_id").and_then(Value::as_str) {
            path.push(published_id(id).to_string());
        }
        self.resolve(doc, perspective, 0, &mut path)
    }

    fn resolve(&self, value: &Value, perspective: Perspective, depth: usize, path: &mut Vec<String>) -> Value {
        match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve(item, perspective, depth, path))
                    .collect(),
            ),
            Value::Object(object) => {
                if let Some(target) = object.get("_ref").and_then(Value::as_str)
                    && depth < MAX_REF_DEPTH
                    && !path.iter().any(|seen| seen == published_id(target))
                    && let Some(doc) = self.lookup(target, perspective)
                {
                    path.push(published_id(target).to_string());
                    let mut resolved = self.resolve(doc, perspective, depth + 1, path);
                    path.pop();
                    if let (Value::Object(out), Some(key)) = (&mut resolved, object.get("_key")) {
                        out.insert("_key".to_string(), key.clone());
                    }
                    return resolved;
                }
                Value::Object(
                    object
                        .iter()
                        .map(|(k, v)| (k.clone(), self.resolve(v, perspective, depth, path)))
                        .collect::<Map<_, _>>(),
                )
            }
            other => other.clone(),
        }
    }
}

impl ContentSource for SnapshotSource {
    fn fetch(&self, query: &ContentQuery, perspective: Perspective) -> Result<Value, CmsError> {
        Ok(match query {
            ContentQuery::Settings => self.first("globalSettings", perspective),
            ContentQuery::Navigation => self.first("navigation", perspective),
            ContentQuery::Destinations => {
                let mut docs = self.with_slugs("destination", perspective);
                docs.sort_by(|a, b| {
                    flag(b, "featured")
                        .cmp(&flag(a, "featured"))
                        .then_with(|| text(a, "name").cmp(text(b, "name")))
                });
                self.list(docs, perspective)
            }
            ContentQuery::Destination { slug } => self.by_slug("destination", slug, perspective),
            ContentQuery::Articles => {
                let mut docs = self.with_slugs("article", perspective);
                docs.sort_by(|a, b| newest_first(text(a, "publishedAt"), text(b, "publishedAt")));
                self.list(docs, perspective)
            }
            ContentQuery::Article { slug } => self.by_slug("article", slug, perspective),
            ContentQuery::Pages => self.list(self.with_slugs("page", perspective), perspective),
            ContentQuery::Page { slug } => self.by_slug("page", slug, perspective),
            ContentQuery::AllDocuments => Value::Array(
                self.visible(perspective)
                    .into_iter()
                    .filter(|doc| !is_system_type(doc))
                    .cloned()
                    .collect(),
            ),
        })
    }

    fn describe(&self) -> String {
        format!("{} ({} documents)", self.origin.display(), self.documents.len())
    }
}

/// Parse a JSON array export or NDJSON, one document per non-blank line.
pub fn parse_documents(text: &str, path: &Path) -> Result<Vec<Value>, CmsError> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text).map_err(|source| CmsError::Snapshot {
            path: path.to_path_buf(),
            line: source.line(),
            source,
        });
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| CmsError::Snapshot {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect()
}

fn published_id(id: &str) -> &str {
    id.strip_prefix(DRAFTS_PREFIX).unwrap_or(id)
}

fn slug_of(doc: &Value) -> &str {
    doc.pointer("/slug/current")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn text<'a>(doc: &'a Value, field: &str) -> &'a str {
    doc.get(field).and_then(Value::as_str).unwrap_or_default()
}

fn flag(doc: &Value, field: &str) -> bool {
    doc.get(field).and_then(Value::as_bool).unwrap_or(false)
}

/// Descending ISO-8601 order with undated documents last.
fn newest_first(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => b.cmp(a),
    }
}

/// Asset and system documents exported alongside content.
fn is_system_type(doc: &Value) -> bool {
    let kind = text(doc, "_type");
    kind.starts_with("sanity.") || kind.starts_with("system.")
}
