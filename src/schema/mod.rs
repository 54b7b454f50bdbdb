//! Content schema: declarative type definitions and authoring-rule validation.
//!
//! Every document, object and block type the site reads is declared once in
//! [`registry`] as a [`TypeDef`]: its fields, their types, the validation
//! rules editors are held to, and which fields the studio shows as the
//! preview title/subtitle.
//!
//! [`Registry::validate`] re-checks those rules against exported documents.
//! The CMS enforces them at authoring time; running them again over a
//! snapshot catches content written before a rule existed, imported in bulk,
//! or edited through the API.

pub mod registry;

use crate::embed::Provider;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum FieldType {
    String,
    Text,
    Number,
    Boolean,
    Url,
    Slug,
    Datetime,
    Color,
    Geopoint,
    /// Image with its own annotation fields (alt text, caption).
    Image { fields: Vec<Field> },
    Reference { to: Vec<&'static str> },
    Object { fields: Vec<Field> },
    /// Another registered type, by name.
    Named { name: &'static str },
    Array { of: Vec<FieldType> },
    PortableText,
}

impl FieldType {
    pub fn image() -> Self {
        FieldType::Image { fields: Vec::new() }
    }

    pub fn image_with_alt(alt_required: bool) -> Self {
        let alt = Field::new("alt", "Alt Text", FieldType::String);
        FieldType::Image {
            fields: vec![if alt_required { alt.required() } else { alt }],
        }
    }

    pub fn reference(to: &[&'static str]) -> Self {
        FieldType::Reference { to: to.to_vec() }
    }

    pub fn object(fields: Vec<Field>) -> Self {
        FieldType::Object { fields }
    }

    pub fn named(name: &'static str) -> Self {
        FieldType::Named { name }
    }

    pub fn array_of(item: FieldType) -> Self {
        FieldType::Array { of: vec![item] }
    }

    pub fn array_of_named(names: &[&'static str]) -> Self {
        FieldType::Array {
            of: names.iter().map(|n| FieldType::named(n)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "rule")]
pub enum Rule {
    Required,
    MaxLength { max: usize },
    Min { min: f64 },
    Max { max: f64 },
    MinItems { min: usize },
    MaxItems { max: usize },
    OneOf { values: &'static [&'static str] },
    /// Required only while `sibling` holds `equals`.
    RequiredWhen {
        sibling: &'static str,
        equals: &'static str,
    },
    /// URL host must match the provider selected in `provider_field`.
    ProviderUrl { provider_field: &'static str },
    SlugFormat,
    Email,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: &'static str,
    pub title: &'static str,
    #[serde(rename = "fieldType")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

impl Field {
    pub fn new(name: &'static str, title: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            title,
            field_type,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    pub fn max_len(self, max: usize) -> Self {
        self.rule(Rule::MaxLength { max })
    }

    pub fn range(self, min: f64, max: f64) -> Self {
        self.rule(Rule::Min { min }).rule(Rule::Max { max })
    }

    pub fn items(self, min: usize, max: usize) -> Self {
        self.rule(Rule::MinItems { min }).rule(Rule::MaxItems { max })
    }

    pub fn one_of(self, values: &'static [&'static str]) -> Self {
        self.rule(Rule::OneOf { values })
    }

    fn is_required(&self, parent: &serde_json::Map<String, Value>) -> bool {
        self.rules.iter().any(|rule| match rule {
            Rule::Required => true,
            Rule::RequiredWhen { sibling, equals } => {
                parent.get(*sibling).and_then(Value::as_str) == Some(*equals)
            }
            _ => false,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Document,
    Object,
    Block,
}

/// Which fields the studio list view shows for a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'static str>,
    /// Title shown when the title field is empty.
    pub fallback: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDef {
    pub name: &'static str,
    pub title: &'static str,
    pub kind: TypeKind,
    pub fields: Vec<Field>,
    pub preview: Preview,
}

impl TypeDef {
    /// Studio list title/subtitle for `record`, following dotted select paths.
    pub fn preview_of(&self, record: &Value) -> (String, Option<String>) {
        let title = lookup_text(record, self.preview.title)
            .unwrap_or_else(|| self.preview.fallback.to_string());
        let subtitle = self.preview.subtitle.and_then(|path| lookup_text(record, path));
        (title, subtitle)
    }
}

fn lookup_text(record: &Value, path: &str) -> Option<String> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    match current {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One broken rule, located by a JSON-path-like string (`blocks[2].cta.text`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

pub struct Registry {
    types: Vec<TypeDef>,
}

impl Registry {
    pub fn new(types: Vec<TypeDef>) -> Self {
        Self { types }
    }

    /// Every type the site declares.
    pub fn standard() -> Self {
        Self::new(registry::all_types())
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn is_document_type(&self, name: &str) -> bool {
        self.get(name).is_some_and(|t| t.kind == TypeKind::Document)
    }

    /// Check `doc` against its type's rules. Unregistered types yield a single
    /// violation at the root.
    pub fn validate(&self, doc: &Value) -> Vec<Violation> {
        let mut violations = Vec::new();
        let kind = doc.get("_type").and_then(Value::as_str).unwrap_or_default();
        match self.get(kind) {
            Some(def) => self.check_fields(&def.fields, doc, "", &mut violations),
            None => violations.push(Violation {
                path: String::new(),
                message: format!("unknown type {kind:?}"),
            }),
        }
        violations
    }

    fn check_fields(&self, fields: &[Field], value: &Value, path: &str, out: &mut Vec<Violation>) {
        let Some(object) = value.as_object() else {
            out.push(violation(path, "expected an object"));
            return;
        };
        for field in fields {
            let field_path = join(path, field.name);
            match object.get(field.name).filter(|v| !v.is_null()) {
                None => {
                    if field.is_required(object) {
                        out.push(violation(&field_path, "is required"));
                    }
                }
                Some(v) => {
                    self.check_rules(field, v, object, &field_path, out);
                    self.check_type(&field.field_type, v, &field_path, out);
                }
            }
        }
    }

    fn check_rules(
        &self,
        field: &Field,
        value: &Value,
        parent: &serde_json::Map<String, Value>,
        path: &str,
        out: &mut Vec<Violation>,
    ) {
        for rule in &field.rules {
            let problem = match rule {
                Rule::Required => match value {
                    Value::String(s) if s.trim().is_empty() => Some("is required".to_string()),
                    Value::Array(a) if a.is_empty() => Some("is required".to_string()),
                    _ => None,
                },
                Rule::MaxLength { max } => value
                    .as_str()
                    .filter(|s| s.chars().count() > *max)
                    .map(|s| format!("must be at most {max} characters (has {})", s.chars().count())),
                Rule::Min { min } => value
                    .as_f64()
                    .filter(|n| n < min)
                    .map(|n| format!("must be at least {min} (is {n})")),
                Rule::Max { max } => value
                    .as_f64()
                    .filter(|n| n > max)
                    .map(|n| format!("must be at most {max} (is {n})")),
                Rule::MinItems { min } => value
                    .as_array()
                    .filter(|a| a.len() < *min)
                    .map(|a| format!("needs at least {min} items (has {})", a.len())),
                Rule::MaxItems { max } => value
                    .as_array()
                    .filter(|a| a.len() > *max)
                    .map(|a| format!("allows at most {max} items (has {})", a.len())),
                Rule::OneOf { values } => {
                    let raw = match value {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    };
                    raw.filter(|r| !values.contains(&r.as_str()))
                        .map(|r| format!("{r:?} is not one of {}", values.join(", ")))
                }
                Rule::RequiredWhen { .. } => None,
                Rule::ProviderUrl { provider_field } => {
                    let provider = match parent.get(*provider_field).and_then(Value::as_str) {
                        Some("vimeo") => Provider::Vimeo,
                        _ => Provider::Youtube,
                    };
                    value
                        .as_str()
                        .filter(|url| !provider.matches_host(url))
                        .map(|_| match provider {
                            Provider::Youtube => "must be a YouTube URL".to_string(),
                            Provider::Vimeo => "must be a Vimeo URL".to_string(),
                        })
                }
                Rule::SlugFormat => {
                    let current = value.get("current").and_then(Value::as_str).unwrap_or_default();
                    if current.is_empty() {
                        Some("slug is empty".to_string())
                    } else if slug::slugify(current) != current {
                        Some(format!(
                            "{current:?} is not a URL slug (try {:?})",
                            slug::slugify(current)
                        ))
                    } else {
                        None
                    }
                }
                Rule::Email => value
                    .as_str()
                    .filter(|s| !looks_like_email(s))
                    .map(|s| format!("{s:?} is not an email address")),
            };
            if let Some(message) = problem {
                out.push(Violation {
                    path: path.to_string(),
                    message,
                });
            }
        }
    }

    fn check_type(&self, field_type: &FieldType, value: &Value, path: &str, out: &mut Vec<Violation>) {
        match field_type {
            FieldType::String | FieldType::Text | FieldType::Url | FieldType::Datetime => {
                if !value.is_string() {
                    out.push(violation(path, "expected a string"));
                } else if matches!(field_type, FieldType::Url) {
                    let raw = value.as_str().unwrap_or_default();
                    if url::Url::parse(raw).is_err() {
                        out.push(violation(path, &format!("{raw:?} is not a valid URL")));
                    }
                }
            }
            FieldType::Number => {
                if !value.is_number() {
                    out.push(violation(path, "expected a number"));
                }
            }
            FieldType::Boolean => {
                if !value.is_boolean() {
                    out.push(violation(path, "expected true or false"));
                }
            }
            FieldType::Slug | FieldType::Color | FieldType::Geopoint | FieldType::PortableText => {}
            FieldType::Image { fields } => {
                if value.get("asset").is_none_or(Value::is_null) {
                    out.push(violation(path, "image has no asset"));
                }
                self.check_fields(fields, value, path, out);
            }
            FieldType::Reference { .. } => {
                // Dereferenced exports carry the target inline.
                if value.get("_ref").is_none() && value.get("_id").is_none() {
                    out.push(violation(path, "expected a reference"));
                }
            }
            FieldType::Object { fields } => self.check_fields(fields, value, path, out),
            FieldType::Named { name } => match self.get(name) {
                Some(def) => self.check_fields(&def.fields, value, path, out),
                None => out.push(violation(path, &format!("unregistered type {name:?}"))),
            },
            FieldType::Array { of } => {
                let Some(items) = value.as_array() else {
                    out.push(violation(path, "expected an array"));
                    return;
                };
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    match item_type(of, item) {
                        Some(t) => self.check_type(t, item, &item_path, out),
                        None => {
                            let kind = item.get("_type").and_then(Value::as_str).unwrap_or("?");
                            out.push(violation(
                                &item_path,
                                &format!("type {kind:?} is not allowed here"),
                            ));
                        }
                    }
                }
            }
        }
    }
}

/// Pick the member type for an array item: by `_type` for named members,
/// otherwise the first non-named member.
fn item_type<'a>(of: &'a [FieldType], item: &Value) -> Option<&'a FieldType> {
    let kind = item.get("_type").and_then(Value::as_str);
    if let Some(kind) = kind
        && let Some(named) = of
            .iter()
            .find(|t| matches!(t, FieldType::Named { name } if *name == kind))
    {
        return Some(named);
    }
    let all_named = of.iter().all(|t| matches!(t, FieldType::Named { .. }));
    if all_named {
        return None;
    }
    of.iter().find(|t| !matches!(t, FieldType::Named { .. }))
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !s.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn violation(path: &str, message: &str) -> Violation {
    Violation {
        path: path.to_string(),
        message: message.to_string(),
    }
}

/// Validation result for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub id: String,
    pub doc_type: String,
    /// Studio preview title.
    pub title: String,
    pub violations: Vec<Violation>,
}

impl Registry {
    /// Validate every document, in input order. Object and block records
    /// exported as top-level documents are not content and are skipped.
    pub fn check_documents(&self, docs: &[Value]) -> Vec<DocumentReport> {
        docs.iter()
            .filter(|doc| {
                let kind = doc.get("_type").and_then(Value::as_str).unwrap_or_default();
                self.get(kind).is_none_or(|def| def.kind == TypeKind::Document)
            })
            .map(|doc| {
                let kind = doc.get("_type").and_then(Value::as_str).unwrap_or_default();
                let title = self
                    .get(kind)
                    .map(|def| def.preview_of(doc).0)
                    .unwrap_or_else(|| kind.to_string());
                DocumentReport {
                    id: doc.get("_id").and_then(Value::as_str).unwrap_or("?").to_string(),
                    doc_type: kind.to_string(),
                    title,
                    violations: self.validate(doc),
                }
            })
            .collect()
    }
}
