//! Rich text as stored by the CMS.
//!
//! A rich-text field is an array of nodes. Most are text blocks (`_type:
//! "block"`) holding styled spans; the rest are custom members embedded in
//! the flow (images, callouts, YouTube embeds). List items are ordinary text
//! blocks carrying `listItem`, so rendering first groups consecutive items of
//! the same list kind with [`group_lists`].
//!
//! Decoding never fails on a single node: unknown member types and nodes whose
//! fields don't decode are kept as [`Node::Unknown`] / [`Node::Malformed`] so
//! the renderer can skip them with a warning.

use crate::documents::{ImageRef, LinkTarget, nullable};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub type PortableText = Vec<Node>;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(StyledBlock),
    Image(ImageRef),
    Callout(Callout),
    Youtube(YoutubeEmbed),
    Unknown { kind: String },
    Malformed { kind: String, error: String },
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let decoded = match kind.as_str() {
            "block" => serde_json::from_value(value).map(Node::Text),
            "image" => serde_json::from_value(value).map(Node::Image),
            "callout" => serde_json::from_value(value).map(Node::Callout),
            "youtube" => serde_json::from_value(value).map(Node::Youtube),
            _ => return Ok(Node::Unknown { kind }),
        };
        Ok(decoded.unwrap_or_else(|e| Node::Malformed {
            kind,
            error: e.to_string(),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

impl<'de> Deserialize<'de> for ListKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == "number" {
            ListKind::Number
        } else {
            ListKind::Bullet
        })
    }
}

fn normal() -> String {
    "normal".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledBlock {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default = "normal")]
    pub style: String,
    #[serde(default)]
    pub list_item: Option<ListKind>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default, deserialize_with = "nullable")]
    pub children: Vec<Span>,
    #[serde(default, deserialize_with = "nullable")]
    pub mark_defs: Vec<MarkDef>,
}

impl StyledBlock {
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|m| m.key == key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Span {
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub marks: Vec<String>,
}

/// Annotation attached to spans by key (`link`, `internalLink`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkDef {
    #[serde(rename = "_key", default)]
    pub key: String,
    #[serde(rename = "_type", default)]
    pub kind: String,
    pub href: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub open_in_new_tab: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub is_affiliate: bool,
    pub reference: Option<LinkTarget>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutKind {
    #[default]
    Info,
    Tip,
    Warning,
    Success,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Callout {
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub kind: CalloutKind,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct YoutubeEmbed {
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    pub caption: Option<String>,
}

/// A top-level render unit: a single node or a run of list items.
#[derive(Debug, PartialEq)]
pub enum Group<'a> {
    Node(&'a Node),
    List {
        kind: ListKind,
        items: Vec<&'a StyledBlock>,
    },
}

/// Group consecutive list items of the same kind into one list.
pub fn group_lists(nodes: &[Node]) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    for node in nodes {
        if let Node::Text(block) = node
            && let Some(kind) = block.list_item
        {
            if let Some(Group::List { kind: open, items }) = groups.last_mut()
                && *open == kind
            {
                items.push(block);
                continue;
            }
            groups.push(Group::List {
                kind,
                items: vec![block],
            });
            continue;
        }
        groups.push(Group::Node(node));
    }
    groups
}

/// Text content with marks and members stripped, blocks separated by blank lines.
pub fn plain_text(nodes: &[Node]) -> String {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Text(block) => Some(block.plain_text()),
            Node::Callout(callout) => callout.content.clone(),
            _ => None,
        })
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Reading time in whole minutes at 200 words per minute, at least one.
pub fn reading_minutes(nodes: &[Node]) -> u32 {
    let words = plain_text(nodes).split_whitespace().count() as u32;
    words.div_ceil(200).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> PortableText {
        serde_json::from_value(value).unwrap()
    }

    fn list_item(kind: &str, text: &str) -> Value {
        json!({
            "_type": "block",
            "style": "normal",
            "listItem": kind,
            "children": [{"_type": "span", "text": text, "marks": []}],
        })
    }

    fn paragraph(text: &str) -> Value {
        json!({
            "_type": "block",
            "children": [{"_type": "span", "text": text}],
        })
    }

    #[test]
    fn decodes_known_members() {
        let nodes = parse(json!([
            paragraph("Hello"),
            {"_type": "image", "asset": {"_ref": "image-a-1x1-jpg"}, "alt": "A"},
            {"_type": "callout", "type": "tip", "content": "Bring sunscreen"},
            {"_type": "youtube", "url": "https://youtu.be/dQw4w9WgXcQ"},
        ]));
        assert!(matches!(nodes[0], Node::Text(_)));
        assert!(matches!(nodes[1], Node::Image(_)));
        assert!(matches!(
            nodes[2],
            Node::Callout(Callout {
                kind: CalloutKind::Tip,
                ..
            })
        ));
        assert!(matches!(nodes[3], Node::Youtube(_)));
    }

    #[test]
    fn unknown_member_is_kept_as_unknown() {
        let nodes = parse(json!([{"_type": "table", "rows": []}]));
        assert_eq!(
            nodes[0],
            Node::Unknown {
                kind: "table".into()
            }
        );
    }

    #[test]
    fn undecodable_member_is_malformed() {
        let nodes = parse(json!([{"_type": "youtube", "url": 42}]));
        assert!(matches!(&nodes[0], Node::Malformed { kind, .. } if kind == "youtube"));
    }

    #[test]
    fn style_defaults_to_normal() {
        let nodes = parse(json!([paragraph("x")]));
        let Node::Text(block) = &nodes[0] else {
            panic!("expected text block");
        };
        assert_eq!(block.style, "normal");
    }

    #[test]
    fn consecutive_list_items_are_grouped() {
        let nodes = parse(json!([
            paragraph("Intro"),
            list_item("bullet", "one"),
            list_item("bullet", "two"),
            list_item("number", "first"),
            paragraph("Outro"),
        ]));
        let groups = group_lists(&nodes);
        assert_eq!(groups.len(), 4);
        match &groups[1] {
            Group::List { kind, items } => {
                assert_eq!(*kind, ListKind::Bullet);
                assert_eq!(items.len(), 2);
            }
            other => panic!("expected list, got {other:?}"),
        }
        assert!(matches!(
            groups[2],
            Group::List {
                kind: ListKind::Number,
                ..
            }
        ));
    }

    #[test]
    fn plain_text_joins_blocks() {
        let nodes = parse(json!([paragraph("One"), paragraph("Two")]));
        assert_eq!(plain_text(&nodes), "One\n\nTwo");
    }

    #[test]
    fn reading_time_rounds_up() {
        let words = vec!["word"; 201].join(" ");
        let nodes = parse(json!([paragraph(&words)]));
        assert_eq!(reading_minutes(&nodes), 2);
        assert_eq!(reading_minutes(&[]), 1);
    }
}
