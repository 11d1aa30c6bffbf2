//! Rich-text document model.
//!
//! Mirrors the JSON shape of Contentful rich text: every node has a
//! `nodeType`, structural nodes have ordered `content`, text nodes have a
//! `value`, and link-like nodes carry a `data` payload. Every field has a
//! default, and `null` reads as that default, so that malformed input still
//! deserializes and can be walked.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AnalysisResult;

/// A node of a rich-text tree. The root is a `document` node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Node {
    /// Raw node type tag, e.g. `paragraph` or `heading-2`.
    #[serde(deserialize_with = "nullable")]
    pub node_type: String,
    /// Text content (text nodes only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Link payload.
    #[serde(deserialize_with = "nullable")]
    pub data: NodeData,
    /// Child nodes in document order.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
}

/// Link payload of hyperlink and embed nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeData {
    /// Target URI of a plain hyperlink.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Referenced entity of an entry or asset link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LinkTarget>,
}

/// A reference to another entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkTarget {
    /// System metadata of the target.
    #[serde(deserialize_with = "nullable")]
    pub sys: LinkSys,
}

/// System metadata of a link target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkSys {
    /// Target entity id.
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    /// Usually `Link`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// `Entry` or `Asset`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

/// Read a field whose `null` means the same as absent.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Node kinds the analyzer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A text leaf.
    Text,
    /// A paragraph block.
    Paragraph,
    /// A heading block with its level.
    Heading(u32),
    /// A plain hyperlink to a URI.
    Hyperlink,
    /// A hyperlink to another entry.
    EntryHyperlink,
    /// A hyperlink to an asset.
    AssetHyperlink,
    /// A block-level embedded asset.
    EmbeddedAsset,
    /// An inline embedded entry.
    EmbeddedEntry,
    /// An inline embedded resource.
    EmbeddedResource,
    /// A hyperlink to an external resource.
    ResourceHyperlink,
    /// Lists, tables, quotes, rules, block embeds and anything unknown.
    Other,
}

impl NodeKind {
    /// Classify a raw `nodeType` tag.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "paragraph" => Self::Paragraph,
            "hyperlink" => Self::Hyperlink,
            "entry-hyperlink" => Self::EntryHyperlink,
            "asset-hyperlink" => Self::AssetHyperlink,
            "embedded-asset-block" => Self::EmbeddedAsset,
            "embedded-entry-inline" => Self::EmbeddedEntry,
            "embedded-resource-inline" => Self::EmbeddedResource,
            "resource-hyperlink" => Self::ResourceHyperlink,
            _ if tag.starts_with("heading-") => Self::Heading(heading_level(tag)),
            _ => Self::Other,
        }
    }

    /// Whether the kind is one of the link-like inlines that add no
    /// boundary marker to the flattened text.
    pub const fn is_unmarked(self) -> bool {
        matches!(
            self,
            Self::AssetHyperlink
                | Self::EmbeddedEntry
                | Self::EmbeddedResource
                | Self::ResourceHyperlink
        )
    }
}

/// The number formed by the digits of a heading tag; none reads as 0.
fn heading_level(tag: &str) -> u32 {
    let digits: String = tag.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

impl Node {
    /// Parse a document from JSON text.
    pub fn from_json(input: &str) -> AnalysisResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Classify this node.
    pub fn kind(&self) -> NodeKind {
        NodeKind::parse(&self.node_type)
    }

    /// Text value of a text node, empty otherwise.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Hyperlink URI, empty when absent.
    pub fn uri(&self) -> &str {
        self.data.uri.as_deref().unwrap_or("")
    }

    /// Referenced entity id, empty when absent.
    pub fn target_id(&self) -> &str {
        self.data.target.as_ref().map_or("", |t| t.sys.id.as_str())
    }

    /// A `document` root with the given children.
    pub fn document(content: Vec<Self>) -> Self {
        Self::block("document", content)
    }

    /// A structural node.
    pub fn block(node_type: &str, content: Vec<Self>) -> Self {
        Self {
            node_type: node_type.to_string(),
            content,
            ..Self::default()
        }
    }

    /// A text leaf.
    pub fn text_node(value: &str) -> Self {
        Self {
            node_type: "text".to_string(),
            value: Some(value.to_string()),
            ..Self::default()
        }
    }

    /// A paragraph holding a single text leaf.
    pub fn paragraph(value: &str) -> Self {
        Self::block("paragraph", vec![Self::text_node(value)])
    }

    /// A heading of `level` holding a single text leaf.
    pub fn heading(level: u32, value: &str) -> Self {
        Self::block(&format!("heading-{level}"), vec![Self::text_node(value)])
    }

    /// A plain hyperlink.
    pub fn hyperlink(uri: &str, content: Vec<Self>) -> Self {
        Self {
            data: NodeData {
                uri: Some(uri.to_string()),
                target: None,
            },
            ..Self::block("hyperlink", content)
        }
    }

    /// A link-like node of `node_type` referencing entity `id`.
    pub fn linked(node_type: &str, id: &str, content: Vec<Self>) -> Self {
        Self {
            data: NodeData {
                uri: None,
                target: Some(LinkTarget {
                    sys: LinkSys {
                        id: id.to_string(),
                        kind: Some("Link".to_string()),
                        link_type: None,
                    },
                }),
            },
            ..Self::block(node_type, content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_contentful_json() {
        let json = r#"{
            "nodeType": "document",
            "data": {},
            "content": [
                {
                    "nodeType": "paragraph",
                    "data": {},
                    "content": [
                        {"nodeType": "text", "value": "See ", "marks": [], "data": {}},
                        {
                            "nodeType": "entry-hyperlink",
                            "data": {"target": {"sys": {"id": "abc", "type": "Link", "linkType": "Entry"}}},
                            "content": [{"nodeType": "text", "value": "here", "marks": [], "data": {}}]
                        }
                    ]
                }
            ]
        }"#;
        let doc = Node::from_json(json).unwrap();
        assert_eq!(doc.content.len(), 1);
        let para = &doc.content[0];
        assert_eq!(para.kind(), NodeKind::Paragraph);
        assert_eq!(para.content[0].text(), "See ");
        let link = &para.content[1];
        assert_eq!(link.kind(), NodeKind::EntryHyperlink);
        assert_eq!(link.target_id(), "abc");
        assert_eq!(
            link.data.target.as_ref().unwrap().sys.link_type.as_deref(),
            Some("Entry")
        );
    }

    #[test]
    fn missing_fields_default() {
        let doc = Node::from_json(r#"{"content": [{"nodeType": "hyperlink"}]}"#).unwrap();
        assert_eq!(doc.node_type, "");
        assert_eq!(doc.content[0].uri(), "");
        assert_eq!(doc.content[0].target_id(), "");
        assert!(doc.content[0].content.is_empty());
    }

    #[test]
    fn null_fields_default() {
        let doc = Node::from_json(
            r#"{"nodeType": "document", "data": null, "content": [
                {"nodeType": "paragraph", "content": null},
                {"nodeType": null, "data": {"uri": null, "target": null}},
                {"nodeType": "entry-hyperlink", "data": {"target": {"sys": null}}},
                {"nodeType": "entry-hyperlink", "data": {"target": {"sys": {"id": null}}}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.data, NodeData::default());
        assert_eq!(doc.content.len(), 4);
        assert!(doc.content[0].content.is_empty());
        assert_eq!(doc.content[1].kind(), NodeKind::Other);
        assert_eq!(doc.content[1].uri(), "");
        assert_eq!(doc.content[2].target_id(), "");
        assert_eq!(doc.content[3].target_id(), "");
    }

    #[test]
    fn non_json_is_rejected() {
        assert!(Node::from_json("not json").is_err());
    }

    #[test]
    fn kinds_classify() {
        assert_eq!(NodeKind::parse("heading-1"), NodeKind::Heading(1));
        assert_eq!(NodeKind::parse("heading-6"), NodeKind::Heading(6));
        assert_eq!(NodeKind::parse("heading-x"), NodeKind::Heading(0));
        assert_eq!(NodeKind::parse("heading-"), NodeKind::Heading(0));
        assert_eq!(NodeKind::parse("heading-300"), NodeKind::Heading(300));
        assert_eq!(
            NodeKind::parse("heading-99999999999"),
            NodeKind::Heading(u32::MAX)
        );
        assert_eq!(NodeKind::parse("subheading-2"), NodeKind::Other);
        assert_eq!(NodeKind::parse("embedded-asset-block"), NodeKind::EmbeddedAsset);
        assert_eq!(NodeKind::parse("embedded-entry-block"), NodeKind::Other);
        assert_eq!(NodeKind::parse("unordered-list"), NodeKind::Other);
        assert_eq!(NodeKind::parse("mystery"), NodeKind::Other);
    }

    #[test]
    fn unmarked_kinds() {
        assert!(NodeKind::AssetHyperlink.is_unmarked());
        assert!(NodeKind::ResourceHyperlink.is_unmarked());
        assert!(!NodeKind::Hyperlink.is_unmarked());
        assert!(!NodeKind::Other.is_unmarked());
    }

    #[test]
    fn builders_round_trip_through_json() {
        let doc = Node::document(vec![Node::heading(2, "Title"), Node::paragraph("Body")]);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"nodeType\":\"heading-2\""));
        assert_eq!(Node::from_json(&json).unwrap(), doc);
    }
}
