//! Wire types for the remote content API.
//!
//! These are read-only snapshots of what the API returns, deserialized
//! verbatim. Unknown fields are ignored; unknown block types collapse into
//! [`BlockKind::Other`] so new block kinds never break an export.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    /// Records in this page, in document order.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Whether another page can be fetched with `next_cursor`.
    #[serde(default)]
    pub has_more: bool,

    /// Opaque cursor for the next page, if any.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Paginated<T> {
    /// A single exhausted page of results.
    pub fn complete(results: Vec<T>) -> Self {
        Self {
            results,
            has_more: false,
            next_cursor: None,
        }
    }

    /// A partial page that continues at `cursor`.
    pub fn partial(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            results,
            has_more: true,
            next_cursor: Some(cursor.into()),
        }
    }
}

/// One annotated span of inline text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextSpan {
    /// Unformatted text content.
    #[serde(default)]
    pub plain_text: String,

    /// Inline formatting flags.
    #[serde(default)]
    pub annotations: Annotations,

    /// Link target, if the span is a link.
    #[serde(default)]
    pub href: Option<String>,
}

impl RichTextSpan {
    /// Create a plain span.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            ..Default::default()
        }
    }

    /// Mark the span bold.
    pub fn bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    /// Mark the span italic.
    pub fn italic(mut self) -> Self {
        self.annotations.italic = true;
        self
    }

    /// Mark the span as inline code.
    pub fn code(mut self) -> Self {
        self.annotations.code = true;
        self
    }

    /// Attach a link target.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.href = Some(url.into());
        self
    }
}

/// Inline formatting flags on a text span.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Annotations {
    /// Bold text
    #[serde(default)]
    pub bold: bool,

    /// Italic text
    #[serde(default)]
    pub italic: bool,

    /// Inline code
    #[serde(default)]
    pub code: bool,
}

/// One structural node of a document.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockRecord {
    /// Node identifier, used for child fetches.
    pub id: String,

    /// Whether the node has nested children to walk into.
    #[serde(default)]
    pub has_children: bool,

    /// Typed payload.
    #[serde(flatten)]
    pub kind: BlockKind,
}

impl BlockRecord {
    /// Create a record for tests and fixtures.
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            has_children: false,
            kind,
        }
    }

    /// Flag the record as having nested children.
    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }
}

/// The typed payload of a block, tagged by the API's `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BlockKind {
    /// Plain paragraph text.
    #[serde(rename = "paragraph")]
    Paragraph {
        /// Paragraph payload.
        paragraph: RichTextContent,
    },

    /// Level-1 heading.
    #[serde(rename = "heading_1")]
    Heading1 {
        /// Heading payload.
        heading_1: RichTextContent,
    },

    /// Level-2 heading.
    #[serde(rename = "heading_2")]
    Heading2 {
        /// Heading payload.
        heading_2: RichTextContent,
    },

    /// Level-3 heading.
    #[serde(rename = "heading_3")]
    Heading3 {
        /// Heading payload.
        heading_3: RichTextContent,
    },

    /// Bulleted list item.
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem {
        /// Item payload.
        bulleted_list_item: RichTextContent,
    },

    /// Numbered list item.
    #[serde(rename = "numbered_list_item")]
    NumberedListItem {
        /// Item payload.
        numbered_list_item: RichTextContent,
    },

    /// Table container; its rows are separate `table_row` children.
    #[serde(rename = "table")]
    Table {
        /// Table shape metadata.
        table: TableMeta,
    },

    /// One row of a table.
    #[serde(rename = "table_row")]
    TableRow {
        /// Row payload.
        table_row: TableRowContent,
    },

    /// Embedded or uploaded image.
    #[serde(rename = "image")]
    Image {
        /// Image payload.
        image: ImageContent,
    },

    /// A nested page embedded as a block.
    #[serde(rename = "child_page")]
    ChildPage {
        /// Child-page payload.
        child_page: ChildPageContent,
    },

    /// Any block type this exporter does not render.
    #[serde(other)]
    Other,
}

/// Rich-text payload shared by paragraphs, headings and list items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextContent {
    /// Ordered text spans.
    #[serde(default)]
    pub rich_text: Vec<RichTextSpan>,
}

impl RichTextContent {
    /// Payload with the given spans.
    pub fn new(rich_text: Vec<RichTextSpan>) -> Self {
        Self { rich_text }
    }

    /// Payload with a single plain span.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![RichTextSpan::new(text)])
    }
}

/// Shape metadata of a table block.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TableMeta {
    /// Number of columns.
    #[serde(default)]
    pub table_width: u32,
}

/// Cell payload of a `table_row` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableRowContent {
    /// Cells in column order; each cell is a span sequence.
    #[serde(default)]
    pub cells: Vec<Vec<RichTextSpan>>,
}

/// Image payload: uploaded file or external reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageContent {
    /// API-hosted file, present for uploaded images.
    #[serde(default)]
    pub file: Option<FileRef>,

    /// External reference, present for linked images.
    #[serde(default)]
    pub external: Option<FileRef>,
}

impl ImageContent {
    /// Resolve the image URL, preferring the direct file over the external
    /// reference.
    pub fn url(&self) -> Option<&str> {
        self.file
            .as_ref()
            .or(self.external.as_ref())
            .map(|f| f.url.as_str())
    }
}

/// A URL-bearing file reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileRef {
    /// Resolved URL.
    #[serde(default)]
    pub url: String,
}

/// Payload of a `child_page` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildPageContent {
    /// Title of the nested page.
    #[serde(default)]
    pub title: String,
}

/// A page record from `get_page` or a collection query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRecord {
    /// Page identifier.
    pub id: String,

    /// Property map; the title lives in a title-bearing property.
    #[serde(default)]
    pub properties: HashMap<String, PageProperty>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,

    /// Last-edit timestamp.
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
}

impl PageRecord {
    /// Record with only an id, for tests and fixtures.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Record with an id and a `title` property.
    pub fn with_title(id: impl Into<String>, title: impl Into<String>) -> Self {
        let mut record = Self::with_id(id);
        record.properties.insert(
            "title".to_string(),
            PageProperty {
                title: Some(vec![RichTextSpan::new(title)]),
            },
        );
        record
    }

    /// Resolve the page title: the concatenated plain text of the `title`
    /// property, or of the first title-bearing property under another name.
    pub fn title(&self) -> Option<String> {
        let spans = self
            .properties
            .get("title")
            .and_then(|p| p.title.as_ref())
            .or_else(|| self.properties.values().find_map(|p| p.title.as_ref()))?;
        let text: String = spans.iter().map(|s| s.plain_text.as_str()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// One property of a page. Only title-bearing properties matter to the
/// exporter; everything else deserializes to an empty shell.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageProperty {
    /// Title spans, present on the page's title property.
    #[serde(default)]
    pub title: Option<Vec<RichTextSpan>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paragraph_block() {
        let json = r#"{
            "id": "b1",
            "has_children": false,
            "type": "paragraph",
            "paragraph": {
                "rich_text": [
                    {"plain_text": "hello", "annotations": {"bold": true, "italic": false, "code": false}, "href": null}
                ]
            }
        }"#;
        let block: BlockRecord = serde_json::from_str(json).unwrap();
        assert_eq!(block.id, "b1");
        match &block.kind {
            BlockKind::Paragraph { paragraph } => {
                assert_eq!(paragraph.rich_text.len(), 1);
                assert_eq!(paragraph.rich_text[0].plain_text, "hello");
                assert!(paragraph.rich_text[0].annotations.bold);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_parse_heading_block() {
        let json = r#"{
            "id": "h1",
            "type": "heading_2",
            "heading_2": {"rich_text": [{"plain_text": "Section"}]}
        }"#;
        let block: BlockRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(block.kind, BlockKind::Heading2 { .. }));
        assert!(!block.has_children);
    }

    #[test]
    fn test_parse_unknown_block_type() {
        let json = r#"{"id": "x", "type": "synced_block", "synced_block": {}}"#;
        let block: BlockRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(block.kind, BlockKind::Other));
    }

    #[test]
    fn test_parse_table_row() {
        let json = r#"{
            "id": "r1",
            "type": "table_row",
            "table_row": {"cells": [[{"plain_text": "a"}], [{"plain_text": "b"}]]}
        }"#;
        let block: BlockRecord = serde_json::from_str(json).unwrap();
        match &block.kind {
            BlockKind::TableRow { table_row } => assert_eq!(table_row.cells.len(), 2),
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_image_url_prefers_file() {
        let image = ImageContent {
            file: Some(FileRef {
                url: "https://files/a.png".to_string(),
            }),
            external: Some(FileRef {
                url: "https://external/b.png".to_string(),
            }),
        };
        assert_eq!(image.url(), Some("https://files/a.png"));

        let external_only = ImageContent {
            file: None,
            external: Some(FileRef {
                url: "https://external/b.png".to_string(),
            }),
        };
        assert_eq!(external_only.url(), Some("https://external/b.png"));

        assert_eq!(ImageContent::default().url(), None);
    }

    #[test]
    fn test_page_title_from_title_property() {
        let json = r#"{
            "id": "p1",
            "properties": {
                "title": {"title": [{"plain_text": "My "}, {"plain_text": "Page"}]}
            }
        }"#;
        let page: PageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(page.title(), Some("My Page".to_string()));
    }

    #[test]
    fn test_page_title_from_named_property() {
        let json = r#"{
            "id": "p2",
            "properties": {
                "Name": {"title": [{"plain_text": "Named"}]},
                "Status": {}
            }
        }"#;
        let page: PageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(page.title(), Some("Named".to_string()));
    }

    #[test]
    fn test_page_title_missing() {
        let page = PageRecord::with_id("p3");
        assert_eq!(page.title(), None);
    }

    #[test]
    fn test_parse_paginated_listing() {
        let json = r#"{
            "results": [{"id": "b1", "type": "paragraph", "paragraph": {"rich_text": []}}],
            "has_more": true,
            "next_cursor": "cursor-2"
        }"#;
        let page: Paginated<BlockRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 1);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("cursor-2"));
    }
}
