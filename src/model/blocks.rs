use super::common::BlockCommon;
use crate::types::{BlockId, Color, RichTextItem};
use serde::{Deserialize, Serialize};

/// Text content shared by paragraph-like blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
    pub color: Color,
}

impl TextBlockContent {
    pub fn new(rich_text: Vec<RichTextItem>) -> Self {
        Self {
            rich_text,
            color: Color::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading of level 1, 2 or 3
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub is_toggleable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuoteBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Callout block. `content.color` selects the container class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<Icon>,
    pub content: TextBlockContent,
}

/// Page or callout icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Icon {
    #[serde(rename = "emoji")]
    Emoji { emoji: String },
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub caption: Vec<RichTextItem>,
    pub content: TextBlockContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// Block with nothing but its common fields: divider, breadcrumb,
/// table of contents, column list and column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MarkerBlock {
    pub common: BlockCommon,
}

/// Image, video, audio, file and pdf blocks.
///
/// `source` is absent when Notion sent a payload we could not read; the
/// renderers then fall back to an empty URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub source: Option<FileObject>,
    pub caption: Vec<RichTextItem>,
    pub name: Option<String>,
}

impl MediaBlock {
    pub fn url(&self) -> &str {
        self.source.as_ref().map(FileObject::url).unwrap_or("")
    }
}

/// Bookmark and embed blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LinkBlock {
    pub common: BlockCommon,
    pub url: String,
    pub caption: Vec<RichTextItem>,
}

/// Child page and child database blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChildBlock {
    pub common: BlockCommon,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SyncedBlock {
    pub common: BlockCommon,
    pub synced_from: Option<SyncedFrom>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedFrom {
    pub block_id: BlockId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LinkPreviewBlock {
    pub common: BlockCommon,
    pub url: String,
}

/// A block type this crate has no dedicated variant for. The raw
/// type-keyed payload is kept as Notion sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
    pub payload: serde_json::Value,
}

/// File object types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileObject {
    #[serde(rename = "external")]
    External { external: ExternalFile },
    #[serde(rename = "file")]
    File { file: NotionFile },
}

impl FileObject {
    pub fn external(url: &str) -> Self {
        FileObject::External {
            external: ExternalFile {
                url: url.to_string(),
            },
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FileObject::External { external } => &external.url,
            FileObject::File { file } => &file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotionFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<chrono::DateTime<chrono::Utc>>,
}
