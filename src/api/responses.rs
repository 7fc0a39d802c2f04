// src/api/responses.rs
//! Wire types for the Notion API and their conversion into the domain model.
//!
//! Block payloads are type-keyed (`{"type": "quote", "quote": {...}}`), so a
//! block is first read with its payloads flattened into a map and then the
//! payload named by `type` is decoded into the matching domain variant.
//! Anything unknown or undecodable becomes `Block::Unsupported` with the raw
//! payload kept intact.

use crate::model::{
    Block, BlockCommon, CalloutBlock, ChildBlock, CodeBlock, EquationBlock, ExternalFile,
    FileObject, HeadingBlock, Icon, LinkBlock, LinkPreviewBlock, ListItemBlock, MarkerBlock,
    MediaBlock, NotionFile, Page, ParagraphBlock, Parent, PropertyValue, QuoteBlock, SyncedBlock,
    SyncedFrom, TableBlock, TableRowBlock, TextBlockContent, ToDoBlock, ToggleBlock,
    UnsupportedBlock,
};
use crate::types::{
    Annotations, BlockId, Color, Link, PageId, PropertyName, RichTextItem, RichTextType,
};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Conversion from a wire type into the domain model
pub trait ToDomain<T> {
    fn to_domain(self) -> T;
}

// --- Rich text ---

#[derive(Debug, Clone, Deserialize)]
pub struct WireRichText {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<WireTextContent>,
    #[serde(default)]
    pub mention: Option<Value>,
    #[serde(default)]
    pub equation: Option<WireEquation>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTextContent {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireEquation {
    #[serde(default)]
    pub expression: String,
}

impl ToDomain<RichTextItem> for WireRichText {
    fn to_domain(self) -> RichTextItem {
        let text_type = match (self.kind.as_str(), self.text, self.mention, self.equation) {
            ("equation", _, _, Some(equation)) => RichTextType::Equation {
                expression: equation.expression,
            },
            ("mention", _, Some(mention), _) => RichTextType::Mention {
                mention_type: mention
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
            },
            (_, Some(text), _, _) => RichTextType::Text {
                content: text.content,
                link: text.link,
            },
            _ => RichTextType::Text {
                content: self.plain_text.clone(),
                link: None,
            },
        };

        RichTextItem {
            text_type,
            annotations: self.annotations,
            plain_text: self.plain_text,
            href: self.href,
        }
    }
}

fn rich_text(items: Vec<WireRichText>) -> Vec<RichTextItem> {
    items.into_iter().map(ToDomain::to_domain).collect()
}

// --- Blocks ---

/// A block as listed by `GET /blocks/{id}/children`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(flatten)]
    pub payloads: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct TextPayload {
    #[serde(default)]
    rich_text: Vec<WireRichText>,
    #[serde(default)]
    color: Color,
    #[serde(default)]
    checked: bool,
    #[serde(default)]
    is_toggleable: bool,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    caption: Vec<WireRichText>,
    #[serde(default)]
    icon: Option<Value>,
}

impl TextPayload {
    fn content(&mut self) -> TextBlockContent {
        TextBlockContent {
            rich_text: rich_text(std::mem::take(&mut self.rich_text)),
            color: self.color,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct MediaPayload {
    #[serde(default)]
    external: Option<ExternalFile>,
    #[serde(default)]
    file: Option<NotionFile>,
    #[serde(default)]
    caption: Vec<WireRichText>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LinkPayload {
    #[serde(default)]
    url: String,
    #[serde(default)]
    caption: Vec<WireRichText>,
}

#[derive(Debug, Default, Deserialize)]
struct TitlePayload {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct TablePayload {
    #[serde(default)]
    table_width: usize,
    #[serde(default)]
    has_column_header: bool,
    #[serde(default)]
    has_row_header: bool,
}

#[derive(Debug, Default, Deserialize)]
struct TableRowPayload {
    #[serde(default)]
    cells: Vec<Vec<WireRichText>>,
}

#[derive(Debug, Default, Deserialize)]
struct SyncedPayload {
    #[serde(default)]
    synced_from: Option<WireSyncedFrom>,
}

#[derive(Debug, Deserialize)]
struct WireSyncedFrom {
    block_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct EquationPayload {
    #[serde(default)]
    expression: String,
}

/// Decodes a payload, treating `null` as an empty object.
fn decode<T: DeserializeOwned + Default>(payload: &Value) -> Result<T, serde_json::Error> {
    if payload.is_null() {
        return Ok(T::default());
    }
    T::deserialize(payload)
}

fn media(common: BlockCommon, payload: MediaPayload) -> MediaBlock {
    // An uploaded file wins over an external link when both are present.
    let source = match (payload.file, payload.external) {
        (Some(file), _) => Some(FileObject::File { file }),
        (None, Some(external)) => Some(FileObject::External { external }),
        (None, None) => None,
    };
    MediaBlock {
        common,
        source,
        caption: rich_text(payload.caption),
        name: payload.name,
    }
}

fn heading(common: BlockCommon, mut payload: TextPayload) -> HeadingBlock {
    HeadingBlock {
        common,
        content: payload.content(),
        is_toggleable: payload.is_toggleable,
    }
}

fn link(common: BlockCommon, payload: LinkPayload) -> LinkBlock {
    LinkBlock {
        common,
        url: payload.url,
        caption: rich_text(payload.caption),
    }
}

fn convert_payload(
    block_type: &str,
    common: BlockCommon,
    payload: &Value,
) -> Result<Block, serde_json::Error> {
    let block = match block_type {
        "paragraph" => {
            let mut p: TextPayload = decode(payload)?;
            Block::Paragraph(ParagraphBlock {
                common,
                content: p.content(),
            })
        }
        "heading_1" => Block::Heading1(heading(common, decode(payload)?)),
        "heading_2" => Block::Heading2(heading(common, decode(payload)?)),
        "heading_3" => Block::Heading3(heading(common, decode(payload)?)),
        "bulleted_list_item" | "numbered_list_item" => {
            let mut p: TextPayload = decode(payload)?;
            let item = ListItemBlock {
                common,
                content: p.content(),
            };
            if block_type == "bulleted_list_item" {
                Block::BulletedListItem(item)
            } else {
                Block::NumberedListItem(item)
            }
        }
        "to_do" => {
            let mut p: TextPayload = decode(payload)?;
            Block::ToDo(ToDoBlock {
                common,
                content: p.content(),
                checked: p.checked,
            })
        }
        "toggle" => {
            let mut p: TextPayload = decode(payload)?;
            Block::Toggle(ToggleBlock {
                common,
                content: p.content(),
            })
        }
        "callout" => {
            let mut p: TextPayload = decode(payload)?;
            Block::Callout(CalloutBlock {
                common,
                icon: p.icon.take().and_then(parse_icon),
                content: p.content(),
            })
        }
        "quote" => {
            let mut p: TextPayload = decode(payload)?;
            Block::Quote(QuoteBlock {
                common,
                content: p.content(),
            })
        }
        "code" => {
            let mut p: TextPayload = decode(payload)?;
            Block::Code(CodeBlock {
                common,
                language: p.language.take().unwrap_or_default(),
                caption: rich_text(std::mem::take(&mut p.caption)),
                content: p.content(),
            })
        }
        "image" => Block::Image(media(common, decode(payload)?)),
        "video" => Block::Video(media(common, decode(payload)?)),
        "audio" => Block::Audio(media(common, decode(payload)?)),
        "file" => Block::File(media(common, decode(payload)?)),
        "pdf" => Block::Pdf(media(common, decode(payload)?)),
        "embed" => Block::Embed(link(common, decode(payload)?)),
        "bookmark" => Block::Bookmark(link(common, decode(payload)?)),
        "divider" => Block::Divider(MarkerBlock { common }),
        "table" => {
            let p: TablePayload = decode(payload)?;
            Block::Table(TableBlock {
                common,
                table_width: p.table_width,
                has_column_header: p.has_column_header,
                has_row_header: p.has_row_header,
            })
        }
        "table_row" => {
            let p: TableRowPayload = decode(payload)?;
            Block::TableRow(TableRowBlock {
                common,
                cells: p.cells.into_iter().map(rich_text).collect(),
            })
        }
        "column_list" => Block::ColumnList(MarkerBlock { common }),
        "column" => Block::Column(MarkerBlock { common }),
        "synced_block" => {
            let p: SyncedPayload = decode(payload)?;
            Block::Synced(SyncedBlock {
                common,
                synced_from: p.synced_from.and_then(|from| {
                    BlockId::parse(&from.block_id)
                        .ok()
                        .map(|block_id| SyncedFrom { block_id })
                }),
            })
        }
        "child_page" | "child_database" => {
            let p: TitlePayload = decode(payload)?;
            let child = ChildBlock {
                common,
                title: p.title,
            };
            if block_type == "child_page" {
                Block::ChildPage(child)
            } else {
                Block::ChildDatabase(child)
            }
        }
        "equation" => {
            let p: EquationPayload = decode(payload)?;
            Block::Equation(EquationBlock {
                common,
                expression: p.expression,
            })
        }
        "link_preview" => {
            let p: LinkPayload = decode(payload)?;
            Block::LinkPreview(LinkPreviewBlock { common, url: p.url })
        }
        "table_of_contents" => Block::TableOfContents(MarkerBlock { common }),
        "breadcrumb" => Block::Breadcrumb(MarkerBlock { common }),
        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: other.to_string(),
            payload: payload.clone(),
        }),
    };
    Ok(block)
}

impl ToDomain<Block> for WireBlock {
    fn to_domain(mut self) -> Block {
        let payload = self
            .payloads
            .remove(&self.block_type)
            .unwrap_or(Value::Null);
        let common = BlockCommon {
            id: BlockId::parse(&self.id)
                .unwrap_or_else(|_| BlockId::from_normalized(self.id.clone())),
            children: Vec::new(),
            has_children: self.has_children,
            archived: self.archived,
        };

        match convert_payload(&self.block_type, common.clone(), &payload) {
            Ok(block) => block,
            Err(e) => {
                log::warn!(
                    "Could not decode {} block {}: {}; keeping raw payload",
                    self.block_type,
                    self.id,
                    e
                );
                Block::Unsupported(UnsupportedBlock {
                    common,
                    block_type: self.block_type,
                    payload,
                })
            }
        }
    }
}

// --- Pages ---

/// A page as returned by `GET /pages/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePage {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: Option<Value>,
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
    #[serde(default)]
    pub parent: Option<Value>,
    #[serde(default)]
    pub archived: bool,
}

impl ToDomain<Page> for WirePage {
    fn to_domain(self) -> Page {
        let properties = self
            .properties
            .into_iter()
            .map(|(name, value)| (PropertyName::new(name), parse_property(&value)))
            .collect();

        Page {
            id: PageId::parse(&self.id).unwrap_or_else(|_| PageId::from_normalized(self.id)),
            url: self.url,
            icon: self.icon.and_then(parse_icon),
            properties,
            parent: self.parent.as_ref().and_then(parse_parent),
            archived: self.archived,
        }
    }
}

fn parse_rich_text_array(value: Option<&Value>) -> Vec<RichTextItem> {
    value
        .cloned()
        .and_then(|v| serde_json::from_value::<Vec<WireRichText>>(v).ok())
        .map(rich_text)
        .unwrap_or_default()
}

fn parse_property(value: &Value) -> PropertyValue {
    let kind = value.get("type").and_then(Value::as_str).unwrap_or("unknown");
    match kind {
        "title" => PropertyValue::Title(parse_rich_text_array(value.get("title"))),
        "rich_text" => PropertyValue::RichText(parse_rich_text_array(value.get("rich_text"))),
        other => PropertyValue::Other {
            kind: other.to_string(),
        },
    }
}

/// Icons Notion adds in the future are dropped rather than failing the page.
fn parse_icon(value: Value) -> Option<Icon> {
    serde_json::from_value(value).ok()
}

fn parse_parent(value: &Value) -> Option<Parent> {
    let kind = value.get("type").and_then(Value::as_str)?;
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    match kind {
        "workspace" => Some(Parent::Workspace),
        "page_id" => Some(Parent::Page {
            page_id: field("page_id"),
        }),
        "database_id" => Some(Parent::Database {
            database_id: field("database_id"),
        }),
        "block_id" => Some(Parent::Block {
            block_id: field("block_id"),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(value: Value) -> Block {
        serde_json::from_value::<WireBlock>(value).unwrap().to_domain()
    }

    #[test]
    fn test_paragraph_with_annotations() {
        let parsed = block(json!({
            "object": "block",
            "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
            "type": "paragraph",
            "has_children": false,
            "paragraph": {
                "rich_text": [{
                    "type": "text",
                    "text": {"content": "Hi", "link": null},
                    "annotations": {"bold": true, "italic": false, "strikethrough": false,
                                    "underline": false, "code": false, "color": "red"},
                    "plain_text": "Hi",
                    "href": null
                }],
                "color": "default"
            }
        }));

        let Block::Paragraph(p) = parsed else {
            panic!("expected paragraph, got {:?}", parsed);
        };
        assert_eq!(p.common.id.as_str(), "c02fc1d3db8b45c5a22227595b15aea7");
        assert_eq!(p.content.rich_text[0].plain_text, "Hi");
        assert!(p.content.rich_text[0].annotations.bold);
        assert_eq!(p.content.rich_text[0].annotations.color, Color::Red);
    }

    #[test]
    fn test_media_prefers_uploaded_file() {
        let parsed = block(json!({
            "id": "c02fc1d3db8b45c5a22227595b15aea7",
            "type": "image",
            "image": {
                "type": "file",
                "file": {"url": "https://s3.example/a.png", "expiry_time": "2025-01-01T00:00:00.000Z"},
                "caption": []
            }
        }));
        let Block::Image(image) = parsed else {
            panic!("expected image");
        };
        assert_eq!(image.url(), "https://s3.example/a.png");
    }

    #[test]
    fn test_unknown_type_keeps_payload() {
        let parsed = block(json!({
            "id": "c02fc1d3db8b45c5a22227595b15aea7",
            "type": "meeting_notes",
            "has_children": true,
            "meeting_notes": {"title": "Standup"}
        }));
        let Block::Unsupported(unsupported) = parsed else {
            panic!("expected unsupported");
        };
        assert_eq!(unsupported.block_type, "meeting_notes");
        assert_eq!(unsupported.payload["title"], "Standup");
        assert!(unsupported.common.has_children);
    }

    #[test]
    fn test_malformed_known_payload_degrades_to_unsupported() {
        let parsed = block(json!({
            "id": "c02fc1d3db8b45c5a22227595b15aea7",
            "type": "to_do",
            "to_do": {"rich_text": "not an array"}
        }));
        assert!(matches!(parsed, Block::Unsupported(_)));
        assert_eq!(parsed.block_type(), "to_do");
    }

    #[test]
    fn test_page_properties_keep_order() {
        let page: Page = serde_json::from_value::<WirePage>(json!({
            "object": "page",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "icon": {"type": "emoji", "emoji": "🚀"},
            "parent": {"type": "workspace", "workspace": true},
            "properties": {
                "Tags": {"id": "a", "type": "multi_select", "multi_select": []},
                "Name": {"id": "title", "type": "title", "title": [
                    {"type": "text", "text": {"content": "Launch"}, "plain_text": "Launch"}
                ]}
            }
        }))
        .unwrap()
        .to_domain();

        let kinds: Vec<&str> = page.properties.values().map(PropertyValue::kind).collect();
        assert_eq!(kinds, vec!["multi_select", "title"]);
        assert_eq!(page.icon, Some(Icon::Emoji { emoji: "🚀".to_string() }));
        assert_eq!(page.parent, Some(Parent::Workspace));
    }
}
