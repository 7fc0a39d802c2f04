use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{BlockId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::Audio($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::Breadcrumb($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// Every Notion block type the exporter understands, plus `Unsupported`
/// for anything newer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(ListItemBlock),
    NumberedListItem(ListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Callout(CalloutBlock),
    Quote(QuoteBlock),
    Code(CodeBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    Audio(MediaBlock),
    File(MediaBlock),
    Pdf(MediaBlock),
    Embed(LinkBlock),
    Bookmark(LinkBlock),
    Divider(MarkerBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(MarkerBlock),
    Column(MarkerBlock),
    Synced(SyncedBlock),
    ChildPage(ChildBlock),
    ChildDatabase(ChildBlock),
    Equation(EquationBlock),
    LinkPreview(LinkPreviewBlock),
    TableOfContents(MarkerBlock),
    Breadcrumb(MarkerBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    pub fn children(&self) -> &[Block] {
        match_all_blocks!(self, b => &b.common.children)
    }

    /// Whether the API declared descendants for this block
    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common_mut().children = children;
    }

    /// Builder-style variant of [`Block::set_children`] that also marks
    /// the block as having children.
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        let common = self.common_mut();
        common.has_children = true;
        common.children = children;
        self
    }

    /// The wire name of the block's type
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Toggle(_) => "toggle",
            Block::Callout(_) => "callout",
            Block::Quote(_) => "quote",
            Block::Code(_) => "code",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::Audio(_) => "audio",
            Block::File(_) => "file",
            Block::Pdf(_) => "pdf",
            Block::Embed(_) => "embed",
            Block::Bookmark(_) => "bookmark",
            Block::Divider(_) => "divider",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ColumnList(_) => "column_list",
            Block::Column(_) => "column",
            Block::Synced(_) => "synced_block",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::Equation(_) => "equation",
            Block::LinkPreview(_) => "link_preview",
            Block::TableOfContents(_) => "table_of_contents",
            Block::Breadcrumb(_) => "breadcrumb",
            Block::Unsupported(b) => &b.block_type,
        }
    }

    /// The block's primary rich text, if its type has one.
    pub fn rich_text(&self) -> Option<&[RichTextItem]> {
        match self {
            Block::Paragraph(b) => Some(&b.content.rich_text),
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                Some(&b.content.rich_text)
            }
            Block::BulletedListItem(b) | Block::NumberedListItem(b) => Some(&b.content.rich_text),
            Block::ToDo(b) => Some(&b.content.rich_text),
            Block::Toggle(b) => Some(&b.content.rich_text),
            Block::Callout(b) => Some(&b.content.rich_text),
            Block::Quote(b) => Some(&b.content.rich_text),
            Block::Code(b) => Some(&b.content.rich_text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NotionId, RichTextItem};

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: BlockCommon::new(BlockId::from(&NotionId::new_v4())),
            content: TextBlockContent::new(vec![RichTextItem::plain_text(text)]),
        })
    }

    #[test]
    fn test_with_children_marks_block() {
        let parent = paragraph("parent").with_children(vec![paragraph("child")]);
        assert!(parent.has_children());
        assert_eq!(parent.children().len(), 1);

        let declared_but_empty = paragraph("lonely").with_children(Vec::new());
        assert!(declared_but_empty.has_children());
        assert!(declared_but_empty.children().is_empty());
    }

    #[test]
    fn test_unsupported_reports_its_wire_type() {
        let block = Block::Unsupported(UnsupportedBlock {
            common: BlockCommon::default(),
            block_type: "ai_block".to_string(),
            payload: serde_json::json!({"prompt": "x"}),
        });
        assert_eq!(block.block_type(), "ai_block");
        assert!(block.rich_text().is_none());
        assert_eq!(paragraph("hi").block_type(), "paragraph");
    }
}
