// tests/common/mod.rs
//! Block builders and a scripted Notion workspace shared by the
//! integration tests.

#![allow(dead_code)]

use indexmap::IndexMap;
use notion2blog::api::PaginatedResponse;
use notion2blog::model::{
    Block, BlockCommon, CalloutBlock, ChildBlock, CodeBlock, HeadingBlock, Icon, ListItemBlock,
    MarkerBlock, MediaBlock, ParagraphBlock, TableBlock, TableRowBlock, TextBlockContent,
    ToDoBlock, ToggleBlock,
};
use notion2blog::types::{BlockId, Color, NotionId, PageId, PropertyName, RichTextItem};
use notion2blog::{AppError, NotionRepository, Page, PropertyValue};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// =============================================================================
// Block builders
// =============================================================================

fn common() -> BlockCommon {
    BlockCommon::new(BlockId::from(&NotionId::new_v4()))
}

pub fn rich(text: &str) -> Vec<RichTextItem> {
    vec![RichTextItem::plain_text(text)]
}

fn content(text: &str) -> TextBlockContent {
    TextBlockContent::new(rich(text))
}

pub fn paragraph(text: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: common(),
        content: content(text),
    })
}

pub fn heading1(text: &str) -> Block {
    Block::Heading1(HeadingBlock {
        common: common(),
        content: content(text),
        is_toggleable: false,
    })
}

pub fn heading2(text: &str) -> Block {
    Block::Heading2(HeadingBlock {
        common: common(),
        content: content(text),
        is_toggleable: false,
    })
}

pub fn bulleted(text: &str) -> Block {
    Block::BulletedListItem(ListItemBlock {
        common: common(),
        content: content(text),
    })
}

pub fn numbered(text: &str) -> Block {
    Block::NumberedListItem(ListItemBlock {
        common: common(),
        content: content(text),
    })
}

pub fn to_do(text: &str, checked: bool) -> Block {
    Block::ToDo(ToDoBlock {
        common: common(),
        content: content(text),
        checked,
    })
}

pub fn toggle(text: &str) -> Block {
    Block::Toggle(ToggleBlock {
        common: common(),
        content: content(text),
    })
}

pub fn callout(text: &str, emoji: &str, color: Color) -> Block {
    Block::Callout(CalloutBlock {
        common: common(),
        icon: Some(Icon::Emoji {
            emoji: emoji.to_string(),
        }),
        content: TextBlockContent {
            rich_text: rich(text),
            color,
        },
    })
}

pub fn code(language: &str, source: &str) -> Block {
    Block::Code(CodeBlock {
        common: common(),
        language: language.to_string(),
        caption: Vec::new(),
        content: content(source),
    })
}

pub fn image(url: &str) -> Block {
    Block::Image(MediaBlock {
        common: common(),
        source: Some(notion2blog::model::FileObject::external(url)),
        caption: Vec::new(),
        name: None,
    })
}

pub fn divider() -> Block {
    Block::Divider(MarkerBlock { common: common() })
}

pub fn child_page(title: &str) -> Block {
    Block::ChildPage(ChildBlock {
        common: common(),
        title: title.to_string(),
    })
}

pub fn table(has_column_header: bool, rows: &[&[&str]]) -> Block {
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    let rows = rows
        .iter()
        .map(|cells| {
            Block::TableRow(TableRowBlock {
                common: common(),
                cells: cells.iter().map(|c| rich(c)).collect(),
            })
        })
        .collect();
    Block::Table(TableBlock {
        common: common(),
        table_width: width,
        has_column_header,
        has_row_header: false,
    })
    .with_children(rows)
}

/// A chain `depth` blocks long: each paragraph holds the next.
pub fn nested_chain(depth: usize) -> Block {
    let mut block = paragraph(&format!("level {}", depth));
    for level in (1..depth).rev() {
        block = paragraph(&format!("level {}", level)).with_children(vec![block]);
    }
    block
}

// =============================================================================
// Pages
// =============================================================================

pub const PAGE_HEX: &str = "0123456789abcdef0123456789abcdef";
pub const PAGE_URL: &str =
    "https://www.notion.so/acme/Launch-Plan-0123456789abcdef0123456789abcdef";

pub fn page_id() -> NotionId {
    NotionId::parse(PAGE_HEX).unwrap()
}

pub fn page(title: &str, emoji: Option<&str>) -> Page {
    let mut properties = IndexMap::new();
    properties.insert(
        PropertyName::new("Name"),
        PropertyValue::Title(rich(title)),
    );
    Page {
        id: PageId::parse(PAGE_HEX).unwrap(),
        url: format!("https://www.notion.so/{}", PAGE_HEX),
        icon: emoji.map(|e| Icon::Emoji {
            emoji: e.to_string(),
        }),
        properties,
        parent: None,
        archived: false,
    }
}

// =============================================================================
// Scripted workspace
// =============================================================================

/// A Notion workspace held in memory.
///
/// `publish` flattens a block tree the way the API serves it: each
/// listing returns blocks without children, marked `has_children`, and
/// the children are listed under the block's own id.
#[derive(Default)]
pub struct FakeNotion {
    page: Option<Page>,
    children: HashMap<NotionId, Vec<Block>>,
    page_size: usize,
    failing_parents: Vec<NotionId>,
    latency: Option<Duration>,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
    pub listing_requests: Mutex<Vec<NotionId>>,
    pub page_requests: Mutex<u32>,
}

impl FakeNotion {
    pub fn new() -> Self {
        Self {
            page_size: 100,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Each listing takes `latency` to answer.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every listing of `parent` fails.
    pub fn failing(mut self, parent: NotionId) -> Self {
        self.failing_parents.push(parent);
        self
    }

    pub fn publish(mut self, parent: &NotionId, blocks: Vec<Block>) -> Self {
        self.insert_tree(parent, blocks);
        self
    }

    fn insert_tree(&mut self, parent: &NotionId, blocks: Vec<Block>) {
        let mut flat = Vec::with_capacity(blocks.len());
        for mut block in blocks {
            let children = block.children().to_vec();
            let id = NotionId::from(block.id());
            block.common_mut().has_children = !children.is_empty();
            block.set_children(Vec::new());
            if !children.is_empty() {
                self.insert_tree(&id, children);
            }
            flat.push(block);
        }
        self.children.insert(parent.clone(), flat);
    }

    pub fn listing_count(&self) -> usize {
        self.listing_requests.lock().len()
    }

    /// Most listings that were ever answered at the same time.
    pub fn peak_listings(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl NotionRepository for FakeNotion {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError> {
        *self.page_requests.lock() += 1;
        match &self.page {
            Some(page) if &NotionId::from(&page.id) == id => Ok(page.clone()),
            _ => Err(AppError::NotionService {
                code: notion2blog::NotionErrorCode::ObjectNotFound,
                message: format!("Could not find page with ID: {}", id),
                status: reqwest::StatusCode::NOT_FOUND,
            }),
        }
    }

    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        self.listing_requests.lock().push(parent.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_parents.contains(parent) {
            return Err(AppError::NotionService {
                code: notion2blog::NotionErrorCode::RestrictedResource,
                message: "restricted".to_string(),
                status: reqwest::StatusCode::FORBIDDEN,
            });
        }

        let all = self.children.get(parent).cloned().unwrap_or_default();
        let start: usize = cursor.and_then(|c| c.parse().ok()).unwrap_or(0);
        let end = (start + self.page_size).min(all.len());
        let has_more = end < all.len();

        Ok(PaginatedResponse {
            object: "list".to_string(),
            results: all[start.min(end)..end].to_vec(),
            next_cursor: has_more.then(|| end.to_string()),
            has_more,
        })
    }
}
