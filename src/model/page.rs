use super::blocks::Icon;
use crate::types::{PageId, PropertyName, RichTextItem};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A Notion page as returned by the page endpoint.
///
/// Properties keep the order the API sent them in, so "the first title
/// property" is well defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub url: String,
    pub icon: Option<Icon>,
    pub properties: IndexMap<PropertyName, PropertyValue>,
    pub parent: Option<Parent>,
    pub archived: bool,
}

/// Property values the exporter reads. Everything else keeps only its
/// type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Title(Vec<RichTextItem>),
    RichText(Vec<RichTextItem>),
    Other { kind: String },
}

impl PropertyValue {
    pub fn kind(&self) -> &str {
        match self {
            PropertyValue::Title(_) => "title",
            PropertyValue::RichText(_) => "rich_text",
            PropertyValue::Other { kind } => kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parent {
    Workspace,
    Page { page_id: String },
    Database { database_id: String },
    Block { block_id: String },
}
