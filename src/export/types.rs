// src/export/types.rs

use super::plans::Plan;
use crate::formatting::Frontmatter;
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Completed,
}

/// One converted page, as persisted.
///
/// Exports are written once and only ever deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    pub id: Uuid,
    pub user_id: UserId,
    pub notion_url: String,
    pub title: String,
    pub html_content: String,
    pub markdown_content: Option<String>,
    pub frontmatter: Frontmatter,
    pub status: ExportStatus,
    pub created_at: DateTime<Utc>,
}

impl Export {
    pub fn receipt(&self) -> ExportReceipt {
        ExportReceipt {
            id: self.id,
            title: self.title.clone(),
            description: self.frontmatter.description.clone(),
            slug: self.frontmatter.slug.clone(),
            html: self.html_content.clone(),
            created_at: self.created_at,
        }
    }
}

/// A request to convert one shared page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub credentials: Option<String>,
    pub notion_url: String,
}

impl ExportRequest {
    pub fn new(notion_url: impl Into<String>) -> Self {
        Self {
            credentials: None,
            notion_url: notion_url.into(),
        }
    }

    pub fn with_credentials(mut self, credentials: impl Into<String>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }
}

/// What the caller gets back from a successful export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub html: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// An authenticated requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub plan: Plan,
}
