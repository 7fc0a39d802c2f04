// src/api/mod.rs
//! Notion API interaction: retrieving a page and its block tree.
//!
//! I/O, parsing and recursion are kept apart. The fetcher only depends on
//! [`NotionRepository`], never on HTTP details.

pub mod client;
pub mod fetcher;
mod pagination;
pub mod parser;
pub mod responses;
mod types;

use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::NotionId;

/// The ability to read content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// `GET /pages/{id}`
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError>;

    /// One page of `GET /blocks/{id}/children`, continuing from `cursor`.
    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<&str>,
    ) -> Result<PaginatedResponse<Block>, AppError>;
}

pub use client::{extract_response_text, ApiResponse, NotionHttpClient};
pub use fetcher::BlockTreeFetcher;
pub use pagination::collect_pages;
pub use types::{
    FetchContext, FetchMetadata, FetchOutcome, NotionApiErrorResponse, PaginatedResponse,
    PaginationResult,
};
