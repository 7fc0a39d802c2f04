// src/lib.rs
//! notion2blog library: exports shared Notion pages as styled, SEO-ready
//! HTML and Markdown blog posts.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `Cli`, `ExportConfig`
//! - **Domain model**: `Block`, `Page`, per-type payloads
//! - **Domain types**: `NotionId`, `ApiKey`, `BlockId`, `UserId`, `Color`, etc.
//! - **API client**: `NotionHttpClient`, `BlockTreeFetcher`, parsers
//! - **Formatting**: `render_blocks`, `render_markdown`, `compose_page_html`
//! - **Export**: `ExportOrchestrator`, stores, plans
//! - **Output**: `plan_delivery`, `deliver`

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod enrichment;
pub mod error;
pub mod export;
pub mod formatting;
pub mod metadata;
pub mod model;
pub mod output;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Cli, Command, ExportConfig};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon, Icon, Page, Parent, PropertyValue};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, Color, EnrichmentKey, NotionId, PageId, RichTextItem,
    RichTextType, UserId, ValidatedUrl, Warning, WarningLevel,
};

// --- API Client ---
pub use crate::api::{
    parser::{parse_blocks_pagination, parse_page_response},
    BlockTreeFetcher, FetchMetadata, FetchOutcome, NotionHttpClient, NotionRepository,
};

// --- Formatting ---
pub use crate::formatting::{
    compose_markdown, compose_page_html, render_blocks, render_blocks_with_diagnostics,
    render_html_document, render_markdown, render_markdown_with_diagnostics, render_rich_text,
    Frontmatter, RenderOutcome,
};

// --- Page Metadata ---
pub use crate::metadata::{page_icon, page_title};

// --- Enrichment ---
pub use crate::enrichment::{
    ChatCompletionsEnricher, DisabledEnricher, SeoEnricher, SeoMetadata, SeoSuggestion,
};

// --- Export ---
pub use crate::export::{
    CompletedExport, Export, ExportOrchestrator, ExportReceipt, ExportRequest, ExportStore,
    FileExportStore, MemoryExportStore, Plan,
};

// --- Output ---
pub use crate::output::{deliver, plan_delivery, DeliveryOptions, DeliveryReport};
