// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! them in order tells the story of an export: how deep the fetch goes,
//! how much each request returns, how exports are rationed, and what the
//! enrichment call asks for.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// API version header sent with every Notion request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many blocks the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips during recursive fetching.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Deepest level of children the fetcher will request.
///
/// Root children are level 0. A level past this ceiling yields no blocks.
/// The limit guards against cyclic or pathological trees.
pub const MAX_FETCH_DEPTH: u8 = 10;

/// Upper bound for sibling subtrees fetched at once.
pub const MAX_FETCH_CONCURRENCY: usize = 16;

// ---------------------------------------------------------------------------
// Rendering boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth when rendering blocks.
///
/// Fetched trees never get this deep; hand-built trees might.
pub const BLOCK_MAX_RENDER_DEPTH: usize = 64;

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

/// Fallback label for a page without a title property.
pub const UNTITLED_PAGE: &str = "Untitled";

/// Alt text for images without a caption.
pub const DEFAULT_IMAGE_ALT: &str = "Image from Notion";

/// Icon shown in callouts that carry no icon of their own.
pub const DEFAULT_CALLOUT_ICON: &str = "💡";

/// Base name of downloaded files when no slug could be derived.
pub const DEFAULT_EXPORT_FILE_STEM: &str = "export";

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// Exports per calendar month on the free plan.
pub const FREE_PLAN_MONTHLY_EXPORTS: u32 = 5;

/// Exports per calendar month on the basic plan.
pub const BASIC_PLAN_MONTHLY_EXPORTS: u32 = 20;

// ---------------------------------------------------------------------------
// SEO enrichment
// ---------------------------------------------------------------------------

/// OpenAI-compatible chat-completions endpoint used when none is configured.
pub const DEFAULT_ENRICHMENT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model requested from the chat-completions endpoint.
pub const DEFAULT_ENRICHMENT_MODEL: &str = "google/gemini-2.5-flash";

/// Longest meta description we derive ourselves.
pub const SEO_DESCRIPTION_MAX_CHARS: usize = 160;

/// Seconds before an enrichment call is abandoned.
pub const ENRICHMENT_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
