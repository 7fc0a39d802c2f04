// src/api/types.rs
//! Type definitions for the Notion API module.
//!
//! Fetch state is immutable: every step down the tree produces a new
//! `FetchContext`, and every finished subtree reports a `FetchMetadata`
//! that the parent merges into its own.

use crate::error::AppError;
use crate::model::Block;
use crate::types::{NotionId, Warning};
use serde::Deserialize;

// --- Fetch Context Types ---

/// Immutable context for recursive fetching operations.
#[derive(Debug, Clone)]
pub struct FetchContext {
    /// Ancestors of the level being fetched (persistent for cheap cloning)
    visited: im::HashSet<NotionId>,
    /// Level being fetched; root children are level 0
    pub depth: u8,
    /// Deepest level that may still be fetched
    pub max_depth: u8,
}

impl FetchContext {
    pub fn new(max_depth: u8) -> Self {
        Self {
            visited: im::HashSet::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Returns a new context with the given ID marked as visited.
    pub fn with_visited(self, id: NotionId) -> Self {
        let mut visited = self.visited;
        visited.insert(id);
        Self { visited, ..self }
    }

    /// Returns a new context one level further down.
    pub fn descend(self) -> Self {
        Self {
            depth: self.depth.saturating_add(1),
            ..self
        }
    }

    pub fn has_visited(&self, id: &NotionId) -> bool {
        self.visited.contains(id)
    }

    /// True once the level lies beyond the ceiling; such levels yield nothing.
    pub fn is_past_ceiling(&self) -> bool {
        self.depth > self.max_depth
    }
}

/// Metadata about a fetch operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchMetadata {
    /// Blocks received from the API
    pub items_fetched: u32,
    /// Child-listing requests sent
    pub requests_made: u32,
    /// Deepest level that returned at least one block
    pub max_depth_reached: u8,
    /// Truncations, failed pages and cycles encountered on the way
    pub warnings: Vec<Warning>,
}

impl FetchMetadata {
    /// Combines two metadata instances.
    pub fn merge(self, other: Self) -> Self {
        Self {
            items_fetched: self.items_fetched + other.items_fetched,
            requests_made: self.requests_made + other.requests_made,
            max_depth_reached: self.max_depth_reached.max(other.max_depth_reached),
            warnings: [self.warnings, other.warnings].concat(),
        }
    }

    pub fn with_warning(mut self, warning: Warning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Whether the depth ceiling left some children unfetched.
    pub fn was_truncated(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.message.starts_with(DEPTH_CEILING_WARNING))
    }
}

/// Opening of the warning recorded when children sit below the ceiling.
pub const DEPTH_CEILING_WARNING: &str = "Children below depth";

/// A fully fetched block tree for one page.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub blocks: Vec<Block>,
    pub metadata: FetchMetadata,
}

impl FetchOutcome {
    /// Whether any part of the tree was dropped or failed to load.
    pub fn is_partial(&self) -> bool {
        !self.metadata.warnings.is_empty()
    }

    /// Whether the depth ceiling left some children unfetched.
    pub fn was_truncated(&self) -> bool {
        self.metadata.was_truncated()
    }
}

// --- API Response Types ---

/// Generic paginated response from Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Error response from Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionApiErrorResponse {
    pub code: String,
    pub message: String,
}

// --- Pagination Types ---

/// Everything gathered by walking one cursor chain.
///
/// A failed page does not discard earlier pages; it ends the walk and is
/// reported in `failure`.
#[derive(Debug)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    pub failure: Option<AppError>,
}
