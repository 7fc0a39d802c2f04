// src/api/fetcher.rs
//! Recursive retrieval of a page's block tree.
//!
//! Every block that declares children gets them fetched and attached
//! before it is returned. Sibling subtrees are fetched concurrently and
//! reassembled in source order; the pages of a single listing are always
//! walked one after another because each needs the previous cursor.
//!
//! The concurrency bound covers the whole tree: every listing request
//! holds a permit from one shared semaphore, whatever level it is on.

use super::pagination::collect_pages;
use super::types::{FetchContext, FetchMetadata, FetchOutcome, DEPTH_CEILING_WARNING};
use super::NotionRepository;
use crate::constants::{MAX_FETCH_CONCURRENCY, MAX_FETCH_DEPTH};
use crate::error::AppError;
use crate::model::Block;
use crate::types::{NotionId, Warning, WarningLevel};
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Fetches complete block trees from a [`NotionRepository`].
pub struct BlockTreeFetcher {
    repository: Arc<dyn NotionRepository>,
    concurrency: usize,
    permits: Arc<Semaphore>,
    max_depth: u8,
}

impl BlockTreeFetcher {
    /// Default concurrency follows the machine's core count. Workers wait
    /// on the network, so the value is clamped rather than matched.
    pub fn new(repository: Arc<dyn NotionRepository>) -> Self {
        let concurrency = num_cpus::get().clamp(2, MAX_FETCH_CONCURRENCY);
        Self {
            repository,
            concurrency,
            permits: Arc::new(Semaphore::new(concurrency)),
            max_depth: MAX_FETCH_DEPTH,
        }
    }

    /// Upper bound on listing requests in flight across the tree. `1`
    /// fetches sequentially.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_FETCH_CONCURRENCY);
        self.permits = Arc::new(Semaphore::new(self.concurrency));
        self
    }

    /// Levels below the root whose children are still listed.
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Fetches every block below `root`.
    ///
    /// Never fails: unreachable subtrees come back empty or partial and
    /// are described in `metadata.warnings`.
    pub async fn fetch_all(&self, root: &NotionId) -> FetchOutcome {
        log::info!(
            "Fetching block tree for {} (max depth {}, concurrency {})",
            root,
            self.max_depth,
            self.concurrency
        );

        let context = FetchContext::new(self.max_depth).with_visited(root.clone());
        let (blocks, metadata) = self.fetch_level(root.clone(), context).await;

        log::info!(
            "Fetched {} blocks in {} requests (deepest level {}, {} warnings)",
            metadata.items_fetched,
            metadata.requests_made,
            metadata.max_depth_reached,
            metadata.warnings.len()
        );

        FetchOutcome { blocks, metadata }
    }

    /// Fetches the direct children of `parent`, then their subtrees.
    fn fetch_level(
        &self,
        parent: NotionId,
        context: FetchContext,
    ) -> BoxFuture<'_, (Vec<Block>, FetchMetadata)> {
        async move {
            if context.is_past_ceiling() {
                log::debug!(
                    "Depth {} exceeds ceiling {}; not fetching children of {}",
                    context.depth,
                    context.max_depth,
                    parent
                );
                let warning = Warning::new(
                    WarningLevel::Warning,
                    format!(
                        "{} {} were not fetched",
                        DEPTH_CEILING_WARNING, context.max_depth
                    ),
                )
                .with_context(parent.to_string());
                return (Vec::new(), FetchMetadata::default().with_warning(warning));
            }

            let repository = Arc::clone(&self.repository);
            let permits = Arc::clone(&self.permits);
            let listing = collect_pages(|cursor| {
                let repository = Arc::clone(&repository);
                let permits = Arc::clone(&permits);
                let parent = parent.clone();
                async move {
                    let _permit = permits.acquire_owned().await.map_err(|e| {
                        AppError::Validation(format!("fetch cancelled: {}", e))
                    })?;
                    repository.list_children(&parent, cursor.as_deref()).await
                }
            })
            .await;

            let mut metadata = FetchMetadata {
                items_fetched: listing.items.len() as u32,
                requests_made: listing.pages_fetched + u32::from(listing.failure.is_some()),
                max_depth_reached: if listing.items.is_empty() { 0 } else { context.depth },
                warnings: Vec::new(),
            };

            if let Some(failure) = listing.failure {
                metadata = metadata.with_warning(
                    Warning::new(
                        WarningLevel::Error,
                        format!(
                            "Listing stopped after {} block(s): {}",
                            listing.items.len(),
                            failure
                        ),
                    )
                    .with_context(parent.to_string()),
                );
            }

            let subtrees: Vec<(Block, FetchMetadata)> = futures::stream::iter(listing.items)
                .map(|block| self.attach_children(block, &context))
                .buffered(self.concurrency)
                .collect()
                .await;

            let mut blocks = Vec::with_capacity(subtrees.len());
            for (block, child_metadata) in subtrees {
                metadata = metadata.merge(child_metadata);
                blocks.push(block);
            }

            (blocks, metadata)
        }
        .boxed()
    }

    async fn attach_children(
        &self,
        mut block: Block,
        context: &FetchContext,
    ) -> (Block, FetchMetadata) {
        if !block.has_children() {
            return (block, FetchMetadata::default());
        }

        let id = NotionId::from(block.id());
        if context.has_visited(&id) {
            log::warn!("Block {} appears inside itself; skipping its children", id);
            let warning = Warning::new(WarningLevel::Warning, "Cyclic block reference skipped")
                .with_context(id.to_string());
            return (block, FetchMetadata::default().with_warning(warning));
        }

        let child_context = context.clone().with_visited(id.clone()).descend();
        let (children, metadata) = self.fetch_level(id, child_context).await;
        block.set_children(children);
        (block, metadata)
    }
}
