// src/export/orchestrator.rs
//! The request-level export workflow.
//!
//! Authorization, quota and URL problems reject the request before any
//! Notion call is made. Once the page itself is retrieved, everything
//! below it degrades instead of failing: missing subtrees render as
//! empty, and a failed enrichment falls back to derived metadata.

use super::identity::Authenticator;
use super::plans::month_start;
use super::store::ExportStore;
use super::types::{Caller, Export, ExportReceipt, ExportRequest, ExportStatus};
use crate::analytics::{measure_tree, TreeMeasurement};
use crate::api::{BlockTreeFetcher, FetchMetadata, NotionRepository};
use crate::enrichment::{SeoEnricher, SeoMetadata};
use crate::error::AppError;
use crate::formatting::{compose_markdown, compose_page_html, render_blocks_with_diagnostics, Frontmatter};
use crate::metadata::{page_icon, page_title};
use crate::types::{NotionId, ValidationError, Warning};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Resolves the page id from a user-supplied Notion link or id.
pub fn extract_page_id(notion_url: &str) -> Result<NotionId, AppError> {
    NotionId::parse(notion_url).map_err(|e| match e {
        ValidationError::InvalidNotionUrl(url) => AppError::InvalidNotionUrl(url),
        ValidationError::EmptyField(_) => AppError::Validation("Notion URL is required".to_string()),
        other => AppError::from(other),
    })
}

/// A stored export together with what happened while producing it.
#[derive(Debug, Clone)]
pub struct CompletedExport {
    pub export: Export,
    pub fetch: FetchMetadata,
    pub tree: TreeMeasurement,
    pub render_warnings: Vec<Warning>,
    /// False when the SEO metadata was derived rather than suggested.
    pub enriched: bool,
}

impl CompletedExport {
    pub fn receipt(&self) -> ExportReceipt {
        self.export.receipt()
    }
}

/// Runs export requests against a Notion workspace.
pub struct ExportOrchestrator {
    repository: Arc<dyn NotionRepository>,
    authenticator: Arc<dyn Authenticator>,
    enricher: Arc<dyn SeoEnricher>,
    store: Arc<dyn ExportStore>,
    fetch_concurrency: Option<usize>,
}

impl ExportOrchestrator {
    pub fn new(
        repository: Arc<dyn NotionRepository>,
        authenticator: Arc<dyn Authenticator>,
        enricher: Arc<dyn SeoEnricher>,
        store: Arc<dyn ExportStore>,
    ) -> Self {
        Self {
            repository,
            authenticator,
            enricher,
            store,
            fetch_concurrency: None,
        }
    }

    pub fn with_fetch_concurrency(mut self, concurrency: usize) -> Self {
        self.fetch_concurrency = Some(concurrency);
        self
    }

    /// Converts the requested page and persists the result.
    pub async fn export(&self, request: ExportRequest) -> Result<CompletedExport, AppError> {
        if request.notion_url.trim().is_empty() {
            return Err(AppError::Validation("Notion URL is required".to_string()));
        }

        let caller = self
            .authenticator
            .authenticate(request.credentials.as_deref())
            .await?;
        self.check_quota(&caller).await?;

        let page_id = extract_page_id(&request.notion_url)?;
        log::info!("Exporting Notion page {} for {}", page_id, caller.user_id);

        let page = self
            .repository
            .retrieve_page(&page_id)
            .await
            .map_err(|source| {
                log::error!("Failed to fetch page {}: {}", page_id, source);
                AppError::PageUnavailable {
                    page_id: page_id.to_string(),
                    source: Box::new(source),
                }
            })?;

        let fetcher = match self.fetch_concurrency {
            Some(n) => BlockTreeFetcher::new(self.repository.clone()).with_concurrency(n),
            None => BlockTreeFetcher::new(self.repository.clone()),
        };
        let tree = fetcher.fetch_all(&page_id).await;
        for warning in &tree.metadata.warnings {
            log::warn!("Fetch warning: {}", warning);
        }
        let measurement = measure_tree(&tree.blocks);
        log::info!(
            "Fetched {} in {} requests",
            measurement,
            tree.metadata.requests_made
        );

        let raw_title = page_title(&page);
        let icon = page_icon(&page);
        let body = render_blocks_with_diagnostics(&tree.blocks);
        let html = compose_page_html(&raw_title, &icon, &body.html);
        log::info!("Generated HTML: {} characters", html.len());

        let (seo, enriched) = match self.enricher.suggest(&raw_title, &html).await {
            Ok(suggestion) => (SeoMetadata::resolve(suggestion, &raw_title), true),
            Err(e) => {
                log::warn!("SEO enrichment unavailable, deriving metadata: {}", e);
                (SeoMetadata::fallback(&raw_title), false)
            }
        };

        let created_at = Utc::now();
        let frontmatter = Frontmatter {
            title: seo.title.clone(),
            description: seo.description,
            slug: seo.slug,
            date: created_at.date_naive(),
        };
        let markdown = compose_markdown(&tree.blocks, &frontmatter);

        let export = Export {
            id: Uuid::new_v4(),
            user_id: caller.user_id,
            notion_url: request.notion_url,
            title: seo.title,
            html_content: html,
            markdown_content: Some(markdown),
            frontmatter,
            status: ExportStatus::Completed,
            created_at,
        };

        self.store.insert(&export).await.map_err(|e| match e {
            AppError::Storage(_) => e,
            other => AppError::Storage(other.to_string()),
        })?;
        log::info!("Export saved: {}", export.id);

        Ok(CompletedExport {
            export,
            fetch: tree.metadata,
            tree: measurement,
            render_warnings: body.warnings,
            enriched,
        })
    }

    async fn check_quota(&self, caller: &Caller) -> Result<(), AppError> {
        let Some(limit) = caller.plan.monthly_limit() else {
            return Ok(());
        };

        let used = self
            .store
            .count_since(&caller.user_id, month_start(Utc::now()))
            .await?;
        log::debug!(
            "{} has used {}/{} exports on the {} plan",
            caller.user_id,
            used,
            limit,
            caller.plan
        );

        if caller.plan.allows(used) {
            Ok(())
        } else {
            Err(AppError::QuotaExceeded {
                plan: caller.plan.to_string(),
                limit,
                used,
            })
        }
    }
}
