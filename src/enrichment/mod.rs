// src/enrichment/mod.rs
//! SEO metadata enrichment.
//!
//! An external text model may propose a title, description and slug for
//! an export. It never touches the rendered HTML, and every field it fails
//! to supply is derived from the page title instead.

mod chat;

pub use chat::ChatCompletionsEnricher;

use crate::constants::SEO_DESCRIPTION_MAX_CHARS;
use crate::error::AppError;
use crate::formatting::slugify;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref JSON_OBJECT: Regex =
        Regex::new(r"\{[\s\S]*\}").expect("JSON object regex is valid");
}

/// Metadata an enricher proposed. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeoSuggestion {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Final SEO metadata of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub slug: String,
}

impl SeoMetadata {
    /// Metadata derived from the page title alone.
    pub fn fallback(raw_title: &str) -> Self {
        Self::resolve(SeoSuggestion::default(), raw_title)
    }

    /// Fills every missing or blank suggested field from `raw_title`.
    /// Suggested slugs are normalized the same way derived ones are.
    pub fn resolve(suggestion: SeoSuggestion, raw_title: &str) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Self {
            title: present(suggestion.title).unwrap_or_else(|| raw_title.to_string()),
            description: present(suggestion.description)
                .unwrap_or_else(|| raw_title.chars().take(SEO_DESCRIPTION_MAX_CHARS).collect()),
            slug: present(suggestion.slug)
                .map(|slug| slugify(&slug))
                .filter(|slug| !slug.is_empty())
                .unwrap_or_else(|| slugify(raw_title)),
        }
    }
}

/// Something that can propose SEO metadata for a rendered page.
#[async_trait::async_trait]
pub trait SeoEnricher: Send + Sync {
    async fn suggest(&self, title: &str, html: &str) -> Result<SeoSuggestion, AppError>;
}

/// Enricher used when no enrichment service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledEnricher;

#[async_trait::async_trait]
impl SeoEnricher for DisabledEnricher {
    async fn suggest(&self, _title: &str, _html: &str) -> Result<SeoSuggestion, AppError> {
        Err(AppError::EnrichmentUnavailable(
            "no enrichment service configured".to_string(),
        ))
    }
}

/// Parses the first `{ ... }` span of free-form model output.
///
/// Models often wrap JSON in prose or code fences; the span runs from the
/// first `{` to the last `}`.
pub fn extract_json_object(text: &str) -> Result<SeoSuggestion, AppError> {
    let json = JSON_OBJECT
        .find(text)
        .ok_or_else(|| AppError::EnrichmentUnavailable("no JSON object in reply".to_string()))?;

    serde_json::from_str(json.as_str())
        .map_err(|e| AppError::EnrichmentUnavailable(format!("unparseable reply: {}", e)))
}
