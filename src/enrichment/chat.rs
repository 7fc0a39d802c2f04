// src/enrichment/chat.rs
//! OpenAI-compatible chat-completions client for SEO suggestions.

use super::{extract_json_object, SeoEnricher, SeoSuggestion};
use crate::api::extract_response_text;
use crate::constants::{
    DEFAULT_ENRICHMENT_MODEL, DEFAULT_ENRICHMENT_URL, ENRICHMENT_TIMEOUT_SECS,
    ERROR_BODY_PREVIEW_LENGTH,
};
use crate::error::AppError;
use crate::types::{EnrichmentKey, ValidatedUrl};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You write SEO metadata for blog posts. \
You are given a page title and its HTML. Do not rewrite, clean or return the HTML. \
Reply with a single JSON object and nothing else.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Calls a chat-completions endpoint and reads metadata from the reply.
#[derive(Debug, Clone)]
pub struct ChatCompletionsEnricher {
    client: Client,
    endpoint: ValidatedUrl,
    key: EnrichmentKey,
    model: String,
}

impl ChatCompletionsEnricher {
    pub fn new(key: EnrichmentKey) -> Result<Self, AppError> {
        let endpoint = ValidatedUrl::parse(DEFAULT_ENRICHMENT_URL)?;
        Self::with_endpoint(key, endpoint, DEFAULT_ENRICHMENT_MODEL)
    }

    pub fn with_endpoint(
        key: EnrichmentKey,
        endpoint: ValidatedUrl,
        model: &str,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(ENRICHMENT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint,
            key,
            model: model.to_string(),
        })
    }

    fn user_prompt(title: &str, html: &str) -> String {
        format!(
            "Original title: {title}\n\nHTML content:\n{html}\n\n\
             Return JSON with exactly these fields:\n\
             {{\n  \"title\": \"SEO title, at most 60 characters\",\n  \
             \"description\": \"meta description, at most 160 characters\",\n  \
             \"slug\": \"url-friendly-slug\"\n}}"
        )
    }
}

#[async_trait::async_trait]
impl SeoEnricher for ChatCompletionsEnricher {
    async fn suggest(&self, title: &str, html: &str) -> Result<SeoSuggestion, AppError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::user_prompt(title, html),
                },
            ],
        };

        log::debug!("Requesting SEO metadata from {} ({})", self.endpoint.host(), self.model);
        let response = self
            .client
            .post(self.endpoint.as_str())
            .bearer_auth(self.key.as_str())
            .json(&request)
            .send()
            .await?;
        let result = extract_response_text(response).await?;

        if !result.status.is_success() {
            let preview: String = result.data.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
            return Err(AppError::EnrichmentUnavailable(format!(
                "HTTP {} from {}: {}",
                result.status, result.url, preview
            )));
        }

        let reply: ChatResponse = serde_json::from_str(&result.data)
            .map_err(|e| AppError::EnrichmentUnavailable(format!("unexpected reply: {}", e)))?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::EnrichmentUnavailable("reply had no choices".to_string()))?;

        extract_json_object(&content)
    }
}
