// src/api/parser.rs
//! Turns raw Notion responses into domain values or typed errors.

use super::client::ApiResponse;
use super::responses::{ToDomain, WireBlock, WirePage};
use super::types::{NotionApiErrorResponse, PaginatedResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Page};
use reqwest::StatusCode;

/// Parse any Notion API response: success bodies into `T`, error bodies
/// into `AppError::NotionService`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionApiErrorResponse>(body) {
        return AppError::NotionService {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status,
        };
    }

    AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        status,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Parse a page response
pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, AppError> {
    let page: WirePage = parse_api_response(result)?;
    Ok(page.to_domain())
}

/// Parse one page of a block-children listing
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: PaginatedResponse<WireBlock> = parse_api_response(result)?;

    Ok(PaginatedResponse {
        object: response.object,
        results: response
            .results
            .into_iter()
            .map(ToDomain::to_domain)
            .collect(),
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}
