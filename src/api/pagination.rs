// src/api/pagination.rs
//! Cursor pagination that keeps what it already has when a page fails.

use super::types::{PaginatedResponse, PaginationResult};
use crate::error::AppError;

/// Follows a cursor chain to its end, one request at a time.
///
/// Each request receives the cursor from the previous response, so pages
/// are requested strictly in order. When a request fails the walk stops,
/// the error is logged, and the items from earlier pages are returned
/// alongside the failure.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> PaginationResult<T>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = match fetch_page(cursor.take()).await {
            Ok(response) => response,
            Err(e) => {
                log::error!(
                    "Pagination stopped after {} page(s): {}",
                    pages_fetched,
                    e
                );
                return PaginationResult {
                    items,
                    pages_fetched,
                    failure: Some(e),
                };
            }
        };

        pages_fetched += 1;
        items.extend(response.results);

        match response.next_cursor {
            Some(next) if response.has_more => cursor = Some(next),
            _ => break,
        }
    }

    PaginationResult {
        items,
        pages_fetched,
        failure: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn page(results: Vec<u32>, next: Option<&str>) -> PaginatedResponse<u32> {
        PaginatedResponse {
            object: "list".to_string(),
            results,
            has_more: next.is_some(),
            next_cursor: next.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_threads_cursor_in_order() {
        let seen = Mutex::new(Vec::new());
        let result = collect_pages(|cursor| {
            seen.lock().unwrap().push(cursor.clone());
            async move {
                Ok(match cursor.as_deref() {
                    None => page(vec![1, 2], Some("b")),
                    Some("b") => page(vec![3], Some("c")),
                    _ => page(vec![4], None),
                })
            }
        })
        .await;

        assert_eq!(result.items, vec![1, 2, 3, 4]);
        assert_eq!(result.pages_fetched, 3);
        assert!(result.failure.is_none());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("b".to_string()), Some("c".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_earlier_pages() {
        let result = collect_pages(|cursor| async move {
            match cursor {
                None => Ok(page(vec![1, 2], Some("b"))),
                Some(_) => Err(AppError::MalformedResponse("boom".to_string())),
            }
        })
        .await;

        assert_eq!(result.items, vec![1, 2]);
        assert_eq!(result.pages_fetched, 1);
        assert!(matches!(
            result.failure,
            Some(AppError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_has_more_without_cursor_stops() {
        let result = collect_pages(|_| async {
            Ok(PaginatedResponse {
                object: "list".to_string(),
                results: vec![7],
                next_cursor: None,
                has_more: true,
            })
        })
        .await;
        assert_eq!(result.items, vec![7]);
        assert_eq!(result.pages_fetched, 1);
    }
}
