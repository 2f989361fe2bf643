//! Request execution with retry and API error mapping.
//!
//! Responsibilities:
//! - Send a request, retrying retryable statuses with exponential backoff.
//! - Turn non-success responses into [`ClientError::ApiError`] with the
//!   server's message when one is present.
//! - Decode JSON bodies, treating an empty body as `{}`.
//!
//! Does NOT handle:
//! - URL construction or auth headers (see `projects.rs`).

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::ApiErrorBody;

/// Sends an HTTP request, retrying on 429 and transient gateway errors.
///
/// Backoff is `2^attempt` seconds (1s, 2s, 4s, ...). `max_retries` counts
/// retries after the first attempt; zero means a single attempt.
///
/// # Errors
///
/// - `ClientError::MaxRetriesExceeded` when every attempt was retryable.
/// - `ClientError::ApiError` for any other non-success status.
/// - `ClientError::HttpError` for transport failures.
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    let mut attempt = 0;

    loop {
        let Some(attempt_builder) = builder.try_clone() else {
            if attempt == 0 {
                debug!("Request builder cannot be cloned, single attempt only");
                let response = builder.send().await?;
                return check_status(response).await;
            }
            return Err(ClientError::InvalidRequest(
                "request body cannot be replayed for retry".to_string(),
            ));
        };

        let response = attempt_builder.send().await?;
        let status = response.status().as_u16();

        if !ClientError::is_retryable_status(status) || max_retries == 0 {
            if attempt > 0 {
                debug!(attempt = attempt + 1, status, "Retry settled");
            }
            return check_status(response).await;
        }

        if attempt >= max_retries {
            debug!(attempts = attempt + 1, status, "Max retries exhausted");
            return Err(ClientError::MaxRetriesExceeded {
                attempts: attempt + 1,
                status,
            });
        }

        // 2^attempt seconds
        let backoff_secs = 2u64.pow(attempt as u32);
        debug!(
            status,
            attempt = attempt + 1,
            max_attempts = max_retries + 1,
            backoff_secs,
            "Retryable status, backing off"
        );
        tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
        attempt += 1;
    }
}

/// Pass successful responses through; convert everything else to `ApiError`.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    Err(ClientError::ApiError {
        status,
        url,
        message: error_message(status, &body),
    })
}

fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.message.into_text();
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("request failed with status {status}")
    } else {
        trimmed.to_string()
    }
}

/// Decode a JSON response body. An empty body decodes as `{}`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    let body = if text.trim().is_empty() { "{}" } else { text.as_str() };
    serde_json::from_str(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_message() {
        assert_eq!(error_message(400, r#"{"message":"Invalid port"}"#), "Invalid port");
        assert_eq!(
            error_message(400, r#"{"message":["key must not be empty","bad target"]}"#),
            "key must not be empty; bad target"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body_or_status() {
        assert_eq!(error_message(502, "Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(500, ""), "request failed with status 500");
    }
}
