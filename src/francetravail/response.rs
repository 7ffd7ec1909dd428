//! Shaping of upstream responses into what the gateway returns to its callers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::{debug, warn};
use serde_json::{json, Value};

use super::pagination::parse_content_range;
use crate::error::{ApiError, Result};

/// Message returned for a 204 whose upstream body carries none.
pub const NO_RESULTS_MESSAGE: &str = "No offers match the search criteria";

/// A response relayed to the caller: a status code and a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: Value,
}

impl ProxyResponse {
    pub fn new(status: u16, body: Value) -> Self {
        ProxyResponse { status, body }
    }

    /// Whether the response may be cached and handed out again.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self.body)).into_response()
    }
}

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// Truncation counts characters, not bytes, so accented text never splits a code point.
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

/// Extracts the `message` field of an upstream error body.
///
/// Falls back to the raw text, or to a generic message if the body is empty.
pub(crate) fn upstream_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("France Travail API answered with status {}", status)
    } else {
        trimmed.to_string()
    }
}

/// Turns an upstream search response into the gateway's answer.
///
/// # Behaviour by upstream status
///
/// - `200`, `206`: status 200 with the JSON body, wrapped as `{"data", "pagination"}` when
///   `content_range` parses; a malformed header is logged and the body returned as is
/// - `204`: `{"message": ...}` with status 204
/// - `400`, `500`: an [`ApiError::Upstream`] with the same status and the upstream message
/// - anything else: logged as unhandled, then the same as above with the original status
pub fn shape_search_response(
    status: u16,
    content_range: Option<&str>,
    body: &str,
) -> Result<ProxyResponse> {
    match status {
        200 | 206 => {
            let content: Value = serde_json::from_str(body)?;

            if let Some(header) = content_range {
                match parse_content_range(header) {
                    Some(pagination) => {
                        debug!(
                            "Search page {}-{} of {}",
                            pagination.start, pagination.end, pagination.total
                        );
                        return Ok(ProxyResponse::new(
                            200,
                            json!({ "data": content, "pagination": pagination }),
                        ));
                    }
                    None => warn!(
                        "Could not parse Content-Range: {}",
                        sanitize_for_logging(header, 100)
                    ),
                }
            }

            Ok(ProxyResponse::new(200, content))
        }
        204 => {
            let message = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string());
            Ok(ProxyResponse::new(204, json!({ "message": message })))
        }
        400 | 500 => Err(ApiError::Upstream {
            status,
            message: upstream_message(status, body),
        }),
        _ => {
            warn!("Unhandled France Travail status code: {}", status);
            debug!("Unhandled response body: {}", sanitize_for_logging(body, 200));
            Err(ApiError::Upstream {
                status,
                message: upstream_message(status, body),
            })
        }
    }
}
