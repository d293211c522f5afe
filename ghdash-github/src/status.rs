//! HTTP failure classification
//!
//! 404 means the subject does not exist, any other 4xx is treated as the
//! rate-limit class, and everything else is a transport failure.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use ghdash_core::FetchError;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;

const RATELIMIT_RESET: &str = "x-ratelimit-reset";
const RETRY_AFTER: &str = "retry-after";

/// Longest upstream message kept in an error
const MAX_MESSAGE_LEN: usize = 200;

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Map a non-success response onto the fetch error taxonomy
pub fn classify_failure(status: StatusCode, headers: &HeaderMap, subject: &str, body: &str) -> FetchError {
    let message = upstream_message(status, body);

    if status == StatusCode::NOT_FOUND {
        return FetchError::not_found(subject);
    }

    if status.is_client_error() {
        return FetchError::RateLimited {
            status: status.as_u16(),
            message,
            reset_at: reset_time(headers),
        };
    }

    FetchError::transport(format!("HTTP {}: {}", status.as_u16(), message))
}

/// `message` field of the JSON error body, or a truncated raw body
fn upstream_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return truncate(&parsed.message);
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        truncate(trimmed)
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// When the limit resets: `x-ratelimit-reset` (epoch seconds), else
/// `retry-after` (seconds from now). Out-of-range values yield `None`.
fn reset_time(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
    };

    if let Some(epoch) = header(RATELIMIT_RESET) {
        return Utc.timestamp_opt(epoch, 0).single();
    }
    header(RETRY_AFTER)
        .and_then(TimeDelta::try_seconds)
        .and_then(|delay| Utc::now().checked_add_signed(delay))
}
