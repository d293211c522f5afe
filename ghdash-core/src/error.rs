//! Structured error types for ghdash-core.
//!
//! Fetch failures are stored inside controller state and handed to the
//! presentation layer, so they are `Clone` and carry rendered messages
//! rather than boxed sources. The binary still uses `anyhow` on top.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure reported by a remote collection or profile source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The subject does not exist upstream
    #[error("User '{subject}' not found")]
    NotFound { subject: String },

    /// Network failure, timeout or server-side error
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Upstream refused the request (rate limit or other 4xx)
    #[error("Rate limited (HTTP {status}): {message}")]
    RateLimited {
        status: u16,
        message: String,
        reset_at: Option<DateTime<Utc>>,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// Subject identity was empty or otherwise unusable
    #[error("Invalid username: {reason}")]
    InvalidSubject { reason: String },
}

/// Coarse classification of a [`FetchError`] for display decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Transport,
    RateLimit,
}

impl FetchError {
    /// Create a not-found error
    pub fn not_found(subject: impl Into<String>) -> Self {
        Self::NotFound {
            subject: subject.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a rate-limit error without a known reset time
    pub fn rate_limited(status: u16, message: impl Into<String>) -> Self {
        Self::RateLimited {
            status,
            message: message.into(),
            reset_at: None,
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid subject error
    pub fn invalid_subject(reason: impl Into<String>) -> Self {
        Self::InvalidSubject {
            reason: reason.into(),
        }
    }

    /// Classify the error. Decode failures count as transport problems.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::NotFound { .. } | FetchError::InvalidSubject { .. } => ErrorKind::NotFound,
            FetchError::Transport { .. } | FetchError::Decode { .. } => ErrorKind::Transport,
            FetchError::RateLimited { .. } => ErrorKind::RateLimit,
        }
    }

    /// Message suitable for an inline, dismissible notice.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::NotFound => "User not found. Check the username and try again.".to_string(),
            ErrorKind::RateLimit => match self {
                FetchError::RateLimited {
                    reset_at: Some(reset),
                    ..
                } => format!(
                    "Failed to load data. API rate limit exceeded until {}.",
                    reset.format("%H:%M:%S UTC")
                ),
                _ => "Failed to load data. API rate limit might be exceeded.".to_string(),
            },
            ErrorKind::Transport => "Failed to load data. Check your connection and retry.".to_string(),
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Result type alias for source operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;
