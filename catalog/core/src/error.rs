//! Error Types
//!
//! Two kinds of failure exist in the catalog:
//!
//! - [`SourceError`]: the data source could not deliver the podcast list.
//!   This is surfaced to the user as one fixed message; the detail goes to
//!   the log.
//! - [`RenderFallback`]: a rendering condition that is absorbed locally with
//!   a visible fallback. These are never returned as errors; they are
//!   reported through `tracing` and by [`PreviewCard::diagnose`].
//!
//! [`PreviewCard::diagnose`]: crate::card::PreviewCard::diagnose

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::card::CardAttribute;

/// Message shown to the user for any data-source failure
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load podcasts. Please try again later.";

/// Failure to fetch or decode the podcast list
#[derive(Debug, Error)]
pub enum SourceError {
    /// Server answered with a non-success status
    #[error("HTTP error! status: {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Request could not be sent or the connection failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response or file body was not a valid podcast list
    #[error("Failed to decode podcast list: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local catalog file could not be read
    #[error("Failed to read catalog file at {path}: {source}")]
    Read {
        /// File that was attempted
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

impl SourceError {
    /// The single user-facing message for this failure
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
            },
            None => Self::Transport(err.to_string()),
        }
    }
}

/// A rendering condition absorbed with a visible fallback
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderFallback {
    /// Watched attribute is absent; its region renders empty
    MissingAttribute(CardAttribute),
    /// Genre id not in the table; tag shows "Unknown"
    UnresolvedGenre(u32),
    /// Non-numeric token in the genre encoding; tag shows "Unknown"
    MalformedGenreToken(String),
    /// Updated timestamp could not be parsed; fallback date text is shown
    MalformedDate(String),
}

impl fmt::Display for RenderFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAttribute(attr) => write!(f, "missing attribute '{attr}'"),
            Self::UnresolvedGenre(id) => write!(f, "unresolved genre id {id}"),
            Self::MalformedGenreToken(token) => write!(f, "malformed genre token {token:?}"),
            Self::MalformedDate(raw) => write!(f, "malformed date {raw:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_fixed() {
        let err = SourceError::Status { status: 503 };
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert_eq!(err.user_message(), LOAD_FAILED_MESSAGE);
    }

    #[test]
    fn test_fallback_display() {
        assert_eq!(
            RenderFallback::MissingAttribute(CardAttribute::Updated).to_string(),
            "missing attribute 'updated'"
        );
        assert_eq!(
            RenderFallback::MalformedGenreToken("x".to_string()).to_string(),
            "malformed genre token \"x\""
        );
    }
}
