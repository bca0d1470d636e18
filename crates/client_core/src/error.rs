use std::time::Duration;

use thiserror::Error;

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Network error: Could not connect to the server. Make sure the backend is running.";
pub const GENERIC_SERVICE_MESSAGE: &str = "Failed to fetch jobs. Please try again.";
pub const EMPTY_RESULT_MESSAGE: &str =
    "No jobs found for the given keywords. Try different keywords.";

/// Coarse grouping of search failures, as the user sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorKind {
    TransportFailure,
    ServiceError,
    EmptyResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("could not reach job search service: {0}")]
    Transport(String),
    #[error("job search service did not respond within {0:?}")]
    Timeout(Duration),
    #[error("job search service returned HTTP {status}: {}", .detail.as_deref().unwrap_or("unknown error"))]
    Service { status: u16, detail: Option<String> },
    #[error("malformed response from job search service: {0}")]
    MalformedResponse(String),
    #[error("no jobs matched the requested keywords")]
    EmptyResult,
}

impl SearchError {
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            Self::Transport(_) | Self::Timeout(_) => SearchErrorKind::TransportFailure,
            Self::Service { .. } | Self::MalformedResponse(_) => SearchErrorKind::ServiceError,
            Self::EmptyResult => SearchErrorKind::EmptyResult,
        }
    }

    /// Text shown in the blocking notice for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            Self::Timeout(after) => format!(
                "Network error: the server did not respond within {} seconds.",
                after.as_secs()
            ),
            Self::Service {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Service { detail: None, .. } | Self::MalformedResponse(_) => {
                GENERIC_SERVICE_MESSAGE.to_string()
            }
            Self::EmptyResult => EMPTY_RESULT_MESSAGE.to_string(),
        }
    }
}
