//! Errors returned by GitHub API clients

use std::time::Duration;
use thiserror::Error;

/// Maximum number of characters of a response body kept in error messages
const BODY_SNIPPET_LEN: usize = 512;

/// Errors that can occur while fetching from the GitHub REST API
///
/// None of these are retried by the client. They carry enough context
/// (URL, status, body) to diagnose the failure from the message alone.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed (DNS, connection, TLS, body read)
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: octocrab::Error,
    },

    /// The caller's deadline elapsed while requests were in flight
    #[error("GitHub API requests did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    /// GitHub answered with a non-success status
    #[error(
        "the GitHub REST API returned error. url: {url} status: {status} response: {}",
        snippet(.body)
    )]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body did not have the expected shape
    #[error("cannot decode GitHub API response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// HTTP status code, if GitHub answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// URL of the failed request, when a single request can be blamed
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::Decode { url, .. } => Some(url),
            FetchError::DeadlineExceeded(_) => None,
        }
    }

    /// Whether the request never produced a response (includes cancellation)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Transport { .. } | FetchError::DeadlineExceeded(_)
        )
    }
}

fn snippet(body: &str) -> &str {
    match body.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
