//! Error types for the marketplace client.

use thiserror::Error;

use crate::api::Operation;
use crate::session::StorageError;

/// Client error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before any side effect took place.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The server answered with a non-success status.
    ///
    /// Displays the operation's fixed failure message, e.g. "Failed to fetch jobs".
    #[error("{}", .operation.failure_message())]
    RequestFailed {
        /// Gateway operation that failed.
        operation: Operation,
        /// HTTP status code.
        status: u16,
    },

    /// The request could not be delivered (no connectivity, refused, DNS).
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(#[source] reqwest::Error),

    /// A success response carried a body that is not JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// Session storage could not be written; the in-memory session was still updated.
    #[error("Session persistence unavailable: {0}")]
    PersistenceUnavailable(#[from] StorageError),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry resource paths (e.g. `mailto:`).
    #[error("Base URL cannot carry resource paths: {0}")]
    InvalidBaseUrl(String),
}

impl Error {
    /// HTTP status of a [`Error::RequestFailed`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
