//! Inventory API errors.

use thiserror::Error;

/// Errors that can occur when communicating with the inventory backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with `success: false`.
    #[error("request rejected by backend: {0}")]
    Rejected(String),

    /// The backend returned a body that does not match the envelope contract.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}
