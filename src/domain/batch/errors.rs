//! Batch operation errors.

use thiserror::Error;

use crate::api::ApiError;

/// Errors raised by the batch orchestrator.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A discount percentage outside `(0, 100]` was supplied.
    #[error("discount must be greater than 0 and at most 100")]
    InvalidDiscount,

    /// The filter matched no products; nothing was attempted.
    #[error("no products matched the filter")]
    NoMatchingProducts,

    /// The initial product fetch failed.
    #[error("inventory api error")]
    Api(#[from] ApiError),
}
