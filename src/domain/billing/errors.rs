//! Billing errors.

use thiserror::Error;

use crate::store::StoreError;

/// Errors raised by cart mutation and validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Adding the item would exceed the stock available at add time.
    #[error("only {available} units available")]
    OutOfStock {
        /// Units currently in stock for the product.
        available: u32,
    },

    /// The requested quantity exceeds the line's stock ceiling.
    #[error("only {available} units available")]
    InsufficientStock {
        /// Stock ceiling captured when the line was added.
        available: u32,
    },

    /// Checkout was attempted with no lines in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The customer name is blank.
    #[error("customer name is required")]
    MissingCustomerName,

    /// The customer phone is blank or shorter than 10 characters.
    #[error("a phone number of at least 10 digits is required")]
    InvalidPhone,
}

/// Errors raised by the billing service.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The cart failed validation.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The invoice history store failed.
    #[error("invoice history store error")]
    Store(#[from] StoreError),

    /// The persisted invoice history could not be read or written as JSON.
    #[error("invoice history is not valid JSON")]
    History(#[from] serde_json::Error),
}
