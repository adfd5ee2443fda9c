//! Cart management and checkout.

mod cart;
mod errors;
mod models;
mod service;

pub use cart::Cart;
pub use errors::{BillingError, CartError};
pub use models::{CartLine, Customer, Invoice, PaymentMethod};
pub use service::BillingService;
