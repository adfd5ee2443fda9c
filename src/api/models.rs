//! Wire models for the inventory backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product record as returned by `GET /products`.
///
/// The backend owns the authoritative record; everything here is a
/// point-in-time copy used for client-side filtering and cart snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    pub brand: String,
    pub category: String,
    pub selling_price: Decimal,
    pub current_quantity: i64,
}
