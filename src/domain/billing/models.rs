//! Billing models.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product entry in an in-progress sale.
///
/// `max_quantity` is the stock ceiling captured when the line was added;
/// `quantity` never exceeds it and never reaches zero (a zero-quantity line
/// is removed instead).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub product_name: String,
    pub brand: String,
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub max_quantity: u32,
}

impl CartLine {
    /// The line total, `unit_price × quantity`, exact.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Upi,
    Online,
}

/// Customer details collected for a sale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
}

/// Immutable record of a completed sale, produced at checkout.
///
/// Lines are value copies of the cart lines at checkout time, decoupled from
/// any live product state. Appended to the persisted history log and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub bill_number: String,
    pub timestamp: Timestamp,
    pub customer: Customer,
    pub lines: Vec<CartLine>,
    pub total_amount: Decimal,
}
