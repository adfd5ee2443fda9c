//! Batch operation models.

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::Product;

/// Whether a stock adjustment adds or removes units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockAction {
    Add,
    Remove,
}

/// A bulk operation applied immediately by [`BatchRunner`](super::BatchRunner).
///
/// Deletes are not part of this enum: they go through the two-phase
/// [`plan_delete`](super::BatchRunner::plan_delete) /
/// [`execute_delete`](super::BatchRunner::execute_delete) flow so the caller
/// confirms the exact matched count first.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOperation {
    /// Scale selling prices by `percent` (may be negative) for a category,
    /// or for all products when `category` is `None`.
    PriceUpdate {
        category: Option<String>,
        percent: Decimal,
    },

    /// Add or remove a fixed quantity of stock per product.
    StockAdjust {
        category: Option<String>,
        action: StockAction,
        quantity: u32,
    },

    /// Reduce selling prices by `percent` (must be in `(0, 100]`) for a
    /// category.
    Discount { category: String, percent: Decimal },
}

impl BatchOperation {
    /// The record kind this operation produces.
    #[must_use]
    pub fn kind(&self) -> BatchKind {
        match self {
            Self::PriceUpdate { .. } => BatchKind::PriceUpdate,
            Self::StockAdjust { .. } => BatchKind::StockAdjust,
            Self::Discount { .. } => BatchKind::Discount,
        }
    }
}

/// Filter for a conditional delete: category plus a stock threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFilter {
    /// Category name, compared case-insensitively.
    pub category: String,

    /// Products with `current_quantity` strictly below this are matched.
    pub stock_below: i64,
}

/// The confirmed set of products a delete run will touch.
///
/// Produced by [`plan_delete`](super::BatchRunner::plan_delete); the caller
/// inspects [`matched_count`](Self::matched_count) before handing the plan
/// to [`execute_delete`](super::BatchRunner::execute_delete).
#[derive(Debug)]
pub struct DeletePlan {
    pub(super) filter: DeleteFilter,
    pub(super) matched: Vec<Product>,
}

impl DeletePlan {
    /// The exact number of products the delete would touch.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// The matched products.
    #[must_use]
    pub fn matched(&self) -> &[Product] {
        &self.matched
    }

    /// The filter the plan was built from.
    #[must_use]
    pub fn filter(&self) -> &DeleteFilter {
        &self.filter
    }
}

/// Kind of a recorded batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchKind {
    PriceUpdate,
    StockAdjust,
    Discount,
    Delete,
}

impl fmt::Display for BatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PriceUpdate => "Price Update",
            Self::StockAdjust => "Stock Adjustment",
            Self::Discount => "Apply Discount",
            Self::Delete => "Delete Products",
        };

        f.write_str(label)
    }
}

/// History entry for one batch run, appended after every run and never
/// mutated.
///
/// `succeeded` reports whether execution was reached at all: per-item call
/// failures lower `affected` but keep `succeeded` true. Only a failed
/// initial fetch records `succeeded: false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub kind: BatchKind,
    pub description: String,
    pub affected: usize,
    pub succeeded: bool,
    pub timestamp: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_match_history_display() {
        assert_eq!(BatchKind::PriceUpdate.to_string(), "Price Update");
        assert_eq!(BatchKind::Delete.to_string(), "Delete Products");
    }

    #[test]
    fn operation_maps_to_its_kind() {
        let op = BatchOperation::Discount {
            category: "Snacks".to_owned(),
            percent: Decimal::from(20),
        };

        assert_eq!(op.kind(), BatchKind::Discount);
    }
}
