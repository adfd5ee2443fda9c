//! Batch orchestrator.

use jiff::Timestamp;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{
    api::{InventoryApi, Product},
    domain::batch::{
        errors::BatchError,
        models::{BatchKind, BatchOperation, BatchRecord, DeleteFilter, DeletePlan, StockAction},
    },
};

/// Note attached to purchase calls issued by stock-addition runs.
const STOCK_ADDITION_NOTE: &str = "Batch stock addition";

/// Applies one bulk operation across a filtered product subset.
///
/// Each run fetches the full product set once, filters client-side, then
/// issues one API call per matched product, strictly one at a time. Per-item
/// failures are logged and tallied, never retried; a dropped call simply
/// lowers the recorded `affected` count. Every run that reaches execution
/// appends one [`BatchRecord`] to the in-memory history.
#[derive(Debug)]
pub struct BatchRunner<A> {
    api: A,
    history: Vec<BatchRecord>,
}

impl<A: InventoryApi> BatchRunner<A> {
    /// Create a runner over the given API client.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            history: Vec::new(),
        }
    }

    /// Run a price update, stock adjustment, or discount.
    ///
    /// # Errors
    ///
    /// - [`BatchError::InvalidDiscount`] for a discount percentage outside
    ///   `(0, 100]`; checked before any network call.
    /// - [`BatchError::NoMatchingProducts`] when the filter matches nothing;
    ///   no per-item calls are issued and no record is appended.
    /// - [`BatchError::Api`] when the initial product fetch fails; a record
    ///   with `succeeded: false` is still appended.
    #[tracing::instrument(name = "batch.run", skip(self, op), fields(kind = %op.kind()), err)]
    pub async fn run(&mut self, op: BatchOperation) -> Result<BatchRecord, BatchError> {
        if let BatchOperation::Discount { percent, .. } = &op {
            if *percent <= Decimal::ZERO || *percent > Decimal::ONE_HUNDRED {
                return Err(BatchError::InvalidDiscount);
            }
        }

        let category = match &op {
            BatchOperation::PriceUpdate { category, .. }
            | BatchOperation::StockAdjust { category, .. } => category.as_deref(),
            BatchOperation::Discount { category, .. } => Some(category.as_str()),
        };

        let products = self.fetch_products(op.kind()).await?;

        let matched: Vec<&Product> = products
            .iter()
            .filter(|product| matches_category(product, category))
            .collect();

        if matched.is_empty() {
            return Err(BatchError::NoMatchingProducts);
        }

        let mut affected = 0_usize;

        for product in &matched {
            let result = match &op {
                BatchOperation::PriceUpdate { percent, .. } => {
                    let new_price = scale_price(product.selling_price, *percent);

                    self.api.update_price(product.product_id, new_price).await
                }
                BatchOperation::StockAdjust {
                    action, quantity, ..
                } => match action {
                    StockAction::Add => {
                        self.api
                            .record_purchase(
                                product.product_id,
                                *quantity,
                                Some(STOCK_ADDITION_NOTE.to_owned()),
                            )
                            .await
                    }
                    StockAction::Remove => {
                        self.api.record_sale(product.product_id, *quantity).await
                    }
                },
                BatchOperation::Discount { percent, .. } => {
                    let new_price = scale_price(product.selling_price, -*percent);

                    self.api.update_price(product.product_id, new_price).await
                }
            };

            match result {
                Ok(()) => affected += 1,
                Err(error) => warn!(
                    product_id = product.product_id,
                    product_name = %product.product_name,
                    %error,
                    "batch call failed, continuing"
                ),
            }
        }

        Ok(self.record(op.kind(), describe(&op), affected))
    }

    /// Build the confirmed set for a conditional delete.
    ///
    /// Matches products whose category equals the filter's (ignoring case)
    /// and whose stock is strictly below the threshold. No delete calls are
    /// issued; the caller inspects the plan's exact matched count and hands
    /// it to [`execute_delete`](Self::execute_delete).
    ///
    /// # Errors
    ///
    /// - [`BatchError::NoMatchingProducts`] when nothing matches.
    /// - [`BatchError::Api`] when the product fetch fails; a record with
    ///   `succeeded: false` is appended.
    pub async fn plan_delete(&mut self, filter: DeleteFilter) -> Result<DeletePlan, BatchError> {
        let products = self.fetch_products(BatchKind::Delete).await?;

        let matched: Vec<Product> = products
            .into_iter()
            .filter(|product| {
                matches_category(product, Some(&filter.category))
                    && product.current_quantity < filter.stock_below
            })
            .collect();

        if matched.is_empty() {
            return Err(BatchError::NoMatchingProducts);
        }

        Ok(DeletePlan { filter, matched })
    }

    /// Delete every product in a confirmed plan, best-effort.
    pub async fn execute_delete(&mut self, plan: DeletePlan) -> BatchRecord {
        let mut affected = 0_usize;

        for product in plan.matched() {
            match self.api.delete_product(product.product_id).await {
                Ok(()) => affected += 1,
                Err(error) => warn!(
                    product_id = product.product_id,
                    product_name = %product.product_name,
                    %error,
                    "delete call failed, continuing"
                ),
            }
        }

        let description = format!(
            "Deleted {} products with stock below {}",
            plan.filter().category,
            plan.filter().stock_below
        );

        self.record(BatchKind::Delete, description, affected)
    }

    /// The records of every completed run, oldest first.
    #[must_use]
    pub fn history(&self) -> &[BatchRecord] {
        &self.history
    }

    async fn fetch_products(&mut self, kind: BatchKind) -> Result<Vec<Product>, BatchError> {
        match self.api.list_products().await {
            Ok(products) => Ok(products),
            Err(error) => {
                self.history.push(BatchRecord {
                    kind,
                    description: failure_description(kind).to_owned(),
                    affected: 0,
                    succeeded: false,
                    timestamp: Timestamp::now(),
                });

                Err(error.into())
            }
        }
    }

    fn record(&mut self, kind: BatchKind, description: String, affected: usize) -> BatchRecord {
        let record = BatchRecord {
            kind,
            description,
            affected,
            succeeded: true,
            timestamp: Timestamp::now(),
        };

        info!(
            kind = %record.kind,
            affected = record.affected,
            "batch run recorded"
        );

        self.history.push(record.clone());

        record
    }
}

fn matches_category(product: &Product, category: Option<&str>) -> bool {
    category.is_none_or(|name| product.category.eq_ignore_ascii_case(name))
}

/// `price × (1 + percent/100)`, rounded to two decimals for the wire.
fn scale_price(price: Decimal, percent: Decimal) -> Decimal {
    (price * (Decimal::ONE + percent / Decimal::ONE_HUNDRED)).round_dp(2)
}

fn describe(op: &BatchOperation) -> String {
    match op {
        BatchOperation::PriceUpdate { category, percent } => {
            format!("Updated prices by {percent}% for {}", scope(category.as_deref()))
        }
        BatchOperation::StockAdjust {
            category,
            action,
            quantity,
        } => {
            let verb = match action {
                StockAction::Add => "Added",
                StockAction::Remove => "Removed",
            };

            format!("{verb} {quantity} units for {}", scope(category.as_deref()))
        }
        BatchOperation::Discount { category, percent } => {
            format!("Applied {percent}% discount to {category}")
        }
    }
}

fn scope(category: Option<&str>) -> &str {
    category.unwrap_or("all products")
}

fn failure_description(kind: BatchKind) -> &'static str {
    match kind {
        BatchKind::PriceUpdate => "Failed to update prices",
        BatchKind::StockAdjust => "Failed to adjust stock",
        BatchKind::Discount => "Failed to apply discount",
        BatchKind::Delete => "Failed to delete products",
    }
}
