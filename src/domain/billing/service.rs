//! Billing service: checkout and invoice history.

use jiff::Timestamp;
use tracing::{info, warn};

use crate::{
    api::InventoryApi,
    domain::billing::{cart::Cart, errors::BillingError, models::Invoice},
    store::KeyValueStore,
};

/// Key of the append-only invoice log in the key-value store.
const INVOICES_KEY: &str = "invoices";

/// Turns a validated cart into sale calls and a persisted invoice.
#[derive(Debug)]
pub struct BillingService<A, S> {
    api: A,
    store: S,
}

impl<A, S> BillingService<A, S>
where
    A: InventoryApi,
    S: KeyValueStore,
{
    /// Create a service over the given API client and invoice store.
    #[must_use]
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    /// Complete the sale held in `cart`.
    ///
    /// Issues one sale call per line, in cart order, one at a time. The
    /// issuance is best-effort and not atomic: a failed call is logged and
    /// does not stop the remaining lines, and the invoice always covers all
    /// lines. After issuance the invoice is appended to the persisted
    /// history and the cart is cleared.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`](super::CartError) when validation fails (no
    /// external calls are made), or a store/serialization error when the
    /// invoice history cannot be appended.
    #[tracing::instrument(
        name = "billing.checkout",
        skip(self, cart),
        fields(lines = cart.len()),
        err
    )]
    pub async fn checkout(&self, cart: &mut Cart) -> Result<Invoice, BillingError> {
        cart.validate()?;

        let mut failed = 0_usize;

        for line in cart.lines() {
            if let Err(error) = self.api.record_sale(line.product_id, line.quantity).await {
                failed += 1;

                warn!(
                    product_id = line.product_id,
                    quantity = line.quantity,
                    %error,
                    "sale call failed, continuing with remaining lines"
                );
            }
        }

        let timestamp = Timestamp::now();

        let invoice = Invoice {
            bill_number: format!("BILL-{}", timestamp.as_millisecond()),
            timestamp,
            customer: cart.customer.clone(),
            lines: cart.lines().to_vec(),
            total_amount: cart.total(),
        };

        self.append_invoice(&invoice)?;

        info!(
            bill_number = %invoice.bill_number,
            total = %invoice.total_amount,
            failed_sale_calls = failed,
            "checkout complete"
        );

        cart.clear();

        Ok(invoice)
    }

    /// Read the persisted invoice history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a store error when the backend fails, or a serialization
    /// error when the stored log is not a JSON array of invoices.
    pub fn invoice_history(&self) -> Result<Vec<Invoice>, BillingError> {
        let Some(raw) = self.store.get(INVOICES_KEY)? else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_str(&raw)?)
    }

    fn append_invoice(&self, invoice: &Invoice) -> Result<(), BillingError> {
        let mut history = self.invoice_history()?;

        history.push(invoice.clone());

        self.store
            .set(INVOICES_KEY, serde_json::to_string(&history)?)?;

        Ok(())
    }
}
