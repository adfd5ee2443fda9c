//! Tillwork
//!
//! Tillwork is the cart/billing and batch-operation core of an inventory
//! point-of-sale dashboard. It keeps an in-progress sale in memory, validates
//! quantities against available stock, issues per-line sale calls to an
//! external inventory API at checkout, and runs best-effort bulk operations
//! (price updates, stock adjustments, discounts, conditional deletes) across
//! category-filtered product sets.

pub mod api;
pub mod domain;
pub mod store;
