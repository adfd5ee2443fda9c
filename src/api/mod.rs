//! Inventory API client.

mod client;
mod errors;
mod models;

pub use client::{ApiConfig, HttpInventoryApi, InventoryApi, MockInventoryApi};
pub use errors::ApiError;
pub use models::Product;
