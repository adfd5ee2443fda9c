//! Bulk operations over the product set.

mod errors;
mod models;
mod service;

pub use errors::BatchError;
pub use models::{
    BatchKind, BatchOperation, BatchRecord, DeleteFilter, DeletePlan, StockAction,
};
pub use service::BatchRunner;
