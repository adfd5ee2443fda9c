//! Domain modules.

pub mod batch;
pub mod billing;
pub mod catalog;
