//! Tabular transform: raw records into validated, sortable tables.
//!
//! - projection, currency filtering and rate parsing (`transform`)
//! - rolling-average augmentation (`rolling`)

pub mod rolling;
pub mod transform;

pub use rolling::*;
pub use transform::*;
