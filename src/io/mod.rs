//! Input/output helpers.
//!
//! - CSV export and re-import of rolling tables (`export`)

pub mod export;

pub use export::*;
