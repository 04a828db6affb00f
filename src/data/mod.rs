//! Remote rate retrieval.
//!
//! - per-day NBU client behind the `RateSource` trait (`nbu`)
//! - sequential multi-day aggregation (`aggregate`)

pub mod aggregate;
pub mod nbu;

pub use aggregate::*;
pub use nbu::*;
