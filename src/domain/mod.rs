//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the supported currency set (`Currency`)
//! - raw and validated rate records (`RawRate`, `RateRecord`)
//! - tables and derived outputs (`RateTable`, `RollingTable`, `StatSummary`)
//! - run configuration (`RatesConfig`)

pub mod types;

pub use types::*;
