//! `nbu-rates` library crate.
//!
//! The binary (`rates`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes or touching the network
//! - the shell can be driven by scripted input in tests

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod stats;
pub mod table;
