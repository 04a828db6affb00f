//! Shared domain types.
//!
//! Rates are always quoted as UAH per one unit of the foreign currency. Tables
//! are value types: every transformation returns a new table.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of calendar days fetched per run (today included).
pub const DEFAULT_DAYS: usize = 30;
/// Trailing window of the rolling average.
pub const ROLLING_WINDOW: usize = 7;
pub const DEFAULT_CSV_FILENAME: &str = "currency_rates.csv";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Row limit for plain table output.
pub const DEFAULT_MAX_ROWS: usize = 20;
/// Row limit for the per-currency breakdown.
pub const DETAIL_MAX_ROWS: usize = 100;

/// The supported foreign currencies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Eur];

    /// ISO 4217 code, as used by the NBU feed (`cc`).
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Case-insensitive lookup; `None` for anything outside the supported set.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(raw))
    }

    pub fn validate(raw: &str) -> Result<Self, AppError> {
        Self::parse(raw).ok_or_else(|| AppError::Validation(raw.trim().to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A record as delivered by the rate source, tagged with the requested day.
///
/// `rate` is left untyped; the tabular transform decides what parses.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRate {
    pub iso_date: NaiveDate,
    pub cc: String,
    pub rate: serde_json::Value,
}

/// One validated observation. `rate` is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateRecord {
    pub date: NaiveDate,
    pub currency: Currency,
    pub rate: f64,
}

/// Validated observations, kept sorted by `(date, currency)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rows: Vec<RateRecord>,
}

impl RateTable {
    pub fn new(mut rows: Vec<RateRecord>) -> Self {
        rows.sort_by_key(|r| (r.date, r.currency));
        Self { rows }
    }

    pub fn rows(&self) -> &[RateRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rates(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.rate).collect()
    }

    pub fn currencies(&self) -> BTreeSet<Currency> {
        self.rows.iter().map(|r| r.currency).collect()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.rows.first()?.date, self.rows.last()?.date))
    }
}

/// A rate row annotated with its trailing rolling average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingRow {
    pub date: NaiveDate,
    pub currency: Currency,
    pub rate: f64,
    pub rolling_avg: f64,
}

/// Output of rolling-average augmentation, in date order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingTable {
    rows: Vec<RollingRow>,
}

impl RollingTable {
    pub fn new(mut rows: Vec<RollingRow>) -> Self {
        rows.sort_by_key(|r| (r.date, r.currency));
        Self { rows }
    }

    pub fn rows(&self) -> &[RollingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn currencies(&self) -> BTreeSet<Currency> {
        self.rows.iter().map(|r| r.currency).collect()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.rows.first()?.date, self.rows.last()?.date))
    }
}

/// Descriptive statistics over one currency's rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSummary {
    pub mean: f64,
    /// Population standard deviation (denominator `n`).
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// A run's configuration as understood by the pipeline and the shell.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RatesConfig {
    pub days: usize,
    pub window: usize,
    /// Anchor day for the fetch range; `None` means the local current date.
    pub as_of: Option<NaiveDate>,
    pub data_dir: PathBuf,
    /// Explicit API base URL; falls back to `NBU_BASE_URL`, then the public endpoint.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_rows: usize,
    pub detail_rows: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl RatesConfig {
    pub fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            window: ROLLING_WINDOW,
            as_of: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_rows: DEFAULT_MAX_ROWS,
            detail_rows: DETAIL_MAX_ROWS,
            plot: true,
            plot_width: 60,
            plot_height: 12,
        }
    }
}
