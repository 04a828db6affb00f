//! Reporting utilities: per-currency summaries and breakdowns.
//!
//! Computation lives here; string rendering lives in `format`.

pub mod format;

pub use format::*;

use crate::domain::{Currency, RateTable, RollingTable, StatSummary};
use crate::stats::{average_rate, compute_stats, current_rate};
use crate::table::{add_rolling_average, select_currency};

/// Current vs. period-average rate for one currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencySummary {
    pub currency: Currency,
    pub current: f64,
    pub average: f64,
    /// `current - average`.
    pub difference: f64,
}

/// One summary per supported currency that has rows; the rest are omitted.
pub fn summarize(table: &RateTable) -> Vec<CurrencySummary> {
    Currency::ALL
        .into_iter()
        .filter_map(|currency| {
            let current = current_rate(table, currency)?;
            let average = average_rate(table, currency)?;
            Some(CurrencySummary {
                currency,
                current,
                average,
                difference: current - average,
            })
        })
        .collect()
}

/// Everything the detailed single-currency view shows.
#[derive(Debug, Clone)]
pub struct Breakdown {
    pub currency: Currency,
    pub stats: StatSummary,
    pub rolling: RollingTable,
    /// Rate on the latest date.
    pub current: f64,
    /// Percent change of `current` against the period mean.
    pub change_pct: f64,
}

/// Build the breakdown for `currency`, or `None` when it has no rows.
pub fn build_breakdown(table: &RateTable, currency: Currency, window: usize) -> Option<Breakdown> {
    let rows = select_currency(table, currency);
    let stats = compute_stats(&rows)?;
    let rolling = add_rolling_average(&rows, window);
    let current = rolling.rows().last()?.rate;

    Some(Breakdown {
        currency,
        stats,
        rolling,
        current,
        // Rates are strictly positive, so the mean is too.
        change_pct: (current - stats.mean) / stats.mean * 100.0,
    })
}
