//! Shared "fetch pipeline" logic used by both the shell and the one-shot commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! per-day fetch -> range aggregation -> tabular transform
//!
//! Front-ends then focus on presentation (menu output vs. plain printing).

use std::time::{Duration, Instant};

use crate::data::{RateSource, fetch_last_n_days};
use crate::domain::{RateTable, RatesConfig};
use crate::error::AppError;
use crate::table::records_to_table;

/// Outputs of a single range fetch.
#[derive(Debug, Clone)]
pub struct FetchOutput {
    pub table: RateTable,
    /// Raw records received for supported currencies, before rate parsing.
    pub records_fetched: usize,
    pub elapsed: Duration,
}

/// Fetch `config.days` days ending at `config.today()` and build the table.
pub fn fetch_table<S: RateSource + ?Sized>(source: &S, config: &RatesConfig) -> Result<FetchOutput, AppError> {
    let started = Instant::now();

    let records = fetch_last_n_days(source, config.today(), config.days)?;
    let table = records_to_table(&records);

    let dropped = records.len() - table.len();
    if dropped > 0 {
        log::info!("Dropped {dropped} record(s) with unparsable rates");
    }

    Ok(FetchOutput {
        table,
        records_fetched: records.len(),
        elapsed: started.elapsed(),
    })
}
