//! Descriptive statistics over rate tables.

use statrs::statistics::Statistics;

use crate::domain::{Currency, RateTable, StatSummary};
use crate::table::select_currency;

/// Mean, population std, min and max of the table's rates.
///
/// Expects a single-currency table. Returns `None` for an empty table.
pub fn compute_stats(table: &RateTable) -> Option<StatSummary> {
    if table.is_empty() {
        return None;
    }
    let rates = table.rates();
    let rates = rates.as_slice();

    Some(StatSummary {
        mean: Statistics::mean(rates),
        std: Statistics::population_std_dev(rates),
        min: Statistics::min(rates),
        max: Statistics::max(rates),
    })
}

/// Rate on the most recent date for `currency`.
pub fn current_rate(table: &RateTable, currency: Currency) -> Option<f64> {
    table
        .rows()
        .iter()
        .filter(|r| r.currency == currency)
        .max_by_key(|r| r.date)
        .map(|r| r.rate)
}

/// Mean rate for `currency` over the whole table.
pub fn average_rate(table: &RateTable, currency: Currency) -> Option<f64> {
    compute_stats(&select_currency(table, currency)).map(|s| s.mean)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::RateRecord;

    fn usd(day: u32, rate: f64) -> RateRecord {
        RateRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            currency: Currency::Usd,
            rate,
        }
    }

    #[test]
    fn three_row_example() {
        let table = RateTable::new(vec![usd(1, 40.0), usd(2, 41.0), usd(3, 42.0)]);
        let stats = compute_stats(&table).unwrap();
        assert!((stats.mean - 41.0).abs() < 1e-12);
        assert!((stats.std - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((stats.std - 0.8165).abs() < 1e-4);
        assert_eq!(stats.min, 40.0);
        assert_eq!(stats.max, 42.0);
    }

    #[test]
    fn single_row_has_zero_std() {
        let stats = compute_stats(&RateTable::new(vec![usd(1, 41.2)])).unwrap();
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.mean, 41.2);
    }

    #[test]
    fn empty_table_has_no_stats() {
        assert!(compute_stats(&RateTable::default()).is_none());
    }

    #[test]
    fn current_and_average_per_currency() {
        let mut rows = vec![usd(3, 42.0), usd(1, 40.0), usd(2, 41.0)];
        rows.push(RateRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            currency: Currency::Eur,
            rate: 45.0,
        });
        let table = RateTable::new(rows);

        assert_eq!(current_rate(&table, Currency::Usd), Some(42.0));
        assert_eq!(current_rate(&table, Currency::Eur), Some(45.0));
        assert!((average_rate(&table, Currency::Usd).unwrap() - 41.0).abs() < 1e-12);

        let usd_only = select_currency(&table, Currency::Usd);
        assert_eq!(current_rate(&usd_only, Currency::Eur), None);
        assert_eq!(average_rate(&usd_only, Currency::Eur), None);
    }
}
