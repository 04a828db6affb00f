//! Trailing rolling-average augmentation.

use std::collections::{HashMap, VecDeque};

use crate::domain::{Currency, RateTable, RollingRow, RollingTable};

/// Annotate every row with the mean of its currency's last `window` rates
/// (the row itself included).
///
/// Early rows average over whatever history exists, so the first value of a
/// series is its first rate. Each currency has its own window, which makes a
/// single-currency table the plain trailing mean over rows `[k - window + 1, k]`.
/// A `window` of 0 behaves like 1.
pub fn add_rolling_average(table: &RateTable, window: usize) -> RollingTable {
    let window = window.max(1);
    let mut trailing: HashMap<Currency, VecDeque<f64>> = HashMap::new();

    let rows = table
        .rows()
        .iter()
        .map(|r| {
            let buf = trailing
                .entry(r.currency)
                .or_insert_with(|| VecDeque::with_capacity(window));
            if buf.len() == window {
                buf.pop_front();
            }
            buf.push_back(r.rate);

            RollingRow {
                date: r.date,
                currency: r.currency,
                rate: r.rate,
                rolling_avg: buf.iter().sum::<f64>() / buf.len() as f64,
            }
        })
        .collect();

    RollingTable::new(rows)
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};

    use super::*;
    use crate::domain::RateRecord;

    fn series(currency: Currency, rates: &[f64]) -> Vec<RateRecord> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| RateRecord {
                date: start + Days::new(i as u64),
                currency,
                rate,
            })
            .collect()
    }

    #[test]
    fn three_row_example() {
        let table = RateTable::new(series(Currency::Usd, &[40.0, 41.0, 42.0]));
        let rolling = add_rolling_average(&table, 7);
        let avgs: Vec<f64> = rolling.rows().iter().map(|r| r.rolling_avg).collect();
        assert_eq!(avgs, vec![40.0, 40.5, 41.0]);
    }

    #[test]
    fn matches_trailing_mean_definition() {
        let rates: Vec<f64> = (0..20).map(|i| 40.0 + ((i * 7) % 5) as f64 * 0.25).collect();
        let table = RateTable::new(series(Currency::Eur, &rates));

        let rolling = add_rolling_average(&table, 7);

        assert_eq!(rolling.len(), table.len());
        assert_eq!(rolling.rows()[0].rolling_avg, rates[0]);
        for (k, row) in rolling.rows().iter().enumerate() {
            let lo = k.saturating_sub(6);
            let expected = rates[lo..=k].iter().sum::<f64>() / (k - lo + 1) as f64;
            assert!((row.rolling_avg - expected).abs() < 1e-12, "row {k}");
            assert_eq!(row.rate, rates[k]);
        }
    }

    #[test]
    fn currencies_do_not_share_a_window() {
        let mut rows = series(Currency::Usd, &[40.0, 42.0]);
        rows.extend(series(Currency::Eur, &[44.0, 46.0]));
        let rolling = add_rolling_average(&RateTable::new(rows), 7);

        let eur: Vec<f64> = rolling
            .rows()
            .iter()
            .filter(|r| r.currency == Currency::Eur)
            .map(|r| r.rolling_avg)
            .collect();
        assert_eq!(eur, vec![44.0, 45.0]);
    }

    #[test]
    fn input_table_is_left_untouched() {
        let table = RateTable::new(series(Currency::Usd, &[40.0, 41.0]));
        let before = table.clone();
        let _ = add_rolling_average(&table, 7);
        assert_eq!(table, before);
    }

    #[test]
    fn zero_window_is_identity() {
        let table = RateTable::new(series(Currency::Usd, &[40.0, 41.0]));
        let rolling = add_rolling_average(&table, 0);
        assert_eq!(rolling.rows()[1].rolling_avg, 41.0);
    }
}
