//! Raw records to validated `RateTable`s.

use crate::domain::{Currency, RateRecord, RateTable, RawRate};

/// Build a table from raw records.
///
/// Rows are kept only when the currency is supported and the rate parses to a
/// finite, strictly positive number. Everything else is dropped without error.
pub fn records_to_table(records: &[RawRate]) -> RateTable {
    let rows: Vec<RateRecord> = records
        .iter()
        .filter_map(|raw| {
            let currency = Currency::parse(&raw.cc)?;
            let Some(rate) = parse_rate(&raw.rate) else {
                log::debug!("Dropping {} on {}: unparsable rate {}", raw.cc, raw.iso_date, raw.rate);
                return None;
            };
            Some(RateRecord {
                date: raw.iso_date,
                currency,
                rate,
            })
        })
        .collect();

    RateTable::new(rows)
}

/// Rows for one currency, in date order.
///
/// `code` is matched case-insensitively; an unsupported code yields an empty
/// table rather than an error.
pub fn filter_currency(table: &RateTable, code: &str) -> RateTable {
    match Currency::parse(code) {
        Some(currency) => select_currency(table, currency),
        None => RateTable::default(),
    }
}

pub fn select_currency(table: &RateTable, currency: Currency) -> RateTable {
    RateTable::new(
        table
            .rows()
            .iter()
            .filter(|r| r.currency == currency)
            .copied()
            .collect(),
    )
}

/// Numbers and numeric strings are accepted; `null`, text, zero, negatives
/// and non-finite values are not.
fn parse_rate(value: &serde_json::Value) -> Option<f64> {
    let v = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if v.is_finite() && v > 0.0 { Some(v) } else { None }
}
