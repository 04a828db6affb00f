//! Multi-day aggregation over a `RateSource`.

use chrono::{Days, NaiveDate};

use crate::data::nbu::RateSource;
use crate::domain::RawRate;
use crate::error::AppError;

/// Fetch the `days` calendar days ending at `today` (inclusive), newest first.
///
/// Requests are strictly sequential. The first failing day aborts the whole
/// range and its error is returned as-is; nothing fetched so far is kept.
pub fn fetch_last_n_days<S: RateSource + ?Sized>(
    source: &S,
    today: NaiveDate,
    days: usize,
) -> Result<Vec<RawRate>, AppError> {
    log::info!("Fetching {days} day(s) of rates ending {today}");

    let mut all_records = Vec::new();
    for offset in 0..days as u64 {
        let day = today
            .checked_sub_days(Days::new(offset))
            .ok_or_else(|| AppError::Config(format!("Date range before {today} is out of bounds.")))?;

        let daily = source.fetch_rates_for_date(day).inspect_err(|e| {
            log::warn!("Aborting range fetch at {day}: {e}");
        })?;
        all_records.extend(daily);
    }

    Ok(all_records)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    /// Serves a fixed USD/EUR pair per day and records the requested dates.
    struct ScriptedSource {
        requested: RefCell<Vec<NaiveDate>>,
        fail_on: Option<NaiveDate>,
    }

    impl ScriptedSource {
        fn new(fail_on: Option<NaiveDate>) -> Self {
            Self {
                requested: RefCell::new(Vec::new()),
                fail_on,
            }
        }
    }

    impl RateSource for ScriptedSource {
        fn fetch_rates_for_date(&self, date: NaiveDate) -> Result<Vec<RawRate>, AppError> {
            self.requested.borrow_mut().push(date);
            if Some(date) == self.fail_on {
                return Err(AppError::Http {
                    date,
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                });
            }
            Ok(vec![
                RawRate { iso_date: date, cc: "USD".into(), rate: json!(41.0) },
                RawRate { iso_date: date, cc: "EUR".into(), rate: json!(44.0) },
            ])
        }
    }

    #[test]
    fn requests_each_day_newest_first() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let source = ScriptedSource::new(None);

        let records = fetch_last_n_days(&source, today, 3).unwrap();

        let expected = vec![
            today,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
        ];
        assert_eq!(*source.requested.borrow(), expected);
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].iso_date, today);
        assert_eq!(records[5].iso_date, expected[2]);
    }

    #[test]
    fn one_failing_day_aborts_the_range() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let bad = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let source = ScriptedSource::new(Some(bad));

        let err = fetch_last_n_days(&source, today, 5).unwrap_err();

        assert!(matches!(err, AppError::Http { date, .. } if date == bad));
        // No requests past the failing day.
        assert_eq!(source.requested.borrow().len(), 2);
    }

    #[test]
    fn zero_days_fetches_nothing() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let source = ScriptedSource::new(None);
        assert!(fetch_last_n_days(&source, today, 0).unwrap().is_empty());
        assert!(source.requested.borrow().is_empty());
    }
}
