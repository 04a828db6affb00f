//! NBU exchange-rate API integration.
//!
//! One blocking GET per calendar day against the `statdirectory/exchange`
//! endpoint. The feed returns every currency the bank quotes; only the
//! supported set is kept.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{Currency, RatesConfig, RawRate};
use crate::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://bank.gov.ua/NBUStatService/v1/statdirectory/exchange";

/// Anything that can produce one day of raw rate records.
pub trait RateSource {
    fn fetch_rates_for_date(&self, date: NaiveDate) -> Result<Vec<RawRate>, AppError>;
}

pub struct NbuClient {
    client: Client,
    base_url: String,
}

impl NbuClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build a client from the run config.
    ///
    /// Base URL precedence: `--base-url`, then `NBU_BASE_URL` (`.env` honoured),
    /// then the public endpoint.
    pub fn from_env(config: &RatesConfig) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = config
            .base_url
            .clone()
            .or_else(|| std::env::var("NBU_BASE_URL").ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn daily_url(&self, date: NaiveDate) -> String {
        format!("{}?date={}&json", self.base_url, date.format("%Y%m%d"))
    }
}

impl RateSource for NbuClient {
    fn fetch_rates_for_date(&self, date: NaiveDate) -> Result<Vec<RawRate>, AppError> {
        let url = self.daily_url(date);
        log::debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|source| AppError::Network { date, source })?;

        if !resp.status().is_success() {
            return Err(AppError::Http {
                date,
                status: resp.status(),
            });
        }

        let body = resp
            .text()
            .map_err(|source| AppError::Network { date, source })?;

        parse_daily_body(&body, date)
    }
}

#[derive(Debug, Deserialize)]
struct NbuRecord {
    #[serde(default)]
    cc: Option<String>,
    #[serde(default)]
    rate: serde_json::Value,
}

/// Decode one day's JSON body, keeping supported currencies only.
pub fn parse_daily_body(body: &str, date: NaiveDate) -> Result<Vec<RawRate>, AppError> {
    let records: Vec<NbuRecord> = serde_json::from_str(body).map_err(|e| AppError::Decode {
        date,
        message: e.to_string(),
    })?;

    let total = records.len();
    let kept: Vec<RawRate> = records
        .into_iter()
        .filter_map(|r| {
            let cc = r.cc?;
            Currency::parse(&cc)?;
            Some(RawRate {
                iso_date: date,
                cc,
                rate: r.rate,
            })
        })
        .collect();

    log::debug!("{date}: kept {} of {total} records", kept.len());
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()
    }

    #[test]
    fn keeps_only_supported_currencies() {
        let body = r#"[
            {"r030":36,"txt":"Австралійський долар","rate":26.1714,"cc":"AUD","exchangedate":"14.02.2025"},
            {"r030":840,"txt":"Долар США","rate":41.6312,"cc":"USD","exchangedate":"14.02.2025"},
            {"r030":978,"txt":"Євро","rate":43.4502,"cc":"EUR","exchangedate":"14.02.2025"}
        ]"#;

        let rows = parse_daily_body(body, day()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.iso_date == day()));
        assert_eq!(rows[0].cc, "USD");
        assert_eq!(rows[0].rate, json!(41.6312));
        assert_eq!(rows[1].cc, "EUR");
    }

    #[test]
    fn unparsable_rates_pass_through_untouched() {
        let body = r#"[{"cc":"USD","rate":"n/a"},{"cc":"EUR"},{"rate":1.0}]"#;
        let rows = parse_daily_body(body, day()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rate, json!("n/a"));
        assert_eq!(rows[1].rate, serde_json::Value::Null);
    }

    #[test]
    fn non_array_body_is_a_decode_error() {
        let err = parse_daily_body("<html>maintenance</html>", day()).unwrap_err();
        assert!(matches!(err, AppError::Decode { date, .. } if date == day()));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn daily_url_uses_compact_date() {
        let client = NbuClient::new("http://localhost:9/exchange", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.daily_url(day()),
            "http://localhost:9/exchange?date=20250214&json"
        );
    }

    #[test]
    fn explicit_base_url_wins() {
        let config = RatesConfig {
            base_url: Some("http://localhost:9/rates".to_string()),
            ..RatesConfig::default()
        };
        let client = NbuClient::from_env(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9/rates");
    }

    #[test]
    fn unreachable_host_is_a_network_error() {
        // Port 9 (discard) is not expected to accept HTTP connections locally.
        let client = NbuClient::new("http://127.0.0.1:9/exchange", Duration::from_secs(2)).unwrap();
        let err = client.fetch_rates_for_date(day()).unwrap_err();
        assert!(matches!(err, AppError::Network { .. }), "{err}");
    }
}
