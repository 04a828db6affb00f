//! Command-line parsing for the NBU exchange-rate viewer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fetch/transform code. The interactive menu lives in `shell`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{
    Currency, DEFAULT_DATA_DIR, DEFAULT_DAYS, DEFAULT_MAX_ROWS, DEFAULT_TIMEOUT_SECS, DETAIL_MAX_ROWS,
    ROLLING_WINDOW, RatesConfig,
};

pub mod prompt;
pub mod shell;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rates", version, about = "USD/EUR exchange rates from the National Bank of Ukraine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive menu (the default when no subcommand is given).
    Shell(CommonArgs),
    /// Print current rates against the period average and exit.
    Summary(CommonArgs),
    /// Print the detailed statistics for one currency and exit.
    Breakdown(BreakdownArgs),
    /// Fetch, annotate with rolling averages and write a CSV under the data directory.
    Export(ExportArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Number of calendar days to fetch, today included.
    #[arg(short = 'd', long, default_value_t = DEFAULT_DAYS)]
    pub days: usize,

    /// Rolling-average window (rows).
    #[arg(short = 'w', long, default_value_t = ROLLING_WINDOW)]
    pub window: usize,

    /// Last day of the range (YYYY-MM-DD); defaults to today.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Directory CSV exports are written to.
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// NBU API base URL (overrides NBU_BASE_URL).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// HTTP timeout per request, in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Maximum rows shown in plain tables.
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    pub rows: usize,

    /// Maximum rows shown in the breakdown table.
    #[arg(long, default_value_t = DETAIL_MAX_ROWS)]
    pub detail_rows: usize,

    /// Disable the ASCII chart in the breakdown.
    #[arg(long)]
    pub no_plot: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Log fetch progress to stderr (RUST_LOG overrides).
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(Debug, Args, Clone)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Currency to break down.
    #[arg(short = 'c', long, value_enum, ignore_case = true)]
    pub currency: Currency,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Export a single currency instead of both.
    #[arg(short = 'c', long, value_enum, ignore_case = true)]
    pub currency: Option<Currency>,

    /// File name inside the data directory (`.csv` is appended if missing).
    #[arg(short = 'o', long, value_name = "NAME")]
    pub output: Option<String>,
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Shell(args) | Command::Summary(args) => args,
            Command::Breakdown(args) => &args.common,
            Command::Export(args) => &args.common,
        }
    }
}

pub fn rates_config_from_args(args: &CommonArgs) -> RatesConfig {
    RatesConfig {
        days: args.days,
        window: args.window,
        as_of: args.as_of,
        data_dir: args.data_dir.clone(),
        base_url: args.base_url.clone(),
        timeout_secs: args.timeout,
        max_rows: args.rows,
        detail_rows: args.detail_rows,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        let cli = Cli::parse_from(["rates", "shell"]);
        let config = rates_config_from_args(cli.command.common());
        let defaults = RatesConfig::default();

        assert_eq!(config.days, defaults.days);
        assert_eq!(config.window, defaults.window);
        assert_eq!(config.data_dir, defaults.data_dir);
        assert_eq!(config.timeout_secs, defaults.timeout_secs);
        assert_eq!(config.max_rows, defaults.max_rows);
        assert_eq!(config.detail_rows, defaults.detail_rows);
        assert_eq!(config.plot, defaults.plot);
        assert!(config.as_of.is_none());
    }

    #[test]
    fn breakdown_accepts_uppercase_currency() {
        let cli = Cli::parse_from(["rates", "breakdown", "--currency", "EUR", "--as-of", "2025-03-01"]);
        let Command::Breakdown(args) = cli.command else {
            panic!("expected breakdown");
        };
        assert_eq!(args.currency, Currency::Eur);
        assert_eq!(args.common.as_of, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn unsupported_currency_is_rejected() {
        assert!(Cli::try_parse_from(["rates", "breakdown", "-c", "gbp"]).is_err());
    }
}
