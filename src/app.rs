//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initializes logging
//! - builds the NBU client
//! - runs the interactive shell or a one-shot command

use std::io;

use clap::Parser;

use crate::cli::shell::Shell;
use crate::cli::{BreakdownArgs, Command, ExportArgs, rates_config_from_args};
use crate::data::NbuClient;
use crate::domain::{RatesConfig, DEFAULT_CSV_FILENAME};
use crate::error::AppError;
use crate::io::{export_filename, export_path, write_table_csv};
use crate::report::{build_breakdown, format_breakdown, format_summary_table, format_table};
use crate::table::{add_rolling_average, select_currency};

pub mod pipeline;

/// Entry point for the `rates` binary.
pub fn run() -> Result<(), AppError> {
    // `rates` and `rates --days 10` behave like `rates shell ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let common = cli.command.common();
    init_logging(common.verbose);
    let config = rates_config_from_args(common);
    let client = NbuClient::from_env(&config)?;
    log::debug!("Using NBU endpoint {}", client.base_url());

    match cli.command {
        Command::Shell(_) => handle_shell(&client, &config),
        Command::Summary(_) => handle_summary(&client, &config),
        Command::Breakdown(args) => handle_breakdown(&client, &config, &args),
        Command::Export(args) => handle_export(&client, &config, &args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn handle_shell(client: &NbuClient, config: &RatesConfig) -> Result<(), AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(client, config, stdin.lock(), stdout.lock()).run()
}

fn handle_summary(client: &NbuClient, config: &RatesConfig) -> Result<(), AppError> {
    let output = pipeline::fetch_table(client, config)?;
    if output.table.is_empty() {
        return Err(AppError::EmptyResult("No data fetched.".to_string()));
    }
    print!("{}", format_summary_table(&output.table, config.days));
    Ok(())
}

fn handle_breakdown(client: &NbuClient, config: &RatesConfig, args: &BreakdownArgs) -> Result<(), AppError> {
    let output = pipeline::fetch_table(client, config)?;
    let breakdown = build_breakdown(&output.table, args.currency, config.window)
        .ok_or_else(|| AppError::EmptyResult(format!("No data found for {}.", args.currency)))?;
    print!("{}", format_breakdown(&breakdown, config));
    Ok(())
}

fn handle_export(client: &NbuClient, config: &RatesConfig, args: &ExportArgs) -> Result<(), AppError> {
    let filename = export_filename(args.output.as_deref().unwrap_or(""), DEFAULT_CSV_FILENAME)?;
    let output = pipeline::fetch_table(client, config)?;
    let table = match args.currency {
        Some(currency) => select_currency(&output.table, currency),
        None => output.table,
    };
    if table.is_empty() {
        return Err(AppError::EmptyResult("No data to export.".to_string()));
    }

    let path = export_path(&config.data_dir, &filename);
    let rolling = add_rolling_average(&table, config.window);
    let rows = write_table_csv(&path, &rolling)?;
    print!("{}", format_table(&rolling, config.max_rows));
    println!("Saved {rows} rows to {}", path.display());
    Ok(())
}

/// Rewrite argv so `rates` defaults to `rates shell`.
///
/// Rules:
/// - `rates`                      -> `rates shell`
/// - `rates --days 10 ...`        -> `rates shell --days 10 ...`
/// - `rates --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("shell".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "shell" | "summary" | "breakdown" | "export");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "shell flags".
    if arg1.starts_with('-') {
        argv.insert(1, "shell".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_the_shell() {
        assert_eq!(rewrite_args(argv(&["rates"])), argv(&["rates", "shell"]));
    }

    #[test]
    fn leading_flags_go_to_the_shell() {
        assert_eq!(
            rewrite_args(argv(&["rates", "--days", "10"])),
            argv(&["rates", "shell", "--days", "10"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["rates", "--help"])), argv(&["rates", "--help"]));
        assert_eq!(
            rewrite_args(argv(&["rates", "summary", "-d", "5"])),
            argv(&["rates", "summary", "-d", "5"])
        );
    }

    #[test]
    fn export_rejects_paths_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("escaped");
        let cli = crate::cli::Cli::parse_from([
            "rates",
            "export",
            "--data-dir",
            dir.path().join("data").to_str().unwrap(),
            "--output",
            outside.to_str().unwrap(),
        ]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        let config = rates_config_from_args(&args.common);
        // Nothing listens here; reaching the network would yield a Network error.
        let client = NbuClient::new("http://127.0.0.1:9", std::time::Duration::from_millis(200)).unwrap();

        let err = handle_export(&client, &config, &args).unwrap_err();

        assert!(matches!(err, AppError::InvalidFileName(_)), "{err}");
        assert!(!outside.with_extension("csv").exists());
        assert!(!dir.path().join("data").exists());
    }

    #[test]
    fn rewritten_args_parse() {
        let cli = crate::cli::Cli::parse_from(rewrite_args(argv(&["rates", "-d", "7"])));
        assert!(matches!(cli.command, Command::Shell(ref args) if args.days == 7));
    }
}
