//! Interactive menu loop.
//!
//! The shell owns a `Session` holding the most recently produced table.
//! Fetch and save failures are printed and the loop continues; only a broken
//! terminal ends `run` with an error.

use std::io::{BufRead, Write};
use std::time::Instant;

use crate::app::pipeline::fetch_table;
use crate::cli::prompt::{
    AfterAction, MenuChoice, error, info, prompt_currency, prompt_filename, read_line, warn,
};
use crate::data::RateSource;
use crate::domain::{DEFAULT_CSV_FILENAME, RateTable, RatesConfig, RollingTable};
use crate::error::AppError;
use crate::io::{export_path, write_table_csv};
use crate::report::{build_breakdown, format_breakdown, format_summary_table};
use crate::table::add_rolling_average;

/// State carried between menu actions.
#[derive(Debug, Clone, Default)]
pub struct Session {
    table: Option<RollingTable>,
}

impl Session {
    /// The table actions 2/3 operate on; replaced by every successful fetch.
    pub fn table(&self) -> Option<&RollingTable> {
        self.table.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'a, S: RateSource + ?Sized, R, W> {
    source: &'a S,
    config: &'a RatesConfig,
    input: R,
    out: W,
    session: Session,
}

impl<'a, S, R, W> Shell<'a, S, R, W>
where
    S: RateSource + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(source: &'a S, config: &'a RatesConfig, input: R, out: W) -> Self {
        Self {
            source,
            config,
            input,
            out,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the user exits, quits, or input ends.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.show_menu()?;

        loop {
            let Some(choice) = read_line(&mut self.input, &mut self.out, "Choose an option [1-4]: ")? else {
                return Ok(());
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Summary) => self.handle_summary()?,
                Some(MenuChoice::Breakdown) => self.handle_breakdown()?,
                Some(MenuChoice::Save) => self.handle_save()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.out, "\nExiting.")?;
                    return Ok(());
                }
                None => {
                    error(&mut self.out, "Invalid choice. Choose 1, 2, 3, or 4.")?;
                    continue;
                }
            };

            if flow == Flow::Quit {
                return Ok(());
            }
            self.show_menu()?;
        }
    }

    fn show_menu(&mut self) -> Result<(), AppError> {
        let days = self.config.days;
        writeln!(self.out, "\n==============================")?;
        writeln!(self.out, " Currency Rates (Based on NBU API data) ")?;
        writeln!(self.out, "==============================")?;
        writeln!(self.out, "1) Summary: Current rates + {days}-day averages (USD & EUR)")?;
        writeln!(self.out, "2) Full breakdown: Detailed stats for USD or EUR")?;
        writeln!(self.out, "3) Save current data to CSV")?;
        writeln!(self.out, "4) Exit")?;
        Ok(())
    }

    fn handle_summary(&mut self) -> Result<Flow, AppError> {
        let Some(table) = self.fetch()? else {
            return self.ask_continue(None);
        };

        write!(self.out, "{}", format_summary_table(&table, self.config.days))?;
        self.session.table = Some(add_rolling_average(&table, self.config.window));

        let default = format!("summary_usd_eur_{}days.csv", self.config.days);
        self.ask_continue(Some(default))
    }

    fn handle_breakdown(&mut self) -> Result<Flow, AppError> {
        let Some(table) = self.fetch()? else {
            return self.ask_continue(None);
        };
        let Some(currency) = prompt_currency(&mut self.input, &mut self.out)? else {
            return Ok(Flow::Quit);
        };

        let Some(breakdown) = build_breakdown(&table, currency, self.config.window) else {
            warn(&mut self.out, &format!("No data found for {currency}."))?;
            return self.ask_continue(None);
        };

        write!(self.out, "{}", format_breakdown(&breakdown, self.config))?;
        self.session.table = Some(breakdown.rolling);

        let default = format!(
            "breakdown_{}_{}days.csv",
            currency.code().to_ascii_lowercase(),
            self.config.days
        );
        self.ask_continue(Some(default))
    }

    fn handle_save(&mut self) -> Result<Flow, AppError> {
        if self.session.table().is_none_or(|t| t.is_empty()) {
            warn(&mut self.out, "No data loaded. Please fetch data first (option 1 or 2).")?;
        } else if !self.save(DEFAULT_CSV_FILENAME)? {
            return Ok(Flow::Quit);
        }
        self.ask_continue(None)
    }

    /// Fetch the configured range. Failures are reported and yield `None`.
    fn fetch(&mut self) -> Result<Option<RateTable>, AppError> {
        writeln!(
            self.out,
            "\n> Fetching last {} days of currency data (USD and EUR only)...",
            self.config.days
        )?;
        let started = Instant::now();

        match fetch_table(self.source, self.config) {
            Ok(output) if output.table.is_empty() => {
                warn(&mut self.out, "No data fetched.")?;
                Ok(None)
            }
            Ok(output) => {
                let secs = output.elapsed.as_secs_f64();
                info(&mut self.out, &format!("Query completed in {secs:.2} seconds"))?;
                Ok(Some(output.table))
            }
            Err(err) => {
                log::warn!("Fetch failed: {err}");
                let secs = started.elapsed().as_secs_f64();
                error(
                    &mut self.out,
                    &format!("Failed to fetch data after {secs:.2} seconds: {err}"),
                )?;
                Ok(None)
            }
        }
    }

    /// Export the held table. `Ok(false)` means input ended at the prompt.
    fn save(&mut self, default_filename: &str) -> Result<bool, AppError> {
        let Some(filename) = prompt_filename(&mut self.input, &mut self.out, default_filename)? else {
            return Ok(false);
        };
        let Some(table) = self.session.table.as_ref() else {
            warn(&mut self.out, "No data available to save.")?;
            return Ok(true);
        };

        let path = export_path(&self.config.data_dir, &filename);
        match write_table_csv(&path, table) {
            Ok(rows) => {
                info(&mut self.out, &format!("Data saved to {}", path.display()))?;
                info(&mut self.out, &format!("Saved {rows} rows"))?;
            }
            Err(err) => {
                log::warn!("Export failed: {err}");
                error(&mut self.out, &format!("Failed to save CSV: {err}"))?;
            }
        }
        Ok(true)
    }

    /// The after-action prompt. Saving is offered only when an action just
    /// produced a table (`save_default` holds its default file name).
    fn ask_continue(&mut self, save_default: Option<String>) -> Result<Flow, AppError> {
        let (prompt, help) = if save_default.is_some() {
            (
                "\nContinue, Save, or Quit? (c/s/q): ",
                "Please enter 'c' to continue, 's' to save, or 'q' to quit.",
            )
        } else {
            (
                "\nContinue or Quit? (c/q): ",
                "Please enter 'c' to continue or 'q' to quit.",
            )
        };

        loop {
            let Some(answer) = read_line(&mut self.input, &mut self.out, prompt)? else {
                return Ok(Flow::Quit);
            };

            match (AfterAction::parse(&answer), save_default.as_deref()) {
                (Some(AfterAction::Continue), _) => return Ok(Flow::Continue),
                (Some(AfterAction::Quit), _) => return Ok(Flow::Quit),
                (Some(AfterAction::Save), Some(default)) => {
                    return Ok(if self.save(default)? { Flow::Continue } else { Flow::Quit });
                }
                (Some(AfterAction::Save), None) => {
                    warn(&mut self.out, "No data available to save.")?;
                }
                (None, _) => error(&mut self.out, help)?,
            }
        }
    }
}
