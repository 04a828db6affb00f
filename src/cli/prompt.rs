//! Line-oriented prompts for the interactive shell.
//!
//! All helpers take the reader/writer explicitly so the shell can run against
//! stdin/stdout or a scripted buffer. End of input is reported as `None`,
//! never as an error.

use std::io::{BufRead, IsTerminal, Write};
use std::sync::OnceLock;

use crossterm::style::{Color, Stylize};

use crate::domain::Currency;
use crate::error::AppError;
use crate::io::export_filename;

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Summary,
    Breakdown,
    Save,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Summary),
            "2" => Some(MenuChoice::Breakdown),
            "3" => Some(MenuChoice::Save),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Answers to the prompt shown after each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterAction {
    Continue,
    Save,
    Quit,
}

impl AfterAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "c" | "continue" => Some(AfterAction::Continue),
            "s" | "save" => Some(AfterAction::Save),
            "q" | "quit" => Some(AfterAction::Quit),
            _ => None,
        }
    }
}

/// Print `prompt` and read one trimmed line.
pub fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>, AppError> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask until a supported currency is entered.
pub fn prompt_currency<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Option<Currency>, AppError> {
    loop {
        let Some(answer) = read_line(input, out, "\nSelect currency for detailed breakdown (USD/EUR): ")?
        else {
            return Ok(None);
        };
        match Currency::validate(&answer) {
            Ok(currency) => return Ok(Some(currency)),
            Err(err) => error(out, &format!("{err} Please try again."))?,
        }
    }
}

/// Ask for an export file name; blank input picks `default`. Names with a
/// directory part are refused and asked for again.
pub fn prompt_filename<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    default: &str,
) -> Result<Option<String>, AppError> {
    let prompt = format!("\nEnter filename (default: {default}): ");
    loop {
        let Some(answer) = read_line(input, out, &prompt)? else {
            return Ok(None);
        };
        match export_filename(&answer, default) {
            Ok(name) => return Ok(Some(name)),
            Err(err) => error(out, &err.to_string())?,
        }
    }
}

/// Status tags are coloured only on an interactive stdout with `NO_COLOR` unset.
fn color_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
    })
}

fn status_tag(label: &str, color: Color, bold: bool, enabled: bool) -> String {
    if !enabled {
        return label.to_string();
    }
    let styled = label.with(color);
    if bold { styled.bold().to_string() } else { styled.to_string() }
}

pub fn info<W: Write>(out: &mut W, msg: &str) -> Result<(), AppError> {
    writeln!(out, "{} {msg}", status_tag("[INFO]", Color::Green, false, color_enabled()))?;
    Ok(())
}

pub fn warn<W: Write>(out: &mut W, msg: &str) -> Result<(), AppError> {
    writeln!(out, "{} {msg}", status_tag("[WARN]", Color::Yellow, false, color_enabled()))?;
    Ok(())
}

pub fn error<W: Write>(out: &mut W, msg: &str) -> Result<(), AppError> {
    writeln!(out, "{} {msg}", status_tag("[ERROR]", Color::Red, true, color_enabled()))?;
    Ok(())
}
