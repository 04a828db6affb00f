//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the statistics/transform code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{Currency, RateTable, RatesConfig, RollingTable, StatSummary};
use crate::plot::render_rate_chart;
use crate::report::{Breakdown, summarize};

/// One-row statistics table for a single currency.
pub fn format_stats_table(stats: &StatSummary, currency: Currency) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!("{:<8} {:>12} {:>12} {:>12} {:>12}", "Currency", "Mean", "Std", "Min", "Max"),
    );
    push_line(
        &mut out,
        format!("{:-<8} {:->12} {:->12} {:->12} {:->12}", "", "", "", "", ""),
    );
    push_line(
        &mut out,
        format!(
            "{:<8} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            currency.code(),
            stats.mean,
            stats.std,
            stats.min,
            stats.max
        ),
    );
    out
}

/// Date-ordered rate table with rolling averages, at most `max_rows` rows.
pub fn format_table(table: &RollingTable, max_rows: usize) -> String {
    if table.is_empty() {
        return "No data to display.\n".to_string();
    }

    let mut out = String::new();
    push_line(
        &mut out,
        format!("{:<10} {:<8} {:>12} {:>12}", "date", "currency", "rate", "rolling_avg"),
    );
    push_line(&mut out, format!("{:-<10} {:-<8} {:->12} {:->12}", "", "", "", ""));

    for r in table.rows().iter().take(max_rows) {
        push_line(
            &mut out,
            format!(
                "{:<10} {:<8} {:>12.4} {:>12.4}",
                r.date.to_string(),
                r.currency.code(),
                r.rate,
                r.rolling_avg
            ),
        );
    }

    if table.len() > max_rows {
        push_line(
            &mut out,
            format!("... {} more rows (showing {max_rows} of {})", table.len() - max_rows, table.len()),
        );
    }

    out
}

/// Current rate, period average and difference for each currency present.
pub fn format_summary_table(table: &RateTable, days: usize) -> String {
    let summary = summarize(table);
    if summary.is_empty() {
        return "No data available for summary.\n".to_string();
    }

    let latest = table
        .date_range()
        .map(|(_, last)| last.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let avg_header = format!("{days}-Day Avg");

    let mut out = String::new();
    out.push_str(&format!("\nCurrency Summary (Last {days} Days)\n"));
    out.push_str(&format!("Date: {latest}\n\n"));
    push_line(
        &mut out,
        format!("{:<8} {:>14} {:>14} {:>14}", "Currency", "Current Rate", avg_header, "Difference"),
    );
    push_line(&mut out, format!("{:-<8} {:->14} {:->14} {:->14}", "", "", "", ""));

    for s in &summary {
        push_line(
            &mut out,
            format!(
                "{:<8} {:>14.4} {:>14.4} {:>14}",
                s.currency.code(),
                s.current,
                s.average,
                format!("{:+.4}", s.difference)
            ),
        );
    }

    out
}

/// Full single-currency breakdown: range, statistics, table, chart and insights.
pub fn format_breakdown(b: &Breakdown, config: &RatesConfig) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    out.push_str(&format!("\n{rule}\nFULL BREAKDOWN: {}\n{rule}\n", b.currency));

    if let Some((first, last)) = b.rolling.date_range() {
        out.push_str(&format!("\nDate Range: {first} → {last}\n"));
    }
    out.push_str(&format!("Total Data Points: {}\n", b.rolling.len()));

    out.push_str("\nStatistical Summary:\n");
    out.push_str(&format_stats_table(&b.stats, b.currency));

    out.push_str(&format!(
        "\nFull {}-Day Data with {}-Day Rolling Average:\n",
        config.days,
        config.window.max(1)
    ));
    out.push_str(&format_table(&b.rolling, config.detail_rows));

    if config.plot {
        out.push('\n');
        out.push_str(&render_rate_chart(&b.rolling, config.plot_width, config.plot_height));
    }

    out.push_str("\nInsights:\n");
    out.push_str(&format!("   Current Rate: {:.4} UAH\n", b.current));
    out.push_str(&format!("   {}-Day Average: {:.4} UAH\n", config.days, b.stats.mean));
    out.push_str(&format!("   Change from Average: {:+.2}%\n", b.change_pct));
    out.push_str(&format!("   Volatility (Std Dev): {:.4} UAH\n", b.stats.std));
    out.push_str(&format!("   Range: {:.4} - {:.4} UAH\n", b.stats.min, b.stats.max));

    out
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}
