//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed rates: `o`
//! - rolling average: `-` line

use chrono::NaiveDate;

use crate::domain::RollingTable;

/// Render a rate history chart for a single-currency rolling table.
pub fn render_rate_chart(table: &RollingTable, width: usize, height: usize) -> String {
    let Some((first, last)) = table.date_range().filter(|(a, b)| b > a) else {
        return "Chart: not enough data points to plot.\n".to_string();
    };

    let values = table.rows().iter().flat_map(|r| [r.rate, r.rolling_avg]);
    let Some((lo, hi)) = value_band(values) else {
        return "Chart: not enough data points to plot.\n".to_string();
    };

    let mut canvas = Canvas::new(width, height, first, last, lo, hi);

    // Average first so observed points overlay it.
    let avg_cells: Vec<(usize, usize)> = table
        .rows()
        .iter()
        .map(|r| canvas.cell(r.date, r.rolling_avg))
        .collect();
    canvas.polyline(&avg_cells, '-');

    for r in table.rows() {
        let cell = canvas.cell(r.date, r.rate);
        canvas.put(cell, 'o');
    }

    let mut out = format!(
        "Chart: {first} → {last} | rate=[{:.2}, {:.2}] (o = rate, - = rolling avg)\n",
        canvas.y_lo, canvas.y_hi
    );
    for line in &canvas.grid {
        out.extend(line.iter());
        out.push('\n');
    }
    out
}

/// Min/max of `values`, widened by 5% of the span. A flat series gets a unit
/// band so it lands mid-grid.
fn value_band(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    if hi > lo {
        let pad = ((hi - lo) * 0.05).max(1e-12);
        Some((lo - pad, hi + pad))
    } else {
        Some((lo - 0.5, hi + 0.5))
    }
}

/// Fixed character grid with day offsets on x and rate values on y.
struct Canvas {
    grid: Vec<Vec<char>>,
    first: NaiveDate,
    span_days: f64,
    y_lo: f64,
    y_hi: f64,
}

impl Canvas {
    fn new(width: usize, height: usize, first: NaiveDate, last: NaiveDate, y_lo: f64, y_hi: f64) -> Self {
        Self {
            grid: vec![vec![' '; width.max(10)]; height.max(5)],
            first,
            span_days: (last - first).num_days().max(1) as f64,
            y_lo,
            y_hi,
        }
    }

    fn width(&self) -> usize {
        self.grid[0].len()
    }

    fn height(&self) -> usize {
        self.grid.len()
    }

    /// Grid cell `(col, row)` for a dated value; row 0 is the top.
    fn cell(&self, date: NaiveDate, value: f64) -> (usize, usize) {
        let day = (date - self.first).num_days() as f64;
        let fx = (day / self.span_days).clamp(0.0, 1.0);
        let fy = ((value - self.y_lo) / (self.y_hi - self.y_lo)).clamp(0.0, 1.0);

        let col = (fx * (self.width() - 1) as f64).round() as usize;
        let row = ((1.0 - fy) * (self.height() - 1) as f64).round() as usize;
        (col, row)
    }

    fn put(&mut self, (col, row): (usize, usize), ch: char) {
        self.grid[row][col] = ch;
    }

    /// Join consecutive cells with `ch`, leaving already-drawn cells alone.
    fn polyline(&mut self, cells: &[(usize, usize)], ch: char) {
        if cells.len() < 2 {
            return;
        }
        for pair in cells.windows(2) {
            let (c0, r0) = (pair[0].0 as f64, pair[0].1 as f64);
            let (c1, r1) = (pair[1].0 as f64, pair[1].1 as f64);
            let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1.0) as usize;

            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                let col = (c0 + (c1 - c0) * t).round() as usize;
                let row = (r0 + (r1 - r0) * t).round() as usize;
                if self.grid[row][col] == ' ' {
                    self.grid[row][col] = ch;
                }
            }
        }
    }
}
