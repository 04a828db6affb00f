//! Export rate tables to CSV (and read them back).
//!
//! Files land under the data directory. Numbers are written at full `f64`
//! precision so a re-read reproduces the exact rates.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{RollingRow, RollingTable};
use crate::error::AppError;

/// Resolve user input to a file name: blank means `default`, `.csv` is forced.
///
/// Only a bare file name is accepted. Anything carrying a directory part
/// (separators, `.`/`..`, an absolute path) is rejected so exports can never
/// leave the data directory.
pub fn export_filename(input: &str, default: &str) -> Result<String, AppError> {
    let name = input.trim();
    let name = if name.is_empty() { default } else { name };

    let bare = Path::new(name).file_name().and_then(|n| n.to_str());
    if name.contains(['/', '\\']) || bare != Some(name) {
        return Err(AppError::InvalidFileName(name.to_string()));
    }

    if name.to_ascii_lowercase().ends_with(".csv") {
        Ok(name.to_string())
    } else {
        Ok(format!("{name}.csv"))
    }
}

/// Join a name produced by [`export_filename`] onto the data directory.
pub fn export_path(data_dir: &Path, filename: &str) -> PathBuf {
    data_dir.join(filename)
}

/// Write `table` as `date,currency,rate,rolling_avg`, creating parent
/// directories as needed. Returns the number of data rows written.
pub fn write_table_csv(path: &Path, table: &RollingTable) -> Result<usize, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::file_write(parent, e))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| AppError::file_write(path, e))?;
    for row in table.rows() {
        writer.serialize(row).map_err(|e| AppError::file_write(path, e))?;
    }
    writer.flush().map_err(|e| AppError::file_write(path, e))?;

    log::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(table.len())
}

/// Read a file produced by `write_table_csv`.
pub fn read_table_csv(path: &Path) -> Result<RollingTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::file_read(path, e))?;

    let rows = reader
        .deserialize::<RollingRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::file_read(path, e))?;

    Ok(RollingTable::new(rows))
}
