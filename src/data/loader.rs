use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use super::error::DataError;
use super::model::{parse_search_volume, RegionRecord, RegionTable, WeekRecord, WeekTable};

/// Filename prefix of the yearly regional exports (`geoMap 2021.csv`).
pub const DEFAULT_REGION_PREFIX: &str = "geoMap";

/// Filename of the weekly time series inside the data directory.
pub const DEFAULT_TIMELINE_FILE: &str = "multiTimeline.csv";

const CSV_SUFFIX: &str = ".csv";

// ---------------------------------------------------------------------------
// Region snapshots
// ---------------------------------------------------------------------------

/// Load every `<prefix> <year>.csv` file in `directory` into one table.
///
/// Files are visited in ascending filename order so the result is stable
/// across platforms. A file whose year does not parse is logged and skipped;
/// if no file is accepted the load fails with [`DataError::EmptyInput`].
pub fn load_region_table(directory: &Path, prefix: &str) -> Result<RegionTable, DataError> {
    let entries = std::fs::read_dir(directory).map_err(|e| DataError::io(directory, e))?;

    let mut candidates: Vec<(String, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DataError::io(directory, e))?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if name.starts_with(prefix) && name.ends_with(CSV_SUFFIX) {
            candidates.push((name, entry.path()));
        }
    }
    candidates.sort();

    let mut table = RegionTable::new();
    let mut accepted = 0usize;

    for (name, path) in candidates {
        let Some(year) = year_from_filename(&name, prefix) else {
            log::warn!("Could not read a year from '{name}', skipping");
            continue;
        };

        let rows = read_two_column_csv(&path)?;
        log::debug!("{name}: {} regions for {year}", rows.len());

        for (line, (region, volume)) in rows {
            let search_volume = parse_search_volume(&volume).ok_or_else(|| {
                DataError::malformed(&path, format!("line {line}: '{volume}' is not a search volume"))
            })?;
            table.push(RegionRecord {
                region,
                search_volume,
                year,
            });
        }
        accepted += 1;
    }

    if accepted == 0 {
        return Err(DataError::EmptyInput {
            directory: directory.to_path_buf(),
            prefix: prefix.to_string(),
        });
    }

    log::info!(
        "Loaded {} region rows from {accepted} files in {}",
        table.len(),
        directory.display()
    );
    Ok(table)
}

/// `"geoMap 2021.csv"` → `Some(2021)`.
fn year_from_filename(name: &str, prefix: &str) -> Option<i32> {
    name.strip_prefix(prefix)?
        .strip_suffix(CSV_SUFFIX)?
        .trim()
        .parse::<i32>()
        .ok()
}

// ---------------------------------------------------------------------------
// Weekly series
// ---------------------------------------------------------------------------

/// Load the weekly time series. Every row must carry a valid date.
pub fn load_week_table(path: &Path) -> Result<WeekTable, DataError> {
    let rows = read_two_column_csv(path)?;

    let mut table = WeekTable::with_capacity(rows.len());
    for (line, (week, volume)) in rows {
        let week = parse_week(&week).ok_or_else(|| {
            DataError::malformed(path, format!("line {line}: '{week}' is not a date"))
        })?;
        let search_volume = parse_search_volume(&volume).ok_or_else(|| {
            DataError::malformed(path, format!("line {line}: '{volume}' is not a search volume"))
        })?;
        table.push(WeekRecord {
            week,
            search_volume,
        });
    }

    log::info!("Loaded {} weeks from {}", table.len(), path.display());
    Ok(table)
}

fn parse_week(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(cell, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S"))
                .ok()
                .map(|dt| dt.date())
        })
}

// ---------------------------------------------------------------------------
// Shared CSV layout
// ---------------------------------------------------------------------------

/// Read an export laid out as:
///
/// ```text
/// Category: All categories      <- title, discarded
///                               <- optional blank lines
/// Region,travel insurance: (…)  <- header, names discarded
/// Sao Paulo,100
/// ```
///
/// Returns `(line_number, first, second)` per data row, where the line number
/// is 1-based in the original file.
fn read_two_column_csv(path: &Path) -> Result<Vec<(usize, (String, String))>, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;

    // Drop the title row, then any blank lines in front of the header.
    let mut skipped = 1usize;
    let mut body = match text.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    };
    while let Some((line, rest)) = body.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        body = rest;
        skipped += 1;
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader.headers().map_err(|source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    if headers.len() != 2 {
        return Err(DataError::malformed(
            path,
            format!("expected 2 columns, header has {}", headers.len()),
        ));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = skipped + record.position().map(|p| p.line() as usize).unwrap_or(0);
        if record.len() != 2 {
            return Err(DataError::malformed(
                path,
                format!("line {line}: expected 2 columns, found {}", record.len()),
            ));
        }
        rows.push((line, (record[0].to_string(), record[1].to_string())));
    }
    Ok(rows)
}
