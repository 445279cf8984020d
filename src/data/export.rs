use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use super::error::DataError;
use super::model::Period;

#[derive(Debug, Serialize)]
struct RegionYearRow<'a> {
    region: &'a str,
    year: i32,
    search_volume: f64,
}

#[derive(Debug, Serialize)]
struct PeriodWeekRow {
    period: Period,
    week: NaiveDate,
    search_volume: f64,
}

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    region_year: Vec<RegionYearRow<'a>>,
    period_week: Vec<PeriodWeekRow>,
}

/// Write both summaries to `path` as pretty-printed JSON.
///
/// ```json
/// {
///   "region_year": [{ "region": "Acre", "year": 2021, "search_volume": 15.0 }],
///   "period_week": [{ "period": "A", "week": "2024-01-07", "search_volume": 40.0 }]
/// }
/// ```
pub fn export_summaries(
    path: &Path,
    region_summary: &BTreeMap<(String, i32), f64>,
    period_summary: &BTreeMap<(Period, NaiveDate), f64>,
) -> Result<(), DataError> {
    let doc = SummaryDocument {
        region_year: region_summary
            .iter()
            .map(|((region, year), &search_volume)| RegionYearRow {
                region,
                year: *year,
                search_volume,
            })
            .collect(),
        period_week: period_summary
            .iter()
            .map(|(&(period, week), &search_volume)| PeriodWeekRow {
                period,
                week,
                search_volume,
            })
            .collect(),
    };

    let file = std::fs::File::create(path).map_err(|e| DataError::io(path, e))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writer.flush().map_err(|e| DataError::io(path, e))?;
    log::info!("Exported summaries to {}", path.display());
    Ok(())
}
