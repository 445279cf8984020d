use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// RegionRecord – one row of a yearly regional snapshot
// ---------------------------------------------------------------------------

/// Search volume for one region in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRecord {
    pub region: String,
    pub search_volume: f64,
    /// Taken from the source filename, never from the file body.
    pub year: i32,
}

/// All region rows: files in ascending filename order, rows in file order.
pub type RegionTable = Vec<RegionRecord>;

// ---------------------------------------------------------------------------
// WeekRecord – one row of the weekly time series
// ---------------------------------------------------------------------------

/// Search volume for one calendar week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekRecord {
    pub week: NaiveDate,
    pub search_volume: f64,
}

/// The weekly series in source order (ascending week).
pub type WeekTable = Vec<WeekRecord>;

// ---------------------------------------------------------------------------
// Period – one side of a two-period comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Period {
    A,
    B,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::A => write!(f, "Period A"),
            Period::B => write!(f, "Period B"),
        }
    }
}

/// A week row tagged with the period it was assigned to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodWeekRecord {
    pub period: Period,
    pub week: NaiveDate,
    pub search_volume: f64,
}

// ---------------------------------------------------------------------------
// Search volume cells
// ---------------------------------------------------------------------------

/// Parse a search-volume cell.
///
/// Trends exports write `<1` for volumes that round below one; it is read as
/// `0.5`. Empty cells are read as `0.0`.
pub fn parse_search_volume(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    match cell {
        "" => Some(0.0),
        "<1" => Some(0.5),
        other => other.parse::<f64>().ok().filter(|v| v.is_finite()),
    }
}

/// Distinct years present in a region table, ascending.
pub fn distinct_years(table: &[RegionRecord]) -> BTreeSet<i32> {
    table.iter().map(|r| r.year).collect()
}
