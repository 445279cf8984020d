/// Data layer: record types, loading, filtering and export.
///
/// Architecture:
/// ```text
///  geoMap <year>.csv …   multiTimeline.csv
///        │                     │
///        ▼                     ▼
///   ┌──────────────────────────────┐
///   │  loader                       │  parse files → typed tables
///   └──────────────────────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DataContext   │  RegionTable + WeekTable, read-only
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐        ┌──────────┐
///   │  filter   │ ─────▶ │  export   │  summaries → JSON
///   └──────────┘        └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

use std::collections::BTreeSet;

use crate::config::DashboardConfig;
use error::DataError;
use model::{RegionTable, WeekTable};

/// Both tables, loaded once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DataContext {
    pub regions: RegionTable,
    pub weeks: WeekTable,
    years: BTreeSet<i32>,
}

impl DataContext {
    pub fn new(regions: RegionTable, weeks: WeekTable) -> Self {
        let years = model::distinct_years(&regions);
        Self {
            regions,
            weeks,
            years,
        }
    }

    /// Load the region snapshots and the weekly series named by `config`.
    pub fn load(config: &DashboardConfig) -> Result<Self, DataError> {
        let regions = loader::load_region_table(&config.data_dir, &config.region_prefix)?;
        let weeks = loader::load_week_table(&config.timeline_path())?;
        Ok(Self::new(regions, weeks))
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &BTreeSet<i32> {
        &self.years
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn load_reads_both_tables() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("geoMap 2022.csv"),
            "Category: All categories\n\nRegion,x\nAcre,3\nBahia,4\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("geoMap 2021.csv"),
            "Category: All categories\n\nRegion,x\nAcre,1\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("multiTimeline.csv"),
            "Category: All categories\n\nWeek,x\n2022-01-02,10\n2022-01-09,12\n",
        )
        .unwrap();

        let config = DashboardConfig::parse_from(["trends-dashboard"])
            .with_data_dir(dir.path().to_path_buf());
        let ctx = DataContext::load(&config).unwrap();

        assert_eq!(ctx.regions.len(), 3);
        assert_eq!(ctx.years().iter().copied().collect::<Vec<_>>(), vec![2021, 2022]);
        assert_eq!(ctx.week_count(), 2);
    }

    #[test]
    fn missing_timeline_fails_the_whole_load() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("geoMap 2022.csv"),
            "Category: All categories\n\nRegion,x\nAcre,3\n",
        )
        .unwrap();

        let config = DashboardConfig::parse_from(["trends-dashboard"])
            .with_data_dir(dir.path().to_path_buf());
        assert!(matches!(DataContext::load(&config), Err(DataError::Io { .. })));
    }
}
