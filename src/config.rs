use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::data::loader::{DEFAULT_REGION_PREFIX, DEFAULT_TIMELINE_FILE};

/// Where the trend exports live and how they are named.
#[derive(Debug, Clone, Serialize, Parser)]
#[command(name = "trends-dashboard")]
#[command(about = "Interactive dashboard for regional and weekly search-volume exports")]
pub struct DashboardConfig {
    /// Directory holding the `geoMap <year>.csv` files and the weekly series.
    #[arg(long, env = "TRENDS_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Filename prefix of the yearly regional exports.
    #[arg(long, default_value = DEFAULT_REGION_PREFIX)]
    pub region_prefix: String,

    /// Weekly series file, relative to the data directory unless absolute.
    #[arg(long, default_value = DEFAULT_TIMELINE_FILE)]
    pub timeline_file: PathBuf,
}

impl DashboardConfig {
    pub fn timeline_path(&self) -> PathBuf {
        if self.timeline_file.is_absolute() {
            self.timeline_file.clone()
        } else {
            self.data_dir.join(&self.timeline_file)
        }
    }

    /// Same naming, different directory. Used when the viewer reopens a folder.
    pub fn with_data_dir(&self, data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DashboardConfig::parse_from(["trends-dashboard"]);
        assert_eq!(config.region_prefix, "geoMap");
        assert_eq!(config.timeline_file, PathBuf::from("multiTimeline.csv"));
    }

    #[test]
    fn timeline_path_is_relative_to_data_dir() {
        let config = DashboardConfig::parse_from([
            "trends-dashboard",
            "--data-dir",
            "/srv/trends",
            "--timeline-file",
            "weekly.csv",
        ]);
        assert_eq!(config.timeline_path(), PathBuf::from("/srv/trends/weekly.csv"));

        let moved = config.with_data_dir(PathBuf::from("/tmp/other"));
        assert_eq!(moved.timeline_path(), PathBuf::from("/tmp/other/weekly.csv"));
        assert_eq!(moved.region_prefix, config.region_prefix);
    }

    #[cfg(unix)]
    #[test]
    fn debug_output_handles_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let config = DashboardConfig::parse_from(["trends-dashboard"])
            .with_data_dir(PathBuf::from(OsStr::from_bytes(b"/srv/tr\xffends")));
        let rendered = format!("{config:?}");
        assert!(rendered.contains("region_prefix"));
    }

    #[test]
    fn absolute_timeline_path_is_kept() {
        let config = DashboardConfig::parse_from([
            "trends-dashboard",
            "--timeline-file",
            "/elsewhere/multiTimeline.csv",
        ]);
        assert_eq!(
            config.timeline_path(),
            PathBuf::from("/elsewhere/multiTimeline.csv")
        );
    }
}
