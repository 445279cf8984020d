use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the trend exports or querying them.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("no region files matching '{prefix}*.csv' in {}", directory.display())]
    EmptyInput { directory: PathBuf, prefix: String },

    #[error("malformed file {}: {reason}", path.display())]
    MalformedFile { path: PathBuf, reason: String },

    #[error("row range {start}..{end} is outside the series of {len} rows")]
    OutOfRange { start: usize, end: usize, len: usize },

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("writing JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataError {
    pub(crate) fn malformed(path: &std::path::Path, reason: impl Into<String>) -> Self {
        DataError::MalformedFile {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
