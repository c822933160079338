use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a case snapshot.
///
/// Loading is all-or-nothing: any of these means no dataset was produced.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read data source: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("malformed record at line {line}")]
    Malformed {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DataLoadError>;
