use std::path::PathBuf;

use thiserror::Error;

/// Failures outside the parsing core: reading and decoding input records,
/// writing results, loading settings. Each is tied to one document so a batch
/// can record it and move on.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Cannot read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid extraction record '{path}': {source}")]
    Record {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings: {0}")]
    Settings(#[from] config::ConfigError),
}
