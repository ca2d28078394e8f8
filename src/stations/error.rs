use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationDirectoryError {
    #[error("Failed to read station directory cache '{0}'")]
    CacheRead(PathBuf, #[source] PolarsError),

    #[error("Failed to write station directory cache '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Failed to encode station directory cache '{0}'")]
    CacheEncode(PathBuf, #[source] PolarsError),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed station metadata from {url}")]
    MalformedResponse {
        url: String,
        #[source]
        source: PolarsError,
    },

    #[error("Station metadata from {url} has no '{column}' column")]
    MissingColumn { url: String, column: String },

    #[error("No state abbreviations found on {0}")]
    NoStateCodes(String),

    #[error("Station '{0}' is not listed in the station directory")]
    UnknownStation(String),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
