use crate::stations::error::StationDirectoryError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error(transparent)]
    Directory(#[from] StationDirectoryError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to list snapshot cache directory '{0}'")]
    CacheScan(PathBuf, #[source] std::io::Error),

    #[error("Failed to delete stale snapshot '{0}'")]
    CacheDeletion(PathBuf, #[source] std::io::Error),

    // Errors during parquet writing (inside blocking task)
    #[error("I/O error writing parquet snapshot '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing parquet snapshot '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),

    #[error("I/O error opening parquet snapshot '{0}'")]
    ParquetReadIo(PathBuf, #[source] std::io::Error),
    #[error("Failed to decode parquet snapshot '{0}'")]
    ParquetReadPolars(PathBuf, #[source] PolarsError),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed daily CSV for station '{station}'")]
    CsvReadPolars {
        station: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' for station {station}")]
    MissingColumn { station: String, column: String },

    #[error("Station '{0}' has no service start date to request data from")]
    MissingServiceStart(String),

    #[error("Failed deriving seasonal columns for station {station}: {source}")]
    Enrichment {
        station: String,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
