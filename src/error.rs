use crate::stations::error::StationDirectoryError;
use crate::types::variable::UnknownVariable;
use crate::weather_data::error::WeatherDataError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeasontologyError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    StationDirectory(#[from] StationDirectoryError),

    #[error(transparent)]
    UnknownVariable(#[from] UnknownVariable),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),

    #[error("Snapshot of station {station} has no '{column}' column")]
    ColumnMissing { station: String, column: String },

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),
}

impl SeasontologyError {
    fn directory_error(&self) -> Option<&StationDirectoryError> {
        match self {
            SeasontologyError::StationDirectory(e)
            | SeasontologyError::WeatherData(WeatherDataError::Directory(e)) => Some(e),
            _ => None,
        }
    }

    /// The request never produced a usable HTTP response (transport failure or
    /// non-success status).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            SeasontologyError::WeatherData(
                WeatherDataError::NetworkRequest(..) | WeatherDataError::HttpStatus { .. }
            )
        ) || matches!(
            self.directory_error(),
            Some(StationDirectoryError::NetworkRequest(..) | StationDirectoryError::HttpStatus { .. })
        )
    }

    /// The station code is not listed in the station directory.
    pub fn is_unknown_station(&self) -> bool {
        matches!(
            self.directory_error(),
            Some(StationDirectoryError::UnknownStation(_))
        )
    }

    /// A remote resource answered, but its content could not be interpreted.
    pub fn is_malformed_response(&self) -> bool {
        matches!(
            self,
            SeasontologyError::WeatherData(
                WeatherDataError::CsvReadPolars { .. }
                    | WeatherDataError::MissingColumn { .. }
                    | WeatherDataError::Enrichment { .. }
            )
        ) || matches!(
            self.directory_error(),
            Some(
                StationDirectoryError::MalformedResponse { .. }
                    | StationDirectoryError::MissingColumn { .. }
                    | StationDirectoryError::NoStateCodes(_)
            )
        )
    }
}
