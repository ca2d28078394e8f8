use crate::weather_data::enrich::enrich;
use crate::weather_data::error::WeatherDataError;
use chrono::{Datelike, NaiveDate};
use log::{info, warn};
use polars::frame::DataFrame;
use polars::prelude::*;
use reqwest::Client;
use std::io::Cursor;
use tokio::task;

/// Cell values the daily export uses for missing observations.
const NULL_MARKERS: [&str; 3] = ["None", "-99", "-99.0"];

/// One daily-summary request: a station, its network and an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DailyRequest<'a> {
    pub station: &'a str,
    pub network: &'a str,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DailyRequest<'_> {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("network", self.network.to_string()),
            ("station", self.station.to_string()),
            ("year1", self.start.year().to_string()),
            ("month1", self.start.month().to_string()),
            ("day1", self.start.day().to_string()),
            ("year2", self.end.year().to_string()),
            ("month2", self.end.month().to_string()),
            ("day2", self.end.day().to_string()),
        ]
    }
}

/// Downloads daily summaries and turns them into enriched snapshot frames.
#[derive(Debug)]
pub(crate) struct DailyDataLoader {
    daily_url: String,
    download_client: Client,
}

impl DailyDataLoader {
    pub fn new(download_client: Client, daily_url: &str) -> Self {
        Self {
            daily_url: daily_url.to_string(),
            download_client,
        }
    }

    pub async fn fetch(&self, request: &DailyRequest<'_>) -> Result<DataFrame, WeatherDataError> {
        let bytes = self.download(request).await?;
        let station = request.station.to_string();
        task::spawn_blocking(move || {
            let raw = Self::csv_to_dataframe(bytes, &station)?;
            enrich(raw, &station)
        })
        .await?
    }

    async fn download(&self, request: &DailyRequest<'_>) -> Result<Vec<u8>, WeatherDataError> {
        let url = self.daily_url.clone();
        info!(
            "Downloading daily data for {} ({}) from {} to {}",
            request.station, request.network, request.start, request.end
        );

        let response = self
            .download_client
            .get(&url)
            .query(&request.query())
            .send()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    WeatherDataError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    WeatherDataError::NetworkRequest(url, e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e))?;
        info!(
            "Downloaded {} bytes of daily data for station {}",
            bytes.len(),
            request.station
        );
        Ok(bytes.to_vec())
    }

    /// Parses the raw CSV export (with header) into a DataFrame.
    fn csv_to_dataframe(bytes: Vec<u8>, station: &str) -> Result<DataFrame, WeatherDataError> {
        let null_values = NullValues::AllColumns(NULL_MARKERS.iter().map(|m| (*m).into()).collect());
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .map_parse_options(|opts| opts.with_null_values(Some(null_values.clone())))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(|source| WeatherDataError::CsvReadPolars {
                station: station.to_string(),
                source,
            })
    }
}
