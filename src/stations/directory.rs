use crate::stations::error::StationDirectoryError;
use crate::stations::states::fetch_state_codes;
use crate::types::endpoints::Endpoints;
use crate::types::station::{parse_service_start, StationRecord};
use log::{info, warn};
use polars::prelude::*;
use reqwest::{Client, RequestBuilder};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

const CACHE_FILE_NAME: &str = "stations.csv";

const ID: &str = "stid";
const NAME: &str = "station_name";
const LATITUDE: &str = "lat";
const LONGITUDE: &str = "lon";
const SERVICE_START: &str = "begints";
const NETWORK: &str = "iem_network";
const COLUMNS: [&str; 6] = [ID, NAME, LATITUDE, LONGITUDE, SERVICE_START, NETWORK];

/// Lookup table of all US ASOS stations, keyed by station identifier.
///
/// The table is assembled once from one `networks.php` export per state and
/// persisted as `stations.csv` in the cache directory; later loads read that file.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    stations: HashMap<String, StationRecord>,
}

impl StationDirectory {
    pub async fn load(
        cache_dir: &Path,
        client: &Client,
        endpoints: &Endpoints,
    ) -> Result<Self, StationDirectoryError> {
        let cache_file = cache_dir.join(CACHE_FILE_NAME);

        let stations = if fs::metadata(&cache_file).await.is_ok() {
            info!("Loading station directory from {}", cache_file.display());
            let path_clone = cache_file.clone();
            let frame = task::spawn_blocking(move || Self::read_cached(&path_clone)).await??;
            Self::records_from_frame(&frame)
                .map_err(|e| StationDirectoryError::CacheRead(cache_file.clone(), e))?
        } else {
            warn!(
                "Station directory cache {} not found. Fetching from {}",
                cache_file.display(),
                endpoints.networks_url
            );
            let frame = Self::fetch_all(client, endpoints).await?;
            let stations = Self::records_from_download(&frame, &endpoints.networks_url)?;
            Self::write_cache(frame, &cache_file).await?;
            stations
        };
        info!("Station directory holds {} stations", stations.len());
        Ok(Self { stations })
    }

    /// Finds a station by its normalized identifier.
    pub fn lookup(&self, id: &str) -> Result<&StationRecord, StationDirectoryError> {
        self.stations
            .get(id)
            .ok_or_else(|| StationDirectoryError::UnknownStation(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationRecord> {
        self.stations.values()
    }

    fn read_cached(path: &Path) -> Result<DataFrame, StationDirectoryError> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .and_then(Self::select_columns)
            .map_err(|e| StationDirectoryError::CacheRead(path.to_path_buf(), e))
    }

    async fn fetch_all(
        client: &Client,
        endpoints: &Endpoints,
    ) -> Result<DataFrame, StationDirectoryError> {
        let url = endpoints.networks_url.as_str();
        let states = fetch_state_codes(client, &endpoints.states_url).await?;

        let mut frames = Vec::with_capacity(states.len());
        for state in &states {
            let request = client.get(url).query(&[
                ("network", format!("{state}_ASOS")),
                ("format", "csv".to_string()),
                ("nohtml", "on".to_string()),
            ]);
            let bytes = download(request, url).await?;
            let frame = Self::parse_network_csv(bytes, url).await?;
            info!("Fetched {} stations for {}_ASOS", frame.height(), state);
            frames.push(frame.lazy());
        }

        concat(frames, UnionArgs::default())
            .and_then(|merged| merged.collect())
            .map_err(|source| StationDirectoryError::MalformedResponse {
                url: url.to_string(),
                source,
            })
    }

    async fn parse_network_csv(
        bytes: Vec<u8>,
        url: &str,
    ) -> Result<DataFrame, StationDirectoryError> {
        let url_owned = url.to_string();
        task::spawn_blocking(move || {
            let df = CsvReadOptions::default()
                .with_has_header(true)
                .with_infer_schema_length(None)
                .into_reader_with_file_handle(Cursor::new(bytes))
                .finish()
                .map_err(|source| StationDirectoryError::MalformedResponse {
                    url: url_owned.clone(),
                    source,
                })?;

            let present = df.get_column_names();
            if let Some(missing) = COLUMNS
                .iter()
                .find(|column| !present.iter().any(|name| name.as_str() == **column))
            {
                return Err(StationDirectoryError::MissingColumn {
                    url: url_owned,
                    column: missing.to_string(),
                });
            }

            Self::select_columns(df).map_err(|source| StationDirectoryError::MalformedResponse {
                url: url_owned,
                source,
            })
        })
        .await?
    }

    // Pins the column types so frames from different states can be concatenated.
    fn select_columns(df: DataFrame) -> PolarsResult<DataFrame> {
        df.lazy()
            .select([
                col(ID).cast(DataType::String),
                col(NAME).cast(DataType::String),
                col(LATITUDE).cast(DataType::Float64),
                col(LONGITUDE).cast(DataType::Float64),
                col(SERVICE_START).cast(DataType::String),
                col(NETWORK).cast(DataType::String),
            ])
            .collect()
    }

    async fn write_cache(mut df: DataFrame, path: &Path) -> Result<(), StationDirectoryError> {
        let path_buf: PathBuf = path.to_path_buf();
        task::spawn_blocking(move || {
            let dir = path_buf
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let mut staged = NamedTempFile::new_in(dir)
                .map_err(|e| StationDirectoryError::CacheWrite(path_buf.clone(), e))?;
            CsvWriter::new(staged.as_file_mut())
                .include_header(true)
                .finish(&mut df)
                .map_err(|e| StationDirectoryError::CacheEncode(path_buf.clone(), e))?;
            staged
                .persist(&path_buf)
                .map_err(|e| StationDirectoryError::CacheWrite(path_buf.clone(), e.error))?;
            info!(
                "Wrote {} stations to {}",
                df.height(),
                path_buf.display()
            );
            Ok::<(), StationDirectoryError>(())
        })
        .await??;
        Ok(())
    }

    fn records_from_download(
        df: &DataFrame,
        url: &str,
    ) -> Result<HashMap<String, StationRecord>, StationDirectoryError> {
        Self::records_from_frame(df).map_err(|source| StationDirectoryError::MalformedResponse {
            url: url.to_string(),
            source,
        })
    }

    fn records_from_frame(df: &DataFrame) -> PolarsResult<HashMap<String, StationRecord>> {
        let ids = df.column(ID)?.str()?;
        let names = df.column(NAME)?.str()?;
        let latitudes = df.column(LATITUDE)?.f64()?;
        let longitudes = df.column(LONGITUDE)?.f64()?;
        let service_starts = df.column(SERVICE_START)?.str()?;
        let networks = df.column(NETWORK)?.str()?;

        let mut stations = HashMap::with_capacity(df.height());
        for i in 0..df.height() {
            let (Some(id), Some(network)) = (ids.get(i), networks.get(i)) else {
                continue;
            };
            // A station listed by two states keeps its first entry.
            let id = id.trim();
            stations
                .entry(id.to_string())
                .or_insert_with(|| StationRecord {
                    id: id.to_string(),
                    name: names.get(i).map(str::to_string),
                    network: network.to_string(),
                    service_start: service_starts.get(i).and_then(parse_service_start),
                    latitude: latitudes.get(i),
                    longitude: longitudes.get(i),
                });
        }
        Ok(stations)
    }
}

/// Sends `request` and returns the body, mapping transport and status failures.
pub(crate) async fn download(
    request: RequestBuilder,
    url: &str,
) -> Result<Vec<u8>, StationDirectoryError> {
    let response = request
        .send()
        .await
        .map_err(|e| StationDirectoryError::NetworkRequest(url.to_string(), e))?;
    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            return Err(if let Some(status) = e.status() {
                StationDirectoryError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                StationDirectoryError::NetworkRequest(url.to_string(), e)
            });
        }
    };
    let bytes = response
        .bytes()
        .await
        .map_err(|e| StationDirectoryError::NetworkRequest(url.to_string(), e))?;
    Ok(bytes.to_vec())
}
