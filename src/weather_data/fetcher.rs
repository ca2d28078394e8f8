use crate::stations::directory::StationDirectory;
use crate::types::clock::Clock;
use crate::types::endpoints::Endpoints;
use crate::types::snapshot::DailySnapshot;
use crate::types::station::normalize_station_code;
use crate::weather_data::data_loader::{DailyDataLoader, DailyRequest};
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::snapshot_store::SnapshotStore;
use chrono::Datelike;
use log::{debug, info, warn};
use reqwest::Client;
use std::collections::{hash_map::Entry, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

/// Resolves daily snapshots through the session cache, the on-disk snapshot
/// store and finally the remote daily export.
#[derive(Debug)]
pub struct DailyFetcher {
    cache_dir: PathBuf,
    client: Client,
    endpoints: Endpoints,
    clock: Arc<dyn Clock>,
    store: SnapshotStore,
    loader: DailyDataLoader,
    directory: OnceCell<StationDirectory>,
    session_cache: Mutex<HashMap<String, DailySnapshot>>,
}

impl DailyFetcher {
    pub fn new(cache_dir: &Path, endpoints: Endpoints, clock: Arc<dyn Clock>) -> Self {
        let client = Client::new();
        Self {
            cache_dir: cache_dir.to_path_buf(),
            loader: DailyDataLoader::new(client.clone(), &endpoints.daily_url),
            client,
            endpoints,
            clock,
            store: SnapshotStore::new(cache_dir),
            directory: OnceCell::new(),
            session_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// The station directory, loaded on first use.
    pub async fn directory(&self) -> Result<&StationDirectory, WeatherDataError> {
        let directory = self
            .directory
            .get_or_try_init(|| {
                StationDirectory::load(&self.cache_dir, &self.client, &self.endpoints)
            })
            .await?;
        Ok(directory)
    }

    /// Gets the daily snapshot of a station, given as entered by a user (`KCMI`, `cmi`).
    pub async fn get(&self, raw_station: &str) -> Result<DailySnapshot, WeatherDataError> {
        let station = normalize_station_code(raw_station);

        {
            let cache = self.session_cache.lock().await;
            if let Some(snapshot) = cache.get(&station) {
                debug!("Session cache hit for station {}", station);
                return Ok(snapshot.clone());
            }
        }

        let loaded = self.load_or_fetch(&station).await?;

        let mut cache = self.session_cache.lock().await;
        match cache.entry(station) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(loaded.clone());
                Ok(loaded)
            }
        }
    }

    /// Number of stations held in the session cache.
    pub async fn session_len(&self) -> usize {
        self.session_cache.lock().await.len()
    }

    async fn load_or_fetch(&self, station: &str) -> Result<DailySnapshot, WeatherDataError> {
        let today = self.clock.today();
        let year = today.year();

        if let Some(frame) = self.store.load(station, year).await? {
            info!(
                "Snapshot cache hit for station {} at {:?}",
                station,
                self.store.path_for(station, year)
            );
            return Ok(DailySnapshot::new(station, year, frame));
        }

        warn!(
            "Snapshot cache miss for station {} in {}. Downloading and processing.",
            station, year
        );
        let directory = self.directory().await?;
        let record = directory.lookup(station)?;
        let start = record
            .service_start
            .ok_or_else(|| WeatherDataError::MissingServiceStart(station.to_string()))?;

        let request = DailyRequest {
            station,
            network: &record.network,
            start,
            end: today,
        };
        let frame = self.loader.fetch(&request).await?;
        self.store.save(station, year, &frame).await?;

        Ok(DailySnapshot::new(station, year, frame))
    }
}
