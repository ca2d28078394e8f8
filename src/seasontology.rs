//! This module provides the main entry point of the crate. A [`Seasontology`]
//! client owns the cache directory, the station directory and the session cache,
//! and hands out daily snapshots and station comparisons.

use crate::error::SeasontologyError;
use crate::stations::directory::StationDirectory;
use crate::types::clock::{Clock, SystemClock};
use crate::types::endpoints::Endpoints;
use crate::types::snapshot::DailySnapshot;
use crate::types::station::{normalize_station_code, StationRecord};
use crate::types::variable::Variable;
use crate::utils::{ensure_cache_dir_exists, get_cache_dir};
use crate::view::comparison::ComparisonView;
use crate::view::dashboard::{Dashboard, DashboardParams};
use crate::weather_data::fetcher::DailyFetcher;
use bon::bon;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The main client for fetching, caching and comparing daily station data.
///
/// Construction sweeps snapshots left over from previous years out of the cache
/// directory. Everything else is loaded lazily: the station directory on the
/// first snapshot cache miss, snapshots on first request.
///
/// # Examples
///
/// ```no_run
/// # use seasontology::{Seasontology, SeasontologyError, Variable};
/// # #[tokio::main]
/// # async fn main() -> Result<(), SeasontologyError> {
/// let client = Seasontology::new().await?;
/// let view = client.compare("KCMI", "KMRY", Variable::MaxTempF).await?;
/// for panel in &view.panels {
///     println!("{}: {} days", panel.station, panel.points.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Seasontology {
    cache_folder: PathBuf,
    fetcher: DailyFetcher,
}

#[bon]
impl Seasontology {
    /// Creates a client with explicit settings.
    ///
    /// # Arguments
    ///
    /// * `.cache_folder(PathBuf)`: Optional. Where the station directory and snapshots
    ///   are stored. Defaults to `seasontology_cache` inside the system cache directory.
    /// * `.endpoints(Endpoints)`: Optional. Remote URLs, defaults to the public ones.
    /// * `.clock(Arc<dyn Clock>)`: Optional. Source of "today", defaults to [`SystemClock`].
    ///
    /// # Errors
    ///
    /// Returns [`SeasontologyError::CacheDirResolution`] if no default cache directory
    /// exists, [`SeasontologyError::CacheDirCreation`] if the folder cannot be created,
    /// and [`SeasontologyError::WeatherData`] if stale snapshots cannot be removed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use seasontology::{Endpoints, FixedClock, Seasontology, SeasontologyError};
    /// # use chrono::NaiveDate;
    /// # use std::sync::Arc;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), SeasontologyError> {
    /// let client = Seasontology::configure()
    ///     .cache_folder("/tmp/seasontology".into())
    ///     .endpoints(Endpoints::with_base_url("http://localhost:8080"))
    ///     .clock(Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())))
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn configure(
        cache_folder: Option<PathBuf>,
        endpoints: Option<Endpoints>,
        clock: Option<Arc<dyn Clock>>,
    ) -> Result<Self, SeasontologyError> {
        let cache_folder = match cache_folder {
            Some(folder) => folder,
            None => get_cache_dir().map_err(SeasontologyError::CacheDirResolution)?,
        };
        ensure_cache_dir_exists(&cache_folder)
            .await
            .map_err(|e| SeasontologyError::CacheDirCreation(cache_folder.clone(), e))?;

        let clock = clock.unwrap_or_else(|| Arc::new(SystemClock));
        let fetcher = DailyFetcher::new(&cache_folder, endpoints.unwrap_or_default(), clock);

        let removed = fetcher
            .store()
            .sweep_stale(fetcher.clock().current_year())
            .await?;
        if !removed.is_empty() {
            info!("Removed {} stale snapshots", removed.len());
        }

        Ok(Self {
            cache_folder,
            fetcher,
        })
    }

    /// Creates a client with the default cache folder, public endpoints and the
    /// system clock.
    pub async fn new() -> Result<Self, SeasontologyError> {
        Self::configure().call().await
    }

    pub fn cache_folder(&self) -> &Path {
        &self.cache_folder
    }

    /// Daily snapshot of a station for the current year.
    ///
    /// `station` is normalized first, so `KCMI`, `kcmi` and `CMI` all resolve to the
    /// same snapshot.
    ///
    /// # Errors
    ///
    /// See [`SeasontologyError::is_network`], [`SeasontologyError::is_unknown_station`]
    /// and [`SeasontologyError::is_malformed_response`] for the main failure classes.
    pub async fn daily(&self, station: &str) -> Result<DailySnapshot, SeasontologyError> {
        self.fetcher.get(station).await.map_err(SeasontologyError::from)
    }

    /// Directory entry of a station.
    pub async fn station(&self, station: &str) -> Result<StationRecord, SeasontologyError> {
        let id = normalize_station_code(station);
        let record = self.directory().await?.lookup(&id)?;
        Ok(record.clone())
    }

    /// The full station directory, loading it if needed.
    pub async fn directory(&self) -> Result<&StationDirectory, SeasontologyError> {
        self.fetcher
            .directory()
            .await
            .map_err(SeasontologyError::from)
    }

    /// Builds the comparison of two stations for `variable`.
    pub async fn compare(
        &self,
        station_one: &str,
        station_two: &str,
        variable: Variable,
    ) -> Result<ComparisonView, SeasontologyError> {
        let one = self.daily(station_one).await?;
        let two = self.daily(station_two).await?;
        ComparisonView::build(&[one, two], variable)
    }

    /// A dashboard with the default parameters (`CMI` against `MRY`, max temperature).
    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(self, DashboardParams::default())
    }

    /// A dashboard with the given parameters.
    pub fn dashboard_with(&self, params: DashboardParams) -> Dashboard<'_> {
        Dashboard::new(self, params)
    }

    /// Number of stations held in the session cache.
    pub async fn cached_stations(&self) -> usize {
        self.fetcher.session_len().await
    }
}
