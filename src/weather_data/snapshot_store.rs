use crate::weather_data::error::WeatherDataError;
use log::{debug, info};
use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::{fs, task};

const SNAPSHOT_EXTENSION: &str = "parquet";

/// On-disk home of daily snapshots, one parquet file per station and year
/// (`CMI_2024.parquet`).
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn path_for(&self, station: &str, year: i32) -> PathBuf {
        self.dir
            .join(format!("{station}_{year:04}.{SNAPSHOT_EXTENSION}"))
    }

    /// Reads the snapshot of `station` for `year`, or `None` if it was never written.
    pub async fn load(
        &self,
        station: &str,
        year: i32,
    ) -> Result<Option<DataFrame>, WeatherDataError> {
        let path = self.path_for(station, year);
        if fs::metadata(&path).await.is_err() {
            return Ok(None);
        }

        let frame = task::spawn_blocking(move || {
            let file = std::fs::File::open(&path)
                .map_err(|e| WeatherDataError::ParquetReadIo(path.clone(), e))?;
            ParquetReader::new(file)
                .finish()
                .map_err(|e| WeatherDataError::ParquetReadPolars(path, e))
        })
        .await??;
        Ok(Some(frame))
    }

    /// Writes `df` as the snapshot of `station` for `year`, replacing any previous one.
    pub async fn save(
        &self,
        station: &str,
        year: i32,
        df: &DataFrame,
    ) -> Result<PathBuf, WeatherDataError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| WeatherDataError::CacheDirCreation(self.dir.clone(), e))?;

        let path = self.path_for(station, year);
        let path_buf = path.clone();
        let mut df = df.clone();
        let dir = self.dir.clone();
        task::spawn_blocking(move || {
            // Written next to the target and renamed, so readers never see a partial file.
            let mut staged = NamedTempFile::new_in(&dir)
                .map_err(|e| WeatherDataError::ParquetWriteIo(path_buf.clone(), e))?;
            ParquetWriter::new(staged.as_file_mut())
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| WeatherDataError::ParquetWritePolars(path_buf.clone(), e))?;
            staged
                .persist(&path_buf)
                .map_err(|e| WeatherDataError::ParquetWriteIo(path_buf, e.error))?;
            Ok::<(), WeatherDataError>(())
        })
        .await??;
        info!("Cached snapshot {}", path.display());
        Ok(path)
    }

    /// Deletes every snapshot not created in `current_year` and returns the removed paths.
    ///
    /// Files without the snapshot extension are left alone.
    pub async fn sweep_stale(&self, current_year: i32) -> Result<Vec<PathBuf>, WeatherDataError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(WeatherDataError::CacheScan(self.dir.clone(), e)),
        };

        let mut removed = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| WeatherDataError::CacheScan(self.dir.clone(), e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if snapshot_year(&path) == Some(current_year) {
                debug!("Keeping snapshot {}", path.display());
                continue;
            }
            fs::remove_file(&path)
                .await
                .map_err(|e| WeatherDataError::CacheDeletion(path.clone(), e))?;
            info!("Removed stale snapshot {}", path.display());
            removed.push(path);
        }
        Ok(removed)
    }
}

/// Year encoded in a snapshot file name, `None` if the name does not follow
/// the `{station}_{year}` pattern.
fn snapshot_year(path: &Path) -> Option<i32> {
    let stem = path.file_stem()?.to_str()?;
    let (_, year) = stem.rsplit_once('_')?;
    if year.len() != 4 {
        return None;
    }
    year.parse().ok()
}
