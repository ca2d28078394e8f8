mod common;

use common::*;
use polars::prelude::*;
use seasontology::{Season, DAY_OF_YEAR, SEASON, TIME, YEAR};
use tempfile::TempDir;

#[tokio::test]
async fn test_cold_cache_downloads_and_enriches() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new_async().await;
    let directory_mocks = mock_directory(&mut server).await;
    let daily_mock = mock_daily(&mut server, "CMI", "IL_ASOS", "1948", CMI_DAILY_CSV).await;
    let cache = TempDir::new()?;

    let client = client(&server, cache.path()).await?;
    let snapshot = client.daily("KCMI").await?;

    assert_eq!(snapshot.station, "CMI");
    assert_eq!(snapshot.year, 2024);
    assert_eq!(snapshot.height(), 7);
    for column in [TIME, SEASON, DAY_OF_YEAR, YEAR, "Max Temp F", "Avg Rh"] {
        assert!(snapshot.has_column(column), "missing column {column}");
    }
    for column in [TIME, SEASON, DAY_OF_YEAR, YEAR] {
        assert_eq!(snapshot.frame.column(column)?.null_count(), 0, "{column}");
    }

    let seasons: Vec<&str> = snapshot
        .frame
        .column(SEASON)?
        .str()?
        .into_no_null_iter()
        .collect();
    assert_eq!(
        seasons,
        vec![
            "Winter (DJF)",
            "Winter (DJF)",
            "Winter (DJF)",
            "Spring (MAM)",
            "Summer (JJA)",
            "Autumn (SON)",
            "Autumn (SON)",
        ]
    );
    let indices: Vec<usize> = seasons
        .iter()
        .filter_map(|label| Season::from_label(label))
        .map(|season| season.index())
        .collect();
    assert!(indices.windows(2).all(|pair| pair[0] <= pair[1]));

    let days: Vec<i32> = snapshot
        .frame
        .column(DAY_OF_YEAR)?
        .i32()?
        .into_no_null_iter()
        .collect();
    assert_eq!(days, vec![358, 5, 60, 61, 173, 266, 292]);

    let years: Vec<i32> = snapshot
        .frame
        .column(YEAR)?
        .i32()?
        .into_no_null_iter()
        .collect();
    assert_eq!(years, vec![2023, 2024, 2024, 2024, 2024, 2024, 2024]);

    // Sentinels become nulls.
    assert_eq!(snapshot.frame.column("Precip In")?.null_count(), 2);
    assert_eq!(snapshot.frame.column("Avg Rh")?.null_count(), 1);

    assert!(cache.path().join("stations.csv").exists());
    assert!(cache.path().join("CMI_2024.parquet").exists());

    for mock in directory_mocks {
        mock.assert_async().await;
    }
    daily_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_session_cache_serves_repeat_requests() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new_async().await;
    let _directory_mocks = mock_directory(&mut server).await;
    let daily_mock = mock_daily(&mut server, "CMI", "IL_ASOS", "1948", CMI_DAILY_CSV).await;
    let cache = TempDir::new()?;

    let client = client(&server, cache.path()).await?;
    let first = client.daily("KCMI").await?;
    let second = client.daily("cmi").await?;
    let third = client.daily("CMI").await?;

    assert!(first.frame.equals_missing(&second.frame));
    assert!(first.frame.equals_missing(&third.frame));
    assert_eq!(client.cached_stations().await, 1);
    daily_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_disk_cache_is_idempotent_across_clients() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new_async().await;
    let directory_mocks = mock_directory(&mut server).await;
    let daily_mock = mock_daily(&mut server, "CMI", "IL_ASOS", "1948", CMI_DAILY_CSV).await;
    let cache = TempDir::new()?;

    let fresh = client(&server, cache.path()).await?.daily("KCMI").await?;

    // New clients on the same folder must not touch the network again.
    let from_disk = client(&server, cache.path()).await?.daily("KCMI").await?;
    let again = client(&server, cache.path()).await?.daily("KCMI").await?;

    assert_eq!(from_disk.height(), fresh.height());
    assert_eq!(from_disk.column_names(), fresh.column_names());
    assert!(from_disk.frame.equals_missing(&fresh.frame));
    assert!(again.frame.equals_missing(&from_disk.frame));

    for mock in directory_mocks {
        mock.assert_async().await;
    }
    daily_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_unknown_station() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new_async().await;
    let _directory_mocks = mock_directory(&mut server).await;
    let daily_mock = server
        .mock("GET", DAILY_PATH)
        .match_query(mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let cache = TempDir::new()?;

    let client = client(&server, cache.path()).await?;
    let err = client.daily("KXYZ").await.unwrap_err();
    assert!(err.is_unknown_station(), "unexpected error: {err:?}");
    assert!(!err.is_network());

    let err = client.station("KXYZ").await.unwrap_err();
    assert!(err.is_unknown_station());

    daily_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_station_record_lookup() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new_async().await;
    let _directory_mocks = mock_directory(&mut server).await;
    let cache = TempDir::new()?;

    let client = client(&server, cache.path()).await?;
    let record = client.station("KMRY").await?;
    assert_eq!(record.id, "MRY");
    assert_eq!(record.network, "CA_ASOS");
    assert_eq!(
        record.service_start,
        chrono::NaiveDate::from_ymd_opt(1943, 7, 1)
    );
    assert_eq!(client.directory().await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_http_error_is_network_failure() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new_async().await;
    let _directory_mocks = mock_directory(&mut server).await;
    let daily_mock = server
        .mock("GET", DAILY_PATH)
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let cache = TempDir::new()?;

    let client = client(&server, cache.path()).await?;
    let err = client.daily("KCMI").await.unwrap_err();
    assert!(err.is_network(), "unexpected error: {err:?}");
    assert!(!cache.path().join("CMI_2024.parquet").exists());
    assert_eq!(client.cached_stations().await, 0);

    daily_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_directory_http_error_is_network_failure() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new_async().await;
    let _states = server
        .mock("GET", STATES_PATH)
        .with_status(503)
        .create_async()
        .await;
    let cache = TempDir::new()?;

    let client = client(&server, cache.path()).await?;
    let err = client.daily("KCMI").await.unwrap_err();
    assert!(err.is_network(), "unexpected error: {err:?}");
    assert!(!cache.path().join("stations.csv").exists());
    Ok(())
}

#[tokio::test]
async fn test_daily_without_day_column_is_malformed() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new_async().await;
    let _directory_mocks = mock_directory(&mut server).await;
    let _daily_mock = mock_daily(
        &mut server,
        "CMI",
        "IL_ASOS",
        "1948",
        "station,max_temp_f\nCMI,30.0\n",
    )
    .await;
    let cache = TempDir::new()?;

    let client = client(&server, cache.path()).await?;
    let err = client.daily("KCMI").await.unwrap_err();
    assert!(err.is_malformed_response(), "unexpected error: {err:?}");
    assert!(!cache.path().join("CMI_2024.parquet").exists());
    Ok(())
}

#[tokio::test]
async fn test_stale_snapshots_removed_on_construction() -> Result<(), Box<dyn std::error::Error>> {
    let server = mockito::Server::new_async().await;
    let cache = TempDir::new()?;

    let frame = df!(
        TIME => &["2024-01-05"],
        SEASON => &["Winter (DJF)"],
        DAY_OF_YEAR => &[5i32],
        YEAR => &[2024i32],
        "Max Temp F" => &[31.0f64],
    )?
    .lazy()
        .with_column(col(TIME).cast(DataType::Date))
        .collect()?;

    let store = seasontology::SnapshotStore::new(cache.path());
    store.save("CMI", 2024, &frame).await?;
    store.save("CMI", 2023, &frame).await?;
    store.save("MRY", 2022, &frame).await?;

    let client = client(&server, cache.path()).await?;
    assert!(cache.path().join("CMI_2024.parquet").exists());
    assert!(!cache.path().join("CMI_2023.parquet").exists());
    assert!(!cache.path().join("MRY_2022.parquet").exists());

    // Served from disk: the mock server has no routes at all.
    let snapshot = client.daily("KCMI").await?;
    assert_eq!(snapshot.height(), 1);
    assert!(snapshot.frame.equals_missing(&frame));
    Ok(())
}
