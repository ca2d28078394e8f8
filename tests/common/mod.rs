// Shared fixtures for the integration tests: canned Mesonet responses served
// by a mockito server and a client wired to it.
#![allow(dead_code)]

use chrono::NaiveDate;
use mockito::{Matcher, Mock, ServerGuard};
use seasontology::{Endpoints, FixedClock, Seasontology, SeasontologyError};
use std::path::Path;
use std::sync::Arc;

pub const STATES_PATH: &str = "/list-of-all-50-states-abbreviations-chart.htm";
pub const NETWORKS_PATH: &str = "/sites/networks.php";
pub const DAILY_PATH: &str = "/cgi-bin/request/daily.py";

pub const STATES_HTML: &str = r#"<html><body>
<table>
  <tr><th>State</th><th>Abbreviation</th></tr>
  <tr><td>California</td><td>CA</td></tr>
  <tr><td>Illinois</td><td>IL</td></tr>
</table>
</body></html>"#;

pub const IL_CSV: &str = "stid,station_name,lat,lon,elev,begints,iem_network\n\
CMI,CHAMPAIGN/URBANA,40.0392,-88.2781,229.0,1948-01-01 00:00:00,IL_ASOS\n\
ORD,CHICAGO O'HARE,41.96019,-87.93162,201.0,1946-02-01 00:00:00,IL_ASOS\n";

pub const CA_CSV: &str = "stid,station_name,lat,lon,elev,begints,iem_network\n\
MRY,MONTEREY,36.5869,-121.8428,50.0,1943-07-01 00:00:00,CA_ASOS\n";

pub const CMI_DAILY_CSV: &str = "station,day,max_temp_f,min_temp_f,precip_in,avg_rh\n\
CMI,2023-12-24,28.0,12.0,0.01,80.0\n\
CMI,2024-01-05,31.0,18.0,0.00,75.2\n\
CMI,2024-02-29,45.0,28.0,None,68.0\n\
CMI,2024-03-01,52.0,30.0,0.12,60.1\n\
CMI,2024-06-21,88.0,67.0,0.00,55.0\n\
CMI,2024-09-22,77.0,55.0,-99,62.3\n\
CMI,2024-10-18,65.0,44.0,0.05,None\n";

pub const MRY_DAILY_CSV: &str = "station,day,max_temp_f,min_temp_f,precip_in,avg_rh\n\
MRY,2024-01-10,60.0,45.0,0.30,82.0\n\
MRY,2024-07-10,70.0,55.0,0.00,85.0\n";

pub const ORD_DAILY_CSV: &str = "station,day,max_temp_f,min_temp_f,precip_in,avg_rh\n\
ORD,2024-04-02,55.0,40.0,0.20,70.0\n\
ORD,2024-08-15,85.0,66.0,0.00,60.0\n";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 19).unwrap()
}

pub async fn client(server: &ServerGuard, cache_folder: &Path) -> Result<Seasontology, SeasontologyError> {
    Seasontology::configure()
        .cache_folder(cache_folder.to_path_buf())
        .endpoints(Endpoints::with_base_url(&server.url()))
        .clock(Arc::new(FixedClock(today())))
        .call()
        .await
}

pub async fn mock_states(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", STATES_PATH)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(STATES_HTML)
        .expect(1)
        .create_async()
        .await
}

pub async fn mock_network(server: &mut ServerGuard, state: &str, body: &str) -> Mock {
    server
        .mock("GET", NETWORKS_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("network".into(), format!("{state}_ASOS")),
            Matcher::UrlEncoded("format".into(), "csv".into()),
            Matcher::UrlEncoded("nohtml".into(), "on".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

/// Mocks the state page and both state networks; returns the mocks so tests can
/// assert each was requested exactly once.
pub async fn mock_directory(server: &mut ServerGuard) -> Vec<Mock> {
    vec![
        mock_states(server).await,
        mock_network(server, "CA", CA_CSV).await,
        mock_network(server, "IL", IL_CSV).await,
    ]
}

pub async fn mock_daily(
    server: &mut ServerGuard,
    station: &str,
    network: &str,
    start_year: &str,
    body: &str,
) -> Mock {
    server
        .mock("GET", DAILY_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("station".into(), station.into()),
            Matcher::UrlEncoded("network".into(), network.into()),
            Matcher::UrlEncoded("year1".into(), start_year.into()),
            Matcher::UrlEncoded("year2".into(), "2024".into()),
            Matcher::UrlEncoded("month2".into(), "10".into()),
            Matcher::UrlEncoded("day2".into(), "19".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}
