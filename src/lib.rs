mod error;
mod seasontology;
mod stations;
mod types;
mod utils;
mod view;
mod weather_data;

pub use error::SeasontologyError;
pub use seasontology::*;

pub use types::clock::{Clock, FixedClock, SystemClock};
pub use types::endpoints::Endpoints;
pub use types::season::Season;
pub use types::snapshot::{DailySnapshot, Observation, DAY_OF_YEAR, SEASON, STATION, TIME, YEAR};
pub use types::station::{normalize_station_code, StationRecord};
pub use types::variable::{DisplayRange, UnknownVariable, Variable};

pub use stations::directory::StationDirectory;
pub use weather_data::enrich::title_case;
pub use weather_data::snapshot_store::SnapshotStore;

pub use view::comparison::{
    season_boundaries, ComparisonView, SeasonDistribution, StationPanel, Summary,
    TimeSeriesPoint,
};
pub use view::dashboard::{Dashboard, DashboardParams, ParamChange};

pub use stations::error::StationDirectoryError;
pub use weather_data::error::WeatherDataError;
