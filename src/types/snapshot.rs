//! Contains the `DailySnapshot` structure holding one station's enriched daily
//! observations for one calendar year.

use crate::types::season::Season;
use polars::prelude::*;

/// Date column of a snapshot.
pub const TIME: &str = "time";
/// Season label column, see [`Season::label`].
pub const SEASON: &str = "season";
/// Ordinal day of the observation (1–366).
pub const DAY_OF_YEAR: &str = "Day of Year";
/// Calendar year of the observation.
pub const YEAR: &str = "Year";
/// Station identifier column as delivered by the daily export.
pub const STATION: &str = "Station";

/// A single non-null value of a variable together with its seasonal coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub season: Season,
    pub day_of_year: i32,
    pub year: i32,
    pub value: f64,
}

/// Daily observations of one station, as fetched (or loaded from the cache) in
/// the year given by [`DailySnapshot::year`].
///
/// The frame has a `time` date column, the title-cased variable columns of the
/// daily export and the derived [`SEASON`], [`DAY_OF_YEAR`] and [`YEAR`]
/// columns. Rows are ordered by season (in [`Season::ALL`] order) and by date
/// within a season.
#[derive(Debug, Clone)]
pub struct DailySnapshot {
    /// Normalized station identifier.
    pub station: String,
    /// Year the snapshot was created in.
    pub year: i32,
    /// The underlying Polars DataFrame.
    pub frame: DataFrame,
}

impl DailySnapshot {
    pub fn new(station: impl Into<String>, year: i32, frame: DataFrame) -> Self {
        Self {
            station: station.into(),
            year,
            frame,
        }
    }

    /// Number of days in the snapshot.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame
            .get_column_names()
            .into_iter()
            .any(|column| column.as_str() == name)
    }

    /// Applies a Polars predicate and collects the matching rows.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use seasontology::{Seasontology, SeasontologyError};
    /// use polars::prelude::{col, lit};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Seasontology::new().await?;
    /// let snapshot = client.daily("KCMI").await?;
    /// let hot_days = snapshot.filter(col("Max Temp F").gt(lit(95.0f64)))?;
    /// println!("{} days above 95F", hot_days.height());
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> PolarsResult<DataFrame> {
        self.frame.clone().lazy().filter(predicate).collect()
    }

    /// Rows belonging to one season.
    pub fn for_season(&self, season: Season) -> PolarsResult<DataFrame> {
        self.filter(col(SEASON).eq(lit(season.label())))
    }

    /// Non-null values of `column`, in snapshot row order.
    ///
    /// # Errors
    ///
    /// Fails with [`PolarsError::ColumnNotFound`] if `column` is absent, or if the
    /// column cannot be cast to a float.
    pub fn observations(&self, column: &str) -> PolarsResult<Vec<Observation>> {
        let df = self
            .frame
            .clone()
            .lazy()
            .select([
                col(SEASON),
                col(column).cast(DataType::Float64).alias("value"),
                col(DAY_OF_YEAR).cast(DataType::Int32),
                col(YEAR).cast(DataType::Int32),
            ])
            .collect()?;

        let seasons = df.column(SEASON)?.str()?;
        let values = df.column("value")?.f64()?;
        let days = df.column(DAY_OF_YEAR)?.i32()?;
        let years = df.column(YEAR)?.i32()?;

        Ok(seasons
            .into_iter()
            .zip(values)
            .zip(days)
            .zip(years)
            .filter_map(|(((season, value), day_of_year), year)| {
                Some(Observation {
                    season: Season::from_label(season?)?,
                    day_of_year: day_of_year?,
                    year: year?,
                    value: value?,
                })
            })
            .collect())
    }
}
