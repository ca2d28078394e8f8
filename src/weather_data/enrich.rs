//! Turns the raw daily export into a snapshot frame: column renaming, date
//! parsing and the derived seasonal columns.

use crate::types::season::Season;
use crate::types::snapshot::{DAY_OF_YEAR, SEASON, TIME, YEAR};
use crate::weather_data::error::WeatherDataError;
use polars::prelude::*;

/// Date column name in the daily export.
pub(crate) const DAY_COLUMN: &str = "day";

/// Replaces underscores with spaces and title-cases every word
/// (`avg_wind_speed_kts` becomes `Avg Wind Speed Kts`).
///
/// A letter is uppercased when it follows a non-letter and lowercased otherwise.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut previous_is_letter = false;
    for c in name.chars().map(|c| if c == '_' { ' ' } else { c }) {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

/// Snapshot column name for a column of the daily export.
pub(crate) fn snapshot_column_name(raw: &str) -> String {
    if raw == DAY_COLUMN {
        TIME.to_string()
    } else {
        title_case(raw)
    }
}

/// `(month / 3) % 4`, the position of the row's season in [`Season::ALL`].
pub(crate) fn season_index_expr() -> Expr {
    (col(TIME).dt().month().cast(DataType::Int32).floor_div(lit(3))) % lit(4)
}

fn season_label_expr() -> Expr {
    let [rest @ .., last] = Season::ALL;
    rest.iter()
        .rev()
        .fold(lit(last.label()), |otherwise, season| {
            when(season_index_expr().eq(lit(season.index() as i32)))
                .then(lit(season.label()))
                .otherwise(otherwise)
        })
        .alias(SEASON)
}

/// Renames the raw export columns and derives `season`, `Day of Year` and `Year`.
///
/// Rows without a parsable date are dropped. The result is ordered by season
/// index and then by date.
pub(crate) fn enrich(mut df: DataFrame, station: &str) -> Result<DataFrame, WeatherDataError> {
    let raw_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    if !raw_names.iter().any(|name| name == DAY_COLUMN) {
        return Err(WeatherDataError::MissingColumn {
            station: station.to_string(),
            column: DAY_COLUMN.to_string(),
        });
    }

    let to_enrichment_error = |source| WeatherDataError::Enrichment {
        station: station.to_string(),
        source,
    };

    df.set_column_names(raw_names.iter().map(|name| snapshot_column_name(name)))
        .map_err(to_enrichment_error)?;

    df.lazy()
        .with_column(col(TIME).cast(DataType::Date))
        .filter(col(TIME).is_not_null())
        .with_columns([
            season_label_expr(),
            col(TIME)
                .dt()
                .ordinal_day()
                .cast(DataType::Int32)
                .alias(DAY_OF_YEAR),
            col(TIME).dt().year().cast(DataType::Int32).alias(YEAR),
        ])
        .sort_by_exprs(
            [season_index_expr(), col(TIME)],
            SortMultipleOptions::default(),
        )
        .collect()
        .map_err(to_enrichment_error)
}
