//! Assembles the data behind the two-station comparison: per-season value
//! distributions and day-of-year time series for one variable.
//!
//! Nothing here draws anything. The structures are plain data that a renderer
//! (a web page, a terminal chart, a notebook) can turn into a density plot and a
//! scatter plot per station.

use crate::error::SeasontologyError;
use crate::types::season::Season;
use crate::types::snapshot::DailySnapshot;
use crate::types::variable::{DisplayRange, Variable};
use serde::Serialize;

/// Distance between the top of the display range and the station label.
const LABEL_OFFSET: f64 = 3.0;

/// Basic statistics of a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl Summary {
    /// Summarizes `values`, or returns `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Summary> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };
        Some(Summary {
            count,
            mean: sorted.iter().sum::<f64>() / count as f64,
            min: sorted[0],
            max: sorted[count - 1],
            median,
        })
    }
}

/// All values of the variable observed in one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonDistribution {
    pub season: Season,
    pub values: Vec<f64>,
    pub summary: Option<Summary>,
}

/// One scatter point of the day-of-year time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub day_of_year: i32,
    pub value: f64,
    /// Used to colour points by year.
    pub year: i32,
}

/// Everything shown for one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationPanel {
    pub station: String,
    /// Vertical position of the station label inside the display range.
    pub label_y: f64,
    /// One entry per season, in [`Season::ALL`] order.
    pub distributions: Vec<SeasonDistribution>,
    pub points: Vec<TimeSeriesPoint>,
}

impl StationPanel {
    pub fn from_snapshot(
        snapshot: &DailySnapshot,
        variable: Variable,
    ) -> Result<Self, SeasontologyError> {
        let column = variable.column_name();
        if !snapshot.has_column(column) {
            return Err(SeasontologyError::ColumnMissing {
                station: snapshot.station.clone(),
                column: column.to_string(),
            });
        }

        let observations = snapshot.observations(column)?;

        let distributions = Season::ALL
            .into_iter()
            .map(|season| {
                let values: Vec<f64> = observations
                    .iter()
                    .filter(|o| o.season == season)
                    .map(|o| o.value)
                    .collect();
                SeasonDistribution {
                    season,
                    summary: Summary::from_values(&values),
                    values,
                }
            })
            .collect();

        let points = observations
            .iter()
            .map(|o| TimeSeriesPoint {
                day_of_year: o.day_of_year,
                value: o.value,
                year: o.year,
            })
            .collect();

        Ok(StationPanel {
            station: snapshot.station.clone(),
            label_y: variable.display_range().max - LABEL_OFFSET,
            distributions,
            points,
        })
    }

    pub fn distribution(&self, season: Season) -> Option<&SeasonDistribution> {
        self.distributions.iter().find(|d| d.season == season)
    }

    /// Points whose value falls inside `range`.
    pub fn visible_points(&self, range: DisplayRange) -> impl Iterator<Item = &TimeSeriesPoint> {
        self.points.iter().filter(move |p| range.contains(p.value))
    }
}

/// The comparison of several stations (normally two) for one variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub variable: Variable,
    /// Value axis range shared by every panel.
    pub range: DisplayRange,
    /// Season start markers on the day-of-year axis.
    pub season_boundaries: Vec<(Season, u32)>,
    pub panels: Vec<StationPanel>,
}

impl ComparisonView {
    pub fn build(
        snapshots: &[DailySnapshot],
        variable: Variable,
    ) -> Result<Self, SeasontologyError> {
        let panels = snapshots
            .iter()
            .map(|snapshot| StationPanel::from_snapshot(snapshot, variable))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ComparisonView {
            variable,
            range: variable.display_range(),
            season_boundaries: season_boundaries(),
            panels,
        })
    }

    pub fn panel(&self, station: &str) -> Option<&StationPanel> {
        self.panels.iter().find(|p| p.station == station)
    }
}

/// Start day of each season, in [`Season::ALL`] order.
pub fn season_boundaries() -> Vec<(Season, u32)> {
    Season::ALL
        .into_iter()
        .map(|season| (season, season.start_day_of_year()))
        .collect()
}
