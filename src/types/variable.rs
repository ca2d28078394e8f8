//! The daily variables offered for comparison and the display range of each.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower and upper bound of the value axis used when displaying a variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

impl DisplayRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` falls inside the range (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// A daily observation or climatology column that can be compared between stations.
///
/// The string form of each variant is the snapshot column name, i.e. the remote
/// snake_case name with underscores turned into spaces and title-cased.
///
/// # Examples
///
/// ```
/// use seasontology::Variable;
///
/// let variable: Variable = "Avg Rh".parse().unwrap();
/// assert_eq!(variable, Variable::AvgRh);
/// assert_eq!(variable.display_range().max, 120.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variable {
    #[default]
    MaxTempF,
    MinTempF,
    MaxDewpointF,
    MinDewpointF,
    PrecipIn,
    AvgWindSpeedKts,
    AvgWindDrct,
    MinRh,
    AvgRh,
    MaxRh,
    ClimoHighF,
    ClimoLowF,
    ClimoPrecipIn,
    MinFeel,
    AvgFeel,
    MaxFeel,
}

impl Variable {
    pub const ALL: [Variable; 16] = [
        Variable::MaxTempF,
        Variable::MinTempF,
        Variable::MaxDewpointF,
        Variable::MinDewpointF,
        Variable::PrecipIn,
        Variable::AvgWindSpeedKts,
        Variable::AvgWindDrct,
        Variable::MinRh,
        Variable::AvgRh,
        Variable::MaxRh,
        Variable::ClimoHighF,
        Variable::ClimoLowF,
        Variable::ClimoPrecipIn,
        Variable::MinFeel,
        Variable::AvgFeel,
        Variable::MaxFeel,
    ];

    /// Column name of this variable in a daily snapshot.
    pub fn column_name(self) -> &'static str {
        match self {
            Variable::MaxTempF => "Max Temp F",
            Variable::MinTempF => "Min Temp F",
            Variable::MaxDewpointF => "Max Dewpoint F",
            Variable::MinDewpointF => "Min Dewpoint F",
            Variable::PrecipIn => "Precip In",
            Variable::AvgWindSpeedKts => "Avg Wind Speed Kts",
            Variable::AvgWindDrct => "Avg Wind Drct",
            Variable::MinRh => "Min Rh",
            Variable::AvgRh => "Avg Rh",
            Variable::MaxRh => "Max Rh",
            Variable::ClimoHighF => "Climo High F",
            Variable::ClimoLowF => "Climo Low F",
            Variable::ClimoPrecipIn => "Climo Precip In",
            Variable::MinFeel => "Min Feel",
            Variable::AvgFeel => "Avg Feel",
            Variable::MaxFeel => "Max Feel",
        }
    }

    /// Fixed value range the variable is displayed in.
    pub fn display_range(self) -> DisplayRange {
        match self {
            Variable::MaxTempF => DisplayRange::new(-10.0, 120.0),
            Variable::MinTempF => DisplayRange::new(-15.0, 115.0),
            Variable::MaxDewpointF => DisplayRange::new(-10.0, 100.0),
            Variable::MinDewpointF => DisplayRange::new(-10.0, 115.0),
            Variable::PrecipIn => DisplayRange::new(0.0, 0.5),
            Variable::AvgWindSpeedKts => DisplayRange::new(0.0, 35.0),
            Variable::AvgWindDrct => DisplayRange::new(-10.0, 380.0),
            Variable::MinRh | Variable::AvgRh | Variable::MaxRh => DisplayRange::new(0.0, 120.0),
            Variable::ClimoHighF => DisplayRange::new(-10.0, 120.0),
            Variable::ClimoLowF => DisplayRange::new(-40.0, 80.0),
            Variable::ClimoPrecipIn => DisplayRange::new(0.0, 0.5),
            Variable::MinFeel => DisplayRange::new(-10.0, 120.0),
            Variable::AvgFeel => DisplayRange::new(-15.0, 115.0),
            Variable::MaxFeel => DisplayRange::new(-10.0, 120.0),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// Error returned when a string does not name a known [`Variable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown variable '{0}'")]
pub struct UnknownVariable(pub String);

impl FromStr for Variable {
    type Err = UnknownVariable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Variable::ALL
            .into_iter()
            .find(|v| v.column_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownVariable(s.to_string()))
    }
}
