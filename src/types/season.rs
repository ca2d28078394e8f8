//! Defines the fixed meteorological season table used to label daily observations.
//!
//! Seasons follow the meteorological convention: December, January and February
//! form winter, and each following block of three months forms the next season.
//! The position of a season in [`Season::ALL`] is also the order in which
//! snapshots are sorted, so that every consumer sees the seasons in the same order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four meteorological seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    /// December, January, February.
    Winter,
    /// March, April, May.
    Spring,
    /// June, July, August.
    Summer,
    /// September, October, November.
    Autumn,
}

impl Season {
    /// The season table, indexed by `(month / 3) % 4`.
    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
    ];

    /// Resolves the season of a calendar month (1 = January, 12 = December).
    ///
    /// Returns `None` for values outside `1..=12`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seasontology::Season;
    ///
    /// assert_eq!(Season::from_month(12), Some(Season::Winter));
    /// assert_eq!(Season::from_month(3), Some(Season::Spring));
    /// assert_eq!(Season::from_month(13), None);
    /// ```
    pub fn from_month(month: u32) -> Option<Season> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self::ALL[((month / 3) % 4) as usize])
    }

    /// Position of this season in [`Season::ALL`].
    pub fn index(self) -> usize {
        match self {
            Season::Winter => 0,
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Autumn => 3,
        }
    }

    /// The label stored in the `season` column of a snapshot.
    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter (DJF)",
            Season::Spring => "Spring (MAM)",
            Season::Summer => "Summer (JJA)",
            Season::Autumn => "Autumn (SON)",
        }
    }

    /// Inverse of [`Season::label`].
    pub fn from_label(label: &str) -> Option<Season> {
        Self::ALL.into_iter().find(|season| season.label() == label)
    }

    /// Day of year on which the season starts, in a non-leap year.
    ///
    /// Used to draw season boundary markers on day-of-year axes.
    pub fn start_day_of_year(self) -> u32 {
        match self {
            Season::Winter => 335,
            Season::Spring => 60,
            Season::Summer => 152,
            Season::Autumn => 244,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
