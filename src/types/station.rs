//! Defines the data structures representing ASOS weather stations listed in the
//! Iowa Environmental Mesonet station directory, and the normalization applied to
//! user-entered station codes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a single weather station from the station directory.
///
/// Records are built from the per-state `networks.php` CSV exports and are never
/// modified after they have been loaded.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StationRecord {
    /// The station identifier without network prefix (e.g., "CMI").
    pub id: String,
    /// The station name as listed by the Mesonet (e.g., "CHAMPAIGN/URBANA").
    pub name: Option<String>,
    /// The IEM network the station belongs to (e.g., "IL_ASOS").
    pub network: String,
    /// First day the station reported data, if the directory lists a parsable date.
    pub service_start: Option<NaiveDate>,
    /// Latitude in decimal degrees, if listed.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, if listed.
    pub longitude: Option<f64>,
}

/// Normalizes a user-entered station code to the identifier used by the directory.
///
/// Surrounding whitespace is removed and the code is uppercased. Codes longer than
/// three characters carry a one-character network prefix (the `K` of `KORD`), which
/// is stripped.
///
/// # Examples
///
/// ```
/// use seasontology::normalize_station_code;
///
/// assert_eq!(normalize_station_code("KORD"), "ORD");
/// assert_eq!(normalize_station_code("cmi"), "CMI");
/// ```
pub fn normalize_station_code(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    if upper.chars().count() > 3 {
        upper.chars().skip(1).collect()
    } else {
        upper
    }
}

/// Parses the `begints` column of the station directory.
///
/// The Mesonet reports timestamps such as `1948-01-01 00:00:00` or
/// `1948-01-01T00:00:00Z`; only the date part is kept.
pub(crate) fn parse_service_start(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
