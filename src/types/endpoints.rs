//! Remote endpoints the client downloads from.

const STATES_URL: &str =
    "http://www.printabledirect.com/list-of-all-50-states-abbreviations-chart.htm";
const NETWORKS_URL: &str = "https://mesonet.agron.iastate.edu/sites/networks.php";
const DAILY_URL: &str = "https://mesonet.agron.iastate.edu/cgi-bin/request/daily.py";

/// URLs of the three remote resources used by the client.
///
/// Query parameters are appended by the client, so each field holds the bare
/// resource URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// HTML page with a table of two-letter US state abbreviations.
    pub states_url: String,
    /// Station metadata export, queried once per state ASOS network.
    pub networks_url: String,
    /// Daily summary export, queried per station and date range.
    pub daily_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            states_url: STATES_URL.to_string(),
            networks_url: NETWORKS_URL.to_string(),
            daily_url: DAILY_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Serves all three resources from `base_url`, keeping the public paths.
    ///
    /// Useful for local mirrors and mock servers.
    ///
    /// # Examples
    ///
    /// ```
    /// use seasontology::Endpoints;
    ///
    /// let endpoints = Endpoints::with_base_url("http://127.0.0.1:8080/");
    /// assert_eq!(endpoints.daily_url, "http://127.0.0.1:8080/cgi-bin/request/daily.py");
    /// ```
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            states_url: format!("{base}/list-of-all-50-states-abbreviations-chart.htm"),
            networks_url: format!("{base}/sites/networks.php"),
            daily_url: format!("{base}/cgi-bin/request/daily.py"),
        }
    }
}
