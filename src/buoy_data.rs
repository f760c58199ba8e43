//! # NOAA Buoy Report Fetching
//!
//! This module is the one place the application talks to the network. Both the
//! station view and the widget go through [`BuoyReportClient::fetch_report`];
//! neither parses report text on its own.
//!
//! ## Data Source
//!
//! ### NDBC Realtime Data
//! - **URL**: `https://www.ndbc.noaa.gov/data/realtime2/{station}.spec`
//! - **Format**: Whitespace-delimited text, see [`crate::spec_file`]
//! - **Auth**: None, no headers or query parameters
//!
//! ### Pipeline
//! 1. **Build**: Interpolate the station into the realtime URL template
//! 2. **Fetch**: Single HTTP GET, transport defaults, no retry
//! 3. **Decode**: Body must be valid UTF-8
//! 4. **Parse**: Header lookup plus unit conversion
//!
//! ## Error Handling
//!
//! Every stage has its own [`FetchError`] variant so callers can tell a typo in
//! the station ID apart from a feed outage. Callers are expected to turn any
//! error into `"N/A"` on screen rather than abort.

use crate::spec_file::{self, SpecError};
use crate::{BuoyReport, StationId};
use reqwest::Url;
use thiserror::Error;

/// NDBC realtime directory holding one `.spec` file per station.
pub const DEFAULT_BASE_URL: &str = "https://www.ndbc.noaa.gov/data/realtime2";

/// Failures of a single report fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Station identifier cannot be embedded in the request URL
    #[error("invalid URL for station {0:?}")]
    InvalidRequest(String),

    /// Transport failure or non-success HTTP status
    #[error("network error: {0}")]
    Network(String),

    /// Body is not valid UTF-8 text
    #[error("invalid data format")]
    Decode,

    /// Report has fewer than three lines
    #[error("unexpected file format: expected at least 3 lines, found {lines}")]
    Format { lines: usize },

    /// A required column header is absent
    #[error("could not find required headers: {}", missing.join(", "))]
    Header { missing: Vec<&'static str> },
}

impl From<SpecError> for FetchError {
    fn from(err: SpecError) -> Self {
        match err {
            SpecError::TooFewLines { lines } => FetchError::Format { lines },
            SpecError::MissingHeaders { missing } => FetchError::Header { missing },
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

/// Client for NDBC spectral wave reports.
///
/// Holds no per-request state; clones share one connection pool, so a view and
/// a widget can fetch concurrently from the same client.
#[derive(Clone, Debug)]
pub struct BuoyReportClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for BuoyReportClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BuoyReportClient {
    /// Client pointed at the public NDBC endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client pointed at another directory serving `{station}.spec` files.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        BuoyReportClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Realtime report URL for a station.
    ///
    /// Identifiers are restricted to URL path-safe characters so that input such
    /// as `"44065/../x"` or `"a b"` cannot alter the request path.
    ///
    /// # Example
    /// ```
    /// use buoy_data_lib::buoy_data::BuoyReportClient;
    /// use buoy_data_lib::StationId;
    ///
    /// let client = BuoyReportClient::new();
    /// let url = client.station_url(&StationId::new("44065")).unwrap();
    /// assert_eq!(url.as_str(), "https://www.ndbc.noaa.gov/data/realtime2/44065.spec");
    /// ```
    pub fn station_url(&self, station: &StationId) -> Result<Url, FetchError> {
        let id = station.as_str();
        let path_safe = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~');
        if id.is_empty() || !id.chars().all(path_safe) || id.chars().all(|c| c == '.') {
            return Err(FetchError::InvalidRequest(id.to_string()));
        }

        Url::parse(&format!("{}/{}.spec", self.base_url, id))
            .map_err(|_| FetchError::InvalidRequest(id.to_string()))
    }

    /// Fetch and parse the latest report for `station`.
    ///
    /// One GET with the transport's default timeouts; no retry and no caching.
    /// The returned report echoes `station` back.
    pub async fn fetch_report(&self, station: &StationId) -> Result<BuoyReport, FetchError> {
        let url = self.station_url(station)?;
        tracing::debug!(%station, %url, "fetching spectral wave report");

        let result = self.download(url).await.and_then(|bytes| {
            let content = String::from_utf8(bytes).map_err(|_| FetchError::Decode)?;
            let reading = spec_file::parse_spec(&content)?;
            Ok(BuoyReport {
                station: station.clone(),
                wave_height_ft: reading.wave_height_ft,
                swell_period_s: reading.swell_period_s,
                swell_direction: reading.swell_direction,
            })
        });

        if let Err(error) = &result {
            tracing::warn!(%station, %error, "buoy report fetch failed");
        }
        result
    }

    async fn download(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
