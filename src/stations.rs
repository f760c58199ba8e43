//! # Active Station Directory
//!
//! NDBC lists every station currently reporting in one XML document:
//!
//! ```text
//! <stations created="2025-01-06T12:15:01UTC" count="1349">
//!   <station id="44065" lat="40.369" lon="-73.703" name="New York Harbor Entrance" owner="NDBC" type="buoy" met="y"/>
//!   ...
//! </stations>
//! ```
//!
//! Only `id`, `name`, `lat` and `lon` are kept. The list is exported as CSV so a
//! user can look up an identifier to pass to `set`.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// NDBC list of stations with recent data.
pub const ACTIVE_STATIONS_URL: &str = "https://www.ndbc.noaa.gov/activestations.xml";

/// Failures fetching or exporting the station list.
#[derive(Error, Debug)]
pub enum StationsError {
    /// Directory URL is malformed
    #[error("invalid station list URL {0:?}")]
    InvalidRequest(String),

    /// Transport failure or non-success HTTP status
    #[error("network error: {0}")]
    Network(String),

    /// Body is not valid UTF-8 text
    #[error("invalid data format")]
    Decode,

    /// Body is not the expected XML document
    #[error("station list XML: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// CSV output could not be written
    #[error("station CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl From<reqwest::Error> for StationsError {
    fn from(err: reqwest::Error) -> Self {
        StationsError::Network(err.to_string())
    }
}

/// One row of the station directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StationEntry {
    #[serde(rename(deserialize = "@id"))]
    pub id: String,
    #[serde(rename(deserialize = "@name"), default)]
    pub name: String,
    #[serde(rename(deserialize = "@lat"))]
    pub lat: f64,
    #[serde(rename(deserialize = "@lon"))]
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct ActiveStations {
    #[serde(rename = "station", default)]
    stations: Vec<StationEntry>,
}

/// Parse the `activestations.xml` document, in document order.
pub fn parse_active_stations(xml: &str) -> Result<Vec<StationEntry>, StationsError> {
    let doc: ActiveStations = quick_xml::de::from_str(xml)?;
    Ok(doc.stations)
}

/// Write `id,name,lat,lon` rows with a header line, even for an empty list.
pub fn write_csv<W: io::Write>(stations: &[StationEntry], out: W) -> Result<(), StationsError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(["id", "name", "lat", "lon"])?;
    for station in stations {
        writer.serialize(station)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Client for the active station list.
#[derive(Clone, Debug)]
pub struct StationDirectory {
    http: reqwest::Client,
    url: String,
}

impl Default for StationDirectory {
    fn default() -> Self {
        Self::with_url(ACTIVE_STATIONS_URL)
    }
}

impl StationDirectory {
    pub fn with_url(url: impl Into<String>) -> Self {
        StationDirectory {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Download and parse the station list. One GET, no retry.
    pub async fn fetch_active(&self) -> Result<Vec<StationEntry>, StationsError> {
        let url =
            Url::parse(&self.url).map_err(|_| StationsError::InvalidRequest(self.url.clone()))?;
        tracing::debug!(%url, "fetching active station list");

        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        let xml = std::str::from_utf8(&bytes).map_err(|_| StationsError::Decode)?;
        let stations = parse_active_stations(xml)?;

        tracing::info!(count = stations.len(), "parsed active station list");
        Ok(stations)
    }
}
