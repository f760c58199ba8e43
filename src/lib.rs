//! # Buoy Tracker Core Library
//!
//! This library provides the data structures and the single shared client used by
//! every surface of the buoy tracker: the main station view and the periodically
//! refreshed widget.
//!
//! ## Data Flow
//! 1. **Favorite**: Read the selected station from the shared defaults store
//! 2. **Fetch**: Download the station's NOAA `.spec` report (one GET, no retry)
//! 3. **Parse**: Locate the `WVHT`, `SwP` and `SwD` columns and read the latest row
//! 4. **Display**: Map the report (or the failure) to three display strings
//!
//! Every failure ends up as `"N/A"` on screen; nothing in the pipeline panics or
//! terminates the process.
//!
//! ## Core Types
//! - [`StationId`]: An opaque NOAA station identifier such as `"44065"`
//! - [`BuoyReport`]: The parsed, display-ready values of one fetch

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod buoy_data;
pub mod config;
pub mod display;
pub mod favorites;
pub mod spec_file;
pub mod station_view;
pub mod stations;
pub mod widget;

/// Station shown when the user has never picked a favorite (New York Harbor Entrance).
pub const DEFAULT_STATION: &str = "44065";

/// A NOAA buoy or coastal station identifier.
///
/// The identifier is used verbatim as the file name of the realtime report, so no
/// normalisation (case folding, trimming) happens here.
///
/// # Example
/// ```
/// use buoy_data_lib::StationId;
///
/// let station = StationId::new("SDHN4");
/// assert_eq!(station.as_str(), "SDHN4");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        StationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StationId {
    fn default() -> Self {
        StationId::new(DEFAULT_STATION)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Latest swell observation for one station.
///
/// Each field is independently optional: a missing or non-numeric source value
/// leaves only that field unavailable. Swell period and direction are the raw
/// report tokens, so NOAA's `"MM"` missing-data marker passes through unchanged.
///
/// # Example
/// ```
/// use buoy_data_lib::{BuoyReport, StationId};
///
/// let report = BuoyReport {
///     station: StationId::new("44091"),
///     wave_height_ft: Some(1.2 * 3.28084),
///     swell_period_s: Some("7.0".to_string()),
///     swell_direction: Some("ESE".to_string()),
/// };
///
/// assert_eq!(report.format_wave_height().as_deref(), Some("3.9"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuoyReport {
    /// Station the report was requested for
    pub station: StationId,
    /// Significant wave height in feet, `None` when the feed had no valid number
    pub wave_height_ft: Option<f64>,
    /// Swell period token as published (seconds)
    pub swell_period_s: Option<String>,
    /// Swell direction token as published (compass sector, e.g. "ESE")
    pub swell_direction: Option<String>,
}

impl BuoyReport {
    /// Wave height with exactly one fractional digit, e.g. `"3.3"`.
    pub fn format_wave_height(&self) -> Option<String> {
        self.wave_height_ft.map(|ft| format!("{:.1}", ft))
    }
}
