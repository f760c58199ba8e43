//! # NDBC Spectral Wave Report Parsing
//!
//! NOAA's National Data Buoy Center publishes a rolling 45-day text file per
//! station with spectral wave summaries, newest observation first:
//!
//! ```text
//! #YY  MM DD hh mm WVHT SwH SwP WWH WWP SwD WWD STEEPNESS  APD
//! #yr  mo dy hr mn    m   m sec   m sec  -  degT     -      sec
//! 2025 01 06 12 00  1.2 1.0  7.0 0.5 4.0 ESE  100    STEEP  5.1
//! ```
//!
//! - Row 0: column headers
//! - Row 1: units (ignored)
//! - Row 2: most recent observation
//!
//! Columns are located by header name rather than position. The data row is
//! always the third line; the parser does not search for the freshest timestamp.

use thiserror::Error;

/// Significant wave height column (metres).
pub const WAVE_HEIGHT_HEADER: &str = "WVHT";
/// Swell period column (seconds).
pub const SWELL_PERIOD_HEADER: &str = "SwP";
/// Swell direction column (compass sector).
pub const SWELL_DIRECTION_HEADER: &str = "SwD";

/// International foot conversion.
pub const METERS_TO_FEET: f64 = 3.28084;

/// Index of the newest observation row.
const DATA_ROW: usize = 2;

/// Structural problems with a report body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Fewer than header + units + one observation
    #[error("unexpected file format: expected at least 3 lines, found {lines}")]
    TooFewLines { lines: usize },

    /// One or more required columns absent from the header row
    #[error("could not find required headers: {}", missing.join(", "))]
    MissingHeaders { missing: Vec<&'static str> },
}

/// The three swell fields extracted from a report's latest row.
#[derive(Clone, Debug, PartialEq)]
pub struct SwellReading {
    pub wave_height_ft: Option<f64>,
    pub swell_period_s: Option<String>,
    pub swell_direction: Option<String>,
}

/// Split a row on runs of whitespace, dropping empty tokens.
///
/// # Example
/// ```
/// use buoy_data_lib::spec_file::tokenize;
///
/// assert_eq!(tokenize("  1.2   7.0 "), vec!["1.2", "7.0"]);
/// ```
pub fn tokenize(row: &str) -> Vec<&str> {
    row.split_whitespace().collect()
}

/// Parse a `.spec` body into its latest swell reading.
///
/// Blank lines are not counted. All three headers must be present; a report
/// missing any of them yields no fields at all.
pub fn parse_spec(content: &str) -> Result<SwellReading, SpecError> {
    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() <= DATA_ROW {
        return Err(SpecError::TooFewLines { lines: lines.len() });
    }

    let headers = tokenize(lines[0]);
    let latest = tokenize(lines[DATA_ROW]);

    let column = |name: &str| headers.iter().position(|h| *h == name);
    let (wave_height_col, period_col, direction_col) = match (
        column(WAVE_HEIGHT_HEADER),
        column(SWELL_PERIOD_HEADER),
        column(SWELL_DIRECTION_HEADER),
    ) {
        (Some(wvht), Some(swp), Some(swd)) => (wvht, swp, swd),
        (wvht, swp, swd) => {
            let missing = [
                (wvht, WAVE_HEIGHT_HEADER),
                (swp, SWELL_PERIOD_HEADER),
                (swd, SWELL_DIRECTION_HEADER),
            ]
            .into_iter()
            .filter(|(col, _)| col.is_none())
            .map(|(_, name)| name)
            .collect();
            return Err(SpecError::MissingHeaders { missing });
        }
    };

    let token = |col: usize| latest.get(col).copied();

    Ok(SwellReading {
        wave_height_ft: token(wave_height_col).and_then(meters_token_to_feet),
        swell_period_s: token(period_col).map(str::to_string),
        swell_direction: token(direction_col).map(str::to_string),
    })
}

/// Convert a metres token to feet; `"MM"` and other non-numbers yield `None`.
fn meters_token_to_feet(token: &str) -> Option<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .map(|m| m * METERS_TO_FEET)
}
