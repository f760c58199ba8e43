//! # Swell Data Presentation
//!
//! This module turns a fetch result into the three strings a screen shows and
//! renders them as plain text for the terminal. Failures never reach the screen
//! as structured errors: they become `"N/A"`, or `"Error: <description>"` in the
//! wave height slot of the widget.

use crate::buoy_data::FetchError;
use crate::{BuoyReport, StationId};
use serde::Serialize;

/// Marker for a value the feed did not provide.
pub const UNAVAILABLE: &str = "N/A";
/// Shown before the first fetch completes.
pub const LOADING: &str = "Loading...";

/// How a failure is reported in the wave height field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorStyle {
    /// Every field reads `"N/A"`
    Unavailable,
    /// Wave height reads `"Error: <description>"`, the rest `"N/A"`
    Described,
}

/// Display strings for one station, without units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SwellFields {
    pub station: StationId,
    pub wave_height: String,
    pub swell_period: String,
    pub swell_direction: String,
}

impl SwellFields {
    pub fn loading(station: StationId) -> Self {
        SwellFields {
            station,
            wave_height: LOADING.to_string(),
            swell_period: LOADING.to_string(),
            swell_direction: LOADING.to_string(),
        }
    }

    pub fn from_report(report: &BuoyReport) -> Self {
        let or_unavailable = |value: Option<&str>| value.unwrap_or(UNAVAILABLE).to_string();
        SwellFields {
            station: report.station.clone(),
            wave_height: report
                .format_wave_height()
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
            swell_period: or_unavailable(report.swell_period_s.as_deref()),
            swell_direction: or_unavailable(report.swell_direction.as_deref()),
        }
    }

    /// All three fields unavailable; no partial data survives a failure.
    pub fn from_error(station: StationId, error: &FetchError, style: ErrorStyle) -> Self {
        let wave_height = match style {
            ErrorStyle::Unavailable => UNAVAILABLE.to_string(),
            ErrorStyle::Described => format!("Error: {}", error),
        };
        SwellFields {
            station,
            wave_height,
            swell_period: UNAVAILABLE.to_string(),
            swell_direction: UNAVAILABLE.to_string(),
        }
    }

    pub fn from_result(
        station: StationId,
        result: &Result<BuoyReport, FetchError>,
        style: ErrorStyle,
    ) -> Self {
        match result {
            Ok(report) => Self::from_report(report),
            Err(error) => Self::from_error(station, error, style),
        }
    }
}

/// Append a unit to a numeric value; markers and errors are left alone.
fn with_unit(value: &str, unit: &str) -> String {
    if value.parse::<f64>().is_ok() {
        format!("{} {}", value, unit)
    } else {
        value.to_string()
    }
}

/// Main view panel: title plus right-aligned labels and left-aligned values.
pub fn render_panel(fields: &SwellFields) -> String {
    let rows = [
        ("Sig. Wave Height:", with_unit(&fields.wave_height, "ft")),
        ("Swell Period:", with_unit(&fields.swell_period, "s")),
        ("Swell Direction:", fields.swell_direction.clone()),
    ];

    let mut out = format!("Station {} Data\n", fields.station);
    for (label, value) in rows {
        out.push_str(&format!("{:>18}  {}\n", label, value));
    }
    out
}

/// Compact lock-screen style card.
pub fn render_widget(fields: &SwellFields) -> String {
    format!(
        "Buoy {}\n  ↑ {}\n  ⧗ {}\n  ◎ {}\n",
        fields.station,
        with_unit(&fields.wave_height, "ft"),
        with_unit(&fields.swell_period, "s"),
        fields.swell_direction,
    )
}

/// Print the main view panel to stdout.
pub fn draw_ascii(fields: &SwellFields) {
    print!("{}", render_panel(fields));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> BuoyReport {
        BuoyReport {
            station: StationId::new("44091"),
            wave_height_ft: Some(1.2 * 3.28084),
            swell_period_s: Some("7.0".to_string()),
            swell_direction: Some("ESE".to_string()),
        }
    }

    #[test]
    fn test_report_fields() {
        let fields = SwellFields::from_report(&sample_report());
        assert_eq!(fields.wave_height, "3.9");
        assert_eq!(fields.swell_period, "7.0");
        assert_eq!(fields.swell_direction, "ESE");
    }

    #[test]
    fn test_missing_values_are_independent() {
        let report = BuoyReport {
            wave_height_ft: None,
            ..sample_report()
        };
        let fields = SwellFields::from_report(&report);
        assert_eq!(fields.wave_height, UNAVAILABLE);
        assert_eq!(fields.swell_period, "7.0");
        assert_eq!(fields.swell_direction, "ESE");
    }

    #[test]
    fn test_failure_marks_every_field() {
        let error = FetchError::Header {
            missing: vec!["SwD"],
        };
        let fields =
            SwellFields::from_error(StationId::new("44091"), &error, ErrorStyle::Unavailable);
        assert_eq!(fields.wave_height, UNAVAILABLE);
        assert_eq!(fields.swell_period, UNAVAILABLE);
        assert_eq!(fields.swell_direction, UNAVAILABLE);
    }

    #[test]
    fn test_described_failure() {
        let error = FetchError::Format { lines: 2 };
        let fields = SwellFields::from_error(StationId::new("44065"), &error, ErrorStyle::Described);
        assert_eq!(
            fields.wave_height,
            "Error: unexpected file format: expected at least 3 lines, found 2"
        );
        assert_eq!(fields.swell_period, UNAVAILABLE);
    }

    #[test]
    fn test_panel_layout() {
        let panel = render_panel(&SwellFields::from_report(&sample_report()));
        let lines: Vec<&str> = panel.lines().collect();
        assert_eq!(lines[0], "Station 44091 Data");
        assert_eq!(lines[1], " Sig. Wave Height:  3.9 ft");
        assert_eq!(lines[2], "     Swell Period:  7.0 s");
        assert_eq!(lines[3], "  Swell Direction:  ESE");
    }

    #[test]
    fn test_units_not_appended_to_markers() {
        let fields = SwellFields::loading(StationId::new("44065"));
        let panel = render_panel(&fields);
        assert!(panel.contains("Sig. Wave Height:  Loading...\n"));
        assert!(!panel.contains("Loading... ft"));

        let report = BuoyReport {
            swell_period_s: Some("MM".to_string()),
            ..sample_report()
        };
        let card = render_widget(&SwellFields::from_report(&report));
        assert!(card.contains("⧗ MM\n"));
        assert!(card.contains("↑ 3.9 ft\n"));
    }
}
