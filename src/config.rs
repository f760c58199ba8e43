//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the buoy-config.toml file.
//! It provides a centralized way to configure the default station, the NOAA feed
//! location, where the shared defaults live, and how often the widget refreshes.

use crate::buoy_data::DEFAULT_BASE_URL;
use crate::favorites::SharedDefaults;
use crate::stations::ACTIVE_STATIONS_URL;
use crate::{StationId, DEFAULT_STATION};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "buoy-config.toml";

/// Application configuration loaded from buoy-config.toml
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Station used until the user picks a favorite
    pub station: StationConfig,
    /// NOAA realtime feed location
    pub feed: FeedConfig,
    /// Shared defaults suite
    pub storage: StorageConfig,
    /// Widget timeline settings
    pub widget: WidgetConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationConfig {
    /// NDBC station ID (e.g., "44065" for New York Harbor Entrance)
    pub default_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Directory URL containing `{station}.spec` files
    pub base_url: String,
    /// XML list of active stations
    #[serde(default = "default_stations_url")]
    pub stations_url: String,
}

fn default_stations_url() -> String {
    ACTIVE_STATIONS_URL.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// File backing the defaults suite shared by the view and the widget
    pub shared_defaults_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetConfig {
    /// Minutes between widget timeline refreshes
    pub refresh_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            station: StationConfig {
                default_id: DEFAULT_STATION.to_string(),
            },
            feed: FeedConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                stations_url: default_stations_url(),
            },
            storage: StorageConfig {
                shared_defaults_path: PathBuf::from("group.BuoyData.toml"),
            },
            widget: WidgetConfig {
                refresh_minutes: 30,
            },
        }
    }
}

impl Config {
    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        default_station = %config.station.default_id,
                        "loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid config file format, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        tracing::info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }

    pub fn default_station(&self) -> StationId {
        StationId::new(self.station.default_id.as_str())
    }

    /// Shared defaults store described by the `[storage]` section.
    pub fn favorites(&self) -> SharedDefaults {
        SharedDefaults::with_default(&self.storage.shared_defaults_path, self.default_station())
    }

    pub fn refresh_interval(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.widget.refresh_minutes.max(1)))
    }
}
