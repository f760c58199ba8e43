//! # Favorite Station Store
//!
//! The favorite station is the only state shared between the station view and
//! the widget. It is modelled as an injected [`FavoriteStationStore`] so each
//! caller receives the store explicitly instead of reaching for a global.
//!
//! [`SharedDefaults`] persists the value in a small TOML table that other keys may share,
//! standing in for an app-group defaults suite that several processes can read.
//! Writes replace the whole file through a temporary file and a rename, so a
//! concurrent reader sees either the old or the new value. Last write wins.

use crate::StationId;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::{fs, io};
use thiserror::Error;
use toml::{Table, Value};

/// Key the favorite station is stored under.
pub const FAVORITE_KEY: &str = "favoriteBuoy";

/// Failures persisting the favorite station.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Submitted station identifier was blank
    #[error("station identifier must not be empty")]
    EmptyStation,

    /// Defaults file could not be written
    #[error("defaults IO: {0}")]
    Io(#[from] io::Error),

    /// Defaults could not be serialized
    #[error("defaults format: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Shared read/write access to the favorite station.
pub trait FavoriteStationStore: Send + Sync {
    /// Current favorite, or the default station if none was ever stored.
    fn get(&self) -> StationId;

    /// Persist a new favorite, visible to every holder's next [`get`](Self::get).
    fn set(&self, station: &StationId) -> Result<(), StoreError>;
}

/// File-backed defaults suite shared by the view and the widget.
#[derive(Debug, Clone)]
pub struct SharedDefaults {
    path: PathBuf,
    default_station: StationId,
}

impl SharedDefaults {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_default(path, StationId::default())
    }

    pub fn with_default(path: impl Into<PathBuf>, default_station: StationId) -> Self {
        SharedDefaults {
            path: path.into(),
            default_station,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole suite; values of any TOML type are kept as-is.
    fn load(&self) -> io::Result<Table> {
        let contents = fs::read_to_string(&self.path)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

impl FavoriteStationStore for SharedDefaults {
    fn get(&self) -> StationId {
        match self.load() {
            Ok(values) => match values.get(FAVORITE_KEY).and_then(Value::as_str) {
                Some(id) if !id.is_empty() => StationId::new(id),
                _ => self.default_station.clone(),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.default_station.clone(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable shared defaults, using default station");
                self.default_station.clone()
            }
        }
    }

    fn set(&self, station: &StationId) -> Result<(), StoreError> {
        if station.as_str().is_empty() {
            return Err(StoreError::EmptyStation);
        }

        // Keep any other keys already in the suite
        let mut values = match self.load() {
            Ok(values) => values,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Table::new(),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(path = %self.path.display(), error = %e, "replacing unparseable shared defaults");
                Table::new()
            }
            Err(e) => return Err(e.into()),
        };
        values.insert(
            FAVORITE_KEY.to_string(),
            Value::String(station.as_str().to_string()),
        );
        let contents = toml::to_string(&values)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        tracing::info!(%station, path = %self.path.display(), "favorite station saved");
        Ok(())
    }
}

/// In-process store, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    favorite: RwLock<Option<StationId>>,
}

impl FavoriteStationStore for MemoryStore {
    fn get(&self) -> StationId {
        // A panicked writer cannot leave a half-written StationId behind
        self.favorite
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_default()
    }

    fn set(&self, station: &StationId) -> Result<(), StoreError> {
        if station.as_str().is_empty() {
            return Err(StoreError::EmptyStation);
        }
        let mut favorite = self
            .favorite
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *favorite = Some(station.clone());
        Ok(())
    }
}
