//! # Station View Model
//!
//! Backs the main screen: shows the favorite station's latest swell on appear,
//! and lets the user submit a different station, which becomes the favorite for
//! every other surface (the widget included).

use crate::buoy_data::BuoyReportClient;
use crate::display::{ErrorStyle, SwellFields};
use crate::favorites::{FavoriteStationStore, StoreError};
use crate::StationId;
use std::sync::Arc;

pub struct StationView<S: FavoriteStationStore> {
    client: BuoyReportClient,
    store: Arc<S>,
    state: SwellFields,
}

impl<S: FavoriteStationStore> StationView<S> {
    /// View in its initial "Loading..." state for the current favorite.
    pub fn new(client: BuoyReportClient, store: Arc<S>) -> Self {
        let state = SwellFields::loading(store.get());
        StationView {
            client,
            store,
            state,
        }
    }

    pub fn state(&self) -> &SwellFields {
        &self.state
    }

    /// Re-read the favorite and fetch its report.
    pub async fn on_appear(&mut self) -> &SwellFields {
        let station = self.store.get();
        self.refresh(station).await
    }

    /// Store `input` as the new favorite, then show it.
    ///
    /// Surrounding whitespace is trimmed. Blank input is rejected and leaves both
    /// the stored favorite and the current state untouched.
    pub async fn submit_station(&mut self, input: &str) -> Result<&SwellFields, StoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyStation);
        }
        let station = StationId::new(trimmed);
        self.store.set(&station)?;
        Ok(self.refresh(station).await)
    }

    async fn refresh(&mut self, station: StationId) -> &SwellFields {
        let result = self.client.fetch_report(&station).await;
        self.state = SwellFields::from_result(station, &result, ErrorStyle::Unavailable);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{LOADING, UNAVAILABLE};
    use crate::favorites::MemoryStore;

    fn unreachable_client() -> BuoyReportClient {
        // Nothing listens on the discard port locally
        BuoyReportClient::with_base_url("http://127.0.0.1:9")
    }

    #[test]
    fn test_starts_loading_with_favorite() {
        let store = Arc::new(MemoryStore::default());
        store.set(&StationId::new("44013")).unwrap();
        let view = StationView::new(unreachable_client(), store);
        assert_eq!(view.state().station.as_str(), "44013");
        assert_eq!(view.state().wave_height, LOADING);
    }

    #[tokio::test]
    async fn test_blank_submission_is_rejected() {
        let store = Arc::new(MemoryStore::default());
        let mut view = StationView::new(unreachable_client(), store.clone());
        assert!(matches!(
            view.submit_station("   ").await,
            Err(StoreError::EmptyStation)
        ));
        assert_eq!(store.get().as_str(), "44065");
        assert_eq!(view.state().wave_height, LOADING);
    }

    #[tokio::test]
    async fn test_invalid_station_shows_unavailable() {
        let store = Arc::new(MemoryStore::default());
        let mut view = StationView::new(unreachable_client(), store.clone());
        let state = view.submit_station(" bad id ").await.unwrap().clone();

        // The favorite is stored even though it cannot be fetched
        assert_eq!(store.get().as_str(), "bad id");
        assert_eq!(state.station.as_str(), "bad id");
        assert_eq!(state.wave_height, UNAVAILABLE);
        assert_eq!(state.swell_period, UNAVAILABLE);
        assert_eq!(state.swell_direction, UNAVAILABLE);
    }
}
