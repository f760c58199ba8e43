//! # Widget Timeline Provider
//!
//! Supplies the entries a home-screen or lock-screen widget displays. Each
//! request fetches the favorite station once and produces a single entry; the
//! timeline asks the host to come back after the refresh interval. Scheduling
//! the next request is the host's job (see the `widget --watch` command).

use crate::buoy_data::BuoyReportClient;
use crate::display::{ErrorStyle, SwellFields};
use crate::favorites::FavoriteStationStore;
use chrono::{DateTime, Duration, Local};
use std::sync::Arc;

/// One dated set of display strings.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEntry {
    pub date: DateTime<Local>,
    pub fields: SwellFields,
}

/// When the host should request a new timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Request again once this instant has passed
    After(DateTime<Local>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub policy: ReloadPolicy,
}

impl Timeline {
    /// Time until the next reload, zero if already due.
    pub fn reload_in(&self, now: DateTime<Local>) -> std::time::Duration {
        let ReloadPolicy::After(at) = self.policy;
        (at - now).to_std().unwrap_or_default()
    }
}

pub struct WidgetTimelineProvider<S: FavoriteStationStore> {
    client: BuoyReportClient,
    store: Arc<S>,
    refresh_interval: Duration,
}

impl<S: FavoriteStationStore> WidgetTimelineProvider<S> {
    pub fn new(client: BuoyReportClient, store: Arc<S>, refresh_interval: Duration) -> Self {
        WidgetTimelineProvider {
            client,
            store,
            refresh_interval,
        }
    }

    /// Entry shown while the widget has no data yet. Never touches the network.
    pub fn placeholder(&self) -> TimelineEntry {
        TimelineEntry {
            date: Local::now(),
            fields: SwellFields::loading(self.store.get()),
        }
    }

    /// Current data for the widget gallery.
    pub async fn snapshot(&self) -> TimelineEntry {
        self.current_entry().await
    }

    /// Current data plus a reload request one refresh interval from now.
    pub async fn timeline(&self) -> Timeline {
        let entry = self.current_entry().await;
        let reload_at = entry.date + self.refresh_interval;
        tracing::debug!(station = %entry.fields.station, %reload_at, "widget timeline built");
        Timeline {
            entries: vec![entry],
            policy: ReloadPolicy::After(reload_at),
        }
    }

    async fn current_entry(&self) -> TimelineEntry {
        let station = self.store.get();
        let result = self.client.fetch_report(&station).await;
        TimelineEntry {
            date: Local::now(),
            fields: SwellFields::from_result(station, &result, ErrorStyle::Described),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{LOADING, UNAVAILABLE};
    use crate::favorites::MemoryStore;
    use crate::StationId;

    fn provider(store: Arc<MemoryStore>) -> WidgetTimelineProvider<MemoryStore> {
        WidgetTimelineProvider::new(
            BuoyReportClient::with_base_url("http://127.0.0.1:9"),
            store,
            Duration::minutes(30),
        )
    }

    #[test]
    fn test_placeholder_uses_favorite() {
        let store = Arc::new(MemoryStore::default());
        store.set(&StationId::new("44097")).unwrap();
        let entry = provider(store).placeholder();
        assert_eq!(entry.fields.station.as_str(), "44097");
        assert_eq!(entry.fields.swell_direction, LOADING);
    }

    #[tokio::test]
    async fn test_timeline_reloads_after_interval() {
        let store = Arc::new(MemoryStore::default());
        store.set(&StationId::new("not valid")).unwrap();
        let timeline = provider(store).timeline().await;

        assert_eq!(timeline.entries.len(), 1);
        let entry = &timeline.entries[0];
        assert_eq!(timeline.policy, ReloadPolicy::After(entry.date + Duration::minutes(30)));
        assert_eq!(
            timeline.reload_in(entry.date),
            std::time::Duration::from_secs(30 * 60)
        );

        assert_eq!(entry.fields.wave_height, "Error: invalid URL for station \"not valid\"");
        assert_eq!(entry.fields.swell_period, UNAVAILABLE);
        assert_eq!(entry.fields.swell_direction, UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_snapshot_reports_failure_in_wave_height() {
        let store = Arc::new(MemoryStore::default());
        store.set(&StationId::new("a/b")).unwrap();
        let entry = provider(store).snapshot().await;
        assert_eq!(entry.fields.station.as_str(), "a/b");
        assert!(entry.fields.wave_height.starts_with("Error: "));
        assert_eq!(entry.fields.swell_period, UNAVAILABLE);
    }

    #[test]
    fn test_overdue_reload_is_immediate() {
        let now = Local::now();
        let timeline = Timeline {
            entries: vec![],
            policy: ReloadPolicy::After(now - Duration::minutes(5)),
        };
        assert_eq!(timeline.reload_in(now), std::time::Duration::ZERO);
    }
}
