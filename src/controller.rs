// File: src/controller.rs
//! Coordinates a full refresh: remote feeds, then manual bookings, then gap
//! analysis. Every front end (list, month grid, export) renders from the same
//! `Snapshot`.
use crate::bookings::BookingStore;
use crate::config::Config;
use crate::context::AppContext;
use crate::timeline::{FeedFetcher, Timelines, append_bookings, build_timelines};
use crate::windows::{WindowsByProperty, compute_cleaning_windows};
use std::sync::Arc;

/// Everything known after one refresh.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub timelines: Timelines,
    pub windows: WindowsByProperty,
}

impl Snapshot {
    pub fn window_count(&self) -> usize {
        self.windows.values().map(Vec::len).sum()
    }

    pub fn event_count(&self) -> usize {
        self.timelines.values().map(|t| t.events.len()).sum()
    }
}

#[derive(Clone, Debug)]
pub struct Planner {
    pub config: Config,
    pub ctx: Arc<dyn AppContext>,
}

impl Planner {
    pub fn new(config: Config, ctx: Arc<dyn AppContext>) -> Self {
        Self { config, ctx }
    }

    /// Never fails as a whole. Broken feeds and an unreadable booking store
    /// are logged and contribute nothing.
    pub async fn refresh<F: FeedFetcher>(&self, fetcher: &F) -> Snapshot {
        let mut timelines = build_timelines(
            &self.config.properties,
            fetcher,
            self.config.max_concurrent_fetches,
        )
        .await;

        match BookingStore::load(self.ctx.as_ref()) {
            Ok(bookings) => append_bookings(&mut timelines, &bookings),
            Err(e) => log::warn!("Failed to load manual bookings: {:#}", e),
        }

        let windows = compute_cleaning_windows(&timelines);
        let snapshot = Snapshot { timelines, windows };
        log::info!(
            "Refreshed {} propert(ies): {} booking(s), {} cleaning window(s)",
            snapshot.timelines.len(),
            snapshot.event_count(),
            snapshot.window_count()
        );
        snapshot
    }
}
