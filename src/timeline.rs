// File: ./src/timeline.rs
//! Builds one booking timeline per property out of all of its feeds.
//!
//! Feeds are fetched concurrently (bounded), but each fetch produces its own
//! event list and the lists are only concatenated once every fetch is done.
//! A feed that fails contributes nothing; the rest carry on.
use crate::bookings::Booking;
use crate::ics::parse_calendar_document;
use crate::model::{CalendarFeedRef, ParsedEvent, PropertySpec};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::future::Future;

pub const MANUAL_SOURCE_LABEL: &str = "Manual";

/// The feed-fetch collaborator: turns a feed locator into the document text.
pub trait FeedFetcher {
    fn fetch(&self, locator: &str) -> impl Future<Output = anyhow::Result<String>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTimeline {
    pub property_id: String,
    pub property_name: String,
    pub property_color: String,
    /// Unsorted, in feed order.
    pub events: Vec<ParsedEvent>,
}

impl PropertyTimeline {
    pub fn empty(property: &PropertySpec) -> Self {
        Self {
            property_id: property.id.clone(),
            property_name: property.name.clone(),
            property_color: property.display_color(),
            events: Vec::new(),
        }
    }
}

/// Property id -> timeline.
pub type Timelines = BTreeMap<String, PropertyTimeline>;

/// Fetches and parses every feed of every property, at most
/// `max_concurrent_fetches` at a time. Every property gets an entry, even
/// when all of its feeds fail.
pub async fn build_timelines<F: FeedFetcher>(
    properties: &[PropertySpec],
    fetcher: &F,
    max_concurrent_fetches: usize,
) -> Timelines {
    let jobs = properties
        .iter()
        .flat_map(|property| property.calendars.iter().map(move |feed| (property, feed)))
        .map(|(property, feed)| async move {
            let events = load_feed(fetcher, property, feed).await;
            (property.id.as_str(), events)
        });

    // `buffered` keeps results in job order, so the merge is deterministic.
    let results: Vec<(&str, Vec<ParsedEvent>)> = stream::iter(jobs)
        .buffered(max_concurrent_fetches.max(1))
        .collect()
        .await;

    let mut timelines: Timelines = properties
        .iter()
        .map(|p| (p.id.clone(), PropertyTimeline::empty(p)))
        .collect();

    for (property_id, mut events) in results {
        if let Some(timeline) = timelines.get_mut(property_id) {
            timeline.events.append(&mut events);
        }
    }

    timelines
}

/// One feed's events, or none if the fetch failed.
pub async fn load_feed<F: FeedFetcher>(
    fetcher: &F,
    property: &PropertySpec,
    feed: &CalendarFeedRef,
) -> Vec<ParsedEvent> {
    match fetcher.fetch(&feed.url).await {
        Ok(text) => {
            let events: Vec<ParsedEvent> = parse_calendar_document(&text)
                .into_iter()
                .map(|record| record.attach(&property.id, &feed.label))
                .collect();
            log::debug!(
                "Loaded {} event(s) from {} calendar for {}",
                events.len(),
                feed.label,
                property.name
            );
            events
        }
        Err(e) => {
            log::warn!(
                "Failed to load {} calendar for {}: {:#}",
                feed.label,
                property.name,
                e
            );
            Vec::new()
        }
    }
}

/// Adds manually entered bookings to the timelines of their properties.
/// Bookings for unknown properties are skipped.
pub fn append_bookings(timelines: &mut Timelines, bookings: &[Booking]) {
    for booking in bookings {
        let Some(timeline) = timelines.get_mut(&booking.property_id) else {
            log::debug!(
                "Ignoring booking {} for unknown property '{}'",
                booking.id,
                booking.property_id
            );
            continue;
        };
        match booking.to_event() {
            Some(event) => timeline.events.push(event),
            None => log::debug!("Booking {} has dates that do not exist locally", booking.id),
        }
    }
}
