// File: ./src/windows.rs
//! Cleaning-window detection.
//!
//! Only adjacent bookings (after sorting by check-in) are compared, and
//! overlapping bookings are not merged first. A long stay that swallows a
//! shorter one can therefore hide a gap; that is accepted.
use crate::model::{CleaningWindow, ParsedEvent};
use crate::timeline::{PropertyTimeline, Timelines};
use std::collections::BTreeMap;

/// Property id -> windows in check-in order.
pub type WindowsByProperty = BTreeMap<String, Vec<CleaningWindow>>;

pub fn compute_cleaning_windows(timelines: &Timelines) -> WindowsByProperty {
    timelines
        .iter()
        .map(|(id, timeline)| (id.clone(), windows_for_timeline(timeline)))
        .collect()
}

pub fn windows_for_timeline(timeline: &PropertyTimeline) -> Vec<CleaningWindow> {
    let sorted = sorted_events(&timeline.events);
    sorted
        .windows(2)
        .filter_map(|pair| {
            CleaningWindow::between(
                &timeline.property_name,
                &timeline.property_color,
                pair[0],
                pair[1],
            )
        })
        .collect()
}

/// Events by ascending start. Stable, so equal starts keep feed order.
pub fn sorted_events(events: &[ParsedEvent]) -> Vec<&ParsedEvent> {
    let mut sorted: Vec<&ParsedEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start);
    sorted
}
