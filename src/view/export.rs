// File: ./src/view/export.rs
// Cleaning windows as an iCalendar document, so they can be subscribed to
// from a phone calendar.
use crate::model::{CleaningWindow, Instant};
use crate::view::badge_text;
use crate::windows::WindowsByProperty;
use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, Event};

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Stable across refreshes as long as the window itself does not move.
pub fn window_uid(window: &CleaningWindow) -> String {
    format!(
        "{}-{}@turnover",
        window.property_id,
        window.start.at().format(UTC_FORMAT)
    )
}

fn date_property(name: &str, instant: &Instant) -> icalendar::Property {
    if instant.is_date_only() {
        let mut prop =
            icalendar::Property::new(name, &instant.local_date().format("%Y%m%d").to_string());
        prop.add_parameter("VALUE", "DATE");
        prop
    } else {
        icalendar::Property::new(name, &instant.at().format(UTC_FORMAT).to_string())
    }
}

pub fn window_event(window: &CleaningWindow, stamp: DateTime<Utc>) -> Event {
    let mut event = Event::new();
    event.uid(&window_uid(window));
    event.summary(&format!(
        "Cleaning: {} ({})",
        window.property_name,
        badge_text(window)
    ));
    event.timestamp(stamp);
    event.append_property(date_property("DTSTART", &window.start));
    event.append_property(date_property("DTEND", &window.end));
    event.add_property("X-TURNOVER-URGENCY", window.urgency_level.to_string());
    event.done()
}

/// One VEVENT per window, properties in id order.
pub fn export_ics(windows: &WindowsByProperty, stamp: DateTime<Utc>) -> String {
    let mut calendar = Calendar::new();
    for window in windows.values().flatten() {
        calendar.push(window_event(window, stamp));
    }
    calendar.to_string()
}
