// File: ./src/model/event.rs
use crate::model::instant::Instant;

/// A reservation as read from one feed, before it is attached to a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub start: Instant,
    pub end: Instant,
    pub summary: Option<String>,
    pub uid: Option<String>,
}

impl EventRecord {
    pub fn attach(self, property_id: &str, source_label: &str) -> ParsedEvent {
        ParsedEvent {
            start: self.start,
            end: self.end,
            summary: self.summary,
            uid: self.uid,
            source_label: source_label.to_string(),
            property_id: property_id.to_string(),
        }
    }
}

/// A reservation on a property's timeline.
///
/// `end` is whatever the feed said; nothing guarantees it comes after `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub start: Instant,
    pub end: Instant,
    pub summary: Option<String>,
    pub uid: Option<String>,
    pub source_label: String,
    pub property_id: String,
}
