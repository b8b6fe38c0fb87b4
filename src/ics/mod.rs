// File: ./src/ics/mod.rs
//! Tolerant reader for the subset of iCalendar that booking channels export.
//!
//! Nothing in here fails: malformed lines are skipped, incomplete events are
//! dropped, and the worst case is an empty result.
pub mod date;
pub mod fields;
pub mod scanner;
pub mod unfold;

use crate::model::EventRecord;
use chrono::{Local, TimeZone};

pub use date::{DateEncoding, classify_date, decode_date, decode_date_in};
pub use scanner::EventBlocks;
pub use unfold::unfold_lines;

/// Parses every complete `VEVENT` in `text`, reading floating times as system-local.
pub fn parse_calendar_document(text: &str) -> Vec<EventRecord> {
    parse_calendar_document_in(text, Local)
}

/// Same as [`parse_calendar_document`] with an explicit local zone.
pub fn parse_calendar_document_in<Tz: TimeZone>(text: &str, tz: Tz) -> Vec<EventRecord> {
    EventBlocks::new(unfold_lines(text), tz).collect()
}
