// File: ./src/ics/fields.rs
use crate::ics::date::decode_date_in;
use crate::model::{EventRecord, Instant};
use chrono::TimeZone;

/// Property names we pick out of an event block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Start,
    End,
    Summary,
    Uid,
}

impl FieldKey {
    /// `key` must already have its `;PARAM=...` suffix removed.
    pub fn recognize(key: &str) -> Option<Self> {
        const KEYS: &[(&str, FieldKey)] = &[
            ("DTSTART", FieldKey::Start),
            ("DTEND", FieldKey::End),
            ("SUMMARY", FieldKey::Summary),
            ("UID", FieldKey::Uid),
        ];
        KEYS.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, field)| *field)
    }
}

/// Fields collected so far for the block being scanned.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub start: Option<Instant>,
    pub end: Option<Instant>,
    pub summary: Option<String>,
    pub uid: Option<String>,
}

impl EventDraft {
    /// Stores one `key:value` pair. Unknown keys are ignored; a later value
    /// for the same key replaces the earlier one, including with "absent"
    /// when the date does not decode.
    pub fn apply<Tz: TimeZone>(&mut self, key: &str, value: &str, tz: &Tz) {
        match FieldKey::recognize(key) {
            Some(FieldKey::Start) => self.start = decode_date_in(value, tz),
            Some(FieldKey::End) => self.end = decode_date_in(value, tz),
            Some(FieldKey::Summary) => self.summary = Some(value.to_string()),
            Some(FieldKey::Uid) => self.uid = Some(value.to_string()),
            None => {}
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// `None` unless both dates decoded.
    pub fn finish(self) -> Option<EventRecord> {
        Some(EventRecord {
            start: self.start?,
            end: self.end?,
            summary: self.summary,
            uid: self.uid,
        })
    }
}
