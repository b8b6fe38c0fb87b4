// File: ./src/ics/scanner.rs
//! Groups logical lines into `VEVENT` blocks.
//!
//! The scanner is a two-state machine. `transition` is the whole table:
//!
//! | state    | line            | next state | step          |
//! |----------|-----------------|------------|---------------|
//! | Outside  | `BEGIN:VEVENT`  | InEvent    | Open          |
//! | Outside  | anything else   | Outside    | Ignore        |
//! | InEvent  | `END:VEVENT`    | Outside    | Close         |
//! | InEvent  | `KEY[;..]:VAL`  | InEvent    | Field         |
//! | InEvent  | no colon        | InEvent    | Ignore        |
//!
//! A stray `END:VEVENT` outside a block, or a second `BEGIN:VEVENT` inside
//! one, falls into the "anything else" rows and changes nothing.
use crate::ics::fields::EventDraft;
use crate::model::EventRecord;
use chrono::TimeZone;

pub const BEGIN_EVENT: &str = "BEGIN:VEVENT";
pub const END_EVENT: &str = "END:VEVENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Outside,
    InEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Ignore,
    Open,
    Close,
    Field { key: &'a str, value: &'a str },
}

/// Splits `KEY;PARAM=X:VALUE` into (`KEY`, `VALUE`) at the first colon.
pub fn split_content_line(line: &str) -> Option<(&str, &str)> {
    let (raw_key, value) = line.split_once(':')?;
    let key = raw_key.split_once(';').map_or(raw_key, |(key, _)| key);
    Some((key, value))
}

pub fn transition(state: ScanState, line: &str) -> (ScanState, Step<'_>) {
    match state {
        ScanState::Outside if line == BEGIN_EVENT => (ScanState::InEvent, Step::Open),
        ScanState::Outside => (ScanState::Outside, Step::Ignore),
        ScanState::InEvent if line == END_EVENT => (ScanState::Outside, Step::Close),
        ScanState::InEvent => match split_content_line(line) {
            Some((key, value)) => (ScanState::InEvent, Step::Field { key, value }),
            None => (ScanState::InEvent, Step::Ignore),
        },
    }
}

/// Lazily turns logical lines into complete event records.
/// Blocks missing a decodable start or end are skipped.
pub struct EventBlocks<I, Tz: TimeZone> {
    lines: I,
    tz: Tz,
    state: ScanState,
    draft: EventDraft,
}

impl<I, Tz> EventBlocks<I, Tz>
where
    I: Iterator<Item = String>,
    Tz: TimeZone,
{
    pub fn new(lines: I, tz: Tz) -> Self {
        Self {
            lines,
            tz,
            state: ScanState::Outside,
            draft: EventDraft::default(),
        }
    }
}

impl<I, Tz> Iterator for EventBlocks<I, Tz>
where
    I: Iterator<Item = String>,
    Tz: TimeZone,
{
    type Item = EventRecord;

    fn next(&mut self) -> Option<EventRecord> {
        for line in self.lines.by_ref() {
            let (next_state, step) = transition(self.state, &line);
            self.state = next_state;
            match step {
                Step::Ignore => {}
                Step::Open => self.draft = EventDraft::default(),
                Step::Field { key, value } => self.draft.apply(key, value, &self.tz),
                Step::Close => {
                    let draft = std::mem::take(&mut self.draft);
                    match draft.finish() {
                        Some(record) => return Some(record),
                        None => log::debug!("Dropping VEVENT without a usable DTSTART/DTEND"),
                    }
                }
            }
        }
        if self.state == ScanState::InEvent {
            log::debug!("Dropping VEVENT left open at end of input");
            self.state = ScanState::Outside;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use ScanState::*;

        assert_eq!(transition(Outside, "BEGIN:VEVENT"), (InEvent, Step::Open));
        assert_eq!(transition(Outside, "END:VEVENT"), (Outside, Step::Ignore));
        assert_eq!(transition(Outside, "DTSTART:20240101"), (Outside, Step::Ignore));
        assert_eq!(transition(InEvent, "END:VEVENT"), (Outside, Step::Close));
        assert_eq!(
            transition(InEvent, "BEGIN:VEVENT"),
            (
                InEvent,
                Step::Field {
                    key: "BEGIN",
                    value: "VEVENT"
                }
            )
        );
        assert_eq!(transition(InEvent, "garbage"), (InEvent, Step::Ignore));
    }

    #[test]
    fn test_markers_must_match_exactly() {
        use ScanState::*;
        assert_eq!(transition(Outside, "BEGIN:VEVENT "), (Outside, Step::Ignore));
        assert_eq!(transition(Outside, "begin:vevent"), (Outside, Step::Ignore));
    }

    #[test]
    fn test_split_content_line() {
        assert_eq!(
            split_content_line("DTSTART;VALUE=DATE:20240101"),
            Some(("DTSTART", "20240101"))
        );
        assert_eq!(
            split_content_line("DESCRIPTION:Check-in: 15:00"),
            Some(("DESCRIPTION", "Check-in: 15:00"))
        );
        assert_eq!(split_content_line("SUMMARY:"), Some(("SUMMARY", "")));
        assert_eq!(split_content_line("no colon here"), None);
    }
}
