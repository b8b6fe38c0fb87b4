// File: ./src/ics/date.rs
//! Decoding of `DTSTART`/`DTEND` values.
//!
//! Two shapes are understood:
//! - `YYYYMMDD` (date only): midnight in the local zone.
//! - `YYYYMMDDTHHMMSS[Z]` (date-time): UTC when it ends in `Z`, local wall clock otherwise.
//!
//! Anything else decodes to `None`. Callers treat that as "field absent".
use crate::model::Instant;
use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEncoding {
    DateOnly,
    DateTime { utc: bool },
}

/// Drops a `KEY;PARAMS:` prefix if the value still carries one.
pub fn strip_property_prefix(value: &str) -> &str {
    value.split_once(':').map_or(value, |(_, rest)| rest)
}

/// Picks the encoding from the shape of the text alone.
pub fn classify_date(value: &str) -> Option<DateEncoding> {
    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        return Some(DateEncoding::DateOnly);
    }
    if value.contains('T') {
        return Some(DateEncoding::DateTime {
            utc: value.ends_with('Z'),
        });
    }
    None
}

/// Decodes against the system time zone.
pub fn decode_date(value: &str) -> Option<Instant> {
    decode_date_in(value, &Local)
}

pub fn decode_date_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<Instant> {
    let value = strip_property_prefix(value);
    match classify_date(value)? {
        DateEncoding::DateOnly => Instant::date_only_in(date_part(value)?, tz),
        DateEncoding::DateTime { utc } => {
            let naive = date_part(value)?.and_time(time_part(value)?);
            if utc {
                Some(Instant::utc(naive.and_utc()))
            } else {
                Instant::local_in(naive, tz)
            }
        }
    }
}

fn digits(value: &str, range: Range<usize>) -> Option<u32> {
    let part = value.get(range)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn date_part(value: &str) -> Option<NaiveDate> {
    let year = digits(value, 0..4)?;
    let month = digits(value, 4..6)?;
    let day = digits(value, 6..8)?;
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

// The `T` sits at offset 8.
fn time_part(value: &str) -> Option<NaiveTime> {
    let hour = digits(value, 9..11)?;
    let minute = digits(value, 11..13)?;
    let second = digits(value, 13..15)?;
    NaiveTime::from_hms_opt(hour, minute, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Origin, Precision};
    use chrono::{FixedOffset, Timelike, Utc};

    #[test]
    fn test_classify() {
        assert_eq!(classify_date("20240101"), Some(DateEncoding::DateOnly));
        assert_eq!(
            classify_date("20240101T150000Z"),
            Some(DateEncoding::DateTime { utc: true })
        );
        assert_eq!(
            classify_date("20240101T150000"),
            Some(DateEncoding::DateTime { utc: false })
        );
        assert_eq!(classify_date("2024-01-01"), None);
        assert_eq!(classify_date("2024010"), None);
        assert_eq!(classify_date(""), None);
    }

    #[test]
    fn test_prefix_is_stripped() {
        assert_eq!(strip_property_prefix("DTSTART;VALUE=DATE:20240101"), "20240101");
        assert_eq!(strip_property_prefix("20240101"), "20240101");
        assert_eq!(
            decode_date_in("DTEND;VALUE=DATE:20240105", &Utc),
            decode_date_in("20240105", &Utc)
        );
    }

    #[test]
    fn test_utc_date_time() {
        let instant = decode_date_in("20240101T150000Z", &FixedOffset::east_opt(7200).unwrap())
            .unwrap();
        assert_eq!(instant.at().to_rfc3339(), "2024-01-01T15:00:00+00:00");
        assert_eq!(instant.origin(), Origin::Utc);
        assert_eq!(instant.precision(), Precision::DateTime);
    }

    #[test]
    fn test_local_date_time_uses_zone() {
        let plus_two = FixedOffset::east_opt(7200).unwrap();
        let instant = decode_date_in("20240101T150000", &plus_two).unwrap();
        assert_eq!(instant.at().hour(), 13);
        assert_eq!(instant.origin(), Origin::Local);
    }

    #[test]
    fn test_date_only_is_local_midnight() {
        let instant = decode_date("20240105").unwrap();
        let local = instant.at().with_timezone(&Local);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!((local.hour(), local.minute(), local.second()), (0, 0, 0));
        assert!(instant.is_date_only());
    }

    #[test]
    fn test_invalid_components_are_absent() {
        assert!(decode_date_in("20241301", &Utc).is_none());
        assert!(decode_date_in("20240230", &Utc).is_none());
        assert!(decode_date_in("20240101T250000Z", &Utc).is_none());
        assert!(decode_date_in("20240101T15", &Utc).is_none());
        assert!(decode_date_in("2024AB01T150000Z", &Utc).is_none());
        assert!(decode_date_in("TENTATIVE", &Utc).is_none());
    }
}
