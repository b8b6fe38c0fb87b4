// File: ./src/model/instant.rs
use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// How precise the source text was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    DateOnly,
    DateTime,
}

/// Which clock the source text was written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Local,
    Utc,
}

/// A point in time tagged with the precision and origin of the text it came from.
///
/// Ordering and equality only look at the absolute point in time. The tags
/// only matter when the instant is rendered back to a human.
#[derive(Debug, Clone, Copy)]
pub struct Instant {
    at: DateTime<Utc>,
    precision: Precision,
    origin: Origin,
}

impl Instant {
    /// Midnight of `date` in the given zone.
    pub fn date_only_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<Self> {
        let at = resolve_local(tz, date.and_hms_opt(0, 0, 0)?)?;
        Some(Self {
            at,
            precision: Precision::DateOnly,
            origin: Origin::Local,
        })
    }

    /// Midnight of `date` in the system time zone.
    pub fn date_only(date: NaiveDate) -> Option<Self> {
        Self::date_only_in(date, &Local)
    }

    /// A wall-clock time in the given zone.
    pub fn local_in<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<Self> {
        Some(Self {
            at: resolve_local(tz, naive)?,
            precision: Precision::DateTime,
            origin: Origin::Local,
        })
    }

    pub fn utc(at: DateTime<Utc>) -> Self {
        Self {
            at,
            precision: Precision::DateTime,
            origin: Origin::Utc,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_date_only(&self) -> bool {
        self.precision == Precision::DateOnly
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.at.timestamp_millis()
    }

    /// Calendar date of this instant as seen from `tz`.
    pub fn date_naive_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.at.with_timezone(tz).date_naive()
    }

    /// Calendar date of this instant on the system clock.
    pub fn local_date(&self) -> NaiveDate {
        self.date_naive_in(&Local)
    }
}

/// Maps a wall-clock time onto the timeline.
/// Ambiguous times (DST fall-back) pick the earlier instant; times inside a
/// DST gap are pushed forward by an hour.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl Eq for Instant {}

impl Hash for Instant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.at.hash(state);
    }
}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.cmp(&other.at)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.precision, self.origin) {
            (Precision::DateOnly, _) => write!(f, "{}", self.local_date().format("%Y-%m-%d")),
            (Precision::DateTime, Origin::Local) => write!(
                f,
                "{}",
                self.at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            ),
            (Precision::DateTime, Origin::Utc) => write!(f, "{}", self.at.format("%Y-%m-%d %H:%MZ")),
        }
    }
}
