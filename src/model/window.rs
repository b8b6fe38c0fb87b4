// File: ./src/model/window.rs
use crate::model::event::ParsedEvent;
use crate::model::instant::Instant;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UrgencyLevel {
    Urgent,
    Warning,
    Normal,
}

impl UrgencyLevel {
    pub fn from_days(days: u32) -> Self {
        match days {
            1 => Self::Urgent,
            2 => Self::Warning,
            _ => Self::Normal,
        }
    }
}

/// Free time between two consecutive bookings of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningWindow {
    pub property_id: String,
    pub property_name: String,
    pub property_color: String,
    pub start: Instant,
    pub end: Instant,
    pub days: u32,
    pub urgency_level: UrgencyLevel,
}

impl CleaningWindow {
    /// Window from the checkout of `previous` to the check-in of `next`.
    /// `None` when they touch or overlap.
    pub fn between(
        property_name: &str,
        property_color: &str,
        previous: &ParsedEvent,
        next: &ParsedEvent,
    ) -> Option<Self> {
        if previous.end >= next.start {
            return None;
        }
        let days = span_days(&previous.end, &next.start);
        Some(Self {
            property_id: next.property_id.clone(),
            property_name: property_name.to_string(),
            property_color: property_color.to_string(),
            start: previous.end,
            end: next.start,
            days,
            urgency_level: UrgencyLevel::from_days(days),
        })
    }

    pub fn is_urgent(&self) -> bool {
        self.urgency_level == UrgencyLevel::Urgent
    }
}

/// Whole days needed to cover `from..to`, rounding any partial day up.
pub fn span_days(from: &Instant, to: &Instant) -> u32 {
    let millis = to.timestamp_millis() - from.timestamp_millis();
    if millis <= 0 {
        return 0;
    }
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use strum::IntoEnumIterator;

    fn at(h: u32, m: u32) -> Instant {
        Instant::utc(Utc.with_ymd_and_hms(2024, 1, 5, h, m, 0).unwrap())
    }

    #[test]
    fn test_urgency_from_days() {
        assert_eq!(UrgencyLevel::from_days(1), UrgencyLevel::Urgent);
        assert_eq!(UrgencyLevel::from_days(2), UrgencyLevel::Warning);
        assert_eq!(UrgencyLevel::from_days(3), UrgencyLevel::Normal);
        assert_eq!(UrgencyLevel::from_days(30), UrgencyLevel::Normal);
    }

    #[test]
    fn test_urgency_names() {
        let names: Vec<String> = UrgencyLevel::iter().map(|u| u.to_string()).collect();
        assert_eq!(names, vec!["urgent", "warning", "normal"]);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        // 11:00 checkout, 15:00 check-in the same day
        assert_eq!(span_days(&at(11, 0), &at(15, 0)), 1);
        assert_eq!(span_days(&at(11, 0), &at(11, 1)), 1);
    }

    #[test]
    fn test_exact_multiple_of_a_day() {
        let from = at(10, 0);
        let to = Instant::utc(Utc.with_ymd_and_hms(2024, 1, 7, 10, 0, 0).unwrap());
        assert_eq!(span_days(&from, &to), 2);
    }
}
