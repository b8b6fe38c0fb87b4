// File: ./src/view/mod.rs
//! Plain-text renderings of a refresh for the terminal, plus iCalendar export.
pub mod export;
pub mod list;
pub mod month;

pub use export::export_ics;
pub use list::render_list;
pub use month::{DayStatus, day_status, parse_month_arg, render_month};

use crate::color_utils;
use crate::model::CleaningWindow;
use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

/// "Fri 5 Jan"
pub fn short_date(date: NaiveDate) -> String {
    date.format("%a %-d %b").to_string()
}

/// "URGENT" for single-day windows, "N days" otherwise.
pub fn badge_text(window: &CleaningWindow) -> String {
    if window.is_urgent() {
        "URGENT".to_string()
    } else {
        format!("{} days", window.days)
    }
}

/// Property name underlined to its display width.
pub(crate) fn property_header(name: &str, accent: &str, color: bool) -> String {
    let underline = "─".repeat(name.width().max(1));
    match color_utils::parse_hex_to_u8(accent) {
        Some(rgb) if color => format!(
            "{}\n{}",
            color_utils::ansi_fg(rgb, name),
            color_utils::ansi_fg(rgb, &underline)
        ),
        _ => format!("{}\n{}", name, underline),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_date() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(short_date(d), "Fri 5 Jan");
    }

    #[test]
    fn test_header_width_follows_display_width() {
        let plain = property_header("Ático 日本", "#8b5cf6", false);
        let underline = plain.lines().nth(1).unwrap();
        // the two CJK chars are double width
        assert_eq!(underline.chars().count(), 10);
    }
}
