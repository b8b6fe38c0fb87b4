// File: ./src/view/list.rs
use crate::color_utils;
use crate::model::{CleaningWindow, Instant, PropertySpec};
use crate::view::{badge_text, property_header, short_date};
use crate::windows::WindowsByProperty;
use chrono::NaiveDate;
use std::fmt::Write;

/// A window is still relevant while its check-in has not passed local
/// midnight of `today`.
pub fn is_upcoming(window: &CleaningWindow, today: NaiveDate) -> bool {
    match Instant::date_only(today) {
        Some(midnight) => window.end >= midnight,
        None => window.end.local_date() >= today,
    }
}

/// Upcoming windows per property, in configuration order.
pub fn render_list(
    properties: &[PropertySpec],
    windows: &WindowsByProperty,
    today: NaiveDate,
    color: bool,
) -> String {
    let mut out = String::new();

    for property in properties {
        let _ = writeln!(
            out,
            "{}",
            property_header(&property.name, &property.display_color(), color)
        );

        let upcoming: Vec<&CleaningWindow> = windows
            .get(&property.id)
            .map(|ws| ws.iter().filter(|w| is_upcoming(w, today)).collect())
            .unwrap_or_default();

        if upcoming.is_empty() {
            let _ = writeln!(out, "  No upcoming cleaning windows");
        }

        for window in upcoming {
            let badge = format!("{:<7}", badge_text(window));
            let badge = if color {
                color_utils::ansi_bg(color_utils::urgency_rgb(window.urgency_level), &badge)
            } else {
                badge
            };
            let _ = writeln!(
                out,
                "  {} {} → {}",
                badge,
                short_date(window.start.local_date()),
                short_date(window.end.local_date())
            );
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UrgencyLevel;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn window(start: u32, end: u32) -> CleaningWindow {
        let days = end - start;
        CleaningWindow {
            property_id: "flat".to_string(),
            property_name: "Flat".to_string(),
            property_color: "#8b5cf6".to_string(),
            start: Instant::date_only(day(start)).unwrap(),
            end: Instant::date_only(day(end)).unwrap(),
            days,
            urgency_level: UrgencyLevel::from_days(days),
        }
    }

    #[test]
    fn test_window_ending_today_is_still_listed() {
        assert!(is_upcoming(&window(3, 5), day(5)));
        assert!(!is_upcoming(&window(3, 5), day(6)));
    }

    #[test]
    fn test_render_plain() {
        let properties = vec![PropertySpec::new("flat", "Flat"), PropertySpec::new("loft", "Loft")];
        let mut windows = WindowsByProperty::new();
        windows.insert("flat".to_string(), vec![window(1, 2), window(10, 14)]);

        let text = render_list(&properties, &windows, day(1), false);
        assert!(text.contains("  URGENT  Mon 1 Jan → Tue 2 Jan"));
        assert!(text.contains("  4 days  Wed 10 Jan → Sun 14 Jan"));
        // Loft has no entry at all
        let loft = text.split("Loft").nth(1).unwrap();
        assert!(loft.contains("No upcoming cleaning windows"));
        assert!(!text.contains('\x1b'));
    }
}
