// Rendering of a refresh: list, month grid and iCalendar export.
use chrono::{NaiveDate, TimeZone, Utc};
use turnover::model::{CleaningWindow, Instant, ParsedEvent, PropertySpec, UrgencyLevel};
use turnover::timeline::{PropertyTimeline, Timelines};
use turnover::view::{DayStatus, day_status, export_ics, render_list, render_month};
use turnover::windows::{WindowsByProperty, compute_cleaning_windows};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn local_day(m: u32, d: u32) -> Instant {
    Instant::date_only(date(m, d)).unwrap()
}

fn stay(start: (u32, u32), end: (u32, u32)) -> ParsedEvent {
    ParsedEvent {
        start: local_day(start.0, start.1),
        end: local_day(end.0, end.1),
        summary: None,
        uid: None,
        source_label: "Airbnb".to_string(),
        property_id: "studio".to_string(),
    }
}

fn fixture() -> (Vec<PropertySpec>, Timelines, WindowsByProperty) {
    let properties = vec![PropertySpec::new("studio", "The Studio").with_color("#8b5cf6")];
    let mut timelines = Timelines::new();
    timelines.insert(
        "studio".to_string(),
        PropertyTimeline {
            property_id: "studio".to_string(),
            property_name: "The Studio".to_string(),
            property_color: "#8b5cf6".to_string(),
            // gaps: 5..6 (urgent), 10..12 (warning), 20..25 (normal)
            events: vec![
                stay((2, 1), (2, 5)),
                stay((2, 6), (2, 10)),
                stay((2, 12), (2, 20)),
                stay((2, 25), (3, 2)),
            ],
        },
    );
    let windows = compute_cleaning_windows(&timelines);
    (properties, timelines, windows)
}

#[test]
fn test_list_hides_past_windows() {
    let (properties, _, windows) = fixture();
    let text = render_list(&properties, &windows, date(2, 11), false);
    assert!(!text.contains("URGENT"));
    assert!(text.contains("2 days  Sat 10 Feb → Mon 12 Feb"));
    assert!(text.contains("5 days  Tue 20 Feb → Sun 25 Feb"));

    let later = render_list(&properties, &windows, date(3, 1), false);
    assert!(later.contains("No upcoming cleaning windows"));
}

#[test]
fn test_list_colors_only_when_asked() {
    let (properties, _, windows) = fixture();
    let colored = render_list(&properties, &windows, date(2, 1), true);
    assert!(colored.contains("\x1b[38;2;139;92;246m"));
    assert!(colored.contains("URGENT"));
}

#[test]
fn test_day_status_precedence_and_half_open_ranges() {
    let (_, timelines, windows) = fixture();
    let events = &timelines["studio"].events;
    let windows = &windows["studio"];

    assert_eq!(day_status(date(2, 4), events, windows), DayStatus::Booked);
    // checkout day belongs to the cleaning window
    assert_eq!(
        day_status(date(2, 5), events, windows),
        DayStatus::Cleaning(UrgencyLevel::Urgent)
    );
    assert_eq!(day_status(date(2, 6), events, windows), DayStatus::Booked);
    assert_eq!(
        day_status(date(2, 11), events, windows),
        DayStatus::Cleaning(UrgencyLevel::Warning)
    );
    assert_eq!(
        day_status(date(2, 22), events, windows),
        DayStatus::Cleaning(UrgencyLevel::Normal)
    );
    assert_eq!(day_status(date(3, 5), events, windows), DayStatus::Free);
}

#[test]
fn test_month_grid() {
    let (properties, timelines, windows) = fixture();
    let text = render_month(&properties, &timelines, &windows, 2024, 2, false).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "February 2024");
    assert!(text.contains(" Su  Mo  Tu  We  Th  Fr  Sa"));
    // 1 Feb 2024 is a Thursday: four leading blanks
    assert!(text.contains("                 1#  2#  3#"));
    assert!(text.contains(" 4#  5!  6#  7#  8#  9# 10+"));
    assert!(text.contains("25# 26# 27# 28# 29#"));
    assert!(text.contains("# booked  ! urgent  + warning  ~ normal  . free"));

    assert!(render_month(&properties, &timelines, &windows, 2024, 13, false).is_err());
}

#[test]
fn test_export_uses_dates_for_date_only_windows() {
    let (_, _, windows) = fixture();
    let stamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let ics = export_ics(&windows, stamp);

    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
    assert!(ics.contains("DTSTART;VALUE=DATE:20240205"));
    assert!(ics.contains("DTEND;VALUE=DATE:20240206"));
    assert!(ics.contains("SUMMARY:Cleaning: The Studio (URGENT)"));
    assert!(ics.contains("SUMMARY:Cleaning: The Studio (5 days)"));
    assert_eq!(ics, export_ics(&windows, stamp));
}

#[test]
fn test_window_fields_carry_property_identity() {
    let (_, _, windows) = fixture();
    let first: &CleaningWindow = &windows["studio"][0];
    assert_eq!(first.property_id, "studio");
    assert_eq!(first.property_color, "#8b5cf6");
    assert_eq!(first.days, 1);
}
