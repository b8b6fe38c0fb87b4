// File: ./src/view/month.rs
use crate::color_utils;
use crate::model::{CleaningWindow, Instant, ParsedEvent, PropertySpec, UrgencyLevel};
use crate::timeline::Timelines;
use crate::view::property_header;
use crate::windows::WindowsByProperty;
use anyhow::{Context, Result, anyhow, bail};
use chrono::{Datelike, Months, NaiveDate};
use std::fmt::Write;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Booked,
    Cleaning(UrgencyLevel),
    Free,
}

impl DayStatus {
    pub fn marker(&self) -> char {
        match self {
            DayStatus::Booked => '#',
            DayStatus::Cleaning(UrgencyLevel::Urgent) => '!',
            DayStatus::Cleaning(UrgencyLevel::Warning) => '+',
            DayStatus::Cleaning(UrgencyLevel::Normal) => '~',
            DayStatus::Free => '.',
        }
    }
}

fn covers(start: &Instant, end: &Instant, day: NaiveDate) -> bool {
    start.local_date() <= day && day < end.local_date()
}

/// Booked wins over cleaning; the first matching window decides the level.
pub fn day_status(day: NaiveDate, events: &[ParsedEvent], windows: &[CleaningWindow]) -> DayStatus {
    if events.iter().any(|e| covers(&e.start, &e.end, day)) {
        return DayStatus::Booked;
    }
    windows
        .iter()
        .find(|w| covers(&w.start, &w.end, day))
        .map_or(DayStatus::Free, |w| DayStatus::Cleaning(w.urgency_level))
}

/// Parses "YYYY-MM".
pub fn parse_month_arg(arg: &str) -> Result<(i32, u32)> {
    let (y, m) = arg
        .trim()
        .split_once('-')
        .ok_or_else(|| anyhow!("Expected a month like 2024-01, got '{}'", arg))?;
    let year: i32 = y.parse().with_context(|| format!("Invalid year '{}'", y))?;
    let month: u32 = m.parse().with_context(|| format!("Invalid month '{}'", m))?;
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        bail!("Invalid month '{}'", arg);
    }
    Ok((year, month))
}

fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

fn paint(status: DayStatus, accent: Option<(u8, u8, u8)>, color: bool) -> String {
    let marker = status.marker().to_string();
    if !color {
        return marker;
    }
    match status {
        DayStatus::Booked => accent.map_or(marker.clone(), |rgb| color_utils::ansi_fg(rgb, &marker)),
        DayStatus::Cleaning(level) => color_utils::ansi_fg(color_utils::urgency_rgb(level), &marker),
        DayStatus::Free => marker,
    }
}

/// One Sunday-first grid per property for the given month.
pub fn render_month(
    properties: &[PropertySpec],
    timelines: &Timelines,
    windows: &WindowsByProperty,
    year: i32,
    month: u32,
    color: bool,
) -> Result<String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow!("Invalid month {}-{:02}", year, month))?;
    let leading = first.weekday().num_days_from_sunday() as usize;
    let day_count = days_in_month(first);

    let mut out = String::new();
    let _ = writeln!(out, "{}\n", first.format("%B %Y"));

    for property in properties {
        let accent_hex = property.display_color();
        let accent = color_utils::parse_hex_to_u8(&accent_hex);
        let events = timelines
            .get(&property.id)
            .map_or(&[][..], |t| t.events.as_slice());
        let property_windows = windows.get(&property.id).map_or(&[][..], |w| w.as_slice());

        let _ = writeln!(out, "{}", property_header(&property.name, &accent_hex, color));
        let header: Vec<String> = WEEKDAYS.iter().map(|d| format!("{:>3}", d)).collect();
        let _ = writeln!(out, "{}", header.join(" "));

        let mut cells: Vec<String> = vec!["   ".to_string(); leading];
        for d in 1..=day_count {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, d) else {
                continue;
            };
            let status = day_status(date, events, property_windows);
            cells.push(format!("{:>2}{}", d, paint(status, accent, color)));
        }

        for week in cells.chunks(7) {
            let _ = writeln!(out, "{}", week.join(" ").trim_end());
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "{} booked  {} urgent  {} warning  {} normal  {} free",
        DayStatus::Booked.marker(),
        DayStatus::Cleaning(UrgencyLevel::Urgent).marker(),
        DayStatus::Cleaning(UrgencyLevel::Warning).marker(),
        DayStatus::Cleaning(UrgencyLevel::Normal).marker(),
        DayStatus::Free.marker()
    );
    Ok(out)
}
