// File: ./src/model/property.rs
use crate::color_utils;
use serde::{Deserialize, Serialize};

/// One booking channel of a property (Airbnb, Booking.com, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFeedRef {
    pub label: String,
    /// Where the feed lives. Usually an https URL.
    #[serde(alias = "locator")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub calendars: Vec<CalendarFeedRef>,
}

impl PropertySpec {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: None,
            calendars: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_feed(mut self, label: &str, url: &str) -> Self {
        self.calendars.push(CalendarFeedRef {
            label: label.to_string(),
            url: url.to_string(),
        });
        self
    }

    /// Configured color, or a stable one derived from the id.
    pub fn display_color(&self) -> String {
        match &self.color {
            Some(c) if color_utils::parse_hex_to_u8(c).is_some() => c.clone(),
            _ => {
                let (r, g, b) = color_utils::generate_color(&self.id);
                color_utils::floats_to_hex(r, g, b)
            }
        }
    }
}
