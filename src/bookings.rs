// File: ./src/bookings.rs
// Manually entered bookings (owner stays, phone reservations, blocks).
//
// ⚠️ VERSION BUMP REQUIRED:
// Changing the serialized shape of `Booking` requires incrementing
// BOOKINGS_VERSION below.
use crate::context::AppContext;
use crate::model::{Instant, ParsedEvent};
use crate::storage::LocalStorage;
use crate::timeline::MANUAL_SOURCE_LABEL;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BOOKINGS_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    /// Check-in day.
    pub start: NaiveDate,
    /// Check-out day.
    pub end: NaiveDate,
    #[serde(default)]
    pub note: String,
}

impl Booking {
    /// The booking as a date-only timeline event. `None` only if a date has
    /// no local midnight at all.
    pub fn to_event(&self) -> Option<ParsedEvent> {
        Some(ParsedEvent {
            start: Instant::date_only(self.start)?,
            end: Instant::date_only(self.end)?,
            summary: (!self.note.is_empty()).then(|| self.note.clone()),
            uid: Some(self.id.clone()),
            source_label: MANUAL_SOURCE_LABEL.to_string(),
            property_id: self.property_id.clone(),
        })
    }
}

#[derive(Serialize, Deserialize)]
struct BookingFile {
    #[serde(default)]
    version: u32,
    bookings: Vec<Booking>,
}

pub struct BookingStore;

impl BookingStore {
    fn read(path: &Path) -> Result<Vec<Booking>> {
        let Some(json) = LocalStorage::read_optional(path)? else {
            return Ok(Vec::new());
        };
        let data: BookingFile = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse bookings file {:?}", path))?;
        if data.version > BOOKINGS_VERSION {
            bail!(
                "Bookings file {:?} has version {} (this build understands up to {})",
                path,
                data.version,
                BOOKINGS_VERSION
            );
        }
        Ok(data.bookings)
    }

    fn write(path: &Path, bookings: &[Booking]) -> Result<()> {
        let data = BookingFile {
            version: BOOKINGS_VERSION,
            bookings: bookings.to_vec(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        LocalStorage::atomic_write(path, json)
    }

    /// All stored bookings. A missing file is an empty store.
    pub fn load(ctx: &dyn AppContext) -> Result<Vec<Booking>> {
        let path = ctx.get_bookings_path()?;
        LocalStorage::with_lock(&path, || Self::read(&path))
    }

    pub fn save(ctx: &dyn AppContext, bookings: &[Booking]) -> Result<()> {
        let path = ctx.get_bookings_path()?;
        LocalStorage::with_lock(&path, || Self::write(&path, bookings))
    }

    /// Stores a new booking and returns it with its generated id.
    pub fn add(
        ctx: &dyn AppContext,
        property_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        note: &str,
    ) -> Result<Booking> {
        if property_id.trim().is_empty() {
            bail!("A booking needs a property id");
        }
        if end < start {
            bail!("Booking ends ({}) before it starts ({})", end, start);
        }

        let booking = Booking {
            id: uuid::Uuid::new_v4().to_string(),
            property_id: property_id.to_string(),
            start,
            end,
            note: note.trim().to_string(),
        };

        let path = ctx.get_bookings_path()?;
        LocalStorage::with_lock(&path, || {
            let mut bookings = Self::read(&path)?;
            bookings.push(booking.clone());
            Self::write(&path, &bookings)
        })?;

        log::info!("Added booking {} for {}", booking.id, booking.property_id);
        Ok(booking)
    }

    /// Removes the booking with `id`. Returns whether anything was removed.
    pub fn remove(ctx: &dyn AppContext, id: &str) -> Result<bool> {
        let path = ctx.get_bookings_path()?;
        LocalStorage::with_lock(&path, || {
            let mut bookings = Self::read(&path)?;
            let before = bookings.len();
            bookings.retain(|b| b.id != id);
            if bookings.len() == before {
                return Ok(false);
            }
            Self::write(&path, &bookings)?;
            Ok(true)
        })
    }

    pub fn for_property(ctx: &dyn AppContext, property_id: &str) -> Result<Vec<Booking>> {
        let mut bookings = Self::load(ctx)?;
        bookings.retain(|b| b.property_id == property_id);
        Ok(bookings)
    }
}
