// File: ./src/model/mod.rs
pub mod event;
pub mod instant;
pub mod property;
pub mod window;

pub use event::{EventRecord, ParsedEvent};
pub use instant::{Instant, Origin, Precision};
pub use property::{CalendarFeedRef, PropertySpec};
pub use window::{CleaningWindow, UrgencyLevel};
