// Tests for the manual booking store.
use chrono::NaiveDate;
use std::sync::{Arc, Barrier};
use std::thread;
use turnover::bookings::{Booking, BookingStore};
use turnover::context::{AppContext, TestContext};
use turnover::model::Precision;
use turnover::timeline::MANUAL_SOURCE_LABEL;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

#[test]
fn test_missing_file_is_empty_store() {
    let ctx = TestContext::new();
    assert!(BookingStore::load(&ctx).unwrap().is_empty());
}

#[test]
fn test_add_remove_roundtrip() {
    let ctx = TestContext::new();
    let a = BookingStore::add(&ctx, "studio", date(7, 1), date(7, 4), "  Owner stay ").unwrap();
    let b = BookingStore::add(&ctx, "loft", date(7, 2), date(7, 3), "").unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(a.note, "Owner stay");

    let all = BookingStore::load(&ctx).unwrap();
    assert_eq!(all, vec![a.clone(), b.clone()]);
    assert_eq!(BookingStore::for_property(&ctx, "loft").unwrap(), vec![b.clone()]);

    assert!(BookingStore::remove(&ctx, &a.id).unwrap());
    assert!(!BookingStore::remove(&ctx, &a.id).unwrap());
    assert_eq!(BookingStore::load(&ctx).unwrap(), vec![b]);
}

#[test]
fn test_rejects_reversed_dates_and_empty_property() {
    let ctx = TestContext::new();
    assert!(BookingStore::add(&ctx, "studio", date(7, 4), date(7, 1), "").is_err());
    assert!(BookingStore::add(&ctx, "  ", date(7, 1), date(7, 4), "").is_err());
    assert!(BookingStore::load(&ctx).unwrap().is_empty());
}

#[test]
fn test_newer_file_version_is_refused() {
    let ctx = TestContext::new();
    let path = ctx.get_bookings_path().unwrap();
    std::fs::write(&path, r#"{"version": 99, "bookings": []}"#).unwrap();
    assert!(BookingStore::load(&ctx).is_err());
}

#[test]
fn test_booking_becomes_date_only_event() {
    let booking = Booking {
        id: "b1".to_string(),
        property_id: "studio".to_string(),
        start: date(7, 1),
        end: date(7, 4),
        note: String::new(),
    };
    let event = booking.to_event().unwrap();
    assert_eq!(event.source_label, MANUAL_SOURCE_LABEL);
    assert_eq!(event.property_id, "studio");
    assert_eq!(event.uid.as_deref(), Some("b1"));
    assert_eq!(event.summary, None);
    assert_eq!(event.start.precision(), Precision::DateOnly);
    assert_eq!(event.start.local_date(), date(7, 1));
    assert_eq!(event.end.local_date(), date(7, 4));
}

#[test]
fn test_concurrent_adds_are_not_lost() {
    let ctx = Arc::new(TestContext::new());
    let thread_count = 8;
    let barrier = Arc::new(Barrier::new(thread_count));

    let handles: Vec<_> = (0..thread_count)
        .map(|i| {
            let ctx = ctx.clone();
            let b = barrier.clone();
            thread::spawn(move || {
                b.wait();
                BookingStore::add(ctx.as_ref(), "studio", date(8, 1), date(8, 2), &format!("n{}", i))
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(BookingStore::load(ctx.as_ref()).unwrap().len(), thread_count);
}
