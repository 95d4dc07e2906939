//! Booking records: created by authenticated sessions, never mutated or
//! deleted.
//!
//! Ids come from a durable monotonic counter persisted next to the
//! collection (`bookings.seq.json`), so an externally edited or truncated
//! collection can never cause an id to be reused. The counter is advanced
//! before the record is written; a failed append burns an id rather than
//! risking a duplicate.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{RecordStore, StoreError};

/// Collection name for booking records.
const BOOKINGS_COLLECTION: &str = "bookings";

/// Sequence file holding the next booking id.
const BOOKINGS_SEQ: &str = "bookings.seq";

/// Errors from booking creation.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// A required booking field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Store write failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A stored booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: u64,
    pub event_name: String,
    pub customer_name: String,
    pub venue: String,
    pub guests: u32,
    pub theme: String,
    pub requests: String,
    pub created_at: DateTime<Utc>,
}

/// Input for a new booking; the identity gate runs upstream.
#[derive(Debug, Clone, Default)]
pub struct NewBooking {
    pub event_name: String,
    pub customer_name: String,
    pub venue: String,
    pub guests: u32,
    pub theme: String,
    pub requests: String,
}

/// Appends and lists bookings over the `bookings` collection.
#[derive(Debug)]
pub struct BookingRecorder {
    store: RecordStore,
    // Held across the whole load-mutate-save cycle of a create.
    write_lock: Mutex<()>,
}

impl BookingRecorder {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Append a new booking and return the stored record.
    pub fn create(&self, input: NewBooking) -> Result<Booking, BookingError> {
        if input.event_name.trim().is_empty() {
            return Err(BookingError::MissingField("eventName"));
        }
        if input.customer_name.trim().is_empty() {
            return Err(BookingError::MissingField("customerName"));
        }

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut bookings: Vec<Booking> = self.store.load(BOOKINGS_COLLECTION);

        let id = self.next_id(&bookings)?;
        let booking = Booking {
            id,
            event_name: input.event_name,
            customer_name: input.customer_name,
            venue: input.venue,
            guests: input.guests,
            theme: input.theme,
            requests: input.requests,
            created_at: Utc::now(),
        };
        bookings.push(booking.clone());
        self.store.save(BOOKINGS_COLLECTION, &bookings)?;
        tracing::info!("recorded booking {id} for {}", booking.event_name);
        Ok(booking)
    }

    /// All bookings, oldest first. Visibility is not scoped per user.
    pub fn list(&self) -> Vec<Booking> {
        self.store.load(BOOKINGS_COLLECTION)
    }

    /// Claim the next id and persist the advanced counter.
    ///
    /// The counter is clamped to one past the highest stored id, so a
    /// missing counter file is seeded from existing records and an
    /// externally rewound counter can never hand out an id that is
    /// already taken.
    fn next_id(&self, bookings: &[Booking]) -> Result<u64, StoreError> {
        let floor = bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let id = self
            .store
            .load_value::<u64>(BOOKINGS_SEQ)
            .unwrap_or(0)
            .max(floor);
        self.store.save_value(BOOKINGS_SEQ, &(id + 1))?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn recorder() -> (tempfile::TempDir, BookingRecorder) {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path().to_path_buf()).unwrap();
        (tmp, BookingRecorder::new(store))
    }

    fn new_booking(event: &str) -> NewBooking {
        NewBooking {
            event_name: event.to_string(),
            customer_name: "Asha".to_string(),
            venue: "Garden Hall".to_string(),
            guests: 120,
            theme: "Classic".to_string(),
            requests: "Vegetarian menu".to_string(),
        }
    }

    #[test]
    fn ids_start_at_one_and_increment() {
        let (_tmp, recorder) = recorder();
        let first = recorder.create(new_booking("Wedding")).unwrap();
        let second = recorder.create(new_booking("Summit")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn created_booking_is_listed_exactly_once() {
        let (_tmp, recorder) = recorder();
        let booking = recorder.create(new_booking("Wedding")).unwrap();

        let listed = recorder.list();
        assert_eq!(listed, vec![booking]);
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let (_tmp, recorder) = recorder();
        let mut input = new_booking("");
        assert!(matches!(
            recorder.create(input.clone()),
            Err(BookingError::MissingField("eventName"))
        ));

        input.event_name = "Wedding".to_string();
        input.customer_name = "  ".to_string();
        assert!(matches!(
            recorder.create(input),
            Err(BookingError::MissingField("customerName"))
        ));
    }

    #[test]
    fn ids_are_not_reused_after_external_deletion() {
        let (tmp, recorder) = recorder();
        recorder.create(new_booking("Wedding")).unwrap();
        recorder.create(new_booking("Summit")).unwrap();

        // Simulate an external edit wiping the collection file.
        std::fs::write(tmp.path().join("bookings.json"), "[]").unwrap();

        let next = recorder.create(new_booking("Festival")).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn counter_rewound_below_existing_ids_is_clamped() {
        let (tmp, recorder) = recorder();
        recorder.create(new_booking("Wedding")).unwrap();
        recorder.create(new_booking("Summit")).unwrap();

        // Simulate an external edit rewinding the counter while records remain.
        std::fs::write(tmp.path().join("bookings.seq.json"), "1").unwrap();

        let next = recorder.create(new_booking("Festival")).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn counter_is_seeded_from_existing_records() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path().to_path_buf()).unwrap();

        // A pre-counter data dir: records exist, no sequence file.
        let recorder = BookingRecorder::new(store.clone());
        recorder.create(new_booking("Wedding")).unwrap();
        std::fs::remove_file(tmp.path().join("bookings.seq.json")).unwrap();

        let recorder = BookingRecorder::new(store);
        let next = recorder.create(new_booking("Summit")).unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn bookings_survive_recorder_restart() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = RecordStore::new(tmp.path().to_path_buf()).unwrap();
        BookingRecorder::new(store.clone())
            .create(new_booking("Wedding"))
            .unwrap();

        let recorder = BookingRecorder::new(store);
        assert_eq!(recorder.list().len(), 1);
        assert_eq!(recorder.create(new_booking("Summit")).unwrap().id, 2);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let (tmp, recorder) = recorder();
        recorder.create(new_booking("Wedding")).unwrap();

        let raw = std::fs::read_to_string(tmp.path().join("bookings.json")).unwrap();
        assert!(raw.contains("eventName"));
        assert!(raw.contains("customerName"));
        assert!(raw.contains("createdAt"));
    }
}
