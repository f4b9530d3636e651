use crate::error::{BookError, StorageError};
use crate::types::{Booking, ContactMessage, NewBooking, NewMessage, Slot};
use chrono::{DateTime, NaiveDate, Utc};

/// Storage seam for the schedule. `book_slot` is the only operation with a
/// non-trivial contract: the check-and-book must run as one atomic unit so
/// that concurrent requests for the same slot produce exactly one booking.
pub trait ScheduleBackend: Clone + Send + Sync + 'static {
    /// Unbooked slots, optionally restricted to one local calendar day,
    /// ordered by start time ascending.
    fn available_slots(&self, day: Option<NaiveDate>) -> Result<Vec<Slot>, StorageError>;
    fn add_slot(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Slot, StorageError>;
    /// Atomically marks the slot as booked and inserts the booking row.
    /// Fails with `BookError::SlotUnavailable` when the slot is missing or
    /// already booked, leaving no partial state behind.
    fn book_slot(&self, slot_id: i32, booking: NewBooking) -> Result<(Slot, Booking), BookError>;
    fn bookings(&self) -> Result<Vec<Booking>, StorageError>;
    fn add_message(&self, message: NewMessage) -> Result<ContactMessage, StorageError>;
    fn messages(&self) -> Result<Vec<ContactMessage>, StorageError>;
}
