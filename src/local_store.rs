use crate::backend::ScheduleBackend;
use crate::error::{BookError, StorageError};
use crate::types::{day_window, Booking, ContactMessage, NewBooking, NewMessage, Slot};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the database, used when no database is configured
/// and by tests. The whole schedule sits behind one mutex, so every operation
/// is an atomic unit in the same way a transaction is.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    inner: Arc<Mutex<LocalStoreInner>>,
}

#[derive(Debug, Default)]
struct LocalStoreInner {
    slots: BTreeMap<i32, Slot>,
    bookings: Vec<Booking>,
    messages: Vec<ContactMessage>,
    next_slot_id: i32,
    next_booking_id: i32,
    next_message_id: i32,
}

impl ScheduleBackend for LocalStore {
    fn available_slots(&self, day: Option<NaiveDate>) -> Result<Vec<Slot>, StorageError> {
        let (begin, end) = day_window(day);
        let inner = self.inner.lock().unwrap();
        let mut slots: Vec<Slot> = inner
            .slots
            .values()
            .filter(|slot| !slot.booked && slot.start_time >= begin && slot.start_time <= end)
            .cloned()
            .collect();
        slots.sort_by_key(|slot| slot.start_time);
        Ok(slots)
    }

    fn add_slot(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Slot, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_slot_id += 1;
        let now = Utc::now();
        let slot = Slot {
            id: inner.next_slot_id,
            start_time,
            end_time,
            booked: false,
            created_at: now,
            updated_at: now,
        };
        inner.slots.insert(slot.id, slot.clone());
        Ok(slot)
    }

    fn book_slot(&self, slot_id: i32, booking: NewBooking) -> Result<(Slot, Booking), BookError> {
        let mut inner = self.inner.lock().unwrap();
        let now = Utc::now();

        let slot = match inner.slots.get_mut(&slot_id) {
            Some(slot) if !slot.booked => slot,
            _ => return Err(BookError::SlotUnavailable),
        };
        slot.booked = true;
        slot.updated_at = now;
        let slot = slot.clone();

        inner.next_booking_id += 1;
        let booking = Booking {
            id: inner.next_booking_id,
            slot_id: slot.id,
            name: booking.name,
            email: booking.email,
            topic: booking.topic,
            created_at: now,
            updated_at: now,
        };
        inner.bookings.push(booking.clone());

        Ok((slot, booking))
    }

    fn bookings(&self) -> Result<Vec<Booking>, StorageError> {
        Ok(self.inner.lock().unwrap().bookings.clone())
    }

    fn add_message(&self, message: NewMessage) -> Result<ContactMessage, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_message_id += 1;
        let stored = ContactMessage {
            id: inner.next_message_id,
            name: message.name,
            email: message.email,
            message: message.message,
            created_at: Utc::now(),
        };
        inner.messages.push(stored.clone());
        Ok(stored)
    }

    fn messages(&self) -> Result<Vec<ContactMessage>, StorageError> {
        Ok(self.inner.lock().unwrap().messages.clone())
    }
}
