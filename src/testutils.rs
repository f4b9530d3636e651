use crate::backend::ScheduleBackend;
use crate::configuration::Configuration;
use crate::error::{BookError, NotificationError, StorageError};
use crate::notifier::Notifier;
use crate::types::{Booking, ContactMessage, NewBooking, NewMessage, Slot};
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

pub struct MockScheduleBackendInner {
    pub success: AtomicBool,
    pub calls_to_available_slots: AtomicU64,
    pub calls_to_add_slot: AtomicU64,
    pub calls_to_book_slot: AtomicU64,
    pub calls_to_bookings: AtomicU64,
    pub calls_to_add_message: AtomicU64,
    pub calls_to_messages: AtomicU64,
}

/// Backend double that records calls and can be switched into failure mode,
/// for driving the HTTP layer without a real store.
#[derive(Clone)]
pub struct MockScheduleBackend(pub Arc<MockScheduleBackendInner>);

impl MockScheduleBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockScheduleBackendInner {
            success: AtomicBool::new(true),
            calls_to_available_slots: AtomicU64::default(),
            calls_to_add_slot: AtomicU64::default(),
            calls_to_book_slot: AtomicU64::default(),
            calls_to_bookings: AtomicU64::default(),
            calls_to_add_message: AtomicU64::default(),
            calls_to_messages: AtomicU64::default(),
        }))
    }

    pub fn set_success(&self, success: bool) {
        self.0.success.store(success, Ordering::SeqCst);
    }

    pub fn calls_to_book_slot(&self) -> u64 {
        self.0.calls_to_book_slot.load(Ordering::SeqCst)
    }

    fn failure(&self) -> Option<StorageError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => None,
            false => Some(StorageError::Backend("supposed to fail".into())),
        }
    }

    fn sample_slot(slot_id: i32) -> Slot {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap();
        Slot {
            id: slot_id,
            start_time: start,
            end_time: end,
            booked: true,
            created_at: start,
            updated_at: start,
        }
    }
}

impl ScheduleBackend for MockScheduleBackend {
    fn available_slots(&self, _day: Option<NaiveDate>) -> Result<Vec<Slot>, StorageError> {
        self.0
            .calls_to_available_slots
            .fetch_add(1, Ordering::SeqCst);
        match self.failure() {
            Some(err) => Err(err),
            None => Ok(vec![]),
        }
    }

    fn add_slot(
        &self,
        start_time: chrono::DateTime<Utc>,
        end_time: chrono::DateTime<Utc>,
    ) -> Result<Slot, StorageError> {
        self.0.calls_to_add_slot.fetch_add(1, Ordering::SeqCst);
        match self.failure() {
            Some(err) => Err(err),
            None => {
                let now = Utc::now();
                Ok(Slot {
                    id: 1,
                    start_time,
                    end_time,
                    booked: false,
                    created_at: now,
                    updated_at: now,
                })
            }
        }
    }

    fn book_slot(&self, slot_id: i32, booking: NewBooking) -> Result<(Slot, Booking), BookError> {
        self.0.calls_to_book_slot.fetch_add(1, Ordering::SeqCst);
        match self.failure() {
            Some(err) => Err(BookError::Storage(err)),
            None => {
                let slot = Self::sample_slot(slot_id);
                let booking = Booking {
                    id: 1,
                    slot_id,
                    name: booking.name,
                    email: booking.email,
                    topic: booking.topic,
                    created_at: slot.created_at,
                    updated_at: slot.created_at,
                };
                Ok((slot, booking))
            }
        }
    }

    fn bookings(&self) -> Result<Vec<Booking>, StorageError> {
        self.0.calls_to_bookings.fetch_add(1, Ordering::SeqCst);
        match self.failure() {
            Some(err) => Err(err),
            None => Ok(vec![]),
        }
    }

    fn add_message(&self, message: NewMessage) -> Result<ContactMessage, StorageError> {
        self.0.calls_to_add_message.fetch_add(1, Ordering::SeqCst);
        match self.failure() {
            Some(err) => Err(err),
            None => Ok(ContactMessage {
                id: 1,
                name: message.name,
                email: message.email,
                message: message.message,
                created_at: Utc::now(),
            }),
        }
    }

    fn messages(&self) -> Result<Vec<ContactMessage>, StorageError> {
        self.0.calls_to_messages.fetch_add(1, Ordering::SeqCst);
        match self.failure() {
            Some(err) => Err(err),
            None => Ok(vec![]),
        }
    }
}

pub struct RecordingNotifierInner {
    pub fail: AtomicBool,
    pub calls: AtomicU64,
}

/// Notifier double counting every dispatch attempt; `failing()` simulates a
/// provider that always rejects.
#[derive(Clone)]
pub struct RecordingNotifier(pub Arc<RecordingNotifierInner>);

impl RecordingNotifier {
    pub fn new() -> Self {
        Self(Arc::new(RecordingNotifierInner {
            fail: AtomicBool::new(false),
            calls: AtomicU64::default(),
        }))
    }

    pub fn failing() -> Self {
        let notifier = Self::new();
        notifier.0.fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn calls(&self) -> u64 {
        self.0.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn booking_confirmed(
        &self,
        _booking: &Booking,
        _slot: &Slot,
    ) -> Result<(), NotificationError> {
        self.0.calls.fetch_add(1, Ordering::SeqCst);
        match self.0.fail.load(Ordering::SeqCst) {
            true => Err(NotificationError::Rejected("supposed to fail".into())),
            false => Ok(()),
        }
    }
}

#[derive(Clone)]
pub struct StubConfiguration;

impl Configuration for StubConfiguration {
    fn port(&self) -> String {
        "0".into()
    }

    fn admin_password(&self) -> String {
        "123".into()
    }

    fn database_url(&self) -> Option<String> {
        None
    }

    fn mail_endpoint(&self) -> Option<String> {
        None
    }

    fn mail_token(&self) -> Option<String> {
        None
    }

    fn sender_address(&self) -> String {
        "noreply@example.com".into()
    }

    fn admin_address(&self) -> String {
        "admin@example.com".into()
    }

    fn site_owner(&self) -> String {
        "Jane Doe".into()
    }
}
