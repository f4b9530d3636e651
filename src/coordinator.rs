use crate::backend::ScheduleBackend;
use crate::error::BookError;
use crate::notifier::Notifier;
use crate::types::{Booking, NewBooking};
use tracing::error;

/// The reservation flow: one atomic check-and-book against the store, then a
/// detached confirmation dispatch that can never undo the committed booking.
#[derive(Clone)]
pub struct BookingCoordinator<B, N> {
    backend: B,
    notifier: N,
}

impl<B: ScheduleBackend, N: Notifier> BookingCoordinator<B, N> {
    pub fn new(backend: B, notifier: N) -> Self {
        Self { backend, notifier }
    }

    /// Reserves the slot for the requester. The returned booking is already
    /// committed; confirmation delivery happens in the background and its
    /// failures stay in the logs.
    pub fn reserve(&self, slot_id: i32, booking: NewBooking) -> Result<Booking, BookError> {
        let (slot, booking) = self.backend.book_slot(slot_id, booking)?;

        let notifier = self.notifier.clone();
        let confirmed = booking.clone();
        tokio::spawn(async move {
            if let Err(err) = notifier.booking_confirmed(&confirmed, &slot).await {
                error!(
                    ?err,
                    "Failed to deliver confirmation for booking {}", confirmed.id
                );
            }
        });

        Ok(booking)
    }
}
