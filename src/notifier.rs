use crate::configuration::Configuration;
use crate::error::NotificationError;
use crate::types::{Booking, Slot};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::info;

/// Confirmation channel injected into the booking coordinator. Implementations
/// must be swappable without touching booking logic.
#[async_trait]
pub trait Notifier: Clone + Send + Sync + 'static {
    async fn booking_confirmed(&self, booking: &Booking, slot: &Slot)
        -> Result<(), NotificationError>;
}

/// Used when no mail provider is configured. Bookings still succeed,
/// confirmations only show up in the logs.
#[derive(Debug, Clone)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn booking_confirmed(
        &self,
        booking: &Booking,
        _slot: &Slot,
    ) -> Result<(), NotificationError> {
        info!(
            "Mail delivery disabled, skipping confirmation for booking {}",
            booking.id
        );
        Ok(())
    }
}

/// Sends confirmations through an HTTP mail provider: one message to the
/// requester and one to the admin address.
#[derive(Clone)]
pub struct MailApiNotifier {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    sender_address: String,
    admin_address: String,
    site_owner: String,
}

impl MailApiNotifier {
    // A hanging provider must not pin background tasks indefinitely.
    const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(
        endpoint: String,
        token: String,
        sender_address: String,
        admin_address: String,
        site_owner: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            token,
            sender_address,
            admin_address,
            site_owner,
        }
    }

    /// Mail delivery is optional; both the endpoint and the token have to be
    /// configured for it to be enabled.
    pub fn from_configuration<C: Configuration>(configuration: &C) -> Option<Self> {
        let endpoint = configuration.mail_endpoint()?;
        let token = configuration.mail_token()?;
        Some(Self::new(
            endpoint,
            token,
            configuration.sender_address(),
            configuration.admin_address(),
            configuration.site_owner(),
        ))
    }

    async fn send(&self, to: &str, subject: String, html: String) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(Self::DISPATCH_TIMEOUT)
            .bearer_auth(&self.token)
            .json(&json!({
                "from": self.sender_address,
                "to": to,
                "subject": subject,
                "html": html,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotificationError::Rejected(format!(
                "status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for MailApiNotifier {
    async fn booking_confirmed(
        &self,
        booking: &Booking,
        slot: &Slot,
    ) -> Result<(), NotificationError> {
        let date = slot.start_time.format("%Y-%m-%d");
        let window = format!(
            "{} - {}",
            slot.start_time.format("%H:%M"),
            slot.end_time.format("%H:%M")
        );

        let requester = self.send(
            &booking.email,
            format!("Meeting confirmation with {}", self.site_owner),
            format!(
                "<h2>Meeting confirmation</h2>\
                 <p>Dear {},</p>\
                 <p>Your meeting with {} has been confirmed for:</p>\
                 <p><strong>Date:</strong> {date}</p>\
                 <p><strong>Time:</strong> {window} (UTC)</p>\
                 <p><strong>Topic:</strong> {}</p>",
                booking.name, self.site_owner, booking.topic
            ),
        );
        let admin = self.send(
            &self.admin_address,
            format!("New meeting: {} - {date}", booking.name),
            format!(
                "<h2>New meeting scheduled</h2>\
                 <p><strong>With:</strong> {} ({})</p>\
                 <p><strong>Time:</strong> {date} {window} (UTC)</p>\
                 <p><strong>Topic:</strong> {}</p>",
                booking.name, booking.email, booking.topic
            ),
        );

        futures::try_join!(requester, admin)?;
        Ok(())
    }
}
