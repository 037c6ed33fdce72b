//! Transport layer: the upload event source and notification delivery.
//!
//! This module parses object-store upload notifications into the
//! `{bucket, key}` pair an invocation runs on, and defines the notification
//! transport collaborator with its local implementations.

pub mod event;
mod outbox;

pub use event::{parse_upload_event, UploadEvent};
pub use outbox::OutboxTransport;

use sha2::{Digest, Sha256};

use crate::error::{PpeError, Result};
use crate::notify::NotificationMessage;

/// Acknowledgement returned by a transport for a delivered message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

/// Notification transport collaborator.
pub trait NotificationTransport {
    /// Transport identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Deliver one message. Failures surface as `PpeError::Delivery`.
    fn send(&mut self, message: &NotificationMessage) -> Result<DeliveryReceipt>;
}

/// Content digest of a message, hex encoded.
///
/// Each field is length-prefixed so distinct messages never share a digest
/// input.
pub fn message_id(message: &NotificationMessage) -> String {
    let mut hasher = Sha256::new();
    for field in [
        &message.from,
        &message.to,
        &message.subject,
        &message.text_body,
        &message.html_body,
    ] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Transport that keeps delivered messages in memory.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Vec<NotificationMessage>,
    failure: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that rejects every message.
    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Vec::new(),
            failure: Some(reason.to_string()),
        }
    }

    pub fn sent(&self) -> &[NotificationMessage] {
        &self.sent
    }
}

impl NotificationTransport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn send(&mut self, message: &NotificationMessage) -> Result<DeliveryReceipt> {
        if let Some(reason) = &self.failure {
            return Err(PpeError::delivery(reason.clone()));
        }
        self.sent.push(message.clone());
        Ok(DeliveryReceipt {
            message_id: message_id(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(subject: &str) -> NotificationMessage {
        NotificationMessage {
            from: "a@example.com".to_string(),
            to: "b@example.com".to_string(),
            subject: subject.to_string(),
            text_body: "body".to_string(),
            html_body: "<p>body</p>".to_string(),
        }
    }

    #[test]
    fn message_id_is_stable_and_content_bound() {
        let id = message_id(&message("one"));
        assert_eq!(id.len(), 64);
        assert_eq!(id, message_id(&message("one")));
        assert_ne!(id, message_id(&message("two")));
    }

    #[test]
    fn recording_transport_keeps_messages() {
        let mut transport = RecordingTransport::new();
        let receipt = transport.send(&message("s")).unwrap();
        assert_eq!(receipt.message_id, message_id(&message("s")));
        assert_eq!(transport.sent().len(), 1);
    }

    #[test]
    fn failing_transport_reports_delivery_error() {
        let mut transport = RecordingTransport::failing("mailbox full");
        let err = transport.send(&message("s")).unwrap_err();
        assert!(matches!(err, PpeError::Delivery { .. }));
        assert!(transport.sent().is_empty());
    }
}
