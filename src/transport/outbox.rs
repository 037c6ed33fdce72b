use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PpeError, Result};
use crate::notify::NotificationMessage;

use super::{message_id, DeliveryReceipt, NotificationTransport};

/// Transport that writes each message to `<dir>/<message_id>.json`.
///
/// A relay process picks messages up from the outbox; this crate never
/// opens a network connection to deliver mail.
pub struct OutboxTransport {
    dir: PathBuf,
}

impl OutboxTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl NotificationTransport for OutboxTransport {
    fn name(&self) -> &'static str {
        "outbox"
    }

    fn send(&mut self, message: &NotificationMessage) -> Result<DeliveryReceipt> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            PpeError::delivery(format!(
                "failed to create outbox {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let id = message_id(message);
        let path = self.dir.join(format!("{}.json", id));
        let json = serde_json::to_vec_pretty(message)
            .map_err(|e| PpeError::delivery(format!("failed to encode message: {}", e)))?;

        // Write then rename so relays never observe a partial file.
        let tmp = self.dir.join(format!("{}.json.tmp", id));
        fs::write(&tmp, &json).map_err(|e| {
            PpeError::delivery(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            PpeError::delivery(format!("failed to publish {}: {}", path.display(), e))
        })?;

        Ok(DeliveryReceipt { message_id: id })
    }
}
