//! Upload event parsing.
//!
//! Object stores publish upload notifications as
//! `{ "Records": [{ "eventName": "...", "s3": { "bucket": {...}, "object": {...} } }] }`.
//! Only the first record is used: one invocation handles one image.

use serde::Deserialize;

use crate::error::{PpeError, Result};

/// Notification document published by the object store.
#[derive(Debug, Deserialize)]
pub struct UploadNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<UploadRecord>,
}

#[derive(Debug, Deserialize)]
pub struct UploadRecord {
    /// Event name, e.g. "ObjectCreated:Put"
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,

    pub s3: Option<S3Entity>,
}

#[derive(Debug, Deserialize)]
pub struct S3Entity {
    pub bucket: Option<BucketEntity>,
    pub object: Option<ObjectEntity>,
}

#[derive(Debug, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectEntity {
    /// URL-encoded object key
    pub key: String,

    #[serde(default)]
    pub size: Option<u64>,
}

/// The bucket/key pair one invocation runs on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadEvent {
    pub bucket: String,
    pub key: String,
}

/// Parse an upload notification payload.
///
/// Returns an error if:
/// - The JSON is malformed
/// - There are no records
/// - The first record is not an object-created event
/// - The bucket name or object key is missing or empty
pub fn parse_upload_event(payload: &[u8]) -> Result<UploadEvent> {
    let notification: UploadNotification = serde_json::from_slice(payload)
        .map_err(|e| PpeError::configuration(format!("event parse error: {}", e)))?;

    let record = notification
        .records
        .into_iter()
        .next()
        .ok_or_else(|| PpeError::configuration("event carries no records"))?;

    if let Some(name) = record.event_name.as_deref() {
        if !name.starts_with("ObjectCreated") {
            return Err(PpeError::configuration(format!(
                "event '{}' is not an upload",
                name
            )));
        }
    }

    let s3 = record
        .s3
        .ok_or_else(|| PpeError::configuration("missing 's3' section in event record"))?;
    let bucket = s3
        .bucket
        .map(|bucket| bucket.name)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| PpeError::configuration("event record has no bucket name"))?;
    let key = s3
        .object
        .map(|object| decode_key(&object.key))
        .filter(|key| !key.is_empty())
        .ok_or_else(|| PpeError::configuration("event record has no object key"))?;

    Ok(UploadEvent { bucket, key })
}

/// Decode a notification object key (`+` for space, percent escapes).
pub fn decode_key(raw: &str) -> String {
    url::form_urlencoded::parse(raw.as_bytes())
        .map(|(name, value)| {
            if value.is_empty() {
                name.into_owned()
            } else {
                format!("{}={}", name, value)
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
