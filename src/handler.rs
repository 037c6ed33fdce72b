//! Invocation handler: one upload event in, one report dispatched.

use crate::config::{DetectionSettings, MailSettings};
use crate::detect::VisionService;
use crate::error::Result;
use crate::notify;
use crate::report;
use crate::storage::ObjectStore;
use crate::transport::{NotificationTransport, UploadEvent};

/// Runs the detection pipeline for one upload event at a time.
///
/// Nothing is carried between invocations beyond the collaborators
/// themselves.
pub struct Handler<S, V, N> {
    store: S,
    vision: V,
    transport: N,
    detection: DetectionSettings,
    mail: MailSettings,
}

impl<S, V, N> Handler<S, V, N>
where
    S: ObjectStore,
    V: VisionService,
    N: NotificationTransport,
{
    pub fn new(
        store: S,
        vision: V,
        transport: N,
        detection: DetectionSettings,
        mail: MailSettings,
    ) -> Self {
        Self {
            store,
            vision,
            transport,
            detection,
            mail,
        }
    }

    /// Process one event and return the content type of the uploaded object.
    ///
    /// The report is fully built before anything is logged or sent; a
    /// failure before that point leaves no side effects behind.
    pub fn handle(&mut self, event: &UploadEvent) -> Result<String> {
        log::info!("received upload event bucket={} key={}", event.bucket, event.key);

        let object = self
            .store
            .get_object(&event.bucket, &event.key)
            .inspect_err(|e| {
                log::error!(
                    "error getting object {} from bucket {}: {}",
                    event.key,
                    event.bucket,
                    e
                )
            })?;
        log::info!(
            "content type: {}, image: {}, {} bytes",
            object.content_type,
            object.key,
            object.bytes.len()
        );

        let request = self.detection.request_for(&object.key, &event.bucket)?;
        let result = self
            .vision
            .detect_protective_equipment(&request)
            .inspect_err(|e| {
                log::error!(
                    "{} vision service failed for {}: {}",
                    self.vision.name(),
                    object.key,
                    e
                )
            })?;

        let report = report::interpret(&object.key, &result)?;
        log::info!(
            "{}: {} persons, {} with required equipment, {} without, {} indeterminate",
            report.subject,
            report.counts.persons,
            report.counts.with_required_equipment,
            report.counts.without_required_equipment,
            report.counts.indeterminate
        );
        log::debug!("report text:\n{}", report.plain_text);

        let message = notify::assemble(&report, &self.mail.from, &self.mail.to)?;
        let receipt = self.transport.send(&message).inspect_err(|e| {
            log::error!("{} transport failed: {}", self.transport.name(), e)
        })?;
        log::info!(
            "notification {} sent to {} via {}",
            receipt.message_id,
            message.to,
            self.transport.name()
        );

        Ok(object.content_type)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn vision(&self) -> &V {
        &self.vision
    }

    pub fn transport(&self) -> &N {
        &self.transport
    }
}
