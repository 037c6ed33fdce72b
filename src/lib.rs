//! PPE Witness
//!
//! This crate reacts to an image upload, asks a vision service for personal
//! protective equipment (PPE) detection on that image, and turns the answer
//! into a plain text and HTML report that is dispatched as a notification.
//!
//! # Pipeline
//!
//! 1. **Fetch**: the uploaded object is read from the object store.
//! 2. **Request**: detection parameters are built and validated.
//! 3. **Detect**: the vision service returns persons, body parts, equipment
//!    and a compliance summary.
//! 4. **Interpret**: the result is rendered into an immutable `Report`.
//! 5. **Notify**: the report is addressed and handed to the transport.
//!
//! Object store, vision service and notification transport are collaborators
//! behind traits. Interpretation and assembly are pure.
//!
//! # Module Structure
//!
//! - `detect`: request parameters, result model, vision service trait
//! - `report`: the detection result interpreter
//! - `notify`: notification assembly
//! - `storage`: object store collaborator
//! - `transport`: upload events and notification transports
//! - `handler`: the per-event pipeline
//! - `config`: file and environment configuration

pub mod config;
pub mod detect;
pub mod error;
pub mod handler;
pub mod notify;
pub mod report;
pub mod storage;
pub mod transport;

pub use config::HandlerConfig;
pub use detect::{
    BodyPart, BodyPartName, BoundingBox, CoversBodyPart, DetectionRequestConfig, DetectionResult,
    DetectionSummary, EquipmentItem, EquipmentType, Person, RecordedVisionService,
    StubVisionService, VisionService, DEFAULT_MIN_CONFIDENCE,
};
pub use error::{PpeError, Result};
pub use handler::Handler;
pub use notify::{assemble, NotificationMessage};
pub use report::{interpret, Report, SummaryCategory, SummaryCounts};
pub use storage::{FilesystemObjectStore, InMemoryObjectStore, ObjectStore, StoredObject};
pub use transport::{
    parse_upload_event, DeliveryReceipt, NotificationTransport, OutboxTransport,
    RecordingTransport, UploadEvent,
};
