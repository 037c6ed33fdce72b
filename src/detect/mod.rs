//! Protective equipment detection: request parameters, the service's result
//! model, and the vision service collaborator.

mod backends;
mod request;
mod result;
mod service;

pub use backends::{RecordedVisionService, StubVisionService};
pub use request::{DetectionRequestConfig, EquipmentType, DEFAULT_MIN_CONFIDENCE};
pub use result::{
    BodyPart, BodyPartName, BoundingBox, CoversBodyPart, DetectionResult, DetectionSummary,
    EquipmentItem, Person,
};
pub use service::VisionService;

pub(crate) use request::{validate_min_confidence, validate_required_types};
