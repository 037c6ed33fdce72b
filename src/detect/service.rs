use crate::error::Result;

use super::request::DetectionRequestConfig;
use super::result::DetectionResult;

/// Vision service collaborator.
///
/// Implementations perform the protective equipment detection call for the
/// image named by the request. Retries, authentication and rate limiting are
/// the implementation's concern; failures surface as `PpeError::Service`.
pub trait VisionService {
    /// Service identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Run protective equipment detection for one image.
    fn detect_protective_equipment(
        &mut self,
        request: &DetectionRequestConfig,
    ) -> Result<DetectionResult>;
}
