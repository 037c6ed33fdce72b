use crate::detect::request::DetectionRequestConfig;
use crate::detect::result::DetectionResult;
use crate::detect::service::VisionService;
use crate::error::{PpeError, Result};

/// Stub vision service for testing.
///
/// Answers every request with the same result, or fails every request with a
/// service error. Requests are kept so callers can inspect them.
pub struct StubVisionService {
    response: std::result::Result<DetectionResult, String>,
    requests: Vec<DetectionRequestConfig>,
}

impl StubVisionService {
    pub fn new(result: DetectionResult) -> Self {
        Self {
            response: Ok(result),
            requests: Vec::new(),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(reason.to_string()),
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[DetectionRequestConfig] {
        &self.requests
    }
}

impl Default for StubVisionService {
    fn default() -> Self {
        Self::new(DetectionResult::default())
    }
}

impl VisionService for StubVisionService {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect_protective_equipment(
        &mut self,
        request: &DetectionRequestConfig,
    ) -> Result<DetectionResult> {
        self.requests.push(request.clone());
        match &self.response {
            Ok(result) => Ok(result.clone()),
            Err(reason) => Err(PpeError::service(reason.clone())),
        }
    }
}
