//! Vision service that replays recorded detection responses.
//!
//! Responses are stored as the service's JSON documents at
//! `<root>/<bucket>/<photo>.json`. This lets the pipeline run end to end
//! against captured responses without a live service account.

use std::path::{Component, Path, PathBuf};

use crate::detect::request::DetectionRequestConfig;
use crate::detect::result::DetectionResult;
use crate::detect::service::VisionService;
use crate::error::{PpeError, Result};

pub struct RecordedVisionService {
    root: PathBuf,
}

impl RecordedVisionService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn recording_path(&self, bucket: &str, photo: &str) -> Result<PathBuf> {
        let relative = Path::new(bucket).join(format!("{}.json", photo));
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(PpeError::service(format!(
                "refusing recording path outside root for {}/{}",
                bucket, photo
            )));
        }
        Ok(self.root.join(relative))
    }
}

impl VisionService for RecordedVisionService {
    fn name(&self) -> &'static str {
        "recorded"
    }

    fn detect_protective_equipment(
        &mut self,
        request: &DetectionRequestConfig,
    ) -> Result<DetectionResult> {
        let path = self.recording_path(request.bucket_id(), request.photo_id())?;
        let raw = std::fs::read(&path).map_err(|e| {
            PpeError::service(format!(
                "no detection recording at {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_slice(&raw).map_err(|e| {
            PpeError::service(format!(
                "invalid detection response {}: {}",
                path.display(),
                e
            ))
        })
    }
}
