use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{PpeError, Result};

/// Minimum confidence the vision service applies when summarizing persons.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 80.0;

/// Protective equipment types the vision service can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentType {
    FaceCover,
    HandCover,
    HeadCover,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 3] = [
        EquipmentType::FaceCover,
        EquipmentType::HandCover,
        EquipmentType::HeadCover,
    ];

    /// Wire name, as used by the vision service.
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::FaceCover => "FACE_COVER",
            EquipmentType::HandCover => "HAND_COVER",
            EquipmentType::HeadCover => "HEAD_COVER",
        }
    }

    /// Parse a wire name. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(name: &str) -> Result<Self> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PpeError::configuration(format!("unknown equipment type '{}'", wanted)))
    }

    /// The full set of equipment types, required by default.
    pub fn all() -> BTreeSet<EquipmentType> {
        Self::ALL.into_iter().collect()
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one protective equipment detection call.
///
/// Constructed once per invocation through [`DetectionRequestConfig::build`],
/// which rejects out-of-range thresholds and empty equipment sets.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionRequestConfig {
    photo_id: String,
    bucket_id: String,
    min_confidence: f32,
    required_equipment_types: BTreeSet<EquipmentType>,
}

impl DetectionRequestConfig {
    pub fn build(
        photo_id: &str,
        bucket_id: &str,
        min_confidence: f32,
        required_equipment_types: BTreeSet<EquipmentType>,
    ) -> Result<Self> {
        if photo_id.is_empty() {
            return Err(PpeError::configuration("photo id must not be empty"));
        }
        if bucket_id.is_empty() {
            return Err(PpeError::configuration("bucket id must not be empty"));
        }
        validate_min_confidence(min_confidence)?;
        validate_required_types(&required_equipment_types)?;
        Ok(Self {
            photo_id: photo_id.to_string(),
            bucket_id: bucket_id.to_string(),
            min_confidence,
            required_equipment_types,
        })
    }

    /// Build with the default threshold and all equipment types required.
    pub fn with_defaults(photo_id: &str, bucket_id: &str) -> Result<Self> {
        Self::build(
            photo_id,
            bucket_id,
            DEFAULT_MIN_CONFIDENCE,
            EquipmentType::all(),
        )
    }

    pub fn photo_id(&self) -> &str {
        &self.photo_id
    }

    pub fn bucket_id(&self) -> &str {
        &self.bucket_id
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    pub fn required_equipment_types(&self) -> &BTreeSet<EquipmentType> {
        &self.required_equipment_types
    }

    /// Request document in the vision service's wire shape.
    pub fn to_request_body(&self) -> serde_json::Value {
        let body = RequestBody {
            image: ImageRef {
                s3_object: S3ObjectRef {
                    bucket: &self.bucket_id,
                    name: &self.photo_id,
                },
            },
            summarization_attributes: SummarizationAttributes {
                min_confidence: self.min_confidence,
                required_equipment_types: self.required_equipment_types.iter().copied().collect(),
            },
        };
        serde_json::json!(body)
    }
}

pub(crate) fn validate_min_confidence(min_confidence: f32) -> Result<()> {
    if !(0.0..=100.0).contains(&min_confidence) {
        return Err(PpeError::configuration(format!(
            "min confidence must lie in [0, 100], got {}",
            min_confidence
        )));
    }
    Ok(())
}

pub(crate) fn validate_required_types(types: &BTreeSet<EquipmentType>) -> Result<()> {
    if types.is_empty() {
        return Err(PpeError::configuration(
            "at least one required equipment type must be given",
        ));
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct RequestBody<'a> {
    image: ImageRef<'a>,
    summarization_attributes: SummarizationAttributes,
}

#[derive(Serialize)]
struct ImageRef<'a> {
    #[serde(rename = "S3Object")]
    s3_object: S3ObjectRef<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct S3ObjectRef<'a> {
    bucket: &'a str,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SummarizationAttributes {
    min_confidence: f32,
    required_equipment_types: Vec<EquipmentType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_require_all_equipment() {
        let cfg = DetectionRequestConfig::with_defaults("worker.jpg", "uploads").unwrap();
        assert_eq!(cfg.min_confidence(), 80.0);
        assert_eq!(cfg.required_equipment_types().len(), 3);
    }

    #[test]
    fn confidence_above_range_rejected() {
        let err = DetectionRequestConfig::build("p.jpg", "b", 150.0, EquipmentType::all())
            .unwrap_err();
        assert!(matches!(err, PpeError::Configuration { .. }));
    }

    #[test]
    fn confidence_below_range_and_nan_rejected() {
        for value in [-0.5, f32::NAN] {
            let err = DetectionRequestConfig::build("p.jpg", "b", value, EquipmentType::all())
                .unwrap_err();
            assert!(matches!(err, PpeError::Configuration { .. }));
        }
    }

    #[test]
    fn range_bounds_accepted() {
        assert!(DetectionRequestConfig::build("p.jpg", "b", 0.0, EquipmentType::all()).is_ok());
        assert!(DetectionRequestConfig::build("p.jpg", "b", 100.0, EquipmentType::all()).is_ok());
    }

    #[test]
    fn empty_equipment_set_rejected() {
        let err = DetectionRequestConfig::build("p.jpg", "b", 80.0, BTreeSet::new()).unwrap_err();
        assert!(matches!(err, PpeError::Configuration { .. }));
    }

    #[test]
    fn parse_equipment_type_names() {
        assert_eq!(
            EquipmentType::parse(" hand_cover ").unwrap(),
            EquipmentType::HandCover
        );
        assert!(EquipmentType::parse("BOOTS").is_err());
    }

    #[test]
    fn request_body_uses_service_shape() {
        let required = [EquipmentType::HeadCover, EquipmentType::FaceCover]
            .into_iter()
            .collect();
        let cfg = DetectionRequestConfig::build("site/a.jpg", "uploads", 75.0, required).unwrap();
        let body = cfg.to_request_body();
        assert_eq!(body["Image"]["S3Object"]["Bucket"], "uploads");
        assert_eq!(body["Image"]["S3Object"]["Name"], "site/a.jpg");
        assert_eq!(body["SummarizationAttributes"]["MinConfidence"], 75.0);
        assert_eq!(
            body["SummarizationAttributes"]["RequiredEquipmentTypes"],
            serde_json::json!(["FACE_COVER", "HEAD_COVER"])
        );
    }
}
