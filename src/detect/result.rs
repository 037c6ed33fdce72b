use serde::{Deserialize, Serialize};

use super::request::EquipmentType;

/// Result of a protective equipment detection call.
///
/// Field names follow the vision service's response document. Missing
/// sequences deserialize as empty; unknown body part or equipment names are
/// rejected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectionResult {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub summary: DetectionSummary,
    #[serde(
        default,
        rename = "ProtectiveEquipmentModelVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub model_version: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    pub id: u32,
    #[serde(default)]
    pub body_parts: Vec<BodyPart>,
    /// Person-level detection confidence, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BodyPart {
    pub name: BodyPartName,
    pub confidence: f32,
    #[serde(default, rename = "EquipmentDetections")]
    pub equipment: Vec<EquipmentItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyPartName {
    Face,
    Head,
    LeftHand,
    RightHand,
    LeftFoot,
    RightFoot,
}

impl BodyPartName {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPartName::Face => "FACE",
            BodyPartName::Head => "HEAD",
            BodyPartName::LeftHand => "LEFT_HAND",
            BodyPartName::RightHand => "RIGHT_HAND",
            BodyPartName::LeftFoot => "LEFT_FOOT",
            BodyPartName::RightFoot => "RIGHT_FOOT",
        }
    }
}

impl std::fmt::Display for BodyPartName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected piece of protective equipment on a body part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EquipmentItem {
    #[serde(rename = "Type")]
    pub equipment_type: EquipmentType,
    pub confidence: f32,
    pub covers_body_part: CoversBodyPart,
    pub bounding_box: BoundingBox,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CoversBodyPart {
    pub value: bool,
    pub confidence: f32,
}

/// Bounding box (normalized 0..1 coordinates, top-left origin).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Person IDs grouped by compliance with the required equipment.
///
/// Order within each list is the order the service reported them in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    #[serde(default, rename = "PersonsWithRequiredEquipment")]
    pub with_required_equipment: Vec<u32>,
    #[serde(default, rename = "PersonsWithoutRequiredEquipment")]
    pub without_required_equipment: Vec<u32>,
    #[serde(default, rename = "PersonsIndeterminate")]
    pub indeterminate: Vec<u32>,
}
