//! Detection report interpretation.
//!
//! Turns a vision service `DetectionResult` into an immutable [`Report`]
//! holding a plain text and an HTML rendering of the same data. Rendering is
//! deterministic: the same input always yields byte-identical strings.
//!
//! The interpreter performs no I/O and does not log. Callers build the report
//! first, then log or dispatch it.

mod html;
mod text;

use std::collections::{HashMap, HashSet};

use crate::detect::{DetectionResult, DetectionSummary};
use crate::error::{PpeError, Result};

pub const SUBJECT_PREFIX: &str = "Detected PPE for people in image";
pub const NO_PERSONS_NOTICE: &str = "No persons detected";
pub const NO_BODY_PARTS_NOTICE: &str = "No body parts detected";
pub const NO_PPE_NOTICE_PREFIX: &str = "No PPE detected on";
pub const EMPTY_ID_LIST: &str = "None";

/// Rendered detection report for one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub subject: String,
    pub plain_text: String,
    pub html: String,
    pub counts: SummaryCounts,
}

/// Counts derived from the detection result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    pub persons: usize,
    pub with_required_equipment: usize,
    pub without_required_equipment: usize,
    pub indeterminate: usize,
}

/// Compliance categories of the detection summary, in rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SummaryCategory {
    WithRequiredEquipment,
    WithoutRequiredEquipment,
    Indeterminate,
}

impl SummaryCategory {
    pub const ORDER: [SummaryCategory; 3] = [
        SummaryCategory::WithRequiredEquipment,
        SummaryCategory::WithoutRequiredEquipment,
        SummaryCategory::Indeterminate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SummaryCategory::WithRequiredEquipment => "With required equipment",
            SummaryCategory::WithoutRequiredEquipment => "Without required equipment",
            SummaryCategory::Indeterminate => "Indeterminate",
        }
    }

    pub fn ids<'a>(&self, summary: &'a DetectionSummary) -> &'a [u32] {
        match self {
            SummaryCategory::WithRequiredEquipment => &summary.with_required_equipment,
            SummaryCategory::WithoutRequiredEquipment => &summary.without_required_equipment,
            SummaryCategory::Indeterminate => &summary.indeterminate,
        }
    }
}

/// Interpret a detection result into a report for `photo_id`.
///
/// Fails with `PpeError::Invariant` when the result is structurally
/// inconsistent: duplicate person IDs, a person missing from every summary
/// category or listed in more than one, or a summary ID naming no detected
/// person.
pub fn interpret(photo_id: &str, result: &DetectionResult) -> Result<Report> {
    check_summary(result)?;

    let summary = &result.summary;
    Ok(Report {
        subject: subject_line(photo_id),
        plain_text: text::render(photo_id, result),
        html: html::render(photo_id, result),
        counts: SummaryCounts {
            persons: result.persons.len(),
            with_required_equipment: summary.with_required_equipment.len(),
            without_required_equipment: summary.without_required_equipment.len(),
            indeterminate: summary.indeterminate.len(),
        },
    })
}

pub fn subject_line(photo_id: &str) -> String {
    format!("{} {}", SUBJECT_PREFIX, photo_id)
}

fn check_summary(result: &DetectionResult) -> Result<()> {
    let mut detected = HashSet::new();
    for person in &result.persons {
        if !detected.insert(person.id) {
            return Err(PpeError::invariant(format!(
                "person {} reported more than once",
                person.id
            )));
        }
    }

    let mut placed: HashMap<u32, SummaryCategory> = HashMap::new();
    for category in SummaryCategory::ORDER {
        for id in category.ids(&result.summary) {
            if !detected.contains(id) {
                return Err(PpeError::invariant(format!(
                    "summary category '{}' lists person {} which was not detected",
                    category.label(),
                    id
                )));
            }
            if let Some(previous) = placed.insert(*id, category) {
                return Err(PpeError::invariant(format!(
                    "person {} listed under both '{}' and '{}'",
                    id,
                    previous.label(),
                    category.label()
                )));
            }
        }
    }

    for person in &result.persons {
        if !placed.contains_key(&person.id) {
            return Err(PpeError::invariant(format!(
                "person {} missing from every summary category",
                person.id
            )));
        }
    }
    Ok(())
}

/// Confidence and coordinate values keep the service's f32 precision.
pub(crate) fn format_number(value: f32) -> String {
    format!("{:?}", value)
}

pub(crate) fn join_ids(ids: &[u32]) -> String {
    if ids.is_empty() {
        return EMPTY_ID_LIST.to_string();
    }
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
