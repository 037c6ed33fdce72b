use crate::detect::{BodyPart, DetectionResult, EquipmentItem, Person};

use super::{
    format_number, join_ids, subject_line, SummaryCategory, NO_BODY_PARTS_NOTICE,
    NO_PPE_NOTICE_PREFIX,
};

pub(super) fn render(photo_id: &str, result: &DetectionResult) -> String {
    let mut lines = vec![
        subject_line(photo_id),
        "Detected people".to_string(),
        "---------------------------".to_string(),
    ];

    for person in &result.persons {
        render_person(&mut lines, person);
    }

    lines.push("Person ID Summary".to_string());
    lines.push("-----------------".to_string());
    for category in SummaryCategory::ORDER {
        let ids = category.ids(&result.summary);
        lines.push(category.label().to_string());
        lines.push(format!("\tTotal: {}", ids.len()));
        lines.push(format!("\tIDs: {}", join_ids(ids)));
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_person(lines: &mut Vec<String>, person: &Person) {
    lines.push(format!("Detected person: {}", person.id));
    if person.body_parts.is_empty() {
        lines.push(format!("\t{}", NO_BODY_PARTS_NOTICE));
        return;
    }
    for part in &person.body_parts {
        render_body_part(lines, part);
    }
}

fn render_body_part(lines: &mut Vec<String>, part: &BodyPart) {
    lines.push(format!(
        "\t{}. Confidence: {}",
        part.name,
        format_number(part.confidence)
    ));
    if part.equipment.is_empty() {
        lines.push(format!("\t\t{} {}", NO_PPE_NOTICE_PREFIX, part.name));
        return;
    }
    for item in &part.equipment {
        render_item(lines, item);
    }
}

fn render_item(lines: &mut Vec<String>, item: &EquipmentItem) {
    let bbox = &item.bounding_box;
    lines.push(format!(
        "\t\tItem: {}. Confidence: {}",
        item.equipment_type,
        format_number(item.confidence)
    ));
    lines.push(format!(
        "\t\tCovers body part: {}. Confidence: {}",
        item.covers_body_part.value,
        format_number(item.covers_body_part.confidence)
    ));
    lines.push("\t\tBounding box".to_string());
    lines.push(format!("\t\tLeft: {}", format_number(bbox.left)));
    lines.push(format!("\t\tTop: {}", format_number(bbox.top)));
    lines.push(format!("\t\tWidth: {}", format_number(bbox.width)));
    lines.push(format!("\t\tHeight: {}", format_number(bbox.height)));
}
