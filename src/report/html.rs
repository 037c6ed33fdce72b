use crate::detect::{BodyPart, DetectionResult, EquipmentItem, Person};

use super::{
    format_number, join_ids, SummaryCategory, NO_BODY_PARTS_NOTICE, NO_PERSONS_NOTICE,
    NO_PPE_NOTICE_PREFIX, SUBJECT_PREFIX,
};

const TITLE: &str = "PPE detection report";

pub(super) fn render(photo_id: &str, result: &DetectionResult) -> String {
    let mut lines = vec![
        "<html>".to_string(),
        "<body>".to_string(),
        format!("<h1>{}</h1>", TITLE),
        format!(
            "<p>{} <strong>{}</strong></p>",
            SUBJECT_PREFIX,
            escape_html(photo_id)
        ),
        "<h2>Detected people</h2>".to_string(),
    ];

    if result.persons.is_empty() {
        lines.push(notice(NO_PERSONS_NOTICE));
    }
    for person in &result.persons {
        render_person(&mut lines, person);
    }

    lines.push("<h2>Person ID Summary</h2>".to_string());
    lines.push("<table class=\"summary\">".to_string());
    lines.push("<tr><th>Category</th><th>Total</th><th>IDs</th></tr>".to_string());
    for category in SummaryCategory::ORDER {
        let ids = category.ids(&result.summary);
        lines.push(format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            category.label(),
            ids.len(),
            join_ids(ids)
        ));
    }
    lines.push("</table>".to_string());
    lines.push("</body>".to_string());
    lines.push("</html>".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_person(lines: &mut Vec<String>, person: &Person) {
    lines.push("<section class=\"person\">".to_string());
    lines.push(format!("<h3>Detected person: {}</h3>", person.id));
    if person.body_parts.is_empty() {
        lines.push(notice(NO_BODY_PARTS_NOTICE));
    } else {
        lines.push("<ul class=\"body-parts\">".to_string());
        for part in &person.body_parts {
            render_body_part(lines, part);
        }
        lines.push("</ul>".to_string());
    }
    lines.push("</section>".to_string());
}

fn render_body_part(lines: &mut Vec<String>, part: &BodyPart) {
    lines.push(format!(
        "<li><strong>{}</strong>. Confidence: {}",
        part.name,
        format_number(part.confidence)
    ));
    if part.equipment.is_empty() {
        lines.push(notice(&format!("{} {}", NO_PPE_NOTICE_PREFIX, part.name)));
    } else {
        lines.push("<ul class=\"equipment\">".to_string());
        for item in &part.equipment {
            lines.push(render_item(item));
        }
        lines.push("</ul>".to_string());
    }
    lines.push("</li>".to_string());
}

fn render_item(item: &EquipmentItem) -> String {
    let bbox = &item.bounding_box;
    format!(
        "<li>Item: {}. Confidence: {}<br>Covers body part: {}. Confidence: {}<br>\
         Bounding box: Left: {}, Top: {}, Width: {}, Height: {}</li>",
        item.equipment_type,
        format_number(item.confidence),
        item.covers_body_part.value,
        format_number(item.covers_body_part.confidence),
        format_number(bbox.left),
        format_number(bbox.top),
        format_number(bbox.width),
        format_number(bbox.height),
    )
}

fn notice(text: &str) -> String {
    format!("<p class=\"notice\">{}</p>", text)
}

/// Escape text for use in HTML element content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
