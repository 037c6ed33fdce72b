//! End-to-end rendering scenarios for the detection result interpreter.

use ppe_witness::{
    interpret, BodyPart, BodyPartName, BoundingBox, CoversBodyPart, DetectionResult,
    DetectionSummary, EquipmentItem, EquipmentType, Person, PpeError,
};

fn face_cover_person() -> Person {
    Person {
        id: 1,
        body_parts: vec![BodyPart {
            name: BodyPartName::Face,
            confidence: 99.2,
            equipment: vec![EquipmentItem {
                equipment_type: EquipmentType::FaceCover,
                confidence: 98.5,
                covers_body_part: CoversBodyPart {
                    value: true,
                    confidence: 97.0,
                },
                bounding_box: BoundingBox {
                    left: 0.1,
                    top: 0.2,
                    width: 0.3,
                    height: 0.4,
                },
            }],
        }],
        ..Person::default()
    }
}

#[test]
fn scenario_no_persons() {
    let report = interpret("yard.jpg", &DetectionResult::default()).expect("interpret");

    let expected = "Detected PPE for people in image yard.jpg\n\
                    Detected people\n\
                    ---------------------------\n\
                    Person ID Summary\n\
                    -----------------\n\
                    With required equipment\n\
                    \tTotal: 0\n\
                    \tIDs: None\n\
                    \n\
                    Without required equipment\n\
                    \tTotal: 0\n\
                    \tIDs: None\n\
                    \n\
                    Indeterminate\n\
                    \tTotal: 0\n\
                    \tIDs: None\n\
                    \n";
    assert_eq!(report.plain_text, expected);
    assert!(report.html.contains("<p class=\"notice\">No persons detected</p>"));
    assert!(report.html.contains("<h1>PPE detection report</h1>"));
    assert_eq!(report.subject, "Detected PPE for people in image yard.jpg");
}

#[test]
fn scenario_single_compliant_person() {
    let result = DetectionResult {
        persons: vec![face_cover_person()],
        summary: DetectionSummary {
            with_required_equipment: vec![1],
            ..DetectionSummary::default()
        },
        model_version: Some("1.0".to_string()),
    };
    let report = interpret("worker.jpg", &result).expect("interpret");

    let expected = "Detected PPE for people in image worker.jpg\n\
                    Detected people\n\
                    ---------------------------\n\
                    Detected person: 1\n\
                    \tFACE. Confidence: 99.2\n\
                    \t\tItem: FACE_COVER. Confidence: 98.5\n\
                    \t\tCovers body part: true. Confidence: 97.0\n\
                    \t\tBounding box\n\
                    \t\tLeft: 0.1\n\
                    \t\tTop: 0.2\n\
                    \t\tWidth: 0.3\n\
                    \t\tHeight: 0.4\n\
                    Person ID Summary\n\
                    -----------------\n\
                    With required equipment\n\
                    \tTotal: 1\n\
                    \tIDs: 1\n\
                    \n\
                    Without required equipment\n\
                    \tTotal: 0\n\
                    \tIDs: None\n\
                    \n\
                    Indeterminate\n\
                    \tTotal: 0\n\
                    \tIDs: None\n\
                    \n";
    assert_eq!(report.plain_text, expected);

    assert!(report.html.contains("<h3>Detected person: 1</h3>"));
    assert!(report.html.contains(
        "<li>Item: FACE_COVER. Confidence: 98.5<br>Covers body part: true. Confidence: 97.0<br>\
         Bounding box: Left: 0.1, Top: 0.2, Width: 0.3, Height: 0.4</li>"
    ));
    assert!(report
        .html
        .contains("<tr><td>With required equipment</td><td>1</td><td>1</td></tr>"));
    assert!(!report.html.contains("No persons detected"));
    assert_eq!(report.counts.persons, 1);
    assert_eq!(report.counts.with_required_equipment, 1);
}

#[test]
fn text_and_html_carry_the_same_values() {
    let mut person = face_cover_person();
    person.body_parts.push(BodyPart {
        name: BodyPartName::RightHand,
        confidence: 71.625,
        equipment: vec![],
    });
    let result = DetectionResult {
        persons: vec![person],
        summary: DetectionSummary {
            without_required_equipment: vec![1],
            ..DetectionSummary::default()
        },
        model_version: None,
    };
    let report = interpret("hands.jpg", &result).expect("interpret");

    for needle in [
        "Detected person: 1",
        "FACE",
        "Confidence: 99.2",
        "Item: FACE_COVER. Confidence: 98.5",
        "Covers body part: true. Confidence: 97.0",
        "Left: 0.1",
        "Height: 0.4",
        "RIGHT_HAND",
        "Confidence: 71.625",
        "No PPE detected on RIGHT_HAND",
        "Without required equipment",
    ] {
        assert!(report.plain_text.contains(needle), "text missing {}", needle);
        assert!(report.html.contains(needle), "html missing {}", needle);
    }
}

#[test]
fn service_response_document_renders() {
    let payload = r#"{
        "Persons": [
            {"Id": 0, "BodyParts": [
                {"Name": "HEAD", "Confidence": 95.5, "EquipmentDetections": [
                    {"Type": "HEAD_COVER", "Confidence": 91.25,
                     "CoversBodyPart": {"Value": false, "Confidence": 60.5},
                     "BoundingBox": {"Width": 0.25, "Height": 0.125, "Left": 0.5, "Top": 0.0625}}
                ]}
            ]},
            {"Id": 1, "BodyParts": []},
            {"Id": 2}
        ],
        "Summary": {
            "PersonsWithRequiredEquipment": [],
            "PersonsWithoutRequiredEquipment": [2, 0],
            "PersonsIndeterminate": [1]
        }
    }"#;
    let result: DetectionResult = serde_json::from_str(payload).expect("parse");
    let report = interpret("crew.png", &result).expect("interpret");

    assert!(report.plain_text.contains(
        "\t\tItem: HEAD_COVER. Confidence: 91.25\n\
         \t\tCovers body part: false. Confidence: 60.5\n\
         \t\tBounding box\n\
         \t\tLeft: 0.5\n\
         \t\tTop: 0.0625\n\
         \t\tWidth: 0.25\n\
         \t\tHeight: 0.125\n"
    ));
    assert_eq!(report.plain_text.matches("No body parts detected").count(), 2);
    assert!(report
        .plain_text
        .contains("Without required equipment\n\tTotal: 2\n\tIDs: 2, 0\n"));
    assert!(report.plain_text.contains("Indeterminate\n\tTotal: 1\n\tIDs: 1\n"));
}

#[test]
fn inconsistent_summary_fails_loudly() {
    let result = DetectionResult {
        persons: vec![face_cover_person()],
        summary: DetectionSummary {
            indeterminate: vec![1, 1],
            ..DetectionSummary::default()
        },
        model_version: None,
    };
    let err = interpret("dup.jpg", &result).unwrap_err();
    assert!(matches!(err, PpeError::Invariant { .. }));
}
