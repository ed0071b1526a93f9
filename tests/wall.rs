use pdf_labels::wall::{create_wall_pdf, WallWarning};
use pdf_labels::PDFError;
use std::fs;

const PLAN: &str = r#"{
    "title": "Living room",
    "width": 406.8,
    "height": 268.6,
    "spacing": 6.0,
    "frames": [
        { "id": "a", "width": 30, "height": 40, "rotated": true, "anchor": { "kind": "centre" } },
        { "id": "b", "width": 21, "height": 29.7, "anchor": { "kind": "left_of", "of": "a" } },
        { "id": "c", "width": 21, "height": 29.7, "anchor": { "kind": "right_of", "of": "a" } },
        { "id": "i", "width": 20, "height": 30, "rotated": true, "anchor": { "kind": "above", "of": "a" } }
    ],
    "decorations": [
        { "label": "Plant", "x": 5, "y": 15, "width": 15, "height": 40 }
    ]
}"#;

#[test]
fn wall_plans_become_a_one_page_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("living-room.json");
    fs::write(&input, PLAN).unwrap();
    let output = dir.path().join("living-room.pdf");

    let report = create_wall_pdf(&input, &output).unwrap();
    assert_eq!(report.frames, 4);
    assert!(report.warnings.is_empty());

    let a = report.measurements.iter().find(|m| m.id == "a").unwrap();
    assert!((a.from_top - 119.3).abs() < 1e-3);

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(String::from_utf8_lossy(&bytes).contains("/Count 1"));
}

#[test]
fn forward_references_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plan.json");
    fs::write(
        &input,
        r#"{ "width": 100, "height": 100, "frames": [
            { "id": "b", "width": 10, "height": 10, "anchor": { "kind": "below", "of": "a" } },
            { "id": "a", "width": 10, "height": 10, "anchor": { "kind": "centre" } }
        ] }"#,
    )
    .unwrap();
    let output = dir.path().join("plan.pdf");

    assert!(matches!(
        create_wall_pdf(&input, &output),
        Err(PDFError::UnknownFrame { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn row_plans_report_frames_off_the_wall() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bed.json");
    fs::write(
        &input,
        r#"{ "width": 50, "height": 267.5, "spacing": 4.5, "row": [
            { "id": "small", "width": 13, "height": 18 },
            { "id": "medium", "width": 21, "height": 29.7 },
            { "id": "large", "width": 30, "height": 40 }
        ] }"#,
    )
    .unwrap();
    let output = dir.path().join("bed.pdf");

    let report = create_wall_pdf(&input, &output).unwrap();
    assert_eq!(report.frames, 3);
    assert!(report
        .warnings
        .contains(&WallWarning::OutsideWall("large".into())));
    assert!(output.exists());
}

#[test]
fn demo_plans_resolve_cleanly() {
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    for name in ["living-room-wall.json", "bedroom-wall.json"] {
        let plan = pdf_labels::wall::WallPlan::from_json_file(demos.join(name)).unwrap();
        let layout = plan.resolve().unwrap();
        assert!(layout.warnings.is_empty(), "{name}: {:?}", layout.warnings);
    }
}
