use pdf_labels::labels::{create_labels_pdf, LabelConfig, Warning};
use pdf_labels::PDFError;
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn tab_separated_input_becomes_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "pantry.txt",
        "Product Name\tDimensions\nItem A\t20*15\nItem B\t12.7*17.8\nItem C\t3.5*3.5\n".as_bytes(),
    );
    let output = dir.path().join("pantry.pdf");

    let report = create_labels_pdf(&input, &output, &LabelConfig::default()).unwrap();
    assert_eq!(report.labels, 3);
    // A doesn't fit under B on an A4 page
    assert_eq!(report.pages, 2);
    assert!(report.warnings.is_empty());

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(String::from_utf8_lossy(&bytes).contains("/Count 2"));
}

#[test]
fn malformed_dimensions_are_warned_about() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "items.csv",
        b"Product Name,Dimensions\nRice,4.5*3\nMystery,bad*data\n",
    );
    let output = dir.path().join("items.pdf");

    let report = create_labels_pdf(&input, &output, &LabelConfig::default()).unwrap();
    assert_eq!(report.labels, 2);
    assert_eq!(
        report.warnings,
        vec![Warning::MalformedDimensions {
            row: 1,
            item: "Mystery".into(),
            raw: "bad*data".into(),
        }]
    );
    assert!(output.exists());
}

#[test]
fn missing_columns_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "items.csv", b"Name,Size\nRice,4*3\n");
    let output = dir.path().join("items.pdf");

    let err = create_labels_pdf(&input, &output, &LabelConfig::default()).unwrap_err();
    assert!(matches!(err, PDFError::MissingColumns { .. }));
    assert!(!output.exists());
}

#[test]
fn latin1_input_is_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "items.tsv",
        b"Product Name\tDimensions\nCaf\xe9 cr\xe8me\t4.5*3\n",
    );
    let output = dir.path().join("items.pdf");

    let report = create_labels_pdf(&input, &output, &LabelConfig::default()).unwrap();
    assert_eq!(report.labels, 1);
    assert!(report.warnings.is_empty());
}

#[test]
fn undecodable_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "items.tsv",
        b"Product Name\tDimensions\nCaf\xe9\t4.5*3\n",
    );
    let output = dir.path().join("items.pdf");
    let config = LabelConfig {
        encodings: Vec::new(),
        ..LabelConfig::default()
    };

    match create_labels_pdf(&input, &output, &config) {
        Err(PDFError::Encoding { tried, .. }) => assert_eq!(tried, vec!["UTF-8".to_string()]),
        other => panic!("expected an encoding error, got {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn unsupported_and_missing_inputs_fail() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.pdf");

    let json = write(dir.path(), "items.json", b"[]");
    assert!(matches!(
        create_labels_pdf(&json, &output, &LabelConfig::default()),
        Err(PDFError::UnsupportedFormat(_))
    ));

    let missing = dir.path().join("nope.csv");
    assert!(matches!(
        create_labels_pdf(&missing, &output, &LabelConfig::default()),
        Err(PDFError::InputNotFound(_))
    ));
    assert!(!output.exists());
}

#[test]
fn unreadable_fonts_fall_back_to_helvetica() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "items.csv",
        "Product Name,Dimensions\nRice (அரிசி),4.5*3\n".as_bytes(),
    );
    let broken_font = write(dir.path(), "broken.ttf", b"not a font");
    let output = dir.path().join("items.pdf");
    let config = LabelConfig {
        font: Some(broken_font.clone()),
        script_font: Some(dir.path().join("missing.ttf")),
        ..LabelConfig::default()
    };

    let report = create_labels_pdf(&input, &output, &config).unwrap();
    assert_eq!(report.warnings.len(), 2);
    assert!(report
        .warnings
        .iter()
        .all(|w| matches!(w, Warning::FontUnavailable { .. })));
    assert!(output.exists());
}

#[test]
fn demo_pantry_sheet() {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");
    let config = LabelConfig::from_json_file(demos.join("labels.json")).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("pantry.pdf");

    let report = create_labels_pdf(&demos.join("pantry.tsv"), &output, &config).unwrap();
    assert_eq!(report.labels, 10);
    assert_eq!(report.warnings.len(), 1);
    assert!(output.exists());
}

#[test]
fn spreadsheets_become_a_pdf() {
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/spice-rack.xlsx");
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("spice-rack.pdf");

    let report = create_labels_pdf(&input, &output, &LabelConfig::default()).unwrap();
    assert_eq!(report.labels, 3);
    assert_eq!(report.pages, 1);
    // the blank spreadsheet row still counts
    assert_eq!(
        report.warnings,
        vec![Warning::MalformedDimensions {
            row: 3,
            item: "Cloves".into(),
            raw: "bad".into(),
        }]
    );
    assert!(output.exists());
}

#[test]
fn spreadsheet_columns_are_looked_up_by_name() {
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/spice-rack.xlsx");
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("spice-rack.pdf");

    let renamed = LabelConfig {
        product_column: "notes".into(),
        ..LabelConfig::default()
    };
    let report = create_labels_pdf(&input, &output, &renamed).unwrap();
    assert_eq!(report.labels, 3);

    let missing = LabelConfig {
        dimensions_column: "Size".into(),
        ..LabelConfig::default()
    };
    match create_labels_pdf(&input, &output, &missing) {
        Err(PDFError::MissingColumns { missing, available }) => {
            assert_eq!(missing, vec!["Size".to_string()]);
            assert_eq!(available, vec!["Product Name", "Dimensions", "Notes"]);
        }
        other => panic!("expected missing columns, got {other:?}"),
    }
}

#[test]
fn out_of_range_settings_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "items.csv", b"Product Name,Dimensions\nRice,4.5*3\n");
    let output = dir.path().join("items.pdf");

    let huge_font = LabelConfig {
        font_size: 1.0e8,
        ..LabelConfig::default()
    };
    let negative_spacing = LabelConfig {
        gap_x_cm: -3.0,
        margin_left_cm: -1.0,
        ..LabelConfig::default()
    };
    for config in [huge_font, negative_spacing] {
        assert!(matches!(
            create_labels_pdf(&input, &output, &config),
            Err(PDFError::InvalidConfig(_))
        ));
    }
    assert!(!output.exists());
}
