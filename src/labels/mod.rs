//! Product label sheets.
//!
//! A run reads a table with a product name and a `"WIDTH*HEIGHT"` size in centimetres per
//! row, turns each row into a [LabelRecord], packs the records onto pages and draws each one
//! as a black rectangle or circle with white text sized to fit.
//!
//! Problems with individual rows or fonts don't stop a run: they are logged and collected
//! as [Warning]s in the [RunReport]. Problems with the input as a whole are returned as
//! errors before anything is written.

mod config;
mod pack;
mod record;
mod render;
mod source;

pub use config::*;
pub use pack::*;
pub use record::*;
pub use render::*;
pub use source::*;

use crate::info::Info;
use crate::page::Page;
use crate::{Document, Font, PDFError};
use derive_more::Display;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A recoverable problem found during a run
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Warning {
    #[display("row {}: '{item}' has invalid dimensions '{raw}', using the default size", row + 1)]
    MalformedDimensions {
        row: usize,
        item: String,
        raw: String,
    },
    #[display("font {} could not be loaded ({reason}), using a fallback", path.display())]
    FontUnavailable { path: PathBuf, reason: String },
    #[display("no labels found in the input")]
    NoLabels,
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub output: PathBuf,
    pub labels: usize,
    pub pages: usize,
    pub warnings: Vec<Warning>,
}

/// Read `input`, lay out every label and write the PDF to `output`.
///
/// The document is rendered completely in memory before `output` is touched, so a failed
/// run never leaves a partial file behind.
pub fn create_labels_pdf(
    input: &Path,
    output: &Path,
    config: &LabelConfig,
) -> Result<RunReport, PDFError> {
    let (doc, labels, warnings) = build_labels_document(input, config)?;
    let pages = doc.pages.len();
    let bytes = doc.render()?;
    std::fs::write(output, bytes)?;

    info!(labels, pages, "wrote {}", output.display());
    Ok(RunReport {
        output: output.to_path_buf(),
        labels,
        pages,
        warnings,
    })
}

/// Everything [create_labels_pdf] does short of writing the file. Returns the document,
/// the number of labels on it, and the warnings raised.
pub fn build_labels_document(
    input: &Path,
    config: &LabelConfig,
) -> Result<(Document, usize, Vec<Warning>), PDFError> {
    config.validate()?;
    let rows = load_rows(input, config)?;

    let mut warnings = Vec::new();
    let records: Vec<LabelRecord> = rows
        .iter()
        .map(|row| {
            let (record, warning) =
                LabelRecord::from_row(row, config.default_size(), config.circle_size());
            warnings.extend(warning);
            record
        })
        .collect();

    let mut doc = Document::default();
    let mut info = Info::new();
    info.title(&config.title).subject("Product labels").keyword("labels");
    if let Some(name) = input.file_name() {
        info.keyword(name.to_string_lossy());
    }
    doc.set_info(info);

    let helvetica = doc.add_font(Font::helvetica());
    let primary = load_font_or(&mut doc, config.font.as_deref(), helvetica, &mut warnings);
    let script = load_font_or(&mut doc, config.script_font.as_deref(), primary, &mut warnings);
    let fonts = LabelFonts { primary, script };

    let geometry = config.geometry();
    let style = config.text_style();
    let labels = records.len();
    let placements = pack(records, &geometry, &style, &doc.fonts, fonts);
    render_placements(&mut doc, &placements, &geometry, &style, fonts);

    if labels == 0 {
        warn!("no labels found in {}", input.display());
        warnings.push(Warning::NoLabels);
        doc.add_page(Page::new(geometry.page_size(), None));
    }

    Ok((doc, labels, warnings))
}
