//! Reading label rows from delimited text files and spreadsheets.

use super::LabelConfig;
use crate::PDFError;
use calamine::{open_workbook_auto, Reader};
use encoding_rs::{Encoding, UTF_8};
use std::path::Path;
use tracing::{debug, info};

/// A data row from the input, reduced to the two columns labels need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// Position among the data rows, 0-based, header excluded. Rows of empty cells are
    /// counted, but lines with no delimiters at all in delimited text are not, since the
    /// reader drops them.
    pub index: usize,
    pub text: String,
    pub dimensions: String,
}

/// How an input file is read, decided by its extension
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SourceFormat {
    Delimited(u8),
    Spreadsheet,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<SourceFormat, PDFError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(SourceFormat::Delimited(b',')),
            "txt" | "tsv" => Ok(SourceFormat::Delimited(b'\t')),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(SourceFormat::Spreadsheet),
            _ => Err(PDFError::UnsupportedFormat(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )),
        }
    }
}

/// Read every non-empty data row of `path`.
///
/// Fails if the file doesn't exist, its format is unsupported, no configured encoding can
/// decode it, or either required column is missing.
pub fn load_rows(path: &Path, config: &LabelConfig) -> Result<Vec<SourceRow>, PDFError> {
    if !path.is_file() {
        return Err(PDFError::InputNotFound(path.to_path_buf()));
    }
    let format = SourceFormat::from_path(path)?;
    // resolve encodings up front so a typo fails even for UTF-8 input
    let fallbacks = resolve_encodings(&config.encodings)?;

    let rows = match format {
        SourceFormat::Delimited(delimiter) => {
            let bytes = std::fs::read(path)?;
            let text = decode_text(path, &bytes, &fallbacks)?;
            read_delimited(&text, delimiter, config)?
        }
        SourceFormat::Spreadsheet => read_spreadsheet(path, config)?,
    };
    info!(rows = rows.len(), "read {}", path.display());
    Ok(rows)
}

/// Look up encodings by their WHATWG labels, e.g. `"latin1"`, `"windows-1252"`
pub fn resolve_encodings(labels: &[String]) -> Result<Vec<&'static Encoding>, PDFError> {
    labels
        .iter()
        .map(|label| {
            Encoding::for_label(label.trim().as_bytes())
                .ok_or_else(|| PDFError::UnknownEncoding(label.clone()))
        })
        .collect()
}

/// Decode `bytes` as UTF-8, then with each fallback in turn. A decode only counts if it
/// needed no replacement characters.
pub fn decode_text(
    path: &Path,
    bytes: &[u8],
    fallbacks: &[&'static Encoding],
) -> Result<String, PDFError> {
    let utf8 = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let attempts = std::iter::once((UTF_8, utf8)).chain(fallbacks.iter().map(|e| (*e, bytes)));

    let mut tried = Vec::new();
    for (encoding, input) in attempts {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(input) {
            info!(encoding = encoding.name(), "decoded {}", path.display());
            return Ok(text.into_owned());
        }
        debug!(encoding = encoding.name(), "decoding failed");
        tried.push(encoding.name().to_string());
    }

    Err(PDFError::Encoding {
        path: path.to_path_buf(),
        tried,
    })
}

fn read_delimited(text: &str, delimiter: u8, config: &LabelConfig) -> Result<Vec<SourceRow>, PDFError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?.iter().map(str::to_string).collect::<Vec<_>>());
    }
    rows_from_table(&header, records, config)
}

fn read_spreadsheet(path: &Path, config: &LabelConfig) -> Result<Vec<SourceRow>, PDFError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PDFError::EmptyWorkbook(path.to_path_buf()))??;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect::<Vec<_>>());
    let header = rows.next().unwrap_or_default();
    rows_from_table(&header, rows.collect(), config)
}

/// Pick the text and dimension columns out of a header and its data rows. Rows with no
/// content in any cell are skipped, but still count towards row indices.
fn rows_from_table(
    header: &[String],
    records: Vec<Vec<String>>,
    config: &LabelConfig,
) -> Result<Vec<SourceRow>, PDFError> {
    let find = |name: &str| header.iter().position(|h| h.trim().eq_ignore_ascii_case(name.trim()));
    let text_column = find(&config.product_column);
    let dimensions_column = find(&config.dimensions_column);

    let (Some(text_column), Some(dimensions_column)) = (text_column, dimensions_column) else {
        let missing = [
            (text_column, &config.product_column),
            (dimensions_column, &config.dimensions_column),
        ]
        .into_iter()
        .filter(|(found, _)| found.is_none())
        .map(|(_, name)| name.clone())
        .collect();
        return Err(PDFError::MissingColumns {
            missing,
            available: header.to_vec(),
        });
    };

    let cell = |record: &[String], column: usize| record.get(column).cloned().unwrap_or_default();
    Ok(records
        .into_iter()
        .enumerate()
        .filter(|(_, record)| record.iter().any(|c| !c.is_empty()))
        .map(|(index, record)| SourceRow {
            index,
            text: cell(&record, text_column),
            dimensions: cell(&record, dimensions_column),
        })
        .collect())
}
