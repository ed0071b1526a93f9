use std::path::PathBuf;
use thiserror::Error;

/// All errors that the crate can generate. Every variant is fatal to the run that
/// produced it; recoverable conditions are reported as [crate::labels::Warning]s instead.
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [csv] failed to read delimited input
    Csv(#[from] csv::Error),

    #[error(transparent)]
    /// [calamine] failed to read a spreadsheet
    Spreadsheet(#[from] calamine::Error),

    #[error(transparent)]
    /// A configuration or wall plan file could not be parsed
    Json(#[from] serde_json::Error),

    #[error("input file not found: {}", .0.display())]
    /// The input source does not exist
    InputNotFound(PathBuf),

    #[error("unsupported input format '{0}', use .csv, .txt, .tsv, .xlsx, .xls or .ods")]
    /// The input source has an extension we can't read
    UnsupportedFormat(String),

    #[error("missing required column(s) {missing:?}; available columns: {available:?}")]
    /// The input source lacks the text or dimensions column
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    #[error("could not decode {} with any of: {}", .path.display(), .tried.join(", "))]
    /// None of the configured text encodings could decode the input
    Encoding { path: PathBuf, tried: Vec<String> },

    #[error("unknown text encoding label '{0}'")]
    /// An encoding named in the configuration is not known
    UnknownEncoding(String),

    #[error("spreadsheet {} has no worksheets", .0.display())]
    /// A spreadsheet was opened but contained nothing to read
    EmptyWorkbook(PathBuf),

    #[error("frame '{frame}' is anchored to unknown frame '{anchor}'")]
    /// A wall frame refers to a frame that isn't placed before it
    UnknownFrame { frame: String, anchor: String },

    #[error("frame id '{0}' is used more than once")]
    /// Two wall frames share an id
    DuplicateFrame(String),

    #[error("invalid label config: {0}")]
    /// A label setting is out of range, e.g. a negative margin
    InvalidConfig(String),

    #[error("invalid wall plan: {0}")]
    /// A wall plan has non-positive sizes or similar
    InvalidPlan(String),
}

impl PDFError {
    pub fn invalid_plan(msg: impl Into<String>) -> Self {
        PDFError::InvalidPlan(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        PDFError::InvalidConfig(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = PDFError::MissingColumns {
            missing: vec!["Dimensions".into()],
            available: vec!["Product Name".into(), "Size".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Dimensions"));
        assert!(msg.contains("Size"));

        let err = PDFError::Encoding {
            path: PathBuf::from("labels.txt"),
            tried: vec!["UTF-8".into(), "windows-1252".into()],
        };
        assert!(err.to_string().contains("UTF-8, windows-1252"));
    }

    #[test]
    fn io_errors_stay_transparent() {
        let err: PDFError = std::io::Error::other("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
