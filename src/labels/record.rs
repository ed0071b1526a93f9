use super::source::SourceRow;
use super::Warning;
use crate::units::Cm;
use serde::Serialize;
use tracing::warn;

/// The outline a label is cut along
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Shape {
    Rectangle,
    /// A circle inscribed in the label's box
    Circle,
}

/// Labels are round exactly when both sides equal the circle size; anything else,
/// however close, is a rectangle.
#[allow(clippy::float_cmp)]
pub fn classify_shape(width: Cm, height: Cm, circle_size: Cm) -> Shape {
    if width == circle_size && height == circle_size {
        Shape::Circle
    } else {
        Shape::Rectangle
    }
}

/// Parse a `"<width>*<height>"` dimension string in centimetres. Both sides must be finite
/// and positive.
///
/// ```
/// use pdf_labels::labels::parse_dimensions;
/// use pdf_labels::Cm;
///
/// assert_eq!(parse_dimensions(" 12.7 * 17.8 "), Some((Cm(12.7), Cm(17.8))));
/// assert_eq!(parse_dimensions("bad*data"), None);
/// ```
pub fn parse_dimensions(raw: &str) -> Option<(Cm, Cm)> {
    let (w, h) = raw.split_once('*')?;
    let parse = |s: &str| -> Option<Cm> {
        let v: f32 = s.trim().parse().ok()?;
        (v.is_finite() && v > 0.0).then_some(Cm(v))
    };
    Some((parse(w)?, parse(h)?))
}

/// One label to print. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRecord {
    /// Position of the source row among the data rows, 0-based
    pub index: usize,
    pub text: String,
    pub width: Cm,
    pub height: Cm,
    pub shape: Shape,
}

impl LabelRecord {
    pub fn new<S: Into<String>>(index: usize, text: S, width: Cm, height: Cm, circle_size: Cm) -> Self {
        LabelRecord {
            index,
            text: text.into(),
            width,
            height,
            shape: classify_shape(width, height, circle_size),
        }
    }

    /// Build a record from a source row. Unparsable dimensions fall back to `default_size`
    /// and produce a warning naming the item.
    pub fn from_row(row: &SourceRow, default_size: (Cm, Cm), circle_size: Cm) -> (Self, Option<Warning>) {
        match parse_dimensions(&row.dimensions) {
            Some((width, height)) => (
                LabelRecord::new(row.index, row.text.clone(), width, height, circle_size),
                None,
            ),
            None => {
                let (width, height) = default_size;
                warn!(
                    item = %row.text,
                    dimensions = %row.dimensions,
                    "invalid dimensions, using default label size {}x{}",
                    *width,
                    *height,
                );
                let warning = Warning::MalformedDimensions {
                    row: row.index,
                    item: row.text.clone(),
                    raw: row.dimensions.clone(),
                };
                (
                    LabelRecord::new(row.index, row.text.clone(), width, height, circle_size),
                    Some(warning),
                )
            }
        }
    }

    /// The record's text split into the parts drawn on separate lines
    pub fn display_text(&self) -> LabelText {
        split_display_text(&self.text)
    }
}

/// Label text as drawn: a leading part, and optionally a trailing bracketed part that is
/// drawn on its own line in the script font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelText {
    pub primary: String,
    pub script: Option<String>,
}

/// Split `"Rice (அரிசி)"` into `"Rice"` and `"(அரிசி)"`. The bracketed part starts at the
/// first `(` and must run to the end of the text.
pub fn split_display_text(text: &str) -> LabelText {
    let trimmed = text.trim();
    if trimmed.ends_with(')') {
        if let Some(open) = trimmed.find('(') {
            return LabelText {
                primary: trimmed[..open].trim_end().to_string(),
                script: Some(trimmed[open..].to_string()),
            };
        }
    }
    LabelText {
        primary: trimmed.to_string(),
        script: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIRCLE: Cm = Cm(3.5);

    #[test]
    fn only_exact_circle_size_is_round() {
        assert_eq!(classify_shape(Cm(3.5), Cm(3.5), CIRCLE), Shape::Circle);
        assert_eq!(classify_shape(Cm(3.4999), Cm(3.4999), CIRCLE), Shape::Rectangle);
        assert_eq!(classify_shape(Cm(3.5), Cm(3.6), CIRCLE), Shape::Rectangle);
        assert_eq!(classify_shape(Cm(4.0), Cm(4.0), CIRCLE), Shape::Rectangle);
    }

    #[test]
    fn parsed_circle_dimensions_are_round() {
        let (w, h) = parse_dimensions("3.5*3.5").unwrap();
        assert_eq!(classify_shape(w, h, CIRCLE), Shape::Circle);
    }

    #[test]
    fn dimension_strings() {
        assert_eq!(parse_dimensions("20*15"), Some((Cm(20.0), Cm(15.0))));
        assert_eq!(parse_dimensions("bad*data"), None);
        assert_eq!(parse_dimensions("20x15"), None);
        assert_eq!(parse_dimensions("20*15*3"), None);
        assert_eq!(parse_dimensions("0*15"), None);
        assert_eq!(parse_dimensions("-2*15"), None);
        assert_eq!(parse_dimensions("inf*15"), None);
        assert_eq!(parse_dimensions(""), None);
    }

    #[test]
    fn malformed_rows_fall_back_to_defaults_with_a_warning() {
        let row = SourceRow {
            index: 4,
            text: "Mystery".into(),
            dimensions: "bad*data".into(),
        };
        let (record, warning) = LabelRecord::from_row(&row, (Cm(4.5), Cm(3.0)), CIRCLE);
        assert_eq!((record.width, record.height), (Cm(4.5), Cm(3.0)));
        assert_eq!(record.index, 4);
        assert_eq!(
            warning,
            Some(Warning::MalformedDimensions {
                row: 4,
                item: "Mystery".into(),
                raw: "bad*data".into(),
            })
        );
    }

    #[test]
    fn bracketed_suffix_is_split_off() {
        assert_eq!(
            split_display_text("Rice (அரிசி)"),
            LabelText {
                primary: "Rice".into(),
                script: Some("(அரிசி)".into()),
            }
        );
        assert_eq!(
            split_display_text("Dal (Toor) (துவரம்)").script.as_deref(),
            Some("(Toor) (துவரம்)")
        );
        assert_eq!(split_display_text("(உப்பு)").primary, "");
        assert_eq!(split_display_text("Sugar (fine").script, None);
        assert_eq!(split_display_text("  Salt ").primary, "Salt");
    }
}
