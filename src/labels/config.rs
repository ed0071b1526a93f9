use super::pack::{PageGeometry, TextStyle};
use crate::pagesize::Paper;
use crate::units::{Cm, Pt};
use crate::PDFError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for a label run. Every field has a default, so a config file only needs to name
/// what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub page_size: Paper,
    pub landscape: bool,
    pub margin_left_cm: f32,
    pub margin_top_cm: f32,
    pub gap_x_cm: f32,
    pub gap_y_cm: f32,
    /// Size used for rows whose dimensions can't be parsed
    pub default_width_cm: f32,
    pub default_height_cm: f32,
    /// Starting font size in points
    pub font_size: f32,
    /// Font sizes never drop below this
    pub min_font_size: f32,
    pub text_padding_cm: f32,
    /// Labels exactly this wide and tall are drawn as circles
    pub circle_size_cm: f32,
    pub line_spacing: f32,
    pub product_column: String,
    pub dimensions_column: String,
    /// TrueType font for label text. Built-in Helvetica when unset.
    pub font: Option<PathBuf>,
    /// TrueType font for the bracketed part of a label. Falls back to `font`.
    pub script_font: Option<PathBuf>,
    /// Encodings tried, in order, after UTF-8 fails
    pub encodings: Vec<String>,
    pub title: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            page_size: Paper::A4,
            landscape: false,
            margin_left_cm: 1.0,
            margin_top_cm: 1.0,
            gap_x_cm: 0.2,
            gap_y_cm: 0.2,
            default_width_cm: 4.5,
            default_height_cm: 3.0,
            font_size: 10.0,
            min_font_size: 4.0,
            text_padding_cm: 0.2,
            circle_size_cm: 3.5,
            line_spacing: 1.2,
            product_column: "Product Name".to_string(),
            dimensions_column: "Dimensions".to_string(),
            font: None,
            script_font: None,
            encodings: vec!["windows-1252".to_string(), "iso-8859-15".to_string()],
            title: "Labels".to_string(),
        }
    }
}

/// Font sizes above this are rejected
pub const MAX_FONT_SIZE: f32 = 1000.0;

impl LabelConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<LabelConfig, PDFError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Check that every length and size is usable for packing
    pub fn validate(&self) -> Result<(), PDFError> {
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;
        let positive = |v: f32| v.is_finite() && v > 0.0;

        for (name, value) in [
            ("margin_left_cm", self.margin_left_cm),
            ("margin_top_cm", self.margin_top_cm),
            ("gap_x_cm", self.gap_x_cm),
            ("gap_y_cm", self.gap_y_cm),
            ("text_padding_cm", self.text_padding_cm),
        ] {
            if !non_negative(value) {
                return Err(PDFError::invalid_config(format!(
                    "{name} must be zero or more, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("default_width_cm", self.default_width_cm),
            ("default_height_cm", self.default_height_cm),
            ("circle_size_cm", self.circle_size_cm),
            ("line_spacing", self.line_spacing),
        ] {
            if !positive(value) {
                return Err(PDFError::invalid_config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !positive(self.min_font_size) || !positive(self.font_size) {
            return Err(PDFError::invalid_config("font sizes must be positive"));
        }
        if self.min_font_size > self.font_size {
            return Err(PDFError::invalid_config(format!(
                "min_font_size {} is larger than font_size {}",
                self.min_font_size, self.font_size
            )));
        }
        if self.font_size > MAX_FONT_SIZE {
            return Err(PDFError::invalid_config(format!(
                "font_size {} is above {MAX_FONT_SIZE}",
                self.font_size
            )));
        }
        Ok(())
    }

    pub fn geometry(&self) -> PageGeometry {
        let (page_width, page_height) = self.page_size.oriented(self.landscape);
        PageGeometry {
            page_width,
            page_height,
            margin_left: Cm(self.margin_left_cm).into(),
            margin_top: Cm(self.margin_top_cm).into(),
            gap_x: Cm(self.gap_x_cm).into(),
            gap_y: Cm(self.gap_y_cm).into(),
        }
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_size: Pt(self.font_size),
            min_font_size: Pt(self.min_font_size),
            padding: Cm(self.text_padding_cm).into(),
            line_spacing: self.line_spacing,
        }
    }

    pub fn default_size(&self) -> (Cm, Cm) {
        (Cm(self.default_width_cm), Cm(self.default_height_cm))
    }

    pub fn circle_size(&self) -> Cm {
        Cm(self.circle_size_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: LabelConfig =
            serde_json::from_str(r#"{ "page_size": "Letter", "font_size": 12.0 }"#).unwrap();
        assert_eq!(config.page_size, Paper::Letter);
        assert_eq!(config.font_size, 12.0);
        assert_eq!(config.product_column, "Product Name");
        assert_eq!(config.default_size(), (Cm(4.5), Cm(3.0)));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<LabelConfig>(r#"{ "fontsize": 12.0 }"#).is_err());
    }

    #[test]
    fn geometry_is_in_points() {
        let geometry = LabelConfig::default().geometry();
        assert!((*geometry.margin_left - 28.3465).abs() < 1e-3);
        assert!((*geometry.gap_x - 5.6693).abs() < 1e-3);
        assert!(geometry.page_height > geometry.page_width);

        let landscape = LabelConfig {
            landscape: true,
            ..LabelConfig::default()
        };
        let geometry = landscape.geometry();
        assert!(geometry.page_width > geometry.page_height);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(LabelConfig::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let invalid = |config: LabelConfig| {
            matches!(config.validate(), Err(PDFError::InvalidConfig(_)))
        };
        let base = LabelConfig::default;

        assert!(invalid(LabelConfig { gap_x_cm: -3.0, ..base() }));
        assert!(invalid(LabelConfig { margin_left_cm: -1.0, ..base() }));
        assert!(invalid(LabelConfig { margin_top_cm: f32::NAN, ..base() }));
        assert!(invalid(LabelConfig { min_font_size: 0.0, ..base() }));
        assert!(invalid(LabelConfig { min_font_size: 12.0, font_size: 10.0, ..base() }));
        assert!(invalid(LabelConfig { font_size: 1.0e8, ..base() }));
        assert!(invalid(LabelConfig { default_width_cm: 0.0, ..base() }));
        assert!(invalid(LabelConfig { circle_size_cm: -3.5, ..base() }));

        // zero margins and gaps are fine
        assert!(LabelConfig { margin_left_cm: 0.0, gap_y_cm: 0.0, ..base() }
            .validate()
            .is_ok());
    }

    #[test]
    fn reads_config_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        std::fs::write(&path, r#"{ "circle_size_cm": 4.0, "landscape": true }"#).unwrap();
        let config = LabelConfig::from_json_file(&path).unwrap();
        assert_eq!(config.circle_size(), Cm(4.0));
        assert!(config.landscape);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            LabelConfig::from_json_file(&path),
            Err(PDFError::Json(_))
        ));
    }
}
