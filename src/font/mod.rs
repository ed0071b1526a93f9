//! Fonts available to documents.
//!
//! A [Font] is either a TrueType / OpenType face that gets embedded into the PDF, or one
//! of the standard fonts that every PDF viewer provides. Both expose the same metrics, so
//! layout code never needs to care which one it is measuring.

mod builtin;
mod embedded;

pub use builtin::BuiltinFont;
pub use embedded::EmbeddedFont;

use crate::refs::{ObjectReferences, RefType};
use crate::{PDFError, Pt};
use owned_ttf_parser::OwnedFace;
use pdf_writer::{Name, Pdf};
use std::io::Write;
use std::path::Path;

/// A font that can be registered with a [crate::Document].
///
/// Typically, fonts are referred to throughout user applications by their id within
/// the document itself, and not by any typed references
pub enum Font {
    Embedded(EmbeddedFont),
    Builtin(BuiltinFont),
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font::Embedded(EmbeddedFont { face }))
    }

    /// Read and parse a font file from disk
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Font, PDFError> {
        let bytes = std::fs::read(path.as_ref())?;
        Font::load(bytes)
    }

    /// The standard Helvetica font
    pub fn helvetica() -> Font {
        Font::Builtin(BuiltinFont::Helvetica)
    }

    /// A human readable name for the font
    pub fn name(&self) -> String {
        match self {
            Font::Embedded(f) => f.name().unwrap_or_else(|| "embedded font".to_string()),
            Font::Builtin(f) => f.base_name().to_string(),
        }
    }

    fn units_per_em(&self) -> f32 {
        match self {
            Font::Embedded(f) => f.face().units_per_em() as f32,
            Font::Builtin(_) => BuiltinFont::UNITS_PER_EM as f32,
        }
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.units_per_em()
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        let ascender = match self {
            Font::Embedded(f) => f.face().ascender(),
            Font::Builtin(_) => BuiltinFont::ASCENDER,
        };
        self.scaling(size) * ascender as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        let descender = match self {
            Font::Embedded(f) => f.face().descender(),
            Font::Builtin(_) => BuiltinFont::DESCENDER,
        };
        self.scaling(size) * descender as f32
    }

    /// Calculate the leading (extra space between lines) for the given font size
    pub fn leading(&self, size: Pt) -> Pt {
        let line_gap = match self {
            Font::Embedded(f) => f.face().line_gap(),
            Font::Builtin(_) => BuiltinFont::LINE_GAP,
        };
        self.scaling(size) * line_gap as f32
    }

    /// Calculate the default line height of the font for the given size. The returned value is
    /// how much to vertically offset a second row of text below a first row of text.
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// Horizontal advance of a single character
    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let units = match self {
            Font::Embedded(f) => f.advance(ch),
            Font::Builtin(f) => f.advance(ch),
        };
        self.scaling(size) * units as f32
    }

    /// Calculate the width of a given string of text. Newlines are ignored.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        text.chars()
            .filter(|&ch| ch != '\n' && ch != '\r')
            .map(|ch| self.advance(ch, size))
            .sum()
    }

    /// Write `text` as a string operand suitable for `Tj`
    pub(crate) fn write_string<W: Write>(&self, text: &str, w: &mut W) -> std::io::Result<()> {
        match self {
            Font::Embedded(f) => f.write_string(text, w),
            Font::Builtin(f) => f.write_string(text, w),
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            Font::Embedded(f) => f.write(refs, font_index, writer),
            Font::Builtin(f) => {
                let id = refs.gen(RefType::Font(font_index));
                writer
                    .type1_font(id)
                    .base_font(Name(f.base_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_metrics_scale_with_size() {
        let font = Font::helvetica();
        assert!((*font.ascent(Pt(10.0)) - 7.18).abs() < 1e-4);
        assert!((*font.line_height(Pt(10.0)) - 12.0).abs() < 1e-4);
        assert!(*font.descent(Pt(10.0)) < 0.0);

        // "Hi" = 722 + 222
        let w = font.width_of_text("Hi", Pt(10.0));
        assert!((*w - 9.44).abs() < 1e-4);
        assert_eq!(font.width_of_text("Hi\n", Pt(10.0)), w);
    }

    #[test]
    fn garbage_bytes_are_not_a_font() {
        assert!(matches!(
            Font::load(b"definitely not a font".to_vec()),
            Err(PDFError::FaceParsing(_))
        ));
    }

    #[test]
    fn missing_font_file_is_an_io_error() {
        assert!(matches!(
            Font::load_file("/nonexistent/font.ttf"),
            Err(PDFError::Io(_))
        ));
    }
}
