//! Metrics for the PDF standard Helvetica font.
//!
//! Standard fonts are never embedded: viewers supply them, so all we need are the advance
//! widths to measure text. Widths come from the Adobe core font metrics, in 1/1000 em, and
//! cover printable ASCII. Latin-1 characters fall back to an average width, and anything
//! outside WinAnsi is drawn as `?`.

use std::io::Write;

/// Advance widths for U+0020..=U+007E. Index = (char as usize) - 0x20.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0 - 9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A - Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a - z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

const LATIN1_WIDTH: u16 = 556;

/// One of the standard 14 fonts every PDF viewer provides
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BuiltinFont {
    Helvetica,
}

impl BuiltinFont {
    pub fn base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
        }
    }

    pub(crate) const UNITS_PER_EM: u16 = 1000;
    pub(crate) const ASCENDER: i16 = 718;
    pub(crate) const DESCENDER: i16 = -207;
    // gives a line height of 1.2em
    pub(crate) const LINE_GAP: i16 = 275;

    /// The character actually drawn for `ch`
    fn encodable(ch: char) -> char {
        match ch {
            ' '..='~' | '\u{A0}'..='\u{FF}' => ch,
            _ => '?',
        }
    }

    /// Advance width of `ch` in 1/1000 em
    pub(crate) fn advance(&self, ch: char) -> u16 {
        match Self::encodable(ch) {
            ch @ ' '..='~' => HELVETICA_WIDTHS[ch as usize - 0x20],
            _ => LATIN1_WIDTH,
        }
    }

    /// Write `text` as a WinAnsi literal string operand
    pub(crate) fn write_string<W: Write>(&self, text: &str, w: &mut W) -> std::io::Result<()> {
        let mut bytes = Vec::with_capacity(text.len() + 2);
        bytes.push(b'(');
        for ch in text.chars().map(Self::encodable) {
            match ch {
                '(' | ')' | '\\' => {
                    bytes.push(b'\\');
                    bytes.push(ch as u8);
                }
                // WinAnsi agrees with Latin-1 for everything encodable() lets through
                _ => bytes.push(ch as u32 as u8),
            }
        }
        bytes.push(b')');
        w.write_all(&bytes)
    }
}
