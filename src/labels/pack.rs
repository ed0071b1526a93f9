//! Shelf packing of labels onto pages.
//!
//! Labels are sorted by size and laid left to right in rows from the top of the page. A
//! label that would cross the right margin starts a new row below the tallest label of the
//! current row; a row that would cross the bottom margin starts a new page. The bottom
//! margin is the same as the top margin, and the right margin the same as the left.

use super::record::LabelRecord;
use crate::font::Font;
use crate::layout::{fit_font_size, FitResult, TextBlock};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::{Arena, Id};
use tracing::debug;

/// Page size, margins and gaps, all in points
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    pub page_width: Pt,
    pub page_height: Pt,
    pub margin_left: Pt,
    pub margin_top: Pt,
    pub gap_x: Pt,
    pub gap_y: Pt,
}

impl PageGeometry {
    pub fn page_size(&self) -> PageSize {
        (self.page_width, self.page_height)
    }

    /// x coordinate no label may extend past without starting a new row
    pub fn right_limit(&self) -> Pt {
        self.page_width - self.margin_left
    }

    pub fn printable_width(&self) -> Pt {
        self.page_width - self.margin_left * 2.0
    }

    pub fn printable_height(&self) -> Pt {
        self.page_height - self.margin_top * 2.0
    }
}

/// How label text is sized
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: Pt,
    pub min_font_size: Pt,
    /// Inset on every side between a label's edge and its text
    pub padding: Pt,
    pub line_spacing: f32,
}

/// The fonts label text is drawn in
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LabelFonts {
    pub primary: Id<Font>,
    /// Used for the trailing bracketed part of a label
    pub script: Id<Font>,
}

/// Where the next label goes. `y` is the top edge of the current row.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub x: Pt,
    pub y: Pt,
    pub row_max_height: Pt,
}

impl Cursor {
    pub fn new(geometry: &PageGeometry) -> Cursor {
        Cursor {
            page: 0,
            x: geometry.margin_left,
            y: geometry.page_height - geometry.margin_top,
            row_max_height: Pt(0.0),
        }
    }

    /// Reserve a `width` by `height` slot, returning its page and bottom-left corner
    pub fn place(&mut self, geometry: &PageGeometry, width: Pt, height: Pt) -> (usize, (Pt, Pt)) {
        if self.x + width > geometry.right_limit() {
            self.x = geometry.margin_left;
            self.y -= self.row_max_height + geometry.gap_y;
            self.row_max_height = Pt(0.0);
        }
        if self.y - height < geometry.margin_top {
            self.page += 1;
            self.x = geometry.margin_left;
            self.y = geometry.page_height - geometry.margin_top;
            self.row_max_height = Pt(0.0);
        }

        let origin = (self.x, self.y - height);
        self.x += width + geometry.gap_x;
        self.row_max_height = self.row_max_height.max(height);
        (self.page, origin)
    }
}

/// A label with its final position and text size
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub record: LabelRecord,
    /// 0-based page index
    pub page: usize,
    /// Bottom-left corner of the label's box
    pub origin: (Pt, Pt),
    pub width: Pt,
    pub height: Pt,
    pub fit: FitResult,
}

impl Placement {
    pub fn bounds(&self) -> Rect {
        Rect::from_origin(self.origin.0, self.origin.1, self.width, self.height)
    }

    pub fn font_size(&self) -> Pt {
        self.fit.size
    }
}

/// Stable sort by width, then height. Equal sizes keep their input order.
pub fn sort_records(records: &mut [LabelRecord]) {
    records.sort_by(|a, b| {
        a.width
            .0
            .total_cmp(&b.width.0)
            .then_with(|| a.height.0.total_cmp(&b.height.0))
    });
}

/// The paragraphs drawn on a label: the leading text in the primary font, then any
/// bracketed part in the script font
pub fn label_text_block(record: &LabelRecord, fonts: LabelFonts, line_spacing: f32) -> TextBlock {
    let text = record.display_text();
    let mut block = TextBlock::new(line_spacing);
    block.push(text.primary, fonts.primary);
    if let Some(script) = text.script {
        block.push(script, fonts.script);
    }
    block
}

/// Sort and place every record, choosing a font size for each. Always returns one
/// placement per record.
pub fn pack(
    mut records: Vec<LabelRecord>,
    geometry: &PageGeometry,
    style: &TextStyle,
    fonts: &Arena<Font>,
    label_fonts: LabelFonts,
) -> Vec<Placement> {
    sort_records(&mut records);

    let mut cursor = Cursor::new(geometry);
    records
        .into_iter()
        .map(|record| {
            let width: Pt = record.width.into();
            let height: Pt = record.height.into();
            if width > geometry.printable_width() || height > geometry.printable_height() {
                debug!(item = %record.text, "label is larger than the printable area");
            }

            let (page, origin) = cursor.place(geometry, width, height);

            let block = label_text_block(&record, label_fonts, style.line_spacing);
            let text_bounds = (
                (width - style.padding * 2.0).max(Pt(0.0)),
                (height - style.padding * 2.0).max(Pt(0.0)),
            );
            let fit = fit_font_size(
                fonts,
                &block,
                text_bounds,
                style.font_size,
                style.min_font_size,
            );
            if !fit.fits {
                debug!(item = %record.text, size = *fit.size, "text overflows its label");
            }

            Placement {
                record,
                page,
                origin,
                width,
                height,
                fit,
            }
        })
        .collect()
}

/// Number of pages needed for `placements`
pub fn page_count(placements: &[Placement]) -> usize {
    placements.iter().map(|p| p.page + 1).max().unwrap_or(0)
}
