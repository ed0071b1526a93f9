//! Text layout utilities for positioning content on pages.
//!
//! Text is grouped into a [`TextBlock`](crate::layout::TextBlock) of paragraphs, each in its
//! own font. Blocks are word-wrapped to a width, measured, and drawn centred inside a
//! rectangle. [`fit_font_size`](crate::layout::fit_font_size) searches for the largest font
//! size at which a block fits a box.
//!
//! # Example
//!
//! ```
//! use pdf_labels::{colours, Document, Font, Page, Pt, Rect};
//! use pdf_labels::layout::{fit_font_size, layout_text_centred, Margins, TextBlock};
//! use pdf_labels::pagesize;
//!
//! let mut doc = Document::default();
//! let helvetica = doc.add_font(Font::helvetica());
//! let mut page = Page::new(pagesize::A4, Some(Margins::all(Pt(36.0))));
//!
//! let mut block = TextBlock::new(1.2);
//! block.push("Hello, world!", helvetica);
//!
//! let bounds = Rect::from_origin(Pt(72.0), Pt(72.0), Pt(60.0), Pt(30.0));
//! let fit = fit_font_size(&doc.fonts, &block, (bounds.width(), bounds.height()), Pt(12.0), Pt(4.0));
//! assert!(fit.size <= Pt(12.0));
//!
//! layout_text_centred(&doc.fonts, &mut page, &block, fit.size, colours::BLACK, bounds);
//! doc.add_page(page);
//! ```

mod fit;
mod margins;
mod text;

pub use fit::*;
pub use margins::*;
pub use text::*;
