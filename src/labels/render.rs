use super::pack::{label_text_block, page_count, LabelFonts, PageGeometry, Placement, TextStyle};
use super::record::Shape;
use super::Warning;
use crate::colour::colours;
use crate::font::Font;
use crate::layout::layout_text_centred;
use crate::page::{Page, Path, ShapeLayout, Stroke};
use crate::units::Pt;
use crate::Document;
use id_arena::Id;
use std::path::Path as FsPath;
use tracing::{debug, warn};

const OUTLINE_WIDTH: Pt = Pt(0.5);

/// Add a font from `path` to `doc`, or return `fallback` with a warning if it can't be
/// loaded
pub fn load_font_or(
    doc: &mut Document,
    path: Option<&FsPath>,
    fallback: Id<Font>,
    warnings: &mut Vec<Warning>,
) -> Id<Font> {
    let Some(path) = path else {
        return fallback;
    };
    match Font::load_file(path) {
        Ok(font) => {
            debug!(font = %font.name(), "loaded {}", path.display());
            doc.add_font(font)
        }
        Err(e) => {
            warn!("failed to load font {}: {e}, using fallback", path.display());
            warnings.push(Warning::FontUnavailable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            fallback
        }
    }
}

/// The outline drawn for a placed label
pub fn label_path(placement: &Placement) -> Path {
    let bounds = placement.bounds();
    match placement.record.shape {
        Shape::Rectangle => Path::Rect(bounds),
        Shape::Circle => Path::Circle {
            centre: bounds.centre(),
            radius: placement.width.min(placement.height) / 2.0,
        },
    }
}

/// Add one page per page index used by `placements` and draw every label on its page: a
/// black shape with a thin grey outline and white text centred inside the padded box
pub fn render_placements(
    doc: &mut Document,
    placements: &[Placement],
    geometry: &PageGeometry,
    style: &TextStyle,
    fonts: LabelFonts,
) {
    let first_page = doc.pages.len();
    for _ in 0..page_count(placements) {
        doc.add_page(Page::new(geometry.page_size(), None));
    }

    for placement in placements {
        let page = &mut doc.pages[first_page + placement.page];
        page.add_shape(ShapeLayout {
            path: label_path(placement),
            fill: Some(colours::BLACK),
            stroke: Some(Stroke::solid(colours::MID_GREY, OUTLINE_WIDTH)),
        });

        let block = label_text_block(&placement.record, fonts, style.line_spacing);
        let text_box = placement.bounds().inset(style.padding, style.padding);
        layout_text_centred(
            &doc.fonts,
            page,
            &block,
            placement.fit.size,
            colours::WHITE,
            text_box,
        );
    }
}
