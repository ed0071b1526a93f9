use super::{Guides, Measurement, WallLayout, WallPlan, WallWarning};
use crate::colour::{colours, Colour};
use crate::font::Font;
use crate::layout::{fit_font_size, layout_text_centred, Margins, TextBlock};
use crate::page::{Page, Path, ShapeLayout, SpanFont, SpanLayout, Stroke};
use crate::rect::Rect;
use crate::units::{Cm, Pt};
use crate::{Document, Info, PDFError};
use id_arena::{Arena, Id};
use std::path::{Path as FsPath, PathBuf};
use tracing::info;

const TITLE_SIZE: Pt = Pt(14.0);
const NOTE_SIZE: Pt = Pt(6.0);
const FRAME_TEXT_MAX: Pt = Pt(8.0);
const FRAME_TEXT_MIN: Pt = Pt(3.0);
const GUIDE_WIDTH: Pt = Pt(0.6);
const ARROW_LENGTH: Pt = Pt(4.0);
const ARROW_HALF_WIDTH: Pt = Pt(1.5);

/// Maps wall coordinates in centimetres onto a page
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WallTransform {
    /// Points per centimetre of wall
    pub scale: f32,
    pub origin: (Pt, Pt),
}

impl WallTransform {
    /// Scale a `width` by `height` wall to fit `bounds`, centred
    pub fn fit(width: f32, height: f32, bounds: Rect) -> WallTransform {
        let scale = (*bounds.width() / width).min(*bounds.height() / height);
        let origin = (
            bounds.x1 + (bounds.width() - Pt(width * scale)) / 2.0,
            bounds.y1 + (bounds.height() - Pt(height * scale)) / 2.0,
        );
        WallTransform { scale, origin }
    }

    pub fn point(&self, x: f32, y: f32) -> (Pt, Pt) {
        (self.origin.0 + Pt(x * self.scale), self.origin.1 + Pt(y * self.scale))
    }

    pub fn length(&self, v: f32) -> Pt {
        Pt(v * self.scale)
    }

    /// Page rectangle for a box given by its bottom-left corner
    pub fn rect(&self, x: f32, y: f32, width: f32, height: f32) -> Rect {
        let (x, y) = self.point(x, y);
        Rect::from_origin(x, y, self.length(width), self.length(height))
    }
}

/// `"12.3 cm"`, with a suffix when both edges are measured
pub fn format_measurement(value: f32, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{value:.1} cm ({suffix})"),
        None => format!("{value:.1} cm"),
    }
}

fn dashed(colour: Colour) -> Stroke {
    Stroke::dashed(colour, GUIDE_WIDTH, Pt(1.0), Pt(2.0))
}

fn line(page: &mut Page, from: (Pt, Pt), to: (Pt, Pt), stroke: Stroke) {
    page.add_shape(ShapeLayout {
        path: Path::Line { from, to },
        fill: None,
        stroke: Some(stroke),
    });
}

/// A dotted line ending in an arrowhead at `to`. Only vertical arrows are drawn.
fn arrow(page: &mut Page, from: (Pt, Pt), to: (Pt, Pt), colour: Colour) {
    line(page, from, to, dashed(colour));
    let back = if from.1 > to.1 { ARROW_LENGTH } else { -ARROW_LENGTH };
    page.add_shape(ShapeLayout {
        path: Path::Polygon(vec![
            to,
            (to.0 - ARROW_HALF_WIDTH, to.1 + back),
            (to.0 + ARROW_HALF_WIDTH, to.1 + back),
        ]),
        fill: Some(colour),
        stroke: None,
    });
}

/// Draw a single line of text centred on `x`, with its baseline at `y`
fn centred_note(
    page: &mut Page,
    fonts: &Arena<Font>,
    font: Id<Font>,
    text: String,
    x: Pt,
    y: Pt,
    colour: Colour,
) {
    let width = fonts
        .get(font)
        .map(|f| f.width_of_text(&text, NOTE_SIZE))
        .unwrap_or_default();
    page.add_span(SpanLayout {
        text,
        font: SpanFont {
            id: font,
            size: NOTE_SIZE,
        },
        colour,
        coords: (x - width / 2.0, y),
    });
}

fn draw_guides(
    page: &mut Page,
    fonts: &Arena<Font>,
    font: Id<Font>,
    guides: &Guides,
    layout: &WallLayout,
    t: &WallTransform,
) {
    let (w, h) = (layout.width, layout.height);
    if guides.diagonals {
        line(page, t.point(0.0, 0.0), t.point(w, h), dashed(colours::FADED_RED));
        line(page, t.point(0.0, h), t.point(w, 0.0), dashed(colours::FADED_RED));
    }
    if guides.centre_line {
        line(page, t.point(w / 2.0, 0.0), t.point(w / 2.0, h), dashed(colours::LIGHT_GREY));
    }
    if guides.midline {
        line(page, t.point(0.0, h / 2.0), t.point(w, h / 2.0), dashed(colours::DARK_GREY));
        let (x, y) = t.point(w / 2.0, h / 2.0);
        centred_note(
            page,
            fonts,
            font,
            "Wall midline".to_string(),
            x,
            y - NOTE_SIZE * 1.5,
            colours::DARK_GREY,
        );
    }
}

fn draw_measurements(
    page: &mut Page,
    fonts: &Arena<Font>,
    font: Id<Font>,
    guides: &Guides,
    layout: &WallLayout,
    measurements: &[Measurement],
    t: &WallTransform,
) {
    let both = guides.top_measurements && guides.bottom_measurements;
    for m in measurements {
        let top = layout.height - m.from_top;
        if guides.top_measurements {
            let (x, frame_top) = t.point(m.x, top);
            arrow(page, t.point(m.x, layout.height), (x, frame_top), colours::BLUE);
            centred_note(
                page,
                fonts,
                font,
                format_measurement(m.from_top, both.then_some("T")),
                x,
                frame_top + NOTE_SIZE * 0.5,
                colours::BLUE,
            );
        }
        if guides.bottom_measurements {
            let (x, frame_bottom) = t.point(m.x, m.from_bottom);
            arrow(page, t.point(m.x, 0.0), (x, frame_bottom), colours::GREEN);
            centred_note(
                page,
                fonts,
                font,
                format_measurement(m.from_bottom, both.then_some("B")),
                x,
                frame_bottom - NOTE_SIZE * 1.5,
                colours::GREEN,
            );
        }
    }
}

/// Draw a resolved plan on a single page: the wall, decorations, guides, frames with
/// their labels and nominal sizes, then the measurements
pub fn render_wall(plan: &WallPlan, layout: &WallLayout) -> Document {
    let mut doc = Document::default();
    let mut doc_info = Info::new();
    doc_info.subject("Frame wall plan").keyword("frames");
    if let Some(title) = &plan.title {
        doc_info.title(title);
    }
    doc.set_info(doc_info);
    let font = doc.add_font(Font::helvetica());

    let margin: Pt = Cm(1.5).into();
    let mut page = Page::new(
        plan.page_size.oriented(plan.landscape()),
        Some(Margins::all(margin)),
    );

    let mut area = page.content_box;
    if let Some(title) = &plan.title {
        let title_width = doc
            .fonts
            .get(font)
            .map(|f| f.width_of_text(title, TITLE_SIZE))
            .unwrap_or_default();
        page.add_span(SpanLayout {
            text: title.clone(),
            font: SpanFont {
                id: font,
                size: TITLE_SIZE,
            },
            colour: colours::BLACK,
            coords: (
                area.x1 + (area.width() - title_width) / 2.0,
                area.y2 - TITLE_SIZE,
            ),
        });
        area.y2 -= TITLE_SIZE * 2.0;
    }

    let t = WallTransform::fit(layout.width, layout.height, area);
    page.add_shape(ShapeLayout {
        path: Path::Rect(t.rect(0.0, 0.0, layout.width, layout.height)),
        fill: Some(colours::WHITE_SMOKE),
        stroke: Some(Stroke::solid(colours::MID_GREY, Pt(1.0))),
    });

    for decoration in &plan.decorations {
        let bounds = t.rect(decoration.x, decoration.y, decoration.width, decoration.height);
        page.add_shape(ShapeLayout {
            path: Path::Rect(bounds),
            fill: Some(decoration.fill),
            stroke: None,
        });
        let mut block = TextBlock::new(1.2);
        block.push(decoration.label.as_str(), font);
        let fit = fit_font_size(
            &doc.fonts,
            &block,
            (bounds.width(), bounds.height()),
            NOTE_SIZE,
            FRAME_TEXT_MIN,
        );
        layout_text_centred(
            &doc.fonts,
            &mut page,
            &block,
            fit.size,
            decoration.text_colour,
            bounds,
        );
    }

    draw_guides(&mut page, &doc.fonts, font, &plan.guides, layout, &t);

    for frame in &layout.frames {
        let b = &frame.bounds;
        let bounds = t.rect(b.left(), b.bottom(), b.width, b.height);
        page.add_shape(ShapeLayout {
            path: Path::Rect(bounds),
            fill: Some(colours::WHITE),
            stroke: Some(Stroke::solid(colours::BLACK, Pt(1.5))),
        });

        let mut block = TextBlock::new(1.2);
        block
            .push(frame.label.as_str(), font)
            .push(format!("{:.1}x{:.1}", frame.nominal.0, frame.nominal.1), font);
        let inner = bounds.inset(Pt(2.0), Pt(2.0));
        let fit = fit_font_size(
            &doc.fonts,
            &block,
            (inner.width(), inner.height()),
            FRAME_TEXT_MAX,
            FRAME_TEXT_MIN,
        );
        layout_text_centred(&doc.fonts, &mut page, &block, fit.size, colours::BLACK, inner);
    }

    let measurements = layout.measurements();
    draw_measurements(&mut page, &doc.fonts, font, &plan.guides, layout, &measurements, &t);

    doc.add_page(page);
    doc
}

/// Summary of a rendered wall plan
#[derive(Debug, Clone, PartialEq)]
pub struct WallReport {
    pub output: PathBuf,
    pub frames: usize,
    pub measurements: Vec<Measurement>,
    pub warnings: Vec<WallWarning>,
}

/// Read a plan from `input`, resolve it and write the diagram to `output`
pub fn create_wall_pdf(input: &FsPath, output: &FsPath) -> Result<WallReport, PDFError> {
    if !input.is_file() {
        return Err(PDFError::InputNotFound(input.to_path_buf()));
    }
    let plan = WallPlan::from_json_file(input)?;
    let layout = plan.resolve()?;
    let bytes = render_wall(&plan, &layout).render()?;
    std::fs::write(output, bytes)?;

    info!(frames = layout.frames.len(), "wrote {}", output.display());
    Ok(WallReport {
        output: output.to_path_buf(),
        frames: layout.frames.len(),
        measurements: layout.measurements(),
        warnings: layout.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageContents;
    use crate::pagesize::Paper;
    use crate::wall::{Anchor, FrameSpec, Relative};

    fn plan() -> WallPlan {
        WallPlan {
            title: Some("Hallway".into()),
            width: 200.0,
            height: 100.0,
            spacing: 5.0,
            frames: vec![
                FrameSpec {
                    id: "a".into(),
                    label: None,
                    width: 30.0,
                    height: 40.0,
                    rotated: false,
                    anchor: Anchor::Centre { dx: 0.0, dy: 0.0 },
                },
                FrameSpec {
                    id: "b".into(),
                    label: Some("Print".into()),
                    width: 20.0,
                    height: 20.0,
                    rotated: false,
                    anchor: Anchor::RightOf(Relative {
                        of: "a".into(),
                        align: Default::default(),
                        offset: 0.0,
                    }),
                },
            ],
            decorations: Vec::new(),
            guides: Guides::default(),
            page_size: Paper::A4,
            landscape: None,
        }
    }

    #[test]
    fn walls_are_scaled_to_fit_and_centred() {
        let bounds = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(400.0), Pt(400.0));
        let t = WallTransform::fit(200.0, 100.0, bounds);
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.origin, (Pt(0.0), Pt(100.0)));
        assert_eq!(t.point(200.0, 100.0), (Pt(400.0), Pt(300.0)));
    }

    #[test]
    fn measurement_labels() {
        assert_eq!(format_measurement(119.3, None), "119.3 cm");
        assert_eq!(format_measurement(124.76, Some("B")), "124.8 cm (B)");
    }

    #[test]
    fn draws_frames_and_measurements() {
        let plan = plan();
        let layout = plan.resolve().unwrap();
        let doc = render_wall(&plan, &layout);
        assert_eq!(doc.pages.len(), 1);

        let page = &doc.pages[0];
        assert!(page.width() > page.height());
        let texts: Vec<&str> = page
            .contents
            .iter()
            .filter_map(|c| match c {
                PageContents::Text(spans) => Some(spans),
                _ => None,
            })
            .flatten()
            .map(|s| s.text.as_str())
            .collect();
        assert!(texts.contains(&"Hallway"));
        assert!(texts.contains(&"Print"));
        assert!(texts.contains(&"30.0x40.0"));
        // a's top is 20cm above the middle of a 100cm wall
        assert!(texts.contains(&"30.0 cm"));
        assert!(texts.contains(&"40.0 cm"));
    }
}
