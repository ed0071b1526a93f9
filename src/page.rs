use crate::colour::Colour;
use crate::content::{deflate, render_contents};
use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Filter, Finish, Name, Pdf};

/// The font and size a span of text is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text in a single font and colour, starting at a baseline position
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Start of the baseline, in page coordinates
    pub coords: (Pt, Pt),
}

/// Geometry of a shape, in page coordinates
#[derive(Clone, PartialEq, Debug)]
pub enum Path {
    Rect(Rect),
    Circle { centre: (Pt, Pt), radius: Pt },
    Line { from: (Pt, Pt), to: (Pt, Pt) },
    /// A closed polygon
    Polygon(Vec<(Pt, Pt)>),
}

/// How the outline of a shape is drawn
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Stroke {
    pub colour: Colour,
    pub width: Pt,
    /// Dash length and gap length; solid when [None]
    pub dash: Option<(Pt, Pt)>,
}

impl Stroke {
    pub fn solid(colour: Colour, width: Pt) -> Stroke {
        Stroke {
            colour,
            width,
            dash: None,
        }
    }

    pub fn dashed(colour: Colour, width: Pt, on: Pt, off: Pt) -> Stroke {
        Stroke {
            colour,
            width,
            dash: Some((on, off)),
        }
    }
}

/// A path that is filled, outlined, or both
#[derive(Clone, PartialEq, Debug)]
pub struct ShapeLayout {
    pub path: Path,
    pub fill: Option<Colour>,
    pub stroke: Option<Stroke>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Shape(ShapeLayout),
}

/// A single page in the document
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    /// Create a new, empty page. If margins are provided, the content box is inset from
    /// the page edges by those margins
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    /// Add several spans that are drawn together
    pub fn add_spans(&mut self, spans: Vec<SpanLayout>) {
        if !spans.is_empty() {
            self.contents.push(PageContents::Text(spans));
        }
    }

    pub fn add_shape(&mut self, shape: ShapeLayout) {
        self.contents.push(PageContents::Shape(shape));
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.get_or_gen(RefType::Page(page_index));
        let parent = refs.get_or_gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));
        let font_refs: Vec<(String, pdf_writer::Ref)> = fonts
            .iter()
            .map(|(font_id, _)| {
                let index = font_id.index();
                (format!("F{index}"), refs.get_or_gen(RefType::Font(index)))
            })
            .collect();

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (name, font_ref) in font_refs.iter() {
            resource_fonts.pair(Name(name.as_bytes()), *font_ref);
        }
        resource_fonts.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = deflate(&rendered);
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A4;

    #[test]
    fn margins_define_the_content_box() {
        let page = Page::new(A4, Some(Margins::all(Pt(20.0))));
        assert_eq!(page.content_box.x1, Pt(20.0));
        assert_eq!(page.content_box.y2, A4.1 - Pt(20.0));
        assert_eq!(page.width(), A4.0);

        let bare = Page::new(A4, None);
        assert_eq!(bare.content_box, bare.media_box);
    }

    #[test]
    fn empty_span_groups_are_dropped() {
        let mut page = Page::new(A4, None);
        page.add_spans(Vec::new());
        assert!(page.contents.is_empty());
    }
}
