//! Conversion of page contents into PDF content stream operators.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, Path, ShapeLayout, SpanFont, SpanLayout};
use crate::units::Pt;
use id_arena::Arena;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use std::io::Write;

/// Control point distance for approximating a quarter circle with one cubic Bézier
const KAPPA: f32 = 0.552_284_8;

/// Zlib-compress a stream for use with `/FlateDecode`
pub(crate) fn deflate(data: &[u8]) -> Vec<u8> {
    compress_to_vec_zlib(data, CompressionLevel::DefaultCompression as u8)
}

/// Renders page contents to a PDF content stream.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
            PageContents::Shape(shape) => render_shape(&mut content, shape)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        *current_font.size
    )?;
    current_colour.write_fill(content)?;

    for span in spans.iter() {
        // a font that isn't in the document can't be referenced, skip the span
        let Some(font) = fonts.get(span.font.id) else {
            continue;
        };

        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                *current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            current_colour.write_fill(content)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", *span.coords.0, *span.coords.1)?;
        font.write_string(&span.text, content)?;
        write!(content, " Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_shape(content: &mut Vec<u8>, shape: &ShapeLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;

    if let Some(stroke) = shape.stroke {
        write!(content, "{} w\n", *stroke.width)?;
        if let Some((on, off)) = stroke.dash {
            write!(content, "[{} {}] 0 d\n", *on, *off)?;
        }
        stroke.colour.write_stroke(content)?;
    }
    if let Some(fill) = shape.fill {
        fill.write_fill(content)?;
    }

    match &shape.path {
        Path::Rect(r) => {
            write!(
                content,
                "{} {} {} {} re\n",
                *r.x1,
                *r.y1,
                *r.width(),
                *r.height()
            )?;
        }
        Path::Circle { centre, radius } => write_circle(content, *centre, *radius)?,
        Path::Line { from, to } => {
            write!(content, "{} {} m\n", *from.0, *from.1)?;
            write!(content, "{} {} l\n", *to.0, *to.1)?;
        }
        Path::Polygon(points) => {
            let mut points = points.iter();
            if let Some((x, y)) = points.next() {
                write!(content, "{} {} m\n", **x, **y)?;
                for (x, y) in points {
                    write!(content, "{} {} l\n", **x, **y)?;
                }
                write!(content, "h\n")?;
            }
        }
    }

    let paint = match (shape.fill.is_some(), shape.stroke.is_some()) {
        (true, true) => "B",
        (true, false) => "f",
        (false, true) => "S",
        (false, false) => "n",
    };
    write!(content, "{paint}\n")?;

    write!(content, "Q\n")?;
    Ok(())
}

/// Four cubic Béziers, counter-clockwise from the rightmost point
#[allow(clippy::write_with_newline)]
fn write_circle(content: &mut Vec<u8>, centre: (Pt, Pt), radius: Pt) -> std::io::Result<()> {
    let (cx, cy) = (*centre.0, *centre.1);
    let r = *radius;
    let k = r * KAPPA;

    write!(content, "{} {} m\n", cx + r, cy)?;
    write!(content, "{} {} {} {} {} {} c\n", cx + r, cy + k, cx + k, cy + r, cx, cy + r)?;
    write!(content, "{} {} {} {} {} {} c\n", cx - k, cy + r, cx - r, cy + k, cx - r, cy)?;
    write!(content, "{} {} {} {} {} {} c\n", cx - r, cy - k, cx - k, cy - r, cx, cy - r)?;
    write!(content, "{} {} {} {} {} {} c\n", cx + k, cy - r, cx + r, cy - k, cx + r, cy)?;
    write!(content, "h\n")
}
