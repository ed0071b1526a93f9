use crate::colour::Colour;
use crate::font::Font;
use crate::page::*;
use crate::rect::Rect;
use crate::units::Pt;
use id_arena::{Arena, Id};

/// Calculates the vertical offset from a text coordinate to the font's baseline.
///
/// In PDF, text coordinates specify the baseline position. This function returns
/// the negative ascent value, which can be added to a y-coordinate to account
/// for the font's ascender height when positioning text from a top reference point.
pub fn baseline_offset(font: &Font, size: Pt) -> Pt {
    -font.ascent(size)
}

/// A piece of text that starts on its own line and is drawn in a single font
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub font: Id<Font>,
}

/// A block of paragraphs laid out together, one under the other. Line height is
/// `line_spacing` times the font size for every line, whichever font it uses.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub paragraphs: Vec<Paragraph>,
    pub line_spacing: f32,
}

/// A single wrapped line of a [TextBlock]
#[derive(Clone, Debug, PartialEq)]
pub struct LineLayout {
    pub text: String,
    pub width: Pt,
    pub font: Id<Font>,
}

impl TextBlock {
    pub fn new(line_spacing: f32) -> TextBlock {
        TextBlock {
            paragraphs: Vec::new(),
            line_spacing,
        }
    }

    /// Append a paragraph, skipping it if it has no visible text
    pub fn push<S: Into<String>>(&mut self, text: S, font: Id<Font>) -> &mut Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.paragraphs.push(Paragraph { text, font });
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Distance between consecutive baselines
    pub fn leading(&self, size: Pt) -> Pt {
        size * self.line_spacing
    }

    /// Word-wrap every paragraph to `max_width`. Words are never split: a word wider
    /// than `max_width` sits on its own line and overflows it.
    pub fn lines(&self, fonts: &Arena<Font>, size: Pt, max_width: Pt) -> Vec<LineLayout> {
        let mut lines = Vec::new();
        for paragraph in self.paragraphs.iter() {
            let Some(font) = fonts.get(paragraph.font) else {
                continue;
            };
            for (text, width) in wrap_words(&paragraph.text, max_width, |s| {
                font.width_of_text(s, size)
            }) {
                lines.push(LineLayout {
                    text,
                    width,
                    font: paragraph.font,
                });
            }
        }
        lines
    }

    /// Width and height of the wrapped block
    pub fn measure(&self, fonts: &Arena<Font>, size: Pt, max_width: Pt) -> (Pt, Pt) {
        let lines = self.lines(fonts, size, max_width);
        let width = lines
            .iter()
            .map(|l| l.width)
            .fold(Pt(0.0), |acc, w| acc.max(w));
        let height = self.leading(size) * lines.len() as f32;
        (width, height)
    }
}

/// Greedy word wrapping. Explicit newlines always break. Returns each line with its
/// measured width.
pub fn wrap_words<F>(text: &str, max_width: Pt, width_of: F) -> Vec<(String, Pt)>
where
    F: Fn(&str) -> Pt,
{
    let mut lines: Vec<(String, Pt)> = Vec::new();

    for hard_line in text.replace("\r\n", "\n").replace('\r', "\n").split('\n') {
        let mut current = String::new();
        for word in hard_line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }

            let candidate = format!("{current} {word}");
            if width_of(&candidate) <= max_width {
                current = candidate;
            } else {
                let width = width_of(&current);
                lines.push((std::mem::take(&mut current), width));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            let width = width_of(&current);
            lines.push((current, width));
        }
    }

    lines
}

/// Lay a [TextBlock] out inside `bounds`: the block is centred vertically and each line is
/// centred horizontally. Lines that are too wide, or a block that is too tall, overflow
/// `bounds` evenly on both sides rather than being clipped.
///
/// Returns the height of the laid out block.
pub fn layout_text_centred(
    fonts: &Arena<Font>,
    page: &mut Page,
    block: &TextBlock,
    size: Pt,
    colour: Colour,
    bounds: Rect,
) -> Pt {
    let lines = block.lines(fonts, size, bounds.width());
    let leading = block.leading(size);
    let height = leading * lines.len() as f32;
    let top = bounds.y1 + (bounds.height() + height) / 2.0;

    let mut spans = Vec::with_capacity(lines.len());
    for (i, line) in lines.into_iter().enumerate() {
        let Some(font) = fonts.get(line.font) else {
            continue;
        };
        // centre the glyph box (ascent to descent) within the line's slot
        let slack = (leading - (font.ascent(size) - font.descent(size))) / 2.0;
        let baseline = top - leading * i as f32 - slack + baseline_offset(font, size);
        let x = bounds.x1 + (bounds.width() - line.width) / 2.0;

        spans.push(SpanLayout {
            text: line.text,
            font: SpanFont {
                id: line.font,
                size,
            },
            colour,
            coords: (x, baseline),
        });
    }
    page.add_spans(spans);

    height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours;
    use crate::pagesize::A4;

    fn char_widths(s: &str) -> Pt {
        Pt(s.chars().count() as f32)
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_words("the quick brown fox", Pt(10.0), char_widths);
        let text: Vec<&str> = lines.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(text, vec!["the quick", "brown fox"]);
        assert_eq!(lines[0].1, Pt(9.0));
    }

    #[test]
    fn long_words_overflow_instead_of_splitting() {
        let lines = wrap_words("a extraordinarily b", Pt(5.0), char_widths);
        let text: Vec<&str> = lines.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(text, vec!["a", "extraordinarily", "b"]);
        assert_eq!(lines[1].1, Pt(15.0));
    }

    #[test]
    fn newlines_force_breaks_and_blank_text_is_empty() {
        let lines = wrap_words("one\r\ntwo\n\nthree", Pt(100.0), char_widths);
        assert_eq!(lines.len(), 3);
        assert!(wrap_words("   ", Pt(100.0), char_widths).is_empty());
    }

    #[test]
    fn block_measures_widest_line_and_total_leading() {
        let mut fonts = Arena::new();
        let helvetica = fonts.alloc(Font::helvetica());

        let mut block = TextBlock::new(1.2);
        block.push("Hi", helvetica).push("  ", helvetica).push("Hi Hi", helvetica);
        assert_eq!(block.paragraphs.len(), 2);

        let (w, h) = block.measure(&fonts, Pt(10.0), Pt(1000.0));
        let hi_hi = fonts[helvetica].width_of_text("Hi Hi", Pt(10.0));
        assert_eq!(w, hi_hi);
        assert!((*h - 24.0).abs() < 1e-4);
    }

    #[test]
    fn centred_layout_stays_within_generous_bounds() {
        let mut fonts = Arena::new();
        let helvetica = fonts.alloc(Font::helvetica());
        let mut page = Page::new(A4, None);

        let mut block = TextBlock::new(1.2);
        block.push("Olive Oil", helvetica);
        let bounds = Rect::from_origin(Pt(100.0), Pt(100.0), Pt(200.0), Pt(50.0));
        let height = layout_text_centred(&fonts, &mut page, &block, Pt(10.0), colours::WHITE, bounds);
        assert!((*height - 12.0).abs() < 1e-4);

        let PageContents::Text(spans) = &page.contents[0] else {
            panic!("expected text");
        };
        let (x, y) = spans[0].coords;
        let width = fonts[helvetica].width_of_text("Olive Oil", Pt(10.0));
        assert!((*(x - Pt(100.0)) - *(Pt(200.0) - width) / 2.0).abs() < 1e-3);
        assert!(y > bounds.y1 && y < bounds.y2);
    }
}
