use crate::refs::{ObjectReferences, RefType};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;
use std::io::Write;

/// Max entries in a single `beginbfchar` block of a ToUnicode CMap
const BFCHAR_BLOCK: usize = 100;

/// A TrueType / OpenType face that is embedded in its entirety in the generated PDF. Text
/// drawn with it is encoded as 2-byte glyph ids (Identity-H), so any script the face
/// covers can be drawn, as long as it doesn't need shaping.
pub struct EmbeddedFont {
    pub face: OwnedFace,
}

impl EmbeddedFont {
    pub(crate) fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn name_entry(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    /// Glyph id used to draw `ch`; missing characters fall back to U+FFFD, then `?`, then
    /// the `.notdef` glyph
    pub fn glyph_id(&self, ch: char) -> u16 {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .map(|gid| gid.0)
            .unwrap_or(0)
    }

    /// Advance width of `ch` in font units
    pub(crate) fn advance(&self, ch: char) -> u16 {
        self.face()
            .glyph_hor_advance(GlyphId(self.glyph_id(ch)))
            .unwrap_or_default()
    }

    /// Write `text` as a hex string of glyph ids
    pub(crate) fn write_string<W: Write>(&self, text: &str, w: &mut W) -> std::io::Result<()> {
        write!(w, "<")?;
        for ch in text.chars() {
            write!(w, "{:04x}", self.glyph_id(ch))?;
        }
        write!(w, ">")
    }

    /// Every glyph reachable from a unicode cmap subtable, with the first character
    /// that maps to it
    fn mapped_glyphs(&self) -> BTreeMap<u16, char> {
        let mut map: BTreeMap<u16, char> = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                    map.entry(gid.0).or_insert(ch);
                }
            });
        }

        map
    }

    /// Scale factor from font units to the 1000-unit glyph space PDF uses
    fn to_glyph_space(&self) -> f32 {
        1000.0 / self.face().units_per_em() as f32
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let glyphs = self.mapped_glyphs();
        let cid_font_id = self.write_cid(refs, font_index, &glyphs, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, glyphs, writer);
        let id = refs.gen(RefType::CidFont(font_index));
        let scale = self.to_glyph_space();

        let widths: Vec<(u16, f32)> = glyphs
            .keys()
            .map(|&gid| {
                let advance = self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or(0);
                (gid, advance as f32 * scale)
            })
            .collect();

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(1000.0);

        // runs of consecutive glyph ids share one width array
        let mut w = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (gid, width) in widths {
            match run_start {
                Some(start) if gid as usize == start as usize + run.len() => run.push(width),
                Some(start) => {
                    w.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                    run.push(width);
                }
                None => {
                    run_start = Some(gid);
                    run.push(width);
                }
            }
        }
        if let Some(start) = run_start {
            w.consecutive(start, run.drain(..));
        }
        w.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = self.write_font_data(refs, font_index, writer);
        let id = refs.gen(RefType::FontDescriptor(font_index));
        let face = self.face();
        let scale = self.to_glyph_space();

        let advances: Vec<u16> = glyphs
            .keys()
            .filter_map(|&gid| face.glyph_hor_advance(GlyphId(gid)))
            .collect();
        let max_width = advances.iter().copied().max().unwrap_or(1000) as f32 * scale;
        let avg_width = if advances.is_empty() {
            max_width
        } else {
            advances.iter().map(|&a| a as f32).sum::<f32>() / advances.len() as f32 * scale
        };

        let bbox = face.global_bounding_box();
        let name = self
            .name()
            .unwrap_or_else(|| format!("EmbeddedFont{font_index}"))
            .replace(' ', "");

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scale,
            y1: bbox.y_min as f32 * scale,
            x2: bbox.x_max as f32 * scale,
            y2: bbox.y_max as f32 * scale,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scale);
        descriptor.descent(face.descender() as f32 * scale);
        descriptor.leading(face.line_gap() as f32 * scale);
        let cap_height = face.capital_height().unwrap_or(face.ascender());
        descriptor.cap_height(cap_height as f32 * scale);
        descriptor.x_height(face.x_height().unwrap_or(cap_height) as f32 * scale);
        // the face doesn't record stem widths; 80 is a typical regular-weight value
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.missing_width(max_width);
        descriptor.font_file2(data_id);

        id
    }

    fn write_font_data(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));
        let raw = self.face.as_slice();
        let compressed = crate::content::deflate(raw);

        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), raw.len() as i32);

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        glyphs: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(concat!(
            "/CIDInit /ProcSet findresource begin\n",
            "12 dict begin\n",
            "begincmap\n",
            "/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n",
            "/CMapName /Adobe-Identity-UCS def\n",
            "/CMapType 2 def\n",
            "1 begincodespacerange\n",
            "<0000> <FFFF>\n",
            "endcodespacerange\n",
        ));

        // each block shares a high byte and holds at most BFCHAR_BLOCK entries
        let entries: Vec<(u16, char)> = glyphs.iter().map(|(&gid, &ch)| (gid, ch)).collect();
        let mut blocks: Vec<&[(u16, char)]> = Vec::new();
        let mut start = 0;
        for i in 1..=entries.len() {
            let split = i == entries.len()
                || i - start >= BFCHAR_BLOCK
                || entries[i].0 >> 8 != entries[start].0 >> 8;
            if split {
                blocks.push(&entries[start..i]);
                start = i;
            }
        }

        for block in blocks.into_iter().filter(|b| !b.is_empty()) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                cmap.push_str(&format!("<{gid:04x}> <"));
                let mut utf16 = [0u16; 2];
                for unit in ch.encode_utf16(&mut utf16) {
                    cmap.push_str(&format!("{unit:04x}"));
                }
                cmap.push_str(">\n");
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = crate::content::deflate(cmap.as_bytes());
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);

        id
    }
}
