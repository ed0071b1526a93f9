use crate::font::Font;
use crate::layout::TextBlock;
use crate::units::Pt;
use id_arena::Arena;

/// How much the font size drops on each fitting attempt
pub const FONT_SIZE_STEP: Pt = Pt(0.5);

/// Outcome of [fit_font_size]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitResult {
    /// The chosen font size
    pub size: Pt,
    /// Width and height of the wrapped text at `size`
    pub measured: (Pt, Pt),
    /// Whether the text fits. `false` means the floor was reached and the text will
    /// overflow its box.
    pub fits: bool,
}

/// Find the largest font size, starting at `start` and dropping by [FONT_SIZE_STEP], at
/// which `block` wrapped to `bounds.0` is no wider than `bounds.0` and no taller than
/// `bounds.1`.
///
/// The search never goes below `floor`: if the text still doesn't fit there, the floor is
/// returned with `fits == false`. A `start` at or below `floor` is measured once and
/// returned as is.
pub fn fit_font_size(
    fonts: &Arena<Font>,
    block: &TextBlock,
    bounds: (Pt, Pt),
    start: Pt,
    floor: Pt,
) -> FitResult {
    let (max_width, max_height) = bounds;
    let within = |(w, h): (Pt, Pt)| w <= max_width && h <= max_height;

    let steps = if start > floor {
        (*((start - floor) / FONT_SIZE_STEP)).ceil() as usize
    } else {
        0
    };

    let mut size = start;
    let mut measured = block.measure(fonts, size, max_width);
    // sizes come from `start` each time, so large starts still reach the floor
    for step in 1..=steps {
        if within(measured) {
            break;
        }
        size = (start - FONT_SIZE_STEP * step as f32).max(floor);
        measured = block.measure(fonts, size, max_width);
    }

    FitResult {
        size,
        measured,
        fits: within(measured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use id_arena::Id;

    fn helvetica_block(text: &str) -> (Arena<Font>, TextBlock, Id<Font>) {
        let mut fonts = Arena::new();
        let id = fonts.alloc(Font::helvetica());
        let mut block = TextBlock::new(1.2);
        block.push(text, id);
        (fonts, block, id)
    }

    #[test]
    fn text_that_fits_keeps_the_start_size() {
        let (fonts, block, _) = helvetica_block("Rice");
        let fit = fit_font_size(&fonts, &block, (Pt(100.0), Pt(50.0)), Pt(12.0), Pt(4.0));
        assert_eq!(fit.size, Pt(12.0));
        assert!(fit.fits);
    }

    #[test]
    fn shrinks_in_half_point_steps_until_it_fits() {
        let (fonts, block, id) = helvetica_block("Basmati");
        // at 10pt "Basmati" is 35.57pt wide, at 8pt 28.46pt
        let width_at_8 = fonts[id].width_of_text("Basmati", Pt(8.0));
        let fit = fit_font_size(&fonts, &block, (width_at_8, Pt(100.0)), Pt(10.0), Pt(4.0));
        assert_eq!(fit.size, Pt(8.0));
        assert!(fit.fits);
        assert!(fit.measured.0 <= width_at_8);
    }

    #[test]
    fn floor_is_accepted_when_nothing_fits() {
        let (fonts, block, _) = helvetica_block("Extraordinarily long product name");
        let fit = fit_font_size(&fonts, &block, (Pt(5.0), Pt(5.0)), Pt(12.0), Pt(4.0));
        assert_eq!(fit.size, Pt(4.0));
        assert!(!fit.fits);
    }

    #[test]
    fn start_below_floor_is_measured_once() {
        let (fonts, block, _) = helvetica_block("Extraordinarily long product name");
        let fit = fit_font_size(&fonts, &block, (Pt(5.0), Pt(5.0)), Pt(3.0), Pt(4.0));
        assert_eq!(fit.size, Pt(3.0));
        assert!(!fit.fits);
    }

    #[test]
    fn floor_not_on_step_grid_is_still_respected() {
        let (fonts, block, _) = helvetica_block("Extraordinarily long product name");
        let fit = fit_font_size(&fonts, &block, (Pt(5.0), Pt(5.0)), Pt(10.0), Pt(4.2));
        assert_eq!(fit.size, Pt(4.2));
    }

    #[test]
    fn large_start_sizes_still_reach_the_floor() {
        // half a point is below f32 precision this high up
        let (fonts, block, _) = helvetica_block("Rice");
        let start = Pt(3.0e7);
        let floor = Pt(3.0e7 - 4.0);
        assert_eq!(start - FONT_SIZE_STEP, start);

        let fit = fit_font_size(&fonts, &block, (Pt(5.0), Pt(5.0)), start, floor);
        assert_eq!(fit.size, floor);
        assert!(!fit.fits);
    }

    #[test]
    fn empty_text_always_fits() {
        let (fonts, block, _) = helvetica_block("   ");
        let fit = fit_font_size(&fonts, &block, (Pt(1.0), Pt(1.0)), Pt(10.0), Pt(4.0));
        assert!(fit.fits);
        assert_eq!(fit.measured, (Pt(0.0), Pt(0.0)));
    }
}
