use serde::{Deserialize, Serialize};
use std::io::Write;

/// A colour, expressed in the RGB or grey colour spaces
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the grey space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Write the operator selecting this colour for fills
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_fill<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => write!(w, "{r} {g} {b} rg\n"),
            Colour::Grey { g } => write!(w, "{g} g\n"),
        }
    }

    /// Write the operator selecting this colour for strokes
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_stroke<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => write!(w, "{r} {g} {b} RG\n"),
            Colour::Grey { g } => write!(w, "{g} G\n"),
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// The outline drawn around every label
    pub const MID_GREY: Colour = Colour::Grey { g: 0.5 };
    pub const DARK_GREY: Colour = Colour::Grey { g: 0.66 };
    /// Faded guide lines
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 0.75 };
    pub const WHITE_SMOKE: Colour = Colour::Grey { g: 0.96 };
    pub const FADED_RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.7,
        b: 0.7,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
    pub const GREEN: Colour = Colour::RGB {
        r: 0.0,
        g: 0.5,
        b: 0.0,
    };
    pub const OLIVE_DRAB: Colour = Colour::RGB {
        r: 0.42,
        g: 0.557,
        b: 0.137,
    };
}
