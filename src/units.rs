//! Length units used throughout the crate.
//!
//! Everything that ends up in the PDF is expressed in [Pt] (1/72 inch). Physical
//! sizes coming from users (label dimensions, margins, wall plans) are usually
//! given in centimetres, so [Cm], [Mm] and [In] convert into points.
//!
//! ```
//! use pdf_labels::{Cm, In, Pt};
//!
//! let a: Pt = In(1.0).into();
//! assert_eq!(a, Pt(72.0));
//!
//! let b: Pt = Cm(2.54).into();
//! assert!((*b - 72.0).abs() < 1e-3);
//! ```

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul, Neg};

const POINTS_PER_INCH: f32 = 72.0;
const CM_PER_INCH: f32 = 2.54;

/// A length in PDF points (1/72 inch)
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
    Serialize,
    Deserialize,
)]
#[display("{_0}")]
pub struct Pt(pub f32);

/// A length in centimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    Deref,
    From,
    Display,
    Serialize,
    Deserialize,
)]
#[display("{_0}cm")]
pub struct Cm(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Deref, From, Display)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Deref, From, Display)]
#[display("{_0}in")]
pub struct In(pub f32);

impl Pt {
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    pub fn abs(self) -> Pt {
        Pt(self.0.abs())
    }
}

impl From<In> for Pt {
    fn from(v: In) -> Self {
        Pt(v.0 * POINTS_PER_INCH)
    }
}

impl From<Cm> for Pt {
    fn from(v: Cm) -> Self {
        Pt(v.0 * POINTS_PER_INCH / CM_PER_INCH)
    }
}

impl From<Mm> for Pt {
    fn from(v: Mm) -> Self {
        Pt(v.0 * POINTS_PER_INCH / (CM_PER_INCH * 10.0))
    }
}

impl From<Pt> for Cm {
    fn from(v: Pt) -> Self {
        Cm(v.0 * CM_PER_INCH / POINTS_PER_INCH)
    }
}

impl From<Mm> for Cm {
    fn from(v: Mm) -> Self {
        Cm(v.0 / 10.0)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for Pt {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self.0 * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Div<Pt> for Pt {
    type Output = Pt;

    fn div(self, rhs: Pt) -> Pt {
        Pt(self.0 / rhs.0)
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl Mul<f32> for Cm {
    type Output = Cm;

    fn mul(self, rhs: f32) -> Cm {
        Cm(self.0 * rhs)
    }
}
