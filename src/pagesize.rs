//! Pre-defined page sizes for common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait to convert between
//! portrait and landscape, or [`Paper`](crate::pagesize::Paper) to pick a size by name
//! from a configuration file.
//!
//! ```
//! use pdf_labels::pagesize::{Paper, PageOrientation, A4};
//!
//! let landscape = A4.landscape();
//! assert!(landscape.0 > landscape.1);
//! assert_eq!(Paper::A4.size(), A4);
//! ```

use crate::units::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

/// A paper size that can be named in configuration
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paper {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl Paper {
    /// The portrait size of this paper
    pub fn size(self) -> PageSize {
        match self {
            Paper::A3 => A3,
            Paper::A4 => A4,
            Paper::A5 => A5,
            Paper::Letter => LETTER,
            Paper::Legal => LEGAL,
        }
    }

    /// The size of this paper in the requested orientation
    pub fn oriented(self, landscape: bool) -> PageSize {
        if landscape {
            self.size().landscape()
        } else {
            self.size().portrait()
        }
    }
}

impl FromStr for Paper {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a3" => Ok(Paper::A3),
            "a4" => Ok(Paper::A4),
            "a5" => Ok(Paper::A5),
            "letter" => Ok(Paper::Letter),
            "legal" => Ok(Paper::Legal),
            other => Err(format!("unknown paper size '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_names_parse_case_insensitively() {
        assert_eq!("a4".parse::<Paper>(), Ok(Paper::A4));
        assert_eq!(" Letter ".parse::<Paper>(), Ok(Paper::Letter));
        assert!("b5".parse::<Paper>().is_err());
    }

    #[test]
    fn orientation_swaps_only_when_needed() {
        let (w, h) = Paper::A4.oriented(true);
        assert!(w > h);
        assert_eq!(Paper::A4.oriented(false), A4);
        assert_eq!(A4.landscape().portrait(), A4);
    }
}
