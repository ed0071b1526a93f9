use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle from its lower-left corner and size
    pub fn from_origin(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Build a rectangle from its centre and size
    pub fn from_centre(cx: Pt, cy: Pt, width: Pt, height: Pt) -> Rect {
        Rect::from_origin(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    pub fn centre(&self) -> (Pt, Pt) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Shrink the rectangle by `dx` on the left and right and `dy` on the top and bottom
    pub fn inset(&self, dx: Pt, dy: Pt) -> Rect {
        Rect {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 - dx,
            y2: self.y2 - dy,
        }
    }

    /// Whether the interiors of the two rectangles overlap. Rectangles that only share an
    /// edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// Whether `other` lies entirely within `self`
    pub fn contains(&self, other: &Rect) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rectangles_do_not_overlap() {
        let a = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0));
        let b = Rect::from_origin(Pt(10.0), Pt(0.0), Pt(10.0), Pt(10.0));
        let c = Rect::from_origin(Pt(5.0), Pt(5.0), Pt(10.0), Pt(10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&b));
    }

    #[test]
    fn centre_and_inset() {
        let r = Rect::from_centre(Pt(50.0), Pt(20.0), Pt(40.0), Pt(10.0));
        assert_eq!(r.x1, Pt(30.0));
        assert_eq!(r.y2, Pt(25.0));
        assert_eq!(r.centre(), (Pt(50.0), Pt(20.0)));

        let inner = r.inset(Pt(5.0), Pt(2.0));
        assert_eq!(inner.width(), Pt(30.0));
        assert_eq!(inner.height(), Pt(6.0));
        assert!(r.contains(&inner));
        assert!(!inner.contains(&r));
    }
}
