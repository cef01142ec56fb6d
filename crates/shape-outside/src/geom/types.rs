//! Basic 2D value types.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in layout coordinates.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
///
/// `collinear_tolerance` bounds the magnitude of the cross product
/// `(p2 - p0) × (p1 - p0)` below which three vertices count as collinear.
/// It is an absolute, unnormalized area: polygons with very short or very
/// long edges simplify differently. Changing it changes which inputs merge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub collinear_tolerance: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            collinear_tolerance: 350.0,
        }
    }
}

/// Which side of a shape an exclusion query looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn scaled(&self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }
}

/// Axis-aligned rectangle `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing every point, or `None` for no points.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (mut min, mut max) = (first, first);
        for p in it {
            min = min.inf(&p);
            max = max.sup(&p);
        }
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    #[inline]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x && x < self.max_x()
    }

    #[inline]
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.y && y < self.max_y()
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }

    /// Closed containment: points on any edge are enclosed.
    #[inline]
    pub fn encloses_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.max_x() && p.y >= self.y && p.y <= self.max_y()
    }

    /// Band overlap, `y1 ≤ y < y2` against the half-open vertical extent.
    #[inline]
    pub fn overlaps_y_range(&self, y1: f64, y2: f64) -> bool {
        !self.is_empty() && y2 >= self.y && y1 < self.max_y()
    }

    #[inline]
    pub fn overlaps_x_range(&self, x1: f64, x2: f64) -> bool {
        !self.is_empty() && x2 >= self.x && x1 < self.max_x()
    }

    /// Move the left edge to `x`, keeping the right edge in place.
    pub fn shift_left_edge_to(&mut self, x: f64) {
        self.width -= x - self.x;
        self.x = x;
    }

    /// Move the top edge to `y`, keeping the bottom edge in place.
    pub fn shift_top_edge_to(&mut self, y: f64) {
        self.height -= y - self.y;
        self.y = y;
    }

    pub fn shift_right_edge_to(&mut self, x: f64) {
        self.width = x - self.x;
    }

    pub fn shift_bottom_edge_to(&mut self, y: f64) {
        self.height = y - self.y;
    }

    /// Grow by `d` on every side (shrink for negative `d`).
    #[inline]
    pub fn inflate(&self, d: f64) -> Rect {
        Rect::new(self.x - d, self.y - d, self.width + 2.0 * d, self.height + 2.0 * d)
    }
}

/// Vertical band `[top, bottom]` of a line box, in shape coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub top: f64,
    pub bottom: f64,
}

impl Band {
    #[inline]
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// The same band shifted by `-dy` (layout → shape coordinates).
    #[inline]
    pub fn translated(&self, dy: f64) -> Band {
        Band::new(self.top - dy, self.bottom - dy)
    }
}
