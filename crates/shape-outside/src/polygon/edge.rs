//! Directed polygon edges and their margin offsets.

use crate::geom::{are_collinear_points, Point, XRange};

/// Provenance of an offset edge: the index of the polygon edge it was
/// translated from and the unit normal it was translated along.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeOffset {
    pub source: usize,
    pub normal: Point,
}

/// A directed segment `vertex1 → vertex2` with cached x extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub vertex1: Point,
    pub vertex2: Point,
    pub min_x: f64,
    pub max_x: f64,
    pub offset: Option<EdgeOffset>,
}

impl Edge {
    pub fn new(vertex1: Point, vertex2: Point) -> Self {
        Self {
            vertex1,
            vertex2,
            min_x: vertex1.x.min(vertex2.x),
            max_x: vertex1.x.max(vertex2.x),
            offset: None,
        }
    }

    /// Copy of `edge` (the polygon edge at index `source`) translated by
    /// `distance` along the unit `normal`.
    pub fn offset_from(source: usize, edge: &Edge, normal: Point, distance: f64) -> Self {
        let d = normal * distance;
        Self {
            offset: Some(EdgeOffset { source, normal }),
            ..Edge::new(edge.vertex1 + d, edge.vertex2 + d)
        }
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.vertex1.y.min(self.vertex2.y)
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.vertex1.y.max(self.vertex2.y)
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.vertex1.y == self.vertex2.y
    }

    /// Closed overlap with `[y1, y2]`.
    #[inline]
    pub fn overlaps_y_range(&self, y1: f64, y2: f64) -> bool {
        y2 >= self.min_y() && y1 <= self.max_y()
    }

    /// Both endpoints inside `[y1, y2]`.
    #[inline]
    pub fn is_within_y_range(&self, y1: f64, y2: f64) -> bool {
        self.min_y() >= y1 && self.max_y() <= y2
    }

    /// Whether `p` lies on the segment, within the collinearity tolerance.
    pub fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        p.x >= self.min_x
            && p.x <= self.max_x
            && p.y >= self.min_y()
            && p.y <= self.max_y()
            && are_collinear_points(self.vertex1, self.vertex2, p, tolerance)
    }

    /// Unit normal pointing into a clockwise (y-down) polygon.
    pub fn inward_normal(&self) -> Point {
        let d = self.vertex2 - self.vertex1;
        let len = d.norm();
        if len == 0.0 {
            return Point::zeros();
        }
        Point::new(-d.y / len, d.x / len)
    }

    #[inline]
    pub fn outward_normal(&self) -> Point {
        -self.inward_normal()
    }

    /// x coordinate of the segment at height `y`.
    ///
    /// Horizontal segments report their minimum x. `y` is assumed to be in
    /// the edge's vertical extent; outside it the line is extrapolated.
    pub fn x_intercept(&self, y: f64) -> f64 {
        let (v1, v2) = (self.vertex1, self.vertex2);
        if v1.y == v2.y {
            return self.min_x;
        }
        if y == v1.y {
            return v1.x;
        }
        if y == v2.y {
            return v2.x;
        }
        v1.x + (y - v1.y) * (v2.x - v1.x) / (v2.y - v1.y)
    }

    /// x extent of the part of the edge inside the band `[y1, y2]`.
    pub fn clipped_x_range(&self, y1: f64, y2: f64) -> XRange {
        if self.is_within_y_range(y1, y2) {
            return XRange::new(self.min_x, self.max_x);
        }
        let (top, bottom) = if self.vertex1.y < self.vertex2.y {
            (self.vertex1, self.vertex2)
        } else {
            (self.vertex2, self.vertex1)
        };
        let a = if top.y < y1 { self.x_intercept(y1) } else { top.x };
        let b = if bottom.y > y2 { self.x_intercept(y2) } else { bottom.x };
        XRange::new(a, b)
    }
}
