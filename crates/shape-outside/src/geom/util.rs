use super::types::Point;

/// Returns > 0 if the slope of the line through `origin` and `p2` is greater
/// than the slope through `origin` and `p1`, 0 if equal, negative otherwise.
///
/// This is the (y-down) cross product `(p2 - origin) × (p1 - origin)`.
#[inline]
pub fn compare_line_slopes(origin: Point, p1: Point, p2: Point) -> f64 {
    (p2.x - origin.x) * (p1.y - origin.y) - (p1.x - origin.x) * (p2.y - origin.y)
}

/// Approximate collinearity: cross-product magnitude below `tolerance`.
#[inline]
pub(crate) fn are_collinear_points(p0: Point, p1: Point, p2: Point, tolerance: f64) -> bool {
    compare_line_slopes(p0, p1, p2).abs() < tolerance
}

#[inline]
pub(crate) fn are_coincident_points(p0: Point, p1: Point) -> bool {
    p0.x == p1.x && p0.y == p1.y
}

/// Half-width of the ellipse `(x/rx)² + (y/ry)² = 1` at height `y` from its center.
///
/// Returns 0 for a flat ellipse and for `|y| ≥ ry`.
#[inline]
pub fn ellipse_x_intercept(y: f64, rx: f64, ry: f64) -> f64 {
    if ry <= 0.0 {
        return 0.0;
    }
    rx * (1.0 - (y * y) / (ry * ry)).max(0.0).sqrt()
}

/// Horizontal extent `x1 ≤ x2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XRange {
    pub x1: f64,
    pub x2: f64,
}

impl XRange {
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            x1: a.min(b),
            x2: a.max(b),
        }
    }
}

/// Horizontal extent of the disk (`center`, `radius`) clipped to the band `[y1, y2]`.
///
/// Assumes the disk overlaps the band. When the center lies outside the band
/// the widest chord is the one on the band edge nearest to the center.
pub fn clipped_circle_x_range(center: Point, radius: f64, y1: f64, y2: f64) -> XRange {
    if center.y >= y1 && center.y <= y2 {
        return XRange::new(center.x - radius, center.x + radius);
    }
    let yi = if y2 < center.y {
        y2 - center.y
    } else {
        y1 - center.y
    };
    let xi = ellipse_x_intercept(yi, radius, radius);
    XRange::new(center.x - xi, center.x + xi)
}
