//! Adaptive horizontal strips approximating a rounded-rect side.
//!
//! The band is partitioned exactly: rows above and below the rect get no
//! exclusion, the straight section is one strip at the flat edge, and each
//! corner is covered by strips whose extent is taken at the strip row where
//! the arc reaches furthest out. Strip heights start from
//! [`offset_strip_height`] and shrink, one unit at a time and then by
//! halving below one unit, until the area between arc and strip is within
//! the limit.

use super::RoundedRect;
use crate::geom::{ellipse_x_intercept, Rect, Side};

/// One strip: exclusion x (or `None` where the shape has no rows) and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExclusionOffset {
    pub x: Option<f64>,
    pub height: f64,
}

/// Starting strip height for a `dx × dy` corner under an area limit.
///
/// Small corners (area of the corner triangle below the limit) get a single
/// strip; otherwise the height whose triangular error equals the limit.
/// Always at least 1.
pub fn offset_strip_height(dx: f64, dy: f64, area_limit: f64) -> f64 {
    let h = if dy == 0.0 {
        1.0
    } else if dx == 0.0 || dx * dy / 2.0 < area_limit {
        dy.round()
    } else {
        (2.0 * area_limit * dy / dx).sqrt().round()
    };
    h.max(1.0)
}

/// Floor for shrinking strips; only bounds the loop.
const MIN_STRIP_HEIGHT: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Arc {
    /// Widens downward: the extreme of a strip is at its bottom row.
    Top,
    /// Widens upward: the extreme of a strip is at its top row.
    Bottom,
}

/// Normalized distances `(near, far)` from the corner's straight-section end
/// for the strip `[ya, yb)`; `near` is where the arc is widest.
fn strip_params(corner: Rect, arc: Arc, ya: f64, yb: f64) -> (f64, f64) {
    let h = corner.height;
    let (near, far) = match arc {
        Arc::Top => (corner.max_y() - yb, corner.max_y() - ya),
        Arc::Bottom => (ya - corner.y, yb - corner.y),
    };
    ((near / h).clamp(0.0, 1.0), (far / h).clamp(0.0, 1.0))
}

/// Area between the quarter-ellipse arc of `corner` and the strip `[ya, yb)`
/// drawn at the arc's widest point within it.
pub(super) fn corner_strip_error(corner: Rect, arc: Arc, ya: f64, yb: f64) -> f64 {
    if corner.is_empty() {
        return 0.0;
    }
    // Antiderivative of sqrt(1 - t²).
    fn f(t: f64) -> f64 {
        (t * (1.0 - t * t).max(0.0).sqrt() + t.asin()) / 2.0
    }
    let (tn, tf) = strip_params(corner, arc, ya, yb);
    let stair = (tf - tn) * (1.0 - tn * tn).max(0.0).sqrt();
    (corner.width * corner.height * (stair - (f(tf) - f(tn)))).max(0.0)
}

fn corner_strip_x(corner: Rect, arc: Arc, side: Side, ya: f64, yb: f64) -> f64 {
    let d = match arc {
        Arc::Top => corner.max_y() - yb,
        Arc::Bottom => ya - corner.y,
    };
    let xi = ellipse_x_intercept(d, corner.width, corner.height);
    match side {
        Side::Left => corner.max_x() - xi,
        Side::Right => corner.x + xi,
    }
}

fn push_strip(out: &mut Vec<ExclusionOffset>, x: Option<f64>, a: f64, b: f64) {
    if b > a {
        out.push(ExclusionOffset { x, height: b - a });
    }
}

fn push_corner_strips(
    out: &mut Vec<ExclusionOffset>,
    corner: Rect,
    arc: Arc,
    side: Side,
    (a, b): (f64, f64),
    area_limit: f64,
) {
    let base = offset_strip_height(corner.width, corner.height, area_limit);
    let mut y = a;
    while y < b {
        let mut h = base.min(b - y);
        while h > MIN_STRIP_HEIGHT && corner_strip_error(corner, arc, y, y + h) > area_limit {
            h = if h > 1.0 { (h - 1.0).max(1.0) } else { (h / 2.0).max(MIN_STRIP_HEIGHT) };
        }
        // Far from the origin `y + h` can round back to `y`.
        let next = if h >= b - y || y + h <= y { b } else { y + h };
        out.push(ExclusionOffset {
            x: Some(corner_strip_x(corner, arc, side, y, next)),
            height: next - y,
        });
        y = next;
    }
}

pub(super) fn exclusion_offsets(
    rr: &RoundedRect,
    side: Side,
    y1: f64,
    y2: f64,
    area_limit: f64,
) -> Vec<ExclusionOffset> {
    let mut out = Vec::new();
    if y2 <= y1 {
        return out;
    }
    let rect = rr.rect();
    if rect.is_empty() || !rect.overlaps_y_range(y1, y2) {
        push_strip(&mut out, None, y1, y2);
        return out;
    }
    let (top, bottom) = rr.side_corners(side);
    let flat = match side {
        Side::Left => rect.x,
        Side::Right => rect.max_x(),
    };
    // rect.y ≤ t ≤ s ≤ rect.max_y(): corner rows, straight rows, corner rows.
    let (r0, r3) = (rect.y, rect.max_y());
    let t = top.max_y().max(r0).min(r3);
    let s = bottom.y.max(t).min(r3);
    let clip = |a: f64, b: f64| (y1.max(a), y2.min(b));

    push_strip(&mut out, None, y1, y2.min(r0));
    push_corner_strips(&mut out, top, Arc::Top, side, clip(r0, t), area_limit);
    let (a, b) = clip(t, s);
    push_strip(&mut out, Some(flat), a, b);
    push_corner_strips(&mut out, bottom, Arc::Bottom, side, clip(s, r3), area_limit);
    push_strip(&mut out, None, y1.max(r3), y2);
    out
}
