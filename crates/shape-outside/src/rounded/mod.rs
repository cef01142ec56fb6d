//! Rounded-rectangle exclusion geometry (circles, ellipses, insets, boxes).
//!
//! Corners are quarter ellipses with independent radii. Every corner is
//! described by the axis-aligned rect that bounds its arc; the straight part
//! of the left side spans `[top_left.max_y(), bottom_left.y]`, and likewise
//! for the right side.
//!
//! Exclusion edges
//! - A band that touches a side's straight section gets the flat rect edge.
//! - Otherwise the band lies within the corner rows of that side and the
//!   extreme is reached at one of the band's end rows.

mod offsets;

pub use offsets::{offset_strip_height, ExclusionOffset};

use crate::geom::{ellipse_x_intercept, Rect, Side, Size};

/// Elliptical corner radii (width = horizontal radius, height = vertical).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: Size,
    pub top_right: Size,
    pub bottom_left: Size,
    pub bottom_right: Size,
}

impl CornerRadii {
    pub const ZERO: CornerRadii = CornerRadii {
        top_left: Size::ZERO,
        top_right: Size::ZERO,
        bottom_left: Size::ZERO,
        bottom_right: Size::ZERO,
    };

    pub fn uniform(radius: Size) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }

    fn map(&self, f: impl Fn(Size) -> Size) -> Self {
        Self {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_left: f(self.bottom_left),
            bottom_right: f(self.bottom_right),
        }
    }

    /// Every radius grown by `d` in both directions.
    pub fn expanded(&self, d: f64) -> Self {
        self.map(|s| Size::new(s.width + d, s.height + d))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    rect: Rect,
    radii: CornerRadii,
}

impl RoundedRect {
    pub fn new(rect: Rect, radii: CornerRadii) -> Self {
        Self { rect, radii }
    }

    /// Build and, if the radii cannot fit, scale them down to fit.
    pub fn fitted(rect: Rect, radii: CornerRadii) -> Self {
        let mut rr = Self::new(rect, radii);
        if !rr.is_renderable() {
            rr.adjust_radii();
            tracing::debug!(radii = ?rr.radii, "scaled corner radii to fit");
        }
        rr
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn radii(&self) -> CornerRadii {
        self.radii
    }

    pub fn top_left_corner(&self) -> Rect {
        let r = self.radii.top_left;
        Rect::new(self.rect.x, self.rect.y, r.width, r.height)
    }

    pub fn top_right_corner(&self) -> Rect {
        let r = self.radii.top_right;
        Rect::new(self.rect.max_x() - r.width, self.rect.y, r.width, r.height)
    }

    pub fn bottom_left_corner(&self) -> Rect {
        let r = self.radii.bottom_left;
        Rect::new(self.rect.x, self.rect.max_y() - r.height, r.width, r.height)
    }

    pub fn bottom_right_corner(&self) -> Rect {
        let r = self.radii.bottom_right;
        Rect::new(
            self.rect.max_x() - r.width,
            self.rect.max_y() - r.height,
            r.width,
            r.height,
        )
    }

    /// The (top, bottom) corner rects on `side`.
    pub(crate) fn side_corners(&self, side: Side) -> (Rect, Rect) {
        match side {
            Side::Left => (self.top_left_corner(), self.bottom_left_corner()),
            Side::Right => (self.top_right_corner(), self.bottom_right_corner()),
        }
    }

    /// The rect left after removing the corner rows and columns.
    pub fn corners_inset_rect(&self) -> Rect {
        let r = &self.radii;
        let left = r.top_left.width.max(r.bottom_left.width);
        let right = r.top_right.width.max(r.bottom_right.width);
        let top = r.top_left.height.max(r.top_right.height);
        let bottom = r.bottom_left.height.max(r.bottom_right.height);
        Rect::new(
            self.rect.x + left,
            self.rect.y + top,
            self.rect.width - left - right,
            self.rect.height - top - bottom,
        )
    }

    /// True iff some corner has both radii positive.
    pub fn is_rounded(&self) -> bool {
        let r = &self.radii;
        [r.top_left, r.top_right, r.bottom_left, r.bottom_right]
            .iter()
            .any(|s| !s.is_empty())
    }

    /// True iff adjacent radii fit along every side.
    pub fn is_renderable(&self) -> bool {
        let (r, w, h) = (&self.radii, self.rect.width, self.rect.height);
        r.top_left.width + r.top_right.width <= w
            && r.bottom_left.width + r.bottom_right.width <= w
            && r.top_left.height + r.bottom_left.height <= h
            && r.top_right.height + r.bottom_right.height <= h
    }

    /// Multiply every radius by `factor`; corners that become empty are zeroed.
    pub fn scale_radii(&mut self, factor: f64) {
        self.radii = self.radii.map(|s| {
            let s = s.scaled(factor);
            if s.is_empty() {
                Size::ZERO
            } else {
                s
            }
        });
    }

    /// Uniformly shrink the radii so adjacent ones fit along every side.
    pub fn adjust_radii(&mut self) {
        let r = &self.radii;
        let max_w = (r.top_left.width + r.top_right.width)
            .max(r.bottom_left.width + r.bottom_right.width);
        let max_h = (r.top_left.height + r.bottom_left.height)
            .max(r.top_right.height + r.bottom_right.height);
        if max_w <= 0.0 || max_h <= 0.0 {
            self.radii = CornerRadii::ZERO;
            return;
        }
        let factor = (self.rect.width / max_w).min(self.rect.height / max_h);
        self.scale_radii(factor);
    }

    /// Leftmost x of the outline at row `y`, or `None` outside the rect rows.
    pub fn min_x_intercept_at(&self, y: f64) -> Option<f64> {
        self.x_intercept_at(Side::Left, y)
    }

    /// Rightmost x of the outline at row `y`, or `None` outside the rect rows.
    pub fn max_x_intercept_at(&self, y: f64) -> Option<f64> {
        self.x_intercept_at(Side::Right, y)
    }

    fn x_intercept_at(&self, side: Side, y: f64) -> Option<f64> {
        if !self.rect.contains_y(y) {
            return None;
        }
        let (top, bottom) = self.side_corners(side);
        let inset = if top.contains_y(y) {
            Some((top, ellipse_x_intercept(top.max_y() - y, top.width, top.height)))
        } else if bottom.contains_y(y) {
            Some((bottom, ellipse_x_intercept(y - bottom.y, bottom.width, bottom.height)))
        } else {
            None
        };
        Some(match (side, inset) {
            (Side::Left, Some((c, xi))) => c.max_x() - xi,
            (Side::Right, Some((c, xi))) => c.x + xi,
            (Side::Left, None) => self.rect.x,
            (Side::Right, None) => self.rect.max_x(),
        })
    }

    pub fn left_exclusion_edge(&self, y1: f64, y2: f64) -> Option<f64> {
        self.exclusion_edge(Side::Left, y1, y2)
    }

    pub fn right_exclusion_edge(&self, y1: f64, y2: f64) -> Option<f64> {
        self.exclusion_edge(Side::Right, y1, y2)
    }

    fn exclusion_edge(&self, side: Side, y1: f64, y2: f64) -> Option<f64> {
        if self.rect.is_empty() || !self.rect.overlaps_y_range(y1, y2) {
            return None;
        }
        let flat = match side {
            Side::Left => self.rect.x,
            Side::Right => self.rect.max_x(),
        };
        let (top, bottom) = self.side_corners(side);
        if !self.is_rounded() || (y1 <= bottom.y && y2 >= top.max_y()) {
            return Some(flat);
        }
        // Within one corner the outline is monotone; across the two corners
        // of a side the extreme is still at an end row of the band.
        let ends = [y1, y2].map(|y| self.x_intercept_at(side, y));
        let pick = |a: f64, b: f64| match side {
            Side::Left => a.min(b),
            Side::Right => a.max(b),
        };
        ends.into_iter()
            .flatten()
            .reduce(pick)
            // Unfitted radii taller than the rect can leave no band end inside
            // the rect rows while the band still misses the straight section.
            .or_else(|| self.x_intercept_at(side, y1.max(self.rect.y)))
    }

    /// Strips partitioning `[y1, y2)` with the left extent of the outline per
    /// strip, sized so each corner strip's area error stays within `area_limit`.
    pub fn left_exclusion_offsets(&self, y1: f64, y2: f64, area_limit: f64) -> Vec<ExclusionOffset> {
        offsets::exclusion_offsets(self, Side::Left, y1, y2, area_limit)
    }

    /// Right-side counterpart of [`RoundedRect::left_exclusion_offsets`].
    pub fn right_exclusion_offsets(&self, y1: f64, y2: f64, area_limit: f64) -> Vec<ExclusionOffset> {
        offsets::exclusion_offsets(self, Side::Right, y1, y2, area_limit)
    }
}
