//! Element box metrics and reference-box resolution.
//!
//! All rects here are relative to the element's border box, whose top-left
//! corner is the origin. Side arrays use CSS order (top, right, bottom, left);
//! radius arrays use CSS corner order (top-left, top-right, bottom-right,
//! bottom-left), each `[horizontal, vertical]`.

use crate::geom::{Rect, Size};
use crate::rounded::CornerRadii;
use serde::{Deserialize, Serialize};

/// Side the element floats to; text flows on the opposite side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatSide {
    #[default]
    Left,
    Right,
}

/// The CSS box a shape is sized and positioned against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceBox {
    #[default]
    MarginBox,
    BorderBox,
    PaddingBox,
    ContentBox,
}

/// Resolved layout metrics of a floated element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxMetrics {
    pub margins: [f64; 4],
    pub borders: [f64; 4],
    pub paddings: [f64; 4],
    /// Border-box width.
    pub width: f64,
    /// Border-box height.
    pub height: f64,
    /// Border-box corner radii.
    pub radii: [[f64; 2]; 4],
    pub float: FloatSide,
}

/// A resolved reference box: bounds relative to the border box plus radii.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    pub kind: ReferenceBox,
    pub rect: Rect,
    pub radii: [[f64; 2]; 4],
}

impl BoxGeometry {
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.rect.width, self.rect.height)
    }

    pub fn corner_radii(&self) -> CornerRadii {
        let s = |r: [f64; 2]| Size::new(r[0], r[1]);
        CornerRadii {
            top_left: s(self.radii[0]),
            top_right: s(self.radii[1]),
            bottom_right: s(self.radii[2]),
            bottom_left: s(self.radii[3]),
        }
    }
}

impl BoxMetrics {
    pub fn border_box(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn margin_box(&self) -> Rect {
        let [top, right, bottom, left] = self.margins;
        Rect::new(-left, -top, self.width + left + right, self.height + top + bottom)
    }

    pub fn reference_box(&self, kind: ReferenceBox) -> BoxGeometry {
        let mut rect = self.border_box();
        let mut radii = self.radii;
        match kind {
            ReferenceBox::ContentBox => {
                adjust_box(&mut rect, &mut radii, -1.0, &[self.paddings, self.borders])
            }
            ReferenceBox::PaddingBox => adjust_box(&mut rect, &mut radii, -1.0, &[self.borders]),
            ReferenceBox::BorderBox => {}
            ReferenceBox::MarginBox => adjust_box(&mut rect, &mut radii, 1.0, &[self.margins]),
        }
        BoxGeometry { kind, rect, radii }
    }

    /// The margin box in the coordinates of `reference` (raster clip).
    pub fn clip_rect(&self, reference: &BoxGeometry) -> Rect {
        let [top, right, bottom, left] = self.margins;
        Rect::new(
            -reference.rect.x - left,
            -reference.rect.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }
}

/// Grow (`sign = 1`) or shrink (`sign = -1`) `rect` by the summed side widths.
fn adjust_box(rect: &mut Rect, radii: &mut [[f64; 2]; 4], sign: f64, sides: &[[f64; 4]]) {
    let sum = |i: usize| sides.iter().map(|s| s[i]).sum::<f64>();
    let (top, right, bottom, left) = (sum(0), sum(1), sum(2), sum(3));
    let (max_x, max_y) = (rect.max_x(), rect.max_y());
    rect.shift_left_edge_to(rect.x - sign * left);
    rect.shift_top_edge_to(rect.y - sign * top);
    rect.shift_right_edge_to(max_x + sign * right);
    rect.shift_bottom_edge_to(max_y + sign * bottom);

    let r = *radii;
    *radii = [
        [adjust_radius(r[0][0], sign, left), adjust_radius(r[0][1], sign, top)],
        [adjust_radius(r[1][0], sign, right), adjust_radius(r[1][1], sign, top)],
        [adjust_radius(r[2][0], sign, right), adjust_radius(r[2][1], sign, bottom)],
        [adjust_radius(r[3][0], sign, left), adjust_radius(r[3][1], sign, bottom)],
    ];
}

/// Radius of a corner after moving its edges by `offset`.
///
/// Shrinking clamps at zero. Growing adds the offset, except that small
/// radii (relative to the offset) grow along the cubic falloff
/// `r + d·(1 + (r/d − 1)³)` so sharp corners stay nearly sharp.
fn adjust_radius(radius: f64, sign: f64, offset: f64) -> f64 {
    if sign < 0.0 {
        return (radius - offset).max(0.0);
    }
    let ratio = (radius / offset).abs();
    if ratio < 1.0 {
        (radius + offset * (1.0 + (ratio - 1.0).powi(3))).max(0.0)
    } else {
        radius + offset
    }
}
