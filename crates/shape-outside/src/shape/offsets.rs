//! Layout offsets: per-strip float intrusion in margin-box coordinates.

use super::metrics::{BoxGeometry, BoxMetrics, FloatSide};
use super::ShapeGeometry;
use crate::error::{Result, ShapeError};
use crate::geom::Band;
use crate::rounded::RoundedRect;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetMode {
    /// Fixed-height strips of `step`.
    Step,
    /// Error-bounded strips (rounded rects only; other shapes use `step`).
    #[default]
    Adaptive,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OffsetParams {
    pub mode: OffsetMode,
    pub step: f64,
    /// Area limit per adaptive strip, in px².
    pub limit: f64,
}

impl OffsetParams {
    /// Defaults for text at `font_size` px: one line per step, limit `1.8 × step`.
    pub fn for_font_size(font_size: f64) -> Self {
        Self {
            mode: OffsetMode::Adaptive,
            step: font_size,
            limit: 1.8 * font_size,
        }
    }

    pub fn step(step: f64) -> Self {
        Self {
            mode: OffsetMode::Step,
            ..Self::for_font_size(step)
        }
    }

    fn check_step(&self) -> Result<f64> {
        if self.step.is_finite() && self.step > 0.0 {
            Ok(self.step)
        } else {
            Err(ShapeError::InvalidParams(format!(
                "offset step must be positive and finite, got {}",
                self.step
            )))
        }
    }

    fn check_limit(&self) -> Result<f64> {
        if self.limit.is_finite() && self.limit > 0.0 {
            Ok(self.limit)
        } else {
            Err(ShapeError::InvalidParams(format!(
                "offset area limit must be positive and finite, got {}",
                self.limit
            )))
        }
    }
}

/// How far the float intrudes into the line box over `[top, bottom)`,
/// measured from the float's own margin-box edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutOffset {
    pub top: f64,
    pub bottom: f64,
    pub offset: f64,
    pub float: FloatSide,
}

/// Shape → margin-box translation for one element.
struct Frame {
    float: FloatSide,
    dx: f64,
    dy: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(metrics: &BoxMetrics, reference: &BoxGeometry) -> Self {
        let mb = metrics.margin_box();
        Self {
            float: metrics.float,
            dx: reference.rect.x + metrics.margins[3],
            dy: metrics.margins[0] + reference.rect.y,
            width: mb.width,
            height: mb.height,
        }
    }

    /// Intrusion for an exclusion edge in shape coordinates; `None` is 0.
    fn offset(&self, edge: Option<f64>) -> f64 {
        match edge {
            None => 0.0,
            Some(x) => {
                let offset = match self.float {
                    FloatSide::Left => x + self.dx,
                    FloatSide::Right => self.width - (x + self.dx),
                };
                offset.min(self.width)
            }
        }
    }
}

pub(super) fn step_offsets(
    metrics: &BoxMetrics,
    reference: &BoxGeometry,
    geometry: &ShapeGeometry,
    params: &OffsetParams,
) -> Result<Vec<LayoutOffset>> {
    let step = params.check_step()?;
    let frame = Frame::new(metrics, reference);
    let count = (frame.height / step).ceil().max(0.0) as usize;
    let offsets = (0..count)
        .map(|i| {
            let top = i as f64 * step;
            let bottom = ((i + 1) as f64 * step).min(frame.height);
            let band = Band::new(top, bottom).translated(frame.dy);
            let edge = match frame.float {
                FloatSide::Left => geometry.right_exclusion_edge(band.top, band.bottom),
                FloatSide::Right => geometry.left_exclusion_edge(band.top, band.bottom),
            };
            LayoutOffset {
                top,
                bottom,
                offset: frame.offset(edge),
                float: frame.float,
            }
        })
        .collect();
    Ok(offsets)
}

pub(super) fn adaptive_offsets(
    metrics: &BoxMetrics,
    reference: &BoxGeometry,
    rr: &RoundedRect,
    params: &OffsetParams,
) -> Result<Vec<LayoutOffset>> {
    let limit = params.check_limit()?;
    let frame = Frame::new(metrics, reference);
    let (y1, y2) = (-frame.dy, frame.height - frame.dy);
    let strips = match frame.float {
        FloatSide::Left => rr.right_exclusion_offsets(y1, y2, limit),
        FloatSide::Right => rr.left_exclusion_offsets(y1, y2, limit),
    };
    let mut y = 0.0;
    Ok(strips
        .into_iter()
        .map(|s| {
            let top = y;
            y += s.height;
            LayoutOffset {
                top,
                bottom: y,
                offset: frame.offset(s.x),
                float: frame.float,
            }
        })
        .collect())
}
