//! Resolved shape descriptors.
//!
//! Parsing `shape-outside` syntax and resolving lengths happen upstream; these
//! types carry pixel values in reference-box coordinates.

use super::metrics::{BoxGeometry, BoxMetrics, ReferenceBox};
use crate::geom::{Point, Rect};
use crate::polygon::FillRule;
use serde::{Deserialize, Serialize};

/// A basic shape with every length resolved to pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BasicShape {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Inset {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        /// Corner radii in CSS corner order, `[horizontal, vertical]` each.
        #[serde(default)]
        radii: [[f64; 2]; 4],
    },
    Polygon {
        #[serde(default)]
        fill_rule: FillRule,
        points: Vec<Point>,
    },
}

/// Where the shape comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeSource {
    Basic(BasicShape),
    /// Alpha channel of an image, scaled to the content box.
    Image { url: String },
    /// The reference box itself, with its corner radii.
    Box,
}

/// A shape source bound to an element's reference box.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeValue {
    pub source: ShapeSource,
    pub reference_box: BoxGeometry,
    /// Element margin box in reference-box coordinates.
    pub clip: Rect,
    pub shape_margin: f64,
    pub shape_image_threshold: f64,
}

impl ShapeValue {
    /// Bind `source` to `metrics`. Images always use the content box; the
    /// margin is clamped to `≥ 0` and the threshold to `[0, 1]`.
    pub fn resolve(
        metrics: &BoxMetrics,
        source: ShapeSource,
        reference_box: ReferenceBox,
        shape_margin: f64,
        shape_image_threshold: f64,
    ) -> Self {
        let kind = match source {
            ShapeSource::Image { .. } => ReferenceBox::ContentBox,
            _ => reference_box,
        };
        let reference_box = metrics.reference_box(kind);
        let shape_margin = if shape_margin.is_finite() {
            shape_margin.max(0.0)
        } else {
            0.0
        };
        let shape_image_threshold = if shape_image_threshold.is_nan() {
            0.0
        } else {
            shape_image_threshold.clamp(0.0, 1.0)
        };
        Self {
            clip: metrics.clip_rect(&reference_box),
            source,
            reference_box,
            shape_margin,
            shape_image_threshold,
        }
    }
}
