//! Shape façade: one resolved shape, one geometry backend, uniform queries.
//!
//! Purpose
//! - Map a [`ShapeValue`] (circle, ellipse, inset, polygon, image or reference
//!   box) to exactly one of [`Polygon`], [`RoundedRect`] or [`Raster`].
//! - Answer band queries in shape coordinates and produce layout offsets in
//!   margin-box coordinates.
//!
//! Readiness
//! - A [`ShapeInfo`] only exists once its geometry is built. Image-backed
//!   shapes are built by awaiting [`ShapeInfo::build`]; everything else is
//!   available synchronously through [`ShapeInfo::from_value`].
//! - Built shapes are immutable and may be queried from many threads.

mod metrics;
mod offsets;
mod value;

pub use metrics::{BoxGeometry, BoxMetrics, FloatSide, ReferenceBox};
pub use offsets::{LayoutOffset, OffsetMode, OffsetParams};
pub use value::{BasicShape, ShapeSource, ShapeValue};

use crate::error::Result;
use crate::geom::{Band, Rect, Size};
use crate::polygon::Polygon;
use crate::raster::{ImageSource, Raster};
use crate::rounded::{CornerRadii, RoundedRect};

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeGeometry {
    Polygon(Polygon),
    RoundedRect(RoundedRect),
    Raster(Raster),
}

impl ShapeGeometry {
    /// Circles, ellipses and insets become rounded rects grown by the margin.
    pub fn from_basic(shape: &BasicShape, shape_margin: f64) -> Self {
        let m = shape_margin;
        match shape {
            BasicShape::Circle { cx, cy, r } => {
                let r = r + m;
                ShapeGeometry::RoundedRect(RoundedRect::new(
                    Rect::new(cx - r, cy - r, 2.0 * r, 2.0 * r),
                    CornerRadii::uniform(Size::new(r, r)),
                ))
            }
            BasicShape::Ellipse { cx, cy, rx, ry } => {
                let c = Size::new(rx + m, ry + m);
                ShapeGeometry::RoundedRect(RoundedRect::new(
                    Rect::new(cx - c.width, cy - c.height, 2.0 * c.width, 2.0 * c.height),
                    CornerRadii::uniform(c),
                ))
            }
            BasicShape::Inset {
                x,
                y,
                width,
                height,
                radii,
            } => ShapeGeometry::RoundedRect(RoundedRect::fitted(
                Rect::new(*x, *y, *width, *height).inflate(m),
                css_radii(radii).expanded(m),
            )),
            BasicShape::Polygon { fill_rule, points } => {
                ShapeGeometry::Polygon(Polygon::new(points.clone(), *fill_rule, m))
            }
        }
    }

    /// The reference box itself (at its own origin) grown by the margin.
    pub fn from_box(reference: &BoxGeometry, shape_margin: f64) -> Self {
        let rect = Rect::new(0.0, 0.0, reference.rect.width, reference.rect.height);
        ShapeGeometry::RoundedRect(RoundedRect::fitted(
            rect.inflate(shape_margin),
            reference.corner_radii().expanded(shape_margin),
        ))
    }

    /// Geometry for sources that need no image; `None` for image sources.
    pub fn from_value(value: &ShapeValue) -> Option<Self> {
        match &value.source {
            ShapeSource::Basic(shape) => Some(Self::from_basic(shape, value.shape_margin)),
            ShapeSource::Box => Some(Self::from_box(&value.reference_box, value.shape_margin)),
            ShapeSource::Image { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ShapeGeometry::Polygon(_) => "polygon",
            ShapeGeometry::RoundedRect(_) => "rounded-rect",
            ShapeGeometry::Raster(_) => "raster",
        }
    }

    pub fn left_exclusion_edge(&self, y1: f64, y2: f64) -> Option<f64> {
        match self {
            ShapeGeometry::Polygon(p) => p.left_exclusion_edge(y1, y2),
            ShapeGeometry::RoundedRect(r) => r.left_exclusion_edge(y1, y2),
            ShapeGeometry::Raster(r) => r.left_exclusion_edge(y1, y2),
        }
    }

    pub fn right_exclusion_edge(&self, y1: f64, y2: f64) -> Option<f64> {
        match self {
            ShapeGeometry::Polygon(p) => p.right_exclusion_edge(y1, y2),
            ShapeGeometry::RoundedRect(r) => r.right_exclusion_edge(y1, y2),
            ShapeGeometry::Raster(r) => r.right_exclusion_edge(y1, y2),
        }
    }
}

/// CSS corner order (tl, tr, br, bl) to named radii.
fn css_radii(radii: &[[f64; 2]; 4]) -> CornerRadii {
    let s = |r: [f64; 2]| Size::new(r[0], r[1]);
    CornerRadii {
        top_left: s(radii[0]),
        top_right: s(radii[1]),
        bottom_right: s(radii[2]),
        bottom_left: s(radii[3]),
    }
}

/// A floated element's shape, ready to query.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeInfo {
    metrics: BoxMetrics,
    value: ShapeValue,
    geometry: ShapeGeometry,
}

impl ShapeInfo {
    /// Build the geometry, fetching and decoding the image for image sources.
    pub async fn build<S: ImageSource + ?Sized>(
        metrics: BoxMetrics,
        value: ShapeValue,
        images: &S,
    ) -> Self {
        let geometry = match &value.source {
            ShapeSource::Image { url } => ShapeGeometry::Raster(
                Raster::load(
                    images,
                    url,
                    value.reference_box.size(),
                    value.shape_image_threshold,
                    value.shape_margin,
                    value.clip,
                )
                .await,
            ),
            ShapeSource::Basic(shape) => ShapeGeometry::from_basic(shape, value.shape_margin),
            ShapeSource::Box => ShapeGeometry::from_box(&value.reference_box, value.shape_margin),
        };
        Self::with_geometry(metrics, value, geometry)
    }

    /// Synchronous construction; `None` for image sources.
    pub fn from_value(metrics: BoxMetrics, value: ShapeValue) -> Option<Self> {
        let geometry = ShapeGeometry::from_value(&value)?;
        Some(Self::with_geometry(metrics, value, geometry))
    }

    fn with_geometry(metrics: BoxMetrics, value: ShapeValue, geometry: ShapeGeometry) -> Self {
        tracing::debug!(
            kind = geometry.kind(),
            reference_box = ?value.reference_box.kind,
            shape_margin = value.shape_margin,
            "built shape geometry"
        );
        Self {
            metrics,
            value,
            geometry,
        }
    }

    #[inline]
    pub fn metrics(&self) -> &BoxMetrics {
        &self.metrics
    }

    #[inline]
    pub fn value(&self) -> &ShapeValue {
        &self.value
    }

    #[inline]
    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    /// Leftmost shape x within `band` (shape coordinates), `None` if the shape
    /// has no rows there.
    pub fn left_exclusion_edge(&self, band: Band) -> Option<f64> {
        self.geometry.left_exclusion_edge(band.top, band.bottom)
    }

    pub fn right_exclusion_edge(&self, band: Band) -> Option<f64> {
        self.geometry.right_exclusion_edge(band.top, band.bottom)
    }

    /// Strips covering the margin box from top to bottom with the float's
    /// intrusion per strip. Rounded rects honor [`OffsetMode::Adaptive`];
    /// polygons and rasters always use fixed steps.
    pub fn offsets(&self, params: &OffsetParams) -> Result<Vec<LayoutOffset>> {
        let reference = &self.value.reference_box;
        match (&self.geometry, params.mode) {
            (ShapeGeometry::RoundedRect(rr), OffsetMode::Adaptive) => {
                offsets::adaptive_offsets(&self.metrics, reference, rr, params)
            }
            (geometry, _) => offsets::step_offsets(&self.metrics, reference, geometry, params),
        }
    }
}

#[cfg(test)]
mod tests;
