//! Raster (image alpha) exclusion geometry.
//!
//! Purpose
//! - Turn an image's alpha channel into one opaque span per pixel row, dilate
//!   the spans by the shape margin, and answer band queries from the spans.
//!
//! Coordinates
//! - Rows are integers in reference-box coordinates; the clip rect (the
//!   element's margin box relative to the reference box) bounds the rows that
//!   exist. Row `y` covers `[y, y + 1)`.
//! - An image that could not be loaded has no spans at all and reports the
//!   full clip width on both sides.

mod intervals;
mod source;

pub use intervals::{RasterInterval, RasterIntervals, ShapeMarginIntervalGenerator};
pub use source::{decode_rgba, FileImageSource, ImageSource};

use crate::geom::{Rect, Side, Size};
use image::RgbaImage;

#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    clip: Rect,
    shape_margin: f64,
    intervals: Option<RasterIntervals>,
}

impl Raster {
    /// Wrap scanned spans, dilating them when `shape_margin > 0`.
    pub fn from_intervals(intervals: RasterIntervals, shape_margin: f64, clip: Rect) -> Self {
        let intervals = if shape_margin > 0.0 {
            intervals.compute_margin_intervals(shape_margin)
        } else {
            intervals
        };
        Self {
            clip,
            shape_margin: shape_margin.max(0.0),
            intervals: Some(intervals),
        }
    }

    /// Scan an alpha channel; `threshold` is in `[0, 1]`.
    pub fn from_alpha(
        width: u32,
        height: u32,
        alpha_at: impl Fn(u32, u32) -> u8,
        threshold: f64,
        shape_margin: f64,
        clip: Rect,
    ) -> Self {
        let intervals = RasterIntervals::from_alpha(width, height, 256.0 * threshold, clip, alpha_at);
        Self::from_intervals(intervals, shape_margin, clip)
    }

    /// Scan an image already resampled to the reference box size.
    pub fn from_image(img: &RgbaImage, threshold: f64, shape_margin: f64, clip: Rect) -> Self {
        Self::from_alpha(
            img.width(),
            img.height(),
            |x, y| img.get_pixel(x, y)[3],
            threshold,
            shape_margin,
            clip,
        )
    }

    /// A raster whose image is missing or undecodable.
    pub fn unavailable(shape_margin: f64, clip: Rect) -> Self {
        Self {
            clip,
            shape_margin: shape_margin.max(0.0),
            intervals: None,
        }
    }

    /// Fetch, decode and scan `url`. Failures are logged and yield
    /// [`Raster::unavailable`].
    pub async fn load<S: ImageSource + ?Sized>(
        source: &S,
        url: &str,
        box_size: Size,
        threshold: f64,
        shape_margin: f64,
        clip: Rect,
    ) -> Self {
        let decoded = match source.fetch(url).await {
            Ok(bytes) => decode_rgba(&bytes, box_size),
            Err(err) => Err(err),
        };
        match decoded {
            Ok(img) => {
                tracing::debug!(url, width = img.width(), height = img.height(), "decoded shape image");
                Self::from_image(&img, threshold, shape_margin, clip)
            }
            Err(err) => {
                tracing::warn!(url, error = %err, "shape image unavailable");
                Self::unavailable(shape_margin, clip)
            }
        }
    }

    #[inline]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    #[inline]
    pub fn shape_margin(&self) -> f64 {
        self.shape_margin
    }

    /// Row spans after margin dilation, or `None` for an unavailable image.
    #[inline]
    pub fn intervals(&self) -> Option<&RasterIntervals> {
        self.intervals.as_ref()
    }

    pub fn left_exclusion_edge(&self, y1: f64, y2: f64) -> Option<f64> {
        self.exclusion_edge(Side::Left, y1, y2)
    }

    pub fn right_exclusion_edge(&self, y1: f64, y2: f64) -> Option<f64> {
        self.exclusion_edge(Side::Right, y1, y2)
    }

    fn exclusion_edge(&self, side: Side, y1: f64, y2: f64) -> Option<f64> {
        let Some(intervals) = &self.intervals else {
            return Some(match side {
                Side::Left => 0.0,
                Side::Right => self.clip.width,
            });
        };
        let mut result: Option<f64> = None;
        let mut y = y1.max(self.clip.y).floor() as i64;
        while (y as f64) <= y2 && (y as f64) < self.clip.max_y() {
            if let Some(iv) = intervals.interval_at(y) {
                result = Some(match (side, result) {
                    (Side::Left, Some(r)) => r.min(iv.start_x),
                    (Side::Right, Some(r)) => r.max(iv.end_x),
                    (Side::Left, None) => iv.start_x,
                    (Side::Right, None) => iv.end_x,
                });
            }
            y += 1;
        }
        result
    }
}
