//! Per-row opaque spans of a raster shape and their margin dilation.

use crate::geom::Rect;

/// Horizontal span `[start_x, end_x)` on row `y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterInterval {
    pub y: i64,
    pub start_x: f64,
    pub end_x: f64,
}

impl RasterInterval {
    #[inline]
    pub fn new(y: i64, start_x: f64, end_x: f64) -> Self {
        Self { y, start_x, end_x }
    }

    #[inline]
    pub fn contains(&self, other: &RasterInterval) -> bool {
        self.start_x <= other.start_x && self.end_x >= other.end_x
    }

    /// Extend to cover `other`.
    #[inline]
    pub fn unite(&mut self, other: &RasterInterval) {
        self.start_x = self.start_x.min(other.start_x);
        self.end_x = self.end_x.max(other.end_x);
    }
}

/// At most one interval per row over `[min_y, max_y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterIntervals {
    y_offset: i64,
    rows: Vec<Option<RasterInterval>>,
}

impl RasterIntervals {
    /// Rows `[-y_offset, size - y_offset)`, all empty.
    pub fn new(y_offset: i64, size: usize) -> Self {
        Self {
            y_offset,
            rows: vec![None; size],
        }
    }

    /// Rows covering the clip rect, rounded outward to whole rows.
    pub fn for_clip(clip: Rect) -> Self {
        let min_y = clip.y.floor();
        let size = (clip.max_y().ceil() - min_y).max(0.0) as usize;
        Self::new(-(min_y as i64), size)
    }

    #[inline]
    pub fn min_y(&self) -> i64 {
        -self.y_offset
    }

    #[inline]
    pub fn max_y(&self) -> i64 {
        self.rows.len() as i64 - self.y_offset
    }

    #[inline]
    fn index(&self, y: i64) -> Option<usize> {
        let i = y + self.y_offset;
        (0..self.rows.len() as i64).contains(&i).then_some(i as usize)
    }

    pub fn interval_at(&self, y: i64) -> Option<&RasterInterval> {
        self.index(y).and_then(|i| self.rows[i].as_ref())
    }

    /// Store `interval` at its row; rows outside the range are ignored.
    pub fn set_interval_at(&mut self, interval: RasterInterval) {
        if let Some(i) = self.index(interval.y) {
            self.rows[i] = Some(interval);
        }
    }

    /// Union `interval` into its row (or store it if the row is empty).
    pub fn unite_interval_at(&mut self, interval: RasterInterval) {
        if let Some(i) = self.index(interval.y) {
            match &mut self.rows[i] {
                Some(existing) => existing.unite(&interval),
                slot => *slot = Some(interval),
            }
        }
    }

    /// Whether row `y` holds an interval that covers `interval`.
    pub fn interval_at_contains(&self, y: i64, interval: &RasterInterval) -> bool {
        self.interval_at(y).is_some_and(|row| row.contains(interval))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RasterInterval> {
        self.rows.iter().flatten()
    }

    /// Scan an alpha channel row by row.
    ///
    /// A pixel is opaque when its alpha exceeds `threshold` (on the 0..=255
    /// scale). Each row keeps a single span from its first opaque pixel to
    /// the end of its last opaque run; a run reaching the right edge ends at
    /// `width`.
    pub fn from_alpha(
        width: u32,
        height: u32,
        threshold: f64,
        clip: Rect,
        alpha_at: impl Fn(u32, u32) -> u8,
    ) -> Self {
        let mut out = Self::for_clip(clip);
        let rows = (height as i64).min(clip.height.max(0.0).ceil() as i64);
        for y in 0..rows {
            if out.index(y).is_none() {
                continue;
            }
            let mut row: Option<RasterInterval> = None;
            let mut in_run = false;
            for x in 0..width {
                let opaque = f64::from(alpha_at(x, y as u32)) > threshold;
                if opaque && !in_run {
                    in_run = true;
                    // A later run keeps the first start and reopens the end.
                    row.get_or_insert(RasterInterval::new(y, f64::from(x), 0.0))
                        .end_x = f64::from(width);
                } else if !opaque && in_run {
                    in_run = false;
                    if let Some(iv) = &mut row {
                        iv.end_x = f64::from(x);
                    }
                }
            }
            if let Some(iv) = row {
                out.set_interval_at(iv);
            }
        }
        out
    }

    /// Dilate every row by a disk of radius `margin`.
    ///
    /// Neighbor rows stop receiving a source row's dilation at the first
    /// neighbor whose own span already covers the source span; that
    /// neighbor's dilation reaches at least as far.
    pub fn compute_margin_intervals(&self, margin: f64) -> RasterIntervals {
        let generator = ShapeMarginIntervalGenerator::new(margin);
        let reach = margin.max(0.0).floor() as i64;
        let mut result = RasterIntervals::new(self.y_offset, self.rows.len());
        let (min_y, max_y) = (self.min_y(), self.max_y());

        for source in self.iter() {
            let y = source.y;
            for my in ((y - reach).max(min_y)..y).rev() {
                if self.interval_at_contains(my, source) {
                    break;
                }
                result.unite_interval_at(generator.interval_at(my, source));
            }
            result.unite_interval_at(generator.interval_at(y, source));
            for my in (y + 1)..=(y + reach).min(max_y - 1) {
                if self.interval_at_contains(my, source) {
                    break;
                }
                result.unite_interval_at(generator.interval_at(my, source));
            }
        }
        result
    }
}

/// Precomputed disk half-widths `sqrt(m² - dy²)` for `dy = 0..=floor(m)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeMarginIntervalGenerator {
    shape_margin: f64,
    x_intercepts: Vec<f64>,
}

impl ShapeMarginIntervalGenerator {
    pub fn new(shape_margin: f64) -> Self {
        let m = shape_margin.max(0.0);
        let x_intercepts = (0..=m.floor() as i64)
            .map(|dy| {
                let dy = dy as f64;
                (m * m - dy * dy).max(0.0).sqrt()
            })
            .collect();
        Self {
            shape_margin: m,
            x_intercepts,
        }
    }

    #[inline]
    pub fn shape_margin(&self) -> f64 {
        self.shape_margin
    }

    /// The span `interval` contributes to row `y` after dilation.
    pub fn interval_at(&self, y: i64, interval: &RasterInterval) -> RasterInterval {
        let dy = (y - interval.y).unsigned_abs() as usize;
        let dx = self.x_intercepts.get(dy).copied().unwrap_or(0.0);
        RasterInterval::new(y, interval.start_x - dx, interval.end_x + dx)
    }
}
