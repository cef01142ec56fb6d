//! Exclusion geometry for floats wrapped by `shape-outside`.
//!
//! Given a floated element's box metrics and a resolved shape, answer how far
//! the shape reaches to the left or right within a horizontal band, and turn
//! that into per-strip layout offsets for the text beside the float.
//!
//! Modules
//! - `geom`: points, rects, bands and the small numeric helpers below them.
//! - `polygon`, `rounded`, `raster`: the three geometry backends.
//! - `shape`: box metrics, shape values and the `ShapeInfo` façade.
//!
//! API Policy
//! - There is no stable public API yet; `api` is the curated surface for the
//!   CLI and benches.

pub mod api;
pub mod error;
pub mod geom;
pub mod polygon;
pub mod raster;
pub mod rounded;
pub mod shape;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Result, ShapeError};
pub use geom::{GeomCfg, Point};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{Band, GeomCfg, Point, Rect, Size};
    pub use crate::polygon::{FillRule, Polygon};
    pub use crate::raster::Raster;
    pub use crate::rounded::{CornerRadii, RoundedRect};
    pub use crate::shape::{
        BasicShape, BoxMetrics, FloatSide, LayoutOffset, OffsetMode, OffsetParams, ReferenceBox,
        ShapeInfo, ShapeSource, ShapeValue,
    };
}
