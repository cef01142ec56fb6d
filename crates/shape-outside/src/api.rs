//! Curated surface for the CLI and benches (UNSTABLE).
//!
//! Prefer these re-exports over reaching into module paths; they move less.

// Plane primitives
pub use crate::geom::{ellipse_x_intercept, Band, GeomCfg, Point, Rect, Side, Size};
// Random inputs for benches and property tests
pub use crate::geom::rand::{
    draw_star_polygon, flatten as flatten_points, ReplayToken, StarCfg, VertexCount,
};
// Backends
pub use crate::polygon::{Edge, FillRule, Polygon};
pub use crate::raster::{
    decode_rgba, FileImageSource, ImageSource, Raster, RasterInterval, RasterIntervals,
};
pub use crate::rounded::{offset_strip_height, CornerRadii, ExclusionOffset, RoundedRect};
// Façade
pub use crate::shape::{
    BasicShape, BoxGeometry, BoxMetrics, FloatSide, LayoutOffset, OffsetMode, OffsetParams,
    ReferenceBox, ShapeGeometry, ShapeInfo, ShapeSource, ShapeValue,
};
pub use crate::error::{Result, ShapeError};
