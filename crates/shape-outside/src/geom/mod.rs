//! Plane primitives shared by the polygon, rounded-rect and raster backends.
//!
//! - `Point` is a nalgebra `Vector2<f64>` in layout coordinates (y grows downward).
//! - `Size`, `Rect`, `Band`: plain value types with the overlap/containment
//!   predicates the exclusion queries rely on.
//! - `GeomCfg`: the tolerances used while simplifying polygon input.
//!
//! Interval conventions
//! - `Rect::contains_*` and `Rect::overlaps_y_range` are half-open at the far edge.
//! - Edge/segment overlap tests are closed (see `polygon::Edge`).

pub mod rand;
mod types;
mod util;

pub use types::{Band, GeomCfg, Point, Rect, Side, Size};
pub use util::{clipped_circle_x_range, compare_line_slopes, ellipse_x_intercept, XRange};
pub(crate) use util::{are_coincident_points, are_collinear_points};
