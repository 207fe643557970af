//! Geometry kernels used by the shape generators.
//!
//! - `arc`: circles, ellipses and circular arcs as cubic Béziers
//! - `stroke`: widening a centre-line path into a filled outline
//! - `boolean`: polygon union of flattened paths

pub mod arc;
pub mod boolean;
pub mod stroke;

pub use arc::{arc, circle, ellipse};
pub use boolean::union_all;
pub use stroke::{LineCap, LineJoin, StrokeStyle, stroke};

/// Flattening tolerance in bp for stroking and boolean operations.
pub const FLATTEN_TOLERANCE: f64 = 0.01;

/// Miter joins longer than this many half-widths fall back to bevels.
pub const MITER_LIMIT: f64 = 4.0;
