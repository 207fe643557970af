//! Line-end marker engine.
//!
//! Arrowheads and other decorations for the ends of vector paths:
//!
//! - [`shapes`]: pure generators for every marker kind
//! - [`registry`]: stable kind codes, capabilities and the generator table
//! - [`marker`]: a marker's configuration and its composite chain
//! - [`placement`]: orienting, mirroring, repeating and layering a marker at
//!   a segment vertex
//! - [`codec`]: reading and writing configurations in every historical
//!   format version
//!
//! ```
//! use endcap::{LineSegment, MarkerConfig, MarkerKind, PlacementOptions, VertexEnd, place};
//! use endcap::types::Length;
//! use glam::dvec2;
//!
//! let cfg = MarkerConfig::new(MarkerKind::TriangleCap, Length::bp(1.0));
//! let segment = LineSegment::new(dvec2(0.0, 0.0), dvec2(10.0, 0.0));
//! let placed = place(&cfg, &segment, VertexEnd::End, &PlacementOptions::default());
//! assert_eq!(placed.bounding_box().max.x, 10.0);
//! ```

pub mod codec;
pub mod errors;
pub mod geometry;
pub mod log;
pub mod marker;
pub mod paint;
pub mod path;
pub mod placement;
pub mod registry;
pub mod shapes;
pub mod types;

pub use codec::{FormatVersion, ReadOptions, decode, encode, read_marker, read_marker_with, write_marker};
pub use errors::{EncodeError, FormatError, FormatErrorKind, MarkerError};
pub use marker::MarkerConfig;
pub use paint::Paint;
pub use path::{Path, PathOp};
pub use placement::{
    CubicSegment, LineSegment, PlacedLayer, PlacedMarker, PlacementOptions, Segment, VertexEnd, place,
};
pub use registry::{Capabilities, MarkerKind};
