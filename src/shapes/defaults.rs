//! Default sizes and proportions (all in bp)

/// Size given to resizable markers built from the registry.
pub const MARKER_SIZE: f64 = 5.0;

/// Pen width assumed when a stream carries no stroke context.
pub const PEN_WIDTH: f64 = 1.0;

/// Pen-driven arrowheads: length = BASE + SCALE * pen width.
pub const POINTED_BASE: f64 = 1.6;
pub const POINTED_SCALE: f64 = 3.8;

/// Half opening angles of the pointed family, in degrees.
pub const POINTED_HALF_ANGLE: f64 = 20.0;
pub const POINTED60_HALF_ANGLE: f64 = 30.0;
pub const POINTED45_HALF_ANGLE: f64 = 22.5;

/// Pen-driven hooks and cusps: radius = BASE + SCALE * pen width.
pub const HOOK_BASE: f64 = 1.0;
pub const HOOK_SCALE: f64 = 1.5;

/// Inner radius of stars relative to the outer radius.
pub const STAR4_INNER: f64 = 0.4;
pub const STAR5_INNER: f64 = 0.382;
pub const STAR6_INNER: f64 = 0.5;

/// Width of width-capable shapes when none is set, relative to size.
pub const WIDTH_RATIO: f64 = 0.5;

/// Gap between repeated copies, relative to the pen width.
pub const REPEAT_GAP: f64 = 0.5;
