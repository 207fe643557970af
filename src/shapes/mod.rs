//! Marker shape generators.
//!
//! Every generator is a pure `fn(&ShapeParams) -> Path` producing the basic
//! shape in local marker space: origin at the vertex, +x pointing out of the
//! path, all values in bp. Families:
//!
//! - `arrows`: pointed heads, triangles, caps (closed form)
//! - `polygons`: dots, boxes, regular polygons, stars, ellipses (closed form,
//!   open variants stroked)
//! - `strokes`: bars, brackets, braces, hooks and other centre lines widened
//!   by the stroker
//! - `compound`: sub-shapes replicated at several angles and unioned

pub mod arrows;
pub mod compound;
pub mod defaults;
pub mod polygons;
pub mod strokes;

use std::f64::consts::TAU;

use glam::{DVec2, dvec2};

use crate::geometry::{LineCap, LineJoin, StrokeStyle, stroke};
use crate::path::Path;

/// Numeric parameters a generator may read, in bp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParams {
    /// Pen width of the line the marker decorates
    pub pen_width: f64,
    /// Marker size (ignored by kinds that are not resizable)
    pub size: f64,
    /// Independent width (only read by width-capable kinds)
    pub width: Option<f64>,
}

impl ShapeParams {
    pub fn new(pen_width: f64, size: f64) -> Self {
        Self { pen_width, size, width: None }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// The independent width, or `size * ratio` when none was given.
    pub(crate) fn width_or(&self, ratio: f64) -> f64 {
        self.width.unwrap_or(self.size * ratio)
    }
}

/// Signature shared by every shape generator.
pub type GeneratorFn = fn(&ShapeParams) -> Path;

/// The shape of the "no marker" kind.
pub(crate) fn none(_: &ShapeParams) -> Path {
    Path::new()
}

// ============================================================================
// Helpers shared by the families
// ============================================================================

/// Vertices of a regular polygon, counter-clockwise, first vertex at
/// `rotation` radians.
pub(crate) fn regular_polygon(center: DVec2, sides: usize, radius: f64, rotation: f64) -> Vec<DVec2> {
    (0..sides)
        .map(|i| {
            let a = rotation + TAU * i as f64 / sides as f64;
            center + dvec2(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// Vertices of a star with `points` tips, first tip on +x.
pub(crate) fn star(center: DVec2, points: usize, outer: f64, inner: f64) -> Vec<DVec2> {
    (0..points * 2)
        .map(|i| {
            let a = TAU * i as f64 / (points * 2) as f64;
            let r = if i % 2 == 0 { outer } else { inner };
            center + dvec2(a.cos(), a.sin()) * r
        })
        .collect()
}

/// Open polyline path through `points`.
pub(crate) fn polyline(points: &[DVec2]) -> Path {
    let mut path = Path::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
    }
    path
}

/// Outline of a closed shape drawn with the pen (the "open" variants).
pub(crate) fn outline(path: &Path, pen_width: f64) -> Path {
    stroke(path, &StrokeStyle::new(pen_width).with_join(LineJoin::Miter))
}

/// Centre line widened with butt caps and miter joins.
pub(crate) fn pen(path: &Path, pen_width: f64) -> Path {
    stroke(path, &StrokeStyle::new(pen_width))
}

/// Centre line widened with round caps and joins.
pub(crate) fn round_pen(path: &Path, pen_width: f64) -> Path {
    stroke(
        path,
        &StrokeStyle::new(pen_width).with_cap(LineCap::Round).with_join(LineJoin::Round),
    )
}
