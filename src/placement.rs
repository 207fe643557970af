//! Placing a configured marker at a segment vertex.
//!
//! Per level of the composite chain:
//!
//! 1. primary path: basic shape, mirrored about local Y if reversed,
//!    repeated backward along local X
//! 2. orientation: outward tangent at the vertex, or the fixed angle
//! 3. mirror about local X at a start vertex for asymmetric, auto-oriented
//!    kinds
//! 4. shift along local X by the offset, rotate, move to the vertex
//!
//! A root or overlay composite is shifted forward by its offset. A composite
//! drawn after its parent is shifted back: its offset is its distance behind
//! the vertex.
//!
//! Levels are layered in chain order; they are never merged.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::{DAffine2, DVec2, dvec2};

use crate::log::debug;
use crate::marker::MarkerConfig;
use crate::paint::Paint;
use crate::path::Path;
use crate::registry::MarkerKind;
use crate::types::BBox;

/// The part of a path segment placement needs.
pub trait Segment {
    fn start(&self) -> DVec2;
    fn end(&self) -> DVec2;

    /// Control point next to the start, for curved segments.
    fn start_control(&self) -> Option<DVec2> {
        None
    }

    /// Control point next to the end, for curved segments.
    fn end_control(&self) -> Option<DVec2> {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: DVec2,
    pub end: DVec2,
}

impl LineSegment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }
}

impl Segment for LineSegment {
    fn start(&self) -> DVec2 {
        self.start
    }

    fn end(&self) -> DVec2 {
        self.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub start: DVec2,
    pub c1: DVec2,
    pub c2: DVec2,
    pub end: DVec2,
}

impl CubicSegment {
    pub fn new(start: DVec2, c1: DVec2, c2: DVec2, end: DVec2) -> Self {
        Self { start, c1, c2, end }
    }
}

impl Segment for CubicSegment {
    fn start(&self) -> DVec2 {
        self.start
    }

    fn end(&self) -> DVec2 {
        self.end
    }

    fn start_control(&self) -> Option<DVec2> {
        Some(self.c1)
    }

    fn end_control(&self) -> Option<DVec2> {
        Some(self.c2)
    }
}

/// Which end of the segment the marker decorates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexEnd {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementOptions {
    /// Orientation in radians used when the segment has no direction
    pub fallback_angle: f64,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self { fallback_angle: 0.0 }
    }
}

/// `atan2` with the axis-aligned cases spelled out.
fn direction_angle(d: DVec2) -> f64 {
    if d.x == 0.0 {
        if d.y > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 }
    } else if d.y == 0.0 {
        if d.x > 0.0 { 0.0 } else { PI }
    } else {
        d.y.atan2(d.x)
    }
}

/// Angle of the outward tangent at `end` of `segment`.
///
/// Curved segments use the virtual point `3c - 2v` behind the vertex `v`
/// (the tangent of the cubic there). A control point on top of its vertex
/// falls back to the chord, a zero-length chord to `fallback`.
pub fn orientation_angle(segment: &dyn Segment, end: VertexEnd, fallback: f64) -> f64 {
    let (vertex, other, control) = match end {
        VertexEnd::End => (segment.end(), segment.start(), segment.end_control()),
        VertexEnd::Start => (segment.start(), segment.end(), segment.start_control()),
    };
    let reference = match control {
        Some(c) if c != vertex => 3.0 * c - 2.0 * vertex,
        _ => other,
    };
    let d = vertex - reference;
    if d == DVec2::ZERO {
        debug!(?end, fallback, "segment has no direction, using fallback angle");
        return fallback;
    }
    direction_angle(d)
}

/// One placed level of the composite chain.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLayer {
    pub kind: MarkerKind,
    pub fill: Option<Paint>,
    pub path: Path,
}

/// A marker placed in the segment's coordinate frame.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PlacedMarker {
    layers: Vec<PlacedLayer>,
}

impl PlacedMarker {
    /// Layers in drawing order: primary first, then each composite.
    pub fn layers(&self) -> &[PlacedLayer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Every layer concatenated into one path.
    pub fn to_path(&self) -> Path {
        let mut path = Path::new();
        for layer in &self.layers {
            path.extend(&layer.path);
        }
        path
    }

    /// Bounds of the whole composed geometry.
    pub fn bounding_box(&self) -> BBox {
        let mut bb = BBox::empty();
        for layer in &self.layers {
            bb.expand_box(&layer.path.bounding_box());
        }
        bb
    }
}

/// Place `cfg` and its composites at `end` of `segment`.
pub fn place(
    cfg: &MarkerConfig,
    segment: &dyn Segment,
    end: VertexEnd,
    options: &PlacementOptions,
) -> PlacedMarker {
    let layers = cfg
        .chain()
        .take_while(|level| !level.is_none())
        .map(|level| PlacedLayer {
            kind: level.kind(),
            fill: level.fill().cloned(),
            path: place_level(level, segment, end, options),
        })
        .collect();
    PlacedMarker { layers }
}

/// Transform from local marker space to the segment frame.
pub fn marker_transform(
    cfg: &MarkerConfig,
    segment: &dyn Segment,
    end: VertexEnd,
    options: &PlacementOptions,
) -> DAffine2 {
    let angle = if cfg.auto_orient() {
        orientation_angle(segment, end, options.fallback_angle)
    } else {
        cfg.angle().to_radians()
    };
    let vertex = match end {
        VertexEnd::Start => segment.start(),
        VertexEnd::End => segment.end(),
    };
    DAffine2::from_translation(vertex)
        * DAffine2::from_angle(angle)
        * DAffine2::from_translation(dvec2(origin_shift(cfg), 0.0))
}

/// Signed shift of the level's origin along local X, in bp.
fn origin_shift(cfg: &MarkerConfig) -> f64 {
    match cfg.parent_link() {
        Some(link) if !link.overlay => -cfg.offset().to_bp(),
        _ => cfg.offset().to_bp(),
    }
}

fn place_level(
    cfg: &MarkerConfig,
    segment: &dyn Segment,
    end: VertexEnd,
    options: &PlacementOptions,
) -> Path {
    let mut primary = cfg.primary_path();
    if end == VertexEnd::Start && cfg.auto_orient() && !cfg.capabilities().x_axis_symmetric {
        primary = primary.reflected_x_axis();
    }
    primary.transformed(&marker_transform(cfg, segment, end, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Angle, Length};

    fn line() -> LineSegment {
        LineSegment::new(DVec2::ZERO, dvec2(10.0, 0.0))
    }

    // ========================================================================
    // Orientation
    // ========================================================================

    #[test]
    fn straight_line_angles() {
        assert_eq!(orientation_angle(&line(), VertexEnd::End, 0.0), 0.0);
        assert_eq!(orientation_angle(&line(), VertexEnd::Start, 0.0), PI);
        let up = LineSegment::new(DVec2::ZERO, dvec2(0.0, 3.0));
        assert_eq!(orientation_angle(&up, VertexEnd::End, 0.0), FRAC_PI_2);
        assert_eq!(orientation_angle(&up, VertexEnd::Start, 0.0), -FRAC_PI_2);
    }

    #[test]
    fn cubic_uses_end_tangent() {
        let c = CubicSegment::new(DVec2::ZERO, dvec2(0.0, 5.0), dvec2(5.0, 5.0), dvec2(5.0, 0.0));
        assert_eq!(orientation_angle(&c, VertexEnd::End, 0.0), -FRAC_PI_2);
        assert_eq!(orientation_angle(&c, VertexEnd::Start, 0.0), -FRAC_PI_2);
    }

    #[test]
    fn degenerate_control_falls_back_to_chord() {
        let c = CubicSegment::new(DVec2::ZERO, dvec2(1.0, 1.0), dvec2(4.0, 4.0), dvec2(4.0, 4.0));
        let a = orientation_angle(&c, VertexEnd::End, 0.0);
        assert!((a - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn zero_length_segment_uses_fallback() {
        let p = LineSegment::new(dvec2(2.0, 2.0), dvec2(2.0, 2.0));
        assert_eq!(orientation_angle(&p, VertexEnd::End, 1.25), 1.25);
        let placed = place(
            &MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0)),
            &p,
            VertexEnd::End,
            &PlacementOptions { fallback_angle: 0.0 },
        );
        assert!(placed.bounding_box().min.x.is_finite());
    }

    // ========================================================================
    // Placement
    // ========================================================================

    #[test]
    fn fixed_angle_ignores_the_segment() {
        let mut cfg = MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0));
        cfg.set_auto_orient(false);
        cfg.set_angle(Angle::degrees(90.0)).unwrap();
        let bb = place(&cfg, &line(), VertexEnd::End, &PlacementOptions::default()).bounding_box();
        // Triangle body now points down from the vertex.
        assert!((bb.max.y).abs() < 1e-9);
        assert!((bb.min.y + 5.0).abs() < 1e-9);
    }

    #[test]
    fn asymmetric_kind_is_mirrored_at_start() {
        let cfg = MarkerConfig::new(MarkerKind::HalfBarUp, Length::bp(1.0));
        let end = place(&cfg, &line(), VertexEnd::End, &PlacementOptions::default()).bounding_box();
        let start = place(&cfg, &line(), VertexEnd::Start, &PlacementOptions::default()).bounding_box();
        // Both halves end up on the same side of the line.
        assert!(end.max.y > 0.0);
        assert!(start.max.y > 0.0);
    }

    #[test]
    fn composites_are_separate_layers() {
        let mut cfg = MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0));
        cfg.set_composite(Some(MarkerConfig::new(MarkerKind::Bar, Length::bp(1.0)))).unwrap();
        let placed = place(&cfg, &line(), VertexEnd::End, &PlacementOptions::default());
        assert_eq!(placed.layers().len(), 2);
        assert_eq!(placed.layers()[1].kind, MarkerKind::Bar);
        let total = placed.to_path().len();
        assert_eq!(total, placed.layers().iter().map(|l| l.path.len()).sum::<usize>());
    }

    #[test]
    fn none_places_nothing() {
        let placed = place(&MarkerConfig::default(), &line(), VertexEnd::End, &PlacementOptions::default());
        assert!(placed.is_empty());
        assert!(placed.bounding_box().is_empty());
    }
}
