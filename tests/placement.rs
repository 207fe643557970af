use endcap::geometry::FLATTEN_TOLERANCE;
use endcap::types::Length;
use endcap::{
    CubicSegment, LineSegment, MarkerConfig, MarkerKind, PlacementOptions, VertexEnd, place,
};
use glam::{DVec2, dvec2};
use std::f64::consts::PI;

const EPS: f64 = 1e-9;

fn close(a: DVec2, b: DVec2) -> bool {
    a.distance(b) < EPS
}

fn triangle_cap() -> MarkerConfig {
    let mut cfg = MarkerConfig::new(MarkerKind::TriangleCap, Length::bp(1.0));
    cfg.set_size(Length::bp(5.0)).unwrap();
    cfg
}

/// Distinct vertices of the placed outline.
fn vertices(cfg: &MarkerConfig, end: VertexEnd) -> Vec<DVec2> {
    let segment = LineSegment::new(DVec2::ZERO, dvec2(10.0, 0.0));
    let placed = place(cfg, &segment, end, &PlacementOptions::default());
    placed.to_path().flatten(FLATTEN_TOLERANCE).remove(0).points
}

// =============================================================================
// Triangle cap on a straight segment
// =============================================================================

#[test]
fn triangle_cap_at_end() {
    let cfg = triangle_cap();
    let segment = LineSegment::new(DVec2::ZERO, dvec2(10.0, 0.0));
    assert_eq!(endcap::placement::orientation_angle(&segment, VertexEnd::End, 0.0), 0.0);

    let pts = vertices(&cfg, VertexEnd::End);
    assert_eq!(pts.len(), 3);
    // Apex on the vertex, base one size behind, half a pen either side.
    assert!(close(pts[0], dvec2(10.0, 0.0)));
    assert!(close(pts[1], dvec2(5.0, 0.5)));
    assert!(close(pts[2], dvec2(5.0, -0.5)));
}

#[test]
fn triangle_cap_at_start() {
    let cfg = triangle_cap();
    let segment = LineSegment::new(DVec2::ZERO, dvec2(10.0, 0.0));
    assert_eq!(endcap::placement::orientation_angle(&segment, VertexEnd::Start, 0.0), PI);

    let pts = vertices(&cfg, VertexEnd::Start);
    // Apex on the start vertex, body running along the segment.
    assert!(close(pts[0], dvec2(0.0, 0.0)));
    let bb = place(&cfg, &segment, VertexEnd::Start, &PlacementOptions::default()).bounding_box();
    assert!((bb.min.x).abs() < EPS);
    assert!((bb.max.x - 5.0).abs() < EPS);
    assert!((bb.height() - 1.0).abs() < EPS);
}

// =============================================================================
// Pipeline properties
// =============================================================================

#[test]
fn repeats_grow_the_bounding_box() {
    let segment = LineSegment::new(DVec2::ZERO, dvec2(10.0, 0.0));
    let mut last = 0.0;
    for n in 1..=5 {
        let mut cfg = MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0));
        cfg.set_repeated(n).unwrap();
        let width = place(&cfg, &segment, VertexEnd::End, &PlacementOptions::default())
            .bounding_box()
            .width();
        assert!(width > last, "{n} copies: {width} <= {last}");
        last = width;
    }
}

#[test]
fn zero_repeat_offset_keeps_width() {
    let segment = LineSegment::new(DVec2::ZERO, dvec2(10.0, 0.0));
    let mut cfg = MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0));
    cfg.set_repeat_offset(Some(Length::ZERO)).unwrap();
    let one = place(&cfg, &segment, VertexEnd::End, &PlacementOptions::default()).bounding_box();
    cfg.set_repeated(3).unwrap();
    let three = place(&cfg, &segment, VertexEnd::End, &PlacementOptions::default()).bounding_box();
    assert!((one.width() - three.width()).abs() < EPS);
}

#[test]
fn reversed_marker_points_into_the_line() {
    let segment = LineSegment::new(DVec2::ZERO, dvec2(10.0, 0.0));
    let mut cfg = MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0));
    cfg.set_reversed(true);
    let bb = place(&cfg, &segment, VertexEnd::End, &PlacementOptions::default()).bounding_box();
    // Still behind the vertex, now with its base on it.
    assert!((bb.max.x - 10.0).abs() < EPS);
    assert!((bb.min.x - 5.0).abs() < EPS);
}

#[test]
fn composite_follows_the_primary_along_the_line() {
    let segment = LineSegment::new(DVec2::ZERO, dvec2(20.0, 0.0));
    let mut cfg = MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0));
    cfg.set_composite(Some(MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0)))).unwrap();
    let placed = place(&cfg, &segment, VertexEnd::End, &PlacementOptions::default());
    let primary = placed.layers()[0].path.bounding_box();
    let composite = placed.layers()[1].path.bounding_box();
    assert!(composite.max.x < primary.min.x);
}

#[test]
fn composite_clears_a_shifted_parent() {
    let segment = LineSegment::new(DVec2::ZERO, dvec2(20.0, 0.0));
    for shift in [2.0, -2.0] {
        let mut cfg = MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0));
        cfg.set_offset(Some(Length::bp(shift))).unwrap();
        cfg.set_composite(Some(MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0)))).unwrap();
        let placed = place(&cfg, &segment, VertexEnd::End, &PlacementOptions::default());
        let primary = placed.layers()[0].path.bounding_box();
        let composite = placed.layers()[1].path.bounding_box();
        // The user offset moves the parent's apex forward; the composite
        // stays half a pen behind the parent's base.
        assert!((primary.max.x - (20.0 + shift)).abs() < EPS, "shift {shift}");
        assert!((primary.min.x - composite.max.x - 0.5).abs() < EPS, "shift {shift}");
    }
}

#[test]
fn overlay_composite_shares_the_origin() {
    let segment = LineSegment::new(DVec2::ZERO, dvec2(20.0, 0.0));
    let mut cfg = MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0));
    cfg.set_overlay(true);
    cfg.set_composite(Some(MarkerConfig::new(MarkerKind::Triangle, Length::bp(1.0)))).unwrap();
    let placed = place(&cfg, &segment, VertexEnd::End, &PlacementOptions::default());
    assert_eq!(placed.layers()[0].path, placed.layers()[1].path);
}

#[test]
fn curved_segment_orients_along_its_end_tangent() {
    let curve = CubicSegment::new(DVec2::ZERO, dvec2(0.0, 10.0), dvec2(10.0, 10.0), dvec2(10.0, 0.0));
    let cfg = triangle_cap();
    let placed = place(&cfg, &curve, VertexEnd::End, &PlacementOptions::default());
    let bb = placed.bounding_box();
    // Heading straight down into (10, 0): the body sits above the vertex.
    assert!((bb.min.y).abs() < EPS);
    assert!((bb.max.y - 5.0).abs() < EPS);
}
