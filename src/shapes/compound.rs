//! Shapes built from replicated parts merged with a polygon union.

use std::f64::consts::{FRAC_PI_4, TAU};

use glam::{DVec2, dvec2};

use super::strokes::crowsfoot_lines;
use super::{ShapeParams, outline, pen, polyline, regular_polygon};
use crate::geometry::{circle, ellipse, union_all};
use crate::path::Path;

/// `count` copies of `part` rotated evenly about the origin, starting at 0.
fn ring_of(part: &Path, count: usize) -> Vec<Path> {
    (0..count).map(|i| part.rotated(TAU * i as f64 / count as f64)).collect()
}

fn discs_around(count: usize, distance: f64, radius: f64) -> Vec<Path> {
    ring_of(&circle(dvec2(distance, 0.0), radius), count)
}

fn diagonal_cross(d: f64) -> Path {
    let mut path = polyline(&[dvec2(-d, -d), dvec2(d, d)]);
    path.extend(&polyline(&[dvec2(-d, d), dvec2(d, -d)]));
    path
}

fn upright_plus(d: f64) -> Path {
    let mut path = polyline(&[dvec2(-d, 0.0), dvec2(d, 0.0)]);
    path.extend(&polyline(&[dvec2(0.0, -d), dvec2(0.0, d)]));
    path
}

fn centred_square(h: f64) -> Path {
    Path::polygon(&[dvec2(-h, -h), dvec2(h, -h), dvec2(h, h), dvec2(-h, h)])
}

// ============================================================================
// Radial
// ============================================================================

pub(crate) fn asterisk(p: &ShapeParams) -> Path {
    let arm = pen(&polyline(&[dvec2(-0.5 * p.size, 0.0), dvec2(0.5 * p.size, 0.0)]), p.pen_width);
    union_all(&ring_of(&arm, 6)[..3])
}

pub(crate) fn snowflake(p: &ShapeParams) -> Path {
    let len = 0.5 * p.size;
    let branch = 0.2 * p.size;
    let at = dvec2(0.6 * len, 0.0);
    let mut centre_line = polyline(&[DVec2::ZERO, dvec2(len, 0.0)]);
    for side in [1.0, -1.0] {
        let tip = at + DVec2::from_angle(side * FRAC_PI_4) * branch;
        centre_line.extend(&polyline(&[at, tip]));
    }
    union_all(&ring_of(&pen(&centre_line, p.pen_width), 6))
}

pub(crate) fn flower(p: &ShapeParams) -> Path {
    let s = p.size;
    let petal = ellipse(dvec2(0.25 * s, 0.0), dvec2(0.25 * s, 0.12 * s));
    let mut parts = ring_of(&petal, 5);
    parts.push(circle(DVec2::ZERO, 0.12 * s));
    union_all(&parts)
}

pub(crate) fn cog(p: &ShapeParams) -> Path {
    let s = p.size;
    let mut body = circle(DVec2::ZERO, 0.35 * s);
    body.extend(&circle(DVec2::ZERO, 0.12 * s).reflected_x_axis());
    let tooth = Path::polygon(&[
        dvec2(0.3 * s, -0.07 * s),
        dvec2(0.5 * s, -0.07 * s),
        dvec2(0.5 * s, 0.07 * s),
        dvec2(0.3 * s, 0.07 * s),
    ]);
    let mut parts = vec![body];
    parts.extend(ring_of(&tooth, 8));
    union_all(&parts)
}

pub(crate) fn sun(p: &ShapeParams) -> Path {
    let s = p.size;
    let ray = pen(&polyline(&[dvec2(0.32 * s, 0.0), dvec2(0.5 * s, 0.0)]), p.pen_width);
    let mut parts = vec![circle(DVec2::ZERO, 0.25 * s)];
    parts.extend(ring_of(&ray, 8));
    union_all(&parts)
}

pub(crate) fn trefoil(p: &ShapeParams) -> Path {
    union_all(&discs_around(3, 0.2 * p.size, 0.25 * p.size))
}

pub(crate) fn quatrefoil(p: &ShapeParams) -> Path {
    union_all(&discs_around(4, 0.2 * p.size, 0.25 * p.size))
}

pub(crate) fn cinquefoil(p: &ShapeParams) -> Path {
    union_all(&discs_around(5, 0.25 * p.size, 0.22 * p.size))
}

pub(crate) fn hexagram(p: &ShapeParams) -> Path {
    let r = 0.5 * p.size;
    union_all(&[
        Path::polygon(&regular_polygon(DVec2::ZERO, 3, r, 0.0)),
        Path::polygon(&regular_polygon(DVec2::ZERO, 3, r, TAU / 6.0)),
    ])
}

pub(crate) fn octagram(p: &ShapeParams) -> Path {
    let r = 0.5 * p.size;
    union_all(&[
        Path::polygon(&regular_polygon(DVec2::ZERO, 4, r, 0.0)),
        Path::polygon(&regular_polygon(DVec2::ZERO, 4, r, FRAC_PI_4)),
    ])
}

// ============================================================================
// Suits and leaves
// ============================================================================

pub(crate) fn club(p: &ShapeParams) -> Path {
    let s = p.size;
    let r = 0.2 * s;
    union_all(&[
        circle(dvec2(-0.55 * s, 0.0), r),
        circle(dvec2(-0.3 * s, 0.22 * s), r),
        circle(dvec2(-0.3 * s, -0.22 * s), r),
        Path::polygon(&[dvec2(-0.3 * s, 0.0), dvec2(0.0, -0.12 * s), dvec2(0.0, 0.12 * s)]),
    ])
}

fn heart_parts(s: f64) -> Vec<Path> {
    vec![
        circle(dvec2(-0.65 * s, 0.22 * s), 0.27 * s),
        circle(dvec2(-0.65 * s, -0.22 * s), 0.27 * s),
        Path::polygon(&[DVec2::ZERO, dvec2(-0.6 * s, 0.45 * s), dvec2(-0.6 * s, -0.45 * s)]),
    ]
}

pub(crate) fn heart(p: &ShapeParams) -> Path {
    union_all(&heart_parts(p.size))
}

pub(crate) fn spade(p: &ShapeParams) -> Path {
    let s = 0.85 * p.size;
    let mut parts = heart_parts(s);
    let (x0, x1, h) = (-p.size, -0.7 * s, 0.06 * p.size);
    parts.push(Path::polygon(&[dvec2(x0, -h), dvec2(x1, -h), dvec2(x1, h), dvec2(x0, h)]));
    union_all(&parts)
}

pub(crate) fn leaf(p: &ShapeParams) -> Path {
    let s = 0.8 * p.size;
    let mut blade = Path::new();
    blade
        .move_to(DVec2::ZERO)
        .curve_to(dvec2(-0.25 * s, -0.2 * s), dvec2(-0.75 * s, -0.2 * s), dvec2(-s, 0.0))
        .curve_to(dvec2(-0.75 * s, 0.2 * s), dvec2(-0.25 * s, 0.2 * s), DVec2::ZERO)
        .close();
    let spread = TAU / 12.0;
    union_all(&[blade.rotated(-spread), blade.clone(), blade.rotated(spread)])
}

// ============================================================================
// Framed marks
// ============================================================================

fn ring(s: f64, pen_width: f64) -> Path {
    outline(&circle(DVec2::ZERO, 0.5 * s), pen_width)
}

fn frame(s: f64, pen_width: f64) -> Path {
    outline(&centred_square(0.5 * s), pen_width)
}

pub(crate) fn circle_crossed(p: &ShapeParams) -> Path {
    let d = 0.5 * p.size * FRAC_PI_4.cos();
    union_all(&[ring(p.size, p.pen_width), pen(&diagonal_cross(d), p.pen_width)])
}

pub(crate) fn circle_plus(p: &ShapeParams) -> Path {
    union_all(&[ring(p.size, p.pen_width), pen(&upright_plus(0.5 * p.size), p.pen_width)])
}

pub(crate) fn circle_dot(p: &ShapeParams) -> Path {
    union_all(&[ring(p.size, p.pen_width), circle(DVec2::ZERO, p.pen_width)])
}

pub(crate) fn box_crossed(p: &ShapeParams) -> Path {
    union_all(&[frame(p.size, p.pen_width), pen(&diagonal_cross(0.5 * p.size), p.pen_width)])
}

pub(crate) fn box_plus(p: &ShapeParams) -> Path {
    union_all(&[frame(p.size, p.pen_width), pen(&upright_plus(0.5 * p.size), p.pen_width)])
}

pub(crate) fn box_dot(p: &ShapeParams) -> Path {
    union_all(&[frame(p.size, p.pen_width), circle(DVec2::ZERO, p.pen_width)])
}

// ============================================================================
// Crow's feet
// ============================================================================

pub(crate) fn crowsfoot_bar(p: &ShapeParams) -> Path {
    let s = p.size;
    union_all(&[
        pen(&crowsfoot_lines(s), p.pen_width),
        pen(&polyline(&[dvec2(-s, -0.5 * s), dvec2(-s, 0.5 * s)]), p.pen_width),
    ])
}

pub(crate) fn crowsfoot_circle(p: &ShapeParams) -> Path {
    let s = p.size;
    let r = 0.25 * s;
    union_all(&[
        pen(&crowsfoot_lines(s), p.pen_width),
        outline(&circle(dvec2(-s - r, 0.0), r), p.pen_width),
    ])
}
