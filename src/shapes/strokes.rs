//! Centre-line shapes widened with the pen.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};

use glam::{DVec2, dvec2};

use super::defaults::{HOOK_BASE, HOOK_SCALE};
use super::{ShapeParams, pen, polyline, round_pen};
use crate::geometry::arc as arc_to;
use crate::path::Path;

fn hook_radius(pen_width: f64) -> f64 {
    HOOK_BASE + HOOK_SCALE * pen_width
}

/// Line across the path at the vertex.
pub(crate) fn bar(p: &ShapeParams) -> Path {
    let h = 0.5 * p.size;
    pen(&polyline(&[dvec2(0.0, -h), dvec2(0.0, h)]), p.pen_width)
}

/// One harpoon barb.
pub(crate) fn single(p: &ShapeParams) -> Path {
    let s = p.size;
    round_pen(&polyline(&[DVec2::ZERO, dvec2(-0.8 * s, 0.4 * s)]), p.pen_width)
}

/// Arrowhead drawn as two round-capped barbs.
pub(crate) fn round(p: &ShapeParams) -> Path {
    let r = 2.0 * hook_radius(p.pen_width);
    let mut path = Path::new();
    path.move_to(dvec2(-r, r))
        .curve_to(dvec2(-0.6 * r, 0.6 * r), dvec2(-0.25 * r, 0.2 * r), DVec2::ZERO)
        .curve_to(dvec2(-0.25 * r, -0.2 * r), dvec2(-0.6 * r, -0.6 * r), dvec2(-r, -r));
    round_pen(&path, p.pen_width)
}

pub(crate) fn bracket(p: &ShapeParams) -> Path {
    let (h, d) = (0.5 * p.size, p.size / 3.0);
    pen(&polyline(&[dvec2(-d, h), dvec2(0.0, h), dvec2(0.0, -h), dvec2(-d, -h)]), p.pen_width)
}

/// Shallow arc bulging toward the vertex.
pub(crate) fn round_bracket(p: &ShapeParams) -> Path {
    let r = p.size;
    let mut path = Path::new();
    arc_to(&mut path, dvec2(-r, 0.0), DVec2::splat(r), -FRAC_PI_6, 2.0 * FRAC_PI_6);
    pen(&path, p.pen_width)
}

pub(crate) fn brace(p: &ShapeParams) -> Path {
    let s = p.size;
    let mut path = Path::new();
    path.move_to(dvec2(-0.25 * s, 0.5 * s))
        .curve_to(dvec2(-0.05 * s, 0.5 * s), dvec2(-0.15 * s, 0.05 * s), DVec2::ZERO)
        .curve_to(dvec2(-0.15 * s, -0.05 * s), dvec2(-0.05 * s, -0.5 * s), dvec2(-0.25 * s, -0.5 * s));
    round_pen(&path, p.pen_width)
}

/// Two concave flanks meeting in a point at the vertex.
pub(crate) fn cusp(p: &ShapeParams) -> Path {
    let l = 2.0 * hook_radius(p.pen_width);
    let mut path = Path::new();
    path.move_to(dvec2(-l, 0.6 * l))
        .curve_to(dvec2(-0.5 * l, 0.6 * l), dvec2(-0.1 * l, 0.2 * l), DVec2::ZERO)
        .curve_to(dvec2(-0.1 * l, -0.2 * l), dvec2(-0.5 * l, -0.6 * l), dvec2(-l, -0.6 * l));
    round_pen(&path, p.pen_width)
}

pub(crate) fn hook_up(p: &ShapeParams) -> Path {
    let r = hook_radius(p.pen_width);
    let mut path = Path::new();
    arc_to(&mut path, dvec2(0.0, r), DVec2::splat(r), -FRAC_PI_2, -PI);
    round_pen(&path, p.pen_width)
}

pub(crate) fn hook_down(p: &ShapeParams) -> Path {
    hook_up(p).reflected_x_axis()
}

pub(crate) fn chevron(p: &ShapeParams) -> Path {
    let h = 0.5 * p.size;
    pen(&polyline(&[dvec2(-h, h), DVec2::ZERO, dvec2(-h, -h)]), p.pen_width)
}

pub(crate) fn cross(p: &ShapeParams) -> Path {
    let d = 0.5 * p.size;
    let mut path = polyline(&[dvec2(-d, -d), dvec2(d, d)]);
    path.extend(&polyline(&[dvec2(-d, d), dvec2(d, -d)]));
    pen(&path, p.pen_width)
}

pub(crate) fn plus(p: &ShapeParams) -> Path {
    let d = 0.5 * p.size;
    let mut path = polyline(&[dvec2(-d, 0.0), dvec2(d, 0.0)]);
    path.extend(&polyline(&[dvec2(0.0, -d), dvec2(0.0, d)]));
    pen(&path, p.pen_width)
}

pub(crate) fn tick(p: &ShapeParams) -> Path {
    let s = p.size;
    pen(&polyline(&[dvec2(-0.25 * s, -0.5 * s), dvec2(0.25 * s, 0.5 * s)]), p.pen_width)
}

pub(crate) fn double_bar(p: &ShapeParams) -> Path {
    let h = 0.5 * p.size;
    let gap = p.size / 3.0;
    let mut path = polyline(&[dvec2(0.0, -h), dvec2(0.0, h)]);
    path.extend(&polyline(&[dvec2(-gap, -h), dvec2(-gap, h)]));
    pen(&path, p.pen_width)
}

pub(crate) fn half_bar_up(p: &ShapeParams) -> Path {
    pen(&polyline(&[DVec2::ZERO, dvec2(0.0, 0.5 * p.size)]), p.pen_width)
}

pub(crate) fn half_bar_down(p: &ShapeParams) -> Path {
    pen(&polyline(&[DVec2::ZERO, dvec2(0.0, -0.5 * p.size)]), p.pen_width)
}

/// Half circle around the vertex, open toward the line's continuation.
pub(crate) fn arc(p: &ShapeParams) -> Path {
    let r = 0.5 * p.size;
    let mut path = Path::new();
    arc_to(&mut path, DVec2::ZERO, DVec2::splat(r), FRAC_PI_2, PI);
    pen(&path, p.pen_width)
}

pub(crate) fn wave(p: &ShapeParams) -> Path {
    let s = p.size;
    let mut path = Path::new();
    path.move_to(dvec2(0.0, -0.5 * s))
        .curve_to(dvec2(0.35 * s, -0.5 * s), dvec2(0.35 * s, 0.0), DVec2::ZERO)
        .curve_to(dvec2(-0.35 * s, 0.0), dvec2(-0.35 * s, 0.5 * s), dvec2(0.0, 0.5 * s));
    round_pen(&path, p.pen_width)
}

pub(crate) fn zigzag(p: &ShapeParams) -> Path {
    let s = p.size;
    pen(
        &polyline(&[
            dvec2(0.0, -0.5 * s),
            dvec2(0.2 * s, -s / 6.0),
            dvec2(-0.2 * s, s / 6.0),
            dvec2(0.0, 0.5 * s),
        ]),
        p.pen_width,
    )
}

/// Three prongs fanning out from a point behind the vertex.
pub(crate) fn crowsfoot_lines(size: f64) -> Path {
    let root = dvec2(-size, 0.0);
    let mut path = Path::new();
    for y in [0.5 * size, 0.0, -0.5 * size] {
        path.extend(&polyline(&[root, dvec2(0.0, y)]));
    }
    path
}

pub(crate) fn crowsfoot(p: &ShapeParams) -> Path {
    pen(&crowsfoot_lines(p.size), p.pen_width)
}

/// Two pairs of feathers along the shaft.
pub(crate) fn fletching(p: &ShapeParams) -> Path {
    let step = p.size / 3.0;
    let mut path = Path::new();
    for i in 0..2 {
        let x = -step * i as f64;
        path.extend(&polyline(&[dvec2(x - step, step), dvec2(x, 0.0), dvec2(x - step, -step)]));
    }
    pen(&path, p.pen_width)
}
