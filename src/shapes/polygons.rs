//! Dots, boxes, regular polygons, stars and other closed-form outlines.
//!
//! Shapes named `*_filled` sit centred on the vertex; the ones without a
//! suffix (circle, diamond, square …) sit behind it. Every `*_open` variant
//! is the filled outline drawn with the pen.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_8, PI};

use glam::{DVec2, dvec2};

use super::defaults::{STAR4_INNER, STAR5_INNER, STAR6_INNER, WIDTH_RATIO};
use super::{ShapeParams, outline, regular_polygon, star};
use crate::geometry::{arc, circle as disc, ellipse};
use crate::path::Path;

// ============================================================================
// Behind the vertex
// ============================================================================

pub(crate) fn circle(p: &ShapeParams) -> Path {
    let r = 0.5 * p.size;
    disc(dvec2(-r, 0.0), r)
}

pub(crate) fn circle_open(p: &ShapeParams) -> Path {
    outline(&circle(p), p.pen_width)
}

pub(crate) fn diamond(p: &ShapeParams) -> Path {
    let s = p.size;
    Path::polygon(&[DVec2::ZERO, dvec2(-0.5 * s, s / 3.0), dvec2(-s, 0.0), dvec2(-0.5 * s, -s / 3.0)])
}

pub(crate) fn diamond_open(p: &ShapeParams) -> Path {
    outline(&diamond(p), p.pen_width)
}

/// Diamond with an independent width across the line.
pub(crate) fn diamond_wide(p: &ShapeParams) -> Path {
    let s = p.size;
    let h = 0.5 * p.width_or(2.0 / 3.0);
    Path::polygon(&[DVec2::ZERO, dvec2(-0.5 * s, h), dvec2(-s, 0.0), dvec2(-0.5 * s, -h)])
}

pub(crate) fn square(p: &ShapeParams) -> Path {
    let (s, h) = (p.size, 0.5 * p.size);
    Path::polygon(&[dvec2(-s, -h), dvec2(0.0, -h), dvec2(0.0, h), dvec2(-s, h)])
}

pub(crate) fn square_open(p: &ShapeParams) -> Path {
    outline(&square(p), p.pen_width)
}

pub(crate) fn triangle_open(p: &ShapeParams) -> Path {
    outline(&super::arrows::triangle(p), p.pen_width)
}

/// Half disc with its flat side on the vertex.
pub(crate) fn semicircle_filled(p: &ShapeParams) -> Path {
    let r = 0.5 * p.size;
    let mut path = Path::new();
    arc(&mut path, DVec2::ZERO, DVec2::splat(r), FRAC_PI_2, PI);
    path.close();
    path
}

pub(crate) fn semicircle_open(p: &ShapeParams) -> Path {
    outline(&semicircle_filled(p), p.pen_width)
}

pub(crate) fn ellipse_filled(p: &ShapeParams) -> Path {
    let rx = 0.5 * p.size;
    let ry = 0.5 * p.width_or(WIDTH_RATIO);
    ellipse(dvec2(-rx, 0.0), dvec2(rx, ry))
}

pub(crate) fn ellipse_open(p: &ShapeParams) -> Path {
    outline(&ellipse_filled(p), p.pen_width)
}

pub(crate) fn rectangle_filled(p: &ShapeParams) -> Path {
    let s = p.size;
    let h = 0.5 * p.width_or(WIDTH_RATIO);
    Path::polygon(&[dvec2(-s, -h), dvec2(0.0, -h), dvec2(0.0, h), dvec2(-s, h)])
}

pub(crate) fn rectangle_open(p: &ShapeParams) -> Path {
    outline(&rectangle_filled(p), p.pen_width)
}

pub(crate) fn lens(p: &ShapeParams) -> Path {
    let s = p.size;
    let mut path = Path::new();
    path.move_to(DVec2::ZERO)
        .curve_to(dvec2(-0.25 * s, s / 3.0), dvec2(-0.75 * s, s / 3.0), dvec2(-s, 0.0))
        .curve_to(dvec2(-0.75 * s, -s / 3.0), dvec2(-0.25 * s, -s / 3.0), DVec2::ZERO)
        .close();
    path
}

pub(crate) fn teardrop(p: &ShapeParams) -> Path {
    let s = p.size;
    let mut path = Path::new();
    path.move_to(DVec2::ZERO)
        .curve_to(dvec2(-0.3 * s, -0.05 * s), dvec2(-0.45 * s, -0.35 * s), dvec2(-0.7 * s, -0.35 * s))
        .curve_to(dvec2(-0.9 * s, -0.35 * s), dvec2(-s, -0.2 * s), dvec2(-s, 0.0))
        .curve_to(dvec2(-s, 0.2 * s), dvec2(-0.9 * s, 0.35 * s), dvec2(-0.7 * s, 0.35 * s))
        .curve_to(dvec2(-0.45 * s, 0.35 * s), dvec2(-0.3 * s, 0.05 * s), DVec2::ZERO)
        .close();
    path
}

/// Crescent with its horns toward the vertex.
pub(crate) fn crescent(p: &ShapeParams) -> Path {
    let r = 0.5 * p.size;
    let c = dvec2(-r, 0.0);
    // Inner circle passes through both horn tips.
    let inner_c = c + dvec2(0.5 * r, 0.0);
    let inner_r = r * FRAC_PI_3.sin();
    let mut path = Path::new();
    arc(&mut path, c, DVec2::splat(r), FRAC_PI_3, 4.0 * FRAC_PI_3);
    arc(&mut path, inner_c, DVec2::splat(inner_r), -FRAC_PI_2, -PI);
    path.close();
    path
}

/// Thin lens standing across the line.
pub(crate) fn spike(p: &ShapeParams) -> Path {
    let s = p.size;
    let mut path = Path::new();
    path.move_to(dvec2(0.0, -0.5 * s))
        .curve_to(dvec2(0.15 * s, -0.15 * s), dvec2(0.15 * s, 0.15 * s), dvec2(0.0, 0.5 * s))
        .curve_to(dvec2(-0.15 * s, 0.15 * s), dvec2(-0.15 * s, -0.15 * s), dvec2(0.0, -0.5 * s))
        .close();
    path
}

// ============================================================================
// Centred on the vertex
// ============================================================================

pub(crate) fn dot_filled(p: &ShapeParams) -> Path {
    disc(DVec2::ZERO, 0.5 * p.size)
}

pub(crate) fn dot_open(p: &ShapeParams) -> Path {
    outline(&dot_filled(p), p.pen_width)
}

pub(crate) fn box_filled(p: &ShapeParams) -> Path {
    let h = 0.5 * p.size;
    Path::polygon(&[dvec2(-h, -h), dvec2(h, -h), dvec2(h, h), dvec2(-h, h)])
}

pub(crate) fn box_open(p: &ShapeParams) -> Path {
    outline(&box_filled(p), p.pen_width)
}

pub(crate) fn triangle_up_filled(p: &ShapeParams) -> Path {
    Path::polygon(&regular_polygon(DVec2::ZERO, 3, 0.5 * p.size, FRAC_PI_2))
}

pub(crate) fn triangle_up_open(p: &ShapeParams) -> Path {
    outline(&triangle_up_filled(p), p.pen_width)
}

pub(crate) fn triangle_down_filled(p: &ShapeParams) -> Path {
    Path::polygon(&regular_polygon(DVec2::ZERO, 3, 0.5 * p.size, -FRAC_PI_2))
}

pub(crate) fn triangle_down_open(p: &ShapeParams) -> Path {
    outline(&triangle_down_filled(p), p.pen_width)
}

pub(crate) fn rhombus_filled(p: &ShapeParams) -> Path {
    let s = p.size;
    Path::polygon(&[dvec2(0.0, -0.5 * s), dvec2(0.25 * s, 0.0), dvec2(0.0, 0.5 * s), dvec2(-0.25 * s, 0.0)])
}

pub(crate) fn rhombus_open(p: &ShapeParams) -> Path {
    outline(&rhombus_filled(p), p.pen_width)
}

pub(crate) fn pentagon_filled(p: &ShapeParams) -> Path {
    Path::polygon(&regular_polygon(DVec2::ZERO, 5, 0.5 * p.size, 0.0))
}

pub(crate) fn pentagon_open(p: &ShapeParams) -> Path {
    outline(&pentagon_filled(p), p.pen_width)
}

pub(crate) fn hexagon_filled(p: &ShapeParams) -> Path {
    Path::polygon(&regular_polygon(DVec2::ZERO, 6, 0.5 * p.size, 0.0))
}

pub(crate) fn hexagon_open(p: &ShapeParams) -> Path {
    outline(&hexagon_filled(p), p.pen_width)
}

pub(crate) fn octagon_filled(p: &ShapeParams) -> Path {
    Path::polygon(&regular_polygon(DVec2::ZERO, 8, 0.5 * p.size, FRAC_PI_8))
}

pub(crate) fn octagon_open(p: &ShapeParams) -> Path {
    outline(&octagon_filled(p), p.pen_width)
}

pub(crate) fn star4_filled(p: &ShapeParams) -> Path {
    let r = 0.5 * p.size;
    Path::polygon(&star(DVec2::ZERO, 4, r, r * STAR4_INNER))
}

pub(crate) fn star4_open(p: &ShapeParams) -> Path {
    outline(&star4_filled(p), p.pen_width)
}

pub(crate) fn star5_filled(p: &ShapeParams) -> Path {
    let r = 0.5 * p.size;
    Path::polygon(&star(DVec2::ZERO, 5, r, r * STAR5_INNER))
}

pub(crate) fn star5_open(p: &ShapeParams) -> Path {
    outline(&star5_filled(p), p.pen_width)
}

pub(crate) fn star6_filled(p: &ShapeParams) -> Path {
    let r = 0.5 * p.size;
    Path::polygon(&star(DVec2::ZERO, 6, r, r * STAR6_INNER))
}

pub(crate) fn star6_open(p: &ShapeParams) -> Path {
    outline(&star6_filled(p), p.pen_width)
}
