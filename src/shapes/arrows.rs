//! Arrowheads, triangles and line caps.
//!
//! All of these are closed-form outlines with the tip at the origin and the
//! body behind it (negative x).

use glam::{DVec2, dvec2};

use super::ShapeParams;
use super::defaults::{
    POINTED_BASE, POINTED_HALF_ANGLE, POINTED_SCALE, POINTED45_HALF_ANGLE, POINTED60_HALF_ANGLE,
};
use crate::path::Path;

/// Length of a pen-driven arrowhead.
fn pointed_length(pen_width: f64) -> f64 {
    POINTED_BASE + POINTED_SCALE * pen_width
}

/// Upper barb of a pointed head: tip to barb end along a concave curve.
fn upper_barb(path: &mut Path, len: f64, half: f64) {
    path.move_to(DVec2::ZERO).curve_to(
        dvec2(-0.4 * len, 0.25 * half),
        dvec2(-0.8 * len, 0.6 * half),
        dvec2(-len, half),
    );
}

fn pointed_head(pen_width: f64, half_angle_deg: f64) -> Path {
    let len = pointed_length(pen_width);
    let half = len * half_angle_deg.to_radians().tan();
    let mut path = Path::new();
    upper_barb(&mut path, len, half);
    path.line_to(dvec2(-0.75 * len, 0.0))
        .line_to(dvec2(-len, -half))
        .curve_to(dvec2(-0.8 * len, -0.6 * half), dvec2(-0.4 * len, -0.25 * half), DVec2::ZERO)
        .close();
    path
}

pub(crate) fn pointed(p: &ShapeParams) -> Path {
    pointed_head(p.pen_width, POINTED_HALF_ANGLE)
}

pub(crate) fn pointed60(p: &ShapeParams) -> Path {
    pointed_head(p.pen_width, POINTED60_HALF_ANGLE)
}

pub(crate) fn pointed45(p: &ShapeParams) -> Path {
    pointed_head(p.pen_width, POINTED45_HALF_ANGLE)
}

/// Upper half of [`pointed`], closed along the axis.
pub(crate) fn half_pointed_up(p: &ShapeParams) -> Path {
    let len = pointed_length(p.pen_width);
    let half = len * POINTED_HALF_ANGLE.to_radians().tan();
    let mut path = Path::new();
    upper_barb(&mut path, len, half);
    path.line_to(dvec2(-0.75 * len, 0.0)).close();
    path
}

pub(crate) fn half_pointed_down(p: &ShapeParams) -> Path {
    half_pointed_up(p).reflected_x_axis()
}

pub(crate) fn triangle(p: &ShapeParams) -> Path {
    let s = p.size;
    Path::polygon(&[DVec2::ZERO, dvec2(-s, 0.5 * s), dvec2(-s, -0.5 * s)])
}

/// Isoceles triangle as wide as the pen, `size` long.
pub(crate) fn triangle_cap(p: &ShapeParams) -> Path {
    let (s, h) = (p.size, 0.5 * p.pen_width);
    Path::polygon(&[DVec2::ZERO, dvec2(-s, h), dvec2(-s, -h)])
}

/// Half-pen square beyond the vertex.
pub(crate) fn square_cap(p: &ShapeParams) -> Path {
    let h = 0.5 * p.pen_width;
    Path::polygon(&[dvec2(0.0, -h), dvec2(h, -h), dvec2(h, h), dvec2(0.0, h)])
}

pub(crate) fn stealth(p: &ShapeParams) -> Path {
    let s = p.size;
    Path::polygon(&[DVec2::ZERO, dvec2(-s, 0.4 * s), dvec2(-0.7 * s, 0.0), dvec2(-s, -0.4 * s)])
}

pub(crate) fn kite(p: &ShapeParams) -> Path {
    let s = p.size;
    Path::polygon(&[DVec2::ZERO, dvec2(-0.35 * s, 0.3 * s), dvec2(-s, 0.0), dvec2(-0.35 * s, -0.3 * s)])
}

/// Barbed head with a short shaft stub.
pub(crate) fn dart(p: &ShapeParams) -> Path {
    let s = p.size;
    Path::polygon(&[
        DVec2::ZERO,
        dvec2(-0.6 * s, 0.45 * s),
        dvec2(-0.45 * s, 0.1 * s),
        dvec2(-s, 0.1 * s),
        dvec2(-s, -0.1 * s),
        dvec2(-0.45 * s, -0.1 * s),
        dvec2(-0.6 * s, -0.45 * s),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FLATTEN_TOLERANCE;

    fn area(path: &Path) -> f64 {
        path.flatten(FLATTEN_TOLERANCE).iter().map(|l| l.signed_area()).sum()
    }

    #[test]
    fn triangle_cap_matches_pen_and_size() {
        let t = triangle_cap(&ShapeParams::new(1.0, 5.0));
        let bb = t.bounding_box();
        assert_eq!(bb.min, dvec2(-5.0, -0.5));
        assert_eq!(bb.max, dvec2(0.0, 0.5));
        assert!((area(&t) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn pointed_grows_with_pen_not_size() {
        let thin = pointed(&ShapeParams::new(1.0, 5.0));
        assert_eq!(thin, pointed(&ShapeParams::new(1.0, 50.0)));
        let thick = pointed(&ShapeParams::new(2.0, 5.0));
        assert!(thick.bounding_box().width() > thin.bounding_box().width());
        assert!(area(&thin) > 0.0);
    }

    #[test]
    fn half_pointed_halves_are_mirrors() {
        let p = ShapeParams::new(1.0, 5.0);
        let up = half_pointed_up(&p).bounding_box();
        let down = half_pointed_down(&p).bounding_box();
        assert_eq!(up.min.y, 0.0);
        assert_eq!(down.max.y, 0.0);
        assert!((up.max.y + down.min.y).abs() < 1e-12);
    }
}
