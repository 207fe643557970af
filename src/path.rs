//! Geometric path model shared by the shape generators, the placement
//! pipeline and exporters.
//!
//! A [`Path`] is an ordered list of move/line/cubic/close operations in bp.
//! Paths are filled with the non-zero winding rule; generators that need
//! holes emit the hole rings with the opposite orientation.

use std::fmt::Write as _;

use glam::{DAffine2, DVec2};

use crate::types::BBox;

/// One path operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathOp {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Cubic Bézier: two control points then the end point
    CurveTo(DVec2, DVec2, DVec2),
    Close,
}

impl PathOp {
    fn map(self, f: impl Fn(DVec2) -> DVec2) -> PathOp {
        match self {
            PathOp::MoveTo(p) => PathOp::MoveTo(f(p)),
            PathOp::LineTo(p) => PathOp::LineTo(f(p)),
            PathOp::CurveTo(c1, c2, p) => PathOp::CurveTo(f(c1), f(c2), f(p)),
            PathOp::Close => PathOp::Close,
        }
    }
}

/// A flattened subpath.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<DVec2>,
    pub closed: bool,
}

impl Polyline {
    /// Signed area (shoelace); positive when counter-clockwise in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }
}

/// Signed area of a closed ring given without its repeated first point.
pub fn signed_area(points: &[DVec2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.perp_dot(b);
    }
    sum * 0.5
}

/// A path in local or placed coordinates.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path {
    ops: Vec<PathOp>,
}

impl Path {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn from_ops(ops: Vec<PathOp>) -> Self {
        Self { ops }
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[DVec2]) -> Self {
        let mut path = Path::new();
        path.push_polygon(points);
        path
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn move_to(&mut self, p: DVec2) -> &mut Self {
        self.ops.push(PathOp::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: DVec2) -> &mut Self {
        self.ops.push(PathOp::LineTo(p));
        self
    }

    pub fn curve_to(&mut self, c1: DVec2, c2: DVec2, p: DVec2) -> &mut Self {
        self.ops.push(PathOp::CurveTo(c1, c2, p));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.ops.push(PathOp::Close);
        self
    }

    /// Append a closed polygon as a new subpath.
    pub fn push_polygon(&mut self, points: &[DVec2]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        self.close();
    }

    /// Append every operation of `other`.
    pub fn extend(&mut self, other: &Path) {
        self.ops.extend_from_slice(&other.ops);
    }

    /// Current pen position, if any.
    pub fn current_point(&self) -> Option<DVec2> {
        let mut start = None;
        let mut current = None;
        for op in &self.ops {
            match *op {
                PathOp::MoveTo(p) => {
                    start = Some(p);
                    current = Some(p);
                }
                PathOp::LineTo(p) | PathOp::CurveTo(_, _, p) => current = Some(p),
                PathOp::Close => current = start,
            }
        }
        current
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    pub fn transformed(&self, transform: &DAffine2) -> Path {
        self.map_points(|p| transform.transform_point2(p))
    }

    pub fn translated(&self, by: DVec2) -> Path {
        self.map_points(|p| p + by)
    }

    /// Rotate about the origin by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Path {
        let rot = DVec2::from_angle(angle);
        self.map_points(|p| rot.rotate(p))
    }

    /// Mirror about the local X axis (y → -y).
    pub fn reflected_x_axis(&self) -> Path {
        self.map_points(|p| DVec2::new(p.x, -p.y))
    }

    /// Mirror about the local Y axis (x → -x).
    pub fn reflected_y_axis(&self) -> Path {
        self.map_points(|p| DVec2::new(-p.x, p.y))
    }

    fn map_points(&self, f: impl Fn(DVec2) -> DVec2 + Copy) -> Path {
        Path {
            ops: self.ops.iter().map(|op| op.map(f)).collect(),
        }
    }

    // ------------------------------------------------------------------
    // Measurement
    // ------------------------------------------------------------------

    /// Tight bounding box: curve extrema are solved exactly rather than
    /// taken from the control hull.
    pub fn bounding_box(&self) -> BBox {
        let mut bb = BBox::empty();
        let mut current = DVec2::ZERO;
        let mut start = DVec2::ZERO;
        for op in &self.ops {
            match *op {
                PathOp::MoveTo(p) => {
                    bb.expand_point(p);
                    current = p;
                    start = p;
                }
                PathOp::LineTo(p) => {
                    bb.expand_point(p);
                    current = p;
                }
                PathOp::CurveTo(c1, c2, p) => {
                    bb.expand_point(p);
                    for t in cubic_extrema(current, c1, c2, p) {
                        bb.expand_point(cubic_point(current, c1, c2, p, t));
                    }
                    current = p;
                }
                PathOp::Close => current = start,
            }
        }
        bb
    }

    /// Flatten into polylines with the given tolerance (bp).
    ///
    /// Each cubic is split into a fixed number of equal-parameter steps
    /// computed from its second differences, so the output depends only on
    /// the input coordinates.
    pub fn flatten(&self, tolerance: f64) -> Vec<Polyline> {
        let mut out = Vec::new();
        let mut points: Vec<DVec2> = Vec::new();
        let mut current = DVec2::ZERO;

        let finish = |points: &mut Vec<DVec2>, closed: bool, out: &mut Vec<Polyline>| {
            if closed && points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
            if points.len() > 1 {
                out.push(Polyline { points: std::mem::take(points), closed });
            } else {
                points.clear();
            }
        };

        for op in &self.ops {
            match *op {
                PathOp::MoveTo(p) => {
                    finish(&mut points, false, &mut out);
                    points.push(p);
                    current = p;
                }
                PathOp::LineTo(p) => {
                    if points.is_empty() {
                        points.push(current);
                    }
                    points.push(p);
                    current = p;
                }
                PathOp::CurveTo(c1, c2, p) => {
                    if points.is_empty() {
                        points.push(current);
                    }
                    let steps = cubic_steps(current, c1, c2, p, tolerance);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        points.push(cubic_point(current, c1, c2, p, t));
                    }
                    current = p;
                }
                PathOp::Close => {
                    if let Some(first) = points.first().copied() {
                        current = first;
                    }
                    finish(&mut points, true, &mut out);
                }
            }
        }
        finish(&mut points, false, &mut out);
        out
    }

    /// SVG path-data text (`M x y L x y C … Z`), numbers with six
    /// significant figures.
    pub fn to_svg_path_data(&self) -> String {
        let mut s = String::new();
        for op in &self.ops {
            if !s.is_empty() {
                s.push(' ');
            }
            match *op {
                PathOp::MoveTo(p) => {
                    let _ = write!(s, "M{} {}", fmt_num(p.x), fmt_num(p.y));
                }
                PathOp::LineTo(p) => {
                    let _ = write!(s, "L{} {}", fmt_num(p.x), fmt_num(p.y));
                }
                PathOp::CurveTo(c1, c2, p) => {
                    let _ = write!(
                        s,
                        "C{} {} {} {} {} {}",
                        fmt_num(c1.x),
                        fmt_num(c1.y),
                        fmt_num(c2.x),
                        fmt_num(c2.y),
                        fmt_num(p.x),
                        fmt_num(p.y)
                    );
                }
                PathOp::Close => s.push('Z'),
            }
        }
        s
    }

    /// Largest coordinate difference between two paths with the same
    /// operation structure, `None` if the structures differ.
    pub fn max_deviation(&self, other: &Path) -> Option<f64> {
        if self.ops.len() != other.ops.len() {
            return None;
        }
        let mut worst: f64 = 0.0;
        for (a, b) in self.ops.iter().zip(&other.ops) {
            let d = match (*a, *b) {
                (PathOp::MoveTo(p), PathOp::MoveTo(q)) | (PathOp::LineTo(p), PathOp::LineTo(q)) => {
                    p.distance(q)
                }
                (PathOp::CurveTo(a1, a2, p), PathOp::CurveTo(b1, b2, q)) => {
                    a1.distance(b1).max(a2.distance(b2)).max(p.distance(q))
                }
                (PathOp::Close, PathOp::Close) => 0.0,
                _ => return None,
            };
            worst = worst.max(d);
        }
        Some(worst)
    }
}

pub(crate) fn cubic_point(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let mt = 1.0 - t;
    p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
}

fn cubic_steps(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, tolerance: f64) -> usize {
    let dd = (p0 - p1 * 2.0 + p2).length().max((p1 - p2 * 2.0 + p3).length());
    let n = (0.75 * dd / tolerance.max(1e-9)).sqrt().ceil();
    (n as usize).clamp(1, 256)
}

/// Parameter values in (0, 1) where either coordinate of the cubic has a
/// local extremum.
fn cubic_extrema(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2) -> Vec<f64> {
    let mut ts = Vec::with_capacity(4);
    for axis in 0..2 {
        let (q0, q1, q2, q3) = (p0[axis], p1[axis], p2[axis], p3[axis]);
        let a = -q0 + 3.0 * q1 - 3.0 * q2 + q3;
        let b = 2.0 * (q0 - 2.0 * q1 + q2);
        let c = q1 - q0;
        if a.abs() < 1e-12 {
            if b.abs() > 1e-12 {
                ts.push(-c / b);
            }
            continue;
        }
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            continue;
        }
        let sq = disc.sqrt();
        ts.push((-b + sq) / (2.0 * a));
        ts.push((-b - sq) / (2.0 * a));
    }
    ts.retain(|t| *t > 0.0 && *t < 1.0);
    ts
}

/// Format a number with six significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    const SIG_FIGS: i32 = 6;
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(SIG_FIGS - 1 - magnitude);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let decimals = (SIG_FIGS - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn unit_square() -> Path {
        Path::polygon(&[dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(1.0, 1.0), dvec2(0.0, 1.0)])
    }

    #[test]
    fn polygon_emits_move_lines_close() {
        let p = unit_square();
        assert_eq!(p.len(), 5);
        assert_eq!(p.ops()[0], PathOp::MoveTo(DVec2::ZERO));
        assert_eq!(p.ops()[4], PathOp::Close);
    }

    #[test]
    fn reflection_is_an_involution() {
        let mut p = Path::new();
        p.move_to(dvec2(1.0, 2.0))
            .curve_to(dvec2(3.0, -4.0), dvec2(5.0, 6.0), dvec2(-7.0, 8.0))
            .close();
        assert_eq!(p.reflected_x_axis().reflected_x_axis(), p);
        assert_eq!(p.reflected_y_axis().reflected_y_axis(), p);
    }

    #[test]
    fn rotation_quarter_turn() {
        let mut p = Path::new();
        p.move_to(dvec2(1.0, 0.0));
        let r = p.rotated(std::f64::consts::FRAC_PI_2);
        match r.ops()[0] {
            PathOp::MoveTo(q) => assert!(q.distance(dvec2(0.0, 1.0)) < 1e-12),
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn bounding_box_of_polygon() {
        let bb = unit_square().translated(dvec2(2.0, -1.0)).bounding_box();
        assert_eq!(bb.min, dvec2(2.0, -1.0));
        assert_eq!(bb.max, dvec2(3.0, 0.0));
    }

    #[test]
    fn bounding_box_uses_curve_extrema_not_hull() {
        // Symmetric bump peaking at y = 0.75 while the controls sit at y = 1.
        let mut p = Path::new();
        p.move_to(dvec2(0.0, 0.0))
            .curve_to(dvec2(0.0, 1.0), dvec2(1.0, 1.0), dvec2(1.0, 0.0));
        let bb = p.bounding_box();
        assert!((bb.max.y - 0.75).abs() < 1e-12);
        assert_eq!(bb.min.y, 0.0);
    }

    #[test]
    fn flatten_splits_subpaths_and_drops_closing_duplicate() {
        let mut p = unit_square();
        p.move_to(dvec2(5.0, 5.0)).line_to(dvec2(6.0, 5.0));
        let lines = p.flatten(0.01);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].closed);
        assert_eq!(lines[0].points.len(), 4);
        assert!(!lines[1].closed);
        assert!((lines[0].signed_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn flatten_is_deterministic_and_stays_close_to_the_curve() {
        let mut p = Path::new();
        p.move_to(dvec2(0.0, 0.0))
            .curve_to(dvec2(0.0, 10.0), dvec2(10.0, 10.0), dvec2(10.0, 0.0));
        let a = p.flatten(0.01);
        let b = p.flatten(0.01);
        assert_eq!(a, b);
        for pt in &a[0].points {
            assert!(pt.y <= 7.5 + 1e-9);
        }
    }

    #[test]
    fn fmt_num_trims() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(-0.5), "-0.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_num(1e-12), "0.000000000001");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn svg_path_data_snapshot() {
        let mut p = Path::new();
        p.move_to(dvec2(0.0, 0.0))
            .line_to(dvec2(-5.0, 0.5))
            .curve_to(dvec2(-5.0, 0.0), dvec2(-5.0, 0.0), dvec2(-5.0, -0.5))
            .close();
        insta::assert_snapshot!(p.to_svg_path_data(), @"M0 0 L-5 0.5 C-5 0 -5 0 -5 -0.5 Z");
    }

    #[test]
    fn max_deviation_detects_structure_change() {
        let a = unit_square();
        let b = a.translated(dvec2(0.5, 0.0));
        assert_eq!(a.max_deviation(&b), Some(0.5));
        assert_eq!(a.max_deviation(&Path::new()), None);
    }
}
