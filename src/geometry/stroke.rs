//! Explicit offset-curve stroker.
//!
//! Widens a centre-line [`Path`] into a filled outline. Curves are flattened
//! first (see [`FLATTEN_TOLERANCE`]), then every polyline is offset by half
//! the pen width on both sides with explicit joins and caps:
//!
//! - open polylines become one closed ring: left side forward, end cap,
//!   right side backward, start cap
//! - closed polylines become two rings, the outer one counter-clockwise and
//!   the inner one clockwise, so the band fills under the non-zero rule
//!
//! Inner corners use the intersection of the two offset lines when it lies
//! within both segments and fall back to routing through the vertex
//! otherwise, which keeps the winding number positive under the band.

use std::f64::consts::PI;

use glam::DVec2;

use super::{FLATTEN_TOLERANCE, MITER_LIMIT};
use crate::path::{Path, signed_area};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Pen used to widen a centre line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Full pen width in bp
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl StrokeStyle {
    pub fn new(width: f64) -> Self {
        Self { width, cap: LineCap::Butt, join: LineJoin::Miter }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }
}

/// Stroke `path` with `style`, returning the filled outline.
pub fn stroke(path: &Path, style: &StrokeStyle) -> Path {
    let half = style.width.abs() / 2.0;
    let mut out = Path::new();
    if half == 0.0 {
        return out;
    }
    for line in path.flatten(FLATTEN_TOLERANCE) {
        let points = dedup(&line.points, line.closed);
        if line.closed && points.len() >= 3 {
            stroke_closed(&points, half, style.join, &mut out);
        } else if points.len() >= 2 {
            stroke_open(&points, half, style, &mut out);
        } else if let Some(p) = points.first() {
            stroke_dot(*p, half, style.cap, &mut out);
        }
    }
    out
}

fn dedup(points: &[DVec2], closed: bool) -> Vec<DVec2> {
    let mut out: Vec<DVec2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_none_or(|q| q.distance(*p) > 1e-9) {
            out.push(*p);
        }
    }
    if closed {
        while out.len() > 1 && out[0].distance(out[out.len() - 1]) <= 1e-9 {
            out.pop();
        }
    }
    out
}

fn left_normal(d: DVec2) -> DVec2 {
    DVec2::new(-d.y, d.x)
}

/// Points of an arc around `center` of radius `r` from direction `from`
/// turning by `sweep` radians, excluding the first point.
fn arc_points(center: DVec2, r: f64, from: DVec2, sweep: f64, out: &mut Vec<DVec2>) {
    let max_step = 2.0 * (1.0 - (FLATTEN_TOLERANCE / r).min(1.0)).acos();
    let steps = (sweep.abs() / max_step.max(1e-3)).ceil().max(1.0) as usize;
    let start = from.y.atan2(from.x);
    for i in 1..=steps {
        let a = start + sweep * i as f64 / steps as f64;
        out.push(center + DVec2::new(a.cos(), a.sin()) * r);
    }
}

/// Offset line on the left of `points` with joins at interior vertices.
/// For closed rings every vertex is a join and the result is a ring.
fn offset_left(points: &[DVec2], half: f64, join: LineJoin, closed: bool) -> Vec<DVec2> {
    let n = points.len();
    let seg_count = if closed { n } else { n - 1 };
    let dir = |i: usize| (points[(i + 1) % n] - points[i]).normalize();
    let seg_len = |i: usize| points[(i + 1) % n].distance(points[i]);

    let mut out = Vec::with_capacity(n * 2);
    if !closed {
        out.push(points[0] + left_normal(dir(0)) * half);
    }

    let joins: Box<dyn Iterator<Item = usize>> = if closed {
        Box::new(0..n)
    } else {
        Box::new(1..n - 1)
    };
    for i in joins {
        let prev = (i + seg_count - 1) % seg_count;
        let (d0, d1) = (dir(prev), dir(i));
        let (n0, n1) = (left_normal(d0), left_normal(d1));
        let p = points[i];
        let a = p + n0 * half;
        let b = p + n1 * half;
        let turn = d0.perp_dot(d1);

        if turn.abs() < 1e-12 && d0.dot(d1) > 0.0 {
            // Collinear continuation.
            out.push(a);
            continue;
        }

        if turn > 0.0 {
            // Left turn: the left side is the inner side of the corner.
            let cos_half = (n0 + n1).normalize_or_zero().dot(n0);
            if cos_half > 1e-9 {
                let miter = p + (n0 + n1).normalize() * (half / cos_half);
                let back = (miter - p).dot(d0).abs();
                if back <= seg_len(prev) && back <= seg_len(i) {
                    out.push(miter);
                    continue;
                }
            }
            out.push(a);
            out.push(p);
            out.push(b);
            continue;
        }

        // Outer side of the corner.
        out.push(a);
        match join {
            LineJoin::Bevel => out.push(b),
            LineJoin::Round => {
                let sweep = n0.angle_to(n1);
                arc_points(p, half, n0, sweep, &mut out);
            }
            LineJoin::Miter => {
                let bisector = (n0 + n1).normalize_or_zero();
                let cos_half = bisector.dot(n0);
                if cos_half > 1e-9 && 1.0 / cos_half <= MITER_LIMIT {
                    out.push(p + bisector * (half / cos_half));
                }
                out.push(b);
            }
        }
    }

    if !closed {
        out.push(points[n - 1] + left_normal(dir(n - 2)) * half);
    }
    out
}

fn stroke_open(points: &[DVec2], half: f64, style: &StrokeStyle, out: &mut Path) {
    let reversed: Vec<DVec2> = points.iter().rev().copied().collect();
    let left = offset_left(points, half, style.join, false);
    let right = offset_left(&reversed, half, style.join, false);

    let n = points.len();
    let end_dir = (points[n - 1] - points[n - 2]).normalize();
    let start_dir = (points[0] - points[1]).normalize();

    let mut ring = left;
    push_cap(points[n - 1], end_dir, half, style.cap, &mut ring);
    ring.extend(right);
    push_cap(points[0], start_dir, half, style.cap, &mut ring);

    if signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    out.push_polygon(&ring);
}

/// Cap at `p` where the line leaves in direction `d`, going from the left
/// offset point to the right one. The final right point is not pushed.
fn push_cap(p: DVec2, d: DVec2, half: f64, cap: LineCap, ring: &mut Vec<DVec2>) {
    let n = left_normal(d);
    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            ring.push(p + n * half + d * half);
            ring.push(p - n * half + d * half);
        }
        LineCap::Round => {
            let mut arc = Vec::new();
            arc_points(p, half, n, -PI, &mut arc);
            arc.pop();
            ring.extend(arc);
        }
    }
}

fn stroke_closed(points: &[DVec2], half: f64, join: LineJoin, out: &mut Path) {
    let reversed: Vec<DVec2> = points.iter().rev().copied().collect();
    let mut a = offset_left(points, half, join, true);
    let mut b = offset_left(&reversed, half, join, true);
    if signed_area(&a).abs() < signed_area(&b).abs() {
        std::mem::swap(&mut a, &mut b);
    }
    // `a` is the outer ring now.
    if signed_area(&a) < 0.0 {
        a.reverse();
    }
    if signed_area(&b) > 0.0 {
        b.reverse();
    }
    out.push_polygon(&a);
    out.push_polygon(&b);
}

fn stroke_dot(p: DVec2, half: f64, cap: LineCap, out: &mut Path) {
    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let h = DVec2::splat(half);
            out.push_polygon(&[
                p - h,
                p + DVec2::new(half, -half),
                p + h,
                p + DVec2::new(-half, half),
            ]);
        }
        LineCap::Round => out.extend(&super::circle(p, half)),
    }
}
