//! Circular and elliptical arcs approximated by cubic Béziers.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::{DVec2, dvec2};

use crate::path::Path;

/// Append an elliptical arc to `path`, continuing from its current point.
///
/// The arc runs from `start` radians through `sweep` radians (positive turns
/// +x toward +y) on the ellipse centred at `center` with radii `radii`.
/// If the path is empty a `MoveTo` to the arc start is emitted first.
pub fn arc(path: &mut Path, center: DVec2, radii: DVec2, start: f64, sweep: f64) {
    let on_ellipse = |a: f64| center + dvec2(radii.x * a.cos(), radii.y * a.sin());
    let tangent = |a: f64| dvec2(-radii.x * a.sin(), radii.y * a.cos());

    let first = on_ellipse(start);
    match path.current_point() {
        None => {
            path.move_to(first);
        }
        Some(p) if p.distance(first) > 1e-9 => {
            path.line_to(first);
        }
        Some(_) => {}
    }

    if sweep == 0.0 {
        return;
    }
    let pieces = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;
    // Control distance for an arc of `step` radians.
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    for i in 0..pieces {
        let a0 = start + step * i as f64;
        let a1 = a0 + step;
        let p0 = on_ellipse(a0);
        let p3 = on_ellipse(a1);
        path.curve_to(p0 + tangent(a0) * k, p3 - tangent(a1) * k, p3);
    }
}

/// Closed ellipse, counter-clockwise, starting at angle 0.
pub fn ellipse(center: DVec2, radii: DVec2) -> Path {
    let mut path = Path::new();
    arc(&mut path, center, radii, 0.0, TAU);
    path.close();
    path
}

/// Closed circle, counter-clockwise, starting at angle 0.
pub fn circle(center: DVec2, radius: f64) -> Path {
    ellipse(center, DVec2::splat(radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathOp;

    #[test]
    fn circle_has_four_quarter_curves() {
        let c = circle(DVec2::ZERO, 2.0);
        let curves = c.ops().iter().filter(|op| matches!(op, PathOp::CurveTo(..))).count();
        assert_eq!(curves, 4);
        let bb = c.bounding_box();
        assert!((bb.width() - 4.0).abs() < 1e-9);
        assert!((bb.height() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn circle_flattens_close_to_radius() {
        let c = circle(dvec2(1.0, 1.0), 3.0);
        for line in c.flatten(0.001) {
            for p in line.points {
                let r = p.distance(dvec2(1.0, 1.0));
                assert!((r - 3.0).abs() < 0.01, "radius {r}");
            }
        }
    }

    #[test]
    fn arc_continues_from_current_point() {
        let mut p = Path::new();
        p.move_to(dvec2(1.0, 0.0));
        arc(&mut p, DVec2::ZERO, DVec2::ONE, 0.0, std::f64::consts::PI);
        // No connecting line when the arc starts at the current point.
        assert!(matches!(p.ops()[1], PathOp::CurveTo(..)));
        let end = p.current_point().unwrap();
        assert!(end.distance(dvec2(-1.0, 0.0)) < 1e-12);
    }

    #[test]
    fn negative_sweep_runs_clockwise() {
        let mut p = Path::new();
        arc(&mut p, DVec2::ZERO, DVec2::ONE, 0.0, -FRAC_PI_2);
        let end = p.current_point().unwrap();
        assert!(end.distance(dvec2(0.0, -1.0)) < 1e-12);
    }
}
