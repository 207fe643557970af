//! Polygon union of flattened paths.
//!
//! Paths are flattened with [`FLATTEN_TOLERANCE`]; counter-clockwise rings are
//! filled regions and clockwise rings are holes of the filled ring that
//! contains them (the orientation the stroker and the closed-form
//! generators emit). The union itself is `geo`'s `BooleanOps`.
//!
//! The result is normalised so it only depends on the covered area: exterior
//! rings counter-clockwise, holes clockwise, every ring rotated to start at
//! its lowest-then-leftmost vertex, polygons sorted by that start vertex.

use std::cmp::Ordering;

use geo::{BooleanOps, Coord, LineString, MultiPolygon, Polygon};
use glam::DVec2;

use super::FLATTEN_TOLERANCE;
use crate::path::{Path, signed_area};

/// Union every filled region of every path in `paths`.
pub fn union_all(paths: &[Path]) -> Path {
    let mut acc: Option<MultiPolygon<f64>> = None;
    // One polygon at a time: rings of a single path may overlap each other.
    for polygon in paths.iter().flat_map(to_polygons) {
        let shape = MultiPolygon::new(vec![polygon]);
        acc = Some(match acc {
            None => shape,
            Some(acc) => acc.union(&shape),
        });
    }
    match acc {
        Some(mp) => from_multi_polygon(&mp),
        None => Path::new(),
    }
}

fn ring_coords(points: &[DVec2]) -> LineString<f64> {
    let mut coords: Vec<Coord<f64>> = points.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
    if let Some(first) = coords.first().copied() {
        coords.push(first);
    }
    LineString::new(coords)
}

/// Even-crossing test of `p` against a ring.
fn ring_contains(ring: &[DVec2], p: DVec2) -> bool {
    let mut inside = false;
    let n = ring.len();
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn to_polygons(path: &Path) -> Vec<Polygon<f64>> {
    let mut fills: Vec<Vec<DVec2>> = Vec::new();
    let mut holes: Vec<Vec<DVec2>> = Vec::new();
    for line in path.flatten(FLATTEN_TOLERANCE) {
        if line.points.len() < 3 {
            continue;
        }
        let area = line.signed_area();
        if area > 0.0 {
            fills.push(line.points);
        } else if area < 0.0 {
            holes.push(line.points);
        }
    }

    let mut interiors: Vec<Vec<LineString<f64>>> = vec![Vec::new(); fills.len()];
    for hole in &holes {
        // Smallest fill ring containing the hole's first vertex.
        let owner = fills
            .iter()
            .enumerate()
            .filter(|(_, f)| ring_contains(f, hole[0]))
            .min_by(|(_, a), (_, b)| signed_area(a).total_cmp(&signed_area(b)))
            .map(|(i, _)| i);
        if let Some(i) = owner {
            interiors[i].push(ring_coords(hole));
        }
    }

    fills
        .iter()
        .zip(interiors)
        .map(|(ring, holes)| Polygon::new(ring_coords(ring), holes))
        .collect()
}

/// Ring points without the closing duplicate, oriented and rotated.
fn normalise_ring(ring: &LineString<f64>, counter_clockwise: bool) -> Vec<DVec2> {
    let mut points: Vec<DVec2> = ring.0.iter().map(|c| DVec2::new(c.x, c.y)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let area = signed_area(&points);
    if (area > 0.0) != counter_clockwise {
        points.reverse();
    }
    if let Some(start) = lowest_vertex(&points) {
        points.rotate_left(start);
    }
    points
}

fn lowest_vertex(points: &[DVec2]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
        .map(|(i, _)| i)
}

fn from_multi_polygon(mp: &MultiPolygon<f64>) -> Path {
    let mut polygons: Vec<(Vec<DVec2>, Vec<Vec<DVec2>>)> = mp
        .0
        .iter()
        .map(|poly| {
            let exterior = normalise_ring(poly.exterior(), true);
            let mut holes: Vec<Vec<DVec2>> =
                poly.interiors().iter().map(|r| normalise_ring(r, false)).collect();
            holes.sort_by(|a, b| ring_order(a, b));
            (exterior, holes)
        })
        .filter(|(exterior, _)| exterior.len() >= 3)
        .collect();
    polygons.sort_by(|a, b| ring_order(&a.0, &b.0));

    let mut path = Path::new();
    for (exterior, holes) in &polygons {
        path.push_polygon(exterior);
        for hole in holes {
            path.push_polygon(hole);
        }
    }
    path
}

/// Rings compare by their start vertex, lowest y first.
fn ring_order(a: &[DVec2], b: &[DVec2]) -> Ordering {
    let (pa, pb) = (a.first().copied(), b.first().copied());
    match (pa, pb) {
        (Some(pa), Some(pb)) => pa.y.total_cmp(&pb.y).then(pa.x.total_cmp(&pb.x)),
        _ => a.len().cmp(&b.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::circle;
    use glam::dvec2;

    fn square(min: DVec2, side: f64) -> Path {
        Path::polygon(&[
            min,
            min + dvec2(side, 0.0),
            min + dvec2(side, side),
            min + dvec2(0.0, side),
        ])
    }

    fn total_area(path: &Path) -> f64 {
        path.flatten(FLATTEN_TOLERANCE).iter().map(|l| l.signed_area()).sum()
    }

    #[test]
    fn overlapping_squares_merge() {
        let merged = union_all(&[square(dvec2(0.0, 0.0), 2.0), square(dvec2(1.0, 1.0), 2.0)]);
        assert_eq!(merged.flatten(FLATTEN_TOLERANCE).len(), 1);
        assert!((total_area(&merged) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_squares_stay_apart_and_sorted() {
        let merged = union_all(&[square(dvec2(5.0, 0.0), 1.0), square(dvec2(0.0, 0.0), 1.0)]);
        let rings = merged.flatten(FLATTEN_TOLERANCE);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].points[0], dvec2(0.0, 0.0));
        assert_eq!(rings[1].points[0], dvec2(5.0, 0.0));
    }

    #[test]
    fn holes_survive_the_union() {
        let mut ring = square(dvec2(0.0, 0.0), 4.0);
        ring.push_polygon(&[dvec2(1.0, 1.0), dvec2(1.0, 3.0), dvec2(3.0, 3.0), dvec2(3.0, 1.0)]);
        let merged = union_all(&[ring, square(dvec2(10.0, 10.0), 1.0)]);
        assert!((total_area(&merged) - (16.0 - 4.0 + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn union_is_deterministic() {
        let parts: Vec<Path> = (0..3)
            .map(|i| circle(dvec2(i as f64, 0.0), 1.0))
            .collect();
        assert_eq!(union_all(&parts), union_all(&parts));
    }

    #[test]
    fn empty_input_gives_empty_path() {
        assert!(union_all(&[]).is_empty());
        assert!(union_all(&[Path::new()]).is_empty());
    }
}
