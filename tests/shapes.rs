use endcap::MarkerKind;
use endcap::path::Path;
use endcap::shapes::ShapeParams;

const TOL: f64 = 1e-6;

fn kinds() -> impl Iterator<Item = MarkerKind> {
    MarkerKind::all().filter(|k| !k.is_none())
}

fn params() -> ShapeParams {
    ShapeParams::new(1.0, 5.0)
}

#[test]
fn every_kind_draws_something() {
    assert!(MarkerKind::None.generate(&params()).is_empty());
    for kind in kinds() {
        let path = kind.generate(&params());
        assert!(!path.is_empty(), "{kind} is empty");
        let bb = path.bounding_box();
        assert!(bb.width() > 0.0 && bb.height() > 0.0, "{kind} is degenerate");
    }
}

#[test]
fn generators_are_deterministic() {
    for kind in kinds() {
        assert_eq!(kind.generate(&params()), kind.generate(&params()), "{kind}");
    }
}

#[test]
fn reflection_is_an_involution() {
    for kind in kinds() {
        let path = kind.generate(&params());
        assert_eq!(path.reflected_x_axis().reflected_x_axis(), path, "{kind}");
        assert_eq!(path.reflected_y_axis().reflected_y_axis(), path, "{kind}");
    }
}

#[test]
fn fixed_size_kinds_ignore_size() {
    for kind in kinds().filter(|k| !k.capabilities().resizable) {
        let small = kind.generate(&ShapeParams::new(1.0, 2.0));
        let large = kind.generate(&ShapeParams::new(1.0, 20.0));
        assert_eq!(small, large, "{kind}");
    }
}

#[test]
fn resizable_kinds_grow_with_size() {
    for kind in kinds().filter(|k| k.capabilities().resizable) {
        let small = kind.generate(&ShapeParams::new(1.0, 5.0)).bounding_box();
        let large = kind.generate(&ShapeParams::new(1.0, 10.0)).bounding_box();
        assert!(large.width() > small.width() || large.height() > small.height(), "{kind}");
    }
}

#[test]
fn pen_independent_kinds_ignore_pen_width() {
    for kind in kinds().filter(|k| !k.capabilities().uses_line_width) {
        let thin = kind.generate(&ShapeParams::new(0.5, 5.0));
        let thick = kind.generate(&ShapeParams::new(3.0, 5.0));
        assert_eq!(thin, thick, "{kind}");
    }
}

#[test]
fn only_width_kinds_read_width() {
    for kind in kinds() {
        let plain = kind.generate(&params());
        let wide = kind.generate(&params().with_width(12.0));
        if kind.capabilities().supports_width {
            assert!(wide.bounding_box().height() > plain.bounding_box().height(), "{kind}");
        } else {
            assert_eq!(plain, wide, "{kind}");
        }
    }
}

#[test]
fn symmetric_kinds_have_symmetric_extent() {
    for kind in kinds().filter(|k| k.capabilities().x_axis_symmetric) {
        let bb = kind.generate(&params()).bounding_box();
        assert!((bb.min.y + bb.max.y).abs() < TOL, "{kind}: {} .. {}", bb.min.y, bb.max.y);
    }
}

#[test]
fn mirrored_pairs_are_reflections() {
    let pairs = [
        (MarkerKind::HookUp, MarkerKind::HookDown),
        (MarkerKind::HalfPointedUp, MarkerKind::HalfPointedDown),
        (MarkerKind::HalfBarUp, MarkerKind::HalfBarDown),
        (MarkerKind::TriangleUpFilled, MarkerKind::TriangleDownFilled),
    ];
    for (up, down) in pairs {
        let mirrored = up.generate(&params()).reflected_x_axis().bounding_box();
        let other = down.generate(&params()).bounding_box();
        assert!(mirrored.min.distance(other.min) < TOL, "{up} / {down}");
        assert!(mirrored.max.distance(other.max) < TOL, "{up} / {down}");
    }
}

#[test]
fn svg_path_data_is_stable() {
    let path: Path = MarkerKind::Triangle.generate(&params());
    insta::assert_snapshot!(path.to_svg_path_data(), @"M0 0 L-5 2.5 L-5 -2.5 Z");
}
