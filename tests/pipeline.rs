//! End-to-end checks of composed vertex pipelines.

use agg_vertex_gen::arc::Arc;
use agg_vertex_gen::basics::{
    is_close, is_end_poly, is_move_to, is_stop, is_vertex, PointD, RectD, VertexSource,
    PATH_CMD_CURVE4, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO,
};
use agg_vertex_gen::bezier_arc::BezierArcSvg;
use agg_vertex_gen::clip_liang_barsky::{
    clip_line_segment, CLIP_FIRST_MOVED, CLIP_FULLY_CLIPPED, CLIP_FULLY_VISIBLE,
    CLIP_SECOND_MOVED,
};
use agg_vertex_gen::conv_clip_polyline::ConvClipPolyline;
use agg_vertex_gen::conv_dash::ConvDash;
use agg_vertex_gen::conv_transform::ConvTransform;
use agg_vertex_gen::path_storage::PathStorage;
use agg_vertex_gen::rounded_rect::RoundedRect;
use agg_vertex_gen::trans_affine::TransAffine;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn collect_vertices<VS: VertexSource>(vs: &mut VS) -> Vec<(f64, f64, u32)> {
    vs.rewind(0);
    let mut out = Vec::new();
    loop {
        let (mut x, mut y) = (0.0, 0.0);
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            return out;
        }
        out.push((x, y, cmd));
    }
}

fn polyline(points: &[(f64, f64)]) -> PathStorage {
    let mut path = PathStorage::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path
}

fn travelled(v: &[(f64, f64, u32)]) -> f64 {
    v.windows(2)
        .filter(|w| is_vertex(w[1].2))
        .map(|w| ((w[1].0 - w[0].0).powi(2) + (w[1].1 - w[0].1).powi(2)).sqrt())
        .sum()
}

// ============================================================================
// Dash
// ============================================================================

#[test]
fn test_dash_four_two_on_ten_units() {
    init_logging();
    let mut dash = ConvDash::new(polyline(&[(0.0, 0.0), (10.0, 0.0)]));
    dash.add_dash(4.0, 2.0);
    assert_eq!(
        collect_vertices(&mut dash),
        vec![
            (0.0, 0.0, PATH_CMD_MOVE_TO),
            (4.0, 0.0, PATH_CMD_LINE_TO),
            (6.0, 0.0, PATH_CMD_MOVE_TO),
            (10.0, 0.0, PATH_CMD_LINE_TO),
        ]
    );
}

#[test]
fn test_dash_closed_path_covers_its_length() {
    init_logging();
    // Triangle with sides 30, 40, 50.
    let mut path = polyline(&[(0.0, 0.0), (40.0, 0.0), (40.0, 30.0)]);
    path.close_polygon();

    for phase in [0.0, 0.7, 3.0, 11.5, 100.25] {
        let mut dash = ConvDash::new(&mut path);
        dash.add_dash(5.0, 3.0);
        dash.add_dash(1.0, 2.5);
        dash.dash_start(phase);
        let v = collect_vertices(&mut dash);
        let len = travelled(&v);
        assert!((len - 120.0).abs() < 1e-9, "phase {phase}: {len}");
    }
}

#[test]
fn test_dash_phase_wraps_at_cycle_length() {
    let run = |phase: f64| {
        let mut dash = ConvDash::new(polyline(&[(0.0, 0.0), (30.0, 0.0), (30.0, 17.0)]));
        dash.add_dash(3.0, 1.0);
        dash.add_dash(2.0, 2.0);
        dash.dash_start(phase);
        collect_vertices(&mut dash)
    };
    let reference = run(1.5);
    for phase in [9.5, 17.5, 81.5] {
        let v = run(phase);
        assert_eq!(v.len(), reference.len(), "phase {phase}");
        for (a, b) in v.iter().zip(&reference) {
            assert_eq!(a.2, b.2);
            assert!((a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9);
        }
    }
}

#[test]
fn test_path_dash_transform_chain() {
    init_logging();
    let path = polyline(&[(0.0, 0.0), (10.0, 0.0)]);
    let mut dash = ConvDash::new(path);
    dash.add_dash(4.0, 2.0);

    let mut mtx = TransAffine::new_scaling_uniform(2.0);
    mtx.translate(100.0, 50.0);
    let mut chain = ConvTransform::new(dash, mtx);

    let v = collect_vertices(&mut chain);
    let expected = [
        (100.0, 50.0, PATH_CMD_MOVE_TO),
        (108.0, 50.0, PATH_CMD_LINE_TO),
        (112.0, 50.0, PATH_CMD_MOVE_TO),
        (120.0, 50.0, PATH_CMD_LINE_TO),
    ];
    assert_eq!(v.len(), expected.len());
    for (a, b) in v.iter().zip(&expected) {
        assert_eq!(a.2, b.2);
        assert!((a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9);
    }
}

// ============================================================================
// Arc
// ============================================================================

#[test]
fn test_arc_ends_on_end_angle_both_directions() {
    let (cx, cy, rx, ry) = (10.0, 20.0, 50.0, 30.0);
    for (a1, a2, ccw) in [(0.3, 2.0, true), (2.0, 0.3, false), (5.5, 0.5, true), (0.5, 5.5, false)] {
        let mut arc = Arc::new(cx, cy, rx, ry, a1, a2, ccw);
        let v = collect_vertices(&mut arc);
        let last = v[v.len() - 1];
        assert!((last.0 - (cx + a2.cos() * rx)).abs() < 1e-9);
        assert!((last.1 - (cy + a2.sin() * ry)).abs() < 1e-9);
        assert!(is_move_to(v[0].2));
    }
}

#[test]
fn test_arc_point_count_follows_scale() {
    let mut previous = 0;
    for scale in [0.25, 0.5, 1.0, 2.0, 4.0, 8.0] {
        let mut arc = Arc::new(0.0, 0.0, 100.0, 100.0, 0.0, 3.0, true);
        arc.set_approximation_scale(scale);
        let n = collect_vertices(&mut arc).len();
        assert!(n >= previous, "scale {scale}: {n} < {previous}");
        previous = n;
    }
}

// ============================================================================
// Rounded rectangle
// ============================================================================

#[test]
fn test_rounded_rect_radii_fit_after_normalize() {
    let rects = [(0.0, 0.0, 10.0, 10.0), (5.0, 5.0, 200.0, 20.0), (0.0, 0.0, 3.0, 90.0)];
    let radii = [
        [100.0; 8],
        [7.0, 2.0, 50.0, 1.0, 0.0, 0.0, 8.0, 40.0],
        [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        [0.0, 9.0, 0.0, 0.0, 0.0, 9.0, 0.0, 0.0],
    ];
    for &(x1, y1, x2, y2) in &rects {
        for r in &radii {
            let mut rr = RoundedRect::new(x1, y1, x2, y2, 0.0);
            rr.radius_all(r[0], r[1], r[2], r[3], r[4], r[5], r[6], r[7]);
            rr.normalize_radius();
            let c = rr.radii();
            let (w, h) = (x2 - x1, y2 - y1);
            let eps = 1e-9;
            assert!(c[0].0 + c[1].0 <= w + eps);
            assert!(c[3].0 + c[2].0 <= w + eps);
            assert!(c[0].1 + c[3].1 <= h + eps);
            assert!(c[1].1 + c[2].1 <= h + eps);
            assert!(c[0].0 + c[2].0 <= w + eps);
            assert!(c[1].0 + c[3].0 <= w + eps);
            assert!(c[0].1 + c[2].1 <= h + eps);
            assert!(c[1].1 + c[3].1 <= h + eps);
        }
    }
}

#[test]
fn test_rounded_rect_transform_chain() {
    let mut rr = RoundedRect::new(0.0, 0.0, 40.0, 20.0, 5.0);
    rr.normalize_radius();
    let mut chain = ConvTransform::new(rr, TransAffine::new_translation(-20.0, -10.0));
    let v = collect_vertices(&mut chain);

    let last = v[v.len() - 1];
    assert!(is_end_poly(last.2) && is_close(last.2));
    for p in v.iter().filter(|p| is_vertex(p.2)) {
        assert!(p.0 >= -20.0 - 1e-9 && p.0 <= 20.0 + 1e-9);
        assert!(p.1 >= -10.0 - 1e-9 && p.1 <= 10.0 + 1e-9);
    }
}

// ============================================================================
// Affine
// ============================================================================

#[test]
fn test_affine_times_inverse_is_identity() {
    let mut skewed = TransAffine::new_skewing(0.2, -0.1);
    skewed.translate(3.0, 4.0);
    let samples = [
        TransAffine::new_rotation(0.7) * TransAffine::new_scaling(3.0, 0.5),
        TransAffine::new_custom(2.0, 1.0, -1.0, 3.0, 100.0, -50.0),
        skewed,
    ];
    for t in samples {
        assert!(t.is_valid(1e-14));
        let mut m = t;
        m.multiply(&t.inverted());
        assert!(m.is_identity(1e-10), "{m:?}");
    }

    let mut t = TransAffine::new_rotation(1.0);
    t.reset();
    assert!(t.is_identity(0.0));
}

// ============================================================================
// Clipping
// ============================================================================

#[test]
fn test_clip_line_segment_results() {
    let clip = RectD::new(0.0, 0.0, 10.0, 10.0);

    let (mut a, mut b) = (PointD::new(1.0, 1.0), PointD::new(9.0, 8.0));
    assert_eq!(clip_line_segment(&mut a, &mut b, &clip), CLIP_FULLY_VISIBLE);

    let (mut a, mut b) = (PointD::new(-5.0, 1.0), PointD::new(-1.0, 8.0));
    assert!(clip_line_segment(&mut a, &mut b, &clip) >= CLIP_FULLY_CLIPPED);

    let (mut a, mut b) = (PointD::new(5.0, 5.0), PointD::new(15.0, 7.0));
    assert_eq!(clip_line_segment(&mut a, &mut b, &clip), CLIP_SECOND_MOVED);
    assert_eq!(b.x, 10.0);
    assert!((b.y - 6.0).abs() < 1e-12);

    let (mut a, mut b) = (PointD::new(4.0, -6.0), PointD::new(4.0, 6.0));
    assert_eq!(clip_line_segment(&mut a, &mut b, &clip), CLIP_FIRST_MOVED);
    assert_eq!(a.y, 0.0);
    assert_eq!(a.x, 4.0);
}

#[test]
fn test_clip_polyline_chain() {
    let path = polyline(&[(-10.0, 5.0), (5.0, 5.0), (5.0, 20.0), (8.0, 20.0), (8.0, 2.0)]);
    let mut clipped = ConvClipPolyline::new(path);
    clipped.clip_box(0.0, 0.0, 10.0, 10.0);
    let v = collect_vertices(&mut clipped);

    assert_eq!(
        v,
        vec![
            (0.0, 5.0, PATH_CMD_MOVE_TO),
            (5.0, 5.0, PATH_CMD_LINE_TO),
            (5.0, 10.0, PATH_CMD_LINE_TO),
            (8.0, 10.0, PATH_CMD_MOVE_TO),
            (8.0, 2.0, PATH_CMD_LINE_TO),
        ]
    );
}

// ============================================================================
// SVG arcs
// ============================================================================

#[test]
fn test_svg_arc_endpoints_are_exact() {
    init_logging();
    let cases = [
        (10.0, 10.0, 30.0, 20.0, 0.5, true, false, 40.0, 25.0),
        (10.0, 10.0, 30.0, 20.0, 0.5, false, true, 40.0, 25.0),
        (-3.0, 7.0, 1.0, 1.0, 0.0, false, false, 3.0, 7.0),
    ];
    for (x0, y0, rx, ry, angle, large, sweep, x2, y2) in cases {
        let mut arc = BezierArcSvg::new_with_params(x0, y0, rx, ry, angle, large, sweep, x2, y2);
        let v = collect_vertices(&mut arc);
        assert_eq!((v[0].0, v[0].1), (x0, y0));
        let last = v[v.len() - 1];
        assert_eq!((last.0, last.1), (x2, y2));
    }
}

#[test]
fn test_svg_arc_in_path() {
    let mut path = PathStorage::new();
    path.move_to(10.0, 10.0);
    path.arc_to(30.0, 20.0, 0.5, true, false, 40.0, 25.0);
    path.line_to(40.0, 60.0);

    let v = collect_vertices(&mut path);
    assert_eq!(v[0], (10.0, 10.0, PATH_CMD_MOVE_TO));
    assert_eq!(v.iter().filter(|p| is_move_to(p.2)).count(), 1);
    assert!(v.iter().any(|p| p.2 == PATH_CMD_CURVE4));

    let end = v.iter().position(|p| (p.0, p.1) == (40.0, 25.0));
    assert_eq!(end, Some(v.len() - 2));
    assert_eq!(v[v.len() - 1], (40.0, 60.0, PATH_CMD_LINE_TO));
}
