use super::*;

fn seg(points: [(f64, f64); 4]) -> CurveSegment {
    CurveSegment::new(
        SamplePoint::new(points[0].0, points[0].1, 0),
        Point::new(points[1].0, points[1].1),
        Point::new(points[2].0, points[2].1),
        SamplePoint::new(points[3].0, points[3].1, 10),
    )
}

#[test]
fn straight_curve_length_is_exact() {
    let s = seg([(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
    assert!((s.arc_length() - 30.0).abs() < 1e-9);
}

#[test]
fn polyline_length_underestimates_a_bend() {
    let s = seg([(0.0, 0.0), (0.0, 40.0), (40.0, 40.0), (40.0, 0.0)]);
    let chord = 40.0;
    let hull = 40.0 * 3.0;
    let len = s.arc_length();
    assert!(len > chord && len < hull, "len {len}");
}

#[test]
fn degenerate_curve_has_zero_length() {
    let s = seg([(5.0, 5.0); 4]);
    assert_eq!(s.arc_length(), 0.0);
}

#[test]
fn eval_hits_endpoints() {
    let s = seg([(1.0, 2.0), (3.0, 9.0), (7.0, -4.0), (11.0, 6.0)]);
    assert!(s.eval(0.0).distance(Point::new(1.0, 2.0)) < 1e-12);
    assert!(s.eval(1.0).distance(Point::new(11.0, 6.0)) < 1e-12);
}

#[test]
fn velocity_uses_segment_endpoints() {
    let s = seg([(0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (30.0, 40.0)]);
    assert!((s.velocity() - 5.0).abs() < 1e-12);
}
