use super::*;

fn close(a: Point, b: Point) -> bool {
    a.distance(b) < 1e-9
}

#[test]
fn matches_closed_form_for_uneven_spacing() {
    let s1 = Point::new(0.0, 0.0);
    let s2 = Point::new(4.0, 0.0);
    let s3 = Point::new(4.0, 2.0);

    // m1 = (2,0), m2 = (4,1), l1 = 4, l2 = 2, k = 1/3
    // cm = m2 + (m1 - m2) / 3 = (10/3, 2/3); t = s2 - cm = (2/3, -2/3)
    let (c1, c2) = control_points(s1, s2, s3);
    assert!(close(c1, Point::new(2.0 + 2.0 / 3.0, -2.0 / 3.0)));
    assert!(close(c2, Point::new(4.0 + 2.0 / 3.0, 1.0 / 3.0)));
}

#[test]
fn s2_lies_on_control_segment_split_by_length_ratio() {
    let s1 = Point::new(-3.0, 1.0);
    let s2 = Point::new(2.0, 5.0);
    let s3 = Point::new(9.0, 4.0);
    let (c1, c2) = control_points(s1, s2, s3);

    let l1 = s1.distance(s2);
    let l2 = s2.distance(s3);
    let k = l2 / (l1 + l2);
    // The translated blend point c2 + k * (c1 - c2) is s2 itself.
    assert!(close(c2 + (c1 - c2) * k, s2));
    // Translation preserves the midpoint segment's direction and length.
    let dm = s1.midpoint(s2) - s2.midpoint(s3);
    assert!(((c1 - c2) - dm).hypot() < 1e-9);
}

#[test]
fn collinear_evenly_spaced_points_keep_midpoints() {
    let (c1, c2) = control_points(
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
    );
    assert!(close(c1, Point::new(0.5, 0.0)));
    assert!(close(c2, Point::new(1.5, 0.0)));
}

#[test]
fn duplicated_leading_point_pulls_control_onto_s2() {
    let s = Point::new(5.0, 5.0);
    let (c1, c2) = control_points(s, s, Point::new(9.0, 5.0));
    assert!(close(c1, s));
    assert!(close(c2, Point::new(7.0, 5.0)));
}

#[test]
fn coincident_points_return_s2() {
    let p = Point::new(3.0, 7.0);
    let (c1, c2) = control_points(p, p, p);
    assert_eq!(c1, p);
    assert_eq!(c2, p);
}
