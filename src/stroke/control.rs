use crate::foundation::core::Point;

/// Control points that make a curve bend smoothly through `s2`.
///
/// Returns `(c1, c2)`: `c1` is the incoming control point for the piece ending at `s2`, `c2` the
/// outgoing one for the piece starting at `s2`. Both are the midpoints of `s1-s2` and `s2-s3`
/// translated so that their length-weighted blend lands on `s2`.
///
/// Coincident input (`|s1-s2| + |s2-s3| == 0`) returns `(s2, s2)`.
pub fn control_points(s1: Point, s2: Point, s3: Point) -> (Point, Point) {
    let m1 = s1.midpoint(s2);
    let m2 = s2.midpoint(s3);
    let l1 = s1.distance(s2);
    let l2 = s2.distance(s3);

    let total = l1 + l2;
    if !(total > 0.0) {
        return (s2, s2);
    }

    let k = l2 / total;
    let cm = m2 + (m1 - m2) * k;
    let t = s2 - cm;
    (m1 + t, m2 + t)
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/control.rs"]
mod tests;
