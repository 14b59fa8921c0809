use super::*;
use crate::foundation::core::SamplePoint;
use crate::stroke::curve::CurveSegment;

fn straight(len: f64, start_width: f64, end_width: f64) -> StrokeSegment {
    let a = SamplePoint::new(10.0, 10.0, 0);
    let b = SamplePoint::new(10.0 + len, 10.0, 10);
    StrokeSegment {
        curve: CurveSegment::new(a, a.pos(), b.pos(), b),
        start_width,
        end_width,
    }
}

fn everywhere() -> Rect {
    Rect::new(-1e3, -1e3, 1e3, 1e3)
}

#[test]
fn dot_count_is_floor_of_arc_length() {
    let dots = segment_dots(&straight(5.7, 2.0, 2.0), everywhere());
    assert_eq!(dots.len(), 5);
}

#[test]
fn last_dot_stops_short_of_end() {
    let seg = straight(8.0, 1.0, 1.0);
    let dots = segment_dots(&seg, everywhere());
    let last = dots.last().unwrap();
    assert!(last.center.x < seg.curve.end.x);
    assert_eq!(dots[0].center, seg.curve.start.pos());
}

#[test]
fn width_interpolates_cubically() {
    let dots = segment_dots(&straight(4.0, 1.0, 3.0), everywhere());
    let radii: Vec<f64> = dots.iter().map(|d| d.radius).collect();
    let expect: Vec<f64> = [0.0, 0.25, 0.5, 0.75]
        .iter()
        .map(|t: &f64| (1.0 + t * t * t * 2.0) / 2.0)
        .collect();
    for (got, want) in radii.iter().zip(expect.iter()) {
        assert!((got - want).abs() < 1e-12, "{got} vs {want}");
    }
}

#[test]
fn short_segment_draws_nothing() {
    let mut surface = Surface::new(32, 32, 1.0);
    let r = Rasterizer::new([0, 0, 0, 255]);
    assert!(!r.draw_segment(&mut surface, &straight(0.5, 2.0, 2.0)).unwrap());
    assert!(surface.data().iter().all(|&b| b == 0));
}

#[test]
fn segment_marks_pixels_along_its_path() {
    let mut surface = Surface::new(40, 20, 1.0);
    let r = Rasterizer::new([0, 0, 0, 255]);
    assert!(r.draw_segment(&mut surface, &straight(20.0, 3.0, 3.0)).unwrap());
    assert!(surface.pixel(20, 10).unwrap()[3] > 200);
    assert_eq!(surface.pixel(20, 2), Some([0, 0, 0, 0]));
    assert_eq!(surface.pixel(39, 10), Some([0, 0, 0, 0]));
}

#[test]
fn dot_scales_with_pixel_ratio() {
    let mut surface = Surface::new(40, 40, 2.0);
    let r = Rasterizer::new([255, 0, 0, 255]);
    assert!(r.draw_dot(&mut surface, Point::new(10.0, 10.0), 4.0).unwrap());
    let px = surface.pixel(20, 20).unwrap();
    assert!(px[3] > 200);
    assert_eq!((px[0], px[1], px[2]), (px[3], 0, 0));
    assert_eq!(surface.pixel(10, 10), Some([0, 0, 0, 0]));
}

#[test]
fn zero_width_dot_is_skipped() {
    let mut surface = Surface::new(8, 8, 1.0);
    let r = Rasterizer::new([0, 0, 0, 255]);
    assert!(!r.draw_dot(&mut surface, Point::new(4.0, 4.0), 0.0).unwrap());
}

#[test]
fn dot_off_surface_is_clipped_away() {
    let mut surface = Surface::new(8, 8, 1.0);
    let r = Rasterizer::new([0, 0, 0, 255]);
    assert!(r.draw_dot(&mut surface, Point::new(-50.0, -50.0), 2.0).unwrap());
    assert!(surface.data().iter().all(|&b| b == 0));
}

#[test]
fn dots_outside_clip_are_skipped_in_order() {
    let seg = straight(40.5, 2.0, 2.0);
    let dots = segment_dots(&seg, Rect::new(0.0, 0.0, 20.0, 20.0));
    assert!(!dots.is_empty());
    assert!(dots.iter().all(|d| d.center.x <= 21.0));
    assert!(dots.windows(2).all(|w| w[0].center.x < w[1].center.x));
    // x(t) = 10 + 40.5 * (3t^2 - 2t^3); only t <= 13/40 stays within x <= 21.
    assert_eq!(dots.len(), 14);
}

#[test]
fn far_off_surface_sample_only_draws_the_visible_part() {
    let a = SamplePoint::new(-3e9, 10.0, 0);
    let b = SamplePoint::new(10.0, 10.0, 10);
    let seg = StrokeSegment {
        curve: CurveSegment::new(a, a.pos(), b.pos(), b),
        start_width: 2.0,
        end_width: 2.0,
    };
    let dots = segment_dots(&seg, Rect::new(0.0, 0.0, 20.0, 20.0));
    assert!(!dots.is_empty());
    assert!(dots.len() < 200_000);
    assert!(dots.iter().all(|d| d.center.x >= -1.0));

    let mut surface = Surface::new(20, 20, 1.0);
    let r = Rasterizer::new([0, 0, 0, 255]);
    assert!(r.draw_segment(&mut surface, &seg).unwrap());
    assert!(surface.pixel(5, 10).unwrap()[3] > 0);
    assert_eq!(surface.pixel(15, 10), Some([0, 0, 0, 0]));
}
