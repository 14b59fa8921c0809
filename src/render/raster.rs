use kurbo::{Affine, BezPath, Circle, CubicBez, ParamCurve, ParamCurveExtrema, PathEl, Shape};

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{PadError, PadResult};
use crate::render::composite::{PixelView, blit_over};
use crate::render::surface::{DirtyRect, Surface};
use crate::stroke::engine::StrokeSegment;

const CIRCLE_TOLERANCE: f64 = 0.1;

/// One filled circle of a stroke, in logical coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub center: Point,
    pub radius: f64,
}

/// Index runs at or below this length are sampled directly instead of subdivided.
const DIRECT_RUN: usize = 32;

/// Dots approximating `seg` whose circles can reach `clip` (logical coordinates).
///
/// `floor(arc_length)` dots are placed at `t = i / steps` for `i` in `0..steps`; `t = 1` is
/// left for the next segment. Width grows from `start_width` with `t^3`. Index runs whose
/// sub-curve bounds miss `clip` are skipped without being sampled.
pub fn segment_dots(seg: &StrokeSegment, clip: Rect) -> Vec<Dot> {
    let length = seg.curve.arc_length();
    if !length.is_finite() {
        return Vec::new();
    }
    let steps = length.floor() as usize;
    if steps == 0 {
        return Vec::new();
    }
    let reach = seg.start_width.abs().max(seg.end_width.abs()) / 2.0;
    let clip = clip.inflate(reach, reach);
    let sampler = DotSampler {
        cubic: seg.curve.to_cubic(),
        steps,
        start_width: seg.start_width,
        delta: seg.end_width - seg.start_width,
        clip,
    };
    let mut dots = Vec::new();
    sampler.collect(0, steps, &mut dots);
    dots
}

struct DotSampler {
    cubic: CubicBez,
    steps: usize,
    start_width: f64,
    delta: f64,
    clip: Rect,
}

impl DotSampler {
    fn t(&self, i: usize) -> f64 {
        i as f64 / self.steps as f64
    }

    /// Pushes the visible dots for indices `lo..hi`, in order.
    fn collect(&self, lo: usize, hi: usize, out: &mut Vec<Dot>) {
        let sub = self.cubic.subsegment(self.t(lo)..self.t(hi));
        let bounds = ParamCurveExtrema::bounding_box(&sub);
        if !touches(bounds, self.clip) {
            return;
        }
        if hi - lo > DIRECT_RUN {
            let mid = lo + (hi - lo) / 2;
            self.collect(lo, mid, out);
            self.collect(mid, hi, out);
            return;
        }
        for i in lo..hi {
            let t = self.t(i);
            let center = self.cubic.eval(t);
            if !touches(Rect::from_points(center, center), self.clip) {
                continue;
            }
            out.push(Dot {
                center,
                radius: (self.start_width + t * t * t * self.delta) / 2.0,
            });
        }
    }
}

fn touches(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// All dots as one path, so overlapping circles are filled together.
pub fn dots_path(dots: &[Dot]) -> BezPath {
    let mut path = BezPath::new();
    for dot in dots {
        if dot.radius > 0.0 {
            path.extend(Circle::new(dot.center, dot.radius).path_elements(CIRCLE_TOLERANCE));
        }
    }
    path
}

/// Draws stroke geometry onto a [`Surface`] in a single pen color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rasterizer {
    /// Straight-alpha RGBA8.
    pen: [u8; 4],
}

impl Rasterizer {
    pub fn new(pen: [u8; 4]) -> Self {
        Self { pen }
    }

    pub fn set_pen(&mut self, pen: [u8; 4]) {
        self.pen = pen;
    }

    /// Returns `false` when the segment leaves no dot on the surface.
    pub fn draw_segment(&self, surface: &mut Surface, seg: &StrokeSegment) -> PadResult<bool> {
        let ratio = surface.pixel_ratio();
        let clip = Rect::new(
            0.0,
            0.0,
            f64::from(surface.width()) / ratio,
            f64::from(surface.height()) / ratio,
        );
        let dots = segment_dots(seg, clip);
        if dots.is_empty() {
            return Ok(false);
        }
        self.fill(surface, &dots_path(&dots))?;
        Ok(true)
    }

    /// A single dot of diameter `width`, used for taps.
    pub fn draw_dot(&self, surface: &mut Surface, center: Point, width: f64) -> PadResult<bool> {
        let dot = Dot {
            center,
            radius: width / 2.0,
        };
        let path = dots_path(&[dot]);
        if path.elements().is_empty() {
            return Ok(false);
        }
        self.fill(surface, &path)?;
        Ok(true)
    }

    /// Fills `path` (logical coordinates) once, rendering only the pixels it can touch.
    fn fill(&self, surface: &mut Surface, path: &BezPath) -> PadResult<()> {
        let ratio = surface.pixel_ratio();
        let bounds = Affine::scale(ratio).transform_rect_bbox(path.bounding_box());
        let Some(rect) =
            DirtyRect::covering(bounds, 1).clamp(surface.width(), surface.height())
        else {
            return Ok(());
        };

        let w: u16 = rect
            .width
            .try_into()
            .map_err(|_| PadError::validation("stroke region width exceeds u16"))?;
        let h: u16 = rect
            .height
            .try_into()
            .map_err(|_| PadError::validation("stroke region height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(
            vello_cpu::kurbo::Affine::translate((-f64::from(rect.x), -f64::from(rect.y)))
                * vello_cpu::kurbo::Affine::scale(ratio),
        );
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            self.pen[0],
            self.pen[1],
            self.pen[2],
            self.pen[3],
        ));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let view = PixelView::new(u32::from(w), u32::from(h), pixmap.data_as_u8_slice())?;
        blit_over(surface, view, i64::from(rect.x), i64::from(rect.y));
        Ok(())
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
