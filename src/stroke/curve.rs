use kurbo::{CubicBez, ParamCurve};

use crate::foundation::core::{Point, SamplePoint};

/// Sample count used by [`CurveSegment::arc_length`].
pub const ARC_LENGTH_STEPS: usize = 10;

/// One cubic Bezier piece of a stroke, from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSegment {
    pub start: SamplePoint,
    pub control1: Point,
    pub control2: Point,
    pub end: SamplePoint,
}

impl CurveSegment {
    pub fn new(start: SamplePoint, control1: Point, control2: Point, end: SamplePoint) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    pub fn to_cubic(&self) -> CubicBez {
        CubicBez::new(self.start.pos(), self.control1, self.control2, self.end.pos())
    }

    /// Position at parameter `t` in `[0, 1]`.
    pub fn eval(&self, t: f64) -> Point {
        self.to_cubic().eval(t)
    }

    /// Polyline approximation of the curve length over [`ARC_LENGTH_STEPS`] equal parameter
    /// steps. Not cached.
    pub fn arc_length(&self) -> f64 {
        let cubic = self.to_cubic();
        let mut length = 0.0;
        let mut prev = cubic.eval(0.0);
        for i in 1..=ARC_LENGTH_STEPS {
            let p = cubic.eval(i as f64 / ARC_LENGTH_STEPS as f64);
            length += prev.distance(p);
            prev = p;
        }
        length
    }

    /// Velocity from the segment's start sample to its end sample.
    pub fn velocity(&self) -> f64 {
        self.end.velocity_from(self.start)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/curve.rs"]
mod tests;
