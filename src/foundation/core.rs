pub use kurbo::{Point, Rect, Vec2};

/// One pointer sample in surface-local logical coordinates.
///
/// Timestamps are milliseconds and are expected to be non-decreasing within a stroke.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SamplePoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Sample time in milliseconds.
    pub time_ms: u64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64, time_ms: u64) -> Self {
        Self { x, y, time_ms }
    }

    pub fn pos(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn distance_to(self, other: SamplePoint) -> f64 {
        self.pos().distance(other.pos())
    }

    /// Speed from `start` to `self` in logical pixels per millisecond.
    ///
    /// Two samples sharing a timestamp report a velocity of 1. Out-of-order timestamps are
    /// treated the same way.
    pub fn velocity_from(self, start: SamplePoint) -> f64 {
        let dt = self.time_ms.saturating_sub(start.time_ms);
        if dt == 0 {
            return 1.0;
        }
        self.distance_to(start) / dt as f64
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let [r, g, b, a] = crate::foundation::math::premul_px([r, g, b, a]);
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
