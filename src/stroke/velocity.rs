/// Velocity-to-width model: exponential smoothing of pointer speed, mapped inversely to width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityWidth {
    weight: f64,
    min_width: f64,
    max_width: f64,
    last_velocity: f64,
    last_width: f64,
}

impl VelocityWidth {
    pub fn new(weight: f64, min_width: f64, max_width: f64) -> Self {
        let mut model = Self {
            weight,
            min_width,
            max_width,
            last_velocity: 0.0,
            last_width: 0.0,
        };
        model.reset();
        model
    }

    pub fn reset(&mut self) {
        self.last_velocity = 0.0;
        self.last_width = (self.min_width + self.max_width) / 2.0;
    }

    /// Smooth `raw_velocity`, store it and return the new width.
    pub fn update(&mut self, raw_velocity: f64) -> f64 {
        let smoothed = self.weight * raw_velocity + (1.0 - self.weight) * self.last_velocity;
        let width = self.width_for(smoothed);
        self.last_velocity = smoothed;
        self.last_width = width;
        width
    }

    /// `max / (v + 1)`, floored at `min`.
    pub fn width_for(&self, smoothed_velocity: f64) -> f64 {
        (self.max_width / (smoothed_velocity + 1.0)).max(self.min_width)
    }

    pub fn last_velocity(&self) -> f64 {
        self.last_velocity
    }

    pub fn last_width(&self) -> f64 {
        self.last_width
    }

    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    pub fn max_width(&self) -> f64 {
        self.max_width
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/velocity.rs"]
mod tests;
