use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::config::color::ColorDef;
use crate::foundation::error::{PadError, PadResult};

/// Logical margin removed from both axes on relayout when `margin` is set.
pub const MARGIN_PX: f64 = 16.0;

/// Per-pad configuration supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PadConfig {
    pub pen_color: ColorDef,
    pub background_color: ColorDef,
    pub min_width: f64,
    pub max_width: f64,
    /// Weight of the newest velocity sample in the exponential filter.
    pub velocity_filter_weight: f64,
    /// Width of the dot left by a tap. `None` means the mid-range width.
    pub dot_size: Option<f64>,
    /// Logical width override in CSS pixels.
    pub width: Option<f64>,
    /// Logical height override in CSS pixels.
    pub height: Option<f64>,
    pub margin: bool,
    /// Tolerance used when comparing the current zoom with the zoom an image was saved at.
    pub zoom_epsilon: f64,
    pub resize_debounce_ms: u64,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            pen_color: ColorDef::BLACK,
            background_color: ColorDef::WHITE,
            min_width: 0.5,
            max_width: 2.5,
            velocity_filter_weight: 0.7,
            dot_size: None,
            width: None,
            height: None,
            margin: false,
            zoom_epsilon: 0.005,
            resize_debounce_ms: 50,
        }
    }
}

impl PadConfig {
    pub fn from_json_str(s: &str) -> PadResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| PadError::serde(e.to_string()))?;
        cfg.warn_inconsistencies();
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PadResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read pad config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn mid_width(&self) -> f64 {
        (self.min_width + self.max_width) / 2.0
    }

    pub fn effective_dot_size(&self) -> f64 {
        self.dot_size.unwrap_or_else(|| self.mid_width())
    }

    /// Logical size used after a relayout, given the host's viewport size.
    pub fn logical_size(&self, viewport_width: f64, viewport_height: f64) -> (f64, f64) {
        let mut w = self.width.unwrap_or(viewport_width);
        let mut h = self.height.unwrap_or(viewport_height);
        if self.margin {
            w -= MARGIN_PX;
            h -= MARGIN_PX;
        }
        (w.max(0.0), h.max(0.0))
    }

    /// Inconsistent values are rendered as-is; they are only reported.
    pub fn warn_inconsistencies(&self) {
        if self.min_width > self.max_width {
            tracing::warn!(
                min_width = self.min_width,
                max_width = self.max_width,
                "min_width exceeds max_width; strokes will use min_width throughout"
            );
        }
        if !(self.velocity_filter_weight > 0.0 && self.velocity_filter_weight < 1.0) {
            tracing::warn!(
                weight = self.velocity_filter_weight,
                "velocity_filter_weight outside (0, 1)"
            );
        }
        if self.background_color.to_rgba8()[3] != 255 {
            tracing::warn!(
                color = %self.background_color.to_hex(),
                "translucent background color; content detection compares against its opaque form"
            );
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/pad.rs"]
mod tests;
