use serde::{Deserialize, Serialize};

use crate::foundation::core::SamplePoint;

/// Mouse button reported with a mouse event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

/// A host input event in surface-local logical coordinates.
///
/// Mouse-up is delivered for releases anywhere in the host window, not only over the surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    MouseDown {
        button: MouseButton,
        x: f64,
        y: f64,
        time_ms: u64,
    },
    MouseMove {
        x: f64,
        y: f64,
        time_ms: u64,
    },
    MouseUp {
        button: MouseButton,
        time_ms: u64,
    },
    TouchStart {
        /// Number of touches currently targeting the surface.
        target_touches: usize,
        x: f64,
        y: f64,
        time_ms: u64,
    },
    TouchMove {
        x: f64,
        y: f64,
        time_ms: u64,
    },
    TouchEnd {
        /// Whether the event target is the surface itself.
        on_surface: bool,
        time_ms: u64,
    },
}

/// Notifications raised to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadEvent {
    StrokeBegin,
    StrokeEnd,
}

/// Result of handing one [`InputEvent`] to a pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    pub event: Option<PadEvent>,
    /// The host should suppress the platform default (scroll, pan) for this event.
    pub prevent_default: bool,
}

/// What an accepted event asks the stroke pipeline to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeAction {
    Begin(SamplePoint),
    Update(SamplePoint),
    End,
    Ignore,
}

/// Input gate in front of the stroke engine. Tracks the primary button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFilter {
    button_down: bool,
}

impl InputFilter {
    pub fn button_down(&self) -> bool {
        self.button_down
    }

    pub fn reset(&mut self) {
        self.button_down = false;
    }

    /// Returns the action to apply and whether the platform default must be suppressed.
    pub fn route(&mut self, event: InputEvent) -> (StrokeAction, bool) {
        match event {
            InputEvent::MouseDown {
                button: MouseButton::Primary,
                x,
                y,
                time_ms,
            } => {
                self.button_down = true;
                (StrokeAction::Begin(SamplePoint::new(x, y, time_ms)), false)
            }
            InputEvent::MouseDown { .. } => (StrokeAction::Ignore, false),
            InputEvent::MouseMove { x, y, time_ms } if self.button_down => {
                (StrokeAction::Update(SamplePoint::new(x, y, time_ms)), false)
            }
            InputEvent::MouseMove { .. } => (StrokeAction::Ignore, false),
            InputEvent::MouseUp {
                button: MouseButton::Primary,
                ..
            } if self.button_down => {
                self.button_down = false;
                (StrokeAction::End, false)
            }
            InputEvent::MouseUp { .. } => (StrokeAction::Ignore, false),
            InputEvent::TouchStart {
                target_touches: 1,
                x,
                y,
                time_ms,
            } => (StrokeAction::Begin(SamplePoint::new(x, y, time_ms)), false),
            InputEvent::TouchStart { .. } => (StrokeAction::Ignore, false),
            InputEvent::TouchMove { x, y, time_ms } => {
                (StrokeAction::Update(SamplePoint::new(x, y, time_ms)), true)
            }
            InputEvent::TouchEnd {
                on_surface: true, ..
            } => (StrokeAction::End, true),
            InputEvent::TouchEnd { .. } => (StrokeAction::Ignore, false),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pad/input.rs"]
mod tests;
