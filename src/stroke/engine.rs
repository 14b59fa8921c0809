use std::collections::VecDeque;

use crate::foundation::core::SamplePoint;
use crate::stroke::control::control_points;
use crate::stroke::curve::CurveSegment;
use crate::stroke::velocity::VelocityWidth;

const WINDOW_LEN: usize = 4;

/// Capture state of a [`StrokeEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StrokePhase {
    Idle,
    Capturing,
}

/// A curve segment together with the widths it is drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSegment {
    pub curve: CurveSegment,
    /// Width carried over from the previous segment.
    pub start_width: f64,
    /// Width produced by the velocity model for this segment.
    pub end_width: f64,
}

/// Outcome of [`StrokeEngine::end_stroke`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeEnd {
    /// At least one curve segment was emitted.
    Curves { segments: usize },
    /// Too few samples for a curve; the host draws a single dot here.
    Dot(SamplePoint),
    /// The stroke had no samples.
    Empty,
}

/// Per-stroke driver turning pointer samples into width-annotated curve segments.
///
/// Holds at most four samples. The first segment is emitted on the third sample by duplicating
/// the first one, so a stroke of `n >= 3` samples yields `n - 2` segments.
#[derive(Clone, Debug)]
pub struct StrokeEngine {
    window: VecDeque<SamplePoint>,
    widths: VelocityWidth,
    phase: StrokePhase,
    first: Option<SamplePoint>,
    samples: usize,
    segments: usize,
}

impl StrokeEngine {
    pub fn new(widths: VelocityWidth) -> Self {
        Self {
            window: VecDeque::with_capacity(WINDOW_LEN),
            widths,
            phase: StrokePhase::Idle,
            first: None,
            samples: 0,
            segments: 0,
        }
    }

    pub fn is_capturing(&self) -> bool {
        self.phase == StrokePhase::Capturing
    }

    /// Samples accepted in the current (or last) stroke.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// Segments emitted in the current (or last) stroke.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Drop all stroke state and return to idle.
    pub fn reset(&mut self) {
        self.window.clear();
        self.widths.reset();
        self.phase = StrokePhase::Idle;
        self.first = None;
        self.samples = 0;
        self.segments = 0;
    }

    /// Reset and start capturing; `p` is the stroke's first sample.
    pub fn begin_stroke(&mut self, p: SamplePoint) -> Option<StrokeSegment> {
        self.reset();
        self.phase = StrokePhase::Capturing;
        self.add_point(p)
    }

    /// Feed one sample. Returns the segment completed by it, if any.
    ///
    /// Samples arriving while idle are ignored.
    pub fn add_point(&mut self, p: SamplePoint) -> Option<StrokeSegment> {
        if self.phase != StrokePhase::Capturing {
            return None;
        }
        if self.first.is_none() {
            self.first = Some(p);
        }
        self.samples += 1;
        self.window.push_back(p);

        if self.window.len() < 3 {
            return None;
        }
        if self.window.len() == 3 {
            let head = self.window[0];
            self.window.push_front(head);
        }

        let w = &self.window;
        let (_, c2) = control_points(w[0].pos(), w[1].pos(), w[2].pos());
        let (c3, _) = control_points(w[1].pos(), w[2].pos(), w[3].pos());
        let curve = CurveSegment::new(w[1], c2, c3, w[2]);
        self.window.pop_front();

        let start_width = self.widths.last_width();
        let end_width = self.widths.update(curve.velocity());
        self.segments += 1;
        tracing::trace!(
            segment = self.segments,
            start_width,
            end_width,
            "stroke segment"
        );

        Some(StrokeSegment {
            curve,
            start_width,
            end_width,
        })
    }

    /// Finish the stroke and return to idle. The velocity/width state stays readable until the
    /// next [`StrokeEngine::begin_stroke`].
    pub fn end_stroke(&mut self) -> StrokeEnd {
        self.phase = StrokePhase::Idle;
        self.window.clear();
        match (self.segments, self.first) {
            (0, Some(p)) => StrokeEnd::Dot(p),
            (0, None) => StrokeEnd::Empty,
            (segments, _) => StrokeEnd::Curves { segments },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/engine.rs"]
mod tests;
