use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use crate::config::pad::PadConfig;
use crate::pad::pad::Pad;

/// Registration handle returned by [`ResizeDispatcher::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PadId(u64);

/// Shared resize service for every live pad.
///
/// Resize notifications are coalesced: the relayout pass runs once, from [`poll`], when no
/// notification arrived for the debounce window. The timer is global, not per pad. Pads are
/// held weakly; dropped pads are pruned on the next pass.
///
/// [`poll`]: ResizeDispatcher::poll
#[derive(Debug)]
pub struct ResizeDispatcher {
    debounce: Duration,
    pads: Vec<(PadId, Weak<RefCell<Pad>>)>,
    next_id: u64,
    deadline: Option<Instant>,
    viewport: (f64, f64),
}

impl ResizeDispatcher {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pads: Vec::new(),
            next_id: 0,
            deadline: None,
            viewport: (0.0, 0.0),
        }
    }

    pub fn from_config(config: &PadConfig) -> Self {
        Self::new(Duration::from_millis(config.resize_debounce_ms))
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn register(&mut self, pad: &Rc<RefCell<Pad>>) -> PadId {
        let id = PadId(self.next_id);
        self.next_id += 1;
        self.pads.push((id, Rc::downgrade(pad)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn deregister(&mut self, id: PadId) -> bool {
        let before = self.pads.len();
        self.pads.retain(|(pid, _)| *pid != id);
        self.pads.len() != before
    }

    /// Registered pads that are still alive.
    pub fn live_count(&self) -> usize {
        self.pads.iter().filter(|(_, p)| p.strong_count() > 0).count()
    }

    /// Record a resize to `viewport` at `now` and restart the quiet period.
    pub fn notify(&mut self, viewport: (f64, f64), now: Instant) {
        self.viewport = viewport;
        self.deadline = Some(now + self.debounce);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before a pending pass becomes due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Run the relayout pass if it is due. Returns the number of pads that were relaid out.
    ///
    /// Pads with no width in the new viewport are skipped, as are pads already borrowed by
    /// the caller.
    #[tracing::instrument(skip(self), fields(pads = self.pads.len()))]
    pub fn poll(&mut self, now: Instant) -> usize {
        match self.deadline {
            Some(deadline) if now >= deadline => {}
            _ => return 0,
        }
        self.deadline = None;
        self.pads.retain(|(_, p)| p.strong_count() > 0);

        let mut relaid = 0;
        for (id, weak) in &self.pads {
            let Some(cell) = weak.upgrade() else {
                continue;
            };
            let Ok(mut pad) = cell.try_borrow_mut() else {
                tracing::warn!(?id, "pad busy during resize pass; skipped");
                continue;
            };
            match pad.relayout(self.viewport) {
                Ok(Some(_)) => relaid += 1,
                Ok(None) => {}
                Err(err) => tracing::warn!(?id, error = %err, "relayout failed"),
            }
        }
        relaid
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pad/dispatch.rs"]
mod tests;
