//! Touch gesture interpretation: scroll/swipe classification, drag tracking and
//! the release-time commit rule.

use log::{debug, trace, warn};

use crate::input::PointerSample;
use crate::resistance::{out_of_bounds, resist};
use crate::tracker::{Classification, DragSession};

/// Minimum displacement (in panels) for a slow drag to change panel.
pub const COMMIT_HYSTERESIS: f64 = 0.6;

/// Observable state of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Classifying,
    Ignoring,
    Dragging,
    /// The session was invalidated; its remaining samples are discarded.
    Aborted,
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Idle,
    Active(DragSession),
    Aborted,
}

/// Limits a drag is interpreted against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    pub index_max: f64,
    pub resistance: bool,
}

/// Result of feeding one move sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// No live session; the sample was dropped.
    Discarded,
    /// The sample opened a session because its start was never seen.
    Started,
    /// The view has no extent yet so the session stays unclassified.
    Pending,
    /// Recognised as vertical scrolling; let the platform scroll.
    Scrolling,
    /// Horizontal drag updated the fractional index.
    Dragged(f64),
}

impl MoveOutcome {
    /// Whether the host should suppress native scrolling for this sample.
    pub fn prevents_default(&self) -> bool {
        matches!(self, MoveOutcome::Dragged(_))
    }
}

#[derive(Debug, Default)]
pub struct GestureInterpreter {
    state: State,
    last_extent: f64,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        match &self.state {
            State::Idle => GesturePhase::Idle,
            State::Aborted => GesturePhase::Aborted,
            State::Active(s) => match s.classification {
                Classification::Undetermined => GesturePhase::Classifying,
                Classification::Scroll => GesturePhase::Ignoring,
                Classification::Swipe => GesturePhase::Dragging,
            },
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.phase() == GesturePhase::Dragging
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            State::Active(s) => Some(s),
            _ => None,
        }
    }

    /// Opens a session. A start while another session is live is ignored.
    pub fn start(&mut self, sample: &PointerSample, index_current: f64, view_extent: f64) -> bool {
        if let State::Active(_) = self.state {
            debug!("gesture start ignored: session already active");
            return false;
        }
        if !sample.is_finite() {
            warn!("gesture start ignored: non-finite sample {sample:?}");
            return false;
        }
        self.last_extent = view_extent;
        self.state = State::Active(DragSession::begin(sample, index_current, view_extent));
        trace!("gesture start at ({}, {}) index={index_current}", sample.x, sample.y);
        true
    }

    pub fn update(
        &mut self,
        sample: &PointerSample,
        index_current: f64,
        bounds: DragBounds,
    ) -> MoveOutcome {
        if !sample.is_finite() {
            warn!("move ignored: non-finite sample {sample:?}");
            return MoveOutcome::Discarded;
        }

        match self.state {
            State::Aborted => return MoveOutcome::Discarded,
            State::Idle => {
                // the start was swallowed upstream; open the session here
                let extent = self.last_extent;
                self.state = State::Active(DragSession::begin(sample, index_current, extent));
                return MoveOutcome::Started;
            }
            State::Active(_) => {}
        }
        let State::Active(session) = &mut self.state else {
            return MoveOutcome::Discarded;
        };

        if !session.has_extent() {
            return MoveOutcome::Pending;
        }

        let first = session.classification == Classification::Undetermined;
        match session.classify(sample) {
            Classification::Scroll => {
                if first {
                    debug!("gesture classified as vertical scroll");
                }
                return MoveOutcome::Scrolling;
            }
            Classification::Swipe | Classification::Undetermined => {
                if first {
                    debug!("gesture classified as horizontal swipe");
                }
            }
        }

        let raw = session.track(sample);
        let index = if bounds.resistance {
            resist(raw, bounds.index_max, true)
        } else if out_of_bounds(raw, bounds.index_max) {
            let pinned = resist(raw, bounds.index_max, false);
            session.reanchor(sample.x, pinned);
            pinned
        } else {
            raw
        };

        trace!("drag index={index:.4} vx={:.3}", session.velocity());
        MoveOutcome::Dragged(index)
    }

    /// Closes the session and returns the index to settle on, if the gesture
    /// was a horizontal drag.
    pub fn end(&mut self, index_current: f64, threshold: f64, index_max: usize) -> Option<usize> {
        let session = match std::mem::take(&mut self.state) {
            State::Active(s) => s,
            State::Idle | State::Aborted => return None,
        };

        match session.classification {
            Classification::Swipe => {}
            Classification::Undetermined | Classification::Scroll => return None,
        }

        let index = commit_index(
            session.start_index,
            index_current,
            session.velocity(),
            threshold,
            index_max,
        );
        debug!(
            "gesture release: start={} current={index_current:.3} vx={:.3} -> {index}",
            session.start_index,
            session.velocity()
        );
        Some(index)
    }

    /// Invalidates the live session. Its remaining samples are dropped until the
    /// next explicit start.
    pub fn abort(&mut self) {
        if let State::Active(_) = self.state {
            debug!("gesture session aborted");
            self.state = State::Aborted;
        }
    }
}

/// Decides which panel a released drag settles on.
///
/// A flick faster than `threshold` moves in its direction (`floor` when the
/// pointer travelled right, `ceil` when it travelled left). A slower drag must
/// cover more than [`COMMIT_HYSTERESIS`] panels to change page, otherwise it
/// snaps back to `start_index`. The result is clamped to `[0, index_max]`.
pub fn commit_index(
    start_index: f64,
    index_current: f64,
    vx: f64,
    threshold: f64,
    index_max: usize,
) -> usize {
    let index = if vx.abs() > threshold {
        if vx > 0.0 {
            index_current.floor()
        } else {
            index_current.ceil()
        }
    } else if (start_index - index_current).abs() > COMMIT_HYSTERESIS {
        index_current.round()
    } else {
        start_index
    };

    clamp_index(index, index_max)
}

/// Clamps a candidate index into `[0, index_max]`. Non-finite input maps to 0.
pub fn clamp_index(index: f64, index_max: usize) -> usize {
    if !index.is_finite() || index <= 0.0 {
        return 0;
    }
    (index.round() as usize).min(index_max)
}
