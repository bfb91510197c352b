//! Per-gesture pointer tracking: velocity smoothing and the drag session record.

use crate::input::PointerSample;

/// Weight kept from the previous velocity on each sample.
pub const VELOCITY_DECAY: f64 = 0.5;

/// First-order exponential smoother over successive x deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityTracker {
    vx: f64,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.vx = 0.0;
    }

    /// Feed the x delta since the previous sample.
    pub fn push(&mut self, delta: f64) {
        self.vx = self.vx * VELOCITY_DECAY + delta * (1.0 - VELOCITY_DECAY);
    }

    /// Smoothed velocity, positive when the pointer travels right.
    pub fn velocity(&self) -> f64 {
        self.vx
    }
}

/// Whether the session was recognised as a vertical scroll or a horizontal swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    #[default]
    Undetermined,
    Scroll,
    Swipe,
}

/// Everything a single gesture needs between start and end.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub start_x: f64,
    pub start_y: f64,
    /// Index when the gesture began; the commit hysteresis is measured from here.
    pub start_index: f64,
    /// Index that `start_x` maps to. Differs from `start_index` once the drag
    /// has been re-anchored at a hard boundary.
    pub anchor_index: f64,
    pub last_x: f64,
    pub view_extent: f64,
    pub classification: Classification,
    velocity: VelocityTracker,
}

impl DragSession {
    pub fn begin(sample: &PointerSample, start_index: f64, view_extent: f64) -> Self {
        Self {
            start_x: sample.x,
            start_y: sample.y,
            start_index,
            anchor_index: start_index,
            last_x: sample.x,
            view_extent,
            classification: Classification::Undetermined,
            velocity: VelocityTracker::new(),
        }
    }

    /// A session over a zero-sized (not yet laid out) view cannot map pixels to
    /// panels, so it never leaves `Undetermined`.
    pub fn has_extent(&self) -> bool {
        self.view_extent.is_finite() && self.view_extent > 0.0
    }

    /// One-time scroll/swipe decision made on the first move sample.
    pub fn classify(&mut self, sample: &PointerSample) -> Classification {
        if self.classification == Classification::Undetermined {
            let dx = (self.start_x - sample.x).abs();
            let dy = (self.start_y - sample.y).abs();
            self.classification = if dy > dx || sample.default_prevented {
                Classification::Scroll
            } else {
                Classification::Swipe
            };
        }
        self.classification
    }

    /// Record a move sample and return the raw (unresisted) fractional index.
    pub fn track(&mut self, sample: &PointerSample) -> f64 {
        self.velocity.push(sample.x - self.last_x);
        self.last_x = sample.x;
        self.anchor_index + (self.start_x - sample.x) / self.view_extent
    }

    /// Restart the drag origin at `x`, pinned to the boundary `index`, so that
    /// further movement is measured from the edge rather than accumulating past it.
    pub fn reanchor(&mut self, x: f64, index: f64) {
        self.start_x = x;
        self.anchor_index = index;
    }

    pub fn velocity(&self) -> f64 {
        self.velocity.velocity()
    }
}
