//! Authoritative current/latest index bookkeeping shared by both front-ends.

use log::{debug, trace};

use crate::dispatch::Listener;
use crate::gestures::clamp_index;
use crate::input::SwitchPhase;

/// External measurement of a panel's content height, in pixels.
pub trait HeightProbe {
    fn panel_height(&self, panel: usize) -> Option<f64>;
}

impl HeightProbe for [f64] {
    fn panel_height(&self, panel: usize) -> Option<f64> {
        self.get(panel).copied()
    }
}

impl HeightProbe for Vec<f64> {
    fn panel_height(&self, panel: usize) -> Option<f64> {
        self.as_slice().panel_height(panel)
    }
}

impl<F: Fn(usize) -> Option<f64>> HeightProbe for F {
    fn panel_height(&self, panel: usize) -> Option<f64> {
        self(panel)
    }
}

#[derive(Debug, Clone)]
pub struct IndexReconciler {
    panel_count: usize,
    index_current: f64,
    index_latest: usize,
    /// Last index supplied by the host, unclamped; only a different value overrides.
    controlled: usize,
    /// The surfaced index is a clamp of `controlled` waiting for more panels.
    controlled_pending: bool,
    first_render: bool,
    height_sync: bool,
    height_latest: f64,
}

impl IndexReconciler {
    pub fn new(index: usize, panel_count: usize, height_sync: bool) -> Self {
        let start = index.min(panel_count.saturating_sub(1));
        Self {
            panel_count,
            index_current: start as f64,
            index_latest: start,
            controlled: index,
            controlled_pending: index > start,
            first_render: true,
            height_sync,
            height_latest: 0.0,
        }
    }

    pub fn panel_count(&self) -> usize {
        self.panel_count
    }

    /// Last valid panel. Zero panels still report 0.
    pub fn index_max(&self) -> usize {
        self.panel_count.saturating_sub(1)
    }

    pub fn index_current(&self) -> f64 {
        self.index_current
    }

    pub fn index_latest(&self) -> usize {
        self.index_latest
    }

    pub fn height_latest(&self) -> f64 {
        self.height_latest
    }

    pub fn height_sync(&self) -> bool {
        self.height_sync
    }

    pub fn set_height_sync(&mut self, enabled: bool) {
        self.height_sync = enabled;
    }

    /// Live drag position; reported as a `Move` switch.
    pub fn drag_to(&mut self, index: f64, listener: &mut impl Listener) {
        self.index_current = index;
        listener.on_switching(index, SwitchPhase::Move);
    }

    /// Drops an unfinished drag position without settling.
    pub fn revert_drag(&mut self) {
        self.index_current = self.index_latest as f64;
    }

    /// Resolves `candidate` to a panel and makes it the settled index.
    ///
    /// Emits `Switching(index, End)` on every settle and `ChangeIndex` only
    /// when the settled panel differs from the previous one.
    pub fn settle(&mut self, candidate: f64, listener: &mut impl Listener) -> usize {
        let index = clamp_index(candidate, self.index_max());
        let previous = self.index_latest;

        self.index_current = index as f64;
        self.index_latest = index;
        self.controlled_pending = false;
        debug!("settled on panel {index} (candidate {candidate}, previous {previous})");

        listener.on_switching(index as f64, SwitchPhase::End);
        if index != previous {
            listener.on_change_index(index, previous);
        }
        index
    }

    /// Applies a host-supplied index. Returns true when it overrode the state,
    /// which the caller must treat as cancelling any live gesture.
    pub fn set_controlled_index(&mut self, index: usize) -> bool {
        if index == self.controlled {
            return false;
        }
        self.controlled = index;
        let index = index.min(self.index_max());
        debug!("controlled index override -> {index}");
        self.index_current = index as f64;
        self.index_latest = index;
        self.controlled_pending = self.controlled > index;
        true
    }

    /// Moves to the host-supplied index once enough panels exist for it.
    /// Returns true when the settled panel changed. Emits nothing.
    pub fn restore_controlled(&mut self) -> bool {
        if !self.controlled_pending {
            return false;
        }
        let index = self.controlled.min(self.index_max());
        self.controlled_pending = self.controlled > index;
        if index == self.index_latest {
            return false;
        }
        debug!("controlled index {} restored -> {index}", self.controlled);
        self.index_current = index as f64;
        self.index_latest = index;
        true
    }

    pub fn set_panel_count(&mut self, panel_count: usize) {
        if panel_count == self.panel_count {
            return;
        }
        self.panel_count = panel_count;
        let max = self.index_max();
        if self.index_latest > max {
            debug!("panel count shrank to {panel_count}; clamping to {max}");
            if self.index_latest == self.controlled {
                self.controlled_pending = true;
            }
            self.index_latest = max;
            self.index_current = max as f64;
        }
    }

    /// Panels other than the settled one are deferred until after first paint.
    pub fn is_materialized(&self, panel: usize) -> bool {
        panel < self.panel_count && (!self.first_render || panel == self.index_latest)
    }

    pub fn is_first_render(&self) -> bool {
        self.first_render
    }

    pub fn mark_mounted(&mut self) {
        self.first_render = false;
    }

    /// Measures the settled panel and returns its height when it changed.
    /// No query is made when an explicit container size is configured.
    pub fn sync_height<P: HeightProbe + ?Sized>(&mut self, probe: &P) -> Option<f64> {
        if !self.height_sync {
            return None;
        }
        let height = probe.panel_height(self.index_latest)?;
        if !height.is_finite() || height < 0.0 || height == self.height_latest {
            return None;
        }
        trace!("panel {} height {} -> {height}", self.index_latest, self.height_latest);
        self.height_latest = height;
        Some(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Notification;
    use std::cell::Cell;

    #[test]
    fn settle_emits_end_then_change() {
        let mut r = IndexReconciler::new(0, 3, true);
        let mut seen: Vec<Notification> = Vec::new();
        assert_eq!(r.settle(1.0, &mut seen), 1);
        assert_eq!(
            seen,
            vec![
                Notification::Switching {
                    index: 1.0,
                    phase: SwitchPhase::End
                },
                Notification::ChangeIndex { index: 1, from: 0 },
            ]
        );
        assert_eq!(r.index_current(), 1.0);
        assert_eq!(r.index_latest(), 1);
    }

    #[test]
    fn settle_on_same_panel_skips_change() {
        let mut r = IndexReconciler::new(2, 3, true);
        let mut seen: Vec<Notification> = Vec::new();
        r.settle(2.0, &mut seen);
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0], Notification::Switching { .. }));
    }

    #[test]
    fn settle_clamps_and_rounds() {
        let mut r = IndexReconciler::new(0, 3, true);
        assert_eq!(r.settle(-0.4, &mut ()), 0);
        assert_eq!(r.settle(9.0, &mut ()), 2);
        assert_eq!(r.settle(0.9999, &mut ()), 1);
    }

    #[test]
    fn controlled_index_overrides_only_on_change() {
        let mut r = IndexReconciler::new(0, 4, true);
        r.drag_to(0.4, &mut ());
        assert!(!r.set_controlled_index(0));
        assert_eq!(r.index_current(), 0.4);

        assert!(r.set_controlled_index(3));
        assert_eq!(r.index_current(), 3.0);
        assert_eq!(r.index_latest(), 3);

        // the same value again is not an override even after a swipe
        r.settle(1.0, &mut ());
        assert!(!r.set_controlled_index(3));
        assert_eq!(r.index_latest(), 1);
    }

    #[test]
    fn controlled_index_is_clamped() {
        let mut r = IndexReconciler::new(0, 2, true);
        assert!(r.set_controlled_index(7));
        assert_eq!(r.index_latest(), 1);
    }

    #[test]
    fn first_render_defers_neighbours() {
        let mut r = IndexReconciler::new(1, 3, true);
        assert!(!r.is_materialized(0));
        assert!(r.is_materialized(1));
        assert!(!r.is_materialized(2));
        r.mark_mounted();
        assert!((0..3).all(|p| r.is_materialized(p)));
        assert!(!r.is_materialized(3));
    }

    #[test]
    fn shrinking_panel_count_clamps() {
        let mut r = IndexReconciler::new(4, 5, true);
        r.set_panel_count(2);
        assert_eq!(r.index_latest(), 1);
        r.set_panel_count(0);
        assert_eq!(r.index_latest(), 0);
        assert_eq!(r.index_max(), 0);
    }

    #[test]
    fn controlled_index_waits_for_panels() {
        let mut r = IndexReconciler::new(2, 0, true);
        assert_eq!(r.index_latest(), 0);
        assert!(!r.set_controlled_index(2));

        r.set_panel_count(2);
        assert!(r.restore_controlled());
        assert_eq!(r.index_latest(), 1);

        r.set_panel_count(4);
        assert!(r.restore_controlled());
        assert_eq!(r.index_latest(), 2);
        assert_eq!(r.index_current(), 2.0);
        assert!(!r.restore_controlled());
    }

    #[test]
    fn shrink_then_grow_returns_to_controlled_index() {
        let mut r = IndexReconciler::new(4, 5, true);
        r.set_panel_count(2);
        assert_eq!(r.index_latest(), 1);
        r.set_panel_count(5);
        assert!(r.restore_controlled());
        assert_eq!(r.index_latest(), 4);
    }

    #[test]
    fn swipe_supersedes_pending_controlled_index() {
        let mut r = IndexReconciler::new(3, 2, true);
        let mut seen: Vec<Notification> = Vec::new();
        r.settle(0.0, &mut seen);
        r.set_panel_count(5);
        assert!(!r.restore_controlled());
        assert_eq!(r.index_latest(), 0);

        // a panel the user swiped to is not a controlled target
        r.settle(4.0, &mut seen);
        r.set_panel_count(2);
        r.set_panel_count(5);
        assert!(!r.restore_controlled());
        assert_eq!(r.index_latest(), 1);
    }

    #[test]
    fn height_sync_reports_changes_only() {
        let mut r = IndexReconciler::new(0, 2, true);
        let heights = vec![120.0, 300.0];
        assert_eq!(r.sync_height(&heights), Some(120.0));
        assert_eq!(r.sync_height(&heights), None);
        r.settle(1.0, &mut ());
        assert_eq!(r.sync_height(&heights), Some(300.0));
        assert_eq!(r.height_latest(), 300.0);
    }

    #[test]
    fn fixed_height_never_queries() {
        let mut r = IndexReconciler::new(0, 3, false);
        let calls = Cell::new(0);
        let probe = |panel: usize| {
            calls.set(calls.get() + 1);
            Some(100.0 * (panel + 1) as f64)
        };
        for i in 0..3 {
            r.settle(i as f64, &mut ());
            assert_eq!(r.sync_height(&probe), None);
        }
        assert_eq!(calls.get(), 0);
    }
}
