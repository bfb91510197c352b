//! Touch-driven pager: wires gesture interpretation, index reconciliation and
//! the transition channels behind one event-handler surface.

use log::debug;

use crate::config::PagerConfig;
use crate::dispatch::Listener;
use crate::gestures::{DragBounds, GestureInterpreter, GesturePhase, MoveOutcome};
use crate::input::{GestureEvent, PointerSample};
use crate::reconcile::{HeightProbe, IndexReconciler};
use crate::transition::{RenderState, SpringTransition, Transition, Transitions};

#[derive(Debug)]
pub struct SwipeableViews<L, T = SpringTransition> {
    config: PagerConfig,
    reconciler: IndexReconciler,
    gestures: GestureInterpreter,
    transitions: Transitions<T>,
    listener: L,
    torn_down: bool,
}

impl<L: Listener> SwipeableViews<L> {
    pub fn new(config: PagerConfig, panel_count: usize, listener: L) -> Self {
        let reconciler = IndexReconciler::new(config.index, panel_count, config.height_sync());
        let transitions =
            Transitions::spring(reconciler.index_current(), reconciler.height_sync());
        Self::assemble(config, reconciler, transitions, listener)
    }
}

impl<L: Listener, T: Transition> SwipeableViews<L, T> {
    /// Builds a pager whose channels are driven by `make` instead of the default spring.
    pub fn with_transition(
        config: PagerConfig,
        panel_count: usize,
        listener: L,
        make: impl FnMut() -> T,
    ) -> Self {
        let reconciler = IndexReconciler::new(config.index, panel_count, config.height_sync());
        let transitions =
            Transitions::with_drivers(reconciler.index_current(), reconciler.height_sync(), make);
        Self::assemble(config, reconciler, transitions, listener)
    }

    fn assemble(
        config: PagerConfig,
        reconciler: IndexReconciler,
        transitions: Transitions<T>,
        listener: L,
    ) -> Self {
        Self {
            config,
            reconciler,
            gestures: GestureInterpreter::new(),
            transitions,
            listener,
            torn_down: false,
        }
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn index_current(&self) -> f64 {
        self.reconciler.index_current()
    }

    pub fn index_latest(&self) -> usize {
        self.reconciler.index_latest()
    }

    pub fn panel_count(&self) -> usize {
        self.reconciler.panel_count()
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn height_latest(&self) -> f64 {
        self.reconciler.height_latest()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    fn accepts_gestures(&self) -> bool {
        !self.config.disabled && !self.torn_down
    }

    /// Applies a new set of props. A changed `index` overrides the current
    /// state and cancels any gesture in flight.
    pub fn set_props(&mut self, config: PagerConfig) {
        if self.torn_down {
            return;
        }
        if self.reconciler.set_controlled_index(config.index) {
            self.gestures.abort();
            self.transitions
                .retarget_index(self.reconciler.index_current(), false);
        }
        if config.disabled && !self.config.disabled && self.gestures.session().is_some() {
            debug!("pager disabled; dropping live gesture");
            self.gestures.abort();
            self.reconciler.revert_drag();
            self.transitions
                .retarget_index(self.reconciler.index_current(), false);
        }
        if config.height_sync() != self.reconciler.height_sync() {
            self.reconciler.set_height_sync(config.height_sync());
            self.transitions
                .set_height_sync(config.height_sync(), self.reconciler.height_latest());
        }
        self.config = config;
    }

    /// A host index that did not fit the old panel count is applied once it
    /// fits, unless a gesture is in flight.
    pub fn set_panel_count(&mut self, panel_count: usize) {
        self.reconciler.set_panel_count(panel_count);
        if self.gestures.session().is_none() {
            self.reconciler.restore_controlled();
        }
        if !self.gestures.is_dragging() {
            self.transitions
                .retarget_index(self.reconciler.index_current(), false);
        }
    }

    /// Routes a recorded [`GestureEvent`] to the matching handler.
    pub fn handle(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Start {
                sample,
                view_extent,
            } => {
                self.touch_start(&sample, view_extent);
            }
            GestureEvent::Move { sample } => {
                self.touch_move(&sample);
            }
            GestureEvent::End => {
                self.touch_end();
            }
        }
    }

    /// `view_extent` is the current width of the pager, in the units of `sample`.
    pub fn touch_start(&mut self, sample: &PointerSample, view_extent: f64) -> bool {
        if !self.accepts_gestures() {
            return false;
        }
        self.gestures
            .start(sample, self.reconciler.index_current(), view_extent)
    }

    /// Returns the outcome; the host calls `preventDefault` when
    /// [`MoveOutcome::prevents_default`] is true.
    pub fn touch_move(&mut self, sample: &PointerSample) -> MoveOutcome {
        if !self.accepts_gestures() {
            return MoveOutcome::Discarded;
        }
        let bounds = DragBounds {
            index_max: self.reconciler.index_max() as f64,
            resistance: self.config.resistance,
        };
        let outcome = self
            .gestures
            .update(sample, self.reconciler.index_current(), bounds);
        if let MoveOutcome::Dragged(index) = outcome {
            self.reconciler.drag_to(index, &mut self.listener);
            self.transitions.retarget_index(index, true);
        }
        outcome
    }

    /// Returns the settled panel when the release committed.
    pub fn touch_end(&mut self) -> Option<usize> {
        if !self.accepts_gestures() {
            return None;
        }
        let candidate = self.gestures.end(
            self.reconciler.index_current(),
            self.config.threshold,
            self.reconciler.index_max(),
        )?;
        let index = self.reconciler.settle(candidate as f64, &mut self.listener);
        self.transitions.retarget_index(index as f64, false);
        self.transitions
            .retarget_height(self.reconciler.height_latest(), false);
        Some(index)
    }

    pub fn is_materialized(&self, panel: usize) -> bool {
        self.reconciler.is_materialized(panel)
    }

    /// Called by the host once the first paint is on screen.
    pub fn mark_mounted(&mut self) {
        self.reconciler.mark_mounted();
    }

    /// Measures the settled panel and retargets the height channel on change.
    pub fn sync_height<P: HeightProbe + ?Sized>(&mut self, probe: &P) -> Option<f64> {
        let height = self.reconciler.sync_height(probe)?;
        self.transitions
            .retarget_height(height, self.gestures.is_dragging());
        Some(height)
    }

    /// One display frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> RenderState {
        self.transitions.advance(dt)
    }

    pub fn render(&self) -> RenderState {
        self.transitions.render()
    }

    /// Invalidates the pager. Every later event is ignored.
    pub fn teardown(&mut self) {
        self.gestures.abort();
        self.torn_down = true;
    }
}
