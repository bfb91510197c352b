//! Pager front-end for platforms that page inside a native scroll container.
//!
//! No drag math happens here: the platform reports offsets or page positions
//! and this adapter turns them into the same switching/settle notifications
//! the touch pager produces, through the shared [`IndexReconciler`].

use log::{debug, warn};

use crate::config::{NativeIdiom, PagerConfig};
use crate::dispatch::Listener;
use crate::input::{NativeEvent, SwitchPhase};
use crate::reconcile::IndexReconciler;

#[derive(Debug)]
pub struct NativePager<L> {
    idiom: NativeIdiom,
    view_extent: f64,
    /// Whether the scroll container may over-scroll at its edges.
    bounces: bool,
    /// Content offset the host should apply to its scroll container.
    offset: f64,
    disabled: bool,
    reconciler: IndexReconciler,
    listener: L,
    torn_down: bool,
}

impl<L: Listener> NativePager<L> {
    pub fn new(config: &PagerConfig, panel_count: usize, listener: L) -> Self {
        // the native container sizes itself, height is never animated here
        let reconciler = IndexReconciler::new(config.index, panel_count, false);
        let view_extent = config.native.view_extent;
        Self {
            idiom: config.native.idiom,
            view_extent,
            bounces: config.resistance,
            offset: view_extent * reconciler.index_latest() as f64,
            disabled: config.disabled,
            reconciler,
            listener,
            torn_down: false,
        }
    }

    pub fn idiom(&self) -> NativeIdiom {
        self.idiom
    }

    pub fn view_extent(&self) -> f64 {
        self.view_extent
    }

    /// Edge over-scroll for the host's scroller, taken from `resistance`.
    pub fn bounces(&self) -> bool {
        self.bounces
    }

    /// Offset the scroll container should show, for the offset idiom. The
    /// page-selected idiom positions itself from [`Self::index_latest`].
    pub fn content_offset(&self) -> Option<f64> {
        match self.idiom {
            NativeIdiom::Offset => Some(self.offset),
            NativeIdiom::PageSelected => None,
        }
    }

    pub fn index_latest(&self) -> usize {
        self.reconciler.index_latest()
    }

    pub fn panel_count(&self) -> usize {
        self.reconciler.panel_count()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    fn has_extent(&self) -> bool {
        self.view_extent.is_finite() && self.view_extent > 0.0
    }

    pub fn handle(&mut self, event: NativeEvent) {
        if self.torn_down {
            return;
        }
        if let NativeEvent::Layout { width } = event {
            self.layout(width);
            return;
        }
        if self.disabled {
            return;
        }

        match (self.idiom, event) {
            (NativeIdiom::Offset, NativeEvent::Scroll { offset }) => {
                if let Some(index) = self.index_for_offset(offset) {
                    self.listener.on_switching(index, SwitchPhase::Move);
                }
            }
            (NativeIdiom::Offset, NativeEvent::MomentumScrollEnd { offset }) => {
                if let Some(index) = self.index_for_offset(offset) {
                    let settled = self.reconciler.settle(index, &mut self.listener);
                    self.offset = settled as f64 * self.view_extent;
                }
            }
            (NativeIdiom::PageSelected, NativeEvent::PageScroll { position, offset }) => {
                let index = position + offset;
                if index.is_finite() {
                    self.listener.on_switching(index, SwitchPhase::Move);
                } else {
                    warn!("page scroll ignored: position={position} offset={offset}");
                }
            }
            (NativeIdiom::PageSelected, NativeEvent::PageSelected { position }) => {
                if position.is_finite() {
                    self.reconciler.settle(position, &mut self.listener);
                } else {
                    warn!("page selection ignored: position={position}");
                }
            }
            (idiom, other) => {
                debug!("ignoring {other:?} under the {idiom:?} idiom");
            }
        }
    }

    fn index_for_offset(&self, offset: f64) -> Option<f64> {
        if !offset.is_finite() {
            warn!("native offset ignored: {offset}");
            return None;
        }
        if !self.has_extent() {
            debug!("native offset {offset} before layout; ignored");
            return None;
        }
        Some(offset / self.view_extent)
    }

    /// The container was resized. The settled panel keeps its position.
    fn layout(&mut self, width: f64) {
        if !width.is_finite() || width <= 0.0 {
            return;
        }
        self.view_extent = width;
        self.offset = self.reconciler.index_latest() as f64 * width;
        debug!("native layout: extent={width} offset={}", self.offset);
    }

    /// Applies a new set of props. A changed `index` moves the container.
    pub fn set_props(&mut self, config: &PagerConfig) {
        if self.torn_down {
            return;
        }
        if self.reconciler.set_controlled_index(config.index) {
            self.offset = self.view_extent * self.reconciler.index_latest() as f64;
        }
        self.disabled = config.disabled;
        self.bounces = config.resistance;
    }

    pub fn set_panel_count(&mut self, panel_count: usize) {
        self.reconciler.set_panel_count(panel_count);
        self.reconciler.restore_controlled();
        self.offset = self.view_extent * self.reconciler.index_latest() as f64;
    }

    /// While disabled only the settled panel is rendered, which pins the pager.
    pub fn is_materialized(&self, panel: usize) -> bool {
        panel < self.reconciler.panel_count()
            && (!self.disabled || panel == self.reconciler.index_latest())
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Notification;

    fn offset_pager(extent: f64) -> NativePager<Vec<Notification>> {
        let mut config = PagerConfig::default();
        config.native.view_extent = extent;
        NativePager::new(&config, 4, Vec::new())
    }

    fn page_pager() -> NativePager<Vec<Notification>> {
        let mut config = PagerConfig::default();
        config.native.idiom = NativeIdiom::PageSelected;
        NativePager::new(&config, 4, Vec::new())
    }

    #[test]
    fn scroll_reports_fractional_move() {
        let mut p = offset_pager(400.0);
        p.handle(NativeEvent::Scroll { offset: 500.0 });
        assert_eq!(
            p.listener().as_slice(),
            &[Notification::Switching {
                index: 1.25,
                phase: SwitchPhase::Move
            }]
        );
    }

    #[test]
    fn momentum_end_settles_and_changes() {
        let mut p = offset_pager(400.0);
        p.handle(NativeEvent::MomentumScrollEnd { offset: 800.0 });
        assert_eq!(p.index_latest(), 2);
        assert_eq!(p.content_offset(), Some(800.0));
        assert_eq!(
            p.listener().as_slice(),
            &[
                Notification::Switching {
                    index: 2.0,
                    phase: SwitchPhase::End
                },
                Notification::ChangeIndex { index: 2, from: 0 },
            ]
        );

        // same page again: end only
        p.handle(NativeEvent::MomentumScrollEnd { offset: 800.0 });
        assert_eq!(p.listener().len(), 3);
    }

    #[test]
    fn offsets_before_layout_are_ignored() {
        let mut p = offset_pager(0.0);
        p.handle(NativeEvent::Scroll { offset: 120.0 });
        p.handle(NativeEvent::MomentumScrollEnd { offset: 120.0 });
        assert!(p.listener().is_empty());

        p.handle(NativeEvent::Layout { width: 120.0 });
        p.handle(NativeEvent::MomentumScrollEnd { offset: 120.0 });
        assert_eq!(p.index_latest(), 1);
    }

    #[test]
    fn layout_rederives_offset() {
        let mut p = offset_pager(400.0);
        p.handle(NativeEvent::MomentumScrollEnd { offset: 1200.0 });
        p.handle(NativeEvent::Layout { width: 700.0 });
        assert_eq!(p.view_extent(), 700.0);
        assert_eq!(p.content_offset(), Some(2100.0));
        // zero width is not a layout
        p.handle(NativeEvent::Layout { width: 0.0 });
        assert_eq!(p.view_extent(), 700.0);
    }

    #[test]
    fn page_selected_idiom() {
        let mut p = page_pager();
        p.handle(NativeEvent::PageScroll {
            position: 0.0,
            offset: 0.4,
        });
        p.handle(NativeEvent::PageSelected { position: 1.0 });
        assert_eq!(p.index_latest(), 1);
        assert_eq!(p.content_offset(), None);
        assert_eq!(
            p.listener().as_slice(),
            &[
                Notification::Switching {
                    index: 0.4,
                    phase: SwitchPhase::Move
                },
                Notification::Switching {
                    index: 1.0,
                    phase: SwitchPhase::End
                },
                Notification::ChangeIndex { index: 1, from: 0 },
            ]
        );
    }

    #[test]
    fn other_idiom_signals_are_ignored() {
        let mut p = page_pager();
        p.handle(NativeEvent::MomentumScrollEnd { offset: 400.0 });
        p.handle(NativeEvent::Scroll { offset: 400.0 });
        assert!(p.listener().is_empty());

        let mut o = offset_pager(400.0);
        o.handle(NativeEvent::PageSelected { position: 3.0 });
        assert!(o.listener().is_empty());
        assert_eq!(o.index_latest(), 0);
    }

    #[test]
    fn out_of_range_selection_is_clamped() {
        let mut p = page_pager();
        p.handle(NativeEvent::PageSelected { position: 9.0 });
        assert_eq!(p.index_latest(), 3);
    }

    #[test]
    fn controlled_index_moves_offset_silently() {
        let mut p = offset_pager(300.0);
        let config = PagerConfig {
            index: 2,
            ..PagerConfig::default()
        };
        p.set_props(&config);
        assert_eq!(p.index_latest(), 2);
        assert_eq!(p.content_offset(), Some(600.0));
        assert!(p.listener().is_empty());
    }

    #[test]
    fn controlled_index_applies_when_panels_load() {
        let mut config = PagerConfig::default();
        config.index = 2;
        config.native.view_extent = 300.0;
        let mut p = NativePager::new(&config, 0, Vec::new());
        assert_eq!(p.content_offset(), Some(0.0));

        p.set_panel_count(4);
        assert_eq!(p.index_latest(), 2);
        assert_eq!(p.content_offset(), Some(600.0));
        assert!(p.listener().is_empty());
    }

    #[test]
    fn bounces_follow_resistance() {
        let mut p = offset_pager(300.0);
        assert!(!p.bounces());
        let config = PagerConfig {
            resistance: true,
            ..PagerConfig::default()
        };
        p.set_props(&config);
        assert!(p.bounces());
    }

    #[test]
    fn disabled_renders_only_settled_panel() {
        let mut config = PagerConfig::default();
        config.disabled = true;
        config.index = 1;
        config.native.view_extent = 300.0;
        let mut p = NativePager::new(&config, 3, Vec::new());
        assert!(p.is_materialized(1));
        assert!(!p.is_materialized(0));
        p.handle(NativeEvent::MomentumScrollEnd { offset: 0.0 });
        assert!(p.listener().is_empty());
    }

    #[test]
    fn teardown_drops_signals() {
        let mut p = offset_pager(300.0);
        p.teardown();
        p.handle(NativeEvent::MomentumScrollEnd { offset: 600.0 });
        assert_eq!(p.index_latest(), 0);
        assert!(p.listener().is_empty());
    }
}
