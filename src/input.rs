//! Event vocabulary shared by both front-ends and the replay format.

use serde::{Deserialize, Serialize};

/// A single pointer position as delivered by the host's touch dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    /// An ancestor already claimed this event (e.g. a nested scroller).
    #[serde(default)]
    pub default_prevented: bool,
}

impl PointerSample {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            default_prevented: false,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Raw touch-driven gesture events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    Start {
        sample: PointerSample,
        /// Width of the paging viewport, in the same units as `x`.
        view_extent: f64,
    },
    Move { sample: PointerSample },
    End,
}

/// Signals from a platform that pages inside a native scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NativeEvent {
    /// Continuous content offset while the user scrolls.
    Scroll { offset: f64 },
    /// The momentum animation finished at `offset`.
    MomentumScrollEnd { offset: f64 },
    /// Page-selected idiom: continuous progress between `position` and the next page.
    PageScroll { position: f64, offset: f64 },
    /// Page-selected idiom: the pager settled on `position`.
    PageSelected { position: f64 },
    /// The container was laid out with a new width.
    Layout { width: f64 },
}

/// Second argument of the switching notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchPhase {
    Move,
    End,
}

/// What the engine reports to its host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Switching { index: f64, phase: SwitchPhase },
    ChangeIndex { index: usize, from: usize },
}
