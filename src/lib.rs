//! Gesture-driven paging engine.
//!
//! Turns touch samples (or native scroll-container signals) into a current
//! panel index, fractional positions during a drag, a settle decision on
//! release, and per-frame translation/height targets for the host to render.
//!
//! ```
//! use swipeviews::{PagerConfig, PointerSample, SwipeableViews};
//!
//! let mut pager = SwipeableViews::new(PagerConfig::default(), 3, Vec::new());
//! pager.touch_start(&PointerSample::new(300.0, 0.0), 300.0);
//! pager.touch_move(&PointerSample::new(290.0, 0.0));
//! pager.touch_move(&PointerSample::new(200.0, 0.0));
//! assert_eq!(pager.touch_end(), Some(1));
//! ```

pub mod config;
pub mod dispatch;
pub mod gestures;
pub mod input;
pub mod native;
pub mod pager;
pub mod reconcile;
pub mod replay;
pub mod resistance;
pub mod tracker;
pub mod transition;

pub use config::{ConfigError, ContainerSize, NativeConfig, NativeIdiom, PagerConfig};
pub use dispatch::{Callbacks, Listener};
pub use gestures::{GesturePhase, MoveOutcome, commit_index};
pub use input::{GestureEvent, NativeEvent, Notification, PointerSample, SwitchPhase};
pub use native::NativePager;
pub use pager::SwipeableViews;
pub use reconcile::{HeightProbe, IndexReconciler};
pub use resistance::resist;
pub use transition::{RenderState, SpringTransition, Step, Transition};
