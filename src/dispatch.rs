//! Delivery of switching / change-index notifications to the host.

use crate::input::{Notification, SwitchPhase};

/// Receiver for the two paging callbacks. Both default to no-ops so hosts
/// only implement what they observe.
pub trait Listener {
    fn on_switching(&mut self, _index: f64, _phase: SwitchPhase) {}

    fn on_change_index(&mut self, _index: usize, _from: usize) {}
}

impl Listener for () {}

/// Records every notification in order.
impl Listener for Vec<Notification> {
    fn on_switching(&mut self, index: f64, phase: SwitchPhase) {
        self.push(Notification::Switching { index, phase });
    }

    fn on_change_index(&mut self, index: usize, from: usize) {
        self.push(Notification::ChangeIndex { index, from });
    }
}

impl<L: Listener + ?Sized> Listener for &mut L {
    fn on_switching(&mut self, index: f64, phase: SwitchPhase) {
        (**self).on_switching(index, phase);
    }

    fn on_change_index(&mut self, index: usize, from: usize) {
        (**self).on_change_index(index, from);
    }
}

type SwitchingFn = Box<dyn FnMut(f64, SwitchPhase)>;
type ChangeIndexFn = Box<dyn FnMut(usize, usize)>;

/// Closure-backed listener, the shape hosts usually wire up.
#[derive(Default)]
pub struct Callbacks {
    on_switching: Option<SwitchingFn>,
    on_change_index: Option<ChangeIndexFn>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_switching(mut self, f: impl FnMut(f64, SwitchPhase) + 'static) -> Self {
        self.on_switching = Some(Box::new(f));
        self
    }

    pub fn with_change_index(mut self, f: impl FnMut(usize, usize) + 'static) -> Self {
        self.on_change_index = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_switching", &self.on_switching.is_some())
            .field("on_change_index", &self.on_change_index.is_some())
            .finish()
    }
}

impl Listener for Callbacks {
    fn on_switching(&mut self, index: f64, phase: SwitchPhase) {
        if let Some(f) = self.on_switching.as_mut() {
            f(index, phase);
        }
    }

    fn on_change_index(&mut self, index: usize, from: usize) {
        if let Some(f) = self.on_change_index.as_mut() {
            f(index, from);
        }
    }
}

/// Replays a recorded notification into any listener.
pub fn dispatch(n: &Notification, listener: &mut impl Listener) {
    match *n {
        Notification::Switching { index, phase } => listener.on_switching(index, phase),
        Notification::ChangeIndex { index, from } => listener.on_change_index(index, from),
    }
}
