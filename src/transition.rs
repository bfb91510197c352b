//! Frame-driven transitions toward the settled translation and height.
//!
//! The engine never schedules frames itself: the host calls
//! [`Transitions::advance`] once per displayed frame and renders the returned
//! [`RenderState`]. Any [`Transition`] can stand in for the default spring.

use serde::Serialize;

pub const SPRING_STIFFNESS: f64 = 300.0;
pub const SPRING_DAMPING: f64 = 30.0;
/// Displacement and speed below which a spring counts as settled.
pub const SETTLE_PRECISION: f64 = 0.01;

/// Integration step; longer frames are split so the spring stays stable.
const FRAME_STEP: f64 = 1.0 / 60.0;
/// Upper bound on sub-steps per call, ten seconds of simulated motion.
const MAX_SUBSTEPS: usize = 600;

/// Outcome of advancing a transition by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub value: f64,
    pub settled: bool,
}

/// One-dimensional animation primitive.
pub trait Transition {
    /// Advance `current` toward `target` by `dt` seconds.
    fn step(&mut self, current: f64, target: f64, dt: f64) -> Step;

    /// Drop any internal motion (called when the value is set directly).
    fn reset(&mut self) {}
}

/// Damped spring with unit mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringTransition {
    stiffness: f64,
    damping: f64,
    velocity: f64,
}

impl Default for SpringTransition {
    fn default() -> Self {
        Self::new(SPRING_STIFFNESS, SPRING_DAMPING)
    }
}

impl SpringTransition {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness: stiffness.max(f64::EPSILON),
            damping: damping.max(0.0),
            velocity: 0.0,
        }
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    fn at_rest(&self, pos: f64, target: f64) -> bool {
        (pos - target).abs() < SETTLE_PRECISION && self.velocity.abs() < SETTLE_PRECISION
    }
}

impl Transition for SpringTransition {
    fn step(&mut self, current: f64, target: f64, dt: f64) -> Step {
        if !dt.is_finite() || !current.is_finite() {
            self.velocity = 0.0;
            return Step {
                value: target,
                settled: true,
            };
        }

        let mut pos = current;
        let mut elapsed = 0.0;
        let mut substeps = 0;
        while elapsed < dt && substeps < MAX_SUBSTEPS {
            let h = FRAME_STEP.min(dt - elapsed);
            let force = -self.stiffness * (pos - target) - self.damping * self.velocity;
            self.velocity += force * h;
            pos += self.velocity * h;
            elapsed += h;
            substeps += 1;
            if self.at_rest(pos, target) {
                break;
            }
        }

        if self.at_rest(pos, target) {
            self.velocity = 0.0;
            return Step {
                value: target,
                settled: true,
            };
        }
        Step {
            value: pos,
            settled: false,
        }
    }

    fn reset(&mut self) {
        self.velocity = 0.0;
    }
}

/// A displayed scalar chasing a target.
#[derive(Debug, Clone)]
pub struct TransitionChannel<T = SpringTransition> {
    value: f64,
    target: f64,
    settled: bool,
    driver: T,
}

impl<T: Transition> TransitionChannel<T> {
    pub fn new(value: f64, driver: T) -> Self {
        Self {
            value,
            target: value,
            settled: true,
            driver,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// While `dragging` the value follows the target with no smoothing.
    pub fn retarget(&mut self, target: f64, dragging: bool) {
        if dragging {
            self.snap(target);
            return;
        }
        self.target = target;
        if self.value != target {
            self.settled = false;
        }
    }

    pub fn snap(&mut self, target: f64) {
        self.target = target;
        self.value = target;
        self.settled = true;
        self.driver.reset();
    }

    pub fn advance(&mut self, dt: f64) -> f64 {
        if !self.settled {
            let step = self.driver.step(self.value, self.target, dt);
            self.value = step.value;
            self.settled = step.settled;
        }
        self.value
    }
}

/// What the host renders on a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderState {
    /// Horizontal translation of the panel strip, in percent of the view width.
    pub translate_percent: f64,
    /// Container height in pixels, `None` when height sync is off.
    pub height: Option<f64>,
    pub settled: bool,
}

/// The two independent channels the engine animates.
#[derive(Debug, Clone)]
pub struct Transitions<T = SpringTransition> {
    translate: TransitionChannel<T>,
    height: TransitionChannel<T>,
    sync_height: bool,
}

impl Transitions<SpringTransition> {
    pub fn spring(index: f64, sync_height: bool) -> Self {
        Self::with_drivers(index, sync_height, SpringTransition::default)
    }
}

impl<T: Transition> Transitions<T> {
    pub fn with_drivers(index: f64, sync_height: bool, mut make: impl FnMut() -> T) -> Self {
        Self {
            translate: TransitionChannel::new(translate_for(index), make()),
            height: TransitionChannel::new(0.0, make()),
            sync_height,
        }
    }

    /// Points the translation at `index_current`.
    pub fn retarget_index(&mut self, index_current: f64, dragging: bool) {
        self.translate.retarget(translate_for(index_current), dragging);
    }

    /// Points the height channel at `height`. A zero height is applied at once
    /// since there is nothing measured to animate from.
    pub fn retarget_height(&mut self, height: f64, dragging: bool) {
        if !self.sync_height {
            return;
        }
        if height == 0.0 {
            self.height.snap(0.0);
        } else {
            self.height.retarget(height, dragging);
        }
    }

    /// Turns the height channel on or off. When turned on it starts at `height`.
    pub fn set_height_sync(&mut self, enabled: bool, height: f64) {
        self.sync_height = enabled;
        if enabled {
            self.height.snap(height);
        }
    }

    pub fn advance(&mut self, dt: f64) -> RenderState {
        self.translate.advance(dt);
        if self.sync_height {
            self.height.advance(dt);
        }
        self.render()
    }

    pub fn render(&self) -> RenderState {
        RenderState {
            translate_percent: self.translate.value(),
            height: self.sync_height.then(|| self.height.value()),
            settled: self.is_settled(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.translate.is_settled() && (!self.sync_height || self.height.is_settled())
    }

    pub fn translate(&self) -> &TransitionChannel<T> {
        &self.translate
    }

    pub fn height(&self) -> Option<&TransitionChannel<T>> {
        self.sync_height.then_some(&self.height)
    }
}

/// Translation (in percent) that shows panel `index`.
pub fn translate_for(index: f64) -> f64 {
    -index * 100.0
}
