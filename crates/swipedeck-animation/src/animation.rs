//! Frame-driven animations with easing curves and spring physics.

use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_core::{FrameCallbackRegistration, FrameClock, MutableState, RuntimeHandle, State};

/// Integration step for spring physics, in seconds.
const SPRING_STEP_SECONDS: f32 = 0.004;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Trait for values that can participate in spring animations.
///
/// Spring physics runs in `f32` space; implementors convert in and out.
pub trait SpringScalar: Lerp + Clone + PartialEq {
    fn to_f32(&self) -> f32;

    fn from_f32(value: f32) -> Self;
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }

    fn from_f32(value: f32) -> Self {
        value
    }
}

impl SpringScalar for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }

    fn from_f32(value: f32) -> Self {
        value as f64
    }
}

/// Easing curves applied to a tween's linear progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    /// Decelerating curve; card exits use this.
    EaseOut,
    EaseInOut,
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinearIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric `t` matching the x fraction.
    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Tween specification: duration, easing and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Total running time including the delay.
    pub fn total_nanos(&self) -> u64 {
        (self.duration_millis + self.delay_millis) * 1_000_000
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Damped spring configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = over-damped.
    pub damping_ratio: f32,
    pub stiffness: f32,
    pub mass: f32,
    /// Speed (units/s) below which the spring may settle.
    pub velocity_threshold: f32,
    /// Distance from target below which the spring may settle.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            mass: 1.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }

    /// Builds a spring from a raw damping coefficient, stiffness and mass,
    /// with settle thresholds suited to pixel offsets.
    pub fn physical(damping: f32, stiffness: f32, mass: f32) -> Self {
        let critical = 2.0 * (stiffness * mass).max(f32::EPSILON).sqrt();
        Self {
            damping_ratio: damping / critical,
            stiffness,
            mass,
            velocity_threshold: 0.1,
            position_threshold: 0.01,
        }
    }

    pub fn with_thresholds(mut self, velocity_threshold: f32, position_threshold: f32) -> Self {
        self.velocity_threshold = velocity_threshold;
        self.position_threshold = position_threshold;
        self
    }

    /// Damping coefficient `c` in `m·x'' + c·x' + k·x = 0`.
    pub fn damping_coefficient(&self) -> f32 {
        2.0 * self.damping_ratio * (self.stiffness * self.mass).max(0.0).sqrt()
    }

    /// Advances `(position, velocity)` towards `target` by `dt` seconds.
    pub fn step(&self, position: f32, velocity: f32, target: f32, dt: f32) -> (f32, f32) {
        let mass = self.mass.max(f32::EPSILON);
        let damping = self.damping_coefficient();
        let mut position = position;
        let mut velocity = velocity;
        let mut remaining = dt;
        // Semi-implicit Euler in small fixed steps for stability.
        while remaining > 0.0 {
            let step = remaining.min(SPRING_STEP_SECONDS);
            let force = -self.stiffness * (position - target) - damping * velocity;
            velocity += force / mass * step;
            position += velocity * step;
            remaining -= step;
        }
        (position, velocity)
    }

    pub fn is_settled(&self, position: f32, velocity: f32, target: f32) -> bool {
        velocity.abs() < self.velocity_threshold
            && (position - target).abs() < self.position_threshold
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// How an animation with an end callback stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// Reached its target.
    Finished,
    /// Replaced by another animation, a snap or an explicit stop.
    Interrupted,
}

type EndCallback = Box<dyn FnOnce(AnimationEnd)>;

/// A value animated by the runtime's frame clock.
///
/// Clones share the same underlying animation.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    state: MutableState<T>,
    clock: FrameClock,
    current: T,
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    running: bool,
    on_end: Option<EndCallback>,
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            state: MutableState::new(initial.clone()),
            clock: runtime.frame_clock(),
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            registration: None,
            running: false,
            on_end: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate from the current value to `target`.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.start_animation(target, animation, None, None);
    }

    /// Animate to `target`, seeding springs with `initial_velocity` (units/s)
    /// and running `on_end` exactly once when the animation stops.
    pub fn animate_to_then(
        &self,
        target: T,
        animation: AnimationType,
        initial_velocity: f32,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.start_animation(
            target,
            animation,
            Some(initial_velocity),
            Some(Box::new(on_end)),
        );
    }

    fn start_animation(
        &self,
        target: T,
        animation: AnimationType,
        initial_velocity: Option<f32>,
        on_end: Option<EndCallback>,
    ) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            let interrupted = inner.on_end.take();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            if let Some(velocity) = initial_velocity {
                inner.velocity = velocity;
            }
            inner.running = true;
            inner.on_end = on_end;
            interrupted
        };
        Self::schedule_frame(&self.inner);
        if let Some(callback) = interrupted {
            callback(AnimationEnd::Interrupted);
        }
    }

    /// Jump to `target` immediately, interrupting any running animation.
    pub fn snap_to(&self, target: T) {
        let (state, interrupted) = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target.clone();
            inner.velocity = 0.0;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.running = false;
            (inner.state.clone(), inner.on_end.take())
        };
        state.set_value(target);
        if let Some(callback) = interrupted {
            callback(AnimationEnd::Interrupted);
        }
    }

    /// Freeze at the current value.
    pub fn stop(&self) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.target = inner.current.clone();
            inner.start = inner.current.clone();
            inner.velocity = 0.0;
            inner.running = false;
            inner.on_end.take()
        };
        if let Some(callback) = interrupted {
            callback(AnimationEnd::Interrupted);
        }
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    pub fn state(&self) -> State<T> {
        self.inner.borrow().state.as_state()
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() || !inner.running {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::warn!("animation scheduled on a runtime that no longer exists");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let (state, value, finished) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if !inner.running {
                return;
            }

            let finished = match inner.animation_type {
                AnimationType::Tween(spec) => {
                    let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
                    let delay_nanos = spec.delay_millis * 1_000_000;

                    if elapsed_nanos < delay_nanos {
                        false
                    } else {
                        let animation_elapsed = elapsed_nanos - delay_nanos;
                        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                        let linear_progress =
                            (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0);
                        let progress = spec.easing.transform(linear_progress);
                        let new_value = inner.start.lerp(&inner.target, progress);
                        inner.current = new_value;
                        linear_progress >= 1.0
                    }
                }
                AnimationType::Spring(spec) => {
                    let last = inner.last_frame_nanos.unwrap_or(frame_time_nanos);
                    let dt = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0;
                    let target = inner.target.to_f32();
                    let (position, velocity) =
                        spec.step(inner.current.to_f32(), inner.velocity, target, dt);
                    inner.current = T::from_f32(position);
                    inner.velocity = velocity;
                    spec.is_settled(position, velocity, target)
                }
            };
            inner.last_frame_nanos = Some(frame_time_nanos);

            if finished {
                inner.current = inner.target.clone();
                inner.start = inner.target.clone();
                inner.velocity = 0.0;
                inner.start_time_nanos = None;
                inner.last_frame_nanos = None;
                inner.running = false;
            }
            (inner.state.clone(), inner.current.clone(), finished)
        };

        state.set_value(value);

        if finished {
            let callback = this.borrow_mut().on_end.take();
            if let Some(callback) = callback {
                callback(AnimationEnd::Finished);
            }
        } else {
            Self::schedule_frame(this);
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
