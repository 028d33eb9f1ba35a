//! Top-card state machine.
//!
//! ```text
//!            drag start             release, commit
//!   Idle ─────────────────> Dragging ───────────────> Committing(dir)
//!    ^  ^                     │  ^                          │
//!    │  │ springs settled     │  │ drag start               │ exit finished
//!    │  └── SnappingBack <────┘  │                          │
//!    │      release, cancel ─────┘                          │
//!    └──────────────────────────────────────────────────────┘
//! ```
//!
//! Imperative commits enter `Committing` from any phase except
//! `Committing` itself.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use swipedeck_animation::{Animatable, AnimationEnd, AnimationType};
use swipedeck_core::{MutableState, RuntimeHandle, State};
use swipedeck_ui_graphics::{Point, Size};

use super::decision::{decide, SwipeDecision, SwipeDirection, SwipeThresholds};
use crate::config::SwipeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    Dragging,
    Committing(SwipeDirection),
    SnappingBack,
}

impl SwipePhase {
    pub fn is_committing(&self) -> bool {
        matches!(self, SwipePhase::Committing(_))
    }
}

type CommitHandler = Rc<dyn Fn(SwipeDirection)>;

struct EngineInner {
    config: Cell<SwipeConfig>,
    viewport: Cell<Size>,
    translate_x: Animatable<f32>,
    translate_y: Animatable<f32>,
    /// Authoritative phase; `phase_state` mirrors it for observers.
    phase: Cell<SwipePhase>,
    phase_state: MutableState<SwipePhase>,
    /// Card offset when the current drag started.
    drag_origin: Cell<Point>,
    last_velocity: Cell<Point>,
    springs_running: Cell<u8>,
    commits: Cell<u64>,
    on_commit: RefCell<Option<CommitHandler>>,
}

/// Owns the top card's offset and decides what a release means.
///
/// Clones share the same engine.
#[derive(Clone)]
pub struct SwipeEngine {
    inner: Rc<EngineInner>,
}

impl SwipeEngine {
    pub fn new(runtime: RuntimeHandle, viewport: Size, config: SwipeConfig) -> Self {
        Self {
            inner: Rc::new(EngineInner {
                config: Cell::new(config),
                viewport: Cell::new(viewport),
                translate_x: Animatable::new(0.0, runtime.clone()),
                translate_y: Animatable::new(0.0, runtime),
                phase: Cell::new(SwipePhase::Idle),
                phase_state: MutableState::new(SwipePhase::Idle),
                drag_origin: Cell::new(Point::ZERO),
                last_velocity: Cell::new(Point::ZERO),
                springs_running: Cell::new(0),
                commits: Cell::new(0),
                on_commit: RefCell::new(None),
            }),
        }
    }

    /// Runs after every finished commit, once the offset is back at zero.
    pub fn set_on_commit(&self, handler: impl Fn(SwipeDirection) + 'static) {
        *self.inner.on_commit.borrow_mut() = Some(Rc::new(handler));
    }

    pub fn config(&self) -> SwipeConfig {
        self.inner.config.get()
    }

    pub fn set_config(&self, config: SwipeConfig) {
        self.inner.config.set(config);
    }

    pub fn viewport(&self) -> Size {
        self.inner.viewport.get()
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.inner.viewport.set(viewport);
    }

    pub fn phase(&self) -> SwipePhase {
        self.inner.phase.get()
    }

    pub fn phase_state(&self) -> State<SwipePhase> {
        self.inner.phase_state.as_state()
    }

    pub fn translation(&self) -> Point {
        Point::new(
            self.inner.translate_x.value(),
            self.inner.translate_y.value(),
        )
    }

    pub fn translate_x_state(&self) -> State<f32> {
        self.inner.translate_x.state()
    }

    pub fn translate_y_state(&self) -> State<f32> {
        self.inner.translate_y.state()
    }

    /// Velocity seen at the most recent release.
    pub fn last_release_velocity(&self) -> Point {
        self.inner.last_velocity.get()
    }

    /// Number of commits that ran to completion.
    pub fn commits_finished(&self) -> u64 {
        self.inner.commits.get()
    }

    pub fn thresholds(&self) -> SwipeThresholds {
        SwipeThresholds::from_config(&self.inner.config.get(), self.inner.viewport.get())
    }

    pub fn is_animating(&self) -> bool {
        self.inner.translate_x.is_running() || self.inner.translate_y.is_running()
    }

    pub fn on_drag_start(&self) {
        match self.phase() {
            SwipePhase::Committing(direction) => {
                log::debug!("drag ignored while committing {:?}", direction);
            }
            SwipePhase::Dragging => {}
            SwipePhase::Idle | SwipePhase::SnappingBack => {
                // Grabbing a card mid snap-back continues from where it is.
                self.inner.springs_running.set(0);
                self.inner.translate_x.stop();
                self.inner.translate_y.stop();
                self.inner.drag_origin.set(self.translation());
                self.set_phase(SwipePhase::Dragging);
            }
        }
    }

    /// `translation` is cumulative since the drag started.
    pub fn on_drag_update(&self, translation: Point) {
        if self.phase() != SwipePhase::Dragging {
            return;
        }
        let offset = self.inner.drag_origin.get() + translation;
        log::trace!("drag offset {:?}", offset);
        self.inner.translate_x.snap_to(offset.x);
        self.inner.translate_y.snap_to(offset.y);
    }

    /// Applies the final sample and runs the decision rule.
    pub fn on_drag_end(&self, translation: Point, velocity: Point) -> Option<SwipeDecision> {
        if self.phase() != SwipePhase::Dragging {
            return None;
        }
        self.on_drag_update(translation);
        self.inner.last_velocity.set(velocity);
        let decision = decide(self.translation(), velocity, self.thresholds());
        log::debug!(
            "release at {:?} with velocity {:?}: {:?}",
            self.translation(),
            velocity,
            decision
        );
        match decision {
            SwipeDecision::Commit(direction) => {
                self.start_commit(direction);
            }
            SwipeDecision::Cancel => self.snap_back(velocity),
        }
        Some(decision)
    }

    /// The platform took the gesture away; return the card to center.
    pub fn on_drag_cancel(&self) {
        if self.phase() == SwipePhase::Dragging {
            self.snap_back(Point::ZERO);
        }
    }

    /// Commits in `direction` without a gesture.
    ///
    /// Returns `false` when a commit is already in flight.
    pub fn commit(&self, direction: SwipeDirection) -> bool {
        self.start_commit(direction)
    }

    /// Drops any in-flight animation and recenters without firing callbacks.
    pub fn reset(&self) {
        self.inner.springs_running.set(0);
        self.inner.translate_x.snap_to(0.0);
        self.inner.translate_y.snap_to(0.0);
        self.set_phase(SwipePhase::Idle);
    }

    fn set_phase(&self, phase: SwipePhase) {
        let previous = self.inner.phase.replace(phase);
        if previous != phase {
            log::debug!("swipe phase {:?} -> {:?}", previous, phase);
        }
        self.inner.phase_state.set_value(phase);
    }

    fn start_commit(&self, direction: SwipeDirection) -> bool {
        if let SwipePhase::Committing(current) = self.phase() {
            log::debug!(
                "dropping {:?} swipe; {:?} commit already in flight",
                direction,
                current
            );
            return false;
        }

        self.inner.springs_running.set(0);
        self.inner.translate_x.stop();
        self.inner.translate_y.stop();
        self.set_phase(SwipePhase::Committing(direction));

        let config = self.inner.config.get();
        let target = direction.exit_target(self.inner.viewport.get(), &config);
        let (primary, primary_target, orthogonal) = if direction.is_horizontal() {
            (&self.inner.translate_x, target.x, &self.inner.translate_y)
        } else {
            (&self.inner.translate_y, target.y, &self.inner.translate_x)
        };

        if orthogonal.value() != 0.0 {
            orthogonal.animate_to(0.0, AnimationType::Tween(config.orthogonal_animation));
        }

        let weak = Rc::downgrade(&self.inner);
        primary.animate_to_then(
            primary_target,
            AnimationType::Tween(config.exit_animation),
            0.0,
            move |end| {
                if end != AnimationEnd::Finished {
                    return;
                }
                if let Some(inner) = weak.upgrade() {
                    SwipeEngine { inner }.finish_commit(direction);
                }
            },
        );
        true
    }

    fn finish_commit(&self, direction: SwipeDirection) {
        if self.phase() != SwipePhase::Committing(direction) {
            return;
        }
        self.inner.translate_x.snap_to(0.0);
        self.inner.translate_y.snap_to(0.0);
        self.inner.commits.set(self.inner.commits.get() + 1);
        // Clear the guard before the owner runs so it may start the next
        // commit from inside its callback.
        self.set_phase(SwipePhase::Idle);

        let handler = self.inner.on_commit.borrow().clone();
        if let Some(handler) = handler {
            handler(direction);
        }
    }

    fn snap_back(&self, velocity: Point) {
        self.set_phase(SwipePhase::SnappingBack);
        let spring = AnimationType::Spring(self.inner.config.get().snap_spring);
        self.inner.springs_running.set(2);
        for (animatable, axis_velocity) in [
            (&self.inner.translate_x, velocity.x),
            (&self.inner.translate_y, velocity.y),
        ] {
            let weak: Weak<EngineInner> = Rc::downgrade(&self.inner);
            animatable.animate_to_then(0.0, spring, axis_velocity, move |end| {
                if end != AnimationEnd::Finished {
                    return;
                }
                if let Some(inner) = weak.upgrade() {
                    SwipeEngine { inner }.spring_settled();
                }
            });
        }
    }

    fn spring_settled(&self) {
        let remaining = self.inner.springs_running.get().saturating_sub(1);
        self.inner.springs_running.set(remaining);
        if remaining == 0 && self.phase() == SwipePhase::SnappingBack {
            self.set_phase(SwipePhase::Idle);
        }
    }
}

#[cfg(test)]
#[path = "../tests/engine_tests.rs"]
mod tests;
