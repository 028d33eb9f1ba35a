//! Robot testing harness for card stacks
//!
//! The robot owns a runtime with a virtual clock and a [`CardStack`]. It
//! lets a test:
//! - Press, move and release a pointer over the stack
//! - Drag and fling cards the way a finger would
//! - Advance time frame by frame or until every animation settles
//!
//! # Example
//!
//! ```
//! use swipedeck_testing::SwipeRobot;
//! use swipedeck_ui::Card;
//!
//! struct Item(u32);
//!
//! impl Card for Item {
//!     type Id = u32;
//!     fn id(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! let mut robot = SwipeRobot::new(400.0, 800.0, vec![Item(1), Item(2)]);
//! robot.drag_by(200.0, 0.0);
//! robot.wait_for_idle();
//! assert_eq!(robot.top_card_id(), Some(2));
//! ```

use swipedeck_core::Runtime;
use swipedeck_foundation::{PointerEvent, PointerEventKind};
use swipedeck_ui::{Card, CardStack, SwipeDecision, SwipeDirection, SwipeHandle, SwipePhase};
use swipedeck_ui_graphics::{Point, Size};

/// One 60 Hz frame.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

/// Frames `wait_for_idle` runs before giving up.
const MAX_IDLE_FRAMES: usize = 1_000;

const DRAG_STEPS: usize = 10;

/// About 50 ms, past the tracker's stop window.
const HOLD_FRAMES: usize = 3;

/// Programmatic control over a card stack with virtual time.
pub struct SwipeRobot<T: Card> {
    runtime: Runtime,
    stack: CardStack<T>,
    frame_time_nanos: u64,
    pointer: Option<Point>,
    last_decision: Option<SwipeDecision>,
}

impl<T: Card> SwipeRobot<T> {
    /// Launches a stack with default tuning over a `width` x `height` viewport.
    pub fn new(width: f32, height: f32, cards: Vec<T>) -> Self {
        Self::with_stack(width, height, move |stack| stack.with_cards(cards))
    }

    /// Launches a stack the caller finishes configuring.
    pub fn with_stack(
        width: f32,
        height: f32,
        configure: impl FnOnce(CardStack<T>) -> CardStack<T>,
    ) -> Self {
        let runtime = Runtime::new();
        let stack = configure(CardStack::new(runtime.handle(), Size::new(width, height)));
        Self {
            runtime,
            stack,
            frame_time_nanos: 0,
            pointer: None,
            last_decision: None,
        }
    }

    pub fn stack(&self) -> &CardStack<T> {
        &self.stack
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> SwipeHandle {
        self.stack.handle()
    }

    pub fn viewport(&self) -> Size {
        self.stack.viewport()
    }

    /// Resize the viewport (simulates a window resize).
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.stack.set_viewport(Size::new(width, height));
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    fn time_ms(&self) -> i64 {
        (self.frame_time_nanos / 1_000_000) as i64
    }

    /// Center of the viewport, where the top card sits at rest.
    pub fn center(&self) -> Point {
        let viewport = self.viewport();
        Point::new(viewport.width / 2.0, viewport.height / 2.0)
    }

    /// Advance the virtual clock by `nanos` and run one frame.
    pub fn advance_time(&mut self, nanos: u64) {
        self.frame_time_nanos += nanos;
        self.runtime.drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn pump_frame(&mut self) {
        self.advance_time(FRAME_INTERVAL_NANOS);
    }

    pub fn pump_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.pump_frame();
        }
    }

    /// Run frames until no animation is pending. Returns the frame count.
    pub fn wait_for_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            if frames == MAX_IDLE_FRAMES {
                log::warn!("stack still animating after {} frames", frames);
                break;
            }
            self.pump_frame();
            frames += 1;
        }
        frames
    }

    fn send(&mut self, kind: PointerEventKind, position: Point) -> Option<SwipeDecision> {
        let event = PointerEvent::new(kind, position, self.time_ms());
        let decision = self.stack.on_pointer_event(&event);
        if decision.is_some() {
            self.last_decision = decision;
        }
        decision
    }

    pub fn press(&mut self, x: f32, y: f32) {
        let position = Point::new(x, y);
        self.pointer = Some(position);
        self.send(PointerEventKind::Down, position);
    }

    /// Move the pressed pointer; the move lands on the next frame.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if self.pointer.is_none() {
            log::debug!("move_to without a pressed pointer");
            return;
        }
        let position = Point::new(x, y);
        self.pointer = Some(position);
        self.pump_frame();
        self.send(PointerEventKind::Move, position);
    }

    /// Release the pointer where it is. Returns the release decision if the
    /// press had turned into a drag.
    pub fn release(&mut self) -> Option<SwipeDecision> {
        let position = self.pointer.take()?;
        self.send(PointerEventKind::Up, position)
    }

    /// The platform takes the gesture away.
    pub fn cancel(&mut self) {
        if let Some(position) = self.pointer.take() {
            self.send(PointerEventKind::Cancel, position);
        }
    }

    /// Press at `from`, move to `to` in `steps` frames, then release.
    pub fn drag_with_steps(
        &mut self,
        from: Point,
        to: Point,
        steps: usize,
    ) -> Option<SwipeDecision> {
        let steps = steps.max(1);
        self.press(from.x, from.y);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            self.move_to(x, y);
        }
        // Hold still long enough for the velocity tracker to see a stop.
        self.pump_frames(HOLD_FRAMES);
        self.release()
    }

    /// Slow drag from `from` to `to`.
    pub fn drag(&mut self, from: Point, to: Point) -> Option<SwipeDecision> {
        self.drag_with_steps(from, to, DRAG_STEPS)
    }

    /// Slow drag from the center of the card by `(dx, dy)`.
    pub fn drag_by(&mut self, dx: f32, dy: f32) -> Option<SwipeDecision> {
        let from = self.center();
        self.drag(from, from + Point::new(dx, dy))
    }

    /// Quick flick by `(dx, dy)` over `frames` frames, released while moving.
    pub fn fling_by(&mut self, dx: f32, dy: f32, frames: usize) -> Option<SwipeDecision> {
        let frames = frames.max(1);
        let from = self.center();
        self.press(from.x, from.y);
        for i in 1..=frames {
            let t = i as f32 / frames as f32;
            self.move_to(from.x + dx * t, from.y + dy * t);
        }
        self.release()
    }

    /// Tap the on-screen button for `direction`.
    pub fn tap_swipe(&mut self, direction: SwipeDirection) -> bool {
        self.stack.handle().swipe(direction)
    }

    pub fn last_decision(&self) -> Option<SwipeDecision> {
        self.last_decision
    }

    pub fn top_card_id(&self) -> Option<T::Id> {
        self.stack.top_card_id()
    }

    pub fn remaining(&self) -> usize {
        self.stack.remaining()
    }

    pub fn phase(&self) -> SwipePhase {
        self.stack.phase().get()
    }

    pub fn translation(&self) -> Point {
        self.stack.translation()
    }

    pub fn is_idle(&self) -> bool {
        !self.runtime.has_frame_callbacks() && self.phase() == SwipePhase::Idle
    }
}
