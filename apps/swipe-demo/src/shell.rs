//! Frame-driving shell for the demo.
//!
//! Stands in for a windowing shell: it owns the runtime, stamps pointer input
//! with the current frame time and drains frame callbacks once per tick.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use swipedeck_core::Runtime;
use swipedeck_foundation::{PointerEvent, PointerEventKind};
use swipedeck_ui::{
    CardStack, StackConfig, SwipeConfig, SwipeDecision, SwipeDirection, SwipeHandle,
};
use swipedeck_ui_graphics::{Point, Size};
use web_time::Instant;

use crate::ledger::SwipeLedger;
use crate::listing::Listing;

pub const FRAME_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Where frame times come from.
#[derive(Debug, Clone, Copy)]
pub enum FrameSource {
    /// Real time since the shell started; each tick sleeps one frame.
    WallClock { start: Instant },
    /// Virtual time advanced by exactly one frame per tick.
    Virtual { now_nanos: u64 },
}

impl FrameSource {
    pub fn wall_clock() -> Self {
        FrameSource::WallClock {
            start: Instant::now(),
        }
    }

    pub fn virtual_clock() -> Self {
        FrameSource::Virtual { now_nanos: 0 }
    }

    fn now_nanos(&self) -> u64 {
        match self {
            FrameSource::WallClock { start } => Instant::now()
                .checked_duration_since(*start)
                .unwrap_or_default()
                .as_nanos() as u64,
            FrameSource::Virtual { now_nanos } => *now_nanos,
        }
    }

    fn tick(&mut self) {
        match self {
            FrameSource::WallClock { .. } => std::thread::sleep(FRAME_INTERVAL),
            FrameSource::Virtual { now_nanos } => *now_nanos += FRAME_INTERVAL.as_nanos() as u64,
        }
    }
}

pub struct DemoShell {
    runtime: Runtime,
    frames: FrameSource,
    stack: CardStack<Listing>,
    ledger: Rc<RefCell<SwipeLedger>>,
    pointer: Option<Point>,
    frames_run: u64,
}

impl DemoShell {
    pub fn new(viewport: Size, frames: FrameSource, listings: Vec<Listing>) -> Self {
        let runtime = Runtime::new();
        let ledger = Rc::new(RefCell::new(SwipeLedger::new()));
        // The shell owns the deck; callbacks map indices back to ids.
        let ids: Rc<[u32]> = listings.iter().map(|listing| listing.id).collect();

        let record = |direction| {
            let ledger = Rc::clone(&ledger);
            let ids = Rc::clone(&ids);
            move |index: usize| match ids.get(index) {
                Some(&id) => ledger.borrow_mut().record(direction, id),
                None => log::warn!("swipe reported unknown card index {}", index),
            }
        };

        let stack = CardStack::new(runtime.handle(), viewport)
            .with_cards(listings)
            .on_swiped_left(record(SwipeDirection::Left))
            .on_swiped_right(record(SwipeDirection::Right))
            .on_swiped_top(record(SwipeDirection::Top));

        Self {
            runtime,
            frames,
            stack,
            ledger,
            pointer: None,
            frames_run: 0,
        }
    }

    pub fn with_config(self, swipe: SwipeConfig, stack: StackConfig) -> Self {
        self.stack.engine().set_config(swipe);
        self.stack.set_stack_config(stack);
        self
    }

    pub fn stack(&self) -> &CardStack<Listing> {
        &self.stack
    }

    pub fn handle(&self) -> SwipeHandle {
        self.stack.handle()
    }

    pub fn ledger(&self) -> SwipeLedger {
        self.ledger.borrow().clone()
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn center(&self) -> Point {
        let viewport = self.stack.viewport();
        Point::new(viewport.width / 2.0, viewport.height / 2.0)
    }

    /// Waits one frame and drains the frame callbacks due by then.
    pub fn update(&mut self) {
        self.frames.tick();
        let frame_time = self.frames.now_nanos();
        self.runtime.drain_frame_callbacks(frame_time);
        self.frames_run += 1;
    }

    pub fn run_until_idle(&mut self, max_frames: usize) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() && frames < max_frames {
            self.update();
            frames += 1;
        }
        if self.runtime.has_frame_callbacks() {
            log::warn!("still animating after {} frames", frames);
        }
        frames
    }

    fn send(&mut self, kind: PointerEventKind, position: Point) -> Option<SwipeDecision> {
        let time_ms = (self.frames.now_nanos() / 1_000_000) as i64;
        self.stack
            .on_pointer_event(&PointerEvent::new(kind, position, time_ms))
    }

    pub fn press(&mut self, position: Point) {
        self.pointer = Some(position);
        self.send(PointerEventKind::Down, position);
    }

    pub fn move_to(&mut self, position: Point) {
        if self.pointer.is_none() {
            return;
        }
        self.update();
        self.pointer = Some(position);
        self.send(PointerEventKind::Move, position);
    }

    pub fn release(&mut self) -> Option<SwipeDecision> {
        let position = self.pointer.take()?;
        self.send(PointerEventKind::Up, position)
    }

    pub fn cancel(&mut self) {
        if let Some(position) = self.pointer.take() {
            self.send(PointerEventKind::Cancel, position);
        }
    }

    /// Drags the top card by `(dx, dy)` over `steps` frames. With `hold` the
    /// finger rests before lifting, so only distance counts.
    pub fn drag(&mut self, dx: f32, dy: f32, steps: usize, hold: bool) -> Option<SwipeDecision> {
        let steps = steps.max(1);
        let from = self.center();
        self.press(from);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.move_to(from + Point::new(dx * t, dy * t));
        }
        if hold {
            for _ in 0..3 {
                self.update();
            }
        }
        self.release()
    }

    /// One line per visible card, top first.
    pub fn describe(&self) -> Vec<String> {
        self.stack
            .render(|listing, index, layer| {
                format!(
                    "[{}] {} scale={:.3} dy={:.1} alpha={:.2} rot={:.1}",
                    index,
                    listing,
                    layer.layer.scale,
                    layer.layer.translation_y,
                    layer.layer.alpha,
                    layer.layer.rotation_z
                )
            })
            .into_vec()
    }
}
