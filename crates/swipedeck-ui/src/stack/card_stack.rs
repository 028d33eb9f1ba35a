//! The swipeable card stack.
//!
//! The host hands the stack its cards and callbacks, forwards pointer input
//! (or its own drag samples) and drains frames on the runtime. Each frame it
//! asks the stack to render; the stack answers with the visible cards and
//! their transforms, top card first.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use swipedeck_core::{RuntimeHandle, State};
use swipedeck_foundation::{DragEvent, DragGesture, PointerEvent};
use swipedeck_ui_graphics::{Point, Size};

use super::geometry::{stacked_card_layer, swipe_overlay, top_card_layer, CardLayer};
use crate::config::{StackConfig, SwipeConfig};
use crate::deck::{Card, Deck};
use crate::swipe::{SwipeDecision, SwipeDirection, SwipeEngine, SwipePhase};

type SwipeCallback = Box<dyn FnMut(usize)>;

/// Host callbacks, each receiving the index of the card that left.
#[derive(Default)]
pub struct SwipeCallbacks {
    pub on_swiped_left: Option<SwipeCallback>,
    pub on_swiped_right: Option<SwipeCallback>,
    pub on_swiped_top: Option<SwipeCallback>,
}

impl SwipeCallbacks {
    fn slot(&mut self, direction: SwipeDirection) -> &mut Option<SwipeCallback> {
        match direction {
            SwipeDirection::Left => &mut self.on_swiped_left,
            SwipeDirection::Right => &mut self.on_swiped_right,
            SwipeDirection::Top => &mut self.on_swiped_top,
        }
    }
}

struct StackInner<T: Card> {
    // Shared so rendering can hand cards out without holding the borrow.
    cards: RefCell<Rc<[T]>>,
    current_index: Cell<usize>,
    config: Cell<StackConfig>,
    engine: SwipeEngine,
    drag: RefCell<DragGesture>,
    callbacks: RefCell<SwipeCallbacks>,
}

impl<T: Card> StackInner<T> {
    fn remaining(&self) -> usize {
        self.cards
            .borrow()
            .len()
            .saturating_sub(self.current_index.get())
    }

    fn trigger(&self, direction: SwipeDirection) -> bool {
        if self.remaining() == 0 {
            log::debug!("{:?} swipe on an empty deck ignored", direction);
            return false;
        }
        self.engine.commit(direction)
    }

    fn finish_commit(&self, direction: SwipeDirection) {
        let index = self.current_index.get();
        self.current_index.set(index + 1);
        log::debug!("card {} swiped {:?}", index, direction);

        // The callback may re-enter the stack, so it runs outside the borrow.
        let callback = self.callbacks.borrow_mut().slot(direction).take();
        if let Some(mut callback) = callback {
            callback(index);
            let mut callbacks = self.callbacks.borrow_mut();
            let slot = callbacks.slot(direction);
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }
}

/// Internal seam so handles need not carry the card type.
trait SwipeTarget {
    fn trigger(&self, direction: SwipeDirection) -> bool;
    fn remaining(&self) -> usize;
}

impl<T: Card> SwipeTarget for StackInner<T> {
    fn trigger(&self, direction: SwipeDirection) -> bool {
        StackInner::trigger(self, direction)
    }

    fn remaining(&self) -> usize {
        StackInner::remaining(self)
    }
}

/// Imperative controller for on-screen buttons.
///
/// Holds a weak reference; once the stack is dropped every call is a no-op.
#[derive(Clone)]
pub struct SwipeHandle {
    target: Weak<dyn SwipeTarget>,
}

impl SwipeHandle {
    pub fn swipe_left(&self) -> bool {
        self.swipe(SwipeDirection::Left)
    }

    pub fn swipe_right(&self) -> bool {
        self.swipe(SwipeDirection::Right)
    }

    pub fn swipe_top(&self) -> bool {
        self.swipe(SwipeDirection::Top)
    }

    /// Starts a commit on the current top card. Returns `false` when the
    /// deck is empty, a commit is already running or the stack is gone.
    pub fn swipe(&self, direction: SwipeDirection) -> bool {
        match self.target.upgrade() {
            Some(target) => target.trigger(direction),
            None => false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.target
            .upgrade()
            .map(|target| target.remaining())
            .unwrap_or(0)
    }
}

pub struct CardStack<T: Card> {
    inner: Rc<StackInner<T>>,
}

impl<T: Card> CardStack<T> {
    pub fn new(runtime: RuntimeHandle, viewport: Size) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<StackInner<T>>| {
            let engine = SwipeEngine::new(runtime, viewport, SwipeConfig::default());
            let weak = weak.clone();
            engine.set_on_commit(move |direction| {
                if let Some(stack) = weak.upgrade() {
                    stack.finish_commit(direction);
                }
            });
            StackInner {
                cards: RefCell::new(Rc::from(Vec::<T>::new())),
                current_index: Cell::new(0),
                config: Cell::new(StackConfig::default()),
                engine,
                drag: RefCell::new(DragGesture::new()),
                callbacks: RefCell::new(SwipeCallbacks::default()),
            }
        });
        Self { inner }
    }

    pub fn with_cards(self, cards: impl Into<Vec<T>>) -> Self {
        self.set_cards(cards);
        self
    }

    pub fn with_stack_config(self, config: StackConfig) -> Self {
        self.inner.config.set(config);
        self
    }

    pub fn with_swipe_config(self, config: SwipeConfig) -> Self {
        self.inner.engine.set_config(config);
        self
    }

    pub fn with_drag_gesture(self, drag: DragGesture) -> Self {
        *self.inner.drag.borrow_mut() = drag;
        self
    }

    pub fn on_swiped_left(self, callback: impl FnMut(usize) + 'static) -> Self {
        self.inner.callbacks.borrow_mut().on_swiped_left = Some(Box::new(callback));
        self
    }

    pub fn on_swiped_right(self, callback: impl FnMut(usize) + 'static) -> Self {
        self.inner.callbacks.borrow_mut().on_swiped_right = Some(Box::new(callback));
        self
    }

    pub fn on_swiped_top(self, callback: impl FnMut(usize) + 'static) -> Self {
        self.inner.callbacks.borrow_mut().on_swiped_top = Some(Box::new(callback));
        self
    }

    pub fn set_callbacks(&self, callbacks: SwipeCallbacks) {
        *self.inner.callbacks.borrow_mut() = callbacks;
    }

    /// Replaces the cards and starts again from the first one. Any running
    /// commit or snap-back is dropped without a callback.
    pub fn set_cards(&self, cards: impl Into<Vec<T>>) {
        self.inner.engine.reset();
        self.inner.drag.borrow_mut().reset();
        let cards: Vec<T> = cards.into();
        *self.inner.cards.borrow_mut() = Rc::from(cards);
        self.inner.current_index.set(0);
    }

    pub fn set_deck(&self, deck: Deck<T>) {
        self.set_cards(deck);
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.inner.engine.set_viewport(viewport);
    }

    pub fn set_stack_config(&self, config: StackConfig) {
        self.inner.config.set(config);
    }

    pub fn stack_config(&self) -> StackConfig {
        self.inner.config.get()
    }

    pub fn swipe_config(&self) -> SwipeConfig {
        self.inner.engine.config()
    }

    pub fn viewport(&self) -> Size {
        self.inner.engine.viewport()
    }

    pub fn handle(&self) -> SwipeHandle {
        let target: Weak<StackInner<T>> = Rc::downgrade(&self.inner);
        SwipeHandle { target }
    }

    pub fn engine(&self) -> &SwipeEngine {
        &self.inner.engine
    }

    pub fn swipe_left(&self) -> bool {
        self.inner.trigger(SwipeDirection::Left)
    }

    pub fn swipe_right(&self) -> bool {
        self.inner.trigger(SwipeDirection::Right)
    }

    pub fn swipe_top(&self) -> bool {
        self.inner.trigger(SwipeDirection::Top)
    }

    /// Index of the interactive card within the cards the stack was given.
    pub fn current_index(&self) -> usize {
        self.inner.current_index.get()
    }

    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn top_card_id(&self) -> Option<T::Id> {
        self.card_id_at(0)
    }

    /// Identifier of the card `position` places below the top.
    pub fn card_id_at(&self, position: usize) -> Option<T::Id> {
        let index = self.inner.current_index.get() + position;
        self.inner.cards.borrow().get(index).map(Card::id)
    }

    /// Runs `f` on the top card. The stack may be modified from inside `f`.
    pub fn with_top_card<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let cards = self.cards();
        cards.get(self.inner.current_index.get()).map(f)
    }

    fn cards(&self) -> Rc<[T]> {
        Rc::clone(&self.inner.cards.borrow())
    }

    pub fn phase(&self) -> State<SwipePhase> {
        self.inner.engine.phase_state()
    }

    pub fn translation(&self) -> Point {
        self.inner.engine.translation()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.engine.is_animating()
    }

    /// Feeds a raw pointer event through the built-in drag recognizer.
    ///
    /// Returns the release decision when the event ended a drag.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> Option<SwipeDecision> {
        if self.is_empty() {
            return None;
        }
        let events = self.inner.drag.borrow_mut().on_pointer_event(event);
        let mut decision = None;
        for drag_event in events {
            match drag_event {
                DragEvent::Start { .. } => self.on_drag_start(),
                DragEvent::Update { translation } => self.on_drag_update(translation),
                DragEvent::End {
                    translation,
                    velocity,
                } => decision = self.on_drag_end(translation, velocity),
                DragEvent::Cancel { .. } => self.on_drag_cancel(),
            }
        }
        decision
    }

    pub fn on_drag_start(&self) {
        if self.is_empty() {
            return;
        }
        self.inner.engine.on_drag_start();
    }

    pub fn on_drag_update(&self, translation: Point) {
        if self.is_empty() {
            return;
        }
        self.inner.engine.on_drag_update(translation);
    }

    pub fn on_drag_end(&self, translation: Point, velocity: Point) -> Option<SwipeDecision> {
        if self.is_empty() {
            return None;
        }
        self.inner.engine.on_drag_end(translation, velocity)
    }

    pub fn on_drag_cancel(&self) {
        self.inner.engine.on_drag_cancel();
    }

    /// Layers for the visible cards, top card first.
    pub fn layers(&self) -> SmallVec<[CardLayer; 4]> {
        let config = self.inner.config.get();
        let swipe_config = self.inner.engine.config();
        let viewport = self.inner.engine.viewport();
        let translation = self.inner.engine.translation();
        let start = self.inner.current_index.get();
        let visible = self.remaining().min(config.stack_size);

        (0..visible)
            .map(|position| {
                let top = position == 0;
                let layer = if top {
                    top_card_layer(translation, viewport, &swipe_config)
                } else {
                    stacked_card_layer(position, translation.x, viewport, &config)
                };
                CardLayer {
                    position,
                    deck_index: start + position,
                    layer,
                    z_index: (visible - position) as i32,
                    interactive: top,
                    overlay: top.then(|| swipe_overlay(translation, viewport)),
                }
            })
            .collect()
    }

    /// Renders the visible cards, top card first, passing each card's index
    /// in the deck and its layer.
    pub fn render<R>(
        &self,
        mut render_card: impl FnMut(&T, usize, &CardLayer) -> R,
    ) -> SmallVec<[R; 4]> {
        let layers = self.layers();
        let cards = self.cards();
        layers
            .iter()
            .filter_map(|layer| {
                cards
                    .get(layer.deck_index)
                    .map(|card| render_card(card, layer.deck_index, layer))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/card_stack_tests.rs"]
mod tests;
