use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::frame_clock::FrameClock;

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<FrameCallbackId>,
    last_frame_time_nanos: Cell<Option<u64>>,
    frames_drained: Cell<u64>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            last_frame_time_nanos: Cell::new(None),
            frames_drained: Cell::new(0),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(last) = self.last_frame_time_nanos.get() {
            if frame_time_nanos < last {
                log::warn!(
                    "frame time moved backwards ({} ns -> {} ns)",
                    last,
                    frame_time_nanos
                );
            }
        }
        self.last_frame_time_nanos.set(Some(frame_time_nanos));
        self.frames_drained.set(self.frames_drained.get() + 1);

        // Callbacks registered while draining belong to the next frame.
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: SmallVec<[Box<dyn FnOnce(u64) + 'static>; 8]> = SmallVec::new();
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        log::trace!(
            "frame {} ns: running {} callbacks",
            frame_time_nanos,
            pending.len()
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
    }
}

/// Owner of the frame callback queue.
///
/// Dropping the runtime invalidates every [`RuntimeHandle`]; pending
/// callbacks are discarded.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.handle().frame_clock()
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.inner.drain_frame_callbacks(frame_time_nanos);
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner.has_frame_callbacks()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    /// Registers a one-shot callback for the next drained frame.
    ///
    /// Returns `None` once the owning [`Runtime`] has been dropped.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Frame time of the most recently drained frame.
    pub fn last_frame_time_nanos(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.last_frame_time_nanos.get())
    }

    pub fn frames_drained(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.frames_drained.get())
            .unwrap_or(0)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}
