use crate::runtime::{FrameCallbackId, RuntimeHandle};

/// Hands out one-shot frame callbacks on a runtime.
///
/// Animations hold a clock rather than the runtime itself so that a dropped
/// runtime simply stops delivering frames.
#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    /// Runs `callback` with the frame time of the next drained frame.
    ///
    /// Keep the returned registration for as long as the callback should
    /// stay scheduled.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.runtime.register_frame_callback(callback);
        if id.is_none() {
            log::debug!("frame callback requested after the runtime was dropped");
        }
        FrameCallbackRegistration {
            scheduled: id.map(|id| (self.runtime.clone(), id)),
        }
    }
}

/// A scheduled frame callback. Dropping or cancelling it unschedules the
/// callback if the frame has not been drained yet.
#[must_use = "dropping the registration cancels the frame callback"]
pub struct FrameCallbackRegistration {
    scheduled: Option<(RuntimeHandle, FrameCallbackId)>,
}

impl FrameCallbackRegistration {
    pub fn is_active(&self) -> bool {
        self.scheduled.is_some()
    }

    pub fn cancel(mut self) {
        self.unschedule();
    }

    fn unschedule(&mut self) {
        if let Some((runtime, id)) = self.scheduled.take() {
            runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.unschedule();
    }
}
