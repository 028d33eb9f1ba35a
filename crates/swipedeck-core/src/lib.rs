//! Core runtime for SwipeDeck
//!
//! A single-threaded frame clock plus observable state cells. Hosts drive
//! time by calling [`RuntimeHandle::drain_frame_callbacks`] with a
//! monotonically increasing frame time; animations and gesture logic only
//! ever observe time through those callbacks.

mod frame_clock;
mod runtime;
mod state;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
pub use state::{MutableState, State, Subscription};

pub mod prelude {
    pub use crate::frame_clock::FrameClock;
    pub use crate::runtime::{Runtime, RuntimeHandle};
    pub use crate::state::{MutableState, State};
}

#[cfg(test)]
#[path = "tests/core_tests.rs"]
mod tests;
