//! Swipe decision engine: drag samples in, commit or snap-back out.

pub mod decision;
pub mod engine;

pub use decision::{decide, SwipeDecision, SwipeDirection, SwipeThresholds};
pub use engine::{SwipeEngine, SwipePhase};
