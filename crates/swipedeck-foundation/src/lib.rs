//! Pointer input and gesture recognition for SwipeDeck
//!
//! Raw pointer events go in, continuous drag samples with release velocity
//! come out. Everything here is independent of cards and decks.

pub mod gesture_constants;
pub mod nodes;
pub mod velocity_tracker;

pub use gesture_constants::*;
pub use nodes::input::gestures::{DragEvent, DragGesture};
pub use nodes::input::types::{PointerEvent, PointerEventKind, PointerId, PointerPhase};
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::nodes::input::gestures::{DragEvent, DragGesture};
    pub use crate::nodes::input::types::{PointerEvent, PointerEventKind};
    pub use crate::velocity_tracker::VelocityTracker;
}
