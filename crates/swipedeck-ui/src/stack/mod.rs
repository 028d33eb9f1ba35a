//! Card stack renderer and its imperative handle.

pub mod card_stack;
pub mod geometry;

pub use card_stack::{CardStack, SwipeCallbacks, SwipeHandle};
pub use geometry::{stacked_card_layer, swipe_overlay, top_card_layer, CardLayer, SwipeOverlay};
