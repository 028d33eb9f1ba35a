//! Swipeable card stack for SwipeDeck.
//!
//! [`CardStack`] renders the top few cards of a deck and lets the user fling
//! the top one left, right or up. [`SwipeEngine`] owns the top card's offset
//! and decides what a release means; [`SwipeHandle`] triggers the same exit
//! from buttons.

pub mod config;
pub mod deck;
pub mod stack;
pub mod swipe;

pub use config::{validate_viewport, ConfigError, StackConfig, SwipeConfig};
pub use deck::{Card, Deck, DeckError};
pub use stack::{
    stacked_card_layer, swipe_overlay, top_card_layer, CardLayer, CardStack, SwipeCallbacks,
    SwipeHandle, SwipeOverlay,
};
pub use swipe::{decide, SwipeDecision, SwipeDirection, SwipeEngine, SwipePhase, SwipeThresholds};

pub mod prelude {
    pub use crate::config::{StackConfig, SwipeConfig};
    pub use crate::deck::{Card, Deck};
    pub use crate::stack::{CardLayer, CardStack, SwipeHandle};
    pub use crate::swipe::{SwipeDecision, SwipeDirection, SwipePhase};
}
