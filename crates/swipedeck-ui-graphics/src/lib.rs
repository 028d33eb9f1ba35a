//! Pure math/data for card geometry in SwipeDeck
//!
//! This crate contains the geometry primitives and layer transforms shared by
//! the gesture, animation and card stack crates.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{GraphicsLayer, Point, Rect, Size};
}
