//! Animation system for SwipeDeck
//!
//! This crate provides animation primitives driven by the core frame clock:
//! easing curves, time-based tweens, damped springs and range interpolation.

pub mod animation;
pub mod interpolation;

pub use animation::*;
pub use interpolation::{interpolate, Extrapolate};

pub mod prelude {
    pub use crate::animation::{
        Animatable, AnimationEnd, AnimationSpec, AnimationType, Easing, Lerp, SpringSpec,
    };
    pub use crate::interpolation::{interpolate, Extrapolate};
}
