//! Release-time classification of a drag.

use swipedeck_ui_graphics::{Point, Size};

use crate::config::SwipeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Top,
}

impl SwipeDirection {
    pub const ALL: [SwipeDirection; 3] = [
        SwipeDirection::Left,
        SwipeDirection::Right,
        SwipeDirection::Top,
    ];

    pub fn is_horizontal(&self) -> bool {
        matches!(self, SwipeDirection::Left | SwipeDirection::Right)
    }

    /// Off-screen resting point of the card for this direction.
    pub fn exit_target(&self, viewport: Size, config: &SwipeConfig) -> Point {
        match self {
            SwipeDirection::Left => Point::new(-config.exit_distance_factor * viewport.width, 0.0),
            SwipeDirection::Right => Point::new(config.exit_distance_factor * viewport.width, 0.0),
            SwipeDirection::Top => Point::new(0.0, -viewport.height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    Commit(SwipeDirection),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThresholds {
    /// Distance in px.
    pub distance: f32,
    /// Speed in px/s.
    pub velocity: f32,
}

impl SwipeThresholds {
    pub fn new(distance: f32, velocity: f32) -> Self {
        Self { distance, velocity }
    }

    pub fn from_config(config: &SwipeConfig, viewport: Size) -> Self {
        Self::new(config.swipe_threshold(viewport), config.velocity_threshold)
    }
}

/// Classifies a released drag.
///
/// Rules are checked right, left, top; the first match wins. A top swipe
/// needs the card to have stayed horizontally inside the threshold so a
/// diagonal fling never reads as a super-like.
pub fn decide(translation: Point, velocity: Point, thresholds: SwipeThresholds) -> SwipeDecision {
    let SwipeThresholds {
        distance,
        velocity: speed,
    } = thresholds;

    if translation.x > distance || velocity.x > speed {
        SwipeDecision::Commit(SwipeDirection::Right)
    } else if translation.x < -distance || velocity.x < -speed {
        SwipeDecision::Commit(SwipeDirection::Left)
    } else if translation.y < -distance && translation.x.abs() < distance && velocity.y < -speed {
        SwipeDecision::Commit(SwipeDirection::Top)
    } else {
        SwipeDecision::Cancel
    }
}
