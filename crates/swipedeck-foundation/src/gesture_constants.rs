//! Shared gesture constants for swipe handling.
//!
//! Distances are logical pixels, velocities logical pixels per second.

/// Drag threshold in logical pixels.
///
/// A press only becomes a drag once the pointer has moved further than this
/// from where it went down. Matches common touch slop conventions (~8dp).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum release velocity reported by the drag recognizer.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Fraction of the viewport width a card must travel to commit a swipe.
pub const SWIPE_THRESHOLD_FRACTION: f32 = 0.3;

/// Release speed that commits a swipe regardless of distance travelled.
pub const SWIPE_VELOCITY_THRESHOLD: f32 = 500.0;
