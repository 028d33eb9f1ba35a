//! Tuning for the swipe engine and the stack layout.

use std::fmt;

use swipedeck_animation::{AnimationSpec, Easing, SpringSpec};
use swipedeck_foundation::{SWIPE_THRESHOLD_FRACTION, SWIPE_VELOCITY_THRESHOLD};
use swipedeck_ui_graphics::Size;

/// Gesture thresholds and animation timing for the top card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Commit distance as a fraction of the viewport width.
    pub swipe_threshold_fraction: f32,
    /// Release speed (px/s) that commits regardless of distance.
    pub velocity_threshold: f32,
    /// Horizontal exit target as a multiple of the viewport width.
    pub exit_distance_factor: f32,
    /// Primary-axis exit tween.
    pub exit_animation: AnimationSpec,
    /// Orthogonal-axis tween; runs a little longer for an arced exit.
    pub orthogonal_animation: AnimationSpec,
    /// Snap-back spring for cancelled drags.
    pub snap_spring: SpringSpec,
    /// Top-card tilt in degrees at half a viewport of horizontal travel.
    pub rotation_angle: f32,
    /// Top-card alpha once faded out.
    pub min_alpha: f32,
    /// Horizontal travel, as a fraction of the width, over which alpha fades.
    pub fade_distance_fraction: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_fraction: SWIPE_THRESHOLD_FRACTION,
            velocity_threshold: SWIPE_VELOCITY_THRESHOLD,
            exit_distance_factor: 1.5,
            exit_animation: AnimationSpec::tween(300, Easing::EaseOut),
            orthogonal_animation: AnimationSpec::tween(400, Easing::EaseOut),
            snap_spring: SpringSpec::physical(15.0, 100.0, 1.0),
            rotation_angle: 15.0,
            min_alpha: 0.3,
            fade_distance_fraction: 0.8,
        }
    }
}

impl SwipeConfig {
    pub fn swipe_threshold(&self, viewport: Size) -> f32 {
        viewport.width * self.swipe_threshold_fraction
    }

    pub fn with_swipe_threshold_fraction(mut self, fraction: f32) -> Self {
        self.swipe_threshold_fraction = fraction;
        self
    }

    pub fn with_velocity_threshold(mut self, velocity: f32) -> Self {
        self.velocity_threshold = velocity;
        self
    }

    pub fn with_exit_animation(mut self, exit: AnimationSpec, orthogonal: AnimationSpec) -> Self {
        self.exit_animation = exit;
        self.orthogonal_animation = orthogonal;
        self
    }

    pub fn with_snap_spring(mut self, spring: SpringSpec) -> Self {
        self.snap_spring = spring;
        self
    }

    pub fn with_rotation_angle(mut self, degrees: f32) -> Self {
        self.rotation_angle = degrees;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.swipe_threshold_fraction > 0.0 && self.swipe_threshold_fraction.is_finite()) {
            return Err(ConfigError::InvalidThreshold {
                name: "swipe_threshold_fraction",
                value: self.swipe_threshold_fraction,
            });
        }
        if !(self.velocity_threshold > 0.0 && self.velocity_threshold.is_finite()) {
            return Err(ConfigError::InvalidThreshold {
                name: "velocity_threshold",
                value: self.velocity_threshold,
            });
        }
        if !(0.0..=1.0).contains(&self.min_alpha) {
            return Err(ConfigError::InvalidThreshold {
                name: "min_alpha",
                value: self.min_alpha,
            });
        }
        Ok(())
    }
}

/// Layout of the cards queued beneath the top card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackConfig {
    /// Cards rendered at once, top card included.
    pub stack_size: usize,
    /// Scale step per position, in percent.
    pub stack_scale: f32,
    /// Vertical offset step per position, in pixels.
    pub stack_separation: f32,
    /// Scale of a card at position zero before the stack step is applied.
    pub scale_factor: f32,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_size: 3,
            stack_scale: 5.0,
            stack_separation: 14.0,
            scale_factor: 1.0,
        }
    }
}

impl StackConfig {
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = stack_size;
        self
    }

    pub fn with_stack_scale(mut self, stack_scale: f32) -> Self {
        self.stack_scale = stack_scale;
        self
    }

    pub fn with_stack_separation(mut self, stack_separation: f32) -> Self {
        self.stack_separation = stack_separation;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stack_size == 0 {
            return Err(ConfigError::EmptyStack);
        }
        let smallest = self.scale_factor - (self.stack_size - 1) as f32 * self.stack_scale / 100.0;
        if !(smallest > 0.0) {
            return Err(ConfigError::InvalidThreshold {
                name: "stack_scale",
                value: self.stack_scale,
            });
        }
        Ok(())
    }
}

pub fn validate_viewport(viewport: Size) -> Result<(), ConfigError> {
    let usable = |extent: f32| extent.is_finite() && extent > 0.0;
    if usable(viewport.width) && usable(viewport.height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidViewport { width: f32, height: f32 },
    InvalidThreshold { name: &'static str, value: f32 },
    EmptyStack,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidViewport { width, height } => {
                write!(f, "viewport {width}x{height} must be positive and finite")
            }
            ConfigError::InvalidThreshold { name, value } => {
                write!(f, "{name} has invalid value {value}")
            }
            ConfigError::EmptyStack => write!(f, "stack_size must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(SwipeConfig::default().validate(), Ok(()));
        assert_eq!(StackConfig::default().validate(), Ok(()));
        let threshold = SwipeConfig::default().swipe_threshold(Size::new(400.0, 800.0));
        assert!((threshold - 120.0).abs() < 1e-3);
    }

    #[test]
    fn invalid_values_are_reported() {
        let config = SwipeConfig::default().with_velocity_threshold(-1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidThreshold {
                name: "velocity_threshold",
                value: -1.0
            })
        );
        assert_eq!(
            StackConfig::default().with_stack_size(0).validate(),
            Err(ConfigError::EmptyStack)
        );
        // 1.0 - 20 * 0.05 leaves nothing to draw
        assert!(StackConfig::default().with_stack_size(21).validate().is_err());
    }

    #[test]
    fn viewport_must_be_positive() {
        assert!(validate_viewport(Size::new(390.0, 844.0)).is_ok());
        let err = validate_viewport(Size::new(0.0, 844.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "viewport 0x844 must be positive and finite"
        );
    }

    #[test]
    fn viewport_must_be_finite() {
        assert!(validate_viewport(Size::new(f32::INFINITY, 844.0)).is_err());
        assert!(validate_viewport(Size::new(390.0, f32::INFINITY)).is_err());
        assert!(validate_viewport(Size::new(f32::NAN, 844.0)).is_err());
    }
}
