//! Stack geometry: how each visible card is transformed for a given top-card
//! offset. Pure functions; the stack feeds them the engine's live offset.

use swipedeck_animation::{interpolate, Extrapolate};
use swipedeck_ui_graphics::{GraphicsLayer, Point, Size};

use crate::config::{StackConfig, SwipeConfig};

/// Badge opacities for the top card ("LIKE", "NOPE", "SUPER").
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwipeOverlay {
    pub like_opacity: f32,
    pub nope_opacity: f32,
    pub super_like_opacity: f32,
}

/// Placement of one rendered card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayer {
    /// 0 for the top card, increasing downwards.
    pub position: usize,
    /// Index into the cards the stack was given.
    pub deck_index: usize,
    pub layer: GraphicsLayer,
    /// Higher paints later.
    pub z_index: i32,
    /// Only the top card reacts to gestures.
    pub interactive: bool,
    /// Present on the top card only.
    pub overlay: Option<SwipeOverlay>,
}

/// Transform of the card under the finger.
pub fn top_card_layer(translation: Point, viewport: Size, config: &SwipeConfig) -> GraphicsLayer {
    let half_width = viewport.width / 2.0;
    let rotation_z = interpolate(
        translation.x,
        &[-half_width, 0.0, half_width],
        &[-config.rotation_angle, 0.0, config.rotation_angle],
        Extrapolate::Clamp,
    );
    let alpha = interpolate(
        translation.x.abs(),
        &[0.0, viewport.width * config.fade_distance_fraction],
        &[1.0, config.min_alpha],
        Extrapolate::Clamp,
    );
    GraphicsLayer {
        alpha,
        scale: 1.0,
        translation_x: translation.x,
        translation_y: translation.y,
        rotation_z,
    }
}

/// Transform of the card `position` places below the top, given the top
/// card's horizontal offset. The card grows into place as the top card
/// leaves.
pub fn stacked_card_layer(
    position: usize,
    top_translation_x: f32,
    viewport: Size,
    config: &StackConfig,
) -> GraphicsLayer {
    let drag = top_translation_x.abs();
    let step = position as f32;
    let resting_scale = config.scale_factor - step * config.stack_scale / 100.0;
    let scale = interpolate(
        drag,
        &[0.0, viewport.width],
        &[resting_scale, 1.0],
        Extrapolate::Clamp,
    );
    let translation_y = interpolate(
        drag,
        &[0.0, viewport.width],
        &[step * config.stack_separation, 0.0],
        Extrapolate::Clamp,
    );
    GraphicsLayer {
        alpha: 1.0,
        scale,
        translation_x: 0.0,
        translation_y,
        rotation_z: 0.0,
    }
}

pub fn swipe_overlay(translation: Point, viewport: Size) -> SwipeOverlay {
    let quarter_width = viewport.width / 4.0;
    let quarter_height = viewport.height / 4.0;
    SwipeOverlay {
        like_opacity: interpolate(
            translation.x,
            &[0.0, quarter_width],
            &[0.0, 1.0],
            Extrapolate::Clamp,
        ),
        nope_opacity: interpolate(
            translation.x,
            &[-quarter_width, 0.0],
            &[1.0, 0.0],
            Extrapolate::Clamp,
        ),
        super_like_opacity: interpolate(
            translation.y,
            &[-quarter_height, 0.0],
            &[1.0, 0.0],
            Extrapolate::Clamp,
        ),
    }
}
