use bevy::color::Color;

pub const LAYER_BASE_COLOUR: Color = Color::srgb(0.32, 0.55, 0.78);
pub const LAYER_HOVER_COLOUR: Color = Color::srgb(1.0, 0.84, 0.25);
pub const LAYER_SELECTED_COLOUR: Color = Color::srgb(0.95, 0.35, 0.30);
pub const LAYER_OUTLINE_COLOUR: Color = Color::srgb(0.85, 0.85, 0.90);

/// Footprint of a single layer slot before depth scaling (x, y).
pub const BLOCK_WIDTH: f32 = 30.0;
pub const BLOCK_HEIGHT: f32 = 6.0;
/// Extent along z of a layer whose depth scale is 1.
pub const BLOCK_BASE_DEPTH: f32 = 2.0;

pub const STATS_FONT_SIZE: f32 = 16.0;
