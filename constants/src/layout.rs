/// Vertical distance between two consecutive layer slots, in world units.
pub const MODEL_LAYER_INTERVAL: f32 = 50.0;

/// Depth scale given to the layer with the largest declared depth.
/// Every other layer is scaled proportionally and floored at 1.
pub const MAX_DEPTH_IN_LAYER: f32 = 20.0;
