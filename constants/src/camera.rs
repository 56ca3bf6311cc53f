/// Camera distance per world unit of stack height.
pub const CAMERA_DISTANCE_PER_STACK_UNIT: f32 = 1.6;

/// Closest the camera is ever placed to the stack centre.
pub const MIN_CAMERA_DISTANCE: f32 = 150.0;

/// Camera height as a fraction of its distance, so layer depth stays readable.
pub const CAMERA_ELEVATION_RATIO: f32 = 0.35;
