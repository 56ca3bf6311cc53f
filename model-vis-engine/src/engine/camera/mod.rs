//! Camera framing for the layer stack and viewport ray construction.
//!
//! The model computes a [`CameraFraming`] from its layer count when it builds the
//! scene; [`apply_camera_framing`] moves the 3D camera there once the model is ready.

/// Camera placement and cursor to world-ray conversion.
pub mod framing;

pub use framing::{CameraFraming, apply_camera_framing, ndc_to_ray, normalize_pointer};
