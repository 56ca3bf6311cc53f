//! Shared constants for the sequential model visualisation engine.
//!
//! Values here are defaults. The engine threads them through its configuration
//! types rather than reading them ambiently, so tests can substitute their own.

/// Camera framing relative to the size of the layer stack.
pub mod camera;

/// Layer stacking and depth exaggeration defaults.
pub mod layout;

/// Colours and overlay sizes used when mirroring the scene into the renderer.
pub mod render_settings;
