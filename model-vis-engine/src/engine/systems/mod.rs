//! Runtime systems for model interaction and diagnostics.
//!
//! Provides the predict and clear request events with their keyboard shortcuts,
//! and the FPS overlay.

/// FPS overlay for native builds.
///
/// Spawned only when the model configuration enables stats.
pub mod fps_tracking;

/// Predict and clear requests, raised by keyboard (native) or by the host app.
pub mod requests;
