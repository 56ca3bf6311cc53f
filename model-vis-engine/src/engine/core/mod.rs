//! Core application setup and state management.
//!
//! Handles the app lifecycle, window configuration and the model state machine
//! for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the default plugins, the model resource and the
/// startup scene (camera, lighting, stats overlay).
pub mod app_setup;

/// Model state machine and the systems that drive it.
///
/// Mirrors the model's `Constructed → Loading → Building → Ready` protocol into
/// Bevy states.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
