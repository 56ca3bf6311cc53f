//! Engine modules: layout arithmetic, the model orchestrator, the scene graph the
//! layers draw into, pointer routing, and the Bevy systems that drive them.

pub mod camera;
pub mod core;
pub mod interaction;
pub mod layer;
pub mod layout;
pub mod loading;
pub mod model;
pub mod scene;
pub mod systems;

mod plugin;

pub use plugin::ModelVisPlugin;
