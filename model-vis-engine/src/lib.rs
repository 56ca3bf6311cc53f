//! Layout and interaction engine for visualising sequential model pipelines in 3D.
//!
//! A [`SequentialModel`](engine::model::SequentialModel) owns an ordered list of layer
//! handles, stacks them along the y axis, initialises each one at its computed slot
//! and routes pointer events back to the layer that owns the picked surface. Drawing,
//! asset loading and window management run on Bevy.

pub mod engine;

pub use engine::ModelVisPlugin;
pub use engine::core::app_setup::create_app;
pub use engine::core::app_state::ModelState;
pub use engine::layer::{BlockLayer, LayerHandle, LayerKind};
pub use engine::model::{ModelConfig, ModelError, SequentialModel};
