//! Model resource loading for models that declare a `resource` path.
//!
//! The resource is a JSON asset holding per-layer outputs. Once it loads, the model
//! receives a [`ReplayPredictor`] built from it and finishes its initialisation.

/// The JSON model resource and the predictor that replays it.
///
/// Validates the declared input shape before handing the resource to the model.
pub mod model_resource;

/// Systems that start the asset load and report its outcome to the model.
pub mod resource_loader;

pub use model_resource::{ModelResource, ReplayPredictor};
pub use resource_loader::ResourceLoader;
