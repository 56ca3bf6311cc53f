use thiserror::Error;

use super::config::ConfigError;
use super::predictor::PredictError;
use crate::engine::core::app_state::ModelState;
use crate::engine::layer::LayerError;

/// Failure of the asynchronous resource load that precedes scene construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("model resource {path} failed to load: {reason}")]
    Asset { path: String, reason: String },

    #[error("invalid model resource: {0}")]
    InvalidResource(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("model is already initialised")]
    AlreadyInitialised,

    #[error("layers can only be added before init")]
    AddAfterInit,

    #[error("model has no layers")]
    EmptyModel,

    #[error("no resource load is pending (model is {0:?})")]
    NotLoading(ModelState),

    #[error("model resource has not finished loading")]
    ResourcePending,

    #[error("model is not ready (model is {0:?})")]
    NotReady(ModelState),

    #[error(transparent)]
    ResourceLoad(#[from] LoadError),

    #[error("layer {layer_index} failed to initialise: {source}")]
    LayerInit {
        layer_index: usize,
        #[source]
        source: LayerError,
    },

    #[error("layer {layer_index} failed to update: {source}")]
    LayerUpdate {
        layer_index: usize,
        #[source]
        source: LayerError,
    },

    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error("predictor returned {actual} layer outputs, model needs {expected}")]
    MalformedPrediction { expected: usize, actual: usize },
}
