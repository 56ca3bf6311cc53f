//! The model orchestrator and the collaborators it is configured with.
//!
//! [`SequentialModel`] owns the layer sequence and the scene graph, runs the
//! `Constructed → Loading → Building → Ready` protocol, composes layout output
//! with each layer's `init`, and pushes prediction values into the layers.

/// Normalised model configuration parsed from JSON.
pub mod config;

/// Error types surfaced by the orchestrator.
pub mod error;

/// Predictor contract the orchestrator forwards inputs to.
pub mod predictor;

/// The orchestrator itself.
pub mod sequential;

pub use config::{ConfigError, ModelConfig};
pub use error::{LoadError, ModelError};
pub use predictor::{LayerValue, PredictCallback, PredictError, Predictor};
pub use sequential::{InitCallback, LoadPhase, SequentialModel};
