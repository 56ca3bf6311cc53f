use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::model::{LayerValue, LoadError, PredictCallback, PredictError, Predictor};

/// Recorded model outputs, loaded from a `*.model.json` asset.
///
/// `layer_outputs[i]` is the value for layer `i + 1`; layer 0 is the input.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath)]
pub struct ModelResource {
    pub input_shape: Vec<usize>,
    #[serde(default)]
    pub layer_outputs: Vec<LayerValue>,
}

impl ModelResource {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject resources with an empty or zero-sized input shape.
    pub fn validate(&self, path: &str) -> Result<(), LoadError> {
        if self.input_shape.is_empty() || self.input_shape.contains(&0) {
            return Err(LoadError::InvalidResource(format!(
                "{path}: input shape {:?} has no elements",
                self.input_shape
            )));
        }
        Ok(())
    }

    pub fn input_len(&self) -> usize {
        self.input_shape.iter().product()
    }
}

/// Predictor that answers every well-formed input with the recorded outputs.
#[derive(Debug, Clone)]
pub struct ReplayPredictor {
    resource: ModelResource,
}

impl ReplayPredictor {
    pub fn new(resource: ModelResource) -> Self {
        Self { resource }
    }

    pub fn resource(&self) -> &ModelResource {
        &self.resource
    }
}

impl Predictor for ReplayPredictor {
    fn predict(
        &mut self,
        input: &[f32],
        input_shape: &[usize],
        callback: Option<PredictCallback>,
    ) -> Result<Vec<LayerValue>, PredictError> {
        // Fall back to the recorded shape when the first layer declares none.
        let shape = if input_shape.is_empty() {
            self.resource.input_shape.as_slice()
        } else {
            input_shape
        };
        let expected: usize = shape.iter().product();
        if input.len() != expected {
            return Err(PredictError::InputShape {
                shape: shape.to_vec(),
                expected,
                actual: input.len(),
            });
        }

        let outputs = self.resource.layer_outputs.clone();
        if let Some(callback) = callback {
            callback(&outputs);
        }
        Ok(outputs)
    }
}
