use thiserror::Error;

/// Flat output values of one layer.
pub type LayerValue = Vec<f32>;

/// Forwarded untouched to the predictor, which calls it with the per-layer outputs.
pub type PredictCallback = Box<dyn FnOnce(&[LayerValue]) + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    #[error("input has {actual} values, input shape {shape:?} needs {expected}")]
    InputShape {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("predictor backend failed: {0}")]
    Backend(String),
}

/// Inference backend. Returns one output per layer after the first.
pub trait Predictor: Send + Sync {
    fn predict(
        &mut self,
        input: &[f32],
        input_shape: &[usize],
        callback: Option<PredictCallback>,
    ) -> Result<Vec<LayerValue>, PredictError>;
}
