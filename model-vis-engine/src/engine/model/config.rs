use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::layout::LayoutConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid model configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("layer interval must be finite and positive, got {0}")]
    InvalidLayerInterval(f32),

    #[error("max depth in layer must be finite and at least 1, got {0}")]
    InvalidMaxDepth(f32),
}

/// Model description shared by the orchestrator and every layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub layout: LayoutConfig,
    /// Asset path of the model resource. When set, `init` waits for it to load.
    pub resource: Option<String>,
    /// Show the FPS overlay.
    pub stats: bool,
    /// Alpha of a layer with no value; clamped to `[0, 1]`.
    pub min_opacity: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            resource: None,
            stats: false,
            min_opacity: 0.4,
        }
    }
}

impl ModelConfig {
    /// Parse and normalise a JSON description. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(json)?.normalize()
    }

    /// Validate numeric fields and fold equivalent spellings together.
    pub fn normalize(mut self) -> Result<Self, ConfigError> {
        let interval = self.layout.layer_interval;
        if !interval.is_finite() || interval <= 0.0 {
            return Err(ConfigError::InvalidLayerInterval(interval));
        }

        let max_depth = self.layout.max_depth_in_layer;
        if !max_depth.is_finite() || max_depth < 1.0 {
            return Err(ConfigError::InvalidMaxDepth(max_depth));
        }

        self.min_opacity = if self.min_opacity.is_nan() {
            0.0
        } else {
            self.min_opacity.clamp(0.0, 1.0)
        };
        self.resource = self
            .resource
            .map(|path| path.trim().to_owned())
            .filter(|path| !path.is_empty());

        Ok(self)
    }

    pub fn has_loader(&self) -> bool {
        self.resource.is_some()
    }
}
