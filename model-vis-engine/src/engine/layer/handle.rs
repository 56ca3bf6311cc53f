use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::layout::{LayerPlacement, LayoutAttributes};
use crate::engine::model::ModelConfig;
use crate::engine::scene::{NodeId, SceneError, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Input,
    Conv,
    DepthwiseConv,
    Pooling,
    Padding,
    UpSampling,
    Reshape,
    Flatten,
    Dense,
    Activation,
    Merge,
    Output,
    DetectionOutput,
    YoloGrid,
    YoloOutput,
}

impl LayerKind {
    /// Terminal kinds that draw from their own state. They receive no prediction data.
    pub fn is_self_rendering(self) -> bool {
        matches!(self, Self::YoloOutput)
    }
}

/// Non-owning description of another layer in the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerLink {
    /// 1-based position in the sequence.
    pub layer_index: usize,
    pub kind: LayerKind,
    pub shape: Option<Vec<usize>>,
}

/// Where a layer lives: the index it stamps on its drawables and the node it hangs them from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerEnvironment {
    /// 1-based position in the sequence, stamped as `SceneNode::layer_index`.
    pub layer_index: usize,
    pub scene_root: NodeId,
}

/// Read-only view of the model handed to `assemble`.
#[derive(Debug, Clone, Copy)]
pub struct ModelContext<'a> {
    pub config: &'a ModelConfig,
    /// Every layer added so far, including the one being assembled.
    pub layers: &'a [LayerLink],
}

#[derive(Debug, Error)]
pub enum LayerError {
    #[error("layer has no environment; it must be added to a model first")]
    MissingEnvironment,

    #[error("layer was updated before init")]
    NotInitialised,

    #[error("layer rejected its placement: {0}")]
    Placement(String),

    #[error("value has {actual} elements, layer shape expects {expected}")]
    ValueLength { expected: usize, actual: usize },

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Capability contract of one visualised pipeline stage.
///
/// Attribute methods have explicit defaults: a plain layer is a single slot with no
/// declared depth and no shape, chained to its predecessor.
pub trait LayerHandle: Send + Sync {
    fn kind(&self) -> LayerKind;

    fn name(&self) -> Option<&str> {
        None
    }

    /// Declared output shape. For the first layer this is the model's input shape.
    fn shape(&self) -> Option<&[usize]> {
        None
    }

    /// Relative size used only for depth scaling.
    fn depth(&self) -> Option<u32> {
        None
    }

    fn is_group(&self) -> bool {
        false
    }

    /// Number of stacked members. Only read when `is_group` is true.
    fn thickness(&self) -> usize {
        1
    }

    /// Merged layers fuse with their predecessor and are not chained to it.
    fn is_merged(&self) -> bool {
        false
    }

    fn layout_attributes(&self) -> LayoutAttributes {
        if self.is_group() {
            LayoutAttributes::group(self.thickness(), self.depth())
        } else {
            LayoutAttributes::single(self.depth())
        }
    }

    fn link(&self, layer_index: usize) -> LayerLink {
        LayerLink {
            layer_index,
            kind: self.kind(),
            shape: self.shape().map(<[usize]>::to_vec),
        }
    }

    fn set_environment(&mut self, env: LayerEnvironment);

    fn load_model_config(&mut self, config: &ModelConfig);

    fn set_last_layer(&mut self, predecessor: LayerLink);

    fn assemble(&mut self, layer_index: usize, model: &ModelContext<'_>);

    fn init(
        &mut self,
        scene: &mut SceneGraph,
        placement: &LayerPlacement,
        depth_scale: f32,
    ) -> Result<(), LayerError>;

    /// `None` when there is no data for this layer (no predictor, or a self-rendering kind).
    fn update_value(&mut self, scene: &mut SceneGraph, value: Option<&[f32]>) -> Result<(), LayerError>;

    fn clear(&mut self, scene: &mut SceneGraph);

    fn handle_hover_in(&mut self, scene: &mut SceneGraph, element: NodeId);

    fn handle_hover_out(&mut self, scene: &mut SceneGraph);

    fn handle_click(&mut self, scene: &mut SceneGraph, element: NodeId);
}
