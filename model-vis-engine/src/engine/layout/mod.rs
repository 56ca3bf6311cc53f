//! Layer stacking and depth scaling.
//!
//! Pure functions of the layer sequence's shape. The orchestrator feeds them the
//! [`LayoutAttributes`] of every layer and a [`LayoutConfig`], and hands the result to
//! each layer's `init` hook.

/// Per-layer depth exaggeration relative to the deepest layer.
pub mod depth;

/// Slot positions for single and grouped layers, centred on the origin.
pub mod positions;

use constants::layout::{MAX_DEPTH_IN_LAYER, MODEL_LAYER_INTERVAL};
use serde::{Deserialize, Serialize};

pub use depth::compute_depth_scales;
pub use positions::{LayerPlacement, compute_positions};

/// Tunables for the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between consecutive slots along y.
    pub layer_interval: f32,
    /// Scale assigned to the deepest layer.
    pub max_depth_in_layer: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layer_interval: MODEL_LAYER_INTERVAL,
            max_depth_in_layer: MAX_DEPTH_IN_LAYER,
        }
    }
}

/// How many stacking slots a layer occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSpan {
    Single,
    Group { thickness: usize },
}

impl SlotSpan {
    /// Group span; thickness is floored at one slot.
    pub fn group(thickness: usize) -> Self {
        Self::Group {
            thickness: thickness.max(1),
        }
    }

    pub fn slot_count(&self) -> usize {
        match *self {
            Self::Single => 1,
            Self::Group { thickness } => thickness,
        }
    }
}

/// The attributes of a layer that the layout engine looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAttributes {
    pub span: SlotSpan,
    pub depth: Option<u32>,
}

impl LayoutAttributes {
    pub fn single(depth: Option<u32>) -> Self {
        Self {
            span: SlotSpan::Single,
            depth,
        }
    }

    pub fn group(thickness: usize, depth: Option<u32>) -> Self {
        Self {
            span: SlotSpan::group(thickness),
            depth,
        }
    }
}

/// Positions and depth scales for a whole layer sequence, index-aligned with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub placements: Vec<LayerPlacement>,
    pub depth_scales: Vec<f32>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Total number of stacking slots, counting each group member.
    pub fn slot_count(&self) -> usize {
        self.placements.iter().map(|p| p.slots().len()).sum()
    }

    /// Vertical extent of the stack from the lowest to the highest slot.
    pub fn stack_height(&self) -> f32 {
        let mut ys = self.placements.iter().flat_map(|p| p.slots().iter().map(|v| v.y));
        let Some(first) = ys.next() else {
            return 0.0;
        };
        let (min, max) = ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        max - min
    }
}

pub fn compute_layout(layers: &[LayoutAttributes], config: &LayoutConfig) -> Layout {
    Layout {
        placements: compute_positions(layers, config.layer_interval),
        depth_scales: compute_depth_scales(layers, config.max_depth_in_layer),
    }
}
