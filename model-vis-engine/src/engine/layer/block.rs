use bevy::color::{Alpha, Mix};
use bevy::prelude::*;
use constants::render_settings::{
    BLOCK_BASE_DEPTH, BLOCK_HEIGHT, BLOCK_WIDTH, LAYER_BASE_COLOUR, LAYER_HOVER_COLOUR,
    LAYER_OUTLINE_COLOUR, LAYER_SELECTED_COLOUR,
};

use super::handle::{LayerEnvironment, LayerError, LayerHandle, LayerKind, LayerLink, ModelContext};
use crate::engine::layout::LayerPlacement;
use crate::engine::model::ModelConfig;
use crate::engine::scene::{NodeId, SceneGraph, SceneNode};

struct BlockNodes {
    root: NodeId,
    blocks: Vec<NodeId>,
    outline: NodeId,
}

/// A layer drawn as one box per slot, scaled along z by its depth scale.
///
/// Boxes are hoverable and clickable. Hovering highlights the box under the pointer,
/// clicking toggles a selection outline around the whole layer, and prediction values
/// tint the boxes by their mean magnitude.
pub struct BlockLayer {
    kind: LayerKind,
    name: Option<String>,
    shape: Option<Vec<usize>>,
    depth: Option<u32>,
    thickness: Option<usize>,
    merged: bool,
    env: Option<LayerEnvironment>,
    predecessor: Option<LayerLink>,
    min_opacity: f32,
    nodes: Option<BlockNodes>,
    hovered: Option<NodeId>,
    selected: bool,
    value: Option<Vec<f32>>,
}

impl BlockLayer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            name: None,
            shape: None,
            depth: None,
            thickness: None,
            merged: false,
            env: None,
            predecessor: None,
            min_opacity: 1.0,
            nodes: None,
            hovered: None,
            selected: false,
            value: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_shape(mut self, shape: Vec<usize>) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Draw this layer as `thickness` stacked members.
    pub fn grouped(mut self, thickness: usize) -> Self {
        self.thickness = Some(thickness.max(1));
        self
    }

    pub fn merged(mut self) -> Self {
        self.merged = true;
        self
    }

    pub fn predecessor(&self) -> Option<&LayerLink> {
        self.predecessor.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn value(&self) -> Option<&[f32]> {
        self.value.as_deref()
    }

    /// Group node holding this layer's drawables, once initialised.
    pub fn root_node(&self) -> Option<NodeId> {
        self.nodes.as_ref().map(|nodes| nodes.root)
    }

    /// Mean magnitude of the current value relative to its peak, in `[0, 1]`.
    fn intensity(&self) -> f32 {
        let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) else {
            return 0.0;
        };
        let peak = value.iter().fold(0.0_f32, |acc, v| acc.max(v.abs()));
        if peak == 0.0 {
            return 0.0;
        }
        value.iter().map(|v| v.abs()).sum::<f32>() / value.len() as f32 / peak
    }

    fn resting_colour(&self) -> Color {
        let intensity = self.intensity();
        let alpha = self.min_opacity + (1.0 - self.min_opacity) * intensity;
        LAYER_BASE_COLOUR
            .mix(&Color::WHITE, intensity * 0.6)
            .with_alpha(alpha)
    }

    fn refresh(&self, scene: &mut SceneGraph) -> Result<(), LayerError> {
        let Some(nodes) = &self.nodes else {
            return Ok(());
        };

        let resting = self.resting_colour();
        for &block in &nodes.blocks {
            let colour = if self.hovered == Some(block) {
                LAYER_HOVER_COLOUR
            } else if self.selected {
                LAYER_SELECTED_COLOUR
            } else {
                resting
            };
            scene.update(block, |node| node.colour = colour)?;
        }

        let selected = self.selected;
        scene.update(nodes.outline, |node| node.visible = selected)?;
        Ok(())
    }

    fn refresh_or_warn(&self, scene: &mut SceneGraph) {
        if let Err(e) = self.refresh(scene) {
            warn!("Layer {:?} could not refresh its drawables: {}", self.kind, e);
        }
    }
}

impl LayerHandle for BlockLayer {
    fn kind(&self) -> LayerKind {
        self.kind
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn shape(&self) -> Option<&[usize]> {
        self.shape.as_deref()
    }

    fn depth(&self) -> Option<u32> {
        self.depth
    }

    fn is_group(&self) -> bool {
        self.thickness.is_some()
    }

    fn thickness(&self) -> usize {
        self.thickness.unwrap_or(1)
    }

    fn is_merged(&self) -> bool {
        self.merged
    }

    fn set_environment(&mut self, env: LayerEnvironment) {
        self.env = Some(env);
    }

    fn load_model_config(&mut self, config: &ModelConfig) {
        self.min_opacity = config.min_opacity;
    }

    fn set_last_layer(&mut self, predecessor: LayerLink) {
        self.predecessor = Some(predecessor);
    }

    fn assemble(&mut self, layer_index: usize, model: &ModelContext<'_>) {
        // Layers that do not declare a shape inherit their predecessor's.
        if self.shape.is_none() {
            self.shape = self.predecessor.as_ref().and_then(|link| link.shape.clone());
        }
        if self.name.is_none() {
            self.name = Some(format!("{:?}_{}", self.kind, layer_index).to_lowercase());
        }
        debug!(
            "Assembled layer {} of {} as {:?}",
            layer_index,
            model.layers.len(),
            self.name
        );
    }

    fn init(
        &mut self,
        scene: &mut SceneGraph,
        placement: &LayerPlacement,
        depth_scale: f32,
    ) -> Result<(), LayerError> {
        let env = self.env.ok_or(LayerError::MissingEnvironment)?;
        let slots = placement.slots();
        if slots.len() != self.thickness() {
            return Err(LayerError::Placement(format!(
                "expected {} slots, got {}",
                self.thickness(),
                slots.len()
            )));
        }

        let root = scene.insert_child(
            env.scene_root,
            SceneNode::group().with_layer_index(env.layer_index),
        )?;

        let block_size = Vec3::new(BLOCK_WIDTH, BLOCK_HEIGHT, BLOCK_BASE_DEPTH * depth_scale);
        let mut blocks = Vec::with_capacity(slots.len());
        for (element, slot) in slots.iter().enumerate() {
            let block = scene.insert_child(
                root,
                SceneNode::mesh(block_size)
                    .with_transform(Transform::from_translation(*slot))
                    .with_layer_index(env.layer_index)
                    .with_element(element)
                    .hoverable(true)
                    .clickable(true),
            )?;
            blocks.push(block);
        }

        let span = slots.last().map_or(0.0, |top| top.y) - slots.first().map_or(0.0, |bottom| bottom.y);
        let mut outline = SceneNode::outline(Vec3::new(
            block_size.x * 1.1,
            span + block_size.y * 1.5,
            block_size.z * 1.1,
        ))
        .with_transform(Transform::from_translation(placement.centre()))
        .with_colour(LAYER_OUTLINE_COLOUR)
        .with_layer_index(env.layer_index);
        outline.visible = false;
        let outline = scene.insert_child(root, outline)?;

        self.nodes = Some(BlockNodes {
            root,
            blocks,
            outline,
        });
        self.refresh(scene)
    }

    fn update_value(&mut self, scene: &mut SceneGraph, value: Option<&[f32]>) -> Result<(), LayerError> {
        if self.nodes.is_none() {
            return Err(LayerError::NotInitialised);
        }

        if let Some(value) = value {
            if let Some(shape) = &self.shape {
                let expected: usize = shape.iter().product();
                if value.len() != expected {
                    return Err(LayerError::ValueLength {
                        expected,
                        actual: value.len(),
                    });
                }
            }
            self.value = Some(value.to_vec());
        }
        self.refresh(scene)
    }

    fn clear(&mut self, scene: &mut SceneGraph) {
        self.value = None;
        self.hovered = None;
        self.selected = false;
        self.refresh_or_warn(scene);
    }

    fn handle_hover_in(&mut self, scene: &mut SceneGraph, element: NodeId) {
        self.hovered = Some(element);
        self.refresh_or_warn(scene);
    }

    fn handle_hover_out(&mut self, scene: &mut SceneGraph) {
        self.hovered = None;
        self.refresh_or_warn(scene);
    }

    fn handle_click(&mut self, scene: &mut SceneGraph, element: NodeId) {
        self.selected = !self.selected;
        let member = scene.get(element).and_then(|node| node.element);
        info!(
            "Layer {:?} {} (member {:?})",
            self.name,
            if self.selected { "selected" } else { "deselected" },
            member
        );
        self.refresh_or_warn(scene);
    }
}
