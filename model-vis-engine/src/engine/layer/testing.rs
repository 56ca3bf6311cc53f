//! Recording layer used by the orchestrator and router tests.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use super::handle::{LayerEnvironment, LayerError, LayerHandle, LayerKind, LayerLink, ModelContext};
use crate::engine::layout::LayerPlacement;
use crate::engine::model::ModelConfig;
use crate::engine::scene::{NodeId, SceneGraph, SceneNode};

/// Edge of the cube every recording layer draws per slot.
pub const CUBE: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum LayerCall {
    SetEnvironment(usize),
    LoadModelConfig,
    SetLastLayer(usize),
    Assemble(usize),
    Init { slots: Vec<Vec3>, depth_scale: f32 },
    UpdateValue(Option<Vec<f32>>),
    Clear,
    HoverIn(NodeId),
    HoverOut,
    Click(NodeId),
}

pub type CallLog = Arc<Mutex<Vec<(&'static str, LayerCall)>>>;

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Calls recorded for one layer, in order.
pub fn calls_for(log: &CallLog, label: &str) -> Vec<LayerCall> {
    log.lock()
        .unwrap()
        .iter()
        .filter(|(l, _)| *l == label)
        .map(|(_, call)| call.clone())
        .collect()
}

/// Every recorded call, in order, with its layer label.
pub fn all_calls(log: &CallLog) -> Vec<(&'static str, LayerCall)> {
    log.lock().unwrap().clone()
}

pub struct RecordingLayer {
    label: &'static str,
    log: CallLog,
    kind: LayerKind,
    depth: Option<u32>,
    thickness: Option<usize>,
    merged: bool,
    shape: Option<Vec<usize>>,
    hoverable: bool,
    clickable: bool,
    fail_init: bool,
    env: Option<LayerEnvironment>,
}

impl RecordingLayer {
    pub fn new(label: &'static str, log: &CallLog) -> Self {
        Self {
            label,
            log: Arc::clone(log),
            kind: LayerKind::Dense,
            depth: None,
            thickness: None,
            merged: false,
            shape: None,
            hoverable: true,
            clickable: true,
            fail_init: false,
            env: None,
        }
    }

    pub fn with_kind(mut self, kind: LayerKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn grouped(mut self, thickness: usize) -> Self {
        self.thickness = Some(thickness);
        self
    }

    pub fn merged(mut self) -> Self {
        self.merged = true;
        self
    }

    pub fn with_shape(mut self, shape: Vec<usize>) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn interactive(mut self, hoverable: bool, clickable: bool) -> Self {
        self.hoverable = hoverable;
        self.clickable = clickable;
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    fn record(&self, call: LayerCall) {
        self.log.lock().unwrap().push((self.label, call));
    }
}

impl LayerHandle for RecordingLayer {
    fn kind(&self) -> LayerKind {
        self.kind
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
        self.record(LayerCall::SetEnvironment(env.layer_index));
    }

    fn load_model_config(&mut self, _config: &ModelConfig) {
        self.record(LayerCall::LoadModelConfig);
    }

    fn set_last_layer(&mut self, predecessor: LayerLink) {
        self.record(LayerCall::SetLastLayer(predecessor.layer_index));
    }

    fn assemble(&mut self, layer_index: usize, _model: &ModelContext<'_>) {
        self.record(LayerCall::Assemble(layer_index));
    }

    fn init(
        &mut self,
        scene: &mut SceneGraph,
        placement: &LayerPlacement,
        depth_scale: f32,
    ) -> Result<(), LayerError> {
        self.record(LayerCall::Init {
            slots: placement.slots().to_vec(),
            depth_scale,
        });
        if self.fail_init {
            return Err(LayerError::Placement("refused by test".into()));
        }

        let env = self.env.ok_or(LayerError::MissingEnvironment)?;
        for (element, slot) in placement.slots().iter().enumerate() {
            scene.insert_child(
                env.scene_root,
                SceneNode::mesh(Vec3::splat(CUBE))
                    .with_transform(Transform::from_translation(*slot))
                    .with_layer_index(env.layer_index)
                    .with_element(element)
                    .hoverable(self.hoverable)
                    .clickable(self.clickable),
            )?;
        }
        Ok(())
    }

    fn update_value(&mut self, _scene: &mut SceneGraph, value: Option<&[f32]>) -> Result<(), LayerError> {
        self.record(LayerCall::UpdateValue(value.map(<[f32]>::to_vec)));
        Ok(())
    }

    fn clear(&mut self, _scene: &mut SceneGraph) {
        self.record(LayerCall::Clear);
    }

    fn handle_hover_in(&mut self, _scene: &mut SceneGraph, element: NodeId) {
        self.record(LayerCall::HoverIn(element));
    }

    fn handle_hover_out(&mut self, _scene: &mut SceneGraph) {
        self.record(LayerCall::HoverOut);
    }

    fn handle_click(&mut self, _scene: &mut SceneGraph, element: NodeId) {
        self.record(LayerCall::Click(element));
    }
}
