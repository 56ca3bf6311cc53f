use bevy::prelude::*;

use crate::engine::layer::LayerHandle;
use crate::engine::scene::{NodeId, SceneGraph, SceneNode};

/// Tracks which layer the pointer is over and dispatches hover and click hooks.
///
/// At most one layer is hovered at a time. Every move first exits the previous
/// hover, then enters the nearest hoverable surface (if any).
#[derive(Debug, Default)]
pub struct InteractionRouter {
    hovered_layer: Option<usize>,
}

impl InteractionRouter {
    /// 0-based index of the hovered layer.
    pub fn hovered_layer(&self) -> Option<usize> {
        self.hovered_layer
    }

    pub fn on_pointer_move(
        &mut self,
        layers: &mut [Box<dyn LayerHandle>],
        scene: &mut SceneGraph,
        ray: Option<Ray3d>,
    ) -> Option<usize> {
        if let Some(previous) = self.hovered_layer.take() {
            if let Some(layer) = layers.get_mut(previous) {
                layer.handle_hover_out(scene);
            }
        }

        let (index, element) = pick(layers.len(), scene, ray, |node| node.hoverable)?;
        layers[index].handle_hover_in(scene, element);
        self.hovered_layer = Some(index);
        Some(index)
    }

    /// Clicks never change hover state.
    pub fn on_pointer_click(
        &self,
        layers: &mut [Box<dyn LayerHandle>],
        scene: &mut SceneGraph,
        ray: Option<Ray3d>,
    ) -> Option<usize> {
        let (index, element) = pick(layers.len(), scene, ray, |node| node.clickable)?;
        layers[index].handle_click(scene, element);
        Some(index)
    }
}

/// Nearest surface accepted by `accepts`, resolved to its owning layer.
///
/// Hits are walked nearest first. Only mesh nodes count as surfaces; a surface
/// whose stamped layer index does not resolve is skipped.
fn pick(
    layer_count: usize,
    scene: &SceneGraph,
    ray: Option<Ray3d>,
    accepts: impl Fn(&SceneNode) -> bool,
) -> Option<(usize, NodeId)> {
    let ray = ray?;
    scene.intersect_ray(ray).into_iter().find_map(|hit| {
        let node = scene.get(hit.node)?;
        if !node.kind.is_surface() || !accepts(node) {
            return None;
        }

        let index = node
            .layer_index
            .and_then(|index| index.checked_sub(1))
            .filter(|index| *index < layer_count);
        if index.is_none() {
            debug!("Ignoring hit on {:?}: no owning layer", hit.node);
        }
        index.map(|index| (index, hit.node))
    })
}
