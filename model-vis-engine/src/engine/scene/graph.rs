use bevy::prelude::*;
use constants::render_settings::LAYER_BASE_COLOUR;
use thiserror::Error;

use super::ray::ray_obb_distance;

/// Handle to a node. Slots are never reused, so a stale id never aliases a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Transform-only container, never hit by rays.
    Group,
    /// Solid box. The only kind the interaction router treats as a surface.
    Mesh,
    /// Wireframe box. Hit by rays, ignored by pointer routing.
    Outline,
}

impl NodeKind {
    pub fn is_surface(self) -> bool {
        matches!(self, Self::Mesh)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("scene node {0:?} does not exist")]
    MissingNode(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: NodeKind,
    /// Transform relative to the parent node.
    pub transform: Transform,
    /// Box extent in local units. Ignored for groups.
    pub size: Vec3,
    pub colour: Color,
    pub visible: bool,
    pub hoverable: bool,
    pub clickable: bool,
    /// 1-based index of the owning layer in the model's sequence.
    pub layer_index: Option<usize>,
    /// Layer-defined sub-element number (feature map, group member, ...).
    pub element: Option<usize>,
    parent: Option<NodeId>,
}

impl SceneNode {
    fn new(kind: NodeKind, size: Vec3) -> Self {
        Self {
            kind,
            transform: Transform::IDENTITY,
            size,
            colour: LAYER_BASE_COLOUR,
            visible: true,
            hoverable: false,
            clickable: false,
            layer_index: None,
            element: None,
            parent: None,
        }
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group, Vec3::ZERO)
    }

    pub fn mesh(size: Vec3) -> Self {
        Self::new(NodeKind::Mesh, size)
    }

    pub fn outline(size: Vec3) -> Self {
        Self::new(NodeKind::Outline, size)
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_colour(mut self, colour: Color) -> Self {
        self.colour = colour;
        self
    }

    pub fn with_layer_index(mut self, layer_index: usize) -> Self {
        self.layer_index = Some(layer_index);
        self
    }

    pub fn with_element(mut self, element: usize) -> Self {
        self.element = Some(element);
        self
    }

    pub fn hoverable(mut self, hoverable: bool) -> Self {
        self.hoverable = hoverable;
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// A ray hit, ordered nearest first by [`SceneGraph::intersect_ray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Option<SceneNode>>,
    revision: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped on every structural or node change; the render loop keys off it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&mut self, mut node: SceneNode) -> NodeId {
        node.parent = None;
        self.push(node)
    }

    pub fn insert_child(&mut self, parent: NodeId, mut node: SceneNode) -> Result<NodeId, SceneError> {
        if self.get(parent).is_none() {
            return Err(SceneError::MissingNode(parent));
        }
        node.parent = Some(parent);
        Ok(self.push(node))
    }

    fn push(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        self.revision += 1;
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn update(&mut self, id: NodeId, f: impl FnOnce(&mut SceneNode)) -> Result<(), SceneError> {
        let node = self
            .nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(SceneError::MissingNode(id))?;
        let parent = node.parent;
        f(node);
        // Re-parenting would allow cycles.
        node.parent = parent;
        self.revision += 1;
        Ok(())
    }

    /// Remove a node and its whole subtree. Returns how many nodes were removed.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, SceneError> {
        if self.get(id).is_none() {
            return Err(SceneError::MissingNode(id));
        }

        let mut pending = vec![id];
        let mut removed = 0;
        while let Some(current) = pending.pop() {
            pending.extend(self.children(current));
            self.nodes[current.index()] = None;
            removed += 1;
        }
        self.revision += 1;
        Ok(removed)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(move |(_, node)| node.parent == Some(id))
            .map(|(child, _)| child)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| node.as_ref().map(|n| (NodeId(index as u32), n)))
    }

    /// Compose transforms from the root down to `id`.
    pub fn world_transform(&self, id: NodeId) -> Option<GlobalTransform> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id)?;
            chain.push(node.transform);
            current = node.parent;
        }

        let root = chain.pop()?;
        Some(
            chain
                .into_iter()
                .rev()
                .fold(GlobalTransform::from(root), |acc, local| acc * local),
        )
    }

    /// A node is visible only when it and every ancestor are.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.get(node_id) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Intersect every visible drawable node in the graph, nearest hit first.
    pub fn intersect_ray(&self, ray: Ray3d) -> Vec<SceneHit> {
        let mut hits: Vec<SceneHit> = self
            .iter()
            .filter(|(id, node)| node.kind != NodeKind::Group && self.is_visible(*id))
            .filter_map(|(id, node)| {
                let xf = self.world_transform(id)?;
                let distance = ray_obb_distance(ray, &xf, node.size)?;
                Some(SceneHit {
                    node: id,
                    distance,
                    point: ray.get_point(distance),
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ray_towards_negative_z(y: f32) -> Ray3d {
        Ray3d::new(Vec3::new(0.0, y, 100.0), Dir3::NEG_Z)
    }

    #[test]
    fn child_transform_composes_with_parent() {
        let mut scene = SceneGraph::new();
        let root = scene.insert(SceneNode::group().with_transform(Transform::from_xyz(0.0, 10.0, 0.0)));
        let child = scene
            .insert_child(root, SceneNode::mesh(Vec3::ONE).with_transform(Transform::from_xyz(1.0, 0.0, 0.0)))
            .unwrap();

        let xf = scene.world_transform(child).unwrap();
        assert_eq!(xf.translation(), Vec3::new(1.0, 10.0, 0.0));
        assert_eq!(scene.get(child).unwrap().parent(), Some(root));
    }

    #[test]
    fn insert_child_under_missing_parent_fails() {
        let mut scene = SceneGraph::new();
        let root = scene.insert(SceneNode::group());
        scene.remove(root).unwrap();

        assert_eq!(
            scene.insert_child(root, SceneNode::mesh(Vec3::ONE)),
            Err(SceneError::MissingNode(root))
        );
    }

    #[test]
    fn remove_takes_the_subtree() {
        let mut scene = SceneGraph::new();
        let root = scene.insert(SceneNode::group());
        let group = scene.insert_child(root, SceneNode::group()).unwrap();
        scene.insert_child(group, SceneNode::mesh(Vec3::ONE)).unwrap();
        let other = scene.insert(SceneNode::mesh(Vec3::ONE));

        assert_eq!(scene.remove(group), Ok(2));
        assert_eq!(scene.len(), 2);
        assert!(scene.get(other).is_some());
        assert_eq!(scene.children(root).count(), 0);
    }

    #[test]
    fn every_change_bumps_the_revision() {
        let mut scene = SceneGraph::new();
        let id = scene.insert(SceneNode::mesh(Vec3::ONE));
        let before = scene.revision();

        scene.update(id, |node| node.colour = Color::WHITE).unwrap();
        assert!(scene.revision() > before);
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let mut scene = SceneGraph::new();
        let far = scene.insert(SceneNode::mesh(Vec3::splat(2.0)));
        let near = scene.insert(SceneNode::mesh(Vec3::splat(2.0)).with_transform(Transform::from_xyz(0.0, 0.0, 20.0)));

        let hits = scene.intersect_ray(ray_towards_negative_z(0.0));
        assert_eq!(hits.iter().map(|h| h.node).collect::<Vec<_>>(), vec![near, far]);
        assert_relative_eq!(hits[0].distance, 79.0);
        assert_relative_eq!(hits[0].point.z, 21.0);
    }

    #[test]
    fn groups_and_hidden_subtrees_are_not_hit() {
        let mut scene = SceneGraph::new();
        let hidden = scene.insert(SceneNode::group());
        scene.insert_child(hidden, SceneNode::mesh(Vec3::splat(2.0))).unwrap();
        scene.update(hidden, |node| node.visible = false).unwrap();
        scene.insert(SceneNode::group());

        assert!(scene.intersect_ray(ray_towards_negative_z(0.0)).is_empty());
    }

    #[test]
    fn outlines_are_hit_but_are_not_surfaces() {
        let mut scene = SceneGraph::new();
        let outline = scene.insert(SceneNode::outline(Vec3::splat(2.0)));

        let hits = scene.intersect_ray(ray_towards_negative_z(0.0));
        assert_eq!(hits.len(), 1);
        assert!(!scene.get(outline).unwrap().kind.is_surface());
    }

    #[test]
    fn update_cannot_reparent() {
        let mut scene = SceneGraph::new();
        let root = scene.insert(SceneNode::group());
        let child = scene.insert_child(root, SceneNode::mesh(Vec3::ONE)).unwrap();

        scene.update(child, |node| *node = SceneNode::mesh(Vec3::ONE)).unwrap();
        assert_eq!(scene.get(child).unwrap().parent(), Some(root));
    }
}
