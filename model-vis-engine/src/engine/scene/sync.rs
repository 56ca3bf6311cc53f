use std::collections::HashMap;

use bevy::prelude::*;

use super::graph::{NodeId, NodeKind};
use crate::engine::model::SequentialModel;

/// Marks an entity drawn for a scene graph mesh node.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneNodeLink(pub NodeId);

#[derive(Debug, Clone, Copy)]
struct MirroredNode {
    entity: Entity,
    size: Vec3,
}

/// Entities spawned for the scene graph, keyed by node.
#[derive(Resource, Debug, Default)]
pub struct SceneMirror {
    entities: HashMap<NodeId, MirroredNode>,
    revision: Option<u64>,
}

impl SceneMirror {
    pub fn entity(&self, node: NodeId) -> Option<Entity> {
        self.entities.get(&node).map(|mirrored| mirrored.entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Copy mesh nodes into entities whenever the scene graph revision changes.
///
/// Nodes keep their entity across frames; a resized node is respawned and a removed
/// node is despawned.
pub fn sync_scene_graph(
    mut commands: Commands,
    model: Res<SequentialModel>,
    mut mirror: ResMut<SceneMirror>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut drawn: Query<(&mut Transform, &mut Visibility, &MeshMaterial3d<StandardMaterial>), With<SceneNodeLink>>,
) {
    let scene = model.scene();
    if mirror.revision == Some(scene.revision()) {
        return;
    }
    mirror.revision = Some(scene.revision());

    let removed: Vec<NodeId> = mirror
        .entities
        .keys()
        .filter(|id| scene.get(**id).is_none())
        .copied()
        .collect();
    for id in removed {
        if let Some(mirrored) = mirror.entities.remove(&id) {
            commands.entity(mirrored.entity).despawn();
        }
    }

    for (id, node) in scene.iter().filter(|(_, node)| node.kind == NodeKind::Mesh) {
        let Some(world) = scene.world_transform(id) else {
            continue;
        };
        let transform = world.compute_transform();
        let visibility = if scene.is_visible(id) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        match mirror.entities.get(&id).copied() {
            Some(mirrored) if mirrored.size == node.size => {
                if let Ok((mut current, mut shown, material)) = drawn.get_mut(mirrored.entity) {
                    *current = transform;
                    *shown = visibility;
                    if let Some(material) = materials.get_mut(&material.0) {
                        material.base_color = node.colour;
                    }
                }
            }
            stale => {
                if let Some(mirrored) = stale {
                    commands.entity(mirrored.entity).despawn();
                }
                let entity = commands
                    .spawn((
                        Mesh3d(meshes.add(Cuboid::from_size(node.size))),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: node.colour,
                            alpha_mode: AlphaMode::Blend,
                            ..default()
                        })),
                        transform,
                        visibility,
                        SceneNodeLink(id),
                    ))
                    .id();
                mirror.entities.insert(
                    id,
                    MirroredNode {
                        entity,
                        size: node.size,
                    },
                );
            }
        }
    }
}

/// Draw visible outline nodes as wireframe boxes.
pub fn draw_scene_outlines(model: Res<SequentialModel>, mut gizmos: Gizmos) {
    let scene = model.scene();
    for (id, node) in scene.iter().filter(|(_, node)| node.kind == NodeKind::Outline) {
        if !scene.is_visible(id) {
            continue;
        }
        if let Some(world) = scene.world_transform(id) {
            gizmos.cuboid(world * Transform::from_scale(node.size), node.colour);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy::asset::AssetPlugin;

    use super::*;
    use crate::engine::layer::{BlockLayer, LayerKind};
    use crate::engine::model::ModelConfig;

    fn app_with_model() -> App {
        let mut model = SequentialModel::new(ModelConfig::default());
        model.add(BlockLayer::new(LayerKind::Input).with_shape(vec![4])).unwrap();
        model.add(BlockLayer::new(LayerKind::Conv).grouped(2)).unwrap();
        model.init(None).unwrap();

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<SceneMirror>()
            .insert_resource(model)
            .add_systems(Update, sync_scene_graph);
        app
    }

    fn linked_entities(app: &mut App) -> usize {
        app.world_mut()
            .query::<&SceneNodeLink>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn every_mesh_node_gets_one_entity() {
        let mut app = app_with_model();
        app.update();

        let meshes = app
            .world()
            .resource::<SequentialModel>()
            .scene()
            .iter()
            .filter(|(_, node)| node.kind == NodeKind::Mesh)
            .count();
        assert_eq!(meshes, 3);
        assert_eq!(linked_entities(&mut app), meshes);
        assert_eq!(app.world().resource::<SceneMirror>().len(), meshes);
    }

    #[test]
    fn unchanged_scene_is_not_respawned() {
        let mut app = app_with_model();
        app.update();
        let node = app
            .world()
            .resource::<SequentialModel>()
            .scene()
            .iter()
            .find(|(_, node)| node.kind == NodeKind::Mesh)
            .map(|(id, _)| id)
            .unwrap();
        let before = app.world().resource::<SceneMirror>().entity(node);

        app.update();

        assert_eq!(app.world().resource::<SceneMirror>().entity(node), before);
        assert_eq!(linked_entities(&mut app), 3);
    }

    #[test]
    fn hover_colour_reaches_the_material() {
        let mut app = app_with_model();
        app.update();

        let (node, colour) = {
            let mut model = app.world_mut().resource_mut::<SequentialModel>();
            let hovered = model.on_pointer_move(Some(Ray3d::new(Vec3::new(0.0, -50.0, 100.0), Dir3::NEG_Z)));
            assert_eq!(hovered, Some(0));
            model
                .scene()
                .iter()
                .find(|(_, node)| node.kind == NodeKind::Mesh && node.layer_index == Some(1))
                .map(|(id, node)| (id, node.colour))
                .unwrap()
        };
        app.update();

        let entity = app.world().resource::<SceneMirror>().entity(node).unwrap();
        let handle = app
            .world()
            .get::<MeshMaterial3d<StandardMaterial>>(entity)
            .unwrap()
            .0
            .clone();
        let material = app
            .world()
            .resource::<Assets<StandardMaterial>>()
            .get(&handle)
            .unwrap();
        assert_eq!(material.base_color, colour);
    }
}
