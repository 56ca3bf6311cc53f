//! Scene graph the layers draw into, and its mirror in the Bevy world.
//!
//! Layers never touch Bevy entities directly. They insert and update nodes in the
//! model-owned [`SceneGraph`]; the render loop copies that graph into entities every
//! frame and the interaction router ray casts against it.

/// Node arena with parent links, world transforms and ray queries.
pub mod graph;

/// Oriented bounding box ray intersection (slab method).
pub mod ray;

/// Render loop systems that mirror the scene graph into meshes and gizmos.
pub mod sync;

pub use graph::{NodeId, NodeKind, SceneError, SceneGraph, SceneHit, SceneNode};
