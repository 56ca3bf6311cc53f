use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::camera::apply_camera_framing;
use crate::engine::core::app_setup::setup_scene;
use crate::engine::core::app_state::{InitHook, ModelState, begin_model_init, sync_model_state};
use crate::engine::interaction::PointerState;
use crate::engine::interaction::pointer::{emit_pointer_events, register_pointer_listeners};
use crate::engine::loading::ResourceLoader;
use crate::engine::loading::model_resource::ModelResource;
use crate::engine::loading::resource_loader::{poll_resource_loading, start_resource_loading};
use crate::engine::scene::sync::{SceneMirror, draw_scene_outlines, sync_scene_graph};
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_stats_overlay};
use crate::engine::systems::requests::{
    ClearRequest, PredictRequest, handle_clear_requests, handle_keyboard_shortcuts,
    handle_predict_requests,
};

/// Drives a [`SequentialModel`](crate::engine::model::SequentialModel) resource.
///
/// The model must be inserted before the app runs. An optional [`InitHook`] holds
/// the callback passed to the model's `init`.
pub struct ModelVisPlugin;

impl Plugin for ModelVisPlugin {
    fn build(&self, app: &mut App) {
        // Registers ModelResource as a loadable asset type from *.model.json files.
        app.add_plugins(JsonAssetPlugin::<ModelResource>::new(&["model.json"]))
            .init_state::<ModelState>()
            .init_resource::<InitHook>()
            .init_resource::<ResourceLoader>()
            .init_resource::<PointerState>()
            .init_resource::<SceneMirror>()
            .add_event::<PredictRequest>()
            .add_event::<ClearRequest>();

        app.add_systems(
            Startup,
            (setup_scene, begin_model_init, spawn_stats_overlay).chain(),
        )
        .add_systems(Update, sync_model_state)
        .add_systems(OnEnter(ModelState::Loading), start_resource_loading)
        .add_systems(
            Update,
            poll_resource_loading.run_if(in_state(ModelState::Loading)),
        )
        .add_systems(
            OnEnter(ModelState::Ready),
            (apply_camera_framing, register_pointer_listeners),
        );

        let runtime_systems = (
            emit_pointer_events,
            handle_keyboard_shortcuts, // Native shortcuts or no-op for WASM
            handle_predict_requests,
            handle_clear_requests,
            sync_scene_graph,
            draw_scene_outlines,
        );
        app.add_systems(
            Update,
            runtime_systems.chain().run_if(in_state(ModelState::Ready)),
        );

        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(Update, fps_text_update_system);
        }
    }
}
