use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

use crate::engine::ModelVisPlugin;
use crate::engine::core::app_state::InitHook;
use crate::engine::core::window_config::create_window_config;
use crate::engine::model::{InitCallback, SequentialModel};

const BACKGROUND: Color = Color::srgb(0.08, 0.08, 0.1);

/// Build a windowed app that visualises `model`.
///
/// `on_ready` runs once, after the scene has been built.
pub fn create_app(model: SequentialModel, on_ready: Option<InitCallback>) -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .insert_resource(ClearColor(BACKGROUND))
        .insert_resource(model)
        .insert_resource(InitHook(on_ready))
        .add_plugins(ModelVisPlugin);

    app
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 300.0,
        ..default()
    });
}

fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 50.0, 150.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Camera and lighting. The camera is moved to the model's framing once it is ready.
pub fn setup_scene(mut commands: Commands) {
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
