use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::camera::{ndc_to_ray, normalize_pointer};
use crate::engine::model::SequentialModel;

/// The pointer moved; `ray` is `None` when the cursor left the viewport.
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerMoved {
    pub ray: Option<Ray3d>,
}

/// Primary button pressed, cast from the last known pointer position.
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerClicked {
    pub ray: Option<Ray3d>,
}

#[derive(Resource, Debug, Default)]
pub struct PointerState {
    last_ndc: Option<Vec2>,
}

impl PointerState {
    pub fn last_ndc(&self) -> Option<Vec2> {
        self.last_ndc
    }
}

/// Turn window cursor input into world rays and trigger pointer events.
pub fn emit_pointer_events(
    mut commands: Commands,
    mut cursor_moved: EventReader<CursorMoved>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera_transform, camera)) = cameras.single() else {
        return;
    };
    let world_from_clip = camera_transform.compute_matrix() * camera.clip_from_view().inverse();
    let cast = |ndc: Option<Vec2>| ndc.and_then(|ndc| ndc_to_ray(ndc, world_from_clip));

    if let Some(cursor) = cursor_moved.read().last() {
        pointer.last_ndc = normalize_pointer(cursor.position, window.size());
        commands.trigger(PointerMoved {
            ray: cast(pointer.last_ndc),
        });
    }

    if buttons.just_pressed(MouseButton::Left) {
        commands.trigger(PointerClicked {
            ray: cast(pointer.last_ndc),
        });
    }
}

fn on_pointer_moved(trigger: Trigger<PointerMoved>, mut model: ResMut<SequentialModel>) {
    model.on_pointer_move(trigger.event().ray);
}

fn on_pointer_clicked(trigger: Trigger<PointerClicked>, mut model: ResMut<SequentialModel>) {
    if let Some(layer) = model.on_pointer_click(trigger.event().ray) {
        debug!("Clicked layer {}", layer + 1);
    }
}

/// Observer entities listening for pointer events on behalf of the model.
///
/// Held as a resource while the model is live; [`unregister`](Self::unregister)
/// despawns both observers so no further events reach the model.
#[derive(Resource, Debug)]
pub struct PointerSubscription {
    move_observer: Entity,
    click_observer: Entity,
}

impl PointerSubscription {
    pub fn register(world: &mut World) -> Self {
        let move_observer = world.add_observer(on_pointer_moved).id();
        let click_observer = world.add_observer(on_pointer_clicked).id();
        Self {
            move_observer,
            click_observer,
        }
    }

    pub fn unregister(self, world: &mut World) {
        world.despawn(self.move_observer);
        world.despawn(self.click_observer);
    }
}

pub fn register_pointer_listeners(world: &mut World) {
    if world.contains_resource::<PointerSubscription>() {
        return;
    }
    let subscription = PointerSubscription::register(world);
    world.insert_resource(subscription);
    info!("Pointer listeners registered");
}

pub fn unregister_pointer_listeners(world: &mut World) {
    if let Some(subscription) = world.remove_resource::<PointerSubscription>() {
        subscription.unregister(world);
        info!("Pointer listeners removed");
    }
}
