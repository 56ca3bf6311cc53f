use bevy::prelude::*;

use crate::engine::model::{LayerValue, SequentialModel};

/// Run a prediction for `input`.
#[derive(Event, Debug, Clone)]
pub struct PredictRequest {
    pub input: LayerValue,
}

/// Reset every layer's interaction and value state.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ClearRequest;

pub fn handle_predict_requests(mut requests: EventReader<PredictRequest>, mut model: ResMut<SequentialModel>) {
    for request in requests.read() {
        match model.predict(request.input.clone(), None) {
            Ok(()) => info!("Prediction applied to {} layers", model.len()),
            Err(e) => error!("Prediction rejected: {e}"),
        }
    }
}

pub fn handle_clear_requests(mut requests: EventReader<ClearRequest>, mut model: ResMut<SequentialModel>) {
    if requests.read().count() > 0 {
        model.clear();
        info!("Model cleared");
    }
}

/// Linear ramp over `[0, 1)` with one value per element of `shape`.
pub fn ramp_input(shape: &[usize]) -> LayerValue {
    let len: usize = shape.iter().product();
    (0..len).map(|i| i as f32 / len as f32).collect()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    model: Res<SequentialModel>,
    mut predict_events: EventWriter<PredictRequest>,
    mut clear_events: EventWriter<ClearRequest>,
) {
    // P: predict with a ramp input
    if keyboard.just_pressed(KeyCode::KeyP) {
        predict_events.write(PredictRequest {
            input: ramp_input(model.input_shape().unwrap_or(&[])),
        });
    }

    // C: clear
    if keyboard.just_pressed(KeyCode::KeyC) {
        clear_events.write(ClearRequest);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn handle_keyboard_shortcuts() {
    // No keyboard shortcuts in WASM builds - the host page sends requests.
}
