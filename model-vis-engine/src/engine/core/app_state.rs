use bevy::prelude::*;

use crate::engine::model::{InitCallback, SequentialModel};

/// Lifecycle of the visualised model, mirrored from [`SequentialModel::state`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum ModelState {
    /// Layers may still be added.
    #[default]
    Constructed,
    /// Waiting on the model resource declared in the configuration.
    Loading,
    /// Layout computed, layers being initialised.
    Building,
    /// Scene built, pointer events routed.
    Ready,
}

/// Callback handed to the model's `init` at startup.
#[derive(Resource, Default)]
pub struct InitHook(pub Option<InitCallback>);

impl InitHook {
    pub fn new(callback: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self(Some(Box::new(callback)))
    }
}

pub fn begin_model_init(mut model: ResMut<SequentialModel>, mut hook: ResMut<InitHook>) {
    println!("=== SEQUENTIAL MODEL VISUALISER ({} layers) ===", model.len());
    match model.init(hook.0.take()) {
        Ok(state) => info!("Model init started, now {:?}", state),
        Err(e) => error!("Model init failed: {e}"),
    }
}

// Follow the model's own state so schedules keyed on ModelState run.
pub fn sync_model_state(
    model: Res<SequentialModel>,
    state: Res<State<ModelState>>,
    mut next_state: ResMut<NextState<ModelState>>,
) {
    let target = model.state();
    if *state.get() != target {
        println!("→ Transitioning to {:?} state", target);
        next_state.set(target);
    }
}
