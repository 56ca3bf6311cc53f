use bevy::asset::LoadState;
use bevy::prelude::*;

use super::model_resource::{ModelResource, ReplayPredictor};
use crate::engine::model::{LoadError, Predictor, SequentialModel};

#[derive(Resource, Default)]
pub struct ResourceLoader {
    handle: Option<Handle<ModelResource>>,
    path: String,
}

// Start loading the resource the model configuration declares
pub fn start_resource_loading(
    mut loader: ResMut<ResourceLoader>,
    model: Res<SequentialModel>,
    asset_server: Res<AssetServer>,
) {
    let Some(path) = model.configuration().resource.clone() else {
        warn!("Model entered Loading without a resource path");
        return;
    };

    println!("Loading model resource from: {}", path);
    loader.handle = Some(asset_server.load(path.clone()));
    loader.path = path;
}

// Hand the loaded resource (or the failure) to the model
pub fn poll_resource_loading(
    mut loader: ResMut<ResourceLoader>,
    mut model: ResMut<SequentialModel>,
    asset_server: Res<AssetServer>,
    resources: Res<Assets<ModelResource>>,
) {
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    let outcome = if let Some(resource) = resources.get(&handle) {
        resource
            .validate(&loader.path)
            .map(|()| Box::new(ReplayPredictor::new(resource.clone())) as Box<dyn Predictor>)
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle.id()) {
        Err(LoadError::Asset {
            path: loader.path.clone(),
            reason: err.to_string(),
        })
    } else {
        return;
    };

    loader.handle = None;
    match model.complete_loading(outcome) {
        Ok(state) => println!("✓ Model resource loaded, model is {:?}", state),
        Err(e) => error!("Model resource not usable: {e}"),
    }
}
