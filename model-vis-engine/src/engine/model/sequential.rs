use std::iter;

use bevy::prelude::*;

use super::config::ModelConfig;
use super::error::{LoadError, ModelError};
use super::predictor::{LayerValue, PredictCallback, Predictor};
use crate::engine::camera::CameraFraming;
use crate::engine::core::app_state::ModelState;
use crate::engine::interaction::InteractionRouter;
use crate::engine::layer::{LayerEnvironment, LayerHandle, LayerLink, ModelContext};
use crate::engine::layout::{Layout, compute_layout};
use crate::engine::scene::{NodeId, SceneGraph, SceneNode};

/// Invoked once, with no arguments, after the scene has been built.
pub type InitCallback = Box<dyn FnOnce() + Send + Sync>;

/// Progress of the optional resource load that precedes scene construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Unloaded,
    Loaded,
}

/// Owns the layer sequence and drives it through layout, prediction and interaction.
///
/// Layers are added in pipeline order with [`add`](Self::add), then [`init`](Self::init)
/// builds the scene, either immediately or after [`complete_loading`](Self::complete_loading)
/// when the configuration declares a model resource.
#[derive(Resource)]
pub struct SequentialModel {
    configuration: ModelConfig,
    layers: Vec<Box<dyn LayerHandle>>,
    scene: SceneGraph,
    scene_root: NodeId,
    router: InteractionRouter,
    state: ModelState,
    load_phase: LoadPhase,
    pending_init: Option<InitCallback>,
    predictor: Option<Box<dyn Predictor>>,
    input_value: Option<LayerValue>,
    predict_result: Option<Vec<LayerValue>>,
    camera: CameraFraming,
    layout: Option<Layout>,
    events_registered: bool,
}

impl SequentialModel {
    pub fn new(configuration: ModelConfig) -> Self {
        let mut scene = SceneGraph::new();
        let scene_root = scene.insert(SceneNode::group());
        let camera = CameraFraming::for_layer_count(0, configuration.layout.layer_interval);

        Self {
            configuration,
            layers: Vec::new(),
            scene,
            scene_root,
            router: InteractionRouter::default(),
            state: ModelState::Constructed,
            load_phase: LoadPhase::Unloaded,
            pending_init: None,
            predictor: None,
            input_value: None,
            predict_result: None,
            camera,
            layout: None,
            events_registered: false,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(Self::new(ModelConfig::from_json(json)?))
    }

    /// Append a layer. Returns its 1-based index in the sequence.
    pub fn add(&mut self, layer: impl LayerHandle + 'static) -> Result<usize, ModelError> {
        self.add_boxed(Box::new(layer))
    }

    pub fn add_boxed(&mut self, mut layer: Box<dyn LayerHandle>) -> Result<usize, ModelError> {
        if self.state != ModelState::Constructed {
            return Err(ModelError::AddAfterInit);
        }

        if !layer.is_merged() {
            if let Some(tail) = self.layers.last() {
                layer.set_last_layer(tail.link(self.layers.len()));
            }
        }

        let layer_index = self.layers.len() + 1;
        layer.set_environment(LayerEnvironment {
            layer_index,
            scene_root: self.scene_root,
        });
        layer.load_model_config(&self.configuration);

        let links: Vec<LayerLink> = self
            .layers
            .iter()
            .enumerate()
            .map(|(index, existing)| existing.link(index + 1))
            .chain(iter::once(layer.link(layer_index)))
            .collect();
        layer.assemble(
            layer_index,
            &ModelContext {
                config: &self.configuration,
                layers: &links,
            },
        );

        self.layers.push(layer);
        Ok(layer_index)
    }

    /// Start the two-phase initialisation.
    ///
    /// Without a declared resource the scene is built now and `callback` runs before
    /// returning `Ready`. With one, the model waits in `Loading` until
    /// [`complete_loading`](Self::complete_loading) reports the outcome.
    pub fn init(&mut self, callback: Option<InitCallback>) -> Result<ModelState, ModelError> {
        if self.state != ModelState::Constructed {
            return Err(ModelError::AlreadyInitialised);
        }
        info!("Initialising sequential model with {} layers", self.layers.len());

        if self.configuration.has_loader() {
            self.pending_init = callback;
            self.state = ModelState::Loading;
            return Ok(self.state);
        }

        self.finish_init(callback)
    }

    /// Report the outcome of the resource load started by [`init`](Self::init).
    ///
    /// On failure the init callback is dropped without being called and the scene is
    /// never built.
    pub fn complete_loading(
        &mut self,
        outcome: Result<Box<dyn Predictor>, LoadError>,
    ) -> Result<ModelState, ModelError> {
        if self.state != ModelState::Loading {
            return Err(ModelError::NotLoading(self.state));
        }

        match outcome {
            Err(e) => {
                self.pending_init = None;
                Err(e.into())
            }
            Ok(predictor) => {
                self.predictor = Some(predictor);
                self.load_phase = LoadPhase::Loaded;
                let callback = self.pending_init.take();
                self.finish_init(callback)
            }
        }
    }

    fn finish_init(&mut self, callback: Option<InitCallback>) -> Result<ModelState, ModelError> {
        self.init_vis_model()?;
        if let Some(callback) = callback {
            callback();
        }
        Ok(self.state)
    }

    /// Frame the camera, build every layer and open the model to pointer events.
    /// Runs at most once per model, and only after a declared resource has loaded.
    fn init_vis_model(&mut self) -> Result<(), ModelError> {
        match self.state {
            ModelState::Building | ModelState::Ready => return Err(ModelError::AlreadyInitialised),
            ModelState::Loading if self.load_phase == LoadPhase::Unloaded => {
                return Err(ModelError::ResourcePending);
            }
            _ => {}
        }

        self.state = ModelState::Building;
        self.update_camera(self.layers.len());
        self.create_model()?;
        self.events_registered = true;
        self.state = ModelState::Ready;
        info!("Sequential model ready ({} layers)", self.layers.len());
        Ok(())
    }

    fn update_camera(&mut self, layer_count: usize) {
        self.camera = CameraFraming::for_layer_count(layer_count, self.configuration.layout.layer_interval);
    }

    /// Lay out the sequence and initialise each layer at its slot, in order.
    /// The first failing layer aborts the rest.
    pub fn create_model(&mut self) -> Result<&Layout, ModelError> {
        info!("Creating sequential model...");
        let attributes: Vec<_> = self.layers.iter().map(|layer| layer.layout_attributes()).collect();
        let layout = compute_layout(&attributes, &self.configuration.layout);

        let slots = self
            .layers
            .iter_mut()
            .zip(&layout.placements)
            .zip(&layout.depth_scales);
        for (index, ((layer, placement), depth_scale)) in slots.enumerate() {
            layer
                .init(&mut self.scene, placement, *depth_scale)
                .map_err(|source| ModelError::LayerInit {
                    layer_index: index + 1,
                    source,
                })?;
        }

        Ok(self.layout.insert(layout))
    }

    /// Run `input` through the predictor (when one is loaded) and refresh every layer.
    ///
    /// Requires a `Ready` model. Layer 0 always receives `input`. Later layers receive
    /// their predictor output, or `None` when there is no predictor or the layer
    /// renders itself.
    pub fn predict(&mut self, input: LayerValue, callback: Option<PredictCallback>) -> Result<(), ModelError> {
        let Some(first) = self.layers.first() else {
            return Err(ModelError::EmptyModel);
        };
        if self.state != ModelState::Ready {
            return Err(ModelError::NotReady(self.state));
        }
        let input_shape = first.shape().map(<[usize]>::to_vec).unwrap_or_default();

        let input = self.input_value.insert(input);
        if let Some(predictor) = self.predictor.as_mut() {
            let result = predictor.predict(input, &input_shape, callback)?;
            let expected = self.layers.len() - 1;
            if result.len() != expected {
                return Err(ModelError::MalformedPrediction {
                    expected,
                    actual: result.len(),
                });
            }
            self.predict_result = Some(result);
        }

        self.update_layer_vis()
    }

    fn update_layer_vis(&mut self) -> Result<(), ModelError> {
        self.update_input_vis()?;
        self.update_layer_predict_vis()
    }

    fn update_input_vis(&mut self) -> Result<(), ModelError> {
        let Some(first) = self.layers.first_mut() else {
            return Ok(());
        };
        first
            .update_value(&mut self.scene, self.input_value.as_deref())
            .map_err(|source| ModelError::LayerUpdate {
                layer_index: 1,
                source,
            })
    }

    fn update_layer_predict_vis(&mut self) -> Result<(), ModelError> {
        for (index, layer) in self.layers.iter_mut().enumerate().skip(1) {
            let value = if layer.kind().is_self_rendering() {
                None
            } else {
                self.predict_result
                    .as_ref()
                    .and_then(|result| result.get(index - 1))
                    .map(Vec::as_slice)
            };
            layer
                .update_value(&mut self.scene, value)
                .map_err(|source| ModelError::LayerUpdate {
                    layer_index: index + 1,
                    source,
                })?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear(&mut self.scene);
        }
    }

    /// Route a pointer move. Returns the 0-based index of the newly hovered layer.
    pub fn on_pointer_move(&mut self, ray: Option<Ray3d>) -> Option<usize> {
        if !self.events_registered {
            return None;
        }
        self.router.on_pointer_move(&mut self.layers, &mut self.scene, ray)
    }

    /// Route a click. Returns the 0-based index of the clicked layer.
    pub fn on_pointer_click(&mut self, ray: Option<Ray3d>) -> Option<usize> {
        if !self.events_registered {
            return None;
        }
        self.router.on_pointer_click(&mut self.layers, &mut self.scene, ray)
    }

    pub fn configuration(&self) -> &ModelConfig {
        &self.configuration
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn load_phase(&self) -> LoadPhase {
        self.load_phase
    }

    pub fn is_initialised(&self) -> bool {
        self.state == ModelState::Ready
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, index: usize) -> Option<&dyn LayerHandle> {
        self.layers.get(index).map(|layer| layer.as_ref())
    }

    pub fn layers(&self) -> impl Iterator<Item = &dyn LayerHandle> {
        self.layers.iter().map(|layer| layer.as_ref())
    }

    /// Shape of the first layer, which is the shape `predict` expects.
    pub fn input_shape(&self) -> Option<&[usize]> {
        self.layers.first().and_then(|layer| layer.shape())
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_root(&self) -> NodeId {
        self.scene_root
    }

    pub fn camera(&self) -> CameraFraming {
        self.camera
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn hovered_layer(&self) -> Option<usize> {
        self.router.hovered_layer()
    }

    pub fn input_value(&self) -> Option<&[f32]> {
        self.input_value.as_deref()
    }

    pub fn predict_result(&self) -> Option<&[LayerValue]> {
        self.predict_result.as_deref()
    }

    pub fn has_predictor(&self) -> bool {
        self.predictor.is_some()
    }
}
