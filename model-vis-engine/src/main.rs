use model_vis_engine::engine::model::{InitCallback, ModelConfig, ModelError};
use model_vis_engine::{BlockLayer, LayerKind, SequentialModel, create_app};

const DEMO_RESOURCE: &str = "models/demo.model.json";

fn main() {
    let model = match build_demo_model() {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Could not assemble the demo model: {e}");
            return;
        }
    };

    let on_ready: InitCallback =
        Box::new(|| println!("✓ Demo model ready: press P to predict, C to clear"));
    let mut app = create_app(model, Some(on_ready));

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}

/// Five-stage image classifier replayed from the demo resource.
fn build_demo_model() -> Result<SequentialModel, ModelError> {
    let mut model = SequentialModel::new(ModelConfig {
        resource: Some(DEMO_RESOURCE.into()),
        stats: true,
        ..Default::default()
    });

    model.add(BlockLayer::new(LayerKind::Input).with_shape(vec![4, 4]).with_depth(1))?;
    model.add(
        BlockLayer::new(LayerKind::Conv)
            .with_shape(vec![2, 2, 3])
            .with_depth(6)
            .grouped(3),
    )?;
    model.add(BlockLayer::new(LayerKind::Pooling).with_shape(vec![1, 1, 3]).with_depth(3))?;
    model.add(BlockLayer::new(LayerKind::Dense).with_shape(vec![8]))?;
    model.add(BlockLayer::new(LayerKind::Output).with_name("scores").with_shape(vec![3]))?;

    Ok(model)
}
