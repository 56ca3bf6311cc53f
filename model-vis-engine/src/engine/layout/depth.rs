use super::LayoutAttributes;

/// One depth scale per layer (not per group member).
///
/// Each layer's declared depth (1 when undeclared) is divided by the largest declared
/// depth and multiplied by `max_depth_in_layer`; results at or below 1 are floored
/// to 1. Undeclared depths never raise the maximum. When no layer declares a positive
/// depth every scale is 1.
pub fn compute_depth_scales(layers: &[LayoutAttributes], max_depth_in_layer: f32) -> Vec<f32> {
    let max_depth = layers
        .iter()
        .filter_map(|layer| layer.depth)
        .max()
        .filter(|depth| *depth > 0);

    let Some(max_depth) = max_depth else {
        return vec![1.0; layers.len()];
    };

    layers
        .iter()
        .map(|layer| {
            let raw = layer.depth.unwrap_or(1) as f32;
            let scale = raw / max_depth as f32 * max_depth_in_layer;
            if scale > 1.0 { scale } else { 1.0 }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn deepest_layer_gets_the_maximum_scale() {
        let layers = [
            LayoutAttributes::single(Some(4)),
            LayoutAttributes::single(Some(16)),
        ];
        let scales = compute_depth_scales(&layers, 20.0);

        assert_relative_eq!(scales[0], 5.0);
        assert_relative_eq!(scales[1], 20.0);
    }

    #[test]
    fn small_ratios_floor_at_one() {
        let layers = [
            LayoutAttributes::single(Some(1)),
            LayoutAttributes::single(Some(100)),
            LayoutAttributes::single(Some(4)),
        ];
        let scales = compute_depth_scales(&layers, 20.0);

        // 1/100*20 = 0.2 and 4/100*20 = 0.8 both floor.
        assert_eq!(scales[0], 1.0);
        assert_eq!(scales[2], 1.0);
        assert_relative_eq!(scales[1], 20.0);
    }

    #[test]
    fn undeclared_depth_counts_as_one_without_raising_the_max() {
        let layers = [
            LayoutAttributes::single(None),
            LayoutAttributes::group(3, Some(2)),
        ];
        let scales = compute_depth_scales(&layers, 20.0);

        assert_relative_eq!(scales[0], 10.0);
        assert_relative_eq!(scales[1], 20.0);
    }

    #[test]
    fn no_declared_depth_gives_uniform_scale() {
        let layers = vec![LayoutAttributes::single(None); 4];
        assert_eq!(compute_depth_scales(&layers, 20.0), vec![1.0; 4]);
    }

    #[test]
    fn zero_depths_give_uniform_scale() {
        let layers = [
            LayoutAttributes::single(Some(0)),
            LayoutAttributes::single(Some(0)),
        ];
        assert_eq!(compute_depth_scales(&layers, 20.0), vec![1.0, 1.0]);
    }

    #[test]
    fn one_scale_per_layer_even_for_groups() {
        let layers = [
            LayoutAttributes::group(5, Some(3)),
            LayoutAttributes::single(Some(6)),
        ];
        assert_eq!(compute_depth_scales(&layers, 4.0).len(), 2);
    }
}
