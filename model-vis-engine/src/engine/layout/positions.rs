use bevy::prelude::*;

use super::LayoutAttributes;
use super::SlotSpan;

/// Where a layer sits in the stack. Grouped layers get one position per member.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerPlacement {
    Single(Vec3),
    Group(Vec<Vec3>),
}

impl LayerPlacement {
    /// Every slot position of this placement, bottom to top.
    pub fn slots(&self) -> &[Vec3] {
        match self {
            Self::Single(position) => std::slice::from_ref(position),
            Self::Group(positions) => positions,
        }
    }

    /// Mean of the slot positions.
    pub fn centre(&self) -> Vec3 {
        let slots = self.slots();
        if slots.is_empty() {
            return Vec3::ZERO;
        }
        slots.iter().copied().sum::<Vec3>() / slots.len() as f32
    }
}

/// y coordinate of the lowest slot so that `slot_count` slots are centred on zero.
fn first_slot_y(slot_count: usize, interval: f32) -> f32 {
    if slot_count == 0 {
        return 0.0;
    }
    if slot_count % 2 == 1 {
        -interval * ((slot_count - 1) / 2) as f32
    } else {
        -interval * (slot_count / 2) as f32 + interval / 2.0
    }
}

/// Stack every layer along y, `interval` apart, centred on the origin.
///
/// A grouped layer consumes `thickness` consecutive slots and yields a
/// [`LayerPlacement::Group`]; every other layer yields a [`LayerPlacement::Single`].
/// x and z are always zero.
pub fn compute_positions(layers: &[LayoutAttributes], interval: f32) -> Vec<LayerPlacement> {
    let slot_count = layers.iter().map(|layer| layer.span.slot_count()).sum();
    let mut y = first_slot_y(slot_count, interval);

    let mut next_slot = || {
        let position = Vec3::new(0.0, y, 0.0);
        y += interval;
        position
    };

    layers
        .iter()
        .map(|layer| match layer.span {
            SlotSpan::Single => LayerPlacement::Single(next_slot()),
            SlotSpan::Group { thickness } => {
                LayerPlacement::Group((0..thickness).map(|_| next_slot()).collect())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const INTERVAL: f32 = 50.0;

    fn singles(count: usize) -> Vec<LayoutAttributes> {
        vec![LayoutAttributes::single(None); count]
    }

    fn ys(placements: &[LayerPlacement]) -> Vec<f32> {
        placements
            .iter()
            .flat_map(|p| p.slots().iter().map(|v| v.y))
            .collect()
    }

    #[test]
    fn single_layer_sits_at_origin() {
        let placements = compute_positions(&singles(1), INTERVAL);
        assert_eq!(placements, vec![LayerPlacement::Single(Vec3::ZERO)]);
    }

    #[test]
    fn odd_stack_is_centred() {
        let placements = compute_positions(&singles(3), INTERVAL);
        assert_eq!(ys(&placements), vec![-INTERVAL, 0.0, INTERVAL]);
    }

    #[test]
    fn even_stack_is_centred() {
        let placements = compute_positions(&singles(4), INTERVAL);
        assert_eq!(
            ys(&placements),
            vec![-1.5 * INTERVAL, -0.5 * INTERVAL, 0.5 * INTERVAL, 1.5 * INTERVAL]
        );
    }

    #[test]
    fn stacks_are_symmetric_and_evenly_spaced() {
        for count in 1..12 {
            let y = ys(&compute_positions(&singles(count), INTERVAL));
            for (low, high) in y.iter().zip(y.iter().rev()) {
                assert_relative_eq!(*low, -*high, epsilon = 1e-3);
            }
            for pair in y.windows(2) {
                assert_relative_eq!(pair[1] - pair[0], INTERVAL, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn group_expands_into_consecutive_slots() {
        let layers = [
            LayoutAttributes::single(None),
            LayoutAttributes::group(3, None),
        ];
        let placements = compute_positions(&layers, INTERVAL);

        assert_eq!(placements.len(), 2);
        assert_eq!(
            placements[0],
            LayerPlacement::Single(Vec3::new(0.0, -1.5 * INTERVAL, 0.0))
        );
        assert_eq!(
            placements[1],
            LayerPlacement::Group(vec![
                Vec3::new(0.0, -0.5 * INTERVAL, 0.0),
                Vec3::new(0.0, 0.5 * INTERVAL, 0.0),
                Vec3::new(0.0, 1.5 * INTERVAL, 0.0),
            ])
        );
    }

    #[test]
    fn x_and_z_stay_zero() {
        let layers = [
            LayoutAttributes::group(2, Some(4)),
            LayoutAttributes::single(Some(1)),
        ];
        for placement in compute_positions(&layers, INTERVAL) {
            for slot in placement.slots() {
                assert_eq!(slot.x, 0.0);
                assert_eq!(slot.z, 0.0);
            }
        }
    }

    #[test]
    fn group_centre_is_mean_of_members() {
        let placement = LayerPlacement::Group(vec![
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, 20.0, 0.0),
            Vec3::new(0.0, 30.0, 0.0),
        ]);
        assert_eq!(placement.centre(), Vec3::new(0.0, 20.0, 0.0));
    }
}
