use bevy::prelude::*;
use constants::camera::{CAMERA_DISTANCE_PER_STACK_UNIT, CAMERA_ELEVATION_RATIO, MIN_CAMERA_DISTANCE};

use crate::engine::model::SequentialModel;

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraFraming {
    /// Frame a stack of `layer_count` layers spaced `layer_interval` apart, looking at
    /// the origin from slightly above.
    pub fn for_layer_count(layer_count: usize, layer_interval: f32) -> Self {
        let stack_extent = layer_count as f32 * layer_interval;
        let distance = (stack_extent * CAMERA_DISTANCE_PER_STACK_UNIT).max(MIN_CAMERA_DISTANCE);

        Self {
            position: Vec3::new(0.0, distance * CAMERA_ELEVATION_RATIO, distance),
            target: Vec3::ZERO,
        }
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.target, Vec3::Y)
    }
}

/// Map a cursor position in window pixels (origin top-left) to normalised device
/// coordinates in [-1, 1], y up. Returns `None` outside the viewport or for an empty one.
pub fn normalize_pointer(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    if cursor.x < 0.0 || cursor.y < 0.0 || cursor.x > viewport.x || cursor.y > viewport.y {
        return None;
    }

    Some(Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        -(cursor.y / viewport.y) * 2.0 + 1.0,
    ))
}

/// Unproject an NDC point through `world_from_clip` into a world-space ray.
///
/// Bevy projections use reverse-Z: the near plane is at depth 1 and depth 0 is at
/// infinity, so the far sample is taken just above 0.
pub fn ndc_to_ray(ndc: Vec2, world_from_clip: Mat4) -> Option<Ray3d> {
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }

    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Move the 3D camera to the model's framing.
pub fn apply_camera_framing(model: Res<SequentialModel>, mut cameras: Query<&mut Transform, With<Camera3d>>) {
    let framing = model.camera();
    for mut transform in &mut cameras {
        *transform = framing.transform();
    }
    info!(
        "Camera framed {} layers from distance {:.1}",
        model.len(),
        framing.distance()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn world_from_clip(eye: Vec3) -> Mat4 {
        let view = Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y);
        let projection = Mat4::perspective_infinite_reverse_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1);
        view.compute_matrix() * projection.inverse()
    }

    #[test]
    fn small_stacks_use_minimum_distance() {
        let framing = CameraFraming::for_layer_count(1, 50.0);
        assert_relative_eq!(framing.distance(), MIN_CAMERA_DISTANCE * (1.0 + CAMERA_ELEVATION_RATIO.powi(2)).sqrt(), epsilon = 1e-3);
    }

    #[test]
    fn distance_grows_with_layer_count() {
        let few = CameraFraming::for_layer_count(3, 50.0);
        let many = CameraFraming::for_layer_count(12, 50.0);
        assert!(many.distance() > few.distance());
        assert_eq!(many.target, Vec3::ZERO);
    }

    #[test]
    fn framing_looks_at_target() {
        let framing = CameraFraming::for_layer_count(10, 50.0);
        let forward = framing.transform().forward();
        let expected = (framing.target - framing.position).normalize();
        assert_relative_eq!(forward.dot(expected), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn pointer_corners_map_to_ndc_extremes() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(normalize_pointer(Vec2::ZERO, viewport), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(normalize_pointer(viewport, viewport), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(normalize_pointer(viewport / 2.0, viewport), Some(Vec2::ZERO));
    }

    #[test]
    fn pointer_outside_viewport_is_rejected() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(normalize_pointer(Vec2::new(-1.0, 10.0), viewport), None);
        assert_eq!(normalize_pointer(Vec2::new(10.0, 601.0), viewport), None);
        assert_eq!(normalize_pointer(Vec2::new(10.0, 10.0), Vec2::ZERO), None);
    }

    #[test]
    fn centre_ray_points_at_what_the_camera_looks_at() {
        let eye = Vec3::new(0.0, 0.0, 100.0);
        let ray = ndc_to_ray(Vec2::ZERO, world_from_clip(eye)).unwrap();

        assert_relative_eq!(ray.direction.z, -1.0, epsilon = 1e-4);
        assert_relative_eq!(ray.origin.z, 99.9, epsilon = 1e-2);
        assert_relative_eq!(ray.origin.x, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn right_of_centre_ray_leans_right() {
        let ray = ndc_to_ray(Vec2::new(0.5, 0.0), world_from_clip(Vec3::new(0.0, 0.0, 100.0))).unwrap();
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.z < 0.0);
    }
}
