use bevy::prelude::*;

/// Distance along `ray` to the box of extent `size` centred on `xf`, if it is hit.
///
/// The ray is moved into the box's local space, so rotated and scaled boxes work.
/// The returned parameter is valid in world space because the transform is affine.
pub fn ray_obb_distance(ray: Ray3d, xf: &GlobalTransform, size: Vec3) -> Option<f32> {
    let local_from_world = xf.compute_matrix().inverse();
    let origin = local_from_world.transform_point3(ray.origin);
    let direction = local_from_world.transform_vector3(*ray.direction);
    let half = size * 0.5;
    ray_aabb_distance(origin, direction, -half, half)
}

/// Slab test against an axis aligned box. Returns the entry distance, or the exit
/// distance when the origin is inside the box.
pub fn ray_aabb_distance(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d == 0.0 {
            // Parallel to this slab: miss unless the origin lies between its planes.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (mut t0, mut t1) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}
