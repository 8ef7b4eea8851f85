use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{Collider, LocalTransform};

pub struct RaycastHit {
    pub entity: Entity,
    pub distance: f32,
    #[allow(dead_code)]
    pub point: Vec3,
}

/// A finite ray: `origin + t * direction` for `t` in `(0, max_distance]`.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub max_distance: f32,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Self {
        Self { origin, direction: direction.normalize(), max_distance }
    }
}

/// Cast `ray` against `targets`, returning every hit within range sorted
/// nearest first. Entities without a collider or transform are skipped.
pub fn raycast_all(world: &World, targets: &[Entity], ray: Ray) -> Vec<RaycastHit> {
    let mut hits = Vec::new();

    for &entity in targets {
        let Ok(mut query) = world.query_one::<(&LocalTransform, &Collider)>(entity) else {
            continue;
        };
        let Some((transform, collider)) = query.get() else {
            continue;
        };

        let t = match collider {
            Collider::Box { half_extents } => {
                ray_aabb_intersection(ray.origin, ray.direction, transform.position, *half_extents)
            }
        };

        if let Some(t) = t {
            if t > 0.0 && t <= ray.max_distance {
                hits.push(RaycastHit {
                    entity,
                    distance: t,
                    point: ray.origin + ray.direction * t,
                });
            }
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

fn ray_aabb_intersection(origin: Vec3, dir: Vec3, center: Vec3, half: Vec3) -> Option<f32> {
    let min = center - half;
    let max = center + half;
    let inv_dir = Vec3::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);

    let t1 = (min.x - origin.x) * inv_dir.x;
    let t2 = (max.x - origin.x) * inv_dir.x;
    let t3 = (min.y - origin.y) * inv_dir.y;
    let t4 = (max.y - origin.y) * inv_dir.y;
    let t5 = (min.z - origin.z) * inv_dir.z;
    let t6 = (max.z - origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }
    // Origin inside the box: report the exit.
    Some(if tmin < 0.0 { tmax } else { tmin })
}
