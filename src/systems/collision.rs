use glam::Vec3;
use hecs::{Entity, World};

use crate::components::LocalTransform;
use crate::scene::pool::EntityPool;
use crate::systems::raycast::{raycast_all, Ray};

const FRONT_RAY_LENGTH: f32 = 2.0;
const BACK_RAY_LENGTH: f32 = 1.5;
const RAY_SPREAD: f32 = 0.25;

/// The car's four feelers: front-left, front-right, back-left, back-right.
pub fn player_rays(origin: Vec3) -> [Ray; 4] {
    [
        Ray::new(origin, Vec3::new(-RAY_SPREAD, 0.0, -1.0), FRONT_RAY_LENGTH),
        Ray::new(origin, Vec3::new(RAY_SPREAD, 0.0, -1.0), FRONT_RAY_LENGTH),
        Ray::new(origin, Vec3::new(-RAY_SPREAD, 0.0, 1.0), BACK_RAY_LENGTH),
        Ray::new(origin, Vec3::new(RAY_SPREAD, 0.0, 1.0), BACK_RAY_LENGTH),
    ]
}

/// Entities of `pool` touched by any of the player's rays this frame, each
/// reported once, in slot order. Responding to a hit is up to the caller.
pub fn probe_pool(world: &World, player: Entity, pool: &EntityPool) -> Vec<Entity> {
    let Ok(origin) = world.get::<&LocalTransform>(player).map(|t| t.position) else {
        return Vec::new();
    };

    let mut touched: Vec<Entity> = player_rays(origin)
        .into_iter()
        .flat_map(|ray| raycast_all(world, pool.entities(), ray))
        .map(|hit| hit.entity)
        .collect();

    touched.sort_by_key(|e| pool.entities().iter().position(|p| p == e));
    touched.dedup();
    touched
}
