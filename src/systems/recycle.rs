use std::f32::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{LocalTransform, RecyclePolicy, Recycler, Spin};
use crate::scene::pool::EntityPool;

// ---------------------------------------------------------------------------
// Recycle rules
// ---------------------------------------------------------------------------

impl Recycler {
    /// Put the entity at a fresh starting position for its slot.
    ///
    /// Scatter slots draw a new random lane position, depth and extra yaw;
    /// wrap slots go back to their fixed starting band.
    pub fn respawn(&self, transform: &mut LocalTransform, rng: &mut impl Rng) {
        transform.position.y = self.rest_height;
        match self.policy {
            RecyclePolicy::Scatter(rule) => {
                let near = rule.near + rule.stagger * self.index as f32;
                transform.position.z = -(rng.gen::<f32>() * rule.window + near);
                transform.position.x = rng.gen::<f32>() * 2.0 * rule.lane_half_width - rule.lane_half_width;
                transform.rotate_y(rng.gen::<f32>() * TAU);
            }
            RecyclePolicy::Wrap(rule) => {
                transform.position.z = -rule.band * self.index as f32;
            }
        }
    }

    /// Scroll one frame toward the viewer. Returns `true` when the entity
    /// crossed its threshold and was recycled.
    pub fn advance(&self, transform: &mut LocalTransform, rng: &mut impl Rng) -> bool {
        match self.policy {
            RecyclePolicy::Scatter(rule) => {
                transform.position.z += rule.step;
                if transform.position.z > rule.threshold {
                    self.respawn(transform, rng);
                    return true;
                }
            }
            RecyclePolicy::Wrap(rule) => {
                transform.position.z += rule.step;
                if transform.position.z > rule.threshold {
                    transform.position.z -= 2.0 * rule.band;
                    return true;
                }
            }
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Advance every entity of `pool` by one frame and recycle the ones that
/// passed the viewer. Does nothing while `paused`. Returns how many entities
/// were recycled this frame.
pub fn pool_update_system(
    world: &mut World,
    pool: &EntityPool,
    rng: &mut impl Rng,
    paused: bool,
) -> usize {
    if paused {
        return 0;
    }

    let mut recycled = 0;
    for &entity in pool.entities() {
        if let Ok((transform, recycler)) =
            world.query_one_mut::<(&mut LocalTransform, &Recycler)>(entity)
        {
            if recycler.advance(transform, rng) {
                recycled += 1;
                tracing::trace!(pool = pool.name(), slot = recycler.index, "recycled");
            }
        }
    }
    recycled
}

/// Respawn a single entity immediately, skipping the threshold check.
/// Returns `false` if `entity` carries no recycle rule.
pub fn reset_entity(world: &mut World, entity: Entity, rng: &mut impl Rng) -> bool {
    match world.query_one_mut::<(&mut LocalTransform, &Recycler)>(entity) {
        Ok((transform, recycler)) => {
            recycler.respawn(transform, rng);
            true
        }
        Err(_) => false,
    }
}

/// Respawn every entity of `pool`, e.g. on restart.
pub fn reset_pool(world: &mut World, pool: &EntityPool, rng: &mut impl Rng) {
    for &entity in pool.entities() {
        reset_entity(world, entity, rng);
    }
    tracing::debug!(pool = pool.name(), "pool reset");
}

/// Spin pickups in place. Runs while paused too; `dt_ms` is the real frame
/// length in milliseconds.
pub fn spin_system(world: &mut World, dt_ms: f32) {
    for (_e, (spin, transform)) in world.query_mut::<(&mut Spin, &mut LocalTransform)>() {
        spin.time += dt_ms / 500.0;
        transform.rotation = glam::Quat::from_rotation_y(spin.time);
    }
}
