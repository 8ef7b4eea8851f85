use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;

use crate::assets::{AssetError, AssetRegistry, ModelTemplate};
use crate::components::{
    Backdrop, Collider, LocalTransform, Luggage, Player, RecyclePolicy, Recycler, Rock, Spin,
    WrapRule,
};
use crate::config::PoolConfig;
use crate::scene::pool::EntityPool;
use crate::scene::SceneError;
use crate::systems::{movement_graph, PLAYER_SPAWN};

/// Transform and collider for a pooled slot, already placed at its first
/// spawn position.
fn pooled(
    template: &ModelTemplate,
    recycler: Recycler,
    rng: &mut impl Rng,
) -> (LocalTransform, Collider, Recycler) {
    let mut transform = LocalTransform::new(Vec3::ZERO).with_scale(template.scale);
    recycler.respawn(&mut transform, rng);
    (
        transform,
        Collider::Box { half_extents: template.half_extents },
        recycler,
    )
}

pub fn spawn_player(world: &mut World, assets: &AssetRegistry) -> Result<Entity, SceneError> {
    let car = assets.model("flying-car")?;
    let fsm = movement_graph()?;
    Ok(world.spawn((
        LocalTransform::new(PLAYER_SPAWN).with_scale(car.scale),
        Collider::Box { half_extents: car.half_extents },
        fsm,
        Player,
    )))
}

pub fn spawn_rock_pool(
    world: &mut World,
    assets: &AssetRegistry,
    config: &PoolConfig,
    rng: &mut impl Rng,
) -> Result<EntityPool, AssetError> {
    let rock = assets.model("rock")?;
    Ok(EntityPool::new(world, "rocks", config.count, |index| {
        let recycler = Recycler {
            index,
            policy: RecyclePolicy::Scatter(config.rule),
            rest_height: rock.rest_height,
        };
        let (transform, collider, recycler) = pooled(rock, recycler, rng);
        (transform, collider, recycler, Rock)
    }))
}

/// Luggage alternates between the two suitcase models by slot parity.
pub fn spawn_luggage_pool(
    world: &mut World,
    assets: &AssetRegistry,
    config: &PoolConfig,
    rng: &mut impl Rng,
) -> Result<EntityPool, AssetError> {
    let suitcases = [assets.model("suitcase1")?, assets.model("suitcase2")?];
    Ok(EntityPool::new(world, "luggage", config.count, |index| {
        let template = suitcases[index % 2];
        let recycler = Recycler {
            index,
            policy: RecyclePolicy::Scatter(config.rule),
            rest_height: template.rest_height,
        };
        let (transform, collider, recycler) = pooled(template, recycler, rng);
        (transform, collider, recycler, Spin { time: 0.0 }, Luggage)
    }))
}

/// Two background segments that leapfrog to tile the scenery.
pub fn spawn_backdrop(
    world: &mut World,
    assets: &AssetRegistry,
    rule: WrapRule,
    rng: &mut impl Rng,
) -> Result<EntityPool, AssetError> {
    let background = assets.model("background")?;
    Ok(EntityPool::new(world, "backdrop", 2, |index| {
        let recycler = Recycler {
            index,
            policy: RecyclePolicy::Wrap(rule),
            rest_height: background.rest_height,
        };
        let mut transform = LocalTransform::new(Vec3::ZERO).with_scale(background.scale);
        recycler.respawn(&mut transform, rng);
        (transform, recycler, Backdrop)
    }))
}
