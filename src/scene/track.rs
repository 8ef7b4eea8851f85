use hecs::{Entity, World};
use rand::Rng;

use crate::assets::AssetRegistry;
use crate::config::GameConfig;
use crate::scene::pool::EntityPool;
use crate::scene::prefabs::{spawn_backdrop, spawn_luggage_pool, spawn_player, spawn_rock_pool};
use crate::scene::SceneError;
use crate::systems::{reset_player, reset_pool};

/// Everything that lives on the road: the car and the three pools.
pub struct Track {
    pub player: Entity,
    pub rocks: EntityPool,
    pub luggage: EntityPool,
    pub backdrop: EntityPool,
}

impl Track {
    /// Pools in update order.
    pub fn pools(&self) -> [&EntityPool; 3] {
        [&self.luggage, &self.rocks, &self.backdrop]
    }

    /// Put every entity back at a starting position for a new run.
    pub fn reset(&self, world: &mut World, rng: &mut impl Rng) {
        for pool in self.pools() {
            reset_pool(world, pool, rng);
        }
        reset_player(world, self.player);
    }
}

/// Build and populate the track.
pub fn load_track(
    world: &mut World,
    assets: &AssetRegistry,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Result<Track, SceneError> {
    let rocks = spawn_rock_pool(world, assets, &config.rocks, rng)?;
    let luggage = spawn_luggage_pool(world, assets, &config.luggage, rng)?;
    let player = spawn_player(world, assets)?;
    let backdrop = spawn_backdrop(world, assets, config.backdrop, rng)?;

    tracing::info!(
        rocks = rocks.len(),
        luggage = luggage.len(),
        backdrop = backdrop.len(),
        "track loaded"
    );

    Ok(Track { player, rocks, luggage, backdrop })
}
