mod collision;
mod player;
mod raycast;
mod recycle;
mod steering;

pub use collision::probe_pool;
pub use player::{movement_graph, player_movement_system, reset_player, PLAYER_SPAWN};
pub use recycle::{pool_update_system, reset_entity, reset_pool, spin_system};
pub use steering::steering_system;
