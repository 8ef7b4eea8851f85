mod movement;
mod recycle;

pub use movement::{Action, AxisX, AxisZ, Direction, Movement};
pub use recycle::{RecyclePolicy, Recycler, ScatterRule, WrapRule};

use glam::{Quat, Vec3};

use crate::fsm::StateMachine;

/// Spatial transform with position, rotation, and scale.
///
/// This is the handle the renderer and the collision layer read every frame.
/// Pools own the entity; outside code may write the fields but never despawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl LocalTransform {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Turn about the world up axis, on top of the current rotation.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
    }
}

/// Collision shape attached to an entity. Boxes are axis-aligned around the
/// entity position and ignore its rotation.
#[derive(Clone, Copy, Debug)]
pub enum Collider {
    Box { half_extents: Vec3 },
}

/// Marker: this entity is the player's car.
pub struct Player;

/// Marker: rock obstacle. Hitting one ends the run.
pub struct Rock;

/// Marker: luggage pickup. Hitting one scores and recycles it.
pub struct Luggage;

/// Marker: tiled background segment.
pub struct Backdrop;

/// Idle spin applied to pickups. `time` keeps accumulating while paused.
pub struct Spin {
    pub time: f32,
}

/// FSM component attached to the player entity; state names come from
/// [`Movement::name`].
pub type PlayerFsm = StateMachine;
