use hecs::{Entity, World};

use crate::components::{Action, Direction, Movement, PlayerFsm};
use crate::systems::player::current_movement;

/// Action to dispatch when the key for `dir` is released while the car is
/// in `current`.
///
/// Releasing the only held key stops the car; releasing one of two held
/// axes sheds just that axis so the car keeps moving along the other one.
/// A key that is not part of the current state releases nothing.
pub fn release_action(current: Movement, dir: Direction) -> Option<Action> {
    if current.is_single_axis() && current.contains(dir) {
        Some(Action::Stop)
    } else if current.contains(dir) {
        Some(Action::StopAxis(dir))
    } else {
        None
    }
}

/// Feed one steering key edge into the car's FSM.
///
/// Callers must only report real edges: a key-down that is already held
/// has to be filtered out before it gets here.
pub fn steer(fsm: &mut PlayerFsm, dir: Direction, pressed: bool) {
    if pressed {
        fsm.dispatch_action(Action::Move(dir).label());
    } else if let Some(action) = release_action(current_movement(fsm), dir) {
        fsm.dispatch_action(action.label());
    }
}

/// [`steer`] the FSM attached to `player`.
pub fn steering_system(world: &mut World, player: Entity, dir: Direction, pressed: bool) {
    if let Ok(mut fsm) = world.get::<&mut PlayerFsm>(player) {
        steer(&mut fsm, dir, pressed);
    }
}
