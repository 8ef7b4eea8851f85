use glam::{Quat, Vec3};
use hecs::{Entity, World};

use crate::components::{Action, LocalTransform, Movement, Player, PlayerFsm};
use crate::fsm::{FsmError, StateMachine};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const LATERAL_SPEED: f32 = 0.2; // per frame, not time-scaled
const DEPTH_SPEED: f32 = 0.1;
const LATERAL_LIMIT: f32 = 7.0;
const DEPTH_LIMIT: f32 = 3.0;

pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 1.0, 2.0);

// ---------------------------------------------------------------------------
// Movement transition logic
// ---------------------------------------------------------------------------

impl Movement {
    /// Return the state `action` leads to, or `None` to stay.
    ///
    /// Each axis is handled on its own:
    /// - a move key on a free axis claims it; on the held axis of a single-axis
    ///   state it flips direction. Composite states ignore further presses.
    /// - `stop-accelerating` only leaves single-axis states, straight to idle.
    /// - `stop-accelerating-<dir>` only sheds `dir`'s axis from a composite.
    pub fn next(self, action: Action) -> Option<Movement> {
        match action {
            Action::Move(dir) => {
                if self.is_composite() || self.contains(dir) {
                    None
                } else {
                    Some(self.with(dir))
                }
            }
            Action::Stop => self.is_single_axis().then_some(Movement::IDLE),
            Action::StopAxis(dir) => {
                (self.is_composite() && self.contains(dir)).then(|| self.without(dir))
            }
        }
    }
}

/// Build the nine-state steering graph, starting in `idle`.
///
/// Edges are generated from [`Movement::next`] for every (state, action)
/// pair rather than listed by hand.
pub fn movement_graph() -> Result<PlayerFsm, FsmError> {
    let mut fsm = StateMachine::new(Movement::IDLE.name());
    for state in Movement::all() {
        fsm.add_state(state.name());
    }
    for state in Movement::all() {
        for action in Action::all() {
            if let Some(next) = state.next(action) {
                fsm.create_action(state.name(), next.name(), action.label())?;
            }
        }
    }
    Ok(fsm)
}

/// Current movement of a steering FSM. Unknown names read as idle.
pub fn current_movement(fsm: &PlayerFsm) -> Movement {
    Movement::from_name(fsm.get_state()).unwrap_or(Movement::IDLE)
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Move the car according to its steering state.
///
/// The FSM clock always advances by `dt` (it drives the car's animation),
/// but the car itself stays put while `paused`.
pub fn player_movement_system(world: &mut World, paused: bool, dt: f32) {
    for (_e, (local, fsm, _player)) in
        world.query_mut::<(&mut LocalTransform, &mut PlayerFsm, &Player)>()
    {
        if fsm.just_entered() {
            tracing::debug!(from = fsm.previous(), to = fsm.get_state(), "steering changed");
        }
        fsm.tick(dt);
        if paused {
            continue;
        }

        let movement = current_movement(fsm);
        local.position.x = (local.position.x + movement.lateral_sign() * LATERAL_SPEED)
            .clamp(-LATERAL_LIMIT, LATERAL_LIMIT);
        local.position.z = (local.position.z + movement.depth_sign() * DEPTH_SPEED)
            .clamp(-DEPTH_LIMIT, DEPTH_LIMIT);
    }
}

/// Put the car back on the start mark with no rotation.
pub fn reset_player(world: &mut World, player: Entity) {
    if let Ok(mut local) = world.get::<&mut LocalTransform>(player) {
        local.position = PLAYER_SPAWN;
        local.rotation = Quat::IDENTITY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Direction;

    const L: Action = Action::Move(Direction::Left);
    const R: Action = Action::Move(Direction::Right);
    const F: Action = Action::Move(Direction::Forward);
    const B: Action = Action::Move(Direction::Backward);

    fn graph() -> PlayerFsm {
        movement_graph().unwrap()
    }

    fn run(fsm: &mut PlayerFsm, actions: &[Action]) -> String {
        for a in actions {
            fsm.dispatch_action(a.label());
        }
        fsm.get_state().to_owned()
    }

    #[test]
    fn every_named_state_is_registered() {
        let fsm = graph();
        for name in [
            "idle", "forward", "backward", "left", "right",
            "left-forward", "left-backward", "right-forward", "right-backward",
        ] {
            assert!(fsm.has_state(name), "{name}");
        }
        assert_eq!(fsm.get_state(), "idle");
    }

    #[test]
    fn idle_fans_out_to_single_axis_states() {
        for (action, expected) in [(L, "left"), (R, "right"), (F, "forward"), (B, "backward")] {
            let mut fsm = graph();
            assert_eq!(fsm.dispatch_action(action.label()), expected);
        }
    }

    #[test]
    fn one_axis_only_ever_ends_on_the_last_key() {
        let sequences: [&[Action]; 5] = [
            &[L],
            &[L, R],
            &[R, L, R, L],
            &[R, R, L],
            &[L, L, R, R, L, R],
        ];
        for seq in sequences {
            let mut fsm = graph();
            let last = if *seq.last().unwrap() == L { "left" } else { "right" };
            assert_eq!(run(&mut fsm, seq), last, "{seq:?}");
        }
    }

    #[test]
    fn other_axis_composes() {
        let mut fsm = graph();
        assert_eq!(run(&mut fsm, &[L, F]), "left-forward");
        let mut fsm = graph();
        assert_eq!(run(&mut fsm, &[F, L]), "left-forward");
        let mut fsm = graph();
        assert_eq!(run(&mut fsm, &[B, R]), "right-backward");
        let mut fsm = graph();
        assert_eq!(run(&mut fsm, &[F, R]), "right-forward");
    }

    #[test]
    fn shedding_an_axis_round_trips() {
        let mut fsm = graph();
        run(&mut fsm, &[L]);
        assert_eq!(run(&mut fsm, &[F, Action::StopAxis(Direction::Forward)]), "left");
    }

    #[test]
    fn release_order_picks_the_surviving_axis() {
        let mut fsm = graph();
        run(&mut fsm, &[L, F]);
        assert_eq!(fsm.dispatch_action("stop-accelerating-left"), "forward");

        let mut fsm = graph();
        run(&mut fsm, &[L, F]);
        assert_eq!(fsm.dispatch_action("stop-accelerating-forward"), "left");

        let mut fsm = graph();
        run(&mut fsm, &[R, F]);
        assert_eq!(fsm.dispatch_action("stop-accelerating-forward"), "right");
    }

    #[test]
    fn composite_states_do_not_jump_to_idle() {
        let mut fsm = graph();
        run(&mut fsm, &[R, B]);
        assert_eq!(fsm.dispatch_action("stop-accelerating"), "right-backward");
        assert_eq!(fsm.dispatch_action("move-left"), "right-backward");
        assert_eq!(fsm.dispatch_action("stop-accelerating-left"), "right-backward");
    }

    #[test]
    fn single_axis_stops_to_idle() {
        for start in [L, R, F, B] {
            let mut fsm = graph();
            run(&mut fsm, &[start]);
            assert_eq!(fsm.dispatch_action("stop-accelerating"), "idle");
        }
    }

    #[test]
    fn unbound_labels_never_move_the_machine() {
        for state in Movement::all() {
            let mut fsm = graph();
            // Drive into `state` via its components.
            if let Some(dir) = [Direction::Left, Direction::Right]
                .into_iter()
                .find(|d| state.contains(*d))
            {
                fsm.dispatch_action(Action::Move(dir).label());
            }
            if let Some(dir) = [Direction::Forward, Direction::Backward]
                .into_iter()
                .find(|d| state.contains(*d))
            {
                fsm.dispatch_action(Action::Move(dir).label());
            }
            assert_eq!(fsm.get_state(), state.name());

            for label in ["", "honk", "move-up", "stop", "MOVE-LEFT"] {
                assert_eq!(fsm.dispatch_action(label), state.name());
            }
        }
    }

    #[test]
    fn car_moves_and_clamps() {
        let mut world = World::new();
        let mut fsm = graph();
        fsm.dispatch_action("move-left");
        let car = world.spawn((LocalTransform::new(PLAYER_SPAWN), fsm, Player));

        for _ in 0..100 {
            player_movement_system(&mut world, false, 1.0 / 60.0);
        }
        let pos = world.get::<&LocalTransform>(car).unwrap().position;
        assert_eq!(pos.x, -LATERAL_LIMIT);
        assert_eq!(pos.z, PLAYER_SPAWN.z);
    }

    #[test]
    fn paused_car_holds_position_but_clock_runs() {
        let mut world = World::new();
        let mut fsm = graph();
        fsm.dispatch_action("move-forward");
        let car = world.spawn((LocalTransform::new(PLAYER_SPAWN), fsm, Player));

        player_movement_system(&mut world, true, 0.5);
        assert_eq!(world.get::<&LocalTransform>(car).unwrap().position, PLAYER_SPAWN);
        assert_eq!(world.get::<&PlayerFsm>(car).unwrap().elapsed(), 0.5);

        player_movement_system(&mut world, false, 0.5);
        let z = world.get::<&LocalTransform>(car).unwrap().position.z;
        assert!((z - (PLAYER_SPAWN.z - DEPTH_SPEED)).abs() < 1e-6);
    }

    #[test]
    fn reset_returns_to_spawn() {
        let mut world = World::new();
        let mut local = LocalTransform::new(Vec3::new(5.0, 1.0, -3.0));
        local.rotate_y(1.0);
        let car = world.spawn((local, graph(), Player));
        reset_player(&mut world, car);
        let local = *world.get::<&LocalTransform>(car).unwrap();
        assert_eq!(local.position, PLAYER_SPAWN);
        assert_eq!(local.rotation, Quat::IDENTITY);
    }
}
