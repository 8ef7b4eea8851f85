use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::AssetRegistry;
use crate::config::{ConfigError, GameConfig};
use crate::engine::bindings::{default_bindings, Bindings, Command};
use crate::engine::input::{InputEvent, InputState, KeyEvent};
use crate::engine::time::FrameTimer;
use crate::scene::track::{load_track, Track};
use crate::scene::SceneError;
use crate::systems::{
    player_movement_system, pool_update_system, probe_pool, reset_entity, spin_system,
    steering_system,
};

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Score and flow flags for the current run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub started: bool,
    pub running: bool,
    pub game_over: bool,
    pub distance: f32,
    pub points: u32,
    pub crashes: u32,
}

/// What happened during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub recycled: usize,
    pub picked_up: usize,
    pub crashed: bool,
}

pub struct GameApp {
    world: World,
    track: Track,
    bindings: Bindings,
    input: InputState,
    timer: FrameTimer,
    rng: StdRng,
    step: f32,
    session: Session,
}

impl GameApp {
    /// Validate `config`, then build the track from `assets`. Any error here
    /// is a setup bug and should abort the program.
    pub fn new(config: GameConfig, assets: &AssetRegistry, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let track = load_track(&mut world, assets, &config, &mut rng)?;

        Ok(Self {
            world,
            track,
            bindings: default_bindings(),
            input: InputState::new(),
            timer: FrameTimer::new(config.frame_dt),
            rng,
            step: config.step(),
            session: Session::default(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Run one frame: input, movement, recycling, then collision response.
    pub fn frame(&mut self, raw: &[KeyEvent]) -> FrameReport {
        let mut report = FrameReport::default();

        self.timer.tick();
        self.input.update(raw);
        let events = self.input.events.clone();
        for event in events {
            self.handle_input(event);
        }

        let paused = !self.session.running;
        if !self.session.game_over {
            player_movement_system(&mut self.world, paused, self.timer.dt);
            spin_system(&mut self.world, self.timer.dt_ms());
            for pool in self.track.pools() {
                report.recycled += pool_update_system(&mut self.world, pool, &mut self.rng, paused);
            }
        }

        if self.session.running {
            self.session.distance += self.step;

            let picked = probe_pool(&self.world, self.track.player, &self.track.luggage);
            if !picked.is_empty() {
                self.session.points += 1;
                tracing::info!(points = self.session.points, "luggage collected");
            }
            for &entity in &picked {
                reset_entity(&mut self.world, entity, &mut self.rng);
            }
            report.picked_up = picked.len();

            if !probe_pool(&self.world, self.track.player, &self.track.rocks).is_empty() {
                self.session.game_over = true;
                self.session.running = false;
                self.session.crashes += 1;
                report.crashed = true;
                tracing::info!(
                    distance = self.session.distance.round(),
                    points = self.session.points,
                    "crashed into a rock"
                );
            }
        }

        tracing::trace!(
            frame = self.timer.frame,
            last_key = ?self.input.last_key_pressed(),
            recycled = report.recycled,
            "frame done"
        );
        report
    }

    fn handle_input(&mut self, event: InputEvent) {
        let (key, pressed) = match event {
            InputEvent::KeyPressed(key) => (key, true),
            InputEvent::KeyReleased { key, .. } => (key, false),
        };
        let Some(command) = self.bindings.command(key) else {
            return;
        };

        match (command, pressed) {
            (Command::Steer(dir), _) => {
                steering_system(&mut self.world, self.track.player, dir, pressed);
            }
            (Command::TogglePause, true) => self.toggle_pause(),
            (Command::Start, true) => self.start(),
            _ => {}
        }
    }

    fn toggle_pause(&mut self) {
        if !self.session.started || self.session.game_over {
            return;
        }
        self.session.running = !self.session.running;
        tracing::debug!(running = self.session.running, "pause toggled");
    }

    fn start(&mut self) {
        if !self.session.started {
            self.session.started = true;
            self.session.running = true;
            tracing::info!("run started");
        } else if self.session.game_over {
            self.session.points = 0;
            self.session.distance = 0.0;
            self.track.reset(&mut self.world, &mut self.rng);
            self.session.game_over = false;
            self.session.running = true;
            tracing::info!(crashes = self.session.crashes, "run restarted");
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::components::LocalTransform;
    use crate::engine::input::Key;
    use crate::systems::PLAYER_SPAWN;

    fn app() -> GameApp {
        GameApp::new(GameConfig::default(), &AssetRegistry::builtin(), 21).unwrap()
    }

    fn tap(key: Key) -> [KeyEvent; 2] {
        [KeyEvent::down(key, 0), KeyEvent::up(key, 0)]
    }

    fn place(app: &mut GameApp, entity: hecs::Entity, at: Vec3) {
        app.world.get::<&mut LocalTransform>(entity).unwrap().position = at;
    }

    #[test]
    fn nothing_moves_before_start() {
        let mut app = app();
        let before = app.track.rocks.map(&app.world, |_, t| t.position);
        app.frame(&tap(Key::Escape));
        app.frame(&[]);
        assert_eq!(app.track.rocks.map(&app.world, |_, t| t.position), before);
        assert!(!app.session().started);
        assert!(!app.session().running);
    }

    #[test]
    fn space_starts_and_escape_pauses() {
        let mut app = app();
        app.frame(&tap(Key::Space));
        assert!(app.session().running);
        assert_eq!(app.session().distance, 0.25);

        app.frame(&tap(Key::Escape));
        assert!(!app.session().running);
        let frozen = app.track.rocks.map(&app.world, |_, t| t.position);
        app.frame(&[]);
        assert_eq!(app.track.rocks.map(&app.world, |_, t| t.position), frozen);
        assert_eq!(app.session().distance, 0.25);

        app.frame(&tap(Key::Escape));
        assert!(app.session().running);
    }

    #[test]
    fn held_steering_key_moves_the_car() {
        let mut app = app();
        app.frame(&[KeyEvent::down(Key::Space, 0), KeyEvent::up(Key::Space, 0), KeyEvent::down(Key::D, 0)]);
        // Auto-repeat must not re-dispatch.
        app.frame(&[KeyEvent::down(Key::D, 30)]);
        app.frame(&[KeyEvent::down(Key::W, 40)]);
        let fsm_state = app.world.get::<&crate::components::PlayerFsm>(app.track.player).unwrap().get_state().to_owned();
        assert_eq!(fsm_state, "right-forward");

        app.frame(&[KeyEvent::up(Key::D, 50)]);
        let pos = app.world.get::<&LocalTransform>(app.track.player).unwrap().position;
        assert!((pos.x - 0.6).abs() < 1e-5);
        assert!(pos.z < PLAYER_SPAWN.z);
    }

    #[test]
    fn luggage_pickup_scores_and_recycles_that_piece() {
        let mut app = app();
        app.frame(&tap(Key::Space));
        let piece = app.track.luggage.entities()[0];
        let other = app.track.luggage.entities()[1];
        let other_before = app.world.get::<&LocalTransform>(other).unwrap().position;
        place(&mut app, piece, Vec3::new(0.0, 1.0, 1.0));

        let report = app.frame(&[]);
        assert_eq!(report.picked_up, 1);
        assert_eq!(app.session().points, 1);
        assert!(app.world.get::<&LocalTransform>(piece).unwrap().position.z < -60.0);
        let other_after = app.world.get::<&LocalTransform>(other).unwrap().position;
        assert!((other_after.z - other_before.z - 0.25).abs() < 1e-4);
        assert!(!app.session().game_over);
    }

    #[test]
    fn rock_hit_ends_the_run_and_space_restarts() {
        let mut app = app();
        app.frame(&tap(Key::Space));
        let rock = app.track.rocks.entities()[0];
        place(&mut app, rock, Vec3::new(0.0, -1.0, 0.0));

        let report = app.frame(&[]);
        assert!(report.crashed);
        assert!(app.session().game_over);
        assert!(!app.session().running);

        // Frozen while the crash screen is up; pause does nothing.
        let frozen = app.track.rocks.map(&app.world, |_, t| t.position);
        app.frame(&tap(Key::Escape));
        assert_eq!(app.track.rocks.map(&app.world, |_, t| t.position), frozen);
        assert!(app.session().game_over);

        app.frame(&tap(Key::Space));
        let session = app.session();
        assert!(session.running && !session.game_over);
        assert_eq!(session.points, 0);
        assert_eq!(session.crashes, 1);
        assert_eq!(session.distance, 0.25);
        assert!(app.world.get::<&LocalTransform>(rock).unwrap().position.z < -60.0);
    }

    #[test]
    fn long_autopilot_run_keeps_pools_fixed() {
        use crate::engine::autopilot::Autopilot;

        let mut app = app();
        let mut pilot = Autopilot::new(3);
        let entities = app.world.len();
        let mut recycled = 0;
        for frame in 0..6_000 {
            let events = pilot.events(frame, app.timer().now_ms(), app.session().game_over);
            recycled += app.frame(&events).recycled;
        }
        assert!(recycled > 0);
        assert_eq!(app.world.len(), entities);
        assert_eq!(app.track.rocks.len(), 15);
        assert_eq!(app.track.luggage.len(), 10);
        assert_eq!(app.track.backdrop.len(), 2);

        let rule = GameConfig::default().rocks.rule;
        for pos in app.track.rocks.map(&app.world, |_, t| t.position) {
            assert!(pos.z <= rule.threshold);
            assert!(pos.x.abs() <= rule.lane_half_width);
        }
    }

    #[test]
    fn bad_config_is_a_setup_error() {
        let mut config = GameConfig::default();
        config.frame_dt = 0.0;
        let err = GameApp::new(config, &AssetRegistry::builtin(), 0).err().unwrap();
        assert!(matches!(err, SetupError::Config(ConfigError::FrameLength(_))));
    }
}
