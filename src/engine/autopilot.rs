use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::input::{Key, KeyEvent};

const STEER_KEYS: [Key; 4] = [Key::W, Key::A, Key::S, Key::D];

/// Chance per frame that the driver presses or lets go of a steering key.
const STEER_CHANCE: f64 = 0.06;
/// Chance per frame that a held key produces an auto-repeat key-down.
const REPEAT_CHANCE: f64 = 0.05;
/// Frames between pause presses, and how long a pause lasts.
const PAUSE_EVERY: u64 = 1_500;
const PAUSE_LENGTH: u64 = 90;
/// Frames the driver waits on the crash screen before restarting.
const RESTART_DELAY: u64 = 120;

/// Seeded stand-in for a human at the keyboard.
///
/// Produces raw host-style key events, auto-repeats included, so the headless
/// binary exercises the same input path a real window would.
pub struct Autopilot {
    rng: StdRng,
    held: Vec<Key>,
    crashed_at: Option<u64>,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            held: Vec::new(),
            crashed_at: None,
        }
    }

    /// Raw events for `frame`. `game_over` is what the driver sees on screen.
    pub fn events(&mut self, frame: u64, now_ms: u64, game_over: bool) -> Vec<KeyEvent> {
        let mut out = Vec::new();

        if frame == 0 {
            out.push(KeyEvent::down(Key::Space, now_ms));
            out.push(KeyEvent::up(Key::Space, now_ms));
            return out;
        }

        if game_over {
            let since = *self.crashed_at.get_or_insert(frame);
            // Let go of everything, then restart after a beat.
            for key in self.held.drain(..) {
                out.push(KeyEvent::up(key, now_ms));
            }
            if frame - since >= RESTART_DELAY {
                out.push(KeyEvent::down(Key::Space, now_ms));
                out.push(KeyEvent::up(Key::Space, now_ms));
                self.crashed_at = None;
            }
            return out;
        }
        self.crashed_at = None;

        if frame % PAUSE_EVERY == 0 || frame % PAUSE_EVERY == PAUSE_LENGTH {
            out.push(KeyEvent::down(Key::Escape, now_ms));
            out.push(KeyEvent::up(Key::Escape, now_ms));
        }

        if self.rng.gen_bool(STEER_CHANCE) {
            let key = STEER_KEYS[self.rng.gen_range(0..STEER_KEYS.len())];
            if let Some(slot) = self.held.iter().position(|k| *k == key) {
                self.held.remove(slot);
                out.push(KeyEvent::up(key, now_ms));
            } else {
                self.held.push(key);
                out.push(KeyEvent::down(key, now_ms));
            }
        }

        if !self.held.is_empty() && self.rng.gen_bool(REPEAT_CHANCE) {
            let key = self.held[self.rng.gen_range(0..self.held.len())];
            out.push(KeyEvent::down(key, now_ms));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_starts_the_game() {
        let mut pilot = Autopilot::new(0);
        let events = pilot.events(0, 0, false);
        assert_eq!(events[0], KeyEvent::down(Key::Space, 0));
    }

    #[test]
    fn same_seed_same_driving() {
        let mut a = Autopilot::new(42);
        let mut b = Autopilot::new(42);
        for frame in 0..500 {
            assert_eq!(a.events(frame, frame * 16, false), b.events(frame, frame * 16, false));
        }
    }

    #[test]
    fn crash_releases_keys_then_restarts() {
        let mut pilot = Autopilot::new(7);
        for frame in 1..400 {
            pilot.events(frame, frame * 16, false);
        }
        let crash = 400;
        let released = pilot.events(crash, crash * 16, true);
        assert!(released.iter().all(|e| !e.pressed));

        let mut restart = None;
        for frame in crash + 1..crash + 2 * RESTART_DELAY {
            let events = pilot.events(frame, frame * 16, true);
            if events.iter().any(|e| e.key == Key::Space && e.pressed) {
                restart = Some(frame);
                break;
            }
        }
        assert_eq!(restart, Some(crash + RESTART_DELAY));
    }
}
