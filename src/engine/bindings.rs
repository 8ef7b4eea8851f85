use std::collections::HashMap;

use crate::components::Direction;
use crate::engine::input::Key;

/// What a bound key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Steering key: press and release both matter.
    Steer(Direction),
    TogglePause,
    /// Start a run, or restart after a crash.
    Start,
}

/// Key → command table. Lookups on unbound keys return `None`.
pub struct Bindings {
    keys: HashMap<Key, Command>,
}

impl Bindings {
    pub fn new() -> Self {
        Self { keys: HashMap::new() }
    }

    pub fn bind_key(&mut self, key: Key, command: Command) {
        self.keys.insert(key, command);
    }

    #[allow(dead_code)]
    pub fn unbind(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    /// Give `key` the same command as `key_to_copy`, if that one is bound.
    pub fn duplicate_binding(&mut self, key_to_copy: Key, key: Key) {
        if let Some(&command) = self.keys.get(&key_to_copy) {
            self.keys.insert(key, command);
        }
    }

    /// Move `old_key`'s command to `new_key`.
    #[allow(dead_code)]
    pub fn rebind_key(&mut self, old_key: Key, new_key: Key) {
        if let Some(command) = self.keys.remove(&old_key) {
            self.keys.insert(new_key, command);
        }
    }

    pub fn command(&self, key: Key) -> Option<Command> {
        self.keys.get(&key).copied()
    }
}

/// WASD steering with arrow-key aliases, Space to start, Escape to pause.
pub fn default_bindings() -> Bindings {
    let mut bindings = Bindings::new();
    bindings.bind_key(Key::W, Command::Steer(Direction::Forward));
    bindings.bind_key(Key::A, Command::Steer(Direction::Left));
    bindings.bind_key(Key::S, Command::Steer(Direction::Backward));
    bindings.bind_key(Key::D, Command::Steer(Direction::Right));
    bindings.duplicate_binding(Key::W, Key::Up);
    bindings.duplicate_binding(Key::A, Key::Left);
    bindings.duplicate_binding(Key::S, Key::Down);
    bindings.duplicate_binding(Key::D, Key::Right);
    bindings.bind_key(Key::Space, Command::Start);
    bindings.bind_key(Key::Escape, Command::TogglePause);
    bindings
}
