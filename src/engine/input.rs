/// Keys the game listens to. Everything else arrives as `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
    Other(char),
}

/// Raw edge reported by the host: a key went down or up at `timestamp_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub pressed: bool,
    pub timestamp_ms: u64,
}

impl KeyEvent {
    pub fn down(key: Key, timestamp_ms: u64) -> Self {
        Self { key, pressed: true, timestamp_ms }
    }

    pub fn up(key: Key, timestamp_ms: u64) -> Self {
        Self { key, pressed: false, timestamp_ms }
    }
}

/// Cleaned-up edge produced by [`InputState::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    /// `held_ms` is how long the key was down.
    KeyReleased { key: Key, held_ms: u64 },
}

/// Tracks which keys are down and turns raw host events into press/release
/// edges. Auto-repeat key-downs for a key that is already held are dropped,
/// so every press is reported exactly once.
pub struct InputState {
    /// Held keys with their press time, oldest first.
    held: Vec<(Key, u64)>,
    last_key: Option<Key>,
    pub events: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: Vec::new(),
            last_key: None,
            events: Vec::new(),
        }
    }

    /// Replace `events` with the edges found in this frame's raw events.
    pub fn update(&mut self, raw: &[KeyEvent]) {
        self.events.clear();

        for event in raw {
            if event.pressed {
                if self.is_key_held(event.key) {
                    continue;
                }
                self.held.push((event.key, event.timestamp_ms));
                self.last_key = Some(event.key);
                self.events.push(InputEvent::KeyPressed(event.key));
            } else {
                let Some(slot) = self.held.iter().position(|(k, _)| *k == event.key) else {
                    continue;
                };
                let (key, since) = self.held.remove(slot);
                if self.last_key == Some(key) {
                    self.last_key = self.held.last().map(|(k, _)| *k);
                }
                self.events.push(InputEvent::KeyReleased {
                    key,
                    held_ms: event.timestamp_ms.saturating_sub(since),
                });
            }
        }
    }

    pub fn is_key_held(&self, key: Key) -> bool {
        self.held.iter().any(|(k, _)| *k == key)
    }

    /// Most recently pressed key that is still held.
    pub fn last_key_pressed(&self) -> Option<Key> {
        self.last_key
    }

    #[allow(dead_code)]
    pub fn held_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().map(|(k, _)| *k)
    }
}
