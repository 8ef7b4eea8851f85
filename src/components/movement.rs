// ---------------------------------------------------------------------------
// Movement state
// ---------------------------------------------------------------------------

/// One of the four steering directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Forward,
    Backward,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Forward,
        Direction::Backward,
    ];

    /// Left/right steer along x; forward/backward along z.
    pub fn is_lateral(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Lateral component of the movement state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisX {
    None,
    Left,
    Right,
}

/// Depth component of the movement state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisZ {
    None,
    Forward,
    Backward,
}

/// The car's movement state, one independent value per axis.
///
/// The nine combinations are the nine named states of the steering graph.
/// Transition logic lives in `impl Movement` in `src/systems/player.rs`
/// so that this file stays pure data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Movement {
    pub x: AxisX,
    pub z: AxisZ,
}

impl Movement {
    pub const IDLE: Movement = Movement { x: AxisX::None, z: AxisZ::None };

    /// All nine states, `idle` first.
    pub fn all() -> impl Iterator<Item = Movement> {
        [AxisZ::None, AxisZ::Forward, AxisZ::Backward]
            .into_iter()
            .flat_map(|z| {
                [AxisX::None, AxisX::Left, AxisX::Right]
                    .into_iter()
                    .map(move |x| Movement { x, z })
            })
    }

    pub fn name(self) -> &'static str {
        match (self.x, self.z) {
            (AxisX::None, AxisZ::None) => "idle",
            (AxisX::Left, AxisZ::None) => "left",
            (AxisX::Right, AxisZ::None) => "right",
            (AxisX::None, AxisZ::Forward) => "forward",
            (AxisX::None, AxisZ::Backward) => "backward",
            (AxisX::Left, AxisZ::Forward) => "left-forward",
            (AxisX::Left, AxisZ::Backward) => "left-backward",
            (AxisX::Right, AxisZ::Forward) => "right-forward",
            (AxisX::Right, AxisZ::Backward) => "right-backward",
        }
    }

    pub fn from_name(name: &str) -> Option<Movement> {
        Self::all().find(|m| m.name() == name)
    }

    /// Moving along exactly one axis.
    pub fn is_single_axis(self) -> bool {
        (self.x == AxisX::None) != (self.z == AxisZ::None)
    }

    /// Moving along both axes at once.
    pub fn is_composite(self) -> bool {
        self.x != AxisX::None && self.z != AxisZ::None
    }

    pub fn contains(self, dir: Direction) -> bool {
        match dir {
            Direction::Left => self.x == AxisX::Left,
            Direction::Right => self.x == AxisX::Right,
            Direction::Forward => self.z == AxisZ::Forward,
            Direction::Backward => self.z == AxisZ::Backward,
        }
    }

    /// Replace the component on `dir`'s axis with `dir`.
    pub fn with(mut self, dir: Direction) -> Movement {
        match dir {
            Direction::Left => self.x = AxisX::Left,
            Direction::Right => self.x = AxisX::Right,
            Direction::Forward => self.z = AxisZ::Forward,
            Direction::Backward => self.z = AxisZ::Backward,
        }
        self
    }

    /// Clear the axis `dir` belongs to.
    pub fn without(mut self, dir: Direction) -> Movement {
        if dir.is_lateral() {
            self.x = AxisX::None;
        } else {
            self.z = AxisZ::None;
        }
        self
    }

    /// -1 for left, +1 for right.
    pub fn lateral_sign(self) -> f32 {
        match self.x {
            AxisX::None => 0.0,
            AxisX::Left => -1.0,
            AxisX::Right => 1.0,
        }
    }

    /// -1 for forward (toward the horizon), +1 for backward.
    pub fn depth_sign(self) -> f32 {
        match self.z {
            AxisZ::None => 0.0,
            AxisZ::Forward => -1.0,
            AxisZ::Backward => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Discrete input event dispatched into the steering graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// `move-<dir>`: a steering key went down.
    Move(Direction),
    /// `stop-accelerating`: the only held steering key went up.
    Stop,
    /// `stop-accelerating-<dir>`: one of two held axes was released.
    StopAxis(Direction),
}

impl Action {
    pub fn all() -> impl Iterator<Item = Action> {
        Direction::ALL
            .into_iter()
            .map(Action::Move)
            .chain(std::iter::once(Action::Stop))
            .chain(Direction::ALL.into_iter().map(Action::StopAxis))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Move(Direction::Left) => "move-left",
            Self::Move(Direction::Right) => "move-right",
            Self::Move(Direction::Forward) => "move-forward",
            Self::Move(Direction::Backward) => "move-backward",
            Self::Stop => "stop-accelerating",
            Self::StopAxis(Direction::Left) => "stop-accelerating-left",
            Self::StopAxis(Direction::Right) => "stop-accelerating-right",
            Self::StopAxis(Direction::Forward) => "stop-accelerating-forward",
            Self::StopAxis(Direction::Backward) => "stop-accelerating-backward",
        }
    }
}
