/// Random respawn window used by rocks and luggage.
///
/// A spawn puts the entity at depth `z = -(U[0, window) + near + stagger * index)`
/// and lateral `x = U[-lane_half_width, lane_half_width)`, then adds a random yaw.
/// Each unpaused frame `z += step`; past `z > threshold` the entity respawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterRule {
    pub lane_half_width: f32,
    pub near: f32,
    pub window: f32,
    pub stagger: f32,
    pub threshold: f32,
    pub step: f32,
}

/// Tiled backdrop: slot `i` starts at `z = -band * i` and jumps back by
/// `2 * band` once it passes `threshold`, so two slots leapfrog forever.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapRule {
    pub band: f32,
    pub threshold: f32,
    pub step: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecyclePolicy {
    Scatter(ScatterRule),
    Wrap(WrapRule),
}

/// Attached to every pooled entity: its slot index plus the rule that moves
/// and respawns it. Behaviour lives in `src/systems/recycle.rs`.
#[derive(Clone, Copy, Debug)]
pub struct Recycler {
    pub index: usize,
    pub policy: RecyclePolicy,
    /// Height the entity rests at; respawns keep it.
    pub rest_height: f32,
}
