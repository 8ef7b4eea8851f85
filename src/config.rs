use crate::components::{ScatterRule, WrapRule};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Distance the world scrolls toward the viewer each frame. Not scaled by
/// frame time: the game runs at a constant per-frame speed.
pub const WORLD_STEP: f32 = 0.25;
/// Simulated frame length for the headless loop (seconds).
pub const FRAME_DT: f32 = 1.0 / 60.0;

const ROCK_COUNT: usize = 15;
const LUGGAGE_COUNT: usize = 10;

const LANE_HALF_WIDTH: f32 = 7.0;
const SPAWN_NEAR: f32 = 65.0;
const SPAWN_WINDOW: f32 = 10.0;
const SPAWN_STAGGER: f32 = 10.0;
const FORWARD_THRESHOLD: f32 = 10.0;

const BACKDROP_BAND: f32 = 200.0;
const BACKDROP_THRESHOLD: f32 = 110.0;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{pool}: respawn depth -{near} is past the forward threshold {threshold}")]
    RespawnPastThreshold { pool: &'static str, near: f32, threshold: f32 },
    #[error("{pool}: {field} must be non-negative, got {value}")]
    Negative { pool: &'static str, field: &'static str, value: f32 },
    #[error("frame length must be positive, got {0}")]
    FrameLength(f32),
    #[error("backdrop: threshold {0} is ahead of the first segment at z = 0")]
    BackdropThreshold(f32),
    #[error("backdrop: step {step} must stay below 2 * band - threshold = {limit}")]
    BackdropStep { step: f32, limit: f32 },
}

/// Size and spawn rule of one scatter pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoolConfig {
    pub count: usize,
    pub rule: ScatterRule,
}

/// Construction-time parameters for a whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub frame_dt: f32,
    pub rocks: PoolConfig,
    pub luggage: PoolConfig,
    pub backdrop: WrapRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        let rule = ScatterRule {
            lane_half_width: LANE_HALF_WIDTH,
            near: SPAWN_NEAR,
            window: SPAWN_WINDOW,
            stagger: SPAWN_STAGGER,
            threshold: FORWARD_THRESHOLD,
            step: WORLD_STEP,
        };
        Self {
            frame_dt: FRAME_DT,
            rocks: PoolConfig { count: ROCK_COUNT, rule },
            luggage: PoolConfig { count: LUGGAGE_COUNT, rule },
            backdrop: WrapRule {
                band: BACKDROP_BAND,
                threshold: BACKDROP_THRESHOLD,
                step: WORLD_STEP,
            },
        }
    }
}

impl GameConfig {
    /// Per-frame scroll distance shared by every pool.
    pub fn with_step(mut self, step: f32) -> Self {
        self.rocks.rule.step = step;
        self.luggage.rule.step = step;
        self.backdrop.step = step;
        self
    }

    pub fn step(&self) -> f32 {
        self.backdrop.step
    }

    /// Reject parameter sets that would break the recycle invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_dt.is_nan() || self.frame_dt <= 0.0 {
            return Err(ConfigError::FrameLength(self.frame_dt));
        }
        for (pool, rule) in [("rocks", &self.rocks.rule), ("luggage", &self.luggage.rule)] {
            let fields = [
                ("lane_half_width", rule.lane_half_width),
                ("window", rule.window),
                ("stagger", rule.stagger),
                ("step", rule.step),
            ];
            for (field, value) in fields {
                if value.is_nan() || value < 0.0 {
                    return Err(ConfigError::Negative { pool, field, value });
                }
            }
            // A fresh spawn must sit strictly behind the threshold.
            if !(-rule.near < rule.threshold) {
                return Err(ConfigError::RespawnPastThreshold {
                    pool,
                    near: rule.near,
                    threshold: rule.threshold,
                });
            }
        }
        if self.backdrop.band.is_nan() || self.backdrop.band < 0.0 {
            return Err(ConfigError::Negative {
                pool: "backdrop",
                field: "band",
                value: self.backdrop.band,
            });
        }
        if self.backdrop.step.is_nan() || self.backdrop.step < 0.0 {
            return Err(ConfigError::Negative {
                pool: "backdrop",
                field: "step",
                value: self.backdrop.step,
            });
        }
        // Slot 0 starts at z = 0 and must not already be past the threshold.
        if !(self.backdrop.threshold >= 0.0) {
            return Err(ConfigError::BackdropThreshold(self.backdrop.threshold));
        }
        // A wrap lands at most `threshold + step - 2 * band`; keep that
        // behind the viewer so a jumped segment never wraps twice.
        let limit = 2.0 * self.backdrop.band - self.backdrop.threshold;
        if self.backdrop.step >= limit {
            return Err(ConfigError::BackdropStep { step: self.backdrop.step, limit });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn step_applies_to_every_pool() {
        let config = GameConfig::default().with_step(0.5);
        assert_eq!(config.rocks.rule.step, 0.5);
        assert_eq!(config.luggage.rule.step, 0.5);
        assert_eq!(config.step(), 0.5);
    }

    #[test]
    fn spawn_ahead_of_threshold_is_rejected() {
        let mut config = GameConfig::default();
        config.rocks.rule.near = -20.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RespawnPastThreshold { pool: "rocks", .. })
        ));
    }

    #[test]
    fn spawn_on_threshold_is_rejected() {
        let mut config = GameConfig::default();
        config.luggage.rule.near = -config.luggage.rule.threshold;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RespawnPastThreshold { pool: "luggage", .. })
        ));
    }

    #[test]
    fn backdrop_step_must_stay_below_wrap_span() {
        // 2 * 200 - 110
        assert_eq!(
            GameConfig::default().with_step(600.0).validate(),
            Err(ConfigError::BackdropStep { step: 600.0, limit: 290.0 })
        );
        assert!(matches!(
            GameConfig::default().with_step(290.0).validate(),
            Err(ConfigError::BackdropStep { .. })
        ));
        assert_eq!(GameConfig::default().with_step(289.0).validate(), Ok(()));
    }

    #[test]
    fn backdrop_threshold_ahead_of_start_is_rejected() {
        let mut config = GameConfig::default();
        config.backdrop.threshold = -5.0;
        assert_eq!(config.validate(), Err(ConfigError::BackdropThreshold(-5.0)));
    }

    #[test]
    fn negative_lane_is_rejected() {
        let mut config = GameConfig::default();
        config.luggage.rule.lane_half_width = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { pool: "luggage", field: "lane_half_width", .. })
        ));
    }
}
