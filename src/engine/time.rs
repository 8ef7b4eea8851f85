/// Fixed-step frame clock for the headless loop.
///
/// `dt` is the length of the last frame in seconds; `now_ms` is the
/// simulated wall time used to stamp input events.
pub struct FrameTimer {
    step: f32,
    pub dt: f32,
    pub frame: u64,
    now_ms: f64,
}

impl FrameTimer {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            dt: 0.0,
            frame: 0,
            now_ms: 0.0,
        }
    }

    pub fn tick(&mut self) {
        self.dt = self.step;
        self.frame += 1;
        self.now_ms += f64::from(self.step) * 1000.0;
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms as u64
    }

    pub fn dt_ms(&self) -> f32 {
        self.dt * 1000.0
    }
}
