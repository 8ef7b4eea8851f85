mod app;
mod assets;
mod components;
mod config;
mod engine;
mod fsm;
mod scene;
mod systems;

use app::GameApp;
use assets::AssetRegistry;
use clap::Parser;
use config::GameConfig;
use engine::autopilot::Autopilot;
use tracing::Level;

#[derive(Parser)]
#[command(name = "skyhaul", about = "Headless run of the skyhaul flying-car game")]
struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 3_600)]
    frames: u64,
    /// Seed for spawn positions and the autopilot driver
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Rocks in the obstacle pool
    #[arg(long)]
    rocks: Option<usize>,
    /// Luggage pieces in the pickup pool
    #[arg(long)]
    luggage: Option<usize>,
    /// Extra spawn distance per pool slot
    #[arg(long)]
    stagger: Option<f32>,
    /// Depth past which an entity is recycled
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<f32>,
    /// Half width of the lane entities spawn in
    #[arg(long)]
    lane_half_width: Option<f32>,
    /// Distance the world scrolls per frame
    #[arg(long)]
    speed: Option<f32>,
    /// Log every frame
    #[arg(long)]
    trace: bool,
}

impl Args {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::default();
        if let Some(speed) = self.speed {
            config = config.with_step(speed);
        }
        if let Some(count) = self.rocks {
            config.rocks.count = count;
        }
        if let Some(count) = self.luggage {
            config.luggage.count = count;
        }
        for pool in [&mut config.rocks, &mut config.luggage] {
            if let Some(stagger) = self.stagger {
                pool.rule.stagger = stagger;
            }
            if let Some(threshold) = self.threshold {
                pool.rule.threshold = threshold;
            }
            if let Some(width) = self.lane_half_width {
                pool.rule.lane_half_width = width;
            }
        }
        config
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.trace { Level::TRACE } else { Level::INFO })
        .init();

    // Every model is registered up front, before the first frame.
    let assets = AssetRegistry::builtin();
    let mut app = match GameApp::new(args.config(), &assets, args.seed) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "setup failed");
            std::process::exit(1);
        }
    };

    let mut pilot = Autopilot::new(args.seed);
    let mut recycled = 0usize;
    let mut picked_up = 0usize;
    for frame in 0..args.frames {
        let events = pilot.events(frame, app.timer().now_ms(), app.session().game_over);
        let report = app.frame(&events);
        recycled += report.recycled;
        picked_up += report.picked_up;
        if report.crashed {
            tracing::debug!(frame, "crash frame");
        }
    }

    let nearest_rock = app
        .track()
        .rocks
        .map(app.world(), |_, t| -t.position.z)
        .into_iter()
        .fold(f32::INFINITY, f32::min);

    let session = app.session();
    tracing::info!(
        frames = args.frames,
        distance = session.distance.round(),
        points = session.points,
        crashes = session.crashes,
        recycled,
        picked_up,
        nearest_rock,
        "simulation finished"
    );
}
