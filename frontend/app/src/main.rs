mod frame_timer;
mod renderer;
mod ui;

use anyhow::Context as _;
use clap::Parser as _;
use mothership_simulator::config::GameConfig;
use mothership_simulator::scenario;
use mothership_simulator::simulation::Simulation;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[clap(about = "Fly a small ship through an asteroid field")]
struct Arguments {
    /// JSON file with game settings; command-line flags take precedence.
    #[clap(long, value_parser)]
    config: Option<PathBuf>,

    #[clap(long, value_parser)]
    seed: Option<u64>,

    #[clap(long, value_parser)]
    scenario: Option<String>,

    #[clap(long, value_parser)]
    asteroids: Option<usize>,

    #[clap(long, value_parser)]
    width: Option<f64>,

    #[clap(long, value_parser)]
    height: Option<f64>,

    /// Remove rocks the player touches and count them as score.
    #[clap(long)]
    salvage: bool,

    /// Fence the screen with solid walls.
    #[clap(long)]
    walls: bool,

    /// Run this many ticks without a window and print the final snapshot.
    #[clap(long, value_parser)]
    headless_ticks: Option<u32>,
}

fn load_config(args: &Arguments) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(scenario) = &args.scenario {
        config.scenario = scenario.clone();
    }
    if let Some(asteroids) = args.asteroids {
        config.asteroid_count = asteroids;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    config.salvage |= args.salvage;
    config.walls |= args.walls;
    config.validate()?;
    Ok(config)
}

fn run_headless(config: GameConfig, ticks: u32) -> anyhow::Result<()> {
    let mut sim = Simulation::new(config)?;
    for _ in 0..ticks {
        sim.step();
    }
    log::info!(
        "Ran {} ticks, {} entities remain, score {}",
        sim.tick(),
        sim.entities.len(),
        sim.score()
    );
    println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("mothership=info"))
        .init();

    let args = Arguments::parse();
    let config = load_config(&args)?;

    if let Some(ticks) = args.headless_ticks {
        return run_headless(config, ticks);
    }

    let scenario_name = scenario::load(&config.scenario)?.human_name();
    let sim = Simulation::new(config.clone())?;
    let conf = macroquad::window::Conf {
        window_title: "Mothership".to_owned(),
        window_width: config.width as i32,
        window_height: config.height as i32,
        ..Default::default()
    };
    macroquad::Window::from_config(conf, ui::run(sim, scenario_name));
    Ok(())
}
