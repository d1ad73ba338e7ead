//! furin: a paper strip hanging in the wind and rings drifting over water.
//!
//! ```bash
//! # window, arrow keys steer the wind
//! furin
//!
//! # 600 frames without a window, as fast as possible
//! furin --headless --frames 600 --unlocked
//!
//! # custom scene
//! furin --config scene.json --seed 7
//! ```

use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pbd::config::WorldConfig;
use pbd::wind::WindController;
use pbd::world::World;
use viewer::frame_loop::FrameLoop;
use viewer::mesh_store::MeshStore;
use viewer::scheduler::{FrameClock, TimeModel};
use viewer::sync::SceneLayout;

#[derive(Parser, Debug)]
#[command(name = "furin")]
#[command(author, version, about = "Wind-blown cloth and drifting rings", long_about = None)]
struct Cli {
	/// Logging verbosity level
	#[arg(short, long, default_value = "info")]
	log_level: String,

	/// JSON scene configuration, missing fields keep their defaults
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Seed for the ring drift speeds
	#[arg(long)]
	seed: Option<u64>,

	/// Run the frame loop without opening a window
	#[arg(long)]
	headless: bool,

	/// Frames to run in headless mode
	#[arg(long, default_value = "600")]
	frames: u64,

	/// Do not lock headless frames to real time
	#[arg(long)]
	unlocked: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<WorldConfig> {
	let path = match path {
		Some(path) => path,
		None => return Ok(WorldConfig::default()),
	};
	let text = std::fs::read_to_string(path)
		.with_context(|| format!("reading {}", path.display()))?;
	let config = serde_json::from_str(&text)
		.with_context(|| format!("parsing {}", path.display()))?;
	Ok(config)
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let log_level = match cli.log_level.to_lowercase().as_str() {
		"trace" => Level::TRACE,
		"debug" => Level::DEBUG,
		"info" => Level::INFO,
		"warn" => Level::WARN,
		"error" => Level::ERROR,
		_ => Level::INFO,
	};
	let subscriber = FmtSubscriber::builder()
		.with_max_level(log_level)
		.with_target(true)
		.with_thread_ids(false)
		.with_file(false)
		.with_line_number(false)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	info!("furin v{}", env!("CARGO_PKG_VERSION"));

	let mut config = load_config(cli.config.as_deref())?;
	if let Some(seed) = cli.seed {
		config.seed = Some(seed);
	}
	let world = World::new(&config)?;
	let wind = WindController::new(&config.wind);
	let (tx, rx) = channel();
	let layout = SceneLayout::new(&config);
	let mut frame_loop = FrameLoop::new(world, wind, MeshStore::default(), (), rx, &layout)?;

	if cli.headless {
		let model = if cli.unlocked {
			TimeModel::VideoRender
		} else {
			TimeModel::RtFrameLock
		};
		let mut clock = FrameClock::new(config.dt, model);
		let summary = frame_loop.run(&mut clock, cli.frames);
		if let Some(last) = summary.last {
			info!(
				"step {}: max displacement {:e}, {} skipped",
				last.step, last.max_displacement, summary.skipped
			);
		}
		drop(tx);
		return Ok(());
	}
	viewer::run(frame_loop, tx, config.dt)
}
