use std::time::SystemTime;

use pbd::config::WorldConfig;
use pbd::world::World;
use pbd::V3;

fn main() {
	let start = SystemTime::now();
	let mut world = match World::new(&WorldConfig::default().with_seed(0)) {
		Ok(world) => world,
		Err(e) => {
			eprintln!("{}", e);
			std::process::exit(1);
		}
	};
	let rframes = 1000;
	for _ in 0..rframes {
		if let Err(e) = world.step(V3::new(0.1, 0., 0.)) {
			eprintln!("{}", e);
			break;
		}
	}
	let time = rframes as f32 * world.dt;
	let duration = SystemTime::now()
		.duration_since(start)
		.map(|d| d.as_micros())
		.unwrap_or_default();
	eprintln!("{:.3}%", duration as f32 / time / 1e4);
}
