use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::cloth::Cloth;
use crate::collider::{Plane, Shape, Torus};
use crate::config::WorldConfig;
use crate::error::{ConfigError, StepError};
use crate::rigid_body::{Drift, RigidBody};
use crate::{Quat, V3};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
	pub step: u64,
	// largest particle displacement over the step
	pub max_displacement: f32,
	pub recycled: usize,
}

/// Cloth, drifting rings and static ground, advanced together by `step`.
#[derive(Clone)]
pub struct World {
	pub dt: f32,
	pub substeps: usize,
	gravity: V3,
	damping: f32,
	divergence_limit: f32,
	steps: u64,

	cloth: Cloth,
	bodies: Vec<RigidBody>,
	statics: Vec<RigidBody>,
	planes: Vec<Plane>,
	rng: StdRng,
}

impl World {
	pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let cloth = Cloth::initialize(&config.cloth)?
			.with_iterations(config.iterations);

		let ground = Plane::new(config.ground.normal.into(), config.ground.offset);
		let statics = vec![RigidBody::new_static(ground)];
		let planes = statics
			.iter()
			.filter_map(|b| match b.shape() {
				Shape::Plane(p) => Some(*p),
				_ => None,
			})
			.collect();

		let rings = &config.rings;
		let torus = Torus {
			major_radius: rings.major_radius,
			minor_radius: rings.minor_radius,
		};
		let axis = V3::from(rings.drift.axis).normalize();
		let bodies = rings
			.spawns
			.iter()
			.map(|spawn| {
				let spawn = V3::from(*spawn);
				RigidBody::new_ring(torus, rings.mass, spawn, Quat::identity())
					.with_damping(rings.damping)
					.with_drift(Drift {
						axis,
						min_speed: rings.drift.min_speed,
						max_speed: rings.drift.max_speed,
						threshold: rings.drift.threshold,
						spawn,
					})
			})
			.collect::<Vec<_>>();

		let rng = match config.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		info!(
			"world: {}x{} cloth, {} constraints, {} rings, dt {:.4} / {} substeps",
			config.cloth.cols,
			config.cloth.rows,
			cloth.constraint_len(),
			bodies.len(),
			config.dt,
			config.substeps,
		);
		Ok(Self {
			dt: config.dt,
			substeps: config.substeps,
			gravity: config.gravity.into(),
			damping: config.damping,
			divergence_limit: config.divergence_limit,
			steps: 0,
			cloth,
			bodies,
			statics,
			planes,
			rng,
		})
	}

	pub fn cloth(&self) -> &Cloth {
		&self.cloth
	}

	pub fn bodies(&self) -> &[RigidBody] {
		&self.bodies
	}

	pub fn bodies_mut(&mut self) -> &mut [RigidBody] {
		&mut self.bodies
	}

	pub fn statics(&self) -> &[RigidBody] {
		&self.statics
	}

	pub fn steps(&self) -> u64 {
		self.steps
	}

	pub fn gravity(&self) -> V3 {
		self.gravity
	}

	/// Advance everything by one fixed `dt`, under the given wind force.
	///
	/// A failed step leaves the world as it was before the call.
	pub fn step(&mut self, wind: V3) -> Result<StepReport, StepError> {
		let cloth = self.cloth.clone();
		let bodies = self.bodies.clone();
		let rng = self.rng.clone();
		let steps = self.steps;
		match self.advance(wind) {
			Ok(report) => Ok(report),
			Err(e) => {
				self.cloth = cloth;
				self.bodies = bodies;
				self.rng = rng;
				self.steps = steps;
				debug!("step {} rolled back", steps + 1);
				Err(e)
			}
		}
	}

	fn advance(&mut self, wind: V3) -> Result<StepReport, StepError> {
		let h = self.dt / self.substeps as f32;
		let decay = (1.0 - self.damping).powf(h);
		let before: Vec<V3> = self
			.cloth
			.grid()
			.particles()
			.iter()
			.map(|p| p.get_pos())
			.collect();

		for _ in 0..self.substeps {
			self.cloth
				.substep(h, self.gravity, wind, decay, &self.planes);
			for body in self.bodies.iter_mut() {
				body.integrate(h, self.gravity, wind);
				for plane in self.planes.iter() {
					body.collide(plane);
				}
			}
		}

		let mut recycled = 0;
		for (idx, body) in self.bodies.iter_mut().enumerate() {
			if body.apply_drift(&mut self.rng) {
				debug!("ring {} recycled to {:?}", idx, body.get_pos());
				recycled += 1;
			}
		}
		self.steps += 1;

		let max_displacement = self
			.cloth
			.grid()
			.particles()
			.iter()
			.zip(before.iter())
			.map(|(p, b)| (p.get_pos() - b).magnitude())
			.fold(0f32, f32::max);
		self.check()?;
		trace!("step {}: max displacement {:e}", self.steps, max_displacement);
		Ok(StepReport {
			step: self.steps,
			max_displacement,
			recycled,
		})
	}

	fn check_pos(&self, pos: V3, body: impl FnOnce() -> String) -> Result<(), StepError> {
		if !pos.iter().all(|x| x.is_finite()) {
			return Err(StepError::NonFinite { body: body() });
		}
		let distance = pos.magnitude();
		if distance > self.divergence_limit {
			return Err(StepError::Diverged {
				body: body(),
				distance,
			});
		}
		Ok(())
	}

	fn check(&self) -> Result<(), StepError> {
		let grid = self.cloth.grid();
		for (idx, p) in grid.particles().iter().enumerate() {
			self.check_pos(p.get_pos(), || {
				let (i, j) = grid.coord(idx);
				format!("particle ({}, {})", i, j)
			})?;
		}
		for (idx, body) in self.bodies.iter().enumerate() {
			self.check_pos(body.get_pos(), || format!("ring {}", idx))?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn world() -> World {
		World::new(&WorldConfig::default().with_seed(11)).unwrap()
	}

	#[test]
	fn test_invalid_config_fails_fast() {
		let config = WorldConfig::default().with_grid(5, 0);
		assert!(matches!(
			World::new(&config),
			Err(ConfigError::InvalidGrid { cols: 5, rows: 0 })
		));
	}

	#[test]
	fn test_infinite_wind_fails_fast() {
		let mut config = WorldConfig::default();
		config.wind.magnitude = f32::INFINITY;
		assert!(matches!(
			World::new(&config),
			Err(ConfigError::InvalidWind(_))
		));
	}

	#[test]
	fn test_scene_layout() {
		let world = world();
		assert_eq!(world.cloth().grid().len(), 66);
		assert_eq!(world.bodies().len(), 3);
		assert_eq!(world.statics().len(), 1);
		assert_eq!(world.bodies()[0].get_pos(), V3::new(-3., 0., 5.));
	}

	#[test]
	fn test_step_counts() {
		let mut world = world();
		let report = world.step(V3::zeros()).unwrap();
		assert_eq!(report.step, 1);
		assert_eq!(world.steps(), 1);
		assert!(report.max_displacement > 0.0);
	}

	#[test]
	fn test_rings_float_and_drift() {
		let mut world = world();
		for _ in 0..60 {
			world.step(V3::zeros()).unwrap();
		}
		for (body, z0) in world.bodies().iter().zip([5.0, 8.0, 11.0]) {
			let pos = body.get_pos();
			assert!(pos[1] >= 0.3 - 1e-3, "ring sank to {}", pos[1]);
			assert!(pos[2] < z0);
			assert!(body.get_vel()[2] < 0.0);
		}
	}

	#[test]
	fn test_divergence_reported() {
		let mut config = WorldConfig::default().with_seed(3);
		config.divergence_limit = 100.0;
		let mut world = World::new(&config).unwrap();
		let err = world.step(V3::new(1e6, 0., 0.)).unwrap_err();
		assert!(matches!(err, StepError::Diverged { .. }));
	}

	#[test]
	fn test_non_finite_reported() {
		let mut world = world();
		let err = world.step(V3::new(f32::NAN, 0., 0.)).unwrap_err();
		assert!(matches!(err, StepError::NonFinite { .. }));
	}

	#[test]
	fn test_failed_step_rolled_back() {
		let mut world = world();
		for _ in 0..30 {
			world.step(V3::zeros()).unwrap();
		}
		let particles: Vec<_> = world
			.cloth()
			.grid()
			.particles()
			.iter()
			.map(|p| (p.get_pos(), p.get_vel()))
			.collect();
		let rings: Vec<_> = world.bodies().iter().map(|b| b.get_pos()).collect();
		let mut twin = world.clone();

		let err = world.step(V3::new(1e7, 0., 0.)).unwrap_err();
		assert!(matches!(err, StepError::Diverged { .. }));
		assert_eq!(world.steps(), 30);
		for (p, (pos, vel)) in world.cloth().grid().particles().iter().zip(particles) {
			assert_eq!(p.get_pos(), pos);
			assert_eq!(p.get_vel(), vel);
		}
		for (b, pos) in world.bodies().iter().zip(rings) {
			assert_eq!(b.get_pos(), pos);
		}

		// continues exactly as if the bad step never happened
		let report = world.step(V3::zeros()).unwrap();
		twin.step(V3::zeros()).unwrap();
		assert_eq!(report.step, 31);
		for (a, b) in world.bodies().iter().zip(twin.bodies()) {
			assert_eq!(a.get_pos(), b.get_pos());
			assert_eq!(a.get_vel(), b.get_vel());
		}
	}
}
