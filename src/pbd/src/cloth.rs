use crate::collider::Plane;
use crate::config::ClothConfig;
use crate::constraint::distance::DistanceConstraint;
use crate::constraint::ground::GroundConstraint;
use crate::constraint::CRef;
use crate::error::ConfigError;
use crate::grid::ParticleGrid;
use crate::V3;

/// Particle grid plus one distance constraint per adjacent pair.
///
/// Constraints are resolved Gauss-Seidel style, `iteration` passes per
/// substep. A single pass leaves some residual stretch under load; more
/// substeps shrink it quadratically.
#[derive(Clone)]
pub struct Cloth {
	grid: ParticleGrid,
	constraints: Vec<CRef>,
	tmp_constraints: Vec<CRef>,
	iteration: usize,
}

impl Cloth {
	pub fn initialize(config: &ClothConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let grid = ParticleGrid::initialize(
			config.cols,
			config.rows,
			config.spacing,
			config.anchor(),
		)?
		.with_origin(config.origin.into())
		.with_sag(V3::from(config.sag_axis), config.sag_speed);
		let constraints = grid
			.neighbours()
			.into_iter()
			.map(|(p1, p2)| {
				DistanceConstraint::new_with_l0(p1, p2, config.spacing)
					.with_compliance(config.compliance)
					.build()
			})
			.collect();
		Ok(Self {
			grid,
			constraints,
			tmp_constraints: Vec::new(),
			iteration: 1,
		})
	}

	pub fn with_iterations(mut self, iteration: usize) -> Self {
		self.iteration = iteration.max(1);
		self
	}

	pub fn grid(&self) -> &ParticleGrid {
		&self.grid
	}

	pub fn constraint_len(&self) -> usize {
		self.constraints.len()
	}

	/// Index pairs of every distance constraint.
	pub fn links(&self) -> Vec<(usize, usize)> {
		self.constraints
			.iter()
			.map(|c| {
				let ps = c.particles();
				(ps[0], ps[1])
			})
			.collect()
	}

	fn collision_constraints(&self, planes: &[Plane]) -> Vec<CRef> {
		let mut result = vec![];
		for (idx, p) in self.grid.particles().iter().enumerate() {
			if p.is_pinned() {
				continue;
			}
			for plane in planes {
				if plane.signed_distance(p.get_pos()) < 0.0 {
					result.push(GroundConstraint::new(idx, *plane).build());
				}
			}
		}
		result
	}

	pub fn substep(
		&mut self,
		h: f32,
		gravity: V3,
		wind: V3,
		decay: f32,
		planes: &[Plane],
	) {
		for p in self.grid.particles_mut() {
			p.integrate(h, gravity, wind, decay);
		}
		self.tmp_constraints = self.collision_constraints(planes);
		for constraint in self.constraints.iter_mut() {
			constraint.pre_iteration();
		}
		let ps = self.grid.particles_mut();
		for _ in 0..self.iteration {
			for constraint in self
				.constraints
				.iter_mut()
				.chain(self.tmp_constraints.iter_mut())
			{
				constraint.step(ps, h);
			}
		}
		for p in self.grid.particles_mut() {
			p.update_velocity(h);
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_constraints_built() {
		let cloth = Cloth::initialize(&ClothConfig::default()).unwrap();
		assert_eq!(cloth.constraint_len(), 115);
		for (a, b) in cloth.links() {
			let pa = cloth.grid().particles()[a].get_pos();
			let pb = cloth.grid().particles()[b].get_pos();
			assert!(((pa - pb).magnitude() - 0.2).abs() < 1e-5);
		}
	}

	#[test]
	fn test_ground_contact() {
		let mut config = ClothConfig::default();
		config.origin = [0.0, 0.5, 0.0];
		config.sag_speed = 0.0;
		let mut cloth = Cloth::initialize(&config).unwrap();
		let ground = [Plane::new(V3::y(), 0.0)];
		for _ in 0..600 {
			cloth.substep(1.0 / 600.0, V3::new(0., -9.82, 0.), V3::zeros(), 1.0, &ground);
		}
		for p in cloth.grid().particles() {
			assert!(p.get_pos()[1] > -0.05);
		}
	}
}
