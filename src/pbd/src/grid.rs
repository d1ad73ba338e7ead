use crate::error::ConfigError;
use crate::particle::Particle;
use crate::V3;

/// `(cols + 1) x (rows + 1)` point masses, stored column by column so that
/// `(i, j)` sits at `i * (rows + 1) + j`.
#[derive(Clone, Debug)]
pub struct ParticleGrid {
	cols: usize,
	rows: usize,
	spacing: f32,
	anchor: usize,
	particles: Vec<Particle>,
}

impl ParticleGrid {
	/// Planar grid in the XY plane centered on the origin. Row `anchor` is
	/// pinned, every other particle has unit mass.
	pub fn initialize(
		cols: usize,
		rows: usize,
		spacing: f32,
		anchor: usize,
	) -> Result<Self, ConfigError> {
		if cols == 0 || rows == 0 {
			return Err(ConfigError::InvalidGrid { cols, rows });
		}
		if !spacing.is_finite() || spacing <= 0.0 {
			return Err(ConfigError::InvalidSpacing(spacing));
		}
		if anchor > rows {
			return Err(ConfigError::InvalidAnchor { anchor, rows });
		}
		let mut particles = Vec::with_capacity((cols + 1) * (rows + 1));
		for i in 0..=cols {
			for j in 0..=rows {
				let pos = V3::new(
					(i as f32 - cols as f32 * 0.5) * spacing,
					(j as f32 - rows as f32 * 0.5) * spacing,
					0.0,
				);
				let imass = if j == anchor { 0.0 } else { 1.0 };
				particles.push(Particle::new(imass, pos, V3::zeros()));
			}
		}
		Ok(Self {
			cols,
			rows,
			spacing,
			anchor,
			particles,
		})
	}

	pub fn with_origin(mut self, origin: V3) -> Self {
		self.particles = self
			.particles
			.into_iter()
			.map(|p| Particle::new(p.get_imass(), p.get_pos() + origin, p.get_vel()))
			.collect();
		self
	}

	/// Initial velocity along `axis`, growing with row distance from the
	/// anchor so the free end starts out swinging.
	pub fn with_sag(mut self, axis: V3, speed: f32) -> Self {
		let anchor = self.anchor;
		let rows = self.rows;
		for (idx, p) in self.particles.iter_mut().enumerate() {
			if p.is_pinned() {
				continue;
			}
			let j = idx % (rows + 1);
			let vel = axis * speed * j.abs_diff(anchor) as f32;
			*p = Particle::new(p.get_imass(), p.get_pos(), vel);
		}
		self
	}

	pub fn cols(&self) -> usize {
		self.cols
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	pub fn spacing(&self) -> f32 {
		self.spacing
	}

	pub fn anchor(&self) -> usize {
		self.anchor
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn index(&self, i: usize, j: usize) -> usize {
		debug_assert!(i <= self.cols && j <= self.rows);
		i * (self.rows + 1) + j
	}

	pub fn coord(&self, idx: usize) -> (usize, usize) {
		(idx / (self.rows + 1), idx % (self.rows + 1))
	}

	pub fn get(&self, i: usize, j: usize) -> &Particle {
		&self.particles[self.index(i, j)]
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Horizontally and vertically adjacent index pairs.
	pub fn neighbours(&self) -> Vec<(usize, usize)> {
		let mut result = vec![];
		for i in 0..=self.cols {
			for j in 0..=self.rows {
				if i < self.cols {
					result.push((self.index(i, j), self.index(i + 1, j)));
				}
				if j < self.rows {
					result.push((self.index(i, j), self.index(i, j + 1)));
				}
			}
		}
		result
	}
}
