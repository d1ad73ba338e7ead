use serde::Deserialize;

use crate::error::ConfigError;
use crate::V3;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
	pub cols: usize,
	pub rows: usize,
	pub spacing: f32,
	// None: the last row
	pub anchor_row: Option<usize>,
	pub origin: [f32; 3],
	pub sag_axis: [f32; 3],
	pub sag_speed: f32,
	pub compliance: f32,
	// placement of the rendered strip, particles stay in simulation space
	pub mesh_offset: [f32; 3],
	pub mesh_yaw: f32,
}

impl Default for ClothConfig {
	fn default() -> Self {
		Self {
			cols: 5,
			rows: 10,
			spacing: 0.2,
			anchor_row: None,
			origin: [0.0, 1.1, 0.0],
			sag_axis: [0.0, 0.0, -1.0],
			sag_speed: 0.1,
			compliance: 0.0,
			mesh_offset: [0.0, 2.0, 0.0],
			mesh_yaw: 0.5,
		}
	}
}

impl ClothConfig {
	pub fn anchor(&self) -> usize {
		self.anchor_row.unwrap_or(self.rows)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.cols == 0 || self.rows == 0 {
			return Err(ConfigError::InvalidGrid {
				cols: self.cols,
				rows: self.rows,
			});
		}
		if !self.spacing.is_finite() || self.spacing <= 0.0 {
			return Err(ConfigError::InvalidSpacing(self.spacing));
		}
		if self.anchor() > self.rows {
			return Err(ConfigError::InvalidAnchor {
				anchor: self.anchor(),
				rows: self.rows,
			});
		}
		if !finite(self.origin) || !finite(self.sag_axis) {
			return Err(ConfigError::InvalidAxis("sag"));
		}
		if !self.compliance.is_finite() || self.compliance < 0.0 {
			return Err(ConfigError::InvalidShape("negative compliance"));
		}
		if !finite(self.mesh_offset) || !self.mesh_yaw.is_finite() {
			return Err(ConfigError::InvalidShape("non-finite cloth mesh placement"));
		}
		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
	pub axis: [f32; 3],
	pub min_speed: f32,
	pub max_speed: f32,
	pub threshold: f32,
}

impl Default for DriftConfig {
	fn default() -> Self {
		Self {
			axis: [0.0, 0.0, 1.0],
			min_speed: 0.1,
			max_speed: 1.1,
			threshold: -10.0,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RingConfig {
	pub spawns: Vec<[f32; 3]>,
	pub mass: f32,
	pub major_radius: f32,
	pub minor_radius: f32,
	pub damping: f32,
	pub drift: DriftConfig,
}

impl Default for RingConfig {
	fn default() -> Self {
		Self {
			spawns: (0..3)
				.map(|i| {
					let i = i as f32;
					[i * 3.0 - 3.0, 0.0, i * 3.0 + 5.0]
				})
				.collect(),
			mass: 0.5,
			major_radius: 0.7,
			minor_radius: 0.3,
			damping: 0.01,
			drift: DriftConfig::default(),
		}
	}
}

impl RingConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.mass.is_finite() || self.mass <= 0.0 {
			return Err(ConfigError::InvalidMass(self.mass));
		}
		if !(self.minor_radius > 0.0 && self.major_radius > 0.0) {
			return Err(ConfigError::InvalidShape("torus radii must be positive"));
		}
		if !(0.0..1.0).contains(&self.damping) {
			return Err(ConfigError::InvalidShape("ring damping outside [0, 1)"));
		}
		let drift = &self.drift;
		if !(drift.min_speed >= 0.0 && drift.min_speed < drift.max_speed) {
			return Err(ConfigError::InvalidDrift {
				min: drift.min_speed,
				max: drift.max_speed,
			});
		}
		if !nonzero(drift.axis) {
			return Err(ConfigError::InvalidAxis("drift"));
		}
		if self.spawns.iter().any(|s| !finite(*s)) {
			return Err(ConfigError::InvalidShape("non-finite ring spawn"));
		}
		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
	pub normal: [f32; 3],
	pub offset: f32,
	pub size: f32,
}

impl Default for GroundConfig {
	fn default() -> Self {
		Self {
			normal: [0.0, 1.0, 0.0],
			offset: 0.0,
			size: 25.0,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WindConfig {
	pub initial: [f32; 3],
	pub magnitude: f32,
}

impl Default for WindConfig {
	fn default() -> Self {
		Self {
			initial: [0.1, 0.0, 0.0],
			magnitude: 5.0,
		}
	}
}

impl WindConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.magnitude.is_finite() || self.magnitude < 0.0 {
			return Err(ConfigError::InvalidWind(self.magnitude));
		}
		if !finite(self.initial) {
			return Err(ConfigError::InvalidAxis("initial wind"));
		}
		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
	pub dt: f32,
	pub substeps: usize,
	pub iterations: usize,
	pub gravity: [f32; 3],
	pub damping: f32,
	pub divergence_limit: f32,
	pub seed: Option<u64>,
	pub cloth: ClothConfig,
	pub rings: RingConfig,
	pub ground: GroundConfig,
	pub wind: WindConfig,
}

impl Default for WorldConfig {
	fn default() -> Self {
		Self {
			dt: 1.0 / 60.0,
			substeps: 10,
			iterations: 1,
			gravity: [0.0, -9.82, 0.0],
			damping: 0.5,
			divergence_limit: 1000.0,
			seed: None,
			cloth: ClothConfig::default(),
			rings: RingConfig::default(),
			ground: GroundConfig::default(),
			wind: WindConfig::default(),
		}
	}
}

impl WorldConfig {
	pub fn with_dt(mut self, dt: f32) -> Self {
		self.dt = dt;
		self
	}

	pub fn with_substeps(mut self, substeps: usize) -> Self {
		self.substeps = substeps;
		self
	}

	pub fn with_iterations(mut self, iterations: usize) -> Self {
		self.iterations = iterations;
		self
	}

	pub fn with_gravity(mut self, gravity: V3) -> Self {
		self.gravity = gravity.into();
		self
	}

	pub fn with_damping(mut self, damping: f32) -> Self {
		self.damping = damping;
		self
	}

	pub fn with_seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	pub fn with_grid(mut self, cols: usize, rows: usize) -> Self {
		self.cloth.cols = cols;
		self.cloth.rows = rows;
		self
	}

	pub fn without_rings(mut self) -> Self {
		self.rings.spawns.clear();
		self
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.dt.is_finite() || self.dt <= 0.0 {
			return Err(ConfigError::InvalidTimestep(self.dt));
		}
		if self.substeps == 0 {
			return Err(ConfigError::InvalidSubsteps);
		}
		if self.iterations == 0 {
			return Err(ConfigError::InvalidIterations);
		}
		if !finite(self.gravity) {
			return Err(ConfigError::InvalidAxis("gravity"));
		}
		if !(0.0..1.0).contains(&self.damping) {
			return Err(ConfigError::InvalidShape("damping outside [0, 1)"));
		}
		if !self.divergence_limit.is_finite() || self.divergence_limit <= 0.0 {
			return Err(ConfigError::InvalidLimit(self.divergence_limit));
		}
		if !nonzero(self.ground.normal) {
			return Err(ConfigError::InvalidAxis("ground normal"));
		}
		self.cloth.validate()?;
		self.rings.validate()?;
		self.wind.validate()
	}
}

fn finite(v: [f32; 3]) -> bool {
	v.iter().all(|x| x.is_finite())
}

fn nonzero(v: [f32; 3]) -> bool {
	finite(v) && V3::from(v).magnitude() > 0.0
}
