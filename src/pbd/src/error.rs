use thiserror::Error;

/// Rejected scene parameters. Raised by `World::new` before any particle or
/// body exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
	#[error("grid needs at least one column and one row, got {cols}x{rows}")]
	InvalidGrid { cols: usize, rows: usize },

	#[error("grid spacing must be finite and positive, got {0}")]
	InvalidSpacing(f32),

	#[error("anchor row {anchor} outside grid with {rows} rows")]
	InvalidAnchor { anchor: usize, rows: usize },

	#[error("timestep must be finite and positive, got {0}")]
	InvalidTimestep(f32),

	#[error("at least one substep per step is required")]
	InvalidSubsteps,

	#[error("at least one constraint pass per substep is required")]
	InvalidIterations,

	#[error("body mass must be finite and positive, got {0}")]
	InvalidMass(f32),

	#[error("invalid collision shape: {0}")]
	InvalidShape(&'static str),

	#[error("drift speed range [{min}, {max}) is empty or negative")]
	InvalidDrift { min: f32, max: f32 },

	#[error("{0} axis must be a non-zero finite vector")]
	InvalidAxis(&'static str),

	#[error("wind magnitude must be finite and non-negative, got {0}")]
	InvalidWind(f32),

	#[error("divergence limit must be finite and positive, got {0}")]
	InvalidLimit(f32),
}

/// What a step can report instead of a usable state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
	#[error("non-finite state in {body}")]
	NonFinite { body: String },

	#[error("{body} diverged to distance {distance}")]
	Diverged { body: String, distance: f32 },
}
