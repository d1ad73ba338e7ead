use thiserror::Error;

use crate::pr_model::{MeshHandle, PrShape};
use crate::{Quat, V3};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
	#[error("mesh {0:?} is not known to the render host")]
	UnknownMesh(MeshHandle),

	#[error("vertex {index} out of range for mesh {handle:?} ({len} vertices)")]
	IndexOutOfRange {
		handle: MeshHandle,
		index: usize,
		len: usize,
	},
}

/// The render side of the scene. The simulation only ever writes through
/// this trait; rasterization and shading stay behind it.
pub trait RenderHost {
	fn create_deformable_mesh(&mut self, shape: PrShape) -> MeshHandle;

	fn create_rigid_mesh(&mut self, shape: PrShape) -> MeshHandle;

	fn set_vertex_position(
		&mut self,
		handle: MeshHandle,
		index: usize,
		pos: V3,
	) -> Result<(), HostError>;

	/// Flag a vertex buffer for re-upload on the next present.
	fn mark_dirty(&mut self, handle: MeshHandle) -> Result<(), HostError>;

	fn set_transform(
		&mut self,
		handle: MeshHandle,
		pos: V3,
		rot: Quat,
	) -> Result<(), HostError>;

	fn present_frame(&mut self);
}

/// Tween timers of non-physical scene decorations.
pub trait Decorations {
	fn advance(&mut self) {}
}

impl Decorations for () {}
