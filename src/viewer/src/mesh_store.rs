use fnv::FnvHashMap;
use tracing::trace;

use pbd::{Quat, V3};
use protocol::host::{HostError, RenderHost};
use protocol::pr_model::{MeshHandle, PrShape};

#[derive(Clone, Debug)]
pub struct Mesh {
	pub shape: PrShape,
	pub vertices: Vec<V3>,
	pub pos: V3,
	pub rot: Quat,
	pub dirty: bool,
}

/// Render host that keeps every mesh in memory. Stands in for a GPU
/// backend: vertex buffers flagged dirty count as uploaded on present.
#[derive(Default)]
pub struct MeshStore {
	id_alloc: usize,
	meshes: FnvHashMap<MeshHandle, Mesh>,
	frames: u64,
	uploads: u64,
}

impl MeshStore {
	fn insert(&mut self, shape: PrShape) -> MeshHandle {
		let handle = MeshHandle(self.id_alloc);
		self.id_alloc += 1;
		let mesh = Mesh {
			vertices: vec![V3::zeros(); shape.vertex_count()],
			shape,
			pos: V3::zeros(),
			rot: Quat::identity(),
			dirty: false,
		};
		self.meshes.insert(handle, mesh);
		handle
	}

	fn mesh_mut(&mut self, handle: MeshHandle) -> Result<&mut Mesh, HostError> {
		self.meshes
			.get_mut(&handle)
			.ok_or(HostError::UnknownMesh(handle))
	}

	pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
		self.meshes.get(&handle)
	}

	pub fn remove(&mut self, handle: MeshHandle) -> Option<Mesh> {
		self.meshes.remove(&handle)
	}

	pub fn len(&self) -> usize {
		self.meshes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.meshes.is_empty()
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	pub fn uploads(&self) -> u64 {
		self.uploads
	}
}

impl RenderHost for MeshStore {
	fn create_deformable_mesh(&mut self, shape: PrShape) -> MeshHandle {
		self.insert(shape)
	}

	fn create_rigid_mesh(&mut self, shape: PrShape) -> MeshHandle {
		self.insert(shape)
	}

	fn set_vertex_position(
		&mut self,
		handle: MeshHandle,
		index: usize,
		pos: V3,
	) -> Result<(), HostError> {
		let mesh = self.mesh_mut(handle)?;
		let len = mesh.vertices.len();
		match mesh.vertices.get_mut(index) {
			Some(v) => {
				*v = pos;
				Ok(())
			}
			None => Err(HostError::IndexOutOfRange { handle, index, len }),
		}
	}

	fn mark_dirty(&mut self, handle: MeshHandle) -> Result<(), HostError> {
		self.mesh_mut(handle)?.dirty = true;
		Ok(())
	}

	fn set_transform(
		&mut self,
		handle: MeshHandle,
		pos: V3,
		rot: Quat,
	) -> Result<(), HostError> {
		let mesh = self.mesh_mut(handle)?;
		mesh.pos = pos;
		mesh.rot = rot;
		Ok(())
	}

	fn present_frame(&mut self) {
		for mesh in self.meshes.values_mut() {
			if mesh.dirty {
				mesh.dirty = false;
				self.uploads += 1;
			}
		}
		self.frames += 1;
		trace!("frame {} presented", self.frames);
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_vertex_bounds() {
		let mut store = MeshStore::default();
		let cloth = store.create_deformable_mesh(PrShape::Cloth {
			cols: 1,
			rows: 1,
			width: 1.0,
			height: 1.0,
		});
		assert!(store.set_vertex_position(cloth, 3, V3::x()).is_ok());
		assert_eq!(
			store.set_vertex_position(cloth, 4, V3::x()),
			Err(HostError::IndexOutOfRange {
				handle: cloth,
				index: 4,
				len: 4
			})
		);
	}

	#[test]
	fn test_dirty_cleared_on_present() {
		let mut store = MeshStore::default();
		let cloth = store.create_deformable_mesh(PrShape::Cloth {
			cols: 2,
			rows: 2,
			width: 1.0,
			height: 1.0,
		});
		store.mark_dirty(cloth).unwrap();
		store.present_frame();
		store.present_frame();
		assert_eq!(store.frames(), 2);
		assert_eq!(store.uploads(), 1);
		assert!(!store.mesh(cloth).unwrap().dirty);
	}

	#[test]
	fn test_unknown_handle() {
		let mut store = MeshStore::default();
		let ring = store.create_rigid_mesh(PrShape::Torus {
			major_radius: 0.7,
			minor_radius: 0.3,
		});
		store.remove(ring);
		assert_eq!(
			store.set_transform(ring, V3::zeros(), Quat::identity()),
			Err(HostError::UnknownMesh(ring))
		);
	}
}
