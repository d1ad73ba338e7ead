use tracing::info;

use pbd::collider::Shape;
use pbd::config::WorldConfig;
use pbd::grid_index::VertexMap;
use pbd::world::World;
use pbd::{Quat, V3};
use protocol::host::{HostError, RenderHost};
use protocol::pr_model::{MeshHandle, PrShape};

/// Render-side placement that the simulation never sees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
	pub ground_size: f32,
	pub cloth_pos: V3,
	pub cloth_rot: Quat,
}

impl SceneLayout {
	pub fn new(config: &WorldConfig) -> Self {
		Self {
			ground_size: config.ground.size,
			cloth_pos: config.cloth.mesh_offset.into(),
			cloth_rot: Quat::from_axis_angle(&V3::y_axis(), config.cloth.mesh_yaw),
		}
	}
}

impl Default for SceneLayout {
	fn default() -> Self {
		Self::new(&WorldConfig::default())
	}
}

/// Handles of the render-side copies of the world, and the copy itself.
#[derive(Clone, Debug)]
pub struct RenderSync {
	cloth: MeshHandle,
	rings: Vec<MeshHandle>,
	ground: Vec<MeshHandle>,
	map: VertexMap,
}

impl RenderSync {
	/// Creates one mesh per simulated object and places the static ones.
	/// The cloth mesh transform is set once here; its vertices are written
	/// in mesh space on every sync.
	pub fn bind<H: RenderHost>(
		host: &mut H,
		world: &World,
		layout: &SceneLayout,
	) -> Result<Self, HostError> {
		let grid = world.cloth().grid();
		let (cols, rows) = (grid.cols(), grid.rows());
		let cloth = host.create_deformable_mesh(PrShape::Cloth {
			cols,
			rows,
			width: cols as f32 * grid.spacing(),
			height: rows as f32 * grid.spacing(),
		});
		host.set_transform(cloth, layout.cloth_pos, layout.cloth_rot)?;
		let rings = world
			.bodies()
			.iter()
			.map(|body| host.create_rigid_mesh(pr_shape(body.shape(), layout.ground_size)))
			.collect();
		let mut ground = vec![];
		for body in world.statics() {
			let handle = host.create_rigid_mesh(pr_shape(body.shape(), layout.ground_size));
			host.set_transform(handle, body.get_pos(), body.get_rot())?;
			ground.push(handle);
		}
		let result = Self {
			cloth,
			rings,
			ground,
			map: VertexMap::new(cols, rows),
		};
		info!(
			"bound {} vertices, {} rings, {} static meshes",
			result.map.len(),
			result.rings.len(),
			result.ground.len()
		);
		result.sync(world, host)?;
		Ok(result)
	}

	pub fn cloth(&self) -> MeshHandle {
		self.cloth
	}

	pub fn rings(&self) -> &[MeshHandle] {
		&self.rings
	}

	pub fn map(&self) -> &VertexMap {
		&self.map
	}

	/// Copies particle positions into the cloth vertex buffer and ring
	/// poses into their transforms.
	pub fn sync<H: RenderHost>(&self, world: &World, host: &mut H) -> Result<(), HostError> {
		let grid = world.cloth().grid();
		for (idx, (i, j)) in self.map.iter() {
			host.set_vertex_position(self.cloth, idx, grid.get(i, j).get_pos())?;
		}
		host.mark_dirty(self.cloth)?;
		for (handle, body) in self.rings.iter().zip(world.bodies()) {
			host.set_transform(*handle, body.get_pos(), body.get_rot())?;
		}
		Ok(())
	}
}

fn pr_shape(shape: &Shape, ground_size: f32) -> PrShape {
	match shape {
		Shape::Torus(t) => PrShape::Torus {
			major_radius: t.major_radius,
			minor_radius: t.minor_radius,
		},
		Shape::Plane(_) => PrShape::Plane { size: ground_size },
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::mesh_store::MeshStore;
	use pbd::config::WorldConfig;
	use pbd::V3;

	fn bound() -> (World, MeshStore, RenderSync) {
		let world = World::new(&WorldConfig::default().with_seed(1)).unwrap();
		let mut store = MeshStore::default();
		let sync = RenderSync::bind(&mut store, &world, &SceneLayout::default()).unwrap();
		(world, store, sync)
	}

	#[test]
	fn test_meshes_created() {
		let (_, store, sync) = bound();
		// cloth, three rings, ground
		assert_eq!(store.len(), 5);
		assert_eq!(store.mesh(sync.cloth()).unwrap().vertices.len(), 66);
		let ring = store.mesh(sync.rings()[2]).unwrap();
		assert_eq!(ring.pos, V3::new(3., 0., 11.));
	}

	#[test]
	fn test_cloth_mesh_placed_once() {
		let (mut world, mut store, sync) = bound();
		let placed = |store: &MeshStore| {
			let mesh = store.mesh(sync.cloth()).unwrap();
			(mesh.pos, mesh.rot)
		};
		let (pos, rot) = placed(&store);
		assert_eq!(pos, V3::new(0., 2., 0.));
		assert!((rot.angle() - 0.5).abs() < 1e-6);
		let axis = rot.axis().unwrap();
		assert!((axis.into_inner() - V3::y()).magnitude() < 1e-6);

		// sync touches vertices only
		world.step(V3::new(5., 0., 0.)).unwrap();
		sync.sync(&world, &mut store).unwrap();
		assert_eq!(placed(&store), (pos, rot));
		let grid = world.cloth().grid();
		let vertices = &store.mesh(sync.cloth()).unwrap().vertices;
		assert_eq!(vertices[0], grid.get(0, 10).get_pos());
	}

	#[test]
	fn test_rows_inverted() {
		let (mut world, mut store, sync) = bound();
		world.step(V3::new(0.1, 0., 0.)).unwrap();
		sync.sync(&world, &mut store).unwrap();
		let grid = world.cloth().grid();
		let vertices = &store.mesh(sync.cloth()).unwrap().vertices;
		// first vertex row is the anchored top row
		for i in 0..=5 {
			assert_eq!(vertices[i], grid.get(i, 10).get_pos());
			assert_eq!(vertices[60 + i], grid.get(i, 0).get_pos());
		}
		assert!(vertices[0][1] > vertices[60][1]);
	}

	#[test]
	fn test_rings_follow_bodies() {
		let (mut world, mut store, sync) = bound();
		for _ in 0..10 {
			world.step(V3::zeros()).unwrap();
		}
		sync.sync(&world, &mut store).unwrap();
		for (handle, body) in sync.rings().iter().zip(world.bodies()) {
			let mesh = store.mesh(*handle).unwrap();
			assert_eq!(mesh.pos, body.get_pos());
			assert_eq!(mesh.rot, body.get_rot());
		}
	}

	#[test]
	fn test_missing_mesh_reported() {
		let (world, mut store, sync) = bound();
		store.remove(sync.cloth());
		assert_eq!(
			sync.sync(&world, &mut store),
			Err(HostError::UnknownMesh(sync.cloth()))
		);
	}
}
