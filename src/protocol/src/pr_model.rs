// pr_model: shapes handed to the render host

/// Opaque reference to a mesh owned by the render host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub enum PrShape {
	/// Planar vertex grid with `(cols + 1) * (rows + 1)` vertices,
	/// row-major, authored top row first.
	Cloth {
		cols: usize,
		rows: usize,
		width: f32,
		height: f32,
	},
	/// Ring in the local XZ plane, local Y is the symmetry axis.
	Torus {
		major_radius: f32,
		minor_radius: f32,
	},
	/// Square patch lying in the local XZ plane.
	Plane { size: f32 },
}

impl PrShape {
	pub fn vertex_count(&self) -> usize {
		match self {
			PrShape::Cloth { cols, rows, .. } => (cols + 1) * (rows + 1),
			_ => 0,
		}
	}
}
