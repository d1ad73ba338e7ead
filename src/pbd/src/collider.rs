use crate::{Quat, V3};

/// Infinite plane, `dot(normal, p) = offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
	pub normal: V3,
	pub offset: f32,
}

impl Plane {
	pub fn new(normal: V3, offset: f32) -> Self {
		Self {
			normal: normal.normalize(),
			offset,
		}
	}

	pub fn signed_distance(&self, p: V3) -> f32 {
		self.normal.dot(&p) - self.offset
	}

	/// Rotation taking local +Y onto the plane normal.
	pub fn orientation(&self) -> Quat {
		Quat::rotation_between(&V3::y(), &self.normal)
			.unwrap_or_else(|| Quat::from_axis_angle(&V3::x_axis(), std::f32::consts::PI))
	}
}

/// Ring in the local XZ plane with local Y as symmetry axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Torus {
	pub major_radius: f32,
	pub minor_radius: f32,
}

impl Torus {
	/// Support value: furthest extent of the surface along unit `dir`
	/// for a torus centered at the origin with orientation `rot`.
	pub fn extent(&self, rot: &Quat, dir: &V3) -> f32 {
		let axis = rot * V3::y();
		let radial = dir - axis * axis.dot(dir);
		self.major_radius * radial.magnitude() + self.minor_radius
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
	Torus(Torus),
	Plane(Plane),
}
