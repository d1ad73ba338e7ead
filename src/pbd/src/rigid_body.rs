use rand::Rng;

use crate::collider::{Plane, Shape, Torus};
use crate::{Quat, V3};

/// Scripted kinematic drift: after force integration the linear velocity is
/// replaced by `-axis * U[min_speed, max_speed)`, and the body is put back at
/// `spawn` once its axis coordinate drops below `threshold`.
#[derive(Clone, Debug, PartialEq)]
pub struct Drift {
	pub axis: V3,
	pub min_speed: f32,
	pub max_speed: f32,
	pub threshold: f32,
	pub spawn: V3,
}

impl Drift {
	pub fn velocity<R: Rng>(&self, rng: &mut R) -> V3 {
		-self.axis * rng.gen_range(self.min_speed..self.max_speed)
	}

	pub fn passed(&self, pos: &V3) -> bool {
		self.axis.dot(pos) < self.threshold
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum BodyKind {
	Static,
	Dynamic,
	Drifting(Drift),
}

#[derive(Clone, Debug)]
pub struct RigidBody {
	pos: V3,
	rot: Quat,
	vel: V3,
	ang_vel: V3,
	imass: f32,
	damping: f32,
	shape: Shape,
	kind: BodyKind,
}

impl RigidBody {
	pub fn new_static(plane: Plane) -> Self {
		Self {
			pos: plane.normal * plane.offset,
			rot: plane.orientation(),
			vel: V3::zeros(),
			ang_vel: V3::zeros(),
			imass: 0.0,
			damping: 0.0,
			shape: Shape::Plane(plane),
			kind: BodyKind::Static,
		}
	}

	pub fn new_ring(torus: Torus, mass: f32, pos: V3, rot: Quat) -> Self {
		Self {
			pos,
			rot,
			vel: V3::zeros(),
			ang_vel: V3::zeros(),
			imass: 1.0 / mass,
			damping: 0.01,
			shape: Shape::Torus(torus),
			kind: BodyKind::Dynamic,
		}
	}

	pub fn with_drift(mut self, drift: Drift) -> Self {
		self.kind = BodyKind::Drifting(drift);
		self
	}

	pub fn with_damping(mut self, damping: f32) -> Self {
		self.damping = damping;
		self
	}

	pub fn get_pos(&self) -> V3 {
		self.pos
	}

	pub fn get_rot(&self) -> Quat {
		self.rot
	}

	pub fn get_vel(&self) -> V3 {
		self.vel
	}

	pub fn get_imass(&self) -> f32 {
		self.imass
	}

	pub fn shape(&self) -> &Shape {
		&self.shape
	}

	pub fn kind(&self) -> &BodyKind {
		&self.kind
	}

	pub fn is_static(&self) -> bool {
		self.imass == 0.0
	}

	pub fn set_pos(&mut self, pos: V3) {
		self.pos = pos;
	}

	pub fn set_vel(&mut self, vel: V3) {
		self.vel = vel;
	}

	pub fn integrate(&mut self, h: f32, gravity: V3, force: V3) {
		if self.is_static() {
			return;
		}
		let decay = (1.0 - self.damping).powf(h);
		self.vel += (gravity + force * self.imass) * h;
		self.vel *= decay;
		self.ang_vel *= decay;
		self.pos += self.vel * h;
		if self.ang_vel != V3::zeros() {
			self.rot = Quat::from_scaled_axis(self.ang_vel * h) * self.rot;
		}
	}

	/// Pushes the body out of `plane` and removes the approaching normal
	/// velocity (no restitution, no friction).
	pub fn collide(&mut self, plane: &Plane) -> bool {
		let torus = match self.shape {
			Shape::Torus(t) if !self.is_static() => t,
			_ => return false,
		};
		let depth = plane.signed_distance(self.pos)
			- torus.extent(&self.rot, &-plane.normal);
		if depth >= 0.0 {
			return false;
		}
		self.pos -= plane.normal * depth;
		let vn = self.vel.dot(&plane.normal);
		if vn < 0.0 {
			self.vel -= plane.normal * vn;
		}
		true
	}

	/// Runs the scripted drift of a drifting body. Returns true when the
	/// body was put back at its spawn point.
	pub fn apply_drift<R: Rng>(&mut self, rng: &mut R) -> bool {
		let drift = match &self.kind {
			BodyKind::Drifting(drift) => drift,
			_ => return false,
		};
		self.vel = drift.velocity(rng);
		if drift.passed(&self.pos) {
			self.pos = drift.spawn;
			return true;
		}
		false
	}
}
