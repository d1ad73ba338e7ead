use crate::collider::Plane;
use crate::constraint::{CRef, Constraint};
use crate::particle::Particle;

/// Keeps one particle on the positive side of a plane. Generated per substep
/// for particles found below the plane.
#[derive(Clone, Debug)]
pub struct GroundConstraint {
	p: usize,
	plane: Plane,
}

impl GroundConstraint {
	pub fn new(p: usize, plane: Plane) -> Self {
		Self { p, plane }
	}

	pub fn build(self) -> CRef {
		Box::new(self)
	}
}

impl Constraint for GroundConstraint {
	fn step(&mut self, ps: &mut [Particle], _dt: f32) {
		let p = &mut ps[self.p];
		if p.is_pinned() {
			return;
		}
		let depth = self.plane.signed_distance(p.get_pos());
		if depth < 0.0 {
			p.add_pos(-depth * self.plane.normal);
		}
	}

	fn particles(&self) -> Vec<usize> {
		vec![self.p]
	}
}
