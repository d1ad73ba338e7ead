use tracing::warn;

use crate::constraint::{pair_mut, CRef, Constraint};
use crate::particle::Particle;

#[derive(Clone, Debug)]
pub struct DistanceConstraint {
	ps: [usize; 2],
	l0: f32,
	lambda: f32,
	compliance: f32,
}

impl DistanceConstraint {
	pub fn new_with_l0(p1: usize, p2: usize, l0: f32) -> Self {
		Self {
			ps: [p1, p2],
			l0,
			lambda: 0f32,
			compliance: 0f32,
		}
	}

	pub fn with_compliance(mut self, c: f32) -> Self {
		self.compliance = c;
		self
	}

	pub fn rest_length(&self) -> f32 {
		self.l0
	}

	pub fn build(self) -> CRef {
		Box::new(self)
	}
}

impl Constraint for DistanceConstraint {
	fn pre_iteration(&mut self) {
		self.lambda = 0f32;
	}

	fn step(&mut self, ps: &mut [Particle], dt: f32) {
		let (p1, p2) = pair_mut(ps, self.ps[0], self.ps[1]);
		let imass1 = p1.get_imass();
		let imass2 = p2.get_imass();
		let imass = imass1 + imass2;
		if imass == 0.0 {
			return;
		}
		let dp = p1.get_pos() - p2.get_pos();
		let l = dp.magnitude();
		if !l.is_normal() {
			warn!("bad distance {} between {:?}", l, self.ps);
			return;
		}
		let dl = l - self.l0;
		// compliance 0 reduces to a plain PBD projection
		let compliance_t = self.compliance / dt.powi(2);
		let dlambda =
			(-dl - compliance_t * self.lambda) / (imass + compliance_t);
		let correct = dlambda * dp / l;
		self.lambda += dlambda;

		p1.add_pos(correct * imass1);
		p2.add_pos(-correct * imass2);
	}

	fn particles(&self) -> Vec<usize> {
		self.ps.to_vec()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::V3;

	fn pair(imass1: f32, imass2: f32, gap: f32) -> Vec<Particle> {
		vec![
			Particle::new(imass1, V3::zeros(), V3::zeros()),
			Particle::new(imass2, V3::new(gap, 0., 0.), V3::zeros()),
		]
	}

	#[test]
	fn test_free_pair_zero_sum() {
		let mut ps = pair(1.0, 1.0, 0.3);
		let mut dc = DistanceConstraint::new_with_l0(0, 1, 0.2);
		dc.step(&mut ps, 0.01);
		let d0 = ps[0].get_pos();
		let d1 = ps[1].get_pos() - V3::new(0.3, 0., 0.);
		assert!((d0 + d1).magnitude() < 1e-6);
		assert!((d0[0] - 0.05).abs() < 1e-6);
		let l = (ps[0].get_pos() - ps[1].get_pos()).magnitude();
		assert!((l - 0.2).abs() < 1e-6);
	}

	#[test]
	fn test_pinned_end_stays() {
		let mut ps = pair(0.0, 1.0, 0.5);
		let mut dc = DistanceConstraint::new_with_l0(0, 1, 0.2);
		dc.step(&mut ps, 0.01);
		assert_eq!(ps[0].get_pos(), V3::zeros());
		assert!((ps[1].get_pos()[0] - 0.2).abs() < 1e-6);
	}

	#[test]
	fn test_reversed_indices() {
		let mut ps = pair(1.0, 0.0, 0.5);
		let mut dc = DistanceConstraint::new_with_l0(1, 0, 0.2);
		dc.step(&mut ps, 0.01);
		assert_eq!(ps[1].get_pos(), V3::new(0.5, 0., 0.));
		assert!((ps[0].get_pos()[0] - 0.3).abs() < 1e-6);
	}

	#[test]
	fn test_both_pinned_noop() {
		let mut ps = pair(0.0, 0.0, 0.5);
		let mut dc = DistanceConstraint::new_with_l0(0, 1, 0.2);
		dc.step(&mut ps, 0.01);
		assert_eq!(ps[1].get_pos(), V3::new(0.5, 0., 0.));
	}

	#[test]
	fn test_compliance_softens() {
		let mut stiff = pair(1.0, 1.0, 0.3);
		let mut soft = pair(1.0, 1.0, 0.3);
		DistanceConstraint::new_with_l0(0, 1, 0.2).step(&mut stiff, 0.01);
		DistanceConstraint::new_with_l0(0, 1, 0.2)
			.with_compliance(1e-4)
			.step(&mut soft, 0.01);
		let ls = (stiff[0].get_pos() - stiff[1].get_pos()).magnitude();
		let lc = (soft[0].get_pos() - soft[1].get_pos()).magnitude();
		assert!(lc > ls);
		assert!(lc < 0.3);
	}
}
