pub mod distance;
pub mod ground;

use dyn_clone::DynClone;

use crate::particle::Particle;

pub trait Constraint: DynClone {
	fn pre_iteration(&mut self) {}

	fn step(&mut self, ps: &mut [Particle], dt: f32);

	/// Indices of the particles this constraint moves.
	fn particles(&self) -> Vec<usize>;
}

dyn_clone::clone_trait_object!(Constraint);

pub type CRef = Box<dyn Constraint>;

pub(crate) fn pair_mut(
	ps: &mut [Particle],
	a: usize,
	b: usize,
) -> (&mut Particle, &mut Particle) {
	assert_ne!(a, b);
	if a < b {
		let (lo, hi) = ps.split_at_mut(b);
		(&mut lo[a], &mut hi[0])
	} else {
		let (lo, hi) = ps.split_at_mut(a);
		(&mut hi[0], &mut lo[b])
	}
}
