use crate::V3;

#[derive(Clone, Debug)]
pub struct Particle {
	imass: f32, // 0 means pinned
	pos: V3,
	ppos: V3,
	vel: V3,
}

impl Particle {
	pub fn new(imass: f32, pos: V3, vel: V3) -> Self {
		Self {
			imass,
			pos,
			ppos: pos,
			vel,
		}
	}

	pub fn get_pos(&self) -> V3 {
		self.pos
	}

	pub fn get_vel(&self) -> V3 {
		self.vel
	}

	pub fn get_imass(&self) -> f32 {
		self.imass
	}

	pub fn is_pinned(&self) -> bool {
		self.imass == 0.0
	}

	pub fn add_pos(&mut self, dp: V3) {
		self.pos += dp
	}

	/// Semi-implicit Euler predict. `force` is scaled by inverse mass,
	/// `accel` is not.
	pub fn integrate(&mut self, h: f32, accel: V3, force: V3, decay: f32) {
		if self.is_pinned() {
			return;
		}
		self.vel += (accel + force * self.imass) * h;
		self.vel *= decay;
		self.ppos = self.pos;
		self.pos += self.vel * h;
	}

	/// Derive velocity from the projected position.
	pub fn update_velocity(&mut self, h: f32) {
		if self.is_pinned() {
			return;
		}
		self.vel = (self.pos - self.ppos) / h;
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_pinned_ignores_forces() {
		let pos = V3::new(0.3, 2.1, 0.0);
		let mut p = Particle::new(0.0, pos, V3::zeros());
		for _ in 0..100 {
			p.integrate(0.01, V3::new(0., -9.82, 0.), V3::new(5., 0., 0.), 1.0);
			p.update_velocity(0.01);
		}
		assert_eq!(p.get_pos(), pos);
		assert_eq!(p.get_vel(), V3::zeros());
	}

	#[test]
	fn test_free_fall_velocity() {
		let mut p = Particle::new(1.0, V3::zeros(), V3::zeros());
		p.integrate(0.1, V3::new(0., -10., 0.), V3::zeros(), 1.0);
		assert!((p.get_pos()[1] + 0.1).abs() < 1e-6);
		p.update_velocity(0.1);
		assert!((p.get_vel()[1] + 1.0).abs() < 1e-6);
	}
}
