use tracing::debug;

use crate::config::WindConfig;
use crate::controller_message::ControllerMessage;
use crate::V3;
use protocol::user_event::{Direction, KeyState};

/// Wind vectors written on key press and on key release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindBinding {
	pub press: V3,
	pub release: V3,
}

/// Constant wind force driven by the arrow keys. Every event overwrites the
/// whole vector, so the last event wins and keys do not combine.
///
/// Releasing `Down` does not calm the wind: it writes the same toward-viewer
/// force as pressing it. Every other release writes zero. The table keeps
/// that asymmetry as observed and `is_sticky` reports it.
#[derive(Clone, Debug)]
pub struct WindController {
	force: V3,
	bindings: [(Direction, WindBinding); 4],
}

impl WindController {
	pub fn new(config: &WindConfig) -> Self {
		let m = config.magnitude;
		let calm = V3::zeros();
		let bind = |press: V3, release: V3| WindBinding { press, release };
		Self {
			force: config.initial.into(),
			bindings: [
				(Direction::Right, bind(V3::new(m, 0., 0.), calm)),
				(Direction::Left, bind(V3::new(-m, 0., 0.), calm)),
				(Direction::Down, bind(V3::new(0., 0., m), V3::new(0., 0., m))),
				(Direction::Up, bind(V3::new(0., 0., -m), calm)),
			],
		}
	}

	pub fn force(&self) -> V3 {
		self.force
	}

	pub fn binding(&self, direction: Direction) -> WindBinding {
		self.bindings
			.iter()
			.find(|(d, _)| *d == direction)
			.map(|(_, b)| *b)
			.unwrap_or(WindBinding {
				press: V3::zeros(),
				release: V3::zeros(),
			})
	}

	/// Releasing this key leaves a non-zero wind behind.
	pub fn is_sticky(&self, direction: Direction) -> bool {
		self.binding(direction).release != V3::zeros()
	}

	pub fn key_down(&mut self, direction: Direction) {
		self.force = self.binding(direction).press;
		debug!("wind {:?} pressed: {:?}", direction, self.force);
	}

	pub fn key_up(&mut self, direction: Direction) {
		self.force = self.binding(direction).release;
		if self.is_sticky(direction) {
			debug!("wind {:?} released, wind stays at {:?}", direction, self.force);
		} else {
			debug!("wind {:?} released", direction);
		}
	}

	pub fn handle(&mut self, msg: ControllerMessage) {
		match msg {
			ControllerMessage::Key(direction, KeyState::Pressed) => {
				self.key_down(direction)
			}
			ControllerMessage::Key(direction, KeyState::Released) => {
				self.key_up(direction)
			}
		}
	}
}

impl Default for WindController {
	fn default() -> Self {
		Self::new(&WindConfig::default())
	}
}
