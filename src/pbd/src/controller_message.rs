use protocol::user_event::{Direction, KeyState};

/// Input forwarded from the input host to the step that consumes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerMessage {
	Key(Direction, KeyState),
}

impl ControllerMessage {
	pub fn key_down(direction: Direction) -> Self {
		ControllerMessage::Key(direction, KeyState::Pressed)
	}

	pub fn key_up(direction: Direction) -> Self {
		ControllerMessage::Key(direction, KeyState::Released)
	}
}
