use winit::event::{ElementState, KeyboardInput, VirtualKeyCode as Vkc};

use pbd::controller_message::ControllerMessage;
use protocol::user_event::{Direction, KeyState};

pub fn key2direction(key: Vkc) -> Option<Direction> {
	let direction = match key {
		Vkc::Up => Direction::Up,
		Vkc::Down => Direction::Down,
		Vkc::Left => Direction::Left,
		Vkc::Right => Direction::Right,
		_ => return None,
	};
	Some(direction)
}

pub fn key_message(input: &KeyboardInput) -> Option<ControllerMessage> {
	let direction = key2direction(input.virtual_keycode?)?;
	let state = match input.state {
		ElementState::Pressed => KeyState::Pressed,
		ElementState::Released => KeyState::Released,
	};
	Some(ControllerMessage::Key(direction, state))
}
