/// Arrow keys as delivered by the input host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
	Up,
	Down,
	Left,
	Right,
}

impl Direction {
	pub const ALL: [Direction; 4] =
		[Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
	Pressed,
	Released,
}
