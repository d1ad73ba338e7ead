use std::time::{Duration, Instant};

/// Source of the per-refresh callback that drives the frame loop.
pub trait Scheduler {
	/// Blocks until the next frame is due.
	fn wait_next(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeModel {
	// as fast as possible
	VideoRender,
	RtFrameLock,
}

/// Fixed refresh interval for running without a display.
pub struct FrameClock {
	pft: Duration,
	model: TimeModel,
	start_time: Instant,
}

impl FrameClock {
	pub fn new(pft: f32, model: TimeModel) -> Self {
		Self {
			pft: Duration::from_secs_f32(pft),
			model,
			start_time: Instant::now(),
		}
	}

	pub fn model(&self) -> TimeModel {
		self.model
	}
}

impl Default for FrameClock {
	fn default() -> Self {
		Self::new(1.0 / 60.0, TimeModel::RtFrameLock)
	}
}

impl Scheduler for FrameClock {
	fn wait_next(&mut self) {
		if self.model == TimeModel::RtFrameLock {
			let passed = self.start_time.elapsed();
			if passed < self.pft {
				std::thread::sleep(self.pft - passed);
			}
		}
		self.start_time = Instant::now();
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_frame_lock_waits() {
		let mut clock = FrameClock::new(0.02, TimeModel::RtFrameLock);
		let start = Instant::now();
		clock.wait_next();
		clock.wait_next();
		assert!(start.elapsed() >= Duration::from_millis(35));
	}

	#[test]
	fn test_video_render_does_not_wait() {
		let mut clock = FrameClock::new(1.0, TimeModel::VideoRender);
		let start = Instant::now();
		clock.wait_next();
		assert!(start.elapsed() < Duration::from_millis(500));
	}
}
