use std::sync::mpsc::Receiver;

use tracing::{error, info, warn};

use pbd::controller_message::ControllerMessage;
use pbd::error::StepError;
use pbd::wind::WindController;
use pbd::world::{StepReport, World};
use protocol::host::{Decorations, HostError, RenderHost};

use crate::scheduler::Scheduler;
use crate::sync::{RenderSync, SceneLayout};

#[derive(Clone, Debug, PartialEq)]
pub enum FrameOutcome {
	Presented(StepReport),
	Skipped(StepError),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
	pub frames: u64,
	pub skipped: u64,
	pub last: Option<StepReport>,
}

/// One step, one sync, one decoration tick and one present per iteration.
///
/// There is no catch-up: a late refresh callback slows simulated time down
/// instead of batching steps.
pub struct FrameLoop<H: RenderHost, D: Decorations = ()> {
	world: World,
	wind: WindController,
	sync: RenderSync,
	host: H,
	decorations: D,
	rx: Receiver<ControllerMessage>,
	summary: RunSummary,
}

impl<H: RenderHost, D: Decorations> FrameLoop<H, D> {
	pub fn new(
		world: World,
		wind: WindController,
		mut host: H,
		decorations: D,
		rx: Receiver<ControllerMessage>,
		layout: &SceneLayout,
	) -> Result<Self, HostError> {
		let sync = RenderSync::bind(&mut host, &world, layout)?;
		Ok(Self {
			world,
			wind,
			sync,
			host,
			decorations,
			rx,
			summary: RunSummary::default(),
		})
	}

	pub fn world(&self) -> &World {
		&self.world
	}

	pub fn wind(&self) -> &WindController {
		&self.wind
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	pub fn render_sync(&self) -> &RenderSync {
		&self.sync
	}

	pub fn summary(&self) -> &RunSummary {
		&self.summary
	}

	pub fn iterate(&mut self) -> FrameOutcome {
		while let Ok(msg) = self.rx.try_recv() {
			self.wind.handle(msg);
		}
		self.summary.frames += 1;
		let report = match self.world.step(self.wind.force()) {
			Ok(report) => report,
			Err(e) => {
				warn!("frame {} skipped: {}", self.summary.frames, e);
				self.summary.skipped += 1;
				return FrameOutcome::Skipped(e);
			}
		};
		if let Err(e) = self.sync.sync(&self.world, &mut self.host) {
			error!("render host rejected sync: {}", e);
			panic!("render sync lost its target: {}", e);
		}
		self.decorations.advance();
		self.host.present_frame();
		self.summary.last = Some(report.clone());
		FrameOutcome::Presented(report)
	}

	pub fn run<S: Scheduler>(&mut self, scheduler: &mut S, frames: u64) -> RunSummary {
		for _ in 0..frames {
			self.iterate();
			scheduler.wait_next();
		}
		info!(
			"ran {} frames ({} skipped), wind {:?}",
			self.summary.frames,
			self.summary.skipped,
			self.wind.force()
		);
		self.summary.clone()
	}
}
