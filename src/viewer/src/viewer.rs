use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use pbd::controller_message::ControllerMessage;
use protocol::host::Decorations;

use crate::frame_loop::FrameLoop;
use crate::keycode::key_message;
use crate::mesh_store::MeshStore;

/// Opens the window and hands the frame loop to its event loop. Keyboard
/// handling is registered once here and only enqueues messages.
pub fn run<D: Decorations + 'static>(
	mut frame_loop: FrameLoop<MeshStore, D>,
	tx: Sender<ControllerMessage>,
	refresh: f32,
) -> anyhow::Result<()> {
	let window_size = [640u32, 480];
	let event_loop = EventLoop::new();
	let window = WindowBuilder::new()
		.with_title("furin")
		.with_inner_size(LogicalSize::new(window_size[0], window_size[1]))
		.build(&event_loop)?;
	let interval = Duration::from_secs_f32(refresh);
	let mut next_frame = Instant::now();
	info!("window open, arrow keys steer the wind");
	event_loop.run(move |event, _, control_flow| match event {
		Event::WindowEvent { event: e, .. } => match e {
			WindowEvent::CloseRequested => {
				info!("{:?}", frame_loop.summary());
				*control_flow = ControlFlow::Exit;
			}
			WindowEvent::KeyboardInput { input, .. } => {
				if let Some(msg) = key_message(&input) {
					if tx.send(msg).is_err() {
						warn!("input dropped, frame loop gone");
					}
				}
			}
			_ => {}
		},
		Event::MainEventsCleared => {
			let now = Instant::now();
			if now >= next_frame {
				window.request_redraw();
				next_frame = now + interval;
			}
			if *control_flow != ControlFlow::Exit {
				*control_flow = ControlFlow::WaitUntil(next_frame);
			}
		}
		Event::RedrawRequested(_) => {
			frame_loop.iterate();
			let frames = frame_loop.host().frames();
			if frames % 30 == 0 {
				let w = frame_loop.wind().force();
				window.set_title(&format!(
					"furin | frame {} | wind ({:.1}, {:.1}, {:.1})",
					frames, w[0], w[1], w[2]
				));
			}
		}
		_ => {}
	})
}
