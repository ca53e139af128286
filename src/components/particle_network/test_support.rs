//! In-memory doubles for the surface, drawing context and host.

use std::cell::RefCell;

use super::render::DrawContext;
use super::schedule::{Host, HostHandle, Ticket};
use super::viewport::{Layout, Surface, Viewport};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	Clear {
		width: f64,
		height: f64,
	},
	Background {
		width: f64,
		height: f64,
		style: String,
	},
	Line {
		from: (f64, f64),
		to: (f64, f64),
		style: String,
		width: f64,
	},
	Disc {
		x: f64,
		y: f64,
		radius: f64,
		style: String,
	},
}

/// Records every drawing call in order.
#[derive(Debug, Default)]
pub struct RecordingContext {
	ops: RefCell<Vec<DrawOp>>,
}

impl RecordingContext {
	pub fn ops(&self) -> Vec<DrawOp> {
		self.ops.borrow().clone()
	}
}

impl DrawContext for RecordingContext {
	fn clear(&self, width: f64, height: f64) {
		self.ops.borrow_mut().push(DrawOp::Clear { width, height });
	}

	fn fill_background(&self, width: f64, height: f64, style: &str) {
		self.ops.borrow_mut().push(DrawOp::Background {
			width,
			height,
			style: style.to_string(),
		});
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), style: &str, line_width: f64) {
		self.ops.borrow_mut().push(DrawOp::Line {
			from,
			to,
			style: style.to_string(),
			width: line_width,
		});
	}

	fn fill_disc(&self, x: f64, y: f64, radius: f64, style: &str) {
		self.ops.borrow_mut().push(DrawOp::Disc {
			x,
			y,
			radius,
			style: style.to_string(),
		});
	}
}

/// Surface with a settable layout that remembers every applied viewport.
#[derive(Debug, Default)]
pub struct MockSurface {
	pub layout: Layout,
	pub origin: (f64, f64),
	pub applied: Vec<Viewport>,
	pub ctx: RecordingContext,
}

impl MockSurface {
	pub fn sized(width: f64, height: f64) -> Self {
		Self {
			layout: Layout {
				rect_width: width,
				rect_height: height,
				client_width: width,
				client_height: height,
				window_width: width,
				window_height: height,
				device_pixel_ratio: 1.0,
			},
			..Default::default()
		}
	}
}

impl Surface for MockSurface {
	type Context = RecordingContext;

	fn layout(&self) -> Layout {
		self.layout
	}

	fn origin(&self) -> (f64, f64) {
		self.origin
	}

	fn apply(&mut self, viewport: &Viewport) {
		self.applied.push(*viewport);
	}

	fn context(&self) -> &RecordingContext {
		&self.ctx
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerRequest {
	pub ticket: Ticket,
	pub handle: HostHandle,
	pub delay_ms: u32,
}

/// Host that queues nothing and records every request it accepts.
#[derive(Debug, Default)]
pub struct MockHost {
	next_handle: HostHandle,
	pub frames: Vec<(Ticket, HostHandle)>,
	pub cancelled_frames: Vec<HostHandle>,
	pub timers: Vec<TimerRequest>,
	pub cleared_timers: Vec<HostHandle>,
	pub detached: bool,
	/// Fail every frame request.
	pub refuse_frames: bool,
	/// Fail every timer request.
	pub refuse_timers: bool,
}

impl MockHost {
	pub fn last_frame(&self) -> Ticket {
		self.frames.last().expect("no frame requested").0
	}

	fn handle(&mut self) -> HostHandle {
		self.next_handle += 1;
		self.next_handle
	}
}

impl Host for MockHost {
	fn request_frame(&mut self, ticket: Ticket) -> Option<HostHandle> {
		if self.refuse_frames {
			return None;
		}
		let handle = self.handle();
		self.frames.push((ticket, handle));
		Some(handle)
	}

	fn cancel_frame(&mut self, handle: HostHandle) {
		self.cancelled_frames.push(handle);
	}

	fn set_timer(&mut self, ticket: Ticket, delay_ms: u32) -> Option<HostHandle> {
		if self.refuse_timers {
			return None;
		}
		let handle = self.handle();
		self.timers.push(TimerRequest {
			ticket,
			handle,
			delay_ms,
		});
		Some(handle)
	}

	fn clear_timer(&mut self, handle: HostHandle) {
		self.cleared_timers.push(handle);
	}

	fn detach(&mut self) {
		self.detached = true;
	}
}
