//! Frame and timer bookkeeping for the animation loop.
//!
//! Every scheduled callback carries a [`Ticket`]. A callback only acts if its
//! ticket is still the live one for its slot, so stopping, restarting or
//! re-arming invalidates whatever was queued before, whether or not the host
//! managed to cancel it. The resize timer is single-slot: arming it returns
//! the previous timer's handle so the caller can clear it first.

/// Host-assigned id of a scheduled callback (an rAF or timeout id in browsers).
pub type HostHandle = i32;

/// Generation number identifying one scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// The environment's scheduling and event plumbing.
pub trait Host {
	/// Asks for `on_frame(ticket)` before the next repaint. `None` if the
	/// request could not be made.
	fn request_frame(&mut self, ticket: Ticket) -> Option<HostHandle>;
	/// Best-effort cancellation of a frame request.
	fn cancel_frame(&mut self, handle: HostHandle);
	/// Asks for `on_resize_timer(ticket)` after `delay_ms`. `None` if the
	/// timer could not be set.
	fn set_timer(&mut self, ticket: Ticket, delay_ms: u32) -> Option<HostHandle>;
	/// Best-effort cancellation of a timer.
	fn clear_timer(&mut self, handle: HostHandle);
	/// Removes every event subscription installed for the network.
	fn detach(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Scheduled {
	ticket: Ticket,
	handle: HostHandle,
}

/// Running flag plus the pending frame and resize timer, if any.
#[derive(Clone, Debug, Default)]
pub struct RunState {
	running: bool,
	next: u64,
	frame: Option<Scheduled>,
	resize_timer: Option<Scheduled>,
}

impl RunState {
	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn has_pending_frame(&self) -> bool {
		self.frame.is_some()
	}

	pub fn has_pending_resize(&self) -> bool {
		self.resize_timer.is_some()
	}

	fn issue(&mut self) -> Ticket {
		self.next += 1;
		Ticket(self.next)
	}

	/// Transitions to running. Returns the ticket for the first frame, or
	/// `None` if already running.
	pub fn start(&mut self) -> Option<Ticket> {
		if self.running {
			return None;
		}
		self.running = true;
		Some(self.issue())
	}

	/// Records the host handle for a requested frame.
	pub fn frame_requested(&mut self, ticket: Ticket, handle: HostHandle) {
		self.frame = Some(Scheduled { ticket, handle });
	}

	/// Transitions to stopped. Returns the pending frame's handle to cancel.
	pub fn stop(&mut self) -> Option<HostHandle> {
		self.running = false;
		self.frame.take().map(|s| s.handle)
	}

	/// Whether a firing frame callback should run. Consumes the pending slot.
	pub fn accept_frame(&mut self, ticket: Ticket) -> bool {
		match self.frame {
			Some(pending) if self.running && pending.ticket == ticket => {
				self.frame = None;
				true
			}
			_ => false,
		}
	}

	/// Ticket for the frame that follows an accepted one.
	pub fn next_frame(&mut self) -> Ticket {
		self.issue()
	}

	/// Replaces the resize timer. Returns the stale timer's handle (to clear)
	/// and the new ticket to schedule.
	pub fn rearm_resize(&mut self) -> (Option<HostHandle>, Ticket) {
		let stale = self.resize_timer.take().map(|s| s.handle);
		(stale, self.issue())
	}

	/// Records the host handle for an armed resize timer.
	pub fn resize_armed(&mut self, ticket: Ticket, handle: HostHandle) {
		self.resize_timer = Some(Scheduled { ticket, handle });
	}

	/// Whether a firing resize timer is the live one. Consumes the slot.
	pub fn accept_resize(&mut self, ticket: Ticket) -> bool {
		match self.resize_timer {
			Some(pending) if pending.ticket == ticket => {
				self.resize_timer = None;
				true
			}
			_ => false,
		}
	}

	/// Drops the resize timer. Returns its handle to clear.
	pub fn cancel_resize(&mut self) -> Option<HostHandle> {
		self.resize_timer.take().map(|s| s.handle)
	}
}
