//! Network state and the animation state machine.
//!
//! [`ParticleNetwork`] ties the particle field, pointer, viewport and run state
//! to a [`Surface`] it draws on and a [`Host`] that schedules its callbacks.
//! It is `stopped` or `running`; only `running` networks act on frames.

use log::{debug, info, warn};
use rand_pcg::Pcg32;
use rand::SeedableRng;

use super::config::NetworkConfig;
use super::motion;
use super::particles::ParticleField;
use super::pointer::PointerState;
use super::render;
use super::schedule::{Host, RunState, Ticket};
use super::viewport::{Surface, Viewport};

/// Core particle network, generic over where it draws and how it schedules.
///
/// Created once per canvas, then driven by host callbacks: `on_frame`,
/// pointer events, resize events and visibility changes.
pub struct ParticleNetwork<S: Surface, H: Host> {
	config: NetworkConfig,
	viewport: Viewport,
	field: ParticleField,
	pointer: PointerState,
	run: RunState,
	surface: S,
	host: H,
	rng: Pcg32,
}

impl<S: Surface, H: Host> ParticleNetwork<S, H> {
	/// Sizes the surface, seeds the field and, if `auto_start` is set,
	/// requests the first frame. `host` is expected to already be listening
	/// for the network's events.
	pub fn new(surface: S, host: H, config: NetworkConfig, seed: u64) -> Self {
		let mut network = Self {
			config,
			viewport: Viewport::default(),
			field: ParticleField::default(),
			pointer: PointerState::default(),
			run: RunState::default(),
			surface,
			host,
			rng: Pcg32::seed_from_u64(seed),
		};
		network.resize();
		network.reseed();
		info!(
			"particle-network: {}x{} @{}x, {} particles",
			network.viewport.width,
			network.viewport.height,
			network.viewport.dpr,
			network.field.len()
		);
		if network.config.auto_start {
			network.start();
		}
		network
	}

	/// Starts the animation loop. No-op when already running.
	pub fn start(&mut self) {
		if let Some(ticket) = self.run.start() {
			debug!("particle-network: started");
			self.request_frame(ticket);
		}
	}

	/// Stops the loop. A frame callback already queued becomes a no-op.
	pub fn stop(&mut self) {
		let was_running = self.run.is_running();
		if let Some(handle) = self.run.stop() {
			self.host.cancel_frame(handle);
		}
		if was_running {
			debug!("particle-network: stopped");
		}
	}

	/// Stops, detaches every event subscription, empties the field and drops
	/// any pending resize. Safe to repeat. A later `start()` animates the
	/// empty field until a resize reseeds it, which needs listeners no
	/// longer attached.
	pub fn destroy(&mut self) {
		self.stop();
		self.host.detach();
		self.field.clear();
		if let Some(handle) = self.run.cancel_resize() {
			self.host.clear_timer(handle);
		}
		debug!("particle-network: destroyed");
	}

	pub fn is_running(&self) -> bool {
		self.run.is_running()
	}

	pub fn config(&self) -> &NetworkConfig {
		&self.config
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	pub fn pointer(&self) -> &PointerState {
		&self.pointer
	}

	/// Frame callback: integrate, render, reschedule. Ignored unless `ticket`
	/// is the live frame of a running network.
	pub(crate) fn on_frame(&mut self, ticket: Ticket) {
		if !self.run.accept_frame(ticket) {
			return;
		}
		motion::step(
			&mut self.field.particles,
			&self.viewport,
			&self.pointer,
			&self.config,
		);
		render::render(
			self.surface.context(),
			&self.field.particles,
			&self.viewport,
			&self.config,
		);
		let next = self.run.next_frame();
		self.request_frame(next);
	}

	/// Pointer or first touch point moved, in client coordinates.
	pub(crate) fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
		let origin = self.surface.origin();
		self.pointer.set_from_client(client_x, client_y, origin);
	}

	/// Pointer left the surface or the touch ended.
	pub(crate) fn on_pointer_leave(&mut self) {
		self.pointer.clear();
	}

	/// Window resized: (re)arm the debounce timer.
	pub(crate) fn on_resize(&mut self) {
		let (stale, ticket) = self.run.rearm_resize();
		if let Some(handle) = stale {
			self.host.clear_timer(handle);
		}
		match self.host.set_timer(ticket, self.config.resize_debounce_ms) {
			Some(handle) => self.run.resize_armed(ticket, handle),
			None => warn!("particle-network: resize timer unavailable, resize dropped"),
		}
	}

	/// Debounce timer fired: re-measure and reseed if it is the live timer.
	pub(crate) fn on_resize_timer(&mut self, ticket: Ticket) {
		if !self.run.accept_resize(ticket) {
			return;
		}
		self.resize();
		self.reseed();
		debug!(
			"particle-network: resized to {}x{} @{}x, {} particles",
			self.viewport.width,
			self.viewport.height,
			self.viewport.dpr,
			self.field.len()
		);
	}

	/// Page visibility changed.
	pub(crate) fn on_visibility_change(&mut self, hidden: bool) {
		debug!("particle-network: visibility hidden={}", hidden);
		if hidden {
			self.stop();
		} else if self.config.auto_start {
			self.start();
		}
	}

	fn request_frame(&mut self, ticket: Ticket) {
		match self.host.request_frame(ticket) {
			Some(handle) => self.run.frame_requested(ticket, handle),
			None => {
				// Nothing will call back, so fall back to stopped and let a later
				// start() retry.
				warn!("particle-network: frame request failed, stopping");
				self.stop();
			}
		}
	}

	fn resize(&mut self) {
		let layout = self.surface.layout();
		self.viewport = Viewport::from_layout(&layout, self.config.dpr_cap);
		self.surface.apply(&self.viewport);
	}

	fn reseed(&mut self) {
		self.field.reseed(&self.viewport, &self.config, &mut self.rng);
	}

	#[cfg(test)]
	pub(crate) fn surface(&self) -> &S {
		&self.surface
	}

	#[cfg(test)]
	pub(crate) fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	#[cfg(test)]
	pub(crate) fn host(&self) -> &H {
		&self.host
	}

	#[cfg(test)]
	pub(crate) fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	#[cfg(test)]
	pub(crate) fn run_state(&self) -> &RunState {
		&self.run
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_network::test_support::{DrawOp, MockHost, MockSurface};
	use crate::components::particle_network::viewport::Layout;

	fn network(config: NetworkConfig) -> ParticleNetwork<MockSurface, MockHost> {
		ParticleNetwork::new(MockSurface::sized(800.0, 600.0), MockHost::default(), config, 42)
	}

	fn manual() -> NetworkConfig {
		NetworkConfig {
			auto_start: false,
			..Default::default()
		}
	}

	#[test]
	fn construction_sizes_seeds_and_autostarts() {
		let net = network(NetworkConfig::default());
		assert_eq!(
			*net.viewport(),
			Viewport {
				width: 800,
				height: 600,
				dpr: 1.0
			}
		);
		assert_eq!(net.surface().applied, vec![*net.viewport()]);
		assert_eq!(net.field().len(), 50);
		assert!(net.is_running());
		assert_eq!(net.host().frames.len(), 1);
	}

	#[test]
	fn without_autostart_nothing_is_scheduled() {
		let net = network(manual());
		assert!(!net.is_running());
		assert!(net.host().frames.is_empty());
	}

	#[test]
	fn frame_integrates_renders_and_reschedules() {
		let mut net = network(NetworkConfig::default());
		let before = net.field().particles.clone();
		let ticket = net.host().last_frame();
		net.on_frame(ticket);

		assert_ne!(net.field().particles, before);
		assert!(!net.surface().ctx.ops().is_empty());
		assert_eq!(net.host().frames.len(), 2);
		assert_ne!(net.host().last_frame(), ticket);
	}

	#[test]
	fn start_twice_requests_one_frame() {
		let mut net = network(manual());
		net.start();
		net.start();
		assert_eq!(net.host().frames.len(), 1);
	}

	#[test]
	fn frame_after_stop_changes_nothing() {
		let mut net = network(NetworkConfig::default());
		let ticket = net.host().last_frame();
		let before = net.field().particles.clone();

		net.stop();
		assert_eq!(net.host().cancelled_frames.len(), 1);
		net.on_frame(ticket);

		assert_eq!(net.field().particles, before);
		assert!(net.surface().ctx.ops().is_empty());
		assert_eq!(net.host().frames.len(), 1);
	}

	#[test]
	fn stale_frame_after_restart_is_ignored() {
		let mut net = network(NetworkConfig::default());
		let stale = net.host().last_frame();
		net.stop();
		net.start();
		let live = net.host().last_frame();

		let before = net.field().particles.clone();
		net.on_frame(stale);
		assert_eq!(net.field().particles, before);

		net.on_frame(live);
		assert_ne!(net.field().particles, before);
	}

	#[test]
	fn pointer_events_are_localized_and_cleared() {
		let mut net = network(manual());
		net.surface_mut().origin = (100.0, 50.0);
		net.on_pointer_move(150.0, 80.0);
		assert_eq!(net.pointer().repulsion_point(), Some((50.0, 30.0)));
		net.on_pointer_leave();
		assert_eq!(*net.pointer(), PointerState::default());
	}

	#[test]
	fn resize_burst_coalesces_into_one_reseed_with_last_geometry() {
		let mut net = network(manual());
		let seeded = net.field().particles.clone();

		net.on_resize();
		net.surface_mut().layout = Layout {
			rect_width: 1000.0,
			rect_height: 900.0,
			device_pixel_ratio: 1.0,
			..Default::default()
		};
		net.on_resize();
		net.surface_mut().layout = Layout {
			rect_width: 1500.0,
			rect_height: 1000.0,
			device_pixel_ratio: 2.0,
			..Default::default()
		};
		net.on_resize();

		let timers = net.host().timers.clone();
		assert_eq!(timers.len(), 3);
		assert!(timers.iter().all(|t| t.delay_ms == 120));
		assert_eq!(net.host().cleared_timers, vec![timers[0].handle, timers[1].handle]);

		// Stale timers firing anyway do nothing.
		net.on_resize_timer(timers[0].ticket);
		net.on_resize_timer(timers[1].ticket);
		assert_eq!(net.surface().applied.len(), 1);
		assert_eq!(net.field().particles, seeded);

		net.on_resize_timer(timers[2].ticket);
		assert_eq!(net.surface().applied.len(), 2);
		assert_eq!(
			*net.viewport(),
			Viewport {
				width: 1500,
				height: 1000,
				dpr: 2.0
			}
		);
		// 1500 * 1000 * 0.00008 = 120
		assert_eq!(net.field().len(), 120);
		assert!(!net.run_state().has_pending_resize());

		// Delivered twice, still one reseed.
		net.on_resize_timer(timers[2].ticket);
		assert_eq!(net.surface().applied.len(), 2);
	}

	#[test]
	fn resize_with_unchanged_layout_reapplies_same_viewport() {
		let mut net = network(manual());
		net.on_resize();
		let ticket = net.host().timers[0].ticket;
		net.on_resize_timer(ticket);
		let applied = &net.surface().applied;
		assert_eq!(applied.len(), 2);
		assert_eq!(applied[0], applied[1]);
	}

	#[test]
	fn hidden_stops_and_visible_resumes_with_autostart() {
		let mut net = network(NetworkConfig::default());
		net.on_visibility_change(true);
		assert!(!net.is_running());
		net.on_visibility_change(false);
		assert!(net.is_running());
		assert_eq!(net.host().frames.len(), 2);
	}

	#[test]
	fn visible_does_not_start_without_autostart() {
		let mut net = network(manual());
		net.start();
		net.on_visibility_change(true);
		net.on_visibility_change(false);
		assert!(!net.is_running());
	}

	#[test]
	fn destroy_tears_everything_down() {
		let mut net = network(NetworkConfig::default());
		let frame = net.host().last_frame();
		net.on_resize();
		let timer = net.host().timers[0];

		net.destroy();

		assert!(!net.is_running());
		assert!(net.host().detached);
		assert!(net.field().is_empty());
		assert_eq!(net.host().cleared_timers, vec![timer.handle]);
		assert!(!net.run_state().has_pending_frame());
		assert!(!net.run_state().has_pending_resize());

		// Late callbacks are inert.
		net.on_frame(frame);
		net.on_resize_timer(timer.ticket);
		assert!(!net.is_running());
		assert!(net.field().is_empty());
		assert!(net.surface().ctx.ops().is_empty());
	}

	#[test]
	fn destroy_is_repeatable() {
		let mut net = network(NetworkConfig::default());
		net.destroy();
		net.destroy();
		assert!(!net.is_running());
		assert_eq!(net.host().cancelled_frames.len(), 1);
		assert!(net.field().is_empty());
	}

	#[test]
	fn start_after_destroy_animates_the_empty_field() {
		let mut net = network(NetworkConfig::default());
		net.destroy();

		net.start();
		assert!(net.is_running());
		assert_eq!(net.host().frames.len(), 2);

		let ticket = net.host().last_frame();
		net.on_frame(ticket);
		assert!(net.field().is_empty());
		let ops = net.surface().ctx.ops();
		assert!(matches!(ops[0], DrawOp::Clear { .. }));
		assert!(
			ops.iter()
				.all(|op| !matches!(op, DrawOp::Line { .. } | DrawOp::Disc { .. }))
		);
		assert_eq!(net.host().frames.len(), 3);
	}

	#[test]
	fn failed_frame_request_leaves_the_network_restartable() {
		let mut host = MockHost::default();
		host.refuse_frames = true;
		let mut net = ParticleNetwork::new(
			MockSurface::sized(800.0, 600.0),
			host,
			NetworkConfig::default(),
			42,
		);
		assert!(!net.is_running());
		assert!(!net.run_state().has_pending_frame());

		net.host_mut().refuse_frames = false;
		net.start();
		assert!(net.is_running());
		assert_eq!(net.host().frames.len(), 1);
	}

	#[test]
	fn failed_timer_drops_the_resize() {
		let mut net = network(manual());
		net.host_mut().refuse_timers = true;
		net.on_resize();
		assert!(!net.run_state().has_pending_resize());

		net.host_mut().refuse_timers = false;
		net.on_resize();
		assert!(net.run_state().has_pending_resize());
		assert_eq!(net.host().cleared_timers, Vec::<i32>::new());
	}
}
