//! Browser bindings for the particle network.
//!
//! [`CanvasSurface`] measures and sizes an `HtmlCanvasElement`, and
//! [`BrowserHost`] schedules frames and timers on the window and owns the DOM
//! listeners. Callbacks reach the shared network through a `Weak` reference,
//! so a dropped network turns late callbacks into no-ops.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	AddEventListenerOptions, CanvasRenderingContext2d, Document, Event, EventTarget,
	HtmlCanvasElement, MouseEvent, TouchEvent, Window,
};

use super::config;
use super::error::InitError;
use super::schedule::{Host, HostHandle, Ticket};
use super::state::ParticleNetwork;
use super::types::ConfigOverrides;
use super::viewport::{Layout, Surface, Viewport};

type BrowserNetwork = ParticleNetwork<CanvasSurface, BrowserHost>;
type SharedNetwork = Weak<RefCell<BrowserNetwork>>;

/// A canvas element and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	window: Window,
}

impl CanvasSurface {
	/// Fails if `target` is not a canvas or has no 2D context.
	pub fn new(target: &JsValue, window: Window) -> Result<Self, InitError> {
		let canvas = target
			.dyn_ref::<HtmlCanvasElement>()
			.cloned()
			.ok_or(InitError::InvalidSurface)?;
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or(InitError::ContextUnavailable)?;
		Ok(Self {
			canvas,
			ctx,
			window,
		})
	}
}

fn js_number(value: Result<JsValue, JsValue>) -> f64 {
	value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl Surface for CanvasSurface {
	type Context = CanvasRenderingContext2d;

	fn layout(&self) -> Layout {
		let rect = self.canvas.get_bounding_client_rect();
		Layout {
			rect_width: rect.width(),
			rect_height: rect.height(),
			client_width: self.canvas.client_width() as f64,
			client_height: self.canvas.client_height() as f64,
			window_width: js_number(self.window.inner_width()),
			window_height: js_number(self.window.inner_height()),
			device_pixel_ratio: self.window.device_pixel_ratio(),
		}
	}

	fn origin(&self) -> (f64, f64) {
		let rect = self.canvas.get_bounding_client_rect();
		(rect.left(), rect.top())
	}

	fn apply(&mut self, viewport: &Viewport) {
		let (backing_w, backing_h) = viewport.backing_size();
		// Resizing the bitmap resets the context, so the transform goes last.
		self.canvas.set_width(backing_w);
		self.canvas.set_height(backing_h);
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", viewport.width));
		let _ = style.set_property("height", &format!("{}px", viewport.height));
		let _ = self
			.ctx
			.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0);
	}

	fn context(&self) -> &CanvasRenderingContext2d {
		&self.ctx
	}
}

struct Listener {
	target: EventTarget,
	kind: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

/// The single outstanding request served by a long-lived callback.
///
/// The callback takes the ticket when it fires; cancelling takes the handle.
/// Whichever comes first empties the slot, so a cancelled request never
/// reaches the network even if the browser still runs the callback.
#[derive(Clone, Debug, Default)]
struct PendingSlot(Rc<Cell<Option<(Ticket, HostHandle)>>>);

impl PendingSlot {
	fn arm(&self, ticket: Ticket, handle: HostHandle) {
		self.0.set(Some((ticket, handle)));
	}

	fn fire(&self) -> Option<Ticket> {
		self.0.take().map(|(ticket, _)| ticket)
	}

	fn cancel(&self) -> Option<HostHandle> {
		self.0.take().map(|(_, handle)| handle)
	}
}

/// Window-backed scheduling plus the network's DOM subscriptions.
///
/// Frames and the resize timer each reuse one `Closure` for the life of the
/// host, so cancelling a request never strands a callback.
pub struct BrowserHost {
	window: Window,
	network: SharedNetwork,
	listeners: Vec<Listener>,
	frame: PendingSlot,
	frame_cb: Closure<dyn FnMut()>,
	timer: PendingSlot,
	timer_cb: Closure<dyn FnMut()>,
}

/// Runs `f` on the network if it is still alive and not mid-callback.
fn with_network(network: &SharedNetwork, f: impl FnOnce(&mut BrowserNetwork)) {
	let Some(network) = network.upgrade() else {
		return;
	};
	match network.try_borrow_mut() {
		Ok(mut n) => f(&mut n),
		Err(_) => debug!("particle-network: busy, callback dropped"),
	};
}

/// A callback that hands the slot's ticket, if any, to `deliver`.
fn slot_callback(
	network: &SharedNetwork,
	slot: &PendingSlot,
	deliver: fn(&mut BrowserNetwork, Ticket),
) -> Closure<dyn FnMut()> {
	let (network, slot) = (network.clone(), slot.clone());
	Closure::new(move || {
		if let Some(ticket) = slot.fire() {
			with_network(&network, |net| deliver(net, ticket));
		}
	})
}

impl BrowserHost {
	/// Subscribes to pointer and touch events on the canvas, resize on the
	/// window and visibility changes on the document.
	fn attach(
		window: Window,
		document: &Document,
		canvas: &HtmlCanvasElement,
		network: SharedNetwork,
	) -> Self {
		let (frame, timer) = (PendingSlot::default(), PendingSlot::default());
		let frame_cb = slot_callback(&network, &frame, |net, ticket| net.on_frame(ticket));
		let timer_cb = slot_callback(&network, &timer, |net, ticket| net.on_resize_timer(ticket));
		let mut host = Self {
			window: window.clone(),
			network,
			listeners: Vec::new(),
			frame,
			frame_cb,
			timer,
			timer_cb,
		};

		host.listen(window.as_ref(), "resize", |net, _| net.on_resize());
		host.listen(canvas.as_ref(), "mousemove", |net, event| {
			if let Some(e) = event.dyn_ref::<MouseEvent>() {
				net.on_pointer_move(e.client_x() as f64, e.client_y() as f64);
			}
		});
		host.listen(canvas.as_ref(), "mouseleave", |net, _| net.on_pointer_leave());
		host.listen(canvas.as_ref(), "touchmove", |net, event| {
			if let Some(touch) = event
				.dyn_ref::<TouchEvent>()
				.and_then(|e| e.touches().get(0))
			{
				net.on_pointer_move(touch.client_x() as f64, touch.client_y() as f64);
			}
		});
		host.listen(canvas.as_ref(), "touchend", |net, _| net.on_pointer_leave());

		let doc = document.clone();
		host.listen(document.as_ref(), "visibilitychange", move |net, _| {
			net.on_visibility_change(doc.hidden());
		});

		host
	}

	fn listen<F>(&mut self, target: &EventTarget, kind: &'static str, mut handler: F)
	where
		F: FnMut(&mut BrowserNetwork, &Event) + 'static,
	{
		let network = self.network.clone();
		let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
			with_network(&network, |net| handler(net, &event));
		});
		let options = AddEventListenerOptions::new();
		options.set_passive(true);
		if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
			kind,
			callback.as_ref().unchecked_ref(),
			&options,
		) {
			warn!("particle-network: failed to listen for {}: {:?}", kind, e);
		}
		self.listeners.push(Listener {
			target: target.clone(),
			kind,
			callback,
		});
	}
}

impl Host for BrowserHost {
	fn request_frame(&mut self, ticket: Ticket) -> Option<HostHandle> {
		match self
			.window
			.request_animation_frame(self.frame_cb.as_ref().unchecked_ref())
		{
			Ok(handle) => {
				self.frame.arm(ticket, handle);
				Some(handle)
			}
			Err(e) => {
				warn!("particle-network: requestAnimationFrame failed: {:?}", e);
				None
			}
		}
	}

	fn cancel_frame(&mut self, handle: HostHandle) {
		self.frame.cancel();
		let _ = self.window.cancel_animation_frame(handle);
	}

	fn set_timer(&mut self, ticket: Ticket, delay_ms: u32) -> Option<HostHandle> {
		match self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				self.timer_cb.as_ref().unchecked_ref(),
				i32::try_from(delay_ms).unwrap_or(i32::MAX),
			) {
			Ok(handle) => {
				self.timer.arm(ticket, handle);
				Some(handle)
			}
			Err(e) => {
				warn!("particle-network: setTimeout failed: {:?}", e);
				None
			}
		}
	}

	fn clear_timer(&mut self, handle: HostHandle) {
		self.timer.cancel();
		self.window.clear_timeout_with_handle(handle);
	}

	fn detach(&mut self) {
		for listener in self.listeners.drain(..) {
			let _ = listener.target.remove_event_listener_with_callback(
				listener.kind,
				listener.callback.as_ref().unchecked_ref(),
			);
		}
	}
}

impl Drop for BrowserHost {
	// Closures must leave the DOM and the scheduler queues before they are freed.
	fn drop(&mut self) {
		self.detach();
		if let Some(handle) = self.frame.cancel() {
			let _ = self.window.cancel_animation_frame(handle);
		}
		if let Some(handle) = self.timer.cancel() {
			self.window.clear_timeout_with_handle(handle);
		}
	}
}

fn entropy_seed() -> u64 {
	let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
	let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
	((hi << 32) | lo) ^ js_sys::Date::now() as u64
}

/// Parses a JSON overrides document.
pub fn parse_overrides(json: &str) -> Result<ConfigOverrides, InitError> {
	Ok(serde_json::from_str(json)?)
}

fn overrides_from_js(options: &JsValue) -> Result<ConfigOverrides, InitError> {
	if options.is_undefined() || options.is_null() {
		return Ok(ConfigOverrides::default());
	}
	let json = js_sys::JSON::stringify(options).map_err(|_| {
		InitError::InvalidOptions(serde::de::Error::custom("options are not serializable"))
	})?;
	parse_overrides(&String::from(json))
}

/// A live particle network bound to a canvas.
///
/// Only `start`, `stop` and `destroy` change its state from outside; every
/// other change is driven by the events it subscribes to.
#[wasm_bindgen]
pub struct ParticleNetworkHandle {
	inner: Rc<RefCell<BrowserNetwork>>,
}

impl ParticleNetworkHandle {
	/// Binds a new network to `target`, which must be an `HtmlCanvasElement`.
	pub fn new(target: &JsValue, overrides: &ConfigOverrides) -> Result<Self, InitError> {
		let window = web_sys::window().ok_or(InitError::NoWindow)?;
		let document = window.document().ok_or(InitError::NoWindow)?;
		let surface = CanvasSurface::new(target, window.clone())?;
		let canvas = surface.canvas.clone();
		let config = config::resolve(overrides);
		let seed = entropy_seed();

		let inner = Rc::new_cyclic(|weak: &SharedNetwork| {
			let host = BrowserHost::attach(window, &document, &canvas, weak.clone());
			RefCell::new(ParticleNetwork::new(surface, host, config, seed))
		});
		Ok(Self { inner })
	}

	fn with<R>(&self, f: impl FnOnce(&mut BrowserNetwork) -> R) -> Option<R> {
		match self.inner.try_borrow_mut() {
			Ok(mut net) => Some(f(&mut net)),
			Err(_) => {
				warn!("particle-network: handle used re-entrantly, call ignored");
				None
			}
		}
	}
}

#[wasm_bindgen]
impl ParticleNetworkHandle {
	/// Starts the animation loop if it is not running.
	pub fn start(&self) {
		self.with(|net| net.start());
	}

	/// Stops the animation loop.
	pub fn stop(&self) {
		self.with(|net| net.stop());
	}

	/// Stops, removes all listeners and empties the field.
	pub fn destroy(&self) {
		self.with(|net| net.destroy());
	}

	/// Whether frames are currently being drawn.
	#[wasm_bindgen(js_name = isRunning)]
	pub fn is_running(&self) -> bool {
		self.with(|net| net.is_running()).unwrap_or(false)
	}

	/// Number of particles in the field.
	#[wasm_bindgen(js_name = particleCount)]
	pub fn particle_count(&self) -> usize {
		self.with(|net| net.field().len()).unwrap_or(0)
	}
}

/// JS entry point: `createParticleNetwork(canvas, options?)`.
///
/// `options` is an optional plain object using the camelCase keys of
/// [`ConfigOverrides`].
#[wasm_bindgen(js_name = createParticleNetwork)]
pub fn create_particle_network(
	canvas: JsValue,
	options: JsValue,
) -> Result<ParticleNetworkHandle, JsValue> {
	let overrides = overrides_from_js(&options)?;
	Ok(ParticleNetworkHandle::new(&canvas, &overrides)?)
}
