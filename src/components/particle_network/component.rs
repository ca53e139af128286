//! Leptos component wrapping the particle network canvas.
//!
//! The component renders a bare `<canvas>` and, once it is mounted, binds a
//! [`ParticleNetworkHandle`] to it. The network installs its own pointer,
//! resize and visibility listeners and runs its own animation loop.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use web_sys::HtmlCanvasElement;

use super::browser::ParticleNetworkHandle;
use super::types::ConfigOverrides;

/// Renders an animated particle network filling its CSS box.
///
/// Pass `overrides` to tune the look; omitted keys keep their defaults. Size
/// the canvas with CSS (`class`); the backing store follows the element's box
/// and the device pixel ratio.
#[component]
pub fn ParticleNetworkCanvas(
	#[prop(optional)] overrides: ConfigOverrides,
	#[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handle: Rc<RefCell<Option<ParticleNetworkHandle>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handle.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match ParticleNetworkHandle::new(canvas.as_ref(), &overrides) {
			Ok(network) => *handle.borrow_mut() = Some(network),
			Err(e) => error!("particle-network: {}", e),
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class=class.unwrap_or_else(|| "particle-network-canvas".to_string())
			aria-hidden="true"
			style="display: block;"
		/>
	}
}
