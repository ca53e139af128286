//! particle-network: an interactive particle network background for the web.
//!
//! This crate provides a WASM canvas component that animates a field of
//! drifting points, links nearby points with fading lines and pushes points
//! away from the pointer.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_network::{
	ConfigOverrides, InitError, NetworkConfig, ParticleNetwork, ParticleNetworkCanvas,
	ParticleNetworkHandle,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-network: logging initialized");
}

/// Load configuration overrides from a script element with id="particle-config".
/// Expected format: JSON object with camelCase keys, e.g. { "linkDistance": 90 }
fn load_config_overrides() -> Option<ConfigOverrides> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match components::particle_network::browser::parse_overrides(&json_text) {
		Ok(overrides) => {
			info!("particle-network: loaded config overrides");
			Some(overrides)
		}
		Err(e) => {
			warn!("particle-network: ignoring page config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads overrides from the DOM and renders a full-page particle network.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let overrides = load_config_overrides().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Particle Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-network">
			<ParticleNetworkCanvas overrides=overrides class="particle-network-canvas" />
			<div class="network-overlay">
				<h1>"Particle Network"</h1>
				<p class="subtitle">"Move the pointer through the field to push particles away."</p>
			</div>
		</div>
	}
}
