//! Resolved network configuration.
//!
//! [`resolve`] lays a [`ConfigOverrides`] over [`NetworkConfig::default`]. No
//! validation happens here: a reversed bound or an empty palette shows up as
//! odd visuals, never as a failure.

use super::theme::{DEFAULT_BACKGROUND, DEFAULT_PALETTE};
use super::types::ConfigOverrides;

/// Complete, immutable settings shared by every part of the network.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
	/// Background fill painted after clearing; `None` leaves the canvas transparent.
	pub background_color: Option<String>,
	/// Palette each particle draws its color from.
	pub particle_colors: Vec<String>,
	/// Smallest particle radius in CSS pixels.
	pub min_radius: f64,
	/// Largest particle radius in CSS pixels.
	pub max_radius: f64,
	/// Base speed in CSS pixels per frame. Seeded speeds fall in 0.4..=1.0 of
	/// this; the integrator caps speed at 1.8 times it.
	pub speed: f64,
	/// Particles per square CSS pixel of viewport.
	pub base_density: f64,
	/// Floor for the particle count.
	pub min_particles: usize,
	/// Ceiling for the particle count. Linking is quadratic in this.
	pub max_particles: usize,
	/// Pairs closer than this are linked.
	pub link_distance: f64,
	/// Stroke width of links in CSS pixels.
	pub link_line_width: f64,
	/// Link opacity at zero distance; fades linearly to zero at `link_distance`.
	pub link_alpha: f64,
	/// Radius of the pointer repulsion field.
	pub repulse_radius: f64,
	/// Impulse applied at the pointer's position; fades to zero at the radius.
	pub repulse_force: f64,
	/// Margin outside the viewport before a particle wraps to the other side.
	pub edge_padding: f64,
	/// Upper bound for the device pixel ratio.
	pub dpr_cap: f64,
	/// Quiet period after the last resize event before re-seeding.
	pub resize_debounce_ms: u32,
	/// Start immediately, and resume when the page becomes visible again.
	pub auto_start: bool,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			background_color: Some(DEFAULT_BACKGROUND.to_string()),
			particle_colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
			min_radius: 0.9,
			max_radius: 2.2,
			speed: 0.35,
			base_density: 0.00008,
			min_particles: 50,
			max_particles: 220,
			link_distance: 125.0,
			link_line_width: 1.0,
			link_alpha: 0.45,
			repulse_radius: 130.0,
			repulse_force: 0.15,
			edge_padding: 24.0,
			dpr_cap: 2.0,
			resize_debounce_ms: 120,
			auto_start: true,
		}
	}
}

macro_rules! overlay {
	($config:ident, $overrides:ident; $($field:ident),+ $(,)?) => {
		$(
			if let Some(value) = $overrides.$field.clone() {
				$config.$field = value;
			}
		)+
	};
}

/// Merges `overrides` onto the defaults. Present fields replace the default
/// outright; nested values such as the palette are never merged.
pub fn resolve(overrides: &ConfigOverrides) -> NetworkConfig {
	let mut config = NetworkConfig::default();
	overlay!(config, overrides;
		background_color,
		particle_colors,
		min_radius,
		max_radius,
		speed,
		base_density,
		min_particles,
		max_particles,
		link_distance,
		link_line_width,
		link_alpha,
		repulse_radius,
		repulse_force,
		edge_padding,
		dpr_cap,
		resize_debounce_ms,
		auto_start,
	);
	// An empty string reads as "no fill", matching a null override.
	if config.background_color.as_deref() == Some("") {
		config.background_color = None;
	}
	config
}
