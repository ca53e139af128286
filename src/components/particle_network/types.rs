//! Configuration overrides accepted from callers and page markup.

use serde::{Deserialize, Deserializer};

/// Partial configuration. Every key is optional; omitted keys keep their
/// defaults and unknown keys are ignored.
///
/// Keys use camelCase on the wire, e.g. `{"linkDistance": 90, "autoStart": false}`.
/// Each present field replaces the default wholesale, so `particleColors`
/// replaces the whole palette.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
	/// Background fill. `null` or `""` disables the fill.
	#[serde(deserialize_with = "nullable")]
	pub background_color: Option<Option<String>>,
	/// CSS colors particles are drawn from.
	pub particle_colors: Option<Vec<String>>,
	pub min_radius: Option<f64>,
	pub max_radius: Option<f64>,
	/// Base speed in CSS pixels per frame.
	pub speed: Option<f64>,
	/// Particles per square CSS pixel.
	pub base_density: Option<f64>,
	pub min_particles: Option<usize>,
	pub max_particles: Option<usize>,
	pub link_distance: Option<f64>,
	pub link_line_width: Option<f64>,
	/// Link opacity at zero distance.
	pub link_alpha: Option<f64>,
	pub repulse_radius: Option<f64>,
	pub repulse_force: Option<f64>,
	/// How far past the viewport edge particles travel before wrapping.
	pub edge_padding: Option<f64>,
	/// Upper bound for the device pixel ratio.
	pub dpr_cap: Option<f64>,
	pub resize_debounce_ms: Option<u32>,
	/// Start on construction and resume when the tab becomes visible.
	pub auto_start: Option<bool>,
}

/// Distinguishes an explicit `null` (disable) from an absent key (keep default).
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<String>::deserialize(deserializer).map(Some)
}
