//! The particle field.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::NetworkConfig;
use super::theme::FALLBACK_PARTICLE_COLOR;
use super::viewport::Viewport;

/// Seeded speeds span this fraction range of the base speed.
const MIN_SPEED_FRACTION: f64 = 0.4;
const SPEED_FRACTION_SPAN: f64 = 0.6;

/// A single drifting point.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Velocity in CSS pixels per frame.
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	/// Fixed at creation.
	pub color: String,
}

impl Particle {
	/// Current speed in CSS pixels per frame.
	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}
}

/// Owns every particle of one network.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	pub particles: Vec<Particle>,
}

/// Particle count for a viewport: `round(area * density)` clamped into
/// `[min_particles, max_particles]`. With reversed bounds the minimum wins.
pub fn target_count(viewport: &Viewport, config: &NetworkConfig) -> usize {
	let raw = (viewport.area() * config.base_density).round();
	let raw = if raw.is_finite() && raw > 0.0 {
		raw as usize
	} else {
		0
	};
	config.min_particles.max(config.max_particles.min(raw))
}

impl ParticleField {
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Replaces the whole field with freshly randomized particles.
	pub fn reseed<R: Rng>(&mut self, viewport: &Viewport, config: &NetworkConfig, rng: &mut R) {
		let count = target_count(viewport, config);
		self.particles.clear();
		self.particles.reserve(count);
		for _ in 0..count {
			self.particles.push(spawn(viewport, config, rng));
		}
	}

	/// Drops every particle.
	pub fn clear(&mut self) {
		self.particles.clear();
	}
}

fn spawn<R: Rng>(viewport: &Viewport, config: &NetworkConfig, rng: &mut R) -> Particle {
	let angle = rng.random::<f64>() * TAU;
	let speed = (MIN_SPEED_FRACTION + rng.random::<f64>() * SPEED_FRACTION_SPAN) * config.speed;
	let radius = config.min_radius + rng.random::<f64>() * (config.max_radius - config.min_radius);
	let color = match config.particle_colors.len() {
		0 => FALLBACK_PARTICLE_COLOR.to_string(),
		n => config.particle_colors[rng.random_range(0..n)].clone(),
	};

	Particle {
		x: rng.random::<f64>() * viewport.w(),
		y: rng.random::<f64>() * viewport.h(),
		vx: angle.cos() * speed,
		vy: angle.sin() * speed,
		radius,
		color,
	}
}
