//! Per-frame integration: drift, wrap-around, pointer repulsion and the speed cap.
//!
//! There is no friction term. Repulsion impulses accumulate across frames and
//! the only bound on energy is [`clamp_speed`] at `MAX_SPEED_FACTOR * speed`.

use super::config::NetworkConfig;
use super::particles::Particle;
use super::pointer::PointerState;
use super::viewport::Viewport;

/// Speed cap as a multiple of the configured base speed.
pub const MAX_SPEED_FACTOR: f64 = 1.8;

/// Squared distance below which repulsion is skipped (avoids dividing by ~0).
const MIN_REPULSE_DIST_SQ: f64 = 0.0001;

/// Advances every particle by one frame.
pub fn step(
	particles: &mut [Particle],
	viewport: &Viewport,
	pointer: &PointerState,
	config: &NetworkConfig,
) {
	let pad = config.edge_padding;
	let max_speed = config.speed * MAX_SPEED_FACTOR;
	let repel_from = pointer.repulsion_point();

	for p in particles.iter_mut() {
		p.x += p.vx;
		p.y += p.vy;

		p.x = wrap(p.x, viewport.w(), pad);
		p.y = wrap(p.y, viewport.h(), pad);

		if let Some((mx, my)) = repel_from {
			if let Some((ix, iy)) =
				repulsion(p.x - mx, p.y - my, config.repulse_radius, config.repulse_force)
			{
				p.vx += ix;
				p.vy += iy;
			}
		}

		(p.vx, p.vy) = clamp_speed(p.vx, p.vy, max_speed);
	}
}

/// Toroidal wrap on one axis: leaving past `-pad` re-enters at `extent + pad`
/// and vice versa. Coordinates inside the padded band are untouched.
pub fn wrap(coord: f64, extent: f64, pad: f64) -> f64 {
	let mut c = coord;
	if c < -pad {
		c = extent + pad;
	}
	if c > extent + pad {
		c = -pad;
	}
	c
}

/// Velocity impulse for a particle at offset `(dx, dy)` from the pointer.
///
/// Points straight away from the pointer with magnitude
/// `force * (1 - dist / radius)`: full strength at the pointer, zero at the
/// radius. `None` outside the radius or when sitting on the pointer.
pub fn repulsion(dx: f64, dy: f64, radius: f64, force: f64) -> Option<(f64, f64)> {
	let dist_sq = dx * dx + dy * dy;
	if !(dist_sq > MIN_REPULSE_DIST_SQ && dist_sq < radius * radius) {
		return None;
	}
	let dist = dist_sq.sqrt();
	let falloff = 1.0 - dist / radius;
	let magnitude = force * falloff;
	Some((dx / dist * magnitude, dy / dist * magnitude))
}

/// Rescales `(vx, vy)` down to `max` if it is faster; direction is kept.
pub fn clamp_speed(vx: f64, vy: f64, max: f64) -> (f64, f64) {
	let v = vx.hypot(vy);
	if v > max {
		let scale = max / v;
		(vx * scale, vy * scale)
	} else {
		(vx, vy)
	}
}
