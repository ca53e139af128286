//! Canvas rendering for the particle network.
//!
//! Each frame is drawn in three passes for correct z-ordering:
//! 1. Clear, then the optional background fill
//! 2. Proximity links, fading with distance
//! 3. Particles as filled discs, always on top of links
//!
//! Link detection is an all-pairs pass, which is what bounds the particle count.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::NetworkConfig;
use super::particles::Particle;
use super::theme::LINK_COLOR;
use super::viewport::Viewport;

/// Immediate-mode drawing operations the renderer needs, in CSS pixels.
pub trait DrawContext {
	/// Clears `[0, width) x [0, height)` to transparent.
	fn clear(&self, width: f64, height: f64);
	/// Fills `[0, width) x [0, height)` with a CSS color.
	fn fill_background(&self, width: f64, height: f64, style: &str);
	/// Strokes a straight segment.
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), style: &str, line_width: f64);
	/// Fills a circle.
	fn fill_disc(&self, x: f64, y: f64, radius: f64, style: &str);
}

impl DrawContext for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_background(&self, width: f64, height: f64, style: &str) {
		self.set_fill_style_str(style);
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), style: &str, line_width: f64) {
		self.set_stroke_style_str(style);
		self.set_line_width(line_width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn fill_disc(&self, x: f64, y: f64, radius: f64, style: &str) {
		self.set_fill_style_str(style);
		self.begin_path();
		// Rejects negative radii; a bad radius just skips the disc.
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}
}

/// Link opacity for a pair `dist` apart: `link_alpha` when touching, zero at
/// `link_distance`.
pub fn link_alpha(dist: f64, link_distance: f64, link_alpha: f64) -> f64 {
	link_alpha * (1.0 - dist / link_distance)
}

/// Renders one frame.
pub fn render<C: DrawContext + ?Sized>(
	ctx: &C,
	particles: &[Particle],
	viewport: &Viewport,
	config: &NetworkConfig,
) {
	let (w, h) = (viewport.w(), viewport.h());

	ctx.clear(w, h);
	if let Some(background) = config.background_color.as_deref() {
		ctx.fill_background(w, h, background);
	}

	draw_links(ctx, particles, config);

	for p in particles {
		ctx.fill_disc(p.x, p.y, p.radius, &p.color);
	}
}

fn draw_links<C: DrawContext + ?Sized>(ctx: &C, particles: &[Particle], config: &NetworkConfig) {
	let link_distance = config.link_distance;
	let link_distance_sq = link_distance * link_distance;

	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let dist_sq = dx * dx + dy * dy;
			if dist_sq > link_distance_sq {
				continue;
			}
			let alpha = link_alpha(dist_sq.sqrt(), link_distance, config.link_alpha);
			ctx.stroke_line(
				(a.x, a.y),
				(b.x, b.y),
				&LINK_COLOR.with_alpha(alpha).to_css(),
				config.link_line_width,
			);
		}
	}
}
