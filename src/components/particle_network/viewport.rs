//! Viewport sizing and device-pixel-ratio scaling.
//!
//! # Coordinate Spaces
//!
//! - **CSS pixels**: the space all simulation and drawing code works in.
//! - **Backing-store pixels**: the canvas bitmap, `css * dpr` per axis.
//!
//! [`Surface::apply`] keeps the two in lock-step by sizing the bitmap and
//! installing a `dpr` scale transform in one step, so drawing code never sees
//! physical pixels.

use super::render::DrawContext;

/// Raw geometry readings taken from the host element and environment.
///
/// Zero or non-finite readings mean "not laid out yet" and fall through to the
/// next source.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
	/// Bounding box width.
	pub rect_width: f64,
	/// Bounding box height.
	pub rect_height: f64,
	/// Content box width.
	pub client_width: f64,
	/// Content box height.
	pub client_height: f64,
	/// Global viewport width.
	pub window_width: f64,
	/// Global viewport height.
	pub window_height: f64,
	/// Reported device pixel ratio.
	pub device_pixel_ratio: f64,
}

/// Resolved drawing area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// CSS-pixel width, at least 1.
	pub width: u32,
	/// CSS-pixel height, at least 1.
	pub height: u32,
	/// Device pixel ratio within `[1, dpr_cap]`.
	pub dpr: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			width: 1,
			height: 1,
			dpr: 1.0,
		}
	}
}

impl Viewport {
	/// Resolves CSS size and pixel ratio from a layout reading.
	pub fn from_layout(layout: &Layout, dpr_cap: f64) -> Self {
		Self {
			width: css_extent(&[layout.rect_width, layout.client_width, layout.window_width]),
			height: css_extent(&[
				layout.rect_height,
				layout.client_height,
				layout.window_height,
			]),
			dpr: resolve_dpr(layout.device_pixel_ratio, dpr_cap),
		}
	}

	/// Width as a float, for drawing and integration.
	pub fn w(&self) -> f64 {
		self.width as f64
	}

	/// Height as a float, for drawing and integration.
	pub fn h(&self) -> f64 {
		self.height as f64
	}

	/// Visible area in square CSS pixels.
	pub fn area(&self) -> f64 {
		self.w() * self.h()
	}

	/// Physical bitmap size: CSS size times ratio, rounded.
	pub fn backing_size(&self) -> (u32, u32) {
		(
			(self.w() * self.dpr).round() as u32,
			(self.h() * self.dpr).round() as u32,
		)
	}
}

/// First positive reading, rounded, floored at one pixel.
fn css_extent(candidates: &[f64]) -> u32 {
	let raw = candidates
		.iter()
		.copied()
		.find(|v| v.is_finite() && *v > 0.0)
		.unwrap_or(1.0);
	raw.round().max(1.0) as u32
}

fn resolve_dpr(reported: f64, cap: f64) -> f64 {
	let reported = if reported.is_finite() && reported > 0.0 {
		reported
	} else {
		1.0
	};
	reported.min(cap).max(1.0)
}

/// A drawable element that can report its layout and accept a viewport.
pub trait Surface {
	/// Context used for drawing, already scaled to CSS pixels.
	type Context: DrawContext;

	/// Reads the element's current geometry and the environment's pixel ratio.
	fn layout(&self) -> Layout;

	/// On-screen top-left of the element, used to localize pointer input.
	fn origin(&self) -> (f64, f64);

	/// Sizes the backing store to `viewport.backing_size()`, sets the displayed
	/// CSS size and installs a uniform `viewport.dpr` drawing transform.
	fn apply(&mut self, viewport: &Viewport);

	/// The drawing context.
	fn context(&self) -> &Self::Context;
}
