//! Colors used by the default network look.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba()` string with alpha fixed to four decimals, so per-frame
	/// link styles stay short and stable.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {:.4})", self.r, self.g, self.b, self.a)
	}
}

/// Stroke color for proximity links; alpha is set per link.
pub const LINK_COLOR: Color = Color::rgb(125, 195, 255);

/// Default background fill (fully transparent, lets the page show through).
pub const DEFAULT_BACKGROUND: &str = "rgba(5, 10, 20, 0)";

/// Default particle palette: white and two sky blues.
pub const DEFAULT_PALETTE: [&str; 3] = ["#FFFFFF", "#7CC7FF", "#50A9FF"];

/// Used when a caller overrides the palette with an empty list.
pub const FALLBACK_PARTICLE_COLOR: &str = DEFAULT_PALETTE[0];
