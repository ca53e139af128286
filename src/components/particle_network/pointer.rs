//! Pointer and touch tracking in canvas-local coordinates.

/// Last known pointer position and whether it currently repels particles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	pub position: Option<(f64, f64)>,
	pub active: bool,
}

impl PointerState {
	/// Records a client-space position relative to the surface's on-screen
	/// top-left `origin`. Positions outside the canvas are kept as-is; the
	/// repulsion radius check makes them harmless.
	pub fn set_from_client(&mut self, client_x: f64, client_y: f64, origin: (f64, f64)) {
		self.position = Some((client_x - origin.0, client_y - origin.1));
		self.active = true;
	}

	/// Pointer left the surface or the touch ended.
	pub fn clear(&mut self) {
		self.active = false;
		self.position = None;
	}

	/// Position to repel from, if any.
	pub fn repulsion_point(&self) -> Option<(f64, f64)> {
		if self.active { self.position } else { None }
	}
}
