//! Construction errors.

use std::fmt;

use wasm_bindgen::JsValue;

/// Why a particle network could not be created. No listeners or timers are
/// installed when construction fails.
#[derive(Debug)]
pub enum InitError {
	/// The target is not a canvas element.
	InvalidSurface,
	/// The canvas refused to hand out a 2D context.
	ContextUnavailable,
	/// Running outside a browser window/document.
	NoWindow,
	/// The options object did not match the expected shape.
	InvalidOptions(serde_json::Error),
}

impl fmt::Display for InitError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			InitError::InvalidSurface => {
				write!(f, "particle network requires a valid canvas element")
			}
			InitError::ContextUnavailable => write!(f, "2D canvas context is unavailable"),
			InitError::NoWindow => write!(f, "no browser window or document available"),
			InitError::InvalidOptions(e) => write!(f, "invalid particle network options: {}", e),
		}
	}
}

impl std::error::Error for InitError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			InitError::InvalidOptions(e) => Some(e),
			_ => None,
		}
	}
}

impl From<serde_json::Error> for InitError {
	fn from(e: serde_json::Error) -> Self {
		InitError::InvalidOptions(e)
	}
}

impl From<InitError> for JsValue {
	fn from(e: InitError) -> Self {
		js_sys::Error::new(&e.to_string()).into()
	}
}
