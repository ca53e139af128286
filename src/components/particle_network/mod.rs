//! Interactive particle network rendered on an HTML canvas.
//!
//! A field of slowly drifting points is redrawn every animation frame with:
//! - Proximity links between nearby points, fading with distance
//! - A radial repulsion field around the pointer or first touch point
//! - Seamless wrap-around at the padded viewport edges
//! - Device-pixel-ratio aware backing store sizing
//! - Debounced re-seeding on resize, and pausing while the tab is hidden
//!
//! The simulation core ([`ParticleNetwork`]) is host-agnostic: it draws through
//! [`DrawContext`], measures through [`Surface`] and schedules through [`Host`].
//! The [`browser`] module binds those traits to web-sys.
//!
//! # Example
//!
//! ```ignore
//! use particle_network::{ConfigOverrides, ParticleNetworkHandle};
//!
//! let overrides = ConfigOverrides {
//!     link_distance: Some(90.0),
//!     ..Default::default()
//! };
//! let handle = ParticleNetworkHandle::new(&canvas.into(), &overrides)?;
//! // later
//! handle.destroy();
//! ```

pub mod browser;
mod component;
pub mod config;
mod error;
pub mod motion;
pub mod particles;
pub mod pointer;
pub mod render;
pub mod schedule;
mod state;
pub mod theme;
mod types;
pub mod viewport;

#[cfg(test)]
mod test_support;

pub use browser::ParticleNetworkHandle;
pub use component::ParticleNetworkCanvas;
pub use config::NetworkConfig;
pub use error::InitError;
pub use render::DrawContext;
pub use schedule::{Host, HostHandle, Ticket};
pub use state::ParticleNetwork;
pub use types::ConfigOverrides;
pub use viewport::{Layout, Surface, Viewport};
