//! Flood event viewer: keeps a headless map in step with the selected region.
//!
//! [`App`] owns the region autocomplete and publishes what the user picks on
//! the selection bus; [`MapView`] listens on that bus, fetches outlines and
//! markers through the [`client::FloodClient`], and rebuilds its overlay
//! layers as responses arrive.

pub mod app;
pub mod autocomplete;
pub mod config;
pub mod map_view;
pub mod status;

pub use app::*;
pub use autocomplete::*;
pub use config::*;
pub use map_view::*;
pub use status::*;
