//! Flood event backend: serves the country geometry and stores flood events.

pub mod config;
pub mod events;
pub mod routes;

pub use config::*;
pub use events::*;
pub use routes::*;
