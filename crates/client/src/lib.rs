//! Geometry/event client for the flood backend.
//!
//! [`FloodApi`] is the raw request surface (one network round trip per call);
//! [`FloodClient`] layers the country-geometry replay cache and local
//! validation on top of it and is what the viewer talks to.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod http;

pub use api::*;
pub use cache::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use http::*;
