pub mod event_bus;
pub mod selection;

pub use event_bus::*;
pub use selection::*;
