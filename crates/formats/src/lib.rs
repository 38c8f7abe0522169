pub mod coordinate;
pub mod country;
pub mod geometry;

pub use coordinate::*;
pub use country::*;
pub use geometry::*;
