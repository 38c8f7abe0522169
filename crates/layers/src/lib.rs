pub mod feature;
pub mod layer;
pub mod map;
pub mod raster;
pub mod symbology;
pub mod vector;
pub mod view;

pub use feature::*;
pub use layer::*;
pub use map::*;
pub use raster::*;
pub use symbology::*;
pub use vector::*;
pub use view::*;
