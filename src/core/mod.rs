pub mod coord;
pub mod name;

pub use coord::Coord;
pub use name::{DimTag, Name};
