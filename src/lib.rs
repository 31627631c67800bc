pub mod array;
pub mod core;
pub mod dimension;
pub mod errors;
pub mod selectors;

pub mod types;
pub mod validation_utils;

#[cfg(test)]
mod test_utils;

pub use crate::array::{
    ConcatOptions, DimArray, Reduction, Reorder, comparedims, concatenate, concatenate_with,
    dimwise,
};
pub use crate::core::{Coord, DimTag, Name};
pub use crate::dimension::{
    DimKey, Dimension, Direction, Index, Locus, Metadata, Mode, Order, OrderTarget, Sampling,
    Span,
};
pub use crate::errors::{DimError, Result};
pub use crate::selectors::{Indexer, Resolved, Selector};
