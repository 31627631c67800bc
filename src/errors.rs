//! Error types for dimension resolution, selector lookup and shape checks.

use thiserror::Error;

/// Errors raised by dimension-aware array operations.
///
/// Every fallible operation in this crate returns one of these. Operations
/// never leave partially built values behind: an `Err` means the input array
/// and its dimensions are exactly as they were.
#[derive(Debug, Error)]
pub enum DimError {
    /// The requested dimension identity is not present.
    #[error("dimension `{requested}` not found, available dimensions: [{available}]")]
    DimensionNotFound { requested: String, available: String },

    /// The same axis was named more than once in a single request.
    #[error("dimension `{0}` was requested more than once")]
    DuplicateDimension(String),

    /// A positional axis beyond the number of dimensions.
    #[error("axis {axis} out of range for an array with {ndim} dimensions")]
    AxisOutOfRange { axis: usize, ndim: usize },

    /// Dimensions of two arrays (or a request) do not agree.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The selector cannot be used with the dimension's mode.
    #[error("selector {selector} is incompatible with {mode} mode of dimension `{dim}`")]
    SelectorIncompatible {
        selector: String,
        mode: String,
        dim: String,
    },

    /// The selector is valid for the mode but matched no position.
    #[error("selector {selector} matched nothing in dimension `{dim}`")]
    SelectorNotFound { selector: String, dim: String },

    /// The mode given for a dimension contradicts its index.
    #[error("invalid mode for dimension `{dim}`: {reason}")]
    InvalidMode { dim: String, reason: String },

    /// A dimension length would no longer match its axis.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Shape error surfaced by the payload array.
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    /// A positional index outside the axis.
    #[error("index {index} out of bounds for dimension `{dim}` of length {len}")]
    IndexOutOfBounds { index: usize, dim: String, len: usize },

    /// Operation only defined for matrices.
    #[error("`{op}` requires a 2-dimensional array, got {ndim} dimensions")]
    NotTwoDimensional { op: &'static str, ndim: usize },
}

pub type Result<T> = std::result::Result<T, DimError>;
