//! # Dimensional arrays
//!
//! [`DimArray`] pairs an `ndarray::ArrayD` payload with one [`Dimension`] per
//! axis. Every operation resolves the axes it needs by identity, computes the
//! new dimensions, delegates the bulk work to `ndarray` on positional axes and
//! wraps the result again. Neither the payload nor the dimensions are ever
//! mutated in place.
//!
//! ```rust
//! use dimarray::{DimArray, DimTag, Dimension, Index, Selector};
//!
//! let a = DimArray::from_shape_vec(
//!     vec![
//!         Dimension::new(DimTag::X, Index::range(10.0, 10.0, 2)),
//!         Dimension::new(DimTag::Y, Index::range(100.0, 100.0, 3)),
//!     ],
//!     vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
//! )
//! .unwrap();
//!
//! let row = a.select([(DimTag::X, Selector::near(18.0))]).unwrap();
//! assert_eq!(row.shape(), &[3]);
//! assert_eq!(row.refdims()[0].name(), "X");
//! ```

pub mod broadcast;
pub mod concat;
pub mod indexing;
#[cfg(feature = "linalg")]
pub mod linalg;
pub mod reduce;
pub mod reorder;

use std::fmt;

use ndarray::{ArrayD, IxDyn};

pub use broadcast::{comparedims, dimwise};
pub use concat::{ConcatOptions, concatenate, concatenate_with};
pub use reduce::Reduction;
pub use reorder::Reorder;

use crate::{
    dimension::{DimKey, Dimension, Index, Metadata, dimnum, format, hasdim},
    errors::{DimError, Result},
    types::{Validate, ValidationResult},
    validation_utils::{_chain, _return, validate_length},
};

#[derive(Debug, Clone, PartialEq)]
pub struct DimArray<T> {
    data: ArrayD<T>,
    dims: Vec<Dimension>,
    refdims: Vec<Dimension>,
    name: Option<String>,
    metadata: Metadata,
}

impl<T> DimArray<T> {
    /// Wraps `data`, checking and formatting `dims` against its shape.
    pub fn new(data: ArrayD<T>, dims: Vec<Dimension>) -> Result<Self> {
        let dims = format(dims, data.shape())?;
        Ok(DimArray {
            data,
            dims,
            refdims: Vec::new(),
            name: None,
            metadata: Metadata::new(),
        })
    }

    /// Builds the payload from row-major `values`, shaped by the dimension
    /// lengths.
    pub fn from_shape_vec(dims: Vec<Dimension>, values: Vec<T>) -> Result<Self> {
        let shape: Vec<usize> = dims.iter().map(Dimension::len).collect();
        let data = ArrayD::from_shape_vec(IxDyn(&shape), values)?;
        Self::new(data, dims)
    }

    pub fn with_refdims(self, refdims: Vec<Dimension>) -> Self {
        DimArray { refdims, ..self }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        DimArray {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_metadata(self, metadata: Metadata) -> Self {
        DimArray { metadata, ..self }
    }

    /// Same dimensions over a new payload of identical shape.
    pub fn with_data<U>(&self, data: ArrayD<U>) -> Result<DimArray<U>> {
        if data.shape() != self.shape() {
            return Err(DimError::ShapeMismatch(format!(
                "payload of shape {:?} cannot replace one of shape {:?}",
                data.shape(),
                self.shape()
            )));
        }
        Ok(self.rebuild(data, self.dims.clone()))
    }

    /// Rewraps a payload computed from this array, carrying over refdims,
    /// name and metadata. `dims` must already match `data`.
    pub(crate) fn rebuild<U>(&self, data: ArrayD<U>, dims: Vec<Dimension>) -> DimArray<U> {
        debug_assert_eq!(dims.len(), data.ndim());
        debug_assert!(dims.iter().zip(data.shape()).all(|(d, &n)| d.len() == n));
        DimArray {
            data,
            dims,
            refdims: self.refdims.clone(),
            name: self.name.clone(),
            metadata: self.metadata.clone(),
        }
    }

    pub(crate) fn push_refdims(mut self, dropped: impl IntoIterator<Item = Dimension>) -> Self {
        self.refdims.extend(dropped);
        self
    }

    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    pub fn refdims(&self) -> &[Dimension] {
        &self.refdims
    }

    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    pub fn into_data(self) -> ArrayD<T> {
        self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Display label: the array name, or an empty string.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn dimnum(&self, key: impl Into<DimKey>) -> Result<usize> {
        dimnum(&self.dims, &key.into())
    }

    pub fn dim(&self, key: impl Into<DimKey>) -> Result<&Dimension> {
        Ok(&self.dims[self.dimnum(key)?])
    }

    pub fn index(&self, key: impl Into<DimKey>) -> Result<&Index> {
        Ok(self.dim(key)?.index())
    }

    pub fn bounds(&self, key: impl Into<DimKey>) -> Result<Option<(f64, f64)>> {
        Ok(self.dim(key)?.bounds())
    }

    pub fn hasdim(&self, key: impl Into<DimKey>) -> bool {
        hasdim(&self.dims, &key.into())
    }
}

impl<T> Validate for DimArray<T> {
    fn validate(&self) -> ValidationResult {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if self.dims.len() != self.ndim() {
            errors.push(format!(
                "{} dimensions for an array with {} axes",
                self.dims.len(),
                self.ndim()
            ));
        }
        for (dim, &len) in self.dims.iter().zip(self.shape()) {
            _chain(validate_length(dim.name(), dim.len(), len), &mut warnings, &mut errors);
            _chain(dim.validate(), &mut warnings, &mut errors);
        }
        for dim in &self.refdims {
            if dim.len() != 1 {
                warnings.push(format!(
                    "reference dimension `{}` has length {}",
                    dim.name(),
                    dim.len()
                ));
            }
        }

        _return(warnings, errors)
    }
}

impl<T: fmt::Display> fmt::Display for DimArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape: Vec<String> = self.shape().iter().map(ToString::to_string).collect();
        match &self.name {
            Some(name) => writeln!(f, "DimArray `{}` ({})", name, shape.join("×"))?,
            None => writeln!(f, "DimArray ({})", shape.join("×"))?,
        }
        for dim in &self.dims {
            writeln!(f, "  {}", dim)?;
        }
        if !self.refdims.is_empty() {
            writeln!(f, "reference dimensions:")?;
            for dim in &self.refdims {
                writeln!(f, "  {}", dim)?;
            }
        }
        write!(f, "{}", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DimTag, Mode,
        test_utils::{regular_dim, xy_array},
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_formats_auto_modes() {
        let a = DimArray::from_shape_vec(
            vec![Dimension::new(DimTag::X, vec![1.0, 2.0, 4.0])],
            vec![0, 1, 2],
        )
        .unwrap();
        assert!(!a.dims()[0].mode().is_auto());
        assert!(matches!(a.dims()[0].mode(), Mode::Sampled { .. }));
    }

    #[test]
    fn test_new_rejects_wrong_lengths() {
        let data = ArrayD::<f64>::zeros(IxDyn(&[2, 2]));
        let result = DimArray::new(
            data,
            vec![
                regular_dim(DimTag::X, 0.0, 1.0, 2),
                regular_dim(DimTag::Y, 0.0, 1.0, 3),
            ],
        );
        assert!(matches!(result, Err(DimError::ShapeMismatch(_))));
    }

    #[test]
    fn test_from_shape_vec_reports_bad_payload() {
        let result = DimArray::from_shape_vec(vec![Dimension::with_len(DimTag::X, 3)], vec![1, 2]);
        assert!(matches!(result, Err(DimError::Shape(_))));
    }

    #[test]
    fn test_queries_by_identity() {
        let a = xy_array();
        assert_eq!(a.dimnum(DimTag::Y).unwrap(), 1);
        assert_eq!(a.dim("X").unwrap().len(), 2);
        assert_eq!(a.index(DimTag::Y).unwrap(), &Index::range(100.0, 100.0, 3));
        assert_eq!(a.bounds(DimTag::X).unwrap(), Some((10.0, 20.0)));
        assert!(a.hasdim(DimTag::X));
        assert!(!a.hasdim(DimTag::Z));
    }

    #[test]
    fn test_missing_dimension_names_available() {
        let err = xy_array().dim(DimTag::Z).unwrap_err();
        assert!(matches!(err, DimError::DimensionNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "dimension `Z` not found, available dimensions: [X, Y]"
        );
    }

    #[test]
    fn test_with_data_checks_shape() {
        let a = xy_array();
        let b = a.with_data(a.data().mapv(|v| v > 3.0)).unwrap();
        assert_eq!(b.dims(), a.dims());
        assert!(a.with_data(ArrayD::<f64>::zeros(IxDyn(&[3, 2]))).is_err());
    }

    #[test]
    fn test_validate_and_display() {
        let a = xy_array().with_name("temperature");
        assert_eq!(a.validate(), ValidationResult::Valid(()));
        let text = a.to_string();
        assert!(text.starts_with("DimArray `temperature` (2×3)\n  X (2): [10, 20]"), "{}", text);
        assert_eq!(a.label(), "temperature");
    }
}
