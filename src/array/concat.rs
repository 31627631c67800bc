//! Concatenation of arrays along a shared dimension.

use log::{debug, warn};
use ndarray::Axis;

use super::DimArray;
use crate::{
    dimension::{DimKey, Dimension},
    errors::{DimError, Result},
};

/// Checks applied by [`concatenate_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcatOptions {
    /// Require the indices of all other dimensions to be identical. When
    /// off, mismatching indices are logged and the first array's are kept.
    pub check_index: bool,
}

impl Default for ConcatOptions {
    fn default() -> Self {
        ConcatOptions { check_index: true }
    }
}

/// Joins `arrays` end to end along `key` with the default checks.
pub fn concatenate<T: Clone>(
    arrays: &[&DimArray<T>],
    key: impl Into<DimKey>,
) -> Result<DimArray<T>> {
    concatenate_with(arrays, key, ConcatOptions::default())
}

/// Joins `arrays` end to end along `key`.
///
/// Every other dimension must agree in identity and length (and index,
/// unless `options` says otherwise). The joined dimension keeps a `Regular`
/// span only when all parts share a step and continue each other.
pub fn concatenate_with<T: Clone>(
    arrays: &[&DimArray<T>],
    key: impl Into<DimKey>,
    options: ConcatOptions,
) -> Result<DimArray<T>> {
    let (first, rest) = arrays
        .split_first()
        .ok_or_else(|| DimError::ShapeMismatch("nothing to concatenate".to_string()))?;
    let key = key.into();
    let axis = first.dimnum(key.clone())?;
    let name = first.dims[axis].name();

    for other in rest {
        if other.ndim() != first.ndim() {
            return Err(DimError::DimensionMismatch(format!(
                "cannot concatenate a {}-dimensional array with a {}-dimensional one",
                first.ndim(),
                other.ndim()
            )));
        }
        let other_axis = other.dimnum(key.clone())?;
        if other_axis != axis {
            return Err(DimError::DimensionMismatch(format!(
                "`{}` is axis {} in one array and axis {} in another",
                name, axis, other_axis
            )));
        }
        for (i, (ours, theirs)) in first.dims.iter().zip(other.dims()).enumerate() {
            if i != axis {
                check_shared(ours, theirs, options)?;
            }
        }
    }

    debug!("concatenating {} arrays along `{}`", arrays.len(), name);
    let views: Vec<_> = arrays.iter().map(|array| array.data.view()).collect();
    let data = ndarray::concatenate(Axis(axis), &views)?;

    let parts: Vec<&Dimension> = arrays.iter().map(|array| &array.dims[axis]).collect();
    let mut dims = first.dims.clone();
    dims[axis] = Dimension::concat(&parts)?;
    Ok(first.rebuild(data, dims))
}

fn check_shared(ours: &Dimension, theirs: &Dimension, options: ConcatOptions) -> Result<()> {
    if ours.tag() != theirs.tag() || ours.len() != theirs.len() {
        return Err(DimError::DimensionMismatch(format!(
            "`{}` of length {} does not match `{}` of length {}",
            ours.name(),
            ours.len(),
            theirs.name(),
            theirs.len()
        )));
    }
    if ours.index() != theirs.index() {
        if options.check_index {
            return Err(DimError::DimensionMismatch(format!(
                "indices of `{}` differ between the arrays",
                ours.name()
            )));
        }
        warn!(
            "indices of `{}` differ, concatenating anyway with the first array's index",
            ours.name()
        );
    }
    Ok(())
}
