//! Matrix products of two-dimensional arrays, via `nalgebra`.

use nalgebra::{DMatrix, RealField};
use ndarray::{ArrayD, IxDyn};

use super::DimArray;
use crate::errors::{DimError, Result};

impl<T: RealField + Copy> DimArray<T> {
    /// Copies the payload into a dense `nalgebra` matrix.
    pub fn to_matrix(&self) -> Result<DMatrix<T>> {
        self.check_matrix("to_matrix")?;
        let (rows, cols) = (self.shape()[0], self.shape()[1]);
        Ok(DMatrix::from_fn(rows, cols, |i, j| self.data[[i, j]]))
    }

    /// `(A, B) × (B, C) → (A, C)`.
    ///
    /// The inner dimensions must be the same dimension (identity, length and
    /// index). The result keeps this array's name, metadata and refdims.
    pub fn matmul(&self, other: &DimArray<T>) -> Result<Self> {
        self.check_matrix("matmul")?;
        other.check_matrix("matmul")?;

        let (ours, theirs) = (&self.dims[1], &other.dims[0]);
        if ours.tag() != theirs.tag() || ours.len() != theirs.len() || ours.index() != theirs.index()
        {
            return Err(DimError::DimensionMismatch(format!(
                "inner dimensions `{}` ({}) and `{}` ({}) differ",
                ours.name(),
                ours.len(),
                theirs.name(),
                theirs.len()
            )));
        }
        let (rows, cols) = (&self.dims[0], &other.dims[1]);
        if rows.tag() == cols.tag() {
            return Err(DimError::DimensionMismatch(format!(
                "the product would carry `{}` twice",
                rows.name()
            )));
        }

        let product = self.to_matrix()? * other.to_matrix()?;
        let data = ArrayD::from_shape_fn(IxDyn(&[product.nrows(), product.ncols()]), |idx| {
            product[(idx[0], idx[1])]
        });
        Ok(self.rebuild(data, vec![rows.clone(), cols.clone()]))
    }
}
