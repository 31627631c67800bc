//! Reversal, reordering, permutation and quarter-turn rotation.
//!
//! Reversing an axis always reverses the payload and the stored index
//! together, so every value keeps its coordinate; only the order bookkeeping
//! of the dimension records which component was flipped.

use ndarray::{Axis, IxDyn};

use super::DimArray;
use crate::{
    dimension::{DimKey, Direction, OrderTarget, dimnums},
    errors::{DimError, Result},
};

/// Target direction for one order component of a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reorder {
    IndexOrder(Direction),
    ArrayOrder(Direction),
    Relation(Direction),
}

impl Reorder {
    pub fn target(self) -> OrderTarget {
        match self {
            Reorder::IndexOrder(_) => OrderTarget::IndexOrder,
            Reorder::ArrayOrder(_) => OrderTarget::ArrayOrder,
            Reorder::Relation(_) => OrderTarget::Relation,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Reorder::IndexOrder(direction)
            | Reorder::ArrayOrder(direction)
            | Reorder::Relation(direction) => direction,
        }
    }
}

impl<T: Clone> DimArray<T> {
    /// Reverses one axis, flipping `target` in its order.
    pub fn reverse(&self, target: OrderTarget, key: impl Into<DimKey>) -> Result<Self> {
        let axis = self.dimnum(key)?;
        Ok(self.reverse_axes(&[axis], target))
    }

    /// Reverses several axes at once.
    pub fn reverse_dims<K: Into<DimKey>>(
        &self,
        target: OrderTarget,
        keys: impl IntoIterator<Item = K>,
    ) -> Result<Self> {
        let keys: Vec<DimKey> = keys.into_iter().map(Into::into).collect();
        let axes = dimnums(&self.dims, &keys)?;
        Ok(self.reverse_axes(&axes, target))
    }

    /// Brings the named order components to the requested directions.
    ///
    /// Each dimension is reversed at most once, and only when the component
    /// differs from its target. Unordered dimensions and dimensions not named
    /// are left alone.
    pub fn reorder<K: Into<DimKey>>(
        &self,
        pairs: impl IntoIterator<Item = (K, Reorder)>,
    ) -> Result<Self> {
        let mut result = self.clone();
        let mut seen = Vec::new();
        for (key, reorder) in pairs {
            let axis = self.dimnum(key)?;
            if seen.contains(&axis) {
                return Err(DimError::DuplicateDimension(
                    self.dims[axis].name().to_string(),
                ));
            }
            seen.push(axis);

            let current = self.dims[axis]
                .order()
                .and_then(|order| order.component(reorder.target()));
            if current.is_some_and(|direction| direction != reorder.direction()) {
                result = result.reverse_axes(&[axis], reorder.target());
            }
        }
        Ok(result)
    }

    pub(crate) fn reverse_axes(&self, axes: &[usize], target: OrderTarget) -> Self {
        let mut data = self.data.clone();
        let mut dims = self.dims.clone();
        for &axis in axes {
            data.invert_axis(Axis(axis));
            dims[axis] = dims[axis].reverse(target);
        }
        self.rebuild(data, dims)
    }

    /// Reorders the axes to the order of `keys`, which must name every axis.
    pub fn permute<K: Into<DimKey>>(&self, keys: impl IntoIterator<Item = K>) -> Result<Self> {
        let keys: Vec<DimKey> = keys.into_iter().map(Into::into).collect();
        let axes = dimnums(&self.dims, &keys)?;
        if axes.len() != self.ndim() {
            return Err(DimError::DimensionMismatch(format!(
                "permutation names {} of {} dimensions",
                axes.len(),
                self.ndim()
            )));
        }
        let data = self.data.clone().permuted_axes(IxDyn(&axes));
        let dims = axes.iter().map(|&axis| self.dims[axis].clone()).collect();
        Ok(self.rebuild(data, dims))
    }

    /// Reverses the order of all axes.
    pub fn transpose(&self) -> Self {
        let data = self.data.clone().reversed_axes();
        let dims = self.dims.iter().rev().cloned().collect();
        self.rebuild(data, dims)
    }

    /// Rotates a matrix counter-clockwise by `k` quarter turns.
    ///
    /// Negative `k` turns clockwise. Rotation is a transpose followed by an
    /// `ArrayOrder` reversal, so the index of each axis keeps pairing with
    /// the same values.
    pub fn rotl90(&self, k: i32) -> Result<Self> {
        self.check_matrix("rotl90")?;
        Ok(match k.rem_euclid(4) {
            0 => self.clone(),
            1 => self.transpose().reverse_axes(&[0], OrderTarget::ArrayOrder),
            2 => self.reverse_axes(&[0, 1], OrderTarget::ArrayOrder),
            _ => self.transpose().reverse_axes(&[1], OrderTarget::ArrayOrder),
        })
    }

    /// Rotates a matrix clockwise by `k` quarter turns.
    pub fn rotr90(&self, k: i32) -> Result<Self> {
        self.check_matrix("rotr90")?;
        self.rotl90(-(k.rem_euclid(4)))
    }

    pub fn rot180(&self) -> Result<Self> {
        self.check_matrix("rot180")?;
        self.rotl90(2)
    }

    pub(crate) fn check_matrix(&self, op: &'static str) -> Result<()> {
        if self.ndim() == 2 {
            Ok(())
        } else {
            Err(DimError::NotTwoDimensional {
                op,
                ndim: self.ndim(),
            })
        }
    }
}
