//! Reductions over named axes.
//!
//! Reduced axes are not dropped: each stays in `dims` with length 1, and its
//! dimension is collapsed with [`Dimension::reduced`] so the remaining
//! coordinate still describes the extent that was reduced over.

use log::trace;
use ndarray::{ArrayD, ArrayViewD, Ix2, IxDyn};
use num_traits::{Float, FromPrimitive};

use super::DimArray;
use crate::{
    dimension::{DimKey, Dimension, dimnums},
    errors::Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    Sum,
    Prod,
    Mean,
    Max,
    Min,
    /// Population variance.
    Var,
    /// Population standard deviation.
    Std,
}

impl Reduction {
    pub fn apply<T: Float + FromPrimitive>(self, values: &ArrayViewD<'_, T>) -> T {
        match self {
            Reduction::Sum => values.sum(),
            Reduction::Prod => values.product(),
            Reduction::Mean => values.mean().unwrap_or_else(T::nan),
            Reduction::Max => values.iter().copied().fold(T::neg_infinity(), T::max),
            Reduction::Min => values.iter().copied().fold(T::infinity(), T::min),
            Reduction::Var => values.var(T::zero()),
            Reduction::Std => values.std(T::zero()),
        }
    }
}

impl<T: Clone> DimArray<T> {
    /// Applies `f` to every slice spanning the axes in `keys`.
    ///
    /// The spanned axes collapse to length 1 exactly as in a reduction; `f`
    /// sees each slice with those axes in the order requested.
    pub fn map_slices<K, U, F>(
        &self,
        keys: impl IntoIterator<Item = K>,
        mut f: F,
    ) -> Result<DimArray<U>>
    where
        K: Into<DimKey>,
        F: FnMut(ArrayViewD<'_, T>) -> U,
    {
        let keys: Vec<DimKey> = keys.into_iter().map(Into::into).collect();
        let axes = dimnums(&self.dims, &keys)?;
        let kept: Vec<usize> = (0..self.ndim()).filter(|axis| !axes.contains(axis)).collect();

        let shape = self.shape();
        let inner_shape: Vec<usize> = axes.iter().map(|&axis| shape[axis]).collect();
        let outer: usize = kept.iter().map(|&axis| shape[axis]).product();
        let inner: usize = inner_shape.iter().product();
        trace!("mapping {} slices of {:?} over axes {:?}", outer, inner_shape, axes);

        let order: Vec<usize> = kept.iter().chain(&axes).copied().collect();
        let permuted = self.data.view().permuted_axes(IxDyn(&order));
        let standard = permuted.as_standard_layout();
        let lanes = standard.view().into_shape(Ix2(outer, inner))?;

        let mut values = Vec::with_capacity(outer);
        for lane in lanes.outer_iter() {
            values.push(f(lane.into_shape(IxDyn(&inner_shape))?));
        }

        let reduced_shape: Vec<usize> = (0..self.ndim())
            .map(|axis| if axes.contains(&axis) { 1 } else { shape[axis] })
            .collect();
        let data = ArrayD::from_shape_vec(IxDyn(&reduced_shape), values)?;
        let dims: Vec<Dimension> = self
            .dims
            .iter()
            .enumerate()
            .map(|(axis, dim)| {
                if axes.contains(&axis) {
                    dim.reduced()
                } else {
                    dim.clone()
                }
            })
            .collect();
        Ok(self.rebuild(data, dims))
    }
}

impl<T: Float + FromPrimitive> DimArray<T> {
    /// Reduces the named axes to length 1 with `reduction`.
    pub fn reduce<K: Into<DimKey>>(
        &self,
        keys: impl IntoIterator<Item = K>,
        reduction: Reduction,
    ) -> Result<Self> {
        self.map_slices(keys, |slice| reduction.apply(&slice))
    }

    /// Sum of every element.
    pub fn sum(&self) -> T {
        self.data.sum()
    }

    /// Mean of every element, `None` when the array is empty.
    pub fn mean(&self) -> Option<T> {
        self.data.mean()
    }
}
