//! Selecting and dropping axes.

use itertools::{Either, Itertools};
use ndarray::{Axis, Slice};

use super::DimArray;
use crate::{
    dimension::{DimKey, Dimension, dimnums},
    errors::{DimError, Result},
    selectors::{Indexer, Resolved},
};

impl<T: Clone> DimArray<T> {
    /// Subsets the array along the named axes.
    ///
    /// Each `(key, indexer)` pair is resolved against its own dimension.
    /// Ranges and position lists keep the axis; a single position drops it and
    /// moves the length-1 dimension into [`refdims`](Self::refdims). Axes not
    /// named are kept whole.
    pub fn select<I, K, J>(&self, indexers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, J)>,
        K: Into<DimKey>,
        J: Into<Indexer>,
    {
        let mut picks: Vec<Option<Resolved>> = vec![None; self.ndim()];
        for (key, indexer) in indexers {
            let axis = self.dimnum(key)?;
            if picks[axis].is_some() {
                return Err(DimError::DuplicateDimension(
                    self.dims[axis].name().to_string(),
                ));
            }
            picks[axis] = Some(indexer.into().resolve(&self.dims[axis])?);
        }

        let mut view = self.data.view();
        for (axis, pick) in picks.iter().enumerate() {
            match pick {
                Some(Resolved::Single(i)) => {
                    view.slice_axis_inplace(Axis(axis), Slice::from(*i..*i + 1))
                }
                Some(Resolved::Range(range)) => {
                    view.slice_axis_inplace(Axis(axis), Slice::from(range.clone()))
                }
                _ => {}
            }
        }
        let mut data = view.to_owned();
        for (axis, pick) in picks.iter().enumerate() {
            if let Some(Resolved::Positions(positions)) = pick {
                data = data.select(Axis(axis), positions);
            }
        }
        for axis in (0..self.ndim()).rev() {
            if picks[axis].as_ref().is_some_and(Resolved::drops_axis) {
                data = data.index_axis_move(Axis(axis), 0);
            }
        }

        let mut dims = Vec::with_capacity(self.ndim());
        let mut dropped = Vec::new();
        for (dim, pick) in self.dims.iter().zip(&picks) {
            match pick {
                None => dims.push(dim.clone()),
                Some(resolved) if resolved.drops_axis() => dropped.push(dim.subset(resolved)),
                Some(resolved) => dims.push(dim.subset(resolved)),
            }
        }
        Ok(self.rebuild(data, dims).push_refdims(dropped))
    }

    /// The single element left once every axis is pinned to one position.
    pub fn get<I, K, J>(&self, indexers: I) -> Result<T>
    where
        I: IntoIterator<Item = (K, J)>,
        K: Into<DimKey>,
        J: Into<Indexer>,
    {
        let selected = self.select(indexers)?;
        if selected.ndim() != 0 {
            return Err(DimError::ShapeMismatch(format!(
                "`get` needs every axis pinned to one position, {} remain",
                selected.ndim()
            )));
        }
        selected.data.iter().next().cloned().ok_or_else(|| {
            DimError::ShapeMismatch("`get` found no element to return".to_string())
        })
    }

    /// Removes length-1 axes, keeping their dimensions as reference
    /// dimensions.
    pub fn dropdims<K: Into<DimKey>>(&self, keys: impl IntoIterator<Item = K>) -> Result<Self> {
        let keys: Vec<DimKey> = keys.into_iter().map(Into::into).collect();
        let mut axes = dimnums(&self.dims, &keys)?;
        for &axis in &axes {
            let dim = &self.dims[axis];
            if dim.len() != 1 {
                return Err(DimError::ShapeMismatch(format!(
                    "cannot drop dimension `{}` of length {}",
                    dim.name(),
                    dim.len()
                )));
            }
        }
        axes.sort_unstable();

        let mut data = self.data.clone();
        for &axis in axes.iter().rev() {
            data = data.index_axis_move(Axis(axis), 0);
        }
        let (dropped, dims): (Vec<Dimension>, Vec<Dimension>) =
            self.dims.iter().enumerate().partition_map(|(axis, dim)| {
                if axes.contains(&axis) {
                    Either::Left(dim.clone())
                } else {
                    Either::Right(dim.clone())
                }
            });
        Ok(self.rebuild(data, dims).push_refdims(dropped))
    }
}
