//! Elementwise operations that respect dimension identity.
//!
//! [`dimwise`] lines two arrays up by dimension tag rather than by axis
//! position, broadcasting the one whose dimensions are a subset of the
//! other's. [`DimArray::zip_with`] is the strict variant that needs both
//! arrays to carry identical dimensions.

use std::ops::{Add, Div, Mul, Neg, Sub};

use itertools::Itertools;
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Zip};

use super::DimArray;
use crate::{
    dimension::{DimKey, Dimension, Index, dimnum, format_dim},
    errors::{DimError, Result},
};

/// Checks that two dimension lists agree in identity, length and index,
/// axis by axis.
pub fn comparedims(a: &[Dimension], b: &[Dimension]) -> Result<()> {
    if a.len() != b.len() {
        return Err(DimError::DimensionMismatch(format!(
            "{} dimensions against {}",
            a.len(),
            b.len()
        )));
    }
    for (ours, theirs) in a.iter().zip(b) {
        if ours.tag() != theirs.tag() {
            return Err(DimError::DimensionMismatch(format!(
                "`{}` against `{}`",
                ours.name(),
                theirs.name()
            )));
        }
        if ours.len() != theirs.len() {
            return Err(DimError::ShapeMismatch(format!(
                "`{}` has length {} in one array and {} in the other",
                ours.name(),
                ours.len(),
                theirs.len()
            )));
        }
        if ours.index() != theirs.index() {
            return Err(DimError::DimensionMismatch(format!(
                "indices of `{}` differ",
                ours.name()
            )));
        }
    }
    Ok(())
}

/// Applies `f` elementwise, matching axes by dimension identity.
///
/// The dimensions of one array must be a subset of the other's, in any
/// order; the smaller array is broadcast across the dimensions it lacks and
/// the result carries the larger array's dimensions.
pub fn dimwise<T, U, V, F>(a: &DimArray<T>, b: &DimArray<U>, mut f: F) -> Result<DimArray<V>>
where
    F: FnMut(&T, &U) -> V,
{
    if covers(a.dims(), b.dims()) {
        let aligned = align(b, a.dims())?;
        let aligned = broadcast_to(&aligned, a.shape())?;
        let data = Zip::from(&a.data).and(&aligned).map_collect(|x, y| f(x, y));
        Ok(a.rebuild(data, a.dims.clone()))
    } else if covers(b.dims(), a.dims()) {
        let aligned = align(a, b.dims())?;
        let aligned = broadcast_to(&aligned, b.shape())?;
        let data = Zip::from(&aligned).and(&b.data).map_collect(|x, y| f(x, y));
        Ok(b.rebuild(data, b.dims.clone()))
    } else {
        Err(DimError::DimensionMismatch(format!(
            "neither of [{}] and [{}] contains the other",
            a.dims().iter().map(Dimension::name).join(", "),
            b.dims().iter().map(Dimension::name).join(", ")
        )))
    }
}

fn covers(big: &[Dimension], small: &[Dimension]) -> bool {
    small
        .iter()
        .all(|dim| dimnum(big, &DimKey::from(dim)).is_ok())
}

/// View of `small` with its axes in the order of `big`, and length-1 axes
/// where `big` has dimensions `small` lacks.
fn align<'a, S>(small: &'a DimArray<S>, big: &[Dimension]) -> Result<ArrayViewD<'a, S>> {
    let mut order = Vec::with_capacity(small.ndim());
    let mut missing = Vec::new();
    for (axis, dim) in big.iter().enumerate() {
        match dimnum(small.dims(), &DimKey::from(dim)) {
            Ok(small_axis) => {
                let theirs = &small.dims()[small_axis];
                if theirs.len() != dim.len() {
                    return Err(DimError::ShapeMismatch(format!(
                        "`{}` has length {} in one array and {} in the other",
                        dim.name(),
                        dim.len(),
                        theirs.len()
                    )));
                }
                if theirs.index() != dim.index() {
                    return Err(DimError::DimensionMismatch(format!(
                        "indices of `{}` differ",
                        dim.name()
                    )));
                }
                order.push(small_axis);
            }
            Err(_) => missing.push(axis),
        }
    }
    let mut view = small.data.view().permuted_axes(IxDyn(&order));
    for axis in missing {
        view = view.insert_axis(Axis(axis));
    }
    Ok(view)
}

fn broadcast_to<'a, S>(view: &'a ArrayViewD<'_, S>, shape: &[usize]) -> Result<ArrayViewD<'a, S>> {
    view.broadcast(IxDyn(shape)).ok_or_else(|| {
        DimError::ShapeMismatch(format!(
            "cannot broadcast shape {:?} to {:?}",
            view.shape(),
            shape
        ))
    })
}

impl<T> DimArray<T> {
    /// Applies `f` to every element, keeping the dimensions.
    pub fn map<U, F>(&self, f: F) -> DimArray<U>
    where
        F: FnMut(&T) -> U,
    {
        self.rebuild(self.data.map(f), self.dims.clone())
    }

    /// Combines two arrays with identical dimensions elementwise.
    pub fn zip_with<U, V, F>(&self, other: &DimArray<U>, mut f: F) -> Result<DimArray<V>>
    where
        F: FnMut(&T, &U) -> V,
    {
        comparedims(self.dims(), other.dims())?;
        let data = Zip::from(&self.data)
            .and(&other.data)
            .map_collect(|x, y| f(x, y));
        Ok(self.rebuild(data, self.dims.clone()))
    }
}

impl<T: Clone> DimArray<T> {
    /// Replaces the payload with `f(payload)`, which must keep its shape.
    pub fn modify<U, F>(&self, f: F) -> Result<DimArray<U>>
    where
        F: FnOnce(ArrayD<T>) -> ArrayD<U>,
    {
        let data = f(self.data.clone());
        if data.shape() != self.shape() {
            return Err(DimError::ShapeMismatch(format!(
                "modify changed the shape from {:?} to {:?}",
                self.shape(),
                data.shape()
            )));
        }
        Ok(self.rebuild(data, self.dims.clone()))
    }

    /// Replaces the index of one dimension with `f(index)`, which must keep
    /// its length. Order and span are brought back in line with the new
    /// index.
    pub fn modify_dim<F>(&self, key: impl Into<DimKey>, f: F) -> Result<Self>
    where
        F: FnOnce(&Index) -> Index,
    {
        let axis = self.dimnum(key)?;
        let dim = &self.dims[axis];
        let index = f(dim.index());
        if index.len() != dim.len() {
            return Err(DimError::ShapeMismatch(format!(
                "new index of `{}` has length {}, expected {}",
                dim.name(),
                index.len(),
                dim.len()
            )));
        }
        let mut dims = self.dims.clone();
        dims[axis] = format_dim(&dim.reindexed(index))?;
        Ok(self.rebuild(self.data.clone(), dims))
    }
}

macro_rules! scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T> $trait<T> for DimArray<T>
        where
            T: Clone + $trait<Output = T>,
        {
            type Output = DimArray<T>;

            fn $method(self, rhs: T) -> Self::Output {
                let DimArray {
                    data,
                    dims,
                    refdims,
                    name,
                    metadata,
                } = self;
                DimArray {
                    data: data.mapv_into(|v| v $op rhs.clone()),
                    dims,
                    refdims,
                    name,
                    metadata,
                }
            }
        }

        impl<T> $trait<T> for &DimArray<T>
        where
            T: Clone + $trait<Output = T>,
        {
            type Output = DimArray<T>;

            fn $method(self, rhs: T) -> Self::Output {
                self.map(|v| v.clone() $op rhs.clone())
            }
        }
    };
}

scalar_op!(Add, add, +);
scalar_op!(Sub, sub, -);
scalar_op!(Mul, mul, *);
scalar_op!(Div, div, /);

impl<T> Neg for DimArray<T>
where
    T: Clone + Neg<Output = T>,
{
    type Output = DimArray<T>;

    fn neg(self) -> Self::Output {
        self.map(|v| -v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DimTag, Order, Span,
        test_utils::{regular_dim, xy_array},
    };
    use ndarray::array;
    use pretty_assertions::assert_eq;

    fn y_only() -> DimArray<f64> {
        DimArray::from_shape_vec(
            vec![regular_dim(DimTag::Y, 100.0, 100.0, 3)],
            vec![10.0, 20.0, 30.0],
        )
        .unwrap()
    }

    #[test]
    fn test_dimwise_broadcasts_the_smaller_array() {
        let a = xy_array();
        let c = dimwise(&a, &y_only(), |x, y| x + y).unwrap();
        assert_eq!(
            c.data(),
            &array![[11.0, 22.0, 33.0], [14.0, 25.0, 36.0]].into_dyn()
        );
        assert_eq!(c.dims(), a.dims());

        let d = dimwise(&y_only(), &a, |y, x| y - x).unwrap();
        assert_eq!(d.data()[[1, 2]], 24.0);
    }

    #[test]
    fn test_dimwise_matches_by_identity_not_position() {
        let a = xy_array();
        let t = a.transpose();
        let c = dimwise(&a, &t, |x, y| x * y).unwrap();
        assert_eq!(c.data(), &a.data().mapv(|v| v * v));
    }

    #[test]
    fn test_dimwise_rejects_disjoint_and_mismatched() {
        let a = xy_array();
        let z = DimArray::from_shape_vec(vec![Dimension::with_len(DimTag::Z, 2)], vec![1.0, 2.0])
            .unwrap();
        assert!(matches!(
            dimwise(&a, &z, |x, y| x + y),
            Err(DimError::DimensionMismatch(_))
        ));

        let short = DimArray::from_shape_vec(
            vec![regular_dim(DimTag::Y, 100.0, 100.0, 2)],
            vec![1.0, 2.0],
        )
        .unwrap();
        assert!(matches!(
            dimwise(&a, &short, |x, y| x + y),
            Err(DimError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_zip_with_requires_identical_dims() {
        let a = xy_array();
        let doubled = a.zip_with(&a, |x, y| x + y).unwrap();
        assert_eq!(doubled.data(), &(a.data() * 2.0));
        assert!(a.zip_with(&a.transpose(), |x, y| x + y).is_err());
    }

    #[test]
    fn test_scalar_operators() {
        let a = xy_array();
        assert_eq!((&a + 1.0).data()[[0, 0]], 2.0);
        assert_eq!((&a * 2.0).data()[[1, 2]], 12.0);
        assert_eq!((a.clone() - 1.0).data()[[0, 1]], 1.0);
        assert_eq!((a.clone() / 2.0).data()[[1, 1]], 2.5);
        assert_eq!((-a.clone()).data()[[0, 0]], -1.0);
        assert_eq!((a.clone() + 1.0).dims(), a.dims());
    }

    #[test]
    fn test_modify_keeps_shape() {
        let a = xy_array();
        let b = a.modify(|data| data.mapv(|v| v as i64)).unwrap();
        assert_eq!(b.data()[[1, 0]], 4);
        assert!(matches!(
            a.modify(|data| data.t().to_owned()),
            Err(DimError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_modify_dim_resyncs_mode() {
        let a = xy_array();
        let b = a
            .modify_dim(DimTag::X, |index| {
                Index::Points(index.to_points().unwrap_or_default().iter().map(|v| -v).collect())
            })
            .unwrap();
        let x = b.dim(DimTag::X).unwrap();
        assert_eq!(x.index(), &Index::Points(vec![-10.0, -20.0]));
        assert_eq!(x.order(), Some(Order::reverse_index()));
        assert_eq!(x.mode().span(), Some(Span::Irregular(-20.0, -10.0)));

        assert!(matches!(
            a.modify_dim(DimTag::X, |_| Index::range(0.0, 1.0, 5)),
            Err(DimError::ShapeMismatch(_))
        ));
    }
}
