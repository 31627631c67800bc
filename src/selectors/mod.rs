//! # Selectors
//!
//! Selectors pick array positions by coordinate value rather than by number.
//! Each one is resolved against a single [`Dimension`] into a [`Resolved`]
//! position set, which the array layer then applies to both the payload and
//! the dimension itself.
//!
//! | selector          | resolves to | needs                          |
//! |-------------------|-------------|--------------------------------|
//! | `At(v)`           | one         | any index                      |
//! | `Near(x)`         | one         | ordered numeric index          |
//! | `Contains(x)`     | one         | ordered numeric index          |
//! | `Between(lo, hi)` | a range     | ordered numeric index          |
//! | `Many([..])`      | positions   | whatever each part needs       |
//!
//! `NoIndex` and unresolved `Auto` dimensions reject every selector.

pub mod search;

use std::{fmt, ops::Range};

use log::trace;

use crate::{
    core::Coord,
    dimension::{Dimension, Mode, Order, Sampling},
    errors::{DimError, Result},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Exact coordinate match, optionally within an absolute tolerance.
    At { value: Coord, atol: Option<f64> },
    /// Closest coordinate.
    Near(f64),
    /// Interval containing the value.
    Contains(f64),
    /// Inclusive coordinate range.
    Between(f64, f64),
    /// Several selectors, results concatenated in order.
    ///
    /// The picked positions are arbitrary, so a `Regular` span becomes
    /// `Irregular`. On interval sampling each kept cell then reaches to its
    /// kept neighbour and covers any dropped cells in between.
    Many(Vec<Selector>),
}

impl Selector {
    pub fn at(value: impl Into<Coord>) -> Self {
        Selector::At {
            value: value.into(),
            atol: None,
        }
    }

    pub fn at_within(value: impl Into<Coord>, atol: f64) -> Self {
        Selector::At {
            value: value.into(),
            atol: Some(atol),
        }
    }

    pub fn near(x: f64) -> Self {
        Selector::Near(x)
    }

    pub fn contains(x: f64) -> Self {
        Selector::Contains(x)
    }

    pub fn between(lo: f64, hi: f64) -> Self {
        Selector::Between(lo, hi)
    }

    pub fn many(selectors: impl IntoIterator<Item = Selector>) -> Self {
        Selector::Many(selectors.into_iter().collect())
    }

    /// Positions of `dim` matched by this selector.
    pub fn resolve(&self, dim: &Dimension) -> Result<Resolved> {
        let resolved = match (self, dim.mode()) {
            (Selector::Many(selectors), _) => {
                let mut positions = Vec::new();
                for selector in selectors {
                    positions.extend(selector.resolve(dim)?.positions());
                }
                Resolved::Positions(positions)
            }
            (_, Mode::NoIndex | Mode::Auto { .. }) => return Err(self.incompatible(dim)),
            (Selector::At { value, atol }, Mode::Categorical { .. } | Mode::Sampled { .. }) => {
                if value.as_label().is_some() == dim.index().is_numeric() {
                    return Err(self.incompatible(dim));
                }
                search::at(dim, value, *atol)
                    .map(Resolved::Single)
                    .ok_or_else(|| self.not_found(dim))?
            }
            (
                Selector::Near(_) | Selector::Contains(_) | Selector::Between(..),
                Mode::Categorical {
                    order: Order::Unordered,
                }
                | Mode::Sampled {
                    order: Order::Unordered,
                    ..
                },
            ) => return Err(self.incompatible(dim)),
            (_, _) if !dim.index().is_numeric() => return Err(self.incompatible(dim)),
            (Selector::Near(x), _) => search::near(dim, *x)
                .map(Resolved::Single)
                .ok_or_else(|| self.not_found(dim))?,
            (
                Selector::Contains(x),
                Mode::Sampled {
                    sampling: Sampling::Intervals(locus),
                    ..
                },
            ) => search::contains(dim, *x, *locus)
                .map(Resolved::Single)
                .ok_or_else(|| self.not_found(dim))?,
            (Selector::Contains(x), _) => search::at(dim, &Coord::Num(*x), None)
                .map(Resolved::Single)
                .ok_or_else(|| self.not_found(dim))?,
            (Selector::Between(lo, hi), _) => Resolved::Range(search::between(dim, *lo, *hi)),
        };
        trace!("{} on `{}` resolved to {:?}", self, dim.name(), resolved);
        Ok(resolved)
    }

    fn incompatible(&self, dim: &Dimension) -> DimError {
        DimError::SelectorIncompatible {
            selector: self.to_string(),
            mode: dim.mode().kind().to_string(),
            dim: dim.name().to_string(),
        }
    }

    fn not_found(&self, dim: &Dimension) -> DimError {
        DimError::SelectorNotFound {
            selector: self.to_string(),
            dim: dim.name().to_string(),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::At { value, atol: None } => write!(f, "At({})", value),
            Selector::At {
                value,
                atol: Some(atol),
            } => write!(f, "At({} ± {})", value, atol),
            Selector::Near(x) => write!(f, "Near({})", x),
            Selector::Contains(x) => write!(f, "Contains({})", x),
            Selector::Between(lo, hi) => write!(f, "Between({}, {})", lo, hi),
            Selector::Many(selectors) => {
                write!(f, "Many[")?;
                for (i, selector) in selectors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", selector)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Positions picked out of one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// One position; the axis is dropped.
    Single(usize),
    /// A contiguous run, ascending.
    Range(Range<usize>),
    /// Arbitrary positions, in the order given.
    Positions(Vec<usize>),
}

impl Resolved {
    pub fn len(&self) -> usize {
        match self {
            Resolved::Single(_) => 1,
            Resolved::Range(range) => range.len(),
            Resolved::Positions(positions) => positions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether applying this drops the axis.
    pub fn drops_axis(&self) -> bool {
        matches!(self, Resolved::Single(_))
    }

    pub fn positions(&self) -> Vec<usize> {
        match self {
            Resolved::Single(i) => vec![*i],
            Resolved::Range(range) => range.clone().collect(),
            Resolved::Positions(positions) => positions.clone(),
        }
    }
}

/// Anything that picks positions along one axis: plain integer indexing or a
/// coordinate [`Selector`].
#[derive(Debug, Clone, PartialEq)]
pub enum Indexer {
    At(usize),
    Range(Range<usize>),
    Positions(Vec<usize>),
    All,
    Select(Selector),
}

impl Indexer {
    pub fn resolve(&self, dim: &Dimension) -> Result<Resolved> {
        let len = dim.len();
        let check = |index: usize| {
            if index < len {
                Ok(index)
            } else {
                Err(DimError::IndexOutOfBounds {
                    index,
                    dim: dim.name().to_string(),
                    len,
                })
            }
        };
        match self {
            Indexer::At(i) => Ok(Resolved::Single(check(*i)?)),
            Indexer::Range(range) => {
                if range.start > range.end || range.end > len {
                    return Err(DimError::IndexOutOfBounds {
                        index: range.end.max(range.start),
                        dim: dim.name().to_string(),
                        len,
                    });
                }
                Ok(Resolved::Range(range.clone()))
            }
            Indexer::Positions(positions) => Ok(Resolved::Positions(
                positions
                    .iter()
                    .map(|&i| check(i))
                    .collect::<Result<Vec<_>>>()?,
            )),
            Indexer::All => Ok(Resolved::Range(0..len)),
            Indexer::Select(selector) => selector.resolve(dim),
        }
    }
}

impl From<usize> for Indexer {
    fn from(i: usize) -> Self {
        Indexer::At(i)
    }
}

impl From<Range<usize>> for Indexer {
    fn from(range: Range<usize>) -> Self {
        Indexer::Range(range)
    }
}

impl From<Vec<usize>> for Indexer {
    fn from(positions: Vec<usize>) -> Self {
        Indexer::Positions(positions)
    }
}

impl From<std::ops::RangeFull> for Indexer {
    fn from(_: std::ops::RangeFull) -> Self {
        Indexer::All
    }
}

impl From<Selector> for Indexer {
    fn from(selector: Selector) -> Self {
        Indexer::Select(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DimTag, Index, Locus, OrderTarget, Span,
        dimension::format_dim,
        test_utils::regular_dim,
    };
    use pretty_assertions::assert_eq;

    fn cities() -> Dimension {
        format_dim(&Dimension::new("city", vec!["Boston", "Chicago", "Denver"])).unwrap()
    }

    #[test]
    fn test_near_rounds_to_closest() {
        let dim = regular_dim(DimTag::X, 10.0, 10.0, 3);
        assert_eq!(Selector::near(12.0).resolve(&dim).unwrap(), Resolved::Single(0));
        assert_eq!(Selector::near(16.0).resolve(&dim).unwrap(), Resolved::Single(1));
    }

    #[test]
    fn test_at_label_on_categorical() {
        let dim = cities();
        assert_eq!(
            Selector::at("Chicago").resolve(&dim).unwrap(),
            Resolved::Single(1)
        );
        assert!(matches!(
            Selector::at("Austin").resolve(&dim),
            Err(DimError::SelectorNotFound { .. })
        ));
    }

    #[test]
    fn test_at_number_on_labels_is_incompatible() {
        assert!(matches!(
            Selector::at(1.0).resolve(&cities()),
            Err(DimError::SelectorIncompatible { .. })
        ));
    }

    #[test]
    fn test_range_selectors_reject_labels() {
        assert!(matches!(
            Selector::between(0.0, 1.0).resolve(&cities()),
            Err(DimError::SelectorIncompatible { .. })
        ));
    }

    #[test]
    fn test_noindex_rejects_selectors() {
        let dim = Dimension::with_len(DimTag::X, 3);
        let err = Selector::at(1.0).resolve(&dim).unwrap_err();
        match err {
            DimError::SelectorIncompatible { mode, dim, .. } => {
                assert_eq!(mode, "NoIndex");
                assert_eq!(dim, "X");
            }
            other => panic!("expected SelectorIncompatible, got {:?}", other),
        }
    }

    #[test]
    fn test_unordered_rejects_near() {
        let dim = format_dim(&Dimension::new(DimTag::X, vec![3.0, 1.0, 2.0])).unwrap();
        assert!(matches!(
            Selector::near(1.0).resolve(&dim),
            Err(DimError::SelectorIncompatible { .. })
        ));
        assert_eq!(Selector::at(1.0).resolve(&dim).unwrap(), Resolved::Single(1));
    }

    #[test]
    fn test_contains_on_points_is_exact() {
        let dim = regular_dim(DimTag::X, 10.0, 10.0, 3);
        assert_eq!(
            Selector::contains(20.0).resolve(&dim).unwrap(),
            Resolved::Single(1)
        );
        assert!(matches!(
            Selector::contains(21.0).resolve(&dim),
            Err(DimError::SelectorNotFound { .. })
        ));
    }

    #[test]
    fn test_contains_on_intervals() {
        let dim = Dimension::new(DimTag::Ti, Index::range(0.0, 10.0, 3)).with_mode(Mode::sampled(
            Order::forward(),
            Span::Regular(10.0),
            Sampling::Intervals(Locus::Start),
        ));
        assert_eq!(
            Selector::contains(15.0).resolve(&dim).unwrap(),
            Resolved::Single(1)
        );
    }

    #[test]
    fn test_between_on_reversed_index_is_ascending() {
        let dim = regular_dim(DimTag::X, 0.0, 1.0, 6).reverse(OrderTarget::IndexOrder);
        assert_eq!(
            Selector::between(1.0, 3.0).resolve(&dim).unwrap(),
            Resolved::Range(2..5)
        );
    }

    #[test]
    fn test_many_concatenates() {
        let dim = regular_dim(DimTag::X, 10.0, 10.0, 3);
        let selector = Selector::many([Selector::at(30.0), Selector::between(10.0, 20.0)]);
        assert_eq!(
            selector.resolve(&dim).unwrap(),
            Resolved::Positions(vec![2, 0, 1])
        );
    }

    #[test]
    fn test_indexer_bounds() {
        let dim = regular_dim(DimTag::X, 0.0, 1.0, 3);
        assert_eq!(Indexer::from(2usize).resolve(&dim).unwrap(), Resolved::Single(2));
        assert_eq!(Indexer::from(..).resolve(&dim).unwrap(), Resolved::Range(0..3));
        assert!(matches!(
            Indexer::from(3usize).resolve(&dim),
            Err(DimError::IndexOutOfBounds { index: 3, len: 3, .. })
        ));
        assert!(matches!(
            Indexer::from(1usize..4).resolve(&dim),
            Err(DimError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Selector::at_within(1.5, 0.1).to_string(), "At(1.5 ± 0.1)");
        assert_eq!(
            Selector::many([Selector::near(2.0), Selector::at("a")]).to_string(),
            "Many[Near(2), At(\"a\")]"
        );
    }
}
