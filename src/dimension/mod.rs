//! # Dimensions
//!
//! A [`Dimension`] labels one array axis: a [`DimTag`] identity, an [`Index`]
//! of coordinates aligned with the axis positions, a [`Mode`] describing how to
//! read those coordinates, and opaque metadata.
//!
//! Dimensions are immutable values. Every transformation (reversal, subsetting,
//! reduction, concatenation) builds a new `Dimension`; the `with_*` methods
//! rebuild with one field replaced.
//!
//! ```rust
//! use dimarray::{Dimension, DimTag, Index, Mode, Order, Sampling, Span};
//!
//! let x = Dimension::new(DimTag::X, Index::range(10.0, 10.0, 3))
//!     .with_mode(Mode::sampled(Order::forward(), Span::Regular(10.0), Sampling::Points));
//! assert_eq!(x.len(), 3);
//! assert_eq!(x.bounds(), Some((10.0, 30.0)));
//! ```

pub mod format;
pub mod index;
pub mod mode;
pub mod resolve;
pub mod validation;

use std::{collections::BTreeMap, fmt, ops::Range};

use log::debug;
use serde::{Deserialize, Serialize};

pub use format::{format, format_dim};
pub use index::Index;
pub use mode::{Direction, Locus, Mode, Order, OrderTarget, Sampling, Span};
pub use resolve::{DimKey, dimnum, dimnums, hasdim};

use crate::{
    core::{Coord, DimTag},
    errors::{DimError, Result},
    selectors::Resolved,
    validation_utils::_float_equals,
};

/// Opaque user metadata. Never inspected by any operation.
pub type Metadata = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    tag: DimTag,
    index: Index,
    mode: Mode,
    #[serde(default)]
    metadata: Metadata,
}

impl Dimension {
    /// A dimension whose mode is detected from the index when an array is
    /// built around it.
    pub fn new(tag: impl Into<DimTag>, index: impl Into<Index>) -> Self {
        Dimension {
            tag: tag.into(),
            index: index.into(),
            mode: Mode::auto(),
            metadata: Metadata::new(),
        }
    }

    /// A positional-only dimension of `len` elements.
    pub fn with_len(tag: impl Into<DimTag>, len: usize) -> Self {
        Dimension {
            tag: tag.into(),
            index: Index::default_for_len(len),
            mode: Mode::NoIndex,
            metadata: Metadata::new(),
        }
    }

    pub fn with_tag(&self, tag: impl Into<DimTag>) -> Self {
        Dimension {
            tag: tag.into(),
            ..self.clone()
        }
    }

    pub fn with_index(&self, index: impl Into<Index>) -> Self {
        Dimension {
            tag: self.tag.clone(),
            index: index.into(),
            mode: self.mode,
            metadata: self.metadata.clone(),
        }
    }

    pub fn with_mode(self, mode: Mode) -> Self {
        Dimension { mode, ..self }
    }

    pub fn with_metadata(self, metadata: Metadata) -> Self {
        Dimension { metadata, ..self }
    }

    pub fn tag(&self) -> &DimTag {
        &self.tag
    }

    pub fn name(&self) -> &str {
        self.tag.name()
    }

    pub fn label(&self) -> &str {
        self.tag.label()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn order(&self) -> Option<Order> {
        self.mode.order()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Coordinate at position `i`.
    pub fn val(&self, i: usize) -> Option<Coord> {
        self.index.coord(i)
    }

    /// The interval position `i` stands for, as `(low, high)`.
    ///
    /// Points sampling (and every non-sampled mode) gives a degenerate
    /// interval at the coordinate itself.
    pub fn cell(&self, i: usize) -> Option<(f64, f64)> {
        let value = self.index.value(i)?;
        let Mode::Sampled {
            order,
            span,
            sampling: Sampling::Intervals(locus),
        } = self.mode
        else {
            return Some((value, value));
        };
        match span {
            Span::Regular(step) => {
                let width = step.abs();
                Some(match locus {
                    Locus::Start => (value, value + width),
                    Locus::Center => (value - width / 2.0, value + width / 2.0),
                    Locus::End => (value - width, value),
                })
            }
            Span::Irregular(min, max) => {
                let previous = i.checked_sub(1).and_then(|j| self.index.value(j));
                let next = self.index.value(i + 1);
                let (below, above) = match order.stored_direction() {
                    Some(Direction::Reverse) => (next, previous),
                    _ => (previous, next),
                };
                Some(match locus {
                    Locus::Start => (value, above.unwrap_or(max)),
                    Locus::End => (below.unwrap_or(min), value),
                    Locus::Center => (
                        below.map_or(min, |b| (b + value) / 2.0),
                        above.map_or(max, |a| (a + value) / 2.0),
                    ),
                })
            }
        }
    }

    /// `(min, max)` extent of the dimension, counting whole intervals under
    /// interval sampling. `None` for label indices and empty dimensions.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.is_empty() || !self.index.is_numeric() {
            return None;
        }
        match self.mode {
            Mode::Sampled {
                span: Span::Irregular(min, max),
                ..
            } => Some((min, max)),
            Mode::Sampled {
                sampling: Sampling::Intervals(_),
                ..
            } => self.extent_of(0..self.len()),
            _ => self.index.extrema(),
        }
    }

    /// Union of the cells at `positions`.
    fn extent_of(&self, positions: impl IntoIterator<Item = usize>) -> Option<(f64, f64)> {
        positions
            .into_iter()
            .filter_map(|i| self.cell(i))
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Rebuilds with a new index, bringing order and span back in line with
    /// it.
    ///
    /// A range keeps a `Regular` span; explicit points get `Irregular`
    /// bounds around their extrema, keeping any margin the old bounds had
    /// beyond the old extrema. The order is re-detected from the new values.
    pub fn reindexed(&self, index: Index) -> Self {
        let mode = match self.mode {
            Mode::Sampled {
                order,
                span,
                sampling,
            } => {
                let order = order_after_subset(&index, order);
                let span = match (&index, order.is_ordered()) {
                    (Index::Range { step, .. }, true) => Span::Regular(*step),
                    _ => {
                        let (lo, hi) = index.extrema().unwrap_or((f64::NAN, f64::NAN));
                        let (below, above) = match (span, self.index.extrema()) {
                            (Span::Irregular(min, max), Some((old_lo, old_hi))) => {
                                (old_lo - min, max - old_hi)
                            }
                            _ => (0.0, 0.0),
                        };
                        Span::Irregular(lo - below, hi + above)
                    }
                };
                Mode::sampled(order, span, sampling)
            }
            Mode::Categorical { order } => Mode::categorical(order_after_subset(&index, order)),
            other => other,
        };
        self.with_index(index).with_mode(mode)
    }

    /// Stores the index back to front, flipping `target` in the order.
    pub fn reverse(&self, target: OrderTarget) -> Self {
        Dimension {
            tag: self.tag.clone(),
            index: self.index.reversed(),
            mode: self.mode.reversed(target),
            metadata: self.metadata.clone(),
        }
    }

    /// The dimension restricted to resolved positions.
    pub fn subset(&self, resolved: &Resolved) -> Self {
        match resolved {
            Resolved::Single(i) => self.subset_range(*i..*i + 1),
            Resolved::Range(range) => self.subset_range(range.clone()),
            Resolved::Positions(positions) => self.subset_positions(positions),
        }
    }

    fn subset_range(&self, range: Range<usize>) -> Self {
        let mode = match self.mode {
            Mode::Sampled {
                order,
                span: Span::Irregular(min, max),
                sampling,
            } => {
                let (min, max) = self.extent_of(range.clone()).unwrap_or((min, max));
                Mode::sampled(order, Span::Irregular(min, max), sampling)
            }
            other => other,
        };
        self.with_index(self.index.slice(range)).with_mode(mode)
    }

    /// Explicit positions always give an `Irregular` span over the union of
    /// the picked cells. Interval cells are rebuilt from the kept
    /// neighbours afterwards, so gaps left by dropped positions are absorbed
    /// by the cell before (or after, for `End`) them.
    fn subset_positions(&self, positions: &[usize]) -> Self {
        let index = self.index.take(positions);
        let mode = match self.mode {
            Mode::Sampled {
                order,
                span,
                sampling,
            } => {
                if span.is_regular() {
                    debug!(
                        "dimension `{}`: regular span becomes irregular after selecting {} explicit positions",
                        self.name(),
                        positions.len()
                    );
                }
                let (min, max) = match span {
                    Span::Irregular(min, max) => (min, max),
                    Span::Regular(_) => (f64::NAN, f64::NAN),
                };
                let (min, max) = self
                    .extent_of(positions.iter().copied())
                    .unwrap_or((min, max));
                Mode::sampled(
                    order_after_subset(&index, order),
                    Span::Irregular(min, max),
                    sampling,
                )
            }
            Mode::Categorical { order } => Mode::categorical(order_after_subset(&index, order)),
            other => other,
        };
        self.with_index(index).with_mode(mode)
    }

    /// Length-1 dimension standing in for this one after a reduction.
    ///
    /// Numeric indices collapse to the midpoint of [`bounds`](Self::bounds);
    /// regular intervals keep a regular span wide enough to cover the
    /// original extent, everything else records it as irregular bounds.
    /// Label indices keep their first label.
    pub fn reduced(&self) -> Self {
        if let Index::Labels(labels) = &self.index {
            let first = labels.first().cloned().unwrap_or_default();
            return self.with_index(Index::Labels(vec![first]));
        }
        if self.mode == Mode::NoIndex {
            return self.with_index(Index::default_for_len(1));
        }

        let (min, max) = self.bounds().unwrap_or((f64::NAN, f64::NAN));
        let mid = (min + max) / 2.0;
        match self.mode {
            Mode::Sampled {
                order,
                span: Span::Regular(step),
                sampling: Sampling::Intervals(_),
            } => {
                let step = step * self.len() as f64;
                self.with_index(Index::range(mid, step, 1)).with_mode(Mode::sampled(
                    order,
                    Span::Regular(step),
                    Sampling::Intervals(Locus::Center),
                ))
            }
            Mode::Sampled {
                order, sampling, ..
            } => self
                .with_index(Index::Points(vec![mid]))
                .with_mode(Mode::sampled(order, Span::Irregular(min, max), sampling)),
            _ => self.with_index(Index::Points(vec![mid])),
        }
    }

    /// Joins dimensions of the same identity end to end.
    ///
    /// A sampled result stays `Regular` only when every part is regular with
    /// the same step and each part continues the previous one; otherwise the
    /// span becomes `Irregular` over the union of the parts' bounds.
    pub fn concat(parts: &[&Dimension]) -> Result<Self> {
        let (first, rest) = parts
            .split_first()
            .ok_or_else(|| DimError::ShapeMismatch("nothing to concatenate".to_string()))?;
        for part in rest {
            if part.tag != first.tag {
                return Err(DimError::DimensionMismatch(format!(
                    "cannot concatenate `{}` with `{}`",
                    first.name(),
                    part.name()
                )));
            }
            if std::mem::discriminant(&part.mode) != std::mem::discriminant(&first.mode)
                || part.mode.sampling() != first.mode.sampling()
            {
                return Err(DimError::DimensionMismatch(format!(
                    "cannot concatenate `{}` in {} mode with {} mode",
                    first.name(),
                    first.mode,
                    part.mode
                )));
            }
        }

        let total: usize = parts.iter().map(|part| part.len()).sum();
        let indices: Vec<&Index> = parts.iter().map(|part| &part.index).collect();
        let index = Index::concat(&indices).ok_or_else(|| {
            DimError::DimensionMismatch(format!(
                "cannot join label and numeric indices of `{}`",
                first.name()
            ))
        })?;

        let mode = match first.mode {
            Mode::NoIndex => return Ok(first.with_index(Index::default_for_len(total))),
            Mode::Categorical { order } => Mode::categorical(order_after_subset(&index, order)),
            Mode::Sampled {
                order, sampling, ..
            } => {
                let order = order_after_subset(&index, order);
                match shared_contiguous_step(parts) {
                    Some(step) => Mode::sampled(order, Span::Regular(step), sampling),
                    None => {
                        let (min, max) = parts
                            .iter()
                            .filter_map(|part| part.bounds())
                            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
                            .unwrap_or((f64::NAN, f64::NAN));
                        Mode::sampled(order, Span::Irregular(min, max), sampling)
                    }
                }
            }
            auto @ Mode::Auto { .. } => auto,
        };
        Ok(first.with_index(index).with_mode(mode))
    }
}

/// Order for an index picked out of (or joined from) an ordered one.
fn order_after_subset(index: &Index, previous: Order) -> Order {
    if index.len() <= 1 {
        return previous;
    }
    let array = previous.array_order().unwrap_or(Direction::Forward);
    match (previous, index.monotonic()) {
        (Order::Ordered { .. }, Some(stored)) => Order::with_stored_direction(array, stored),
        _ => Order::Unordered,
    }
}

fn shared_contiguous_step(parts: &[&Dimension]) -> Option<f64> {
    let step = parts.first()?.mode.span()?.step()?;
    let mut previous_last: Option<f64> = None;
    for part in parts {
        let part_step = part.mode.span()?.step()?;
        if !_float_equals(part_step, step) {
            return None;
        }
        if part.is_empty() {
            continue;
        }
        if let Some(last) = previous_last {
            if !_float_equals(last + step, part.index.first()?) {
                return None;
            }
        }
        previous_last = part.index.last();
    }
    Some(step)
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 4;

        let coords = self.index.coords();
        let mut preview: Vec<String> = coords
            .iter()
            .take(PREVIEW)
            .map(ToString::to_string)
            .collect();
        if coords.len() > PREVIEW {
            preview.push("…".to_string());
            if let Some(last) = coords.last() {
                preview.push(last.to_string());
            }
        }
        write!(
            f,
            "{} ({}): [{}] {}",
            self.label(),
            self.len(),
            preview.join(", "),
            self.mode
        )
    }
}
