use std::ops::Range;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::mode::Direction;
use crate::{core::Coord, validation_utils::_float_equals};

/// The coordinate sequence of a dimension, aligned with payload positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Index {
    /// `start + i * step` for `i` in `0..len`.
    Range { start: f64, step: f64, len: usize },
    /// Explicit numeric coordinates.
    Points(Vec<f64>),
    /// Explicit labels.
    Labels(Vec<String>),
}

impl Index {
    pub fn range(start: f64, step: f64, len: usize) -> Self {
        Index::Range { start, step, len }
    }

    /// The implicit index `0, 1, …, len - 1`.
    pub fn default_for_len(len: usize) -> Self {
        Index::range(0.0, 1.0, len)
    }

    pub fn len(&self) -> usize {
        match self {
            Index::Range { len, .. } => *len,
            Index::Points(values) => values.len(),
            Index::Labels(labels) => labels.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Index::Labels(_))
    }

    /// Numeric value at position `i`.
    pub fn value(&self, i: usize) -> Option<f64> {
        match self {
            Index::Range { start, step, len } if i < *len => Some(start + i as f64 * step),
            Index::Range { .. } => None,
            Index::Points(values) => values.get(i).copied(),
            Index::Labels(_) => None,
        }
    }

    pub fn label(&self, i: usize) -> Option<&str> {
        match self {
            Index::Labels(labels) => labels.get(i).map(String::as_str),
            _ => None,
        }
    }

    pub fn coord(&self, i: usize) -> Option<Coord> {
        match self {
            Index::Labels(labels) => labels.get(i).cloned().map(Coord::Label),
            _ => self.value(i).map(Coord::Num),
        }
    }

    pub fn coords(&self) -> Vec<Coord> {
        (0..self.len()).filter_map(|i| self.coord(i)).collect()
    }

    /// All numeric values, or `None` for labels.
    pub fn to_points(&self) -> Option<Vec<f64>> {
        match self {
            Index::Labels(_) => None,
            Index::Points(values) => Some(values.clone()),
            Index::Range { len, .. } => Some((0..*len).filter_map(|i| self.value(i)).collect()),
        }
    }

    pub fn first(&self) -> Option<f64> {
        self.value(0)
    }

    pub fn last(&self) -> Option<f64> {
        self.len().checked_sub(1).and_then(|i| self.value(i))
    }

    /// `(min, max)` of the numeric values.
    pub fn extrema(&self) -> Option<(f64, f64)> {
        match self {
            Index::Labels(_) => None,
            Index::Range { .. } => {
                let (first, last) = (self.first()?, self.last()?);
                Some((first.min(last), first.max(last)))
            }
            Index::Points(values) => values
                .iter()
                .copied()
                .minmax_by(|a, b| a.total_cmp(b))
                .into_option(),
        }
    }

    /// Strict monotonic direction of the stored sequence, if any.
    ///
    /// Sequences of length 0 or 1 count as forward.
    pub fn monotonic(&self) -> Option<Direction> {
        match self {
            Index::Range { step, len, .. } => {
                if *len <= 1 || *step > 0.0 {
                    Some(Direction::Forward)
                } else if *step < 0.0 {
                    Some(Direction::Reverse)
                } else {
                    None
                }
            }
            Index::Points(values) => monotonic_by(values, |a, b| a.partial_cmp(b)),
            Index::Labels(labels) => monotonic_by(labels, |a, b| Some(a.cmp(b))),
        }
    }

    /// Whether the stored sequence runs strictly in `direction`. Sequences
    /// of length 0 or 1 run both ways.
    pub fn is_stored_in(&self, direction: Direction) -> bool {
        self.len() <= 1 || self.monotonic() == Some(direction)
    }

    /// Whether the stored values advance by exactly `step`, sign included.
    ///
    /// Explicit points are compared against `first + i * step`, so rounding
    /// does not accumulate. Sequences of length 0 or 1 fit any step.
    pub fn has_step(&self, step: f64) -> bool {
        match self {
            Index::Range { step: own, len, .. } => *len <= 1 || _float_equals(*own, step),
            Index::Points(values) => match values.first() {
                Some(&first) => values
                    .iter()
                    .enumerate()
                    .all(|(i, &value)| _float_equals(first + i as f64 * step, value)),
                None => true,
            },
            Index::Labels(labels) => labels.len() <= 1,
        }
    }

    /// The same coordinates stored back to front.
    pub fn reversed(&self) -> Self {
        match self {
            Index::Range { start, step, len } => match self.last() {
                Some(last) => Index::range(last, -step, *len),
                None => Index::range(*start, -step, 0),
            },
            Index::Points(values) => Index::Points(values.iter().rev().copied().collect()),
            Index::Labels(labels) => Index::Labels(labels.iter().rev().cloned().collect()),
        }
    }

    /// Contiguous sub-sequence; ranges stay ranges.
    pub fn slice(&self, range: Range<usize>) -> Self {
        match self {
            Index::Range { start, step, .. } => {
                Index::range(start + range.start as f64 * step, *step, range.len())
            }
            Index::Points(values) => Index::Points(values[range].to_vec()),
            Index::Labels(labels) => Index::Labels(labels[range].to_vec()),
        }
    }

    /// Arbitrary positions; always an explicit sequence.
    pub fn take(&self, positions: &[usize]) -> Self {
        match self {
            Index::Labels(labels) => {
                Index::Labels(positions.iter().map(|&i| labels[i].clone()).collect())
            }
            _ => Index::Points(positions.iter().filter_map(|&i| self.value(i)).collect()),
        }
    }

    /// Joins indices end to end.
    ///
    /// Ranges that share a step and continue each other join into a single
    /// range; otherwise numeric parts join into points. Mixing labels and
    /// numbers returns `None`.
    pub fn concat(parts: &[&Index]) -> Option<Index> {
        if parts.iter().all(|part| matches!(part, Index::Labels(_))) {
            let labels = parts
                .iter()
                .flat_map(|part| match part {
                    Index::Labels(labels) => labels.clone(),
                    _ => Vec::new(),
                })
                .collect();
            return Some(Index::Labels(labels));
        }
        if parts.iter().any(|part| !part.is_numeric()) {
            return None;
        }
        if let Some(joined) = Self::concat_ranges(parts) {
            return Some(joined);
        }
        let mut values = Vec::with_capacity(parts.iter().map(|part| part.len()).sum());
        for part in parts {
            values.extend(part.to_points()?);
        }
        Some(Index::Points(values))
    }

    fn concat_ranges(parts: &[&Index]) -> Option<Index> {
        let non_empty: Vec<&Index> = parts.iter().copied().filter(|p| !p.is_empty()).collect();
        let (first, rest) = non_empty.split_first()?;
        let Index::Range { start, step, .. } = first else {
            return None;
        };
        let mut last = first.last()?;
        for part in rest {
            let Index::Range {
                start: next,
                step: next_step,
                ..
            } = part
            else {
                return None;
            };
            if !_float_equals(*step, *next_step) || !_float_equals(last + step, *next) {
                return None;
            }
            last = part.last()?;
        }
        let len = parts.iter().map(|part| part.len()).sum();
        Some(Index::range(*start, *step, len))
    }
}

fn monotonic_by<V>(
    values: &[V],
    cmp: impl Fn(&V, &V) -> Option<std::cmp::Ordering>,
) -> Option<Direction> {
    use std::cmp::Ordering::{Greater, Less};

    if values.len() <= 1 {
        return Some(Direction::Forward);
    }
    let mut pairs = values.iter().tuple_windows();
    if pairs.clone().all(|(a, b)| cmp(a, b) == Some(Less)) {
        Some(Direction::Forward)
    } else if pairs.all(|(a, b)| cmp(a, b) == Some(Greater)) {
        Some(Direction::Reverse)
    } else {
        None
    }
}

impl From<Vec<f64>> for Index {
    fn from(values: Vec<f64>) -> Self {
        Index::Points(values)
    }
}

impl From<Vec<&str>> for Index {
    fn from(labels: Vec<&str>) -> Self {
        Index::Labels(labels.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Index {
    fn from(labels: Vec<String>) -> Self {
        Index::Labels(labels)
    }
}
