//! Lookup primitives behind the selectors.
//!
//! Ordered dimensions are searched in `O(log n)` through [`Sorted`], a view
//! that walks the stored index in increasing coordinate order whichever way
//! it is stored. Unordered dimensions fall back to linear scans.

use std::ops::Range;

use log::debug;

use crate::{
    core::Coord,
    dimension::{Dimension, Direction, Index, Locus, Sampling},
};

/// First `j` in `0..len` for which `pred(j)` is false, assuming `pred` holds
/// for a prefix of the range and fails for the rest.
pub fn partition_point(len: usize, mut pred: impl FnMut(usize) -> bool) -> usize {
    let (mut lo, mut hi) = (0, len);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// An ordered dimension seen in increasing coordinate order.
struct Sorted<'a> {
    dim: &'a Dimension,
    len: usize,
    stored: Direction,
}

impl<'a> Sorted<'a> {
    fn new(dim: &'a Dimension) -> Option<Self> {
        let stored = dim.order()?.stored_direction()?;
        Some(Sorted {
            dim,
            len: dim.len(),
            stored,
        })
    }

    /// Stored position of the `j`-th smallest coordinate.
    fn position(&self, j: usize) -> usize {
        match self.stored {
            Direction::Forward => j,
            Direction::Reverse => self.len - 1 - j,
        }
    }

    /// Stored positions of a range of sorted ranks, ascending.
    fn positions(&self, ranks: Range<usize>) -> Range<usize> {
        match self.stored {
            Direction::Forward => ranks,
            Direction::Reverse => (self.len - ranks.end)..(self.len - ranks.start),
        }
    }

    fn value(&self, j: usize) -> f64 {
        self.dim
            .index()
            .value(self.position(j))
            .unwrap_or(f64::NAN)
    }

    fn label(&self, j: usize) -> &str {
        self.dim.index().label(self.position(j)).unwrap_or_default()
    }

    fn cell(&self, j: usize) -> (f64, f64) {
        self.dim
            .cell(self.position(j))
            .unwrap_or((f64::NAN, f64::NAN))
    }

    fn centre(&self, j: usize) -> f64 {
        let (lo, hi) = self.cell(j);
        (lo + hi) / 2.0
    }
}

/// Default tolerance for exact matches: zero for explicit points, a sliver
/// of a step for computed ranges.
fn default_tolerance(index: &Index, x: f64) -> f64 {
    match index {
        Index::Range { step, .. } => step.abs() * 1e-9 + x.abs() * 4.0 * f64::EPSILON,
        _ => 0.0,
    }
}

/// Position whose coordinate equals `value`.
pub fn at(dim: &Dimension, value: &Coord, atol: Option<f64>) -> Option<usize> {
    match value {
        Coord::Label(label) => at_label(dim, label),
        Coord::Num(x) => at_value(dim, *x, atol),
    }
}

fn at_label(dim: &Dimension, label: &str) -> Option<usize> {
    let Index::Labels(labels) = dim.index() else {
        return None;
    };
    match Sorted::new(dim) {
        Some(sorted) => {
            let j = partition_point(sorted.len, |j| sorted.label(j) < label);
            (j < sorted.len && sorted.label(j) == label).then(|| sorted.position(j))
        }
        None => {
            debug!("linear label scan over unordered dimension `{}`", dim.name());
            labels.iter().position(|l| l == label)
        }
    }
}

fn at_value(dim: &Dimension, x: f64, atol: Option<f64>) -> Option<usize> {
    let index = dim.index();
    let tol = atol.unwrap_or_else(|| default_tolerance(index, x));
    let matches = |v: f64| (v - x).abs() <= tol;

    if let Index::Range { start, step, len } = index {
        if *len == 0 {
            return None;
        }
        let i = if *step == 0.0 {
            0.0
        } else {
            ((x - start) / step).round()
        };
        if i < 0.0 || i >= *len as f64 {
            return None;
        }
        let i = i as usize;
        return index.value(i).filter(|v| matches(*v)).map(|_| i);
    }

    match Sorted::new(dim) {
        Some(sorted) => {
            let j = partition_point(sorted.len, |j| sorted.value(j) < x - tol);
            (j < sorted.len && matches(sorted.value(j))).then(|| sorted.position(j))
        }
        None => {
            debug!("linear scan over unordered dimension `{}`", dim.name());
            (0..index.len()).find(|&i| index.value(i).is_some_and(matches))
        }
    }
}

/// Position of the coordinate closest to `x`; ties go to the lower position.
///
/// Under interval sampling the distance is measured to interval centres.
pub fn near(dim: &Dimension, x: f64) -> Option<usize> {
    let sorted = Sorted::new(dim)?;
    if sorted.len == 0 || x.is_nan() {
        return None;
    }
    let centre = |j: usize| match dim.mode().sampling() {
        Some(Sampling::Intervals(_)) => sorted.centre(j),
        _ => sorted.value(j),
    };
    let j = partition_point(sorted.len, |j| centre(j) < x);
    let candidates = [j.checked_sub(1), (j < sorted.len).then_some(j)];
    candidates
        .into_iter()
        .flatten()
        .map(|j| ((centre(j) - x).abs(), sorted.position(j)))
        .min_by(|(da, pa), (db, pb)| da.total_cmp(db).then(pa.cmp(pb)))
        .map(|(_, position)| position)
}

/// Position of the interval containing `x`.
///
/// Intervals are half-open: `[low, high)` for `Start` and `Center` loci,
/// `(low, high]` for `End`.
pub fn contains(dim: &Dimension, x: f64, locus: Locus) -> Option<usize> {
    let sorted = Sorted::new(dim)?;
    let j = match locus {
        Locus::End => partition_point(sorted.len, |j| sorted.cell(j).1 < x),
        Locus::Start | Locus::Center => partition_point(sorted.len, |j| sorted.cell(j).1 <= x),
    };
    if j >= sorted.len {
        return None;
    }
    let (lo, _) = sorted.cell(j);
    let inside = match locus {
        Locus::End => lo < x,
        Locus::Start | Locus::Center => lo <= x,
    };
    inside.then(|| sorted.position(j))
}

/// Ascending positions whose coordinate lies in `[lo, hi]`, or whose interval
/// intersects it. `lo > hi` selects nothing.
pub fn between(dim: &Dimension, lo: f64, hi: f64) -> Range<usize> {
    let Some(sorted) = Sorted::new(dim) else {
        return 0..0;
    };
    if !(lo <= hi) {
        return 0..0;
    }
    let n = sorted.len;
    let (start, end) = match dim.mode().sampling() {
        Some(Sampling::Intervals(Locus::End)) => (
            partition_point(n, |j| sorted.cell(j).1 < lo),
            partition_point(n, |j| sorted.cell(j).0 < hi),
        ),
        Some(Sampling::Intervals(_)) => (
            partition_point(n, |j| sorted.cell(j).1 <= lo),
            partition_point(n, |j| sorted.cell(j).0 <= hi),
        ),
        _ => (
            partition_point(n, |j| sorted.value(j) < lo),
            partition_point(n, |j| sorted.value(j) <= hi),
        ),
    };
    sorted.positions(start..end.max(start))
}
