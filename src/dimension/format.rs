//! Normalisation of dimensions against a payload shape.
//!
//! [`format`] runs once when an array is constructed. It checks that there is
//! one dimension per axis with matching lengths and distinct identities,
//! resolves every `Auto` mode from the runtime shape of its index, and rejects
//! explicit modes that contradict their index.

use std::collections::HashSet;

use log::{debug, trace};

use super::{Dimension, Direction, Index, Mode, Order, Sampling, Span};
use crate::errors::{DimError, Result};

/// Checks `dims` against `shape` and resolves their modes.
pub fn format(dims: Vec<Dimension>, shape: &[usize]) -> Result<Vec<Dimension>> {
    if dims.len() != shape.len() {
        return Err(DimError::ShapeMismatch(format!(
            "{} dimensions given for an array with {} axes",
            dims.len(),
            shape.len()
        )));
    }

    let mut seen = HashSet::new();
    for dim in &dims {
        if !seen.insert(dim.tag()) {
            return Err(DimError::DuplicateDimension(dim.name().to_string()));
        }
    }

    dims.iter()
        .zip(shape)
        .map(|(dim, &len)| {
            if dim.len() != len {
                return Err(DimError::ShapeMismatch(format!(
                    "dimension `{}` has length {}, but its axis has length {}",
                    dim.name(),
                    dim.len(),
                    len
                )));
            }
            format_dim(dim)
        })
        .collect()
}

/// Resolves the mode of a single dimension.
pub fn format_dim(dim: &Dimension) -> Result<Dimension> {
    let index = dim.index();
    let mode = match *dim.mode() {
        Mode::Auto { order } => {
            let mode = detect_mode(index, order);
            debug!("dimension `{}`: resolved Auto mode to {}", dim.name(), mode);
            mode
        }
        Mode::Sampled { .. } if !index.is_numeric() => {
            return Err(invalid(dim, "sampled mode needs a numeric index"));
        }
        Mode::Sampled {
            order,
            span: Span::Regular(step),
            sampling,
        } => {
            check_order(dim, order)?;
            if !index.has_step(step) {
                return Err(invalid(
                    dim,
                    &format!("regular step {} does not match the stored index", step),
                ));
            }
            Mode::sampled(order, Span::Regular(step), sampling)
        }
        mode @ (Mode::Sampled { .. } | Mode::Categorical { .. }) => {
            if let Some(order) = mode.order() {
                check_order(dim, order)?;
            }
            mode
        }
        Mode::NoIndex => Mode::NoIndex,
    };
    trace!("dimension `{}` formatted as {}", dim.name(), mode);
    Ok(dim.clone().with_mode(mode))
}

fn detect_mode(index: &Index, order: Option<Order>) -> Mode {
    let detected = || match index.monotonic() {
        Some(Direction::Forward) => Order::forward(),
        Some(Direction::Reverse) => Order::reverse_index(),
        None => Order::Unordered,
    };
    let order = order.unwrap_or_else(detected);
    match index {
        Index::Labels(_) => Mode::categorical(order),
        Index::Range { step, .. } if order.is_ordered() => {
            Mode::sampled(order, Span::Regular(*step), Sampling::Points)
        }
        _ => {
            let (min, max) = index.extrema().unwrap_or((0.0, 0.0));
            Mode::sampled(order, Span::Irregular(min, max), Sampling::Points)
        }
    }
}

fn check_order(dim: &Dimension, order: Order) -> Result<()> {
    let Some(stored) = order.stored_direction() else {
        return Ok(());
    };
    if !order.is_consistent() {
        return Err(invalid(
            dim,
            &format!("{} breaks the relation invariant", order),
        ));
    }
    if !dim.index().is_stored_in(stored) {
        return Err(invalid(
            dim,
            &format!("{} does not match the stored index", order),
        ));
    }
    Ok(())
}

fn invalid(dim: &Dimension, reason: &str) -> DimError {
    DimError::InvalidMode {
        dim: dim.name().to_string(),
        reason: reason.to_string(),
    }
}
