#![cfg(test)]

use ndarray::{ArrayD, IxDyn};

use crate::{
    DimArray, DimTag, Dimension, Index, Mode, Order, Sampling, Span,
    dimension::Direction,
};

// Helper function to assert floating point equality with tolerance
pub fn assert_float_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Expected {} to be approximately equal to {} (tolerance: {})",
        a,
        b,
        tolerance
    );
}

/// Regularly sampled point dimension `start, start + step, …`.
pub fn regular_dim(tag: DimTag, start: f64, step: f64, len: usize) -> Dimension {
    let order = if step < 0.0 {
        Order::with_stored_direction(Direction::Forward, Direction::Reverse)
    } else {
        Order::forward()
    };
    Dimension::new(tag, Index::range(start, step, len)).with_mode(Mode::sampled(
        order,
        Span::Regular(step),
        Sampling::Points,
    ))
}

/// The 2×3 array `[[1, 2, 3], [4, 5, 6]]` over `X = [10, 20]` and
/// `Y = [100, 200, 300]`.
pub fn xy_array() -> DimArray<f64> {
    let data = ArrayD::from_shape_vec(IxDyn(&[2, 3]), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("valid shape");
    DimArray::new(
        data,
        vec![
            regular_dim(DimTag::X, 10.0, 10.0, 2),
            regular_dim(DimTag::Y, 100.0, 100.0, 3),
        ],
    )
    .expect("consistent dims")
}
