//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use dimarray::{
    DimArray, DimTag, Dimension, Direction, Index, Locus, Mode, Order, Sampling, Span,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn assert_float_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Expected {} to be approximately equal to {} (tolerance: {})",
        a,
        b,
        tolerance
    );
}

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

pub fn interval_dim(tag: DimTag, start: f64, step: f64, len: usize, locus: Locus) -> Dimension {
    Dimension::new(tag, Index::range(start, step, len)).with_mode(Mode::sampled(
        Order::forward(),
        Span::Regular(step),
        Sampling::Intervals(locus),
    ))
}

/// `[[1, 2, 3], [4, 5, 6]]` over `X = [10, 20]`, `Y = [100, 200, 300]`.
pub fn xy_array() -> DimArray<f64> {
    DimArray::from_shape_vec(
        vec![
            regular_dim(DimTag::X, 10.0, 10.0, 2),
            regular_dim(DimTag::Y, 100.0, 100.0, 3),
        ],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    )
    .expect("consistent dims")
}
