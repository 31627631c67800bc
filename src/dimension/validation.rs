use super::{Dimension, Index, Mode, Span};
use crate::{
    types::{Validate, ValidationResult},
    validation_utils::{_chain, _float_equals, _return, validate_finite},
};

impl Validate for Dimension {
    fn validate(&self) -> ValidationResult {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if let Index::Points(values) = self.index() {
            _chain(validate_finite(values), &mut warnings, &mut errors);
        }

        match *self.mode() {
            Mode::Auto { .. } => {
                warnings.push(format!(
                    "dimension `{}` still has an unresolved Auto mode",
                    self.name()
                ));
            }
            Mode::Sampled { .. } if !self.index().is_numeric() => {
                errors.push(format!(
                    "dimension `{}` is sampled but has a label index",
                    self.name()
                ));
            }
            _ => {}
        }

        if let Some(order) = self.order() {
            if !order.is_consistent() {
                errors.push(format!(
                    "dimension `{}`: {} breaks the relation invariant",
                    self.name(),
                    order
                ));
            } else if let Some(stored) = order.stored_direction() {
                if !self.index().is_stored_in(stored) {
                    errors.push(format!(
                        "dimension `{}`: index is not stored in {:?} order",
                        self.name(),
                        stored
                    ));
                }
            }
        }

        match (self.mode().span(), self.index()) {
            (Some(Span::Regular(step)), index) if index.is_numeric() => {
                if !index.has_step(step) {
                    errors.push(format!(
                        "dimension `{}`: regular step {} does not match the stored index",
                        self.name(),
                        step
                    ));
                }
            }
            (Some(Span::Irregular(min, max)), index) => {
                if let Some((lo, hi)) = index.extrema() {
                    if lo < min || hi > max {
                        warnings.push(format!(
                            "dimension `{}`: bounds ({}, {}) do not cover index extrema ({}, {})",
                            self.name(),
                            min,
                            max,
                            lo,
                            hi
                        ));
                    }
                }
            }
            _ => {}
        }

        _return(warnings, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::DimTag,
        dimension::{Locus, Order, OrderTarget, Sampling},
        test_utils::regular_dim,
    };

    #[test]
    fn test_regular_dimension_is_valid() {
        let dim = regular_dim(DimTag::X, 0.0, 1.0, 4);
        assert_eq!(dim.validate(), ValidationResult::Valid(()));
        assert!(dim.reverse(OrderTarget::IndexOrder).validate().is_valid());
    }

    #[test]
    fn test_step_mismatch_is_an_error() {
        let dim = Dimension::new(DimTag::X, Index::range(0.0, 1.0, 4)).with_mode(Mode::sampled(
            Order::forward(),
            Span::Regular(2.0),
            Sampling::Points,
        ));
        assert!(!dim.validate().is_valid());
    }

    #[test]
    fn test_step_must_fit_explicit_points() {
        let with_step = |step| {
            Dimension::new(DimTag::X, vec![10.0, 20.0, 30.0]).with_mode(Mode::sampled(
                Order::forward(),
                Span::Regular(step),
                Sampling::Intervals(Locus::Start),
            ))
        };
        assert_eq!(with_step(10.0).validate(), ValidationResult::Valid(()));
        assert!(!with_step(5.0).validate().is_valid());
        assert!(!with_step(-10.0).validate().is_valid());
        assert!(
            with_step(10.0)
                .reverse(OrderTarget::IndexOrder)
                .validate()
                .is_valid()
        );
    }

    #[test]
    fn test_wrong_stored_direction_is_an_error() {
        let dim = Dimension::new(DimTag::X, vec![1.0, 2.0]).with_mode(Mode::sampled(
            Order::reverse_index(),
            Span::Irregular(1.0, 2.0),
            Sampling::Points,
        ));
        assert!(!dim.validate().is_valid());
    }

    #[test]
    fn test_unresolved_auto_is_a_warning() {
        let result = Dimension::new(DimTag::X, vec![1.0]).validate();
        assert!(result.is_valid());
        assert!(result.warnings()[0].contains("Auto"));
    }

    #[test]
    fn test_non_finite_points_are_errors() {
        let dim = Dimension::new(DimTag::X, vec![1.0, f64::NAN]);
        assert!(!dim.validate().is_valid());
    }
}
