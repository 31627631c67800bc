/// Outcome of a consistency check.
///
/// Validation never fails hard: it reports what is wrong so the caller can
/// decide. Warnings flag metadata that is suspicious but still usable (for
/// example `Irregular` bounds that do not cover the index), errors flag broken
/// invariants (a dimension length that differs from its axis).
///
/// # Examples
///
/// ```rust
/// use dimarray::types::ValidationResult;
///
/// let result: ValidationResult = ValidationResult::Warnings((), vec!["step drift".to_string()]);
/// assert!(result.is_valid());
/// assert_eq!(result.warnings().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T = (), W = String, E = String> {
    /// Passed without remarks.
    Valid(T),
    /// Passed, with warnings.
    Warnings(T, Vec<W>),
    /// Failed; carries both warnings and errors.
    Invalid(Vec<W>, Vec<E>),
}

impl<T, W, E> ValidationResult<T, W, E> {
    /// True unless the result is `Invalid`.
    pub fn is_valid(&self) -> bool {
        !matches!(self, ValidationResult::Invalid(_, _))
    }

    pub fn warnings(&self) -> &[W] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Warnings(_, warnings) => warnings,
            ValidationResult::Invalid(warnings, _) => warnings,
        }
    }

    pub fn errors(&self) -> &[E] {
        match self {
            ValidationResult::Invalid(_, errors) => errors,
            _ => &[],
        }
    }
}

/// Types that can check their own invariants.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}
