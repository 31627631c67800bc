use crate::types::ValidationResult;

pub fn _chain<T>(
    result: ValidationResult<T>,
    warnings: &mut Vec<String>,
    errors: &mut Vec<String>,
) {
    match result {
        ValidationResult::Valid(_) => {}
        ValidationResult::Warnings(_, warns) => {
            warnings.extend(warns);
        }
        ValidationResult::Invalid(warns, errs) => {
            warnings.extend(warns);
            errors.extend(errs);
        }
    }
}

pub fn _return(warnings: Vec<String>, errors: Vec<String>) -> ValidationResult {
    if !errors.is_empty() {
        ValidationResult::Invalid(warnings, errors)
    } else if !warnings.is_empty() {
        ValidationResult::Warnings((), warnings)
    } else {
        ValidationResult::Valid(())
    }
}

/// Relative comparison used for range steps and computed coordinates.
pub fn _float_equals(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= 1e-9 * scale
}

pub fn validate_finite(points: &[f64]) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    for (i, &value) in points.iter().enumerate() {
        if !value.is_finite() {
            errors.push(format!(
                "value at index {} is not a valid number: {}",
                i, value
            ));
        }
    }

    _return(warnings, errors)
}

pub fn validate_length(name: &str, actual: usize, expected_len: usize) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    if actual != expected_len {
        errors.push(format!(
            "dimension `{}` has length {}, but its axis has length {}",
            name, actual, expected_len
        ));
    }

    _return(warnings, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_prefers_errors() {
        let result = _return(vec!["w".to_string()], vec!["e".to_string()]);
        assert!(!result.is_valid());
        assert_eq!(result.errors(), ["e".to_string()]);
    }

    #[test]
    fn test_finite_points() {
        assert!(validate_finite(&[1.0, 2.0]).is_valid());
        assert!(!validate_finite(&[1.0, f64::NAN]).is_valid());
    }

    #[test]
    fn test_float_equals_is_relative() {
        assert!(_float_equals(0.1 + 0.2, 0.3));
        assert!(_float_equals(1e12 + 1e-4, 1e12));
        assert!(!_float_equals(1.0, 1.001));
    }
}
