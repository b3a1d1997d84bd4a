use thiserror::Error;

/// Engine-level error type.
///
/// Only construction and loading can fail. Empty skill lists, zero totals and
/// negative years are defined edge cases of the scoring functions, not errors.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid catalog: {0}")]
    Catalog(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FitError {
    /// Short machine-readable code for callers that surface errors on their own wire format.
    pub fn code(&self) -> &'static str {
        match self {
            FitError::Configuration(_) => "CONFIGURATION_ERROR",
            FitError::Catalog(_) => "CATALOG_ERROR",
            FitError::Json(_) => "JSON_ERROR",
            FitError::Io(_) => "IO_ERROR",
        }
    }
}

/// Checks that `value` is finite and within `[min, max]`.
pub(crate) fn validate_range(name: &str, value: f64, min: f64, max: f64) -> Result<f64, FitError> {
    if !value.is_finite() || value < min || value > max {
        return Err(FitError::Configuration(format!(
            "{name} must be within [{min}, {max}], got {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range_accepts_bounds() {
        assert_eq!(validate_range("threshold", 0.0, 0.0, 1.0).unwrap(), 0.0);
        assert_eq!(validate_range("threshold", 1.0, 0.0, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_validate_range_rejects_out_of_range_and_nan() {
        assert!(matches!(
            validate_range("threshold", 1.5, 0.0, 1.0),
            Err(FitError::Configuration(_))
        ));
        assert!(matches!(
            validate_range("threshold", f64::NAN, 0.0, 1.0),
            Err(FitError::Configuration(_))
        ));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            FitError::Configuration("x".to_string()).code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(FitError::Catalog("x".to_string()).code(), "CATALOG_ERROR");
    }

    #[test]
    fn test_configuration_message_names_the_setting() {
        let err = validate_range("similarity threshold", -0.1, 0.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("similarity threshold"));
    }
}
