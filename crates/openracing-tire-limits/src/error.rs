//! Error types for tire limit evaluation.
//!
//! Validation failures are recoverable by the caller (reject, clamp or
//! re-sample the state). Configuration failures are fatal at construction
//! time: there is no fallback friction profile.
//!
//! Degenerate geometry (zero maxima, zero capacity in a direction) is never
//! an error; it resolves to [`Usage::Unbounded`](crate::Usage::Unbounded) or
//! a zero force capacity.

/// Severity of a tire limit error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    /// The input for one evaluation was malformed. The next cycle may succeed.
    Error,
    /// The process cannot evaluate limits with this configuration.
    Fatal,
}

/// Rejection of a raw tire state or force input.
///
/// Field names are `&'static str` so the error never allocates on the
/// control path.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Field name
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Value outside its physical band.
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// The rejected value
        value: f64,
        /// Minimum allowed value
        min: f64,
        /// Maximum allowed value
        max: f64,
    },

    /// NaN or infinite value.
    #[error("{field} must be finite")]
    NotFinite {
        /// Field name
        field: &'static str,
    },
}

impl ValidationError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotPositive { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::NotFinite { field } => field,
        }
    }

    /// Create an out of range error.
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }
}

/// Invalid friction table, limit configuration or compound name.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Compound name does not match any known tire compound.
    #[error("Unknown tire compound '{0}' (known: street, performance, race_slick, rain, winter)")]
    UnknownCompound(String),

    /// A configuration constant is non-finite or outside its band.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// The rejected value
        value: f64,
        /// Why it was rejected
        reason: &'static str,
    },
}

impl ConfigError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    /// Create an invalid parameter error.
    pub fn invalid(name: impl Into<String>, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
            reason,
        }
    }
}

/// Top-level error for this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TireLimitError {
    /// Tire state or force input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Friction table or limit configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TireLimitError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(e) => e.severity(),
            Self::Config(e) => e.severity(),
        }
    }
}

/// A specialized `Result` type for tire limit operations.
pub type Result<T> = std::result::Result<T, TireLimitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_positive_message() {
        let err = ValidationError::NotPositive {
            field: "vertical_load",
            value: -10.0,
        };
        assert_eq!(err.to_string(), "vertical_load must be positive, got -10");
        assert_eq!(err.field(), "vertical_load");
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ValidationError::out_of_range("wear", 1.5, 0.0, 1.0);
        let msg = err.to_string();
        assert!(msg.contains("wear"));
        assert!(msg.contains("1.5"));
        assert!(msg.contains("[0, 1]"));
    }

    #[test]
    fn test_severity_split() {
        assert_eq!(
            ValidationError::NotFinite { field: "slip_angle" }.severity(),
            ErrorSeverity::Error
        );
        assert_eq!(
            ConfigError::UnknownCompound("gravel".into()).severity(),
            ErrorSeverity::Fatal
        );
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: TireLimitError = ValidationError::NotFinite { field: "pressure" }.into();
        assert_eq!(err.to_string(), "pressure must be finite");
        assert_eq!(err.severity(), ErrorSeverity::Error);

        let err: TireLimitError =
            ConfigError::invalid("coupling_factor", 2.0, "must be in [0, 0.5]").into();
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn test_is_std_error() {
        let err = ValidationError::NotFinite { field: "wear" };
        let _: &dyn std::error::Error = &err;
    }
}
