//! Error types for radar resampling and compositing.

use thiserror::Error;

/// Result type alias using RadarError.
pub type RadarResult<T> = Result<T, RadarError>;

/// Primary error type for sampling, PPI construction and compositing.
///
/// Every error is raised synchronously and never retried internally; the
/// operations that produce them are deterministic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RadarError {
    /// Bad cell size, range, limits or other out-of-domain argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed or inconsistent coordinate reference definition, or a point
    /// outside the domain of a projection.
    #[error("Projection error: {0}")]
    ProjectionError(String),

    /// Wrong kind of product passed to an operation.
    #[error("Type error: expected {expected}, found {found}")]
    TypeError { expected: String, found: String },

    /// Requested parameter or scan is not present.
    #[error("Data absent: {0}")]
    DataAbsent(String),
}

impl RadarError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a ProjectionError.
    pub fn projection(msg: impl Into<String>) -> Self {
        Self::ProjectionError(msg.into())
    }

    /// Create a TypeError.
    pub fn type_error(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeError {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a DataAbsent error.
    pub fn data_absent(msg: impl Into<String>) -> Self {
        Self::DataAbsent(msg.into())
    }

    /// Short machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            RadarError::InvalidArgument(_) => "InvalidArgument",
            RadarError::ProjectionError(_) => "ProjectionError",
            RadarError::TypeError { .. } => "TypeError",
            RadarError::DataAbsent(_) => "DataAbsent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RadarError::invalid_argument("cellsize").error_code(),
            "InvalidArgument"
        );
        assert_eq!(RadarError::projection("bad").error_code(), "ProjectionError");
        assert_eq!(
            RadarError::type_error("ppi", "composite").error_code(),
            "TypeError"
        );
        assert_eq!(RadarError::data_absent("DBZH").error_code(), "DataAbsent");
    }

    #[test]
    fn test_display() {
        let err = RadarError::type_error("single-radar PPI", "composite");
        assert_eq!(
            err.to_string(),
            "Type error: expected single-radar PPI, found composite"
        );
    }
}
