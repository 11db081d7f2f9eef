//! Error types used by the crate.

use crate::compare::ComparisonFailure;
use thiserror::Error;

/// Conformance error type.
///
/// [`ToleranceExceeded`](ConformanceError::ToleranceExceeded) and
/// [`TransformFailed`](ConformanceError::TransformFailed) describe a candidate that does not conform. All other
/// variants are usage errors of the test itself.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// There is no sample for the given CRS code.
    #[error("no sample points for EPSG:{0}")]
    UnknownSample(i32),
    /// Arrays that must agree in length do not.
    #[error("dimension mismatch ({context}): expected {expected}, found {actual}")]
    DimensionMismatch {
        /// What was checked.
        context: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
    /// A coordinate differs from the expected value by more than the tolerance.
    #[error("{0}")]
    ToleranceExceeded(Box<ComparisonFailure>),
    /// The candidate operation could not transform the coordinates.
    #[error("{operation} failed to transform {coordinates:?}")]
    TransformFailed {
        /// Name of the operation.
        operation: String,
        /// Input coordinates.
        coordinates: Vec<f64>,
    },
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Configuration or report cannot be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConformanceError {
    /// Returns true if the error is the result of a non-conforming candidate rather than a misuse of the test.
    pub fn is_test_failure(&self) -> bool {
        matches!(
            self,
            Self::ToleranceExceeded(_) | Self::TransformFailed { .. }
        )
    }
}
