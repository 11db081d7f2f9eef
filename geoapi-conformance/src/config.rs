//! Test configuration.

use crate::error::ConformanceError;
use serde::{Deserialize, Serialize};

/// Options of a [`TransformTestCase`](crate::TransformTestCase).
///
/// Missing fields take their default values when deserializing:
///
/// ```json
/// { "tolerance": 0.001, "is_domain_check_enabled": false }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Tolerance in metres, applied to every axis of projected coordinates and converted to degrees for geographic
    /// ones.
    pub tolerance: f64,
    /// Whether the inverse of the operations must be tested.
    pub is_inverse_transform_supported: bool,
    /// Whether transforming points one by one must give the same result as a batch.
    pub is_consistency_check_enabled: bool,
    /// Whether to test round trips over the area of validity.
    pub is_domain_check_enabled: bool,
    /// Number of grid points along each axis of the area of validity.
    pub domain_grid_size: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            is_inverse_transform_supported: true,
            is_consistency_check_enabled: true,
            is_domain_check_enabled: true,
            domain_grid_size: 8,
        }
    }
}

impl Configuration {
    /// Parses and validates the configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConformanceError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values are in range.
    pub fn validate(&self) -> Result<(), ConformanceError> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(ConformanceError::Configuration(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }

        if self.domain_grid_size < 2 {
            return Err(ConformanceError::Configuration(format!(
                "domain grid needs at least 2 points per axis, got {}",
                self.domain_grid_size
            )));
        }

        Ok(())
    }

    /// Sets the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enables or disables inverse transform checks.
    pub fn with_inverse_transform(mut self, enabled: bool) -> Self {
        self.is_inverse_transform_supported = enabled;
        self
    }

    /// Enables or disables the consistency check.
    pub fn with_consistency_check(mut self, enabled: bool) -> Self {
        self.is_consistency_check_enabled = enabled;
        self
    }

    /// Enables or disables the domain check.
    pub fn with_domain_check(mut self, enabled: bool) -> Self {
        self.is_domain_check_enabled = enabled;
        self
    }

    /// Sets the number of grid points along each axis for the domain check.
    pub fn with_domain_grid_size(mut self, size: usize) -> Self {
        self.domain_grid_size = size;
        self
    }
}
