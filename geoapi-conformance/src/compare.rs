//! Axis by axis comparison of coordinates.

use crate::calculation_type::CalculationType;
use crate::error::ConformanceError;
use crate::tolerance::{NoModifier, ToleranceModifier};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Details of a coordinate that differs from the expected value by more than the tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonFailure {
    /// Index of the point in the compared arrays.
    pub point: usize,
    /// Index of the axis within the point.
    pub axis: usize,
    /// Expected value.
    pub expected: f64,
    /// Actual value.
    pub actual: f64,
    /// Absolute difference between expected and actual values.
    pub deviation: f64,
    /// Tolerance used for the comparison, after adjustment.
    pub tolerance: f64,
    /// Kind of calculation that produced the actual value.
    pub mode: CalculationType,
}

impl Display for ComparisonFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} mismatch at point {}, axis {}: expected {} but got {} (deviation {} exceeds tolerance {})",
            self.mode,
            self.point,
            self.axis,
            self.expected,
            self.actual,
            self.deviation,
            self.tolerance
        )
    }
}

/// Fails with [`ConformanceError::DimensionMismatch`] if the lengths differ.
pub fn check_dimension(
    context: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ConformanceError> {
    if expected != actual {
        return Err(ConformanceError::DimensionMismatch {
            context,
            expected,
            actual,
        });
    }

    Ok(())
}

/// Compares flat arrays of points with `dimension` values each.
///
/// `tolerances` holds one value per axis and is used as is. An axis passes if the values are equal, if the absolute
/// difference is not greater than the tolerance, or if both values are NaN. The first failing axis is reported as
/// [`ConformanceError::ToleranceExceeded`].
pub fn compare_coordinates(
    expected: &[f64],
    actual: &[f64],
    tolerances: &[f64],
    dimension: usize,
    mode: CalculationType,
) -> Result<(), ConformanceError> {
    compare_with_modifier(expected, actual, tolerances, dimension, &NoModifier, mode)
}

/// Same as [`compare_coordinates`], but the tolerances are adjusted by the modifier for each point, using the actual
/// coordinate of that point.
pub fn compare_with_modifier(
    expected: &[f64],
    actual: &[f64],
    tolerances: &[f64],
    dimension: usize,
    modifier: &dyn ToleranceModifier,
    mode: CalculationType,
) -> Result<(), ConformanceError> {
    if dimension == 0 {
        return Err(ConformanceError::DimensionMismatch {
            context: "point dimension",
            expected: 1,
            actual: 0,
        });
    }
    check_dimension("tolerances", dimension, tolerances.len())?;
    check_dimension("actual coordinates", expected.len(), actual.len())?;
    if expected.len() % dimension != 0 {
        return Err(ConformanceError::DimensionMismatch {
            context: "coordinate array is not a whole number of points",
            expected: expected.len() - expected.len() % dimension,
            actual: expected.len(),
        });
    }

    for (point, (expected, actual)) in expected
        .chunks_exact(dimension)
        .zip(actual.chunks_exact(dimension))
        .enumerate()
    {
        let adjusted = modifier.adjust(tolerances, actual, mode)?;
        for (axis, ((&expected, &actual), &tolerance)) in
            expected.iter().zip(actual).zip(&adjusted).enumerate()
        {
            if !is_within_tolerance(expected, actual, tolerance) {
                let failure = ComparisonFailure {
                    point,
                    axis,
                    expected,
                    actual,
                    deviation: (expected - actual).abs(),
                    tolerance,
                    mode,
                };
                log::debug!("{failure}");
                return Err(ConformanceError::ToleranceExceeded(Box::new(failure)));
            }
        }
    }

    Ok(())
}

fn is_within_tolerance(expected: f64, actual: f64, tolerance: f64) -> bool {
    if expected == actual || (expected.is_nan() && actual.is_nan()) {
        return true;
    }

    (expected - actual).abs() <= tolerance
}
