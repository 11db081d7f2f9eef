//! See [`TransformTestCase`].

use crate::calculation_type::CalculationType;
use crate::compare::{check_dimension, compare_coordinates, compare_with_modifier};
use crate::config::Configuration;
use crate::error::ConformanceError;
use crate::factory::Factories;
use crate::operation::CoordinateOperation;
use crate::report::{TestOutcome, TestReport};
use crate::sample_points::SamplePoints;
use crate::tolerance::{CrsFamily, ToleranceModifier, ToleranceModifiers};
use geoapi_types::Rect;
use std::sync::Arc;

/// Tests a coordinate operation against sample points.
///
/// Comparisons use the tolerance modifier registered for the [`CrsFamily`] of the sample's target
/// CRS. With the default modifiers the configured tolerance is applied as is to projected
/// coordinates and converted to degrees for the results of the inverse transform.
#[derive(Debug, Clone)]
pub struct TransformTestCase {
    config: Configuration,
    modifiers: ToleranceModifiers,
}

impl TransformTestCase {
    /// Creates a test case with the default tolerance modifiers.
    pub fn new(config: Configuration) -> Result<Self, ConformanceError> {
        config.validate()?;
        Ok(Self {
            config,
            modifiers: ToleranceModifiers::default(),
        })
    }

    /// Replaces the tolerance modifiers.
    pub fn with_modifiers(mut self, modifiers: ToleranceModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Configuration of the test case.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    fn tolerances(&self, dimension: usize) -> Vec<f64> {
        vec![self.config.tolerance; dimension]
    }

    fn modifier(&self, sample: &SamplePoints) -> Arc<dyn ToleranceModifier> {
        self.modifiers.get_or_identity(&CrsFamily::of_epsg(sample.target_crs()))
    }

    /// Transforms the sample source points and compares them with the target points. If inverse
    /// transforms are tested and the operation is invertible, the target points are transformed
    /// back and compared with the source points.
    pub fn verify_sample(
        &self,
        sample: &SamplePoints,
        operation: &dyn CoordinateOperation,
    ) -> Result<(), ConformanceError> {
        let dimension = sample.dimension();
        check_dimension(
            "operation source dimensions",
            dimension,
            operation.source_dimensions(),
        )?;
        check_dimension(
            "operation target dimensions",
            dimension,
            operation.target_dimensions(),
        )?;

        let modifier = self.modifier(sample);
        let tolerances = self.tolerances(dimension);

        let actual = transform(operation, sample.source_points())?;
        compare_with_modifier(
            sample.target_points(),
            &actual,
            &tolerances,
            dimension,
            modifier.as_ref(),
            CalculationType::DirectTransform,
        )?;

        if !self.config.is_inverse_transform_supported {
            return Ok(());
        }

        let Some(inverse) = operation.inverse() else {
            log::debug!("{} is not invertible", operation.name());
            return Ok(());
        };

        let actual = transform(inverse.as_ref(), sample.target_points())?;
        compare_with_modifier(
            sample.source_points(),
            &actual,
            &tolerances,
            dimension,
            modifier.as_ref(),
            CalculationType::InverseTransform,
        )
    }

    /// Checks that transforming the points one by one gives exactly the result of transforming them all at once.
    pub fn verify_consistency(
        &self,
        points: &[f64],
        operation: &dyn CoordinateOperation,
    ) -> Result<(), ConformanceError> {
        let source_dimension = operation.source_dimensions();
        let target_dimension = operation.target_dimensions();
        if source_dimension == 0 || points.len() % source_dimension != 0 {
            return Err(ConformanceError::DimensionMismatch {
                context: "points are not a whole number of source points",
                expected: source_dimension,
                actual: points.len(),
            });
        }

        let batch = transform(operation, points)?;
        let mut single = Vec::with_capacity(batch.len());
        for point in points.chunks_exact(source_dimension) {
            single.extend(transform(operation, point)?);
        }

        compare_coordinates(
            &batch,
            &single,
            &vec![0.0; target_dimension],
            target_dimension,
            CalculationType::Strict,
        )
    }

    /// Transforms a regular grid of points over the sample's area of validity forward and back,
    /// and compares the result with the starting points. Operations without an inverse are not
    /// checked.
    pub fn verify_in_domain(
        &self,
        sample: &SamplePoints,
        operation: &dyn CoordinateOperation,
    ) -> Result<(), ConformanceError> {
        let area = sample.area_of_validity();
        let Some(inverse) = operation.inverse() else {
            log::debug!("{} is not invertible, domain is not checked", operation.name());
            return Ok(());
        };

        check_dimension(
            "operation source dimensions",
            2,
            operation.source_dimensions(),
        )?;

        let points = grid(area, self.config.domain_grid_size);
        let projected = transform(operation, &points)?;
        let back = transform(inverse.as_ref(), &projected)?;

        log::debug!(
            "Checked {} round trips of {} over {area:?}",
            points.len() / 2,
            operation.name()
        );

        compare_with_modifier(
            &points,
            &back,
            &self.tolerances(2),
            2,
            self.modifier(sample).as_ref(),
            CalculationType::InverseTransform,
        )
    }

    /// Runs all enabled checks of the operation against the sample registered for `sample_key`.
    ///
    /// An unknown key or inconsistent dimensions are returned as errors. Coordinates out of
    /// tolerance and points the operation fails to transform give [`TestOutcome::Failed`].
    pub fn compare(
        &self,
        sample_key: i32,
        operation: &dyn CoordinateOperation,
    ) -> Result<TestOutcome, ConformanceError> {
        let sample = SamplePoints::get(sample_key)?;
        log::debug!("Testing {} against {sample}", operation.name());

        let result = self
            .verify_sample(sample, operation)
            .and_then(|_| {
                if self.config.is_consistency_check_enabled {
                    self.verify_consistency(sample.source_points(), operation)
                } else {
                    Ok(())
                }
            })
            .and_then(|_| {
                let config = &self.config;
                if config.is_domain_check_enabled && config.is_inverse_transform_supported {
                    self.verify_in_domain(sample, operation)
                } else {
                    Ok(())
                }
            });

        TestOutcome::from_result(result)
    }

    /// Tests every registered sample with the operation of the first factory supporting it.
    /// Samples without a factory are skipped.
    pub fn run_all(&self, factories: &Factories) -> Result<TestReport, ConformanceError> {
        let mut report = TestReport::new();
        for sample in SamplePoints::all() {
            let code = sample.target_crs();
            match factories.find(code) {
                Some((factory, operation)) => {
                    let outcome = self.compare(code, operation.as_ref())?;
                    report.push(code, Some(factory.name().to_string()), outcome);
                }
                None => report.push(
                    code,
                    None,
                    TestOutcome::Skipped(format!("no factory supports EPSG:{code}")),
                ),
            }
        }

        log::info!("Conformance run finished: {report}");
        Ok(report)
    }
}

fn transform(
    operation: &dyn CoordinateOperation,
    points: &[f64],
) -> Result<Vec<f64>, ConformanceError> {
    let result = operation
        .transform(points)
        .ok_or_else(|| ConformanceError::TransformFailed {
            operation: operation.name().to_string(),
            coordinates: points.to_vec(),
        })?;

    let source_dimension = operation.source_dimensions().max(1);
    check_dimension(
        "transformed coordinates",
        points.len() / source_dimension * operation.target_dimensions(),
        result.len(),
    )?;

    Ok(result)
}

/// Points of a `size` x `size` grid covering the area, borders included, as (x, y) pairs.
fn grid(area: &Rect, size: usize) -> Vec<f64> {
    let steps = (size.max(2) - 1) as f64;
    let mut points = Vec::with_capacity(size * size * 2);
    for i in 0..size {
        let y = area.y_min() + area.height() * i as f64 / steps;
        for j in 0..size {
            let x = area.x_min() + area.width() * j as f64 / steps;
            points.extend([x, y]);
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_borders() {
        let points = grid(&Rect::new(-10.0, 0.0, 10.0, 4.0), 3);
        assert_eq!(points.len(), 18);
        assert_eq!(points[..2], [-10.0, 0.0]);
        assert_eq!(points[2..4], [0.0, 0.0]);
        assert_eq!(points[16..], [10.0, 4.0]);
    }
}
