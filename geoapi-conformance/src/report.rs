//! Outcomes of conformance tests.

use crate::compare::ComparisonFailure;
use crate::error::ConformanceError;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Why a candidate did not conform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Failure {
    /// A coordinate is outside of the tolerance.
    Tolerance(ComparisonFailure),
    /// The candidate could not transform the coordinates.
    Transform {
        /// Name of the operation.
        operation: String,
        /// Input coordinates.
        coordinates: Vec<f64>,
    },
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Tolerance(failure) => Display::fmt(failure, f),
            Failure::Transform {
                operation,
                coordinates,
            } => write!(f, "{operation} failed to transform {coordinates:?}"),
        }
    }
}

/// Result of a single test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TestOutcome {
    /// The candidate reproduced the expected coordinates.
    Passed,
    /// The candidate did not conform.
    Failed(Failure),
    /// The test was not run, the reason is inside.
    Skipped(String),
}

impl TestOutcome {
    /// Converts the result of a check into an outcome.
    ///
    /// Errors describing a non-conforming candidate become [`TestOutcome::Failed`], all other errors are returned.
    pub fn from_result(result: Result<(), ConformanceError>) -> Result<Self, ConformanceError> {
        match result {
            Ok(()) => Ok(Self::Passed),
            Err(ConformanceError::ToleranceExceeded(failure)) => {
                Ok(Self::Failed(Failure::Tolerance(*failure)))
            }
            Err(ConformanceError::TransformFailed {
                operation,
                coordinates,
            }) => Ok(Self::Failed(Failure::Transform {
                operation,
                coordinates,
            })),
            Err(err) => Err(err),
        }
    }

    /// Returns true for [`TestOutcome::Passed`].
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns true for [`TestOutcome::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true for [`TestOutcome::Skipped`].
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Outcome of the test of one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestEntry {
    /// Target CRS code of the sample.
    pub target_crs: i32,
    /// Factory that provided the operation, if any.
    pub factory: Option<String>,
    /// Outcome.
    pub outcome: TestOutcome,
}

/// Outcomes of a test run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestReport {
    entries: Vec<TestEntry>,
}

impl TestReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an outcome.
    pub fn push(&mut self, target_crs: i32, factory: Option<String>, outcome: TestOutcome) {
        match &outcome {
            TestOutcome::Passed => log::debug!("EPSG:{target_crs} passed"),
            TestOutcome::Failed(failure) => log::warn!("EPSG:{target_crs} failed: {failure}"),
            TestOutcome::Skipped(reason) => log::warn!("EPSG:{target_crs} skipped: {reason}"),
        }

        self.entries.push(TestEntry {
            target_crs,
            factory,
            outcome,
        });
    }

    /// All entries in execution order.
    pub fn entries(&self) -> &[TestEntry] {
        &self.entries
    }

    /// Outcome for the given target CRS.
    pub fn outcome(&self, target_crs: i32) -> Option<&TestOutcome> {
        self.entries
            .iter()
            .find(|entry| entry.target_crs == target_crs)
            .map(|entry| &entry.outcome)
    }

    /// Number of passed tests.
    pub fn passed(&self) -> usize {
        self.count(TestOutcome::is_passed)
    }

    /// Number of failed tests.
    pub fn failed(&self) -> usize {
        self.count(TestOutcome::is_failed)
    }

    /// Number of skipped tests.
    pub fn skipped(&self) -> usize {
        self.count(TestOutcome::is_skipped)
    }

    /// Returns true if no test failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Serializes the report.
    pub fn to_json(&self) -> Result<String, ConformanceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn count(&self, predicate: fn(&TestOutcome) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}

impl Display for TestReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.skipped()
        )
    }
}
