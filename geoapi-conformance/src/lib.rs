//! Conformance tests for coordinate operations.
//!
//! The crate checks that a candidate coordinate operation reproduces published sample points. A test goes through
//! the same steps every time:
//!
//! * the expected values are looked up in the [`SamplePoints`] registry by the code of the target CRS,
//! * the candidate [`CoordinateOperation`] transforms the sample source points (and, if it can, the target points
//!   back),
//! * the configured tolerance is adjusted for the [`CalculationType`] of the result by a [`ToleranceModifier`], so
//!   that a tolerance given in metres can be applied to angular coordinates,
//! * expected and actual coordinates are compared axis by axis (see [`compare`](mod@compare)).
//!
//! Candidate implementations are discovered through the [`Factories`] registry, and a whole run produces a
//! [`TestReport`] with a passed, failed or skipped [`TestOutcome`] per sample.
//!
//! ```
//! use geoapi_conformance::{Configuration, EpsgProjectionFactory, Factories, TransformTestCase};
//!
//! let factories = Factories::new().with(EpsgProjectionFactory);
//! let report = TransformTestCase::new(Configuration::default())?.run_all(&factories)?;
//! assert!(report.is_success());
//! # Ok::<(), geoapi_conformance::error::ConformanceError>(())
//! ```

pub mod calculation_type;
pub mod compare;
pub mod config;
pub mod error;
pub mod factory;
pub mod operation;
pub mod report;
pub mod sample_points;
pub mod tolerance;
pub mod transform_test;

pub use calculation_type::CalculationType;
pub use compare::{compare_coordinates, compare_with_modifier, ComparisonFailure};
pub use config::Configuration;
pub use factory::{EpsgProjectionFactory, Factories, OperationFactory};
pub use operation::{CoordinateOperation, ProjectionOperation};
pub use report::{Failure, TestOutcome, TestReport};
pub use sample_points::SamplePoints;
pub use tolerance::{CrsFamily, ToleranceModifier, ToleranceModifiers};
pub use transform_test::TransformTestCase;

// Reexport geoapi_types
pub use geoapi_types;

use error::ConformanceError;

/// Checks the candidate operation against the sample points registered for `sample_key` with the default
/// [`Configuration`].
///
/// Unknown keys and dimension errors are returned as `Err`. A candidate producing wrong coordinates is not an error:
/// it gives [`TestOutcome::Failed`] with the details of the first mismatch.
pub fn compare(
    sample_key: i32,
    candidate: &dyn CoordinateOperation,
) -> Result<TestOutcome, ConformanceError> {
    TransformTestCase::new(Configuration::default())?.compare(sample_key, candidate)
}
