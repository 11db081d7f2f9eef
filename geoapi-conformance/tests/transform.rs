use assert_matches::assert_matches;
use geoapi_conformance::error::ConformanceError;
use geoapi_conformance::tolerance::MetresToDegrees;
use geoapi_conformance::{
    compare, compare_with_modifier, CalculationType, Configuration, CoordinateOperation,
    CrsFamily, EpsgProjectionFactory, Factories, Failure, OperationFactory, SamplePoints,
    TestOutcome, ToleranceModifier, ToleranceModifiers, TransformTestCase,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn reference(code: i32) -> Box<dyn CoordinateOperation> {
    EpsgProjectionFactory
        .create_operation(code)
        .expect("reference projection")
}

/// Wraps a reference operation and changes its behaviour.
struct Candidate {
    inner: Box<dyn CoordinateOperation>,
    offset: f64,
    target_dimensions: usize,
    invertible: bool,
    fail: bool,
    batch_drift: bool,
}

impl Candidate {
    fn new(code: i32) -> Self {
        Self {
            inner: reference(code),
            offset: 0.0,
            target_dimensions: 2,
            invertible: true,
            fail: false,
            batch_drift: false,
        }
    }
}

impl CoordinateOperation for Candidate {
    fn name(&self) -> &str {
        "candidate"
    }

    fn source_dimensions(&self) -> usize {
        2
    }

    fn target_dimensions(&self) -> usize {
        self.target_dimensions
    }

    fn transform(&self, points: &[f64]) -> Option<Vec<f64>> {
        if self.fail {
            return None;
        }

        let mut result = self.inner.transform(points)?;
        for x in result.iter_mut().step_by(2) {
            *x += self.offset;
        }
        if self.batch_drift {
            for x in result.iter_mut().step_by(2) {
                *x += points.len() as f64 * 1e-9;
            }
        }

        Some(result)
    }

    fn inverse(&self) -> Option<Box<dyn CoordinateOperation>> {
        if self.invertible {
            self.inner.inverse()
        } else {
            None
        }
    }
}

/// Operation returning its input unchanged.
struct Passthrough;

impl CoordinateOperation for Passthrough {
    fn name(&self) -> &str {
        "copy"
    }

    fn source_dimensions(&self) -> usize {
        2
    }

    fn target_dimensions(&self) -> usize {
        2
    }

    fn transform(&self, points: &[f64]) -> Option<Vec<f64>> {
        Some(points.to_vec())
    }
}

/// Forward transform of the reference operation with a wrong inverse.
struct WrongInverse(i32);

impl CoordinateOperation for WrongInverse {
    fn name(&self) -> &str {
        "wrong inverse"
    }

    fn source_dimensions(&self) -> usize {
        2
    }

    fn target_dimensions(&self) -> usize {
        2
    }

    fn transform(&self, points: &[f64]) -> Option<Vec<f64>> {
        reference(self.0).transform(points)
    }

    fn inverse(&self) -> Option<Box<dyn CoordinateOperation>> {
        Some(Box::new(Passthrough))
    }
}

#[test]
fn pseudo_mercator_sample_point() {
    init_logger();

    let sample = SamplePoints::get(3857).expect("registered");
    let source = sample.sample_source();
    let actual = reference(3857)
        .transform(&[source.x, source.y])
        .expect("finite");

    compare_with_modifier(
        &[-11_169_055.58, 2_800_000.00],
        &actual,
        &[0.01, 0.01],
        2,
        &MetresToDegrees::PROJECTION,
        CalculationType::DirectTransform,
    )
    .expect("within tolerance");
}

#[test]
fn reference_projections_pass() {
    init_logger();

    for code in SamplePoints::codes() {
        let outcome = compare(code, reference(code).as_ref()).expect("valid test");
        assert_eq!(outcome, TestOutcome::Passed, "EPSG:{code}");
    }
}

#[test]
fn round_trip_within_inverse_tolerance() {
    init_logger();

    let test = TransformTestCase::new(Configuration::default().with_domain_grid_size(16))
        .expect("valid config");
    for sample in SamplePoints::all() {
        let operation = reference(sample.target_crs());
        test.verify_in_domain(sample, operation.as_ref())
            .expect("round trip within tolerance");
    }
}

#[test]
fn lambert_samples_in_metres() {
    init_logger();

    // NAD27 / Texas South Central, published in US survey feet
    let sample = SamplePoints::get(32040).expect("registered");
    let test = TransformTestCase::new(Configuration::default()).expect("valid config");
    test.verify_sample(sample, reference(32040).as_ref())
        .expect("within tolerance");

    // Belge Lambert 72 has its natural origin on the pole
    let outcome = compare(31300, reference(31300).as_ref()).expect("valid test");
    assert_eq!(outcome, TestOutcome::Passed);
}

#[test]
fn unknown_sample_key() {
    let err = compare(999999, reference(3857).as_ref()).expect_err("unknown key");
    assert_matches!(err, ConformanceError::UnknownSample(999999));
}

#[test]
fn offset_fails_direct_transform() {
    init_logger();

    let mut candidate = Candidate::new(3857);
    candidate.offset = 1.0;

    let outcome = compare(3857, &candidate).expect("valid test");
    assert_matches!(outcome, TestOutcome::Failed(Failure::Tolerance(failure)) => {
        assert_eq!(failure.mode, CalculationType::DirectTransform);
        assert_eq!((failure.point, failure.axis), (0, 0));
        assert_eq!(failure.expected, 0.0);
        assert_eq!(failure.actual, 1.0);
        assert_eq!(failure.tolerance, 0.01);
    });
}

#[test]
fn offset_within_tolerance_passes() {
    let mut candidate = Candidate::new(3388);
    candidate.offset = 0.005;
    candidate.invertible = false;

    let outcome = compare(3388, &candidate).expect("valid test");
    assert_eq!(outcome, TestOutcome::Passed);
}

#[test]
fn tighter_tolerance_rejects_rounded_samples() {
    let test = TransformTestCase::new(Configuration::default().with_tolerance(1e-4))
        .expect("valid config");
    let outcome = test.compare(3857, reference(3857).as_ref()).expect("valid test");
    assert_matches!(
        outcome,
        TestOutcome::Failed(Failure::Tolerance(failure))
            if failure.mode == CalculationType::DirectTransform && failure.point == 1
    );
}

#[test]
fn wrong_inverse_fails_inverse_transform() {
    let outcome = compare(3002, &WrongInverse(3002)).expect("valid test");
    assert_matches!(outcome, TestOutcome::Failed(Failure::Tolerance(failure)) => {
        assert_eq!(failure.mode, CalculationType::InverseTransform);
        assert!(failure.tolerance < 1e-6);
    });

    let test = TransformTestCase::new(Configuration::default().with_inverse_transform(false))
        .expect("valid config");
    let outcome = test.compare(3002, &WrongInverse(3002)).expect("valid test");
    assert_eq!(outcome, TestOutcome::Passed);
}

#[test]
fn transform_failure_is_reported() {
    let mut candidate = Candidate::new(3857);
    candidate.fail = true;

    let outcome = compare(3857, &candidate).expect("valid test");
    assert_matches!(
        outcome,
        TestOutcome::Failed(Failure::Transform { operation, coordinates })
            if operation == "candidate" && coordinates.len() == 4
    );
}

#[test]
fn batch_and_single_results_must_be_equal() {
    let mut candidate = Candidate::new(3857);
    candidate.batch_drift = true;
    candidate.invertible = false;

    let outcome = compare(3857, &candidate).expect("valid test");
    assert_matches!(
        outcome,
        TestOutcome::Failed(Failure::Tolerance(failure)) if failure.mode == CalculationType::Strict
    );

    let test = TransformTestCase::new(Configuration::default().with_consistency_check(false))
        .expect("valid config");
    assert_eq!(
        test.compare(3857, &candidate).expect("valid test"),
        TestOutcome::Passed
    );
}

#[test]
fn wrong_dimension_is_an_error() {
    let mut candidate = Candidate::new(3857);
    candidate.target_dimensions = 3;

    let err = compare(3857, &candidate).expect_err("dimension mismatch");
    assert_matches!(
        err,
        ConformanceError::DimensionMismatch {
            context: "operation target dimensions",
            expected: 2,
            actual: 3
        }
    );
}

#[test]
fn custom_modifier_relaxes_tolerance() {
    #[derive(Debug)]
    struct Metre;

    impl ToleranceModifier for Metre {
        fn adjust_in_place(&self, tolerances: &mut [f64], _: &[f64], mode: CalculationType) {
            if mode == CalculationType::DirectTransform {
                tolerances.iter_mut().for_each(|t| *t = 1.0);
            }
        }
    }

    let mut candidate = Candidate::new(3857);
    candidate.offset = 0.5;
    candidate.invertible = false;

    let modifiers = ToleranceModifiers::empty().with(CrsFamily::PROJECTED, Metre);
    let test = TransformTestCase::new(Configuration::default())
        .expect("valid config")
        .with_modifiers(modifiers);
    assert_eq!(
        test.compare(3857, &candidate).expect("valid test"),
        TestOutcome::Passed
    );
    assert!(compare(3857, &candidate).expect("valid test").is_failed());
}

#[test]
fn modifier_is_selected_by_target_crs_family() {
    #[derive(Debug)]
    struct Metre;

    impl ToleranceModifier for Metre {
        fn adjust_in_place(&self, tolerances: &mut [f64], _: &[f64], _: CalculationType) {
            tolerances.iter_mut().for_each(|t| *t = 1.0);
        }
    }

    let mut candidate = Candidate::new(3035);
    candidate.offset = 0.5;
    candidate.invertible = false;

    let geographic_only = ToleranceModifiers::empty().with(CrsFamily::GEOGRAPHIC, Metre);
    let test = TransformTestCase::new(Configuration::default())
        .expect("valid config")
        .with_modifiers(geographic_only);
    assert!(test.compare(3035, &candidate).expect("valid test").is_failed());

    let projected = ToleranceModifiers::empty().with(CrsFamily::of_epsg(3035), Metre);
    let test = test.with_modifiers(projected);
    assert_eq!(
        test.compare(3035, &candidate).expect("valid test"),
        TestOutcome::Passed
    );
}

#[test]
fn run_all_with_reference_projections() {
    init_logger();

    let factories = Factories::new().with(EpsgProjectionFactory);
    let report = TransformTestCase::new(Configuration::default())
        .expect("valid config")
        .run_all(&factories)
        .expect("valid run");

    assert!(report.is_success());
    assert_eq!(report.passed(), SamplePoints::all().len());
    assert_eq!(report.skipped(), 0);
    assert_eq!(report.entries().len(), SamplePoints::all().len());
    assert!(report.outcome(3035).is_some_and(TestOutcome::is_passed));
    assert_eq!(
        report.entries()[2].factory.as_deref(),
        Some("geoapi-types")
    );

    let empty = TransformTestCase::new(Configuration::default())
        .expect("valid config")
        .run_all(&Factories::new())
        .expect("valid run");
    assert_eq!(empty.skipped(), SamplePoints::all().len());
}

#[test]
fn invalid_configuration_is_rejected() {
    let result = TransformTestCase::new(Configuration::default().with_domain_grid_size(0));
    assert_matches!(result, Err(ConformanceError::Configuration(_)));
}
