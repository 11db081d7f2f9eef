use crate::error::GeoApiTypesError;
use crate::geo::datum::Datum;
use crate::geo::traits::point::NewGeoPoint;
use crate::geo::traits::projection::Projection;
use crate::NewCartesianPoint2d;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::marker::PhantomData;

const MAX_ITERATIONS: usize = 15;
const ITERATION_TOLERANCE: f64 = 1e-12;

/// Ellipsoidal Mercator projection (EPSG methods 9804 and 9805).
#[derive(Debug, Copy, Clone)]
pub struct Mercator<In, Out> {
    datum: Datum,
    central_meridian: f64,
    scale_factor: f64,
    false_easting: f64,
    false_northing: f64,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> Mercator<In, Out> {
    /// Mercator (variant A), defined by the scale factor at the equator.
    ///
    /// `central_meridian` is in degrees, false easting and northing in metres.
    pub fn variant_a(
        datum: Datum,
        central_meridian: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<Self, GeoApiTypesError> {
        if !(scale_factor.is_finite() && scale_factor > 0.0) {
            return Err(GeoApiTypesError::InvalidParameters(format!(
                "scale factor must be positive, got {scale_factor}"
            )));
        }

        Ok(Self {
            datum,
            central_meridian,
            scale_factor,
            false_easting,
            false_northing,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        })
    }

    /// Mercator (variant B), defined by the latitude of the standard parallel in degrees.
    pub fn variant_b(
        datum: Datum,
        central_meridian: f64,
        standard_parallel: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Result<Self, GeoApiTypesError> {
        if standard_parallel.is_nan() || standard_parallel.abs() >= 90.0 {
            return Err(GeoApiTypesError::InvalidParameters(format!(
                "standard parallel must be in (-90, 90), got {standard_parallel}"
            )));
        }

        let e = datum.eccentricity();
        let phi1 = standard_parallel.to_radians();
        let scale_factor = phi1.cos() / (1.0 - e * e * phi1.sin().powi(2)).sqrt();

        Self::variant_a(
            datum,
            central_meridian,
            scale_factor,
            false_easting,
            false_northing,
        )
    }

    /// Scale factor at the equator.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn radius(&self) -> f64 {
        self.datum.semimajor() * self.scale_factor
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection for Mercator<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &In) -> Option<Out> {
        let e = self.datum.eccentricity();
        let phi = input.lat_rad();
        let lambda = input.lon_rad() - self.central_meridian.to_radians();
        let e_sin = e * phi.sin();

        let x = self.false_easting + self.radius() * lambda;
        let y = self.false_northing
            + self.radius()
                * ((FRAC_PI_4 + phi / 2.0).tan() * ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0))
                    .ln();

        if x.is_finite() && y.is_finite() {
            Some(Out::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Out) -> Option<In> {
        let e = self.datum.eccentricity();
        let t = ((self.false_northing - input.y()) / self.radius()).exp();

        let mut phi = FRAC_PI_2 - 2.0 * t.atan();
        for _ in 0..MAX_ITERATIONS {
            let e_sin = e * phi.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)).atan();
            let delta = (next - phi).abs();
            phi = next;
            if delta < ITERATION_TOLERANCE {
                break;
            }
        }

        let lambda =
            (input.x() - self.false_easting) / self.radius() + self.central_meridian.to_radians();

        if phi.is_finite() && lambda.is_finite() {
            Some(In::latlon(phi.to_degrees(), lambda.to_degrees()))
        } else {
            None
        }
    }
}
