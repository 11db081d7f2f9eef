use crate::geo::datum::Datum;
use crate::geo::traits::point::NewGeoPoint;
use crate::geo::traits::projection::Projection;
use crate::NewCartesianPoint2d;
use std::f64::consts::FRAC_PI_4;
use std::marker::PhantomData;

/// Miller cylindrical projection on a sphere with the datum semi-major axis as radius.
#[derive(Debug, Copy, Clone)]
pub struct Miller<In, Out> {
    datum: Datum,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> Miller<In, Out> {
    /// Creates a new projection.
    pub fn new(datum: Datum) -> Self {
        Self {
            datum,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<In, Out> Default for Miller<In, Out> {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection for Miller<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &In) -> Option<Out> {
        let r = self.datum.semimajor();
        let x = r * input.lon_rad();
        let y = 1.25 * r * (FRAC_PI_4 + 0.4 * input.lat_rad()).tan().ln();

        if x.is_finite() && y.is_finite() {
            Some(Out::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Out) -> Option<In> {
        let r = self.datum.semimajor();
        let phi = 2.5 * (0.8 * input.y() / r).exp().atan() - 2.5 * FRAC_PI_4;
        let lambda = input.x() / r;

        if phi.is_finite() && lambda.is_finite() {
            Some(In::latlon(phi.to_degrees(), lambda.to_degrees()))
        } else {
            None
        }
    }
}
