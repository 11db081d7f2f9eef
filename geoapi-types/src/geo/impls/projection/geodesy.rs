use crate::error::GeoApiTypesError;
use crate::geo::traits::point::NewGeoPoint;
use crate::geo::traits::projection::Projection;
use crate::NewCartesianPoint2d;
use geodesy::prelude::*;
use std::marker::PhantomData;

/// Projection backed by a `geodesy` operator definition, e.g.
/// `"laea lon_0=10 lat_0=52 x_0=4321000 y_0=3210000 ellps=GRS80"`.
///
/// Points that `geodesy` cannot convert come out as NaN and are reported as `None`.
#[derive(Debug)]
pub struct GeodesyProjection<In, Out> {
    context: Minimal,
    op: OpHandle,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> GeodesyProjection<In, Out> {
    /// Parses the operator definition.
    pub fn new(definition: &str) -> Result<Self, GeoApiTypesError> {
        let mut context = Minimal::new();
        let op = context
            .op(definition)
            .map_err(|err| GeoApiTypesError::InvalidParameters(format!("{definition}: {err}")))?;
        Ok(Self {
            context,
            op,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        })
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection
    for GeodesyProjection<In, Out>
{
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        let mut data = [Coor2D::geo(input.lat(), input.lon())];
        self.context.apply(self.op, Fwd, &mut data).ok()?;

        let [x, y] = data[0].0;
        (x.is_finite() && y.is_finite()).then(|| Out::new(x, y))
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let mut data = [Coor2D([input.x(), input.y()])];
        self.context.apply(self.op, Inv, &mut data).ok()?;

        let [lon, lat] = data[0].0;
        (lon.is_finite() && lat.is_finite()).then(|| In::latlon(lat.to_degrees(), lon.to_degrees()))
    }
}
