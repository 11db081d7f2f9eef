use crate::geo::traits::point::NewGeoPoint;
use crate::geo::traits::projection::Projection;
use crate::NewCartesianPoint2d;
use std::marker::PhantomData;

/// Projection that copies longitude into `x` and latitude into `y`.
///
/// This is the conversion from a geographic CRS to itself expressed in the cartesian point type. It is useful as a
/// candidate whose results must be equal to the input.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityProjection<In, Out> {
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> IdentityProjection<In, Out> {
    /// Creates a new instance.
    pub fn new() -> Self {
        Self {
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection
    for IdentityProjection<In, Out>
{
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &In) -> Option<Out> {
        Some(Out::new(input.lon(), input.lat()))
    }

    fn unproject(&self, input: &Out) -> Option<In> {
        Some(In::latlon(input.y(), input.x()))
    }
}
