//! Geometries in geographic coordinates (latitude and longitude) (see [`GeoPoint`]) and conversion between
//! geographic and projected coordinates (see [`Projection`]).

mod crs;
mod datum;
pub mod impls;
mod traits;

pub use crs::{Crs, ProjectionType, US_SURVEY_FOOT};
pub use datum::Datum;
pub use traits::point::{GeoPoint, NewGeoPoint};
pub use traits::projection::Projection;
