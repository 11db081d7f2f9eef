//! Geometric primitives used by the GeoAPI conformance suite.
//!
//! The crate provides points in geographic ([`geo::GeoPoint`]) and cartesian ([`cartesian::CartesianPoint2d`])
//! coordinates, axis aligned rectangles ([`cartesian::Rect`]), ellipsoid definitions ([`geo::Datum`]), CRS
//! descriptors ([`geo::Crs`]) and the [`geo::Projection`] trait together with a handful of reference projections.
//! The reference projections are used as known-good candidates when testing the conformance harness itself.

pub mod cartesian;
pub mod error;
pub mod geo;

pub use cartesian::{CartesianPoint2d, NewCartesianPoint2d, Point2d, Rect};
pub use error::GeoApiTypesError;
pub use geo::impls::GeoPoint2d;
