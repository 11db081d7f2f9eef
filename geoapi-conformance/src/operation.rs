//! The operation under test, see [`CoordinateOperation`].

use geoapi_types::geo::{GeoPoint, NewGeoPoint, Projection};
use geoapi_types::{CartesianPoint2d, GeoPoint2d, Point2d};
use std::sync::Arc;

/// Coordinate operation provided by the implementation being tested.
///
/// Coordinates are passed as flat arrays: `source_dimensions()` values per point for the input and
/// `target_dimensions()` values per point for the output.
pub trait CoordinateOperation {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Number of values per input point.
    fn source_dimensions(&self) -> usize;

    /// Number of values per output point.
    fn target_dimensions(&self) -> usize;

    /// Transforms the points. Returns `None` if any of them cannot be transformed.
    fn transform(&self, points: &[f64]) -> Option<Vec<f64>>;

    /// Inverse of the operation, if the implementation provides one.
    fn inverse(&self) -> Option<Box<dyn CoordinateOperation>> {
        None
    }
}

type GeoProjection = dyn Projection<InPoint = GeoPoint2d, OutPoint = Point2d>;

/// Adapts a [`Projection`] to a [`CoordinateOperation`] from (longitude, latitude) in degrees to projected (x, y).
#[derive(Clone)]
pub struct ProjectionOperation {
    name: String,
    projection: Arc<GeoProjection>,
    inverse: bool,
}

impl ProjectionOperation {
    /// Creates a new operation with the given name.
    pub fn new(name: impl Into<String>, projection: Box<GeoProjection>) -> Self {
        Self {
            name: name.into(),
            projection: Arc::from(projection),
            inverse: false,
        }
    }

    fn transform_point(&self, point: &[f64]) -> Option<[f64; 2]> {
        if self.inverse {
            let geo = self.projection.unproject(&Point2d::new(point[0], point[1]))?;
            Some([geo.lon(), geo.lat()])
        } else {
            let projected = self.projection.project(&GeoPoint2d::lonlat(point[0], point[1]))?;
            Some([projected.x(), projected.y()])
        }
    }
}

impl std::fmt::Debug for ProjectionOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectionOperation")
            .field("name", &self.name)
            .field("inverse", &self.inverse)
            .finish()
    }
}

impl CoordinateOperation for ProjectionOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_dimensions(&self) -> usize {
        2
    }

    fn target_dimensions(&self) -> usize {
        2
    }

    fn transform(&self, points: &[f64]) -> Option<Vec<f64>> {
        if points.len() % 2 != 0 {
            return None;
        }

        let mut result = Vec::with_capacity(points.len());
        for point in points.chunks_exact(2) {
            result.extend(self.transform_point(point)?);
        }

        Some(result)
    }

    fn inverse(&self) -> Option<Box<dyn CoordinateOperation>> {
        let name = match self.name.strip_suffix(" (inverse)") {
            Some(name) => name.to_string(),
            None => format!("{} (inverse)", self.name),
        };

        Some(Box::new(Self {
            name,
            projection: self.projection.clone(),
            inverse: !self.inverse,
        }))
    }
}
