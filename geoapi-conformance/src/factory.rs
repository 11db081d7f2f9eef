//! Discovery of the implementations under test.
//!
//! Implementations register an [`OperationFactory`] in a [`Factories`] registry. The test runner asks the registry for
//! the operation to a given target CRS and uses the first factory that can create it.

use crate::operation::{CoordinateOperation, ProjectionOperation};
use geoapi_types::geo::Crs;
use geoapi_types::{GeoPoint2d, Point2d};

/// Creates the coordinate operations of one implementation.
pub trait OperationFactory {
    /// Name of the implementation, used in reports.
    fn name(&self) -> &str;

    /// Creates the operation from the base geographic CRS to the given target CRS, or `None` if the implementation
    /// does not support that CRS.
    fn create_operation(&self, target_crs: i32) -> Option<Box<dyn CoordinateOperation>>;
}

/// Registry of operation factories, queried in registration order.
#[derive(Default)]
pub struct Factories {
    factories: Vec<Box<dyn OperationFactory>>,
}

impl Factories {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a factory.
    pub fn register(&mut self, factory: impl OperationFactory + 'static) {
        log::debug!("Registered operation factory {}", factory.name());
        self.factories.push(Box::new(factory));
    }

    /// Builder style [`register`](Self::register).
    pub fn with(mut self, factory: impl OperationFactory + 'static) -> Self {
        self.register(factory);
        self
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns true if no factory is registered.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Names of the registered factories.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|factory| factory.name())
    }

    /// Finds the first factory supporting the target CRS and creates the operation.
    pub fn find(
        &self,
        target_crs: i32,
    ) -> Option<(&dyn OperationFactory, Box<dyn CoordinateOperation>)> {
        self.factories.iter().find_map(|factory| {
            let operation = factory.create_operation(target_crs)?;
            log::debug!(
                "Using {} for EPSG:{target_crs} from {}",
                operation.name(),
                factory.name()
            );
            Some((factory.as_ref(), operation))
        })
    }
}

/// Factory for the projections built into `geoapi-types` (see [`Crs::from_epsg`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsgProjectionFactory;

impl OperationFactory for EpsgProjectionFactory {
    fn name(&self) -> &str {
        "geoapi-types"
    }

    fn create_operation(&self, target_crs: i32) -> Option<Box<dyn CoordinateOperation>> {
        let crs = Crs::from_epsg(target_crs).ok()?;
        if crs.is_geographic() {
            return None;
        }

        let projection = crs.get_projection::<GeoPoint2d, Point2d>()?;
        Some(Box::new(ProjectionOperation::new(
            format!("EPSG:{target_crs}"),
            projection,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Only(i32);

    impl OperationFactory for Only {
        fn name(&self) -> &str {
            "only"
        }

        fn create_operation(&self, target_crs: i32) -> Option<Box<dyn CoordinateOperation>> {
            (target_crs == self.0)
                .then(|| EpsgProjectionFactory.create_operation(target_crs))
                .flatten()
        }
    }

    #[test]
    fn epsg_factory() {
        let factory = EpsgProjectionFactory;
        for code in [3002, 3388, 3857, 24200, 32040, 31300, 3035, 310642901] {
            let operation = factory.create_operation(code).expect("supported");
            assert_eq!(operation.name(), format!("EPSG:{code}"));
        }
        assert!(factory.create_operation(4326).is_none());
        assert!(factory.create_operation(999999).is_none());
    }

    #[test]
    fn registration_order() {
        let factories = Factories::new().with(Only(3857)).with(EpsgProjectionFactory);
        assert_eq!(factories.len(), 2);
        assert_eq!(factories.names().collect::<Vec<_>>(), ["only", "geoapi-types"]);

        let (factory, _) = factories.find(3857).expect("supported");
        assert_eq!(factory.name(), "only");
        let (factory, _) = factories.find(3388).expect("supported");
        assert_eq!(factory.name(), "geoapi-types");
        assert!(factories.find(4326).is_none());
        assert!(Factories::new().is_empty());
    }
}
