/// Conversion between two coordinate spaces.
///
/// Both directions return `None` if the input point cannot be converted, e.g. it lies outside of the projection
/// domain or the result is not finite.
pub trait Projection {
    /// Point type of the source space.
    type InPoint;
    /// Point type of the target space.
    type OutPoint;

    /// Converts a point from the source into the target space.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Converts a point from the target back into the source space.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}
