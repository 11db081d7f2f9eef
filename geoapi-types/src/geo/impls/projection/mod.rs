//! Implementations for some of the common projections.
mod identity;
mod mercator;
mod miller;
mod web_mercator;

pub use identity::IdentityProjection;
pub use mercator::Mercator;
pub use miller::Miller;
pub use web_mercator::WebMercator;

#[cfg(feature = "geodesy")]
mod geodesy;
#[cfg(feature = "geodesy")]
pub use geodesy::GeodesyProjection;
