//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeoApiTypesError {
    /// Projection parameters do not describe a valid projection.
    #[error("invalid projection parameters: {0}")]
    InvalidParameters(String),
    /// The CRS code is not known to this crate.
    #[error("unsupported CRS code EPSG:{0}")]
    UnsupportedCrs(i32),
}
