use crate::error::GeoApiTypesError;
use crate::geo::datum::Datum;
use crate::geo::impls::projection::{IdentityProjection, Mercator, Miller, WebMercator};
use crate::geo::traits::point::NewGeoPoint;
use crate::geo::traits::projection::Projection;
use crate::NewCartesianPoint2d;

#[cfg(feature = "geodesy")]
use crate::geo::impls::projection::GeodesyProjection;

/// US survey foot in metres.
pub const US_SURVEY_FOOT: f64 = 1200.0 / 3937.0;

/// Coordinate reference system: a datum and the projection from geographic coordinates on that datum.
#[derive(Debug, Clone)]
pub struct Crs {
    code: i32,
    datum: Datum,
    projection_type: ProjectionType,
}

/// Projection of a [`Crs`].
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProjectionType {
    /// Geographic CRS, coordinates are (longitude, latitude) in degrees.
    None,
    /// Popular Visualisation Pseudo Mercator.
    WebMercator,
    /// Mercator defined by the scale factor at the equator.
    MercatorA {
        /// Longitude of natural origin, degrees.
        central_meridian: f64,
        /// Scale factor at natural origin.
        scale_factor: f64,
        /// False easting, metres.
        false_easting: f64,
        /// False northing, metres.
        false_northing: f64,
    },
    /// Mercator defined by the standard parallel.
    MercatorB {
        /// Longitude of natural origin, degrees.
        central_meridian: f64,
        /// Latitude of the first standard parallel, degrees.
        standard_parallel: f64,
        /// False easting, metres.
        false_easting: f64,
        /// False northing, metres.
        false_northing: f64,
    },
    /// Miller cylindrical.
    Miller,
    /// Lambert azimuthal equal area.
    LambertAzimuthalEqualArea {
        /// Latitude of natural origin, degrees.
        latitude_of_origin: f64,
        /// Longitude of natural origin, degrees.
        central_meridian: f64,
        /// False easting, metres.
        false_easting: f64,
        /// False northing, metres.
        false_northing: f64,
    },
    /// Lambert conic conformal. The one standard parallel case has both parallels equal.
    LambertConicConformal {
        /// Latitude of the first standard parallel, degrees.
        standard_parallel_1: f64,
        /// Latitude of the second standard parallel, degrees.
        standard_parallel_2: f64,
        /// Latitude of the false origin, degrees.
        latitude_of_origin: f64,
        /// Longitude of the false origin, degrees.
        central_meridian: f64,
        /// Scale factor on the standard parallel.
        scale_factor: f64,
        /// False easting, metres.
        false_easting: f64,
        /// False northing, metres.
        false_northing: f64,
    },
}

impl Crs {
    /// WGS 84 geographic CRS.
    pub const WGS84: Crs = Crs {
        code: 4326,
        datum: Datum::WGS84,
        projection_type: ProjectionType::None,
    };

    /// WGS 84 / Pseudo-Mercator.
    pub const EPSG3857: Crs = Crs {
        code: 3857,
        datum: Datum::WGS84,
        projection_type: ProjectionType::WebMercator,
    };

    /// Looks up one of the CRS known to this crate by its EPSG (or IGNF numeric) code.
    pub fn from_epsg(code: i32) -> Result<Self, GeoApiTypesError> {
        let (datum, projection_type) = match code {
            4326 => (Datum::WGS84, ProjectionType::None),
            3857 => (Datum::WGS84, ProjectionType::WebMercator),
            // Makassar / NEIEZ
            3002 => (
                Datum::BESSEL_1841,
                ProjectionType::MercatorA {
                    central_meridian: 110.0,
                    scale_factor: 0.997,
                    false_easting: 3_900_000.0,
                    false_northing: 900_000.0,
                },
            ),
            // Pulkovo 1942 / Caspian Sea Mercator
            3388 => (
                Datum::KRASSOWSKY_1940,
                ProjectionType::MercatorB {
                    central_meridian: 51.0,
                    standard_parallel: 42.0,
                    false_easting: 0.0,
                    false_northing: 0.0,
                },
            ),
            // JAD69 / Jamaica National Grid
            24200 => (
                Datum::CLARKE_1866,
                ProjectionType::LambertConicConformal {
                    standard_parallel_1: 18.0,
                    standard_parallel_2: 18.0,
                    latitude_of_origin: 18.0,
                    central_meridian: -77.0,
                    scale_factor: 1.0,
                    false_easting: 250_000.0,
                    false_northing: 150_000.0,
                },
            ),
            // NAD27 / Texas South Central, false easting of 2 000 000 US survey feet
            32040 => (
                Datum::CLARKE_1866,
                ProjectionType::LambertConicConformal {
                    standard_parallel_1: 28.0 + 23.0 / 60.0,
                    standard_parallel_2: 30.0 + 17.0 / 60.0,
                    latitude_of_origin: 27.0 + 50.0 / 60.0,
                    central_meridian: -99.0,
                    scale_factor: 1.0,
                    false_easting: 2_000_000.0 * US_SURVEY_FOOT,
                    false_northing: 0.0,
                },
            ),
            // Belge 1972 / Belge Lambert 72. The 29.2985" rotation of the Belgian variant is folded
            // into the central meridian (a / n).
            31300 => (
                Datum::INTERNATIONAL_1924,
                ProjectionType::LambertConicConformal {
                    standard_parallel_1: 49.0 + 50.0 / 60.0,
                    standard_parallel_2: 51.0 + 10.0 / 60.0,
                    latitude_of_origin: 90.0,
                    central_meridian: 4.367_486_673_081_523,
                    scale_factor: 1.0,
                    false_easting: 150_000.01,
                    false_northing: 5_400_088.44,
                },
            ),
            // ETRS89 / LAEA Europe
            3035 => (
                Datum::GRS80,
                ProjectionType::LambertAzimuthalEqualArea {
                    latitude_of_origin: 52.0,
                    central_meridian: 10.0,
                    false_easting: 4_321_000.0,
                    false_northing: 3_210_000.0,
                },
            ),
            // IGNF:MILLER
            310642901 => (Datum::WGS84, ProjectionType::Miller),
            _ => return Err(GeoApiTypesError::UnsupportedCrs(code)),
        };

        Ok(Self {
            code,
            datum,
            projection_type,
        })
    }

    /// EPSG (or IGNF numeric) code.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Returns true for geographic (not projected) CRS.
    pub fn is_geographic(&self) -> bool {
        self.projection_type == ProjectionType::None
    }

    /// Projection from geographic coordinates on the datum into this CRS.
    ///
    /// Returns `None` if the projection is not implemented or its parameters are invalid. Lambert
    /// projections need the `geodesy` feature.
    pub fn get_projection<In, Out>(
        &self,
    ) -> Option<Box<dyn Projection<InPoint = In, OutPoint = Out>>>
    where
        In: NewGeoPoint + 'static,
        Out: NewCartesianPoint2d + 'static,
    {
        match self.projection_type {
            ProjectionType::None => Some(Box::new(IdentityProjection::<In, Out>::new())),
            ProjectionType::WebMercator => Some(Box::new(WebMercator::<In, Out>::new(self.datum))),
            ProjectionType::MercatorA {
                central_meridian,
                scale_factor,
                false_easting,
                false_northing,
            } => Mercator::<In, Out>::variant_a(
                self.datum,
                central_meridian,
                scale_factor,
                false_easting,
                false_northing,
            )
            .ok()
            .map(|p| Box::new(p) as Box<dyn Projection<InPoint = In, OutPoint = Out>>),
            ProjectionType::MercatorB {
                central_meridian,
                standard_parallel,
                false_easting,
                false_northing,
            } => Mercator::<In, Out>::variant_b(
                self.datum,
                central_meridian,
                standard_parallel,
                false_easting,
                false_northing,
            )
            .ok()
            .map(|p| Box::new(p) as Box<dyn Projection<InPoint = In, OutPoint = Out>>),
            ProjectionType::Miller => Some(Box::new(Miller::<In, Out>::new(self.datum))),
            #[cfg(feature = "geodesy")]
            ProjectionType::LambertAzimuthalEqualArea { .. }
            | ProjectionType::LambertConicConformal { .. } => {
                let definition = self.geodesy_definition()?;
                GeodesyProjection::<In, Out>::new(&definition)
                    .ok()
                    .map(|p| Box::new(p) as Box<dyn Projection<InPoint = In, OutPoint = Out>>)
            }
            #[cfg(not(feature = "geodesy"))]
            ProjectionType::LambertAzimuthalEqualArea { .. }
            | ProjectionType::LambertConicConformal { .. } => None,
        }
    }

    /// Operator definition of the projection in the `geodesy` syntax, e.g.
    /// `laea lat_0=52 lon_0=10 x_0=4321000 y_0=3210000 ellps=6378137,298.257222101`.
    #[cfg(feature = "geodesy")]
    pub fn geodesy_definition(&self) -> Option<String> {
        let ellps = format!(
            "{},{}",
            self.datum.semimajor(),
            self.datum.inv_flattening()
        );
        match self.projection_type {
            ProjectionType::LambertAzimuthalEqualArea {
                latitude_of_origin,
                central_meridian,
                false_easting,
                false_northing,
            } => Some(format!(
                "laea lat_0={latitude_of_origin} lon_0={central_meridian} \
                 x_0={false_easting} y_0={false_northing} ellps={ellps}"
            )),
            ProjectionType::LambertConicConformal {
                standard_parallel_1,
                standard_parallel_2,
                latitude_of_origin,
                central_meridian,
                scale_factor,
                false_easting,
                false_northing,
            } => Some(format!(
                "lcc lat_1={standard_parallel_1} lat_2={standard_parallel_2} \
                 lat_0={latitude_of_origin} lon_0={central_meridian} k_0={scale_factor} \
                 x_0={false_easting} y_0={false_northing} ellps={ellps}"
            )),
            _ => None,
        }
    }
}
