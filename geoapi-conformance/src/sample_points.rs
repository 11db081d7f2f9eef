//! Known-good sample points for map projections, see [`SamplePoints`].

use crate::error::ConformanceError;
use geoapi_types::geo::US_SURVEY_FOOT;
use geoapi_types::{Point2d, Rect};
use lazy_static::lazy_static;
use std::fmt::{Display, Formatter};

/// Number of values per point in the sample arrays.
pub const SAMPLE_DIMENSION: usize = 2;

lazy_static! {
    static ref SAMPLES: Vec<SamplePoints> = build_samples();
}

/// Sample coordinates for the conversion from a geographic CRS to a projected CRS.
///
/// Each record holds two points. The first one is the natural origin of the projection and converts to the false
/// easting and northing. The second one is a sample point with its published projected coordinates. Source
/// coordinates are (longitude, latitude) in degrees, projected coordinates are in metres.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePoints {
    target_crs: i32,
    operation: i32,
    source_points: [f64; 4],
    target_points: [f64; 4],
    area_of_validity: Rect,
}

impl SamplePoints {
    fn new(
        target_crs: i32,
        operation: i32,
        origin: (f64, f64),
        false_origin: (f64, f64),
        sample: (f64, f64),
        projected: (f64, f64),
        area_of_validity: Rect,
    ) -> Self {
        // Some published areas do not include the sample point itself.
        let area_of_validity = area_of_validity.merge_point(&Point2d::new(sample.0, sample.1));

        Self {
            target_crs,
            operation,
            source_points: [origin.0, origin.1, sample.0, sample.1],
            target_points: [false_origin.0, false_origin.1, projected.0, projected.1],
            area_of_validity,
        }
    }

    /// Returns the sample points for the given target CRS code.
    pub fn get(target_crs: i32) -> Result<&'static SamplePoints, ConformanceError> {
        SAMPLES
            .iter()
            .find(|sample| sample.target_crs == target_crs)
            .ok_or(ConformanceError::UnknownSample(target_crs))
    }

    /// All registered samples.
    pub fn all() -> &'static [SamplePoints] {
        &SAMPLES
    }

    /// Codes of all registered target CRS.
    pub fn codes() -> impl Iterator<Item = i32> {
        SAMPLES.iter().map(|sample| sample.target_crs)
    }

    /// EPSG code of the target CRS, typically a projected CRS.
    pub fn target_crs(&self) -> i32 {
        self.target_crs
    }

    /// EPSG code of the operation from the base CRS to the target CRS.
    pub fn operation(&self) -> i32 {
        self.operation
    }

    /// Points in the source (geographic) CRS.
    pub fn source_points(&self) -> &[f64] {
        &self.source_points
    }

    /// Expected results of the conversion of [`source_points`](Self::source_points).
    pub fn target_points(&self) -> &[f64] {
        &self.target_points
    }

    /// The sample point (not the natural origin) in the source CRS.
    pub fn sample_source(&self) -> Point2d {
        Point2d::new(self.source_points[2], self.source_points[3])
    }

    /// Number of values per point.
    pub fn dimension(&self) -> usize {
        SAMPLE_DIMENSION
    }

    /// Area in which to test other points, in units of the source CRS.
    pub fn area_of_validity(&self) -> &Rect {
        &self.area_of_validity
    }
}

impl Display for SamplePoints {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SamplePoints[{:?} ⇒ {:?} in EPSG:{}]",
            self.source_points, self.target_points, self.target_crs
        )
    }
}

/// Degrees, minutes and seconds to decimal degrees.
fn dms(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + (minutes + seconds / 60.0) / 60.0
}

fn area(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Rect {
    Rect::new(lon_min, lat_min, lon_max, lat_max)
}

fn build_samples() -> Vec<SamplePoints> {
    vec![
        // Makassar / NEIEZ
        SamplePoints::new(
            3002,
            19905,
            (110.0, 0.0),
            (3_900_000.00, 900_000.00),
            (120.0, -3.0),
            (5_009_726.58, 569_150.82),
            area(117.6, -7.9, 121.0, 2.0),
        ),
        // Pulkovo 1942 / Caspian Sea Mercator
        SamplePoints::new(
            3388,
            19884,
            (51.0, 0.0),
            (0.00, 0.00),
            (53.0, 53.0),
            (165_704.29, 5_171_848.07),
            area(46.68, 36.58, 54.76, 47.11),
        ),
        // WGS 84 / Pseudo-Mercator
        SamplePoints::new(
            3857,
            3856,
            (0.0, 0.0),
            (0.00, 0.00),
            (-dms(100.0, 20.0, 0.0), dms(24.0, 22.0, 54.433)),
            (-11_169_055.58, 2_800_000.00),
            area(-180.0, -85.0, 180.0, 85.0),
        ),
        // JAD69 / Jamaica National Grid
        SamplePoints::new(
            24200,
            19910,
            (-77.0, 18.0),
            (250_000.00, 150_000.00),
            (-dms(76.0, 56.0, 37.26), dms(17.0, 55.0, 55.80)),
            (255_966.58, 142_493.51),
            area(-78.4, 17.65, -76.1, 18.6),
        ),
        // NAD27 / Texas South Central, published in US survey feet
        SamplePoints::new(
            32040,
            14204,
            (-99.0, dms(27.0, 50.0, 0.0)),
            (2_000_000.00 * US_SURVEY_FOOT, 0.00 * US_SURVEY_FOOT),
            (-96.0, dms(28.0, 30.0, 0.0)),
            (2_963_503.91 * US_SURVEY_FOOT, 254_759.80 * US_SURVEY_FOOT),
            area(-105.0, 27.82, -93.41, 30.66),
        ),
        // Belge 1972 / Belge Lambert 72
        SamplePoints::new(
            31300,
            19902,
            (dms(4.0, 21.0, 24.983), 90.0),
            (150_000.01, 5_400_088.44),
            (dms(5.0, 48.0, 26.533), dms(50.0, 40.0, 46.461)),
            (251_763.20, 153_034.13),
            area(2.54, 49.51, 6.4, 51.5),
        ),
        // ETRS89 / LAEA Europe
        SamplePoints::new(
            3035,
            19986,
            (10.0, 52.0),
            (4_321_000.00, 3_210_000.00),
            (5.0, 50.0),
            (3_962_799.45, 2_999_718.85),
            area(-31.53, 27.75, 45.00, 71.15),
        ),
        // IGNF:MILLER
        SamplePoints::new(
            310642901,
            310642901,
            (0.0, 0.0),
            (0.00, 0.00),
            (2.478917, 48.805639),
            (275_951.78, 5_910_061.78),
            area(-180.0, -90.0, 180.0, 90.0),
        ),
    ]
}
