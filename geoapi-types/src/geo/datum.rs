/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// WGS 84 ellipsoid.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257223563,
    };

    /// GRS 1980 ellipsoid (ETRS89, NAD83).
    pub const GRS80: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257222101,
    };

    /// Bessel 1841 ellipsoid (Makassar).
    pub const BESSEL_1841: Self = Datum {
        semimajor: 6_377_397.155,
        inv_flattening: 299.1528128,
    };

    /// Krassowsky 1940 ellipsoid (Pulkovo 1942).
    pub const KRASSOWSKY_1940: Self = Datum {
        semimajor: 6_378_245.0,
        inv_flattening: 298.3,
    };

    /// Clarke 1866 ellipsoid (NAD27, JAD69).
    pub const CLARKE_1866: Self = Datum {
        semimajor: 6_378_206.4,
        inv_flattening: 294.978_698_213_898,
    };

    /// International 1924 ellipsoid (Belge 1972).
    pub const INTERNATIONAL_1924: Self = Datum {
        semimajor: 6_378_388.0,
        inv_flattening: 297.0,
    };

    /// Creates a new ellipsoid. Use `f64::INFINITY` as inverse flattening for a sphere.
    pub const fn new(semimajor: f64, inv_flattening: f64) -> Self {
        Self {
            semimajor,
            inv_flattening,
        }
    }

    /// Semi-major axis in metres.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Inverse flattening.
    pub fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }

    /// Flattening.
    pub fn flattening(&self) -> f64 {
        1.0 / self.inv_flattening
    }

    /// First eccentricity.
    pub fn eccentricity(&self) -> f64 {
        let f = self.flattening();
        (2.0 * f - f * f).sqrt()
    }
}
