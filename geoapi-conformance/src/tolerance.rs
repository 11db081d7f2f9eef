//! Adjustment of comparison tolerances to the units of the compared coordinates.
//!
//! Tolerances are usually given as a linear distance (metres). That is fine for projected coordinates, but the
//! result of an inverse projection is in degrees, and a tolerance of 1 cm must be converted to a fraction of a degree
//! before it can be applied. A [`ToleranceModifier`] performs such a conversion for one kind of CRS, and
//! [`ToleranceModifiers`] selects a modifier by [`CrsFamily`].

use crate::calculation_type::CalculationType;
use crate::compare::check_dimension;
use crate::error::ConformanceError;
use geoapi_types::geo::Crs;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

/// Length of a nautical mile in metres, one minute of arc on the reference sphere.
pub const NAUTICAL_MILE: f64 = 1852.0;

const METRES_PER_DEGREE: f64 = NAUTICAL_MILE * 60.0;

/// Converts tolerances to the units of the coordinates they are applied to.
pub trait ToleranceModifier: Debug + Send + Sync {
    /// Adjusts the tolerances in place. `coordinate` is the actual coordinate being compared and has the same length
    /// as `tolerances`. This method is never called for [`CalculationType::Strict`].
    fn adjust_in_place(&self, tolerances: &mut [f64], coordinate: &[f64], mode: CalculationType);

    /// Returns the adjusted copy of `tolerances`.
    ///
    /// The tolerances are returned unchanged for [`CalculationType::Strict`].
    fn adjust(
        &self,
        tolerances: &[f64],
        coordinate: &[f64],
        mode: CalculationType,
    ) -> Result<Vec<f64>, ConformanceError> {
        check_dimension("tolerances and coordinate", coordinate.len(), tolerances.len())?;

        let mut adjusted = tolerances.to_vec();
        if mode != CalculationType::Strict {
            self.adjust_in_place(&mut adjusted, coordinate, mode);
        }

        Ok(adjusted)
    }
}

/// Leaves the tolerances unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModifier;

impl ToleranceModifier for NoModifier {
    fn adjust_in_place(
        &self,
        _tolerances: &mut [f64],
        _coordinate: &[f64],
        _mode: CalculationType,
    ) {
    }
}

/// Converts λ and φ tolerances from metres to degrees.
///
/// Both tolerances are divided by the length of one degree of arc (60 nautical miles). The λ tolerance is then divided
/// by `|cos φ|`, where φ is the latitude of the compared coordinate, since parallels get shorter towards the poles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetresToDegrees {
    lambda_dimension: usize,
    phi_dimension: usize,
    inverse_only: bool,
}

impl MetresToDegrees {
    /// Geographic coordinates in (λ, φ) order, converted for every non-strict comparison.
    pub const GEOGRAPHIC: Self = Self {
        lambda_dimension: 0,
        phi_dimension: 1,
        inverse_only: false,
    };

    /// Geographic coordinates in (φ, λ) order, converted for every non-strict comparison.
    pub const GEOGRAPHIC_PHI_LAMBDA: Self = Self {
        lambda_dimension: 1,
        phi_dimension: 0,
        inverse_only: false,
    };

    /// Map projection from (λ, φ) coordinates: the forward results are in metres, so only the results of the inverse
    /// transform are converted.
    pub const PROJECTION: Self = Self {
        lambda_dimension: 0,
        phi_dimension: 1,
        inverse_only: true,
    };

    /// Map projection from (φ, λ) coordinates.
    pub const PROJECTION_FROM_PHI_LAMBDA: Self = Self {
        lambda_dimension: 1,
        phi_dimension: 0,
        inverse_only: true,
    };
}

impl ToleranceModifier for MetresToDegrees {
    fn adjust_in_place(&self, tolerances: &mut [f64], coordinate: &[f64], mode: CalculationType) {
        if self.inverse_only && mode != CalculationType::InverseTransform {
            return;
        }

        let Some(phi) = coordinate.get(self.phi_dimension).copied() else {
            return;
        };
        if self.lambda_dimension >= tolerances.len() {
            return;
        }

        tolerances[self.phi_dimension] /= METRES_PER_DEGREE;

        let cos_phi = phi.to_radians().cos().abs();
        if cos_phi.is_finite() {
            tolerances[self.lambda_dimension] /= METRES_PER_DEGREE * cos_phi;
        } else {
            tolerances[self.lambda_dimension] /= METRES_PER_DEGREE;
        }
    }
}

/// Multiplies the tolerances by per-axis factors for the selected calculation types.
///
/// Axes without a factor are left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    applies_to: Vec<CalculationType>,
    factors: Vec<f64>,
}

impl Scale {
    /// Creates a new modifier. Factors must be finite and non-negative.
    pub fn new(applies_to: &[CalculationType], factors: &[f64]) -> Result<Self, ConformanceError> {
        if let Some(factor) = factors.iter().find(|f| !(f.is_finite() && **f >= 0.0)) {
            return Err(ConformanceError::Configuration(format!(
                "tolerance scale factor must be finite and non-negative, got {factor}"
            )));
        }

        Ok(Self {
            applies_to: applies_to.to_vec(),
            factors: factors.to_vec(),
        })
    }
}

impl ToleranceModifier for Scale {
    fn adjust_in_place(&self, tolerances: &mut [f64], _coordinate: &[f64], mode: CalculationType) {
        if !self.applies_to.contains(&mode) {
            return;
        }

        for (tolerance, factor) in tolerances.iter_mut().zip(&self.factors) {
            *tolerance *= factor;
        }
    }
}

/// Per axis maximum of the tolerances computed by two modifiers.
#[derive(Debug, Clone)]
pub struct Maximum {
    first: Arc<dyn ToleranceModifier>,
    second: Arc<dyn ToleranceModifier>,
}

impl Maximum {
    /// Creates a new modifier.
    pub fn new(first: Arc<dyn ToleranceModifier>, second: Arc<dyn ToleranceModifier>) -> Self {
        Self { first, second }
    }
}

impl ToleranceModifier for Maximum {
    fn adjust_in_place(&self, tolerances: &mut [f64], coordinate: &[f64], mode: CalculationType) {
        let mut other = tolerances.to_vec();
        self.first.adjust_in_place(tolerances, coordinate, mode);
        self.second.adjust_in_place(&mut other, coordinate, mode);

        for (tolerance, other) in tolerances.iter_mut().zip(other) {
            *tolerance = tolerance.max(other);
        }
    }
}

/// Applies one modifier after another.
#[derive(Debug, Clone)]
pub struct Concatenate {
    first: Arc<dyn ToleranceModifier>,
    second: Arc<dyn ToleranceModifier>,
}

impl Concatenate {
    /// Creates a new modifier.
    pub fn new(first: Arc<dyn ToleranceModifier>, second: Arc<dyn ToleranceModifier>) -> Self {
        Self { first, second }
    }
}

impl ToleranceModifier for Concatenate {
    fn adjust_in_place(&self, tolerances: &mut [f64], coordinate: &[f64], mode: CalculationType) {
        self.first.adjust_in_place(tolerances, coordinate, mode);
        self.second.adjust_in_place(tolerances, coordinate, mode);
    }
}

/// Kind of coordinate reference system.
///
/// This is an open set: besides the predefined values any name can be used. Names are case insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrsFamily(Cow<'static, str>);

impl CrsFamily {
    /// Geographic CRS with coordinates in degrees.
    pub const GEOGRAPHIC: CrsFamily = CrsFamily(Cow::Borrowed("geographic"));
    /// Projected CRS, the base CRS being geographic.
    pub const PROJECTED: CrsFamily = CrsFamily(Cow::Borrowed("projected"));

    /// Creates a family with the given name.
    pub fn new(name: &str) -> Self {
        Self(Cow::Owned(name.to_lowercase()))
    }

    /// Family of the CRS with the given EPSG code. Codes unknown to `geoapi-types` are taken as
    /// projected.
    pub fn of_epsg(code: i32) -> Self {
        match Crs::from_epsg(code) {
            Ok(crs) if crs.is_geographic() => Self::GEOGRAPHIC,
            _ => Self::PROJECTED,
        }
    }

    /// Name of the family.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for CrsFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry of tolerance modifiers keyed by [`CrsFamily`].
#[derive(Debug, Clone)]
pub struct ToleranceModifiers {
    modifiers: HashMap<CrsFamily, Arc<dyn ToleranceModifier>>,
}

impl ToleranceModifiers {
    /// Registry without any modifier.
    pub fn empty() -> Self {
        Self {
            modifiers: HashMap::new(),
        }
    }

    /// Registers the modifier for the family, returning the one it replaces.
    pub fn register(
        &mut self,
        family: CrsFamily,
        modifier: Arc<dyn ToleranceModifier>,
    ) -> Option<Arc<dyn ToleranceModifier>> {
        self.modifiers.insert(family, modifier)
    }

    /// Builder style [`register`](Self::register).
    pub fn with(mut self, family: CrsFamily, modifier: impl ToleranceModifier + 'static) -> Self {
        self.register(family, Arc::new(modifier));
        self
    }

    /// Modifier registered for the family.
    pub fn get(&self, family: &CrsFamily) -> Option<Arc<dyn ToleranceModifier>> {
        self.modifiers.get(family).cloned()
    }

    /// Modifier registered for the family, or [`NoModifier`] if there is none.
    pub fn get_or_identity(&self, family: &CrsFamily) -> Arc<dyn ToleranceModifier> {
        self.get(family)
            .unwrap_or_else(|| Arc::new(NoModifier) as Arc<dyn ToleranceModifier>)
    }
}

impl Default for ToleranceModifiers {
    fn default() -> Self {
        Self::empty()
            .with(CrsFamily::GEOGRAPHIC, MetresToDegrees::GEOGRAPHIC)
            .with(CrsFamily::PROJECTED, MetresToDegrees::PROJECTION)
    }
}
