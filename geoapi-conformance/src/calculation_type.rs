//! See [`CalculationType`].

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Kind of calculation that produced the coordinates being compared.
///
/// A [`ToleranceModifier`](crate::ToleranceModifier) uses it to decide in which units the tolerance must be
/// expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculationType {
    /// Result of an identity operation (a plain copy). Values are checked for strict equality.
    Strict,
    /// Result of the forward transform of the operation under test.
    DirectTransform,
    /// Result of the inverse transform of the operation under test.
    InverseTransform,
}

impl CalculationType {
    /// All calculation types.
    pub const ALL: [CalculationType; 3] = [
        CalculationType::Strict,
        CalculationType::DirectTransform,
        CalculationType::InverseTransform,
    ];
}

impl Display for CalculationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CalculationType::Strict => "STRICT",
            CalculationType::DirectTransform => "DIRECT_TRANSFORM",
            CalculationType::InverseTransform => "INVERSE_TRANSFORM",
        };
        f.write_str(name)
    }
}
