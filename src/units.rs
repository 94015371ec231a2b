//! Length units and the conversion to centimil.
//!
//! Parameters are entered in document units. Every coordinate the generators
//! produce is in centimil (1/100 mil), the unit of the output format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FpwError, FpwResult};

/// Centimil per millimetre.
pub const CENTIMIL_PER_MM: f64 = (1000.0 / 25.4) * 100.0;

/// Document length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    /// Thousandth of an inch.
    Mil,
    /// Hundredth of a mil (centimil).
    #[serde(alias = "mil/100")]
    Mil100,
    /// Millimetre.
    Mm,
}

impl Units {
    /// Scale factor from this unit to centimil.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Mil => 100.0,
            Self::Mil100 => 1.0,
            Self::Mm => CENTIMIL_PER_MM,
        }
    }

    /// Silkscreen line width ceiling in this unit (40 mil). Widths must stay
    /// strictly below it.
    #[must_use]
    pub const fn max_silkscreen_line_width(self) -> f64 {
        match self {
            Self::Mil => 40.0,
            Self::Mil100 => 4000.0,
            Self::Mm => 1.0,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mil => write!(f, "mil"),
            Self::Mil100 => write!(f, "mil/100"),
            Self::Mm => write!(f, "mm"),
        }
    }
}

/// Returns the centimil multiplier for the selected unit.
///
/// # Errors
///
/// Returns [`FpwError::InvalidUnits`] when no unit is selected.
pub fn multiplier_for(units: Option<Units>) -> FpwResult<f64> {
    units.map(Units::multiplier).ok_or(FpwError::InvalidUnits)
}
