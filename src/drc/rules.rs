//! Per-family design rules.

use crate::params::{PackageFamily, PadShape, ParameterModel};

/// How pad spacing is measured for a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Round pads or pins on a `pitch_x` by `pitch_y` grid.
    Grid,
    /// One row of round pins along X.
    InlineX,
    /// One column of round pins along Y.
    InlineY,
    /// Two rectangular pads facing each other on X.
    Chip,
    /// Two rows of rectangular pads spaced by `distance_x`.
    DualRow,
    /// Rectangular pads on all four edges spaced by `distance_x` and `distance_y`.
    Perimeter,
}

/// Rules the checker applies to one family.
#[derive(Debug, Clone, Copy)]
pub struct FamilyRules {
    /// Pad shapes allowed as the general shape.
    pub pad_shapes: &'static [PadShape],
    /// Spacing model.
    pub spacing: Spacing,
    /// True if the family can carry an exposed pad.
    pub thermal: bool,
}

const ROUND_ONLY: &[PadShape] = &[PadShape::Round];
const THROUGH_HOLE: &[PadShape] = &[PadShape::Round, PadShape::Square, PadShape::Octagonal];
const RECTANGULAR: &[PadShape] = &[PadShape::Square, PadShape::RoundElongated];

/// Returns the rules for `family`.
#[must_use]
pub const fn rules_for(family: PackageFamily) -> FamilyRules {
    let (pad_shapes, spacing, thermal) = match family {
        PackageFamily::Bga => (ROUND_ONLY, Spacing::Grid, false),
        PackageFamily::Pga | PackageFamily::Dip => (THROUGH_HOLE, Spacing::Grid, false),
        PackageFamily::Sip => (THROUGH_HOLE, Spacing::InlineY, false),
        PackageFamily::To | PackageFamily::To92 | PackageFamily::Do => {
            (THROUGH_HOLE, Spacing::InlineX, false)
        }
        PackageFamily::Capc | PackageFamily::Indc | PackageFamily::Resc => {
            (RECTANGULAR, Spacing::Chip, false)
        }
        PackageFamily::So | PackageFamily::Sot => (RECTANGULAR, Spacing::DualRow, true),
        PackageFamily::Plcc => (RECTANGULAR, Spacing::Perimeter, false),
        PackageFamily::Qfp | PackageFamily::Qfn => (RECTANGULAR, Spacing::Perimeter, true),
    };
    FamilyRules {
        pad_shapes,
        spacing,
        thermal,
    }
}

/// Describes why `number_of_pins` cannot be laid out, if it cannot.
#[must_use]
pub fn pin_count_problem(params: &ParameterModel) -> Option<String> {
    let pins = params.number_of_pins;
    let ok = match params.package_family {
        PackageFamily::Bga | PackageFamily::Pga => {
            pins <= params.number_of_rows.saturating_mul(params.number_of_columns)
        }
        PackageFamily::Dip | PackageFamily::So => pins >= 2 && pins % 2 == 0,
        PackageFamily::Capc | PackageFamily::Indc | PackageFamily::Resc | PackageFamily::Do => {
            pins == 2
        }
        PackageFamily::To92 => pins == 3,
        PackageFamily::Sip | PackageFamily::To => pins >= 1,
        PackageFamily::Sot => matches!(pins, 3 | 5 | 6 | 8),
        PackageFamily::Plcc | PackageFamily::Qfp | PackageFamily::Qfn => {
            pins == params.number_of_rows.saturating_add(params.number_of_columns).saturating_mul(2)
        }
    };
    (!ok).then(|| {
        format!(
            "{} footprints cannot be laid out with {pins} pins",
            params.package_family
        )
    })
}
