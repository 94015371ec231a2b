//! Small outline transistor footprints.
//!
//! SOT packages have no general pin formula; each supported pin count has
//! its own arrangement over two columns.

use super::perimeter::row_spacing;
use super::so::{push_dual_row_silkscreen, push_lead};
use super::{grid_offset, Layout, PackageGenerator};
use crate::error::{FpwError, FpwResult};
use crate::geometry::Geometry;
use crate::params::{PackageFamily, ParameterModel};

/// Column of a SOT pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Left,
    Right,
}

/// Pin arrangement of one SOT variant: row slots and `(column, row)` per pin.
struct Arrangement {
    rows: u32,
    pins: &'static [(Column, u32)],
}

use Column::{Left, Right};

const SOT_3: Arrangement = Arrangement {
    rows: 3,
    pins: &[(Left, 0), (Left, 2), (Right, 1)],
};
const SOT_5: Arrangement = Arrangement {
    rows: 3,
    pins: &[(Left, 0), (Left, 1), (Left, 2), (Right, 2), (Right, 0)],
};
const SOT_6: Arrangement = Arrangement {
    rows: 3,
    pins: &[(Left, 0), (Left, 1), (Left, 2), (Right, 2), (Right, 1), (Right, 0)],
};
const SOT_8: Arrangement = Arrangement {
    rows: 4,
    pins: &[
        (Left, 0),
        (Left, 1),
        (Left, 2),
        (Left, 3),
        (Right, 3),
        (Right, 2),
        (Right, 1),
        (Right, 0),
    ],
};

fn arrangement(pins: u32) -> Option<&'static Arrangement> {
    match pins {
        3 => Some(&SOT_3),
        5 => Some(&SOT_5),
        6 => Some(&SOT_6),
        8 => Some(&SOT_8),
        _ => None,
    }
}

/// Number of trailing pins an exposed pad replaces.
///
/// These are the pins sharing the last pin's column, at most two.
fn replaced_by_thermal(pins: &[(Column, u32)]) -> usize {
    let Some(&(last_column, _)) = pins.last() else {
        return 0;
    };
    pins.iter()
        .rev()
        .take(2)
        .take_while(|(column, _)| *column == last_column)
        .count()
}

/// Generator for SOT packages.
#[derive(Debug, Default)]
pub struct SotGenerator;

impl PackageGenerator for SotGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::Sot
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        let Some(arrangement) = arrangement(params.number_of_pins) else {
            return Err(FpwError::unsupported_pin_count(
                PackageFamily::Sot,
                params.number_of_pins,
            ));
        };
        let mut layout = Layout::new(params)?;
        let spacing = row_spacing(&layout, &params.distance_x, 'x')?;
        let pitch_y = layout.c(params.pitch_y);

        let kept = if params.thermal {
            arrangement.pins.len() - replaced_by_thermal(arrangement.pins)
        } else {
            arrangement.pins.len()
        };

        for (number, &(column, row)) in (1u32..).zip(&arrangement.pins[..kept]) {
            let x = match column {
                Left => -spacing / 2.0,
                Right => spacing / 2.0,
            };
            push_lead(&mut layout, number, x, grid_offset(arrangement.rows, row, pitch_y));
        }
        if kept < arrangement.pins.len() {
            let x = match arrangement.pins[kept].0 {
                Left => -spacing / 2.0,
                Right => spacing / 2.0,
            };
            layout.push_thermal_pad_at(&(kept + 1).to_string(), x, 0.0);
        }

        layout.close_copper();
        push_dual_row_silkscreen(&mut layout, spacing, grid_offset(arrangement.rows, 0, pitch_y));

        Ok(layout.finish())
    }
}
