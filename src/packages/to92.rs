//! TO-92 footprints: three inline pins under a round body with a flat side.

use super::to::{push_dot_below, push_inline_pins};
use super::{Layout, PackageGenerator};
use crate::error::{FpwError, FpwResult};
use crate::geometry::{Arc, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Sine (and cosine) of 45 degrees, where the arc meets the flat side.
const FLAT_CORNER: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Generator for TO-92 packages.
#[derive(Debug, Default)]
pub struct To92Generator;

impl PackageGenerator for To92Generator {
    fn family(&self) -> PackageFamily {
        PackageFamily::To92
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        if params.number_of_pins != 3 {
            return Err(FpwError::unsupported_pin_count(
                PackageFamily::To92,
                params.number_of_pins,
            ));
        }
        let mut layout = Layout::new(params)?;
        push_inline_pins(&mut layout, 3);

        layout.close_copper();

        let line_width = layout.silk_width();
        let radius = layout.c(params.silkscreen_width) / 2.0;
        let flat = radius * FLAT_CORNER;
        if params.silkscreen_package_outline {
            // Starts at the lower right and sweeps over the top to the lower left.
            layout.push_arc(Arc {
                x: 0.0,
                y: 0.0,
                width: radius,
                height: radius,
                start_angle: 135.0,
                delta_angle: 270.0,
                line_width,
            });
            layout.push_line(-flat, flat, flat, flat, line_width);
        }
        if params.silkscreen_indicate_pin1 {
            let x = -layout.c(params.pitch_x);
            push_dot_below(&mut layout, x, flat, line_width);
        }

        Ok(layout.finish())
    }
}
