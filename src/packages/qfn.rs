//! Quad flat no-lead footprints.
//!
//! Pads on all four edges under the body and an optional exposed pad. Only
//! the corners of the body are drawn on the silkscreen.

use super::perimeter::{push_outline, push_outside_marker, push_pads, walk};
use super::{Layout, PackageGenerator};
use crate::error::FpwResult;
use crate::geometry::{BoundingBox, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Generator for QFN packages.
#[derive(Debug, Default)]
pub struct QfnGenerator;

impl PackageGenerator for QfnGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::Qfn
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        let mut layout = Layout::new(params)?;
        let perimeter = walk(&layout, PackageFamily::Qfn)?;
        push_pads(&mut layout, &perimeter, true);
        if params.thermal {
            layout.push_thermal_pad(&(params.number_of_pins + 1).to_string());
        }

        layout.close_copper();
        layout.push_fiducials();

        let line_width = layout.silk_width();
        let outline = BoundingBox::centred(
            layout.c(params.silkscreen_width),
            layout.c(params.silkscreen_length),
        );
        if params.silkscreen_package_outline {
            push_outline(&mut layout, &perimeter, outline, line_width, true);
        }
        if params.silkscreen_indicate_pin1 {
            push_outside_marker(&mut layout, &perimeter, line_width);
        }

        Ok(layout.finish())
    }
}
