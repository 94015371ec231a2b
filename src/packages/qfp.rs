//! Quad flat package footprints.
//!
//! Gull-wing pads on all four edges, optionally with an exposed pad. Pins may
//! be depopulated by number.

use super::perimeter::{pad_size, push_outline, push_pads, walk, Edge};
use super::{Layout, PackageGenerator};
use crate::error::FpwResult;
use crate::geometry::{Arc, BoundingBox, Geometry};
use crate::params::{Location, PackageFamily, ParameterModel};

/// Generator for QFP packages.
#[derive(Debug, Default)]
pub struct QfpGenerator;

impl PackageGenerator for QfpGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::Qfp
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        let mut layout = Layout::new(params)?;
        let perimeter = walk(&layout, PackageFamily::Qfp)?;
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
            push_outline(&mut layout, &perimeter, outline, line_width, false);
        }
        if params.silkscreen_indicate_pin1 {
            // A dot inside the body, towards pin 1.
            let (_, width) = pad_size(&layout, Edge::Left);
            let radius = width / 2.0;
            let inset = 2.0 * line_width + radius;
            let x = match params.number1_position {
                Location::UpperMiddle => perimeter.slots.first().map_or(0.0, |s| s.x),
                _ => outline.xmin + inset,
            };
            layout.push_arc(Arc::circle(x, outline.ymin + inset, radius, line_width));
        }

        Ok(layout.finish())
    }
}
