//! Plastic leaded chip carrier footprints.
//!
//! J-lead pads on all four edges; the body outline is cut back wherever it
//! runs over a pad row.

use super::perimeter::{push_outline, push_outside_marker, push_pads, walk};
use super::{Layout, PackageGenerator};
use crate::error::FpwResult;
use crate::geometry::{BoundingBox, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Generator for PLCC packages.
#[derive(Debug, Default)]
pub struct PlccGenerator;

impl PackageGenerator for PlccGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::Plcc
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        let mut layout = Layout::new(params)?;
        let perimeter = walk(&layout, PackageFamily::Plcc)?;
        push_pads(&mut layout, &perimeter, false);

        layout.close_copper();

        let line_width = layout.silk_width();
        let outline = BoundingBox::centred(
            layout.c(params.silkscreen_width),
            layout.c(params.silkscreen_length),
        );
        if params.silkscreen_package_outline {
            push_outline(&mut layout, &perimeter, outline, line_width, false);
        }
        if params.silkscreen_indicate_pin1 {
            push_outside_marker(&mut layout, &perimeter, line_width);
        }

        Ok(layout.finish())
    }
}
