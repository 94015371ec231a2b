//! Pin grid array footprints.
//!
//! Same grid and naming as BGA, but with plated through-hole pins and no
//! fiducials.

use super::bga::{log_unused_exceptions, push_corner_marker};
use super::{grid_offset, pin_flags, Layout, PackageGenerator};
use crate::designator::designator_for;
use crate::error::FpwResult;
use crate::geometry::{BoundingBox, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Generator for PGA packages.
#[derive(Debug, Default)]
pub struct PgaGenerator;

impl PackageGenerator for PgaGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::Pga
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        params.require_grid()?;
        let mut layout = Layout::new(params)?;

        let cols = params.number_of_columns;
        let rows = params.number_of_rows;
        let pitch_x = layout.c(params.pitch_x);
        let pitch_y = layout.c(params.pitch_y);

        for row in 0..rows {
            for col in 0..cols {
                let name = designator_for(row, col);
                if !params.pin_pad_exceptions.is_populated(&name) {
                    continue;
                }
                let square = params.pin1_is_square && row == 0 && col == 0;
                layout.push_pin(
                    &name,
                    grid_offset(cols, col, pitch_x),
                    grid_offset(rows, row, pitch_y),
                    pin_flags(params.pad_shape, square),
                );
            }
        }
        log_unused_exceptions(params);

        layout.close_copper();

        let silk = BoundingBox::centred(
            layout.c(params.silkscreen_width),
            layout.c(params.silkscreen_length),
        );
        let line_width = layout.silk_width();
        if params.silkscreen_package_outline {
            layout.push_rect(silk, line_width);
        }
        if params.silkscreen_indicate_pin1 {
            push_corner_marker(&mut layout, silk, pitch_x / 2.0, line_width);
        }

        Ok(layout.finish())
    }
}
