//! Transistor outline footprints (TO-220 style).
//!
//! An inline row of through-hole pins along X inside a rectangular body. The
//! heat tab is drawn as a line behind the pin row.

use super::{grid_offset, pin_flags, Layout, PackageGenerator};
use crate::error::{FpwError, FpwResult};
use crate::geometry::{Arc, BoundingBox, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Generator for TO packages.
#[derive(Debug, Default)]
pub struct ToGenerator;

impl PackageGenerator for ToGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::To
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        let pins = params.number_of_pins;
        if pins == 0 {
            return Err(FpwError::unsupported_pin_count(PackageFamily::To, pins));
        }
        let mut layout = Layout::new(params)?;
        push_inline_pins(&mut layout, pins);

        layout.close_copper();

        let line_width = layout.silk_width();
        let reach = pin_reach(&layout);
        let end_pin = grid_offset(pins, pins - 1, layout.c(params.pitch_x)) + reach + line_width;
        let half_width = (layout.c(params.silkscreen_width) / 2.0).max(end_pin);
        let half_length = layout.c(params.silkscreen_length) / 2.0;
        let outline = BoundingBox::new(-half_width, -half_length, half_width, half_length);

        if params.silkscreen_package_outline {
            layout.push_rect(outline, line_width);
            let tab_y = -(reach + line_width);
            if tab_y > outline.ymin {
                layout.push_line(outline.xmin, tab_y, outline.xmax, tab_y, line_width);
            }
        }
        if params.silkscreen_indicate_pin1 {
            let x = grid_offset(pins, 0, layout.c(params.pitch_x));
            push_dot_below(&mut layout, x, outline.ymax, line_width);
        }

        Ok(layout.finish())
    }
}

/// Places `pins` through-hole pins on the X axis, pin 1 leftmost.
pub(crate) fn push_inline_pins(layout: &mut Layout<'_>, pins: u32) {
    let params = layout.params();
    let pitch_x = layout.c(params.pitch_x);
    for index in 0..pins {
        let square = params.pin1_is_square && index == 0;
        layout.push_pin(
            &(index + 1).to_string(),
            grid_offset(pins, index, pitch_x),
            0.0,
            pin_flags(params.pad_shape, square),
        );
    }
}

/// Radius of a pin including its solder mask clearance.
pub(crate) fn pin_reach(layout: &Layout<'_>) -> f64 {
    let params = layout.params();
    layout.c(params.pad_diameter) / 2.0 + layout.c(params.pad_solder_mask_clearance)
}

/// Adds a small circle under `(x, edge)` marking pin 1.
pub(crate) fn push_dot_below(layout: &mut Layout<'_>, x: f64, edge: f64, line_width: f64) {
    let radius = line_width;
    layout.push_arc(Arc::circle(x, edge + 2.0 * line_width + radius, radius, line_width));
}
