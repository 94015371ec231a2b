//! Two-lead diode footprints (DO outlines), axial or radial.
//!
//! Pin 1 is the cathode, on the left.

use super::to::{pin_reach, push_inline_pins};
use super::{Layout, PackageGenerator};
use crate::error::{FpwError, FpwResult};
use crate::geometry::{Arc, BoundingBox, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Generator for DO packages.
#[derive(Debug, Default)]
pub struct DoGenerator;

impl PackageGenerator for DoGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::Do
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        if params.number_of_pins != 2 {
            return Err(FpwError::unsupported_pin_count(
                PackageFamily::Do,
                params.number_of_pins,
            ));
        }
        let mut layout = Layout::new(params)?;
        push_inline_pins(&mut layout, 2);

        layout.close_copper();

        if params.is_radial {
            push_radial_body(&mut layout);
        } else {
            push_axial_body(&mut layout);
        }

        Ok(layout.finish())
    }
}

/// Body lying between the pins, with lead lines out to them.
fn push_axial_body(layout: &mut Layout<'_>) {
    let params = layout.params();
    let line_width = layout.silk_width();
    let body = BoundingBox::centred(
        layout.c(params.silkscreen_width),
        layout.c(params.silkscreen_length),
    );
    let lead_end = layout.c(params.pitch_x) / 2.0 - pin_reach(layout) - line_width;

    if params.silkscreen_package_outline {
        layout.push_rect(body, line_width);
        if lead_end > body.xmax {
            layout.push_line(-lead_end, 0.0, body.xmin, 0.0, line_width);
            layout.push_line(body.xmax, 0.0, lead_end, 0.0, line_width);
        }
    }
    if params.silkscreen_indicate_pin1 {
        let band = body.xmin + (2.0 * line_width).max(body.width() / 8.0);
        layout.push_line(band, body.ymin, band, body.ymax, line_width);
    }
}

/// Body standing upright: a circle with the band as a chord on the cathode side.
fn push_radial_body(layout: &mut Layout<'_>) {
    let params = layout.params();
    let line_width = layout.silk_width();
    let radius = layout.c(params.silkscreen_width) / 2.0;

    if params.silkscreen_package_outline {
        layout.push_arc(Arc::circle(0.0, 0.0, radius, line_width));
    }
    if params.silkscreen_indicate_pin1 {
        // chord at half the radius: cos 60 deg
        let x = -radius / 2.0;
        let half = radius * (3.0_f64).sqrt() / 2.0;
        layout.push_line(x, -half, x, half, line_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::test_support::assert_envelope;
    use crate::units::Units;

    fn do35() -> ParameterModel {
        let mut p = ParameterModel::new(PackageFamily::Do, Units::Mil);
        p.number_of_pins = 2;
        p.number_of_columns = 2;
        p.number_of_rows = 1;
        p.pitch_x = 400.0;
        p.pad_diameter = 60.0;
        p.pin_drill_diameter = 30.0;
        p.pad_clearance = 10.0;
        p.pin1_is_square = true;
        p.body_width = 160.0;
        p.body_length = 80.0;
        p.body_height = 80.0;
        p.silkscreen_package_outline = true;
        p.silkscreen_indicate_pin1 = true;
        p.silkscreen_width = 160.0;
        p.silkscreen_length = 80.0;
        p.silkscreen_line_width = 10.0;
        p
    }

    #[test]
    fn axial_body_with_leads_and_band() {
        let geometry = DoGenerator.generate(&do35()).unwrap();
        let pins: Vec<_> = geometry.pins().collect();
        assert_eq!((pins[0].x, pins[1].x), (-20_000.0, 20_000.0));

        let lines: Vec<_> = geometry.lines().collect();
        // rectangle, two lead lines, band
        assert_eq!(lines.len(), 7);
        assert_eq!((lines[4].x0, lines[4].x1), (-16_000.0, -8_000.0));
        let band = lines[6];
        assert!((band.x0 + 6_000.0).abs() < 1e-9);
        assert_envelope(&geometry);
    }

    #[test]
    fn radial_body_is_a_circle() {
        let mut p = do35();
        p.is_radial = true;
        p.pitch_x = 100.0;
        let geometry = DoGenerator.generate(&p).unwrap();
        let body = geometry.arcs().next().unwrap();
        assert!((body.delta_angle - 360.0).abs() < f64::EPSILON);
        assert!((body.width - 8_000.0).abs() < 1e-9);
        let band = geometry.lines().next().unwrap();
        assert!((band.x0 + 4_000.0).abs() < 1e-9);
    }

    #[test]
    fn needs_two_pins() {
        let mut p = do35();
        p.number_of_pins = 3;
        assert!(DoGenerator.generate(&p).is_err());
    }
}
