//! Small outline footprints.
//!
//! Two rows of gull-wing pads spaced on X by `distance_x`, numbered down the
//! left row and back up the right one.

use super::perimeter::row_spacing;
use super::{grid_offset, pad_flags, Layout, PackageGenerator};
use crate::error::{FpwError, FpwResult};
use crate::geometry::{Arc, BoundingBox, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Generator for SO packages.
#[derive(Debug, Default)]
pub struct SoGenerator;

impl PackageGenerator for SoGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::So
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        let pins = params.number_of_pins;
        if pins < 2 || pins % 2 != 0 {
            return Err(FpwError::unsupported_pin_count(PackageFamily::So, pins));
        }
        let mut layout = Layout::new(params)?;
        let spacing = row_spacing(&layout, &params.distance_x, 'x')?;

        let rows = pins / 2;
        let pitch_y = layout.c(params.pitch_y);
        for number in 1..=pins {
            let (x, row) = if number <= rows {
                (-spacing / 2.0, number - 1)
            } else {
                (spacing / 2.0, pins - number)
            };
            push_lead(&mut layout, number, x, grid_offset(rows, row, pitch_y));
        }
        if params.thermal {
            layout.push_thermal_pad(&(pins + 1).to_string());
        }

        layout.close_copper();
        push_dual_row_silkscreen(&mut layout, spacing, grid_offset(rows, 0, pitch_y));

        Ok(layout.finish())
    }
}

/// Adds one gull-wing pad, long along X.
pub(crate) fn push_lead(layout: &mut Layout<'_>, number: u32, x: f64, y: f64) {
    let params = layout.params();
    let square = params.pin1_is_square && number == 1;
    layout.push_rect_pad(
        &number.to_string(),
        x,
        y,
        layout.c(params.pad_length),
        layout.c(params.pad_width),
        layout.c(params.pad_solder_mask_clearance),
        pad_flags(params.pad_shape, square),
    );
}

/// Body outline between the two pad rows and a dot left of pin 1.
///
/// `pin1_y` is the Y of the top left pad.
pub(crate) fn push_dual_row_silkscreen(layout: &mut Layout<'_>, spacing: f64, pin1_y: f64) {
    let params = layout.params();
    let line_width = layout.silk_width();
    let pad_reach = layout.c(params.pad_length) / 2.0 + layout.c(params.pad_solder_mask_clearance);

    let inner_edge = spacing / 2.0 - pad_reach - line_width;
    let half_width = (layout.c(params.silkscreen_width) / 2.0).min(inner_edge);
    let half_length = layout.c(params.silkscreen_length) / 2.0;

    if params.silkscreen_package_outline && half_width > 0.0 {
        layout.push_rect(
            BoundingBox::new(-half_width, -half_length, half_width, half_length),
            line_width,
        );
    }
    if params.silkscreen_indicate_pin1 {
        let radius = line_width;
        let x = -spacing / 2.0 - pad_reach - 2.0 * line_width - radius;
        layout.push_arc(Arc::circle(x, pin1_y, radius, line_width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ObjectFlags;
    use crate::packages::test_support::{assert_envelope, numbers};
    use crate::params::{DualRowDistance, PadShape};
    use crate::units::Units;

    fn soic8() -> ParameterModel {
        let mut p = ParameterModel::new(PackageFamily::So, Units::Mm);
        p.number_of_pins = 8;
        p.number_of_columns = 2;
        p.number_of_rows = 4;
        p.pitch_y = 1.27;
        p.pad_shape = PadShape::Square;
        p.pad_length = 1.55;
        p.pad_width = 0.6;
        p.pad_clearance = 0.2;
        p.pad_solder_mask_clearance = 0.05;
        p.distance_x = DualRowDistance::center(5.4);
        p.body_width = 3.9;
        p.body_length = 4.9;
        p.body_height = 1.75;
        p.silkscreen_package_outline = true;
        p.silkscreen_indicate_pin1 = true;
        p.silkscreen_width = 3.9;
        p.silkscreen_length = 4.9;
        p.silkscreen_line_width = 0.12;
        p
    }

    #[test]
    fn two_rows_counter_clockwise() {
        let geometry = SoGenerator.generate(&soic8()).unwrap();
        let pads: Vec<_> = geometry.pads().collect();
        assert_eq!(pads.len(), 8);
        let m = Units::Mm.multiplier();
        assert!((pads[0].centre().0 + 2.7 * m).abs() < 1e-6);
        assert!((pads[0].centre().1 + 1.905 * m).abs() < 1e-6);
        assert!((pads[7].centre().1 - pads[0].centre().1).abs() < 1e-6);
        assert!(pads[4].centre().0 > 0.0);
        assert_eq!(numbers(&geometry), ["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert!(pads.iter().all(|p| p.flags == ObjectFlags::SQUARE));
        assert_envelope(&geometry);
    }

    #[test]
    fn outline_stays_between_rows() {
        let geometry = SoGenerator.generate(&soic8()).unwrap();
        let m = Units::Mm.multiplier();
        // 2.7 - 0.775 - 0.05 - 0.12
        let limit = 1.755 * m;
        assert_eq!(geometry.lines().count(), 4);
        assert!(geometry.lines().all(|l| l.x0.abs() <= limit + 1e-6));
        let dot = geometry.arcs().next().unwrap();
        assert!(dot.x < -2.7 * m);
    }

    #[test]
    fn inner_distance_mode() {
        let mut p = soic8();
        p.distance_x = DualRowDistance::inner(3.85);
        let geometry = SoGenerator.generate(&p).unwrap();
        let m = Units::Mm.multiplier();
        let first = geometry.pads().next().unwrap();
        assert!((first.centre().0 + 2.7 * m).abs() < 1e-6);
    }

    #[test]
    fn thermal_pad_numbered_last() {
        let mut p = soic8();
        p.thermal = true;
        p.thermal_width = 2.3;
        p.thermal_length = 3.0;
        let geometry = SoGenerator.generate(&p).unwrap();
        assert_eq!(geometry.pads().last().unwrap().number, "9");
    }

    #[test]
    fn missing_distance_mode() {
        let mut p = soic8();
        p.distance_x = DualRowDistance {
            center: Some(5.4),
            inner: Some(3.85),
            outer: None,
        };
        assert!(matches!(
            SoGenerator.generate(&p),
            Err(FpwError::InvalidDistanceMode { axis: 'x' })
        ));
    }
}
