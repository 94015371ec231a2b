//! Dual inline package footprints.
//!
//! Two columns of through-hole pins at `±pitch_x / 2`. Pins are numbered
//! down the left column and back up the right one.

use super::{grid_offset, pin_flags, Layout, PackageGenerator};
use crate::error::{FpwError, FpwResult};
use crate::geometry::{Arc, BoundingBox, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Generator for DIP packages.
#[derive(Debug, Default)]
pub struct DipGenerator;

impl PackageGenerator for DipGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::Dip
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        let pins = params.number_of_pins;
        if pins < 2 || pins % 2 != 0 {
            return Err(FpwError::unsupported_pin_count(PackageFamily::Dip, pins));
        }
        let mut layout = Layout::new(params)?;

        let rows = pins / 2;
        let pitch_x = layout.c(params.pitch_x);
        let pitch_y = layout.c(params.pitch_y);
        let left = grid_offset(2, 0, pitch_x);
        let right = grid_offset(2, 1, pitch_x);

        for number in 1..=pins {
            let (x, row) = if number <= rows {
                (left, number - 1)
            } else {
                (right, pins - number)
            };
            let square = params.pin1_is_square && number == 1;
            layout.push_pin(
                &number.to_string(),
                x,
                grid_offset(rows, row, pitch_y),
                pin_flags(params.pad_shape, square),
            );
        }

        layout.close_copper();

        // Long edges stay clear of the pin columns.
        let line_width = layout.silk_width();
        let pin_inner_edge = right
            - layout.c(params.pad_diameter) / 2.0
            - layout.c(params.pad_solder_mask_clearance)
            - line_width;
        let half_width = (layout.c(params.silkscreen_width) / 2.0).min(pin_inner_edge);
        let half_length = layout.c(params.silkscreen_length) / 2.0;
        let outline = BoundingBox::new(-half_width, -half_length, half_width, half_length);

        if params.silkscreen_package_outline && half_width > 0.0 {
            layout.push_rect(outline, line_width);
        }
        if params.silkscreen_indicate_pin1 {
            let radius = (pitch_y / 4.0).min(half_width.abs() / 2.0);
            layout.push_arc(Arc {
                x: 0.0,
                y: outline.ymin,
                width: radius,
                height: radius,
                start_angle: 0.0,
                delta_angle: 180.0,
                line_width,
            });
        }

        Ok(layout.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ObjectFlags;
    use crate::packages::test_support::{assert_envelope, numbers};
    use crate::params::PadShape;
    use crate::units::Units;

    fn dip8() -> ParameterModel {
        let mut p = ParameterModel::new(PackageFamily::Dip, Units::Mil);
        p.number_of_pins = 8;
        p.number_of_columns = 2;
        p.number_of_rows = 4;
        p.pitch_x = 300.0;
        p.pitch_y = 100.0;
        p.pad_shape = PadShape::Round;
        p.pad_diameter = 60.0;
        p.pin_drill_diameter = 28.0;
        p.pad_clearance = 10.0;
        p.pad_solder_mask_clearance = 6.0;
        p.body_width = 300.0;
        p.body_length = 400.0;
        p.body_height = 130.0;
        p.silkscreen_package_outline = true;
        p.silkscreen_indicate_pin1 = true;
        p.silkscreen_width = 300.0;
        p.silkscreen_length = 400.0;
        p.silkscreen_line_width = 10.0;
        p.pin1_is_square = true;
        p
    }

    #[test]
    fn dip8_pin_positions() {
        let geometry = DipGenerator.generate(&dip8()).unwrap();
        let pins: Vec<_> = geometry.pins().collect();
        assert_eq!(pins.len(), 8);
        assert!(pins.iter().all(|p| (p.x.abs() - 15_000.0).abs() < 1e-9));

        let ys: Vec<f64> = pins[..4].iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![-15_000.0, -5_000.0, 5_000.0, 15_000.0]);

        // Counter-clockwise: pin 5 faces pin 4, pin 8 faces pin 1.
        assert!((pins[4].y - pins[3].y).abs() < 1e-9);
        assert!((pins[7].y - pins[0].y).abs() < 1e-9);
        assert!(pins[4].x > 0.0);
        assert_eq!(numbers(&geometry), ["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn pin_attributes() {
        let geometry = DipGenerator.generate(&dip8()).unwrap();
        let mut pins = geometry.pins();
        let first = pins.next().unwrap();
        assert_eq!(first.flags, ObjectFlags::SQUARE);
        assert!((first.width - 6_000.0).abs() < 1e-9);
        assert!((first.drill - 2_800.0).abs() < 1e-9);
        assert!((first.mask_clearance - 6_600.0).abs() < 1e-9);
        assert!(pins.all(|p| p.flags.is_empty()));
    }

    #[test]
    fn outline_clears_pins() {
        let geometry = DipGenerator.generate(&dip8()).unwrap();
        let max_x = geometry
            .lines()
            .flat_map(|l| [l.x0.abs(), l.x1.abs()])
            .fold(0.0, f64::max);
        // pin inner edge (150 - 30 - 6) minus one line width
        assert!((max_x - 10_400.0).abs() < 1e-9);
        assert_eq!(geometry.arcs().count(), 1);
        assert_envelope(&geometry);
    }

    #[test]
    fn odd_pin_count_rejected() {
        let mut p = dip8();
        p.number_of_pins = 7;
        assert!(matches!(
            DipGenerator.generate(&p),
            Err(FpwError::UnsupportedPinCount { pins: 7, .. })
        ));
    }
}
