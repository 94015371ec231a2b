//! Chip component footprints (capacitors, inductors, resistors).
//!
//! Two rectangular pads at `±pitch_x / 2`. `pad_length` runs along X towards
//! the terminals, `pad_width` across them.

use super::{pad_flags, Layout, PackageGenerator};
use crate::error::{FpwError, FpwResult};
use crate::geometry::Geometry;
use crate::params::{PackageFamily, ParameterModel};

/// Generator shared by the two-terminal chip families.
#[derive(Debug, Clone, Copy)]
pub struct ChipGenerator {
    family: PackageFamily,
}

impl ChipGenerator {
    /// Chip capacitors.
    pub const CAPC: Self = Self {
        family: PackageFamily::Capc,
    };
    /// Chip inductors.
    pub const INDC: Self = Self {
        family: PackageFamily::Indc,
    };
    /// Chip resistors.
    pub const RESC: Self = Self {
        family: PackageFamily::Resc,
    };
}

impl PackageGenerator for ChipGenerator {
    fn family(&self) -> PackageFamily {
        self.family
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        if params.number_of_pins != 2 {
            return Err(FpwError::unsupported_pin_count(
                self.family,
                params.number_of_pins,
            ));
        }
        let mut layout = Layout::new(params)?;

        let pad_centre_x = layout.c(params.pitch_x) / 2.0;
        let pad_length = layout.c(params.pad_length);
        let pad_width = layout.c(params.pad_width);
        let mask = layout.c(params.pad_solder_mask_clearance);

        for (number, x) in [("1", -pad_centre_x), ("2", pad_centre_x)] {
            if !params.pin_pad_exceptions.is_populated(number) {
                continue;
            }
            let square = params.pin1_is_square && number == "1";
            layout.push_rect_pad(
                number,
                x,
                0.0,
                pad_length,
                pad_width,
                mask,
                pad_flags(params.pad_shape, square),
            );
        }

        layout.close_copper();
        layout.push_fiducials();

        // Silkscreen only between the pads, and only if there is room.
        let line_width = layout.silk_width();
        let pad_edge_x = pad_centre_x - pad_length / 2.0 - mask - line_width;
        let half_length = layout.c(params.silkscreen_length) / 2.0;
        if params.silkscreen_package_outline && pad_edge_x > 0.0 {
            layout.push_line(-pad_edge_x, -half_length, pad_edge_x, -half_length, line_width);
            layout.push_line(-pad_edge_x, half_length, pad_edge_x, half_length, line_width);
        }
        if params.silkscreen_indicate_pin1 {
            let x = -(pad_centre_x + pad_length / 2.0 + mask + line_width);
            let half = pad_width / 2.0;
            layout.push_line(x, -half, x, half, line_width);
        }

        Ok(layout.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designator::PinExceptions;
    use crate::packages::test_support::{assert_envelope, numbers};
    use crate::params::PadShape;
    use crate::units::Units;

    fn resc1608() -> ParameterModel {
        let mut p = ParameterModel::new(PackageFamily::Resc, Units::Mm);
        p.number_of_pins = 2;
        p.number_of_columns = 2;
        p.number_of_rows = 1;
        p.pitch_x = 1.5;
        p.pad_shape = PadShape::Square;
        p.pad_length = 0.9;
        p.pad_width = 0.95;
        p.pad_clearance = 0.1;
        p.pad_solder_mask_clearance = 0.05;
        p.body_width = 1.6;
        p.body_length = 0.8;
        p.body_height = 0.55;
        p.courtyard_clearance_with_package = 0.25;
        p.silkscreen_package_outline = true;
        p.silkscreen_width = 1.6;
        p.silkscreen_length = 0.8;
        p.silkscreen_line_width = 0.1;
        p
    }

    #[test]
    fn two_pads_symmetric() {
        let geometry = ChipGenerator::RESC.generate(&resc1608()).unwrap();
        let pads: Vec<_> = geometry.pads().collect();
        assert_eq!(pads.len(), 2);
        let m = Units::Mm.multiplier();
        assert!((pads[0].centre().0 + 0.75 * m).abs() < 1e-6);
        assert!((pads[1].centre().0 - 0.75 * m).abs() < 1e-6);
        // the pad is taller than long, so the segment runs along Y
        assert!((pads[0].width - 0.9 * m).abs() < 1e-6);
        assert_envelope(&geometry);
    }

    #[test]
    fn silkscreen_between_pads() {
        let geometry = ChipGenerator::RESC.generate(&resc1608()).unwrap();
        let lines: Vec<_> = geometry.lines().collect();
        assert_eq!(lines.len(), 2);
        let m = Units::Mm.multiplier();
        // 0.75 - 0.45 - 0.05 - 0.1
        assert!((lines[0].x1 - 0.15 * m).abs() < 1e-6);
        assert!((lines[0].y0 + 0.4 * m).abs() < 1e-6);
    }

    #[test]
    fn no_silkscreen_when_pads_too_close() {
        let mut p = resc1608();
        p.pitch_x = 0.9;
        let geometry = ChipGenerator::RESC.generate(&p).unwrap();
        assert_eq!(geometry.lines().count(), 0);
    }

    #[test]
    fn pin_one_bar_left_of_pad() {
        let mut p = resc1608();
        p.silkscreen_package_outline = false;
        p.silkscreen_indicate_pin1 = true;
        let geometry = ChipGenerator::CAPC.generate(&p).unwrap();
        let bar = geometry.lines().next().unwrap();
        assert!((bar.x0 - bar.x1).abs() < f64::EPSILON);
        assert!(bar.x0 < geometry.pads().next().unwrap().x0);
    }

    #[test]
    fn exception_drops_pad() {
        let mut p = resc1608();
        p.pin_pad_exceptions = PinExceptions::parse("2").unwrap();
        let geometry = ChipGenerator::INDC.generate(&p).unwrap();
        assert_eq!(numbers(&geometry), ["1"]);
    }

    #[test]
    fn three_terminals_rejected() {
        let mut p = resc1608();
        p.number_of_pins = 3;
        assert!(matches!(
            ChipGenerator::RESC.generate(&p),
            Err(FpwError::UnsupportedPinCount {
                family: PackageFamily::Resc,
                pins: 3
            })
        ));
    }
}
