//! Single inline package footprints.
//!
//! One column of through-hole pins along Y, pin 1 on top.

use super::{grid_offset, pin_flags, Layout, PackageGenerator};
use crate::error::{FpwError, FpwResult};
use crate::geometry::{BoundingBox, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Generator for SIP packages.
#[derive(Debug, Default)]
pub struct SipGenerator;

impl PackageGenerator for SipGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::Sip
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        let pins = params.number_of_pins;
        if pins == 0 {
            return Err(FpwError::unsupported_pin_count(PackageFamily::Sip, pins));
        }
        let mut layout = Layout::new(params)?;
        let pitch_y = layout.c(params.pitch_y);

        for index in 0..pins {
            let square = params.pin1_is_square && index == 0;
            layout.push_pin(
                &(index + 1).to_string(),
                0.0,
                grid_offset(pins, index, pitch_y),
                pin_flags(params.pad_shape, square),
            );
        }

        layout.close_copper();

        // The short edges move out until they clear the end pins.
        let line_width = layout.silk_width();
        let end_pin = grid_offset(pins, pins - 1, pitch_y)
            + layout.c(params.pad_diameter) / 2.0
            + layout.c(params.pad_solder_mask_clearance)
            + line_width;
        let half_width = layout.c(params.silkscreen_width) / 2.0;
        let half_length = (layout.c(params.silkscreen_length) / 2.0).max(end_pin);
        let outline = BoundingBox::new(-half_width, -half_length, half_width, half_length);

        if params.silkscreen_package_outline {
            layout.push_rect(outline, line_width);
        }
        if params.silkscreen_indicate_pin1 && pins > 1 {
            let y = grid_offset(pins, 0, pitch_y) + pitch_y / 2.0;
            layout.push_line(outline.xmin, y, outline.xmax, y, line_width);
        }

        Ok(layout.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packages::test_support::{assert_envelope, numbers};
    use crate::units::Units;

    fn sip4() -> ParameterModel {
        let mut p = ParameterModel::new(PackageFamily::Sip, Units::Mil);
        p.number_of_pins = 4;
        p.number_of_rows = 4;
        p.number_of_columns = 1;
        p.pitch_y = 100.0;
        p.pad_diameter = 60.0;
        p.pin_drill_diameter = 32.0;
        p.body_width = 100.0;
        p.body_length = 350.0;
        p.silkscreen_package_outline = true;
        p.silkscreen_indicate_pin1 = true;
        p.silkscreen_width = 100.0;
        p.silkscreen_length = 350.0;
        p.silkscreen_line_width = 10.0;
        p
    }

    #[test]
    fn pins_along_y() {
        let geometry = SipGenerator.generate(&sip4()).unwrap();
        let ys: Vec<f64> = geometry.pins().map(|p| p.y).collect();
        assert_eq!(ys, vec![-15_000.0, -5_000.0, 5_000.0, 15_000.0]);
        assert!(geometry.pins().all(|p| p.x.abs() < f64::EPSILON));
        assert_eq!(numbers(&geometry), ["1", "2", "3", "4"]);
    }

    #[test]
    fn outline_grows_to_clear_end_pins() {
        let geometry = SipGenerator.generate(&sip4()).unwrap();
        let lines: Vec<_> = geometry.lines().collect();
        // four outline sides and the pin 1 separator
        assert_eq!(lines.len(), 5);
        // 150 + 30 + 0 + 10 mil beats the 175 mil body half length
        assert!((lines[0].y0 + 19_000.0).abs() < 1e-9);
        let separator = lines[4];
        assert!((separator.y0 + 10_000.0).abs() < 1e-9);
        assert_envelope(&geometry);
    }

    #[test]
    fn zero_pins_rejected() {
        let mut p = sip4();
        p.number_of_pins = 0;
        assert!(SipGenerator.generate(&p).is_err());
    }
}
