//! Ball grid array footprints.
//!
//! Balls sit on a full `rows x columns` grid centred on the origin and are
//! named `A1`, `A2`, ... row by row. Balls listed in the exception set are
//! left out. Fiducials are supported; the silkscreen outline is drawn at full
//! body size since the balls never reach the body edge.

use tracing::{debug, warn};

use super::{grid_offset, pad_flags, Layout, PackageGenerator};
use crate::designator::{designator_for, parse_designator};
use crate::error::FpwResult;
use crate::geometry::{BoundingBox, Geometry};
use crate::params::{PackageFamily, ParameterModel};

/// Upper bound on marker strokes, so a hairline width cannot explode the output.
const MAX_MARKER_STROKES: u32 = 1000;

/// Generator for BGA packages.
#[derive(Debug, Default)]
pub struct BgaGenerator;

impl PackageGenerator for BgaGenerator {
    fn family(&self) -> PackageFamily {
        PackageFamily::Bga
    }

    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry> {
        params.require_grid()?;
        let mut layout = Layout::new(params)?;

        let cols = params.number_of_columns;
        let rows = params.number_of_rows;
        let pitch_x = layout.c(params.pitch_x);
        let pitch_y = layout.c(params.pitch_y);
        let diameter = layout.c(params.pad_diameter);

        let mut placed = 0;
        for row in 0..rows {
            for col in 0..cols {
                let name = designator_for(row, col);
                if !params.pin_pad_exceptions.is_populated(&name) {
                    continue;
                }
                let square = params.pin1_is_square && row == 0 && col == 0;
                layout.push_round_pad(
                    &name,
                    grid_offset(cols, col, pitch_x),
                    grid_offset(rows, row, pitch_y),
                    diameter,
                    pad_flags(params.pad_shape, square),
                );
                placed += 1;
            }
        }

        log_unused_exceptions(params);
        if params.number_of_pins != 0 && params.number_of_pins != placed {
            warn!(
                expected = params.number_of_pins,
                placed, "BGA ball count differs from number_of_pins"
            );
        }

        layout.close_copper();
        layout.push_fiducials();

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

/// Fills the upper left corner of `outline` with diagonal strokes.
///
/// Strokes are `line_width` apart and cover `size` along each edge.
pub(crate) fn push_corner_marker(
    layout: &mut Layout<'_>,
    outline: BoundingBox,
    size: f64,
    line_width: f64,
) {
    if line_width <= 0.0 {
        return;
    }
    let mut dx = 0.0;
    let mut strokes = 0;
    while dx < size && strokes < MAX_MARKER_STROKES {
        layout.push_line(
            outline.xmin + dx,
            outline.ymin,
            outline.xmin,
            outline.ymin + dx,
            line_width,
        );
        dx += line_width;
        strokes += 1;
    }
}

/// Logs exceptions that name no cell of the grid; they are ignored.
pub(crate) fn log_unused_exceptions(params: &ParameterModel) {
    for designator in params.pin_pad_exceptions.iter() {
        let in_grid = parse_designator(designator).is_some_and(|(row, col)| {
            row < params.number_of_rows && col < params.number_of_columns
        });
        if !in_grid {
            debug!(designator, "Ignoring exception outside the grid");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designator::PinExceptions;
    use crate::geometry::ObjectFlags;
    use crate::packages::test_support::{assert_envelope, numbers};
    use crate::params::PadShape;
    use crate::units::Units;

    fn bga_10x10() -> ParameterModel {
        let mut p = ParameterModel::new(PackageFamily::Bga, Units::Mm);
        p.number_of_columns = 10;
        p.number_of_rows = 10;
        p.number_of_pins = 100;
        p.pitch_x = 1.0;
        p.pitch_y = 1.0;
        p.pad_shape = PadShape::Round;
        p.pad_diameter = 0.5;
        p.pad_clearance = 0.1;
        p.pad_solder_mask_clearance = 0.05;
        p.body_width = 11.0;
        p.body_length = 11.0;
        p.body_height = 1.4;
        p.courtyard_clearance_with_package = 0.25;
        p.silkscreen_package_outline = true;
        p.silkscreen_width = 11.0;
        p.silkscreen_length = 11.0;
        p.silkscreen_line_width = 0.15;
        p
    }

    #[test]
    fn full_grid_has_all_balls() {
        let geometry = BgaGenerator.generate(&bga_10x10()).unwrap();
        let names = numbers(&geometry);
        assert_eq!(names.len(), 100);
        assert_eq!(names[0], "A1");
        assert_eq!(names[99], "K10");
        assert!(!names.iter().any(|n| n.starts_with('I')));
        assert_envelope(&geometry);
    }

    #[test]
    fn balls_centred_on_origin() {
        let geometry = BgaGenerator.generate(&bga_10x10()).unwrap();
        let m = Units::Mm.multiplier();
        let a1 = geometry.pads().next().unwrap();
        assert!((a1.x0 + 4.5 * m).abs() < 1e-6);
        assert!((a1.y0 + 4.5 * m).abs() < 1e-6);
        let sum_x: f64 = geometry.pads().map(|p| p.x0).sum();
        assert!(sum_x.abs() < 1e-6);
    }

    #[test]
    fn exceptions_depopulate() {
        let mut p = bga_10x10();
        p.pin_pad_exceptions = PinExceptions::parse("A1 E5 E6 AZ99 Z1").unwrap();
        let geometry = BgaGenerator.generate(&p).unwrap();
        let names = numbers(&geometry);
        assert_eq!(names.len(), 97);
        assert!(!names.contains(&"E5".to_string()));
        assert_eq!(names[0], "A2");
    }

    #[test]
    fn square_pin_one() {
        let mut p = bga_10x10();
        p.pin1_is_square = true;
        let geometry = BgaGenerator.generate(&p).unwrap();
        let mut pads = geometry.pads();
        assert_eq!(pads.next().unwrap().flags, ObjectFlags::SQUARE);
        assert!(pads.all(|p| p.flags.is_empty()));
    }

    #[test]
    fn corner_marker_strokes() {
        let mut p = bga_10x10();
        p.silkscreen_package_outline = false;
        p.silkscreen_indicate_pin1 = true;
        p.pitch_x = 1.0;
        p.silkscreen_line_width = 0.1;
        let geometry = BgaGenerator.generate(&p).unwrap();
        // dx = 0.0, 0.1, 0.2, 0.3, 0.4 (< 0.5)
        let strokes = geometry.lines().count();
        assert!((5..=6).contains(&strokes), "{strokes}");
        let first = geometry.lines().next().unwrap();
        assert!((first.x0 - first.x1).abs() < 1e-9);
    }

    #[test]
    fn fiducials_added_outside_pads() {
        let mut p = bga_10x10();
        p.fiducial = true;
        p.fiducial_pad_diameter = 1.0;
        p.fiducial_pad_solder_mask_clearance = 1.0;
        let geometry = BgaGenerator.generate(&p).unwrap();
        assert_eq!(geometry.pads().count(), 102);
        let fid = geometry.pads().find(|p| p.number == "FID1").unwrap();
        assert!(fid.x0 < geometry.extents.pin_pad.xmin);
    }

    #[test]
    fn user_courtyard_wins_when_larger() {
        let mut p = bga_10x10();
        p.courtyard_width = 20.0;
        p.courtyard_length = 5.0;
        let geometry = BgaGenerator.generate(&p).unwrap();
        let m = Units::Mm.multiplier();
        assert!((geometry.bounding_box.width() - 20.0 * m).abs() < 1e-6);
        assert!((geometry.bounding_box.length() - 11.5 * m).abs() < 1e-6);
        assert_envelope(&geometry);
    }

    #[test]
    fn empty_grid_rejected() {
        let mut p = bga_10x10();
        p.number_of_rows = 0;
        assert!(BgaGenerator.generate(&p).is_err());
    }
}
