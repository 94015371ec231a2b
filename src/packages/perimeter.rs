//! Pad placement shared by the quad families (PLCC, QFP, QFN).
//!
//! Pads sit on the four edges of a rectangle whose row spacing on each axis
//! is given as a [`DualRowDistance`]. Numbering walks the edges counter
//! clockwise as seen from the top: down the left edge, right along the
//! bottom, up the right edge and back left along the top.

use super::{grid_offset, pad_flags, Layout};
use crate::error::{FpwError, FpwResult};
use crate::geometry::{Arc, BoundingBox};
use crate::params::{DualRowDistance, Location, PackageFamily, ParameterModel};

/// Edge of the package a pad belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Left edge, pads numbered downwards.
    Left,
    /// Bottom edge, pads numbered to the right.
    Bottom,
    /// Right edge, pads numbered upwards.
    Right,
    /// Top edge, pads numbered to the left.
    Top,
}

impl Edge {
    /// Unit vector pointing away from the package centre.
    #[must_use]
    pub const fn outward(self) -> (f64, f64) {
        match self {
            Self::Left => (-1.0, 0.0),
            Self::Bottom => (0.0, 1.0),
            Self::Right => (1.0, 0.0),
            Self::Top => (0.0, -1.0),
        }
    }

    /// True for the left and right edges, whose pads are long along X.
    #[must_use]
    pub const fn is_side(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// One pad position on the perimeter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Pin number, starting at 1.
    pub number: u32,
    /// Centre X in centimil.
    pub x: f64,
    /// Centre Y in centimil.
    pub y: f64,
    /// Edge the pad sits on.
    pub edge: Edge,
}

/// Result of walking the perimeter.
#[derive(Debug, Clone)]
pub struct Perimeter {
    /// Slots in numbering order.
    pub slots: Vec<Slot>,
    /// Centre-to-centre distance of the left and right rows (centimil).
    pub spacing_x: f64,
    /// Centre-to-centre distance of the top and bottom rows (centimil).
    pub spacing_y: f64,
}

/// Centre-to-centre row spacing in centimil for pads of `pad_length`.
///
/// # Errors
///
/// Returns [`FpwError::InvalidDistanceMode`] unless exactly one distance is
/// set for `axis`.
pub fn row_spacing(layout: &Layout<'_>, distance: &DualRowDistance, axis: char) -> FpwResult<f64> {
    let centre = distance.center_distance(layout.params().pad_length, axis)?;
    Ok(layout.c(centre))
}

/// Lays out the perimeter slots for `family`.
///
/// # Errors
///
/// Fails when the grid is empty, the pin count does not cover all four edges,
/// pin 1 is not at the top left or top middle, or a distance mode is invalid.
pub fn walk(layout: &Layout<'_>, family: PackageFamily) -> FpwResult<Perimeter> {
    let params = layout.params();
    params.require_grid()?;

    let cols = params.number_of_columns;
    let rows = params.number_of_rows;
    let total = cols.saturating_add(rows).saturating_mul(2);
    if params.number_of_pins != total {
        return Err(FpwError::unsupported_pin_count(family, params.number_of_pins));
    }

    let spacing_x = row_spacing(layout, &params.distance_x, 'x')?;
    let spacing_y = row_spacing(layout, &params.distance_y, 'y')?;
    let pitch_x = layout.c(params.pitch_x);
    let pitch_y = layout.c(params.pitch_y);

    let mut positions = Vec::with_capacity(total as usize);
    for i in 0..rows {
        positions.push((-spacing_x / 2.0, grid_offset(rows, i, pitch_y), Edge::Left));
    }
    for i in 0..cols {
        positions.push((grid_offset(cols, i, pitch_x), spacing_y / 2.0, Edge::Bottom));
    }
    for i in (0..rows).rev() {
        positions.push((spacing_x / 2.0, grid_offset(rows, i, pitch_y), Edge::Right));
    }
    for i in (0..cols).rev() {
        positions.push((grid_offset(cols, i, pitch_x), -spacing_y / 2.0, Edge::Top));
    }

    let start = start_index(params, rows, cols)?;
    let slots = (0..total)
        .map(|n| {
            let (x, y, edge) = positions[((start + n) % total) as usize];
            Slot {
                number: n + 1,
                x,
                y,
                edge,
            }
        })
        .collect();

    Ok(Perimeter {
        slots,
        spacing_x,
        spacing_y,
    })
}

/// Index into the walk of the slot that becomes pin 1.
fn start_index(params: &ParameterModel, rows: u32, cols: u32) -> FpwResult<u32> {
    match params.number1_position {
        Location::UpperLeft => Ok(0),
        // The top edge is walked right to left after the other three edges.
        Location::UpperMiddle => Ok(2 * rows + cols + (cols - 1 - cols / 2)),
        other => Err(FpwError::invalid_parameter(
            "number1_position",
            format!("pin 1 of a {} cannot be at {other:?}", params.package_family),
        )),
    }
}

/// Size of a pad on `edge` as `(x, y)` in centimil.
#[must_use]
pub fn pad_size(layout: &Layout<'_>, edge: Edge) -> (f64, f64) {
    let length = layout.c(layout.params().pad_length);
    let width = layout.c(layout.params().pad_width);
    if edge.is_side() {
        (length, width)
    } else {
        (width, length)
    }
}

/// Places a pad on every slot, skipping listed exceptions when asked to.
///
/// Returns the number of pads placed.
pub fn push_pads(layout: &mut Layout<'_>, perimeter: &Perimeter, honour_exceptions: bool) -> u32 {
    let params = layout.params();
    let mask = layout.c(params.pad_solder_mask_clearance);
    let mut placed = 0;
    for slot in &perimeter.slots {
        let number = slot.number.to_string();
        if honour_exceptions && !params.pin_pad_exceptions.is_populated(&number) {
            continue;
        }
        let (size_x, size_y) = pad_size(layout, slot.edge);
        let square = params.pin1_is_square && slot.number == 1;
        layout.push_rect_pad(
            &number,
            slot.x,
            slot.y,
            size_x,
            size_y,
            mask,
            pad_flags(params.pad_shape, square),
        );
        placed += 1;
    }
    placed
}

/// Draws `outline`, leaving gaps where an edge crosses a pad row.
///
/// With `corners_only` every edge is cut back to the pad rows, leaving the
/// four corner brackets even when the outline clears the pads.
pub fn push_outline(
    layout: &mut Layout<'_>,
    perimeter: &Perimeter,
    outline: BoundingBox,
    line_width: f64,
    corners_only: bool,
) {
    let params = layout.params();
    let keep_out = layout.c(params.pad_solder_mask_clearance) + line_width;
    let (side_x, side_y) = pad_size(layout, Edge::Left);
    let (top_x, top_y) = pad_size(layout, Edge::Top);

    // Half extent of each pad row along the edge, grown by the keep-out.
    let rows = params.number_of_rows;
    let cols = params.number_of_columns;
    let rows_span =
        grid_offset(rows, rows - 1, layout.c(params.pitch_y)) + side_y / 2.0 + keep_out;
    let cols_span =
        grid_offset(cols, cols - 1, layout.c(params.pitch_x)) + top_x / 2.0 + keep_out;

    let crosses =
        |edge: f64, row: f64, depth: f64| (edge.abs() - row).abs() <= depth / 2.0 + keep_out;
    let top_gap = (corners_only || crosses(outline.ymin, perimeter.spacing_y / 2.0, top_y))
        .then_some(cols_span);
    let side_gap = (corners_only || crosses(outline.xmin, perimeter.spacing_x / 2.0, side_x))
        .then_some(rows_span);

    for (from, to) in clear_span(outline.xmin, outline.xmax, top_gap) {
        layout.push_line(from, outline.ymin, to, outline.ymin, line_width);
        layout.push_line(from, outline.ymax, to, outline.ymax, line_width);
    }
    for (from, to) in clear_span(outline.ymin, outline.ymax, side_gap) {
        layout.push_line(outline.xmin, from, outline.xmin, to, line_width);
        layout.push_line(outline.xmax, from, outline.xmax, to, line_width);
    }
}

/// Pieces of `[start, end]` outside `[-gap, gap]`.
fn clear_span(start: f64, end: f64, gap: Option<f64>) -> Vec<(f64, f64)> {
    let Some(gap) = gap else {
        return vec![(start, end)];
    };
    let mut pieces = Vec::with_capacity(2);
    if start < -gap {
        pieces.push((start, -gap));
    }
    if gap < end {
        pieces.push((gap, end));
    }
    pieces
}

/// Adds a small circle just outside pin 1.
pub fn push_outside_marker(layout: &mut Layout<'_>, perimeter: &Perimeter, line_width: f64) {
    let Some(first) = perimeter.slots.first() else {
        return;
    };
    let (size_x, size_y) = pad_size(layout, first.edge);
    let (dx, dy) = first.edge.outward();
    let radius = line_width;
    let depth = if first.edge.is_side() { size_x } else { size_y };
    let reach = depth / 2.0
        + layout.c(layout.params().pad_solder_mask_clearance)
        + 2.0 * line_width
        + radius;
    layout.push_arc(Arc::circle(
        first.x + dx * reach,
        first.y + dy * reach,
        radius,
        line_width,
    ));
}
