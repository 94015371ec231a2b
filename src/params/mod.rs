//! The footprint parameter model.
//!
//! A [`ParameterModel`] holds every input of one footprint generation request.
//! It is built once (from a parameter file, the default library or code) and
//! only read afterwards: generators and the design rule checker take it by
//! shared reference.
//!
//! # Axes
//!
//! For every family `*_width` is the X extent and `*_length` the Y extent.
//! The origin is the package centre and Y grows downward, so pin 1 sits in
//! the upper left.

pub mod file;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::designator::PinExceptions;
use crate::error::{FpwError, FpwResult};
use crate::units::{self, Units};

/// Package family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageFamily {
    /// Ball grid array.
    Bga,
    /// Chip capacitor.
    Capc,
    /// Dual inline package.
    Dip,
    /// Two-lead diode outline (axial or radial).
    Do,
    /// Chip inductor.
    Indc,
    /// Pin grid array.
    Pga,
    /// Plastic leaded chip carrier.
    Plcc,
    /// Quad flat no-lead.
    Qfn,
    /// Quad flat package.
    Qfp,
    /// Chip resistor.
    Resc,
    /// Single inline package.
    Sip,
    /// Small outline (gull wing, dual row).
    So,
    /// Small outline transistor.
    Sot,
    /// Transistor outline, TO-220 style.
    To,
    /// Transistor outline TO-92.
    To92,
}

impl PackageFamily {
    /// All families in catalog order.
    pub const ALL: [Self; 15] = [
        Self::Bga,
        Self::Capc,
        Self::Dip,
        Self::Do,
        Self::Indc,
        Self::Pga,
        Self::Plcc,
        Self::Qfn,
        Self::Qfp,
        Self::Resc,
        Self::Sip,
        Self::So,
        Self::Sot,
        Self::To,
        Self::To92,
    ];

    /// Upper-case family name as used in footprint types.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bga => "BGA",
            Self::Capc => "CAPC",
            Self::Dip => "DIP",
            Self::Do => "DO",
            Self::Indc => "INDC",
            Self::Pga => "PGA",
            Self::Plcc => "PLCC",
            Self::Qfn => "QFN",
            Self::Qfp => "QFP",
            Self::Resc => "RESC",
            Self::Sip => "SIP",
            Self::So => "SO",
            Self::Sot => "SOT",
            Self::To => "TO",
            Self::To92 => "TO92",
        }
    }

    /// Families built from plated through-hole pins rather than SMD pads.
    #[must_use]
    pub const fn is_through_hole(self) -> bool {
        matches!(
            self,
            Self::Dip | Self::Do | Self::Pga | Self::Sip | Self::To | Self::To92
        )
    }
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Copper shape of pads and pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Circular pad or pin.
    #[default]
    Round,
    /// Square or rectangular.
    Square,
    /// Octagonal pin.
    Octagonal,
    /// Rectangle with rounded ends.
    RoundElongated,
    /// No shape selected.
    None,
}

/// One of the nine grid locations of a package outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Upper left corner.
    #[default]
    UpperLeft,
    /// Middle of the left edge.
    MiddleLeft,
    /// Lower left corner.
    LowerLeft,
    /// Middle of the top edge.
    UpperMiddle,
    /// Package centre.
    MiddleMiddle,
    /// Middle of the bottom edge.
    LowerMiddle,
    /// Upper right corner.
    UpperRight,
    /// Middle of the right edge.
    MiddleRight,
    /// Lower right corner.
    LowerRight,
}

/// How the distance between two facing pad rows is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMode {
    /// Centre-to-centre distance (C).
    Center(f64),
    /// Distance between the inner pad edges (G).
    Inner(f64),
    /// Distance between the outer pad edges (Z).
    Outer(f64),
}

/// Spacing of two facing pad rows on one axis.
///
/// Exactly one of the three distances must be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DualRowDistance {
    /// Centre-to-centre distance (C).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<f64>,
    /// Inner edge to inner edge (G).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<f64>,
    /// Outer edge to outer edge (Z).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer: Option<f64>,
}

impl DualRowDistance {
    /// Row spacing given centre to centre.
    #[must_use]
    pub const fn center(distance: f64) -> Self {
        Self {
            center: Some(distance),
            inner: None,
            outer: None,
        }
    }

    /// Row spacing given between inner pad edges.
    #[must_use]
    pub const fn inner(distance: f64) -> Self {
        Self {
            center: None,
            inner: Some(distance),
            outer: None,
        }
    }

    /// Row spacing given between outer pad edges.
    #[must_use]
    pub const fn outer(distance: f64) -> Self {
        Self {
            center: None,
            inner: None,
            outer: Some(distance),
        }
    }

    /// Returns the selected mode.
    ///
    /// # Errors
    ///
    /// Returns [`FpwError::InvalidDistanceMode`] unless exactly one distance is set.
    pub fn mode(&self, axis: char) -> FpwResult<DistanceMode> {
        match (self.center, self.inner, self.outer) {
            (Some(c), None, None) => Ok(DistanceMode::Center(c)),
            (None, Some(g), None) => Ok(DistanceMode::Inner(g)),
            (None, None, Some(z)) => Ok(DistanceMode::Outer(z)),
            _ => Err(FpwError::InvalidDistanceMode { axis }),
        }
    }

    /// Centre-to-centre distance for pads of `pad_size` along this axis.
    ///
    /// # Errors
    ///
    /// Returns [`FpwError::InvalidDistanceMode`] unless exactly one distance is set.
    pub fn center_distance(&self, pad_size: f64, axis: char) -> FpwResult<f64> {
        Ok(match self.mode(axis)? {
            DistanceMode::Center(c) => c,
            DistanceMode::Inner(g) => g + pad_size,
            DistanceMode::Outer(z) => z - pad_size,
        })
    }
}

/// Attribute block written into the footprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Attributes {
    /// Footprint author.
    #[serde(default)]
    pub author: String,
    /// Distribution license.
    #[serde(default)]
    pub dist_license: String,
    /// Use license.
    #[serde(default)]
    pub use_license: String,
    /// Footprint status (e.g. "experimental").
    #[serde(default)]
    pub status: String,
}

/// All parameters of one footprint.
///
/// Lengths are in [`ParameterModel::units`]; the generators convert them to
/// centimil.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterModel {
    /// Catalog identifier; a leading `?` requests the default library entry.
    #[serde(default)]
    pub footprint_type: String,
    /// Element name written in the footprint header.
    #[serde(default)]
    pub footprint_name: String,
    /// Element value written in the footprint header.
    #[serde(default)]
    pub footprint_value: String,
    /// Package family.
    pub package_family: PackageFamily,
    /// Document units. `None` is rejected by the generators and the DRC.
    #[serde(default)]
    pub units: Option<Units>,
    /// Radial rather than axial body (two-lead families).
    #[serde(default)]
    pub is_radial: bool,

    /// Body extent along Y.
    #[serde(default)]
    pub body_length: f64,
    /// Body extent along X.
    #[serde(default)]
    pub body_width: f64,
    /// Body height above the board.
    #[serde(default)]
    pub body_height: f64,

    /// Grid columns (pads per top/bottom edge for perimeter families).
    #[serde(default)]
    pub number_of_columns: u32,
    /// Grid rows (pads per left/right edge for perimeter families).
    #[serde(default)]
    pub number_of_rows: u32,
    /// Number of pins.
    #[serde(default)]
    pub number_of_pins: u32,
    /// Pitch along X.
    #[serde(default)]
    pub pitch_x: f64,
    /// Pitch along Y.
    #[serde(default)]
    pub pitch_y: f64,

    /// Pad or pin shape.
    #[serde(default)]
    pub pad_shape: PadShape,
    /// Diameter of round pads and pins.
    #[serde(default)]
    pub pad_diameter: f64,
    /// Pad length (along the lead).
    #[serde(default)]
    pub pad_length: f64,
    /// Pad width (across the lead).
    #[serde(default)]
    pub pad_width: f64,
    /// Drill diameter; zero for SMD pads.
    #[serde(default)]
    pub pin_drill_diameter: f64,
    /// Copper clearance around pads.
    #[serde(default)]
    pub pad_clearance: f64,
    /// Solder mask clearance around pads.
    #[serde(default)]
    pub pad_solder_mask_clearance: f64,

    /// Pin 1 gets a square pad.
    #[serde(default)]
    pub pin1_is_square: bool,
    /// Draw a pin 1 marker on the silkscreen.
    #[serde(default)]
    pub silkscreen_indicate_pin1: bool,
    /// Where pin 1 sits.
    #[serde(default)]
    pub number1_position: Location,

    /// Designators that are not populated.
    #[serde(default)]
    pub pin_pad_exceptions: PinExceptions,

    /// Draw the package outline on the silkscreen.
    #[serde(default)]
    pub silkscreen_package_outline: bool,
    /// Silkscreen outline extent along Y.
    #[serde(default)]
    pub silkscreen_length: f64,
    /// Silkscreen outline extent along X.
    #[serde(default)]
    pub silkscreen_width: f64,
    /// Silkscreen line width.
    #[serde(default)]
    pub silkscreen_line_width: f64,

    /// Draw the courtyard.
    #[serde(default)]
    pub courtyard: bool,
    /// Requested courtyard extent along Y.
    #[serde(default)]
    pub courtyard_length: f64,
    /// Requested courtyard extent along X.
    #[serde(default)]
    pub courtyard_width: f64,
    /// Courtyard line width: zero draws nothing, negative a 1 centimil line.
    #[serde(default)]
    pub courtyard_line_width: f64,
    /// Courtyard margin around the package body.
    #[serde(default)]
    pub courtyard_clearance_with_package: f64,

    /// Add an exposed thermal pad.
    #[serde(default)]
    pub thermal: bool,
    /// Thermal pad extent along Y.
    #[serde(default)]
    pub thermal_length: f64,
    /// Thermal pad extent along X.
    #[serde(default)]
    pub thermal_width: f64,
    /// Solder mask clearance around the thermal pad.
    #[serde(default)]
    pub thermal_solder_mask_clearance: f64,
    /// Keep solder paste off the thermal pad.
    #[serde(default)]
    pub thermal_no_paste: bool,

    /// Add two fiducials.
    #[serde(default)]
    pub fiducial: bool,
    /// Fiducial pad diameter.
    #[serde(default)]
    pub fiducial_pad_diameter: f64,
    /// Copper clearance around fiducials.
    #[serde(default)]
    pub fiducial_pad_clearance: f64,
    /// Solder mask clearance around fiducials.
    #[serde(default)]
    pub fiducial_pad_solder_mask_clearance: f64,

    /// Spacing of the left and right pad rows (C1/G1/Z1).
    #[serde(default)]
    pub distance_x: DualRowDistance,
    /// Spacing of the top and bottom pad rows (C2/G2/Z2).
    #[serde(default)]
    pub distance_y: DualRowDistance,

    /// Attribute block; `None` writes no attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl ParameterModel {
    /// Creates a parameter model with every length zero and every option off.
    #[must_use]
    pub fn new(package_family: PackageFamily, units: Units) -> Self {
        Self {
            footprint_type: String::new(),
            footprint_name: String::new(),
            footprint_value: String::new(),
            package_family,
            units: Some(units),
            is_radial: false,
            body_length: 0.0,
            body_width: 0.0,
            body_height: 0.0,
            number_of_columns: 0,
            number_of_rows: 0,
            number_of_pins: 0,
            pitch_x: 0.0,
            pitch_y: 0.0,
            pad_shape: PadShape::Round,
            pad_diameter: 0.0,
            pad_length: 0.0,
            pad_width: 0.0,
            pin_drill_diameter: 0.0,
            pad_clearance: 0.0,
            pad_solder_mask_clearance: 0.0,
            pin1_is_square: false,
            silkscreen_indicate_pin1: false,
            number1_position: Location::UpperLeft,
            pin_pad_exceptions: PinExceptions::new(),
            silkscreen_package_outline: false,
            silkscreen_length: 0.0,
            silkscreen_width: 0.0,
            silkscreen_line_width: 0.0,
            courtyard: false,
            courtyard_length: 0.0,
            courtyard_width: 0.0,
            courtyard_line_width: 0.0,
            courtyard_clearance_with_package: 0.0,
            thermal: false,
            thermal_length: 0.0,
            thermal_width: 0.0,
            thermal_solder_mask_clearance: 0.0,
            thermal_no_paste: false,
            fiducial: false,
            fiducial_pad_diameter: 0.0,
            fiducial_pad_clearance: 0.0,
            fiducial_pad_solder_mask_clearance: 0.0,
            distance_x: DualRowDistance::default(),
            distance_y: DualRowDistance::default(),
            attributes: None,
        }
    }

    /// Scale factor from document units to centimil.
    ///
    /// # Errors
    ///
    /// Returns [`FpwError::InvalidUnits`] when no unit is selected.
    pub fn multiplier(&self) -> FpwResult<f64> {
        units::multiplier_for(self.units)
    }

    /// Name written into the footprint header, falling back to the type.
    #[must_use]
    pub fn element_name(&self) -> &str {
        if self.footprint_name.is_empty() {
            self.footprint_type.trim_start_matches('?')
        } else {
            &self.footprint_name
        }
    }

    /// Checks that the grid has at least one row and one column.
    ///
    /// # Errors
    ///
    /// Returns [`FpwError::InvalidParameter`] for an empty grid.
    pub fn require_grid(&self) -> FpwResult<()> {
        if self.number_of_columns == 0 {
            return Err(FpwError::invalid_parameter(
                "number_of_columns",
                "must be at least 1",
            ));
        }
        if self.number_of_rows == 0 {
            return Err(FpwError::invalid_parameter("number_of_rows", "must be at least 1"));
        }
        Ok(())
    }
}
