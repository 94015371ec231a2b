//! Footprint generators, one per package family.
//!
//! Every generator follows the same outline:
//!
//! 1. place the pads or pins (skipping exceptions),
//! 2. take the envelope of the pin/pad, package and user extents as the
//!    courtyard bounding box,
//! 3. add fiducials, the silkscreen outline and the pin 1 marker,
//! 4. close with the courtyard rectangle and the attribute block.
//!
//! Steps 2 and 4 live in [`Layout`]; the family modules only differ in where
//! copper and silkscreen go.

pub mod axial;
pub mod bga;
pub mod chip;
pub mod dip;
pub mod perimeter;
pub mod pga;
pub mod plcc;
pub mod qfn;
pub mod qfp;
pub mod sip;
pub mod so;
pub mod sot;
pub mod to;
pub mod to92;

use tracing::debug;

use crate::error::FpwResult;
use crate::geometry::{
    Arc, BoundingBox, Extents, Geometry, Line, ObjectFlags, Pad, Pin, Primitive,
};
use crate::params::{PackageFamily, PadShape, ParameterModel};

/// Courtyard line width used when a negative width is requested (centimil).
pub const THIN_LINE_WIDTH: f64 = 1.0;

/// Trait for package generators.
pub trait PackageGenerator {
    /// Family this generator lays out.
    fn family(&self) -> PackageFamily;

    /// Generates the footprint for the given parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters describe a layout the family
    /// cannot produce. No partial geometry is returned.
    fn generate(&self, params: &ParameterModel) -> FpwResult<Geometry>;
}

/// Returns the generator for a family.
#[must_use]
pub fn generator_for(family: PackageFamily) -> &'static dyn PackageGenerator {
    match family {
        PackageFamily::Bga => &bga::BgaGenerator,
        PackageFamily::Capc => &chip::ChipGenerator::CAPC,
        PackageFamily::Indc => &chip::ChipGenerator::INDC,
        PackageFamily::Resc => &chip::ChipGenerator::RESC,
        PackageFamily::Dip => &dip::DipGenerator,
        PackageFamily::Do => &axial::DoGenerator,
        PackageFamily::Pga => &pga::PgaGenerator,
        PackageFamily::Plcc => &plcc::PlccGenerator,
        PackageFamily::Qfn => &qfn::QfnGenerator,
        PackageFamily::Qfp => &qfp::QfpGenerator,
        PackageFamily::Sip => &sip::SipGenerator,
        PackageFamily::So => &so::SoGenerator,
        PackageFamily::Sot => &sot::SotGenerator,
        PackageFamily::To => &to::ToGenerator,
        PackageFamily::To92 => &to92::To92Generator,
    }
}

/// Generates the footprint for `params` with its family's generator.
///
/// # Errors
///
/// Returns the generator's error; see [`PackageGenerator::generate`].
pub fn generate(params: &ParameterModel) -> FpwResult<Geometry> {
    generator_for(params.package_family).generate(params)
}

/// Offset of grid cell `index` out of `count` cells, centred on the origin.
///
/// With four cells the offsets are -1.5, -0.5, 0.5 and 1.5 pitches.
#[must_use]
pub fn grid_offset(count: u32, index: u32, pitch: f64) -> f64 {
    ((-f64::from(count) - 1.0) / 2.0 + 1.0 + f64::from(index)) * pitch
}

/// Flags for a through-hole pin of the given shape.
#[must_use]
pub fn pin_flags(shape: PadShape, square: bool) -> ObjectFlags {
    if square {
        return ObjectFlags::SQUARE;
    }
    match shape {
        PadShape::Square => ObjectFlags::SQUARE,
        PadShape::Octagonal => ObjectFlags::OCTAGON,
        PadShape::Round | PadShape::RoundElongated | PadShape::None => ObjectFlags::empty(),
    }
}

/// Flags for an SMD pad of the given shape.
#[must_use]
pub fn pad_flags(shape: PadShape, square: bool) -> ObjectFlags {
    if square || shape == PadShape::Square {
        ObjectFlags::SQUARE
    } else {
        ObjectFlags::empty()
    }
}

/// Accumulates the primitives of one footprint.
///
/// Lengths passed to the `push_*` methods are already in centimil; use
/// [`Layout::c`] to convert parameter values.
#[derive(Debug)]
pub struct Layout<'a> {
    params: &'a ParameterModel,
    multiplier: f64,
    primitives: Vec<Primitive>,
    extents: Extents,
    bounding_box: BoundingBox,
}

impl<'a> Layout<'a> {
    /// Starts a layout.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::FpwError::InvalidUnits`] when no unit is selected.
    pub fn new(params: &'a ParameterModel) -> FpwResult<Self> {
        Ok(Self {
            params,
            multiplier: params.multiplier()?,
            primitives: Vec::new(),
            extents: Extents::default(),
            bounding_box: BoundingBox::default(),
        })
    }

    /// The parameters being laid out.
    #[must_use]
    pub const fn params(&self) -> &'a ParameterModel {
        self.params
    }

    /// Converts a document-unit length to centimil.
    #[must_use]
    pub fn c(&self, value: f64) -> f64 {
        value * self.multiplier
    }

    /// Copper clearance of ordinary pads, in centimil.
    #[must_use]
    pub fn pad_clearance(&self) -> f64 {
        self.c(self.params.pad_clearance)
    }

    /// Mask opening for copper of `size` centimil.
    #[must_use]
    pub fn mask_for(&self, size: f64) -> f64 {
        size + self.c(self.params.pad_solder_mask_clearance)
    }

    /// Silkscreen line width in centimil.
    #[must_use]
    pub fn silk_width(&self) -> f64 {
        self.c(self.params.silkscreen_line_width)
    }

    /// Adds a round or square through-hole pin using the pad diameter and drill.
    pub fn push_pin(&mut self, number: &str, x: f64, y: f64, flags: ObjectFlags) {
        let width = self.c(self.params.pad_diameter);
        let pin = Pin {
            number: number.to_string(),
            name: number.to_string(),
            x,
            y,
            width,
            clearance: self.pad_clearance(),
            mask_clearance: self.mask_for(width),
            drill: self.c(self.params.pin_drill_diameter),
            flags,
        };
        self.primitives.push(Primitive::Pin(pin));
    }

    /// Adds a round pad of `diameter` centimil centred at `(x, y)`.
    pub fn push_round_pad(
        &mut self,
        number: &str,
        x: f64,
        y: f64,
        diameter: f64,
        flags: ObjectFlags,
    ) {
        let pad = Pad {
            number: number.to_string(),
            name: number.to_string(),
            x0: x,
            y0: y,
            x1: x,
            y1: y,
            width: diameter,
            clearance: self.pad_clearance(),
            mask_clearance: self.mask_for(diameter),
            flags,
        };
        self.primitives.push(Primitive::Pad(pad));
    }

    /// Adds a rectangular pad of `size_x` by `size_y` centimil centred at `(x, y)`.
    ///
    /// The pad is written as a segment along its long side.
    #[allow(clippy::too_many_arguments)]
    pub fn push_rect_pad(
        &mut self,
        number: &str,
        x: f64,
        y: f64,
        size_x: f64,
        size_y: f64,
        mask_clearance: f64,
        flags: ObjectFlags,
    ) {
        let (x0, y0, x1, y1, width) = if size_x >= size_y {
            let half = (size_x - size_y) / 2.0;
            (x - half, y, x + half, y, size_y)
        } else {
            let half = (size_y - size_x) / 2.0;
            (x, y - half, x, y + half, size_x)
        };
        let pad = Pad {
            number: number.to_string(),
            name: number.to_string(),
            x0,
            y0,
            x1,
            y1,
            width,
            clearance: self.pad_clearance(),
            mask_clearance: width + mask_clearance,
            flags,
        };
        self.primitives.push(Primitive::Pad(pad));
    }

    /// Adds the exposed thermal pad at the origin, numbered `number`.
    pub fn push_thermal_pad(&mut self, number: &str) {
        self.push_thermal_pad_at(number, 0.0, 0.0);
    }

    /// Adds the exposed thermal pad centred at `(x, y)`.
    pub fn push_thermal_pad_at(&mut self, number: &str, x: f64, y: f64) {
        let p = self.params;
        let flags = if p.thermal_no_paste {
            ObjectFlags::SQUARE | ObjectFlags::NOPASTE
        } else {
            ObjectFlags::SQUARE
        };
        self.push_rect_pad(
            number,
            x,
            y,
            self.c(p.thermal_width),
            self.c(p.thermal_length),
            self.c(p.thermal_solder_mask_clearance),
            flags,
        );
    }

    /// Adds a line.
    pub fn push_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width: f64) {
        self.primitives
            .push(Primitive::Line(Line::new(x0, y0, x1, y1, width)));
    }

    /// Adds the four sides of a rectangle.
    pub fn push_rect(&mut self, bb: BoundingBox, width: f64) {
        self.push_line(bb.xmin, bb.ymin, bb.xmax, bb.ymin, width);
        self.push_line(bb.xmax, bb.ymin, bb.xmax, bb.ymax, width);
        self.push_line(bb.xmax, bb.ymax, bb.xmin, bb.ymax, width);
        self.push_line(bb.xmin, bb.ymax, bb.xmin, bb.ymin, width);
    }

    /// Adds an arc.
    pub fn push_arc(&mut self, arc: Arc) {
        self.primitives.push(Primitive::Arc(arc));
    }

    /// Extent of the copper placed so far, grown by each object's mask clearance.
    ///
    /// Returns an empty box at the origin when nothing has been placed.
    #[must_use]
    pub fn pin_pad_extent(&self) -> BoundingBox {
        let mut extent: Option<BoundingBox> = None;
        for primitive in &self.primitives {
            let bb = match primitive {
                Primitive::Pad(pad) => {
                    let margin = pad.mask_clearance.max(pad.width) / 2.0;
                    BoundingBox::new(
                        pad.x0.min(pad.x1),
                        pad.y0.min(pad.y1),
                        pad.x0.max(pad.x1),
                        pad.y0.max(pad.y1),
                    )
                    .inflate(margin)
                }
                Primitive::Pin(pin) => {
                    let margin = pin.mask_clearance.max(pin.width) / 2.0;
                    BoundingBox::new(pin.x, pin.y, pin.x, pin.y).inflate(margin)
                }
                _ => continue,
            };
            extent = Some(extent.map_or(bb, |e| e.envelope(bb)));
        }
        extent.unwrap_or_default()
    }

    /// Package body grown by the courtyard clearance.
    #[must_use]
    pub fn package_extent(&self) -> BoundingBox {
        let p = self.params;
        BoundingBox::centred(self.c(p.body_width), self.c(p.body_length))
            .inflate(self.c(p.courtyard_clearance_with_package))
    }

    /// Courtyard requested by the user.
    #[must_use]
    pub fn user_extent(&self) -> BoundingBox {
        let p = self.params;
        BoundingBox::centred(self.c(p.courtyard_width), self.c(p.courtyard_length))
    }

    /// Fixes the courtyard bounding box from the copper placed so far.
    ///
    /// Call after all pads and pins are placed and before fiducials.
    pub fn close_copper(&mut self) -> BoundingBox {
        self.extents = Extents {
            pin_pad: self.pin_pad_extent(),
            package: self.package_extent(),
            user: self.user_extent(),
        };
        self.bounding_box = self.extents.envelope();
        self.bounding_box
    }

    /// The courtyard bounding box fixed by [`Layout::close_copper`].
    #[must_use]
    pub const fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Adds two fiducials on diagonal corners of the courtyard when requested.
    ///
    /// Where the silkscreen outline coincides with the courtyard on an axis the
    /// fiducials move one document unit further out.
    pub fn push_fiducials(&mut self) {
        let p = self.params;
        if !p.fiducial {
            return;
        }

        let bb = self.bounding_box;
        let silk = BoundingBox::centred(self.c(p.silkscreen_width), self.c(p.silkscreen_length));
        let step = self.c(1.0);
        let dx = if (silk.xmax - bb.xmax).abs() < f64::EPSILON * bb.xmax.abs().max(1.0) {
            step
        } else {
            0.0
        };
        let dy = if (silk.ymax - bb.ymax).abs() < f64::EPSILON * bb.ymax.abs().max(1.0) {
            step
        } else {
            0.0
        };

        let diameter = self.c(p.fiducial_pad_diameter);
        let corners = [
            ("FID1", bb.xmin - dx, bb.ymin - dy),
            ("FID2", bb.xmax + dx, bb.ymax + dy),
        ];
        for (number, x, y) in corners {
            let pad = Pad {
                number: number.to_string(),
                name: number.to_string(),
                x0: x,
                y0: y,
                x1: x,
                y1: y,
                width: diameter,
                clearance: self.c(p.fiducial_pad_clearance),
                mask_clearance: diameter + self.c(p.fiducial_pad_solder_mask_clearance),
                flags: ObjectFlags::empty(),
            };
            self.primitives.push(Primitive::Pad(pad));
        }
    }

    /// Adds the courtyard and attributes and returns the finished geometry.
    #[must_use]
    pub fn finish(mut self) -> Geometry {
        let p = self.params;

        if p.courtyard {
            let width = if p.courtyard_line_width < 0.0 {
                Some(THIN_LINE_WIDTH)
            } else if p.courtyard_line_width > 0.0 {
                Some(self.c(p.courtyard_line_width))
            } else {
                None
            };
            if let Some(width) = width {
                self.push_rect(self.bounding_box, width);
            }
        }

        if let Some(attributes) = &p.attributes {
            let units = p.units.map(|u| u.to_string()).unwrap_or_default();
            let entries = [
                ("author", attributes.author.clone()),
                ("dist-license", attributes.dist_license.clone()),
                ("use-license", attributes.use_license.clone()),
                ("status", attributes.status.clone()),
                ("package body length", format!("{} {units}", p.body_length)),
                ("package body width", format!("{} {units}", p.body_width)),
                ("package height", format!("{} {units}", p.body_height)),
            ];
            for (key, value) in entries {
                self.primitives.push(Primitive::Attribute {
                    key: key.to_string(),
                    value,
                });
            }
        }

        let geometry = Geometry {
            name: p.element_name().to_string(),
            value: p.footprint_value.clone(),
            primitives: self.primitives,
            bounding_box: self.bounding_box,
            extents: self.extents,
        };

        debug!(
            family = %p.package_family,
            name = %geometry.name,
            copper = geometry.copper_count(),
            primitives = geometry.primitives.len(),
            "Generated footprint"
        );

        geometry
    }
}
