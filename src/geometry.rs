//! Generated footprint geometry.
//!
//! These types represent the elements a footprint is made of: SMD pads,
//! through-hole pins, silkscreen/courtyard lines and arcs, and attributes.
//! All coordinates and sizes are in centimil and stay floating point until
//! the emitter truncates them.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Object flags of pads and pins.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ObjectFlags: u16 {
        /// Square ends (pads) or square copper (pins).
        const SQUARE = 1 << 0;
        /// Octagonal pin.
        const OCTAGON = 1 << 1;
        /// No solder paste on this pad.
        const NOPASTE = 1 << 2;
    }
}

impl ObjectFlags {
    /// Flag names as written in the footprint file, comma separated.
    #[must_use]
    pub fn to_flag_string(self) -> String {
        const NAMES: [(ObjectFlags, &str); 3] = [
            (ObjectFlags::SQUARE, "square"),
            (ObjectFlags::OCTAGON, "octagon"),
            (ObjectFlags::NOPASTE, "nopaste"),
        ];

        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// An SMD pad: a line segment of copper with the given thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    /// Pad number (e.g. "1", "A1").
    pub number: String,
    /// Pad name.
    pub name: String,
    /// Segment start X.
    pub x0: f64,
    /// Segment start Y.
    pub y0: f64,
    /// Segment end X.
    pub x1: f64,
    /// Segment end Y.
    pub y1: f64,
    /// Copper thickness (the pad's short side).
    pub width: f64,
    /// Copper clearance.
    pub clearance: f64,
    /// Solder mask opening size.
    pub mask_clearance: f64,
    /// Object flags.
    pub flags: ObjectFlags,
}

impl Pad {
    /// Centre of the pad.
    #[must_use]
    pub fn centre(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }
}

/// A plated through-hole pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Pin number.
    pub number: String,
    /// Pin name.
    pub name: String,
    /// Centre X.
    pub x: f64,
    /// Centre Y.
    pub y: f64,
    /// Copper diameter.
    pub width: f64,
    /// Copper clearance.
    pub clearance: f64,
    /// Solder mask opening size.
    pub mask_clearance: f64,
    /// Drill diameter.
    pub drill: f64,
    /// Object flags.
    pub flags: ObjectFlags,
}

/// A silkscreen or courtyard line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start X.
    pub x0: f64,
    /// Start Y.
    pub y0: f64,
    /// End X.
    pub x1: f64,
    /// End Y.
    pub y1: f64,
    /// Line width.
    pub width: f64,
}

impl Line {
    /// Creates a new line segment.
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64, width: f64) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            width,
        }
    }
}

/// An elliptical arc.
///
/// Angles are in degrees; 0 points to -X and 90 to +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// Centre X.
    pub x: f64,
    /// Centre Y.
    pub y: f64,
    /// Radius along X.
    pub width: f64,
    /// Radius along Y.
    pub height: f64,
    /// Start angle.
    pub start_angle: f64,
    /// Sweep.
    pub delta_angle: f64,
    /// Line width.
    pub line_width: f64,
}

impl Arc {
    /// Creates a full circle.
    #[must_use]
    pub const fn circle(x: f64, y: f64, radius: f64, line_width: f64) -> Self {
        Self {
            x,
            y,
            width: radius,
            height: radius,
            start_angle: 0.0,
            delta_angle: 360.0,
            line_width,
        }
    }
}

/// One element of a footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// SMD pad.
    Pad(Pad),
    /// Through-hole pin.
    Pin(Pin),
    /// Line.
    Line(Line),
    /// Arc.
    Arc(Arc),
    /// Key/value metadata.
    Attribute {
        /// Attribute key.
        key: String,
        /// Attribute value.
        value: String,
    },
}

/// Axis-aligned rectangle in centimil.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum X.
    pub xmin: f64,
    /// Minimum Y.
    pub ymin: f64,
    /// Maximum X.
    pub xmax: f64,
    /// Maximum Y.
    pub ymax: f64,
}

impl BoundingBox {
    /// Creates a box from its bounds.
    #[must_use]
    pub const fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Creates a box of the given size centred on the origin.
    #[must_use]
    pub fn centred(width: f64, length: f64) -> Self {
        Self::new(-width / 2.0, -length / 2.0, width / 2.0, length / 2.0)
    }

    /// Grows the box by `margin` on every side.
    #[must_use]
    pub fn inflate(self, margin: f64) -> Self {
        Self::new(
            self.xmin - margin,
            self.ymin - margin,
            self.xmax + margin,
            self.ymax + margin,
        )
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn envelope(self, other: Self) -> Self {
        Self::new(
            self.xmin.min(other.xmin),
            self.ymin.min(other.ymin),
            self.xmax.max(other.xmax),
            self.ymax.max(other.ymax),
        )
    }

    /// Returns true if `other` lies inside (or on) this box.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.xmin <= other.xmin
            && self.ymin <= other.ymin
            && self.xmax >= other.xmax
            && self.ymax >= other.ymax
    }

    /// Extent along X.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Extent along Y.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// The three extents the courtyard is the envelope of.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extents {
    /// Pads or pins including their solder mask clearance.
    pub pin_pad: BoundingBox,
    /// Package body grown by the courtyard clearance.
    pub package: BoundingBox,
    /// Courtyard size requested by the user.
    pub user: BoundingBox,
}

impl Extents {
    /// Outer envelope of all three extents.
    #[must_use]
    pub fn envelope(&self) -> BoundingBox {
        self.pin_pad.envelope(self.package).envelope(self.user)
    }
}

/// The generated footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Element name.
    pub name: String,
    /// Element value.
    pub value: String,
    /// Primitives in emission order.
    pub primitives: Vec<Primitive>,
    /// Courtyard bounding box.
    pub bounding_box: BoundingBox,
    /// The extents `bounding_box` was built from.
    pub extents: Extents,
}

impl Geometry {
    /// Iterates over the SMD pads.
    pub fn pads(&self) -> impl Iterator<Item = &Pad> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Pad(pad) => Some(pad),
            _ => None,
        })
    }

    /// Iterates over the through-hole pins.
    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Pin(pin) => Some(pin),
            _ => None,
        })
    }

    /// Iterates over the lines.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    /// Iterates over the arcs.
    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Arc(arc) => Some(arc),
            _ => None,
        })
    }

    /// Iterates over the attributes as `(key, value)`.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Attribute { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        })
    }

    /// Number of pads plus pins.
    #[must_use]
    pub fn copper_count(&self) -> usize {
        self.pads().count() + self.pins().count()
    }
}
