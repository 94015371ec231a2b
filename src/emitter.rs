//! Footprint file output.
//!
//! Writes a [`Geometry`] in the `Element[...]` text format:
//!
//! ```text
//! Element["" "DIP8" "?" "DIP8" 0 0 -19000 -23000 0 100 ""]
//! (
//! 	Pin[-15000 -15000 6000 2000 6600 2800 "1" "1" "square"]
//! 	ElementLine[-10400 -20000 10400 -20000 1000]
//! 	Attribute("author" "")
//! )
//! ```
//!
//! Every number is integer centimil. Values are truncated here and nowhere
//! else.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FpwError, FpwResult};
use crate::geometry::{Geometry, Primitive};

/// Distance of the element name above the courtyard, in centimil.
const TEXT_OFFSET: f64 = 1000.0;

/// Extension of footprint files.
pub const FOOTPRINT_EXTENSION: &str = "fp";

/// Truncates a centimil value toward zero.
#[allow(clippy::cast_possible_truncation)] // Intentional: the format is integer centimil
fn cm(value: f64) -> i64 {
    value as i64
}

/// Quotes a string field.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Displays a geometry in the footprint file format.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a>(pub &'a Geometry);

impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let geometry = self.0;
        let bb = geometry.bounding_box;
        writeln!(
            f,
            "Element[\"\" {} \"?\" {} 0 0 {} {} 0 100 \"\"]",
            quoted(&geometry.name),
            quoted(&geometry.value),
            cm(bb.xmin),
            cm(bb.ymin - TEXT_OFFSET),
        )?;
        writeln!(f, "(")?;
        for primitive in &geometry.primitives {
            f.write_str("\t")?;
            write_primitive(f, primitive)?;
            f.write_str("\n")?;
        }
        writeln!(f, ")")
    }
}

fn write_primitive(f: &mut fmt::Formatter<'_>, primitive: &Primitive) -> fmt::Result {
    match primitive {
        Primitive::Pad(pad) => write!(
            f,
            "Pad[{} {} {} {} {} {} {} {} {} {}]",
            cm(pad.x0),
            cm(pad.y0),
            cm(pad.x1),
            cm(pad.y1),
            cm(pad.width),
            cm(pad.clearance),
            cm(pad.mask_clearance),
            quoted(&pad.name),
            quoted(&pad.number),
            quoted(&pad.flags.to_flag_string()),
        ),
        Primitive::Pin(pin) => write!(
            f,
            "Pin[{} {} {} {} {} {} {} {} {}]",
            cm(pin.x),
            cm(pin.y),
            cm(pin.width),
            cm(pin.clearance),
            cm(pin.mask_clearance),
            cm(pin.drill),
            quoted(&pin.name),
            quoted(&pin.number),
            quoted(&pin.flags.to_flag_string()),
        ),
        Primitive::Line(line) => write!(
            f,
            "ElementLine[{} {} {} {} {}]",
            cm(line.x0),
            cm(line.y0),
            cm(line.x1),
            cm(line.y1),
            cm(line.width),
        ),
        Primitive::Arc(arc) => write!(
            f,
            "ElementArc[{} {} {} {} {} {} {}]",
            cm(arc.x),
            cm(arc.y),
            cm(arc.width),
            cm(arc.height),
            cm(arc.start_angle),
            cm(arc.delta_angle),
            cm(arc.line_width),
        ),
        Primitive::Attribute { key, value } => {
            write!(f, "Attribute({} {})", quoted(key), quoted(value))
        }
    }
}

/// Renders a geometry as footprint file text.
#[must_use]
pub fn render(geometry: &Geometry) -> String {
    Element(geometry).to_string()
}

/// Path of the footprint file for `name`, adding the `.fp` extension.
#[must_use]
pub fn footprint_path(name: &str) -> PathBuf {
    let path = PathBuf::from(name);
    if path.extension().is_some_and(|ext| ext == FOOTPRINT_EXTENSION) {
        path
    } else {
        PathBuf::from(format!("{name}.{FOOTPRINT_EXTENSION}"))
    }
}

/// Writes the footprint file.
///
/// # Errors
///
/// Returns [`FpwError::FileWrite`] if the file cannot be written.
pub fn write_file(path: &Path, geometry: &Geometry) -> FpwResult<()> {
    std::fs::write(path, render(geometry)).map_err(|source| FpwError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), name = %geometry.name, "Wrote footprint");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Arc, BoundingBox, Extents, Line, ObjectFlags, Pad, Pin};

    fn sample() -> Geometry {
        Geometry {
            name: "TEST".to_string(),
            value: "value".to_string(),
            primitives: vec![
                Primitive::Pad(Pad {
                    number: "1".to_string(),
                    name: "1".to_string(),
                    x0: -100.7,
                    y0: 0.0,
                    x1: 100.7,
                    y1: 0.0,
                    width: 50.9,
                    clearance: 10.0,
                    mask_clearance: 60.0,
                    flags: ObjectFlags::SQUARE | ObjectFlags::NOPASTE,
                }),
                Primitive::Pin(Pin {
                    number: "2".to_string(),
                    name: "2".to_string(),
                    x: 1500.0,
                    y: -0.5,
                    width: 600.0,
                    clearance: 200.0,
                    mask_clearance: 660.0,
                    drill: 280.0,
                    flags: ObjectFlags::empty(),
                }),
                Primitive::Line(Line::new(0.0, 0.0, 10.0, 0.0, 1.0)),
                Primitive::Arc(Arc::circle(5.0, 5.0, 2.0, 1.0)),
                Primitive::Attribute {
                    key: "author".to_string(),
                    value: "me".to_string(),
                },
            ],
            bounding_box: BoundingBox::new(-2000.0, -1000.0, 2000.0, 1000.0),
            extents: Extents::default(),
        }
    }

    #[test]
    fn record_grammar() {
        let text = render(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "Element[\"\" \"TEST\" \"?\" \"value\" 0 0 -2000 -2000 0 100 \"\"]",
                "(",
                "\tPad[-100 0 100 0 50 10 60 \"1\" \"1\" \"square,nopaste\"]",
                "\tPin[1500 0 600 200 660 280 \"2\" \"2\" \"\"]",
                "\tElementLine[0 0 10 0 1]",
                "\tElementArc[5 5 2 2 0 360 1]",
                "\tAttribute(\"author\" \"me\")",
                ")",
            ]
        );
        assert!(text.ends_with(")\n"));
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(quoted("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn footprint_extension() {
        assert_eq!(footprint_path("DIP8"), PathBuf::from("DIP8.fp"));
        assert_eq!(footprint_path("out/DIP8.fp"), PathBuf::from("out/DIP8.fp"));
    }

    #[test]
    fn write_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x.fp");
        let err = write_file(&path, &sample()).unwrap_err();
        assert!(matches!(err, FpwError::FileWrite { .. }));

        let path = dir.path().join("x.fp");
        write_file(&path, &sample()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Element["));
    }
}
