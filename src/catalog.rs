//! Default footprint library.
//!
//! Maps catalog identifiers such as `BGA100C100P10X10_1100X1100X140` to fully
//! populated parameter models. A parameter model whose `footprint_type`
//! starts with `?` is replaced by the catalog entry of the same name; see
//! [`resolve`].

use tracing::debug;

use crate::designator::{designator_for, PinExceptions};
use crate::error::{FpwError, FpwResult};
use crate::params::{DualRowDistance, Location, PackageFamily, PadShape, ParameterModel};
use crate::units::Units;

/// Every identifier in the catalog.
pub const IDS: &[&str] = &[
    "BGA64C80P8X8_800X800X120",
    "BGA100C100P10X10_1100X1100X140",
    "BGA256C100P16X16_1700X1700X170",
    "CAPC1005X55",
    "CAPC1608X90",
    "CAPC2012X130",
    "DIP8_300",
    "DIP14_300",
    "DIP16_300",
    "DIP28_600",
    "DIP40_600",
    "DO35",
    "DO41",
    "INDC1608X95",
    "INDC2012X120",
    "PGA144P13X13",
    "PLCC20",
    "PLCC28",
    "PLCC44",
    "PLCC68",
    "QFN16P65_300X300X90",
    "QFN32P50_500X500X90",
    "QFP44P80_1000X1000X160",
    "QFP64P50_1000X1000X160",
    "RESC1005X40",
    "RESC1608X55",
    "RESC2012X70",
    "RESC3216X70",
    "SIP4",
    "SIP8",
    "SOIC127P600X175-8",
    "SOIC127P600X175-14",
    "SOIC127P600X175-16",
    "SOT95P280X145-3",
    "SOT95P280X145-5",
    "SOT95P280X145-6",
    "SOT65P280X145-8",
    "TO220",
    "TO247",
    "TO92",
];

/// Lists the catalog identifiers.
#[must_use]
pub fn ids() -> &'static [&'static str] {
    IDS
}

/// Returns the parameter model of a catalog entry.
#[must_use]
pub fn lookup(id: &str) -> Option<ParameterModel> {
    let id = id.trim();
    let mut params = build(id)?;
    params.footprint_type = id.to_string();
    params.footprint_name = id.to_string();
    params.footprint_value = id.to_string();
    Some(params)
}

/// Applies the question-mark convention.
///
/// When `footprint_type` starts with `?` the rest is looked up and the catalog
/// entry replaces the parameters. The caller's footprint name, value and
/// attributes are kept when set. Any other model is returned unchanged.
///
/// # Errors
///
/// Returns [`FpwError::MissingDefaultValues`] when the identifier is not in
/// the catalog.
pub fn resolve(params: ParameterModel) -> FpwResult<ParameterModel> {
    let Some(id) = params.footprint_type.strip_prefix('?') else {
        return Ok(params);
    };
    let id = id.trim();
    let mut resolved = lookup(id).ok_or_else(|| FpwError::MissingDefaultValues {
        catalog_id: id.to_string(),
    })?;

    if !params.footprint_name.is_empty() {
        resolved.footprint_name = params.footprint_name;
    }
    if !params.footprint_value.is_empty() {
        resolved.footprint_value = params.footprint_value;
    }
    if params.attributes.is_some() {
        resolved.attributes = params.attributes;
    }

    debug!(catalog_id = id, family = %resolved.package_family, "Loaded default values");
    Ok(resolved)
}

fn build(id: &str) -> Option<ParameterModel> {
    use PackageFamily::{Capc, Indc, Resc};

    let params = match id {
        "BGA64C80P8X8_800X800X120" => bga(8, 0.8, 0.4, [8.0, 8.0, 1.2]),
        "BGA100C100P10X10_1100X1100X140" => bga(10, 1.0, 0.5, [11.0, 11.0, 1.4]),
        "BGA256C100P16X16_1700X1700X170" => bga(16, 1.0, 0.5, [17.0, 17.0, 1.7]),

        // pitch, pad length, pad width
        "CAPC1005X55" => chip(Capc, [1.0, 0.6, 0.6], [1.0, 0.5, 0.55]),
        "CAPC1608X90" => chip(Capc, [1.5, 0.9, 0.95], [1.6, 0.8, 0.9]),
        "CAPC2012X130" => chip(Capc, [1.9, 1.0, 1.45], [2.0, 1.25, 1.3]),
        "INDC1608X95" => chip(Indc, [1.5, 0.9, 0.95], [1.6, 0.8, 0.95]),
        "INDC2012X120" => chip(Indc, [1.9, 1.0, 1.45], [2.0, 1.25, 1.2]),
        "RESC1005X40" => chip(Resc, [1.0, 0.6, 0.6], [1.0, 0.5, 0.4]),
        "RESC1608X55" => chip(Resc, [1.5, 0.9, 0.95], [1.6, 0.8, 0.55]),
        "RESC2012X70" => chip(Resc, [1.9, 1.0, 1.45], [2.0, 1.25, 0.7]),
        "RESC3216X70" => chip(Resc, [3.0, 1.15, 1.8], [3.2, 1.6, 0.7]),

        "DIP8_300" => dip(8, 300.0),
        "DIP14_300" => dip(14, 300.0),
        "DIP16_300" => dip(16, 300.0),
        "DIP28_600" => dip(28, 600.0),
        "DIP40_600" => dip(40, 600.0),

        "DO35" => diode(400.0, 60.0, 30.0, [160.0, 80.0, 80.0]),
        "DO41" => diode(500.0, 80.0, 42.0, [205.0, 107.0, 107.0]),

        "PGA144P13X13" => pga144(),

        "PLCC20" => plcc(5, 350.0),
        "PLCC28" => plcc(7, 450.0),
        "PLCC44" => plcc(11, 650.0),
        "PLCC68" => plcc(17, 950.0),

        "QFN16P65_300X300X90" => qfn(4, 0.65, [0.8, 0.35], 3.0, 1.7),
        "QFN32P50_500X500X90" => qfn(8, 0.5, [0.8, 0.28], 5.0, 3.4),

        "QFP44P80_1000X1000X160" => qfp44(),
        "QFP64P50_1000X1000X160" => qfp64(),

        "SIP4" => sip(4),
        "SIP8" => sip(8),

        "SOIC127P600X175-8" => soic(8, 4.9),
        "SOIC127P600X175-14" => soic(14, 8.65),
        "SOIC127P600X175-16" => soic(16, 9.9),

        "SOT95P280X145-3" => sot(3, 0.95, 0.6, 2.2, 1.3),
        "SOT95P280X145-5" => sot(5, 0.95, 0.6, 2.5, 1.6),
        "SOT95P280X145-6" => sot(6, 0.95, 0.6, 2.5, 1.6),
        "SOT65P280X145-8" => sot(8, 0.65, 0.4, 2.5, 1.6),

        "TO220" => to(2.54, 1.8, 1.1, [10.0, 4.5, 15.0]),
        "TO247" => to(5.45, 2.5, 1.4, [15.9, 5.0, 20.8]),
        "TO92" => to92(),

        _ => return None,
    };
    Some(params)
}

/// Common settings: body, silkscreen outline and courtyard.
fn base(family: PackageFamily, units: Units, body: [f64; 3]) -> ParameterModel {
    let [width, length, height] = body;
    let (silk_line, courtyard_line, courtyard_clearance, mask) = match units {
        Units::Mm => (0.15, 0.05, 0.25, 0.05),
        Units::Mil | Units::Mil100 => (8.0, 2.0, 10.0, 3.0),
    };

    let mut p = ParameterModel::new(family, units);
    p.body_width = width;
    p.body_length = length;
    p.body_height = height;
    p.pad_solder_mask_clearance = mask;

    p.silkscreen_package_outline = true;
    p.silkscreen_indicate_pin1 = true;
    p.silkscreen_width = width;
    p.silkscreen_length = length;
    p.silkscreen_line_width = silk_line;

    p.courtyard = true;
    p.courtyard_line_width = courtyard_line;
    p.courtyard_clearance_with_package = courtyard_clearance;
    p.courtyard_width = width + 2.0 * courtyard_clearance;
    p.courtyard_length = length + 2.0 * courtyard_clearance;
    p
}

fn bga(size: u32, pitch: f64, pad_diameter: f64, body: [f64; 3]) -> ParameterModel {
    let mut p = base(PackageFamily::Bga, Units::Mm, body);
    p.number_of_columns = size;
    p.number_of_rows = size;
    p.number_of_pins = size * size;
    p.pitch_x = pitch;
    p.pitch_y = pitch;
    p.pad_shape = PadShape::Round;
    p.pad_diameter = pad_diameter;
    p.pad_clearance = 0.1;
    p
}

fn chip(family: PackageFamily, pads: [f64; 3], body: [f64; 3]) -> ParameterModel {
    let [pitch, pad_length, pad_width] = pads;
    let mut p = base(family, Units::Mm, body);
    p.number_of_pins = 2;
    p.number_of_columns = 2;
    p.number_of_rows = 1;
    p.pitch_x = pitch;
    p.pad_shape = PadShape::Square;
    p.pad_length = pad_length;
    p.pad_width = pad_width;
    p.pad_clearance = 0.1;
    p
}

fn dip(pins: u32, row_spacing: f64) -> ParameterModel {
    let rows = pins / 2;
    let length = f64::from(rows) * 100.0;
    let mut p = base(PackageFamily::Dip, Units::Mil, [row_spacing - 50.0, length, 130.0]);
    p.number_of_pins = pins;
    p.number_of_columns = 2;
    p.number_of_rows = rows;
    p.pitch_x = row_spacing;
    p.pitch_y = 100.0;
    p.pad_diameter = 60.0;
    p.pin_drill_diameter = 28.0;
    p.pad_clearance = 10.0;
    p.pin1_is_square = true;
    p
}

fn diode(pitch: f64, pad_diameter: f64, drill: f64, body: [f64; 3]) -> ParameterModel {
    let mut p = base(PackageFamily::Do, Units::Mil, body);
    p.number_of_pins = 2;
    p.number_of_columns = 2;
    p.number_of_rows = 1;
    p.pitch_x = pitch;
    p.pad_diameter = pad_diameter;
    p.pin_drill_diameter = drill;
    p.pad_clearance = 10.0;
    p.pin1_is_square = true;
    p
}

/// 13 by 13 grid with the centre 5 by 5 block depopulated.
fn pga144() -> ParameterModel {
    let mut p = base(PackageFamily::Pga, Units::Mil, [1400.0, 1400.0, 120.0]);
    p.number_of_columns = 13;
    p.number_of_rows = 13;
    p.number_of_pins = 144;
    p.pitch_x = 100.0;
    p.pitch_y = 100.0;
    p.pad_diameter = 60.0;
    p.pin_drill_diameter = 35.0;
    p.pad_clearance = 10.0;
    p.pin1_is_square = true;
    p.pin_pad_exceptions = (4..9)
        .flat_map(|row| (4..9).map(move |col| designator_for(row, col)))
        .collect::<PinExceptions>();
    p
}

fn perimeter(
    family: PackageFamily,
    units: Units,
    size: u32,
    pitch: f64,
    pad: [f64; 2],
    body: [f64; 3],
) -> ParameterModel {
    let [pad_length, pad_width] = pad;
    let mut p = base(family, units, body);
    p.number_of_columns = size;
    p.number_of_rows = size;
    p.number_of_pins = 4 * size;
    p.pitch_x = pitch;
    p.pitch_y = pitch;
    p.pad_length = pad_length;
    p.pad_width = pad_width;
    p
}

/// Square J-lead carrier, pin 1 in the middle of the top edge.
fn plcc(size: u32, body: f64) -> ParameterModel {
    let mut p = perimeter(
        PackageFamily::Plcc,
        Units::Mil,
        size,
        50.0,
        [80.0, 25.0],
        [body, body, 180.0],
    );
    p.pad_shape = PadShape::Square;
    p.pad_clearance = 10.0;
    p.distance_x = DualRowDistance::center(body - 40.0);
    p.distance_y = DualRowDistance::center(body - 40.0);
    p.number1_position = Location::UpperMiddle;
    p
}

fn qfn(size: u32, pitch: f64, pad: [f64; 2], body: f64, thermal: f64) -> ParameterModel {
    let mut p = perimeter(PackageFamily::Qfn, Units::Mm, size, pitch, pad, [body, body, 0.9]);
    p.pad_shape = PadShape::Square;
    p.pad_clearance = if pitch < 0.6 { 0.15 } else { 0.2 };
    p.distance_x = DualRowDistance::center(body);
    p.distance_y = DualRowDistance::center(body);
    p.thermal = true;
    p.thermal_width = thermal;
    p.thermal_length = thermal;
    p.thermal_solder_mask_clearance = 0.05;
    p
}

fn qfp44() -> ParameterModel {
    let mut p = perimeter(
        PackageFamily::Qfp,
        Units::Mm,
        11,
        0.8,
        [1.5, 0.55],
        [10.0, 10.0, 1.6],
    );
    p.pad_shape = PadShape::RoundElongated;
    p.pad_clearance = 0.2;
    p.distance_x = DualRowDistance::outer(13.0);
    p.distance_y = DualRowDistance::outer(13.0);
    p.fiducial = true;
    p.fiducial_pad_diameter = 1.0;
    p.fiducial_pad_clearance = 0.5;
    p.fiducial_pad_solder_mask_clearance = 1.0;
    p
}

fn qfp64() -> ParameterModel {
    let mut p = perimeter(
        PackageFamily::Qfp,
        Units::Mm,
        16,
        0.5,
        [1.5, 0.28],
        [10.0, 10.0, 1.6],
    );
    p.pad_shape = PadShape::RoundElongated;
    p.pad_clearance = 0.15;
    p.distance_x = DualRowDistance::outer(12.4);
    p.distance_y = DualRowDistance::outer(12.4);
    p
}

fn sip(pins: u32) -> ParameterModel {
    let length = f64::from(pins) * 100.0;
    let mut p = base(PackageFamily::Sip, Units::Mil, [100.0, length, 250.0]);
    p.number_of_pins = pins;
    p.number_of_columns = 1;
    p.number_of_rows = pins;
    p.pitch_y = 100.0;
    p.pad_diameter = 60.0;
    p.pin_drill_diameter = 32.0;
    p.pad_clearance = 10.0;
    p.pin1_is_square = true;
    p
}

fn soic(pins: u32, body_length: f64) -> ParameterModel {
    let mut p = base(PackageFamily::So, Units::Mm, [3.9, body_length, 1.75]);
    p.number_of_pins = pins;
    p.number_of_columns = 2;
    p.number_of_rows = pins / 2;
    p.pitch_y = 1.27;
    p.pad_shape = PadShape::Square;
    p.pad_length = 1.55;
    p.pad_width = 0.6;
    p.pad_clearance = 0.2;
    p.distance_x = DualRowDistance::center(5.4);
    p
}

fn sot(pins: u32, pitch: f64, pad_width: f64, row_spacing: f64, body_width: f64) -> ParameterModel {
    let mut p = base(PackageFamily::Sot, Units::Mm, [body_width, 2.9, 1.45]);
    p.number_of_pins = pins;
    p.number_of_columns = 2;
    p.number_of_rows = if pins == 8 { 4 } else { 3 };
    p.pitch_y = pitch;
    p.pad_shape = PadShape::Square;
    p.pad_length = 1.1;
    p.pad_width = pad_width;
    p.pad_clearance = 0.15;
    p.distance_x = DualRowDistance::center(row_spacing);
    p
}

fn to(pitch: f64, pad_diameter: f64, drill: f64, body: [f64; 3]) -> ParameterModel {
    let mut p = base(PackageFamily::To, Units::Mm, body);
    p.number_of_pins = 3;
    p.number_of_columns = 3;
    p.number_of_rows = 1;
    p.pitch_x = pitch;
    p.pad_diameter = pad_diameter;
    p.pin_drill_diameter = drill;
    p.pad_clearance = 0.25;
    p.pin1_is_square = true;
    p
}

fn to92() -> ParameterModel {
    let mut p = base(PackageFamily::To92, Units::Mm, [4.8, 4.8, 4.8]);
    p.number_of_pins = 3;
    p.number_of_columns = 3;
    p.number_of_rows = 1;
    p.pitch_x = 1.27;
    p.pad_diameter = 1.05;
    p.pin_drill_diameter = 0.75;
    p.pad_clearance = 0.2;
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drc;
    use crate::packages;

    #[test]
    fn every_id_builds() {
        for id in ids() {
            let params = lookup(id).unwrap_or_else(|| panic!("{id} missing"));
            assert_eq!(params.footprint_type, *id);
            assert!(params.package_family.name().len() >= 2);
        }
    }

    #[test]
    fn ids_are_unique() {
        let mut sorted = IDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), IDS.len());
    }

    #[test]
    fn every_family_has_an_entry() {
        for family in PackageFamily::ALL {
            assert!(
                ids()
                    .iter()
                    .filter_map(|id| lookup(id))
                    .any(|p| p.package_family == family),
                "no entry for {family}"
            );
        }
    }

    #[test]
    fn entries_pass_drc() {
        for id in ids() {
            let params = lookup(id).unwrap();
            let result = drc::check(&params);
            assert!(result.ok, "{id}: {:?}", result.violations);
        }
    }

    #[test]
    fn entries_generate() {
        for id in ids() {
            let params = lookup(id).unwrap();
            let geometry = packages::generate(&params).unwrap_or_else(|e| panic!("{id}: {e}"));
            assert_eq!(geometry.name, *id);
            assert!(geometry.copper_count() > 0, "{id}");
        }
    }

    #[test]
    fn pga_centre_is_depopulated() {
        let params = lookup("PGA144P13X13").unwrap();
        assert_eq!(params.pin_pad_exceptions.len(), 25);
        assert!(!params.pin_pad_exceptions.is_populated("G7"));
        let geometry = packages::generate(&params).unwrap();
        assert_eq!(geometry.pins().count(), 144);
    }

    #[test]
    fn unknown_id() {
        assert!(lookup("BGA1X1").is_none());
    }

    #[test]
    fn resolve_keeps_caller_name() {
        let mut params = ParameterModel::new(PackageFamily::Bga, Units::Mil);
        params.footprint_type = "?DIP8_300".to_string();
        params.footprint_name = "U3".to_string();
        let resolved = resolve(params).unwrap();
        assert_eq!(resolved.package_family, PackageFamily::Dip);
        assert_eq!(resolved.number_of_pins, 8);
        assert_eq!(resolved.footprint_name, "U3");
        assert_eq!(resolved.footprint_value, "DIP8_300");
        assert_eq!(resolved.footprint_type, "DIP8_300");
    }

    #[test]
    fn resolve_miss_is_an_error() {
        let mut params = ParameterModel::new(PackageFamily::Bga, Units::Mil);
        params.footprint_type = "?BGA1X1".to_string();
        match resolve(params) {
            Err(FpwError::MissingDefaultValues { catalog_id }) => assert_eq!(catalog_id, "BGA1X1"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn resolve_without_question_mark_is_identity() {
        let mut params = ParameterModel::new(PackageFamily::Sip, Units::Mil);
        params.footprint_type = "DIP8_300".to_string();
        let resolved = resolve(params.clone()).unwrap();
        assert_eq!(resolved, params);
    }
}
