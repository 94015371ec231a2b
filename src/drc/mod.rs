//! Design rule checks over a parameter model.
//!
//! The checker looks only at the parameters, never at generated geometry, so
//! it can run without generating anything. Every rule runs on every call and
//! all findings are returned together. Findings are advisory: callers decide
//! whether a failing footprint is still written.

pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::params::{DualRowDistance, PackageFamily, ParameterModel};
use rules::{pin_count_problem, rules_for, Spacing};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The footprint is not manufacturable as specified.
    Error,
    /// Something could not be verified or looks suspicious.
    Warning,
}

/// Identifies a design rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrcCode {
    /// Units not selected.
    Units,
    /// Pad shape not allowed for the family.
    PadShape,
    /// Body length is not positive.
    BodyLength,
    /// Body width is not positive.
    BodyWidth,
    /// Body height is not positive.
    BodyHeight,
    /// Courtyard length is not positive.
    CourtyardLength,
    /// Courtyard width is not positive.
    CourtyardWidth,
    /// Neighbouring pads along X are closer than the pad clearance.
    PadClearanceX,
    /// Neighbouring pads along Y are closer than the pad clearance.
    PadClearanceY,
    /// Opposite pad rows on X are closer than the pad clearance.
    RowClearanceX,
    /// Opposite pad rows on Y are closer than the pad clearance.
    RowClearanceY,
    /// Through-hole drill missing or as large as the pad.
    DrillSize,
    /// Fiducial pad diameter is not positive.
    FiducialDiameter,
    /// Fiducial solder mask clearance is not positive.
    FiducialMask,
    /// Fiducial to pad clearance is not checked.
    FiducialClearanceUnchecked,
    /// Courtyard does not clear the body on X.
    CourtyardClearanceX,
    /// Courtyard does not clear the body on Y.
    CourtyardClearanceY,
    /// Silkscreen line width is zero or negative.
    SilkLineTooSmall,
    /// Silkscreen line width reaches the ceiling for the units.
    SilkLineTooLarge,
    /// Pin count has no layout in the family.
    PinCount,
    /// Thermal pad size is not positive.
    ThermalSize,
    /// Thermal pad reaches into the pad rows.
    ThermalClearance,
    /// Row distance does not select exactly one of center, inner or outer.
    DistanceMode,
}

impl DrcCode {
    /// Stable name of the rule.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Units => "units",
            Self::PadShape => "pad_shape",
            Self::BodyLength => "body_length",
            Self::BodyWidth => "body_width",
            Self::BodyHeight => "body_height",
            Self::CourtyardLength => "courtyard_length",
            Self::CourtyardWidth => "courtyard_width",
            Self::PadClearanceX => "pad_clearance_x",
            Self::PadClearanceY => "pad_clearance_y",
            Self::RowClearanceX => "row_clearance_x",
            Self::RowClearanceY => "row_clearance_y",
            Self::DrillSize => "drill_size",
            Self::FiducialDiameter => "fiducial_diameter",
            Self::FiducialMask => "fiducial_mask",
            Self::FiducialClearanceUnchecked => "fiducial_clearance_unchecked",
            Self::CourtyardClearanceX => "courtyard_clearance_x",
            Self::CourtyardClearanceY => "courtyard_clearance_y",
            Self::SilkLineTooSmall => "silk_line_too_small",
            Self::SilkLineTooLarge => "silk_line_too_large",
            Self::PinCount => "pin_count",
            Self::ThermalSize => "thermal_size",
            Self::ThermalClearance => "thermal_clearance",
            Self::DistanceMode => "distance_mode",
        }
    }
}

impl fmt::Display for DrcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule that fired.
    pub code: DrcCode,
    /// Severity.
    pub severity: Severity,
    /// Human readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Outcome of a check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrcResult {
    /// True when no finding is an error.
    pub ok: bool,
    /// All findings in rule order.
    pub violations: Vec<Violation>,
}

impl DrcResult {
    /// Returns true if `code` fired.
    #[must_use]
    pub fn has(&self, code: DrcCode) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }

    /// Iterates over the error findings.
    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    /// Iterates over the warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
    }
}

/// Collects findings while the rules run.
#[derive(Debug, Default)]
struct Findings(Vec<Violation>);

impl Findings {
    fn error(&mut self, code: DrcCode, message: impl Into<String>) {
        self.0.push(Violation {
            code,
            severity: Severity::Error,
            message: message.into(),
        });
    }

    fn warning(&mut self, code: DrcCode, message: impl Into<String>) {
        self.0.push(Violation {
            code,
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    /// Flags `gap < clearance`; equal passes.
    fn clearance(&mut self, code: DrcCode, what: &str, gap: f64, clearance: f64) {
        if gap < clearance {
            self.error(
                code,
                format!("{what} gap {gap} is less than pad clearance {clearance}"),
            );
        }
    }

    fn positive(&mut self, code: DrcCode, name: &str, value: f64) {
        if value <= 0.0 {
            self.error(code, format!("{name} must be greater than zero, got {value}"));
        }
    }

    fn finish(self) -> DrcResult {
        DrcResult {
            ok: !self.0.iter().any(|v| v.severity == Severity::Error),
            violations: self.0,
        }
    }
}

/// Runs every design rule for the family of `params`.
#[must_use]
pub fn check(params: &ParameterModel) -> DrcResult {
    let family = params.package_family;
    let rules = rules_for(family);
    let mut findings = Findings::default();

    if !rules.pad_shapes.contains(&params.pad_shape) {
        findings.error(
            DrcCode::PadShape,
            format!("{:?} pads are not allowed for {family}", params.pad_shape),
        );
    }
    if let Some(problem) = pin_count_problem(params) {
        findings.error(DrcCode::PinCount, problem);
    }

    findings.positive(DrcCode::BodyLength, "body length", params.body_length);
    findings.positive(DrcCode::BodyWidth, "body width", params.body_width);
    findings.positive(DrcCode::BodyHeight, "body height", params.body_height);
    findings.positive(DrcCode::CourtyardLength, "courtyard length", params.courtyard_length);
    findings.positive(DrcCode::CourtyardWidth, "courtyard width", params.courtyard_width);

    check_spacing(params, rules.spacing, &mut findings);

    if family.is_through_hole()
        && (params.pin_drill_diameter <= 0.0 || params.pin_drill_diameter >= params.pad_diameter)
    {
        findings.error(
            DrcCode::DrillSize,
            format!(
                "drill {} must be positive and smaller than pad diameter {}",
                params.pin_drill_diameter, params.pad_diameter
            ),
        );
    }

    if params.fiducial {
        findings.positive(
            DrcCode::FiducialDiameter,
            "fiducial pad diameter",
            params.fiducial_pad_diameter,
        );
        findings.positive(
            DrcCode::FiducialMask,
            "fiducial solder mask clearance",
            params.fiducial_pad_solder_mask_clearance,
        );
        findings.warning(
            DrcCode::FiducialClearanceUnchecked,
            "clearance between fiducials and pads is not checked",
        );
    }

    let clearance = params.courtyard_clearance_with_package;
    if params.courtyard_width < params.body_width + 2.0 * clearance {
        findings.error(
            DrcCode::CourtyardClearanceX,
            format!("courtyard width does not clear the body by {clearance}"),
        );
    }
    if params.courtyard_length < params.body_length + 2.0 * clearance {
        findings.error(
            DrcCode::CourtyardClearanceY,
            format!("courtyard length does not clear the body by {clearance}"),
        );
    }

    match params.units {
        None => findings.error(DrcCode::Units, "no units selected"),
        Some(units) if params.silkscreen_package_outline => {
            let width = params.silkscreen_line_width;
            let ceiling = units.max_silkscreen_line_width();
            if width <= 0.0 {
                findings.error(DrcCode::SilkLineTooSmall, "silk line width too small");
            } else if width >= ceiling {
                findings.error(
                    DrcCode::SilkLineTooLarge,
                    format!("silk line width too large: {width} is not below {ceiling} {units}"),
                );
            }
        }
        Some(_) => {}
    }

    if params.thermal && rules.thermal {
        check_thermal(params, rules.spacing, &mut findings);
    }

    findings.finish()
}

fn check_spacing(params: &ParameterModel, spacing: Spacing, findings: &mut Findings) {
    let clearance = params.pad_clearance;
    match spacing {
        Spacing::Grid => {
            findings.clearance(
                DrcCode::PadClearanceX,
                "X",
                params.pitch_x - params.pad_diameter,
                clearance,
            );
            findings.clearance(
                DrcCode::PadClearanceY,
                "Y",
                params.pitch_y - params.pad_diameter,
                clearance,
            );
        }
        Spacing::InlineX => {
            findings.clearance(
                DrcCode::PadClearanceX,
                "X",
                params.pitch_x - params.pad_diameter,
                clearance,
            );
        }
        Spacing::InlineY => {
            findings.clearance(
                DrcCode::PadClearanceY,
                "Y",
                params.pitch_y - params.pad_diameter,
                clearance,
            );
        }
        Spacing::Chip => {
            findings.clearance(
                DrcCode::PadClearanceX,
                "X",
                params.pitch_x - params.pad_length,
                clearance,
            );
        }
        Spacing::DualRow => {
            findings.clearance(
                DrcCode::PadClearanceY,
                "Y",
                params.pitch_y - params.pad_width,
                clearance,
            );
            if let Some(centre) = row_distance(params, &params.distance_x, 'x', findings) {
                findings.clearance(
                    DrcCode::RowClearanceX,
                    "row X",
                    centre - params.pad_length,
                    clearance,
                );
            }
        }
        Spacing::Perimeter => {
            findings.clearance(
                DrcCode::PadClearanceX,
                "X",
                params.pitch_x - params.pad_width,
                clearance,
            );
            findings.clearance(
                DrcCode::PadClearanceY,
                "Y",
                params.pitch_y - params.pad_width,
                clearance,
            );
            if let Some(centre) = row_distance(params, &params.distance_x, 'x', findings) {
                findings.clearance(
                    DrcCode::RowClearanceX,
                    "row X",
                    centre - params.pad_length,
                    clearance,
                );
            }
            if let Some(centre) = row_distance(params, &params.distance_y, 'y', findings) {
                findings.clearance(
                    DrcCode::RowClearanceY,
                    "row Y",
                    centre - params.pad_length,
                    clearance,
                );
            }
        }
    }
}

/// Centre-to-centre row distance, or a `distance_mode` finding.
fn row_distance(
    params: &ParameterModel,
    distance: &DualRowDistance,
    axis: char,
    findings: &mut Findings,
) -> Option<f64> {
    match distance.center_distance(params.pad_length, axis) {
        Ok(centre) => Some(centre),
        Err(err) => {
            findings.error(DrcCode::DistanceMode, err.to_string());
            None
        }
    }
}

fn check_thermal(params: &ParameterModel, spacing: Spacing, findings: &mut Findings) {
    findings.positive(DrcCode::ThermalSize, "thermal pad width", params.thermal_width);
    findings.positive(DrcCode::ThermalSize, "thermal pad length", params.thermal_length);

    // SOT exposed pads take over a pin column and sit in the row themselves.
    if params.package_family == PackageFamily::Sot {
        return;
    }
    let axes: &[(&DualRowDistance, char, f64)] = match spacing {
        Spacing::Perimeter => &[
            (&params.distance_x, 'x', params.thermal_width),
            (&params.distance_y, 'y', params.thermal_length),
        ],
        _ => &[(&params.distance_x, 'x', params.thermal_width)],
    };
    for &(distance, axis, size) in axes {
        let Ok(centre) = distance.center_distance(params.pad_length, axis) else {
            continue;
        };
        let gap = (centre - params.pad_length - size) / 2.0;
        if gap < params.pad_clearance {
            findings.error(
                DrcCode::ThermalClearance,
                format!(
                    "thermal pad is {gap} from the pad rows on {axis}, less than {}",
                    params.pad_clearance
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PadShape;
    use crate::units::Units;

    fn bga() -> ParameterModel {
        let mut p = ParameterModel::new(PackageFamily::Bga, Units::Mil);
        p.number_of_columns = 10;
        p.number_of_rows = 10;
        p.number_of_pins = 100;
        p.pitch_x = 50.0;
        p.pitch_y = 50.0;
        p.pad_shape = PadShape::Round;
        p.pad_diameter = 25.0;
        p.pad_clearance = 10.0;
        p.body_width = 550.0;
        p.body_length = 550.0;
        p.body_height = 55.0;
        p.courtyard_width = 600.0;
        p.courtyard_length = 600.0;
        p.courtyard_clearance_with_package = 10.0;
        p.silkscreen_package_outline = true;
        p.silkscreen_line_width = 8.0;
        p
    }

    #[test]
    fn clean_model_passes() {
        let result = check(&bga());
        assert!(result.ok, "{:?}", result.violations);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn all_rules_run() {
        let mut p = bga();
        p.pad_shape = PadShape::Square;
        p.body_height = 0.0;
        p.pad_clearance = 30.0;
        p.silkscreen_line_width = 50.0;
        let result = check(&p);
        assert!(!result.ok);
        for code in [
            DrcCode::PadShape,
            DrcCode::BodyHeight,
            DrcCode::PadClearanceX,
            DrcCode::PadClearanceY,
            DrcCode::SilkLineTooLarge,
        ] {
            assert!(result.has(code), "missing {code}");
        }
    }

    #[test]
    fn clearance_boundary() {
        let mut p = bga();
        p.pad_clearance = 25.0;
        assert!(!check(&p).has(DrcCode::PadClearanceX));
        p.pad_clearance = 25.5;
        assert!(check(&p).has(DrcCode::PadClearanceX));
    }

    #[test]
    fn silk_width_ceiling_boundary() {
        let mut p = bga();
        for units in [Units::Mil, Units::Mil100, Units::Mm] {
            let ceiling = units.max_silkscreen_line_width();
            p.units = Some(units);

            p.silkscreen_line_width = ceiling;
            assert!(check(&p).has(DrcCode::SilkLineTooLarge), "{units} at ceiling");

            // 39.99 mil and its equivalents
            p.silkscreen_line_width = ceiling * 0.99975;
            assert!(!check(&p).has(DrcCode::SilkLineTooLarge), "{units} below ceiling");
        }
    }

    #[test]
    fn silk_width_gated_on_outline() {
        let mut p = bga();
        p.silkscreen_line_width = 0.0;
        assert!(check(&p).has(DrcCode::SilkLineTooSmall));
        p.silkscreen_package_outline = false;
        assert!(!check(&p).has(DrcCode::SilkLineTooSmall));
    }

    #[test]
    fn fiducials_warn_but_pass() {
        let mut p = bga();
        p.fiducial = true;
        p.fiducial_pad_diameter = 40.0;
        p.fiducial_pad_solder_mask_clearance = 40.0;
        let result = check(&p);
        assert!(result.ok);
        assert_eq!(result.warnings().count(), 1);
        assert!(result.has(DrcCode::FiducialClearanceUnchecked));

        p.fiducial_pad_diameter = 0.0;
        let result = check(&p);
        assert!(!result.ok);
        assert!(result.has(DrcCode::FiducialDiameter));
    }

    #[test]
    fn missing_units() {
        let mut p = bga();
        p.units = None;
        let result = check(&p);
        assert!(result.has(DrcCode::Units));
        assert!(!result.has(DrcCode::SilkLineTooSmall));
    }

    #[test]
    fn courtyard_must_clear_body() {
        let mut p = bga();
        p.courtyard_width = 560.0;
        let result = check(&p);
        assert!(result.has(DrcCode::CourtyardClearanceX));
        assert!(!result.has(DrcCode::CourtyardClearanceY));
    }

    #[test]
    fn dual_row_distance_mode() {
        let mut p = ParameterModel::new(PackageFamily::Sot, Units::Mm);
        p.number_of_pins = 3;
        p.pad_shape = PadShape::Square;
        p.pitch_y = 0.95;
        p.pad_length = 1.1;
        p.pad_width = 0.6;
        p.pad_clearance = 0.15;
        let result = check(&p);
        assert!(result.has(DrcCode::DistanceMode));
        assert!(!result.has(DrcCode::RowClearanceX));

        p.distance_x = DualRowDistance::center(1.2);
        let result = check(&p);
        assert!(!result.has(DrcCode::DistanceMode));
        assert!(result.has(DrcCode::RowClearanceX));
    }

    #[test]
    fn thermal_pad_must_clear_rows() {
        let mut p = ParameterModel::new(PackageFamily::Qfn, Units::Mm);
        p.pad_shape = PadShape::Square;
        p.pad_length = 0.8;
        p.pad_clearance = 0.2;
        p.distance_x = DualRowDistance::center(3.0);
        p.distance_y = DualRowDistance::center(3.0);
        p.thermal = true;
        p.thermal_width = 1.7;
        p.thermal_length = 1.7;
        assert!(!check(&p).has(DrcCode::ThermalClearance));
        p.thermal_width = 2.0;
        assert!(check(&p).has(DrcCode::ThermalClearance));
        p.thermal_length = 0.0;
        assert!(check(&p).has(DrcCode::ThermalSize));
    }

    #[test]
    fn violation_display() {
        let v = Violation {
            code: DrcCode::SilkLineTooSmall,
            severity: Severity::Error,
            message: "silk line width too small".to_string(),
        };
        assert_eq!(v.to_string(), "silk_line_too_small: silk line width too small");
    }
}
