//! Human and machine readable summaries of a derived planform.

use std::fmt::Write;

use serde::Serialize;
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

use crate::planform::{ControlSurfaceOutline, Planform};

/// Width of the label column in the text summary.
const LABEL_WIDTH: usize = 29;
/// Rule printed above the summary.
const HEADER: &str = "-------------------- Summary ----------------------";
/// Rule printed below the summary.
const FOOTER: &str = "---------------------------------------------------";

/// Convert an angle in radians to degrees.
fn degrees(radians: f64) -> f64 {
    Angle::new::<radian>(radians).get::<degree>()
}

/// Key quantities of a control surface in report units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlSurfaceSummary {
    /// Spanwise distance of the inboard edge from the root in metres.
    pub inboard_station: f64,
    /// Spanwise distance of the outboard edge from the root in metres.
    pub outboard_station: f64,
    /// Depth as a fraction of the local chord.
    pub chord_fraction: f64,
    /// Plan area on one semispan in square metres.
    pub area: f64,
    /// Hinge line sweep in degrees.
    pub hinge_sweep: f64,
    /// Right-hand corners as `[spanwise, longitudinal]` pairs in metres.
    pub corners: [[f64; 2]; 4],
}

impl From<&ControlSurfaceOutline> for ControlSurfaceSummary {
    fn from(outline: &ControlSurfaceOutline) -> Self {
        Self {
            inboard_station: outline.corners[0].x,
            outboard_station: outline.corners[1].x,
            chord_fraction: outline.surface.chord_fraction,
            area: outline.area(),
            hinge_sweep: degrees(outline.hinge_sweep),
            corners: outline.corners.map(|corner| [corner.x, corner.y]),
        }
    }
}

/// Derived quantities of a planform in report units (metres and degrees).
///
/// The summary is what the command line tool prints and exports as JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Span in metres.
    pub span: f64,
    /// Taper ratio.
    pub taper_ratio: f64,
    /// Root chord in metres.
    pub root_chord: f64,
    /// Tip chord in metres.
    pub tip_chord: f64,
    /// Mean aerodynamic chord in metres.
    pub mac: f64,
    /// Spanwise position of the MAC in metres.
    pub mac_spanwise_position: f64,
    /// Leading edge of the MAC aft of the root leading edge in metres.
    pub xlemac: f64,
    /// Leading edge sweep in degrees.
    pub leading_edge_sweep: f64,
    /// Quarter-chord sweep in degrees.
    pub quarter_chord_sweep: f64,
    /// Half-chord sweep in degrees.
    pub half_chord_sweep: f64,
    /// Trailing edge sweep in degrees.
    pub trailing_edge_sweep: f64,
    /// Front spar sweep in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_spar_sweep: Option<f64>,
    /// Aft spar sweep in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aft_spar_sweep: Option<f64>,
    /// Aileron geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aileron: Option<ControlSurfaceSummary>,
    /// Flap geometry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flap: Option<ControlSurfaceSummary>,
}

impl From<&Planform> for Summary {
    fn from(wing: &Planform) -> Self {
        Self {
            span: wing.span,
            taper_ratio: wing.taper_ratio,
            root_chord: wing.root_chord,
            tip_chord: wing.tip_chord,
            mac: wing.mac,
            mac_spanwise_position: wing.mac_station,
            xlemac: wing.xlemac,
            leading_edge_sweep: degrees(wing.sweep.leading_edge),
            quarter_chord_sweep: degrees(wing.sweep.quarter_chord),
            half_chord_sweep: degrees(wing.sweep.half_chord),
            trailing_edge_sweep: degrees(wing.sweep.trailing_edge),
            front_spar_sweep: wing.sweep.front_spar.map(degrees),
            aft_spar_sweep: wing.sweep.aft_spar.map(degrees),
            aileron: wing.aileron.as_ref().map(ControlSurfaceSummary::from),
            flap: wing.flap.as_ref().map(ControlSurfaceSummary::from),
        }
    }
}

/// Round `value` to `decimals` places and drop trailing zeros, keeping at least
/// one decimal ("30.0", "24.48", "0.308").
fn rounded(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if !text.contains('.') {
        return format!("{text}.0");
    }
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_owned()
    }
}

/// Append one `label value unit` row to the report.
fn row(output: &mut String, label: &str, value: f64, decimals: usize, unit: &str) {
    writeln!(output, "{label:<LABEL_WIDTH$} {} [{unit}]", rounded(value, decimals))
        .expect("writing to string cannot fail");
}

/// Append the rows describing one control surface.
fn surface_rows(output: &mut String, name: &str, surface: &ControlSurfaceSummary) {
    row(output, &format!("{name} inboard station:"), surface.inboard_station, 2, "m");
    row(output, &format!("{name} outboard station:"), surface.outboard_station, 2, "m");
    row(output, &format!("{name} chord fraction:"), surface.chord_fraction, 2, "-");
    row(output, &format!("{name} area (one side):"), surface.area, 2, "m^2");
    row(output, &format!("{name} hinge sweep:"), surface.hinge_sweep, 2, "deg");
}

/// Render a textual summary of the planform.
///
/// Lengths are rounded to two decimals, the taper ratio to three and angles in
/// degrees to two, without trailing zeros. Spar and control surface rows only appear when the wing
/// carries them.
///
/// # Examples
/// ```
/// use planform::{render_summary, Planform, WingParameters};
///
/// let wing = Planform::new(WingParameters::default()).unwrap();
/// let report = render_summary(&wing);
/// assert!(report.contains("MAC:"));
/// assert!(!report.contains("Front spar"));
/// ```
#[must_use]
pub fn render_summary(wing: &Planform) -> String {
    let summary = Summary::from(wing);
    let mut output = String::new();

    output.push_str(HEADER);
    output.push('\n');
    row(&mut output, "Span:", summary.span, 2, "m");
    row(&mut output, "Taper ratio:", summary.taper_ratio, 3, "-");
    row(&mut output, "Root chord:", summary.root_chord, 2, "m");
    row(&mut output, "Tip chord:", summary.tip_chord, 2, "m");
    row(&mut output, "MAC:", summary.mac, 2, "m");
    row(&mut output, "Spanwise position MAC:", summary.mac_spanwise_position, 2, "m");
    row(&mut output, "XLEMAC:", summary.xlemac, 2, "m");
    row(&mut output, "Leading edge sweep angle:", summary.leading_edge_sweep, 2, "deg");
    row(&mut output, "Half chord sweep angle:", summary.half_chord_sweep, 2, "deg");
    row(&mut output, "Trailing edge sweep angle:", summary.trailing_edge_sweep, 2, "deg");
    if let Some(sweep) = summary.front_spar_sweep {
        row(&mut output, "Front spar sweep angle:", sweep, 2, "deg");
    }
    if let Some(sweep) = summary.aft_spar_sweep {
        row(&mut output, "Aft spar sweep angle:", sweep, 2, "deg");
    }
    if let Some(aileron) = &summary.aileron {
        surface_rows(&mut output, "Aileron", aileron);
    }
    if let Some(flap) = &summary.flap {
        surface_rows(&mut output, "Flap", flap);
    }
    output.push_str(FOOTER);
    output.push('\n');

    output
}

/// Serialise the planform summary as pretty-printed JSON.
///
/// # Errors
///
/// Propagates [`serde_json::Error`]; the summary only holds plain numbers, so
/// this fails only on non-finite values.
pub fn summary_json(wing: &Planform) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Summary::from(wing))
}
