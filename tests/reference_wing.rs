#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use planform::{
    planform_drawing, render_svg, render_summary, ControlSurface, Layout, Planform, SparLayout,
    WingParameters,
};

fn build_reference_wing() -> Planform {
    Planform::new(WingParameters::default()).expect("reference wing sizes cleanly")
}

fn build_full_wing() -> Planform {
    let parameters = WingParameters::default()
        .with_spars(SparLayout::new(0.15, 0.6))
        .with_aileron(ControlSurface::new(0.75, 0.95, 0.3))
        .with_flap(ControlSurface::new(0.1, 0.7, 0.35));
    Planform::new(parameters).expect("full wing sizes cleanly")
}

#[test]
fn reference_wing_matches_hand_calculation() {
    let wing = build_reference_wing();

    let sweep = 26.3_f64.to_radians();
    let span = (9.0_f64 * 66.6).sqrt();
    let taper = 0.2 * (2.0 - sweep);
    let root_chord = 2.0 * 66.6 / ((1.0 + taper) * span);
    let tip_chord = taper * root_chord;
    let mac = 2.0 / 3.0 * root_chord * (1.0 + taper + taper * taper) / (1.0 + taper);
    let mac_station = (mac - root_chord) / -((root_chord - tip_chord) / (span / 2.0));

    assert_relative_eq!(wing.span, span, epsilon = 1.0e-12);
    assert_relative_eq!(wing.taper_ratio, taper, epsilon = 1.0e-12);
    assert_relative_eq!(wing.root_chord, root_chord, epsilon = 1.0e-12);
    assert_relative_eq!(wing.tip_chord, tip_chord, epsilon = 1.0e-12);
    assert_relative_eq!(wing.mac, mac, epsilon = 1.0e-9);
    assert_relative_eq!(wing.mac_station, mac_station, epsilon = 1.0e-8);

    // Rounded values as printed by the summary.
    assert_relative_eq!(wing.span, 24.48, epsilon = 5.0e-3);
    assert_relative_eq!(wing.taper_ratio, 0.308, epsilon = 5.0e-4);
}

#[test]
fn reference_wing_tip_sits_behind_root() {
    let wing = build_reference_wing();
    let semispan = wing.span / 2.0;
    assert_relative_eq!(
        wing.tip.quarter_chord,
        -semispan * 26.3_f64.to_radians().tan(),
        epsilon = 1.0e-12
    );
    assert!(wing.tip.leading_edge() < wing.root.leading_edge());
    assert!(wing.tip.trailing_edge() < wing.root.trailing_edge());
}

#[test]
fn full_wing_report_lists_every_part() {
    let report = render_summary(&build_full_wing());
    for label in [
        "Span:",
        "MAC:",
        "XLEMAC:",
        "Leading edge sweep angle:",
        "Half chord sweep angle:",
        "Trailing edge sweep angle:",
        "Front spar sweep angle:",
        "Aft spar sweep angle:",
        "Aileron inboard station:",
        "Flap outboard station:",
    ] {
        assert!(report.contains(label), "missing {label} in\n{report}");
    }
}

#[test]
fn full_wing_control_surfaces_stay_behind_rear_spar() {
    let wing = build_full_wing();
    let spars = wing.spars.expect("spars present");
    for outline in [wing.aileron, wing.flap].into_iter().flatten() {
        for hinge in &outline.corners[..2] {
            let rear_spar = wing.chord_line_at(hinge.x).position_at(spars.layout.aft);
            assert!(hinge.y <= rear_spar + 1.0e-12);
        }
    }
}

#[test]
fn full_wing_renders_to_svg() {
    let wing = build_full_wing();
    let drawing = planform_drawing(&wing);
    let svg = render_svg(&drawing, &Layout::default()).expect("svg renders");
    for label in ["Quarter Chord line", "MAC", "Front spar", "Aileron", "Flap"] {
        assert!(svg.contains(&format!(">{label}</text>")));
    }
}
