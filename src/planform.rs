//! Derived geometry of a straight-tapered wing.

use tracing::{debug, info};

use crate::errors::PlanformError;
use crate::geometry::{point, Point};
use crate::parameters::{ControlSurface, SparLayout, WingParameters};
use crate::quadrature::{integrate, Tolerance};

/// Chordwise fraction of the reference line the sweep parameter is defined on.
const QUARTER_CHORD: f64 = 0.25;

/// Relative root to tip chord difference below which a wing counts as untapered.
const UNTAPERED_TOLERANCE: f64 = 1.0e-9;

/// A chord at one spanwise station of the right-hand semispan.
///
/// Longitudinal positions are measured forward from the quarter-chord point of
/// the root chord.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChordLine {
    /// Spanwise distance from the root in metres.
    pub station: f64,
    /// Chord length in metres.
    pub chord: f64,
    /// Longitudinal position of the quarter-chord point.
    pub quarter_chord: f64,
}

impl ChordLine {
    /// Longitudinal position of the point `fraction` of the chord aft of the leading edge.
    #[must_use]
    pub fn position_at(&self, fraction: f64) -> f64 {
        self.quarter_chord + (QUARTER_CHORD - fraction) * self.chord
    }

    /// Longitudinal position of the leading edge.
    #[must_use]
    pub fn leading_edge(&self) -> f64 {
        self.position_at(0.0)
    }

    /// Longitudinal position of the trailing edge.
    #[must_use]
    pub fn trailing_edge(&self) -> f64 {
        self.position_at(1.0)
    }

    /// Planform point `fraction` of the chord aft of the leading edge.
    #[must_use]
    pub fn point_at(&self, fraction: f64) -> Point {
        point(self.station, self.position_at(fraction))
    }
}

/// Sweep angles of the characteristic lines of the wing, in radians, positive aft.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepAngles {
    /// Leading edge sweep.
    pub leading_edge: f64,
    /// Quarter-chord sweep, equal to the design input.
    pub quarter_chord: f64,
    /// Half-chord sweep.
    pub half_chord: f64,
    /// Trailing edge sweep.
    pub trailing_edge: f64,
    /// Front spar sweep, when spars are configured.
    pub front_spar: Option<f64>,
    /// Aft spar sweep, when spars are configured.
    pub aft_spar: Option<f64>,
}

/// Outline of a trailing-edge control surface on the right-hand semispan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlSurfaceOutline {
    /// Input definition of the surface.
    pub surface: ControlSurface,
    /// Corners ordered inboard hinge, outboard hinge, outboard trailing edge,
    /// inboard trailing edge.
    pub corners: [Point; 4],
    /// Sweep of the hinge line in radians.
    pub hinge_sweep: f64,
}

impl ControlSurfaceOutline {
    /// Span of the surface on one semispan in metres.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.corners[1].x - self.corners[0].x
    }

    /// Plan area of the surface on one semispan in square metres.
    #[must_use]
    pub fn area(&self) -> f64 {
        let inboard_depth = self.corners[0].y - self.corners[3].y;
        let outboard_depth = self.corners[1].y - self.corners[2].y;
        0.5 * (inboard_depth + outboard_depth) * self.span()
    }
}

/// Front and aft spar lines on the right-hand semispan, root point first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparLines {
    /// Input chord fractions.
    pub layout: SparLayout,
    /// Front spar from root to tip.
    pub front: [Point; 2],
    /// Aft spar from root to tip.
    pub aft: [Point; 2],
}

/// Complete planform geometry derived from [`WingParameters`].
///
/// # Examples
/// ```
/// use planform::{Planform, WingParameters};
///
/// let wing = Planform::new(WingParameters::new(8.0, 50.0, 0.0).with_taper_ratio(1.0)).unwrap();
/// assert!((wing.span - 20.0).abs() < 1.0e-12);
/// assert!((wing.mac - 2.5).abs() < 1.0e-9);
/// assert!((wing.mac_station - 5.0).abs() < 1.0e-9);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Planform {
    /// Inputs the geometry was derived from.
    pub parameters: WingParameters,
    /// Tip-to-tip span in metres.
    pub span: f64,
    /// Tip-to-root chord ratio.
    pub taper_ratio: f64,
    /// Root chord in metres.
    pub root_chord: f64,
    /// Tip chord in metres.
    pub tip_chord: f64,
    /// Mean aerodynamic chord in metres.
    pub mac: f64,
    /// Error estimate of the chord-squared integral in cubic metres.
    pub mac_integral_error: f64,
    /// Spanwise distance from the root to the MAC in metres.
    pub mac_station: f64,
    /// Distance from the root leading edge aft to the MAC leading edge in metres.
    pub xlemac: f64,
    /// Root chord line.
    pub root: ChordLine,
    /// Right-hand tip chord line.
    pub tip: ChordLine,
    /// Right-hand MAC chord line.
    pub mac_line: ChordLine,
    /// Sweep of the characteristic lines.
    pub sweep: SweepAngles,
    /// Spar lines, when configured.
    pub spars: Option<SparLines>,
    /// Aileron outline, when configured.
    pub aileron: Option<ControlSurfaceOutline>,
    /// Flap outline, when configured.
    pub flap: Option<ControlSurfaceOutline>,
}

impl Planform {
    /// Size the wing described by `parameters`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanformError::InvalidParameters`] when the parameters fail
    /// [`WingParameters::validate`] and [`PlanformError::MacIntegration`] when the
    /// chord-squared integral cannot be evaluated.
    pub fn new(parameters: WingParameters) -> Result<Self, PlanformError> {
        parameters.validate()?;

        let span = (parameters.aspect_ratio * parameters.area).sqrt();
        let semispan = 0.5 * span;
        let taper_ratio = parameters.taper_ratio();
        let root_chord = 2.0 * parameters.area / ((1.0 + taper_ratio) * span);
        let tip_chord = taper_ratio * root_chord;
        let sweep = parameters.quarter_chord_sweep();
        debug!(span, taper_ratio, root_chord, tip_chord, "sized trapezoid");

        let mut wing = Self {
            span,
            taper_ratio,
            root_chord,
            tip_chord,
            mac: 0.0,
            mac_integral_error: 0.0,
            mac_station: 0.0,
            xlemac: 0.0,
            root: ChordLine {
                station: 0.0,
                chord: root_chord,
                quarter_chord: 0.0,
            },
            tip: ChordLine {
                station: semispan,
                chord: tip_chord,
                quarter_chord: -semispan * sweep.tan(),
            },
            mac_line: ChordLine {
                station: 0.0,
                chord: root_chord,
                quarter_chord: 0.0,
            },
            sweep: SweepAngles {
                leading_edge: 0.0,
                quarter_chord: sweep,
                half_chord: 0.0,
                trailing_edge: 0.0,
                front_spar: None,
                aft_spar: None,
            },
            spars: None,
            aileron: None,
            flap: None,
            parameters,
        };

        let integral = integrate(
            |y| wing.chord_at(y).powi(2),
            0.0,
            semispan,
            Tolerance::default(),
        )
        .map_err(|source| PlanformError::MacIntegration { source })?;
        wing.mac = 2.0 / wing.parameters.area * integral.value;
        wing.mac_integral_error = integral.error;
        wing.mac_station = wing.station_of_chord(wing.mac);
        wing.mac_line = wing.chord_line_at(wing.mac_station);
        wing.xlemac = wing.root.leading_edge() - wing.mac_line.leading_edge();
        debug!(
            mac = wing.mac,
            error = integral.error,
            station = wing.mac_station,
            "located mean aerodynamic chord"
        );

        wing.sweep.leading_edge = wing.sweep_at(0.0);
        wing.sweep.half_chord = wing.sweep_at(0.5);
        wing.sweep.trailing_edge = wing.sweep_at(1.0);
        if let Some(layout) = wing.parameters.spars {
            wing.sweep.front_spar = Some(wing.sweep_at(layout.front));
            wing.sweep.aft_spar = Some(wing.sweep_at(layout.aft));
            wing.spars = Some(SparLines {
                layout,
                front: [
                    wing.root.point_at(layout.front),
                    wing.tip.point_at(layout.front),
                ],
                aft: [wing.root.point_at(layout.aft), wing.tip.point_at(layout.aft)],
            });
        }
        wing.aileron = wing
            .parameters
            .aileron
            .map(|surface| wing.control_surface_outline(surface));
        wing.flap = wing
            .parameters
            .flap
            .map(|surface| wing.control_surface_outline(surface));

        info!(
            span = wing.span,
            mac = wing.mac,
            xlemac = wing.xlemac,
            "planform derived"
        );
        Ok(wing)
    }

    /// Half of the span in metres.
    #[must_use]
    pub fn semispan(&self) -> f64 {
        0.5 * self.span
    }

    /// Decrease of chord per metre of span.
    fn chord_gradient(&self) -> f64 {
        (self.root_chord - self.tip_chord) / self.semispan()
    }

    /// Chord length at spanwise distance `station` from the root.
    ///
    /// The wing is symmetric, so negative stations address the left semispan.
    #[must_use]
    pub fn chord_at(&self, station: f64) -> f64 {
        self.root_chord - self.chord_gradient() * station.abs()
    }

    /// Chord line at spanwise distance `station` from the root on the right semispan.
    #[must_use]
    pub fn chord_line_at(&self, station: f64) -> ChordLine {
        let station = station.abs();
        ChordLine {
            station,
            chord: self.chord_at(station),
            quarter_chord: -station * self.sweep.quarter_chord.tan(),
        }
    }

    /// Spanwise station where the local chord equals `chord`.
    ///
    /// An untapered wing has the same chord everywhere; its mid-semispan station
    /// is returned.
    fn station_of_chord(&self, chord: f64) -> f64 {
        if (self.root_chord - self.tip_chord).abs() <= UNTAPERED_TOLERANCE * self.root_chord {
            0.5 * self.semispan()
        } else {
            (self.root_chord - chord) / self.chord_gradient()
        }
    }

    /// Sweep in radians of the line joining the points `fraction` of the chord
    /// aft of the leading edge at root and tip.
    ///
    /// # Examples
    /// ```
    /// use planform::{Planform, WingParameters};
    ///
    /// let wing = Planform::new(WingParameters::default()).unwrap();
    /// assert!((wing.sweep_at(0.25) - wing.sweep.quarter_chord).abs() < 1.0e-12);
    /// assert!(wing.sweep_at(0.0) > wing.sweep_at(1.0));
    /// ```
    #[must_use]
    pub fn sweep_at(&self, fraction: f64) -> f64 {
        let rise = self.root.position_at(fraction) - self.tip.position_at(fraction);
        (rise / self.semispan()).atan()
    }

    /// Mean aerodynamic chord of a straight-tapered wing from the closed-form
    /// expression `2/3 c_r (1 + λ + λ²) / (1 + λ)`.
    #[must_use]
    pub fn closed_form_mac(&self) -> f64 {
        let taper = self.taper_ratio;
        2.0 / 3.0 * self.root_chord * (1.0 + taper + taper * taper) / (1.0 + taper)
    }

    /// Actual area of the trapezoid in square metres.
    #[must_use]
    pub fn planform_area(&self) -> f64 {
        (self.root_chord + self.tip_chord) * self.semispan()
    }

    /// Corner points of the right-hand wing outline: root leading edge, tip
    /// leading edge, tip trailing edge, root trailing edge.
    #[must_use]
    pub fn outline(&self) -> [Point; 4] {
        [
            self.root.point_at(0.0),
            self.tip.point_at(0.0),
            self.tip.point_at(1.0),
            self.root.point_at(1.0),
        ]
    }

    /// Corners and hinge sweep of a control surface on the right semispan.
    fn control_surface_outline(&self, surface: ControlSurface) -> ControlSurfaceOutline {
        let hinge = 1.0 - surface.chord_fraction;
        let inboard = self.chord_line_at(surface.inboard * self.semispan());
        let outboard = self.chord_line_at(surface.outboard * self.semispan());
        ControlSurfaceOutline {
            surface,
            corners: [
                inboard.point_at(hinge),
                outboard.point_at(hinge),
                outboard.point_at(1.0),
                inboard.point_at(1.0),
            ],
            hinge_sweep: self.sweep_at(hinge),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::errors::ParameterError;

    fn reference_wing() -> Planform {
        Planform::new(WingParameters::default()).expect("reference wing is valid")
    }

    #[test]
    fn trapezoid_matches_requested_area_and_aspect_ratio() {
        let wing = reference_wing();
        assert_relative_eq!(wing.span, (9.0_f64 * 66.6).sqrt(), epsilon = 1.0e-12);
        assert_relative_eq!(wing.planform_area(), 66.6, epsilon = 1.0e-9);
        assert_relative_eq!(wing.tip_chord / wing.root_chord, wing.taper_ratio);
        assert_relative_eq!(wing.span * wing.span / wing.planform_area(), 9.0, epsilon = 1.0e-9);
    }

    #[test]
    fn numeric_mac_matches_closed_form() {
        let wing = reference_wing();
        assert_relative_eq!(wing.mac, wing.closed_form_mac(), epsilon = 1.0e-9);
        assert!(wing.mac < wing.root_chord && wing.mac > wing.tip_chord);
        assert!(wing.mac_integral_error < 1.0e-8);
    }

    #[test]
    fn mac_station_has_mac_chord() {
        let wing = reference_wing();
        assert_relative_eq!(wing.chord_at(wing.mac_station), wing.mac, epsilon = 1.0e-9);
        assert_relative_eq!(wing.mac_line.chord, wing.mac, epsilon = 1.0e-9);
        // For a linear taper the MAC sits at b/6 (1 + 2λ) / (1 + λ).
        let taper = wing.taper_ratio;
        let expected = wing.span / 6.0 * (1.0 + 2.0 * taper) / (1.0 + taper);
        assert_relative_eq!(wing.mac_station, expected, epsilon = 1.0e-9);
    }

    #[test]
    fn untapered_wing_places_mac_mid_semispan() {
        let wing = Planform::new(WingParameters::new(6.0, 24.0, 10.0).with_taper_ratio(1.0))
            .expect("rectangular wing is valid");
        assert_relative_eq!(wing.mac, wing.root_chord, epsilon = 1.0e-9);
        assert_relative_eq!(wing.mac_station, wing.semispan() / 2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn nearly_untapered_wing_places_mac_mid_semispan() {
        for taper in [1.0 - 1.0e-13, 1.0 - 1.0e-14, 1.0 + 1.0e-13] {
            let wing = Planform::new(WingParameters::new(6.0, 24.0, 10.0).with_taper_ratio(taper))
                .expect("nearly rectangular wing is valid");
            assert_relative_eq!(wing.mac_station, 3.0, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn inverse_taper_moves_mac_outboard() {
        let taper = 1.5;
        let wing = Planform::new(WingParameters::new(6.0, 24.0, 0.0).with_taper_ratio(taper))
            .expect("inverse taper is valid");
        assert!(wing.tip_chord > wing.root_chord);
        assert!(wing.chord_gradient() < 0.0);
        assert_relative_eq!(wing.mac, wing.closed_form_mac(), epsilon = 1.0e-9);
        let expected = wing.span / 6.0 * (1.0 + 2.0 * taper) / (1.0 + taper);
        assert_relative_eq!(wing.mac_station, expected, epsilon = 1.0e-9);
        assert!(wing.mac_station > 0.5 * wing.semispan());
        assert_relative_eq!(wing.chord_at(wing.mac_station), wing.mac, epsilon = 1.0e-9);
    }

    #[test]
    fn xlemac_is_offset_between_root_and_mac_leading_edges() {
        let wing = reference_wing();
        let sweep = wing.sweep.quarter_chord;
        let expected = wing.mac_station * sweep.tan() + 0.25 * wing.root_chord - 0.25 * wing.mac;
        assert_relative_eq!(wing.xlemac, expected, epsilon = 1.0e-12);
        assert_relative_eq!(
            wing.xlemac,
            wing.mac_station * wing.sweep.leading_edge.tan(),
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn sweep_angles_follow_the_chord_fraction() {
        let wing = reference_wing();
        let sweep = wing.sweep;
        assert_relative_eq!(sweep.quarter_chord, 26.3_f64.to_radians(), epsilon = 1.0e-12);
        assert!(sweep.leading_edge > sweep.quarter_chord);
        assert!(sweep.quarter_chord > sweep.half_chord);
        assert!(sweep.half_chord > sweep.trailing_edge);

        // tan Λ_n = tan Λ_c/4 - 4 (n - 1/4) (1 - λ) / (AR (1 + λ))
        let taper = wing.taper_ratio;
        let shift = |n: f64| 4.0 * (n - 0.25) * (1.0 - taper) / (9.0 * (1.0 + taper));
        assert_relative_eq!(
            sweep.leading_edge.tan(),
            sweep.quarter_chord.tan() - shift(0.0),
            epsilon = 1.0e-9
        );
        assert_relative_eq!(
            sweep.trailing_edge.tan(),
            sweep.quarter_chord.tan() - shift(1.0),
            epsilon = 1.0e-9
        );
        assert_eq!(sweep.front_spar, None);
    }

    #[test]
    fn unswept_rectangle_has_no_sweep_anywhere() {
        let wing = Planform::new(WingParameters::new(5.0, 20.0, 0.0).with_taper_ratio(1.0))
            .expect("rectangular wing is valid");
        for fraction in [0.0, 0.25, 0.5, 1.0] {
            assert_relative_eq!(wing.sweep_at(fraction), 0.0, epsilon = 1.0e-12);
        }
        assert_relative_eq!(wing.xlemac, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn forward_sweep_is_negative() {
        let wing = Planform::new(WingParameters::new(8.0, 30.0, -20.0).with_taper_ratio(0.5))
            .expect("forward swept wing is valid");
        assert!(wing.sweep.leading_edge < 0.0);
        assert!(wing.tip.quarter_chord > 0.0);
    }

    #[test]
    fn spars_are_placed_on_their_chord_fractions() {
        let wing = Planform::new(WingParameters::default().with_spars(SparLayout::new(0.15, 0.6)))
            .expect("wing with spars is valid");
        let spars = wing.spars.expect("spars derived");
        assert_relative_eq!(spars.front[0].y, wing.root.position_at(0.15));
        assert_relative_eq!(spars.aft[1].x, wing.semispan());
        let front = wing.sweep.front_spar.expect("front spar sweep");
        let aft = wing.sweep.aft_spar.expect("aft spar sweep");
        assert!(front > aft);
        assert_relative_eq!(front, wing.sweep_at(0.15));
    }

    #[test]
    fn control_surface_corners_sit_on_hinge_and_trailing_edge() {
        let parameters = WingParameters::default()
            .with_aileron(ControlSurface::new(0.75, 0.95, 0.3))
            .with_flap(ControlSurface::new(0.1, 0.7, 0.35));
        let wing = Planform::new(parameters).expect("wing with control surfaces is valid");

        let aileron = wing.aileron.expect("aileron derived");
        let semispan = wing.semispan();
        assert_relative_eq!(aileron.corners[0].x, 0.75 * semispan, epsilon = 1.0e-12);
        assert_relative_eq!(aileron.corners[1].x, 0.95 * semispan, epsilon = 1.0e-12);
        let outboard = wing.chord_line_at(0.95 * semispan);
        assert_relative_eq!(aileron.corners[2].y, outboard.trailing_edge(), epsilon = 1.0e-12);
        assert_relative_eq!(
            aileron.corners[1].y - aileron.corners[2].y,
            0.3 * outboard.chord,
            epsilon = 1.0e-12
        );
        assert_relative_eq!(aileron.hinge_sweep, wing.sweep_at(0.7));

        let flap = wing.flap.expect("flap derived");
        assert_relative_eq!(flap.span(), 0.6 * semispan, epsilon = 1.0e-12);
        let inboard = wing.chord_at(0.1 * semispan);
        let outboard = wing.chord_at(0.7 * semispan);
        assert_relative_eq!(
            flap.area(),
            0.35 * 0.5 * (inboard + outboard) * flap.span(),
            epsilon = 1.0e-9
        );
    }

    #[test]
    fn invalid_parameters_are_reported() {
        let error = Planform::new(WingParameters::new(9.0, -1.0, 0.0))
            .expect_err("negative area rejected");
        assert_eq!(
            error,
            PlanformError::InvalidParameters(ParameterError::NonPositiveArea(-1.0))
        );
    }
}
