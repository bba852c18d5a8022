//! High-level design parameters for a trapezoidal wing.

use serde::{Deserialize, Serialize};
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

use crate::errors::ParameterError;

/// Aspect ratio of the reference wing.
pub const REFERENCE_ASPECT_RATIO: f64 = 9.0;
/// Reference area of the reference wing in square metres.
pub const REFERENCE_AREA: f64 = 66.6;
/// Quarter-chord sweep of the reference wing in degrees.
pub const REFERENCE_SWEEP_DEG: f64 = 26.3;

/// How the taper ratio of the wing is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum TaperRule {
    /// Derive the taper from the quarter-chord sweep, `0.2 * (2 - sweep[rad])`.
    ///
    /// This empirical correlation keeps the spanwise lift distribution close to
    /// elliptic for swept transport wings.
    #[default]
    SweepCorrelation,
    /// Use the supplied tip-to-root chord ratio.
    Explicit(f64),
}

impl From<Option<f64>> for TaperRule {
    fn from(value: Option<f64>) -> Self {
        value.map_or(TaperRule::SweepCorrelation, TaperRule::Explicit)
    }
}

impl From<TaperRule> for Option<f64> {
    fn from(value: TaperRule) -> Self {
        match value {
            TaperRule::SweepCorrelation => None,
            TaperRule::Explicit(ratio) => Some(ratio),
        }
    }
}

/// Chordwise position of the wing box spars, as fractions of the local chord
/// measured aft from the leading edge.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct SparLayout {
    /// Front spar chord fraction.
    pub front: f64,
    /// Aft spar chord fraction.
    pub aft: f64,
}

impl SparLayout {
    /// Create a spar layout from front and aft chord fractions.
    #[must_use]
    pub const fn new(front: f64, aft: f64) -> Self {
        Self { front, aft }
    }

    /// Check both fractions and their order.
    fn validate(&self) -> Result<(), ParameterError> {
        check_fraction("front spar chord fraction", self.front)?;
        check_fraction("aft spar chord fraction", self.aft)?;
        if self.front >= self.aft {
            return Err(ParameterError::SparOrder {
                front: self.front,
                aft: self.aft,
            });
        }
        Ok(())
    }
}

/// Trailing-edge control surface occupying part of each semispan.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ControlSurface {
    /// Inboard edge as a fraction of the semispan (0 at the root).
    pub inboard: f64,
    /// Outboard edge as a fraction of the semispan (1 at the tip).
    pub outboard: f64,
    /// Depth of the surface as a fraction of the local chord, measured forward
    /// from the trailing edge.
    pub chord_fraction: f64,
}

impl ControlSurface {
    /// Create a control surface spanning `inboard..outboard` of the semispan.
    #[must_use]
    pub const fn new(inboard: f64, outboard: f64, chord_fraction: f64) -> Self {
        Self {
            inboard,
            outboard,
            chord_fraction,
        }
    }

    /// Check stations and depth; `surface` names the surface in errors.
    fn validate(&self, surface: &'static str) -> Result<(), ParameterError> {
        check_fraction("control surface inboard station", self.inboard)?;
        check_fraction("control surface outboard station", self.outboard)?;
        if self.inboard >= self.outboard {
            return Err(ParameterError::EmptySpan {
                surface,
                inboard: self.inboard,
                outboard: self.outboard,
            });
        }
        if !(self.chord_fraction > 0.0 && self.chord_fraction < 1.0) {
            return Err(ParameterError::FractionOutOfRange {
                name: "control surface chord fraction",
                value: self.chord_fraction,
            });
        }
        Ok(())
    }
}

/// Design inputs for a trapezoidal wing.
///
/// Every field has a default so partially specified configuration files fall
/// back to the reference wing.
///
/// # Examples
/// ```
/// use planform::{ControlSurface, SparLayout, WingParameters};
///
/// let parameters = WingParameters::new(9.0, 66.6, 26.3)
///     .with_spars(SparLayout::new(0.15, 0.6))
///     .with_aileron(ControlSurface::new(0.75, 0.95, 0.3))
///     .with_flap(ControlSurface::new(0.1, 0.7, 0.35));
/// assert!(parameters.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WingParameters {
    /// Span squared over reference area.
    pub aspect_ratio: f64,
    /// Reference (trapezoidal) wing area in square metres.
    pub area: f64,
    /// Sweep of the quarter-chord line in degrees, positive aft.
    #[serde(rename = "quarter_chord_sweep")]
    pub quarter_chord_sweep_deg: f64,
    /// Rule used to pick the taper ratio.
    #[serde(rename = "taper_ratio")]
    pub taper: TaperRule,
    /// Optional wing box spar positions.
    pub spars: Option<SparLayout>,
    /// Optional outboard aileron.
    pub aileron: Option<ControlSurface>,
    /// Optional inboard flap.
    pub flap: Option<ControlSurface>,
}

impl Default for WingParameters {
    fn default() -> Self {
        Self::new(REFERENCE_ASPECT_RATIO, REFERENCE_AREA, REFERENCE_SWEEP_DEG)
    }
}

impl WingParameters {
    /// Create parameters for a plain wing whose taper follows the sweep correlation.
    #[must_use]
    pub fn new(aspect_ratio: f64, area: f64, quarter_chord_sweep_deg: f64) -> Self {
        Self {
            aspect_ratio,
            area,
            quarter_chord_sweep_deg,
            taper: TaperRule::SweepCorrelation,
            spars: None,
            aileron: None,
            flap: None,
        }
    }

    /// Replace the taper rule with an explicit tip-to-root chord ratio.
    #[must_use]
    pub fn with_taper_ratio(mut self, taper_ratio: f64) -> Self {
        self.taper = TaperRule::Explicit(taper_ratio);
        self
    }

    /// Add front and aft spars.
    #[must_use]
    pub fn with_spars(mut self, spars: SparLayout) -> Self {
        self.spars = Some(spars);
        self
    }

    /// Add an aileron.
    #[must_use]
    pub fn with_aileron(mut self, aileron: ControlSurface) -> Self {
        self.aileron = Some(aileron);
        self
    }

    /// Add a flap.
    #[must_use]
    pub fn with_flap(mut self, flap: ControlSurface) -> Self {
        self.flap = Some(flap);
        self
    }

    /// Quarter-chord sweep in radians.
    #[must_use]
    pub fn quarter_chord_sweep(&self) -> f64 {
        Angle::new::<degree>(self.quarter_chord_sweep_deg).get::<radian>()
    }

    /// Tip-to-root chord ratio implied by the taper rule.
    ///
    /// # Examples
    /// ```
    /// use planform::WingParameters;
    ///
    /// let unswept = WingParameters::new(8.0, 20.0, 0.0);
    /// assert!((unswept.taper_ratio() - 0.4).abs() < 1.0e-12);
    /// assert_eq!(unswept.with_taper_ratio(0.25).taper_ratio(), 0.25);
    /// ```
    #[must_use]
    pub fn taper_ratio(&self) -> f64 {
        match self.taper {
            TaperRule::SweepCorrelation => 0.2 * (2.0 - self.quarter_chord_sweep()),
            TaperRule::Explicit(ratio) => ratio,
        }
    }

    /// Check that the parameters describe a buildable wing.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found, checking the basic sizing inputs
    /// before spars and control surfaces.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ParameterError::NonPositiveAspectRatio(self.aspect_ratio));
        }
        if !(self.area.is_finite() && self.area > 0.0) {
            return Err(ParameterError::NonPositiveArea(self.area));
        }
        if !(self.quarter_chord_sweep_deg.abs() < 90.0) {
            return Err(ParameterError::SweepOutOfRange(
                self.quarter_chord_sweep_deg,
            ));
        }
        let taper_ratio = self.taper_ratio();
        if !(taper_ratio.is_finite() && taper_ratio > 0.0) {
            return Err(ParameterError::NonPositiveTaper(taper_ratio));
        }

        if let Some(spars) = &self.spars {
            spars.validate()?;
        }
        for (surface, name) in [(&self.aileron, "aileron"), (&self.flap, "flap")] {
            let Some(surface) = surface else { continue };
            surface.validate(name)?;
            if let Some(spars) = &self.spars {
                if surface.chord_fraction > 1.0 - spars.aft {
                    return Err(ParameterError::HingeAheadOfSpar {
                        surface: name,
                        chord_fraction: surface.chord_fraction,
                        aft_spar: spars.aft,
                    });
                }
            }
        }
        if let (Some(aileron), Some(flap)) = (&self.aileron, &self.flap) {
            let start = aileron.inboard.max(flap.inboard);
            let end = aileron.outboard.min(flap.outboard);
            if start < end {
                return Err(ParameterError::ControlSurfaceOverlap { start, end });
            }
        }
        Ok(())
    }
}

/// Reject values outside the closed unit interval (NaN included).
fn check_fraction(name: &'static str, value: f64) -> Result<(), ParameterError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::FractionOutOfRange { name, value })
    }
}
