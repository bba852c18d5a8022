//! Error types produced while validating, sizing or drawing a wing planform.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a set of wing parameters is not physically meaningful.
///
/// The variants describe the reason the supplied value is rejected so callers can
/// present actionable feedback to users.
///
/// # Examples
///
/// ```
/// use planform::{ParameterError, WingParameters};
///
/// let parameters = WingParameters::new(-1.0, 66.6, 26.3);
/// let error = parameters.validate().expect_err("negative aspect ratio is rejected");
/// assert_eq!(error, ParameterError::NonPositiveAspectRatio(-1.0));
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ParameterError {
    /// Returned when the aspect ratio is zero, negative or not finite.
    #[error("aspect ratio must be positive (received {0})")]
    NonPositiveAspectRatio(f64),
    /// Returned when the reference area is zero, negative or not finite.
    #[error("reference area must be positive (received {0} m^2)")]
    NonPositiveArea(f64),
    /// Returned when the quarter-chord sweep is not strictly between -90 and 90 degrees.
    #[error("quarter-chord sweep must lie strictly between -90 and 90 degrees (received {0})")]
    SweepOutOfRange(f64),
    /// Returned when the taper ratio would produce a zero or negative tip chord.
    #[error("taper ratio must be positive (received {0})")]
    NonPositiveTaper(f64),
    /// Returned when a chord or span fraction falls outside `[0, 1]`.
    #[error("{name} must lie within [0, 1] (received {value})")]
    FractionOutOfRange {
        /// Name of the offending fraction.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the front spar is not ahead of the aft spar.
    #[error("front spar ({front}) must lie ahead of the aft spar ({aft})")]
    SparOrder {
        /// Front spar chord fraction.
        front: f64,
        /// Aft spar chord fraction.
        aft: f64,
    },
    /// Returned when a control surface ends before it starts.
    #[error("{surface} inboard station ({inboard}) must be inboard of its outboard station ({outboard})")]
    EmptySpan {
        /// Name of the control surface.
        surface: &'static str,
        /// Inboard semispan fraction.
        inboard: f64,
        /// Outboard semispan fraction.
        outboard: f64,
    },
    /// Returned when the aileron and the flap share part of the semispan.
    #[error("aileron and flap overlap between semispan fractions {start} and {end}")]
    ControlSurfaceOverlap {
        /// Start of the shared span range.
        start: f64,
        /// End of the shared span range.
        end: f64,
    },
    /// Returned when a control surface hinge line sits ahead of the aft spar.
    #[error("{surface} chord fraction {chord_fraction} cuts into the aft spar at {aft_spar}")]
    HingeAheadOfSpar {
        /// Name of the control surface.
        surface: &'static str,
        /// Control surface chord fraction measured from the trailing edge.
        chord_fraction: f64,
        /// Aft spar chord fraction measured from the leading edge.
        aft_spar: f64,
    },
}

/// Error returned when a numerical integral cannot be evaluated.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum QuadratureError {
    /// Returned when either integration bound is infinite or NaN.
    #[error("integration bounds must be finite (received [{lower}, {upper}])")]
    NonFiniteBounds {
        /// Lower bound of the integral.
        lower: f64,
        /// Upper bound of the integral.
        upper: f64,
    },
    /// Returned when the integrand evaluates to a non-finite value.
    #[error("integrand is not finite at {0}")]
    NonFiniteIntegrand(f64),
    /// Returned when the tolerance is not reached within the subdivision limit.
    #[error("tolerance not reached after {subdivisions} subdivisions (error estimate {error})")]
    SubdivisionLimit {
        /// Number of intervals that were processed.
        subdivisions: usize,
        /// Remaining absolute error estimate.
        error: f64,
    },
}

/// Error returned when the planform geometry cannot be derived.
#[derive(Debug, Error, PartialEq)]
pub enum PlanformError {
    /// Returned when the design parameters fail validation.
    #[error("invalid wing parameters: {0}")]
    InvalidParameters(#[from] ParameterError),
    /// Returned when the mean aerodynamic chord integral fails.
    #[error("mean aerodynamic chord integration failed: {source}")]
    MacIntegration {
        /// Underlying quadrature failure.
        #[source]
        source: QuadratureError,
    },
}

/// Error returned when a drawing cannot be rasterised or written.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Returned when the requested image has a zero dimension.
    #[error("canvas of {width}x{height} pixels cannot be created")]
    Canvas {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Returned when the drawing has nothing to fit the viewport around.
    #[error("drawing has no geometry to render")]
    EmptyDrawing,
    /// Returned when the PNG encoder fails.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    /// Returned when an output file cannot be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Error returned when parameters cannot be loaded from a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the file cannot be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file is not valid JSON for [`WingParameters`](crate::WingParameters).
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// Returned when the parsed parameters fail validation.
    #[error("{path} holds invalid parameters: {source}")]
    Invalid {
        /// Path of the configuration file.
        path: PathBuf,
        /// Validation failure.
        #[source]
        source: ParameterError,
    },
}
