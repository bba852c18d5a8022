//! One-dimensional numerical integration.
//!
//! Integrals are evaluated with the 15-point Gauss–Kronrod rule, refined by
//! repeatedly bisecting the interval with the largest error estimate until the
//! requested tolerance is met.

use tracing::trace;

use crate::errors::QuadratureError;

/// Kronrod abscissae on `[-1, 1]`, outermost first; the last entry is the centre.
const KRONROD_NODES: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

/// Weights of the 15-point Kronrod rule matching [`KRONROD_NODES`].
const KRONROD_WEIGHTS: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Weights of the embedded 7-point Gauss rule, applied at the odd Kronrod nodes.
const GAUSS_WEIGHTS: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Stopping criteria for [`integrate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// Absolute error target.
    pub absolute: f64,
    /// Error target relative to the magnitude of the integral.
    pub relative: f64,
    /// Maximum number of subintervals before giving up.
    pub max_subdivisions: usize,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: 1.49e-8,
            relative: 1.49e-8,
            max_subdivisions: 50,
        }
    }
}

/// Result of a numerical integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integral {
    /// Estimated value of the integral.
    pub value: f64,
    /// Estimated absolute error of [`Integral::value`].
    pub error: f64,
    /// Number of subintervals used.
    pub subdivisions: usize,
}

/// One subinterval together with its local estimate.
#[derive(Clone, Copy, Debug)]
struct Panel {
    /// Left end of the subinterval.
    lower: f64,
    /// Right end of the subinterval.
    upper: f64,
    /// Kronrod estimate of the integral over the subinterval.
    value: f64,
    /// Absolute error estimate of `value`.
    error: f64,
}

/// Apply the 15-point Gauss–Kronrod rule on `[lower, upper]`.
///
/// The error estimate is the difference between the Kronrod result and the
/// embedded 7-point Gauss result.
fn gauss_kronrod_15<F>(f: &mut F, lower: f64, upper: f64) -> Result<Panel, QuadratureError>
where
    F: FnMut(f64) -> f64,
{
    let center = 0.5 * (lower + upper);
    let half_length = 0.5 * (upper - lower);
    let mut eval = |x: f64| {
        let value = f(x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(QuadratureError::NonFiniteIntegrand(x))
        }
    };

    let f_center = eval(center)?;
    let mut kronrod = f_center * KRONROD_WEIGHTS[7];
    let mut gauss = f_center * GAUSS_WEIGHTS[3];
    for (j, (&node, &weight)) in KRONROD_NODES[..7]
        .iter()
        .zip(&KRONROD_WEIGHTS[..7])
        .enumerate()
    {
        let offset = half_length * node;
        let pair = eval(center - offset)? + eval(center + offset)?;
        kronrod += weight * pair;
        if j % 2 == 1 {
            gauss += GAUSS_WEIGHTS[j / 2] * pair;
        }
    }

    Ok(Panel {
        lower,
        upper,
        value: kronrod * half_length,
        error: ((kronrod - gauss) * half_length).abs(),
    })
}

/// Integrate `f` over `[lower, upper]`.
///
/// Reversed bounds integrate with the sign flipped and equal bounds integrate
/// to zero without evaluating `f`.
///
/// # Errors
///
/// Returns [`QuadratureError`] when a bound is not finite, when `f` produces a
/// non-finite value, or when the tolerance cannot be met within
/// [`Tolerance::max_subdivisions`] subintervals.
///
/// # Examples
/// ```
/// use planform::quadrature::{integrate, Tolerance};
///
/// let area = integrate(|x| x * x, 0.0, 3.0, Tolerance::default()).unwrap();
/// assert!((area.value - 9.0).abs() < 1.0e-12);
/// ```
pub fn integrate<F>(
    mut f: F,
    lower: f64,
    upper: f64,
    tolerance: Tolerance,
) -> Result<Integral, QuadratureError>
where
    F: FnMut(f64) -> f64,
{
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(QuadratureError::NonFiniteBounds { lower, upper });
    }
    if lower == upper {
        return Ok(Integral {
            value: 0.0,
            error: 0.0,
            subdivisions: 0,
        });
    }
    if lower > upper {
        let flipped = integrate(f, upper, lower, tolerance)?;
        return Ok(Integral {
            value: -flipped.value,
            ..flipped
        });
    }

    let mut panels = vec![gauss_kronrod_15(&mut f, lower, upper)?];
    loop {
        let value: f64 = panels.iter().map(|panel| panel.value).sum();
        let error: f64 = panels.iter().map(|panel| panel.error).sum();
        let target = tolerance.absolute.max(tolerance.relative * value.abs());
        if error <= target {
            trace!(value, error, subdivisions = panels.len(), "integral converged");
            return Ok(Integral {
                value,
                error,
                subdivisions: panels.len(),
            });
        }
        if panels.len() >= tolerance.max_subdivisions {
            return Err(QuadratureError::SubdivisionLimit {
                subdivisions: panels.len(),
                error,
            });
        }

        let worst = panels
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.error.total_cmp(&b.error))
            .map_or(0, |(idx, _)| idx);
        let panel = panels.swap_remove(worst);
        let midpoint = 0.5 * (panel.lower + panel.upper);
        panels.push(gauss_kronrod_15(&mut f, panel.lower, midpoint)?);
        panels.push(gauss_kronrod_15(&mut f, midpoint, panel.upper)?);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn polynomials_are_integrated_exactly_in_one_panel() {
        let integral = integrate(|x| 3.0 * x * x - 2.0 * x + 1.0, -1.0, 2.0, Tolerance::default())
            .expect("polynomial integrates");
        assert_relative_eq!(integral.value, 9.0, epsilon = 1.0e-12);
        assert_eq!(integral.subdivisions, 1);
    }

    #[test]
    fn oscillating_integrand_needs_subdivision() {
        let integral = integrate(|x| (20.0 * x).sin(), 0.0, 1.0, Tolerance::default())
            .expect("sine integrates");
        assert_relative_eq!(integral.value, (1.0 - 20.0_f64.cos()) / 20.0, epsilon = 1.0e-8);
        assert!(integral.subdivisions > 1);
    }

    #[test]
    fn peaked_integrand_is_refined_near_the_peak() {
        // 1 / (a + x^2) integrates to 2 atan(1 / sqrt(a)) / sqrt(a) on [-1, 1].
        let a = 1.0e-2_f64;
        let integral = integrate(|x| 1.0 / (a + x * x), -1.0, 1.0, Tolerance::default())
            .expect("peak integrates");
        let exact = 2.0 * (1.0 / a.sqrt()).atan() / a.sqrt();
        assert_relative_eq!(integral.value, exact, max_relative = 1.0e-8);
        assert!(integral.subdivisions > 1);
    }

    #[test]
    fn reversed_bounds_flip_the_sign() {
        let forward = integrate(f64::exp, 0.0, 1.0, Tolerance::default()).expect("forward");
        let backward = integrate(f64::exp, 1.0, 0.0, Tolerance::default()).expect("backward");
        assert_relative_eq!(forward.value, std::f64::consts::E - 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(backward.value, -forward.value, epsilon = 1.0e-15);
    }

    #[test]
    fn equal_bounds_skip_evaluation() {
        let integral = integrate(
            |_| panic!("integrand must not be evaluated"),
            4.0,
            4.0,
            Tolerance::default(),
        )
        .expect("empty interval");
        assert_eq!(integral.value, 0.0);
    }

    #[test]
    fn infinite_bounds_are_rejected() {
        let error = integrate(|x| x, 0.0, f64::INFINITY, Tolerance::default())
            .expect_err("infinite bound rejected");
        assert!(matches!(error, QuadratureError::NonFiniteBounds { .. }));
    }

    #[test]
    fn singular_integrand_is_reported() {
        let error = integrate(|x| 1.0 / x, -1.0, 1.0, Tolerance::default())
            .expect_err("pole at the centre detected");
        assert_eq!(error, QuadratureError::NonFiniteIntegrand(0.0));
    }

    #[test]
    fn subdivision_limit_is_enforced() {
        let tolerance = Tolerance {
            absolute: 0.0,
            relative: 0.0,
            max_subdivisions: 4,
        };
        let error = integrate(|x| (50.0 * x).cos(), 0.0, 10.0, tolerance)
            .expect_err("tolerance unreachable");
        assert!(matches!(
            error,
            QuadratureError::SubdivisionLimit { subdivisions: 4, .. }
        ));
    }
}
