//! # Kepler's equation for elliptical orbits
//!
//! Solvers recovering the eccentric anomaly `E` from the mean anomaly `M` and the
//! eccentricity `e`, i.e. the root of
//!
//! ```text
//! M = E - e·sin(E)
//! ```
//!
//! Five strategies are available, trading accuracy, robustness near `e → 1` and cost:
//!
//! | Function | Method | Budget | Failure |
//! |---|---|---|---|
//! | [`fixed_point`] | `E ← M + e·sin E` | caller | [`AnomalyError::NonConvergence`] |
//! | [`newton`] | Newton–Raphson from `E₀ = M` | caller | [`AnomalyError::NonConvergence`] |
//! | [`newton_robust`] / [`newton_robust_rad`] | limited Newton, start at `π` for high `e` | caller | [`AnomalyError::NonConvergence`] |
//! | [`bisection`] | Sinnott's binary search | 53 halvings | invalid input only |
//! | [`first_order`] | `atan2(sin M, cos M − e)` | none | never |
//!
//! The mean anomaly is never range-reduced by the iterative solvers: the root returned
//! always satisfies Kepler's equation for the `M` given by the caller, including values
//! outside `[-π, π]`. Convergence of the iterative methods is declared on the difference
//! between successive iterates, not on the residual of the equation.
//!
//! ## See also
//! ------------
//! * [`KeplerMethod`](crate::kepler_method::KeplerMethod) – Strategy selection over these solvers.
//! * [`true_anomaly`] / [`radius`] – From `E` to the position on the ellipse.
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use log::{debug, trace, warn};

use crate::{
    angle::Angle,
    anomaly_errors::AnomalyError,
    constants::{
        Radian, BISECTION_STEPS, DPI, FIXED_POINT_TOLERANCE, HIGH_ECCENTRICITY, NEWTON_TOLERANCE,
    },
};

pub(crate) fn check_eccentricity(e: f64) -> Result<(), AnomalyError> {
    if (0.0..1.0).contains(&e) {
        Ok(())
    } else {
        Err(AnomalyError::InvalidEccentricity(e))
    }
}

fn check_mean_anomaly(m: Radian) -> Result<Radian, AnomalyError> {
    if m.is_finite() {
        Ok(m)
    } else {
        Err(AnomalyError::InvalidMeanAnomaly(m))
    }
}

fn non_convergence(iterations: u32, eccentricity: f64) -> AnomalyError {
    warn!("Kepler equation did not converge after {iterations} iterations (e = {eccentricity})");
    AnomalyError::NonConvergence {
        iterations,
        eccentricity,
    }
}

/// Number of whole revolutions to remove from `a` to bring it into `[-π, π]`.
fn revolutions(a: Radian) -> f64 {
    (a / DPI).round()
}

/// Mean anomaly corresponding to an eccentric anomaly, `M = E − e·sin E`.
pub fn mean_anomaly(eccentric_anomaly: Angle, e: f64) -> Angle {
    let ea = eccentric_anomaly.rad();
    Angle::from_rad(ea - e * ea.sin())
}

/// Solve Kepler's equation by fixed-point iteration.
///
/// Iterates `E_{k+1} = M + e·sin(E_k)` from `E₀ = M` until two successive iterates
/// differ by less than [`FIXED_POINT_TOLERANCE`]. The contraction factor is `e·cos E`,
/// so the method is cheap for small eccentricities and becomes very slow as `e → 1`.
///
/// Arguments
/// -----------------
/// * `e`: eccentricity, `0 ≤ e < 1`.
/// * `mean_anomaly`: mean anomaly `M`, any finite value.
/// * `max_iter`: iteration budget; `0` fails immediately.
///
/// Return
/// ----------
/// * The eccentric anomaly `E`, or [`AnomalyError::NonConvergence`] when the budget is
///   exhausted before the tolerance is met.
pub fn fixed_point(e: f64, mean_anomaly: Angle, max_iter: u32) -> Result<Angle, AnomalyError> {
    check_eccentricity(e)?;
    let m = check_mean_anomaly(mean_anomaly.rad())?;

    let mut ea = m;
    for i in 1..=max_iter {
        let next = m + e * ea.sin();
        let delta = (next - ea).abs();
        ea = next;
        trace!("fixed point iteration {i}: E = {ea}, |ΔE| = {delta:e}");

        if delta < FIXED_POINT_TOLERANCE {
            debug!("fixed point Kepler solver converged in {i} iterations");
            return Ok(Angle::from_rad(ea));
        }
    }

    Err(non_convergence(max_iter, e))
}

/// One Newton–Raphson update on Kepler's equation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NewtonStep {
    /// New iterate.
    pub(crate) ea: Radian,
    /// Correction that produced it.
    pub(crate) delta: Radian,
    /// Derivative `1 − e·cos E` the correction was divided by.
    pub(crate) slope: f64,
}

/// Successive Newton–Raphson iterates on Kepler's equation.
///
/// When `limited` is set, corrections larger than `π/2` are folded back with
/// `asin(sin(ΔE))` so that a near-zero derivative (`e → 1`, `E → 0`) cannot throw
/// the iterate several revolutions away.
pub(crate) struct NewtonIterates {
    e: f64,
    m: Radian,
    ea: Radian,
    limited: bool,
}

impl NewtonIterates {
    pub(crate) fn new(e: f64, m: Radian, start: Radian, limited: bool) -> Self {
        NewtonIterates {
            e,
            m,
            ea: start,
            limited,
        }
    }
}

impl Iterator for NewtonIterates {
    type Item = NewtonStep;

    fn next(&mut self) -> Option<Self::Item> {
        let (sin_e, cos_e) = self.ea.sin_cos();
        let slope = 1.0 - self.e * cos_e;
        let mut delta = (self.m + self.e * sin_e - self.ea) / slope;

        if self.limited && delta.abs() > FRAC_PI_2 {
            delta = delta.sin().asin();
        }

        self.ea += delta;
        Some(NewtonStep {
            ea: self.ea,
            delta,
            slope,
        })
    }
}

/// Stop test of the Newton iterations.
///
/// Besides the absolute and relative thresholds, the correction is accepted once it is
/// within the rounding floor of the update: the numerator `M + e·sin E − E` carries an
/// error of a few ulps of `max(|E|, |M|)`, amplified by `1 / (1 − e·cos E)`. Near
/// `e → 1` with small `M` that floor sits above both fixed thresholds and the iterates
/// would otherwise cycle between neighbouring floats.
pub(crate) fn newton_converged(step: &NewtonStep, m: Radian) -> bool {
    let delta = step.delta.abs();
    delta < NEWTON_TOLERANCE
        || delta < NEWTON_TOLERANCE * 10.0 * step.ea.abs()
        || delta * step.slope < NEWTON_TOLERANCE * step.ea.abs().max(m.abs())
}

fn run_newton(
    e: f64,
    m: Radian,
    iterates: NewtonIterates,
    max_iter: u32,
) -> Result<Radian, AnomalyError> {
    for (i, step) in (1..=max_iter).zip(iterates) {
        trace!("newton iteration {i}: E = {}, ΔE = {:e}", step.ea, step.delta);
        if newton_converged(&step, m) {
            debug!("newton Kepler solver converged in {i} iterations");
            return Ok(step.ea);
        }
    }
    Err(non_convergence(max_iter, e))
}

/// Solve Kepler's equation with the Newton–Raphson method, starting from `E₀ = M`.
///
/// `E_{k+1} = E_k + (M + e·sin E_k − E_k) / (1 − e·cos E_k)`
///
/// Quadratic convergence for small and moderate eccentricities. For `e` close to 1
/// and small `M` the first correction can be huge; prefer [`newton_robust`] there.
pub fn newton(e: f64, mean_anomaly: Angle, max_iter: u32) -> Result<Angle, AnomalyError> {
    check_eccentricity(e)?;
    let m = check_mean_anomaly(mean_anomaly.rad())?;

    run_newton(e, m, NewtonIterates::new(e, m, m, false), max_iter).map(Angle::from_rad)
}

/// Starting point of the robust Newton solver.
///
/// For `e ≥ HIGH_ECCENTRICITY` the start is `π` in the revolution containing `M`: this is
/// the inflection point of `E − e·sin E`, from which Newton's method converges
/// monotonically for every `M` of that revolution.
pub(crate) fn robust_start(e: f64, m: Radian) -> Radian {
    if e >= HIGH_ECCENTRICITY {
        m - Angle::from_rad(m).mod_two_pi().rad() + PI
    } else {
        m
    }
}

/// Solve Kepler's equation with a limited Newton–Raphson iteration, raw radians.
///
/// This is the numerical core behind [`newton_robust`]; it takes and returns plain `f64`
/// so that hot loops can skip the [`Angle`] wrapper.
///
/// Arguments
/// -----------------
/// * `e`: eccentricity, `0 ≤ e < 1`.
/// * `mean_anomaly`: mean anomaly in radians, any finite value.
/// * `max_iter`: iteration budget; `0` fails immediately.
///
/// Return
/// ----------
/// * The eccentric anomaly in radians.
///
/// Errors
/// ----------
/// * [`AnomalyError::InvalidEccentricity`], [`AnomalyError::InvalidMeanAnomaly`] on bad input.
/// * [`AnomalyError::NonConvergence`] when `max_iter` is exhausted.
pub fn newton_robust_rad(
    e: f64,
    mean_anomaly: Radian,
    max_iter: u32,
) -> Result<Radian, AnomalyError> {
    check_eccentricity(e)?;
    let m = check_mean_anomaly(mean_anomaly)?;

    run_newton(
        e,
        m,
        NewtonIterates::new(e, m, robust_start(e, m), true),
        max_iter,
    )
}

/// Solve Kepler's equation with a Newton–Raphson iteration hardened for high eccentricity.
///
/// Same update as [`newton`], but corrections are limited to `π/2` and, for `e ≥ 0.6`,
/// the iteration starts at `π` within the revolution of `M`. Where both converge the
/// result agrees with [`newton`] to machine precision.
///
/// See also
/// ------------
/// * [`newton_robust_rad`] – The same solver on raw radians.
pub fn newton_robust(e: f64, mean_anomaly: Angle, max_iter: u32) -> Result<Angle, AnomalyError> {
    newton_robust_rad(e, mean_anomaly.rad(), max_iter).map(Angle::from_rad)
}

/// Solve Kepler's equation by binary search (R. Sinnott, Sky & Telescope, 1985).
///
/// `M` is reduced to `[-π, π]`, the search runs on `|M|` over `[0, π]` with
/// [`BISECTION_STEPS`] halvings, and the sign and removed revolutions are restored so
/// that the result solves the equation for the caller's `M`.
///
/// No iteration budget is needed: the search always terminates with a resolution close
/// to one ulp of `π`. The only failures are invalid inputs.
pub fn bisection(e: f64, mean_anomaly: Angle) -> Result<Angle, AnomalyError> {
    check_eccentricity(e)?;
    let m = check_mean_anomaly(mean_anomaly.rad())?;

    let turns = revolutions(m);
    let reduced = m - turns * DPI;
    let target = reduced.abs();

    let mut ea = FRAC_PI_2;
    let mut step = FRAC_PI_4;
    for _ in 0..BISECTION_STEPS {
        if target - (ea - e * ea.sin()) < 0.0 {
            ea -= step;
        } else {
            ea += step;
        }
        step *= 0.5;
    }

    Ok(Angle::from_rad(ea.copysign(reduced) + turns * DPI))
}

/// First-order approximation of the eccentric anomaly, `E ≈ atan2(sin M, cos M − e)`.
///
/// Non-iterative and infallible; the error is of order `e²` (around the fifth
/// significant digit for `e = 0.1`). Mostly useful as a seed or where speed matters
/// more than accuracy. The result lies within `π` of `M`.
pub fn first_order(e: f64, mean_anomaly: Angle) -> Angle {
    let m = mean_anomaly.rad();
    let (sin_m, cos_m) = m.sin_cos();

    // atan2 lands in [-π, π]; bring it back next to M
    let offset = sin_m.atan2(cos_m - e) - m;
    Angle::from_rad(m + offset - revolutions(offset) * DPI)
}

/// True anomaly from the eccentric anomaly.
///
/// `tan(ν/2) = √((1+e)/(1−e)) · tan(E/2)`, evaluated with `atan2` so that `ν` stays
/// in the same revolution as `E`.
pub fn true_anomaly(eccentric_anomaly: Angle, e: f64) -> Angle {
    let ea = eccentric_anomaly.rad();
    let turns = revolutions(ea);
    let (sin_half, cos_half) = (0.5 * (ea - turns * DPI)).sin_cos();

    let nu = 2.0 * ((1.0 + e).sqrt() * sin_half).atan2((1.0 - e).sqrt() * cos_half);
    Angle::from_rad(nu + turns * DPI)
}

/// Radius vector `r = a·(1 − e·cos E)`, in the unit of `semi_major_axis`.
pub fn radius(eccentric_anomaly: Angle, e: f64, semi_major_axis: f64) -> f64 {
    semi_major_axis * (1.0 - e * eccentric_anomaly.cos())
}
