//! # Kepler solver selection
//!
//! The [`kepler`](crate::kepler) module exposes one free function per algorithm. This module
//! wraps them in a closed set of strategies, [`KeplerMethod`], sharing a single
//! `solve(e, M, n)` capability, and in [`KeplerSolver`], a small serde-friendly
//! configuration value pairing a method with its iteration budget.
//!
//! ## Typical usage
//!
//! ```rust
//! use orbital_anomaly::angle::Angle;
//! use orbital_anomaly::kepler_method::{KeplerMethod, KeplerSolver};
//!
//! // Pick a method from the eccentricity regime
//! let solver = KeplerSolver::for_eccentricity(0.99);
//! assert_eq!(solver.method, KeplerMethod::NewtonRobust);
//!
//! let ea = solver.solve(0.99, Angle::from_rad(0.2)).unwrap();
//! assert!((ea.rad() - 1.066997365282).abs() < 1e-12);
//! ```
use serde::{Deserialize, Serialize};

use crate::{
    angle::Angle,
    anomaly_errors::AnomalyError,
    constants::{DEFAULT_MAX_ITER, HIGH_ECCENTRICITY},
    kepler,
};

/// Algorithms available to solve Kepler's equation.
///
/// Variants
/// --------
/// * `FixedPoint`   : `E ← M + e·sin E`; cheap, ~7 significant digits, small `e` only.
/// * `Newton`       : Newton–Raphson from `E₀ = M`; quadratic, moderate `e`.
/// * `NewtonRobust` : Limited Newton–Raphson with an inflection-point start; any `e < 1`.
/// * `Bisection`    : Sinnott's binary search; ignores the budget, always terminates.
/// * `FirstOrder`   : Closed-form approximation; ignores the budget, never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeplerMethod {
    FixedPoint,
    Newton,
    #[default]
    NewtonRobust,
    Bisection,
    FirstOrder,
}

impl KeplerMethod {
    /// Solve `M = E − e·sin E` with this method.
    ///
    /// `max_iter` is only read by the iterative methods (`FixedPoint`, `Newton`,
    /// `NewtonRobust`).
    pub fn solve(self, e: f64, mean_anomaly: Angle, max_iter: u32) -> Result<Angle, AnomalyError> {
        match self {
            KeplerMethod::FixedPoint => kepler::fixed_point(e, mean_anomaly, max_iter),
            KeplerMethod::Newton => kepler::newton(e, mean_anomaly, max_iter),
            KeplerMethod::NewtonRobust => kepler::newton_robust(e, mean_anomaly, max_iter),
            KeplerMethod::Bisection => kepler::bisection(e, mean_anomaly),
            KeplerMethod::FirstOrder => Ok(kepler::first_order(e, mean_anomaly)),
        }
    }

    /// Most accurate iterative method for the eccentricity regime.
    pub fn for_eccentricity(e: f64) -> Self {
        if e < HIGH_ECCENTRICITY {
            KeplerMethod::Newton
        } else {
            KeplerMethod::NewtonRobust
        }
    }

    pub fn is_iterative(&self) -> bool {
        matches!(self, Self::FixedPoint | Self::Newton | Self::NewtonRobust)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FixedPoint => "fixed point",
            Self::Newton => "Newton-Raphson",
            Self::NewtonRobust => "Newton-Raphson (robust start)",
            Self::Bisection => "binary search",
            Self::FirstOrder => "first-order approximation",
        }
    }

    pub fn all() -> &'static [KeplerMethod] {
        &[
            KeplerMethod::FixedPoint,
            KeplerMethod::Newton,
            KeplerMethod::NewtonRobust,
            KeplerMethod::Bisection,
            KeplerMethod::FirstOrder,
        ]
    }
}

impl std::fmt::Display for KeplerMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A Kepler method together with its iteration budget.
///
/// Missing fields fall back to [`KeplerSolver::default`] when deserialized, so a
/// configuration file may only name the method:
///
/// ```rust
/// use orbital_anomaly::kepler_method::{KeplerMethod, KeplerSolver};
///
/// let solver: KeplerSolver = serde_json::from_str(r#"{ "method": "bisection" }"#).unwrap();
/// assert_eq!(solver.method, KeplerMethod::Bisection);
/// assert_eq!(solver.max_iterations, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeplerSolver {
    pub method: KeplerMethod,
    pub max_iterations: u32,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver {
            method: KeplerMethod::default(),
            max_iterations: DEFAULT_MAX_ITER,
        }
    }
}

impl KeplerSolver {
    pub fn new(method: KeplerMethod, max_iterations: u32) -> Self {
        KeplerSolver {
            method,
            max_iterations,
        }
    }

    pub fn for_eccentricity(e: f64) -> Self {
        KeplerSolver {
            method: KeplerMethod::for_eccentricity(e),
            ..Default::default()
        }
    }

    pub fn solve(&self, e: f64, mean_anomaly: Angle) -> Result<Angle, AnomalyError> {
        self.method.solve(e, mean_anomaly, self.max_iterations)
    }
}

#[cfg(test)]
mod kepler_method_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_every_method_solves() {
        let e = 0.1;
        let m = Angle::from_deg(5.0);
        let reference = kepler::bisection(e, m).unwrap().deg();

        for method in KeplerMethod::all() {
            let ea = method.solve(e, m, 20).unwrap();
            let tol = if *method == KeplerMethod::FirstOrder { 1e-4 } else { 1e-6 };
            assert_abs_diff_eq!(ea.deg(), reference, epsilon = tol);
        }
    }

    #[test]
    fn test_budget_only_binds_iterative_methods() {
        for method in KeplerMethod::all() {
            let res = method.solve(0.5, Angle::from_rad(1.0), 0);
            assert_eq!(res.is_err(), method.is_iterative(), "{method}");
        }
    }

    #[test]
    fn test_for_eccentricity() {
        assert_eq!(KeplerMethod::for_eccentricity(0.0), KeplerMethod::Newton);
        assert_eq!(KeplerMethod::for_eccentricity(0.59), KeplerMethod::Newton);
        assert_eq!(KeplerMethod::for_eccentricity(0.6), KeplerMethod::NewtonRobust);
        assert_eq!(KeplerSolver::for_eccentricity(0.97).max_iterations, DEFAULT_MAX_ITER);
    }

    #[test]
    fn test_serde_config() {
        let solver = KeplerSolver::new(KeplerMethod::FixedPoint, 8);
        let json = serde_json::to_string(&solver).unwrap();
        assert_eq!(json, r#"{"method":"fixed_point","max_iterations":8}"#);

        let back: KeplerSolver = serde_json::from_str(&json).unwrap();
        assert_eq!(back, solver);

        let defaulted: KeplerSolver = serde_json::from_str("{}").unwrap();
        assert_eq!(defaulted, KeplerSolver::default());

        assert!(serde_json::from_str::<KeplerSolver>(r#"{"method":"halley"}"#).is_err());
    }

    #[test]
    fn test_solver_reports_non_convergence() {
        let solver = KeplerSolver::new(KeplerMethod::FixedPoint, 2);
        assert_eq!(
            solver.solve(0.95, Angle::from_rad(0.5)),
            Err(AnomalyError::NonConvergence {
                iterations: 2,
                eccentricity: 0.95
            })
        );
    }
}
