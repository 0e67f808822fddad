//! # Elliptic orbits
//!
//! Position of a body on an elliptic orbit at a given epoch, the elliptic sibling of
//! [`ParabolicElements`](crate::parabolic::ParabolicElements):
//!
//! 1. mean motion `n = k / a^(3/2)` (rad/day) and mean anomaly `M = n·(t − T)`,
//! 2. eccentric anomaly `E` from Kepler's equation with a configurable [`KeplerSolver`],
//! 3. true anomaly `ν` and radius vector `r = a·(1 − e·cos E)`.
//!
//! `M` is handed to the solver unreduced, so `ν` keeps counting revolutions.
use hifitime::Epoch;

use crate::{
    angle::Angle,
    anomaly_errors::AnomalyError,
    constants::{AstronomicalUnit, DPI, GAUSS_GRAV, JDE},
    kepler::{self, check_eccentricity},
    kepler_method::KeplerSolver,
    orbit_position::OrbitPosition,
    time::epoch_to_jde,
};

/// Orbital elements fixing the motion along an ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticElements {
    /// Epoch of perihelion passage `T` (Julian ephemeris day).
    pub time_p: JDE,

    /// Semi-major axis `a` (AU), `> 0`.
    pub semi_major_axis: AstronomicalUnit,

    /// Eccentricity `e`, `0 ≤ e < 1`.
    pub eccentricity: f64,
}

impl EllipticElements {
    pub fn new(
        time_p: JDE,
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
    ) -> Result<Self, AnomalyError> {
        let elements = EllipticElements {
            time_p,
            semi_major_axis,
            eccentricity,
        };
        elements.validate()?;
        Ok(elements)
    }

    fn validate(&self) -> Result<(), AnomalyError> {
        let a = self.semi_major_axis;
        if !(a > 0.0 && a.is_finite()) {
            return Err(AnomalyError::InvalidSemiMajorAxis(a));
        }
        check_eccentricity(self.eccentricity)
    }

    /// Mean daily motion `n` (rad/day).
    pub fn mean_motion(&self) -> f64 {
        GAUSS_GRAV / (self.semi_major_axis * self.semi_major_axis.sqrt())
    }

    /// Orbital period (days).
    pub fn period(&self) -> f64 {
        DPI / self.mean_motion()
    }

    /// Mean anomaly at `jde`, not reduced to one revolution.
    pub fn mean_anomaly(&self, jde: JDE) -> Angle {
        Angle::from_rad(self.mean_motion() * (jde - self.time_p))
    }

    /// True anomaly and radius vector at the epoch `jde`.
    ///
    /// Arguments
    /// -----------------
    /// * `jde`: Julian ephemeris day, same time scale as `time_p`.
    /// * `solver`: Kepler method and iteration budget.
    ///
    /// Return
    /// ----------
    /// * An [`OrbitPosition`] with `a(1 − e) ≤ r ≤ a(1 + e)`.
    ///
    /// Errors
    /// ----------
    /// * [`AnomalyError::InvalidSemiMajorAxis`], [`AnomalyError::InvalidEccentricity`].
    /// * Whatever the Kepler solver reports, typically [`AnomalyError::NonConvergence`].
    pub fn anomaly_distance(
        &self,
        jde: JDE,
        solver: &KeplerSolver,
    ) -> Result<OrbitPosition, AnomalyError> {
        self.validate()?;
        let e = self.eccentricity;

        let eccentric_anomaly = solver.solve(e, self.mean_anomaly(jde))?;

        Ok(OrbitPosition {
            true_anomaly: kepler::true_anomaly(eccentric_anomaly, e),
            radius: kepler::radius(eccentric_anomaly, e, self.semi_major_axis),
        })
    }

    /// Same as [`EllipticElements::anomaly_distance`] for a hifitime [`Epoch`] (TT).
    pub fn anomaly_distance_at(
        &self,
        epoch: Epoch,
        solver: &KeplerSolver,
    ) -> Result<OrbitPosition, AnomalyError> {
        self.anomaly_distance(epoch_to_jde(epoch), solver)
    }
}

#[cfg(test)]
mod elliptic_test {
    use super::*;
    use crate::kepler_method::KeplerMethod;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn halley() -> EllipticElements {
        // 1P/Halley, perihelion 1986 February 9.45891 TT
        EllipticElements::new(2446470.95891, 17.9400782, 0.96727426).unwrap()
    }

    #[test]
    fn test_at_perihelion_and_aphelion() {
        let comet = halley();
        let solver = KeplerSolver::for_eccentricity(comet.eccentricity);

        let at_perihelion = comet.anomaly_distance(comet.time_p, &solver).unwrap();
        assert_abs_diff_eq!(at_perihelion.true_anomaly.rad(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(at_perihelion.radius, 17.9400782 * (1.0 - 0.96727426));

        let half_period = comet.time_p + 0.5 * comet.period();
        let at_aphelion = comet.anomaly_distance(half_period, &solver).unwrap();
        assert_relative_eq!(at_aphelion.true_anomaly.cos(), -1.0, epsilon = 1e-12);
        assert_relative_eq!(
            at_aphelion.radius,
            17.9400782 * (1.0 + 0.96727426),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_conic_equation() {
        let comet = halley();
        let a = comet.semi_major_axis;
        let e = comet.eccentricity;
        let solver = KeplerSolver::new(KeplerMethod::Bisection, 0);

        for days in [-3000.0, -100.0, 10.0, 365.25, 20000.0] {
            let pos = comet.anomaly_distance(comet.time_p + days, &solver).unwrap();
            let r = a * (1.0 - e * e) / (1.0 + e * pos.true_anomaly.cos());
            assert_relative_eq!(pos.radius, r, max_relative = 1e-10);
            assert!(pos.radius >= a * (1.0 - e) && pos.radius <= a * (1.0 + e));
        }
    }

    #[test]
    fn test_methods_agree() {
        let comet = halley();
        let jde = comet.time_p + 1234.5;

        let robust = comet
            .anomaly_distance(jde, &KeplerSolver::new(KeplerMethod::NewtonRobust, 30))
            .unwrap();
        let bisection = comet
            .anomaly_distance(jde, &KeplerSolver::new(KeplerMethod::Bisection, 0))
            .unwrap();

        assert_relative_eq!(
            robust.true_anomaly.rad(),
            bisection.true_anomaly.rad(),
            max_relative = 1e-9
        );
        assert_relative_eq!(robust.radius, bisection.radius, max_relative = 1e-9);
    }

    #[test]
    fn test_invalid_elements() {
        assert_eq!(
            EllipticElements::new(2451545.0, -1.0, 0.1),
            Err(AnomalyError::InvalidSemiMajorAxis(-1.0))
        );
        assert_eq!(
            EllipticElements::new(2451545.0, 1.0, 1.0),
            Err(AnomalyError::InvalidEccentricity(1.0))
        );
    }

    #[test]
    fn test_earth_like_period() {
        let earth = EllipticElements::new(2451547.0, 1.00000011, 0.01671022).unwrap();
        assert_abs_diff_eq!(earth.period(), 365.2569, epsilon = 1e-3);
    }
}
