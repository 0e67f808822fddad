//! # Parabolic orbits
//!
//! Position of a body on a parabolic orbit from the time elapsed since perihelion
//! passage, through Barker's equation
//!
//! ```text
//! W = 3k/√2 · (t − T) / q^(3/2)
//! s³ + 3s − W = 0,   s = tan(ν/2)
//! ν = 2·atan(s),     r = q·(1 + s²)
//! ```
//!
//! where `k` is the Gaussian gravitational constant, `T` the epoch of perihelion and `q`
//! the perihelion distance.
//!
//! The cubic is solved with Newton's iteration `s ← (2s³ + W) / (3(s² + 1))` seeded with
//! `∛W`. The seed always lies beyond the root on the convex side of the cubic, so the
//! iterates move monotonically towards the root and converge quadratically; the
//! internal bound [`PARABOLIC_MAX_ITER`] is never reached for finite inputs.
//!
//! ## Example
//!
//! ```rust
//! use orbital_anomaly::parabolic::ParabolicElements;
//!
//! // Meeus, Astronomical Algorithms, example 34.a
//! let elements = ParabolicElements::new(2450917.9358, 1.487469).unwrap();
//! let pos = elements.anomaly_distance(2451030.5).unwrap();
//! assert_eq!(format!("{:.5}", pos.true_anomaly.deg()), "66.78862");
//! assert_eq!(format!("{:.6}", pos.radius), "2.133911");
//! ```
use hifitime::Epoch;
use log::{debug, error};

use crate::{
    angle::Angle,
    anomaly_errors::AnomalyError,
    constants::{AstronomicalUnit, BARKER_FACTOR, JDE, NEWTON_TOLERANCE, PARABOLIC_MAX_ITER},
    orbit_position::OrbitPosition,
    time::epoch_to_jde,
};

/// Orbital elements fixing the motion along a parabola.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParabolicElements {
    /// Epoch of perihelion passage `T` (Julian ephemeris day).
    pub time_p: JDE,

    /// Perihelion distance `q` (AU), `> 0`.
    pub perihelion_distance: AstronomicalUnit,
}

fn check_perihelion_distance(q: f64) -> Result<(), AnomalyError> {
    if q > 0.0 && q.is_finite() {
        Ok(())
    } else {
        Err(AnomalyError::InvalidPerihelionDistance(q))
    }
}

/// Solve `s³ + 3s − W = 0` for `s`.
pub(crate) fn solve_barker(w: f64) -> Result<f64, AnomalyError> {
    let mut s = w.cbrt();
    for i in 1..=PARABOLIC_MAX_ITER {
        let s2 = s * s;
        let next = (2.0 * s2 * s + w) / (3.0 * (s2 + 1.0));
        let delta = next - s;
        s = next;

        if delta.abs() <= NEWTON_TOLERANCE * s.abs().max(1.0) {
            debug!("Barker equation converged in {i} iterations (W = {w})");
            return Ok(s);
        }
    }

    error!("Barker equation did not converge for W = {w}");
    Err(AnomalyError::ParabolicNonConvergence { w })
}

impl ParabolicElements {
    /// Build the elements, checking that the perihelion distance is positive.
    pub fn new(time_p: JDE, perihelion_distance: AstronomicalUnit) -> Result<Self, AnomalyError> {
        check_perihelion_distance(perihelion_distance)?;
        Ok(ParabolicElements {
            time_p,
            perihelion_distance,
        })
    }

    /// True anomaly and radius vector at the epoch `jde`.
    ///
    /// Arguments
    /// -----------------
    /// * `jde`: Julian ephemeris day of the position, in the same time scale as `time_p`.
    ///
    /// Return
    /// ----------
    /// * An [`OrbitPosition`]; `ν` is negative before perihelion passage, `r ≥ q`.
    ///
    /// Errors
    /// ----------
    /// * [`AnomalyError::InvalidPerihelionDistance`] if `q ≤ 0`.
    /// * [`AnomalyError::ParabolicNonConvergence`] only for non-finite epochs.
    pub fn anomaly_distance(&self, jde: JDE) -> Result<OrbitPosition, AnomalyError> {
        let q = self.perihelion_distance;
        check_perihelion_distance(q)?;

        let w = BARKER_FACTOR * (jde - self.time_p) / (q * q.sqrt());
        let s = solve_barker(w)?;

        Ok(OrbitPosition {
            true_anomaly: Angle::from_rad(2.0 * s.atan()),
            radius: q * (1.0 + s * s),
        })
    }

    /// Same as [`ParabolicElements::anomaly_distance`] for a hifitime [`Epoch`] (TT).
    pub fn anomaly_distance_at(&self, epoch: Epoch) -> Result<OrbitPosition, AnomalyError> {
        self.anomaly_distance(epoch_to_jde(epoch))
    }
}
