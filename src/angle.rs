//! # Typed angle
//!
//! [`Angle`] is a thin newtype over radians. It is used at the public
//! boundary of the solvers so that a mean anomaly given in degrees cannot be
//! passed where radians are expected; the numerical cores work on raw `f64`.
//!
//! ```rust
//! use orbital_anomaly::angle::Angle;
//!
//! let m = Angle::from_deg(5.0);
//! assert!((m.rad() - 0.087_266_462_599_716_48).abs() < 1e-15);
//! ```
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Radian, DPI, RADEG};

/// An angle, stored in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(Radian);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub const fn from_rad(rad: Radian) -> Self {
        Angle(rad)
    }

    pub fn from_deg(deg: Degree) -> Self {
        Angle(deg * RADEG)
    }

    pub const fn rad(self) -> Radian {
        self.0
    }

    pub fn deg(self) -> Degree {
        self.0 / RADEG
    }

    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn sin_cos(self) -> (f64, f64) {
        self.0.sin_cos()
    }

    /// Principal value of the angle in `[0, 2π)`.
    pub fn mod_two_pi(self) -> Self {
        Angle(self.0.rem_euclid(DPI))
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> Self {
        angle.0
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.deg())
    }
}
