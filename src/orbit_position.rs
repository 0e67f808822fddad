use nalgebra::Vector3;

use crate::{angle::Angle, constants::AstronomicalUnit};

/// Position of a body along its orbit: true anomaly and heliocentric distance.
///
/// This is what the elliptic and parabolic solvers return; coordinate-frame
/// collaborators take it from there (argument of perihelion, node, inclination).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPosition {
    /// True anomaly `ν`, measured from perihelion.
    pub true_anomaly: Angle,

    /// Radius vector `r` (AU), always positive.
    pub radius: AstronomicalUnit,
}

impl OrbitPosition {
    /// Cartesian position in the perifocal frame.
    ///
    /// x points to perihelion, y is 90° ahead in the direction of motion, z is the
    /// orbital pole.
    pub fn perifocal(&self) -> Vector3<f64> {
        let (sin_nu, cos_nu) = self.true_anomaly.sin_cos();
        Vector3::new(self.radius * cos_nu, self.radius * sin_nu, 0.0)
    }
}
