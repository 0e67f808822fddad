use approx::assert_abs_diff_eq;
use orbital_anomaly::angle::Angle;

/// Assert that `eccentric_anomaly` solves `M = E − e·sin E` within `epsilon` radians.
pub fn assert_kepler_root(e: f64, mean_anomaly: Angle, eccentric_anomaly: Angle, epsilon: f64) {
    let ea = eccentric_anomaly.rad();
    assert_abs_diff_eq!(ea - e * ea.sin(), mean_anomaly.rad(), epsilon = epsilon);
}
