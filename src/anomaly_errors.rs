use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnomalyError {
    #[error("Kepler equation did not converge after {iterations} iterations (e = {eccentricity})")]
    NonConvergence { iterations: u32, eccentricity: f64 },

    #[error("Invalid eccentricity for an elliptical orbit (expected 0 <= e < 1): {0}")]
    InvalidEccentricity(f64),

    #[error("Invalid mean anomaly (must be finite): {0}")]
    InvalidMeanAnomaly(f64),

    #[error("Invalid perihelion distance (must be > 0): {0}")]
    InvalidPerihelionDistance(f64),

    #[error("Invalid semi-major axis (must be > 0): {0}")]
    InvalidSemiMajorAxis(f64),

    #[error("Barker equation did not converge for W = {w}")]
    ParabolicNonConvergence { w: f64 },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
