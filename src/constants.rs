//! # Constants for the anomaly solvers
//!
//! This module centralizes the **physical constants**, **conversion factors**, and the
//! **numerical tuning values** (tolerances, internal iteration bounds) shared by the
//! elliptical and parabolic solvers.
//!
//! ## Overview
//!
//! - Gaussian gravitational constant and its derived Barker factor
//! - Unit conversions (degrees ↔ radians)
//! - Convergence tolerances of the Kepler iterations
//! - Internal iteration bounds for the solvers without a caller budget

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Gaussian gravitational constant k (AU^3/2 / day, solar mass units)
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// 3k/√2, the scale factor of Barker's equation `W = 3k/√2 · Δt / q^(3/2)`
pub const BARKER_FACTOR: f64 = 3.0 * GAUSS_GRAV / std::f64::consts::SQRT_2;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian ephemeris day (days)
pub type JDE = f64;

// -------------------------------------------------------------------------------------------------
// Solver tuning
// -------------------------------------------------------------------------------------------------

/// Successive-iterate tolerance of the fixed-point Kepler iteration (radians).
///
/// Keeps 7 significant digits on `E`.
pub const FIXED_POINT_TOLERANCE: f64 = 1e-8;

/// Absolute correction threshold of the Newton iterations, `100·ε`.
pub const NEWTON_TOLERANCE: f64 = 100.0 * f64::EPSILON;

/// Eccentricity from which the robust Newton solver starts at the inflection point `π`.
pub const HIGH_ECCENTRICITY: f64 = 0.6;

/// Number of halvings of Sinnott's binary search (one per mantissa bit).
pub const BISECTION_STEPS: u32 = 53;

/// Internal iteration bound of the Barker equation solver.
pub const PARABOLIC_MAX_ITER: u32 = 64;

/// Default iteration budget of [`KeplerSolver`](crate::kepler_method::KeplerSolver).
pub const DEFAULT_MAX_ITER: u32 = 50;
