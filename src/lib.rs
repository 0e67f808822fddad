pub mod angle;
pub mod anomaly_errors;
pub mod constants;
pub mod elliptic;
pub mod kepler;
pub mod kepler_method;
pub mod orbit_position;
pub mod parabolic;
pub mod time;
