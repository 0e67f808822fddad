use hifitime::{Epoch, TimeScale};
use std::str::FromStr;

use crate::{anomaly_errors::AnomalyError, constants::JDE};

/// Julian ephemeris day of an epoch, in the TT time scale.
pub fn epoch_to_jde(epoch: Epoch) -> JDE {
    epoch.to_jde_tt_days()
}

/// Transformation from date in the format YYYY MM DD.FFFFF (TT) to Julian ephemeris day
///
/// Argument
/// --------
/// * `date_str`: a string representing the date in the format YYYY MM DD.FFFFF, read as
///   dynamical time (TT)
///
/// Return
/// ------
/// * a float representing the input date in Julian ephemeris day
pub fn frac_date_to_jd(date_str: &str) -> Result<JDE, AnomalyError> {
    let invalid = |what: &str| AnomalyError::InvalidDate(format!("{what} in '{date_str}'"));

    let parts: Vec<&str> = date_str.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(invalid("expected format YYYY MM DD.FFFFF"));
    }

    // Extract values
    let year = i32::from_str(parts[0]).map_err(|_| invalid("invalid year"))?;
    let month = u8::from_str(parts[1]).map_err(|_| invalid("invalid month"))?;
    let day_fraction = f64::from_str(parts[2]).map_err(|_| invalid("invalid frac day"))?;
    if !(1.0..32.0).contains(&day_fraction) {
        return Err(invalid("invalid frac day"));
    }

    // Separation of day and fraction day
    let day = day_fraction.trunc() as u8;
    let hours = (day_fraction - day as f64) * 24.0;
    let hour = hours.trunc() as u8;
    let minutes = (hours - hour as f64) * 60.0;
    let minute = minutes.trunc() as u8;
    let seconds = (minutes - minute as f64) * 60.0;
    let second = seconds.trunc() as u8;
    let nano = ((seconds - second as f64) * 1e9) as u32;

    let epoch =
        Epoch::maybe_from_gregorian(year, month, day, hour, minute, second, nano, TimeScale::TT)
            .map_err(|e| AnomalyError::InvalidDate(e.to_string()))?;

    Ok(epoch_to_jde(epoch))
}
