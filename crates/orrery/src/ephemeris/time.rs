//! UTC instant <-> Julian Day conversion.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::error::EphemerisError;

/// Julian Day of J2000.0 (2000-01-01 12:00 TT, treated as UT here).
pub const J2000_JD: f64 = 2_451_545.0;

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Convert UTC datetime to Julian Day
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Convert Julian Day to UTC datetime, rounded to the millisecond
pub fn julian_day_to_datetime(jd: f64) -> Result<DateTime<Utc>, EphemerisError> {
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 / 2.0 {
        return Err(EphemerisError::OutOfRange { jd });
    }
    Utc.timestamp_millis_opt(millis as i64)
        .single()
        .ok_or(EphemerisError::OutOfRange { jd })
}

/// `at + delta`, or `OutOfRange` when the result leaves the representable range.
pub fn shift_instant(at: DateTime<Utc>, delta: Duration) -> Result<DateTime<Utc>, EphemerisError> {
    at.checked_add_signed(delta).ok_or_else(|| EphemerisError::OutOfRange {
        jd: datetime_to_julian_day(at) + delta.num_milliseconds() as f64 / MILLIS_PER_DAY,
    })
}

/// Fractional days from `from` to `to`.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}
