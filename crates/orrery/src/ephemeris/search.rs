//! Default search engines for the [`Ephemeris`] trait.
//!
//! Every search uses the same coarse-scan + bisection pattern: step a scalar
//! function forward until it changes sign in the wanted direction, then
//! bisect the bracket.
//!
//! - Moon phase: f(t) = normalize_pm180(phase_angle(t) - target), half-day steps.
//! - Rise/set: f(t) = altitude(t) - standard horizon, 10-minute steps.
//! - Eclipses: walk syzygies and classify by the Moon's ecliptic latitude
//!   against mean shadow and disc radii.

use chrono::{DateTime, Duration, Utc};

use super::time::{datetime_to_julian_day, julian_day_to_datetime, shift_instant, J2000_JD};
use super::types::{
    EclipticPosition, GeoLocation, LunarEclipse, LunarEclipseKind, RiseSet, SolarEclipse,
    SolarEclipseKind,
};
use super::Ephemeris;
use crate::error::EphemerisError;
use crate::zodiac::{normalize, normalize_pm180, Planet};

/// The phase angle advances ~12.2 deg/day, so half a day brackets every crossing.
const MOON_STEP_DAYS: f64 = 0.5;

const RISE_SET_STEP_DAYS: f64 = 10.0 / 1440.0;

const CONVERGENCE_DAYS: f64 = 1.0e-6;

const MAX_BISECT_ITER: u32 = 60;

/// Mean obliquity of the ecliptic at J2000.0.
const OBLIQUITY_J2000_DEG: f64 = 23.439_291_1;

/// Syzygies examined per eclipse search (~4 years).
const ECLIPSE_LUNATION_LIMIT: usize = 50;

/// Window for finding the next syzygy; a little over one synodic month.
const SYZYGY_WINDOW_DAYS: f64 = 32.0;

// Lunar eclipse limits on |Moon latitude| at full moon: mean umbral radius
// 0.75 deg, penumbral 1.28 deg, lunar disc 0.26 deg.
const LUNAR_TOTAL_LIMIT_DEG: f64 = 0.49;
const LUNAR_PARTIAL_LIMIT_DEG: f64 = 1.01;
const LUNAR_PENUMBRAL_LIMIT_DEG: f64 = 1.54;

// Solar eclipse limits on |Moon latitude| at new moon (geocentric, with
// the Moon's horizontal parallax).
const SOLAR_CENTRAL_LIMIT_DEG: f64 = 0.95;
const SOLAR_PARTIAL_LIMIT_DEG: f64 = 1.48;

/// Bisect to the zero crossing of `f_at` between `t_a` and `t_b`.
///
/// `f_a` must already hold `f_at(t_a)`; the bracket is assumed to contain a
/// sign change.
pub(crate) fn bisect_zero<F>(
    mut t_a: f64,
    mut f_a: f64,
    mut t_b: f64,
    f_at: &F,
) -> Result<f64, EphemerisError>
where
    F: Fn(f64) -> Result<f64, EphemerisError>,
{
    for _ in 0..MAX_BISECT_ITER {
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f_at(t_mid)?;

        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }

        if (t_b - t_a).abs() < CONVERGENCE_DAYS {
            break;
        }
    }

    Ok(0.5 * (t_a + t_b))
}

/// Rejects the +180 -> -180 jump of a wrapped angle masquerading as a crossing.
fn is_rising_crossing(f_a: f64, f_b: f64) -> bool {
    f_a < 0.0 && f_b >= 0.0 && (f_b - f_a) < 90.0
}

/// Scan `f_at` forward from `jd_start` and return the first bracketed crossing.
fn scan_forward<F, C>(
    jd_start: f64,
    max_days: f64,
    step_days: f64,
    f_at: &F,
    is_crossing: C,
) -> Result<Option<f64>, EphemerisError>
where
    F: Fn(f64) -> Result<f64, EphemerisError>,
    C: Fn(f64, f64) -> bool,
{
    if max_days.is_nan() || max_days <= 0.0 {
        return Ok(None);
    }
    let jd_end = jd_start + max_days;
    let mut t_prev = jd_start;
    let mut f_prev = f_at(t_prev)?;

    while t_prev < jd_end {
        let t_curr = (t_prev + step_days).min(jd_end);
        let f_curr = f_at(t_curr)?;

        if is_crossing(f_prev, f_curr) {
            return bisect_zero(t_prev, f_prev, t_curr, f_at).map(Some);
        }

        t_prev = t_curr;
        f_prev = f_curr;
    }

    Ok(None)
}

pub(crate) fn moon_phase_crossing<E: Ephemeris + ?Sized>(
    eph: &E,
    target_angle: f64,
    from: DateTime<Utc>,
    max_days: f64,
) -> Result<Option<DateTime<Utc>>, EphemerisError> {
    let target = normalize(target_angle);
    let offset_at = |jd: f64| -> Result<f64, EphemerisError> {
        let at = julian_day_to_datetime(jd)?;
        Ok(normalize_pm180(eph.moon_illumination(at)?.phase_angle - target))
    };

    scan_forward(
        datetime_to_julian_day(from),
        max_days,
        MOON_STEP_DAYS,
        &offset_at,
        is_rising_crossing,
    )?
    .map(julian_day_to_datetime)
    .transpose()
}

/// Altitude of the body's center at which it rises or sets, for a sea-level
/// observer (refraction and semi-diameter included; parallax for the Moon).
fn standard_altitude_deg(planet: Planet) -> f64 {
    match planet {
        Planet::Sun => -0.8333,
        Planet::Moon => 0.125,
        _ => -0.5667,
    }
}

/// Dip of the horizon for an elevated observer.
fn horizon_dip_deg(height_m: f64) -> f64 {
    if height_m > 0.0 {
        0.0353 * height_m.sqrt()
    } else {
        0.0
    }
}

/// Apparent altitude of an ecliptic position for `observer` at `jd`.
pub(crate) fn altitude_deg(pos: EclipticPosition, jd: f64, observer: &GeoLocation) -> f64 {
    let eps = OBLIQUITY_J2000_DEG.to_radians();
    let lambda = pos.longitude.to_radians();
    let beta = pos.latitude.to_radians();

    let ra = (lambda.sin() * eps.cos() - beta.tan() * eps.sin()).atan2(lambda.cos());
    let dec = (beta.sin() * eps.cos() + beta.cos() * eps.sin() * lambda.sin())
        .clamp(-1.0, 1.0)
        .asin();

    let gmst_deg = normalize(280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD));
    let hour_angle = (gmst_deg + observer.lon).to_radians() - ra;
    let phi = observer.lat.to_radians();

    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * hour_angle.cos())
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

pub(crate) fn rise_set<E: Ephemeris + ?Sized>(
    eph: &E,
    planet: Planet,
    observer: &GeoLocation,
    direction: RiseSet,
    from: DateTime<Utc>,
    max_days: f64,
) -> Result<Option<DateTime<Utc>>, EphemerisError> {
    let horizon = standard_altitude_deg(planet) - horizon_dip_deg(observer.height);
    let above_horizon = |jd: f64| -> Result<f64, EphemerisError> {
        let at = julian_day_to_datetime(jd)?;
        let pos = eph.ecliptic_position(planet, at)?;
        Ok(altitude_deg(pos, jd, observer) - horizon)
    };

    let found = match direction {
        RiseSet::Rise => scan_forward(
            datetime_to_julian_day(from),
            max_days,
            RISE_SET_STEP_DAYS,
            &above_horizon,
            |a, b| a < 0.0 && b >= 0.0,
        )?,
        RiseSet::Set => scan_forward(
            datetime_to_julian_day(from),
            max_days,
            RISE_SET_STEP_DAYS,
            &above_horizon,
            |a, b| a > 0.0 && b <= 0.0,
        )?,
    };

    found.map(julian_day_to_datetime).transpose()
}

pub(crate) fn classify_lunar(moon_latitude_deg: f64) -> Option<LunarEclipseKind> {
    let beta = moon_latitude_deg.abs();
    if beta <= LUNAR_TOTAL_LIMIT_DEG {
        Some(LunarEclipseKind::Total)
    } else if beta < LUNAR_PARTIAL_LIMIT_DEG {
        Some(LunarEclipseKind::Partial)
    } else if beta < LUNAR_PENUMBRAL_LIMIT_DEG {
        Some(LunarEclipseKind::Penumbral)
    } else {
        None
    }
}

pub(crate) fn classify_solar(moon_latitude_deg: f64) -> Option<SolarEclipseKind> {
    let beta = moon_latitude_deg.abs();
    if beta < SOLAR_CENTRAL_LIMIT_DEG {
        Some(SolarEclipseKind::Central)
    } else if beta < SOLAR_PARTIAL_LIMIT_DEG {
        Some(SolarEclipseKind::Partial)
    } else {
        None
    }
}

/// Walk the syzygies at `phase_angle` and return the first that classifies.
fn next_syzygy_eclipse<E, K, C>(
    eph: &E,
    phase_angle: f64,
    from: DateTime<Utc>,
    classify: C,
) -> Result<Option<(DateTime<Utc>, K)>, EphemerisError>
where
    E: Ephemeris + ?Sized,
    C: Fn(f64) -> Option<K>,
{
    let mut cursor = from;

    for _ in 0..ECLIPSE_LUNATION_LIMIT {
        let Some(syzygy) = eph.search_moon_phase(phase_angle, cursor, SYZYGY_WINDOW_DAYS)? else {
            return Ok(None);
        };

        let moon = eph.ecliptic_position(Planet::Moon, syzygy)?;
        if let Some(kind) = classify(moon.latitude) {
            return Ok(Some((syzygy, kind)));
        }

        // Advance past this syzygy
        cursor = shift_instant(syzygy, Duration::days(1))?;
    }

    Ok(None)
}

pub(crate) fn next_lunar_eclipse<E: Ephemeris + ?Sized>(
    eph: &E,
    from: DateTime<Utc>,
) -> Result<Option<LunarEclipse>, EphemerisError> {
    Ok(next_syzygy_eclipse(eph, 180.0, from, classify_lunar)?
        .map(|(peak, kind)| LunarEclipse { peak, kind }))
}

pub(crate) fn next_solar_eclipse<E: Ephemeris + ?Sized>(
    eph: &E,
    from: DateTime<Utc>,
) -> Result<Option<SolarEclipse>, EphemerisError> {
    Ok(next_syzygy_eclipse(eph, 0.0, from, classify_solar)?
        .map(|(peak, kind)| SolarEclipse { peak, kind }))
}
