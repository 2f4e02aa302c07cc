//! Low-precision built-in ephemeris from mean orbital elements.
//!
//! Planets move on circular, coplanar heliocentric orbits at their J2000
//! mean longitude rates; the geocentric longitude is the direction from the
//! Earth to the planet, so retrograde loops appear naturally near
//! opposition/inferior conjunction. The Sun carries its equation of center
//! and the Moon its largest periodic terms (equation of center, evection,
//! variation) plus latitude from the argument of latitude.
//!
//! Longitudes are good to a degree or two for the inner bodies and worse
//! for Pluto. Enough for tests, benches and offline use; use
//! [`SwissEphemerisAdapter`](super::SwissEphemerisAdapter) for real work.

use chrono::{DateTime, Utc};

use super::time::{datetime_to_julian_day, J2000_JD};
use super::types::EclipticPosition;
use super::Ephemeris;
use crate::error::EphemerisError;
use crate::zodiac::{normalize, Planet};

struct MeanOrbit {
    /// Mean longitude at J2000.0, degrees
    l0: f64,
    /// Mean motion, degrees per day
    rate: f64,
    /// Semi-major axis, AU
    a: f64,
}

fn orbit(planet: Planet) -> Option<MeanOrbit> {
    let (l0, rate, a) = match planet {
        Planet::Mercury => (252.250_906, 4.092_334_45, 0.387_098),
        Planet::Venus => (181.979_801, 1.602_130_34, 0.723_330),
        Planet::Mars => (355.433_275, 0.524_033_04, 1.523_679),
        Planet::Jupiter => (34.351_484, 0.083_091_54, 5.202_603),
        Planet::Saturn => (50.077_471, 0.033_459_71, 9.554_909),
        Planet::Uranus => (314.055_005, 0.011_730_86, 19.218_446),
        Planet::Neptune => (304.348_665, 0.005_981_82, 30.110_387),
        Planet::Pluto => (238.929_038, 0.003_975_57, 39.482_117),
        Planet::Sun | Planet::Moon => return None,
    };
    Some(MeanOrbit { l0, rate, a })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MeanElementsEphemeris;

impl MeanElementsEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn sun_longitude(days: f64) -> f64 {
        let mean_anomaly = (357.529_11 + 0.985_600_28 * days).to_radians();
        normalize(
            280.466_46
                + 0.985_647_36 * days
                + 1.914_6 * mean_anomaly.sin()
                + 0.019_99 * (2.0 * mean_anomaly).sin(),
        )
    }

    fn moon_position(days: f64) -> EclipticPosition {
        let mean_longitude = 218.316_4 + 13.176_396_5 * days;
        let anomaly = (134.963_4 + 13.064_993_0 * days).to_radians();
        let elongation = (297.850_2 + 12.190_749_1 * days).to_radians();
        let latitude_arg = (93.272_1 + 13.229_350_2 * days).to_radians();

        let longitude = mean_longitude
            + 6.289 * anomaly.sin()
            + 1.274 * (2.0 * elongation - anomaly).sin()
            + 0.658 * (2.0 * elongation).sin();

        EclipticPosition {
            longitude: normalize(longitude),
            latitude: 5.128 * latitude_arg.sin(),
        }
    }

    fn planet_position(orbit: &MeanOrbit, days: f64) -> EclipticPosition {
        let earth = (Self::sun_longitude(days) + 180.0).to_radians();
        let helio = (orbit.l0 + orbit.rate * days).to_radians();

        let dx = orbit.a * helio.cos() - earth.cos();
        let dy = orbit.a * helio.sin() - earth.sin();

        EclipticPosition {
            longitude: normalize(dy.atan2(dx).to_degrees()),
            latitude: 0.0,
        }
    }
}

impl Ephemeris for MeanElementsEphemeris {
    fn ecliptic_position(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError> {
        let days = datetime_to_julian_day(at) - J2000_JD;

        Ok(match planet {
            Planet::Sun => EclipticPosition {
                longitude: Self::sun_longitude(days),
                latitude: 0.0,
            },
            Planet::Moon => Self::moon_position(days),
            other => match orbit(other) {
                Some(orbit) => Self::planet_position(&orbit, days),
                None => {
                    return Err(EphemerisError::CalculationFailed {
                        planet,
                        datetime: at,
                        message: "no mean orbit for body".to_string(),
                    })
                }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::signed_delta;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_sun_near_aries_point_at_march_equinox() {
        let eph = MeanElementsEphemeris::new();
        let equinox = Utc.with_ymd_and_hms(2026, 3, 20, 14, 46, 0).unwrap();
        let lon = eph.ecliptic_longitude(Planet::Sun, equinox).unwrap();
        assert!(lon < 1.0 || lon > 359.0, "sun longitude {}", lon);
    }

    #[test]
    fn test_every_planet_has_a_position() {
        let eph = MeanElementsEphemeris::new();
        let at = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        for planet in Planet::ALL {
            let pos = eph.ecliptic_position(planet, at).unwrap();
            assert!((0.0..360.0).contains(&pos.longitude));
        }
    }

    #[test]
    fn test_mercury_goes_retrograde_within_a_synodic_period() {
        let eph = MeanElementsEphemeris::new();
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let mut retro_days = 0;
        for day in 0..120 {
            let at = start + Duration::days(day);
            let now = eph.ecliptic_longitude(Planet::Mercury, at).unwrap();
            let next = eph
                .ecliptic_longitude(Planet::Mercury, at + Duration::days(1))
                .unwrap();
            if signed_delta(now, next) < 0.0 {
                retro_days += 1;
            }
        }
        assert!(retro_days > 10 && retro_days < 40, "{} retrograde days", retro_days);
    }

    #[test]
    fn test_moon_latitude_bounded() {
        let eph = MeanElementsEphemeris::new();
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        for day in 0..60 {
            let pos = eph
                .ecliptic_position(Planet::Moon, start + Duration::days(day))
                .unwrap();
            assert!(pos.latitude.abs() <= 5.2);
        }
    }
}
