#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use orrery::ephemeris::time::days_between;
use orrery::ephemeris::{EclipticPosition, Ephemeris, EphemerisError};
use orrery::zodiac::normalize;
use orrery::Planet;
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Longitude as a function of days since the epoch.
#[derive(Debug, Clone, Copy)]
pub enum Motion {
    Fixed(f64),
    Linear { lon0: f64, rate: f64 },
    /// Mean motion plus a sinusoidal loop; retrograde whenever
    /// `amplitude * TAU / period` exceeds `rate` near the trough.
    Looping {
        lon0: f64,
        rate: f64,
        amplitude: f64,
        period: f64,
    },
}

impl Motion {
    fn longitude(self, days: f64) -> f64 {
        match self {
            Motion::Fixed(lon) => lon,
            Motion::Linear { lon0, rate } => lon0 + rate * days,
            Motion::Looping {
                lon0,
                rate,
                amplitude,
                period,
            } => lon0 + rate * days + amplitude * (TAU * days / period).sin(),
        }
    }
}

/// Ephemeris whose bodies follow hand-written motions.
pub struct ScriptedEphemeris {
    epoch: DateTime<Utc>,
    motions: HashMap<Planet, Motion>,
    moon_latitude: f64,
}

impl ScriptedEphemeris {
    /// Every body direct and slow, Sun and Moon at realistic rates.
    pub fn new() -> Self {
        let mut motions = HashMap::new();
        for (i, planet) in Planet::ALL.iter().enumerate() {
            motions.insert(
                *planet,
                Motion::Linear {
                    lon0: 15.0 + 30.0 * i as f64,
                    rate: 0.02,
                },
            );
        }
        motions.insert(Planet::Sun, Motion::Linear { lon0: 280.0, rate: 0.985_6 });
        motions.insert(Planet::Moon, Motion::Linear { lon0: 100.0, rate: 13.176 });
        Self {
            epoch: epoch(),
            motions,
            moon_latitude: 4.0,
        }
    }

    pub fn with(mut self, planet: Planet, motion: Motion) -> Self {
        self.motions.insert(planet, motion);
        self
    }

    pub fn with_moon_latitude(mut self, latitude: f64) -> Self {
        self.moon_latitude = latitude;
        self
    }
}

impl Ephemeris for ScriptedEphemeris {
    fn ecliptic_position(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError> {
        let motion = self
            .motions
            .get(&planet)
            .copied()
            .unwrap_or(Motion::Fixed(0.0));
        let latitude = if planet == Planet::Moon {
            self.moon_latitude
        } else {
            0.0
        };
        Ok(EclipticPosition {
            longitude: normalize(motion.longitude(days_between(self.epoch, at))),
            latitude,
        })
    }
}

/// Provider that always fails.
pub struct BrokenEphemeris;

impl Ephemeris for BrokenEphemeris {
    fn ecliptic_position(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError> {
        Err(EphemerisError::CalculationFailed {
            planet,
            datetime: at,
            message: "offline".to_string(),
        })
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Mercury looping roughly every 116 days, retrograde about two weeks each time.
pub fn looping_mercury() -> Motion {
    Motion::Looping {
        lon0: 300.0,
        rate: 1.0,
        amplitude: 20.0,
        period: 116.0,
    }
}
