//! Position resolver: longitude -> sign/degree/minute plus retrograde flag.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::ephemeris::time::shift_instant;
use crate::ephemeris::Ephemeris;
use crate::error::AstroResult;
use crate::zodiac::{normalize, signed_delta, split_sign_position, Planet, ZodiacSign};

/// Retrograde detection compares against the longitude this far ahead.
pub const RETROGRADE_SAMPLE_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    #[serde(rename = "name")]
    pub planet: Planet,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    pub sign: ZodiacSign,
    /// Whole degrees within the sign (0-29)
    pub sign_degree: u32,
    /// Whole arc minutes within the degree (0-59)
    pub sign_minute: u32,
    pub retrograde: bool,
    pub symbol: String,
}

impl PlanetPosition {
    /// Build a position from a raw longitude. Luminaries are never retrograde.
    pub fn from_longitude(planet: Planet, longitude: f64, retrograde: bool) -> Self {
        let longitude = normalize(longitude);
        let (sign_degree, sign_minute) = split_sign_position(longitude);
        Self {
            planet,
            longitude,
            sign: ZodiacSign::from_longitude(longitude),
            sign_degree,
            sign_minute,
            retrograde: retrograde && !planet.is_luminary(),
            symbol: planet.symbol().to_string(),
        }
    }

    /// "12°34′ Leo"
    pub fn formatted(&self) -> String {
        format!("{}°{:02}′ {}", self.sign_degree, self.sign_minute, self.sign)
    }
}

/// Natal sets arrive as bare longitudes; they carry no motion information.
pub fn natal_positions<I>(longitudes: I) -> Vec<PlanetPosition>
where
    I: IntoIterator<Item = (Planet, f64)>,
{
    longitudes
        .into_iter()
        .map(|(planet, lon)| PlanetPosition::from_longitude(planet, lon, false))
        .collect()
}

/// Motion from `now` to `later` is backwards along the ecliptic.
pub fn motion_is_retrograde(lon_now: f64, lon_later: f64) -> bool {
    signed_delta(lon_now, lon_later) < 0.0
}

impl<E: Ephemeris> Engine<E> {
    /// Positions of all ten bodies, Sun through Pluto.
    pub fn resolve_positions(&self, at: DateTime<Utc>) -> AstroResult<Vec<PlanetPosition>> {
        Planet::ALL
            .iter()
            .map(|planet| self.resolve_position(*planet, at))
            .collect()
    }

    pub fn resolve_position(&self, planet: Planet, at: DateTime<Utc>) -> AstroResult<PlanetPosition> {
        let longitude = self.ephemeris().ecliptic_longitude(planet, at)?;
        let retrograde = if planet.is_luminary() {
            false
        } else {
            self.retrograde_from(planet, longitude, at)?
        };
        Ok(PlanetPosition::from_longitude(planet, longitude, retrograde))
    }

    pub fn is_retrograde(&self, planet: Planet, at: DateTime<Utc>) -> AstroResult<bool> {
        if planet.is_luminary() {
            return Ok(false);
        }
        let longitude = self.ephemeris().ecliptic_longitude(planet, at)?;
        self.retrograde_from(planet, longitude, at)
    }

    fn retrograde_from(&self, planet: Planet, longitude: f64, at: DateTime<Utc>) -> AstroResult<bool> {
        let later = shift_instant(at, Duration::hours(RETROGRADE_SAMPLE_HOURS))?;
        let later = self.ephemeris().ecliptic_longitude(planet, later)?;
        Ok(motion_is_retrograde(longitude, later))
    }
}
