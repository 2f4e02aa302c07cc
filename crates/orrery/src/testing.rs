//! Deterministic ephemeris for unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::ephemeris::time::days_between;
use crate::ephemeris::{EclipticPosition, Ephemeris, EphemerisError};
use crate::zodiac::{normalize, Planet};

#[derive(Debug, Clone, Copy)]
struct Track {
    lon0: f64,
    rate: f64,
    lat: f64,
}

/// Every body moves at a constant rate (degrees/day) from its epoch longitude.
#[derive(Debug, Clone)]
pub(crate) struct LinearEphemeris {
    tracks: [Track; 10],
}

impl LinearEphemeris {
    /// Bodies spread 30 degrees apart, all direct.
    pub(crate) fn new() -> Self {
        let mut tracks = [Track {
            lon0: 0.0,
            rate: 0.01,
            lat: 0.0,
        }; 10];
        for (i, track) in tracks.iter_mut().enumerate() {
            track.lon0 = 15.0 + 30.0 * i as f64;
        }
        tracks[0].rate = 0.985_6;
        tracks[1].rate = 13.176;
        tracks[1].lat = 3.0;
        Self { tracks }
    }

    pub(crate) fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    pub(crate) fn with(mut self, planet: Planet, lon0: f64, rate: f64) -> Self {
        let track = &mut self.tracks[planet as usize];
        track.lon0 = lon0;
        track.rate = rate;
        self
    }

    pub(crate) fn with_latitude(mut self, planet: Planet, lat: f64) -> Self {
        self.tracks[planet as usize].lat = lat;
        self
    }
}

impl Ephemeris for LinearEphemeris {
    fn ecliptic_position(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError> {
        let track = self.tracks[planet as usize];
        let days = days_between(Self::epoch(), at);
        Ok(EclipticPosition {
            longitude: normalize(track.lon0 + track.rate * days),
            latitude: track.lat,
        })
    }
}
