//! Ephemeris provider seam.
//!
//! Backends only have to report a geocentric ecliptic position per body;
//! moon illumination, phase crossings, rise/set and eclipse searches have
//! default implementations built on that primitive (see [`search`]).

pub mod adapter;
pub mod mean;
pub mod search;
pub mod time;
pub mod types;

use chrono::{DateTime, Utc};
use std::sync::Arc;

pub use crate::error::EphemerisError;
pub use adapter::SwissEphemerisAdapter;
pub use mean::MeanElementsEphemeris;
pub use types::{
    EclipticPosition, GeoLocation, Illumination, LunarEclipse, LunarEclipseKind, RiseSet,
    SolarEclipse, SolarEclipseKind,
};

use crate::zodiac::{normalize, Planet};

/// Read-only source of geocentric positions for the engine.
pub trait Ephemeris: Send + Sync {
    /// Geocentric ecliptic longitude/latitude of `planet` at `at`.
    fn ecliptic_position(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError>;

    /// Geocentric ecliptic longitude in [0, 360).
    fn ecliptic_longitude(&self, planet: Planet, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        Ok(normalize(self.ecliptic_position(planet, at)?.longitude))
    }

    fn moon_ecliptic_longitude(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
        self.ecliptic_longitude(Planet::Moon, at)
    }

    fn moon_illumination(&self, at: DateTime<Utc>) -> Result<Illumination, EphemerisError> {
        let sun = self.ecliptic_longitude(Planet::Sun, at)?;
        let moon = self.moon_ecliptic_longitude(at)?;
        Ok(Illumination::from_phase_angle(normalize(moon - sun)))
    }

    /// First instant after `from` (within `max_days`) at which the phase
    /// angle crosses `target_angle` going forward.
    fn search_moon_phase(
        &self,
        target_angle: f64,
        from: DateTime<Utc>,
        max_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        search::moon_phase_crossing(self, target_angle, from, max_days)
    }

    fn search_rise_set(
        &self,
        planet: Planet,
        observer: &GeoLocation,
        direction: RiseSet,
        from: DateTime<Utc>,
        max_days: f64,
    ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
        search::rise_set(self, planet, observer, direction, from, max_days)
    }

    fn search_lunar_eclipse(
        &self,
        from: DateTime<Utc>,
    ) -> Result<Option<LunarEclipse>, EphemerisError> {
        search::next_lunar_eclipse(self, from)
    }

    fn search_solar_eclipse(
        &self,
        from: DateTime<Utc>,
    ) -> Result<Option<SolarEclipse>, EphemerisError> {
        search::next_solar_eclipse(self, from)
    }
}

macro_rules! forward_ephemeris {
    ($wrapper:ty) => {
        impl<E: Ephemeris + ?Sized> Ephemeris for $wrapper {
            fn ecliptic_position(
                &self,
                planet: Planet,
                at: DateTime<Utc>,
            ) -> Result<EclipticPosition, EphemerisError> {
                (**self).ecliptic_position(planet, at)
            }

            fn ecliptic_longitude(
                &self,
                planet: Planet,
                at: DateTime<Utc>,
            ) -> Result<f64, EphemerisError> {
                (**self).ecliptic_longitude(planet, at)
            }

            fn moon_ecliptic_longitude(&self, at: DateTime<Utc>) -> Result<f64, EphemerisError> {
                (**self).moon_ecliptic_longitude(at)
            }

            fn moon_illumination(&self, at: DateTime<Utc>) -> Result<Illumination, EphemerisError> {
                (**self).moon_illumination(at)
            }

            fn search_moon_phase(
                &self,
                target_angle: f64,
                from: DateTime<Utc>,
                max_days: f64,
            ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
                (**self).search_moon_phase(target_angle, from, max_days)
            }

            fn search_rise_set(
                &self,
                planet: Planet,
                observer: &GeoLocation,
                direction: RiseSet,
                from: DateTime<Utc>,
                max_days: f64,
            ) -> Result<Option<DateTime<Utc>>, EphemerisError> {
                (**self).search_rise_set(planet, observer, direction, from, max_days)
            }

            fn search_lunar_eclipse(
                &self,
                from: DateTime<Utc>,
            ) -> Result<Option<LunarEclipse>, EphemerisError> {
                (**self).search_lunar_eclipse(from)
            }

            fn search_solar_eclipse(
                &self,
                from: DateTime<Utc>,
            ) -> Result<Option<SolarEclipse>, EphemerisError> {
                (**self).search_solar_eclipse(from)
            }
        }
    };
}

forward_ephemeris!(&E);
forward_ephemeris!(Box<E>);
forward_ephemeris!(Arc<E>);
