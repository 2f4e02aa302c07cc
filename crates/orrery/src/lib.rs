//! Astrological computation engine.
//!
//! Turns geocentric ephemeris data into zodiac positions, moon phases,
//! transit aspects, daily and monthly event summaries, planetary hours,
//! retrograde windows and a yearly timeline. Every operation hangs off an
//! [`Engine`] built over some [`Ephemeris`] backend.

pub mod aspects;
pub mod daily;
pub mod engine;
pub mod ephemeris;
pub mod error;
pub mod hours;
pub mod month;
pub mod moon;
pub mod positions;
pub mod provenance;
pub mod retrograde;
pub mod timeline;
pub mod zodiac;

#[cfg(test)]
mod testing;

pub use aspects::{compute_aspects, AspectCalculator, AspectType, TransitAspect};
pub use daily::DailyTransitSummary;
pub use engine::{Engine, EngineSettings};
pub use ephemeris::{
    Ephemeris, GeoLocation, MeanElementsEphemeris, SwissEphemerisAdapter,
};
pub use error::{AstroError, AstroResult, EphemerisError};
pub use hours::{PlanetaryHour, PlanetaryHours};
pub use month::{MonthEvent, MonthEventType};
pub use moon::{MoonPhase, MoonPhaseInfo};
pub use positions::PlanetPosition;
pub use provenance::{Provenance, SearchedInstant};
pub use retrograde::{RetrogradeData, RetrogradeInfo};
pub use timeline::{YearEvent, YearEventType};
pub use zodiac::{Planet, ZodiacSign};
