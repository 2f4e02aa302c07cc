//! Moon phase resolver.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::Engine;
use crate::ephemeris::time::{days_between, shift_instant};
use crate::ephemeris::Ephemeris;
use crate::error::AstroResult;
use crate::provenance::SearchedInstant;
use crate::zodiac::{normalize, round1, split_sign_position, ZodiacSign};

/// Forward window for the next full/new moon search.
pub const PHASE_SEARCH_WINDOW_DAYS: f64 = 30.0;
/// Substituted distance when a phase search comes back empty.
pub const PHASE_ESTIMATE_DAYS: i64 = 15;

pub const FULL_MOON_ANGLE: f64 = 180.0;
pub const NEW_MOON_ANGLE: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl MoonPhase {
    /// Bucket a phase angle. Quarter and syzygy buckets are 22.5 degrees
    /// wide and centered on their exact angle; the crescent and gibbous
    /// buckets fill the 67.5 degree gaps between them.
    pub fn from_angle(phase_angle: f64) -> Self {
        let angle = normalize(phase_angle);
        if angle < 11.25 || angle >= 348.75 {
            MoonPhase::NewMoon
        } else if angle < 78.75 {
            MoonPhase::WaxingCrescent
        } else if angle < 101.25 {
            MoonPhase::FirstQuarter
        } else if angle < 168.75 {
            MoonPhase::WaxingGibbous
        } else if angle < 191.25 {
            MoonPhase::FullMoon
        } else if angle < 258.75 {
            MoonPhase::WaningGibbous
        } else if angle < 281.25 {
            MoonPhase::LastQuarter
        } else {
            MoonPhase::WaningCrescent
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::FullMoon => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhaseInfo {
    pub phase_name: MoonPhase,
    /// Illuminated fraction (0-1)
    pub illumination: f64,
    /// Moon minus Sun longitude (0-360)
    pub phase_angle: f64,
    pub moon_sign: ZodiacSign,
    pub moon_sign_degree: u32,
    pub days_until_full_moon: f64,
    pub days_until_new_moon: f64,
    pub next_full_moon: SearchedInstant,
    pub next_new_moon: SearchedInstant,
    pub emoji: String,
}

impl<E: Ephemeris> Engine<E> {
    pub fn resolve_moon_phase(&self, at: DateTime<Utc>) -> AstroResult<MoonPhaseInfo> {
        let illumination = self.ephemeris().moon_illumination(at)?;
        let moon_longitude = self.ephemeris().moon_ecliptic_longitude(at)?;
        let phase = MoonPhase::from_angle(illumination.phase_angle);
        let (moon_sign_degree, _) = split_sign_position(moon_longitude);

        let next_full_moon = self.next_lunation(FULL_MOON_ANGLE, at)?;
        let next_new_moon = self.next_lunation(NEW_MOON_ANGLE, at)?;

        Ok(MoonPhaseInfo {
            phase_name: phase,
            illumination: illumination.fraction,
            phase_angle: illumination.phase_angle,
            moon_sign: ZodiacSign::from_longitude(moon_longitude),
            moon_sign_degree,
            days_until_full_moon: round1(days_between(at, next_full_moon.at)),
            days_until_new_moon: round1(days_between(at, next_new_moon.at)),
            next_full_moon,
            next_new_moon,
            emoji: phase.emoji().to_string(),
        })
    }

    /// Next crossing of `target_angle`, or `from + 15 days` marked estimated.
    pub fn next_lunation(&self, target_angle: f64, from: DateTime<Utc>) -> AstroResult<SearchedInstant> {
        let found =
            self.ephemeris()
                .search_moon_phase(target_angle, from, PHASE_SEARCH_WINDOW_DAYS)?;
        Ok(match found {
            Some(at) => SearchedInstant::searched(at),
            None => {
                log::warn!(
                    "No {:.0}° phase crossing within {} days of {}; estimating",
                    target_angle,
                    PHASE_SEARCH_WINDOW_DAYS,
                    from
                );
                SearchedInstant::estimated(shift_instant(from, Duration::days(PHASE_ESTIMATE_DAYS))?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provenance::Provenance;
    use crate::testing::LinearEphemeris;
    use crate::zodiac::Planet;

    #[test]
    fn test_phase_buckets() {
        assert_eq!(MoonPhase::from_angle(0.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::from_angle(360.0), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::from_angle(348.75), MoonPhase::NewMoon);
        assert_eq!(MoonPhase::from_angle(11.25), MoonPhase::WaxingCrescent);
        assert_eq!(MoonPhase::from_angle(90.0), MoonPhase::FirstQuarter);
        assert_eq!(MoonPhase::from_angle(179.0), MoonPhase::FullMoon);
        assert_eq!(MoonPhase::from_angle(191.25), MoonPhase::WaningGibbous);
        assert_eq!(MoonPhase::from_angle(270.0), MoonPhase::LastQuarter);
        assert_eq!(MoonPhase::from_angle(300.0), MoonPhase::WaningCrescent);
    }

    #[test]
    fn test_every_angle_lands_in_a_bucket_matching_its_name() {
        for tenth in 0..3600 {
            let phase = MoonPhase::from_angle(tenth as f64 / 10.0);
            assert!(!phase.name().is_empty());
        }
    }

    #[test]
    fn test_resolve_finds_next_full_and_new() {
        // Sun fixed at 0, Moon at 170 moving 12 deg/day.
        let eph = LinearEphemeris::new()
            .with(Planet::Sun, 0.0, 0.0)
            .with(Planet::Moon, 170.0, 12.0);
        let engine = Engine::new(eph);
        let info = engine.resolve_moon_phase(LinearEphemeris::epoch()).unwrap();

        assert_eq!(info.phase_name, MoonPhase::FullMoon);
        assert_eq!(info.emoji, "🌕");
        assert_eq!(info.moon_sign, ZodiacSign::Virgo);
        assert_eq!(info.moon_sign_degree, 20);
        assert_eq!(info.next_full_moon.provenance, Provenance::Searched);
        assert!((info.days_until_full_moon - 0.8).abs() < 1e-9);
        assert!((info.days_until_new_moon - 15.8).abs() < 1e-9);
        assert!(info.illumination > 0.99);
    }

    #[test]
    fn test_stalled_moon_falls_back_to_estimate() {
        let eph = LinearEphemeris::new()
            .with(Planet::Sun, 0.0, 0.0)
            .with(Planet::Moon, 90.0, 0.0);
        let engine = Engine::new(eph);
        let at = LinearEphemeris::epoch();
        let info = engine.resolve_moon_phase(at).unwrap();

        assert!(info.next_full_moon.is_estimated());
        assert!(info.next_new_moon.is_estimated());
        assert_eq!(info.next_full_moon.at, at + Duration::days(15));
        assert_eq!(info.days_until_new_moon, 15.0);
    }

    #[test]
    fn test_phase_name_serializes_as_display_name() {
        let json = serde_json::to_string(&MoonPhase::WaxingGibbous).unwrap();
        assert_eq!(json, "\"Waxing Gibbous\"");
    }
}
