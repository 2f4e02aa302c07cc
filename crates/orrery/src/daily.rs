//! Daily summary composer: one day's positions, moon, aspects and a
//! heuristic energy score with a short narrative.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aspects::{compute_aspects, AspectNature, TransitAspect};
use crate::engine::Engine;
use crate::ephemeris::Ephemeris;
use crate::error::AstroResult;
use crate::moon::{MoonPhase, MoonPhaseInfo};
use crate::positions::PlanetPosition;
use crate::zodiac::ZodiacSign;

pub const MAX_MAJOR_ASPECTS: usize = 8;

const BASELINE_ENERGY: i32 = 7;
const HEAVY_RETROGRADE_ENERGY: i32 = 4;
const LIGHT_RETROGRADE_ENERGY: i32 = 6;
const HEAVY_RETROGRADE_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTransitSummary {
    pub date: NaiveDate,
    pub planets: Vec<PlanetPosition>,
    pub moon_phase: MoonPhaseInfo,
    /// Tightest aspects to the natal set, at most eight
    pub major_aspects: Vec<TransitAspect>,
    pub cosmic_weather: String,
    /// 1-10
    pub energy_level: u8,
}

fn moon_sign_mood(sign: ZodiacSign) -> &'static str {
    match sign {
        ZodiacSign::Aries => "a restless urge to get moving",
        ZodiacSign::Taurus => "a steady wish for comfort and simple pleasures",
        ZodiacSign::Gemini => "curiosity and a taste for conversation",
        ZodiacSign::Cancer => "tenderness and a pull toward home",
        ZodiacSign::Leo => "warmth and a desire to be seen",
        ZodiacSign::Virgo => "a practical eye for detail",
        ZodiacSign::Libra => "a longing for harmony and good company",
        ZodiacSign::Scorpio => "emotional depth and intensity",
        ZodiacSign::Sagittarius => "optimism and a hunger for adventure",
        ZodiacSign::Capricorn => "focus and quiet ambition",
        ZodiacSign::Aquarius => "independent thinking and new ideas",
        ZodiacSign::Pisces => "dreamy intuition and compassion",
    }
}

fn join_names(planets: &[&PlanetPosition]) -> String {
    let names: Vec<&str> = planets.iter().map(|p| p.planet.name()).collect();
    names.join(" and ")
}

/// Narrative and energy score from the day's ingredients.
pub fn cosmic_weather(
    planets: &[PlanetPosition],
    moon: &MoonPhaseInfo,
    aspects: &[TransitAspect],
) -> (String, u8) {
    let mut energy = BASELINE_ENERGY;
    let mut clauses: Vec<String> = Vec::new();

    let retrograde: Vec<&PlanetPosition> = planets
        .iter()
        .filter(|p| p.retrograde && !p.planet.is_luminary())
        .collect();
    if retrograde.len() >= HEAVY_RETROGRADE_COUNT {
        clauses.push(format!(
            "With {} planets retrograde, high retrograde energy favors review over new starts.",
            retrograde.len()
        ));
        energy = HEAVY_RETROGRADE_ENERGY;
    } else if !retrograde.is_empty() {
        clauses.push(format!(
            "{} retrograde invites you to slow down and revisit unfinished business.",
            join_names(&retrograde)
        ));
        energy = LIGHT_RETROGRADE_ENERGY;
    }

    match moon.phase_name {
        MoonPhase::FullMoon => {
            energy += 2;
            clauses.push(format!(
                "The Full Moon in {}: illumination peaks and hidden feelings surface.",
                moon.moon_sign
            ));
        }
        MoonPhase::NewMoon => {
            energy -= 1;
            clauses.push(format!(
                "The New Moon in {} is a quiet moment to set intentions.",
                moon.moon_sign
            ));
        }
        _ => {}
    }

    let harmonious = aspects
        .iter()
        .filter(|a| a.nature() == AspectNature::Harmonious)
        .count();
    let challenging = aspects
        .iter()
        .filter(|a| a.nature() == AspectNature::Challenging)
        .count();
    if harmonious > challenging {
        energy += 1;
        clauses.push("Supportive transits to your chart smooth the way.".to_string());
    } else if challenging > harmonious {
        energy -= 1;
        clauses.push("Tense transits to your chart call for patience.".to_string());
    }

    let text = if clauses.is_empty() {
        format!(
            "The Moon in {} colors the day with {}.",
            moon.moon_sign,
            moon_sign_mood(moon.moon_sign)
        )
    } else {
        clauses.join(" ")
    };

    (text, energy.clamp(1, 10) as u8)
}

impl<E: Ephemeris> Engine<E> {
    /// Snapshot for the local day containing `at`.
    pub fn compose_daily_summary(
        &self,
        at: DateTime<Utc>,
        natal: Option<&[PlanetPosition]>,
    ) -> AstroResult<DailyTransitSummary> {
        let planets = self.resolve_positions(at)?;
        let moon_phase = self.resolve_moon_phase(at)?;

        let mut major_aspects = match natal {
            Some(natal) => compute_aspects(&planets, natal),
            None => Vec::new(),
        };
        major_aspects.truncate(MAX_MAJOR_ASPECTS);

        let (cosmic_weather, energy_level) = cosmic_weather(&planets, &moon_phase, &major_aspects);
        log::debug!("Daily summary for {}: energy {}", at, energy_level);

        Ok(DailyTransitSummary {
            date: self.local_date(at),
            planets,
            moon_phase,
            major_aspects,
            cosmic_weather,
            energy_level,
        })
    }
}
