//! Year timeline: retrograde periods, eclipses, outer-planet transits to a
//! natal chart and the best month for love, career and creativity, merged
//! into one date-ordered list.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aspects::{compute_aspects, AspectType};
use crate::engine::Engine;
use crate::ephemeris::time::shift_instant;
use crate::ephemeris::{Ephemeris, LunarEclipseKind, SolarEclipseKind};
use crate::error::{AstroError, AstroResult};
use crate::month::month_bounds;
use crate::positions::PlanetPosition;
use crate::zodiac::{Element, Planet, ZodiacSign};

/// Planets whose retrograde periods appear on the timeline
pub const TIMELINE_RETROGRADE_PLANETS: [Planet; 2] = [Planet::Mercury, Planet::Venus];
/// Slow movers checked against the natal chart each month
pub const TRANSITING_OUTER_PLANETS: [Planet; 2] = [Planet::Jupiter, Planet::Saturn];
pub const MAX_TRANSIT_ORB: f64 = 2.5;
/// Searches per eclipse kind per year
pub const MAX_ECLIPSE_SEARCHES: usize = 10;
/// Skip past a found eclipse before searching again
pub const ECLIPSE_SKIP_DAYS: i64 = 20;
/// Day of the month sampled for monthly transits and scores
pub const MID_MONTH_DAY: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearEventType {
    Retrograde,
    Eclipse,
    Transit,
    BestPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearImpact {
    Positive,
    Neutral,
    Challenging,
    Transformative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearEvent {
    pub id: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub event_type: YearEventType,
    pub title: String,
    pub description: String,
    pub impact: YearImpact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet: Option<Planet>,
}

/// Life areas scored for the best-month picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifeArea {
    Love,
    Career,
    Creativity,
}

impl LifeArea {
    pub const ALL: [LifeArea; 3] = [LifeArea::Love, LifeArea::Career, LifeArea::Creativity];

    pub fn name(self) -> &'static str {
        match self {
            LifeArea::Love => "love",
            LifeArea::Career => "career",
            LifeArea::Creativity => "creativity",
        }
    }

    fn title(self) -> &'static str {
        match self {
            LifeArea::Love => "Best Month for Love",
            LifeArea::Career => "Best Month for Career",
            LifeArea::Creativity => "Best Month for Creativity",
        }
    }

    fn lead_planet(self) -> Planet {
        match self {
            LifeArea::Love => Planet::Venus,
            LifeArea::Career => Planet::Jupiter,
            LifeArea::Creativity => Planet::Sun,
        }
    }

    fn transiting(self) -> &'static [Planet] {
        match self {
            LifeArea::Love => &[Planet::Venus, Planet::Mars, Planet::Jupiter],
            LifeArea::Career => &[Planet::Sun, Planet::Jupiter, Planet::Saturn],
            LifeArea::Creativity => &[Planet::Sun, Planet::Venus, Planet::Neptune],
        }
    }

    fn natal(self) -> &'static [Planet] {
        match self {
            LifeArea::Love => &[Planet::Venus, Planet::Moon, Planet::Mars],
            LifeArea::Career => &[Planet::Sun, Planet::Mars, Planet::Saturn],
            LifeArea::Creativity => &[Planet::Sun, Planet::Venus, Planet::Mercury],
        }
    }
}

fn event_id(kind: &str, detail: &str, date: NaiveDate) -> String {
    format!("{}-{}-{}", kind, detail, date)
}

fn transit_impact(aspect: AspectType) -> YearImpact {
    match aspect {
        AspectType::Trine | AspectType::Sextile => YearImpact::Positive,
        AspectType::Square | AspectType::Opposition => YearImpact::Challenging,
        AspectType::Conjunction => YearImpact::Transformative,
    }
}

fn is_supportive(aspect: AspectType) -> bool {
    matches!(
        aspect,
        AspectType::Trine | AspectType::Sextile | AspectType::Conjunction
    )
}

/// Supportive aspects between the area's transiting and natal bodies.
pub fn natal_area_score(area: LifeArea, sky: &[PlanetPosition], natal: &[PlanetPosition]) -> u32 {
    let transits: Vec<PlanetPosition> = sky
        .iter()
        .filter(|p| area.transiting().contains(&p.planet))
        .cloned()
        .collect();
    let targets: Vec<PlanetPosition> = natal
        .iter()
        .filter(|p| area.natal().contains(&p.planet))
        .cloned()
        .collect();

    compute_aspects(&transits, &targets)
        .iter()
        .filter(|a| is_supportive(a.aspect_type))
        .count() as u32
}

/// Score from the sky alone, using Venus and Jupiter's sign and direction.
pub fn sky_area_score(area: LifeArea, sky: &[PlanetPosition]) -> u32 {
    let find = |planet: Planet| sky.iter().find(|p| p.planet == planet);
    let (Some(venus), Some(jupiter)) = (find(Planet::Venus), find(Planet::Jupiter)) else {
        return 0;
    };

    let mut score = 0;
    match area {
        LifeArea::Love => {
            if !venus.retrograde {
                score += 2;
            }
            if matches!(
                venus.sign,
                ZodiacSign::Taurus | ZodiacSign::Libra | ZodiacSign::Pisces
            ) {
                score += 2;
            }
            if jupiter.sign == venus.sign {
                score += 1;
            }
        }
        LifeArea::Career => {
            if !jupiter.retrograde {
                score += 2;
            }
            if matches!(
                jupiter.sign,
                ZodiacSign::Sagittarius | ZodiacSign::Pisces | ZodiacSign::Cancer
            ) {
                score += 2;
            }
            if jupiter.sign.element() == Element::Earth {
                score += 1;
            }
        }
        LifeArea::Creativity => {
            if !venus.retrograde {
                score += 1;
            }
            if matches!(venus.sign.element(), Element::Fire | Element::Water) {
                score += 2;
            }
            if !jupiter.retrograde {
                score += 1;
            }
        }
    }
    score
}

/// Index of the highest score; ties go to the earliest entry.
fn best_index(scores: &[u32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, score) in scores.iter().enumerate() {
        match best {
            Some(b) if scores[b] >= *score => {}
            _ => best = Some(i),
        }
    }
    best
}

fn year_bounds(year: i32) -> AstroResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(AstroError::InvalidYear(year))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(AstroError::InvalidYear(year))?;
    Ok((first, last))
}

fn mid_month(year: i32, month: u32) -> AstroResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, MID_MONTH_DAY).ok_or(AstroError::InvalidMonth { year, month })
}

impl<E: Ephemeris> Engine<E> {
    /// Everything on the year's timeline, sorted by date.
    pub fn build_year_timeline(
        &self,
        year: i32,
        natal: Option<&[PlanetPosition]>,
    ) -> AstroResult<Vec<YearEvent>> {
        year_bounds(year)?;

        let mut events = self.retrograde_periods(year)?;
        events.extend(self.eclipses_in_year(year)?);
        if let Some(natal) = natal {
            events.extend(self.outer_planet_transits(year, natal)?);
        }
        events.extend(self.best_months(year, natal)?);

        events.sort_by_key(|e| e.date);
        log::debug!("Timeline for {}: {} events", year, events.len());
        Ok(events)
    }

    /// Mercury and Venus retrograde periods within the year. A period still
    /// open on December 31 is closed there; one already running on January 1
    /// starts there.
    pub fn retrograde_periods(&self, year: i32) -> AstroResult<Vec<YearEvent>> {
        let (first, last) = year_bounds(year)?;
        let mut events = Vec::new();

        for planet in TIMELINE_RETROGRADE_PLANETS {
            let mut open: Option<(NaiveDate, ZodiacSign)> = None;
            for date in first.iter_days().take_while(|d| *d <= last) {
                let position = self.resolve_position(planet, self.local_noon(date)?)?;
                match (open, position.retrograde) {
                    (None, true) => open = Some((date, position.sign)),
                    (Some((start, sign)), false) => {
                        events.push(retrograde_event(planet, sign, start, date));
                        open = None;
                    }
                    _ => {}
                }
            }

            if let Some((start, sign)) = open {
                events.push(retrograde_event(planet, sign, start, last));
            }
        }

        Ok(events)
    }

    /// Lunar and solar eclipses peaking within the year.
    pub fn eclipses_in_year(&self, year: i32) -> AstroResult<Vec<YearEvent>> {
        let (first, last) = year_bounds(year)?;
        let start = self.local_midnight(first)?;
        let end = shift_instant(self.local_midnight(last)?, Duration::days(1))?;
        let mut events = Vec::new();

        let mut cursor = start;
        for _ in 0..MAX_ECLIPSE_SEARCHES {
            let Some(eclipse) = self.ephemeris().search_lunar_eclipse(cursor)? else {
                break;
            };
            if eclipse.peak >= end {
                break;
            }
            let date = self.local_date(eclipse.peak);
            let sign = ZodiacSign::from_longitude(
                self.ephemeris().moon_ecliptic_longitude(eclipse.peak)?,
            );
            let kind = match eclipse.kind {
                LunarEclipseKind::Total => "Total",
                LunarEclipseKind::Partial => "Partial",
                LunarEclipseKind::Penumbral => "Penumbral",
            };
            events.push(YearEvent {
                id: event_id("eclipse", "lunar", date),
                date,
                end_date: None,
                event_type: YearEventType::Eclipse,
                title: format!("{} Lunar Eclipse", kind),
                description: format!(
                    "A {} lunar eclipse in {} brings endings and emotional release.",
                    kind.to_lowercase(),
                    sign
                ),
                impact: YearImpact::Transformative,
                planet: Some(Planet::Moon),
            });
            cursor = shift_instant(eclipse.peak, Duration::days(ECLIPSE_SKIP_DAYS))?;
        }

        let mut cursor = start;
        for _ in 0..MAX_ECLIPSE_SEARCHES {
            let Some(eclipse) = self.ephemeris().search_solar_eclipse(cursor)? else {
                break;
            };
            if eclipse.peak >= end {
                break;
            }
            let date = self.local_date(eclipse.peak);
            let sign = ZodiacSign::from_longitude(
                self.ephemeris().ecliptic_longitude(Planet::Sun, eclipse.peak)?,
            );
            let kind = match eclipse.kind {
                SolarEclipseKind::Central => "Central",
                SolarEclipseKind::Partial => "Partial",
            };
            events.push(YearEvent {
                id: event_id("eclipse", "solar", date),
                date,
                end_date: None,
                event_type: YearEventType::Eclipse,
                title: format!("{} Solar Eclipse", kind),
                description: format!(
                    "A {} solar eclipse in {} opens a new chapter.",
                    kind.to_lowercase(),
                    sign
                ),
                impact: YearImpact::Transformative,
                planet: Some(Planet::Sun),
            });
            cursor = shift_instant(eclipse.peak, Duration::days(ECLIPSE_SKIP_DAYS))?;
        }

        Ok(events)
    }

    /// The tightest Jupiter or Saturn aspect to the natal chart each month,
    /// when it is within 2.5 degrees.
    pub fn outer_planet_transits(
        &self,
        year: i32,
        natal: &[PlanetPosition],
    ) -> AstroResult<Vec<YearEvent>> {
        year_bounds(year)?;
        let mut events = Vec::new();
        if natal.is_empty() {
            return Ok(events);
        }

        for month in 1..=12 {
            let date = mid_month(year, month)?;
            let at = self.local_noon(date)?;
            let transits = TRANSITING_OUTER_PLANETS
                .iter()
                .map(|p| self.resolve_position(*p, at))
                .collect::<AstroResult<Vec<_>>>()?;

            let aspects = compute_aspects(&transits, natal);
            let Some(tightest) = aspects.first().filter(|a| a.orb <= MAX_TRANSIT_ORB) else {
                continue;
            };

            let detail = format!(
                "{}-{}-{}",
                tightest.transit_planet.name().to_lowercase(),
                tightest.aspect_type.name().to_lowercase(),
                tightest.natal_planet.name().to_lowercase()
            );
            events.push(YearEvent {
                id: event_id("transit", &detail, date),
                date,
                end_date: None,
                event_type: YearEventType::Transit,
                title: format!(
                    "{} {} natal {}",
                    tightest.transit_planet, tightest.aspect_type, tightest.natal_planet
                ),
                description: tightest.interpretation.clone(),
                impact: transit_impact(tightest.aspect_type),
                planet: Some(tightest.transit_planet),
            });
        }

        Ok(events)
    }

    /// Best month of the year for each life area.
    pub fn best_months(
        &self,
        year: i32,
        natal: Option<&[PlanetPosition]>,
    ) -> AstroResult<Vec<YearEvent>> {
        year_bounds(year)?;

        let mut scores: Vec<[u32; 3]> = Vec::with_capacity(12);
        for month in 1..=12 {
            let sky = self.resolve_positions(self.local_noon(mid_month(year, month)?)?)?;
            let mut month_scores = [0; 3];
            for (slot, area) in month_scores.iter_mut().zip(LifeArea::ALL) {
                *slot = match natal {
                    Some(natal) if !natal.is_empty() => natal_area_score(area, &sky, natal),
                    _ => sky_area_score(area, &sky),
                };
            }
            scores.push(month_scores);
        }

        let mut events = Vec::new();
        for (i, area) in LifeArea::ALL.into_iter().enumerate() {
            let column: Vec<u32> = scores.iter().map(|s| s[i]).collect();
            let Some(best) = best_index(&column) else {
                continue;
            };
            let month = best as u32 + 1;
            let (first, last) = month_bounds(year, month)?;

            events.push(YearEvent {
                id: event_id("best", area.name(), first),
                date: first,
                end_date: Some(last),
                event_type: YearEventType::BestPeriod,
                title: area.title().to_string(),
                description: format!(
                    "{} is your strongest month for {} this year.",
                    first.format("%B"),
                    area.name()
                ),
                impact: YearImpact::Positive,
                planet: Some(area.lead_planet()),
            });
        }

        Ok(events)
    }
}

fn retrograde_event(planet: Planet, sign: ZodiacSign, start: NaiveDate, end: NaiveDate) -> YearEvent {
    YearEvent {
        id: event_id("retrograde", &planet.name().to_lowercase(), start),
        date: start,
        end_date: Some(end),
        event_type: YearEventType::Retrograde,
        title: format!("{} Retrograde", planet),
        description: format!(
            "{} turns retrograde in {} from {} until {}.",
            planet,
            sign,
            start.format("%b %-d"),
            end.format("%b %-d")
        ),
        impact: YearImpact::Challenging,
        planet: Some(planet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::natal_positions;
    use crate::testing::LinearEphemeris;

    #[test]
    fn test_best_index_prefers_earliest_tie() {
        assert_eq!(best_index(&[1, 3, 2, 3]), Some(1));
        assert_eq!(best_index(&[0; 12]), Some(0));
        assert_eq!(best_index(&[]), None);
    }

    #[test]
    fn test_transit_impacts() {
        assert_eq!(transit_impact(AspectType::Trine), YearImpact::Positive);
        assert_eq!(transit_impact(AspectType::Opposition), YearImpact::Challenging);
        assert_eq!(transit_impact(AspectType::Conjunction), YearImpact::Transformative);
    }

    #[test]
    fn test_open_retrograde_closes_on_december_31() {
        let eph = LinearEphemeris::new().with(Planet::Mercury, 200.0, -0.1);
        let engine = Engine::new(eph);
        let periods = engine.retrograde_periods(2026).unwrap();

        assert_eq!(periods.len(), 1);
        let mercury = &periods[0];
        assert_eq!(mercury.id, "retrograde-mercury-2026-01-01");
        assert_eq!(mercury.end_date, NaiveDate::from_ymd_opt(2026, 12, 31));
        assert_eq!(mercury.impact, YearImpact::Challenging);
    }

    #[test]
    fn test_tightest_outer_transit_per_month() {
        // Jupiter parked on natal Sun + 120.5: a trine every month
        let eph = LinearEphemeris::new().with(Planet::Jupiter, 130.5, 0.0);
        let engine = Engine::new(eph);
        let natal = natal_positions([(Planet::Sun, 10.0)]);
        let events = engine.outer_planet_transits(2026, &natal).unwrap();

        assert_eq!(events.len(), 12);
        assert!(events.iter().all(|e| e.impact == YearImpact::Positive));
        assert_eq!(events[0].id, "transit-jupiter-trine-sun-2026-01-15");
        assert_eq!(events[0].title, "Jupiter Trine natal Sun");
    }

    #[test]
    fn test_sky_scores_without_natal() {
        let sky = natal_positions([(Planet::Venus, 40.0), (Planet::Jupiter, 100.0)]);
        // Venus direct in Taurus, Jupiter direct in Cancer
        assert_eq!(sky_area_score(LifeArea::Love, &sky), 4);
        assert_eq!(sky_area_score(LifeArea::Career, &sky), 4);
        assert_eq!(sky_area_score(LifeArea::Creativity, &sky), 2);
    }

    #[test]
    fn test_natal_score_counts_supportive_area_aspects() {
        let sky = natal_positions([
            (Planet::Venus, 120.0),
            (Planet::Mars, 90.0),
            (Planet::Jupiter, 270.0),
            (Planet::Saturn, 240.0),
        ]);
        let natal = natal_positions([
            (Planet::Venus, 0.0),
            (Planet::Mars, 120.0),
            (Planet::Sun, 60.0),
        ]);
        // Venus trine natal Venus and conjunct natal Mars. The squares, the
        // sextile to the Sun and Saturn's trine to Venus all fall outside.
        assert_eq!(natal_area_score(LifeArea::Love, &sky, &natal), 2);
        assert_eq!(natal_area_score(LifeArea::Love, &sky, &[]), 0);
    }

    #[test]
    fn test_natal_best_month_follows_venus_trine() {
        // Venus reaches 120 deg at the June 15 sample and sits near 111 and
        // 129 on May 15 and July 15
        let eph = LinearEphemeris::new()
            .with(Planet::Venus, 120.0 - 0.3 * 165.5, 0.3)
            .with(Planet::Mars, 30.0, 0.0)
            .with(Planet::Jupiter, 30.0, 0.0);
        let engine = Engine::new(eph);
        let natal = natal_positions([(Planet::Venus, 0.0)]);
        let events = engine.best_months(2026, Some(&natal)).unwrap();

        let love = events
            .iter()
            .find(|e| e.title == "Best Month for Love")
            .unwrap();
        assert_eq!(love.id, "best-love-2026-06-01");
        assert_eq!(love.date, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(love.end_date, NaiveDate::from_ymd_opt(2026, 6, 30));
        assert_eq!(love.planet, Some(Planet::Venus));
    }

    #[test]
    fn test_best_months_one_per_area() {
        let engine = Engine::new(LinearEphemeris::new());
        let events = engine.best_months(2026, None).unwrap();
        assert_eq!(events.len(), 3);
        assert!(events
            .iter()
            .all(|e| e.event_type == YearEventType::BestPeriod && e.end_date.is_some()));
    }

    #[test]
    fn test_eclipse_kind_follows_moon_latitude() {
        let engine = Engine::new(LinearEphemeris::new());
        assert!(engine.eclipses_in_year(2026).unwrap().is_empty());

        let near_node = LinearEphemeris::new().with_latitude(Planet::Moon, 0.3);
        let events = Engine::new(near_node).eclipses_in_year(2026).unwrap();
        let lunar: Vec<&YearEvent> = events
            .iter()
            .filter(|e| e.planet == Some(Planet::Moon))
            .collect();
        assert_eq!(lunar.len(), MAX_ECLIPSE_SEARCHES);
        assert!(lunar.iter().all(|e| e.title == "Total Lunar Eclipse"));

        let off_node = LinearEphemeris::new().with_latitude(Planet::Moon, 1.2);
        let titles: Vec<String> = Engine::new(off_node)
            .eclipses_in_year(2026)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert!(titles.contains(&"Penumbral Lunar Eclipse".to_string()));
        assert!(titles.contains(&"Partial Solar Eclipse".to_string()));
        assert!(titles.iter().all(|t| t != "Total Lunar Eclipse"));
    }

    #[test]
    fn test_invalid_year() {
        let engine = Engine::new(LinearEphemeris::new());
        assert!(matches!(
            engine.retrograde_periods(i32::MAX),
            Err(AstroError::InvalidYear(_))
        ));
    }
}
