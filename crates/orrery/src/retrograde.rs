//! Retrograde tracker: which planets are retrograde now, when each period
//! began and ends, and which stations are coming up.
//!
//! Station dates are found by stepping whole days at local noon, so they
//! carry the same one-day resolution as the month scanner.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::ephemeris::Ephemeris;
use crate::error::AstroResult;
use crate::zodiac::{Planet, ZodiacSign};

/// How far to look for the end (and start) of a current retrograde
pub const STATION_SEARCH_DAYS: i64 = 120;
/// How far ahead to look for the next retrograde station
pub const UPCOMING_SEARCH_DAYS: i64 = 60;
pub const MAX_UPCOMING: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrogradeInfo {
    pub planet: Planet,
    pub symbol: String,
    pub is_retrograde: bool,
    pub sign: ZodiacSign,
    /// First retrograde day
    pub start_date: Option<NaiveDate>,
    /// First direct day after the period
    pub end_date: Option<NaiveDate>,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrogradeData {
    pub current: Vec<RetrogradeInfo>,
    pub upcoming: Vec<RetrogradeInfo>,
    pub summary: String,
}

pub fn retrograde_meaning(planet: Planet) -> &'static str {
    match planet {
        Planet::Mercury => "Review before you send, sign or buy. Old conversations resurface.",
        Planet::Venus => "Relationships and values come up for reassessment. Go slow with new commitments.",
        Planet::Mars => "Drive turns inward. Rework plans instead of forcing them.",
        Planet::Jupiter => "Growth happens within; revisit beliefs and long-range goals.",
        Planet::Saturn => "Responsibilities ask for review. Shore up foundations.",
        Planet::Uranus => "Inner change brews quietly before it breaks through.",
        Planet::Neptune => "Illusions thin out; dreams get a reality check.",
        Planet::Pluto => "Deep inner work. Let go of what has run its course.",
        Planet::Sun | Planet::Moon => "Luminaries never turn retrograde.",
    }
}

/// One sentence describing the current retrograde picture.
pub fn retrograde_summary(current: &[RetrogradeInfo]) -> String {
    match current {
        [] => "No planets are retrograde right now. Forward momentum is on your side.".to_string(),
        [only] => format!(
            "{} is retrograde in {}. {}",
            only.planet, only.sign, only.meaning
        ),
        several if several.len() <= 3 => {
            let names: Vec<&str> = several.iter().map(|r| r.planet.name()).collect();
            format!(
                "{} are retrograde. Slow down and revisit rather than start fresh.",
                names.join(", ")
            )
        }
        many => format!(
            "{} planets are retrograde. A deeply reflective stretch; patience pays off.",
            many.len()
        ),
    }
}

impl<E: Ephemeris> Engine<E> {
    /// Retrograde state at local noon on `date`.
    fn retrograde_on(&self, planet: Planet, date: NaiveDate) -> AstroResult<bool> {
        let at = self.local_noon(date)?;
        self.is_retrograde(planet, at)
    }

    /// First day within `max_days` steps of `from` (exclusive), moving by
    /// `step` days, whose retrograde state equals `want`.
    fn find_day(
        &self,
        planet: Planet,
        from: NaiveDate,
        step: i64,
        max_days: i64,
        want: bool,
    ) -> AstroResult<Option<NaiveDate>> {
        for k in 1..=max_days {
            let date = Self::shift_date(from, k * step)?;
            if self.retrograde_on(planet, date)? == want {
                return Ok(Some(date));
            }
        }
        Ok(None)
    }

    pub fn retrograde_data(&self, at: DateTime<Utc>) -> AstroResult<RetrogradeData> {
        let today = self.local_date(at);
        let mut current = Vec::new();
        let mut upcoming = Vec::new();

        for planet in Planet::ALL.into_iter().filter(|p| !p.is_luminary()) {
            let position = self.resolve_position(planet, at)?;

            if position.retrograde {
                let end_date = self.find_day(planet, today, 1, STATION_SEARCH_DAYS, false)?;
                let last_direct = self.find_day(planet, today, -1, STATION_SEARCH_DAYS, false)?;
                let start_date = last_direct.and_then(|d| d.succ_opt());

                current.push(RetrogradeInfo {
                    planet,
                    symbol: planet.symbol().to_string(),
                    is_retrograde: true,
                    sign: position.sign,
                    start_date,
                    end_date,
                    meaning: retrograde_meaning(planet).to_string(),
                });
            } else if let Some(start) =
                self.find_day(planet, today, 1, UPCOMING_SEARCH_DAYS, true)?
            {
                upcoming.push(RetrogradeInfo {
                    planet,
                    symbol: planet.symbol().to_string(),
                    is_retrograde: false,
                    sign: position.sign,
                    start_date: Some(start),
                    end_date: None,
                    meaning: retrograde_meaning(planet).to_string(),
                });
            }
        }

        upcoming.sort_by_key(|r| r.start_date);
        upcoming.truncate(MAX_UPCOMING);

        log::debug!(
            "{} retrograde, {} upcoming as of {}",
            current.len(),
            upcoming.len(),
            today
        );

        Ok(RetrogradeData {
            summary: retrograde_summary(&current),
            current,
            upcoming,
        })
    }
}
