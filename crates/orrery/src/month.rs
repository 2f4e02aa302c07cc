//! Month event scanner.
//!
//! Steps through the month one local noon at a time and diffs each day
//! against the one before. Events are dated to the first noon sample after
//! they happen, so anything that occurs between noons can be off by up to a
//! day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::ephemeris::Ephemeris;
use crate::error::{AstroError, AstroResult};
use crate::moon::FULL_MOON_ANGLE;
use crate::positions::PlanetPosition;
use crate::zodiac::Planet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthEventType {
    FullMoon,
    NewMoon,
    Ingress,
    Retrograde,
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventImpact {
    Positive,
    Challenging,
    Neutral,
    Significant,
}

impl MonthEventType {
    pub fn impact(self) -> EventImpact {
        match self {
            MonthEventType::FullMoon => EventImpact::Significant,
            MonthEventType::NewMoon => EventImpact::Positive,
            MonthEventType::Ingress => EventImpact::Neutral,
            MonthEventType::Retrograde => EventImpact::Challenging,
            MonthEventType::Direct => EventImpact::Positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthEvent {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: MonthEventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet: Option<Planet>,
    pub description: String,
    pub impact: EventImpact,
    pub emoji: String,
}

impl MonthEvent {
    fn new(
        date: NaiveDate,
        event_type: MonthEventType,
        planet: Option<Planet>,
        description: String,
        emoji: &str,
    ) -> Self {
        Self {
            date,
            event_type,
            planet,
            description,
            impact: event_type.impact(),
            emoji: emoji.to_string(),
        }
    }
}

/// Everything the scanners need from one noon sample.
#[derive(Debug, Clone)]
pub(crate) struct DaySample {
    pub(crate) positions: Vec<PlanetPosition>,
    pub(crate) phase_angle: f64,
}

impl DaySample {
    pub(crate) fn position(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.positions.iter().find(|p| p.planet == planet)
    }
}

/// First and last day of a calendar month.
pub(crate) fn month_bounds(year: i32, month: u32) -> AstroResult<(NaiveDate, NaiveDate)> {
    let invalid = || AstroError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_first.pred_opt().ok_or_else(invalid)?;
    Ok((first, last))
}

/// Lunation and planet events between two consecutive samples.
pub(crate) fn diff_days(date: NaiveDate, prev: &DaySample, curr: &DaySample) -> Vec<MonthEvent> {
    let mut events = Vec::new();
    let moon_sign = curr.position(Planet::Moon).map(|p| p.sign);

    if prev.phase_angle < FULL_MOON_ANGLE && curr.phase_angle >= FULL_MOON_ANGLE {
        let description = match moon_sign {
            Some(sign) => format!("Full Moon in {}", sign),
            None => "Full Moon".to_string(),
        };
        events.push(MonthEvent::new(date, MonthEventType::FullMoon, None, description, "🌕"));
    }

    // The phase angle only ever grows between samples, except when it
    // wraps through 0 at the new moon.
    if curr.phase_angle < prev.phase_angle {
        let description = match moon_sign {
            Some(sign) => format!("New Moon in {}", sign),
            None => "New Moon".to_string(),
        };
        events.push(MonthEvent::new(date, MonthEventType::NewMoon, None, description, "🌑"));
    }

    for now in curr.positions.iter().filter(|p| p.planet != Planet::Moon) {
        let Some(before) = prev.position(now.planet) else {
            continue;
        };

        if now.sign != before.sign {
            events.push(MonthEvent::new(
                date,
                MonthEventType::Ingress,
                Some(now.planet),
                format!("{} enters {}", now.planet, now.sign),
                now.sign.symbol(),
            ));
        }

        if now.retrograde && !before.retrograde {
            events.push(MonthEvent::new(
                date,
                MonthEventType::Retrograde,
                Some(now.planet),
                format!("{} stations retrograde in {}", now.planet, now.sign),
                "🔄",
            ));
        } else if !now.retrograde && before.retrograde {
            events.push(MonthEvent::new(
                date,
                MonthEventType::Direct,
                Some(now.planet),
                format!("{} stations direct in {}", now.planet, now.sign),
                "▶️",
            ));
        }
    }

    events
}

impl<E: Ephemeris> Engine<E> {
    /// Positions and phase angle at local noon on `date`.
    pub(crate) fn sample_day(&self, date: NaiveDate) -> AstroResult<DaySample> {
        let at = self.local_noon(date)?;
        Ok(DaySample {
            positions: self.resolve_positions(at)?,
            phase_angle: self.ephemeris().moon_illumination(at)?.phase_angle,
        })
    }

    /// Lunations, ingresses and stations within a calendar month, in date
    /// order. Dates are accurate to one day.
    pub fn scan_month_events(&self, year: i32, month: u32) -> AstroResult<Vec<MonthEvent>> {
        let (first, last) = month_bounds(year, month)?;
        let day_before = first
            .pred_opt()
            .ok_or(AstroError::InvalidMonth { year, month })?;

        log::debug!("Scanning {}-{:02} ({} days)", year, month, last.day());

        let mut prev = self.sample_day(day_before)?;
        let mut events = Vec::new();

        for date in first.iter_days().take_while(|d| *d <= last) {
            let curr = self.sample_day(date)?;
            events.extend(diff_days(date, &prev, &curr));
            prev = curr;
        }

        events.sort_by_key(|e| e.date);
        Ok(events)
    }
}
