//! Planetary hours.
//!
//! Sunrise to sunset and sunset to the next sunrise are each cut into twelve
//! equal hours. The first day hour belongs to the ruler of the weekday and
//! the rest follow the Chaldean order from there.
//!
//! Days are taken in the observer's local mean solar time (UTC shifted by
//! longitude / 15 hours), which keeps "the day" anchored to the observer's
//! own sunrise regardless of the configured civil offset.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::ephemeris::time::shift_instant;
use crate::ephemeris::{Ephemeris, GeoLocation, RiseSet};
use crate::error::{AstroError, AstroResult};
use crate::provenance::SearchedInstant;
use crate::zodiac::Planet;

pub const CHALDEAN_ORDER: [Planet; 7] = [
    Planet::Saturn,
    Planet::Jupiter,
    Planet::Mars,
    Planet::Sun,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
];

/// Estimated sunrise/sunset (local mean solar hour) for polar day or night
const ESTIMATED_SUNRISE_HOUR: i64 = 6;
const ESTIMATED_SUNSET_HOUR: i64 = 18;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetaryHour {
    pub planet: Planet,
    pub symbol: String,
    pub color: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_current: bool,
    /// 1-24; 1-12 are day hours
    pub hour_number: u8,
    pub is_day: bool,
}

impl PlanetaryHour {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start_time <= at && at < self.end_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetaryHours {
    /// None when `now` is outside [sunrise, nextSunrise)
    pub current_hour: Option<PlanetaryHour>,
    pub today_hours: Vec<PlanetaryHour>,
    pub sunrise: SearchedInstant,
    pub sunset: SearchedInstant,
    pub next_sunrise: SearchedInstant,
    pub previous_sunset: SearchedInstant,
    pub day_ruler: Planet,
}

pub fn day_ruler(weekday: Weekday) -> Planet {
    match weekday {
        Weekday::Sun => Planet::Sun,
        Weekday::Mon => Planet::Moon,
        Weekday::Tue => Planet::Mars,
        Weekday::Wed => Planet::Mercury,
        Weekday::Thu => Planet::Jupiter,
        Weekday::Fri => Planet::Venus,
        Weekday::Sat => Planet::Saturn,
    }
}

pub fn planet_color(planet: Planet) -> &'static str {
    match planet {
        Planet::Sun => "#FFB300",
        Planet::Moon => "#B0BEC5",
        Planet::Mercury => "#4FC3F7",
        Planet::Venus => "#F06292",
        Planet::Mars => "#E53935",
        Planet::Jupiter => "#7E57C2",
        Planet::Saturn => "#5D4037",
        Planet::Uranus => "#26C6DA",
        Planet::Neptune => "#3949AB",
        Planet::Pluto => "#424242",
    }
}

fn chaldean_index(planet: Planet) -> usize {
    CHALDEAN_ORDER
        .iter()
        .position(|p| *p == planet)
        .unwrap_or(0)
}

/// Boundary `k` of twelve equal parts of [start, end).
fn twelfth(start: DateTime<Utc>, end: DateTime<Utc>, k: i64) -> DateTime<Utc> {
    let span_ms = (end - start).num_milliseconds();
    start + Duration::milliseconds(span_ms * k / 12)
}

/// Split [sunrise, next_sunrise) into 24 hours starting with `ruler`.
///
/// Boundaries are computed from the span ends, so each hour ends exactly
/// where the next begins.
pub fn partition_hours(
    sunrise: DateTime<Utc>,
    sunset: DateTime<Utc>,
    next_sunrise: DateTime<Utc>,
    ruler: Planet,
    now: DateTime<Utc>,
) -> Vec<PlanetaryHour> {
    let first = chaldean_index(ruler);

    (0..24)
        .map(|i: usize| {
            let is_day = i < 12;
            let k = (i % 12) as i64;
            let (start, end) = if is_day {
                (twelfth(sunrise, sunset, k), twelfth(sunrise, sunset, k + 1))
            } else {
                (
                    twelfth(sunset, next_sunrise, k),
                    twelfth(sunset, next_sunrise, k + 1),
                )
            };
            let planet = CHALDEAN_ORDER[(first + i) % CHALDEAN_ORDER.len()];

            PlanetaryHour {
                planet,
                symbol: planet.symbol().to_string(),
                color: planet_color(planet).to_string(),
                start_time: start,
                end_time: end,
                is_current: start <= now && now < end,
                hour_number: (i + 1) as u8,
                is_day,
            }
        })
        .collect()
}

/// 00:00 local mean solar time on `date` at longitude `lon`.
fn solar_midnight(date: NaiveDate, lon: f64) -> AstroResult<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0).ok_or(AstroError::InvalidDate(date))?;
    let shift = Duration::milliseconds((lon / 15.0 * 3_600_000.0).round() as i64);
    Ok(shift_instant(Utc.from_utc_datetime(&midnight), -shift)?)
}

/// Local mean solar date of an instant.
pub fn solar_date(at: DateTime<Utc>, lon: f64) -> AstroResult<NaiveDate> {
    let shift = Duration::milliseconds((lon / 15.0 * 3_600_000.0).round() as i64);
    Ok(shift_instant(at, shift)?.date_naive())
}

fn next_day(date: NaiveDate) -> AstroResult<NaiveDate> {
    date.succ_opt().ok_or(AstroError::InvalidDate(date))
}

fn prev_day(date: NaiveDate) -> AstroResult<NaiveDate> {
    date.pred_opt().ok_or(AstroError::InvalidDate(date))
}

impl<E: Ephemeris> Engine<E> {
    /// First sunrise or sunset in [from, until), or the solar-time estimate
    /// for `date` when the Sun never crosses the horizon in that window.
    fn sun_event(
        &self,
        observer: &GeoLocation,
        direction: RiseSet,
        date: NaiveDate,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AstroResult<SearchedInstant> {
        let max_days = (until - from).num_milliseconds() as f64 / 86_400_000.0;
        let found = self
            .ephemeris()
            .search_rise_set(Planet::Sun, observer, direction, from, max_days)?;

        if let Some(at) = found {
            if at < until {
                return Ok(SearchedInstant::searched(at));
            }
        }

        let hour = match direction {
            RiseSet::Rise => ESTIMATED_SUNRISE_HOUR,
            RiseSet::Set => ESTIMATED_SUNSET_HOUR,
        };
        log::warn!(
            "No sun {:?} on {} at ({:.2}, {:.2}); using {:02}:00 mean solar time",
            direction,
            date,
            observer.lat,
            observer.lon,
            hour
        );
        let estimate = shift_instant(solar_midnight(date, observer.lon)?, Duration::hours(hour))?;
        Ok(SearchedInstant::estimated(estimate.max(from)))
    }

    /// The 24 planetary hours of `date` at `observer`, flagging the one
    /// containing `now`.
    pub fn compute_planetary_hours(
        &self,
        date: NaiveDate,
        observer: &GeoLocation,
        now: DateTime<Utc>,
    ) -> AstroResult<PlanetaryHours> {
        if !observer.is_valid() {
            return Err(AstroError::InvalidLocation {
                lat: observer.lat,
                lon: observer.lon,
            });
        }

        let yesterday = prev_day(date)?;
        let tomorrow = next_day(date)?;
        let day_start = solar_midnight(date, observer.lon)?;
        let day_end = solar_midnight(tomorrow, observer.lon)?;
        let tomorrow_end = solar_midnight(next_day(tomorrow)?, observer.lon)?;
        let yesterday_start = solar_midnight(yesterday, observer.lon)?;

        let sunrise = self.sun_event(observer, RiseSet::Rise, date, day_start, day_end)?;
        let sunset = self.sun_event(observer, RiseSet::Set, date, sunrise.at, day_end)?;
        let next_sunrise =
            self.sun_event(observer, RiseSet::Rise, tomorrow, day_end, tomorrow_end)?;
        let previous_sunset =
            self.sun_event(observer, RiseSet::Set, yesterday, yesterday_start, day_start)?;

        let ruler = day_ruler(date.weekday());
        let today_hours = partition_hours(sunrise.at, sunset.at, next_sunrise.at, ruler, now);
        let current_hour = today_hours.iter().find(|h| h.is_current).cloned();

        Ok(PlanetaryHours {
            current_hour,
            today_hours,
            sunrise,
            sunset,
            next_sunrise,
            previous_sunset,
            day_ruler: ruler,
        })
    }

    /// The planetary hour containing `now`. Before today's sunrise the hour
    /// belongs to the previous day's night.
    pub fn current_planetary_hour(
        &self,
        observer: &GeoLocation,
        now: DateTime<Utc>,
    ) -> AstroResult<Option<PlanetaryHour>> {
        let date = solar_date(now, observer.lon)?;
        let today = self.compute_planetary_hours(date, observer, now)?;
        if now >= today.sunrise.at {
            return Ok(today.current_hour);
        }
        let yesterday = self.compute_planetary_hours(prev_day(date)?, observer, now)?;
        Ok(yesterday.current_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 20, h, m, 0).unwrap()
    }

    #[test]
    fn test_weekday_rulers() {
        assert_eq!(day_ruler(Weekday::Sun), Planet::Sun);
        assert_eq!(day_ruler(Weekday::Sat), Planet::Saturn);
        let friday = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        assert_eq!(day_ruler(friday.weekday()), Planet::Venus);
    }

    #[test]
    fn test_friday_sequence() {
        let sunrise = at(6, 0);
        let sunset = at(18, 0);
        let next_sunrise = sunrise + Duration::days(1);
        let hours = partition_hours(sunrise, sunset, next_sunrise, Planet::Venus, at(9, 30));

        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].planet, Planet::Venus);
        assert_eq!(hours[1].planet, Planet::Mercury);
        assert_eq!(hours[2].planet, Planet::Moon);
        assert_eq!(hours[3].planet, Planet::Saturn);
        assert_eq!(hours[12].planet, Planet::Mars);
        assert!(hours[11].is_day && !hours[12].is_day);
        assert_eq!(hours[12].start_time, sunset);

        let current: Vec<u8> = hours.iter().filter(|h| h.is_current).map(|h| h.hour_number).collect();
        assert_eq!(current, vec![4]);
    }

    #[test]
    fn test_unequal_day_and_night_hours_stay_contiguous() {
        let sunrise = at(5, 13);
        let sunset = at(19, 47);
        let next_sunrise = Utc.with_ymd_and_hms(2026, 3, 21, 5, 11, 7).unwrap();
        let hours = partition_hours(sunrise, sunset, next_sunrise, Planet::Venus, at(0, 0));

        assert_eq!(hours[0].start_time, sunrise);
        assert_eq!(hours[23].end_time, next_sunrise);
        for pair in hours.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
        assert!(hours.iter().all(|h| !h.is_current));
    }

    #[test]
    fn test_solar_date_shifts_with_longitude() {
        let late_utc = Utc.with_ymd_and_hms(2026, 3, 20, 23, 0, 0).unwrap();
        assert_eq!(solar_date(late_utc, 0.0).unwrap(), NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());
        assert_eq!(solar_date(late_utc, 30.0).unwrap(), NaiveDate::from_ymd_opt(2026, 3, 21).unwrap());
    }
}
