mod common;

use chrono::{Duration, NaiveDate};
use common::{epoch, looping_mercury, Motion, ScriptedEphemeris};
use orrery::{Engine, Planet};

fn looping(period: f64) -> Motion {
    Motion::Looping {
        lon0: 100.0,
        rate: 1.0,
        amplitude: period * 0.2,
        period,
    }
}

#[test]
fn test_current_retrograde_has_start_and_end() {
    let eph = ScriptedEphemeris::new().with(Planet::Mercury, looping_mercury());
    let engine = Engine::new(eph);
    // Day 58 sits in the middle of the first loop (days ~50 to ~65)
    let at = epoch() + Duration::days(58);
    let data = engine.retrograde_data(at).unwrap();

    assert_eq!(data.current.len(), 1);
    let mercury = &data.current[0];
    assert_eq!(mercury.planet, Planet::Mercury);
    assert!(mercury.is_retrograde);

    let today = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
    let start = mercury.start_date.expect("station retrograde within 120 days");
    let end = mercury.end_date.expect("station direct within 120 days");
    assert!(start < today && today < end);
    assert!((end - start).num_days() >= 10 && (end - start).num_days() <= 20);
    assert!(data.summary.starts_with("Mercury is retrograde"));
}

#[test]
fn test_upcoming_station() {
    let eph = ScriptedEphemeris::new().with(Planet::Mercury, looping_mercury());
    let engine = Engine::new(eph);
    let data = engine.retrograde_data(epoch()).unwrap();

    assert!(data.current.is_empty());
    assert!(data.summary.starts_with("No planets"));
    assert_eq!(data.upcoming.len(), 1);
    let start = data.upcoming[0].start_date.unwrap();
    assert!(start >= NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
    assert!(start <= NaiveDate::from_ymd_opt(2026, 2, 25).unwrap());
}

#[test]
fn test_upcoming_capped_to_three_soonest() {
    let eph = ScriptedEphemeris::new()
        .with(Planet::Mercury, looping(130.0))
        .with(Planet::Venus, looping(100.0))
        .with(Planet::Mars, looping(120.0))
        .with(Planet::Jupiter, looping(110.0));
    let engine = Engine::new(eph);
    let data = engine.retrograde_data(epoch()).unwrap();

    let planets: Vec<Planet> = data.upcoming.iter().map(|r| r.planet).collect();
    assert_eq!(planets, vec![Planet::Venus, Planet::Jupiter, Planet::Mars]);
    assert!(data
        .upcoming
        .windows(2)
        .all(|w| w[0].start_date <= w[1].start_date));
}

#[test]
fn test_many_retrogrades_summary() {
    let backwards = Motion::Linear {
        lon0: 200.0,
        rate: -0.05,
    };
    let eph = ScriptedEphemeris::new()
        .with(Planet::Mars, backwards)
        .with(Planet::Saturn, backwards)
        .with(Planet::Uranus, backwards)
        .with(Planet::Pluto, backwards);
    let engine = Engine::new(eph);
    let data = engine.retrograde_data(epoch()).unwrap();

    assert_eq!(data.current.len(), 4);
    assert!(data.summary.starts_with("4 planets are retrograde"));
}
