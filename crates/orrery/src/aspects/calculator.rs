use chrono::{DateTime, Utc};

use crate::aspects::interpretation::interpret;
use crate::aspects::types::{AspectMatch, AspectType, TransitAspect};
use crate::engine::Engine;
use crate::ephemeris::Ephemeris;
use crate::error::AstroResult;
use crate::positions::PlanetPosition;
use crate::zodiac::{angular_distance, round1, Planet};

/// Aspect calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectCalculator;

impl AspectCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Every aspect type whose window contains the separation of `lon1` and
    /// `lon2`. Windows can overlap, so more than one type may match.
    pub fn calculate_aspects_between<F>(&self, lon1: f64, lon2: f64, max_orb: F) -> Vec<AspectMatch>
    where
        F: Fn(AspectType) -> f64,
    {
        // Separation normalized to 0-180
        let angle_diff = angular_distance(lon1, lon2);

        AspectType::ALL
            .iter()
            .filter_map(|aspect_type| {
                let orb = (angle_diff - aspect_type.angle()).abs();
                (orb <= max_orb(*aspect_type)).then_some(AspectMatch {
                    aspect_type: *aspect_type,
                    orb,
                })
            })
            .collect()
    }

    /// Aspects from each transiting body to each natal body, tightest first.
    ///
    /// Moon to Moon is skipped. An empty natal set gives no aspects.
    pub fn compute_aspects(
        &self,
        transits: &[PlanetPosition],
        natal: &[PlanetPosition],
    ) -> Vec<TransitAspect> {
        let mut aspects = Vec::new();

        for transit in transits {
            for natal_pos in natal {
                if transit.planet == Planet::Moon && natal_pos.planet == Planet::Moon {
                    continue;
                }

                let matches = self.calculate_aspects_between(
                    transit.longitude,
                    natal_pos.longitude,
                    |aspect_type| aspect_type.max_orb(transit.planet, natal_pos.planet),
                );

                aspects.extend(matches.into_iter().map(|m| TransitAspect {
                    transit_planet: transit.planet,
                    natal_planet: natal_pos.planet,
                    aspect_type: m.aspect_type,
                    symbol: m.aspect_type.symbol().to_string(),
                    orb: round1(m.orb),
                    is_applying: m.orb < m.aspect_type.base_orb() / 2.0,
                    interpretation: interpret(transit.planet, natal_pos.planet, m.aspect_type)
                        .to_string(),
                }));
            }
        }

        // Stable: equal orbs keep transit/natal/type order
        aspects.sort_by(|a, b| a.orb.total_cmp(&b.orb));
        aspects
    }
}

/// Aspects between two position sets; see [`AspectCalculator::compute_aspects`].
pub fn compute_aspects(transits: &[PlanetPosition], natal: &[PlanetPosition]) -> Vec<TransitAspect> {
    AspectCalculator::new().compute_aspects(transits, natal)
}

impl<E: Ephemeris> Engine<E> {
    /// Aspects from the sky at `at` to a natal set.
    pub fn transit_aspects(
        &self,
        at: DateTime<Utc>,
        natal: &[PlanetPosition],
    ) -> AstroResult<Vec<TransitAspect>> {
        if natal.is_empty() {
            return Ok(Vec::new());
        }
        let transits = self.resolve_positions(at)?;
        Ok(compute_aspects(&transits, natal))
    }
}
