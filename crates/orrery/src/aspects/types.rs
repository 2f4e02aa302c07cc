use serde::{Deserialize, Serialize};
use std::fmt;

use crate::zodiac::Planet;

/// Major (Ptolemaic) aspects, in the order they are tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Harmonious,
    Challenging,
    Neutral,
}

impl AspectType {
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    /// Exact separation in degrees
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Orb allowed when a luminary takes part
    pub fn base_orb(self) -> f64 {
        match self {
            AspectType::Conjunction => 8.0,
            AspectType::Sextile => 6.0,
            AspectType::Square => 7.0,
            AspectType::Trine => 8.0,
            AspectType::Opposition => 8.0,
        }
    }

    /// Effective orb for a body pair: the base orb if either body is the Sun
    /// or Moon, one degree tighter otherwise. Symmetric in its arguments.
    ///
    /// The luminary allowance applies to either side of the pair, not just
    /// the transiting body, so swapping the two sets yields the same aspects.
    pub fn max_orb(self, a: Planet, b: Planet) -> f64 {
        if a.is_luminary() || b.is_luminary() {
            self.base_orb()
        } else {
            self.base_orb() - 1.0
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AspectType::Conjunction => "☌",
            AspectType::Sextile => "⚹",
            AspectType::Square => "□",
            AspectType::Trine => "△",
            AspectType::Opposition => "☍",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "Conjunction",
            AspectType::Sextile => "Sextile",
            AspectType::Square => "Square",
            AspectType::Trine => "Trine",
            AspectType::Opposition => "Opposition",
        }
    }

    pub fn nature(self) -> AspectNature {
        match self {
            AspectType::Trine | AspectType::Sextile => AspectNature::Harmonious,
            AspectType::Square | AspectType::Opposition => AspectNature::Challenging,
            AspectType::Conjunction => AspectNature::Neutral,
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw aspect between two longitudes, before planets are attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub aspect_type: AspectType,
    /// Unrounded deviation from the exact angle
    pub orb: f64,
}

/// An aspect from a transiting body to a natal body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitAspect {
    pub transit_planet: Planet,
    pub natal_planet: Planet,
    pub aspect_type: AspectType,
    pub symbol: String,
    /// Degrees from exact, one decimal
    pub orb: f64,
    /// Inside half of the base orb
    pub is_applying: bool,
    pub interpretation: String,
}

impl TransitAspect {
    pub fn nature(&self) -> AspectNature {
        self.aspect_type.nature()
    }
}
