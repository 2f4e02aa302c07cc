//! Reading text for a transit-to-natal aspect.

use crate::aspects::types::AspectType;
use crate::zodiac::Planet;

/// Short reading for `transit` aspecting natal `natal`.
///
/// Specific pairings come first; every aspect type ends in its own default
/// arm so the match is total.
pub fn interpret(transit: Planet, natal: Planet, aspect: AspectType) -> &'static str {
    use AspectType::*;
    use Planet::*;

    match (transit, natal, aspect) {
        // Sun
        (Sun, Sun, Conjunction) => "A personal new year: vitality returns and your direction comes into focus.",
        (Sun, Sun, Square | Opposition) => "Your drive meets friction; adjust course rather than push harder.",
        (Sun, Moon, Trine | Sextile) => "Head and heart agree today, making choices feel natural.",
        (Sun, Moon, Square | Opposition) => "What you want and what you need pull in different directions.",
        (Sun, Venus, Conjunction | Trine | Sextile) => "Warmth and charm come easily; a good day to connect.",
        (Sun, Mars, Square | Opposition) => "Tempers run close to the surface. Channel the heat into effort.",

        // Moon
        (Moon, Sun, Conjunction) => "Feelings line up with purpose; trust your instincts.",
        (Moon, Venus, Trine | Sextile) => "Emotional ease and affection make this a gentle, sociable day.",
        (Moon, Mars, Square | Opposition) => "Moods flare quickly; pause before reacting.",
        (Moon, Saturn, Square | Opposition) => "A heavier mood asks for patience and rest.",

        // Mercury
        (Mercury, Mercury, Conjunction) => "Your thinking is sharp and your words land well.",
        (Mercury, Mercury, Square | Opposition) => "Crossed wires are likely; double-check messages and plans.",
        (Mercury, Sun, Trine | Sextile) => "Clear communication helps you make your case.",
        (Mercury, Jupiter, Trine | Sextile) => "Big ideas flow; good for learning, writing and negotiating.",

        // Venus
        (Venus, Sun, Conjunction | Trine | Sextile) => "You shine in company; love and appreciation find you.",
        (Venus, Venus, Conjunction) => "A sweet reset for relationships and personal values.",
        (Venus, Moon, Trine | Sextile) => "Comfort, beauty and tenderness soothe the heart.",
        (Venus, Mars, Conjunction | Trine | Sextile) => "Attraction and creative spark run high.",
        (Venus, Mars, Square | Opposition) => "Desire and harmony clash; romance needs honesty.",
        (Venus, Saturn, Square | Opposition) => "Relationships are tested; commitments show their true weight.",

        // Mars
        (Mars, Sun, Conjunction) => "A surge of energy: start something bold.",
        (Mars, Sun, Square | Opposition) => "Conflict with authority or your own limits; pick your battles.",
        (Mars, Mars, Square | Opposition) => "Frustration builds if energy has no outlet. Move your body.",
        (Mars, Venus, Conjunction | Trine | Sextile) => "Passion and initiative in love; make the first move.",
        (Mars, Mercury, Square | Opposition) => "Sharp words come fast. Argue ideas, not people.",

        // Jupiter
        (Jupiter, Sun, Conjunction | Trine | Sextile) => "Confidence and opportunity expand. Say yes to growth.",
        (Jupiter, Moon, Trine | Sextile) => "Generosity and optimism lift your spirits.",
        (Jupiter, Venus, Conjunction | Trine | Sextile) => "A lucky stretch for love, money and pleasure.",
        (Jupiter, _, Square | Opposition) => "Too much of a good thing; watch overcommitment and excess.",
        (Jupiter, _, Conjunction) => "A door opens; expansion arrives where it touches you.",

        // Saturn
        (Saturn, Sun, Conjunction) => "A defining chapter of responsibility and self-definition begins.",
        (Saturn, Sun, Square | Opposition) => "Obstacles test your resolve; steady effort pays off later.",
        (Saturn, Moon, Square | Opposition) => "Emotional weight asks you to set firmer boundaries.",
        (Saturn, _, Trine | Sextile) => "Discipline is rewarded; build something that lasts.",
        (Saturn, _, Square | Opposition) => "Pressure reveals what needs restructuring.",

        // Outer planets
        (Uranus, _, Conjunction | Square | Opposition) => "Sudden change shakes up the familiar. Stay flexible.",
        (Uranus, _, Trine | Sextile) => "Fresh ideas and welcome surprises open new paths.",
        (Neptune, _, Conjunction | Square | Opposition) => "Boundaries blur; seek clarity before deciding.",
        (Neptune, _, Trine | Sextile) => "Intuition and imagination flow freely.",
        (Pluto, _, Conjunction | Square | Opposition) => "Deep transformation: something old ends so something true can grow.",
        (Pluto, _, Trine | Sextile) => "Quiet empowerment; you find strength in depth.",

        (_, _, Conjunction) => "Energies merge and intensify this area of life.",
        (_, _, Sextile) => "An easy opportunity appears if you act on it.",
        (_, _, Square) => "Tension creates the push needed for growth.",
        (_, _, Trine) => "Things flow with little effort; enjoy the support.",
        (_, _, Opposition) => "A balancing act between two sides of yourself or others.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_combination_has_text() {
        for transit in Planet::ALL {
            for natal in Planet::ALL {
                for aspect in AspectType::ALL {
                    assert!(!interpret(transit, natal, aspect).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_specific_pair_beats_default() {
        assert_ne!(
            interpret(Planet::Venus, Planet::Mars, AspectType::Trine),
            interpret(Planet::Mercury, Planet::Mars, AspectType::Trine)
        );
        assert_eq!(
            interpret(Planet::Mercury, Planet::Mars, AspectType::Trine),
            "Things flow with little effort; enjoy the support."
        );
    }
}
