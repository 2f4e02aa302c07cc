use anyhow::Context;
use orrery::positions::natal_positions;
use orrery::{Planet, PlanetPosition};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Parse a natal set written as `{"Sun": 123.4, "Moon": 5.0, ...}`.
///
/// Names match case-insensitively; unknown names are an error so typos do
/// not silently drop a body.
pub fn parse_natal(text: &str) -> anyhow::Result<Vec<PlanetPosition>> {
    let raw: BTreeMap<String, f64> =
        serde_json::from_str(text).context("natal set must be a JSON object of longitudes")?;

    let mut bodies = Vec::with_capacity(raw.len());
    for (name, longitude) in raw {
        let planet: Planet = name
            .parse()
            .map_err(|e| anyhow::anyhow!("natal set: {e}"))?;
        if !longitude.is_finite() {
            anyhow::bail!("natal set: {} longitude is not a number", planet);
        }
        bodies.push((planet, longitude));
    }
    bodies.sort_by_key(|(planet, _)| *planet);
    Ok(natal_positions(bodies))
}

pub fn load_natal(path: &Path) -> anyhow::Result<Vec<PlanetPosition>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read natal set {}", path.display()))?;
    parse_natal(&text).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_natal_in_canonical_order() {
        let natal = parse_natal(r#"{"moon": 5.0, "Sun": 365.5, "Venus": 10}"#).unwrap();
        let planets: Vec<Planet> = natal.iter().map(|p| p.planet).collect();
        assert_eq!(planets, vec![Planet::Sun, Planet::Moon, Planet::Venus]);
        assert!((natal[0].longitude - 5.5).abs() < 1e-9);
        assert!(natal.iter().all(|p| !p.retrograde));
    }

    #[test]
    fn test_unknown_body_is_rejected() {
        let err = parse_natal(r#"{"Chiron": 10.0}"#).unwrap_err();
        assert!(format!("{err:#}").contains("Chiron"));
    }

    #[test]
    fn test_load_natal_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Mars": 200.0}}"#).unwrap();
        let natal = load_natal(file.path()).unwrap();
        assert_eq!(natal.len(), 1);
        assert_eq!(natal[0].planet, Planet::Mars);
    }
}
