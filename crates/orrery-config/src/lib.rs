use anyhow::Context;
use orrery::{EngineSettings, GeoLocation};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ORRERY_CONFIG";

/// Relative locations tried when no path is given (workspace root, then from
/// inside `apps/<bin>`).
const SEARCH_PATHS: [&str; 2] = ["configs/orrery.toml", "../../configs/orrery.toml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Swiss,
    Mean,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub height: f64,
    pub utc_offset_minutes: i32,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        // Greenwich
        Self {
            latitude: 51.4779,
            longitude: 0.0,
            height: 0.0,
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EphemerisConfig {
    pub backend: Backend,
    /// Swiss Ephemeris data directory. Unset means Moshier mode.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    pub observer: ObserverConfig,
    pub ephemeris: EphemerisConfig,
}

impl OrreryConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: OrreryConfig =
            toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse orrery.toml: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Load from `explicit`, then `ORRERY_CONFIG`, then the common relative
    /// locations. Finding nothing is not an error: defaults apply.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        for p in &SEARCH_PATHS {
            let path = Path::new(p);
            if path.exists() {
                log::debug!("Using config {}", path.display());
                return Self::from_file(path);
            }
        }
        log::info!("No orrery.toml found in {:?}, using defaults", SEARCH_PATHS);
        Ok(Self::default())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !self.observer().is_valid() {
            anyhow::bail!(
                "observer location out of range: lat {}, lon {}",
                self.observer.latitude,
                self.observer.longitude
            );
        }
        // Real offsets span UTC-12 to UTC+14
        if !(-12 * 60..=14 * 60).contains(&self.observer.utc_offset_minutes) {
            anyhow::bail!(
                "observer.utc_offset_minutes out of range: {}",
                self.observer.utc_offset_minutes
            );
        }
        Ok(())
    }

    pub fn observer(&self) -> GeoLocation {
        GeoLocation {
            lat: self.observer.latitude,
            lon: self.observer.longitude,
            height: self.observer.height,
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            utc_offset_minutes: self.observer.utc_offset_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = OrreryConfig::from_toml_str("").unwrap();
        assert_eq!(config, OrreryConfig::default());
        assert_eq!(config.ephemeris.backend, Backend::Swiss);
        assert!(config.ephemeris.path.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = OrreryConfig::from_toml_str(
            r#"
            [observer]
            latitude = 40.7128
            longitude = -74.006
            utc_offset_minutes = -300

            [ephemeris]
            backend = "mean"
            "#,
        )
        .unwrap();

        assert_eq!(config.observer.height, 0.0);
        assert_eq!(config.observer().lon, -74.006);
        assert_eq!(config.engine_settings().utc_offset_minutes, -300);
        assert_eq!(config.ephemeris.backend, Backend::Mean);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(OrreryConfig::from_toml_str("[observer]\nlatitude = 95.0").is_err());
        assert!(OrreryConfig::from_toml_str("[observer]\nutc_offset_minutes = 900").is_err());
        assert!(OrreryConfig::from_toml_str("[ephemeris]\nbackend = \"jpl\"").is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ephemeris]\nbackend = \"mean\"").unwrap();

        let config = OrreryConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.ephemeris.backend, Backend::Mean);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = OrreryConfig::load(Some(Path::new("/no/such/orrery.toml"))).unwrap_err();
        assert!(err.to_string().contains("Could not read config"));
    }
}
