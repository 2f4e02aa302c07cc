use crate::ephemeris::time::{datetime_to_julian_day, julian_day_to_datetime};
use crate::ephemeris::types::EclipticPosition;
use crate::ephemeris::Ephemeris;
use crate::error::EphemerisError;
use crate::zodiac::{normalize, Planet};
use chrono::{DateTime, Utc};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swisseph::swe::{calc_ut, set_ephe_path};

/// Swiss Ephemeris planet IDs
fn planet_code(planet: Planet) -> u32 {
    match planet {
        Planet::Sun => 0,
        Planet::Moon => 1,
        Planet::Mercury => 2,
        Planet::Venus => 3,
        Planet::Mars => 4,
        Planet::Jupiter => 5,
        Planet::Saturn => 6,
        Planet::Uranus => 7,
        Planet::Neptune => 8,
        Planet::Pluto => 9,
    }
}

/// FLG_SWIEPH: use Swiss Ephemeris data files
const FLG_SWIEPH: i32 = 2;
/// FLG_MOSEPH: built-in Moshier analytic theory, no data files
const FLG_MOSEPH: i32 = 4;
/// FLG_SPEED
const FLG_SPEED: i32 = 256;

/// Which Swiss Ephemeris theory backs the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwissMode {
    DataFiles,
    Moshier,
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    mode: SwissMode,
    // The C library keeps global state; serialize calls.
    lock: Mutex<()>,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Without a path (argument or `SWISS_EPHEMERIS_PATH`) the adapter runs
    /// the Moshier theory, which needs no data files.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.or_else(|| env::var("SWISS_EPHEMERIS_PATH").ok().map(PathBuf::from));

        let Some(path) = path else {
            return Ok(Self::moshier());
        };

        // Validate path exists
        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let path_str = path.to_string_lossy().into_owned();
        // The binding builds a CString and panics on interior NULs
        if path_str.contains('\0') {
            return Err(EphemerisError::FileNotFound {
                path: path_str,
                message: "Ephemeris path contains a NUL byte.".to_string(),
            });
        }

        let adapter = Self {
            ephemeris_path: Some(path),
            mode: SwissMode::DataFiles,
            lock: Mutex::new(()),
        };
        {
            let _guard = adapter.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            set_ephe_path(&path_str);
        }

        log::info!("Swiss Ephemeris data files at {}", path_str);
        Ok(adapter)
    }

    pub fn moshier() -> Self {
        Self {
            ephemeris_path: None,
            mode: SwissMode::Moshier,
            lock: Mutex::new(()),
        }
    }

    pub fn mode(&self) -> SwissMode {
        self.mode
    }

    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }

    fn flags(&self) -> i32 {
        match self.mode {
            SwissMode::DataFiles => FLG_SWIEPH | FLG_SPEED,
            SwissMode::Moshier => FLG_MOSEPH | FLG_SPEED,
        }
    }

    /// Calculate position for a single planet
    pub fn calc_planet_position(
        &self,
        planet: Planet,
        jd: f64,
    ) -> Result<EclipticPosition, EphemerisError> {
        let result = {
            let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            calc_ut(jd, planet_code(planet), self.flags() as u32)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            planet,
            datetime: julian_day_to_datetime(jd).unwrap_or_default(),
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let result_array = result.out;
        Ok(EclipticPosition {
            longitude: normalize(result_array[0]),
            latitude: result_array[1],
        })
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn ecliptic_position(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError> {
        self.calc_planet_position(planet, datetime_to_julian_day(at))
    }
}
