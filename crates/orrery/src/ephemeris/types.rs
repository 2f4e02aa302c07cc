use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geocentric ecliptic coordinates of date, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
}

/// Lunar illumination derived from the Sun-Moon elongation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Illumination {
    /// Illuminated fraction of the disc (0-1)
    pub fraction: f64,
    /// Moon minus Sun longitude (0-360); 0 = new, 180 = full
    pub phase_angle: f64,
}

impl Illumination {
    pub fn from_phase_angle(phase_angle: f64) -> Self {
        let fraction = (1.0 - phase_angle.to_radians().cos()) / 2.0;
        Self {
            fraction: fraction.clamp(0.0, 1.0),
            phase_angle,
        }
    }
}

/// Geographic location of an observer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive
    pub lat: f64,
    /// Longitude in degrees, east positive
    pub lon: f64,
    /// Height above sea level in meters
    #[serde(default)]
    pub height: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            height: 0.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
            && self.height.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiseSet {
    Rise,
    Set,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LunarEclipseKind {
    Penumbral,
    Partial,
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolarEclipseKind {
    Partial,
    /// Total or annular; the axis of the lunar shadow meets the Earth.
    Central,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarEclipse {
    pub peak: DateTime<Utc>,
    pub kind: LunarEclipseKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarEclipse {
    pub peak: DateTime<Utc>,
    pub kind: SolarEclipseKind,
}
