use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::zodiac::Planet;

/// Errors raised by an ephemeris backend.
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {planet} at {datetime}: {message}")]
    CalculationFailed {
        planet: Planet,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("Julian day {jd} is outside the supported time range")]
    OutOfRange { jd: f64 },
}

/// Errors raised by engine operations.
#[derive(Error, Debug)]
pub enum AstroError {
    #[error("Ephemeris unavailable: {0}")]
    EphemerisUnavailable(#[from] EphemerisError),
    #[error("Invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Invalid calendar date: {0}")]
    InvalidDate(NaiveDate),
    #[error("Invalid year: {0}")]
    InvalidYear(i32),
    #[error("Invalid observer location: latitude {lat}, longitude {lon}")]
    InvalidLocation { lat: f64, lon: f64 },
}

pub type AstroResult<T> = Result<T, AstroError>;
