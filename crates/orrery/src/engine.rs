//! The engine value every operation hangs off.
//!
//! Each component module adds its operations in its own `impl<E> Engine<E>`
//! block; this file only holds construction and the local-time helpers they
//! share.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::Ephemeris;
use crate::error::{AstroError, AstroResult};

/// Settings shared by all engine operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    /// Offset of the user's civil time from UTC, in minutes. Calendar days
    /// (daily summaries, month/year scans, weekday rulers) are taken in this
    /// offset.
    pub utc_offset_minutes: i32,
}

impl EngineSettings {
    pub fn utc_offset(&self) -> FixedOffset {
        // Offsets beyond +-24h are clamped to UTC
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix())
    }
}

/// Astrological computation engine over an ephemeris backend.
pub struct Engine<E> {
    ephemeris: E,
    settings: EngineSettings,
}

impl<E: Ephemeris> Engine<E> {
    pub fn new(ephemeris: E) -> Self {
        Self::with_settings(ephemeris, EngineSettings::default())
    }

    pub fn with_settings(ephemeris: E, settings: EngineSettings) -> Self {
        Self {
            ephemeris,
            settings,
        }
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Local calendar date of an instant.
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.settings.utc_offset()).date_naive()
    }

    /// Instant of local wall-clock `hour`:00 on `date`.
    pub(crate) fn local_time(&self, date: NaiveDate, hour: u32) -> AstroResult<DateTime<Utc>> {
        let local = date
            .and_hms_opt(hour, 0, 0)
            .ok_or(AstroError::InvalidDate(date))?;
        let offset = Duration::seconds(i64::from(self.settings.utc_offset().local_minus_utc()));
        let utc = local
            .checked_sub_signed(offset)
            .ok_or(AstroError::InvalidDate(date))?;
        Ok(Utc.from_utc_datetime(&utc))
    }

    /// Fixed daily sampling instant (local noon) used by the day-stepping scans.
    pub(crate) fn local_noon(&self, date: NaiveDate) -> AstroResult<DateTime<Utc>> {
        self.local_time(date, 12)
    }

    /// `date` moved by `days`, failing at the ends of the calendar.
    pub(crate) fn shift_date(date: NaiveDate, days: i64) -> AstroResult<NaiveDate> {
        date.checked_add_signed(Duration::days(days))
            .ok_or(AstroError::InvalidDate(date))
    }

    pub(crate) fn local_midnight(&self, date: NaiveDate) -> AstroResult<DateTime<Utc>> {
        self.local_time(date, 0)
    }
}
