//! Timezone normalization for every timestamp the service publishes.
//!
//! The service is anchored to one target timezone for its notion of "now" and for hour
//! alignment, independent of the queried city's own timezone.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::Serializer;
use std::fmt::Debug;

use crate::error::{Result, WeatherError};

/// Canonical textual form of a published timestamp.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Canonical textual form of a requested calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of the wall-clock time a request is centred on.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeNormalizer {
    tz: Tz,
}

impl TimeNormalizer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Express a provider UTC instant in the target timezone.
    pub fn normalize(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.tz)
    }

    pub fn format(&self, instant: &DateTime<Tz>) -> String {
        instant.with_timezone(&self.tz).format(STAMP_FORMAT).to_string()
    }

    pub fn parse(&self, text: &str) -> Result<DateTime<Tz>> {
        let naive = NaiveDateTime::parse_from_str(text, STAMP_FORMAT)
            .map_err(|e| WeatherError::InvalidFormat(format!("'{text}': {e}")))?;
        self.localize(naive)
    }

    /// Attach the target timezone to a wall-clock time.
    ///
    /// Ambiguous times resolve to the earlier instant; times inside a DST gap move forward
    /// by one hour.
    pub fn localize(&self, naive: NaiveDateTime) -> Result<DateTime<Tz>> {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(instant) => Ok(instant),
            LocalResult::Ambiguous(earliest, _) => Ok(earliest),
            LocalResult::None => self
                .tz
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest()
                .ok_or_else(|| {
                    WeatherError::InvalidFormat(format!("{naive} does not exist in {}", self.tz))
                }),
        }
    }

    /// `hour:00` of `date` in the target timezone.
    pub fn hour_of(&self, date: NaiveDate, hour: u32) -> Result<DateTime<Tz>> {
        let naive = date.and_hms_opt(hour, 0, 0).ok_or_else(|| {
            WeatherError::InvalidFormat(format!("hour {hour} is out of range"))
        })?;
        self.localize(naive)
    }

    /// The clock's time in the target timezone, snapped to `HH:59:00`.
    pub fn aligned_now(&self, clock: &dyn Clock) -> DateTime<Tz> {
        let now = self.normalize(clock.now());
        now.with_minute(59)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now)
    }
}

pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|e| WeatherError::InvalidFormat(format!("'{text}': {e}")))
}

pub(crate) fn serialize_stamp<S: Serializer>(
    instant: &DateTime<Tz>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&instant.format(STAMP_FORMAT))
}
