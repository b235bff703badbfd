// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date, time and location of a scheduled game.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Time};

/// Location recorded for a cancelled game.
///
/// Never accepted as a real venue, so a cancellation can always be told
/// apart from a reschedule.
pub const CANCELLED_LOCATION: &str = "CANCELLED";

/// Longest accepted location, matching the `VARCHAR(255)` columns.
pub const MAX_LOCATION_LEN: usize = 255;

/// Dates are stored as four-digit `YYYY-MM-DD` strings.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A date/time/location snapshot.
///
/// This is the unit stored by the schedule record, every history entry and
/// both sides of a change request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleSlot {
    date: Date,
    time: Time,
    location: String,
}

impl ScheduleSlot {
    /// Creates a slot at a real venue.
    ///
    /// The location is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLocation` if the location is empty, too
    /// long or the reserved cancellation marker, and
    /// `DomainError::DateParseError` if the year is outside 1..=9999.
    pub fn new(date: Date, time: Time, location: &str) -> Result<Self, DomainError> {
        check_year(date, &format_date(date))?;
        let location: &str = location.trim();
        if location.is_empty() {
            return Err(DomainError::InvalidLocation(String::from(
                "Location cannot be empty",
            )));
        }
        if location.chars().count() > MAX_LOCATION_LEN {
            return Err(DomainError::InvalidLocation(format!(
                "Location cannot exceed {MAX_LOCATION_LEN} characters"
            )));
        }
        if location.eq_ignore_ascii_case(CANCELLED_LOCATION) {
            return Err(DomainError::InvalidLocation(format!(
                "'{location}' is reserved for cancelled games"
            )));
        }
        Ok(Self {
            date,
            time: normalize_time(time),
            location: location.to_string(),
        })
    }

    /// Creates the slot recorded when a game is cancelled.
    #[must_use]
    pub fn cancelled(date: Date, time: Time) -> Self {
        Self {
            date,
            time: normalize_time(time),
            location: CANCELLED_LOCATION.to_string(),
        }
    }

    /// Parses a slot from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the date or time cannot be parsed or the location
    /// is invalid.
    pub fn parse(date: &str, time: &str, location: &str) -> Result<Self, DomainError> {
        Self::new(parse_date(date)?, parse_time(time)?, location)
    }

    /// Rebuilds a slot from stored columns.
    ///
    /// Unlike [`ScheduleSlot::parse`] this accepts the cancellation marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored date or time is malformed.
    pub fn from_stored(date: &str, time: &str, location: &str) -> Result<Self, DomainError> {
        let date: Date = parse_date(date)?;
        let time: Time = parse_time(time)?;
        if location == CANCELLED_LOCATION {
            return Ok(Self::cancelled(date, time));
        }
        Self::new(date, time, location)
    }

    /// Returns the game date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Returns the start time.
    #[must_use]
    pub const fn time(&self) -> Time {
        self.time
    }

    /// Returns the location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns whether this slot marks a cancelled game.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        self.location == CANCELLED_LOCATION
    }

    /// Returns the date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }

    /// Returns the time as `HH:MM`.
    #[must_use]
    pub fn time_string(&self) -> String {
        format_time(self.time)
    }

    /// Returns whether the date or time differ from `other`.
    #[must_use]
    pub fn moves_date_or_time(&self, other: &Self) -> bool {
        self.date != other.date || self.time != other.time
    }
}

impl std::fmt::Display for ScheduleSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} @ {}",
            self.date_string(),
            self.time_string(),
            self.location
        )
    }
}

/// Schedules are kept at minute resolution.
fn normalize_time(time: Time) -> Time {
    time.replace_second(0)
        .and_then(|t| t.replace_nanosecond(0))
        .unwrap_or(time)
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date
/// or the year is outside 1..=9999.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    let date: Date = Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })?;
    check_year(date, value)?;
    Ok(date)
}

fn check_year(date: Date, date_string: &str) -> Result<(), DomainError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        Ok(())
    } else {
        Err(DomainError::DateParseError {
            date_string: date_string.to_string(),
            error: format!("year must be between {MIN_YEAR} and {MAX_YEAR}"),
        })
    }
}

/// Parses an `HH:MM` or `HH:MM:SS` time of day.
///
/// Seconds are discarded.
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the string is not a valid time.
pub fn parse_time(value: &str) -> Result<Time, DomainError> {
    let trimmed: &str = value.trim();
    Time::parse(trimmed, format_description!("[hour]:[minute]"))
        .or_else(|_| Time::parse(trimmed, format_description!("[hour]:[minute]:[second]")))
        .map(normalize_time)
        .map_err(|e| DomainError::TimeParseError {
            time_string: value.to_string(),
            error: e.to_string(),
        })
}

/// Formats a date as `YYYY-MM-DD`.
///
/// Lossless for every date [`parse_date`] accepts.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Formats a time as `HH:MM`.
#[must_use]
pub fn format_time(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
