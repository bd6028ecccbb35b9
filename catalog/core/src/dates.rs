//! Date Formatting
//!
//! Turns the ISO-8601 `updated` timestamps of podcast records into the text
//! shown on cards and in the detail modal.
//!
//! Two styles exist, but a session only ever uses one: the [`DateFormatter`]
//! built from configuration is handed to both the grid and the modal.
//!
//! - [`DateStyle::Calendar`] (canonical): `Updated January 15, 2023`
//! - [`DateStyle::Relative`]: `Updated 3 days ago`, falling back to the
//!   calendar text once the date is a month or more away
//!
//! Unparsable input never escapes as an error from [`DateFormatter::format`];
//! it renders as [`INVALID_DATE_TEXT`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text rendered when the input cannot be parsed as a date
pub const INVALID_DATE_TEXT: &str = "Updated Invalid Date";

const MS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Date parsing failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Input is not a recognised ISO-8601 date or date-time
    #[error("Malformed date: {0:?}")]
    Malformed(String),
}

/// Which rendering of the updated date is in use
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// Long calendar date (`Updated January 15, 2023`)
    #[default]
    Calendar,
    /// Days/weeks ago for recent dates, calendar date otherwise
    Relative,
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calendar => write!(f, "calendar"),
            Self::Relative => write!(f, "relative"),
        }
    }
}

impl FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calendar" | "long" => Ok(Self::Calendar),
            "relative" => Ok(Self::Relative),
            other => Err(format!("unknown date style: {other}")),
        }
    }
}

/// Parse the date formats the catalog API emits
///
/// Accepts RFC 3339 (`2022-11-03T07:00:00.000Z`), a naive date-time
/// (`2022-11-03T07:00:00`) or a plain date (`2022-11-03`). Naive values are
/// taken as UTC.
///
/// # Errors
///
/// Returns [`DateError::Malformed`] for anything else.
pub fn parse_iso(input: &str) -> Result<DateTime<Utc>, DateError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DateError::Malformed(input.to_string()))
}

fn calendar_text(date: &DateTime<Utc>) -> String {
    format!("Updated {}", date.format("%B %-d, %Y"))
}

fn relative_text(date: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - *date).num_milliseconds().unsigned_abs();
    let days = diff_ms.div_ceil(MS_PER_DAY);

    match days {
        1 => "Updated 1 day ago".to_string(),
        d if d < 7 => format!("Updated {d} days ago"),
        d if d < 30 => format!("Updated {} weeks ago", d.div_ceil(7)),
        _ => calendar_text(date),
    }
}

/// Formats `updated` timestamps in one configured style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateFormatter {
    style: DateStyle,
}

impl DateFormatter {
    /// Create a formatter for the given style
    #[must_use]
    pub const fn new(style: DateStyle) -> Self {
        Self { style }
    }

    /// The canonical calendar formatter
    #[must_use]
    pub const fn calendar() -> Self {
        Self::new(DateStyle::Calendar)
    }

    /// The style this formatter renders
    #[must_use]
    pub fn style(&self) -> DateStyle {
        self.style
    }

    /// Format a timestamp, falling back to [`INVALID_DATE_TEXT`]
    #[must_use]
    pub fn format(&self, iso: &str) -> String {
        self.format_at(iso, Utc::now())
    }

    /// Format against an explicit "now" (only relevant for the relative style)
    #[must_use]
    pub fn format_at(&self, iso: &str, now: DateTime<Utc>) -> String {
        match self.try_format_at(iso, now) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(error = %err, "Falling back to invalid date text");
                INVALID_DATE_TEXT.to_string()
            }
        }
    }

    /// Format a timestamp, surfacing parse failures
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Malformed`] when the input cannot be parsed.
    pub fn try_format(&self, iso: &str) -> Result<String, DateError> {
        self.try_format_at(iso, Utc::now())
    }

    fn try_format_at(&self, iso: &str, now: DateTime<Utc>) -> Result<String, DateError> {
        let date = parse_iso(iso)?;
        Ok(match self.style {
            DateStyle::Calendar => calendar_text(&date),
            DateStyle::Relative => relative_text(&date, now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_calendar_format() {
        let formatter = DateFormatter::calendar();
        assert_eq!(formatter.format("2023-01-15"), "Updated January 15, 2023");
        assert_eq!(
            formatter.format("2022-11-03T07:00:00.000Z"),
            "Updated November 3, 2022"
        );
        assert_eq!(
            formatter.format("2022-11-03T07:00:00"),
            "Updated November 3, 2022"
        );
    }

    #[test]
    fn test_malformed_date_falls_back() {
        let formatter = DateFormatter::calendar();
        assert_eq!(formatter.format("not-a-date"), INVALID_DATE_TEXT);
        assert_eq!(formatter.format(""), INVALID_DATE_TEXT);
        assert_eq!(
            formatter.try_format("not-a-date"),
            Err(DateError::Malformed("not-a-date".to_string()))
        );
    }

    #[test]
    fn test_offsets_are_normalised_to_utc() {
        let formatter = DateFormatter::calendar();
        assert_eq!(
            formatter.format("2023-01-15T23:30:00-05:00"),
            "Updated January 16, 2023"
        );
    }

    #[test]
    fn test_relative_format() {
        let formatter = DateFormatter::new(DateStyle::Relative);
        let iso = |d: DateTime<Utc>| d.to_rfc3339();

        assert_eq!(
            formatter.format_at(&iso(now() - Duration::days(1)), now()),
            "Updated 1 day ago"
        );
        assert_eq!(
            formatter.format_at(&iso(now() - Duration::days(3)), now()),
            "Updated 3 days ago"
        );
        assert_eq!(
            formatter.format_at(&iso(now() - Duration::days(10)), now()),
            "Updated 2 weeks ago"
        );
        assert_eq!(
            formatter.format_at("2022-06-01T12:00:00Z", now()),
            "Updated June 1, 2022"
        );
    }

    #[test]
    fn test_relative_partial_day_rounds_up() {
        let formatter = DateFormatter::new(DateStyle::Relative);
        let date = now() - Duration::hours(30);
        assert_eq!(
            formatter.format_at(&date.to_rfc3339(), now()),
            "Updated 2 days ago"
        );
    }

    #[test]
    fn test_relative_malformed_falls_back() {
        let formatter = DateFormatter::new(DateStyle::Relative);
        assert_eq!(formatter.format_at("yesterday", now()), INVALID_DATE_TEXT);
    }

    #[test]
    fn test_style_parse() {
        assert_eq!("Relative".parse::<DateStyle>(), Ok(DateStyle::Relative));
        assert_eq!("calendar".parse::<DateStyle>(), Ok(DateStyle::Calendar));
        assert!("fuzzy".parse::<DateStyle>().is_err());
    }
}
