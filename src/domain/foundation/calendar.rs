//! Calendar value objects: launch dates and ISO 8601 weeks.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// ISO 8601 week-numbering (year, week) pair.
///
/// Weeks start on Monday and week 1 is the week holding the year's first
/// Thursday, so the ISO year can differ from the Gregorian year around
/// New Year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IsoWeek {
    pub year: i32,
    pub week: u32,
}

impl IsoWeek {
    /// Creates an IsoWeek, rejecting week numbers outside 1..=53.
    pub fn new(year: i32, week: u32) -> Result<Self, ValidationError> {
        if !(1..=53).contains(&week) {
            return Err(ValidationError::invalid_format(
                "iso_week",
                format!("week must be between 1 and 53, got {}", week),
            ));
        }
        Ok(Self { year, week })
    }

    /// ISO week containing the given date.
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Calendar date of a launch, without time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchDate(NaiveDate);

impl LaunchDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds a date from its parts, `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn iso_week(&self) -> IsoWeek {
        IsoWeek::of(self.0)
    }

    /// True when this date lies strictly after `today`.
    pub fn is_after(&self, today: NaiveDate) -> bool {
        self.0 > today
    }
}

impl fmt::Display for LaunchDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for LaunchDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("launch_date", e.to_string()))
    }
}
