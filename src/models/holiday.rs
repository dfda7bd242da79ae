//! Holiday calendar models.
//!
//! This module contains the [`HolidayRecord`] and [`HolidayType`] types. Weekly
//! holidays recur by weekday name but are stored as dated rows for each month,
//! so both kinds carry a date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of a holiday record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayType {
    /// A one-off named holiday.
    Official,
    /// A recurring non-working day of the week.
    Weekly,
}

impl HolidayType {
    /// Returns the stored name of the holiday type.
    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayType::Official => "official",
            HolidayType::Weekly => "weekly",
        }
    }
}

/// A single dated holiday.
///
/// # Example
///
/// ```
/// use salary_engine::models::{HolidayRecord, HolidayType};
/// use chrono::NaiveDate;
///
/// let holiday = HolidayRecord {
///     date: NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
///     holiday_type: HolidayType::Weekly,
///     day: Some("Friday".to_string()),
///     name: None,
/// };
/// assert!(holiday.counts_as_day_off());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// The date the holiday falls on.
    pub date: NaiveDate,
    /// Whether the holiday is official or weekly.
    #[serde(rename = "type")]
    pub holiday_type: HolidayType,
    /// The weekday name of a weekly holiday (e.g., "Friday").
    #[serde(default)]
    pub day: Option<String>,
    /// The name of an official holiday.
    #[serde(default)]
    pub name: Option<String>,
}

impl HolidayRecord {
    /// Returns true if this record counts towards the holidays of a period.
    ///
    /// Official holidays always count; weekly holidays only count when their
    /// weekday is recorded.
    pub fn counts_as_day_off(&self) -> bool {
        match self.holiday_type {
            HolidayType::Official => true,
            HolidayType::Weekly => self.day.is_some(),
        }
    }
}
