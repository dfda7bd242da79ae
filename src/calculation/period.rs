//! Salary period resolution.
//!
//! Resolves a year/month pair into the first and last calendar day of the
//! month. Independently of the real month length, every salary calculation
//! treats a month as [`DAYS_IN_MONTH`] days.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::SalaryPeriod;

/// The number of days every month is treated as having.
pub const DAYS_IN_MONTH: u32 = 30;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the English name of a month (1-12).
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::month_name;
///
/// assert_eq!(month_name(3).unwrap(), "March");
/// assert!(month_name(13).is_err());
/// ```
pub fn month_name(month: u32) -> EngineResult<&'static str> {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .ok_or_else(|| {
            EngineError::invalid_input("month", format!("{} is not a month (1-12)", month))
        })
}

/// Resolves the calendar period for a year and month.
///
/// # Errors
///
/// Returns `InvalidInput` if the month is outside 1-12 or the year cannot be
/// represented as a calendar date.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::resolve_period;
/// use chrono::NaiveDate;
///
/// let period = resolve_period(2024, 2).unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(period.month_name, "February");
/// ```
pub fn resolve_period(year: i32, month: u32) -> EngineResult<SalaryPeriod> {
    let name = month_name(month)?;

    let start_date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::invalid_input("year", format!("{} is out of the supported range", year))
    })?;

    // The day before the first of the next month
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let end_date = next_month_start
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| {
            EngineError::invalid_input("year", format!("{} is out of the supported range", year))
        })?;

    Ok(SalaryPeriod {
        year: start_date.year(),
        month,
        month_name: name.to_string(),
        start_date,
        end_date,
    })
}
