//! Salary period model.
//!
//! This module contains the [`SalaryPeriod`] type, the calendar month a salary
//! calculation covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The calendar month a salary is calculated for.
///
/// # Example
///
/// ```
/// use salary_engine::models::SalaryPeriod;
/// use chrono::NaiveDate;
///
/// let period = SalaryPeriod {
///     year: 2026,
///     month: 2,
///     month_name: "February".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPeriod {
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u32,
    /// The English name of the month, used as the summary key.
    pub month_name: String,
    /// The first day of the month (inclusive).
    pub start_date: NaiveDate,
    /// The last day of the month (inclusive).
    pub end_date: NaiveDate,
}

impl SalaryPeriod {
    /// Checks if a given date falls within this period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
