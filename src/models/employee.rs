//! Employee profile model.
//!
//! This module defines the [`EmployeeProfile`] struct, the read-only view of an
//! employee that the salary calculation consumes.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee as seen by the salary calculation.
///
/// The profile is maintained by employee management; the calculator only
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name of the employee.
    #[serde(default)]
    pub name: Option<String>,
    /// Monthly base salary. Must be positive for a calculation to succeed.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Time of day the employee is expected to clock in.
    #[serde(default)]
    pub attendance_time: Option<NaiveTime>,
    /// Time of day the employee is expected to leave.
    #[serde(default)]
    pub leave_time: Option<NaiveTime>,
}

impl EmployeeProfile {
    /// Returns true if both the attendance and leave times are set.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::models::EmployeeProfile;
    /// use chrono::NaiveTime;
    ///
    /// let employee = EmployeeProfile {
    ///     id: "emp_001".to_string(),
    ///     name: None,
    ///     base_salary: None,
    ///     attendance_time: NaiveTime::from_hms_opt(9, 0, 0),
    ///     leave_time: None,
    /// };
    /// assert!(!employee.has_shift_times());
    /// ```
    pub fn has_shift_times(&self) -> bool {
        self.attendance_time.is_some() && self.leave_time.is_some()
    }
}
