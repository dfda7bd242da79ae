//! Working hours per day calculation.
//!
//! This module derives how many hours an employee works per day from their
//! attendance and leave times of day. Shifts that appear longer than
//! [`MAX_SHIFT_HOURS`] are treated as wrapping around midnight.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Hours per day assumed when the attendance or leave time is missing.
pub const DEFAULT_WORKING_HOURS: u32 = 8;

/// Longest span taken at face value; longer spans are wrapped around midnight.
pub const MAX_SHIFT_HOURS: u32 = 12;

const HOURS_PER_DAY: u32 = 24;
const SECONDS_PER_HOUR: i64 = 3600;

/// The result of a working hours calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct WorkingHoursResult {
    /// Working hours per day.
    pub hours: Decimal,
    /// True if the default was used because a time was missing.
    pub used_default: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the working hours per day of an employee.
///
/// With both times present the span is `|leave - attendance|` in hours; a span
/// over 12 hours becomes `24 - span` (e.g., 22:00 to 06:00). With either time
/// missing the result is 8 hours.
///
/// # Errors
///
/// Returns `InvalidInput` if the resolved hours are not positive, which happens
/// when the attendance and leave times are equal.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_working_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let result = calculate_working_hours(
///     NaiveTime::from_hms_opt(22, 0, 0),
///     NaiveTime::from_hms_opt(6, 0, 0),
///     1,
/// ).unwrap();
/// assert_eq!(result.hours, Decimal::from(8));
/// ```
pub fn calculate_working_hours(
    attendance_time: Option<NaiveTime>,
    leave_time: Option<NaiveTime>,
    step_number: u32,
) -> EngineResult<WorkingHoursResult> {
    let (attendance, leave) = match (attendance_time, leave_time) {
        (Some(attendance), Some(leave)) => (attendance, leave),
        _ => {
            let hours = Decimal::from(DEFAULT_WORKING_HOURS);
            let audit_step = AuditStep {
                step_number,
                rule_id: "working_hours".to_string(),
                rule_name: "Working Hours Per Day".to_string(),
                input: serde_json::json!({
                    "attendance_time": attendance_time.map(|t| t.to_string()),
                    "leave_time": leave_time.map(|t| t.to_string())
                }),
                output: serde_json::json!({
                    "hours": hours.to_string(),
                    "source": "default"
                }),
                reasoning: format!(
                    "Attendance or leave time missing, using default of {} hours",
                    DEFAULT_WORKING_HOURS
                ),
            };
            return Ok(WorkingHoursResult {
                hours,
                used_default: true,
                audit_step,
            });
        }
    };

    let span_seconds = (leave - attendance).num_seconds();
    let span = (Decimal::from(span_seconds) / Decimal::from(SECONDS_PER_HOUR)).abs();

    let wrapped = span > Decimal::from(MAX_SHIFT_HOURS);
    let hours = if wrapped {
        Decimal::from(HOURS_PER_DAY) - span
    } else {
        span
    };

    if hours <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "working_hours",
            format!(
                "attendance {} and leave {} give {} working hours per day",
                attendance, leave, hours
            ),
        ));
    }

    let reasoning = if wrapped {
        format!(
            "Span between {} and {} is {} hours (over {}), wrapped to {} hours",
            attendance, leave, span, MAX_SHIFT_HOURS, hours
        )
    } else {
        format!(
            "Span between {} and {} is {} hours",
            attendance, leave, hours
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "working_hours".to_string(),
        rule_name: "Working Hours Per Day".to_string(),
        input: serde_json::json!({
            "attendance_time": attendance.to_string(),
            "leave_time": leave.to_string()
        }),
        output: serde_json::json!({
            "hours": hours.to_string(),
            "wrapped": wrapped,
            "source": "shift_times"
        }),
        reasoning,
    };

    Ok(WorkingHoursResult {
        hours,
        used_default: false,
        audit_step,
    })
}
