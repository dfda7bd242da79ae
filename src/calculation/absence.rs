//! Absent day calculation.
//!
//! Holidays and attended days are assumed to cover every non-absent day of a
//! 30-day month. Attendance on a holiday is not cross-checked, so such a day
//! is counted twice.

use crate::models::{AuditStep, AuditWarning};

use super::period::DAYS_IN_MONTH;

/// Warning code raised when holidays and attendance exceed the month.
pub const ABSENT_DAYS_CLAMPED: &str = "ABSENT_DAYS_CLAMPED";

/// The result of an absent day calculation.
#[derive(Debug, Clone)]
pub struct AbsentDaysResult {
    /// Days counted as absent.
    pub absent_days: u32,
    /// Set when holidays plus attendance exceeded the month.
    pub warning: Option<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates `max(0, 30 - (holidays + attendance_days))`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_absent_days;
///
/// assert_eq!(calculate_absent_days(4, 20, 1).absent_days, 6);
/// assert_eq!(calculate_absent_days(8, 25, 1).absent_days, 0);
/// ```
pub fn calculate_absent_days(
    holidays: u32,
    attendance_days: u32,
    step_number: u32,
) -> AbsentDaysResult {
    let covered = holidays.saturating_add(attendance_days);
    let absent_days = DAYS_IN_MONTH.saturating_sub(covered);

    let warning = (covered > DAYS_IN_MONTH).then(|| AuditWarning {
        code: ABSENT_DAYS_CLAMPED.to_string(),
        message: format!(
            "{} holidays and {} attended days exceed the {}-day month; absent days set to 0",
            holidays, attendance_days, DAYS_IN_MONTH
        ),
        severity: "low".to_string(),
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "absent_days".to_string(),
        rule_name: "Absent Days".to_string(),
        input: serde_json::json!({
            "days_in_month": DAYS_IN_MONTH,
            "holidays": holidays,
            "attendance_days": attendance_days
        }),
        output: serde_json::json!({
            "absent_days": absent_days
        }),
        reasoning: format!(
            "max(0, {} - ({} + {})) = {}",
            DAYS_IN_MONTH, holidays, attendance_days, absent_days
        ),
    };

    AbsentDaysResult {
        absent_days,
        warning,
        audit_step,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_absent_days_stay_within_month(
            holidays in 0u32..=40,
            attendance in 0u32..=40
        ) {
            let result = calculate_absent_days(holidays, attendance, 1);
            prop_assert!(result.absent_days <= DAYS_IN_MONTH);
            prop_assert_eq!(result.warning.is_some(), holidays + attendance > DAYS_IN_MONTH);
            if holidays + attendance <= DAYS_IN_MONTH {
                prop_assert_eq!(result.absent_days + holidays + attendance, DAYS_IN_MONTH);
            }
        }
    }
}
