//! Final salary calculation.
//!
//! Pay is earned for attended days only, so absent days are already excluded
//! from the worked salary. The absent deduction is computed for reporting and
//! is not subtracted a second time.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::AuditStep;

use super::rounding::{out_of_range, round_money};

/// The inputs of the final salary calculation.
#[derive(Debug, Clone, Copy)]
pub struct FinalSalaryInput {
    /// Distinct days attended.
    pub attendance_days: u32,
    /// Days counted as absent.
    pub absent_days: u32,
    /// Working hours per day.
    pub working_hours_per_day: Decimal,
    /// Unrounded hourly rate.
    pub hourly_rate: Decimal,
    /// Rounded money added through adjustments.
    pub total_additions: Decimal,
    /// Rounded money deducted through adjustments.
    pub total_deductions: Decimal,
}

/// The result of the final salary calculation, rounded to two decimal places.
#[derive(Debug, Clone)]
pub struct FinalSalaryResult {
    /// Hours of absence.
    pub absent_hours: Decimal,
    /// The value of the absent hours.
    pub absent_deduction: Decimal,
    /// Hours worked on attended days.
    pub worked_hours: Decimal,
    /// Pay for the worked hours.
    pub worked_salary: Decimal,
    /// `max(0, worked_salary + total_additions - total_deductions)`.
    pub final_salary: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the worked salary and the final salary after adjustments.
///
/// # Errors
///
/// Returns `InvalidInput` for field `salary` if a product or the gross amount
/// leaves the range of `Decimal`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{calculate_final_salary, FinalSalaryInput};
/// use rust_decimal::Decimal;
///
/// let result = calculate_final_salary(
///     FinalSalaryInput {
///         attendance_days: 22,
///         absent_days: 4,
///         working_hours_per_day: Decimal::from(8),
///         hourly_rate: Decimal::new(125, 1),
///         total_additions: Decimal::ZERO,
///         total_deductions: Decimal::ZERO,
///     },
///     1,
/// ).unwrap();
/// assert_eq!(result.worked_salary, Decimal::from(2200));
/// assert_eq!(result.final_salary, Decimal::from(2200));
/// ```
pub fn calculate_final_salary(
    input: FinalSalaryInput,
    step_number: u32,
) -> EngineResult<FinalSalaryResult> {
    let absent_hours = Decimal::from(input.absent_days)
        .checked_mul(input.working_hours_per_day)
        .ok_or_else(out_of_range("salary"))?;
    let absent_deduction = absent_hours
        .checked_mul(input.hourly_rate)
        .ok_or_else(out_of_range("salary"))?;

    let worked_hours = Decimal::from(input.attendance_days)
        .checked_mul(input.working_hours_per_day)
        .ok_or_else(out_of_range("salary"))?;
    let worked_salary = worked_hours
        .checked_mul(input.hourly_rate)
        .ok_or_else(out_of_range("salary"))?;

    let gross = worked_salary
        .checked_add(input.total_additions)
        .and_then(|g| g.checked_sub(input.total_deductions))
        .ok_or_else(out_of_range("salary"))?;
    let final_salary = round_money(gross.max(Decimal::ZERO));

    let audit_step = AuditStep {
        step_number,
        rule_id: "final_salary".to_string(),
        rule_name: "Final Salary".to_string(),
        input: serde_json::json!({
            "attendance_days": input.attendance_days,
            "absent_days": input.absent_days,
            "working_hours_per_day": input.working_hours_per_day.to_string(),
            "hourly_rate": input.hourly_rate.to_string(),
            "total_additions": input.total_additions.to_string(),
            "total_deductions": input.total_deductions.to_string()
        }),
        output: serde_json::json!({
            "absent_hours": round_money(absent_hours).to_string(),
            "absent_deduction": round_money(absent_deduction).to_string(),
            "worked_hours": round_money(worked_hours).to_string(),
            "worked_salary": round_money(worked_salary).to_string(),
            "final_salary": final_salary.to_string()
        }),
        reasoning: format!(
            "max(0, ${} + ${} - ${}) = ${}",
            round_money(worked_salary),
            input.total_additions,
            input.total_deductions,
            final_salary
        ),
    };

    Ok(FinalSalaryResult {
        absent_hours: round_money(absent_hours),
        absent_deduction: round_money(absent_deduction),
        worked_hours: round_money(worked_hours),
        worked_salary: round_money(worked_salary),
        final_salary,
        audit_step,
    })
}
