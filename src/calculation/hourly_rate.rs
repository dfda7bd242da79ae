//! Hourly rate derivation.
//!
//! The hourly rate spreads the monthly base salary over a fixed 30-day month
//! of the employee's working hours per day.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::period::DAYS_IN_MONTH;
use super::rounding::out_of_range;

/// The result of an hourly rate calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct HourlyRateResult {
    /// The unrounded hourly rate.
    pub rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Checks that a base salary is present and positive.
///
/// # Errors
///
/// Returns `InvalidInput` for a missing, zero or negative salary.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::validate_base_salary;
/// use rust_decimal::Decimal;
///
/// assert!(validate_base_salary(Some(Decimal::from(3000))).is_ok());
/// assert!(validate_base_salary(Some(Decimal::ZERO)).is_err());
/// assert!(validate_base_salary(None).is_err());
/// ```
pub fn validate_base_salary(base_salary: Option<Decimal>) -> EngineResult<Decimal> {
    match base_salary {
        Some(salary) if salary > Decimal::ZERO => Ok(salary),
        Some(salary) => Err(EngineError::invalid_input(
            "base_salary",
            format!("must be greater than zero, got {}", salary),
        )),
        None => Err(EngineError::invalid_input(
            "base_salary",
            "employee has no base salary",
        )),
    }
}

/// Calculates the hourly rate as `base_salary / (30 * working_hours_per_day)`.
///
/// # Errors
///
/// Returns `InvalidInput` if the working hours are not positive, or if the
/// rate leaves the range of `Decimal`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_hourly_rate;
/// use rust_decimal::Decimal;
///
/// let result = calculate_hourly_rate(Decimal::from(3000), Decimal::from(8), 2).unwrap();
/// assert_eq!(result.rate, Decimal::new(125, 1)); // 12.5
/// ```
pub fn calculate_hourly_rate(
    base_salary: Decimal,
    working_hours_per_day: Decimal,
    step_number: u32,
) -> EngineResult<HourlyRateResult> {
    if working_hours_per_day <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "working_hours",
            format!("must be greater than zero, got {}", working_hours_per_day),
        ));
    }

    let monthly_hours = Decimal::from(DAYS_IN_MONTH)
        .checked_mul(working_hours_per_day)
        .ok_or_else(out_of_range("working_hours"))?;
    let rate = base_salary
        .checked_div(monthly_hours)
        .ok_or_else(out_of_range("base_salary"))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "hourly_rate".to_string(),
        rule_name: "Hourly Rate".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "days_in_month": DAYS_IN_MONTH,
            "working_hours_per_day": working_hours_per_day.to_string()
        }),
        output: serde_json::json!({
            "monthly_hours": monthly_hours.to_string(),
            "rate": rate.to_string()
        }),
        reasoning: format!(
            "${} / ({} days x {} hours) = ${} per hour",
            base_salary, DAYS_IN_MONTH, working_hours_per_day, rate
        ),
    };

    Ok(HourlyRateResult { rate, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_day_rate_is_salary_over_240() {
        let result = calculate_hourly_rate(dec("4800"), dec("8"), 1).unwrap();
        assert_eq!(result.rate, dec("20"));
    }

    #[test]
    fn test_rate_is_not_rounded_internally() {
        let result = calculate_hourly_rate(dec("1000"), dec("8"), 1).unwrap();
        // 1000 / 240 = 4.1666...
        assert!(result.rate > dec("4.1666"));
        assert!(result.rate < dec("4.1667"));
    }

    #[test]
    fn test_zero_working_hours_is_invalid() {
        assert!(matches!(
            calculate_hourly_rate(dec("3000"), Decimal::ZERO, 1),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_huge_salary_over_short_day_is_rejected() {
        // One second per day
        let hours = dec("1") / dec("3600");
        match calculate_hourly_rate(Decimal::MAX, hours, 1) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "base_salary"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_salary_is_invalid() {
        match validate_base_salary(Some(dec("-100"))) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "base_salary"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_salary_is_invalid() {
        match validate_base_salary(None) {
            Err(EngineError::InvalidInput { message, .. }) => {
                assert!(message.contains("no base salary"))
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_audit_step_records_monthly_hours() {
        let result = calculate_hourly_rate(dec("3000"), dec("8"), 3).unwrap();
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.output["monthly_hours"], "240");
        assert!(result.audit_step.reasoning.contains("12.5"));
    }
}
