//! Calculation result models for the Salary Engine.
//!
//! This module contains the [`SalaryResult`] type and the audit structures that
//! capture every decision made during a salary calculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SalaryPeriod;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use salary_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a monthly salary calculation.
///
/// Monetary and hour values are rounded to two decimal places; day counts are
/// whole numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The ID of the employee the calculation is for.
    pub employee_id: String,
    /// The month the calculation covers.
    pub period: SalaryPeriod,
    /// The number of days a month is treated as having.
    pub days_in_month: u32,
    /// The employee's working hours per day.
    pub working_hours_per_day: Decimal,
    /// The hourly rate derived from the base salary.
    pub hourly_rate: Decimal,
    /// The monthly base salary.
    pub base_salary: Decimal,
    /// Holidays falling in the period.
    pub holidays_count: u32,
    /// Distinct days the employee attended.
    pub attendance_days: u32,
    /// Days counted as absent.
    pub absent_days: u32,
    /// Hours added through hour-based adjustments.
    pub addition_hours: Decimal,
    /// Hours deducted through hour-based adjustments.
    pub deduction_hours: Decimal,
    /// Money added through adjustments.
    pub total_additions: Decimal,
    /// Money deducted through adjustments.
    pub total_deductions: Decimal,
    /// The value of the absent hours. Reported only.
    pub absent_deduction: Decimal,
    /// Pay for the attended days.
    pub worked_salary: Decimal,
    /// The final salary after adjustments, never negative.
    pub final_salary: Decimal,
    /// The identifier of the persisted summary row.
    pub summary_id: Uuid,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_result() -> SalaryResult {
        SalaryResult {
            calculation_id: Uuid::nil(),
            timestamp: DateTime::parse_from_rfc3339("2026-03-31T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            engine_version: "0.1.0".to_string(),
            employee_id: "emp_001".to_string(),
            period: SalaryPeriod {
                year: 2026,
                month: 3,
                month_name: "March".to_string(),
                start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            },
            days_in_month: 30,
            working_hours_per_day: dec("8.00"),
            hourly_rate: dec("12.50"),
            base_salary: dec("3000.00"),
            holidays_count: 4,
            attendance_days: 22,
            absent_days: 4,
            addition_hours: dec("0.00"),
            deduction_hours: dec("0.00"),
            total_additions: dec("0.00"),
            total_deductions: dec("0.00"),
            absent_deduction: dec("400.00"),
            worked_salary: dec("2200.00"),
            final_salary: dec("2200.00"),
            summary_id: Uuid::nil(),
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        }
    }

    #[test]
    fn test_salary_result_serialization() {
        let json = serde_json::to_string(&create_sample_result()).unwrap();
        assert!(json.contains("\"calculation_id\":\"00000000-0000-0000-0000-000000000000\""));
        assert!(json.contains("\"days_in_month\":30"));
        assert!(json.contains("\"hourly_rate\":\"12.50\""));
        assert!(json.contains("\"final_salary\":\"2200.00\""));
        assert!(json.contains("\"period\":{"));
        assert!(json.contains("\"audit_trace\":{"));
    }

    #[test]
    fn test_salary_result_deserialization() {
        let json = serde_json::to_string(&create_sample_result()).unwrap();
        let result: SalaryResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.absent_days, 4);
        assert_eq!(result.worked_salary, dec("2200.00"));
        assert_eq!(result.period.month_name, "March");
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "working_hours".to_string(),
            rule_name: "Working Hours Per Day".to_string(),
            input: serde_json::json!({"attendance_time": "09:00:00"}),
            output: serde_json::json!({"hours": "8"}),
            reasoning: "Shift 09:00 to 17:00 is 8 hours".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"working_hours\""));
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "ABSENT_DAYS_CLAMPED".to_string(),
            message: "Holidays and attendance exceed the month".to_string(),
            severity: "low".to_string(),
        };

        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"ABSENT_DAYS_CLAMPED\""));
        assert!(json.contains("\"severity\":\"low\""));
    }
}
