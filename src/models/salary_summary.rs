//! Persisted salary summary models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The computed values written to a salary summary.
///
/// Passed to [`SummaryStore::upsert_salary_summary`](crate::store::SummaryStore::upsert_salary_summary),
/// which overwrites every field of an existing row for the same key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFields {
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
    /// The final computed salary.
    pub final_salary: Decimal,
}

/// The durable, user-visible salary record of one employee for one month.
///
/// At most one summary exists per `(employee_id, year, month)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySummary {
    /// Unique identifier of the summary row. Preserved across updates.
    pub id: Uuid,
    /// The employee the summary belongs to.
    pub employee_id: String,
    /// The English month name (e.g., "March").
    pub month: String,
    /// The calendar year.
    pub year: i32,
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
    /// The final computed salary.
    pub final_salary: Decimal,
    /// When the summary was last written.
    pub updated_at: DateTime<Utc>,
}

impl SalarySummary {
    /// Creates a new summary row from computed fields.
    pub fn new(employee_id: &str, year: i32, month: &str, fields: SummaryFields) -> Self {
        SalarySummary {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            month: month.to_string(),
            year,
            attendance_days: fields.attendance_days,
            absent_days: fields.absent_days,
            addition_hours: fields.addition_hours,
            deduction_hours: fields.deduction_hours,
            total_additions: fields.total_additions,
            total_deductions: fields.total_deductions,
            final_salary: fields.final_salary,
            updated_at: Utc::now(),
        }
    }

    /// Overwrites every computed field, keeping the row identity.
    pub fn apply(&mut self, fields: SummaryFields) {
        self.attendance_days = fields.attendance_days;
        self.absent_days = fields.absent_days;
        self.addition_hours = fields.addition_hours;
        self.deduction_hours = fields.deduction_hours;
        self.total_additions = fields.total_additions;
        self.total_deductions = fields.total_deductions;
        self.final_salary = fields.final_salary;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fields(final_salary: &str) -> SummaryFields {
        SummaryFields {
            attendance_days: 22,
            absent_days: 4,
            addition_hours: dec("0"),
            deduction_hours: dec("0"),
            total_additions: dec("0"),
            total_deductions: dec("0"),
            final_salary: dec(final_salary),
        }
    }

    #[test]
    fn test_apply_keeps_identity_and_overwrites_fields() {
        let mut summary = SalarySummary::new("emp_001", 2026, "March", fields("2200.00"));
        let id = summary.id;

        let mut updated = fields("1800.00");
        updated.absent_days = 6;
        summary.apply(updated);

        assert_eq!(summary.id, id);
        assert_eq!(summary.final_salary, dec("1800.00"));
        assert_eq!(summary.absent_days, 6);
        assert_eq!(summary.month, "March");
    }

    #[test]
    fn test_serialize_summary() {
        let summary = SalarySummary::new("emp_001", 2026, "March", fields("2200.00"));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"employee_id\":\"emp_001\""));
        assert!(json.contains("\"month\":\"March\""));
        assert!(json.contains("\"final_salary\":\"2200.00\""));
    }
}
