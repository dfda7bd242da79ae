//! Adjustment aggregation.
//!
//! This module sums the additions and deductions recorded for an employee in
//! a period. Hour-based adjustments are converted to money at the hourly rate
//! and also tracked as hours; money-based adjustments only contribute money.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AdjustmentDirection, AdjustmentKind, AdjustmentRecord, AuditStep};

use super::rounding::{out_of_range, round_money};

/// The aggregated adjustments of a period, rounded to two decimal places.
#[derive(Debug, Clone)]
pub struct AdjustmentTotals {
    /// Hours added through hour-based adjustments.
    pub addition_hours: Decimal,
    /// Hours deducted through hour-based adjustments.
    pub deduction_hours: Decimal,
    /// Money added, including converted hours.
    pub total_additions: Decimal,
    /// Money deducted, including converted hours.
    pub total_deductions: Decimal,
    /// Number of adjustments that contributed.
    pub applied: usize,
    /// Number of adjustments skipped for a non-positive value.
    pub skipped: usize,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Aggregates adjustments into hour and money totals per direction.
///
/// Adjustments with a value of zero or less are skipped.
///
/// # Errors
///
/// Returns `InvalidInput` for field `adjustments` if a total leaves the range
/// of `Decimal`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::aggregate_adjustments;
/// use salary_engine::models::{AdjustmentDirection, AdjustmentKind, AdjustmentRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let overtime = AdjustmentRecord {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     value: Decimal::from(2),
///     kind: AdjustmentKind::Hours,
///     direction: AdjustmentDirection::Addition,
///     reason: None,
/// };
///
/// let totals = aggregate_adjustments(&[overtime], Decimal::from(10), 1).unwrap();
/// assert_eq!(totals.addition_hours, Decimal::from(2));
/// assert_eq!(totals.total_additions, Decimal::from(20));
/// ```
pub fn aggregate_adjustments(
    adjustments: &[AdjustmentRecord],
    hourly_rate: Decimal,
    step_number: u32,
) -> EngineResult<AdjustmentTotals> {
    let mut addition_hours = Decimal::ZERO;
    let mut deduction_hours = Decimal::ZERO;
    let mut total_additions = Decimal::ZERO;
    let mut total_deductions = Decimal::ZERO;
    let mut applied = 0usize;

    for adjustment in adjustments.iter().filter(|a| a.is_countable()) {
        applied += 1;

        let (hours_total, money_total) = match adjustment.direction {
            AdjustmentDirection::Addition => (&mut addition_hours, &mut total_additions),
            AdjustmentDirection::Deduction => (&mut deduction_hours, &mut total_deductions),
        };

        let money = match adjustment.kind {
            AdjustmentKind::Hours => {
                *hours_total = hours_total
                    .checked_add(adjustment.value)
                    .ok_or_else(out_of_range("adjustments"))?;
                adjustment
                    .value
                    .checked_mul(hourly_rate)
                    .ok_or_else(out_of_range("adjustments"))?
            }
            AdjustmentKind::Money => adjustment.value,
        };
        *money_total = money_total
            .checked_add(money)
            .ok_or_else(out_of_range("adjustments"))?;
    }

    let skipped = adjustments.len() - applied;

    let addition_hours = round_money(addition_hours);
    let deduction_hours = round_money(deduction_hours);
    let total_additions = round_money(total_additions);
    let total_deductions = round_money(total_deductions);

    let audit_step = AuditStep {
        step_number,
        rule_id: "adjustments".to_string(),
        rule_name: "Salary Adjustments".to_string(),
        input: serde_json::json!({
            "records": adjustments.len(),
            "hourly_rate": hourly_rate.to_string()
        }),
        output: serde_json::json!({
            "addition_hours": addition_hours.to_string(),
            "deduction_hours": deduction_hours.to_string(),
            "total_additions": total_additions.to_string(),
            "total_deductions": total_deductions.to_string(),
            "applied": applied,
            "skipped": skipped
        }),
        reasoning: format!(
            "Applied {} adjustments ({} skipped): +${} / -${}",
            applied, skipped, total_additions, total_deductions
        ),
    };

    Ok(AdjustmentTotals {
        addition_hours,
        deduction_hours,
        total_additions,
        total_deductions,
        applied,
        skipped,
        audit_step,
    })
}
