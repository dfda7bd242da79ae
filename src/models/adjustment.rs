//! Salary adjustment models.
//!
//! Adjustments are created by HR actions (for example marking an early or late
//! attendance) or by manual entry, and are consumed read-only per month.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The unit an adjustment value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// The value is an amount of money.
    Money,
    /// The value is a number of hours, converted at the hourly rate.
    Hours,
}

impl AdjustmentKind {
    /// Returns the stored name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::Money => "money",
            AdjustmentKind::Hours => "hours",
        }
    }
}

/// Whether an adjustment adds to or deducts from the salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    /// The adjustment increases the salary.
    Addition,
    /// The adjustment decreases the salary.
    Deduction,
}

impl AdjustmentDirection {
    /// Returns the stored name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentDirection::Addition => "addition",
            AdjustmentDirection::Deduction => "deduction",
        }
    }
}

/// A signed salary adjustment for one employee on one date.
///
/// # Example
///
/// ```
/// use salary_engine::models::{AdjustmentDirection, AdjustmentKind, AdjustmentRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let adjustment = AdjustmentRecord {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     value: Decimal::new(2, 0),
///     kind: AdjustmentKind::Hours,
///     direction: AdjustmentDirection::Deduction,
///     reason: Some("Late arrival".to_string()),
/// };
/// assert!(adjustment.is_countable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    /// Unique identifier for the adjustment.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// The employee the adjustment applies to.
    pub employee_id: String,
    /// The date the adjustment was recorded for.
    pub date: NaiveDate,
    /// The magnitude of the adjustment.
    pub value: Decimal,
    /// Whether the value is money or hours.
    pub kind: AdjustmentKind,
    /// Whether the value is added or deducted.
    pub direction: AdjustmentDirection,
    /// Why the adjustment was made.
    #[serde(default)]
    pub reason: Option<String>,
}

impl AdjustmentRecord {
    /// Returns true if the adjustment contributes to salary totals.
    ///
    /// Zero and negative values are ignored.
    pub fn is_countable(&self) -> bool {
        self.value > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_adjustment() {
        let json = r#"{
            "employee_id": "emp_001",
            "date": "2026-03-10",
            "value": "1.5",
            "kind": "hours",
            "direction": "addition",
            "reason": "Early attendance"
        }"#;

        let adjustment: AdjustmentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(adjustment.kind, AdjustmentKind::Hours);
        assert_eq!(adjustment.direction, AdjustmentDirection::Addition);
        assert_eq!(adjustment.value, Decimal::new(15, 1));
        assert!(adjustment.is_countable());
    }

    #[test]
    fn test_zero_and_negative_values_are_not_countable() {
        let mut adjustment = AdjustmentRecord {
            id: Uuid::nil(),
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            value: Decimal::ZERO,
            kind: AdjustmentKind::Money,
            direction: AdjustmentDirection::Deduction,
            reason: None,
        };
        assert!(!adjustment.is_countable());

        adjustment.value = Decimal::new(-5, 0);
        assert!(!adjustment.is_countable());
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(AdjustmentKind::Money.as_str(), "money");
        assert_eq!(AdjustmentDirection::Deduction.as_str(), "deduction");
        assert_eq!(
            serde_json::to_string(&AdjustmentDirection::Addition).unwrap(),
            "\"addition\""
        );
    }
}
