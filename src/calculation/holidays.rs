//! Holiday counting for a salary period.

use crate::models::{AuditStep, HolidayRecord, HolidayType, SalaryPeriod};

/// The result of counting the holidays of a period.
#[derive(Debug, Clone)]
pub struct HolidayCountResult {
    /// Total holidays counted.
    pub count: u32,
    /// Official holidays counted.
    pub official: u32,
    /// Weekly holidays counted.
    pub weekly: u32,
    /// The audit step recording this count.
    pub audit_step: AuditStep,
}

/// Counts the holidays that fall inside a period.
///
/// A record counts when its date is within `[start_date, end_date]` and it is
/// either an official holiday or a weekly holiday with its weekday recorded.
/// Records outside the period are ignored even if the provider returned them.
pub fn count_holidays_in_period(
    holidays: &[HolidayRecord],
    period: &SalaryPeriod,
    step_number: u32,
) -> HolidayCountResult {
    let mut official = 0u32;
    let mut weekly = 0u32;

    for holiday in holidays
        .iter()
        .filter(|h| period.contains_date(h.date) && h.counts_as_day_off())
    {
        match holiday.holiday_type {
            HolidayType::Official => official += 1,
            HolidayType::Weekly => weekly += 1,
        }
    }

    let count = official + weekly;

    let audit_step = AuditStep {
        step_number,
        rule_id: "holiday_count".to_string(),
        rule_name: "Holidays In Period".to_string(),
        input: serde_json::json!({
            "start_date": period.start_date.to_string(),
            "end_date": period.end_date.to_string(),
            "records": holidays.len()
        }),
        output: serde_json::json!({
            "count": count,
            "official": official,
            "weekly": weekly
        }),
        reasoning: format!(
            "{} official and {} weekly holidays between {} and {}",
            official, weekly, period.start_date, period.end_date
        ),
    };

    HolidayCountResult {
        count,
        official,
        weekly,
        audit_step,
    }
}
