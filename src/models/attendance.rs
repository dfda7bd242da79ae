//! Attendance log model.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One clock-in event of an employee.
///
/// An employee may clock in more than once a day; salary calculations only
/// count distinct dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee who clocked in.
    pub employee_id: String,
    /// The date of the clock-in.
    pub date: NaiveDate,
    /// The time of the clock-in, if recorded.
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_attendance_without_check_in() {
        let json = r#"{ "employee_id": "emp_001", "date": "2026-03-02" }"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert!(record.check_in.is_none());
    }
}
