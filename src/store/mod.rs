//! Data collaborators of the salary calculation.
//!
//! The calculator reads from four collaborators and writes to one. Each is a
//! trait so that backends can be swapped; this module ships an in-memory
//! backend and a SQLite backend that implement all five.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    AdjustmentRecord, EmployeeProfile, HolidayRecord, SalarySummary, SummaryFields,
};

mod dataset;
mod memory;
mod sqlite;

pub use dataset::HrDataset;
pub use memory::InMemoryHrStore;
pub use sqlite::SqliteHrStore;

/// Looks up employee profiles.
pub trait EmployeeDirectory: Send + Sync {
    /// Returns the employee with the given identifier, or `None`.
    fn employee_by_id(&self, employee_id: &str) -> EngineResult<Option<EmployeeProfile>>;
}

/// Provides the holiday calendar.
pub trait HolidayCalendar: Send + Sync {
    /// Returns every holiday, of either type, dated within `[start, end]`.
    fn holidays_in_range(&self, start: NaiveDate, end: NaiveDate)
    -> EngineResult<Vec<HolidayRecord>>;
}

/// Provides the attendance log.
pub trait AttendanceLog: Send + Sync {
    /// Returns the number of distinct dates the employee attended in `[start, end]`.
    fn distinct_attendance_days(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<u32>;
}

/// Provides the adjustment ledger.
pub trait AdjustmentLedger: Send + Sync {
    /// Returns the employee's adjustments dated within `[start, end]`.
    fn adjustments_in_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AdjustmentRecord>>;
}

/// Persists salary summaries.
pub trait SummaryStore: Send + Sync {
    /// Creates or overwrites the summary for `(employee_id, year, month)`.
    ///
    /// Implementations must make this a single atomic write so that two
    /// concurrent upserts for the same key resolve as last-write-wins.
    fn upsert_salary_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: &str,
        fields: SummaryFields,
    ) -> EngineResult<SalarySummary>;

    /// Returns the summary for `(employee_id, year, month)`, or `None`.
    fn find_salary_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: &str,
    ) -> EngineResult<Option<SalarySummary>>;
}

/// A backend implementing every collaborator.
pub trait HrStore:
    EmployeeDirectory + HolidayCalendar + AttendanceLog + AdjustmentLedger + SummaryStore
{
}

impl<T> HrStore for T where
    T: EmployeeDirectory + HolidayCalendar + AttendanceLog + AdjustmentLedger + SummaryStore
{
}
