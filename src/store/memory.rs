//! In-memory HR store.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdjustmentRecord, AttendanceRecord, EmployeeProfile, HolidayRecord, SalarySummary,
    SummaryFields,
};

use super::{
    AdjustmentLedger, AttendanceLog, EmployeeDirectory, HolidayCalendar, HrDataset, SummaryStore,
};

type SummaryKey = (String, i32, String);

fn poisoned<T>(collaborator: &'static str) -> impl FnOnce(PoisonError<T>) -> EngineError {
    move |_| EngineError::dependency(collaborator, "lock poisoned by a panicked writer")
}

fn push_unique_holiday(holidays: &mut Vec<HolidayRecord>, holiday: HolidayRecord) {
    let exists = holidays
        .iter()
        .any(|h| h.date == holiday.date && h.holiday_type == holiday.holiday_type);
    if !exists {
        holidays.push(holiday);
    }
}

/// A store that keeps every collaborator's data in process memory.
///
/// Each collection sits behind its own `RwLock`; the summary upsert happens
/// under a single write lock.
#[derive(Debug, Default)]
pub struct InMemoryHrStore {
    employees: RwLock<HashMap<String, EmployeeProfile>>,
    holidays: RwLock<Vec<HolidayRecord>>,
    attendance: RwLock<Vec<AttendanceRecord>>,
    adjustments: RwLock<Vec<AdjustmentRecord>>,
    summaries: RwLock<HashMap<SummaryKey, SalarySummary>>,
}

impl InMemoryHrStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding every record of a dataset.
    pub fn from_dataset(dataset: HrDataset) -> Self {
        let employees = dataset
            .employees
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();

        let mut holidays = Vec::with_capacity(dataset.holidays.len());
        for holiday in dataset.holidays {
            push_unique_holiday(&mut holidays, holiday);
        }

        Self {
            employees: RwLock::new(employees),
            holidays: RwLock::new(holidays),
            attendance: RwLock::new(dataset.attendance),
            adjustments: RwLock::new(dataset.adjustments),
            summaries: RwLock::new(HashMap::new()),
        }
    }

    /// Adds or replaces an employee.
    pub fn insert_employee(&self, employee: EmployeeProfile) -> EngineResult<()> {
        let mut employees = self
            .employees
            .write()
            .map_err(poisoned("employee directory"))?;
        employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    /// Adds a holiday unless one of the same type exists on that date.
    pub fn insert_holiday(&self, holiday: HolidayRecord) -> EngineResult<()> {
        let mut holidays = self.holidays.write().map_err(poisoned("holiday calendar"))?;
        push_unique_holiday(&mut holidays, holiday);
        Ok(())
    }

    /// Adds a clock-in event.
    pub fn record_attendance(&self, record: AttendanceRecord) -> EngineResult<()> {
        self.attendance
            .write()
            .map_err(poisoned("attendance log"))?
            .push(record);
        Ok(())
    }

    /// Adds an adjustment.
    pub fn record_adjustment(&self, adjustment: AdjustmentRecord) -> EngineResult<()> {
        self.adjustments
            .write()
            .map_err(poisoned("adjustment ledger"))?
            .push(adjustment);
        Ok(())
    }

    /// Returns the number of stored summaries.
    pub fn summary_count(&self) -> EngineResult<usize> {
        Ok(self
            .summaries
            .read()
            .map_err(poisoned("summary store"))?
            .len())
    }
}

impl EmployeeDirectory for InMemoryHrStore {
    fn employee_by_id(&self, employee_id: &str) -> EngineResult<Option<EmployeeProfile>> {
        let employees = self
            .employees
            .read()
            .map_err(poisoned("employee directory"))?;
        Ok(employees.get(employee_id).cloned())
    }
}

impl HolidayCalendar for InMemoryHrStore {
    fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<HolidayRecord>> {
        let holidays = self.holidays.read().map_err(poisoned("holiday calendar"))?;
        Ok(holidays
            .iter()
            .filter(|h| h.date >= start && h.date <= end)
            .cloned()
            .collect())
    }
}

impl AttendanceLog for InMemoryHrStore {
    fn distinct_attendance_days(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<u32> {
        let attendance = self.attendance.read().map_err(poisoned("attendance log"))?;
        let dates: BTreeSet<NaiveDate> = attendance
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
            .map(|r| r.date)
            .collect();
        u32::try_from(dates.len())
            .map_err(|e| EngineError::dependency("attendance log", e))
    }
}

impl AdjustmentLedger for InMemoryHrStore {
    fn adjustments_in_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AdjustmentRecord>> {
        let adjustments = self
            .adjustments
            .read()
            .map_err(poisoned("adjustment ledger"))?;
        Ok(adjustments
            .iter()
            .filter(|a| a.employee_id == employee_id && a.date >= start && a.date <= end)
            .cloned()
            .collect())
    }
}

impl SummaryStore for InMemoryHrStore {
    fn upsert_salary_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: &str,
        fields: SummaryFields,
    ) -> EngineResult<SalarySummary> {
        let mut summaries = self.summaries.write().map_err(poisoned("summary store"))?;
        let key = (employee_id.to_string(), year, month.to_string());

        let summary = summaries
            .entry(key)
            .and_modify(|existing| existing.apply(fields.clone()))
            .or_insert_with(|| SalarySummary::new(employee_id, year, month, fields));

        Ok(summary.clone())
    }

    fn find_salary_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: &str,
    ) -> EngineResult<Option<SalarySummary>> {
        let summaries = self.summaries.read().map_err(poisoned("summary store"))?;
        let key = (employee_id.to_string(), year, month.to_string());
        Ok(summaries.get(&key).cloned())
    }
}
