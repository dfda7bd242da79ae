//! Monthly salary calculation.
//!
//! [`SalaryCalculator`] composes the step functions of this module over the
//! data collaborators and writes the resulting summary. The summary upsert is
//! the only side effect and happens last, after every value is known valid.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Datelike, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, SalaryResult, SalarySummary, SummaryFields,
};
use crate::store::{
    AdjustmentLedger, AttendanceLog, EmployeeDirectory, HolidayCalendar, HrStore, SummaryStore,
};

use super::absence::calculate_absent_days;
use super::adjustments::aggregate_adjustments;
use super::final_salary::{FinalSalaryInput, calculate_final_salary};
use super::holidays::count_holidays_in_period;
use super::hourly_rate::{calculate_hourly_rate, validate_base_salary};
use super::period::{DAYS_IN_MONTH, month_name, resolve_period};
use super::rounding::round_money;
use super::working_hours::{DEFAULT_WORKING_HOURS, calculate_working_hours};

/// Warning code raised when the default working day was assumed.
pub const DEFAULT_WORKING_HOURS_USED: &str = "DEFAULT_WORKING_HOURS_USED";

/// Computes and persists monthly salaries.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use salary_engine::calculation::SalaryCalculator;
/// use salary_engine::models::EmployeeProfile;
/// use salary_engine::store::InMemoryHrStore;
/// use rust_decimal::Decimal;
///
/// let store = Arc::new(InMemoryHrStore::new());
/// store.insert_employee(EmployeeProfile {
///     id: "emp_001".to_string(),
///     name: None,
///     base_salary: Some(Decimal::from(3000)),
///     attendance_time: None,
///     leave_time: None,
/// }).unwrap();
///
/// let calculator = SalaryCalculator::from_store(store);
/// let result = calculator.compute_salary("emp_001", Some(2026), Some(3)).unwrap();
/// assert_eq!(result.hourly_rate, Decimal::new(1250, 2));
/// ```
#[derive(Clone)]
pub struct SalaryCalculator {
    employees: Arc<dyn EmployeeDirectory>,
    holidays: Arc<dyn HolidayCalendar>,
    attendance: Arc<dyn AttendanceLog>,
    adjustments: Arc<dyn AdjustmentLedger>,
    summaries: Arc<dyn SummaryStore>,
}

impl SalaryCalculator {
    /// Creates a calculator from its five collaborators.
    pub fn new(
        employees: Arc<dyn EmployeeDirectory>,
        holidays: Arc<dyn HolidayCalendar>,
        attendance: Arc<dyn AttendanceLog>,
        adjustments: Arc<dyn AdjustmentLedger>,
        summaries: Arc<dyn SummaryStore>,
    ) -> Self {
        Self {
            employees,
            holidays,
            attendance,
            adjustments,
            summaries,
        }
    }

    /// Creates a calculator whose collaborators are all the same store.
    pub fn from_store<S: HrStore + 'static>(store: Arc<S>) -> Self {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        )
    }

    /// Computes the salary of an employee for a month and upserts its summary.
    ///
    /// `year` and `month` default to the current UTC calendar month.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if the employee does not exist
    /// - `InvalidInput` for a missing or non-positive base salary, non-positive
    ///   working hours, a month outside 1-12 or an amount too large to compute
    /// - `DependencyFailure` if any collaborator fails
    ///
    /// No summary is written when an error is returned.
    pub fn compute_salary(
        &self,
        employee_id: &str,
        year: Option<i32>,
        month: Option<u32>,
    ) -> EngineResult<SalaryResult> {
        let today = Utc::now().date_naive();
        let year = year.unwrap_or_else(|| today.year());
        let month = month.unwrap_or_else(|| today.month());

        self.calculate(employee_id, year, month).inspect_err(|err| {
            warn!(
                employee_id = %employee_id,
                year,
                month,
                error = %err,
                "Salary calculation failed"
            );
        })
    }

    /// Returns the persisted summary of an employee for a month, if any.
    pub fn summary(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Option<SalarySummary>> {
        let name = month_name(month)?;
        self.summaries.find_salary_summary(employee_id, year, name)
    }

    fn calculate(&self, employee_id: &str, year: i32, month: u32) -> EngineResult<SalaryResult> {
        let start_time = Instant::now();
        let mut steps: Vec<AuditStep> = Vec::new();
        let mut warnings: Vec<AuditWarning> = Vec::new();
        let mut step_number: u32 = 1;

        let period = resolve_period(year, month)?;

        let employee = self.employees.employee_by_id(employee_id)?.ok_or_else(|| {
            EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            }
        })?;

        // Salary is checked before any attendance or adjustment data is read
        let base_salary = validate_base_salary(employee.base_salary)?;

        let working_hours =
            calculate_working_hours(employee.attendance_time, employee.leave_time, step_number)?;
        if working_hours.used_default {
            warnings.push(AuditWarning {
                code: DEFAULT_WORKING_HOURS_USED.to_string(),
                message: format!(
                    "Employee has no attendance or leave time; assumed {} hours per day",
                    DEFAULT_WORKING_HOURS
                ),
                severity: "low".to_string(),
            });
        }
        let hours_per_day = working_hours.hours;
        steps.push(working_hours.audit_step);
        step_number += 1;

        let hourly = calculate_hourly_rate(base_salary, hours_per_day, step_number)?;
        let hourly_rate = hourly.rate;
        steps.push(hourly.audit_step);
        step_number += 1;

        let holidays = self
            .holidays
            .holidays_in_range(period.start_date, period.end_date)?;
        let holiday_count = count_holidays_in_period(&holidays, &period, step_number);
        let holidays_count = holiday_count.count;
        steps.push(holiday_count.audit_step);
        step_number += 1;

        let attendance_days = self.attendance.distinct_attendance_days(
            employee_id,
            period.start_date,
            period.end_date,
        )?;
        steps.push(AuditStep {
            step_number,
            rule_id: "attendance_days".to_string(),
            rule_name: "Attendance Days".to_string(),
            input: serde_json::json!({
                "employee_id": employee_id,
                "start_date": period.start_date.to_string(),
                "end_date": period.end_date.to_string()
            }),
            output: serde_json::json!({ "attendance_days": attendance_days }),
            reasoning: format!(
                "{} distinct attendance dates between {} and {}",
                attendance_days, period.start_date, period.end_date
            ),
        });
        step_number += 1;

        let absence = calculate_absent_days(holidays_count, attendance_days, step_number);
        let absent_days = absence.absent_days;
        warnings.extend(absence.warning);
        steps.push(absence.audit_step);
        step_number += 1;

        let adjustments = self.adjustments.adjustments_in_range(
            employee_id,
            period.start_date,
            period.end_date,
        )?;
        let totals = aggregate_adjustments(&adjustments, hourly_rate, step_number)?;
        steps.push(totals.audit_step.clone());
        step_number += 1;

        let salary = calculate_final_salary(
            FinalSalaryInput {
                attendance_days,
                absent_days,
                working_hours_per_day: hours_per_day,
                hourly_rate,
                total_additions: totals.total_additions,
                total_deductions: totals.total_deductions,
            },
            step_number,
        )?;
        steps.push(salary.audit_step.clone());

        debug!(
            employee_id = %employee_id,
            holidays = holidays_count,
            attendance_days,
            absent_days,
            adjustments = totals.applied,
            "Salary components resolved"
        );

        let summary = self.summaries.upsert_salary_summary(
            employee_id,
            period.year,
            &period.month_name,
            SummaryFields {
                attendance_days,
                absent_days,
                addition_hours: totals.addition_hours,
                deduction_hours: totals.deduction_hours,
                total_additions: totals.total_additions,
                total_deductions: totals.total_deductions,
                final_salary: salary.final_salary,
            },
        )?;

        let duration = start_time.elapsed();
        info!(
            employee_id = %employee_id,
            year = period.year,
            month = %period.month_name,
            final_salary = %salary.final_salary,
            summary_id = %summary.id,
            duration_us = duration.as_micros() as u64,
            "Salary calculated"
        );

        Ok(SalaryResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id: employee_id.to_string(),
            period,
            days_in_month: DAYS_IN_MONTH,
            working_hours_per_day: round_money(hours_per_day),
            hourly_rate: round_money(hourly_rate),
            base_salary: round_money(base_salary),
            holidays_count,
            attendance_days,
            absent_days,
            addition_hours: totals.addition_hours,
            deduction_hours: totals.deduction_hours,
            total_additions: totals.total_additions,
            total_deductions: totals.total_deductions,
            absent_deduction: salary.absent_deduction,
            worked_salary: salary.worked_salary,
            final_salary: salary.final_salary,
            summary_id: summary.id,
            audit_trace: AuditTrace {
                steps,
                warnings,
                duration_us: duration.as_micros() as u64,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AdjustmentDirection, AdjustmentKind, AdjustmentRecord, AttendanceRecord,
        EmployeeProfile, HolidayRecord, HolidayType,
    };
    use crate::store::{HrDataset, InMemoryHrStore, SqliteHrStore};
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn employee(id: &str, base_salary: Option<&str>) -> EmployeeProfile {
        EmployeeProfile {
            id: id.to_string(),
            name: None,
            base_salary: base_salary.map(dec),
            attendance_time: None,
            leave_time: None,
        }
    }

    /// 3000 salary, 22 attended days and 4 weekly holidays in March 2026.
    fn reference_dataset() -> HrDataset {
        let holidays = [6, 13, 20, 27]
            .into_iter()
            .map(|day| HolidayRecord {
                date: march(day),
                holiday_type: HolidayType::Weekly,
                day: Some("Friday".to_string()),
                name: None,
            })
            .collect();

        let attendance = (1..=31)
            .filter(|d| ![6, 13, 20, 27].contains(d))
            .take(22)
            .map(|day| AttendanceRecord {
                employee_id: "emp_001".to_string(),
                date: march(day),
                check_in: NaiveTime::from_hms_opt(9, 0, 0),
            })
            .collect();

        HrDataset {
            employees: vec![employee("emp_001", Some("3000"))],
            holidays,
            attendance,
            adjustments: Vec::new(),
        }
    }

    fn create_reference_store() -> Arc<InMemoryHrStore> {
        Arc::new(InMemoryHrStore::from_dataset(reference_dataset()))
    }

    fn adjustment(value: &str, kind: AdjustmentKind, direction: AdjustmentDirection) -> AdjustmentRecord {
        AdjustmentRecord {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            date: march(10),
            value: dec(value),
            kind,
            direction,
            reason: None,
        }
    }

    #[test]
    fn test_reference_month_without_adjustments() {
        let calculator = SalaryCalculator::from_store(create_reference_store());

        let result = calculator
            .compute_salary("emp_001", Some(2026), Some(3))
            .unwrap();

        assert_eq!(result.days_in_month, 30);
        assert_eq!(result.working_hours_per_day, dec("8"));
        assert_eq!(result.hourly_rate, dec("12.50"));
        assert_eq!(result.holidays_count, 4);
        assert_eq!(result.attendance_days, 22);
        assert_eq!(result.absent_days, 4);
        assert_eq!(result.absent_deduction, dec("400.00"));
        assert_eq!(result.worked_salary, dec("2200.00"));
        assert_eq!(result.final_salary, dec("2200.00"));
        assert_eq!(result.period.month_name, "March");
    }

    #[test]
    fn test_adjustments_flow_into_final_salary() {
        let store = create_reference_store();
        store
            .record_adjustment(adjustment("2", AdjustmentKind::Hours, AdjustmentDirection::Addition))
            .unwrap();
        store
            .record_adjustment(adjustment("20", AdjustmentKind::Money, AdjustmentDirection::Deduction))
            .unwrap();
        store
            .record_adjustment(adjustment("0", AdjustmentKind::Money, AdjustmentDirection::Addition))
            .unwrap();

        let calculator = SalaryCalculator::from_store(store);
        let result = calculator
            .compute_salary("emp_001", Some(2026), Some(3))
            .unwrap();

        assert_eq!(result.addition_hours, dec("2"));
        assert_eq!(result.total_additions, dec("25"));
        assert_eq!(result.total_deductions, dec("20"));
        assert_eq!(result.final_salary, dec("2205"));
    }

    #[test]
    fn test_rerun_updates_existing_summary() {
        let store = create_reference_store();
        let calculator = SalaryCalculator::from_store(store.clone());

        let first = calculator
            .compute_salary("emp_001", Some(2026), Some(3))
            .unwrap();
        store
            .record_adjustment(adjustment("100", AdjustmentKind::Money, AdjustmentDirection::Addition))
            .unwrap();
        let second = calculator
            .compute_salary("emp_001", Some(2026), Some(3))
            .unwrap();

        assert_eq!(first.summary_id, second.summary_id);
        assert_eq!(store.summary_count().unwrap(), 1);

        let summary = calculator.summary("emp_001", 2026, 3).unwrap().unwrap();
        assert_eq!(summary.final_salary, dec("2300"));
    }

    #[test]
    fn test_unknown_employee_fails_without_summary() {
        let store = create_reference_store();
        let calculator = SalaryCalculator::from_store(store.clone());

        match calculator.compute_salary("emp_404", Some(2026), Some(3)) {
            Err(EngineError::EmployeeNotFound { employee_id }) => {
                assert_eq!(employee_id, "emp_404")
            }
            other => panic!("Expected EmployeeNotFound, got {:?}", other),
        }
        assert_eq!(store.summary_count().unwrap(), 0);
    }

    #[test]
    fn test_invalid_month_fails() {
        let calculator = SalaryCalculator::from_store(create_reference_store());
        assert!(matches!(
            calculator.compute_salary("emp_001", Some(2026), Some(13)),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_equal_shift_times_fail() {
        let store = create_reference_store();
        let mut profile = employee("emp_001", Some("3000"));
        profile.attendance_time = NaiveTime::from_hms_opt(9, 0, 0);
        profile.leave_time = NaiveTime::from_hms_opt(9, 0, 0);
        store.insert_employee(profile).unwrap();

        let calculator = SalaryCalculator::from_store(store.clone());
        match calculator.compute_salary("emp_001", Some(2026), Some(3)) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "working_hours"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert_eq!(store.summary_count().unwrap(), 0);
    }

    #[test]
    fn test_default_working_hours_warning() {
        let calculator = SalaryCalculator::from_store(create_reference_store());
        let result = calculator
            .compute_salary("emp_001", Some(2026), Some(3))
            .unwrap();

        assert!(
            result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == DEFAULT_WORKING_HOURS_USED)
        );
        let step_numbers: Vec<u32> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(step_numbers, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_defaults_to_current_month() {
        let calculator = SalaryCalculator::from_store(create_reference_store());
        let result = calculator.compute_salary("emp_001", None, None).unwrap();

        let today = Utc::now().date_naive();
        assert_eq!(result.period.year, today.year());
        assert_eq!(result.period.month, today.month());
    }

    /// Counts reads so tests can assert what was never touched.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryHrStore,
        attendance_reads: AtomicUsize,
        adjustment_reads: AtomicUsize,
    }

    impl EmployeeDirectory for CountingStore {
        fn employee_by_id(&self, employee_id: &str) -> EngineResult<Option<EmployeeProfile>> {
            self.inner.employee_by_id(employee_id)
        }
    }

    impl HolidayCalendar for CountingStore {
        fn holidays_in_range(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> EngineResult<Vec<HolidayRecord>> {
            self.inner.holidays_in_range(start, end)
        }
    }

    impl AttendanceLog for CountingStore {
        fn distinct_attendance_days(
            &self,
            employee_id: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> EngineResult<u32> {
            self.attendance_reads.fetch_add(1, Ordering::SeqCst);
            self.inner.distinct_attendance_days(employee_id, start, end)
        }
    }

    impl AdjustmentLedger for CountingStore {
        fn adjustments_in_range(
            &self,
            employee_id: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> EngineResult<Vec<AdjustmentRecord>> {
            self.adjustment_reads.fetch_add(1, Ordering::SeqCst);
            self.inner.adjustments_in_range(employee_id, start, end)
        }
    }

    impl SummaryStore for CountingStore {
        fn upsert_salary_summary(
            &self,
            employee_id: &str,
            year: i32,
            month: &str,
            fields: SummaryFields,
        ) -> EngineResult<SalarySummary> {
            self.inner.upsert_salary_summary(employee_id, year, month, fields)
        }

        fn find_salary_summary(
            &self,
            employee_id: &str,
            year: i32,
            month: &str,
        ) -> EngineResult<Option<SalarySummary>> {
            self.inner.find_salary_summary(employee_id, year, month)
        }
    }

    #[test]
    fn test_missing_salary_fails_before_attendance_is_read() {
        for salary in [None, Some("0")] {
            let store = Arc::new(CountingStore::default());
            store.inner.insert_employee(employee("emp_001", salary)).unwrap();

            let calculator = SalaryCalculator::from_store(store.clone());
            match calculator.compute_salary("emp_001", Some(2026), Some(3)) {
                Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "base_salary"),
                other => panic!("Expected InvalidInput, got {:?}", other),
            }
            assert_eq!(store.attendance_reads.load(Ordering::SeqCst), 0);
            assert_eq!(store.adjustment_reads.load(Ordering::SeqCst), 0);
            assert_eq!(store.inner.summary_count().unwrap(), 0);
        }
    }

    /// An attendance log that is always down.
    struct FailingAttendance;

    impl AttendanceLog for FailingAttendance {
        fn distinct_attendance_days(
            &self,
            _employee_id: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> EngineResult<u32> {
            Err(EngineError::dependency("attendance log", "connection refused"))
        }
    }

    #[test]
    fn test_dependency_failure_aborts_without_summary() {
        let store = create_reference_store();
        let calculator = SalaryCalculator::new(
            store.clone(),
            store.clone(),
            Arc::new(FailingAttendance),
            store.clone(),
            store.clone(),
        );

        match calculator.compute_salary("emp_001", Some(2026), Some(3)) {
            Err(EngineError::DependencyFailure { collaborator, .. }) => {
                assert_eq!(collaborator, "attendance log")
            }
            other => panic!("Expected DependencyFailure, got {:?}", other),
        }
        assert_eq!(store.summary_count().unwrap(), 0);
    }

    #[test]
    fn test_huge_hour_adjustment_fails_without_summary() {
        let store = create_reference_store();
        store
            .record_adjustment(adjustment(
                "79228162514264337593543950335",
                AdjustmentKind::Hours,
                AdjustmentDirection::Addition,
            ))
            .unwrap();

        let calculator = SalaryCalculator::from_store(store.clone());
        match calculator.compute_salary("emp_001", Some(2026), Some(3)) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "adjustments"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert_eq!(store.summary_count().unwrap(), 0);
    }

    #[test]
    fn test_reference_month_on_sqlite_store() {
        let store = SqliteHrStore::open_in_memory().unwrap();
        store.import(&reference_dataset()).unwrap();
        store
            .record_adjustment(&adjustment(
                "2",
                AdjustmentKind::Hours,
                AdjustmentDirection::Addition,
            ))
            .unwrap();
        let calculator = SalaryCalculator::from_store(Arc::new(store));

        let first = calculator
            .compute_salary("emp_001", Some(2026), Some(3))
            .unwrap();
        assert_eq!(first.holidays_count, 4);
        assert_eq!(first.attendance_days, 22);
        assert_eq!(first.absent_days, 4);
        assert_eq!(first.hourly_rate, dec("12.50"));
        assert_eq!(first.total_additions, dec("25"));
        assert_eq!(first.final_salary, dec("2225.00"));

        let second = calculator
            .compute_salary("emp_001", Some(2026), Some(3))
            .unwrap();
        assert_eq!(first.summary_id, second.summary_id);

        let summary = calculator.summary("emp_001", 2026, 3).unwrap().unwrap();
        assert_eq!(summary.id, first.summary_id);
        assert_eq!(summary.final_salary, dec("2225"));
    }
}
