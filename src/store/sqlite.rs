//! SQLite-backed HR store.
//!
//! Decimals are stored as TEXT to keep them exact. Salary summaries carry a
//! `UNIQUE(employee_id, year, month)` constraint and are written with an
//! `INSERT .. ON CONFLICT DO UPDATE` inside a transaction.

use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdjustmentDirection, AdjustmentKind, AdjustmentRecord, AttendanceRecord, EmployeeProfile,
    HolidayRecord, HolidayType, SalarySummary, SummaryFields,
};

use super::{
    AdjustmentLedger, AttendanceLog, EmployeeDirectory, HolidayCalendar, HrDataset, SummaryStore,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id TEXT PRIMARY KEY,
    name TEXT,
    base_salary TEXT,
    attendance_time TEXT,
    leave_time TEXT
);

CREATE TABLE IF NOT EXISTS holidays (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    type TEXT NOT NULL,
    day TEXT,
    name TEXT
);

CREATE TABLE IF NOT EXISTS attendance (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id TEXT NOT NULL,
    date TEXT NOT NULL,
    check_in TEXT
);

CREATE TABLE IF NOT EXISTS adjustments (
    id TEXT PRIMARY KEY,
    employee_id TEXT NOT NULL,
    date TEXT NOT NULL,
    value TEXT NOT NULL,
    kind TEXT NOT NULL,
    direction TEXT NOT NULL,
    reason TEXT
);

CREATE TABLE IF NOT EXISTS salary_summaries (
    id TEXT PRIMARY KEY,
    employee_id TEXT NOT NULL,
    month TEXT NOT NULL,
    year INTEGER NOT NULL,
    attendance_days INTEGER NOT NULL,
    absent_days INTEGER NOT NULL,
    addition_hours TEXT NOT NULL,
    deduction_hours TEXT NOT NULL,
    total_additions TEXT NOT NULL,
    total_deductions TEXT NOT NULL,
    final_salary TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (employee_id, year, month)
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_holidays_date_type ON holidays(date, type);
CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_employee_date ON attendance(employee_id, date);
CREATE INDEX IF NOT EXISTS idx_adjustments_employee_date ON adjustments(employee_id, date);
"#;

const SUMMARY_COLUMNS: &str = "id, employee_id, month, year, attendance_days, absent_days, \
     addition_hours, deduction_hours, total_additions, total_deductions, final_salary, updated_at";

fn sql_error(collaborator: &'static str) -> impl FnOnce(rusqlite::Error) -> EngineError {
    move |e| EngineError::dependency(collaborator, e)
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn optional_decimal_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| {
        Decimal::from_str(&t)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn holiday_type_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<HolidayType> {
    let text: String = row.get(idx)?;
    match text.as_str() {
        "official" => Ok(HolidayType::Official),
        "weekly" => Ok(HolidayType::Weekly),
        other => Err(conversion_error(idx, format!("unknown holiday type '{}'", other))),
    }
}

fn adjustment_kind_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<AdjustmentKind> {
    let text: String = row.get(idx)?;
    match text.as_str() {
        "money" => Ok(AdjustmentKind::Money),
        "hours" => Ok(AdjustmentKind::Hours),
        other => Err(conversion_error(idx, format!("unknown adjustment kind '{}'", other))),
    }
}

fn adjustment_direction_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<AdjustmentDirection> {
    let text: String = row.get(idx)?;
    match text.as_str() {
        "addition" => Ok(AdjustmentDirection::Addition),
        "deduction" => Ok(AdjustmentDirection::Deduction),
        other => Err(conversion_error(
            idx,
            format!("unknown adjustment direction '{}'", other),
        )),
    }
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<SalarySummary> {
    Ok(SalarySummary {
        id: uuid_at(row, 0)?,
        employee_id: row.get(1)?,
        month: row.get(2)?,
        year: row.get(3)?,
        attendance_days: row.get(4)?,
        absent_days: row.get(5)?,
        addition_hours: decimal_at(row, 6)?,
        deduction_hours: decimal_at(row, 7)?,
        total_additions: decimal_at(row, 8)?,
        total_deductions: decimal_at(row, 9)?,
        final_salary: decimal_at(row, 10)?,
        updated_at: row.get::<_, DateTime<Utc>>(11)?,
    })
}

/// A store backed by a single SQLite connection.
pub struct SqliteHrStore {
    conn: Mutex<Connection>,
}

impl SqliteHrStore {
    /// Opens (or creates) a database file and ensures the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let conn = Connection::open(path.as_ref()).map_err(sql_error("sqlite store"))?;
        debug!(path = %path.as_ref().display(), "Opened SQLite HR store");
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory().map_err(sql_error("sqlite store"))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> EngineResult<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(sql_error("sqlite store"))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self, collaborator: &'static str) -> EngineResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            EngineError::dependency(collaborator, "connection lock poisoned by a panicked writer")
        })
    }

    /// Adds or replaces an employee.
    pub fn insert_employee(&self, employee: &EmployeeProfile) -> EngineResult<()> {
        let conn = self.lock("employee directory")?;
        insert_employee(&conn, employee).map_err(sql_error("employee directory"))
    }

    /// Adds a holiday unless one of the same type exists on that date.
    pub fn insert_holiday(&self, holiday: &HolidayRecord) -> EngineResult<()> {
        let conn = self.lock("holiday calendar")?;
        insert_holiday(&conn, holiday).map_err(sql_error("holiday calendar"))
    }

    /// Adds a clock-in event; later events on an already recorded date are
    /// ignored.
    pub fn record_attendance(&self, record: &AttendanceRecord) -> EngineResult<()> {
        let conn = self.lock("attendance log")?;
        insert_attendance(&conn, record).map_err(sql_error("attendance log"))
    }

    /// Adds an adjustment.
    pub fn record_adjustment(&self, adjustment: &AdjustmentRecord) -> EngineResult<()> {
        let conn = self.lock("adjustment ledger")?;
        insert_adjustment(&conn, adjustment).map_err(sql_error("adjustment ledger"))
    }

    /// Imports every record of a dataset in one transaction.
    ///
    /// Importing the same dataset again leaves the data unchanged.
    pub fn import(&self, dataset: &HrDataset) -> EngineResult<()> {
        let mut conn = self.lock("sqlite store")?;
        let tx = conn.transaction().map_err(sql_error("sqlite store"))?;

        for employee in &dataset.employees {
            insert_employee(&tx, employee).map_err(sql_error("employee directory"))?;
        }
        for holiday in &dataset.holidays {
            insert_holiday(&tx, holiday).map_err(sql_error("holiday calendar"))?;
        }
        for record in &dataset.attendance {
            insert_attendance(&tx, record).map_err(sql_error("attendance log"))?;
        }
        for adjustment in &dataset.adjustments {
            insert_adjustment(&tx, adjustment).map_err(sql_error("adjustment ledger"))?;
        }

        tx.commit().map_err(sql_error("sqlite store"))?;
        debug!(
            employees = dataset.employees.len(),
            holidays = dataset.holidays.len(),
            attendance = dataset.attendance.len(),
            adjustments = dataset.adjustments.len(),
            "Imported HR dataset"
        );
        Ok(())
    }
}

fn insert_employee(conn: &Connection, employee: &EmployeeProfile) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO employees (id, name, base_salary, attendance_time, leave_time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            employee.id,
            employee.name,
            employee.base_salary.map(|s| s.to_string()),
            employee.attendance_time,
            employee.leave_time,
        ],
    )?;
    Ok(())
}

fn insert_holiday(conn: &Connection, holiday: &HolidayRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO holidays (date, type, day, name) VALUES (?1, ?2, ?3, ?4)",
        params![
            holiday.date,
            holiday.holiday_type.as_str(),
            holiday.day,
            holiday.name,
        ],
    )?;
    Ok(())
}

fn insert_attendance(conn: &Connection, record: &AttendanceRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO attendance (employee_id, date, check_in) VALUES (?1, ?2, ?3)",
        params![record.employee_id, record.date, record.check_in],
    )?;
    Ok(())
}

fn insert_adjustment(conn: &Connection, adjustment: &AdjustmentRecord) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO adjustments (id, employee_id, date, value, kind, direction, reason)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            adjustment.id.to_string(),
            adjustment.employee_id,
            adjustment.date,
            adjustment.value.to_string(),
            adjustment.kind.as_str(),
            adjustment.direction.as_str(),
            adjustment.reason,
        ],
    )?;
    Ok(())
}

impl EmployeeDirectory for SqliteHrStore {
    fn employee_by_id(&self, employee_id: &str) -> EngineResult<Option<EmployeeProfile>> {
        let conn = self.lock("employee directory")?;
        conn.query_row(
            "SELECT id, name, base_salary, attendance_time, leave_time
             FROM employees WHERE id = ?1",
            params![employee_id],
            |row| {
                Ok(EmployeeProfile {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    base_salary: optional_decimal_at(row, 2)?,
                    attendance_time: row.get(3)?,
                    leave_time: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(sql_error("employee directory"))
    }
}

impl HolidayCalendar for SqliteHrStore {
    fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<HolidayRecord>> {
        let conn = self.lock("holiday calendar")?;
        let mut stmt = conn
            .prepare(
                "SELECT date, type, day, name FROM holidays
                 WHERE date BETWEEN ?1 AND ?2 ORDER BY date",
            )
            .map_err(sql_error("holiday calendar"))?;

        let rows = stmt
            .query_map(params![start, end], |row| {
                Ok(HolidayRecord {
                    date: row.get(0)?,
                    holiday_type: holiday_type_at(row, 1)?,
                    day: row.get(2)?,
                    name: row.get(3)?,
                })
            })
            .map_err(sql_error("holiday calendar"))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error("holiday calendar"))
    }
}

impl AttendanceLog for SqliteHrStore {
    fn distinct_attendance_days(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<u32> {
        let conn = self.lock("attendance log")?;
        conn.query_row(
            "SELECT COUNT(DISTINCT date) FROM attendance
             WHERE employee_id = ?1 AND date BETWEEN ?2 AND ?3",
            params![employee_id, start, end],
            |row| row.get::<_, u32>(0),
        )
        .map_err(sql_error("attendance log"))
    }
}

impl AdjustmentLedger for SqliteHrStore {
    fn adjustments_in_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AdjustmentRecord>> {
        let conn = self.lock("adjustment ledger")?;
        let mut stmt = conn
            .prepare(
                "SELECT id, employee_id, date, value, kind, direction, reason FROM adjustments
                 WHERE employee_id = ?1 AND date BETWEEN ?2 AND ?3 ORDER BY date",
            )
            .map_err(sql_error("adjustment ledger"))?;

        let rows = stmt
            .query_map(params![employee_id, start, end], |row| {
                Ok(AdjustmentRecord {
                    id: uuid_at(row, 0)?,
                    employee_id: row.get(1)?,
                    date: row.get(2)?,
                    value: decimal_at(row, 3)?,
                    kind: adjustment_kind_at(row, 4)?,
                    direction: adjustment_direction_at(row, 5)?,
                    reason: row.get(6)?,
                })
            })
            .map_err(sql_error("adjustment ledger"))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(sql_error("adjustment ledger"))
    }
}

impl SummaryStore for SqliteHrStore {
    fn upsert_salary_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: &str,
        fields: SummaryFields,
    ) -> EngineResult<SalarySummary> {
        let mut conn = self.lock("summary store")?;
        let tx = conn.transaction().map_err(sql_error("summary store"))?;

        tx.execute(
            "INSERT INTO salary_summaries (
                id, employee_id, month, year, attendance_days, absent_days,
                addition_hours, deduction_hours, total_additions, total_deductions,
                final_salary, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT (employee_id, year, month) DO UPDATE SET
                attendance_days = excluded.attendance_days,
                absent_days = excluded.absent_days,
                addition_hours = excluded.addition_hours,
                deduction_hours = excluded.deduction_hours,
                total_additions = excluded.total_additions,
                total_deductions = excluded.total_deductions,
                final_salary = excluded.final_salary,
                updated_at = excluded.updated_at",
            params![
                Uuid::new_v4().to_string(),
                employee_id,
                month,
                year,
                fields.attendance_days,
                fields.absent_days,
                fields.addition_hours.to_string(),
                fields.deduction_hours.to_string(),
                fields.total_additions.to_string(),
                fields.total_deductions.to_string(),
                fields.final_salary.to_string(),
                Utc::now(),
            ],
        )
        .map_err(sql_error("summary store"))?;

        let summary = tx
            .query_row(
                &format!(
                    "SELECT {} FROM salary_summaries
                     WHERE employee_id = ?1 AND year = ?2 AND month = ?3",
                    SUMMARY_COLUMNS
                ),
                params![employee_id, year, month],
                summary_from_row,
            )
            .map_err(sql_error("summary store"))?;

        tx.commit().map_err(sql_error("summary store"))?;
        Ok(summary)
    }

    fn find_salary_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: &str,
    ) -> EngineResult<Option<SalarySummary>> {
        let conn = self.lock("summary store")?;
        conn.query_row(
            &format!(
                "SELECT {} FROM salary_summaries
                 WHERE employee_id = ?1 AND year = ?2 AND month = ?3",
                SUMMARY_COLUMNS
            ),
            params![employee_id, year, month],
            summary_from_row,
        )
        .optional()
        .map_err(sql_error("summary store"))
    }
}
