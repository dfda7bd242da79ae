//! Core data models for the Salary Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adjustment;
mod attendance;
mod calculation_result;
mod employee;
mod holiday;
mod salary_period;
mod salary_summary;

pub use adjustment::{AdjustmentDirection, AdjustmentKind, AdjustmentRecord};
pub use attendance::AttendanceRecord;
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, SalaryResult};
pub use employee::EmployeeProfile;
pub use holiday::{HolidayRecord, HolidayType};
pub use salary_period::SalaryPeriod;
pub use salary_summary::{SalarySummary, SummaryFields};
