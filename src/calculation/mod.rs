//! Calculation logic for the salary engine.
//!
//! Each step of the monthly salary calculation is a pure function that returns
//! its value together with an audit step: working hours per day, hourly rate,
//! holiday count, absent days, adjustment totals and the final salary.
//! [`SalaryCalculator`] composes them over the data collaborators.

mod absence;
mod adjustments;
mod final_salary;
mod holidays;
mod hourly_rate;
mod period;
mod rounding;
mod salary;
mod working_hours;

pub use absence::{ABSENT_DAYS_CLAMPED, AbsentDaysResult, calculate_absent_days};
pub use adjustments::{AdjustmentTotals, aggregate_adjustments};
pub use final_salary::{FinalSalaryInput, FinalSalaryResult, calculate_final_salary};
pub use holidays::{HolidayCountResult, count_holidays_in_period};
pub use hourly_rate::{HourlyRateResult, calculate_hourly_rate, validate_base_salary};
pub use period::{DAYS_IN_MONTH, month_name, resolve_period};
pub use rounding::{REPORTED_DECIMAL_PLACES, round_money};
pub use salary::{DEFAULT_WORKING_HOURS_USED, SalaryCalculator};
pub use working_hours::{
    DEFAULT_WORKING_HOURS, MAX_SHIFT_HOURS, WorkingHoursResult, calculate_working_hours,
};
