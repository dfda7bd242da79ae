//! Bulk HR data used to seed a store.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AdjustmentRecord, AttendanceRecord, EmployeeProfile, HolidayRecord};

/// Employees, holidays, attendance and adjustments maintained by the rest of
/// the HR system, in one JSON document.
///
/// # Example
///
/// ```
/// use salary_engine::store::HrDataset;
///
/// let dataset: HrDataset = serde_json::from_str(r#"{
///     "employees": [{ "id": "emp_001", "base_salary": "3000" }]
/// }"#).unwrap();
/// assert_eq!(dataset.employees.len(), 1);
/// assert!(dataset.holidays.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HrDataset {
    /// Employee profiles.
    #[serde(default)]
    pub employees: Vec<EmployeeProfile>,
    /// Holiday calendar entries.
    #[serde(default)]
    pub holidays: Vec<HolidayRecord>,
    /// Clock-in events.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Salary adjustments.
    #[serde(default)]
    pub adjustments: Vec<AdjustmentRecord>,
}

impl HrDataset {
    /// Reads a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not a valid dataset.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
