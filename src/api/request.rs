//! Request types for the salary engine API.

use serde::{Deserialize, Serialize};

/// Request body for the `/salary/calculate` endpoint.
///
/// `year` and `month` default to the current month when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateSalaryRequest {
    /// The employee to calculate.
    pub employee_id: String,
    /// Calendar year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Calendar month, 1-12.
    #[serde(default)]
    pub month: Option<u32>,
}
