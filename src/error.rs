//! Error types for the Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a salary calculation.

use thiserror::Error;

/// The main error type for the Salary Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No employee exists with the requested identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// An input value was missing or outside its valid range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A data collaborator (employee directory, holiday calendar, attendance
    /// log, adjustment ledger or summary store) failed.
    #[error("{collaborator} failed: {message}")]
    DependencyFailure {
        /// The collaborator that failed.
        collaborator: String,
        /// A description of the failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::DependencyFailure`].
    pub fn dependency(collaborator: impl Into<String>, message: impl ToString) -> Self {
        EngineError::DependencyFailure {
            collaborator: collaborator.into(),
            message: message.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            employee_id: "emp_042".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: emp_042");
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("base_salary", "must be greater than zero");
        assert_eq!(
            error.to_string(),
            "Invalid input 'base_salary': must be greater than zero"
        );
    }

    #[test]
    fn test_dependency_failure_displays_collaborator() {
        let error = EngineError::dependency("attendance log", "database is locked");
        assert_eq!(
            error.to_string(),
            "attendance log failed: database is locked"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                employee_id: "emp_001".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
