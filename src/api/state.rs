//! Application state for the salary engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::SalaryCalculator;

/// Shared application state.
///
/// Holds the calculator, which in turn holds the store collaborators.
#[derive(Clone)]
pub struct AppState {
    calculator: Arc<SalaryCalculator>,
}

impl AppState {
    /// Creates a new application state around a calculator.
    pub fn new(calculator: SalaryCalculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
        }
    }

    /// Returns a reference to the calculator.
    pub fn calculator(&self) -> &SalaryCalculator {
        &self.calculator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Required for axum state
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
