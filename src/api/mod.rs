//! HTTP API module for the salary engine.
//!
//! Exposes salary calculation and summary lookup over JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculateSalaryRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
