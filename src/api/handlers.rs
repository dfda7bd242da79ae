//! HTTP request handlers for the salary engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::SalaryCalculator;
use crate::error::{EngineError, EngineResult};

use super::request::CalculateSalaryRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/salary/calculate", post(calculate_handler))
        .route(
            "/salary/summaries/:employee_id/:year/:month",
            get(summary_handler),
        )
        .with_state(state)
}

/// Runs a calculator call on the blocking thread pool.
///
/// Store backends hold locks and may do file I/O, so calls stay off the async
/// worker threads.
async fn run_blocking<T, F>(state: AppState, call: F) -> EngineResult<T>
where
    T: Send + 'static,
    F: FnOnce(&SalaryCalculator) -> EngineResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(state.calculator()))
        .await
        .map_err(|e| EngineError::dependency("salary calculator", e))?
}

/// Handler for POST /salary/calculate.
///
/// Computes the salary for the requested month and upserts its summary.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateSalaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response();
        }
    };

    let start_time = Instant::now();
    let employee_id = request.employee_id.clone();
    let (year, month) = (request.year, request.month);
    let outcome = run_blocking(state, move |calculator| {
        calculator.compute_salary(&employee_id, year, month)
    })
    .await;

    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                final_salary = %result.final_salary,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Salary calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                error = %err,
                "Salary calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /salary/summaries/:employee_id/:year/:month.
async fn summary_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (employee_id, year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Invalid summary path"
            );
            return ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(body_text),
            )
            .into_response();
        }
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year,
        month,
        "Fetching salary summary"
    );

    let lookup_id = employee_id.clone();
    let outcome = run_blocking(state, move |calculator| {
        calculator.summary(&lookup_id, year, month)
    })
    .await;

    match outcome {
        Ok(Some(summary)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(summary),
        )
            .into_response(),
        Ok(None) => ApiErrorResponse::new(
            StatusCode::NOT_FOUND,
            ApiError::summary_not_found(&employee_id, year, month),
        )
        .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Summary lookup failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
