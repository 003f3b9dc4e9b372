//! HTTP request handlers for the CRS scoring engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::score;
use crate::config::ScoringConfig;
use crate::models::{CandidateProfile, CutoffScores};

use super::request::ScoreRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Prefix of the message produced when a configuration snapshot fails validation.
const INVALID_CONFIG_MARKER: &str = "Invalid configuration table";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/score", post(score_handler))
        .route("/config", get(config_handler))
        .route("/cutoffs", get(cutoffs_handler))
        .with_state(state)
}

/// Handler for POST /score endpoint.
///
/// Accepts a profile with an optional configuration snapshot and cutoffs,
/// and returns the score result. The request snapshot takes precedence over
/// the session configuration.
async fn score_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing score request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response();
        }
    };

    let profile: CandidateProfile = request.profile.into();
    let config: Option<&ScoringConfig> = request.config.as_ref().or(state.config());
    let cutoffs: &CutoffScores = request.cutoffs.as_ref().unwrap_or(state.cutoffs());
    let config_source = if request.config.is_some() {
        "request"
    } else {
        "session"
    };

    let start_time = Instant::now();
    match score(&profile, config, cutoffs) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                config_source,
                config_version = %result.config_version,
                total_score = result.total_score,
                warnings = result.audit_trace.warnings.len(),
                duration_us = duration.as_micros(),
                "Scoring completed successfully"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Scoring failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /config endpoint.
///
/// Returns the session configuration as a snapshot that can be edited and
/// sent back with a score request.
async fn config_handler(State(state): State<AppState>) -> Response {
    match state.config() {
        Some(config) => json_response(StatusCode::OK, config),
        None => {
            warn!("Configuration requested but none is loaded");
            ApiErrorResponse::new(
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::configuration_missing(),
            )
            .into_response()
        }
    }
}

/// Handler for GET /cutoffs endpoint.
async fn cutoffs_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.cutoffs())
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to an API error.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed serde error
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains(INVALID_CONFIG_MARKER) {
                ApiError::invalid_config(body_text)
            } else if body_text.contains("missing field") {
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
    }
}
