//! HTTP API module for the CRS scoring engine.
//!
//! This module provides the REST API endpoints for scoring candidate
//! profiles and inspecting the session configuration and cutoffs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ProfileRequest, ScoreRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
