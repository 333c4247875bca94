//! Application-specific health check handlers with a real MongoDB check.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Readiness check endpoint that actually pings MongoDB.
///
/// This uses the generic `run_health_checks` utility from axum-helpers
/// to verify the database dependency is healthy.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "mongodb",
        Box::pin(async {
            if database::mongodb::check_health(&state.mongo_client).await {
                Ok(())
            } else {
                Err("MongoDB ping failed".to_string())
            }
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
