//! HTTP routes

pub mod business;
pub mod health;

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;

use crate::context::AppContext;
use crate::errors::ApiError;
use crate::utils::logging::{error_label, log_command_execution};

/// Build the application router with `ctx` as shared state.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/health", get(health::health))
        .route(
            "/api/business",
            get(business::get_business)
                .post(business::save_business)
                .put(business::save_business)
                .delete(business::delete_business),
        )
        .with_state(ctx)
}

/// Run a handler body, logging its duration and outcome.
pub(crate) async fn logged<T, F>(command: &str, body: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let start = Instant::now();
    let result = body.await;

    if let Err(ApiError::Domain(err)) = &result {
        tracing::debug!(command, error_type = error_label(err), "command returned error");
    }
    log_command_execution(command, start.elapsed(), result.is_ok());
    result
}
