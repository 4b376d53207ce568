//! `/api/health`

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::context::AppContext;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
    pub backend: &'static str,
}

/// Liveness plus storage reachability. Always 200 while the process serves.
pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<HealthResponse> {
    let store = ctx.profiles.store();
    let storage = match store.health_check().await {
        Ok(()) => "ok",
        Err(err) => {
            warn!(backend = store.backend_name(), error = %err, "storage health check failed");
            "unavailable"
        }
    };

    Json(HealthResponse { status: "ok", storage, backend: store.backend_name() })
}
