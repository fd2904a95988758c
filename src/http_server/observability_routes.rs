//! Health HTTP Route
//!
//! Reports liveness together with the store's startup condition so a
//! degraded data bank is visible to operators.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::manga_routes::MangaState;
use crate::repository::StoreStatus;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the data bank could not be loaded
    pub status: String,
    pub version: String,
    pub store: StoreStatus,
}

/// Health check route
pub fn health_routes(state: Arc<MangaState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<MangaState>>) -> impl IntoResponse {
    let store = state.service.status().clone();
    let status = if store.is_degraded() { "degraded" } else { "ok" };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store,
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "degraded".to_string(),
            version: "0.1.0".to_string(),
            store: StoreStatus::Degraded {
                reason: "EOF while parsing".to_string(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["store"]["state"], "degraded");
        assert_eq!(json["store"]["reason"], "EOF while parsing");
    }
}
