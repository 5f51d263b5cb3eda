//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `postgres` or `memory`.
    pub storage: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, storage) = match &state.db {
        Some(db) if db.ping().await => ("ok", "postgres"),
        Some(_) => ("degraded", "postgres"),
        None => ("ok", "memory"),
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        storage,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if status == "ok" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test;
    use serde_json::Value;

    use crate::handlers::testing::state;

    #[actix_rt::test]
    async fn test_in_memory_health() {
        let state = state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/api/health/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }
}
