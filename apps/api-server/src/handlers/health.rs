//! Liveness endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// `postgres` or `in-memory`, so a monitor can tell a misconfigured
    /// deployment from a healthy one.
    pub storage: &'static str,
}

/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok",
        service: "quill-api",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.storage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn health_reports_storage_backend() {
        let state = AppState::new(None).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "quill-api");
        assert_eq!(body["storage"], "in-memory");
    }
}
