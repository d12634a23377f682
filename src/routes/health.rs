use actix_web::{web, HttpResponse, Responder};
use crate::models::HealthResponse;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check endpoint
///
/// Reports `degraded` while either directory is served from the sample set.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut degraded = false;
    for kind in [crate::models::ProfileKind::Mentor, crate::models::ProfileKind::Expert] {
        if let Some(snapshot) = state.directory.current(kind).await {
            degraded |= snapshot.degraded;
        }
    }

    let status = if degraded { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        store: state.hub.store_stats(),
    })
}
