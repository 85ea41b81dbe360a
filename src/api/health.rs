use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

/// Health check endpoint
///
/// Use for load balancers and uptime monitors. The service has no local
/// dependencies to probe; upstream APIs are contacted best-effort per run
/// and their availability is not a liveness concern.
#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Liveness check endpoint
///
/// Simple check that the process is alive, for restart-on-failure probes.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive".to_string(),
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config.service(health_check).service(liveness_check);
}
