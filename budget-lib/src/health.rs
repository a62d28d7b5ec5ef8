use actix_web::{web, HttpResponse, Responder};
use budget_repo::HealthCheck;
use std::sync::Arc;
use tracing::warn;

#[get("/health")]
pub async fn health(health_check: web::Data<Arc<dyn HealthCheck>>) -> impl Responder {
    if health_check.check().await {
        HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
    } else {
        warn!("Store is not answering");
        HttpResponse::ServiceUnavailable().json(serde_json::json!({ "status": "unavailable" }))
    }
}
