use actix_web::{HttpResponse, web};
use serde_json::json;

// 存活检查，不访问存储
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/health", web::get().to(health));
}
