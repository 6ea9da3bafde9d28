//! HTTP and WebSocket routing configuration.
//!
//! Clients hold one WebSocket connection for their whole visit: queueing,
//! match play, and results all travel over it.

use actix_web::{web, HttpResponse};
use crate::server::session::ws_connect;

/// Liveness probe.
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws").to(ws_connect))
        .service(web::resource("/health").to(health));
}
