//! Public routes (no API key required).

use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "up",
        "version": actix_localapikey_core::VERSION,
    }))
}
