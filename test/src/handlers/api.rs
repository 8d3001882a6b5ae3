//! API routes (protected by the API key middleware).

use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::{json, Value};

use actix_localapikey_core::http::security::{AuthInfo, AuthenticatedUser};

use crate::clients::Client;

/// Returns the client owning the presented key.
#[get("/whoami")]
pub async fn whoami(client: AuthenticatedUser<Client>, info: AuthInfo) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "client": client.name,
        "scopes": client.scopes,
        "message": info.message(),
    }))
}

/// Echoes the JSON body; the key travels inside it.
#[post("/echo")]
pub async fn echo(client: AuthenticatedUser<Client>, body: web::Json<Value>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "client": client.name,
        "received": body.into_inner(),
    }))
}
