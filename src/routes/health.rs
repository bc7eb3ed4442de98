use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::RelayConfig;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: String,
    pub timestamp: String,
}

#[get("/health")]
pub fn health(config: &State<RelayConfig>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: format!("{} is running", config.service_name),
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
}

#[get("/api/version")]
pub fn version() -> Json<Value> {
    Json(json!({
        "ok": true,
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![health, version]
}
