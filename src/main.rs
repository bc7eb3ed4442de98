#[macro_use]
extern crate rocket;

use std::sync::Arc;
use std::time::Duration;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Data, Request, Rocket};
use serde_json::{json, Value};

mod boot;
mod config;
mod cors;
mod email;
mod rate_limit;
mod relay;
mod routes;
mod tasks;
mod templates;


use config::RelayConfig;
use email::smtp::SmtpRelay;
use email::Transport;
use rate_limit::RateLimiter;
use relay::dispatch::Dispatcher;

/// Logs `METHOD path` for every incoming request.
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request Logger",
            kind: Kind::Request,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        log::info!("[http] {} {}", req.method(), req.uri().path());
    }
}

#[catch(400)]
fn bad_request() -> Json<Value> {
    Json(json!({"ok": false, "error": "Malformed request body"}))
}

#[catch(422)]
fn unprocessable() -> Json<Value> {
    Json(json!({"ok": false, "error": "Malformed request body"}))
}

#[catch(404)]
fn not_found(req: &Request) -> Json<Value> {
    Json(json!({
        "ok": false,
        "error": "Endpoint not found",
        "path": req.uri().path().to_string(),
        "method": req.method().as_str(),
    }))
}

#[catch(500)]
fn server_error(req: &Request) -> Json<Value> {
    let debug = req
        .rocket()
        .state::<RelayConfig>()
        .map(|c| c.debug)
        .unwrap_or(false);
    let message = if debug {
        format!("Unhandled error in {} {}", req.method(), req.uri().path())
    } else {
        "An error occurred".to_string()
    };
    log::error!("[http] Internal error in {} {}", req.method(), req.uri().path());
    Json(json!({"ok": false, "error": "Internal server error", "message": message}))
}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request) -> Json<Value> {
    Json(json!({"ok": false, "error": status.reason().unwrap_or("Request failed")}))
}

/// Assemble the server around an already constructed transport.
pub fn build(config: RelayConfig, transport: Arc<dyn Transport>) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.address.clone()))
        .merge(("port", config.port));

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max,
        Duration::from_secs(config.rate_limit_window_secs),
    ));
    let dispatcher = Dispatcher::new(transport, &config);
    let cors = cors::Cors::new(&config.frontend_url);

    rocket::custom(figment)
        .manage(dispatcher)
        .manage(limiter)
        .manage(config)
        .attach(RequestLogger)
        .attach(cors)
        .attach(tasks::BackgroundTasks)
        .mount("/", routes::health::routes())
        .mount("/", routes![cors::preflight])
        .mount("/api/mail", routes::mail::routes())
        .register(
            "/",
            catchers![bad_request, unprocessable, not_found, server_error, default_catcher],
        )
}

#[launch]
fn rocket() -> _ {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RelayConfig::load().unwrap_or_else(|e| {
        log::error!("[boot] {}", e);
        std::process::exit(1);
    });

    boot::run(&config);

    let transport = SmtpRelay::from_config(&config.smtp).unwrap_or_else(|e| {
        log::error!("[boot] Cannot create SMTP transport: {}", e);
        std::process::exit(1);
    });

    build(config, Arc::new(transport))
}
