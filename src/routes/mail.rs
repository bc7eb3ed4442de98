use std::net::IpAddr;
use std::sync::Arc;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{Map, Value};

use crate::rate_limit::{self, RateLimiter};
use crate::relay::dispatch::Dispatcher;
use crate::relay::handlers::{self, Endpoint, Reply};

async fn submit(
    dispatcher: &Dispatcher,
    limiter: &RateLimiter,
    client_ip: Option<IpAddr>,
    endpoint: Endpoint,
    body: &Map<String, Value>,
) -> Reply {
    let ip = client_ip
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let rate_key = format!("submit:{}", rate_limit::hash_ip(&ip));

    if !limiter.check_and_record(&rate_key) {
        log::warn!("[http] Rate limit hit for {:?} submission", endpoint);
        return Reply::error(
            Status::TooManyRequests,
            "Too many submissions. Please wait before trying again.",
        );
    }

    handlers::handle(dispatcher, endpoint, body).await
}

#[post("/contact", data = "<body>")]
pub async fn contact(
    dispatcher: &State<Dispatcher>,
    limiter: &State<Arc<RateLimiter>>,
    client_ip: Option<IpAddr>,
    body: Json<Map<String, Value>>,
) -> Reply {
    submit(dispatcher, limiter, client_ip, Endpoint::Contact, &body).await
}

#[post("/career", data = "<body>")]
pub async fn career(
    dispatcher: &State<Dispatcher>,
    limiter: &State<Arc<RateLimiter>>,
    client_ip: Option<IpAddr>,
    body: Json<Map<String, Value>>,
) -> Reply {
    submit(dispatcher, limiter, client_ip, Endpoint::Career, &body).await
}

#[post("/blog", data = "<body>")]
pub async fn blog(
    dispatcher: &State<Dispatcher>,
    limiter: &State<Arc<RateLimiter>>,
    client_ip: Option<IpAddr>,
    body: Json<Map<String, Value>>,
) -> Reply {
    submit(dispatcher, limiter, client_ip, Endpoint::Blog, &body).await
}

#[post("/send", data = "<body>")]
pub async fn send(
    dispatcher: &State<Dispatcher>,
    limiter: &State<Arc<RateLimiter>>,
    client_ip: Option<IpAddr>,
    body: Json<Map<String, Value>>,
) -> Reply {
    submit(dispatcher, limiter, client_ip, Endpoint::Generic, &body).await
}

pub fn routes() -> Vec<rocket::Route> {
    routes![contact, career, blog, send]
}
