use rocket::fairing::{Fairing, Info, Kind};
use rocket::tokio;
use rocket::{Orbit, Rocket};
use std::sync::Arc;
use std::time::Duration;

use crate::rate_limit::RateLimiter;
use crate::relay::dispatch::Dispatcher;

const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(10 * 60);

pub struct BackgroundTasks;

#[rocket::async_trait]
impl Fairing for BackgroundTasks {
    fn info(&self) -> Info {
        Info {
            name: "Background Tasks",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        // One-time SMTP verification
        if let Some(dispatcher) = rocket.state::<Dispatcher>() {
            let transport = dispatcher.transport();
            tokio::spawn(async move {
                match transport.verify().await {
                    Ok(()) => log::info!("[task] SMTP server ready to send emails"),
                    Err(e) => log::error!(
                        "[task] SMTP configuration error: {}. Check SMTP settings and credentials",
                        e
                    ),
                }
            });
        }

        // Rate limiter cleanup
        if let Some(limiter) = rocket.state::<Arc<RateLimiter>>() {
            let limiter = Arc::clone(limiter);
            if limiter.enabled() {
                tokio::spawn(async move {
                    loop {
                        tokio::time::sleep(RATE_LIMIT_CLEANUP_INTERVAL).await;
                        let removed = limiter.cleanup();
                        if removed > 0 {
                            log::debug!("[task] Pruned {} idle rate-limit keys", removed);
                        }
                    }
                });
            }
        }
    }
}
