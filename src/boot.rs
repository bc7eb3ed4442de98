use log::{error, info, warn};
use std::process;

use crate::config::RelayConfig;
use crate::relay::validate::is_valid_email;

const ENDPOINTS: &[&str] = &[
    "GET  /health",
    "GET  /api/version",
    "POST /api/mail/contact  - Contact form submissions",
    "POST /api/mail/career   - Career applications",
    "POST /api/mail/blog     - Blog comments/inquiries",
    "POST /api/mail/send     - Generic email (templateType required)",
];

#[derive(Debug, Default)]
pub struct BootReport {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// Inspect the loaded configuration without side effects.
pub fn check(config: &RelayConfig) -> BootReport {
    let mut report = BootReport::default();

    // ── 1. SMTP relay ──────────────────────────────────
    if config.smtp.host.is_empty() {
        report.errors.push("SMTP_HOST is not set".into());
    }
    if config.smtp.username.is_empty() {
        report
            .warnings
            .push("SMTP_USER is not set, relay will be used without authentication".into());
    } else if config.smtp.password.is_empty() {
        report.warnings.push("SMTP_PASS is empty".into());
    }

    // ── 2. Addresses ───────────────────────────────────
    if config.sender_email.is_empty() {
        report.errors.push("SENDER_EMAIL is not set".into());
    } else if !is_valid_email(&config.sender_email) {
        report
            .errors
            .push(format!("SENDER_EMAIL is not a valid address: {}", config.sender_email));
    }
    if config.admin_email_defaulted {
        report
            .warnings
            .push("ADMIN_EMAIL is not set, admin copies go to SENDER_EMAIL".into());
    } else if !is_valid_email(&config.admin_email) {
        report
            .errors
            .push(format!("ADMIN_EMAIL is not a valid address: {}", config.admin_email));
    }
    if config.sender_name.is_empty() {
        report.warnings.push("SENDER_NAME is not set".into());
    }

    // ── 3. Policies ────────────────────────────────────
    if !config.escape_html {
        report
            .warnings
            .push("HTML escaping is disabled, submitted markup is mailed verbatim".into());
    }
    if config.rate_limit_max > 0 {
        report.warnings.push(format!(
            "Submission rate limiting is on ({} per {}s per client IP); clients behind a shared NAT or proxy, or with no resolvable address, share one bucket",
            config.rate_limit_max, config.rate_limit_window_secs
        ));
    }
    if config.debug {
        report
            .warnings
            .push("Debug mode is on, error details are returned to clients".into());
    }

    report
}

/// Log the startup banner and configuration findings. Call this before
/// Rocket launches; exits the process if any check is fatal.
pub fn run(config: &RelayConfig) {
    info!("{} starting on {}:{}", config.service_name, config.address, config.port);
    info!(
        "  SMTP: {}:{} ({:?}, timeout {}s)",
        config.smtp.host, config.smtp.port, config.smtp.tls, config.smtp.timeout_secs
    );
    info!("  Sender: {} <{}>", config.sender_name, config.sender_email);
    info!("  Admin mailbox: {}", config.admin_email);
    info!("  CORS origin: {}", config.frontend_url);
    for endpoint in ENDPOINTS {
        info!("  {}", endpoint);
    }

    let report = check(config);
    for w in &report.warnings {
        warn!("[boot] {}", w);
    }
    for e in &report.errors {
        error!("[boot] {}", e);
    }

    if !report.errors.is_empty() {
        error!(
            "[boot] {} fatal configuration error(s), refusing to start",
            report.errors.len()
        );
        process::exit(1);
    }

    info!("[boot] Checks passed with {} warning(s)", report.warnings.len());
}
