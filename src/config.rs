use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::templates::HtmlPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "relay.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    Implicit,
    StartTls,
    None,
}

impl TlsMode {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "implicit" | "ssl" | "tls" => Some(Self::Implicit),
            "starttls" => Some(Self::StartTls),
            "none" | "plain" => Some(Self::None),
            _ => None,
        }
    }

    fn for_port(port: u16) -> Self {
        if port == 465 {
            Self::Implicit
        } else {
            Self::StartTls
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub tls: TlsMode,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub address: String,
    pub port: u16,
    pub service_name: String,
    pub sender_name: String,
    pub sender_email: String,
    /// Recipient of every submission. Falls back to `sender_email`.
    pub admin_email: String,
    pub admin_email_defaulted: bool,
    pub frontend_url: String,
    pub debug: bool,
    pub escape_html: bool,
    pub rate_limit_max: u64,
    pub rate_limit_window_secs: u64,
    pub smtp: SmtpConfig,
}

/// On-disk shape of `relay.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    address: Option<String>,
    port: Option<u16>,
    service_name: Option<String>,
    sender_name: Option<String>,
    sender_email: Option<String>,
    admin_email: Option<String>,
    frontend_url: Option<String>,
    debug: Option<bool>,
    escape_html: Option<bool>,
    rate_limit_max: Option<u64>,
    rate_limit_window_secs: Option<u64>,
    smtp: FileSmtp,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSmtp {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    tls: Option<TlsMode>,
    timeout_secs: Option<u64>,
}

impl RelayConfig {
    /// Read `$RELAY_CONFIG` (or `relay.toml`) if present, then apply the
    /// process environment on top.
    pub fn load() -> Result<Self, String> {
        let env: HashMap<String, String> = std::env::vars().collect();
        let path = env
            .get("RELAY_CONFIG")
            .cloned()
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        let file = if Path::new(&path).exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("Cannot read {}: {}", path, e))?;
            Some(text)
        } else {
            None
        };

        Self::from_sources(file.as_deref(), &env)
    }

    /// Merge an optional TOML document with environment overrides.
    pub fn from_sources(toml_text: Option<&str>, env: &HashMap<String, String>) -> Result<Self, String> {
        let file: FileConfig = match toml_text {
            Some(text) => toml::from_str(text).map_err(|e| format!("Invalid config file: {}", e))?,
            None => FileConfig::default(),
        };

        let var = |key: &str| env.get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let smtp_port = match var("SMTP_PORT") {
            Some(v) => parse_num::<u16>("SMTP_PORT", &v)?,
            None => file.smtp.port.unwrap_or(587),
        };
        let tls = match var("SMTP_TLS") {
            Some(v) => TlsMode::parse(&v).ok_or_else(|| format!("Invalid SMTP_TLS value: {}", v))?,
            None => file.smtp.tls.unwrap_or_else(|| TlsMode::for_port(smtp_port)),
        };
        let timeout_secs = match var("SMTP_TIMEOUT_SECS") {
            Some(v) => parse_num::<u64>("SMTP_TIMEOUT_SECS", &v)?,
            None => file.smtp.timeout_secs.unwrap_or(30),
        };

        let smtp = SmtpConfig {
            host: var("SMTP_HOST").or(file.smtp.host).unwrap_or_default(),
            port: smtp_port,
            username: var("SMTP_USER").or(file.smtp.username).unwrap_or_default(),
            password: env
                .get("SMTP_PASS")
                .cloned()
                .or(file.smtp.password)
                .unwrap_or_default(),
            tls,
            timeout_secs,
        };

        let port = match var("PORT") {
            Some(v) => parse_num::<u16>("PORT", &v)?,
            None => file.port.unwrap_or(4000),
        };

        let sender_email = var("SENDER_EMAIL").or(file.sender_email).unwrap_or_default();
        let admin_email = var("ADMIN_EMAIL").or(file.admin_email);
        let admin_email_defaulted = admin_email.is_none();

        let rate_limit_max = match var("RATE_LIMIT_MAX") {
            Some(v) => parse_num::<u64>("RATE_LIMIT_MAX", &v)?,
            None => file.rate_limit_max.unwrap_or(0),
        };
        let rate_limit_window_secs = match var("RATE_LIMIT_WINDOW_SECS") {
            Some(v) => parse_num::<u64>("RATE_LIMIT_WINDOW_SECS", &v)?,
            None => file.rate_limit_window_secs.unwrap_or(900),
        };

        Ok(RelayConfig {
            address: var("ADDRESS").or(file.address).unwrap_or_else(|| "0.0.0.0".into()),
            port,
            service_name: var("SERVICE_NAME")
                .or(file.service_name)
                .unwrap_or_else(|| "Mail relay".into()),
            sender_name: var("SENDER_NAME").or(file.sender_name).unwrap_or_default(),
            admin_email: admin_email.unwrap_or_else(|| sender_email.clone()),
            admin_email_defaulted,
            sender_email,
            frontend_url: var("FRONTEND_URL")
                .or(file.frontend_url)
                .unwrap_or_else(|| "http://localhost:5173".into()),
            debug: match var("RELAY_DEBUG") {
                Some(v) => parse_flag(&v),
                None => file.debug.unwrap_or(false),
            },
            escape_html: match var("ESCAPE_HTML") {
                Some(v) => parse_flag(&v),
                None => file.escape_html.unwrap_or(true),
            },
            rate_limit_max,
            rate_limit_window_secs,
            smtp,
        })
    }

    pub fn html_policy(&self) -> HtmlPolicy {
        if self.escape_html {
            HtmlPolicy::Escape
        } else {
            HtmlPolicy::Verbatim
        }
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid {} value: {}", key, value))
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_without_sources() {
        let cfg = RelayConfig::from_sources(None, &HashMap::new()).unwrap();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.smtp.port, 587);
        assert_eq!(cfg.smtp.tls, TlsMode::StartTls);
        assert_eq!(cfg.smtp.timeout_secs, 30);
        assert_eq!(cfg.frontend_url, "http://localhost:5173");
        assert!(cfg.escape_html);
        assert!(!cfg.debug);
        assert_eq!(cfg.rate_limit_max, 0);
    }

    #[test]
    fn admin_mailbox_falls_back_to_sender() {
        let cfg = RelayConfig::from_sources(None, &env(&[("SENDER_EMAIL", "hello@acme.test")])).unwrap();
        assert_eq!(cfg.admin_email, "hello@acme.test");
        assert!(cfg.admin_email_defaulted);

        let cfg = RelayConfig::from_sources(
            None,
            &env(&[("SENDER_EMAIL", "hello@acme.test"), ("ADMIN_EMAIL", "ops@acme.test")]),
        )
        .unwrap();
        assert_eq!(cfg.admin_email, "ops@acme.test");
        assert!(!cfg.admin_email_defaulted);
    }

    #[test]
    fn env_overrides_file() {
        let file = r#"
            sender_email = "file@acme.test"
            port = 8080

            [smtp]
            host = "smtp.file.test"
            port = 2525
            tls = "none"
        "#;
        let cfg = RelayConfig::from_sources(
            Some(file),
            &env(&[("SMTP_HOST", "smtp.env.test"), ("PORT", "9000")]),
        )
        .unwrap();
        assert_eq!(cfg.smtp.host, "smtp.env.test");
        assert_eq!(cfg.smtp.port, 2525);
        assert_eq!(cfg.smtp.tls, TlsMode::None);
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.sender_email, "file@acme.test");
    }

    #[test]
    fn port_465_implies_implicit_tls() {
        let cfg = RelayConfig::from_sources(None, &env(&[("SMTP_PORT", "465")])).unwrap();
        assert_eq!(cfg.smtp.tls, TlsMode::Implicit);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(RelayConfig::from_sources(None, &env(&[("SMTP_PORT", "abc")])).is_err());
        assert!(RelayConfig::from_sources(None, &env(&[("SMTP_TLS", "maybe")])).is_err());
        assert!(RelayConfig::from_sources(Some("smtp = 3"), &HashMap::new()).is_err());
        assert!(RelayConfig::from_sources(Some("unknown_key = 1"), &HashMap::new()).is_err());
    }

    #[test]
    fn escape_policy_toggle() {
        let cfg = RelayConfig::from_sources(None, &env(&[("ESCAPE_HTML", "false")])).unwrap();
        assert_eq!(cfg.html_policy(), HtmlPolicy::Verbatim);
        let cfg = RelayConfig::from_sources(None, &HashMap::new()).unwrap();
        assert_eq!(cfg.html_policy(), HtmlPolicy::Escape);
    }
}
