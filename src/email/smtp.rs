use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use rocket::tokio::time::timeout;

use super::{DeliveryReceipt, OutgoingMail, Transport, TransportError};
use crate::config::{SmtpConfig, TlsMode};

/// lettre-backed SMTP relay. The underlying transport pools connections, so a
/// single instance serves every request.
pub struct SmtpRelay {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    timeout: Duration,
    host: String,
}

impl SmtpRelay {
    pub fn from_config(cfg: &SmtpConfig) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(cfg.timeout_secs.max(1));

        let mut builder = match cfg.tls {
            TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host)
                .map_err(|e| TransportError(format!("SMTP relay error: {}", e)))?,
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)
                .map_err(|e| TransportError(format!("SMTP relay error: {}", e)))?,
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&cfg.host),
        };

        builder = builder.port(cfg.port).timeout(Some(timeout));

        if !cfg.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                cfg.username.clone(),
                cfg.password.clone(),
            ));
        }

        Ok(SmtpRelay {
            mailer: builder.build(),
            timeout,
            host: cfg.host.clone(),
        })
    }
}

#[rocket::async_trait]
impl Transport for SmtpRelay {
    async fn send(&self, mail: &OutgoingMail) -> Result<DeliveryReceipt, TransportError> {
        let message_id = new_message_id(&mail.from_address);
        let message = build_message(mail, &message_id)?;

        match timeout(self.timeout, self.mailer.send(message)).await {
            Ok(Ok(_)) => Ok(DeliveryReceipt { message_id }),
            Ok(Err(e)) => Err(TransportError(format!("SMTP send error: {}", e))),
            Err(_) => Err(TransportError(format!(
                "SMTP send to {} timed out after {}s",
                self.host,
                self.timeout.as_secs()
            ))),
        }
    }

    async fn verify(&self) -> Result<(), TransportError> {
        match timeout(self.timeout, self.mailer.test_connection()).await {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(TransportError(format!(
                "SMTP server {} did not accept the connection",
                self.host
            ))),
            Ok(Err(e)) => Err(TransportError(format!("SMTP connection error: {}", e))),
            Err(_) => Err(TransportError(format!(
                "SMTP connection to {} timed out",
                self.host
            ))),
        }
    }
}

/// `<uuid@sender-domain>`, used both as the Message-ID header and the receipt.
fn new_message_id(from_address: &str) -> String {
    let domain = from_address
        .rsplit_once('@')
        .map(|(_, d)| d)
        .filter(|d| !d.is_empty())
        .unwrap_or("localhost");
    format!("<{}@{}>", uuid::Uuid::new_v4(), domain)
}

pub(crate) fn build_message(mail: &OutgoingMail, message_id: &str) -> Result<Message, TransportError> {
    let from_addr: Address = mail
        .from_address
        .parse()
        .map_err(|e| TransportError(format!("Invalid from address: {}", e)))?;
    let from_name = Some(mail.from_name.clone()).filter(|n| !n.is_empty());
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e| TransportError(format!("Invalid to address: {}", e)))?;

    let mut builder = Message::builder()
        .from(Mailbox::new(from_name, from_addr))
        .to(to)
        .subject(mail.subject.as_str())
        .message_id(Some(message_id.to_string()))
        .header(ContentType::TEXT_HTML);

    // An unusable Reply-To is dropped; the message still goes out.
    if let Some(reply_to) = mail.reply_to.as_deref() {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => log::warn!(
                "[mail] Dropping unparseable Reply-To {:?} for {}: {}",
                reply_to,
                mail.to,
                e
            ),
        }
    }

    builder
        .body(mail.html.clone())
        .map_err(|e| TransportError(format!("Failed to build email: {}", e)))
}
