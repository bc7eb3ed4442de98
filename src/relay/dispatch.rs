use std::sync::Arc;

use super::{DispatchOutcome, Fields, MailError, SubmissionKind};
use crate::config::RelayConfig;
use crate::email::{OutgoingMail, Transport};
use crate::templates::{self, confirmation, HtmlPolicy};

pub const ADMIN_SUBJECT_PREFIX: &str = "[ADMIN] ";

/// Sends the admin copy and the submitter confirmation for one submission.
///
/// The two sends are independent: a failure for one recipient is recorded in
/// the outcome and never prevents the attempt to the other.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    sender_name: String,
    sender_email: String,
    admin_email: String,
    policy: HtmlPolicy,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, config: &RelayConfig) -> Self {
        Dispatcher {
            transport,
            sender_name: config.sender_name.clone(),
            sender_email: config.sender_email.clone(),
            admin_email: config.admin_email.clone(),
            policy: config.html_policy(),
        }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    pub async fn dispatch(
        &self,
        kind: SubmissionKind,
        fields: &Fields,
    ) -> Result<DispatchOutcome, MailError> {
        let submitter = fields.get_or("email", "");
        let content = templates::render(kind, fields, self.policy);
        let mut outcome = DispatchOutcome::default();

        let admin_mail = OutgoingMail {
            from_name: self.sender_name.clone(),
            from_address: self.sender_email.clone(),
            to: self.admin_email.clone(),
            reply_to: Some(submitter.to_string()).filter(|s| !s.is_empty()),
            subject: format!("{}{}", ADMIN_SUBJECT_PREFIX, content.subject),
            html: content.body,
        };
        match self.transport.send(&admin_mail).await {
            Ok(receipt) => {
                log::info!(
                    "[mail] Admin email sent ({}) to {} id={}",
                    kind,
                    self.admin_email,
                    receipt.message_id
                );
                outcome.admin_delivery = Some(receipt);
            }
            Err(e) => {
                log::error!("[mail] Failed to send admin email ({}): {}", kind, e);
                outcome.admin_error = Some(e.to_string());
            }
        }

        let ack = confirmation::render(
            fields.get_or("name", ""),
            fields.get_or("message", ""),
            &self.admin_email,
            &self.sender_name,
            self.policy,
        );
        let user_mail = OutgoingMail {
            from_name: self.sender_name.clone(),
            from_address: self.sender_email.clone(),
            to: submitter.to_string(),
            reply_to: None,
            subject: ack.subject,
            html: ack.body,
        };
        match self.transport.send(&user_mail).await {
            Ok(receipt) => {
                log::info!(
                    "[mail] Confirmation email sent ({}) to {} id={}",
                    kind,
                    submitter,
                    receipt.message_id
                );
                outcome.user_delivery = Some(receipt);
            }
            Err(e) => {
                log::error!("[mail] Failed to send confirmation email ({}): {}", kind, e);
                outcome.user_error = Some(e.to_string());
            }
        }

        if !outcome.admin_sent() && !outcome.user_sent() {
            return Err(MailError::BothDeliveriesFailed {
                admin: outcome.admin_error.unwrap_or_default(),
                user: outcome.user_error.unwrap_or_default(),
            });
        }

        Ok(outcome)
    }
}
