use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde_json::{json, Map, Value};

use super::dispatch::Dispatcher;
use super::validate;
use super::SubmissionKind;

/// Public mail endpoints. `Generic` reads the kind from `templateType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Contact,
    Career,
    Blog,
    Generic,
}

impl Endpoint {
    fn success_message(&self) -> &'static str {
        match self {
            Self::Contact => "Contact form submitted successfully",
            Self::Career => "Career application submitted successfully",
            Self::Blog => "Blog comment submitted successfully",
            Self::Generic => "Email sent successfully",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Self::Contact => "Failed to submit contact form. Please try again later.",
            Self::Career => "Failed to submit career application. Please try again later.",
            Self::Blog => "Failed to submit blog comment. Please try again later.",
            Self::Generic => "Failed to send email. Please try again later.",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Career => "career",
            Self::Blog => "blog",
            Self::Generic => "send",
        }
    }
}

/// JSON reply with an explicit status.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: Status,
    pub body: Value,
}

impl Reply {
    pub fn error(status: Status, message: &str) -> Self {
        Reply {
            status,
            body: json!({"ok": false, "error": message}),
        }
    }
}

impl<'r> Responder<'r, 'static> for Reply {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        status::Custom(self.status, Json(self.body)).respond_to(req)
    }
}

/// Validate a raw body, dispatch it and shape the public reply. Internal
/// failure detail is logged, never returned.
pub async fn handle(dispatcher: &Dispatcher, endpoint: Endpoint, raw: &Map<String, Value>) -> Reply {
    let submission = match endpoint {
        Endpoint::Contact => validate::validate(SubmissionKind::Contact, raw),
        Endpoint::Career => validate::validate(SubmissionKind::Career, raw),
        Endpoint::Blog => validate::validate(SubmissionKind::Blog, raw),
        Endpoint::Generic => validate::validate_generic(raw),
    };

    let submission = match submission {
        Ok(s) => s,
        Err(e) => {
            log::warn!("[mail] Rejected {} submission: {}", endpoint.label(), e);
            return Reply::error(Status::BadRequest, &e.to_string());
        }
    };

    match dispatcher.dispatch(submission.kind, &submission.fields).await {
        Ok(outcome) => Reply {
            status: Status::Ok,
            body: json!({
                "ok": true,
                "message": endpoint.success_message(),
                "data": {
                    "adminEmail": outcome.admin_sent(),
                    "userEmail": outcome.user_sent(),
                },
            }),
        },
        Err(e) => {
            log::error!("[mail] {} submission failed: {}", endpoint.label(), e);
            Reply::error(Status::InternalServerError, endpoint.failure_message())
        }
    }
}
