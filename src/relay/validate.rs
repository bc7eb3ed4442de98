use lettre::Address;
use regex::Regex;
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::OnceLock;

use super::{Fields, MailError, Submission, SubmissionKind};
use crate::templates::{DEFAULT_POST_TITLE, NOT_PROVIDED, NOT_SPECIFIED, NO_COVER_LETTER};

/// Accepted fields for one submission kind.
pub struct Schema {
    pub required: &'static [&'static str],
    /// Optional fields and the value used when they are absent.
    pub optional: &'static [(&'static str, &'static str)],
}

const CONTACT: Schema = Schema {
    required: &["name", "email", "phone", "message"],
    optional: &[],
};

const CAREER: Schema = Schema {
    required: &["name", "email", "phone"],
    optional: &[("role", NOT_SPECIFIED), ("message", NO_COVER_LETTER)],
};

const BLOG: Schema = Schema {
    required: &["name", "email", "message"],
    optional: &[
        ("phone", NOT_PROVIDED),
        ("postTitle", DEFAULT_POST_TITLE),
        ("website", NOT_PROVIDED),
    ],
};

/// Fields the generic endpoint always needs, on top of the kind's own.
const GENERIC_REQUIRED: &[&str] = &["name", "email", "message"];

pub fn schema(kind: SubmissionKind) -> &'static Schema {
    match kind {
        SubmissionKind::Contact => &CONTACT,
        SubmissionKind::Career => &CAREER,
        SubmissionKind::Blog => &BLOG,
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// `local@domain.tld` without whitespace, and accepted by the mail builder
/// as an RFC 5321 address.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email) && Address::from_str(email).is_ok()
}

/// Read a raw JSON value as a form value. Blank strings, `null`, booleans and
/// nested values count as absent.
fn field_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Validate a dedicated-endpoint body against the kind's schema.
pub fn validate(kind: SubmissionKind, raw: &Map<String, Value>) -> Result<Submission, MailError> {
    normalize(kind, schema(kind).required, raw)
}

/// Validate a `/send` body: `templateType` picks the kind, and `name`,
/// `email` and `message` are required whatever the kind.
pub fn validate_generic(raw: &Map<String, Value>) -> Result<Submission, MailError> {
    let Some(tag) = raw.get("templateType").and_then(field_value) else {
        let mut missing = vec!["templateType"];
        missing.extend(
            GENERIC_REQUIRED
                .iter()
                .copied()
                .filter(|key| raw.get(*key).and_then(field_value).is_none()),
        );
        return Err(MailError::MissingRequiredFields(missing));
    };
    let kind = SubmissionKind::from_tag(&tag)?;

    let mut required: Vec<&'static str> = GENERIC_REQUIRED.to_vec();
    for key in schema(kind).required {
        if !required.contains(key) {
            required.push(*key);
        }
    }
    normalize(kind, &required, raw)
}

fn normalize(
    kind: SubmissionKind,
    required: &[&'static str],
    raw: &Map<String, Value>,
) -> Result<Submission, MailError> {
    let mut fields = Fields::new();
    let mut missing = Vec::new();

    for key in required {
        match raw.get(*key).and_then(field_value) {
            Some(v) => fields.insert(key, v),
            None => missing.push(*key),
        }
    }
    if !missing.is_empty() {
        return Err(MailError::MissingRequiredFields(missing));
    }

    for (key, default) in schema(kind).optional {
        if fields.contains(key) {
            continue;
        }
        let value = raw
            .get(*key)
            .and_then(field_value)
            .unwrap_or_else(|| default.to_string());
        fields.insert(key, value);
    }

    let email = fields.get_or("email", "");
    if !is_valid_email(email) {
        return Err(MailError::InvalidEmailFormat);
    }

    let dropped: Vec<&str> = raw
        .keys()
        .map(|k| k.as_str())
        .filter(|k| *k != "templateType" && !fields.contains(k))
        .collect();
    if !dropped.is_empty() {
        log::debug!("[mail] {} submission: ignoring fields {:?}", kind, dropped);
    }

    Ok(Submission { kind, fields })
}
