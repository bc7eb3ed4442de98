pub mod dispatch;
pub mod handlers;
pub mod validate;

use std::collections::BTreeMap;

use crate::email::DeliveryReceipt;

// ── Submission kinds ──────────────────────────────────

/// Closed set of submission categories. Each kind selects a template and a
/// validation schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    Contact,
    Career,
    Blog,
}

impl SubmissionKind {
    pub const ALL: [SubmissionKind; 3] = [Self::Contact, Self::Career, Self::Blog];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Contact => "CONTACT",
            Self::Career => "CAREER",
            Self::Blog => "BLOG",
        }
    }

    /// Resolve a textual `templateType`. Matching ignores case and
    /// surrounding whitespace.
    pub fn from_tag(tag: &str) -> Result<Self, MailError> {
        let wanted = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MailError::InvalidTemplateType(tag.to_string()))
    }
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

// ── Fields ────────────────────────────────────────────

/// Normalized form values, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(BTreeMap<String, String>);

impl Fields {
    pub fn new() -> Self {
        Fields(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Fields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A validated submission, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: SubmissionKind,
    pub fields: Fields,
}

// ── Outcome ───────────────────────────────────────────

/// Per-recipient result of one dispatch. A dispatch that returns this value
/// delivered to at least one of the two recipients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchOutcome {
    pub admin_delivery: Option<DeliveryReceipt>,
    pub admin_error: Option<String>,
    pub user_delivery: Option<DeliveryReceipt>,
    pub user_error: Option<String>,
}

impl DispatchOutcome {
    pub fn admin_sent(&self) -> bool {
        self.admin_delivery.is_some()
    }

    pub fn user_sent(&self) -> bool {
        self.user_delivery.is_some()
    }
}

// ── Errors ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum MailError {
    InvalidTemplateType(String),
    MissingRequiredFields(Vec<&'static str>),
    InvalidEmailFormat,
    BothDeliveriesFailed { admin: String, user: String },
}

impl std::fmt::Display for MailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTemplateType(tag) => {
                let valid: Vec<&str> = SubmissionKind::ALL.iter().map(|k| k.tag()).collect();
                write!(
                    f,
                    "Invalid template type: {}. Valid types: {}",
                    tag,
                    valid.join(", ")
                )
            }
            Self::MissingRequiredFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Self::InvalidEmailFormat => f.write_str("Invalid email address format"),
            Self::BothDeliveriesFailed { admin, user } => write!(
                f,
                "Failed to send both emails (admin: {}; user: {})",
                admin, user
            ),
        }
    }
}

impl std::error::Error for MailError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_tag_is_case_insensitive() {
        assert_eq!(SubmissionKind::from_tag("CONTACT"), Ok(SubmissionKind::Contact));
        assert_eq!(SubmissionKind::from_tag(" career "), Ok(SubmissionKind::Career));
        assert_eq!(SubmissionKind::from_tag("Blog"), Ok(SubmissionKind::Blog));
    }

    #[test]
    fn unknown_tag_lists_valid_types() {
        let err = SubmissionKind::from_tag("NEWSLETTER").unwrap_err();
        assert_eq!(err, MailError::InvalidTemplateType("NEWSLETTER".into()));
        assert_eq!(
            err.to_string(),
            "Invalid template type: NEWSLETTER. Valid types: CONTACT, CAREER, BLOG"
        );
    }

    #[test]
    fn missing_fields_message_keeps_order() {
        let err = MailError::MissingRequiredFields(vec!["email", "phone"]);
        assert_eq!(err.to_string(), "Missing required fields: email, phone");
    }

    #[test]
    fn total_failure_names_both_causes() {
        let err = MailError::BothDeliveriesFailed {
            admin: "refused".into(),
            user: "timeout".into(),
        };
        assert!(err.to_string().contains("refused"));
        assert!(err.to_string().contains("timeout"));
    }
}
