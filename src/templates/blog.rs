use super::{
    heading, link, mailto, notice, page, table, tel, text_block, HtmlPolicy, TemplateResult,
    DEFAULT_POST_TITLE, NOT_PROVIDED,
};
use crate::relay::Fields;

const ACCENT: &str = "#4facfe";

pub fn render(fields: &Fields, policy: HtmlPolicy) -> TemplateResult {
    let name = fields.get_or("name", "");
    let email = policy.apply(fields.get_or("email", ""));
    let phone = policy.apply(fields.get_or("phone", NOT_PROVIDED));
    let post = policy.apply(fields.get_or("postTitle", DEFAULT_POST_TITLE));
    let message = policy.apply(fields.get_or("message", ""));

    let content = [
        heading("Visitor Information"),
        table(
            ACCENT,
            &[
                ("Name", policy.apply(name).into_owned()),
                ("Email", mailto(ACCENT, &email)),
                ("Phone", tel(ACCENT, &phone)),
                ("Post", post.into_owned()),
                ("Website", website(fields.get_or("website", NOT_PROVIDED), policy)),
            ],
        ),
        text_block("Comment / Message:", &message),
        notice(
            "#e3f2fd",
            "#2196F3",
            "#1565c0",
            "Action",
            &format!(
                "Consider moderating this comment before publishing. Reply to {} if necessary.",
                email
            ),
        ),
    ]
    .join("\n");

    TemplateResult {
        subject: format!("New Blog Comment from {}", name),
        body: page(ACCENT, &content),
    }
}

/// Only http(s) URLs become links.
fn website(url: &str, policy: HtmlPolicy) -> String {
    let text = policy.apply(url);
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        link(ACCENT, &text, &text)
    } else {
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Fields {
        [
            ("name", "Lee"),
            ("email", "lee@example.com"),
            ("message", "Nice post"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn optional_rows_show_placeholders() {
        let out = render(&base(), HtmlPolicy::Escape);
        assert_eq!(out.subject, "New Blog Comment from Lee");
        assert!(out.body.contains("Website:</td>"));
        assert!(out.body.contains("Phone:</td>"));
        assert_eq!(out.body.matches(NOT_PROVIDED).count(), 2);
        assert!(out.body.contains(DEFAULT_POST_TITLE));
        assert!(!out.body.contains("tel:"));
    }

    #[test]
    fn only_http_urls_are_linked() {
        assert!(website("https://a.example", HtmlPolicy::Escape).contains("href=\"https://a.example\""));
        assert_eq!(website("javascript:alert(1)", HtmlPolicy::Escape), "javascript:alert(1)");
    }
}
